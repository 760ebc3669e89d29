//! Net-income estimator over a fixed tax slab table

mod regime;
mod estimator;

pub use regime::{TaxRegime, TaxSlab};
pub use estimator::{estimate, estimate_monthly_net, NetIncomeBreakdown};
