//! Wealth projection: monthly savings accumulation with yearly snapshots

mod state;
mod engine;
mod snapshots;

pub use state::ProjectionState;
pub use engine::{project, ProjectionConfig, WealthProjector};
pub use snapshots::{ProjectionResult, ProjectionSnapshot, ProjectionSummary};
