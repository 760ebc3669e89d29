//! Investment simulator, plan returns and the advice boundary

mod simulator;
mod returns;
pub mod advice;

pub use simulator::{simulate, InvestmentRun, InvestmentScenario, InvestmentSnapshot, MAX_YEARS};
pub use returns::{annualize, annualized_irr, periodic_irr};
pub use advice::{
    request_advice, resolve_advice, Advice, AdviceContext, AdviceError, AdviceSource,
    ResolvedAdvice, SuggestedParams,
};
