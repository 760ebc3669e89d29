//! Boundary to an external advice service that suggests plan parameters
//!
//! The simulator never talks to the service. Callers fetch a suggestion
//! through an [`AdviceSource`] and fold it into a scenario with
//! [`resolve_advice`].

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::simulator::{InvestmentScenario, MAX_YEARS};
use crate::ledger::{aggregate, Transaction};
use crate::profile::Profile;

/// Shown to the user whenever the service fails
pub const FALLBACK_MESSAGE: &str =
    "### Error\nSorry, I had trouble analyzing that plan. Can you try again?";

pub const DEFAULT_RATE_PERCENT: f64 = 12.0;
pub const DEFAULT_YEARS: u32 = 5;

#[derive(Debug, Error)]
pub enum AdviceError {
    #[error("advice service unavailable: {0}")]
    Unavailable(String),

    #[error("malformed advice response: {0}")]
    Malformed(String),
}

/// Parameters the service extracted from the user's prompt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedParams {
    pub principal: Option<f64>,
    pub monthly_contribution: Option<f64>,
    pub rate: Option<f64>,
    pub years: Option<u32>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    /// Markdown-ish explanation for display
    pub explanation: String,
    pub params: Option<SuggestedParams>,
}

/// Financial snapshot handed to the service with the prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceContext {
    pub monthly_income: f64,
    pub base_balance: f64,
    pub current_balance: f64,
    pub monthly_spending: f64,
    /// `None` when there is no income to measure against
    pub savings_rate_percent: Option<f64>,
}

impl AdviceContext {
    pub fn build(profile: &Profile, transactions: &[Transaction], reference: NaiveDate) -> Self {
        let summary = aggregate(profile.base_balance, transactions, reference);
        let income = profile.monthly_income;
        let spending = summary.monthly_expense_actual;

        Self {
            monthly_income: income,
            base_balance: profile.base_balance,
            current_balance: summary.current_balance,
            monthly_spending: spending,
            savings_rate_percent: (income > 0.0).then(|| (income - spending) / income * 100.0),
        }
    }
}

impl fmt::Display for AdviceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Monthly Income: {:.0}", self.monthly_income)?;
        writeln!(f, "Current Savings Balance: {:.0}", self.current_balance)?;
        writeln!(f, "Approx Monthly Spending: {:.0}", self.monthly_spending)?;
        match self.savings_rate_percent {
            Some(rate) => write!(f, "Est. Savings Rate: {rate:.1}%"),
            None => write!(f, "Est. Savings Rate: n/a"),
        }
    }
}

/// Anything that can turn a prompt into a suggestion
pub trait AdviceSource {
    fn suggest(&self, prompt: &str, context: &AdviceContext) -> Result<Advice, AdviceError>;
}

impl<F> AdviceSource for F
where
    F: Fn(&str, &AdviceContext) -> Result<Advice, AdviceError>,
{
    fn suggest(&self, prompt: &str, context: &AdviceContext) -> Result<Advice, AdviceError> {
        self(prompt, context)
    }
}

/// Scenario to simulate next plus the message to show
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAdvice {
    pub scenario: InvestmentScenario,
    pub message: String,
    /// Whether the scenario came from the service
    pub applied: bool,
}

/// Fold a service outcome into the current scenario.
///
/// Zero or missing amounts become 0, a zero or missing rate becomes 12%
/// and zero or missing years become 5. Longer horizons are capped at
/// [`MAX_YEARS`]. Errors keep the current scenario and
/// return the fixed fallback message.
pub fn resolve_advice(
    current: &InvestmentScenario,
    outcome: Result<Advice, AdviceError>,
) -> ResolvedAdvice {
    let advice = match outcome {
        Ok(advice) => advice,
        Err(err) => {
            log::warn!("advice request failed: {err}");
            return ResolvedAdvice {
                scenario: current.clone(),
                message: FALLBACK_MESSAGE.to_string(),
                applied: false,
            };
        }
    };

    let Some(params) = advice.params else {
        return ResolvedAdvice {
            scenario: current.clone(),
            message: advice.explanation,
            applied: false,
        };
    };

    let amount = |value: Option<f64>| value.filter(|v| v.is_finite()).unwrap_or(0.0);
    let scenario = InvestmentScenario {
        name: params.name.unwrap_or_else(|| current.name.clone()),
        principal: amount(params.principal),
        monthly_contribution: amount(params.monthly_contribution),
        annual_rate_percent: params
            .rate
            .filter(|r| r.is_finite() && *r != 0.0)
            .unwrap_or(DEFAULT_RATE_PERCENT),
        years: params
            .years
            .filter(|y| *y > 0)
            .map_or(DEFAULT_YEARS, |y| y.min(MAX_YEARS)),
    };

    ResolvedAdvice {
        scenario,
        message: advice.explanation,
        applied: true,
    }
}

/// Ask `source` for a suggestion and resolve it against `current`
pub fn request_advice<S: AdviceSource + ?Sized>(
    source: &S,
    prompt: &str,
    context: &AdviceContext,
    current: &InvestmentScenario,
) -> ResolvedAdvice {
    resolve_advice(current, source.suggest(prompt, context))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Category, TransactionKind};

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 15).unwrap()
    }

    fn spend(amount: f64, month: u32) -> Transaction {
        let at = NaiveDate::from_ymd_opt(2026, month, 3)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        Transaction::new(amount, TransactionKind::Expense, Category::Food, at, None).unwrap()
    }

    #[test]
    fn test_context_savings_rate() {
        let profile = Profile {
            base_balance: 10_000.0,
            monthly_income: 50_000.0,
            ..Profile::default()
        };
        let txs = vec![spend(10_000.0, 5), spend(7_000.0, 4)];
        let context = AdviceContext::build(&profile, &txs, reference());

        assert_eq!(context.monthly_spending, 10_000.0);
        assert_eq!(context.current_balance, -7_000.0);
        assert_eq!(context.savings_rate_percent, Some(80.0));
        assert!(context.to_string().contains("Est. Savings Rate: 80.0%"));
    }

    #[test]
    fn test_context_without_income() {
        let context = AdviceContext::build(&Profile::default(), &[], reference());
        assert_eq!(context.savings_rate_percent, None);
    }

    #[test]
    fn test_error_falls_back() {
        let current = InvestmentScenario::default();
        let resolved = resolve_advice(&current, Err(AdviceError::Unavailable("offline".into())));

        assert_eq!(resolved.scenario, current);
        assert_eq!(resolved.message, FALLBACK_MESSAGE);
        assert!(!resolved.applied);
    }

    #[test]
    fn test_missing_params_use_defaults() {
        let advice = Advice {
            explanation: "### Plan Analysis\n* Index fund".to_string(),
            params: Some(SuggestedParams {
                principal: None,
                monthly_contribution: Some(5_000.0),
                rate: Some(0.0),
                years: None,
                name: Some("Nifty SIP".to_string()),
            }),
        };
        let resolved = resolve_advice(&InvestmentScenario::default(), Ok(advice));

        assert!(resolved.applied);
        assert_eq!(resolved.scenario.principal, 0.0);
        assert_eq!(resolved.scenario.monthly_contribution, 5_000.0);
        assert_eq!(resolved.scenario.annual_rate_percent, 12.0);
        assert_eq!(resolved.scenario.years, 5);
        assert_eq!(resolved.scenario.name, "Nifty SIP");
    }

    #[test]
    fn test_long_horizon_is_capped() {
        let advice = Advice {
            explanation: "Retire early".to_string(),
            params: Some(SuggestedParams {
                principal: Some(1_000.0),
                monthly_contribution: None,
                rate: Some(10.0),
                years: Some(u32::MAX),
                name: None,
            }),
        };
        let resolved = resolve_advice(&InvestmentScenario::default(), Ok(advice));

        assert_eq!(resolved.scenario.years, MAX_YEARS);
        let run = resolved.scenario.simulate().unwrap();
        assert_eq!(run.snapshots.len(), MAX_YEARS as usize + 1);
    }

    #[test]
    fn test_explanation_only_keeps_scenario() {
        let current = InvestmentScenario::default();
        let advice = Advice {
            explanation: "Need more detail".to_string(),
            params: None,
        };
        let resolved = resolve_advice(&current, Ok(advice));
        assert_eq!(resolved.scenario, current);
        assert_eq!(resolved.message, "Need more detail");
    }

    #[test]
    fn test_closure_source() {
        let source = |prompt: &str, _: &AdviceContext| -> Result<Advice, AdviceError> {
            if prompt.is_empty() {
                return Err(AdviceError::Malformed("empty prompt".into()));
            }
            Ok(Advice {
                explanation: format!("Simulating: {prompt}"),
                params: Some(SuggestedParams {
                    principal: Some(50_000.0),
                    monthly_contribution: Some(2_000.0),
                    rate: Some(7.0),
                    years: Some(3),
                    name: None,
                }),
            })
        };
        let context = AdviceContext::build(&Profile::default(), &[], reference());
        let current = InvestmentScenario::default();

        let resolved = request_advice(&source, "FD for 3 years", &context, &current);
        assert_eq!(resolved.scenario.annual_rate_percent, 7.0);
        assert_eq!(resolved.scenario.years, 3);
        assert_eq!(resolved.scenario.name, "Default plan");

        let failed = request_advice(&source, "", &context, &current);
        assert_eq!(failed.message, FALLBACK_MESSAGE);
    }
}
