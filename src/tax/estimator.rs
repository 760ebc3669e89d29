//! Gross fixed pay to monthly take-home

use serde::{Deserialize, Serialize};

use super::regime::TaxRegime;
use crate::error::{ensure_non_negative, Result};

/// Every intermediate figure of one estimate, annual unless noted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetIncomeBreakdown {
    pub annual_fixed_pay: f64,
    pub taxable_income: f64,
    pub slab_tax: f64,
    pub cess: f64,
    pub total_tax: f64,
    pub provident_fund: f64,
    pub professional_tax: f64,
    pub annual_net: f64,
    /// Floor of `annual_net / 12`; negative for very small pay
    pub monthly_net: i64,
}

/// Break down `annual_fixed_pay` under `regime`
pub fn estimate(regime: &TaxRegime, annual_fixed_pay: f64) -> Result<NetIncomeBreakdown> {
    let pay = ensure_non_negative("annual_fixed_pay", annual_fixed_pay)?;

    let taxable_income = regime.taxable_income(pay);
    let slab_tax = regime.slab_tax(taxable_income);
    let total_tax = slab_tax * (1.0 + regime.cess_rate);
    let provident_fund = regime.provident_fund(pay);
    let annual_net = pay - total_tax - provident_fund - regime.professional_tax;

    Ok(NetIncomeBreakdown {
        annual_fixed_pay: pay,
        taxable_income,
        slab_tax,
        cess: total_tax - slab_tax,
        total_tax,
        provident_fund,
        professional_tax: regime.professional_tax,
        annual_net,
        monthly_net: (annual_net / 12.0).floor() as i64,
    })
}

/// Monthly take-home under the FY 2024-25 new regime
pub fn estimate_monthly_net(annual_fixed_pay: f64) -> Result<i64> {
    estimate(&TaxRegime::new_regime_fy2024_25(), annual_fixed_pay).map(|b| b.monthly_net)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_pay_is_negative() {
        // Only professional tax remains: floor(-2400 / 12)
        assert_eq!(estimate_monthly_net(0.0).unwrap(), -200);
    }

    #[test]
    fn test_below_taxable_threshold() {
        assert_eq!(estimate_monthly_net(375_000.0).unwrap(), 29_550);
        assert_eq!(estimate_monthly_net(50_000.0).unwrap(), 3_766);
    }

    #[test]
    fn test_twelve_lakh() {
        let breakdown = estimate(&TaxRegime::default(), 1_200_000.0).unwrap();

        assert_eq!(breakdown.taxable_income, 1_125_000.0);
        assert!((breakdown.slab_tax - 68_750.0).abs() < 1e-6);
        assert!((breakdown.total_tax - 71_500.0).abs() < 1e-6);
        assert!((breakdown.cess - 2_750.0).abs() < 1e-6);
        assert!((breakdown.provident_fund - 57_600.0).abs() < 1e-6);
        assert_eq!(breakdown.monthly_net, 89_041);
    }

    #[test]
    fn test_top_band() {
        assert_eq!(estimate_monthly_net(2_000_000.0).unwrap(), 135_283);
    }

    #[test]
    fn test_rejects_bad_pay() {
        assert!(estimate_monthly_net(-1.0).is_err());
        assert!(estimate_monthly_net(f64::NAN).is_err());
    }

    #[test]
    fn test_net_grows_with_pay() {
        let mut previous = i64::MIN;
        for step in 0..100 {
            let net = estimate_monthly_net(step as f64 * 50_000.0).unwrap();
            assert!(net >= previous);
            previous = net;
        }
    }
}
