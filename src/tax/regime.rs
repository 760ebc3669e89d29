//! Versioned income-tax slab tables and payroll deduction rates

use serde::{Deserialize, Serialize};

/// One progressive band: income in `floor..ceiling` is taxed at `rate`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub floor: f64,
    /// `None` for the open-ended top band
    pub ceiling: Option<f64>,
    pub rate: f64,
}

impl TaxSlab {
    /// Tax owed on the part of `taxable` falling inside this band
    pub fn tax_on(&self, taxable: f64) -> f64 {
        if taxable <= self.floor {
            return 0.0;
        }
        let top = match self.ceiling {
            Some(ceiling) => taxable.min(ceiling),
            None => taxable,
        };
        (top - self.floor) * self.rate
    }
}

/// Fixed tax policy applied to annual fixed pay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRegime {
    pub name: String,
    pub standard_deduction: f64,
    pub slabs: Vec<TaxSlab>,
    /// Surcharge on computed tax (0.04 = 4%)
    pub cess_rate: f64,
    /// Share of fixed pay treated as basic salary
    pub basic_share: f64,
    /// Provident fund contribution as a share of basic
    pub provident_fund_rate: f64,
    /// Flat annual professional tax
    pub professional_tax: f64,
}

impl TaxRegime {
    /// New regime slabs for FY 2024-25
    pub fn new_regime_fy2024_25() -> Self {
        let slab = |floor: f64, ceiling: Option<f64>, rate: f64| TaxSlab { floor, ceiling, rate };
        Self {
            name: "New regime FY 2024-25".to_string(),
            standard_deduction: 75_000.0,
            slabs: vec![
                slab(0.0, Some(300_000.0), 0.00),
                slab(300_000.0, Some(700_000.0), 0.05),
                slab(700_000.0, Some(1_000_000.0), 0.10),
                slab(1_000_000.0, Some(1_200_000.0), 0.15),
                slab(1_200_000.0, Some(1_500_000.0), 0.20),
                slab(1_500_000.0, None, 0.30),
            ],
            cess_rate: 0.04,
            basic_share: 0.40,
            provident_fund_rate: 0.12,
            professional_tax: 2_400.0,
        }
    }

    /// Income left after the standard deduction, floored at zero
    pub fn taxable_income(&self, annual_fixed_pay: f64) -> f64 {
        (annual_fixed_pay - self.standard_deduction).max(0.0)
    }

    /// Sum of every band's share, before cess
    pub fn slab_tax(&self, taxable_income: f64) -> f64 {
        self.slabs.iter().map(|s| s.tax_on(taxable_income)).sum()
    }

    pub fn provident_fund(&self, annual_fixed_pay: f64) -> f64 {
        annual_fixed_pay * self.basic_share * self.provident_fund_rate
    }
}

impl Default for TaxRegime {
    fn default() -> Self {
        Self::new_regime_fy2024_25()
    }
}
