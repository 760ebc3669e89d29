//! Money-weighted return of a contribution plan
//!
//! The periodic internal rate is found with Newton-Raphson and falls back to
//! bisection when the derivative vanishes or the iteration stalls.

const TOLERANCE: f64 = 1e-10;
const MAX_ITERATIONS: usize = 1000;
const RATE_FLOOR: f64 = -0.99;
const RATE_CEILING: f64 = 10.0;

/// Annual effective rate that zeroes the NPV of `cashflows`.
///
/// `cashflows[t]` is the net flow at period `t` (negative = paid in).
/// Returns `None` for an empty series or one without a sign change.
pub fn annualized_irr(cashflows: &[f64], periods_per_year: u32) -> Option<f64> {
    periodic_irr(cashflows).map(|rate| annualize(rate, periods_per_year))
}

/// Compound a periodic rate up to an annual effective rate
pub fn annualize(periodic_rate: f64, periods_per_year: u32) -> f64 {
    (1.0 + periodic_rate).powi(periods_per_year as i32) - 1.0
}

/// Internal rate per period
pub fn periodic_irr(cashflows: &[f64]) -> Option<f64> {
    if cashflows.is_empty() {
        return None;
    }
    if cashflows.iter().all(|cf| cf.abs() < TOLERANCE) {
        return Some(0.0);
    }

    let paid_in = cashflows.iter().any(|&cf| cf < -TOLERANCE);
    let paid_out = cashflows.iter().any(|&cf| cf > TOLERANCE);
    if !paid_in || !paid_out {
        return None;
    }

    let mut rate = 0.005;
    for _ in 0..MAX_ITERATIONS {
        let (npv, slope) = npv_with_slope(cashflows, rate);
        if slope.abs() < 1e-20 {
            break;
        }

        let next = (rate - npv / slope).clamp(RATE_FLOOR, RATE_CEILING);
        if (next - rate).abs() < TOLERANCE {
            return Some(next);
        }
        rate = next;
    }

    bisect(cashflows)
}

fn npv(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// NPV and its derivative with respect to the rate
fn npv_with_slope(cashflows: &[f64], rate: f64) -> (f64, f64) {
    cashflows
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(value, slope), (t, &cf)| {
            let growth = (1.0 + rate).powi(t as i32);
            (
                value + cf / growth,
                slope - t as f64 * cf / (growth * (1.0 + rate)),
            )
        })
}

fn bisect(cashflows: &[f64]) -> Option<f64> {
    let mut low = RATE_FLOOR;
    let mut high = RATE_CEILING;
    let mut npv_low = npv(cashflows, low);

    if npv_low * npv(cashflows, high) > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv(cashflows, mid);

        if npv_mid.abs() < TOLERANCE || (high - low) / 2.0 < TOLERANCE {
            return Some(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}
