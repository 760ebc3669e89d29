//! Rupee formatting for terminal output

/// Short form used on summary lines: crore, lakh or thousands
pub fn format_compact(amount: f64) -> String {
    if amount >= 1e7 {
        format!("₹{:.2} Cr", amount / 1e7)
    } else if amount >= 1e5 {
        format!("₹{:.2} L", amount / 1e5)
    } else {
        format!("₹{:.1}k", amount / 1e3)
    }
}

/// Whole rupees with Indian digit grouping, e.g. `₹1,23,45,678`
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    format!("{sign}₹{}", group_indian(&digits))
}

/// Last three digits, then pairs
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
