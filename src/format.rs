//! Display helpers shared by the trip sheet and its text export.

/// `YYYY-MM-DD` to `DD/MM/YYYY`. Input without two dashes is returned as is.
#[must_use]
pub fn to_dmy(iso: &str) -> String {
    let mut parts = iso.splitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(y), Some(m), Some(d)) => format!("{d}/{m}/{y}"),
        _ => iso.to_string(),
    }
}

/// Whole rupees with Indian digit grouping, e.g. `₹12,34,567`.
#[must_use]
pub fn money_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return "₹0".to_string();
    }
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    // saturating cast; trip totals are far below u64::MAX
    let digits = (rounded.abs() as u64).to_string();
    format!("{sign}₹{}", group_indian(&digits))
}

/// Last three digits, then groups of two.
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
    format!("{},{tail}", groups.join(","))
}
