use rust_decimal::prelude::*;

const ZERO_USD: &str = "0.00";

/// Parses a decimal string the way price feeds send them.
///
/// Surrounding whitespace, a leading sign and scientific notation (`"1e-3"`) are
/// accepted. Anything else, including the empty string, yields `None`.
pub fn parse_decimal(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Multiplies a balance by a unit price and renders it with exactly two decimals.
///
/// Returns `"0.00"` when either side is empty or unparseable. Rounding is half away
/// from zero on the exact decimal product. Amounts beyond `Decimal`'s range fall back
/// to an `f64` product.
pub fn get_usd_price(balance: &str, unit_price: &str) -> String {
    if let (Some(balance), Some(unit_price)) = (parse_decimal(balance), parse_decimal(unit_price)) {
        if let Some(total) = balance.checked_mul(unit_price) {
            let rounded = total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            return format!("{:.2}", rounded);
        }
    }

    match (parse_finite_f64(balance), parse_finite_f64(unit_price)) {
        (Some(balance), Some(unit_price)) if (balance * unit_price).is_finite() => {
            tracing::debug!(balance, unit_price, "USD price outside decimal range");
            format!("{:.2}", balance * unit_price)
        }
        _ => ZERO_USD.to_string(),
    }
}

fn parse_finite_f64(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Formats a USD amount for display: `$` prefix, two decimals, Indian digit grouping
/// (`1234567.5` becomes `"$12,34,567.50"`).
///
/// Non-finite input renders as `"$0.00"`.
pub fn format_usd_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("${}", ZERO_USD);
    }
    let digits = match Decimal::from_f64(value) {
        Some(amount) => format!(
            "{:.2}",
            amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        None => format!("{:.2}", value),
    };

    let (negative, magnitude) = match digits.strip_prefix('-') {
        Some(magnitude) => (true, magnitude),
        None => (false, digits.as_str()),
    };
    let (integer, fraction) = magnitude.split_once('.').unwrap_or((magnitude, "00"));
    let sign = if negative && magnitude.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        "-"
    } else {
        ""
    };

    format!("{}${}.{}", sign, group_indian(integer), fraction)
}

/// Last three digits form the first group, every group after that has two.
fn group_indian(integer: &str) -> String {
    if integer.len() <= 3 {
        return integer.to_string();
    }
    let (head, tail) = integer.split_at(integer.len() - 3);

    let mut groups: Vec<&str> = Vec::with_capacity(head.len() / 2 + 2);
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}
