use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// Rupiah with dot thousands separators and no forced decimals:
/// `150000` → `Rp 150.000`, `85.5` → `Rp 85,5`.
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let digits = rounded.abs().to_string();
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(fraction) => format!("{sign}Rp {grouped},{fraction}"),
        None => format!("{sign}Rp {grouped}"),
    }
}

/// `Tue, Jul 15, 2025`
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}
