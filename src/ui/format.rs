//! Display formatting for counts and amounts.

use npdb_dashboard::data::aggregate::round_cents;

/// Shown where a median has no input values.
pub const NONE_LABEL: &str = "None";

/// Insert `,` thousands separators into an unsigned integer.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn count(n: usize) -> String {
    group_thousands(n as u64)
}

/// `1234.5` → `"1,234.50"`, rounded to cents.
pub fn decimal(value: f64) -> String {
    let rounded = round_cents(value);
    let sign = if rounded < 0.0 { "-" } else { "" };
    let abs = rounded.abs();
    let whole = abs.trunc() as u64;
    let cents = ((abs - abs.trunc()) * 100.0).round() as u64;
    format!("{sign}{}.{cents:02}", group_thousands(whole))
}

/// `1234.5` → `"$1,234.50"`.
pub fn currency(value: f64) -> String {
    format!("${}", decimal(value))
}

/// Whole dollars, as on the nationwide summary card.
pub fn currency_whole(value: f64) -> String {
    let whole = value.trunc();
    let sign = if whole < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(whole.abs() as u64))
}

pub fn optional_decimal(value: Option<f64>) -> String {
    value.map(decimal).unwrap_or_else(|| NONE_LABEL.to_string())
}

pub fn optional_currency(value: Option<f64>) -> String {
    value.map(currency).unwrap_or_else(|| NONE_LABEL.to_string())
}
