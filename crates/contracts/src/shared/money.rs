//! Money rounding and formatting

/// Currency prefix used in every formatted amount
pub const CURRENCY_PREFIX: &str = "$";

/// Round to 2 decimal places, half-up.
///
/// The value is nudged by `f64::EPSILON` first so that products such as
/// `1.005 * 100` that land just under the half due to binary representation
/// still round up.
///
/// ```
/// use contracts::shared::money::round2;
/// assert_eq!(round2(1.005), 1.01);
/// assert_eq!(round2(2.344), 2.34);
/// ```
pub fn round2(value: f64) -> f64 {
    ((value + f64::EPSILON) * 100.0 + 0.5).floor() / 100.0
}

/// Format an amount as `$1234.50`.
///
/// Missing, NaN and infinite values format as zero.
///
/// ```
/// use contracts::shared::money::format_money;
/// assert_eq!(format_money(12.5), "$12.50");
/// assert_eq!(format_money(None::<f64>), "$0.00");
/// ```
pub fn format_money(value: impl Into<Option<f64>>) -> String {
    let amount = match value.into() {
        Some(v) if v.is_finite() => round2(v),
        _ => 0.0,
    };
    format!("{}{:.2}", CURRENCY_PREFIX, amount)
}

/// Lenient parse of a free-text numeric field (tax rate, discount, amount).
///
/// Anything that is not a finite number reads as 0.
pub fn parse_amount_input(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
