//! Nightly-rate pricing for a reservation.
//!
//! Pure and deterministic: the same input always yields bit-identical output,
//! so the form can recompute on every keystroke without drift.

use crate::shared::money::round2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PricingInput {
    pub nights: u32,
    pub rate_per_night: f64,
    pub tax_rate_percent: f64,
    pub discount: f64,
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

impl PricingInput {
    /// Negative and non-finite amounts are treated as 0
    pub fn new(nights: u32, rate_per_night: f64, tax_rate_percent: f64, discount: f64) -> Self {
        Self {
            nights,
            rate_per_night: non_negative(rate_per_night),
            tax_rate_percent: non_negative(tax_rate_percent),
            discount: non_negative(discount),
        }
    }
}

/// Computed money values, all rounded to 2 decimals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingAmounts {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
}

/// Result of [`compute_pricing`].
///
/// `amounts` is `None` while pricing is not computable (no nights or no
/// rate yet), which the form shows as blank rather than `$0.00`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PricingResult {
    pub nights: u32,
    pub rate: f64,
    pub amounts: Option<PricingAmounts>,
}

impl PricingResult {
    pub fn is_computable(&self) -> bool {
        self.amounts.is_some()
    }
}

pub fn compute_pricing(input: &PricingInput) -> PricingResult {
    let nights = input.nights;
    let rate = input.rate_per_night;

    if nights == 0 || rate <= 0.0 {
        return PricingResult {
            nights,
            rate,
            amounts: None,
        };
    }

    let subtotal = round2(f64::from(nights) * rate);
    let tax_amount = round2(subtotal * input.tax_rate_percent / 100.0);
    // an oversized discount floors the total at zero instead of failing
    let total = round2(subtotal + tax_amount - input.discount).max(0.0);

    PricingResult {
        nights,
        rate,
        amounts: Some(PricingAmounts {
            subtotal,
            tax_amount,
            total,
        }),
    }
}

/// Tax rate to show when editing a saved reservation.
///
/// Older records carry only the tax amount; the rate is then recovered from
/// the subtotal.
pub fn derive_tax_rate(saved_rate: Option<f64>, subtotal: f64, tax_amount: f64) -> f64 {
    match saved_rate {
        Some(rate) if rate.is_finite() => rate,
        _ if subtotal > 0.0 && tax_amount.is_finite() => round2(tax_amount / subtotal * 100.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amounts(nights: u32, rate: f64, tax: f64, discount: f64) -> PricingAmounts {
        compute_pricing(&PricingInput::new(nights, rate, tax, discount))
            .amounts
            .expect("computable")
    }

    #[test]
    fn test_three_nights_with_tax_and_discount() {
        let a = amounts(3, 100.0, 10.0, 20.0);
        assert_eq!(a.subtotal, 300.0);
        assert_eq!(a.tax_amount, 30.0);
        assert_eq!(a.total, 310.0);
    }

    #[test]
    fn test_total_floored_at_zero() {
        let a = amounts(2, 50.0, 0.0, 150.0);
        assert_eq!(a.subtotal, 100.0);
        assert_eq!(a.total, 0.0);
        assert!(a.total.is_sign_positive());
    }

    #[test]
    fn test_not_computable_without_nights_or_rate() {
        let r = compute_pricing(&PricingInput::new(0, 100.0, 10.0, 0.0));
        assert_eq!(r.amounts, None);
        assert_eq!(r.rate, 100.0);

        let r = compute_pricing(&PricingInput::new(2, 0.0, 10.0, 0.0));
        assert_eq!(r.amounts, None);
        assert_eq!(r.nights, 2);
    }

    #[test]
    fn test_subtotal_matches_rounded_product() {
        for nights in 1..15u32 {
            for rate in [0.01, 33.33, 49.995, 99.99, 120.5, 1234.567] {
                let a = amounts(nights, rate, 7.5, 0.0);
                assert_eq!(a.subtotal, round2(f64::from(nights) * rate));
                assert!(a.subtotal >= 0.0);
                assert_eq!(a.total, round2(a.subtotal + a.tax_amount).max(0.0));
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let input = PricingInput::new(4, 87.35, 12.5, 13.7);
        let first = compute_pricing(&input);
        let second = compute_pricing(&input);
        assert_eq!(first.amounts.map(|a| a.total.to_bits()), second.amounts.map(|a| a.total.to_bits()));
        assert_eq!(first, second);
    }

    #[test]
    fn test_negative_inputs_sanitized() {
        let a = amounts(1, 100.0, -5.0, -10.0);
        assert_eq!(a.tax_amount, 0.0);
        assert_eq!(a.total, 100.0);
    }

    #[test]
    fn test_derive_tax_rate() {
        assert_eq!(derive_tax_rate(Some(12.0), 300.0, 30.0), 12.0);
        assert_eq!(derive_tax_rate(None, 300.0, 30.0), 10.0);
        assert_eq!(derive_tax_rate(None, 0.0, 30.0), 0.0);
        assert_eq!(derive_tax_rate(Some(f64::NAN), 200.0, 25.0), 12.5);
    }
}
