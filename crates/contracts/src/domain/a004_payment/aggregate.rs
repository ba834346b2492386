use crate::domain::a003_reservation::ReservationId;
use crate::shared::money::round2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

crate::integer_id!(
    /// Идентификатор платежа
    PaymentId
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Partial,
    Paid,
}

impl PaymentStatus {
    /// Wire value; blank or unknown text is `None`
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "UNPAID" => Some(PaymentStatus::Unpaid),
            "PARTIAL" => Some(PaymentStatus::Partial),
            "PAID" => Some(PaymentStatus::Paid),
            _ => None,
        }
    }

    pub fn from_amounts(amount_paid: f64, total_amount: f64) -> Self {
        if amount_paid <= 0.0 {
            PaymentStatus::Unpaid
        } else if amount_paid >= total_amount {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Partial
        }
    }
}

/// Serde adapter for `paymentStatus`: reservations without payments carry
/// `""` instead of `null`.
pub mod lenient_payment_status {
    use super::PaymentStatus;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<PaymentStatus>, s: S) -> Result<S::Ok, S::Error> {
        value.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<PaymentStatus>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        Ok(raw.as_deref().and_then(PaymentStatus::from_wire))
    }
}

/// What is still owed, never below zero
pub fn remaining_balance(total_amount: f64, amount_paid: f64) -> f64 {
    round2(total_amount - amount_paid).max(0.0)
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaymentError {
    #[error("Reservation id missing.")]
    MissingReservation,

    #[error("Please enter a valid amount.")]
    InvalidAmount,

    #[error("Reservation already fully paid.")]
    AlreadyPaid,

    #[error("Amount cannot be greater than remaining balance.")]
    ExceedsRemaining { remaining: f64 },
}

/// Client-side checks before a payment is sent; the server repeats them
pub fn validate_payment_amount(
    reservation_id: Option<ReservationId>,
    amount: f64,
    remaining: Option<f64>,
) -> Result<(), PaymentError> {
    if reservation_id.map_or(true, |id| id.0 <= 0) {
        return Err(PaymentError::MissingReservation);
    }
    if !amount.is_finite() || amount <= 0.0 {
        return Err(PaymentError::InvalidAmount);
    }
    if let Some(remaining) = remaining.filter(|r| r.is_finite()) {
        if remaining <= 0.0 {
            return Err(PaymentError::AlreadyPaid);
        }
        if amount > remaining {
            return Err(PaymentError::ExceedsRemaining { remaining });
        }
    }
    Ok(())
}

/// Body of `POST /api/payments`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub reservation_id: ReservationId,
    pub amount: f64,
    pub method: String,
    pub note: String,
}

/// Reply with the updated totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentReceipt {
    pub success: Option<bool>,
    pub message: Option<String>,
    pub payment_id: Option<PaymentId>,
    pub amount_paid: Option<f64>,
    pub remaining: Option<f64>,
    #[serde(with = "lenient_payment_status")]
    pub payment_status: Option<PaymentStatus>,
}

/// Row of `/api/payments/history`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default)]
    pub payment_id: Option<PaymentId>,
    #[serde(default)]
    pub reservation_id: Option<ReservationId>,
    #[serde(default)]
    pub paid_amount: f64,
    /// Timestamp as sent by the server; only displayed
    #[serde(default)]
    pub paid_date: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentHistoryResponse {
    #[serde(default)]
    pub payments: Vec<Payment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_status_from_amounts() {
        assert_eq!(PaymentStatus::from_amounts(0.0, 100.0), PaymentStatus::Unpaid);
        assert_eq!(PaymentStatus::from_amounts(40.0, 100.0), PaymentStatus::Partial);
        assert_eq!(PaymentStatus::from_amounts(100.0, 100.0), PaymentStatus::Paid);
    }

    #[test]
    fn test_remaining_balance() {
        assert_eq!(remaining_balance(310.0, 100.1), 209.9);
        assert_eq!(remaining_balance(100.0, 120.0), 0.0);
    }

    #[test]
    fn test_validate_payment_amount() {
        let id = Some(ReservationId(1));
        assert_eq!(validate_payment_amount(id, 50.0, Some(100.0)), Ok(()));
        assert_eq!(validate_payment_amount(id, 50.0, None), Ok(()));
        assert_eq!(
            validate_payment_amount(None, 50.0, Some(100.0)),
            Err(PaymentError::MissingReservation)
        );
        assert_eq!(
            validate_payment_amount(id, 0.0, Some(100.0)),
            Err(PaymentError::InvalidAmount)
        );
        assert_eq!(
            validate_payment_amount(id, f64::NAN, Some(100.0)),
            Err(PaymentError::InvalidAmount)
        );
        assert_eq!(
            validate_payment_amount(id, 150.0, Some(100.0)),
            Err(PaymentError::ExceedsRemaining { remaining: 100.0 })
        );
        assert_eq!(
            validate_payment_amount(id, 10.0, Some(0.0)),
            Err(PaymentError::AlreadyPaid)
        );
    }

    #[test]
    fn test_status_wire_format() {
        let s: PaymentStatus = serde_json::from_str(r#""PARTIAL""#).unwrap();
        assert_eq!(s, PaymentStatus::Partial);
        assert_eq!(PaymentStatus::from_wire(" paid "), Some(PaymentStatus::Paid));
        assert_eq!(PaymentStatus::from_wire(""), None);
        assert_eq!(PaymentStatus::from_wire("REFUNDED"), None);
    }

    #[test]
    fn test_receipt_without_balance() {
        let receipt: PaymentReceipt =
            serde_json::from_str(r#"{"success":true,"paymentId":41}"#).unwrap();
        assert_eq!(receipt.payment_id, Some(PaymentId(41)));
        assert_eq!(receipt.remaining, None);
        assert_eq!(receipt.payment_status, None);

        let receipt: PaymentReceipt =
            serde_json::from_str(r#"{"success":true,"paymentStatus":""}"#).unwrap();
        assert_eq!(receipt.payment_status, None);
    }
}
