pub mod aggregate;

pub use aggregate::{
    lenient_payment_status, remaining_balance, validate_payment_amount, Payment, PaymentError,
    PaymentHistoryResponse, PaymentId, PaymentReceipt, PaymentRequest, PaymentStatus,
};
