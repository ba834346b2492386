use crate::shared::api_utils::{api_url, api_url_with_query, get_json, send};
use crate::shared::gateway::GatewayError;
use contracts::domain::a003_reservation::ReservationId;
use contracts::domain::a004_payment::{
    Payment, PaymentHistoryResponse, PaymentReceipt, PaymentRequest,
};
use gloo_net::http::Request;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryQuery {
    reservation_id: ReservationId,
}

/// `POST /api/payments`
pub async fn record_payment(
    base: &str,
    request: &PaymentRequest,
) -> Result<PaymentReceipt, GatewayError> {
    let request = Request::post(&api_url(base, "/api/payments"))
        .json(request)
        .map_err(|e| GatewayError::Encode(e.to_string()))?;
    send(request, "Payment failed").await
}

/// `GET /api/payments/history?reservationId=`
pub async fn fetch_payment_history(
    base: &str,
    reservation_id: ReservationId,
) -> Result<Vec<Payment>, GatewayError> {
    let url = api_url_with_query(
        base,
        "/api/payments/history",
        &HistoryQuery { reservation_id },
    )?;
    let response: PaymentHistoryResponse =
        get_json(&url, "Failed to load payment history").await?;
    Ok(response.payments)
}
