//! API utilities for frontend-backend communication
//!
//! URL construction, request sending and the shared response decoding used by
//! every `api.rs` module.

use super::gateway::GatewayError;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Context path of the deployed backend
pub const DEFAULT_BASE_PATH: &str = "/OceanViewResortBooking";

/// Config value that asks for the base path to be taken from the page URL
pub const AUTO_BASE_PATH: &str = "auto";

/// First path segment of `pathname` when the page is served below a context
/// path, e.g. `/OceanViewResortBooking/admin/dashboard.html` ->
/// `/OceanViewResortBooking`. Empty for pages at the root.
pub fn base_path_from_pathname(pathname: &str) -> String {
    let parts: Vec<&str> = pathname.split('/').filter(|p| !p.is_empty()).collect();
    if parts.len() > 1 {
        format!("/{}", parts[0])
    } else {
        String::new()
    }
}

/// Resolve the configured base path.
///
/// `auto` reads the current window location; outside a browser it falls back
/// to [`DEFAULT_BASE_PATH`].
pub fn api_base(configured: &str) -> String {
    if configured.trim() != AUTO_BASE_PATH {
        return configured.trim().trim_end_matches('/').to_string();
    }
    let pathname = web_sys::window().and_then(|w| w.location().pathname().ok());
    match pathname {
        Some(p) => base_path_from_pathname(&p),
        None => DEFAULT_BASE_PATH.to_string(),
    }
}

/// Build a full API URL from a resolved base and a path starting with `/api/`
pub fn api_url(base: &str, path: &str) -> String {
    format!("{}{}", base, path)
}

/// `path?query` with the query encoded by serde_qs
pub fn api_url_with_query<Q: Serialize>(
    base: &str,
    path: &str,
    query: &Q,
) -> Result<String, GatewayError> {
    let qs = serde_qs::to_string(query).map_err(|e| GatewayError::Encode(e.to_string()))?;
    Ok(format!("{}{}?{}", base, path, qs))
}

/// Printable invoice page for a reservation
pub fn invoice_url(base: &str, reservation_id: i64) -> String {
    let id = reservation_id.to_string();
    format!(
        "{}/api/invoice?reservationId={}",
        base,
        urlencoding::encode(&id)
    )
}

/// Envelope fields every backend reply may carry
#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

/// Turn a raw HTTP reply into a typed payload.
///
/// - non-2xx: `Http` with the server's `message` or `"{fallback} ({status})"`
/// - `success: false`: `Rejected` with the server's message
/// - body that does not match `T`: `Decode`
///
/// An empty body decodes as `{}`, so payloads with all-default fields accept
/// bare `204` replies.
pub fn decode_response<T: DeserializeOwned>(
    status: u16,
    body: &str,
    fallback: &str,
) -> Result<T, GatewayError> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    let envelope = serde_json::from_str::<Envelope>(body).unwrap_or_default();
    let server_message = envelope.message.filter(|m| !m.trim().is_empty());

    if !(200..300).contains(&status) {
        return Err(GatewayError::Http {
            status,
            message: server_message.unwrap_or_else(|| format!("{} ({})", fallback, status)),
        });
    }
    if envelope.success == Some(false) {
        return Err(GatewayError::Rejected(
            server_message.unwrap_or_else(|| fallback.to_string()),
        ));
    }
    serde_json::from_str::<T>(body).map_err(|e| GatewayError::Decode(e.to_string()))
}

/// Send a built request and decode its reply
pub async fn send<T: DeserializeOwned>(request: Request, fallback: &str) -> Result<T, GatewayError> {
    let response = request
        .send()
        .await
        .map_err(|e| GatewayError::Network(e.to_string()))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| GatewayError::Network(e.to_string()))?;
    if !(200..300).contains(&status) {
        log::warn!("{} -> HTTP {}", response.url(), status);
    }
    decode_response(status, &body, fallback)
}

/// `GET` shorthand
pub async fn get_json<T: DeserializeOwned>(url: &str, fallback: &str) -> Result<T, GatewayError> {
    let request = Request::get(url)
        .header("Accept", "application/json")
        .build()
        .map_err(|e| GatewayError::Encode(e.to_string()))?;
    send(request, fallback).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_room::RoomsResponse;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Ack {
        message: Option<String>,
    }

    #[test]
    fn test_base_path_from_pathname() {
        assert_eq!(
            base_path_from_pathname("/OceanViewResortBooking/admin/dashboard.html"),
            "/OceanViewResortBooking"
        );
        assert_eq!(base_path_from_pathname("/index.html"), "");
        assert_eq!(base_path_from_pathname("/"), "");
    }

    #[test]
    fn test_api_base_uses_configured_value() {
        assert_eq!(api_base("/OceanViewResortBooking/"), "/OceanViewResortBooking");
        assert_eq!(api_base(""), "");
    }

    #[test]
    fn test_urls() {
        assert_eq!(api_url("/app", "/api/rooms"), "/app/api/rooms");
        assert_eq!(invoice_url("/app", 12), "/app/api/invoice?reservationId=12");

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Window {
            check_in: &'static str,
            check_out: &'static str,
        }
        let url = api_url_with_query(
            "/app",
            "/api/rooms/availability",
            &Window {
                check_in: "2024-06-01",
                check_out: "2024-06-02",
            },
        )
        .unwrap();
        assert_eq!(
            url,
            "/app/api/rooms/availability?checkIn=2024-06-01&checkOut=2024-06-02"
        );
    }

    #[test]
    fn test_decode_ok() {
        let rooms: RoomsResponse = decode_response(
            200,
            r#"{"success":true,"rooms":[{"roomId":1,"ratePerNight":80}]}"#,
            "Failed to load rooms",
        )
        .unwrap();
        assert_eq!(rooms.rooms.len(), 1);
    }

    #[test]
    fn test_decode_http_error_prefers_server_message() {
        let err = decode_response::<Ack>(409, r#"{"message":"Room already booked"}"#, "Save failed")
            .unwrap_err();
        assert_eq!(
            err,
            GatewayError::Http {
                status: 409,
                message: "Room already booked".into()
            }
        );
        assert_eq!(err.to_string(), "Room already booked");
    }

    #[test]
    fn test_decode_http_error_fallback() {
        let err = decode_response::<Ack>(500, "<html>oops</html>", "Save failed").unwrap_err();
        assert_eq!(err.to_string(), "Save failed (500)");
    }

    #[test]
    fn test_decode_rejected_envelope() {
        let err = decode_response::<Ack>(200, r#"{"success":false,"message":"Guest not found"}"#, "x")
            .unwrap_err();
        assert_eq!(err, GatewayError::Rejected("Guest not found".into()));
    }

    #[test]
    fn test_decode_empty_body() {
        let ack: Ack = decode_response(204, "", "Delete failed").unwrap();
        assert_eq!(ack.message, None);
    }

    #[test]
    fn test_decode_shape_mismatch() {
        let err = decode_response::<RoomsResponse>(200, r#"{"rooms":"nope"}"#, "x").unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }
}
