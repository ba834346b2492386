use crate::shared::api_utils::{api_url, api_url_with_query, get_json, send};
use crate::shared::gateway::GatewayError;
use chrono::NaiveDate;
use contracts::domain::a001_room::RoomId;
use contracts::domain::a003_reservation::{
    BookedRange, BookedRangesResponse, CalendarEvent, CalendarEventsResponse, Reservation,
    ReservationDetailResponse, ReservationId, ReservationPayload, ReservationsResponse,
    SaveReservationResponse,
};
use gloo_net::http::Request;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ByRoomQuery {
    room_id: RoomId,
}

#[derive(Serialize)]
struct IdQuery {
    id: ReservationId,
}

#[derive(Serialize)]
struct LimitQuery {
    limit: u32,
}

#[derive(Serialize)]
struct CalendarQuery {
    start: NaiveDate,
    end: NaiveDate,
}

/// `GET /api/reservations/by-room?roomId=`
pub async fn fetch_booked_ranges(
    base: &str,
    room_id: RoomId,
) -> Result<Vec<BookedRange>, GatewayError> {
    let url = api_url_with_query(base, "/api/reservations/by-room", &ByRoomQuery { room_id })?;
    let response: BookedRangesResponse = get_json(&url, "Failed to load booked dates").await?;
    log::debug!(
        "room {}: {} booked ranges",
        room_id,
        response.bookings.len()
    );
    Ok(response.bookings)
}

/// `GET /api/reservations`, newest first, optionally `?limit=`
pub async fn fetch_reservations(
    base: &str,
    limit: Option<u32>,
) -> Result<Vec<Reservation>, GatewayError> {
    let url = match limit {
        Some(limit) => api_url_with_query(base, "/api/reservations", &LimitQuery { limit })?,
        None => api_url(base, "/api/reservations"),
    };
    let response: ReservationsResponse = get_json(&url, "Failed to load reservations").await?;
    Ok(response.reservations)
}

/// `GET /api/reservations/detail?id=`
pub async fn fetch_reservation(base: &str, id: ReservationId) -> Result<Reservation, GatewayError> {
    let url = api_url_with_query(base, "/api/reservations/detail", &IdQuery { id })?;
    let response: ReservationDetailResponse =
        get_json(&url, "Failed to load reservation").await?;
    response
        .into_reservation()
        .ok_or_else(|| GatewayError::Decode("reply carries no reservation".to_string()))
}

/// `POST` for a new reservation, `PUT` when the payload carries an id
pub async fn save_reservation(
    base: &str,
    payload: &ReservationPayload,
) -> Result<SaveReservationResponse, GatewayError> {
    let url = api_url(base, "/api/reservations");
    let builder = if payload.is_update() {
        Request::put(&url)
    } else {
        Request::post(&url)
    };
    let request = builder
        .json(payload)
        .map_err(|e| GatewayError::Encode(e.to_string()))?;
    send(request, "Save failed").await
}

/// `DELETE /api/reservations?id=`
pub async fn delete_reservation(base: &str, id: ReservationId) -> Result<(), GatewayError> {
    let url = api_url_with_query(base, "/api/reservations", &IdQuery { id })?;
    let request = Request::delete(&url)
        .build()
        .map_err(|e| GatewayError::Encode(e.to_string()))?;
    // the body may be empty; only the status matters
    let _: serde_json::Value = send(request, "Delete failed").await?;
    Ok(())
}

/// `GET /api/reservations/calendar?start=&end=`
pub async fn fetch_calendar_events(
    base: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<CalendarEvent>, GatewayError> {
    let url = api_url_with_query(base, "/api/reservations/calendar", &CalendarQuery { start, end })?;
    let response: CalendarEventsResponse = get_json(&url, "Failed to load calendar").await?;
    Ok(response.events)
}
