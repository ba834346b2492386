use crate::shared::api_utils::{api_url, api_url_with_query, get_json};
use crate::shared::gateway::{AvailabilityWindow, GatewayError};
use contracts::domain::a001_room::{Room, RoomsResponse};

/// `GET /api/rooms`, or `/api/rooms/availability` when a stay window is known
pub async fn fetch_rooms(
    base: &str,
    window: Option<AvailabilityWindow>,
) -> Result<Vec<Room>, GatewayError> {
    let url = match window {
        Some(w) => api_url_with_query(base, "/api/rooms/availability", &w)?,
        None => api_url(base, "/api/rooms"),
    };
    let response: RoomsResponse = get_json(&url, "Failed to load rooms").await?;
    log::debug!("loaded {} rooms", response.rooms.len());
    Ok(response.rooms)
}
