use crate::shared::api_utils::{api_url, api_url_with_query, get_json};
use crate::shared::gateway::GatewayError;
use contracts::domain::a002_guest::{Guest, GuestsResponse};
use serde::Serialize;

#[derive(Serialize)]
struct SearchQuery<'a> {
    q: &'a str,
}

/// `GET /api/guests/search?q=`
pub async fn search_guests(base: &str, query: &str) -> Result<Vec<Guest>, GatewayError> {
    let url = api_url_with_query(base, "/api/guests/search", &SearchQuery { q: query })?;
    let response: GuestsResponse = get_json(&url, "Guest search failed").await?;
    Ok(response.guests)
}

/// `GET /api/guests`
pub async fn fetch_guests(base: &str) -> Result<Vec<Guest>, GatewayError> {
    let response: GuestsResponse =
        get_json(&api_url(base, "/api/guests"), "Failed to load guests").await?;
    Ok(response.guests)
}
