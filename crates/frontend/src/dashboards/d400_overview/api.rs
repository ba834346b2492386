use crate::shared::api_utils::{api_url_with_query, get_json};
use crate::shared::gateway::GatewayError;
use contracts::dashboards::d400_overview::ReservationStats;
use serde::Serialize;

#[derive(Serialize)]
struct StatsQuery {
    days: u32,
}

/// `GET /api/reservations/stats?days=`
pub async fn fetch_reservation_stats(
    base: &str,
    days: u32,
) -> Result<ReservationStats, GatewayError> {
    let url = api_url_with_query(base, "/api/reservations/stats", &StatsQuery { days })?;
    get_json(&url, "Failed to load reservation stats").await
}
