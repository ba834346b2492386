//! Event feed for the month calendar

use crate::shared::date_utils::calendar_bound;
use crate::shared::gateway::{Gateway, GatewayError};
use contracts::domain::a003_reservation::CalendarEvent;

/// Events in the visible window.
///
/// The calendar widget hands over its bounds as ISO timestamps; only the date
/// part is sent. Unreadable bounds are a request error, not an empty month.
pub async fn load_calendar_events<G: Gateway + ?Sized>(
    gateway: &G,
    start: &str,
    end: &str,
) -> Result<Vec<CalendarEvent>, GatewayError> {
    let (Some(start), Some(end)) = (calendar_bound(start), calendar_bound(end)) else {
        return Err(GatewayError::Encode(format!(
            "invalid calendar window {} .. {}",
            start, end
        )));
    };
    let events = gateway.fetch_calendar_events(start, end).await?;
    log::debug!("calendar {} .. {}: {} events", start, end, events.len());
    Ok(events)
}
