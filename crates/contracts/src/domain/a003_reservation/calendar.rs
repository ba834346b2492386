use serde::{Deserialize, Serialize};

/// Extra fields attached to a calendar event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarEventProps {
    pub reservation_number: Option<String>,
    pub guest_name: Option<String>,
    pub guest_contact_number: Option<String>,
    pub room_number: Option<String>,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub status: Option<String>,
}

/// One booking on the month calendar, from `/api/reservations/calendar`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: serde_json::Value,
    #[serde(default)]
    pub title: String,
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub extended_props: CalendarEventProps,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarEventsResponse {
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
}

fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(s) if !s.is_empty() => s,
        _ => "-",
    }
}

impl CalendarEvent {
    /// Hover text, one field per line
    pub fn tooltip_text(&self) -> String {
        let p = &self.extended_props;
        let number = p
            .reservation_number
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.title);
        let check_in = p.check_in_date.as_deref().unwrap_or(&self.start);
        let check_out = p
            .check_out_date
            .as_deref()
            .or(self.end.as_deref());
        [
            format!("Reservation: {}", or_dash(Some(number))),
            format!("Guest: {}", or_dash(p.guest_name.as_deref())),
            format!("Phone: {}", or_dash(p.guest_contact_number.as_deref())),
            format!("Room: {}", or_dash(p.room_number.as_deref())),
            format!("Dates: {} → {}", or_dash(Some(check_in)), or_dash(check_out)),
            format!("Status: {}", or_dash(p.status.as_deref())),
        ]
        .join("\n")
    }
}
