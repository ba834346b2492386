use crate::shared::money::format_money;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// ID Type
// ============================================================================

crate::integer_id!(
    /// Идентификатор номера
    RoomId
);

/// Capacity assumed when the server omits `maxGuests`
pub const DEFAULT_MAX_GUESTS: u32 = 2;

fn default_max_guests() -> u32 {
    DEFAULT_MAX_GUESTS
}

// ============================================================================
// Aggregate
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    #[default]
    Available,
    Booked,
    Occupied,
    Maintenance,
    #[serde(other)]
    Unknown,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "AVAILABLE",
            RoomStatus::Booked => "BOOKED",
            RoomStatus::Occupied => "OCCUPIED",
            RoomStatus::Maintenance => "MAINTENANCE",
            RoomStatus::Unknown => "UNKNOWN",
        }
    }
}

/// Room as served by `/api/rooms`. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub room_id: RoomId,
    #[serde(default)]
    pub room_number: String,
    #[serde(default)]
    pub room_type: String,
    // older endpoints used other names for the nightly rate
    #[serde(default, alias = "rate_per_night", alias = "price", alias = "rate")]
    pub rate_per_night: f64,
    #[serde(default = "default_max_guests")]
    pub max_guests: u32,
    #[serde(default)]
    pub status: RoomStatus,
}

impl Room {
    /// Nightly rate, 0 when the server sent something unusable
    pub fn rate(&self) -> f64 {
        if self.rate_per_night.is_finite() && self.rate_per_night > 0.0 {
            self.rate_per_night
        } else {
            0.0
        }
    }

    /// Dropdown label, e.g. `101 - Deluxe - $120.00 (BOOKED)`
    pub fn option_label(&self) -> String {
        let suffix = match self.status {
            RoomStatus::Booked => " (BOOKED)",
            RoomStatus::Maintenance => " (MAINTENANCE)",
            _ => "",
        };
        format!(
            "{} - {} - {}{}",
            self.room_number,
            self.room_type,
            format_money(self.rate()),
            suffix
        )
    }

    /// Line shown under the room selector
    pub fn meta_line(&self) -> String {
        format!(
            "Max guests: {} | Status: {} | Rate: {}",
            self.max_guests,
            self.status.as_str(),
            format_money(self.rate())
        )
    }
}

/// `{ success, message, rooms: [...] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomsResponse {
    #[serde(default)]
    pub rooms: Vec<Room>,
}

// ============================================================================
// Lookup
// ============================================================================

/// Session-scoped room table keyed by id.
///
/// Rebuilt wholesale every time the room list is (re)loaded; never patched.
#[derive(Debug, Clone, Default)]
pub struct RoomLookup {
    rooms: HashMap<RoomId, Room>,
    order: Vec<RoomId>,
}

impl RoomLookup {
    pub fn from_rooms(rooms: Vec<Room>) -> Self {
        let order = rooms.iter().map(|r| r.room_id).collect();
        let rooms = rooms.into_iter().map(|r| (r.room_id, r)).collect();
        Self { rooms, order }
    }

    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    /// Rooms in server order, for the dropdown
    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.order.iter().filter_map(|id| self.rooms.get(id))
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room_json() -> &'static str {
        r#"{"roomId":101,"roomNumber":"101","roomType":"Deluxe","price":120,"status":"BOOKED"}"#
    }

    #[test]
    fn test_room_aliases_and_defaults() {
        let room: Room = serde_json::from_str(room_json()).unwrap();
        assert_eq!(room.room_id, RoomId(101));
        assert_eq!(room.rate(), 120.0);
        assert_eq!(room.max_guests, DEFAULT_MAX_GUESTS);
        assert_eq!(room.status, RoomStatus::Booked);
    }

    #[test]
    fn test_unknown_status() {
        let room: Room =
            serde_json::from_str(r#"{"roomId":1,"ratePerNight":80,"status":"CLEANING"}"#).unwrap();
        assert_eq!(room.status, RoomStatus::Unknown);
    }

    #[test]
    fn test_labels() {
        let room: Room = serde_json::from_str(room_json()).unwrap();
        assert_eq!(room.option_label(), "101 - Deluxe - $120.00 (BOOKED)");
        assert_eq!(room.meta_line(), "Max guests: 2 | Status: BOOKED | Rate: $120.00");
    }

    #[test]
    fn test_lookup_keeps_order() {
        let rooms: Vec<Room> = serde_json::from_str(
            r#"[{"roomId":3,"ratePerNight":50},{"roomId":1,"ratePerNight":60}]"#,
        )
        .unwrap();
        let lookup = RoomLookup::from_rooms(rooms);
        let ids: Vec<i64> = lookup.iter().map(|r| r.room_id.0).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(lookup.get(RoomId(1)).map(|r| r.rate()), Some(60.0));
        assert!(lookup.get(RoomId(2)).is_none());
    }
}
