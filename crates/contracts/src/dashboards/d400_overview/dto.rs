use crate::domain::a001_room::{Room, RoomStatus};
use serde::{Deserialize, Serialize};

/// Response of `/api/reservations/stats?days=N`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReservationStats {
    /// Reservations created in the requested window
    pub total_reservations: u64,
    pub revenue_this_month: f64,
    /// Daily counts for the line chart
    pub series: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesPoint {
    pub label: String,
    pub count: u64,
}

impl ReservationStats {
    /// Labels and counts for the chart; a single "No data" point when empty
    pub fn chart_series(&self) -> (Vec<String>, Vec<u64>) {
        if self.series.is_empty() {
            return (vec!["No data".to_string()], vec![0]);
        }
        self.series
            .iter()
            .map(|p| (p.label.clone(), p.count))
            .unzip()
    }
}

/// Room occupancy widget
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OccupancySummary {
    pub occupied: usize,
    pub total: usize,
}

impl OccupancySummary {
    pub fn from_rooms(rooms: &[Room]) -> Self {
        let occupied = rooms
            .iter()
            .filter(|r| r.status == RoomStatus::Occupied)
            .count();
        Self {
            occupied,
            total: rooms.len(),
        }
    }

    pub fn available(&self) -> usize {
        self.total.saturating_sub(self.occupied)
    }

    /// `3/10`
    pub fn label(&self) -> String {
        format!("{}/{}", self.occupied, self.total)
    }
}
