use crate::shared::config::DashboardConfig;
use crate::shared::date_utils::format_date_short;
use crate::shared::gateway::Gateway;
use crate::shared::state::WidgetState;
use chrono::NaiveDate;
use contracts::dashboards::d400_overview::{OccupancySummary, ReservationStats};
use contracts::domain::a003_reservation::Reservation;
use contracts::shared::money::format_money;

/// Header date, e.g. `Jun 01, 2024`
pub fn today_label(today: NaiveDate) -> String {
    today.format("%b %d, %Y").to_string()
}

/// Row of the "recent reservations" table, already formatted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentRow {
    pub reference: String,
    pub guest: String,
    pub room: String,
    pub check_in: String,
    pub status: String,
    pub amount: String,
}

impl From<&Reservation> for RecentRow {
    fn from(r: &Reservation) -> Self {
        let reference = r
            .reservation_number
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| r.reservation_id.to_string());
        let room = [r.room_number.as_deref(), r.room_type.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            reference,
            guest: r
                .guest_name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "-".to_string()),
            room,
            check_in: r
                .check_in_date
                .map(|d| format_date_short(&d.to_string()))
                .unwrap_or_else(|| "-".to_string()),
            status: r.status.as_str().to_string(),
            amount: format_money(r.total()),
        }
    }
}

/// Admin landing page. Every widget loads on its own; one failing shows
/// "Cannot load" without hiding the others.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardOverview {
    pub guests: WidgetState<usize>,
    pub rooms: WidgetState<OccupancySummary>,
    pub stats: WidgetState<ReservationStats>,
    pub recent: WidgetState<Vec<RecentRow>>,
}

impl DashboardOverview {
    pub async fn load<G: Gateway + ?Sized>(gateway: &G, config: &DashboardConfig) -> Self {
        let (guests, rooms, stats, recent) = futures::join!(
            gateway.fetch_guests(),
            gateway.fetch_rooms(None),
            gateway.fetch_reservation_stats(config.stats_days),
            gateway.fetch_reservations(Some(config.recent_limit)),
        );
        let limit = config.recent_limit as usize;

        let overview = Self {
            guests: WidgetState::from_result(guests.map(|g| g.len())),
            rooms: WidgetState::from_result(rooms.map(|r| OccupancySummary::from_rooms(&r))),
            stats: WidgetState::from_result(stats),
            recent: WidgetState::from_result(recent.map(|list| {
                list.iter().take(limit).map(RecentRow::from).collect()
            })),
        };
        for (widget, error) in [
            ("guests", overview.guests.error()),
            ("rooms", overview.rooms.error()),
            ("stats", overview.stats.error()),
            ("recent reservations", overview.recent.error()),
        ] {
            if let Some(e) = error {
                log::warn!("dashboard widget '{}' cannot load: {}", widget, e);
            }
        }
        overview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::{date, guest, offline, room, FakeGateway};
    use contracts::domain::a001_room::RoomStatus;
    use contracts::domain::a003_reservation::{ReservationId, ReservationStatus};

    fn gateway() -> FakeGateway {
        let mut occupied = room(2, 90.0, 2);
        occupied.status = RoomStatus::Occupied;
        let gateway = FakeGateway::with_rooms(vec![room(1, 80.0, 2), occupied, room(3, 70.0, 2)]);
        *gateway.guests.borrow_mut() = vec![guest(1, "Ann Lee"), guest(2, "Ravi Kumar")];
        *gateway.stats.borrow_mut() = Some(ReservationStats {
            total_reservations: 12,
            revenue_this_month: 1830.5,
            series: Vec::new(),
        });
        *gateway.reservations.borrow_mut() = (1..=10)
            .map(|id| Reservation {
                reservation_id: ReservationId(id),
                reservation_number: Some(format!("RES-{:04}", id)),
                guest_name: Some("Ann Lee".into()),
                room_number: Some("101".into()),
                room_type: Some("Deluxe".into()),
                check_in_date: Some(date("2024-03-15")),
                status: ReservationStatus::Confirmed,
                total_amount: Some(250.0),
                ..Reservation::default()
            })
            .collect();
        gateway
    }

    #[tokio::test]
    async fn test_all_widgets_load() {
        let gateway = gateway();
        let overview = DashboardOverview::load(&gateway, &DashboardConfig::default()).await;

        assert_eq!(overview.guests, WidgetState::Loaded(2));
        assert_eq!(overview.rooms.loaded().map(|o| o.label()), Some("1/3".to_string()));
        assert_eq!(overview.stats.loaded().map(|s| s.total_reservations), Some(12));

        let recent = overview.recent.loaded().unwrap();
        assert_eq!(recent.len(), 8);
        assert_eq!(
            recent[0],
            RecentRow {
                reference: "RES-0001".into(),
                guest: "Ann Lee".into(),
                room: "101 Deluxe".into(),
                check_in: "Mar 15".into(),
                status: "CONFIRMED".into(),
                amount: "$250.00".into(),
            }
        );
        assert_eq!(*gateway.stats_days.borrow(), vec![30]);
        assert_eq!(*gateway.reservation_limits.borrow(), vec![Some(8)]);
        assert_eq!(*gateway.room_windows.borrow(), vec![None]);
    }

    #[tokio::test]
    async fn test_failed_widget_is_isolated() {
        let gateway = gateway();
        *gateway.guests_error.borrow_mut() = Some(offline());
        *gateway.stats.borrow_mut() = None;

        let overview = DashboardOverview::load(&gateway, &DashboardConfig::default()).await;
        assert_eq!(overview.guests.error(), Some("Network error: offline"));
        assert_eq!(overview.stats.error(), Some("Stats unavailable"));
        assert!(overview.rooms.loaded().is_some());
        assert!(overview.recent.loaded().is_some());
    }

    #[test]
    fn test_recent_row_fallbacks() {
        let row = RecentRow::from(&Reservation {
            reservation_id: ReservationId(4),
            ..Reservation::default()
        });
        assert_eq!(row.reference, "4");
        assert_eq!(row.guest, "-");
        assert_eq!(row.room, "");
        assert_eq!(row.check_in, "-");
        assert_eq!(row.amount, "$0.00");
    }

    #[test]
    fn test_today_label() {
        assert_eq!(today_label(date("2024-06-01")), "Jun 01, 2024");
    }
}
