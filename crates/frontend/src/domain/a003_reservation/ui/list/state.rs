use crate::shared::gateway::{Gateway, GatewayError};
use crate::shared::notice::Notice;
use crate::shared::state::WidgetState;
use contracts::domain::a003_reservation::{Reservation, ReservationId, ReservationStatus};
use std::cell::RefCell;
use std::rc::Rc;

/// Bootstrap badge colour for a status cell
pub fn status_badge(status: ReservationStatus) -> &'static str {
    match status {
        ReservationStatus::Confirmed => "success",
        ReservationStatus::Pending => "warning",
        ReservationStatus::CheckedIn => "info",
        _ => "secondary",
    }
}

/// Active stays for the "recent check-ins" panel, newest check-in first.
///
/// Only confirmed and checked-in reservations with a check-in date count.
pub fn recent_checkins(reservations: &[Reservation], limit: usize) -> Vec<Reservation> {
    let mut active: Vec<Reservation> = reservations
        .iter()
        .filter(|r| {
            matches!(
                r.status,
                ReservationStatus::Confirmed | ReservationStatus::CheckedIn
            ) && r.check_in_date.is_some()
        })
        .cloned()
        .collect();
    active.sort_by(|a, b| b.check_in_date.cmp(&a.check_in_date));
    active.truncate(limit);
    active
}

#[derive(Debug, Default)]
struct ListState {
    reservations: WidgetState<Vec<Reservation>>,
    notice: Option<Notice>,
}

/// Reservation table of the admin page
pub struct ReservationList<G: Gateway> {
    gateway: Rc<G>,
    state: RefCell<ListState>,
}

impl<G: Gateway> ReservationList<G> {
    pub fn new(gateway: Rc<G>) -> Self {
        Self {
            gateway,
            state: RefCell::new(ListState::default()),
        }
    }

    /// Fetch every reservation; a failure replaces the table with an error
    /// row and raises a notice
    pub async fn load(&self) {
        self.state.borrow_mut().reservations = WidgetState::Loading;
        let result = self.gateway.fetch_reservations(None).await;
        let mut s = self.state.borrow_mut();
        if let Err(e) = &result {
            log::error!("failed to load reservations: {}", e);
            s.notice = Some(Notice::danger(e.to_string()));
        }
        s.reservations = WidgetState::from_result(result);
    }

    pub fn state(&self) -> WidgetState<Vec<Reservation>> {
        self.state.borrow().reservations.clone()
    }

    pub fn reservations(&self) -> Vec<Reservation> {
        self.state
            .borrow()
            .reservations
            .loaded()
            .cloned()
            .unwrap_or_default()
    }

    pub fn find(&self, id: ReservationId) -> Option<Reservation> {
        self.state
            .borrow()
            .reservations
            .loaded()?
            .iter()
            .find(|r| r.reservation_id == id)
            .cloned()
    }

    pub fn recent_checkins(&self, limit: usize) -> Vec<Reservation> {
        match self.state.borrow().reservations.loaded() {
            Some(all) => recent_checkins(all, limit),
            None => Vec::new(),
        }
    }

    /// Delete, then reload the table.
    ///
    /// The confirmation prompt belongs to the view.
    pub async fn delete(&self, id: ReservationId) -> Result<(), GatewayError> {
        match self.gateway.delete_reservation(id).await {
            Ok(()) => {
                log::info!("reservation {} deleted", id);
                self.load().await;
                self.state.borrow_mut().notice = Some(Notice::success("Reservation deleted."));
                Ok(())
            }
            Err(e) => {
                log::error!("failed to delete reservation {}: {}", id, e);
                self.state.borrow_mut().notice = Some(Notice::danger(e.to_string()));
                Err(e)
            }
        }
    }

    pub fn notice(&self) -> Option<Notice> {
        self.state.borrow().notice.clone()
    }

    pub fn dismiss_notice(&self) {
        self.state.borrow_mut().notice = None;
    }
}
