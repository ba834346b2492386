//! In-memory [`Gateway`] for controller tests

use super::gateway::{AvailabilityWindow, Gateway, GatewayError};
use async_trait::async_trait;
use chrono::NaiveDate;
use contracts::dashboards::d400_overview::ReservationStats;
use contracts::domain::a001_room::{Room, RoomId, RoomStatus};
use contracts::domain::a002_guest::{Guest, GuestId};
use contracts::domain::a003_reservation::{
    BookedRange, CalendarEvent, DateRange, Reservation, ReservationId, ReservationPayload,
    SaveReservationResponse,
};
use contracts::domain::a004_payment::{
    Payment, PaymentId, PaymentReceipt, PaymentRequest, PaymentStatus,
};
use contracts::shared::dates::parse_calendar_date;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

pub fn date(s: &str) -> NaiveDate {
    parse_calendar_date(s).expect("test date")
}

pub fn room(id: i64, rate: f64, max_guests: u32) -> Room {
    Room {
        room_id: RoomId(id),
        room_number: format!("{}", 100 + id),
        room_type: "Deluxe".into(),
        rate_per_night: rate,
        max_guests,
        status: RoomStatus::Available,
    }
}

pub fn booked(id: i64, check_in: &str, check_out: &str) -> BookedRange {
    BookedRange::new(
        ReservationId(id),
        DateRange::new(date(check_in), date(check_out)).expect("test range"),
    )
}

pub fn guest(id: i64, name: &str) -> Guest {
    Guest {
        guest_id: GuestId(id),
        full_name: name.into(),
        email: Some(format!("{}@example.com", name.to_lowercase().replace(' ', "."))),
        contact_number: Some("0771234567".into()),
    }
}

pub fn offline() -> GatewayError {
    GatewayError::Network("offline".into())
}

async fn pause(yields: usize) {
    for _ in 0..yields {
        tokio::task::yield_now().await;
    }
}

#[derive(Default)]
pub struct FakeGateway {
    pub rooms: RefCell<Vec<Room>>,
    pub rooms_error: RefCell<Option<GatewayError>>,
    pub room_windows: RefCell<Vec<Option<AvailabilityWindow>>>,

    pub booked: RefCell<HashMap<RoomId, Vec<BookedRange>>>,
    pub booked_errors: RefCell<HashMap<RoomId, GatewayError>>,
    /// Yields before a booked-range reply, per room
    pub booked_delay: RefCell<HashMap<RoomId, usize>>,
    pub booked_requests: RefCell<Vec<RoomId>>,

    pub guests: RefCell<Vec<Guest>>,
    pub guests_error: RefCell<Option<GatewayError>>,
    pub guest_queries: RefCell<Vec<String>>,
    pub search_delay: RefCell<HashMap<String, usize>>,

    pub reservations: RefCell<Vec<Reservation>>,
    pub reservations_error: RefCell<Option<GatewayError>>,
    pub reservation_limits: RefCell<Vec<Option<u32>>>,

    pub saved: RefCell<Vec<ReservationPayload>>,
    pub save_error: RefCell<Option<GatewayError>>,
    pub save_delay: Cell<usize>,

    pub deleted: RefCell<Vec<ReservationId>>,
    pub delete_error: RefCell<Option<GatewayError>>,

    pub events: RefCell<Vec<CalendarEvent>>,
    pub calendar_windows: RefCell<Vec<(NaiveDate, NaiveDate)>>,

    pub stats: RefCell<Option<ReservationStats>>,
    pub stats_days: RefCell<Vec<u32>>,

    pub payments: RefCell<Vec<Payment>>,
    pub payments_error: RefCell<Option<GatewayError>>,
    pub recorded: RefCell<Vec<PaymentRequest>>,
    pub payment_error: RefCell<Option<GatewayError>>,
    pub payment_delay: Cell<usize>,
}

impl FakeGateway {
    pub fn with_rooms(rooms: Vec<Room>) -> Self {
        let gateway = Self::default();
        *gateway.rooms.borrow_mut() = rooms;
        gateway
    }

    pub fn set_booked(&self, room_id: i64, bookings: Vec<BookedRange>) {
        self.booked.borrow_mut().insert(RoomId(room_id), bookings);
    }
}

#[async_trait(?Send)]
impl Gateway for FakeGateway {
    async fn fetch_rooms(&self, window: Option<AvailabilityWindow>) -> Result<Vec<Room>, GatewayError> {
        self.room_windows.borrow_mut().push(window);
        if let Some(e) = self.rooms_error.borrow().clone() {
            return Err(e);
        }
        Ok(self.rooms.borrow().clone())
    }

    async fn fetch_booked_ranges(&self, room_id: RoomId) -> Result<Vec<BookedRange>, GatewayError> {
        self.booked_requests.borrow_mut().push(room_id);
        let delay = self.booked_delay.borrow().get(&room_id).copied().unwrap_or(0);
        pause(delay).await;
        if let Some(e) = self.booked_errors.borrow().get(&room_id).cloned() {
            return Err(e);
        }
        Ok(self.booked.borrow().get(&room_id).cloned().unwrap_or_default())
    }

    async fn search_guests(&self, query: &str) -> Result<Vec<Guest>, GatewayError> {
        self.guest_queries.borrow_mut().push(query.to_string());
        let delay = self.search_delay.borrow().get(query).copied().unwrap_or(0);
        pause(delay).await;
        if let Some(e) = self.guests_error.borrow().clone() {
            return Err(e);
        }
        let needle = query.to_lowercase();
        Ok(self
            .guests
            .borrow()
            .iter()
            .filter(|g| g.full_name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn fetch_guests(&self) -> Result<Vec<Guest>, GatewayError> {
        if let Some(e) = self.guests_error.borrow().clone() {
            return Err(e);
        }
        Ok(self.guests.borrow().clone())
    }

    async fn fetch_reservations(&self, limit: Option<u32>) -> Result<Vec<Reservation>, GatewayError> {
        self.reservation_limits.borrow_mut().push(limit);
        if let Some(e) = self.reservations_error.borrow().clone() {
            return Err(e);
        }
        let all = self.reservations.borrow();
        let take = limit.map_or(all.len(), |l| l as usize);
        Ok(all.iter().take(take).cloned().collect())
    }

    async fn fetch_reservation(&self, id: ReservationId) -> Result<Reservation, GatewayError> {
        if let Some(e) = self.reservations_error.borrow().clone() {
            return Err(e);
        }
        self.reservations
            .borrow()
            .iter()
            .find(|r| r.reservation_id == id)
            .cloned()
            .ok_or(GatewayError::Http {
                status: 404,
                message: "Reservation not found".into(),
            })
    }

    async fn save_reservation(
        &self,
        payload: &ReservationPayload,
    ) -> Result<SaveReservationResponse, GatewayError> {
        pause(self.save_delay.get()).await;
        self.saved.borrow_mut().push(payload.clone());
        if let Some(e) = self.save_error.borrow().clone() {
            return Err(e);
        }
        Ok(SaveReservationResponse {
            success: Some(true),
            message: Some("Saved".into()),
            reservation: None,
        })
    }

    async fn delete_reservation(&self, id: ReservationId) -> Result<(), GatewayError> {
        if let Some(e) = self.delete_error.borrow().clone() {
            return Err(e);
        }
        self.deleted.borrow_mut().push(id);
        self.reservations
            .borrow_mut()
            .retain(|r| r.reservation_id != id);
        Ok(())
    }

    async fn fetch_calendar_events(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CalendarEvent>, GatewayError> {
        self.calendar_windows.borrow_mut().push((start, end));
        Ok(self.events.borrow().clone())
    }

    async fn fetch_reservation_stats(&self, days: u32) -> Result<ReservationStats, GatewayError> {
        self.stats_days.borrow_mut().push(days);
        self.stats.borrow().clone().ok_or(GatewayError::Http {
            status: 500,
            message: "Stats unavailable".into(),
        })
    }

    async fn record_payment(&self, request: &PaymentRequest) -> Result<PaymentReceipt, GatewayError> {
        pause(self.payment_delay.get()).await;
        self.recorded.borrow_mut().push(request.clone());
        if let Some(e) = self.payment_error.borrow().clone() {
            return Err(e);
        }
        let mut reservations = self.reservations.borrow_mut();
        let reservation = reservations
            .iter_mut()
            .find(|r| r.reservation_id == request.reservation_id)
            .ok_or(GatewayError::Rejected("Reservation not found".into()))?;
        let paid = reservation.paid() + request.amount;
        reservation.amount_paid = Some(paid);
        reservation.payment_status = Some(PaymentStatus::from_amounts(paid, reservation.total()));
        // the server only acknowledges; balances are re-read separately
        Ok(PaymentReceipt {
            success: Some(true),
            payment_id: Some(PaymentId(self.recorded.borrow().len() as i64)),
            ..PaymentReceipt::default()
        })
    }

    async fn fetch_payment_history(
        &self,
        reservation_id: ReservationId,
    ) -> Result<Vec<Payment>, GatewayError> {
        if let Some(e) = self.payments_error.borrow().clone() {
            return Err(e);
        }
        Ok(self
            .payments
            .borrow()
            .iter()
            .filter(|p| p.reservation_id == Some(reservation_id))
            .cloned()
            .collect())
    }
}
