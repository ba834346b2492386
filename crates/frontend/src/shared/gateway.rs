//! Boundary between the controllers and the booking backend.
//!
//! Controllers only see the [`Gateway`] trait; [`HttpGateway`] is the browser
//! implementation and tests plug in an in-memory fake.

use async_trait::async_trait;
use chrono::NaiveDate;
use contracts::dashboards::d400_overview::ReservationStats;
use contracts::domain::a001_room::{Room, RoomId};
use contracts::domain::a002_guest::Guest;
use contracts::domain::a003_reservation::{
    BookedRange, CalendarEvent, Reservation, ReservationId, ReservationPayload,
    SaveReservationResponse,
};
use contracts::domain::a004_payment::{Payment, PaymentReceipt, PaymentRequest};
use serde::Serialize;
use thiserror::Error;

use super::api_utils::{api_base, invoice_url};
use crate::dashboards::d400_overview::api as overview_api;
use crate::domain::a001_room::api as room_api;
use crate::domain::a002_guest::api as guest_api;
use crate::domain::a003_reservation::api as reservation_api;
use crate::domain::a004_payment::api as payment_api;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx reply; `message` is already user-facing
    #[error("{message}")]
    Http { status: u16, message: String },

    /// 2xx reply with `success: false`
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid response from server: {0}")]
    Decode(String),

    #[error("Failed to build request: {0}")]
    Encode(String),
}

/// Stay window used to ask the server for room availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityWindow {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

#[async_trait(?Send)]
pub trait Gateway {
    /// Rooms for the dropdown; with a window the server marks rooms booked
    /// in it
    async fn fetch_rooms(&self, window: Option<AvailabilityWindow>) -> Result<Vec<Room>, GatewayError>;

    async fn fetch_booked_ranges(&self, room_id: RoomId) -> Result<Vec<BookedRange>, GatewayError>;

    async fn search_guests(&self, query: &str) -> Result<Vec<Guest>, GatewayError>;

    async fn fetch_guests(&self) -> Result<Vec<Guest>, GatewayError>;

    /// `limit: None` returns every reservation
    async fn fetch_reservations(&self, limit: Option<u32>) -> Result<Vec<Reservation>, GatewayError>;

    async fn fetch_reservation(&self, id: ReservationId) -> Result<Reservation, GatewayError>;

    /// Create when `payload.reservation_id` is empty, update otherwise
    async fn save_reservation(
        &self,
        payload: &ReservationPayload,
    ) -> Result<SaveReservationResponse, GatewayError>;

    async fn delete_reservation(&self, id: ReservationId) -> Result<(), GatewayError>;

    async fn fetch_calendar_events(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CalendarEvent>, GatewayError>;

    async fn fetch_reservation_stats(&self, days: u32) -> Result<ReservationStats, GatewayError>;

    async fn record_payment(&self, request: &PaymentRequest) -> Result<PaymentReceipt, GatewayError>;

    async fn fetch_payment_history(
        &self,
        reservation_id: ReservationId,
    ) -> Result<Vec<Payment>, GatewayError>;
}

/// Gateway over `fetch`, rooted at the backend context path
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base: String,
}

impl HttpGateway {
    /// `base_path` is the configured value; `auto` is resolved here
    pub fn new(base_path: &str) -> Self {
        let base = api_base(base_path);
        log::debug!("api base: '{}'", base);
        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn invoice_url(&self, reservation_id: ReservationId) -> String {
        invoice_url(&self.base, reservation_id.0)
    }
}

#[async_trait(?Send)]
impl Gateway for HttpGateway {
    async fn fetch_rooms(&self, window: Option<AvailabilityWindow>) -> Result<Vec<Room>, GatewayError> {
        room_api::fetch_rooms(&self.base, window).await
    }

    async fn fetch_booked_ranges(&self, room_id: RoomId) -> Result<Vec<BookedRange>, GatewayError> {
        reservation_api::fetch_booked_ranges(&self.base, room_id).await
    }

    async fn search_guests(&self, query: &str) -> Result<Vec<Guest>, GatewayError> {
        guest_api::search_guests(&self.base, query).await
    }

    async fn fetch_guests(&self) -> Result<Vec<Guest>, GatewayError> {
        guest_api::fetch_guests(&self.base).await
    }

    async fn fetch_reservations(&self, limit: Option<u32>) -> Result<Vec<Reservation>, GatewayError> {
        reservation_api::fetch_reservations(&self.base, limit).await
    }

    async fn fetch_reservation(&self, id: ReservationId) -> Result<Reservation, GatewayError> {
        reservation_api::fetch_reservation(&self.base, id).await
    }

    async fn save_reservation(
        &self,
        payload: &ReservationPayload,
    ) -> Result<SaveReservationResponse, GatewayError> {
        reservation_api::save_reservation(&self.base, payload).await
    }

    async fn delete_reservation(&self, id: ReservationId) -> Result<(), GatewayError> {
        reservation_api::delete_reservation(&self.base, id).await
    }

    async fn fetch_calendar_events(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CalendarEvent>, GatewayError> {
        reservation_api::fetch_calendar_events(&self.base, start, end).await
    }

    async fn fetch_reservation_stats(&self, days: u32) -> Result<ReservationStats, GatewayError> {
        overview_api::fetch_reservation_stats(&self.base, days).await
    }

    async fn record_payment(&self, request: &PaymentRequest) -> Result<PaymentReceipt, GatewayError> {
        payment_api::record_payment(&self.base, request).await
    }

    async fn fetch_payment_history(
        &self,
        reservation_id: ReservationId,
    ) -> Result<Vec<Payment>, GatewayError> {
        payment_api::fetch_payment_history(&self.base, reservation_id).await
    }
}
