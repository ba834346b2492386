use super::availability::DateRange;
use super::pricing::{compute_pricing, derive_tax_rate, PricingInput, PricingResult};
use super::validation::ValidationError;
use crate::domain::a001_room::{Room, RoomId};
use crate::domain::a002_guest::{Guest, GuestId};
use crate::domain::a004_payment::{lenient_payment_status, PaymentStatus};
use crate::shared::dates::{lenient_date, nights_between, parse_calendar_date};
use crate::shared::money::{parse_amount_input, round2};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================

crate::integer_id!(
    /// Идентификатор бронирования
    ReservationId
);

// ============================================================================
// Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::CheckedIn => "CHECKED_IN",
            ReservationStatus::CheckedOut => "CHECKED_OUT",
            ReservationStatus::Cancelled => "CANCELLED",
            ReservationStatus::Unknown => "UNKNOWN",
        }
    }

    /// Parse a form value; blank means `Pending`
    pub fn from_form(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "" | "PENDING" => ReservationStatus::Pending,
            "CONFIRMED" => ReservationStatus::Confirmed,
            "CHECKED_IN" => ReservationStatus::CheckedIn,
            "CHECKED_OUT" => ReservationStatus::CheckedOut,
            "CANCELLED" | "CANCELED" => ReservationStatus::Cancelled,
            _ => ReservationStatus::Unknown,
        }
    }

    /// Statuses the reservation form may submit
    pub fn is_submittable(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Pending | ReservationStatus::Confirmed | ReservationStatus::CheckedIn
        )
    }
}

// ============================================================================
// Server records
// ============================================================================

/// Booking range of one room, from `/api/reservations/by-room`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedRange {
    pub reservation_id: ReservationId,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

impl BookedRange {
    pub fn new(reservation_id: ReservationId, range: DateRange) -> Self {
        Self {
            reservation_id,
            check_in_date: range.check_in,
            check_out_date: range.check_out,
        }
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            check_in: self.check_in_date,
            check_out: self.check_out_date,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookedRangesResponse {
    #[serde(default)]
    pub bookings: Vec<BookedRange>,
}

/// Reservation as stored by the backend, with guest and room display fields
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub reservation_number: Option<String>,
    pub guest_id: Option<GuestId>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_contact_number: Option<String>,
    pub room_id: Option<RoomId>,
    pub room_number: Option<String>,
    pub room_type: Option<String>,
    #[serde(with = "lenient_date")]
    pub check_in_date: Option<NaiveDate>,
    #[serde(with = "lenient_date")]
    pub check_out_date: Option<NaiveDate>,
    pub guest_count: Option<u32>,
    pub status: ReservationStatus,
    pub notes: Option<String>,
    pub nights: Option<u32>,
    pub rate_per_night: Option<f64>,
    pub subtotal: Option<f64>,
    pub tax: Option<f64>,
    pub tax_rate: Option<f64>,
    pub discount: Option<f64>,
    pub total_amount: Option<f64>,
    pub amount_paid: Option<f64>,
    #[serde(with = "lenient_payment_status")]
    pub payment_status: Option<PaymentStatus>,
}

impl Reservation {
    pub fn total(&self) -> f64 {
        self.total_amount.filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    pub fn paid(&self) -> f64 {
        self.amount_paid.filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    pub fn remaining_balance(&self) -> f64 {
        crate::domain::a004_payment::remaining_balance(self.total(), self.paid())
    }

    pub fn effective_payment_status(&self) -> PaymentStatus {
        self.payment_status.unwrap_or_default()
    }

    /// Whether the "Add payment" action should be offered
    pub fn accepts_payment(&self) -> bool {
        self.effective_payment_status() != PaymentStatus::Paid && self.remaining_balance() > 0.0
    }

    /// `Guest #12` when the name is missing
    pub fn guest_display(&self) -> String {
        match self.guest_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!(
                "Guest #{}",
                self.guest_id.map(|g| g.to_string()).unwrap_or_else(|| "-".into())
            ),
        }
    }

    pub fn room_display(&self) -> String {
        match self.room_number.as_deref() {
            Some(number) if !number.is_empty() => number.to_string(),
            _ => format!(
                "Room #{}",
                self.room_id.map(|r| r.to_string()).unwrap_or_else(|| "-".into())
            ),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationsResponse {
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

/// Reply of `/api/reservations/detail`: the record under `reservation` or
/// `data`, or the bare record itself
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReservationDetailResponse {
    Wrapped {
        #[serde(alias = "data")]
        reservation: Reservation,
    },
    Bare(Reservation),
}

impl ReservationDetailResponse {
    /// The record, or `None` when the reply carried no reservation id
    pub fn into_reservation(self) -> Option<Reservation> {
        let reservation = match self {
            ReservationDetailResponse::Wrapped { reservation } => reservation,
            ReservationDetailResponse::Bare(reservation) => reservation,
        };
        (reservation.reservation_id.0 > 0).then_some(reservation)
    }
}

/// Reply to create/update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveReservationResponse {
    pub success: Option<bool>,
    pub message: Option<String>,
    pub reservation: Option<Reservation>,
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Full computed payload for `POST`/`PUT /api/reservations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<ReservationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_id: Option<GuestId>,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_contact_number: String,
    pub room_id: RoomId,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_count: u32,
    pub status: ReservationStatus,
    pub notes: String,
    pub nights: u32,
    pub rate_per_night: f64,
    pub subtotal: f64,
    pub tax: f64,
    pub tax_rate: f64,
    pub discount: f64,
    pub total_amount: f64,
}

impl ReservationPayload {
    pub fn is_update(&self) -> bool {
        self.reservation_id.is_some()
    }
}

/// In-progress state of the reservation form.
///
/// Field values are kept as the user typed them; pricing is never stored but
/// always derived from the current inputs, so it cannot go stale.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationDraft {
    pub reservation_id: Option<ReservationId>,
    pub guest_id: Option<GuestId>,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_contact_number: String,
    pub room_id: Option<RoomId>,
    pub check_in: String,
    pub check_out: String,
    pub guest_count: u32,
    pub status: ReservationStatus,
    pub notes: String,
    pub tax_rate_input: String,
    pub discount_input: String,
}

impl Default for ReservationDraft {
    fn default() -> Self {
        Self {
            reservation_id: None,
            guest_id: None,
            guest_name: String::new(),
            guest_email: String::new(),
            guest_contact_number: String::new(),
            room_id: None,
            check_in: String::new(),
            check_out: String::new(),
            guest_count: 1,
            status: ReservationStatus::Pending,
            notes: String::new(),
            tax_rate_input: "0".into(),
            discount_input: "0".into(),
        }
    }
}

impl ReservationDraft {
    /// Draft for editing an existing reservation
    pub fn from_reservation(r: &Reservation) -> Self {
        let subtotal = r.subtotal.unwrap_or(0.0);
        let tax_rate = derive_tax_rate(r.tax_rate, subtotal, r.tax.unwrap_or(0.0));
        Self {
            reservation_id: Some(r.reservation_id),
            guest_id: r.guest_id,
            guest_name: r.guest_name.clone().unwrap_or_default(),
            guest_email: r.guest_email.clone().unwrap_or_default(),
            guest_contact_number: r.guest_contact_number.clone().unwrap_or_default(),
            room_id: r.room_id,
            check_in: r.check_in_date.map(|d| d.to_string()).unwrap_or_default(),
            check_out: r.check_out_date.map(|d| d.to_string()).unwrap_or_default(),
            guest_count: r.guest_count.unwrap_or(1),
            status: r.status,
            notes: r.notes.clone().unwrap_or_default(),
            tax_rate_input: tax_rate.to_string(),
            discount_input: r.discount.filter(|d| d.is_finite()).unwrap_or(0.0).to_string(),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.reservation_id.is_some()
    }

    pub fn check_in_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.check_in)
    }

    pub fn check_out_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.check_out)
    }

    pub fn tax_rate(&self) -> f64 {
        parse_amount_input(&self.tax_rate_input)
    }

    pub fn discount(&self) -> f64 {
        parse_amount_input(&self.discount_input)
    }

    /// Fill guest identity from a picked search suggestion
    pub fn apply_guest(&mut self, guest: &Guest) {
        self.guest_id = Some(guest.guest_id);
        self.guest_name = guest.full_name.clone();
        self.guest_email = guest.email.clone().unwrap_or_default();
        self.guest_contact_number = guest.contact_number.clone().unwrap_or_default();
    }

    pub fn pricing_input(&self, room: Option<&Room>) -> PricingInput {
        PricingInput::new(
            nights_between(self.check_in_date(), self.check_out_date()),
            room.map(Room::rate).unwrap_or(0.0),
            self.tax_rate(),
            self.discount(),
        )
    }

    pub fn pricing(&self, room: Option<&Room>) -> PricingResult {
        compute_pricing(&self.pricing_input(room))
    }

    /// Every check that does not need the booked ranges of the room.
    ///
    /// Returns the selected room's id and the candidate range so the caller
    /// can run the conflict scan next.
    pub fn validate_fields(&self, room: Option<&Room>) -> Result<(RoomId, DateRange), ValidationError> {
        let required = [
            ("guest name", self.guest_name.trim().is_empty()),
            ("guest email", self.guest_email.trim().is_empty()),
            ("contact number", self.guest_contact_number.trim().is_empty()),
            ("room", self.room_id.is_none()),
            ("check-in date", self.check_in.trim().is_empty()),
            ("check-out date", self.check_out.trim().is_empty()),
        ];
        if let Some((field, _)) = required.into_iter().find(|(_, missing)| *missing) {
            return Err(ValidationError::MissingField(field));
        }

        let room = match (self.room_id, room) {
            (Some(id), Some(room)) if room.room_id == id => room,
            _ => return Err(ValidationError::UnknownRoom),
        };

        if self.guest_count == 0 {
            return Err(ValidationError::InvalidGuestCount);
        }
        if self.guest_count > room.max_guests {
            return Err(ValidationError::CapacityExceeded {
                max: room.max_guests,
            });
        }

        if !self.status.is_submittable() {
            return Err(ValidationError::InvalidStatus(self.status.as_str().to_string()));
        }

        // unparseable dates cannot form a valid stay either
        let range = match (self.check_in_date(), self.check_out_date()) {
            (Some(check_in), Some(check_out)) => DateRange::new(check_in, check_out)?,
            _ => return Err(ValidationError::CheckoutNotAfterCheckin),
        };

        Ok((room.room_id, range))
    }

    /// Build the submit payload. Call only after validation passed.
    pub fn to_payload(&self, room: &Room, range: DateRange) -> ReservationPayload {
        let pricing = self.pricing(Some(room));
        let amounts = pricing.amounts.unwrap_or_default();
        ReservationPayload {
            reservation_id: self.reservation_id,
            guest_id: self.guest_id,
            guest_name: self.guest_name.trim().to_string(),
            guest_email: self.guest_email.trim().to_string(),
            guest_contact_number: self.guest_contact_number.trim().to_string(),
            room_id: room.room_id,
            check_in_date: range.check_in,
            check_out_date: range.check_out,
            guest_count: self.guest_count,
            status: self.status,
            notes: self.notes.trim().to_string(),
            nights: pricing.nights,
            rate_per_night: pricing.rate,
            subtotal: amounts.subtotal,
            tax: amounts.tax_amount,
            tax_rate: self.tax_rate().max(0.0),
            discount: round2(self.discount().max(0.0)),
            total_amount: amounts.total,
        }
    }
}
