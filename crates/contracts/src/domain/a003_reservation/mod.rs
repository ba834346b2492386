pub mod aggregate;
pub mod availability;
pub mod calendar;
pub mod pricing;
pub mod validation;

pub use aggregate::{
    BookedRange, BookedRangesResponse, Reservation, ReservationDetailResponse, ReservationDraft,
    ReservationId, ReservationPayload, ReservationStatus, ReservationsResponse,
    SaveReservationResponse,
};
pub use availability::{check_availability, first_conflict, has_conflict, DateRange};
pub use calendar::{CalendarEvent, CalendarEventsResponse};
pub use pricing::{compute_pricing, PricingAmounts, PricingInput, PricingResult};
pub use validation::ValidationError;
