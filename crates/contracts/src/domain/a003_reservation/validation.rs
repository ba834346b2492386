use super::aggregate::ReservationId;
use thiserror::Error;

/// Reasons a reservation draft cannot be submitted.
///
/// `Display` is the text shown inline in the form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please fill all required fields ({0} is missing).")]
    MissingField(&'static str),

    #[error("Check-out date must be after check-in date.")]
    CheckoutNotAfterCheckin,

    #[error("Selected room is not in the room list.")]
    UnknownRoom,

    #[error("Status {0} cannot be set from this form.")]
    InvalidStatus(String),

    #[error("Guest count must be at least 1.")]
    InvalidGuestCount,

    #[error("Guest count cannot exceed room capacity ({max}).")]
    CapacityExceeded { max: u32 },

    #[error("Booked dates for this room are still loading.")]
    RangesNotLoaded,

    #[error("Booked dates for this room could not be loaded. Select the room again to retry.")]
    RangesUnavailable,

    /// The id is kept for diagnostics only; the message stays generic
    #[error("Selected dates overlap with an existing reservation for this room.")]
    Conflict { reservation_id: ReservationId },
}

impl ValidationError {
    /// Overlaps are shown as errors, everything else as a warning
    pub fn is_conflict(&self) -> bool {
        matches!(self, ValidationError::Conflict { .. })
    }
}
