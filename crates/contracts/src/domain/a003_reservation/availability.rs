//! Double-booking checks against the booked ranges of one room.

use super::aggregate::{BookedRange, ReservationId};
use super::validation::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stay with an exclusive end: the guest leaves on `check_out`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl DateRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, ValidationError> {
        if check_out <= check_in {
            return Err(ValidationError::CheckoutNotAfterCheckin);
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn nights(&self) -> u32 {
        crate::shared::dates::nights_between(Some(self.check_in), Some(self.check_out))
    }

    /// Half-open overlap. Touching ranges (one check-out on the other's
    /// check-in day) do not overlap, which allows same-day turnover.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }
}

/// First booking that overlaps `candidate`, skipping `exclude`.
pub fn first_conflict<'a>(
    candidate: &DateRange,
    bookings: &'a [BookedRange],
    exclude: Option<ReservationId>,
) -> Option<&'a BookedRange> {
    bookings
        .iter()
        .filter(|b| Some(b.reservation_id) != exclude)
        .find(|b| candidate.overlaps(&b.range()))
}

pub fn has_conflict(
    candidate: &DateRange,
    bookings: &[BookedRange],
    exclude: Option<ReservationId>,
) -> bool {
    first_conflict(candidate, bookings, exclude).is_some()
}

/// Date order first, then overlaps. A reversed range is reported as
/// `CheckoutNotAfterCheckin` and never reaches the conflict scan.
pub fn check_availability(
    check_in: NaiveDate,
    check_out: NaiveDate,
    bookings: &[BookedRange],
    exclude: Option<ReservationId>,
) -> Result<DateRange, ValidationError> {
    let candidate = DateRange::new(check_in, check_out)?;
    match first_conflict(&candidate, bookings, exclude) {
        Some(hit) => Err(ValidationError::Conflict {
            reservation_id: hit.reservation_id,
        }),
        None => Ok(candidate),
    }
}

/// `Blocked ranges: 2024-06-01 → 2024-06-03 , ...` under the room selector
pub fn blocked_ranges_hint(bookings: &[BookedRange], limit: usize) -> Option<String> {
    if bookings.is_empty() {
        return None;
    }
    let shown: Vec<String> = bookings
        .iter()
        .take(limit)
        .map(|b| format!("{} → {}", b.check_in_date, b.check_out_date))
        .collect();
    let more = if bookings.len() > limit { " ..." } else { "" };
    Some(format!("Blocked ranges: {}{}", shown.join(" , "), more))
}
