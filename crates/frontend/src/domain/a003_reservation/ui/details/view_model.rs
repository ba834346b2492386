//! Create/edit reservation form.
//!
//! The controller owns the draft, the room table and the booked ranges of the
//! selected room. Views call the `on_*` handlers on input and read state back
//! through the accessors; pricing and validity are recomputed from the draft
//! on every read.
//!
//! All handlers take `&self`. State lives behind a `RefCell` that is never
//! borrowed across an `.await`.

use crate::domain::a002_guest::search::{GuestSearch, SearchOutcome, SearchTicket};
use crate::shared::config::ReservationConfig;
use crate::shared::date_utils::availability_window;
use crate::shared::gateway::{Gateway, GatewayError};
use crate::shared::notice::Notice;
use crate::shared::state::SavingFlag;
use chrono::NaiveDate;
use contracts::domain::a001_room::{RoomId, RoomLookup};
use contracts::domain::a003_reservation::availability::blocked_ranges_hint;
use contracts::domain::a003_reservation::{
    check_availability, BookedRange, PricingResult, Reservation, ReservationDraft, ReservationId,
    ReservationPayload, ReservationStatus, SaveReservationResponse, ValidationError,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Booked ranges of the selected room
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BookedRanges {
    #[default]
    NotLoaded,
    Loading(RoomId),
    Loaded {
        room_id: RoomId,
        bookings: Vec<BookedRange>,
    },
    Failed(RoomId),
}

impl BookedRanges {
    /// Ranges for `room_id`; `None` unless they are loaded for that room
    pub fn for_room(&self, room_id: RoomId) -> Option<&[BookedRange]> {
        match self {
            BookedRanges::Loaded { room_id: r, bookings } if *r == room_id => Some(bookings),
            _ => None,
        }
    }
}

/// Form lifecycle
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DraftState {
    /// Just opened or just saved
    #[default]
    Clean,
    /// Edited; validity pending on booked ranges
    Dirty,
    Valid,
    Invalid(ValidationError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Saved(SaveReservationResponse),
    /// Validation stopped the submit; nothing was sent
    Blocked(ValidationError),
    /// A save is already in flight
    Ignored,
    Failed(GatewayError),
}

/// Free-text guest identity fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestField {
    Name,
    Email,
    ContactNumber,
}

#[derive(Debug, Default)]
struct FormState {
    draft: ReservationDraft,
    rooms: RoomLookup,
    booked: BookedRanges,
    /// Bumped on every room change; a booked-range reply for an older
    /// generation is dropped
    room_generation: u64,
    status: DraftState,
    notice: Option<Notice>,
}

impl FormState {
    fn reset_draft(&mut self, draft: ReservationDraft) {
        self.draft = draft;
        self.booked = BookedRanges::NotLoaded;
        self.room_generation += 1;
        self.status = DraftState::Clean;
    }
}

pub struct ReservationFormController<G: Gateway> {
    gateway: Rc<G>,
    config: ReservationConfig,
    state: RefCell<FormState>,
    saving: SavingFlag,
    guest_search: GuestSearch,
}

impl<G: Gateway> ReservationFormController<G> {
    pub fn new(gateway: Rc<G>, config: ReservationConfig) -> Self {
        let guest_search = GuestSearch::new(config.guest_search_min_chars);
        Self {
            gateway,
            config,
            state: RefCell::new(FormState::default()),
            saving: SavingFlag::default(),
            guest_search,
        }
    }

    // ------------------------------------------------------------------
    // Opening
    // ------------------------------------------------------------------

    /// Empty form for a new reservation
    pub async fn open_new(&self, today: NaiveDate) {
        self.state.borrow_mut().reset_draft(ReservationDraft::default());
        self.state.borrow_mut().notice = None;
        self.guest_search.reset();
        self.load_rooms(today).await;
    }

    /// Form pre-filled from a saved reservation
    pub async fn open_edit(&self, reservation: &Reservation, today: NaiveDate) {
        self.state.borrow_mut().reset_draft(ReservationDraft::default());
        self.state.borrow_mut().notice = None;
        self.guest_search.reset();
        self.load_rooms(today).await;

        let room_id = {
            let mut s = self.state.borrow_mut();
            s.draft = ReservationDraft::from_reservation(reservation);
            s.draft.room_id
        };
        self.load_booked_ranges(room_id).await;
        // opening an existing record is not an edit
        self.state.borrow_mut().status = DraftState::Clean;
    }

    /// Fetch the detail record by id, then open it
    pub async fn open_edit_by_id(
        &self,
        id: ReservationId,
        today: NaiveDate,
    ) -> Result<(), GatewayError> {
        match self.gateway.fetch_reservation(id).await {
            Ok(reservation) => {
                self.open_edit(&reservation, today).await;
                Ok(())
            }
            Err(e) => {
                log::error!("failed to load reservation {}: {}", id, e);
                self.set_notice(Notice::danger(e.to_string()));
                Err(e)
            }
        }
    }

    /// Reload the room table; booked ranges are dropped with it
    pub async fn load_rooms(&self, today: NaiveDate) {
        let result = self.gateway.fetch_rooms(Some(availability_window(today))).await;
        let mut s = self.state.borrow_mut();
        s.booked = BookedRanges::NotLoaded;
        s.room_generation += 1;
        match result {
            Ok(rooms) => {
                s.rooms = RoomLookup::from_rooms(rooms);
            }
            Err(e) => {
                log::error!("failed to load rooms: {}", e);
                s.rooms = RoomLookup::default();
                s.notice = Some(Notice::danger(format!("Failed to load rooms. {}", e)));
            }
        }
    }

    /// Reset and forget the draft
    pub fn close(&self) {
        let mut s = self.state.borrow_mut();
        s.reset_draft(ReservationDraft::default());
        s.notice = None;
        drop(s);
        self.guest_search.reset();
    }

    // ------------------------------------------------------------------
    // Field handlers
    // ------------------------------------------------------------------

    /// Select a room and fetch its booked ranges.
    ///
    /// Rapid changes are safe: only the reply for the latest selection is
    /// applied.
    pub async fn on_room_changed(&self, room_id: Option<RoomId>) {
        {
            let mut s = self.state.borrow_mut();
            s.draft.room_id = room_id;
            s.notice = None;
        }
        self.load_booked_ranges(room_id).await;
    }

    /// Dropdown value as sent by the `<select>`; blank means no room
    pub async fn on_room_selected(&self, raw: &str) {
        self.on_room_changed(RoomId::from_form(raw)).await;
    }

    async fn load_booked_ranges(&self, room_id: Option<RoomId>) {
        let (generation, target) = {
            let mut s = self.state.borrow_mut();
            s.room_generation += 1;
            let target = room_id.filter(|id| s.rooms.get(*id).is_some());
            s.booked = match target {
                Some(id) => BookedRanges::Loading(id),
                None => BookedRanges::NotLoaded,
            };
            (s.room_generation, target)
        };
        self.edited();

        let Some(room_id) = target else {
            return;
        };
        let result = self.gateway.fetch_booked_ranges(room_id).await;

        {
            let mut s = self.state.borrow_mut();
            if s.room_generation != generation {
                log::debug!("dropping booked ranges for room {}: selection changed", room_id);
                return;
            }
            s.booked = match result {
                Ok(bookings) => BookedRanges::Loaded { room_id, bookings },
                Err(e) => {
                    log::error!("failed to load booked ranges for room {}: {}", room_id, e);
                    s.notice = Some(Notice::danger(format!(
                        "Could not load booked dates for this room. {}",
                        e
                    )));
                    BookedRanges::Failed(room_id)
                }
            };
        }
        self.edited();
    }

    pub fn on_check_in_changed(&self, value: &str) {
        self.edit(|d| d.check_in = value.trim().to_string());
    }

    pub fn on_check_out_changed(&self, value: &str) {
        self.edit(|d| d.check_out = value.trim().to_string());
    }

    pub fn on_guest_count_changed(&self, value: &str) {
        // blank or garbage reads as 0 and fails validation
        let count = value.trim().parse::<u32>().unwrap_or(0);
        self.edit(|d| d.guest_count = count);
    }

    pub fn on_status_changed(&self, value: &str) {
        let status = ReservationStatus::from_form(value);
        self.edit(|d| d.status = status);
    }

    pub fn on_tax_rate_changed(&self, value: &str) {
        self.edit(|d| d.tax_rate_input = value.to_string());
    }

    pub fn on_discount_changed(&self, value: &str) {
        self.edit(|d| d.discount_input = value.to_string());
    }

    pub fn on_notes_changed(&self, value: &str) {
        self.edit(|d| d.notes = value.to_string());
    }

    /// Typing into a guest field detaches the draft from a picked guest
    pub fn on_guest_field_changed(&self, field: GuestField, value: &str) {
        self.edit(|d| {
            match field {
                GuestField::Name => d.guest_name = value.to_string(),
                GuestField::Email => d.guest_email = value.to_string(),
                GuestField::ContactNumber => d.guest_contact_number = value.to_string(),
            }
            d.guest_id = None;
        });
    }

    fn edit(&self, apply: impl FnOnce(&mut ReservationDraft)) {
        apply(&mut self.state.borrow_mut().draft);
        self.edited();
    }

    /// Recompute the lifecycle state after any change
    fn edited(&self) {
        let status = match self.validate() {
            Ok(_) => DraftState::Valid,
            Err(ValidationError::RangesNotLoaded) => DraftState::Dirty,
            Err(e) => DraftState::Invalid(e),
        };
        self.state.borrow_mut().status = status;
    }

    // ------------------------------------------------------------------
    // Guest search
    // ------------------------------------------------------------------

    /// Start a lookup for the search box text; run it with
    /// [`Self::run_guest_search`] after the debounce delay.
    ///
    /// A new search detaches the draft from any previously picked guest.
    pub fn on_guest_query_changed(&self, query: &str) -> SearchTicket {
        let ticket = self.guest_search.begin(query);
        if self.state.borrow().draft.guest_id.is_some() {
            self.edit(|d| d.guest_id = None);
        }
        ticket
    }

    pub async fn run_guest_search(&self, ticket: &SearchTicket) -> SearchOutcome {
        self.guest_search.run(self.gateway.as_ref(), ticket).await
    }

    pub fn guest_suggestions(&self) -> Vec<String> {
        self.guest_search.suggestions()
    }

    /// Fill the guest fields from a picked suggestion; `false` when the text
    /// matches no suggestion
    pub fn select_guest(&self, label: &str) -> bool {
        match self.guest_search.find_by_label(label) {
            Some(guest) => {
                self.edit(|d| d.apply_guest(&guest));
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Submit
    // ------------------------------------------------------------------

    /// Full check in order: fields, capacity, status, date order, booked
    /// ranges loaded, overlap
    pub fn validate(&self) -> Result<ReservationPayload, ValidationError> {
        let s = self.state.borrow();
        let room = s.draft.room_id.and_then(|id| s.rooms.get(id));
        let (room_id, _) = s.draft.validate_fields(room)?;
        let room = room.ok_or(ValidationError::UnknownRoom)?;

        let bookings = match &s.booked {
            BookedRanges::Failed(r) if *r == room_id => {
                return Err(ValidationError::RangesUnavailable)
            }
            booked => booked
                .for_room(room_id)
                .ok_or(ValidationError::RangesNotLoaded)?,
        };
        let (check_in, check_out) = match (s.draft.check_in_date(), s.draft.check_out_date()) {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(ValidationError::CheckoutNotAfterCheckin),
        };
        let range = check_availability(check_in, check_out, bookings, s.draft.reservation_id)?;
        Ok(s.draft.to_payload(room, range))
    }

    pub fn can_submit(&self) -> bool {
        !self.saving.is_saving() && self.validate().is_ok()
    }

    /// Validate and send the draft.
    ///
    /// A second call while a save is in flight returns `Ignored` without
    /// touching the network.
    pub async fn submit(&self) -> SubmitOutcome {
        if self.saving.is_saving() {
            log::debug!("submit ignored: save in flight");
            return SubmitOutcome::Ignored;
        }
        let payload = match self.validate() {
            Ok(payload) => payload,
            Err(e) => {
                log::debug!("submit blocked: {}", e);
                self.state.borrow_mut().status = DraftState::Invalid(e.clone());
                return SubmitOutcome::Blocked(e);
            }
        };
        let Some(_guard) = self.saving.try_begin() else {
            return SubmitOutcome::Ignored;
        };

        let updating = payload.is_update();
        self.set_notice(Notice::info(if updating {
            "Updating reservation..."
        } else {
            "Saving reservation..."
        }));

        match self.gateway.save_reservation(&payload).await {
            Ok(response) => {
                log::info!(
                    "reservation {} for room {}",
                    if updating { "updated" } else { "created" },
                    payload.room_id
                );
                let mut s = self.state.borrow_mut();
                s.reset_draft(ReservationDraft::default());
                s.notice = Some(Notice::success(if updating {
                    "Reservation updated successfully."
                } else {
                    "Reservation saved successfully."
                }));
                drop(s);
                self.guest_search.reset();
                SubmitOutcome::Saved(response)
            }
            Err(e) => {
                log::error!("failed to save reservation: {}", e);
                self.set_notice(Notice::danger(e.to_string()));
                SubmitOutcome::Failed(e)
            }
        }
    }

    // ------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------

    pub fn draft(&self) -> ReservationDraft {
        self.state.borrow().draft.clone()
    }

    pub fn status(&self) -> DraftState {
        self.state.borrow().status.clone()
    }

    pub fn booked_ranges(&self) -> BookedRanges {
        self.state.borrow().booked.clone()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.state.borrow().notice.clone()
    }

    pub fn set_notice(&self, notice: Notice) {
        self.state.borrow_mut().notice = Some(notice);
    }

    pub fn dismiss_notice(&self) {
        self.state.borrow_mut().notice = None;
    }

    pub fn is_saving(&self) -> bool {
        self.saving.is_saving()
    }

    pub fn is_edit_mode(&self) -> bool {
        self.state.borrow().draft.is_edit_mode()
    }

    /// Live pricing for the current inputs
    pub fn pricing(&self) -> PricingResult {
        let s = self.state.borrow();
        let room = s.draft.room_id.and_then(|id| s.rooms.get(id));
        s.draft.pricing(room)
    }

    /// `(id, label)` pairs for the room dropdown, in server order
    pub fn room_options(&self) -> Vec<(RoomId, String)> {
        self.state
            .borrow()
            .rooms
            .iter()
            .map(|r| (r.room_id, r.option_label()))
            .collect()
    }

    pub fn selected_room_meta(&self) -> Option<String> {
        let s = self.state.borrow();
        let room = s.rooms.get(s.draft.room_id?)?;
        Some(room.meta_line())
    }

    pub fn booked_hint(&self) -> Option<String> {
        let s = self.state.borrow();
        let room_id = s.draft.room_id?;
        blocked_ranges_hint(s.booked.for_room(room_id)?, self.config.booked_hint_limit)
    }

    /// Earliest selectable check-in
    pub fn min_check_in(&self, today: NaiveDate) -> NaiveDate {
        today
    }

    /// Earliest selectable check-out: today, or the chosen check-in if later
    pub fn min_check_out(&self, today: NaiveDate) -> NaiveDate {
        match self.state.borrow().draft.check_in_date() {
            Some(check_in) if check_in > today => check_in,
            _ => today,
        }
    }
}

impl<G: Gateway + 'static> ReservationFormController<G> {
    /// Debounced guest search: the lookup runs after the configured delay
    /// unless another keystroke arrives first
    pub fn schedule_guest_search(self: &Rc<Self>, query: &str) {
        let ticket = self.on_guest_query_changed(query);
        let delay = self.config.guest_search_debounce_ms;
        let this = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(delay).await;
            this.run_guest_search(&ticket).await;
        });
    }
}
