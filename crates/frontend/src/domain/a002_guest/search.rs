//! Type-ahead guest lookup for the reservation form.
//!
//! Each keystroke takes a [`SearchTicket`]; only the newest ticket may apply
//! its results, so a slow reply for "Ann" can never overwrite the list for
//! "Anna".

use crate::shared::gateway::{Gateway, GatewayError};
use contracts::domain::a002_guest::Guest;
use std::cell::{Cell, RefCell};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: String,
}

impl SearchTicket {
    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Suggestions replaced with this many guests
    Applied(usize),
    /// Query too short; suggestions cleared without a request
    Cleared,
    /// A newer keystroke took over; nothing changed
    Superseded,
    Failed(GatewayError),
}

#[derive(Debug)]
pub struct GuestSearch {
    min_chars: usize,
    latest: Cell<u64>,
    results: RefCell<Vec<Guest>>,
}

impl GuestSearch {
    pub fn new(min_chars: usize) -> Self {
        Self {
            min_chars,
            latest: Cell::new(0),
            results: RefCell::new(Vec::new()),
        }
    }

    /// Register a keystroke; every older ticket becomes stale
    pub fn begin(&self, query: &str) -> SearchTicket {
        let seq = self.latest.get() + 1;
        self.latest.set(seq);
        SearchTicket {
            seq,
            query: query.trim().to_string(),
        }
    }

    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        ticket.seq == self.latest.get()
    }

    /// Run the lookup for `ticket` once its debounce delay has passed
    pub async fn run<G: Gateway + ?Sized>(&self, gateway: &G, ticket: &SearchTicket) -> SearchOutcome {
        if !self.is_current(ticket) {
            return SearchOutcome::Superseded;
        }
        if ticket.query.chars().count() < self.min_chars {
            self.results.borrow_mut().clear();
            return SearchOutcome::Cleared;
        }

        let result = gateway.search_guests(&ticket.query).await;

        if !self.is_current(ticket) {
            log::debug!("guest search '{}' superseded", ticket.query);
            return SearchOutcome::Superseded;
        }
        match result {
            Ok(guests) => {
                let count = guests.len();
                *self.results.borrow_mut() = guests;
                SearchOutcome::Applied(count)
            }
            Err(e) => {
                log::warn!("guest search '{}' failed: {}", ticket.query, e);
                self.results.borrow_mut().clear();
                SearchOutcome::Failed(e)
            }
        }
    }

    pub fn results(&self) -> Vec<Guest> {
        self.results.borrow().clone()
    }

    pub fn suggestions(&self) -> Vec<String> {
        self.results
            .borrow()
            .iter()
            .map(Guest::suggestion_label)
            .collect()
    }

    /// Guest whose suggestion text is exactly `label`
    pub fn find_by_label(&self, label: &str) -> Option<Guest> {
        self.results
            .borrow()
            .iter()
            .find(|g| g.suggestion_label() == label)
            .cloned()
    }

    /// Drop suggestions and invalidate any lookup in flight
    pub fn reset(&self) {
        self.latest.set(self.latest.get() + 1);
        self.results.borrow_mut().clear();
    }
}
