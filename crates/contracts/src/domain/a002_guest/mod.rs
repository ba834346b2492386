pub mod aggregate;

pub use aggregate::{Guest, GuestId, GuestsResponse};
