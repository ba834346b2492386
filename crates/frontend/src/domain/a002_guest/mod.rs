pub mod api;
pub mod search;
