pub mod api;
pub mod calendar;
pub mod ui;
