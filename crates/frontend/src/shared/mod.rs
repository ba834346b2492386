pub mod api_utils;
pub mod config;
pub mod date_utils;
pub mod gateway;
pub mod notice;
pub mod state;

#[cfg(test)]
pub mod testing;
