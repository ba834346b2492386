pub mod dto;

pub use dto::{OccupancySummary, ReservationStats, SeriesPoint};
