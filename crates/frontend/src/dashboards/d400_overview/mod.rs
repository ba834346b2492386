pub mod api;
pub mod state;

pub use state::{today_label, DashboardOverview, RecentRow};
