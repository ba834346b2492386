pub mod saving_flag;
pub mod widget_state;

pub use saving_flag::{SavingFlag, SavingGuard};
pub use widget_state::WidgetState;
