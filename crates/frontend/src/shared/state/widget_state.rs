/// Load state of an independently fetched panel.
///
/// A failed panel shows its own "cannot load" text while the others render
/// normally.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetState<T> {
    Loading,
    Loaded(T),
    CannotLoad(String),
}

impl<T> Default for WidgetState<T> {
    fn default() -> Self {
        WidgetState::Loading
    }
}

impl<T> WidgetState<T> {
    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => WidgetState::Loaded(value),
            Err(e) => WidgetState::CannotLoad(e.to_string()),
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            WidgetState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, WidgetState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            WidgetState::CannotLoad(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> WidgetState<U> {
        match self {
            WidgetState::Loading => WidgetState::Loading,
            WidgetState::Loaded(value) => WidgetState::Loaded(f(value)),
            WidgetState::CannotLoad(message) => WidgetState::CannotLoad(message),
        }
    }
}
