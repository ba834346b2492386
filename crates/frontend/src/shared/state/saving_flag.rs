use std::cell::Cell;

/// "Request in flight" marker for a form.
///
/// Set through [`SavingFlag::try_begin`] and cleared when the returned guard
/// drops, so every exit path of the save (success, error, early return)
/// re-enables the form.
#[derive(Debug, Default)]
pub struct SavingFlag {
    saving: Cell<bool>,
}

impl SavingFlag {
    pub fn is_saving(&self) -> bool {
        self.saving.get()
    }

    /// `None` while another save holds the flag
    pub fn try_begin(&self) -> Option<SavingGuard<'_>> {
        if self.saving.replace(true) {
            return None;
        }
        Some(SavingGuard { flag: &self.saving })
    }
}

#[derive(Debug)]
pub struct SavingGuard<'a> {
    flag: &'a Cell<bool>,
}

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
