use std::cell::Cell;
use std::rc::Rc;

/// One-way "offer ended" flag shared by every component of a page.
///
/// Clones are handles to the same flag. It starts cleared and can only be
/// set, never cleared again.
#[derive(Debug, Clone, Default)]
pub struct ExpiryFlag {
    expired: Rc<Cell<bool>>,
}

impl ExpiryFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expired(&self) -> bool {
        self.expired.get()
    }

    /// Set the flag. Returns true only for the call that flipped it.
    pub(crate) fn set(&self) -> bool {
        !self.expired.replace(true)
    }
}
