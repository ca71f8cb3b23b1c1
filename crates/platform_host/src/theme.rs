//! Global theme-marker contract used to expose dark mode to the presentation layer.

use std::{cell::RefCell, rc::Rc};

/// Host service that applies or removes the global dark-theme marker.
pub trait ThemeMarker {
    /// Applies the marker when `enabled`, removes it otherwise.
    fn apply_dark_mode(&self, enabled: bool);
}

#[derive(Debug, Clone, Copy, Default)]
/// Theme marker that ignores every request.
pub struct NoopThemeMarker;

impl ThemeMarker for NoopThemeMarker {
    fn apply_dark_mode(&self, _enabled: bool) {}
}

#[derive(Debug, Clone, Default)]
/// Theme marker that records each applied value in order.
pub struct MemoryThemeMarker {
    applied: Rc<RefCell<Vec<bool>>>,
}

impl MemoryThemeMarker {
    /// Returns whether the marker is currently applied.
    pub fn is_dark(&self) -> bool {
        self.applied.borrow().last().copied().unwrap_or(false)
    }

    /// Returns every value applied so far.
    pub fn history(&self) -> Vec<bool> {
        self.applied.borrow().clone()
    }
}

impl ThemeMarker for MemoryThemeMarker {
    fn apply_dark_mode(&self, enabled: bool) {
        self.applied.borrow_mut().push(enabled);
    }
}
