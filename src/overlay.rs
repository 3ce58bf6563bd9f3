//! Transient overlay controller.
//!
//! A single `busy` flag; the loading overlay is drawn if and only if it is set.
//! Timing lives with the caller (see [`crate::transition`]).

/// Busy flag behind the full-screen loading overlay.
#[derive(Debug, Clone, Default)]
pub struct OverlayController {
    busy: bool,
    shown_count: u64,
}

impl OverlayController {
    /// Creates a hidden overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the overlay.
    pub fn show(&mut self) {
        if !self.busy {
            self.shown_count += 1;
        }
        self.busy = true;
    }

    /// Hides the overlay.
    pub fn hide(&mut self) {
        self.busy = false;
    }

    /// Whether the overlay is visible.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// How many times the overlay went from hidden to visible.
    #[must_use]
    pub const fn shown_count(&self) -> u64 {
        self.shown_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_hide() {
        let mut overlay = OverlayController::new();
        assert!(!overlay.is_busy());
        overlay.show();
        overlay.show();
        assert!(overlay.is_busy());
        assert_eq!(overlay.shown_count(), 1);
        overlay.hide();
        assert!(!overlay.is_busy());
        overlay.hide();
        assert!(!overlay.is_busy());
    }
}
