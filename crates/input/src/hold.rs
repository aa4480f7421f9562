//! Long-press detection for terminals.
//!
//! Most terminals never report key releases, only auto-repeated presses. A
//! key counts as held while repeats keep arriving; once none has arrived for
//! the release timeout it counts as released.

/// Gap between repeats that ends a hold. Terminal auto-repeat is usually
/// 30-60 Hz after a ~500 ms initial delay.
pub const DEFAULT_RELEASE_TIMEOUT_MS: u32 = 650;

#[derive(Debug, Clone)]
pub struct HoldTracker {
    held_ms: Option<u32>,
    since_last_press_ms: u32,
    release_timeout_ms: u32,
}

impl HoldTracker {
    pub fn new() -> Self {
        Self::with_release_timeout_ms(DEFAULT_RELEASE_TIMEOUT_MS)
    }

    pub fn with_release_timeout_ms(release_timeout_ms: u32) -> Self {
        Self {
            held_ms: None,
            since_last_press_ms: 0,
            release_timeout_ms,
        }
    }

    /// A press or auto-repeat of the tracked key.
    pub fn press(&mut self) {
        if self.held_ms.is_none() {
            self.held_ms = Some(0);
        }
        self.since_last_press_ms = 0;
    }

    pub fn is_held(&self) -> bool {
        self.held_ms.is_some()
    }

    pub fn held_ms(&self) -> u32 {
        self.held_ms.unwrap_or(0)
    }

    /// Let time pass. Returns the total hold duration when the key is
    /// considered released.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<u32> {
        let held = self.held_ms?;
        self.since_last_press_ms = self.since_last_press_ms.saturating_add(elapsed_ms);
        if self.since_last_press_ms > self.release_timeout_ms {
            self.held_ms = None;
            return Some(held);
        }
        self.held_ms = Some(held.saturating_add(elapsed_ms));
        None
    }
}

impl Default for HoldTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeats_extend_the_hold() {
        let mut h = HoldTracker::with_release_timeout_ms(100);
        h.press();
        for _ in 0..10 {
            assert_eq!(h.update(50), None);
            h.press();
        }
        assert_eq!(h.held_ms(), 500);
        assert_eq!(h.update(50), None);
        assert_eq!(h.update(60), Some(550));
        assert!(!h.is_held());
    }

    #[test]
    fn idle_tracker_reports_nothing() {
        let mut h = HoldTracker::new();
        assert_eq!(h.update(10_000), None);
    }
}
