//! Switch-scanning interpreter.
//!
//! Turns abstract switch presses into "select the highlighted item" and
//! "advance" events for users who drive the game with one to three physical
//! switches. The interpreter never fails: presses it cannot use are dropped.
//!
//! Time is fed in through [`SwitchScanner::update`], the same way the
//! controller is ticked, so the auto-advance timer and the re-entrancy guard
//! are deterministic under test.

use crate::types::{SwitchMode, SwitchPress, DEFAULT_SCAN_DELAY_MS, SWITCH_SETTLE_MS};

/// What the controller should do in response to a press or a timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEvent {
    Select { index: usize },
    Advance,
}

#[derive(Debug, Clone)]
pub struct SwitchScanner {
    mode: SwitchMode,
    scan_delay_ms: u32,
    settle_ms: u32,
    item_count: usize,
    /// Identity of the current item collection; a new id resets the highlight.
    collection_id: Option<u64>,
    highlighted_index: usize,
    is_highlighted: bool,
    /// Remaining time before a single-switch highlight auto-advances.
    advance_timer_ms: Option<u32>,
    /// Remaining settle time during which presses are dropped.
    busy_ms: Option<u32>,
}

impl SwitchScanner {
    pub fn new(mode: SwitchMode) -> Self {
        Self::with_config(mode, DEFAULT_SCAN_DELAY_MS, SWITCH_SETTLE_MS)
    }

    pub fn with_config(mode: SwitchMode, scan_delay_ms: u32, settle_ms: u32) -> Self {
        Self {
            mode,
            scan_delay_ms,
            settle_ms,
            item_count: 0,
            collection_id: None,
            highlighted_index: 0,
            is_highlighted: false,
            advance_timer_ms: None,
            busy_ms: None,
        }
    }

    pub fn mode(&self) -> SwitchMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SwitchMode) {
        self.mode = mode;
        self.reset_highlight();
    }

    pub fn scan_delay_ms(&self) -> u32 {
        self.scan_delay_ms
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted_index
    }

    pub fn is_highlighted(&self) -> bool {
        self.is_highlighted
    }

    /// Highlighted item, if any.
    pub fn highlight(&self) -> Option<usize> {
        self.is_highlighted.then_some(self.highlighted_index)
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn is_busy(&self) -> bool {
        self.busy_ms.is_some()
    }

    pub fn advance_pending(&self) -> bool {
        self.advance_timer_ms.is_some()
    }

    /// Point the scanner at an item collection.
    ///
    /// The highlight survives only while `id` stays the same.
    pub fn set_items(&mut self, id: u64, count: usize) {
        if self.collection_id != Some(id) {
            self.collection_id = Some(id);
            self.reset_highlight();
        }
        self.item_count = count;
        if self.highlighted_index >= count {
            self.highlighted_index = 0;
        }
    }

    pub fn reset_highlight(&mut self) {
        self.highlighted_index = 0;
        self.is_highlighted = false;
        self.advance_timer_ms = None;
    }

    pub fn press(&mut self, press: SwitchPress) -> Option<ScanEvent> {
        if self.mode == SwitchMode::Disabled || self.item_count == 0 {
            return None;
        }
        if self.busy_ms.is_some() {
            log::trace!("dropping {press:?}: previous press still settling");
            return None;
        }
        if self.settle_ms > 0 {
            self.busy_ms = Some(self.settle_ms);
        }

        match self.mode {
            SwitchMode::Disabled => None,
            SwitchMode::Single => self.press_single(),
            SwitchMode::Dual => self.press_multi(press, false),
            SwitchMode::Triple => self.press_multi(press, true),
        }
    }

    fn press_single(&mut self) -> Option<ScanEvent> {
        if self.is_highlighted {
            self.advance_timer_ms = None;
            self.is_highlighted = false;
            Some(ScanEvent::Select {
                index: self.highlighted_index,
            })
        } else {
            self.is_highlighted = true;
            self.advance_timer_ms = Some(self.scan_delay_ms);
            None
        }
    }

    fn press_multi(&mut self, press: SwitchPress, cycles: bool) -> Option<ScanEvent> {
        match press {
            SwitchPress::Space | SwitchPress::Switch1 => {
                self.is_highlighted = true;
                self.advance_timer_ms = None;
                None
            }
            SwitchPress::Enter | SwitchPress::Switch3 => {
                if !self.is_highlighted {
                    return None;
                }
                self.is_highlighted = false;
                Some(ScanEvent::Select {
                    index: self.highlighted_index,
                })
            }
            SwitchPress::Plus if cycles => {
                if self.is_highlighted {
                    self.highlighted_index = (self.highlighted_index + 1) % self.item_count;
                    None
                } else {
                    Some(ScanEvent::Advance)
                }
            }
            SwitchPress::Plus | SwitchPress::Generic => None,
        }
    }

    /// Let `elapsed_ms` pass. Returns [`ScanEvent::Advance`] when the
    /// single-switch timer runs out.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<ScanEvent> {
        if let Some(busy) = self.busy_ms {
            self.busy_ms = busy.checked_sub(elapsed_ms).filter(|&left| left > 0);
        }

        let remaining = self.advance_timer_ms?;
        if elapsed_ms >= remaining {
            self.reset_highlight();
            Some(ScanEvent::Advance)
        } else {
            self.advance_timer_ms = Some(remaining - elapsed_ms);
            None
        }
    }
}
