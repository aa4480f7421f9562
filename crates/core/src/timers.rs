//! Delayed continuations tagged with the round generation that scheduled them.
//!
//! The controller never cancels an individual continuation. It bumps its
//! generation counter instead, and compares each popped timer's generation
//! with the current one before running it.

#[derive(Debug, Clone, PartialEq)]
pub struct Timer<S> {
    pub remaining_ms: u32,
    pub generation: u32,
    pub step: S,
}

#[derive(Debug, Clone)]
pub struct Timers<S> {
    entries: Vec<Timer<S>>,
}

impl<S> Timers<S> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn schedule(&mut self, delay_ms: u32, generation: u32, step: S) {
        self.entries.push(Timer {
            remaining_ms: delay_ms,
            generation,
            step,
        });
    }

    /// Pop the earliest timer due within `budget_ms`.
    ///
    /// Returns the time consumed to reach it; every other timer is moved
    /// forward by the same amount. Ties fire in scheduling order.
    pub fn pop_due(&mut self, budget_ms: u32) -> Option<(u32, Timer<S>)> {
        let (idx, due) = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, t)| t.remaining_ms <= budget_ms)
            .min_by_key(|(i, t)| (t.remaining_ms, *i))
            .map(|(i, t)| (i, t.remaining_ms))?;

        let timer = self.entries.remove(idx);
        self.elapse(due);
        Some((due, timer))
    }

    /// Move every timer forward without firing anything.
    pub fn elapse(&mut self, elapsed_ms: u32) {
        for t in &mut self.entries {
            t.remaining_ms = t.remaining_ms.saturating_sub(elapsed_ms);
        }
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S> Default for Timers<S> {
    fn default() -> Self {
        Self::new()
    }
}
