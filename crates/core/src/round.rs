//! Round state - one page of cards and the order its targets are presented in
//!
//! A round is built wholesale for a page and thrown away on the next page
//! change. Within a round the only mutation is cards turning matched, one at
//! a time, never back.

use std::collections::BTreeSet;

use crate::rng::SimpleRng;
use crate::types::{Card, CardsPerPage, MatchProperty, ShuffleMode, Word};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoundState {
    active_set: Vec<Card>,
    static_cards: Vec<Card>,
    target_order: Vec<usize>,
    current_index: usize,
    match_card: Option<Card>,
    revealed: BTreeSet<String>,
    group_start: usize,
    level: u32,
}

impl RoundState {
    /// Build the round for the page starting at `start`.
    ///
    /// A start past the end of the list falls back to the first page. Returns
    /// `None` only when the word list is empty.
    pub fn build(
        words: &[Word],
        start: usize,
        per_page: CardsPerPage,
        shuffle: ShuffleMode,
        rng: &mut SimpleRng,
    ) -> Option<Self> {
        if words.is_empty() {
            return None;
        }

        let mut source: Vec<Card> = words
            .iter()
            .enumerate()
            .map(|(id, w)| Card::from_word(id, w))
            .collect();
        if shuffle == ShuffleMode::All {
            rng.shuffle(&mut source);
        }

        let size = per_page.count();
        let start = if start < source.len() {
            start
        } else {
            log::debug!("page start {start} is past {} words, restarting at 0", source.len());
            0
        };
        let end = (start + size).min(source.len());

        let mut active_set = source[start..end].to_vec();
        if shuffle == ShuffleMode::Page {
            rng.shuffle(&mut active_set);
        }

        let target_order = rng.permutation(active_set.len());
        let match_card = active_set.get(target_order[0]).cloned();

        Some(Self {
            static_cards: active_set.clone(),
            active_set,
            target_order,
            current_index: 0,
            match_card,
            revealed: BTreeSet::new(),
            group_start: start,
            level: 1,
        })
    }

    pub fn active_set(&self) -> &[Card] {
        &self.active_set
    }

    pub fn static_cards(&self) -> &[Card] {
        &self.static_cards
    }

    pub fn target_order(&self) -> &[usize] {
        &self.target_order
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn match_card(&self) -> Option<&Card> {
        self.match_card.as_ref()
    }

    pub fn revealed(&self) -> &BTreeSet<String> {
        &self.revealed
    }

    pub fn group_start(&self) -> usize {
        self.group_start
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn len(&self) -> usize {
        self.active_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active_set.is_empty()
    }

    /// Whether the live match card would be accepted on `slot`.
    pub fn accepts(&self, slot: usize, property: MatchProperty) -> bool {
        match (self.match_card.as_ref(), self.static_cards.get(slot)) {
            (Some(m), Some(s)) => !s.is_matched && m.matches(s, property),
            _ => false,
        }
    }

    /// First unmatched slot that accepts the live match card.
    pub fn correct_slot(&self, property: MatchProperty) -> Option<usize> {
        (0..self.static_cards.len()).find(|&slot| self.accepts(slot, property))
    }

    /// Mark `slot` solved. Returns false if it already was, or does not exist.
    pub fn mark_matched(&mut self, slot: usize) -> bool {
        let Some(card) = self.static_cards.get(slot) else {
            return false;
        };
        if card.is_matched {
            return false;
        }
        let solved = card.with_matched();
        self.revealed.insert(solved.image.clone());
        self.static_cards[slot] = solved;
        true
    }

    /// Hide the match card between targets.
    pub fn clear_match_card(&mut self) {
        self.match_card = None;
    }

    pub fn is_last_target(&self) -> bool {
        self.current_index + 1 >= self.target_order.len()
    }

    /// Present the next target. Returns false when the group is exhausted.
    pub fn advance_target(&mut self) -> bool {
        if self.is_last_target() {
            self.match_card = None;
            return false;
        }
        self.current_index += 1;
        self.level += 1;
        self.match_card = Some(self.active_set[self.target_order[self.current_index]].clone());
        true
    }

    pub fn is_complete(&self) -> bool {
        !self.static_cards.is_empty() && self.static_cards.iter().all(|c| c.is_matched)
    }
}

/// Start of the last (possibly partial) page.
///
/// ```
/// use makaton_match_core::round::last_group_start;
///
/// assert_eq!(last_group_start(10, 4), 8);
/// assert_eq!(last_group_start(12, 4), 8);
/// assert_eq!(last_group_start(0, 4), 0);
/// ```
pub fn last_group_start(len: usize, size: usize) -> usize {
    if len == 0 || size == 0 {
        return 0;
    }
    let rem = len % size;
    len - if rem == 0 { size } else { rem }
}

/// Previous page start, clamped at zero.
pub fn previous_group_start(start: usize, size: usize) -> usize {
    start.saturating_sub(size)
}

/// Next page start, or `None` past the end of the list.
pub fn next_group_start(start: usize, size: usize, len: usize) -> Option<usize> {
    let next = start + size;
    (next < len).then_some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(texts: &[&str]) -> Vec<Word> {
        texts
            .iter()
            .map(|t| Word::new(format!("{t}.png"), *t))
            .collect()
    }

    #[test]
    fn build_slices_the_requested_page() {
        let w = words(&["a", "b", "c", "d", "e", "f"]);
        let mut rng = SimpleRng::new(1);
        let round = RoundState::build(&w, 4, CardsPerPage::Four, ShuffleMode::Off, &mut rng).unwrap();
        let texts: Vec<&str> = round.active_set().iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["e", "f"]);
        assert_eq!(round.group_start(), 4);
        assert_eq!(round.target_order().len(), 2);
    }

    #[test]
    fn out_of_range_start_restarts_at_zero() {
        let w = words(&["a", "b"]);
        let mut rng = SimpleRng::new(1);
        let round = RoundState::build(&w, 10, CardsPerPage::Two, ShuffleMode::Off, &mut rng).unwrap();
        assert_eq!(round.group_start(), 0);
        assert_eq!(round.len(), 2);
    }

    #[test]
    fn empty_source_builds_nothing() {
        let mut rng = SimpleRng::new(1);
        assert!(RoundState::build(&[], 0, CardsPerPage::Four, ShuffleMode::Off, &mut rng).is_none());
    }

    #[test]
    fn page_shuffle_keeps_page_membership() {
        let w = words(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        let mut rng = SimpleRng::new(5);
        let round = RoundState::build(&w, 4, CardsPerPage::Four, ShuffleMode::Page, &mut rng).unwrap();
        let mut ids: Vec<usize> = round.active_set().iter().map(|c| c.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![4, 5, 6, 7]);
    }

    #[test]
    fn mark_matched_is_one_way() {
        let w = words(&["a", "b"]);
        let mut rng = SimpleRng::new(1);
        let mut round = RoundState::build(&w, 0, CardsPerPage::Two, ShuffleMode::Off, &mut rng).unwrap();
        assert!(round.mark_matched(1));
        assert!(!round.mark_matched(1));
        assert!(!round.mark_matched(7));
        assert!(round.static_cards()[1].is_matched);
        assert!(round.revealed().contains("b.png"));
        assert!(!round.active_set()[1].is_matched);
    }

    #[test]
    fn advance_walks_target_order() {
        let w = words(&["a", "b", "c"]);
        let mut rng = SimpleRng::new(3);
        let mut round = RoundState::build(&w, 0, CardsPerPage::Three, ShuffleMode::Off, &mut rng).unwrap();
        let order = round.target_order().to_vec();
        for (i, &idx) in order.iter().enumerate() {
            assert_eq!(round.current_index(), i);
            assert_eq!(round.match_card().unwrap().id, round.active_set()[idx].id);
            let advanced = round.advance_target();
            assert_eq!(advanced, i + 1 < order.len());
        }
        assert!(round.match_card().is_none());
        assert_eq!(round.level(), 3);
    }

    #[test]
    fn page_arithmetic() {
        assert_eq!(last_group_start(10, 4), 8);
        assert_eq!(last_group_start(12, 4), 8);
        assert_eq!(last_group_start(3, 4), 0);
        assert_eq!(previous_group_start(4, 4), 0);
        assert_eq!(previous_group_start(2, 4), 0);
        assert_eq!(next_group_start(4, 4, 10), Some(8));
        assert_eq!(next_group_start(8, 4, 10), None);
        assert_eq!(next_group_start(4, 4, 8), None);
    }
}
