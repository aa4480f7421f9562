use crate::core::{GameSnapshot, GameState, MatchOutcome, NullPlayer, Player};
use crate::input::{ScanEvent, SwitchScanner};
use crate::types::{SwitchMode, SwitchPress, SWITCH_SETTLE_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectError {
    NotInteractive,
    NoSuchCard,
    AlreadyMatched,
}

impl SelectError {
    pub fn code(self) -> &'static str {
        match self {
            SelectError::NotInteractive => "not_interactive",
            SelectError::NoSuchCard | SelectError::AlreadyMatched => "invalid_select",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SelectError::NotInteractive => "the round is not accepting input",
            SelectError::NoSuchCard => "no static card at that index",
            SelectError::AlreadyMatched => "that card is already matched",
        }
    }
}

/// A controller plus the switch interpreter feeding it.
///
/// With two or three switches the scanner walks the static cards and a
/// select taps the highlighted one. With a single switch the only item is
/// the match card itself, so both a confirming press and the auto-advance
/// timeout match it onto its slot.
pub struct Session<P: Player = NullPlayer> {
    game: GameState<P>,
    scanner: SwitchScanner,
}

impl<P: Player> Session<P> {
    pub fn new(game: GameState<P>) -> Self {
        let settings = game.settings();
        let scanner = SwitchScanner::with_config(
            settings.switch_mode(),
            settings.scan_delay_ms,
            SWITCH_SETTLE_MS,
        );
        let mut session = Self { game, scanner };
        session.sync_scanner();
        session
    }

    pub fn game(&self) -> &GameState<P> {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameState<P> {
        &mut self.game
    }

    pub fn scanner(&self) -> &SwitchScanner {
        &self.scanner
    }

    pub fn switches_enabled(&self) -> bool {
        self.scanner.mode() != SwitchMode::Disabled
    }

    /// Feed one switch press. Returns what the controller did, if anything.
    pub fn press(&mut self, press: SwitchPress) -> Option<MatchOutcome> {
        self.sync_scanner();
        let event = self.scanner.press(press)?;
        Some(self.handle(event))
    }

    /// Direct tap on a static card (pointer path, not the scanner).
    pub fn tap(&mut self, index: usize) -> Result<MatchOutcome, SelectError> {
        if !self.game.interactive() {
            return Err(SelectError::NotInteractive);
        }
        let Some(card) = self
            .game
            .round()
            .and_then(|r| r.static_cards().get(index))
        else {
            return Err(SelectError::NoSuchCard);
        };
        if card.is_matched {
            return Err(SelectError::AlreadyMatched);
        }
        Ok(self.game.select_static(index))
    }

    pub fn tick(&mut self, elapsed_ms: u32) -> Option<MatchOutcome> {
        self.game.tick(elapsed_ms);
        self.sync_scanner();
        let event = self.scanner.update(elapsed_ms)?;
        Some(self.handle(event))
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = self.game.snapshot();
        match self.scanner.mode() {
            SwitchMode::Disabled => {}
            SwitchMode::Single => snap.match_highlighted = self.scanner.is_highlighted(),
            SwitchMode::Dual | SwitchMode::Triple => snap.highlight = self.scanner.highlight(),
        }
        snap
    }

    fn handle(&mut self, event: ScanEvent) -> MatchOutcome {
        let outcome = match event {
            ScanEvent::Select { index } => {
                if self.scanner.mode() == SwitchMode::Single {
                    self.game.auto_match()
                } else {
                    self.game.select_static(index)
                }
            }
            ScanEvent::Advance => {
                let outcome = self.game.auto_match();
                self.scanner.reset_highlight();
                outcome
            }
        };
        log::debug!("switch {event:?} -> {outcome:?}");
        outcome
    }

    /// Keep the scanner pointed at the current round's items. A new round
    /// (new generation) or a new target within it is a new collection; while
    /// the round is busy there is nothing to scan.
    fn sync_scanner(&mut self) {
        let count = if self.game.interactive() {
            match self.scanner.mode() {
                SwitchMode::Single => 1,
                _ => self.game.round().map_or(0, |r| r.static_cards().len()),
            }
        } else {
            0
        };
        let target = self.game.round().map_or(0, |r| r.current_index() as u64);
        let id = (u64::from(self.game.generation()) << 32) | target;
        self.scanner.set_items(id, count);
    }
}
