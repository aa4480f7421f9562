//! Game state module - the round/game controller
//!
//! Owns the round, the layout, the animation values and the player. Nothing
//! here blocks: every wait in the match sequence is a generation-tagged timer
//! or a pending playback ticket, and [`GameState::tick`] drives both.
//!
//! A successful match always runs the same strictly ordered steps:
//!
//! 1. glide the match card onto its slot
//! 2. mark the slot matched, optionally play the word and wait for it
//! 3. flip (none, single or double, per game kind)
//! 4. wait out the rest of the minimum dwell
//! 5. clear the match card, pause, present the next target
//!
//! Navigation and teardown bump the generation. Anything scheduled under an
//! older generation is dropped when it comes due.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::animation::{
    animator_for, flip_stage, CardAnimator, Easing, RenderCapability, ShakeSequence, Tween,
};
use crate::layout::{compute_layout, Layout};
use crate::player::{ExclusivePlayer, NullPlayer, Playback, PlaybackTicket, Player, SpeechCue};
use crate::rng::SimpleRng;
use crate::round::{last_group_start, next_group_start, previous_group_start, RoundState};
use crate::snapshot::{GameSnapshot, MatchCardView, StaticCardView, ToolbarState};
use crate::types::*;

/// Scale of a lifted (dragged) match card.
const DRAG_LIFT_SCALE: f32 = 1.1;
const DRAG_LIFT_MS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// No round (nothing initialized yet, or an empty word list).
    Idle,
    /// Match card live and accepting input.
    RoundActive,
    /// A match sequence is running.
    Animating,
    /// Every target of the page has been matched.
    RoundComplete,
    /// Fading out, rebuilding, fading back in.
    PageTransitioning,
}

/// Result of a drop, tap or switch selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched { slot: usize },
    /// Wrong card or dropped outside every slot; the card springs back.
    Mismatch,
    /// The controller was not accepting input.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    MatchArrived { slot: usize },
    FlipStageDone { slot: usize, stage: u8 },
    DwellElapsed,
    ShowNextTarget,
    ShakeDone,
    FadedOut { start: usize },
    FadedIn,
}

/// What a pending playback resumes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resume {
    Reveal { slot: usize },
    Reward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingPlayback {
    ticket: PlaybackTicket,
    generation: u32,
    resume: Resume,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct FlipState {
    slot: usize,
    progress: Tween,
}

#[derive(Debug, Clone, PartialEq)]
struct ShakeState {
    sequences: Vec<ShakeSequence>,
    elapsed_ms: u32,
    running: bool,
}

impl ShakeState {
    fn value(&self, slot: usize) -> f32 {
        self.sequences
            .get(slot)
            .map(|s| s.value_at(self.elapsed_ms))
            .unwrap_or(0.0)
    }
}

/// Complete controller state
pub struct GameState<P: Player = NullPlayer> {
    words: Vec<Word>,
    settings: Settings,
    kind: GameKind,
    config: GameConfig,
    rng: SimpleRng,
    player: ExclusivePlayer<P>,
    animator: &'static dyn CardAnimator,

    round: Option<RoundState>,
    phase: Phase,
    group_start: usize,
    /// Bumped on every teardown and freeze; continuations carry the value they were scheduled under.
    generation: u32,
    clock_ms: u64,
    timers: crate::timers::Timers<Step>,
    pending: Option<PendingPlayback>,
    /// Shake and reward sound still running after a group completes.
    reward_waits: u8,
    dwell_deadline_ms: u64,

    layout: Option<Layout>,

    offset_x: Tween,
    offset_y: Tween,
    match_scale: Tween,
    opacity: Tween,
    flip: Option<FlipState>,
    shake: Option<ShakeState>,
    revealed_slots: BTreeSet<usize>,
    dragging: bool,
    show_word: bool,
    can_show_text: bool,

    locked: bool,
}

impl<P: Player> GameState<P> {
    pub fn new(words: Vec<Word>, settings: Settings, kind: GameKind, seed: u32, player: P) -> Self {
        Self {
            words,
            settings,
            kind,
            config: kind.config(),
            rng: SimpleRng::new(seed),
            player: ExclusivePlayer::new(player),
            animator: animator_for(RenderCapability::Renders3D),
            round: None,
            phase: Phase::Idle,
            group_start: 0,
            generation: 0,
            clock_ms: 0,
            timers: crate::timers::Timers::new(),
            pending: None,
            reward_waits: 0,
            dwell_deadline_ms: 0,
            layout: None,
            offset_x: Tween::rest(0.0),
            offset_y: Tween::rest(0.0),
            match_scale: Tween::rest(1.0),
            opacity: Tween::rest(1.0),
            flip: None,
            shake: None,
            revealed_slots: BTreeSet::new(),
            dragging: false,
            show_word: false,
            can_show_text: false,
            locked: false,
        }
    }

    /// Pick the rendering strategy. Call once, before the first round.
    pub fn with_capability(mut self, capability: RenderCapability) -> Self {
        self.animator = animator_for(capability);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn capability(&self) -> RenderCapability {
        self.animator.capability()
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn group_start(&self) -> usize {
        self.group_start
    }

    pub fn level(&self) -> u32 {
        self.round.as_ref().map_or(0, RoundState::level)
    }

    pub fn match_card(&self) -> Option<&Card> {
        self.round.as_ref().and_then(RoundState::match_card)
    }

    pub fn player(&self) -> &P {
        self.player.inner()
    }

    pub fn player_mut(&mut self) -> &mut P {
        self.player.inner_mut()
    }

    /// Ticket of the playback the controller is currently waiting on.
    pub fn awaited_playback(&self) -> Option<PlaybackTicket> {
        self.pending.map(|p| p.ticket)
    }

    /// Whether any continuation is still scheduled.
    pub fn has_pending_steps(&self) -> bool {
        !self.timers.is_empty()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_animating(&self) -> bool {
        match self.phase {
            Phase::Animating | Phase::PageTransitioning => true,
            Phase::RoundComplete => self.reward_waits > 0,
            Phase::Idle | Phase::RoundActive => false,
        }
    }

    /// Accepting drags, taps and switch selections.
    pub fn interactive(&self) -> bool {
        self.phase == Phase::RoundActive && self.layout.is_some() && self.match_card().is_some()
    }

    /// Build the page at `start` and announce its first target.
    pub fn initialize_game(&mut self, start: usize) {
        self.rebuild(start);
        if self.phase == Phase::RoundActive {
            self.opacity = Tween::rest(1.0);
            self.announce_target();
        }
    }

    /// Report the container. Non-positive sizes mean "not ready": the layout
    /// is dropped and input is ignored until a usable size arrives.
    pub fn set_viewport(&mut self, width: f32, height: f32, device: DeviceClass, orientation: Orientation) {
        if !(width > 0.0 && height > 0.0) {
            self.layout = None;
            return;
        }
        self.layout = Some(compute_layout(
            self.settings.cards_per_page,
            width,
            height,
            device,
            orientation,
        ));
    }

    /// Advance the logical clock, animations and due continuations.
    pub fn tick(&mut self, elapsed_ms: u32) {
        let mut budget = elapsed_ms;
        while let Some((used, timer)) = self.timers.pop_due(budget) {
            self.advance_animations(used);
            budget -= used;
            if timer.generation == self.generation {
                self.run_step(timer.step);
            } else {
                log::trace!("dropping {:?} from generation {}", timer.step, timer.generation);
            }
        }
        self.advance_animations(budget);
        self.timers.elapse(budget);
    }

    fn advance_animations(&mut self, ms: u32) {
        if ms == 0 {
            return;
        }
        self.clock_ms += u64::from(ms);
        self.offset_x.advance(ms);
        self.offset_y.advance(ms);
        self.match_scale.advance(ms);
        self.opacity.advance(ms);
        if let Some(flip) = &mut self.flip {
            flip.progress.advance(ms);
        }
        if let Some(shake) = &mut self.shake {
            if shake.running {
                shake.elapsed_ms = shake.elapsed_ms.saturating_add(ms);
            }
        }
    }

    fn run_step(&mut self, step: Step) {
        match step {
            Step::MatchArrived { slot } => self.on_match_arrived(slot),
            Step::FlipStageDone { slot, stage } => self.on_flip_stage_done(slot, stage),
            Step::DwellElapsed => self.on_dwell_elapsed(),
            Step::ShowNextTarget => self.on_show_next_target(),
            Step::ShakeDone => {
                if let Some(shake) = &mut self.shake {
                    shake.running = false;
                }
                self.reward_step_done();
            }
            Step::FadedOut { start } => self.on_faded_out(start),
            Step::FadedIn => {
                if self.round.is_some() {
                    self.phase = Phase::RoundActive;
                    self.announce_target();
                } else {
                    self.phase = Phase::Idle;
                }
            }
        }
    }

    fn schedule(&mut self, delay_ms: u32, step: Step) {
        self.timers.schedule(delay_ms, self.generation, step);
    }

    fn scaled(&self, base_ms: u32) -> u32 {
        self.settings.scaled_ms(base_ms)
    }

    // ---- pointer and switch input ----

    pub fn drag_start(&mut self) -> bool {
        if !self.interactive() {
            return false;
        }
        self.dragging = true;
        self.offset_x.freeze();
        self.offset_y.freeze();
        self.match_scale.retarget(DRAG_LIFT_SCALE, DRAG_LIFT_MS, Easing::EaseOut);
        true
    }

    /// Move the dragged card by a pointer delta in pixels.
    pub fn drag_move(&mut self, dx: f32, dy: f32) -> bool {
        if !self.dragging {
            return false;
        }
        self.offset_x = Tween::rest(self.offset_x.value() + dx);
        self.offset_y = Tween::rest(self.offset_y.value() + dy);
        true
    }

    /// Drop the dragged card at `point`.
    pub fn drag_release(&mut self, point: Point) -> MatchOutcome {
        if !self.dragging {
            return MatchOutcome::Ignored;
        }
        self.dragging = false;
        if !self.interactive() {
            self.spring_back();
            return MatchOutcome::Ignored;
        }
        let slot = self.layout.as_ref().and_then(|l| l.slot_at(point));
        match slot {
            Some(slot) if self.accepts(slot) => self.begin_match(slot),
            _ => {
                self.spring_back();
                MatchOutcome::Mismatch
            }
        }
    }

    /// Tap (or switch-select) static card `index`.
    pub fn select_static(&mut self, index: usize) -> MatchOutcome {
        if !self.interactive() {
            return MatchOutcome::Ignored;
        }
        let count = self.round.as_ref().map_or(0, |r| r.static_cards().len());
        if index >= count {
            return MatchOutcome::Ignored;
        }
        if self.accepts(index) {
            self.begin_match(index)
        } else {
            self.spring_back();
            MatchOutcome::Mismatch
        }
    }

    /// Match the current target onto its correct slot.
    pub fn auto_match(&mut self) -> MatchOutcome {
        if !self.interactive() {
            return MatchOutcome::Ignored;
        }
        let property = self.config.match_property;
        match self.round.as_ref().and_then(|r| r.correct_slot(property)) {
            Some(slot) => self.begin_match(slot),
            None => MatchOutcome::Ignored,
        }
    }

    /// Center of the match card as currently drawn.
    pub fn match_center(&self) -> Option<Point> {
        let layout = self.layout.as_ref()?;
        self.match_card()?;
        Some(
            layout
                .match_rect
                .translated(self.offset_x.value(), self.offset_y.value())
                .center(),
        )
    }

    fn accepts(&self, slot: usize) -> bool {
        self.round
            .as_ref()
            .is_some_and(|r| r.accepts(slot, self.config.match_property))
    }

    fn spring_back(&mut self) {
        let ms = self.scaled(SPRING_BACK_MS);
        self.offset_x.retarget(0.0, ms, Easing::Spring);
        self.offset_y.retarget(0.0, ms, Easing::Spring);
        self.match_scale.retarget(1.0, ms, Easing::Spring);
    }

    fn begin_match(&mut self, slot: usize) -> MatchOutcome {
        let Some(layout) = self.layout.as_ref() else {
            return MatchOutcome::Ignored;
        };
        let Some(target) = layout.static_rects.get(slot) else {
            return MatchOutcome::Ignored;
        };
        let from = layout.match_rect.center();
        let to = target.center();

        self.phase = Phase::Animating;
        self.dragging = false;
        let ms = self.scaled(MATCH_MOVE_MS);
        self.offset_x.retarget(to.x - from.x, ms, Easing::EaseOut);
        self.offset_y.retarget(to.y - from.y, ms, Easing::EaseOut);
        self.match_scale.retarget(1.0, ms, Easing::EaseOut);
        self.schedule(ms, Step::MatchArrived { slot });
        log::debug!("match onto slot {slot} (generation {})", self.generation);
        MatchOutcome::Matched { slot }
    }

    // ---- match sequence ----

    fn on_match_arrived(&mut self, slot: usize) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        round.mark_matched(slot);
        self.show_word = true;
        self.can_show_text = true;
        self.dwell_deadline_ms = self.clock_ms + u64::from(self.scaled(MIN_DWELL_MS));

        if !self.settings.play_after_match {
            self.begin_reveal(slot);
            return;
        }
        let Some(cue) = self.cue_for_target() else {
            self.begin_reveal(slot);
            return;
        };
        match self.player.play_word_and_wait(&cue) {
            Ok(Playback::Done) => self.begin_reveal(slot),
            Ok(Playback::Pending(ticket)) => {
                self.pending = Some(PendingPlayback {
                    ticket,
                    generation: self.generation,
                    resume: Resume::Reveal { slot },
                });
            }
            Err(err) => {
                log::warn!("after-match playback failed: {err}");
                self.begin_reveal(slot);
            }
        }
    }

    fn begin_reveal(&mut self, slot: usize) {
        if self.config.flip == FlipKind::None {
            self.revealed_slots.insert(slot);
            self.finish_reveal();
            return;
        }
        let ms = self.scaled(FLIP_STAGE_MS);
        self.flip = Some(FlipState {
            slot,
            progress: Tween::new(0.0, 1.0, ms, Easing::Linear),
        });
        self.schedule(ms, Step::FlipStageDone { slot, stage: 1 });
    }

    fn on_flip_stage_done(&mut self, slot: usize, stage: u8) {
        if stage < self.config.flip.stages() {
            let ms = self.scaled(FLIP_STAGE_MS);
            let from = f32::from(stage);
            self.flip = Some(FlipState {
                slot,
                progress: Tween::new(from, from + 1.0, ms, Easing::Linear),
            });
            self.schedule(ms, Step::FlipStageDone { slot, stage: stage + 1 });
            return;
        }
        self.revealed_slots.insert(slot);
        self.finish_reveal();
    }

    fn finish_reveal(&mut self) {
        let remaining = self.dwell_deadline_ms.saturating_sub(self.clock_ms);
        let remaining = u32::try_from(remaining).unwrap_or(u32::MAX);
        self.schedule(remaining, Step::DwellElapsed);
    }

    fn on_dwell_elapsed(&mut self) {
        if let Some(round) = self.round.as_mut() {
            round.clear_match_card();
        }
        self.flip = None;
        self.show_word = false;
        self.can_show_text = false;
        self.offset_x = Tween::rest(0.0);
        self.offset_y = Tween::rest(0.0);
        self.match_scale = Tween::rest(1.0);
        let ms = self.scaled(NEXT_TARGET_DELAY_MS);
        self.schedule(ms, Step::ShowNextTarget);
    }

    fn on_show_next_target(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        if round.advance_target() {
            self.phase = Phase::RoundActive;
            self.announce_target();
        } else {
            self.group_complete();
        }
    }

    fn group_complete(&mut self) {
        self.phase = Phase::RoundComplete;
        self.reward_waits = 0;
        log::debug!("group at {} complete", self.group_start);

        if self.settings.enable_reward {
            let count = self.round.as_ref().map_or(0, |r| r.static_cards().len());
            let speed = self.settings.speed();
            let sequences: Vec<ShakeSequence> = (0..count)
                .map(|i| ShakeSequence::new(self.animator, i, count, speed))
                .collect();
            let total = sequences.iter().map(ShakeSequence::total_ms).max().unwrap_or(0);
            self.shake = Some(ShakeState {
                sequences,
                elapsed_ms: 0,
                running: true,
            });
            self.reward_waits += 1;
            self.schedule(total, Step::ShakeDone);

            match self.player.play_reward_sound() {
                Ok(Playback::Pending(ticket)) => {
                    self.reward_waits += 1;
                    self.pending = Some(PendingPlayback {
                        ticket,
                        generation: self.generation,
                        resume: Resume::Reward,
                    });
                }
                Ok(Playback::Done) => {}
                Err(err) => log::warn!("reward sound failed: {err}"),
            }
        }

        if self.reward_waits == 0 {
            self.after_reward();
        }
    }

    fn reward_step_done(&mut self) {
        if self.reward_waits == 0 {
            return;
        }
        self.reward_waits -= 1;
        if self.reward_waits == 0 {
            self.after_reward();
        }
    }

    fn after_reward(&mut self) {
        if !self.settings.automatic {
            return;
        }
        let size = self.settings.cards_per_page.count();
        if let Some(next) = next_group_start(self.group_start, size, self.words.len()) {
            self.begin_transition(next);
        }
    }

    /// Completion signal for a waited playback. Stale tickets are ignored.
    pub fn playback_finished(&mut self, ticket: PlaybackTicket) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        if pending.ticket != ticket || pending.generation != self.generation {
            return false;
        }
        self.pending = None;
        self.player.finished();
        match pending.resume {
            Resume::Reveal { slot } => self.begin_reveal(slot),
            Resume::Reward => self.reward_step_done(),
        }
        true
    }

    fn cue_for_target(&self) -> Option<SpeechCue> {
        let card = self.match_card()?;
        Some(SpeechCue::for_card(
            card,
            &self.settings.locale,
            self.settings.text_to_speech,
        ))
    }

    /// Before-match cue for the current target. Sound-only games always say it.
    fn announce_target(&mut self) {
        if !(self.settings.play_before_match || self.config.sound_only) {
            return;
        }
        let Some(cue) = self.cue_for_target() else {
            return;
        };
        if let Err(err) = self.player.play_word(&cue) {
            log::warn!("before-match playback failed: {err}");
        }
    }

    // ---- navigation ----

    pub fn go_to_start(&mut self) -> bool {
        self.navigate(NavCommand::Start)
    }

    pub fn go_previous(&mut self) -> bool {
        self.navigate(NavCommand::Previous)
    }

    pub fn go_next(&mut self) -> bool {
        self.navigate(NavCommand::Next)
    }

    pub fn go_to_end(&mut self) -> bool {
        self.navigate(NavCommand::End)
    }

    pub fn refresh(&mut self) -> bool {
        self.navigate(NavCommand::Refresh)
    }

    /// Freeze whatever is running and fade into the page the command picks.
    /// Returns false (and changes nothing) when the command has no target.
    pub fn navigate(&mut self, command: NavCommand) -> bool {
        let Some(start) = self.nav_target(command) else {
            return false;
        };
        log::debug!("navigate {command:?}: {} -> {start}", self.group_start);
        self.freeze();
        self.begin_transition(start);
        true
    }

    fn nav_target(&self, command: NavCommand) -> Option<usize> {
        let len = self.words.len();
        if len == 0 {
            return None;
        }
        let size = self.settings.cards_per_page.count();
        let start = self.group_start;
        match command {
            NavCommand::Start => Some(0),
            NavCommand::Previous => Some(previous_group_start(start, size)),
            NavCommand::Next => next_group_start(start, size, len),
            NavCommand::End => Some(last_group_start(len, size)),
            NavCommand::Refresh => Some(start),
        }
    }

    pub fn has_next_group(&self) -> bool {
        self.nav_target(NavCommand::Next).is_some()
    }

    /// Stop everything in place: cards keep their current look.
    fn freeze(&mut self) {
        self.timers.cancel_all();
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
        self.reward_waits = 0;
        self.player.stop();
        self.dragging = false;
        self.offset_x.freeze();
        self.offset_y.freeze();
        self.match_scale.freeze();
        self.opacity.freeze();
        if let Some(flip) = &mut self.flip {
            flip.progress.freeze();
        }
        if let Some(shake) = &mut self.shake {
            shake.running = false;
        }
    }

    fn begin_transition(&mut self, start: usize) {
        self.phase = Phase::PageTransitioning;
        let ms = self.scaled(FADE_MS);
        self.opacity.retarget(0.0, ms, Easing::Linear);
        self.schedule(ms, Step::FadedOut { start });
    }

    fn on_faded_out(&mut self, start: usize) {
        self.rebuild(start);
        if self.round.is_none() {
            self.opacity = Tween::rest(1.0);
            return;
        }
        self.phase = Phase::PageTransitioning;
        let ms = self.scaled(FADE_MS);
        self.opacity = Tween::new(0.0, 1.0, ms, Easing::Linear);
        self.schedule(ms, Step::FadedIn);
    }

    fn rebuild(&mut self, start: usize) {
        self.reset_transient();
        let size = self.settings.cards_per_page;
        let shuffle = self.settings.shuffle_mode;
        self.round = RoundState::build(&self.words, start, size, shuffle, &mut self.rng);
        match &self.round {
            Some(round) => {
                self.group_start = round.group_start();
                self.phase = Phase::RoundActive;
                log::debug!(
                    "round at {} with {} cards (generation {})",
                    self.group_start,
                    round.len(),
                    self.generation
                );
            }
            None => {
                self.group_start = 0;
                self.phase = Phase::Idle;
                log::debug!("no words, staying idle");
            }
        }
    }

    fn reset_transient(&mut self) {
        self.timers.cancel_all();
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
        self.reward_waits = 0;
        self.player.stop();
        self.offset_x = Tween::rest(0.0);
        self.offset_y = Tween::rest(0.0);
        self.match_scale = Tween::rest(1.0);
        self.flip = None;
        self.shake = None;
        self.revealed_slots.clear();
        self.dragging = false;
        self.show_word = false;
        self.can_show_text = false;
    }

    /// Cancel everything and drop the round (leaving the game screen).
    pub fn teardown(&mut self) {
        self.reset_transient();
        self.round = None;
        self.phase = Phase::Idle;
        self.opacity = Tween::rest(1.0);
    }

    // ---- lock ----

    /// Toggle the lock if the press was held long enough.
    pub fn long_press_lock(&mut self, held_ms: u32) -> bool {
        if held_ms < LOCK_HOLD_MS {
            return false;
        }
        self.locked = !self.locked;
        log::debug!("lock {}", if self.locked { "on" } else { "off" });
        true
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn can_exit(&self) -> bool {
        !self.locked
    }

    // ---- render surface ----

    fn display_text(&self, card: &Card) -> String {
        let text = card.text_for(&self.settings.locale);
        if self.settings.capital_letters {
            text.to_uppercase()
        } else {
            text.to_string()
        }
    }

    fn static_face(&self, slot: usize) -> CardFace {
        match self.flip {
            Some(flip) if flip.slot == slot => self
                .config
                .face_for_stage(flip_stage(flip.progress.value()), self.config.static_face),
            _ if self.revealed_slots.contains(&slot) => self.config.revealed_face(),
            _ => self.config.static_face,
        }
    }

    fn flip_value(&self, slot: Option<usize>) -> f32 {
        match self.flip {
            Some(flip) if slot.is_none() || slot == Some(flip.slot) => self
                .animator
                .flip_curve(self.config.flip)
                .sample(flip.progress.value()),
            _ => self.animator.flip_rest(),
        }
    }

    fn toolbar(&self) -> ToolbarState {
        let len = self.words.len();
        let size = self.settings.cards_per_page.count();
        let has_round = self.round.is_some();
        ToolbarState {
            start: has_round && self.group_start > 0,
            previous: has_round && self.group_start > 0,
            next: has_round && next_group_start(self.group_start, size, len).is_some(),
            end: has_round && self.group_start < last_group_start(len, size),
            lock: true,
            refresh: has_round,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let round = self.round.as_ref();
        let statics = match (round, self.layout.as_ref()) {
            (Some(round), Some(layout)) => round
                .static_cards()
                .iter()
                .zip(layout.static_rects.iter())
                .enumerate()
                .map(|(slot, (card, rect))| StaticCardView {
                    slot,
                    card_id: card.id,
                    image: card.image.clone(),
                    text: self.display_text(card),
                    face: self.static_face(slot),
                    rect: *rect,
                    is_matched: card.is_matched,
                    flip: self.flip_value(Some(slot)),
                    shake: self.shake.as_ref().map_or(0.0, |s| s.value(slot)),
                })
                .collect(),
            _ => Vec::new(),
        };

        let match_card = match (self.match_card(), self.layout.as_ref()) {
            (Some(card), Some(layout)) => {
                let stage = self.flip.map_or(0, |f| flip_stage(f.progress.value()));
                let scale = self.match_scale.value();
                Some(MatchCardView {
                    card_id: card.id,
                    image: card.image.clone(),
                    text: self.display_text(card),
                    face: self.config.face_for_stage(stage, self.config.match_face),
                    rect: layout
                        .match_rect
                        .translated(self.offset_x.value(), self.offset_y.value())
                        .scaled(scale),
                    flip: self.flip_value(None),
                    scale,
                    dragging: self.dragging,
                })
            }
            _ => None,
        };

        GameSnapshot {
            phase: self.phase,
            generation: self.generation,
            group_start: self.group_start,
            group_len: round.map_or(0, RoundState::len),
            word_count: self.words.len(),
            level: self.level(),
            target_index: round.map_or(0, RoundState::current_index),
            target_count: round.map_or(0, |r| r.target_order().len()),
            arrangement: self.layout.as_ref().map(|l| l.arrangement),
            statics,
            match_card,
            toolbar: self.toolbar(),
            opacity: self.opacity.value(),
            is_animating: self.is_animating(),
            locked: self.locked,
            large_text: self.settings.large_text,
            capability: self.capability(),
            show_word: self.show_word,
            can_show_text: self.can_show_text,
            highlight: None,
            match_highlighted: false,
        }
    }
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

    fn quiet() -> Settings {
        Settings {
            play_before_match: false,
            play_after_match: false,
            enable_reward: false,
            automatic: false,
            ..Settings::default()
        }
    }

    fn game(texts: &[&str], settings: Settings) -> GameState {
        let mut g = GameState::new(words(texts), settings, GameKind::PictureToPicture, 7, NullPlayer);
        g.set_viewport(1024.0, 768.0, DeviceClass::Tablet, Orientation::Landscape);
        g.initialize_game(0);
        g
    }

    fn run(g: &mut GameState, ms: u32) {
        for _ in 0..ms.div_ceil(TICK_MS) {
            g.tick(TICK_MS);
        }
    }

    #[test]
    fn empty_word_list_stays_idle() {
        let mut g = game(&[], quiet());
        assert_eq!(g.phase(), Phase::Idle);
        assert!(!g.go_next());
        assert_eq!(g.auto_match(), MatchOutcome::Ignored);
    }

    #[test]
    fn no_layout_means_no_interaction() {
        let mut g = game(&["a", "b"], quiet());
        g.set_viewport(0.0, 768.0, DeviceClass::Tablet, Orientation::Landscape);
        assert!(g.layout().is_none());
        assert_eq!(g.auto_match(), MatchOutcome::Ignored);
        assert!(!g.drag_start());
    }

    #[test]
    fn wrong_tap_springs_back_without_state_change() {
        let mut g = game(&["a", "b"], quiet());
        let property = g.config().match_property;
        let correct = g.round().unwrap().correct_slot(property).unwrap();
        let wrong = 1 - correct;
        assert_eq!(g.select_static(wrong), MatchOutcome::Mismatch);
        assert_eq!(g.phase(), Phase::RoundActive);
        assert!(g.round().unwrap().static_cards().iter().all(|c| !c.is_matched));
    }

    #[test]
    fn match_sequence_respects_minimum_dwell() {
        let mut g = game(&["a", "b"], quiet());
        let first = g.match_card().unwrap().id;
        assert!(matches!(g.auto_match(), MatchOutcome::Matched { .. }));
        assert_eq!(g.phase(), Phase::Animating);

        // Arrival plus flip finish well before the dwell floor.
        run(&mut g, MATCH_MOVE_MS + FLIP_STAGE_MS + 32);
        assert_eq!(g.match_card().map(|c| c.id), Some(first));

        run(&mut g, MIN_DWELL_MS + NEXT_TARGET_DELAY_MS);
        assert_eq!(g.phase(), Phase::RoundActive);
        assert_ne!(g.match_card().map(|c| c.id), Some(first));
        assert_eq!(g.level(), 2);
    }

    #[test]
    fn drag_onto_correct_slot_matches() {
        let mut g = game(&["a", "b"], quiet());
        let property = g.config().match_property;
        let slot = g.round().unwrap().correct_slot(property).unwrap();
        let target = g.layout().unwrap().static_rects[slot].center();
        let from = g.match_center().unwrap();

        assert!(g.drag_start());
        assert!(g.drag_move(target.x - from.x, target.y - from.y));
        let center = g.match_center().unwrap();
        assert_eq!(g.drag_release(center), MatchOutcome::Matched { slot });
    }

    #[test]
    fn drop_outside_slots_is_a_mismatch() {
        let mut g = game(&["a", "b"], quiet());
        assert!(g.drag_start());
        assert_eq!(g.drag_release(Point::new(-50.0, -50.0)), MatchOutcome::Mismatch);
        assert!(!g.is_dragging());
        assert_eq!(g.phase(), Phase::RoundActive);
    }

    #[test]
    fn lock_needs_a_long_press() {
        let mut g = game(&["a"], quiet());
        assert!(!g.long_press_lock(LOCK_HOLD_MS - 1));
        assert!(g.can_exit());
        assert!(g.long_press_lock(LOCK_HOLD_MS));
        assert!(g.is_locked());
        assert!(!g.can_exit());
    }

    #[test]
    fn snapshot_uppercases_when_asked() {
        let settings = Settings {
            capital_letters: true,
            ..quiet()
        };
        let g = game(&["ball"], settings);
        let snap = g.snapshot();
        assert_eq!(snap.statics[0].text, "BALL");
        assert_eq!(snap.match_card.unwrap().text, "BALL");
    }
}
