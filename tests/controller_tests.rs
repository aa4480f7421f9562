//! Round controller behaviour through the public API.

use makaton_match::core::{
    last_group_start, GameState, MatchOutcome, NullPlayer, Phase, Playback, PlaybackError,
    PlaybackTicket, Player, SpeechCue,
};
use makaton_match::types::{
    Card, CardsPerPage, DeviceClass, GameKind, MatchProperty, Orientation, Settings, ShuffleMode,
    Word, FLIP_STAGE_MS, LOCK_HOLD_MS, MATCH_MOVE_MS, TICK_MS,
};

fn words(texts: &[&str]) -> Vec<Word> {
    texts
        .iter()
        .map(|t| Word::new(format!("{}.png", t), *t))
        .collect()
}

fn numbered(n: usize) -> Vec<Word> {
    (0..n)
        .map(|i| Word::new(format!("w{}.png", i), format!("word {}", i)))
        .collect()
}

fn settings(per_page: CardsPerPage) -> Settings {
    Settings {
        cards_per_page: per_page,
        shuffle_mode: ShuffleMode::Off,
        ..Settings::default()
    }
}

fn start<P: Player>(mut game: GameState<P>) -> GameState<P> {
    game.set_viewport(1024.0, 768.0, DeviceClass::Tablet, Orientation::Landscape);
    game.initialize_game(0);
    game
}

fn run<P: Player>(game: &mut GameState<P>, ms: u32) {
    for _ in 0..ms.div_ceil(TICK_MS) {
        game.tick(TICK_MS);
    }
}

/// Tick until the controller accepts input again (or 10 s pass).
fn until_interactive<P: Player>(game: &mut GameState<P>) -> bool {
    for _ in 0..(10_000 / TICK_MS) {
        if game.interactive() {
            return true;
        }
        game.tick(TICK_MS);
    }
    game.interactive()
}

fn matched(game: &GameState<impl Player>) -> Vec<bool> {
    game.round()
        .map(|r| r.static_cards().iter().map(|c| c.is_matched).collect())
        .unwrap_or_default()
}

/// Hands out a pending ticket for every waited cue and records what it was asked.
#[derive(Default)]
struct ScriptedPlayer {
    next: u64,
    spoken: Vec<String>,
    stops: usize,
    fail_words: bool,
}

impl Player for ScriptedPlayer {
    fn play_word(&mut self, cue: &SpeechCue) -> Result<(), PlaybackError> {
        self.spoken.push(cue.text.clone());
        Ok(())
    }

    fn play_word_and_wait(&mut self, cue: &SpeechCue) -> Result<Playback, PlaybackError> {
        if self.fail_words {
            return Err(PlaybackError::MissingAsset(cue.text.clone()));
        }
        self.spoken.push(cue.text.clone());
        self.next += 1;
        Ok(Playback::Pending(PlaybackTicket(self.next)))
    }

    fn play_reward_sound(&mut self) -> Result<Playback, PlaybackError> {
        self.next += 1;
        Ok(Playback::Pending(PlaybackTicket(self.next)))
    }

    fn stop_current_sound(&mut self) {
        self.stops += 1;
    }

    fn stop_current_speech(&mut self) {}
}

#[test]
fn four_word_round_plays_to_completion() {
    let mut game = start(GameState::new(
        words(&["ball", "dog", "cat", "fish"]),
        settings(CardsPerPage::Four),
        GameKind::PictureToPicture,
        11,
        NullPlayer,
    ));

    let round = game.round().unwrap();
    let texts: Vec<&str> = round.active_set().iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, ["ball", "dog", "cat", "fish"]);

    for level in 1..=4 {
        assert!(until_interactive(&mut game), "target {} never became selectable", level);
        assert_eq!(game.level(), level);
        let slot = game
            .round()
            .and_then(|r| r.correct_slot(MatchProperty::Image))
            .unwrap();
        assert_eq!(game.select_static(slot), MatchOutcome::Matched { slot });
    }

    run(&mut game, 6_000);
    assert_eq!(game.phase(), Phase::RoundComplete);
    assert!(game.match_card().is_none());
    assert_eq!(matched(&game), [true; 4]);
    assert!(game.round().unwrap().is_complete());
    assert!(!game.has_next_group());
    assert!(!game.has_pending_steps());
    assert!(!game.is_animating());
}

#[test]
fn target_order_is_a_permutation_for_every_page() {
    for per_page in CardsPerPage::ALL {
        for seed in 1..20 {
            let game = start(GameState::new(
                numbered(13),
                settings(per_page),
                GameKind::PictureToPicture,
                seed,
                NullPlayer,
            ));
            let round = game.round().unwrap();
            let mut order = round.target_order().to_vec();
            order.sort_unstable();
            let expected: Vec<usize> = (0..round.len()).collect();
            assert_eq!(order, expected);
        }
    }
}

#[test]
fn matched_cards_never_revert_within_a_group() {
    let mut game = start(GameState::new(
        numbered(6),
        settings(CardsPerPage::Six),
        GameKind::WordToPicture,
        5,
        NullPlayer,
    ));

    let mut seen = vec![false; 6];
    for _ in 0..6 {
        assert!(until_interactive(&mut game));
        game.auto_match();
        for _ in 0..(3_000 / TICK_MS) {
            game.tick(TICK_MS);
            for (was, now) in seen.iter_mut().zip(matched(&game)) {
                assert!(!*was || now, "a matched card reverted");
                *was = now;
            }
        }
    }
    assert!(seen.iter().all(|m| *m));
}

#[test]
fn text_matching_ignores_image_and_vice_versa() {
    let a = Card::from_word(0, &Word::new("ball.png", "ball"));
    let b = Card::from_word(1, &Word::new("football.png", "ball"));
    assert!(a.matches(&b, MatchProperty::Text));
    assert!(!a.matches(&b, MatchProperty::Image));

    let c = Card::from_word(2, &Word::new("ball.png", "sphere"));
    assert!(a.matches(&c, MatchProperty::Image));
    assert!(!a.matches(&c, MatchProperty::Text));

    assert_eq!(GameKind::WordToWord.config().match_property, MatchProperty::Text);
    assert_eq!(GameKind::PictureToPicture.config().match_property, MatchProperty::Image);
}

#[test]
fn duplicate_text_accepts_either_card_when_matching_by_text() {
    let list = vec![
        Word::new("ball.png", "ball"),
        Word::new("football.png", "ball"),
        Word::new("dog.png", "dog"),
    ];
    let mut game = start(GameState::new(
        list,
        settings(CardsPerPage::Three),
        GameKind::WordToWord,
        3,
        NullPlayer,
    ));
    loop {
        assert!(until_interactive(&mut game));
        if game.match_card().map(|c| c.text.as_str()) == Some("ball") {
            break;
        }
        game.auto_match();
    }
    let target = game.match_card().unwrap().id;
    let other = if target == 0 { 1 } else { 0 };
    assert_eq!(game.select_static(other), MatchOutcome::Matched { slot: other });
}

#[test]
fn lock_survives_page_changes() {
    let mut game = start(GameState::new(
        numbered(8),
        settings(CardsPerPage::Four),
        GameKind::PictureToPicture,
        2,
        NullPlayer,
    ));
    assert!(game.long_press_lock(LOCK_HOLD_MS));

    let locked = |game: &GameState<NullPlayer>| {
        assert!(game.is_locked());
        assert!(!game.can_exit());
        assert!(game.snapshot().locked);
    };

    assert!(game.go_next());
    locked(&game);
    run(&mut game, 1_000);
    assert_eq!(game.group_start(), 4);
    locked(&game);

    assert!(game.refresh());
    run(&mut game, 1_000);
    locked(&game);

    game.initialize_game(0);
    run(&mut game, 1_000);
    assert_eq!(game.group_start(), 0);
    assert_eq!(game.phase(), Phase::RoundActive);
    locked(&game);
}

#[test]
fn page_boundaries() {
    assert_eq!(last_group_start(10, 4), 8);
    assert_eq!(last_group_start(12, 4), 8);

    let mut game = start(GameState::new(
        numbered(10),
        settings(CardsPerPage::Four),
        GameKind::PictureToPicture,
        1,
        NullPlayer,
    ));
    assert!(game.go_to_end());
    run(&mut game, 1_000);
    assert_eq!(game.group_start(), 8);
    assert_eq!(game.round().unwrap().len(), 2);

    // Already on the last page.
    assert!(!game.go_next());

    assert!(game.go_previous());
    run(&mut game, 1_000);
    assert_eq!(game.group_start(), 4);
    assert!(game.go_to_start());
    run(&mut game, 1_000);
    assert_eq!(game.group_start(), 0);

    // Previous from the first page clamps to it.
    assert!(game.go_previous());
    run(&mut game, 1_000);
    assert_eq!(game.group_start(), 0);
    assert_eq!(game.phase(), Phase::RoundActive);
}

#[test]
fn stale_playback_completion_is_ignored_after_navigation() {
    let mut game = start(GameState::new(
        numbered(8),
        settings(CardsPerPage::Four),
        GameKind::PictureToPicture,
        9,
        ScriptedPlayer::default(),
    ));
    game.auto_match();
    run(&mut game, MATCH_MOVE_MS + TICK_MS);
    let old = game.awaited_playback().expect("after-match cue is awaited");
    let old_generation = game.generation();

    assert!(game.go_next());
    assert!(game.generation() > old_generation);
    assert!(game.player().stops > 0);
    run(&mut game, 1_000);
    assert_eq!(game.group_start(), 4);

    assert!(!game.playback_finished(old));
    run(&mut game, 3_000);
    assert_eq!(matched(&game), [false; 4]);
    assert_eq!(game.level(), 1);
    assert_eq!(game.phase(), Phase::RoundActive);
}

#[test]
fn pending_flip_from_previous_round_is_dropped() {
    let quiet = Settings {
        play_after_match: false,
        ..settings(CardsPerPage::Four)
    };
    let mut game = start(GameState::new(
        numbered(8),
        quiet,
        GameKind::SoundToPicture,
        4,
        NullPlayer,
    ));
    game.auto_match();
    // Arrived and halfway through the first of two flip stages.
    run(&mut game, MATCH_MOVE_MS + FLIP_STAGE_MS / 2);
    assert!(game.has_pending_steps());

    assert!(game.go_next());
    run(&mut game, 5_000);
    assert_eq!(game.group_start(), 4);
    assert_eq!(matched(&game), [false; 4]);
    assert_eq!(game.level(), 1);
    let snap = game.snapshot();
    assert_eq!(snap.matched_count(), 0);
    assert!(snap.match_card.is_some());
}

#[test]
fn waited_cue_holds_the_reveal_until_it_finishes() {
    let mut game = start(GameState::new(
        words(&["ball", "dog"]),
        settings(CardsPerPage::Two),
        GameKind::PictureToPicture,
        2,
        ScriptedPlayer::default(),
    ));
    let target = game.match_card().unwrap().text.clone();
    let MatchOutcome::Matched { slot } = game.auto_match() else {
        panic!("auto match should always succeed");
    };
    run(&mut game, 5_000);
    // Still waiting on the cue: no reveal yet.
    assert_eq!(game.snapshot().static_at(slot).unwrap().face, game.config().static_face);
    assert_eq!(game.level(), 1);

    let ticket = game.awaited_playback().unwrap();
    assert!(game.playback_finished(ticket));
    assert!(!game.playback_finished(ticket));
    run(&mut game, 3_000);
    assert_eq!(game.level(), 2);
    assert!(game.player().spoken.contains(&target));
}

#[test]
fn failed_playback_does_not_stall_the_round() {
    let player = ScriptedPlayer {
        fail_words: true,
        ..ScriptedPlayer::default()
    };
    let mut game = start(GameState::new(
        words(&["ball", "dog"]),
        settings(CardsPerPage::Two),
        GameKind::PictureToPicture,
        2,
        player,
    ));
    game.auto_match();
    assert!(until_interactive(&mut game));
    assert_eq!(game.level(), 2);
}

#[test]
fn speed_multiplier_stretches_the_match_glide() {
    let slow = Settings {
        speed_multiplier: 2.0,
        play_after_match: false,
        ..settings(CardsPerPage::Two)
    };
    let mut game = start(GameState::new(
        words(&["ball", "dog"]),
        slow,
        GameKind::PictureToPicture,
        2,
        NullPlayer,
    ));
    let MatchOutcome::Matched { slot } = game.auto_match() else {
        panic!("auto match should always succeed");
    };
    run(&mut game, MATCH_MOVE_MS + TICK_MS);
    assert!(!game.round().unwrap().static_cards()[slot].is_matched);
    run(&mut game, MATCH_MOVE_MS);
    assert!(game.round().unwrap().static_cards()[slot].is_matched);
}

#[test]
fn start_past_the_end_restarts_at_zero() {
    let mut game = GameState::new(
        numbered(5),
        settings(CardsPerPage::Four),
        GameKind::PictureToPicture,
        1,
        NullPlayer,
    );
    game.set_viewport(800.0, 600.0, DeviceClass::Tablet, Orientation::Landscape);
    game.initialize_game(40);
    assert_eq!(game.group_start(), 0);
    assert_eq!(game.round().unwrap().len(), 4);
}

#[test]
fn all_shuffle_reshuffles_on_every_init() {
    let shuffled = Settings {
        shuffle_mode: ShuffleMode::All,
        ..settings(CardsPerPage::Four)
    };
    let mut game = start(GameState::new(
        numbered(40),
        shuffled,
        GameKind::PictureToPicture,
        21,
        NullPlayer,
    ));
    let ids = |g: &GameState| -> Vec<usize> {
        g.round().unwrap().active_set().iter().map(|c| c.id).collect()
    };
    let first = ids(&game);
    let mut differs = false;
    for _ in 0..5 {
        game.initialize_game(0);
        differs |= ids(&game) != first;
    }
    assert!(differs);
}

#[test]
fn teardown_returns_to_idle() {
    let mut game = start(GameState::new(
        numbered(4),
        settings(CardsPerPage::Four),
        GameKind::PictureToPicture,
        1,
        NullPlayer,
    ));
    game.auto_match();
    game.teardown();
    assert_eq!(game.phase(), Phase::Idle);
    assert!(game.round().is_none());
    run(&mut game, 5_000);
    assert_eq!(game.phase(), Phase::Idle);
}
