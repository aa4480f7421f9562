//! Shapes of the JSON the game reads (settings, word lists) and writes
//! (render snapshots).

use makaton_match::config::{parse_settings, parse_words};
use makaton_match::core::{GameState, NullPlayer};
use makaton_match::types::{
    CardsPerPage, DeviceClass, GameKind, Orientation, Settings, ShuffleMode, Word,
};
use serde_json::Value;

#[test]
fn partial_settings_take_defaults() {
    let s = parse_settings(r#"{"cardsPerPage": 6, "shuffleMode": "page", "capitalLetters": true}"#)
        .unwrap();
    assert_eq!(s.cards_per_page, CardsPerPage::Six);
    assert_eq!(s.shuffle_mode, ShuffleMode::Page);
    assert!(s.capital_letters);
    assert_eq!(s.speed_multiplier, Settings::default().speed_multiplier);
    assert_eq!(s.locale, "en");

    assert_eq!(parse_settings("{}").unwrap(), Settings::default());
}

#[test]
fn unsupported_settings_are_rejected() {
    assert!(parse_settings(r#"{"cardsPerPage": 5}"#).is_err());
    assert!(parse_settings(r#"{"shuffleMode": "sometimes"}"#).is_err());
}

#[test]
fn settings_round_trip_in_camel_case() {
    let json = serde_json::to_value(Settings::default()).unwrap();
    let obj = json.as_object().unwrap();
    for key in [
        "cardsPerPage",
        "shuffleMode",
        "speedMultiplier",
        "automatic",
        "playBeforeMatch",
        "playAfterMatch",
        "enableReward",
        "textToSpeech",
        "capitalLetters",
        "largeText",
        "switchCount",
        "scanDelayMs",
        "locale",
    ] {
        assert!(obj.contains_key(key), "missing {}", key);
    }
    assert_eq!(obj["cardsPerPage"], 4);
    assert_eq!(obj["shuffleMode"], "off");
}

#[test]
fn word_lists_accept_optional_fields() {
    let words = parse_words(
        r#"[
            {"image": "ball.png", "text": "ball"},
            {"image": "dog.png", "text": "dog", "sound": "dog.mp3",
             "translations": {"fr": "chien"}}
        ]"#,
    )
    .unwrap();
    assert_eq!(words[0], Word::new("ball.png", "ball"));
    assert_eq!(words[1].sound.as_deref(), Some("dog.mp3"));
    assert_eq!(words[1].translations.get("fr").map(String::as_str), Some("chien"));

    assert!(parse_words(r#"[{"image": "ball.png"}]"#).is_err());
}

#[test]
fn snapshot_schema() {
    let words = vec![Word::new("ball.png", "ball"), Word::new("dog.png", "dog")];
    let mut game = GameState::new(words, Settings::default(), GameKind::PictureToWord, 1, NullPlayer);
    game.set_viewport(1024.0, 768.0, DeviceClass::Tablet, Orientation::Landscape);
    game.initialize_game(0);

    let v: Value = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(v["phase"], "roundActive");
    assert_eq!(v["groupStart"], 0);
    assert_eq!(v["groupLen"], 2);
    assert_eq!(v["level"], 1);
    assert_eq!(v["locked"], false);
    assert!(v["highlight"].is_null());

    let statics = v["statics"].as_array().unwrap();
    assert_eq!(statics.len(), 2);
    assert_eq!(statics[0]["face"], "text");
    assert_eq!(statics[0]["isMatched"], false);
    for key in ["slot", "cardId", "image", "text", "rect", "flip", "shake"] {
        assert!(statics[0].get(key).is_some(), "static card missing {}", key);
    }

    let m = &v["matchCard"];
    assert_eq!(m["face"], "image");
    for key in ["x", "y", "width", "height"] {
        assert!(m["rect"][key].is_number(), "rect missing {}", key);
    }

    let toolbar = &v["toolbar"];
    assert_eq!(toolbar["next"], false);
    assert_eq!(toolbar["refresh"], true);
}
