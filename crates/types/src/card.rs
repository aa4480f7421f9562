//! Word source entries and the card records built from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::MatchProperty;

/// One entry of the word source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub image: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub translations: BTreeMap<String, String>,
}

impl Word {
    pub fn new(image: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            text: text.into(),
            sound: None,
            translations: BTreeMap::new(),
        }
    }

    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    pub fn with_translation(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.translations.insert(locale.into(), text.into());
        self
    }
}

/// A card on the table.
///
/// Cards are values: solving one produces a new record via
/// [`Card::with_matched`] instead of flipping a flag in place, so a snapshot
/// taken before a match is never affected by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Position of the source word in the full list.
    pub id: usize,
    pub image: String,
    pub text: String,
    pub sound: Option<String>,
    pub is_matched: bool,
    pub translations: BTreeMap<String, String>,
}

impl Card {
    pub fn from_word(id: usize, word: &Word) -> Self {
        Self {
            id,
            image: word.image.clone(),
            text: word.text.clone(),
            sound: word.sound.clone(),
            is_matched: false,
            translations: word.translations.clone(),
        }
    }

    pub fn with_matched(&self) -> Self {
        Self {
            is_matched: true,
            ..self.clone()
        }
    }

    /// Text for `locale`, falling back to the base text.
    pub fn text_for(&self, locale: &str) -> &str {
        self.translations
            .get(locale)
            .map(String::as_str)
            .unwrap_or(&self.text)
    }

    pub fn matches(&self, other: &Card, property: MatchProperty) -> bool {
        match property {
            MatchProperty::Image => self.image == other.image,
            MatchProperty::Text => self.text == other.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_matched_leaves_original_untouched() {
        let card = Card::from_word(3, &Word::new("dog.png", "dog"));
        let solved = card.with_matched();
        assert!(!card.is_matched);
        assert!(solved.is_matched);
        assert_eq!(solved.image, card.image);
        assert_eq!(solved.id, 3);
    }

    #[test]
    fn translation_overrides_base_text() {
        let word = Word::new("cat.png", "cat").with_translation("cy", "cath");
        let card = Card::from_word(0, &word);
        assert_eq!(card.text_for("cy"), "cath");
        assert_eq!(card.text_for("en"), "cat");
    }

    #[test]
    fn word_deserializes_without_optional_fields() {
        let word: Word = serde_json::from_str(r#"{"image":"fish.png","text":"fish"}"#).unwrap();
        assert_eq!(word.sound, None);
        assert!(word.translations.is_empty());
    }
}
