//! Game variants, input vocabulary and navigation commands.

use serde::{Deserialize, Serialize};

/// Card property compared when deciding whether two cards match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchProperty {
    Image,
    Text,
}

/// What a card face shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardFace {
    Image,
    Text,
    ImageAndText,
    /// Face down; sound games hide the match card's content.
    Blank,
}

/// Reveal animation run after a successful match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipKind {
    None,
    /// One half turn, progress `[0, 1]`.
    Single,
    /// Two half turns, progress `[0, 2]`.
    Double,
}

impl FlipKind {
    pub fn stages(self) -> u8 {
        match self {
            FlipKind::None => 0,
            FlipKind::Single => 1,
            FlipKind::Double => 2,
        }
    }
}

/// Per-variant rules: what is compared, what each card shows, how the answer is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub match_property: MatchProperty,
    pub static_face: CardFace,
    pub match_face: CardFace,
    /// Face shown once the first flip stage passes its midpoint.
    pub after_face: CardFace,
    /// Face shown after the second stage of a double flip.
    pub final_face: CardFace,
    pub flip: FlipKind,
    /// The match card carries only its sound; the before-match cue always plays.
    pub sound_only: bool,
}

impl GameConfig {
    /// Face a solved static card keeps once its reveal has finished.
    pub fn revealed_face(&self) -> CardFace {
        match self.flip {
            FlipKind::None => self.static_face,
            FlipKind::Single => self.after_face,
            FlipKind::Double => self.final_face,
        }
    }

    /// Face for a given flip stage (0 = before the first midpoint).
    pub fn face_for_stage(&self, stage: u8, resting: CardFace) -> CardFace {
        match stage {
            0 => resting,
            1 => self.after_face,
            _ => self.final_face,
        }
    }
}

/// The matching games offered by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    PictureToPicture,
    WordToWord,
    PictureToWord,
    WordToPicture,
    SoundToPicture,
    SoundToWord,
}

impl GameKind {
    pub const ALL: [GameKind; 6] = [
        GameKind::PictureToPicture,
        GameKind::WordToWord,
        GameKind::PictureToWord,
        GameKind::WordToPicture,
        GameKind::SoundToPicture,
        GameKind::SoundToWord,
    ];

    pub fn config(self) -> GameConfig {
        match self {
            GameKind::PictureToPicture => GameConfig {
                match_property: MatchProperty::Image,
                static_face: CardFace::Image,
                match_face: CardFace::Image,
                after_face: CardFace::Text,
                final_face: CardFace::Text,
                flip: FlipKind::Single,
                sound_only: false,
            },
            GameKind::WordToWord => GameConfig {
                match_property: MatchProperty::Text,
                static_face: CardFace::Text,
                match_face: CardFace::Text,
                after_face: CardFace::Image,
                final_face: CardFace::Image,
                flip: FlipKind::Single,
                sound_only: false,
            },
            GameKind::PictureToWord => GameConfig {
                match_property: MatchProperty::Text,
                static_face: CardFace::Text,
                match_face: CardFace::Image,
                after_face: CardFace::ImageAndText,
                final_face: CardFace::ImageAndText,
                flip: FlipKind::Single,
                sound_only: false,
            },
            GameKind::WordToPicture => GameConfig {
                match_property: MatchProperty::Image,
                static_face: CardFace::Image,
                match_face: CardFace::Text,
                after_face: CardFace::ImageAndText,
                final_face: CardFace::ImageAndText,
                flip: FlipKind::Single,
                sound_only: false,
            },
            GameKind::SoundToPicture => GameConfig {
                match_property: MatchProperty::Image,
                static_face: CardFace::Image,
                match_face: CardFace::Blank,
                after_face: CardFace::Text,
                final_face: CardFace::ImageAndText,
                flip: FlipKind::Double,
                sound_only: true,
            },
            GameKind::SoundToWord => GameConfig {
                match_property: MatchProperty::Text,
                static_face: CardFace::Text,
                match_face: CardFace::Blank,
                after_face: CardFace::Image,
                final_face: CardFace::ImageAndText,
                flip: FlipKind::Double,
                sound_only: true,
            },
        }
    }

    /// Parse from kebab-case (case-insensitive).
    ///
    /// ```
    /// use makaton_match_types::GameKind;
    ///
    /// assert_eq!(GameKind::from_str("word-to-word"), Some(GameKind::WordToWord));
    /// assert_eq!(GameKind::from_str("Sound-To-Picture"), Some(GameKind::SoundToPicture));
    /// assert_eq!(GameKind::from_str("chess"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        GameKind::ALL.into_iter().find(|k| k.as_str() == lower)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::PictureToPicture => "picture-to-picture",
            GameKind::WordToWord => "word-to-word",
            GameKind::PictureToWord => "picture-to-word",
            GameKind::WordToPicture => "word-to-picture",
            GameKind::SoundToPicture => "sound-to-picture",
            GameKind::SoundToWord => "sound-to-word",
        }
    }
}

/// Abstract switch events, independent of the physical device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchPress {
    Space,
    Enter,
    Switch1,
    Switch3,
    Plus,
    Generic,
}

impl SwitchPress {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "space" => Some(SwitchPress::Space),
            "enter" => Some(SwitchPress::Enter),
            "switch1" => Some(SwitchPress::Switch1),
            "switch3" => Some(SwitchPress::Switch3),
            "plus" => Some(SwitchPress::Plus),
            "generic" => Some(SwitchPress::Generic),
            _ => None,
        }
    }
}

/// Configured number of switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchMode {
    Disabled,
    Single,
    Dual,
    Triple,
}

impl SwitchMode {
    /// Counts above three are unsupported and fall back to disabled.
    pub fn from_count(count: u8) -> Self {
        match count {
            1 => SwitchMode::Single,
            2 => SwitchMode::Dual,
            3 => SwitchMode::Triple,
            _ => SwitchMode::Disabled,
        }
    }

    pub fn count(self) -> u8 {
        match self {
            SwitchMode::Disabled => 0,
            SwitchMode::Single => 1,
            SwitchMode::Dual => 2,
            SwitchMode::Triple => 3,
        }
    }
}

/// Toolbar navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavCommand {
    Start,
    Previous,
    Next,
    End,
    Refresh,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_round_trips_through_its_name() {
        for kind in GameKind::ALL {
            assert_eq!(GameKind::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn sound_games_use_double_flip() {
        assert_eq!(GameKind::SoundToPicture.config().flip, FlipKind::Double);
        assert_eq!(GameKind::SoundToWord.config().flip, FlipKind::Double);
        assert!(GameKind::SoundToWord.config().sound_only);
    }

    #[test]
    fn revealed_face_follows_flip_kind() {
        let single = GameKind::PictureToPicture.config();
        assert_eq!(single.revealed_face(), CardFace::Text);
        let double = GameKind::SoundToPicture.config();
        assert_eq!(double.revealed_face(), CardFace::ImageAndText);
    }

    #[test]
    fn switch_mode_from_count() {
        assert_eq!(SwitchMode::from_count(0), SwitchMode::Disabled);
        assert_eq!(SwitchMode::from_count(3), SwitchMode::Triple);
        assert_eq!(SwitchMode::from_count(9), SwitchMode::Disabled);
    }
}
