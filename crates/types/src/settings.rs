//! Read-only settings snapshot consumed by the controller.

use serde::{Deserialize, Serialize};

use crate::{SwitchMode, DEFAULT_SCAN_DELAY_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unsupported cards per page: {0} (expected 1, 2, 3, 4, 6 or 8)")]
pub struct InvalidCardsPerPage(pub u8);

/// Cards on a page. Only the counts the layout solver knows are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CardsPerPage {
    One,
    Two,
    Three,
    Four,
    Six,
    Eight,
}

impl CardsPerPage {
    pub const ALL: [CardsPerPage; 6] = [
        CardsPerPage::One,
        CardsPerPage::Two,
        CardsPerPage::Three,
        CardsPerPage::Four,
        CardsPerPage::Six,
        CardsPerPage::Eight,
    ];

    pub fn from_count(count: u8) -> Result<Self, InvalidCardsPerPage> {
        match count {
            1 => Ok(CardsPerPage::One),
            2 => Ok(CardsPerPage::Two),
            3 => Ok(CardsPerPage::Three),
            4 => Ok(CardsPerPage::Four),
            6 => Ok(CardsPerPage::Six),
            8 => Ok(CardsPerPage::Eight),
            other => Err(InvalidCardsPerPage(other)),
        }
    }

    pub fn count(self) -> usize {
        match self {
            CardsPerPage::One => 1,
            CardsPerPage::Two => 2,
            CardsPerPage::Three => 3,
            CardsPerPage::Four => 4,
            CardsPerPage::Six => 6,
            CardsPerPage::Eight => 8,
        }
    }
}

impl TryFrom<u8> for CardsPerPage {
    type Error = InvalidCardsPerPage;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        CardsPerPage::from_count(value)
    }
}

impl From<CardsPerPage> for u8 {
    fn from(value: CardsPerPage) -> Self {
        value.count() as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShuffleMode {
    /// Source order.
    Off,
    /// Shuffle within the current page only.
    Page,
    /// Shuffle the whole list before slicing, on every page build.
    All,
}

impl ShuffleMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "off" => Some(ShuffleMode::Off),
            "page" => Some(ShuffleMode::Page),
            "all" => Some(ShuffleMode::All),
            _ => None,
        }
    }
}

/// Settings snapshot. Missing fields in a settings file take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub cards_per_page: CardsPerPage,
    pub shuffle_mode: ShuffleMode,
    /// Multiplies every animation and wait duration.
    pub speed_multiplier: f32,
    pub automatic: bool,
    pub play_before_match: bool,
    pub play_after_match: bool,
    pub enable_reward: bool,
    pub text_to_speech: bool,
    pub capital_letters: bool,
    pub large_text: bool,
    pub switch_count: u8,
    pub scan_delay_ms: u32,
    pub locale: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cards_per_page: CardsPerPage::Four,
            shuffle_mode: ShuffleMode::Off,
            speed_multiplier: 1.0,
            automatic: true,
            play_before_match: true,
            play_after_match: true,
            enable_reward: true,
            text_to_speech: true,
            capital_letters: false,
            large_text: false,
            switch_count: 0,
            scan_delay_ms: DEFAULT_SCAN_DELAY_MS,
            locale: String::from("en"),
        }
    }
}

impl Settings {
    /// Speed multiplier, with non-positive or non-finite values treated as 1.
    pub fn speed(&self) -> f32 {
        if self.speed_multiplier.is_finite() && self.speed_multiplier > 0.0 {
            self.speed_multiplier
        } else {
            1.0
        }
    }

    /// Scale a base duration by the speed multiplier.
    ///
    /// ```
    /// use makaton_match_types::Settings;
    ///
    /// let settings = Settings { speed_multiplier: 1.5, ..Settings::default() };
    /// assert_eq!(settings.scaled_ms(1000), 1500);
    /// ```
    pub fn scaled_ms(&self, base_ms: u32) -> u32 {
        (base_ms as f32 * self.speed()).round() as u32
    }

    pub fn switch_mode(&self) -> SwitchMode {
        SwitchMode::from_count(self.switch_count)
    }
}
