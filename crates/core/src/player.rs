//! Audio and speech playback, seen from the controller.
//!
//! The controller treats playback as best effort: a failed cue is logged and
//! the round carries on. Completion of a waited cue comes back through
//! [`GameState::playback_finished`](crate::GameState::playback_finished) with
//! the ticket handed out when it started.

use crate::types::Card;

/// Identifies one waited playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaybackTicket(pub u64);

/// Result of starting a waited playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    /// Nothing to wait for (already finished, or nothing was played).
    Done,
    /// Completion will be reported later with this ticket.
    Pending(PlaybackTicket),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    #[error("sound asset not found: {0}")]
    MissingAsset(String),
    #[error("failed to load sound {key}: {reason}")]
    Load { key: String, reason: String },
    #[error("text-to-speech failed: {0}")]
    Speech(String),
}

/// What to say for a card: its sound file if it has one, otherwise speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechCue {
    pub sound: Option<String>,
    pub text: String,
    pub locale: String,
    pub tts_enabled: bool,
}

impl SpeechCue {
    pub fn for_card(card: &Card, locale: &str, tts_enabled: bool) -> Self {
        Self {
            sound: card.sound.clone(),
            text: card.text_for(locale).to_string(),
            locale: locale.to_string(),
            tts_enabled,
        }
    }
}

/// Audio/TTS collaborator.
pub trait Player {
    /// Fire and forget.
    fn play_word(&mut self, cue: &SpeechCue) -> Result<(), PlaybackError>;

    fn play_word_and_wait(&mut self, cue: &SpeechCue) -> Result<Playback, PlaybackError>;

    fn play_reward_sound(&mut self) -> Result<Playback, PlaybackError>;

    fn stop_current_sound(&mut self);

    fn stop_current_speech(&mut self);
}

/// Plays nothing; every waited cue finishes immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPlayer;

impl Player for NullPlayer {
    fn play_word(&mut self, _cue: &SpeechCue) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn play_word_and_wait(&mut self, _cue: &SpeechCue) -> Result<Playback, PlaybackError> {
        Ok(Playback::Done)
    }

    fn play_reward_sound(&mut self) -> Result<Playback, PlaybackError> {
        Ok(Playback::Done)
    }

    fn stop_current_sound(&mut self) {}

    fn stop_current_speech(&mut self) {}
}

/// Keeps at most one playback alive: every start stops whatever was playing.
#[derive(Debug, Clone, Default)]
pub struct ExclusivePlayer<P> {
    inner: P,
    active: bool,
}

impl<P: Player> ExclusivePlayer<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            active: false,
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut P {
        &mut self.inner
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn stop(&mut self) {
        self.inner.stop_current_sound();
        self.inner.stop_current_speech();
        self.active = false;
    }

    pub fn play_word(&mut self, cue: &SpeechCue) -> Result<(), PlaybackError> {
        self.stop();
        self.active = true;
        self.inner.play_word(cue)
    }

    pub fn play_word_and_wait(&mut self, cue: &SpeechCue) -> Result<Playback, PlaybackError> {
        self.stop();
        let result = self.inner.play_word_and_wait(cue);
        self.active = matches!(result, Ok(Playback::Pending(_)));
        result
    }

    pub fn play_reward_sound(&mut self) -> Result<Playback, PlaybackError> {
        self.stop();
        let result = self.inner.play_reward_sound();
        self.active = matches!(result, Ok(Playback::Pending(_)));
        result
    }

    pub fn finished(&mut self) {
        self.active = false;
    }
}
