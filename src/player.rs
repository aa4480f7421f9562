//! A [`Player`] for terminals: instead of sound, the spoken word is shown as
//! a caption for roughly as long as saying it would take.

use crate::core::{Playback, PlaybackError, PlaybackTicket, Player, SpeechCue};

const BASE_MS: u32 = 400;
const PER_CHAR_MS: u32 = 80;
const REWARD_MS: u32 = 1200;
const REWARD_CAPTION: &str = "well done!";

#[derive(Debug, Clone)]
struct Active {
    ticket: Option<PlaybackTicket>,
    caption: String,
    remaining_ms: u32,
}

#[derive(Debug, Clone, Default)]
pub struct CaptionPlayer {
    next_ticket: u64,
    active: Option<Active>,
}

impl CaptionPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// What is being "said" right now.
    pub fn caption(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.caption.as_str())
    }

    /// Advance the caption clock. Returns the ticket of a waited cue that
    /// just finished.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<PlaybackTicket> {
        let active = self.active.as_mut()?;
        active.remaining_ms = active.remaining_ms.saturating_sub(elapsed_ms);
        if active.remaining_ms > 0 {
            return None;
        }
        self.active.take().and_then(|a| a.ticket)
    }

    fn start(&mut self, caption: String, duration_ms: u32, waited: bool) -> Playback {
        let ticket = waited.then(|| {
            self.next_ticket += 1;
            PlaybackTicket(self.next_ticket)
        });
        self.active = Some(Active {
            ticket,
            caption,
            remaining_ms: duration_ms.max(1),
        });
        ticket.map_or(Playback::Done, Playback::Pending)
    }

    fn audible(cue: &SpeechCue) -> bool {
        cue.sound.is_some() || cue.tts_enabled
    }
}

fn speaking_ms(text: &str) -> u32 {
    BASE_MS + PER_CHAR_MS * text.chars().count() as u32
}

impl Player for CaptionPlayer {
    fn play_word(&mut self, cue: &SpeechCue) -> Result<(), PlaybackError> {
        if Self::audible(cue) {
            self.start(cue.text.clone(), speaking_ms(&cue.text), false);
        }
        Ok(())
    }

    fn play_word_and_wait(&mut self, cue: &SpeechCue) -> Result<Playback, PlaybackError> {
        if !Self::audible(cue) {
            return Ok(Playback::Done);
        }
        Ok(self.start(cue.text.clone(), speaking_ms(&cue.text), true))
    }

    fn play_reward_sound(&mut self) -> Result<Playback, PlaybackError> {
        Ok(self.start(REWARD_CAPTION.to_string(), REWARD_MS, true))
    }

    fn stop_current_sound(&mut self) {
        self.active = None;
    }

    fn stop_current_speech(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue(text: &str, tts: bool) -> SpeechCue {
        SpeechCue {
            sound: None,
            text: text.to_string(),
            locale: "en".to_string(),
            tts_enabled: tts,
        }
    }

    #[test]
    fn waited_cue_finishes_with_its_ticket() {
        let mut p = CaptionPlayer::new();
        let Ok(Playback::Pending(ticket)) = p.play_word_and_wait(&cue("dog", true)) else {
            panic!("expected a pending playback");
        };
        assert_eq!(p.caption(), Some("dog"));
        assert_eq!(p.update(speaking_ms("dog") - 1), None);
        assert_eq!(p.update(1), Some(ticket));
        assert_eq!(p.caption(), None);
    }

    #[test]
    fn silent_cue_is_done_at_once() {
        let mut p = CaptionPlayer::new();
        assert_eq!(p.play_word_and_wait(&cue("dog", false)), Ok(Playback::Done));
        assert_eq!(p.caption(), None);
    }

    #[test]
    fn stopping_drops_the_ticket() {
        let mut p = CaptionPlayer::new();
        p.play_reward_sound().unwrap();
        p.stop_current_sound();
        assert_eq!(p.update(REWARD_MS), None);
    }

    #[test]
    fn fire_and_forget_has_no_ticket() {
        let mut p = CaptionPlayer::new();
        p.play_word(&cue("cat", true)).unwrap();
        assert_eq!(p.caption(), Some("cat"));
        assert_eq!(p.update(10_000), None);
        assert_eq!(p.caption(), None);
    }
}
