//! Parameters for multi-speaker synthesis

use crate::error::{CoreError, Result};

use super::model::{
    AudioConfig, AudioEncoding, MultiSpeakerMarkup, SynthesisInput, SynthesizeSpeechRequest, Turn,
    VoiceSelectionParams,
};

pub const DEFAULT_VOICE: &str = "en-US-Studio-MultiSpeaker";
pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";

/// A short two-speaker exchange between speakers `R` and `S`
pub fn default_dialogue() -> Vec<Turn> {
    vec![
        Turn::new(
            "R",
            "I've heard that the Google Cloud multi-speaker audio generation sounds amazing!",
        ),
        Turn::new("S", "Oh? What's so good about it?"),
        Turn::new("R", "Well.."),
        Turn::new("S", "Well what?"),
        Turn::new("R", "Well, you should find it out by yourself!"),
        Turn::new("S", "Alright alright, let's try it out!"),
    ]
}

/// Parameters for synthesizing a dialogue
///
/// # Example
///
/// ```rust
/// use snipctl_core::texttospeech::{AudioEncoding, MultiSpeakerParams};
///
/// let request = MultiSpeakerParams::new()
///     .with_turn("R", "Hello")
///     .with_turn("S", "Hi there")
///     .into_request()
///     .unwrap();
///
/// assert_eq!(request.input.multi_speaker_markup.turns.len(), 2);
/// assert_eq!(request.audio_config.audio_encoding, AudioEncoding::Mp3);
/// ```
#[derive(Debug, Clone)]
pub struct MultiSpeakerParams {
    pub turns: Vec<Turn>,
    pub voice_name: String,
    pub language_code: String,
    pub audio_encoding: AudioEncoding,
}

impl Default for MultiSpeakerParams {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiSpeakerParams {
    /// Empty dialogue with the studio multi-speaker voice and MP3 output
    #[must_use]
    pub fn new() -> Self {
        Self {
            turns: Vec::new(),
            voice_name: DEFAULT_VOICE.to_string(),
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            audio_encoding: AudioEncoding::default(),
        }
    }

    #[must_use]
    pub fn with_turn(mut self, speaker: impl Into<String>, text: impl Into<String>) -> Self {
        self.turns.push(Turn::new(speaker, text));
        self
    }

    #[must_use]
    pub fn with_turns(mut self, turns: impl IntoIterator<Item = Turn>) -> Self {
        self.turns.extend(turns);
        self
    }

    #[must_use]
    pub fn with_voice(mut self, language_code: impl Into<String>, name: impl Into<String>) -> Self {
        self.language_code = language_code.into();
        self.voice_name = name.into();
        self
    }

    #[must_use]
    pub fn with_audio_encoding(mut self, encoding: AudioEncoding) -> Self {
        self.audio_encoding = encoding;
        self
    }

    /// Validate and build the synthesize request
    pub fn into_request(self) -> Result<SynthesizeSpeechRequest> {
        if self.turns.is_empty() {
            return Err(CoreError::validation("at least one dialogue turn is required"));
        }
        for (i, turn) in self.turns.iter().enumerate() {
            if turn.speaker.trim().is_empty() {
                return Err(CoreError::validation(format!("turn {} has no speaker", i + 1)));
            }
            if turn.text.trim().is_empty() {
                return Err(CoreError::validation(format!("turn {} has no text", i + 1)));
            }
        }
        if self.voice_name.trim().is_empty() || self.language_code.trim().is_empty() {
            return Err(CoreError::validation(
                "voice name and language code must not be empty",
            ));
        }

        Ok(SynthesizeSpeechRequest {
            input: SynthesisInput {
                multi_speaker_markup: MultiSpeakerMarkup { turns: self.turns },
            },
            voice: VoiceSelectionParams {
                language_code: self.language_code,
                name: self.voice_name,
            },
            audio_config: AudioConfig {
                audio_encoding: self.audio_encoding,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dialogue_alternates() {
        let turns = default_dialogue();
        assert_eq!(turns.len(), 6);
        for (i, turn) in turns.iter().enumerate() {
            assert_eq!(turn.speaker, if i % 2 == 0 { "R" } else { "S" });
        }
    }

    #[test]
    fn test_defaults() {
        let request = MultiSpeakerParams::new()
            .with_turns(default_dialogue())
            .into_request()
            .unwrap();
        assert_eq!(request.voice.name, "en-US-Studio-MultiSpeaker");
        assert_eq!(request.voice.language_code, "en-US");
        assert_eq!(request.audio_config.audio_encoding, AudioEncoding::Mp3);
    }

    #[test]
    fn test_no_turns_fails() {
        let err = MultiSpeakerParams::new().into_request().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_blank_turn_fails() {
        let err = MultiSpeakerParams::new()
            .with_turn("R", "Hello")
            .with_turn("", "Who said this?")
            .into_request()
            .unwrap_err();
        assert!(err.to_string().contains("turn 2 has no speaker"));

        let err = MultiSpeakerParams::new()
            .with_turn("R", "  ")
            .into_request()
            .unwrap_err();
        assert!(err.to_string().contains("turn 1 has no text"));
    }
}
