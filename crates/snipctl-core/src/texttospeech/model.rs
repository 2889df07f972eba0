//! Text-to-Speech wire types

use serde::{Deserialize, Serialize};

/// One line of dialogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: String,
    pub text: String,
}

impl Turn {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

/// Output audio format
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    #[default]
    Mp3,
    Linear16,
    OggOpus,
    Mulaw,
    Alaw,
}

impl AudioEncoding {
    /// Conventional file extension
    pub fn extension(self) -> &'static str {
        match self {
            AudioEncoding::Mp3 => "mp3",
            AudioEncoding::Linear16 => "wav",
            AudioEncoding::OggOpus => "ogg",
            AudioEncoding::Mulaw | AudioEncoding::Alaw => "raw",
        }
    }
}

/// `POST text:synthesize` body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeSpeechRequest {
    pub input: SynthesisInput,
    pub voice: VoiceSelectionParams,
    pub audio_config: AudioConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisInput {
    pub multi_speaker_markup: MultiSpeakerMarkup,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiSpeakerMarkup {
    pub turns: Vec<Turn>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSelectionParams {
    pub language_code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioConfig {
    pub audio_encoding: AudioEncoding,
}

/// `text:synthesize` response; `audio_content` is base64
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeSpeechResponse {
    #[serde(default)]
    pub audio_content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let request = SynthesizeSpeechRequest {
            input: SynthesisInput {
                multi_speaker_markup: MultiSpeakerMarkup {
                    turns: vec![Turn::new("R", "Hi"), Turn::new("S", "Hello")],
                },
            },
            voice: VoiceSelectionParams {
                language_code: "en-US".to_string(),
                name: "en-US-Studio-MultiSpeaker".to_string(),
            },
            audio_config: AudioConfig {
                audio_encoding: AudioEncoding::Mp3,
            },
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "input": {"multiSpeakerMarkup": {"turns": [
                    {"speaker": "R", "text": "Hi"},
                    {"speaker": "S", "text": "Hello"}
                ]}},
                "voice": {"languageCode": "en-US", "name": "en-US-Studio-MultiSpeaker"},
                "audioConfig": {"audioEncoding": "MP3"}
            })
        );
    }

    #[test]
    fn test_encoding_names() {
        assert_eq!(
            serde_json::to_value(AudioEncoding::OggOpus).unwrap(),
            json!("OGG_OPUS")
        );
        assert_eq!(AudioEncoding::Linear16.extension(), "wav");
    }
}
