//! Text-to-Speech calls

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::client::{GoogleClient, Service};
use crate::error::{ApiError, CoreError, Result};
use crate::report::{Field, Report};

use super::model::{AudioEncoding, SynthesizeSpeechRequest, SynthesizeSpeechResponse};
use super::params::MultiSpeakerParams;

#[derive(Debug, Clone)]
pub struct TextToSpeechHandler {
    client: GoogleClient,
}

impl TextToSpeechHandler {
    pub fn new(client: GoogleClient) -> Self {
        Self { client }
    }

    /// Synthesize speech and decode the returned audio
    pub async fn synthesize(&self, request: &SynthesizeSpeechRequest) -> Result<SynthesizedAudio> {
        debug!(
            "Synthesizing {} turn(s) with voice {}",
            request.input.multi_speaker_markup.turns.len(),
            request.voice.name
        );
        let response: SynthesizeSpeechResponse = self
            .client
            .post(Service::TextToSpeech, None, "text:synthesize", &[], request)
            .await?;

        let audio = STANDARD
            .decode(response.audio_content.as_bytes())
            .map_err(|e| ApiError::Decode(format!("audioContent is not valid base64: {}", e)))?;
        Ok(SynthesizedAudio {
            encoding: request.audio_config.audio_encoding,
            audio,
        })
    }
}

/// Decoded audio bytes
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedAudio {
    pub encoding: AudioEncoding,
    pub audio: Vec<u8>,
}

impl SynthesizedAudio {
    pub fn len(&self) -> usize {
        self.audio.len()
    }

    pub fn is_empty(&self) -> bool {
        self.audio.is_empty()
    }

    /// Write the audio to `path`, replacing any existing file
    pub async fn write_to(&self, path: &Path) -> Result<()> {
        tokio::fs::write(path, &self.audio).await?;
        Ok(())
    }
}

/// Where the audio ended up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioFile {
    pub path: PathBuf,
    pub bytes: usize,
    pub encoding: AudioEncoding,
}

impl Report for AudioFile {
    fn report(&self) -> Vec<Field> {
        vec![
            ("File", self.path.display().to_string()),
            ("Bytes", self.bytes.to_string()),
        ]
    }
}

/// Validate `params`, synthesize, and write the audio to `path`
///
/// Fails if the service returns no audio; nothing is written in that case.
pub async fn synthesize_to_file(
    client: &GoogleClient,
    params: MultiSpeakerParams,
    path: &Path,
) -> Result<AudioFile> {
    let request = params.into_request()?;
    let audio = TextToSpeechHandler::new(client.clone())
        .synthesize(&request)
        .await?;
    if audio.is_empty() {
        return Err(CoreError::Api(ApiError::Decode(
            "synthesize response contained no audio".to_string(),
        )));
    }

    audio.write_to(path).await?;
    info!("Wrote {} bytes of audio to {}", audio.len(), path.display());
    Ok(AudioFile {
        path: path.to_path_buf(),
        bytes: audio.len(),
        encoding: audio.encoding,
    })
}
