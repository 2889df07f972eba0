//! `tts` commands

use std::path::Path;

use crate::cli::{Cli, TtsCommands};
use crate::connection::ConnectionManager;
use crate::error::SnipCtlError;
use crate::output::print_result_headed;
use snipctl_core::texttospeech::{
    AudioEncoding, MultiSpeakerParams, Turn, default_dialogue, synthesize_to_file,
};

pub async fn handle_tts_command(
    cmd: &TtsCommands,
    conn_mgr: &ConnectionManager,
    cli: &Cli,
) -> Result<(), SnipCtlError> {
    match cmd {
        TtsCommands::MultiSpeaker {
            turns,
            output,
            encoding,
        } => {
            let turns = if turns.is_empty() {
                default_dialogue()
            } else {
                turns
                    .iter()
                    .map(|t| parse_turn(t))
                    .collect::<Result<Vec<_>, _>>()?
            };
            let params = MultiSpeakerParams::new()
                .with_turns(turns)
                .with_audio_encoding(*encoding);

            let output = output
                .clone()
                .unwrap_or_else(|| default_output(*encoding));
            let client = conn_mgr.create_client(cli.profile.as_deref())?;
            let path = Path::new(&output);
            let audio = synthesize_to_file(&client, params, path)
                .await
                .map_err(|e| match e {
                    snipctl_core::CoreError::Io(io) => SnipCtlError::FileError {
                        path: output.clone(),
                        message: io.to_string(),
                    },
                    other => other.into(),
                })?;

            print_result_headed(
                &audio,
                &format!("Audio content written to file \"{}\"", audio.path.display()),
                cli.output,
                cli.query.as_deref(),
            )
        }
    }
}

fn default_output(encoding: AudioEncoding) -> String {
    format!("output.{}", encoding.extension())
}

/// `SPEAKER=TEXT`; the text may itself contain `=`
fn parse_turn(s: &str) -> Result<Turn, SnipCtlError> {
    match s.split_once('=') {
        Some((speaker, text)) if !speaker.trim().is_empty() => {
            Ok(Turn::new(speaker.trim(), text.trim()))
        }
        _ => Err(SnipCtlError::InvalidInput {
            message: format!("expected SPEAKER=TEXT, got '{}'", s),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_turn() {
        let turn = parse_turn("R=I've heard that a = b.").unwrap();
        assert_eq!(turn.speaker, "R");
        assert_eq!(turn.text, "I've heard that a = b.");

        assert!(parse_turn("no separator").is_err());
        assert!(parse_turn("=orphan text").is_err());
    }

    #[test]
    fn test_default_output_follows_encoding() {
        assert_eq!(default_output(AudioEncoding::Mp3), "output.mp3");
        assert_eq!(default_output(AudioEncoding::Linear16), "output.wav");
        assert_eq!(default_output(AudioEncoding::OggOpus), "output.ogg");
    }
}
