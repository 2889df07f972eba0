//! Text-to-Speech: multi-speaker synthesis
//!
//! Studio multi-speaker voices take a list of dialogue turns and return one
//! audio stream. The payload arrives base64-encoded and is decoded before it
//! is handed back.

pub mod handler;
pub mod model;
pub mod params;

pub use handler::{AudioFile, SynthesizedAudio, TextToSpeechHandler, synthesize_to_file};
pub use model::{AudioEncoding, SynthesizeSpeechRequest, Turn};
pub use params::{MultiSpeakerParams, default_dialogue};
