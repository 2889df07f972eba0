//! Command implementations, one module per top-level command

pub mod disk;
pub mod entry_type;
pub mod profile;
pub mod prompt;
pub mod secret;
pub mod tts;
