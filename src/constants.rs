//! Project-wide constants used across multiple modules.

/// Audio file extensions recognised when building a playlist (compared
/// case-insensitively, without the leading dot)
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "ogg", "m4a"];

/// Files that are never audio and that some systems drop into every folder
pub const SKIP_FILES: &[&str] = &[".DS_Store", "Thumbs.db", "desktop.ini"];

/// Default log destination; the terminal itself belongs to the UI
pub const DEFAULT_LOG_FILE: &str = "/tmp/twindeck.log";
