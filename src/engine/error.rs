//! Error taxonomy for the playback engine.
//!
//! Open failures during transitions are non-fatal: the affected slot stays
//! inactive and the caller decides whether to report it. Device failures are
//! fatal at startup. `NotSkippable` is a policy rejection, not a fault.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A file could not be opened or decoded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to open {}: {reason}", path.display())]
pub struct OpenError {
    pub path: PathBuf,
    pub reason: String,
}

impl OpenError {
    pub fn new(path: &Path, reason: impl fmt::Display) -> Self {
        Self {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// The output device could not be initialised, started or stopped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("audio device error: {0}")]
pub struct DeviceError(pub String);

impl DeviceError {
    pub fn new(reason: impl fmt::Display) -> Self {
        Self(reason.to_string())
    }
}

/// Why a skip request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipRejection {
    /// Single-file playback, there is nowhere to skip to.
    SingleFile,
    AtLastTrack,
    AtFirstTrack,
}

impl fmt::Display for SkipRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipRejection::SingleFile => "not playing a playlist",
            SkipRejection::AtLastTrack => "already at the last track",
            SkipRejection::AtFirstTrack => "already at the first track",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayerError {
    #[error(transparent)]
    Open(#[from] OpenError),
    #[error(transparent)]
    Device(#[from] DeviceError),
    #[error("playlist is empty")]
    EmptyPlaylist,
    #[error("cannot skip: {0}")]
    NotSkippable(SkipRejection),
}
