//! Playback state and the real-time frame producer.

use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

use super::decoder::DecoderFactory;
use super::error::OpenError;
use super::format::{StreamFormat, fill_silence};
use super::playlist::PlaylistStore;
use super::track::DualTrack;

/// Everything the callback and the transport operations share.
///
/// Invariants: when `auto_advance` is set and a current track is loaded,
/// `current_index` points at it in `playlist`; a preloaded next track is
/// always `playlist[current_index + 1]`.
pub struct PlaybackState {
    tracks: DualTrack,
    playlist: PlaylistStore,
    current_index: Option<usize>,
    auto_advance: bool,
    factory: Arc<dyn DecoderFactory>,
    format: StreamFormat,
    /// Most recent preload failure, held until the control side takes it.
    /// The callback never logs.
    preload_failure: Option<OpenError>,
}

impl PlaybackState {
    pub fn new(factory: Arc<dyn DecoderFactory>, format: StreamFormat) -> Self {
        Self {
            tracks: DualTrack::new(),
            playlist: PlaylistStore::new(),
            current_index: None,
            auto_advance: false,
            factory,
            format,
            preload_failure: None,
        }
    }

    pub fn format(&self) -> StreamFormat {
        self.format
    }

    pub fn tracks(&self) -> &DualTrack {
        &self.tracks
    }

    pub fn playlist(&self) -> &PlaylistStore {
        &self.playlist
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn auto_advance(&self) -> bool {
        self.auto_advance
    }

    /// Fills `out` with the next callback period of audio.
    ///
    /// The buffer is always fully written. When the current track ends part
    /// way through, the tail is silent even if a preloaded track is promoted;
    /// the promoted track is first read on the following call.
    pub fn produce(&mut self, out: &mut [f32], paused: bool) {
        let frame_count = self.format.frames_in(out.len());
        let whole = self.format.samples_for(frame_count);

        let current = match self.tracks.current_mut() {
            Some(current) if !paused => current,
            _ => {
                fill_silence(out);
                return;
            }
        };

        let frames_read = current
            .read_frames(&mut out[..whole], frame_count)
            .min(frame_count);
        let written = self.format.samples_for(frames_read);
        fill_silence(&mut out[written..]);

        if frames_read == frame_count {
            return;
        }

        if !(self.auto_advance && self.promote()) {
            self.tracks.close_current();
        }
    }

    /// Promotes the preloaded track and preloads the one after it.
    /// Returns false when nothing was preloaded.
    pub fn promote(&mut self) -> bool {
        if !self.tracks.promote() {
            return false;
        }
        self.current_index = Some(self.current_index.map_or(0, |index| index + 1));
        self.preload_following();
        true
    }

    /// Preloads `playlist[current_index + 1]` if it exists. A failure leaves
    /// the next slot empty and is kept for `take_preload_failure`.
    pub fn preload_following(&mut self) {
        let Some(index) = self.current_index else {
            return;
        };
        let Some(path) = self.playlist.get(index + 1) else {
            return;
        };
        if let Err(e) = self
            .tracks
            .preload_next(self.factory.as_ref(), path, self.format)
        {
            self.preload_failure = Some(e);
        }
    }

    pub fn take_preload_failure(&mut self) -> Option<OpenError> {
        self.preload_failure.take()
    }

    pub fn load_current(&mut self, path: &Path) -> Result<(), OpenError> {
        let result = self
            .tracks
            .load_current(self.factory.as_ref(), path, self.format);
        match &result {
            Ok(()) => info!("Now playing: {}", display_name(path)),
            Err(e) => warn!("{e}"),
        }
        result
    }

    /// Opens `playlist[index]` as the current track and makes it the cursor.
    pub fn load_index(&mut self, index: usize) -> Result<(), OpenError> {
        self.current_index = Some(index);
        let path = match self.playlist.get(index) {
            Some(path) => path.to_path_buf(),
            None => {
                self.tracks.close_current();
                return Err(OpenError::new(Path::new(""), "playlist index out of range"));
            }
        };
        self.load_current(&path)
    }

    pub fn set_auto_advance(&mut self, enabled: bool) {
        self.auto_advance = enabled;
    }

    pub fn clear_cursor(&mut self) {
        self.current_index = None;
    }

    pub fn install_playlist<P: AsRef<Path>>(&mut self, paths: &[P]) {
        self.playlist.replace(paths);
        self.current_index = Some(0);
        self.auto_advance = true;
    }

    pub fn release_playlist(&mut self) {
        self.playlist.clear();
        self.current_index = None;
        self.auto_advance = false;
    }

    pub fn close_current(&mut self) {
        self.tracks.close_current();
    }

    pub fn close_all(&mut self) {
        self.tracks.close_all();
    }

    pub fn has_next_in_playlist(&self) -> bool {
        self.current_index
            .is_some_and(|index| index + 1 < self.playlist.len())
    }

    pub fn status(&self, paused: bool) -> PlaybackStatus {
        PlaybackStatus {
            current_path: self.tracks.current().map(|t| t.path().to_path_buf()),
            next_path: self.tracks.next().map(|t| t.path().to_path_buf()),
            paused,
            auto_advance: self.auto_advance,
            current_index: self.current_index,
            playlist_length: self.playlist.len(),
        }
    }
}

/// Display snapshot for the UI layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackStatus {
    pub current_path: Option<PathBuf>,
    pub next_path: Option<PathBuf>,
    pub paused: bool,
    pub auto_advance: bool,
    pub current_index: Option<usize>,
    pub playlist_length: usize,
}

/// The part of the engine handed to the output driver.
///
/// The pause flag lives outside the lock so it can flip while the driver
/// keeps running; it is observed at the start of the next callback.
pub struct RenderContext {
    state: Mutex<PlaybackState>,
    paused: AtomicBool,
}

impl RenderContext {
    pub fn new(state: PlaybackState) -> Self {
        Self {
            state: Mutex::new(state),
            paused: AtomicBool::new(false),
        }
    }

    /// Called from the output callback. Never blocks: if the state is
    /// locked by the control side, the period is silent.
    pub fn render(&self, out: &mut [f32]) {
        match self.state.try_lock() {
            Ok(mut state) => state.produce(out, self.is_paused()),
            Err(TryLockError::Poisoned(poisoned)) => {
                poisoned.into_inner().produce(out, self.is_paused())
            }
            Err(TryLockError::WouldBlock) => fill_silence(out),
        }
    }

    /// Control-side access. Callers stop the driver first for anything
    /// beyond reads.
    pub fn lock(&self) -> MutexGuard<'_, PlaybackState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Release);
    }

    /// Flips the pause flag and returns the new value.
    pub fn toggle_paused(&self) -> bool {
        !self.paused.fetch_xor(true, Ordering::AcqRel)
    }
}

/// File name of `path` for display, falling back to the whole path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
