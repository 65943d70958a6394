//! In-memory decoders and a manual output driver for engine unit tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::decoder::{DecoderFactory, TrackDecoder};
use super::error::{DeviceError, OpenError};
use super::format::StreamFormat;
use super::output::OutputDriver;
use super::state::RenderContext;

#[derive(Default)]
struct Counters {
    attempts: HashMap<PathBuf, usize>,
    opens: HashMap<PathBuf, usize>,
    closes: HashMap<PathBuf, usize>,
}

/// Serves tracks of a fixed length whose samples all equal the track's value.
#[derive(Clone, Default)]
pub struct FakeLibrary {
    tracks: Arc<Mutex<HashMap<PathBuf, (usize, f32)>>>,
    counters: Arc<Mutex<Counters>>,
}

impl FakeLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_track(self, path: &str, frames: usize, value: f32) -> Self {
        self.tracks
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), (frames, value));
        self
    }

    /// Makes later opens of `path` fail, as if the file had been deleted.
    pub fn remove_track(&self, path: &str) {
        self.tracks.lock().unwrap().remove(Path::new(path));
    }

    /// Open calls for `path`, failed ones included.
    pub fn attempts(&self, path: &str) -> usize {
        let counters = self.counters.lock().unwrap();
        counters.attempts.get(Path::new(path)).copied().unwrap_or(0)
    }

    pub fn opens(&self, path: &str) -> usize {
        let counters = self.counters.lock().unwrap();
        counters.opens.get(Path::new(path)).copied().unwrap_or(0)
    }

    pub fn closes(&self, path: &str) -> usize {
        let counters = self.counters.lock().unwrap();
        counters.closes.get(Path::new(path)).copied().unwrap_or(0)
    }

    /// Handles opened and not yet closed, across all paths.
    pub fn live_handles(&self) -> usize {
        let counters = self.counters.lock().unwrap();
        let opened: usize = counters.opens.values().sum();
        let closed: usize = counters.closes.values().sum();
        opened - closed
    }
}

impl DecoderFactory for FakeLibrary {
    fn open(&self, path: &Path, _format: StreamFormat) -> Result<Box<dyn TrackDecoder>, OpenError> {
        *self
            .counters
            .lock()
            .unwrap()
            .attempts
            .entry(path.to_path_buf())
            .or_default() += 1;

        let (frames, value) = self
            .tracks
            .lock()
            .unwrap()
            .get(path)
            .copied()
            .ok_or_else(|| OpenError::new(path, "no such track"))?;

        *self
            .counters
            .lock()
            .unwrap()
            .opens
            .entry(path.to_path_buf())
            .or_default() += 1;

        Ok(Box::new(FakeTrack {
            path: path.to_path_buf(),
            remaining: frames,
            value,
            counters: self.counters.clone(),
        }))
    }
}

struct FakeTrack {
    path: PathBuf,
    remaining: usize,
    value: f32,
    counters: Arc<Mutex<Counters>>,
}

impl TrackDecoder for FakeTrack {
    fn read_frames(&mut self, out: &mut [f32], frame_count: usize) -> usize {
        let channels = 2;
        let frames = frame_count.min(self.remaining).min(out.len() / channels);
        out[..frames * channels].fill(self.value);
        self.remaining -= frames;
        frames
    }
}

impl Drop for FakeTrack {
    fn drop(&mut self) {
        *self
            .counters
            .lock()
            .unwrap()
            .closes
            .entry(self.path.clone())
            .or_default() += 1;
    }
}

/// A driver that only renders when the test asks it to.
#[derive(Default)]
pub struct ManualDriver {
    context: Option<Arc<RenderContext>>,
    running: bool,
    fail_start: bool,
    pub starts: usize,
    pub stops: usize,
}

impl ManualDriver {
    /// A driver whose device refuses to start.
    pub fn failing_start() -> Self {
        Self {
            fail_start: true,
            ..Self::default()
        }
    }

    /// Renders one callback period of `frames` stereo frames.
    pub fn pull(&self, frames: usize) -> Vec<f32> {
        assert!(self.running, "driver pulled while stopped");
        let mut out = vec![f32::NAN; frames * 2];
        if let Some(context) = &self.context {
            context.render(&mut out);
        }
        out
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl OutputDriver for ManualDriver {
    fn format(&self) -> StreamFormat {
        StreamFormat::new(2, 48_000)
    }

    fn start(&mut self, context: &Arc<RenderContext>) -> Result<(), DeviceError> {
        if self.fail_start {
            return Err(DeviceError::new("device refused to start"));
        }
        self.context = Some(context.clone());
        self.running = true;
        self.starts += 1;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), DeviceError> {
        self.running = false;
        self.stops += 1;
        Ok(())
    }

    fn close(&mut self) {
        self.running = false;
        self.context = None;
    }
}
