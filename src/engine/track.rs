//! Current/next track slots.
//!
//! A slot only exists while its decoder is open, so "active" is simply
//! `Option::is_some`. Promotion moves the preloaded slot into the current
//! position; the replaced decoder is dropped (closed) exactly once.

use std::path::{Path, PathBuf};

use super::decoder::{DecoderFactory, TrackDecoder};
use super::error::OpenError;
use super::format::StreamFormat;

pub struct TrackSlot {
    decoder: Box<dyn TrackDecoder>,
    path: PathBuf,
}

impl TrackSlot {
    pub fn open(
        factory: &dyn DecoderFactory,
        path: &Path,
        format: StreamFormat,
    ) -> Result<Self, OpenError> {
        let decoder = factory.open(path, format)?;
        Ok(Self {
            decoder,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_frames(&mut self, out: &mut [f32], frame_count: usize) -> usize {
        self.decoder.read_frames(out, frame_count)
    }
}

#[derive(Default)]
pub struct DualTrack {
    current: Option<TrackSlot>,
    next: Option<TrackSlot>,
}

impl DualTrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&TrackSlot> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut TrackSlot> {
        self.current.as_mut()
    }

    pub fn next(&self) -> Option<&TrackSlot> {
        self.next.as_ref()
    }

    pub fn has_current(&self) -> bool {
        self.current.is_some()
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Opens `path` as the current track, closing whatever was there first.
    pub fn load_current(
        &mut self,
        factory: &dyn DecoderFactory,
        path: &Path,
        format: StreamFormat,
    ) -> Result<(), OpenError> {
        self.current = None;
        self.current = Some(TrackSlot::open(factory, path, format)?);
        Ok(())
    }

    /// Opens `path` into the next slot. On failure the slot is left empty.
    pub fn preload_next(
        &mut self,
        factory: &dyn DecoderFactory,
        path: &Path,
        format: StreamFormat,
    ) -> Result<(), OpenError> {
        self.next = None;
        self.next = Some(TrackSlot::open(factory, path, format)?);
        Ok(())
    }

    /// Moves the preloaded track into the current slot. Returns false, and
    /// leaves both slots alone, when nothing was preloaded.
    pub fn promote(&mut self) -> bool {
        match self.next.take() {
            Some(next) => {
                self.current = Some(next);
                true
            }
            None => false,
        }
    }

    pub fn close_current(&mut self) {
        self.current = None;
    }

    pub fn close_next(&mut self) {
        self.next = None;
    }

    pub fn close_all(&mut self) {
        self.close_current();
        self.close_next();
    }
}
