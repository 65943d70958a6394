//! Playback engine: a preloading current/next track pipeline fed to the
//! output device from a real-time callback.
//!
//! Transport operations run on the control thread. Each one that touches the
//! track slots stops the output driver, mutates the state, then restarts the
//! driver, so the callback never sees a half-finished transition. Pausing is
//! the exception and only flips an atomic flag.

pub mod decoder;
pub mod error;
pub mod format;
pub mod output;
pub mod playlist;
pub mod state;
pub mod track;

#[cfg(test)]
pub(crate) mod testing;

use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;

pub use decoder::{DecoderFactory, RodioDecoderFactory, TrackDecoder};
pub use error::{DeviceError, OpenError, PlayerError, SkipRejection};
pub use format::StreamFormat;
pub use output::{CpalOutput, OutputDriver};
pub use playlist::PlaylistStore;
pub use state::{PlaybackState, PlaybackStatus, RenderContext, display_name};

pub struct Engine<D: OutputDriver> {
    context: Arc<RenderContext>,
    driver: D,
}

impl Engine<CpalOutput> {
    /// Binds the default output device with rodio decoding.
    pub fn with_default_device(
        sample_rate: Option<u32>,
        channels: Option<u16>,
    ) -> Result<Self, PlayerError> {
        let driver = CpalOutput::open_default(sample_rate, channels)?;
        Self::new(driver, Arc::new(RodioDecoderFactory))
    }
}

impl<D: OutputDriver> Engine<D> {
    /// Creates the engine and starts the driver. The device runs for the
    /// engine's whole life, producing silence when nothing is loaded.
    pub fn new(mut driver: D, factory: Arc<dyn DecoderFactory>) -> Result<Self, PlayerError> {
        let format = driver.format();
        let context = Arc::new(RenderContext::new(PlaybackState::new(factory, format)));
        driver.start(&context)?;

        info!(
            "Playback engine started: {} Hz, {} channels",
            format.sample_rate, format.channels
        );
        Ok(Self { context, driver })
    }

    pub fn format(&self) -> StreamFormat {
        self.driver.format()
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn status(&self) -> PlaybackStatus {
        self.context.lock().status(self.context.is_paused())
    }

    /// Takes a preload failure the callback hit at a track boundary.
    /// Front ends poll this and report it.
    pub fn take_preload_failure(&self) -> Option<OpenError> {
        self.context.lock().take_preload_failure()
    }

    /// Plays a single file with auto-advance off. On failure nothing is
    /// loaded, the device keeps producing silence, and the playlist cursor
    /// and pause flag are left as they were.
    pub fn play_file(&mut self, path: impl AsRef<Path>) -> Result<(), PlayerError> {
        let path = path.as_ref();
        info!("Play file: {}", path.display());

        self.with_driver_stopped(|state, context| -> Result<(), OpenError> {
            state.close_all();
            state.load_current(path)?;
            state.set_auto_advance(false);
            state.clear_cursor();
            context.set_paused(false);
            Ok(())
        })?
        .map_err(PlayerError::from)
    }

    /// Installs a copy of `paths` as the playlist and starts at the first
    /// entry, preloading the second.
    pub fn play_playlist<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<(), PlayerError> {
        if paths.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }
        info!("Play playlist of {} tracks", paths.len());

        self.with_driver_stopped(|state, context| -> Result<(), OpenError> {
            state.close_all();
            state.install_playlist(paths);
            context.set_paused(false);
            state.load_index(0)?;
            state.preload_following();
            report_preload(state);
            Ok(())
        })?
        .map_err(PlayerError::from)
    }

    /// Flips pause without stopping the driver. Returns the new state.
    pub fn toggle_pause(&self) -> bool {
        let paused = self.context.toggle_paused();
        info!("{}", if paused { "Paused" } else { "Resumed" });
        paused
    }

    pub fn skip_next(&mut self) -> Result<(), PlayerError> {
        {
            let state = self.context.lock();
            if !state.auto_advance() {
                return Err(PlayerError::NotSkippable(SkipRejection::SingleFile));
            }
            if !state.has_next_in_playlist() {
                return Err(PlayerError::NotSkippable(SkipRejection::AtLastTrack));
            }
        }
        info!("Skip to next track");

        self.with_driver_stopped(|state, _| -> Result<(), OpenError> {
            state.close_current();
            if !state.promote() {
                let index = state.current_index().map_or(0, |index| index + 1);
                state.load_index(index)?;
                state.preload_following();
            }
            report_preload(state);
            Ok(())
        })?
        .map_err(PlayerError::from)
    }

    pub fn skip_previous(&mut self) -> Result<(), PlayerError> {
        let index = {
            let state = self.context.lock();
            if !state.auto_advance() {
                return Err(PlayerError::NotSkippable(SkipRejection::SingleFile));
            }
            match state.current_index() {
                Some(index) if index > 0 => index - 1,
                _ => return Err(PlayerError::NotSkippable(SkipRejection::AtFirstTrack)),
            }
        };
        info!("Skip to previous track");

        self.with_driver_stopped(|state, _| -> Result<(), OpenError> {
            state.close_all();
            state.load_index(index)?;
            state.preload_following();
            report_preload(state);
            Ok(())
        })?
        .map_err(PlayerError::from)
    }

    /// Closes both tracks. The device keeps running and the playlist stays
    /// installed.
    pub fn stop(&mut self) -> Result<(), PlayerError> {
        info!("Stop");
        self.with_driver_stopped(|state, _| state.close_all())
    }

    /// Stops playback, releases the playlist and closes the device binding.
    pub fn shutdown(mut self) -> Result<(), PlayerError> {
        self.stop()?;
        self.driver.stop()?;
        self.context.lock().release_playlist();
        self.driver.close();
        info!("Playback engine shut down");
        Ok(())
    }

    fn with_driver_stopped<T>(
        &mut self,
        mutate: impl FnOnce(&mut PlaybackState, &RenderContext) -> T,
    ) -> Result<T, PlayerError> {
        self.driver.stop()?;
        let result = {
            let mut state = self.context.lock();
            mutate(&mut state, &self.context)
        };
        self.driver.start(&self.context)?;
        Ok(result)
    }
}

fn report_preload(state: &mut PlaybackState) {
    if let Some(e) = state.take_preload_failure() {
        warn!("Preload failed: {e}");
    } else if let Some(next) = state.tracks().next() {
        debug!("Preloaded: {}", display_name(next.path()));
    }
}
