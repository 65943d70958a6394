//! Output device binding.
//!
//! The driver owns the periodic callback. `stop` must guarantee that no
//! callback is in flight once it returns; transport operations rely on it
//! before they touch the shared state.

use log::{error, info};
use rodio::cpal::{
    self,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use std::sync::Arc;

use super::error::DeviceError;
use super::format::StreamFormat;
use super::state::RenderContext;

pub trait OutputDriver {
    fn format(&self) -> StreamFormat;

    /// Starts (or resumes) periodic calls into `context.render`.
    fn start(&mut self, context: &Arc<RenderContext>) -> Result<(), DeviceError>;

    fn stop(&mut self) -> Result<(), DeviceError>;

    /// Tears the binding down. The driver is unusable afterwards.
    fn close(&mut self);
}

/// The default system output device, driven through cpal.
pub struct CpalOutput {
    device: cpal::Device,
    config: cpal::StreamConfig,
    stream: Option<cpal::Stream>,
}

impl CpalOutput {
    /// Opens the default output device. `sample_rate` and `channels`
    /// override the device's preferred configuration when set.
    pub fn open_default(
        sample_rate: Option<u32>,
        channels: Option<u16>,
    ) -> Result<Self, DeviceError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| DeviceError::new("no audio output device available"))?;

        let supported = device
            .default_output_config()
            .map_err(DeviceError::new)?;
        let mut config = supported.config();
        if let Some(rate) = sample_rate {
            config.sample_rate = cpal::SampleRate(rate);
        }
        if let Some(channels) = channels {
            config.channels = channels;
        }

        info!(
            "Output device: {} ({} Hz, {} channels, default format {:?})",
            device.name().unwrap_or_else(|_| "unknown".to_string()),
            config.sample_rate.0,
            config.channels,
            supported.sample_format()
        );

        Ok(Self {
            device,
            config,
            stream: None,
        })
    }
}

impl OutputDriver for CpalOutput {
    fn format(&self) -> StreamFormat {
        StreamFormat::new(self.config.channels, self.config.sample_rate.0)
    }

    fn start(&mut self, context: &Arc<RenderContext>) -> Result<(), DeviceError> {
        if self.stream.is_none() {
            let context = Arc::clone(context);
            let stream = self
                .device
                .build_output_stream(
                    &self.config,
                    move |data: &mut [f32], _: &cpal::OutputCallbackInfo| context.render(data),
                    |err| error!("Audio stream error: {err}"),
                    None,
                )
                .map_err(DeviceError::new)?;
            self.stream = Some(stream);
        }

        if let Some(stream) = &self.stream {
            stream.play().map_err(DeviceError::new)?;
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), DeviceError> {
        if let Some(stream) = &self.stream {
            stream.pause().map_err(DeviceError::new)?;
        }
        Ok(())
    }

    fn close(&mut self) {
        if self.stream.take().is_some() {
            info!("Output stream closed");
        }
    }
}
