/// Interleaved `f32` PCM layout shared by the output device and every decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamFormat {
    pub channels: u16,
    pub sample_rate: u32,
}

impl StreamFormat {
    pub const fn new(channels: u16, sample_rate: u32) -> Self {
        Self {
            channels,
            sample_rate,
        }
    }

    /// Number of whole frames that fit in `samples` interleaved samples.
    pub fn frames_in(&self, samples: usize) -> usize {
        samples / self.channels.max(1) as usize
    }

    pub fn samples_for(&self, frames: usize) -> usize {
        frames * self.channels as usize
    }
}

impl Default for StreamFormat {
    fn default() -> Self {
        Self::new(2, 48_000)
    }
}

pub fn fill_silence(out: &mut [f32]) {
    out.fill(0.0);
}
