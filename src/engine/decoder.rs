//! Track decoding.
//!
//! A decoder is a pull source of interleaved `f32` frames already conformed to
//! the output format. Closing a decoder is dropping it, so a handle can only
//! ever be closed once.

use rodio::source::UniformSourceIterator;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::error::OpenError;
use super::format::StreamFormat;

pub trait TrackDecoder: Send {
    /// Reads up to `frame_count` frames into `out`, returning the number of
    /// whole frames written. Anything short of `frame_count` means the stream
    /// has ended.
    fn read_frames(&mut self, out: &mut [f32], frame_count: usize) -> usize;
}

pub trait DecoderFactory: Send + Sync {
    fn open(&self, path: &Path, format: StreamFormat) -> Result<Box<dyn TrackDecoder>, OpenError>;
}

/// Opens files with rodio's decoder (symphonia, hound, claxon, lewton backends).
#[derive(Debug, Default, Clone, Copy)]
pub struct RodioDecoderFactory;

impl DecoderFactory for RodioDecoderFactory {
    fn open(&self, path: &Path, format: StreamFormat) -> Result<Box<dyn TrackDecoder>, OpenError> {
        let file = File::open(path).map_err(|e| OpenError::new(path, e))?;
        let decoder =
            rodio::Decoder::new(BufReader::new(file)).map_err(|e| OpenError::new(path, e))?;
        let samples = UniformSourceIterator::new(decoder, format.channels, format.sample_rate);

        Ok(Box::new(RodioTrack {
            samples,
            channels: format.channels.max(1) as usize,
            finished: false,
        }))
    }
}

struct RodioTrack {
    samples: UniformSourceIterator<rodio::Decoder<BufReader<File>>>,
    channels: usize,
    finished: bool,
}

impl TrackDecoder for RodioTrack {
    fn read_frames(&mut self, out: &mut [f32], frame_count: usize) -> usize {
        if self.finished {
            return 0;
        }

        let frames = frame_count.min(out.len() / self.channels);
        for (index, frame) in out.chunks_exact_mut(self.channels).take(frames).enumerate() {
            for sample in frame.iter_mut() {
                match self.samples.next() {
                    Some(value) => *sample = value,
                    None => {
                        // A partial trailing frame is dropped.
                        self.finished = true;
                        return index;
                    }
                }
            }
        }
        frames
    }
}
