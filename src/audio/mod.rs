#[cfg(feature = "native")]
mod cpal_backend;
#[cfg(feature = "native")]
pub use self::cpal_backend::{
    list_output_devices, negotiate_buffer_frames, AudioError, CpalBackend,
};

use crate::synth::config::SynthConfig;
use crate::synth::engine::CHANNELS;
use std::fmt;

/// Output stream parameters: interleaved stereo, signed 16-bit samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub channels: u16,
    pub buffer_frames: u32,
}

impl AudioFormat {
    pub fn requested(config: &SynthConfig) -> Self {
        Self {
            sample_rate: config.sample_rate,
            channels: CHANNELS as u16,
            buffer_frames: config.buffer_frames,
        }
    }

    /// Length of one buffer in the format's sample rate.
    pub fn buffer_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(
            f64::from(self.buffer_frames) / f64::from(self.sample_rate),
        )
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Hz, {} ch, s16, {} frames",
            self.sample_rate, self.channels, self.buffer_frames
        )
    }
}

#[cfg(feature = "native")]
pub trait AudioBackend {
    /// Opens the device and starts pulling audio from the engine. Returns the
    /// format that was actually negotiated.
    fn start(&mut self) -> Result<AudioFormat, AudioError>;
    fn stop(&mut self) -> Result<(), AudioError>;
}
