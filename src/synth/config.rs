use super::voice::{
    DEFAULT_MAX_NOTE, DEFAULT_MIN_NOTE, DEFAULT_NOTE, DEFAULT_OCTAVE, MAX_OCTAVE, MIN_OCTAVE,
};
use super::wavetable::DEFAULT_TABLE_LENGTH;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
pub const DEFAULT_BUFFER_FRAMES: u32 = 4096;
pub const DEFAULT_FRAME_BUDGET_MS: u64 = 16;

/// Startup configuration for the synthesizer.
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SynthConfig {
    /// Requested output sample rate in Hz.
    pub sample_rate: u32,
    /// Requested buffer size in frames. Must be a power of two; the device
    /// may adjust it.
    pub buffer_frames: u32,
    /// Number of samples in the wavetable.
    pub table_length: usize,
    /// Note playing at startup. `<= 0` starts silent.
    pub initial_note: i32,
    pub initial_octave: i32,
    pub min_note: i32,
    pub max_note: i32,
    /// Time the event loop waits between input polls.
    pub frame_budget_ms: u64,
    /// Name of the output device, or the host default when unset.
    pub output_device: Option<String>,
    /// Index of the MIDI input port to open, if any.
    pub midi_port: Option<usize>,
}

impl SynthConfig {
    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn frame_budget(&self) -> Duration {
        Duration::from_millis(self.frame_budget_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::Invalid(
                "sample_rate must be greater than zero".to_string(),
            ));
        }
        if !self.buffer_frames.is_power_of_two() {
            return Err(ConfigError::Invalid(format!(
                "buffer_frames must be a power of two (got {})",
                self.buffer_frames
            )));
        }
        if self.table_length == 0 {
            return Err(ConfigError::Invalid(
                "table_length must be greater than zero".to_string(),
            ));
        }
        if self.min_note <= 0 || self.min_note > self.max_note {
            return Err(ConfigError::Invalid(format!(
                "note range [{}, {}] must be positive and ordered",
                self.min_note, self.max_note
            )));
        }
        if !(MIN_OCTAVE..=MAX_OCTAVE).contains(&self.initial_octave) {
            return Err(ConfigError::Invalid(format!(
                "initial_octave must be within [{}, {}] (got {})",
                MIN_OCTAVE, MAX_OCTAVE, self.initial_octave
            )));
        }
        Ok(())
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            buffer_frames: DEFAULT_BUFFER_FRAMES,
            table_length: DEFAULT_TABLE_LENGTH,
            initial_note: DEFAULT_NOTE,
            initial_octave: DEFAULT_OCTAVE,
            min_note: DEFAULT_MIN_NOTE,
            max_note: DEFAULT_MAX_NOTE,
            frame_budget_ms: DEFAULT_FRAME_BUDGET_MS,
            output_device: None,
            midi_port: None,
        }
    }
}
