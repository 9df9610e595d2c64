use std::collections::TryReserveError;
use std::path::PathBuf;

#[cfg(feature = "native")]
use crate::audio::AudioError;

/// Errors that stop the synthesizer from starting.
///
/// Everything past startup is handled in place: the audio path has no way to
/// report an error, and a failed audio device only leaves the synth silent.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    #[error("wavetable length must be greater than zero (got {0})")]
    InvalidTableLength(usize),
    #[error("failed to allocate a wavetable of {length} samples")]
    TableAllocation {
        length: usize,
        #[source]
        source: TryReserveError,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[cfg(feature = "native")]
    #[error(transparent)]
    Audio(#[from] AudioError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
