//! A real-time wavetable synthesizer.
//!
//! A single sine oscillator is pulled by the audio device one buffer at a
//! time ([`synth::SynthEngine`]), while an input loop picks the note it plays
//! ([`synth::VoiceState`]).

pub mod audio;
pub mod error;
#[cfg(feature = "native")]
pub mod input;
pub mod runtime;
pub mod synth;

pub use error::{ConfigError, SynthError};
