pub mod config;
pub mod engine;
pub mod note;
pub mod oscillator;
pub mod pitch;
pub mod voice;
pub mod wavetable;

pub use config::SynthConfig;
pub use engine::SynthEngine;
pub use note::{note_name, NoteName, NoteSource, SynthCommand};
pub use voice::{OctaveShift, VoiceState};
pub use wavetable::Wavetable;
