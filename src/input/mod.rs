mod keyboard;
mod midi;
pub use self::keyboard::{base_note, key_down_command, key_transitions, KeyboardHandler, NOTE_KEYS};
pub use self::midi::{list_input_ports, midi_command, MidiError, MidiHandler};
