use crate::synth::note::{NoteSource, SynthCommand};
use crate::synth::voice::OctaveShift;
use device_query::{DeviceQuery, DeviceState, Keycode};
use std::collections::HashSet;
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

/// Two rows of the computer keyboard laid out like piano keys. Each key plays
/// its base note shifted up by the current octave.
///
/// The lower row spans notes 12..=26 and the upper row 24..=40, so notes
/// 24, 25 and 26 can be played from either row.
pub const NOTE_KEYS: [(Keycode, i32); 32] = [
    // Lower row
    (Keycode::Z, 12),
    (Keycode::S, 13),
    (Keycode::X, 14),
    (Keycode::D, 15),
    (Keycode::C, 16),
    (Keycode::V, 17),
    (Keycode::G, 18),
    (Keycode::B, 19),
    (Keycode::H, 20),
    (Keycode::N, 21),
    (Keycode::J, 22),
    (Keycode::M, 23),
    (Keycode::Comma, 24),
    (Keycode::L, 25),
    (Keycode::Dot, 26),
    // Upper row
    (Keycode::Q, 24),
    (Keycode::Key2, 25),
    (Keycode::W, 26),
    (Keycode::Key3, 27),
    (Keycode::E, 28),
    (Keycode::R, 29),
    (Keycode::Key5, 30),
    (Keycode::T, 31),
    (Keycode::Key6, 32),
    (Keycode::Y, 33),
    (Keycode::Key7, 34),
    (Keycode::U, 35),
    (Keycode::I, 36),
    (Keycode::Key9, 37),
    (Keycode::O, 38),
    (Keycode::Key0, 39),
    (Keycode::P, 40),
];

/// Base note (octave 0) played by a note key.
pub fn base_note(key: Keycode) -> Option<i32> {
    NOTE_KEYS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|&(_, note)| note)
}

/// Command sent when `key` goes down, if the key does anything.
pub fn key_down_command(key: Keycode) -> Option<SynthCommand> {
    match key {
        Keycode::Equal | Keycode::NumpadAdd => Some(SynthCommand::Octave(OctaveShift::Up)),
        Keycode::Minus | Keycode::NumpadSubtract => Some(SynthCommand::Octave(OctaveShift::Down)),
        Keycode::Escape => Some(SynthCommand::Quit),
        _ => base_note(key).map(|base_note| SynthCommand::Key {
            base_note,
            source: NoteSource::Keyboard,
        }),
    }
}

/// Keys that are not notes, in the order their commands are sent.
const CONTROL_KEYS: [Keycode; 5] = [
    Keycode::Equal,
    Keycode::NumpadAdd,
    Keycode::Minus,
    Keycode::NumpadSubtract,
    Keycode::Escape,
];

/// Commands for every key that went down or up between two polls.
///
/// Control keys come first, then note keys in [`NOTE_KEYS`] order, then one
/// release per note key let go. When several note keys go down in the same
/// poll, the last one in table order is the note left playing.
pub fn key_transitions(
    previous: &HashSet<Keycode>,
    current: &HashSet<Keycode>,
) -> Vec<SynthCommand> {
    let pressed = CONTROL_KEYS
        .iter()
        .chain(NOTE_KEYS.iter().map(|(key, _)| key))
        .filter(|key| current.contains(*key) && !previous.contains(*key))
        .filter_map(|key| key_down_command(*key));
    let released = NOTE_KEYS
        .iter()
        .filter(|(key, _)| previous.contains(key) && !current.contains(key))
        .map(|_| SynthCommand::Release {
            source: NoteSource::Keyboard,
        });
    pressed.chain(released).collect()
}

/// Polls the keyboard and turns key transitions into [`SynthCommand`]s.
pub struct KeyboardHandler {
    device_state: DeviceState,
    pressed: HashSet<Keycode>,
    command_sender: Sender<SynthCommand>,
}

impl KeyboardHandler {
    pub fn new(command_sender: Sender<SynthCommand>) -> Self {
        Self {
            device_state: DeviceState::new(),
            pressed: HashSet::new(),
            command_sender,
        }
    }

    pub fn update(&mut self) {
        let keys: HashSet<Keycode> = self.device_state.get_keys().into_iter().collect();

        for command in key_transitions(&self.pressed, &keys) {
            debug!(?command, "Key transition");
            self.send(command);
        }

        self.pressed = keys;
    }

    fn send(&self, command: SynthCommand) {
        if let Err(e) = self.command_sender.send(command) {
            warn!("Error sending keyboard command: {}", e);
        }
    }
}
