use super::voice::{OctaveShift, DEFAULT_MAX_NOTE, DEFAULT_MIN_NOTE, NOTES_PER_OCTAVE};
use std::fmt;

/// Offset between a MIDI note number and the synth's note index
/// (MIDI 69 is A4, which is note 57 here).
pub const MIDI_NOTE_OFFSET: i32 = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteSource {
    Keyboard,
    Midi,
}

/// Discrete commands the input side sends to the synth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SynthCommand {
    /// Play a key's base note shifted up by the current octave.
    Key { base_note: i32, source: NoteSource },
    /// Play an absolute note index.
    Note { note: i32, source: NoteSource },
    /// A key or note was released. There is no release stage, so this has
    /// no effect on the sound.
    Release { source: NoteSource },
    Octave(OctaveShift),
    Quit,
}

impl SynthCommand {
    /// Converts a MIDI note-on into a note command.
    pub fn from_midi_note(midi_note: u8) -> Self {
        SynthCommand::Note {
            note: i32::from(midi_note) - MIDI_NOTE_OFFSET,
            source: NoteSource::Midi,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Pitch class for a half-step position in the octave (0 = C).
    pub fn from_semitone(semitone: i32) -> Self {
        Self::ALL[semitone.rem_euclid(NOTES_PER_OCTAVE) as usize]
    }

    pub fn letter(self) -> char {
        match self {
            PitchClass::C | PitchClass::CSharp => 'C',
            PitchClass::D | PitchClass::DSharp => 'D',
            PitchClass::E => 'E',
            PitchClass::F | PitchClass::FSharp => 'F',
            PitchClass::G | PitchClass::GSharp => 'G',
            PitchClass::A | PitchClass::ASharp => 'A',
            PitchClass::B => 'B',
        }
    }

    pub fn is_sharp(self) -> bool {
        matches!(
            self,
            PitchClass::CSharp
                | PitchClass::DSharp
                | PitchClass::FSharp
                | PitchClass::GSharp
                | PitchClass::ASharp
        )
    }
}

/// Human readable name of a note, e.g. `A-3` or `C#4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoteName {
    pub pitch_class: PitchClass,
    pub octave: i32,
}

impl NoteName {
    /// Names a note index. Note 12 is `C-0` and note 131 is `B-9`; anything
    /// outside that range has no name.
    pub fn from_note(note: i32) -> Option<Self> {
        if !(DEFAULT_MIN_NOTE..=DEFAULT_MAX_NOTE).contains(&note) {
            return None;
        }
        let relative = note - DEFAULT_MIN_NOTE;
        Some(Self {
            pitch_class: PitchClass::from_semitone(relative),
            octave: relative / NOTES_PER_OCTAVE,
        })
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.pitch_class.is_sharp() { '#' } else { '-' };
        write!(f, "{}{}{}", self.pitch_class.letter(), separator, self.octave)
    }
}

/// Name of a note for diagnostics, `"err"` when it has none.
pub fn note_name(note: i32) -> String {
    NoteName::from_note(note)
        .map(|name| name.to_string())
        .unwrap_or_else(|| "err".to_string())
}
