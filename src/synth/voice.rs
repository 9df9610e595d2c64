use std::sync::atomic::{AtomicI32, Ordering};

pub const NOTES_PER_OCTAVE: i32 = 12;
pub const MIN_OCTAVE: i32 = 0;
pub const MAX_OCTAVE: i32 = 6;
pub const DEFAULT_MIN_NOTE: i32 = 12;
pub const DEFAULT_MAX_NOTE: i32 = 131;
pub const DEFAULT_NOTE: i32 = 30;
pub const DEFAULT_OCTAVE: i32 = 2;

/// Direction of an octave change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OctaveShift {
    Up,
    Down,
}

/// The note currently played by the single voice, and the octave note keys
/// are played in.
///
/// Written by the input side (one thread), read by the audio callback. Both
/// fields are atomics so the callback always sees a whole value and never
/// waits on the writer. The callback only ever reads `note`.
#[derive(Debug)]
pub struct VoiceState {
    note: AtomicI32,
    octave: AtomicI32,
    min_note: i32,
    max_note: i32,
}

impl VoiceState {
    /// Creates the state with the given starting note and octave.
    ///
    /// A starting note `<= 0` starts muted; anything else is clamped to
    /// `[min_note, max_note]`. Swapped bounds are put back in order. The
    /// octave is clamped to `[MIN_OCTAVE, MAX_OCTAVE]`.
    pub fn new(note: i32, octave: i32, min_note: i32, max_note: i32) -> Self {
        let (min_note, max_note) = (min_note.min(max_note), min_note.max(max_note));
        let note = if note <= 0 {
            0
        } else {
            note.clamp(min_note, max_note)
        };
        Self {
            note: AtomicI32::new(note),
            octave: AtomicI32::new(octave.clamp(MIN_OCTAVE, MAX_OCTAVE)),
            min_note,
            max_note,
        }
    }

    pub fn note(&self) -> i32 {
        // Single independent value, no other memory is published with it.
        self.note.load(Ordering::Relaxed)
    }

    pub fn octave(&self) -> i32 {
        self.octave.load(Ordering::Relaxed)
    }

    pub fn min_note(&self) -> i32 {
        self.min_note
    }

    pub fn max_note(&self) -> i32 {
        self.max_note
    }

    pub fn is_muted(&self) -> bool {
        self.note() <= 0
    }

    /// Sets the active note, clamped to `[min_note, max_note]`, and returns
    /// the stored value.
    pub fn set_note(&self, note: i32) -> i32 {
        let note = note.clamp(self.min_note, self.max_note);
        self.note.store(note, Ordering::Relaxed);
        note
    }

    /// Plays a key's base note shifted up by the current octave. Returns the
    /// stored note.
    pub fn play_key(&self, base_note: i32) -> i32 {
        self.set_note(base_note + self.octave() * NOTES_PER_OCTAVE)
    }

    /// Silences the voice. The oscillator keeps its phase.
    pub fn mute(&self) {
        self.note.store(0, Ordering::Relaxed);
    }

    /// Moves one octave up or down.
    ///
    /// When the octave is already at the boundary in that direction nothing
    /// changes. Otherwise the octave moves and the current note moves by
    /// twelve half-steps with it, clamped to the note range. Returns the
    /// resulting octave.
    pub fn shift_octave(&self, shift: OctaveShift) -> i32 {
        let octave = self.octave();
        let (next, step) = match shift {
            OctaveShift::Up => (octave + 1, NOTES_PER_OCTAVE),
            OctaveShift::Down => (octave - 1, -NOTES_PER_OCTAVE),
        };
        if !(MIN_OCTAVE..=MAX_OCTAVE).contains(&next) {
            return octave;
        }
        self.octave.store(next, Ordering::Relaxed);

        let note = self.note();
        if note > 0 {
            self.set_note(note + step);
        }
        next
    }
}

impl Default for VoiceState {
    fn default() -> Self {
        Self::new(
            DEFAULT_NOTE,
            DEFAULT_OCTAVE,
            DEFAULT_MIN_NOTE,
            DEFAULT_MAX_NOTE,
        )
    }
}
