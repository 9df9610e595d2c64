use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use wavesynth::synth::note::{note_name, NoteName, PitchClass};
use wavesynth::synth::voice::{OctaveShift, VoiceState, MAX_OCTAVE, MIN_OCTAVE};

#[test]
fn set_note_clamps_to_range() {
    let voice = VoiceState::default();
    assert_eq!(voice.set_note(5), 12);
    assert_eq!(voice.set_note(-3), 12);
    assert_eq!(voice.set_note(500), 131);
    assert_eq!(voice.set_note(64), 64);
    assert_eq!(voice.note(), 64);
}

#[test]
fn key_is_shifted_by_octave() {
    let voice = VoiceState::new(30, 3, 12, 131);
    assert_eq!(voice.play_key(12), 48);
    assert_eq!(voice.play_key(40), 76);
}

#[test]
fn octave_up_moves_note_with_it() {
    let voice = VoiceState::new(30, 2, 12, 131);
    assert_eq!(voice.shift_octave(OctaveShift::Up), 3);
    assert_eq!(voice.note(), 42);
    assert_eq!(voice.shift_octave(OctaveShift::Down), 2);
    assert_eq!(voice.note(), 30);
}

#[test]
fn octave_up_at_top_changes_nothing() {
    let voice = VoiceState::new(100, MAX_OCTAVE, 12, 131);
    assert_eq!(voice.shift_octave(OctaveShift::Up), MAX_OCTAVE);
    assert_eq!(voice.octave(), MAX_OCTAVE);
    assert_eq!(voice.note(), 100);
}

#[test]
fn octave_down_at_bottom_changes_nothing() {
    let voice = VoiceState::new(20, MIN_OCTAVE, 12, 131);
    assert_eq!(voice.shift_octave(OctaveShift::Down), MIN_OCTAVE);
    assert_eq!(voice.octave(), MIN_OCTAVE);
    assert_eq!(voice.note(), 20);
}

#[test]
fn octave_shift_clamps_note() {
    let voice = VoiceState::new(125, 5, 12, 131);
    assert_eq!(voice.shift_octave(OctaveShift::Up), 6);
    assert_eq!(voice.note(), 131);

    let voice = VoiceState::new(15, 1, 12, 131);
    assert_eq!(voice.shift_octave(OctaveShift::Down), 0);
    assert_eq!(voice.note(), 12);
}

#[test]
fn octave_is_clamped_on_construction() {
    assert_eq!(VoiceState::new(30, 9, 12, 131).octave(), MAX_OCTAVE);
    assert_eq!(VoiceState::new(30, -2, 12, 131).octave(), MIN_OCTAVE);
}

#[test]
fn reader_never_sees_an_invalid_note() {
    let voice = Arc::new(VoiceState::default());
    let done = Arc::new(AtomicBool::new(false));

    let reader = {
        let voice = voice.clone();
        let done = done.clone();
        thread::spawn(move || {
            let mut reads = 0u64;
            loop {
                let note = voice.note();
                assert!(note == 0 || (12..=131).contains(&note), "torn note {}", note);
                reads += 1;
                if done.load(Ordering::Acquire) {
                    return reads;
                }
            }
        })
    };

    for i in 0..100_000 {
        if i % 97 == 0 {
            voice.mute();
        } else {
            voice.set_note(12 + i % 120);
        }
    }
    done.store(true, Ordering::Release);
    assert!(reader.join().unwrap() > 0);
}

#[test]
fn swapped_bounds_are_ordered() {
    let voice = VoiceState::new(30, 2, 50, 40);
    assert_eq!(voice.min_note(), 40);
    assert_eq!(voice.max_note(), 50);
    assert_eq!(voice.note(), 40);
    assert_eq!(voice.set_note(99), 50);
    assert_eq!(voice.set_note(1), 40);
}

#[test]
fn note_names() {
    assert_eq!(note_name(57), "A-3");
    assert_eq!(note_name(60), "C-4");
    assert_eq!(note_name(58), "A#3");
    assert_eq!(note_name(12), "C-0");
    assert_eq!(note_name(131), "B-9");
}

#[test]
fn note_names_outside_range() {
    assert_eq!(note_name(11), "err");
    assert_eq!(note_name(132), "err");
    assert_eq!(note_name(0), "err");
    assert_eq!(NoteName::from_note(-5), None);
}

#[test]
fn pitch_class_repeats_every_octave() {
    for note in 12..=119 {
        let low = NoteName::from_note(note).unwrap();
        let high = NoteName::from_note(note + 12).unwrap();
        assert_eq!(low.pitch_class, high.pitch_class);
        assert_eq!(low.octave + 1, high.octave);
    }
    assert_eq!(NoteName::from_note(57).unwrap().pitch_class, PitchClass::A);
}
