use crate::synth::note::note_name;
use crate::synth::voice::{OctaveShift, VoiceState};
use crate::synth::{SynthConfig, SynthEngine};
use js_sys::Int16Array;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use wasm_bindgen::prelude::*;

/// WASM Synth runtime (no threads, no channels, direct API)
#[wasm_bindgen]
pub struct WasmSynth {
    engine: SynthEngine,
    voice: Arc<VoiceState>,
    temp_buffer: Vec<i16>,
}

#[wasm_bindgen]
impl WasmSynth {
    #[wasm_bindgen(constructor)]
    pub fn new(sample_rate: u32) -> Result<WasmSynth, JsError> {
        let config = SynthConfig {
            sample_rate,
            ..SynthConfig::default()
        };
        config.validate()?;
        let voice = Arc::new(VoiceState::new(
            config.initial_note,
            config.initial_octave,
            config.min_note,
            config.max_note,
        ));
        let engine = SynthEngine::new(&config, voice.clone(), Arc::new(AtomicBool::new(false)))?;
        Ok(WasmSynth {
            engine,
            voice,
            temp_buffer: Vec::new(),
        })
    }

    /// Render `frames` interleaved stereo frames into an Int16Array
    #[wasm_bindgen]
    pub fn render(&mut self, frames: usize) -> Int16Array {
        let length = frames * 2;
        if self.temp_buffer.len() != length {
            self.temp_buffer = vec![0; length];
        }
        self.engine.render(&mut self.temp_buffer);
        Int16Array::from(self.temp_buffer.as_slice())
    }

    #[wasm_bindgen]
    pub fn play_key(&mut self, base_note: i32) -> i32 {
        self.voice.play_key(base_note)
    }

    #[wasm_bindgen]
    pub fn set_note(&mut self, note: i32) -> i32 {
        self.voice.set_note(note)
    }

    #[wasm_bindgen]
    pub fn mute(&mut self) {
        self.voice.mute();
    }

    #[wasm_bindgen]
    pub fn octave_up(&mut self) -> i32 {
        self.voice.shift_octave(OctaveShift::Up)
    }

    #[wasm_bindgen]
    pub fn octave_down(&mut self) -> i32 {
        self.voice.shift_octave(OctaveShift::Down)
    }

    #[wasm_bindgen]
    pub fn note_name(&self) -> String {
        note_name(self.voice.note())
    }
}
