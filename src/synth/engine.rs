use super::config::SynthConfig;
use super::oscillator::Oscillator;
use super::pitch::pitch;
use super::voice::VoiceState;
use super::wavetable::Wavetable;
use crate::error::SynthError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Interleaved output channels. Both carry the same signal.
pub const CHANNELS: usize = 2;
pub const BYTES_PER_SAMPLE: usize = std::mem::size_of::<i16>();
pub const BYTES_PER_FRAME: usize = CHANNELS * BYTES_PER_SAMPLE;
/// Frames rendered per oscillator call.
pub const CHUNK_FRAMES: usize = 64;

/// The real-time half of the synthesizer.
///
/// Owns the wavetable and the oscillator phase; nothing else advances the
/// phase. Reads the shared [`VoiceState`] once per buffer and the shutdown
/// flag before rendering. None of the render methods allocate, lock, or
/// block, so they are safe to call from an audio callback (except
/// [`SynthEngine::produce`], which returns an owned buffer).
pub struct SynthEngine {
    wavetable: Wavetable,
    oscillator: Oscillator,
    voice: Arc<VoiceState>,
    shutdown: Arc<AtomicBool>,
    sample_rate: f64,
}

impl SynthEngine {
    /// Builds the wavetable and an oscillator at phase zero.
    pub fn new(
        config: &SynthConfig,
        voice: Arc<VoiceState>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<Self, SynthError> {
        let wavetable = Wavetable::sine(config.table_length)?;
        Ok(Self::with_wavetable(
            wavetable,
            config.sample_rate,
            voice,
            shutdown,
        ))
    }

    pub fn with_wavetable(
        wavetable: Wavetable,
        sample_rate: u32,
        voice: Arc<VoiceState>,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        let oscillator = Oscillator::new(wavetable.len());
        Self {
            wavetable,
            oscillator,
            voice,
            shutdown,
            sample_rate: f64::from(sample_rate),
        }
    }

    pub fn phase(&self) -> f64 {
        self.oscillator.phase()
    }

    pub fn wavetable(&self) -> &Wavetable {
        &self.wavetable
    }

    /// Per-frame phase increment for the current note, or `None` when the
    /// synth should stay silent for this buffer.
    fn buffer_increment(&self) -> Option<f64> {
        if self.shutdown.load(Ordering::Acquire) {
            return None;
        }
        let note = self.voice.note();
        if note <= 0 {
            return None;
        }
        Some(Oscillator::phase_increment(
            pitch(note),
            self.sample_rate,
            self.wavetable.len(),
        ))
    }

    /// Fills an interleaved stereo buffer.
    ///
    /// The buffer is zeroed first. While shutting down, or while no note is
    /// playing, it stays silent and the phase does not move. The note is
    /// read once, so a change made during the call applies from the next
    /// buffer on.
    pub fn render(&mut self, output: &mut [i16]) {
        output.fill(0);
        let Some(increment) = self.buffer_increment() else {
            return;
        };
        for chunk in output.chunks_mut(CHUNK_FRAMES * CHANNELS) {
            self.oscillator.fill(&self.wavetable, increment, chunk);
        }
    }

    /// Fills a byte buffer of interleaved signed 16-bit little-endian stereo
    /// frames, with the same rules as [`SynthEngine::render`]. Trailing bytes
    /// that do not make up a whole frame stay zero.
    pub fn render_bytes(&mut self, output: &mut [u8]) {
        output.fill(0);
        let Some(increment) = self.buffer_increment() else {
            return;
        };
        for chunk in output.chunks_mut(CHUNK_FRAMES * BYTES_PER_FRAME) {
            for frame in chunk.chunks_exact_mut(BYTES_PER_FRAME) {
                if let Some(sample) = self.oscillator.next_sample(&self.wavetable, increment) {
                    let bytes = sample.to_le_bytes();
                    frame[..BYTES_PER_SAMPLE].copy_from_slice(&bytes);
                    frame[BYTES_PER_SAMPLE..].copy_from_slice(&bytes);
                }
            }
        }
    }

    /// Pull interface for hosts without a callback: renders `frames` stereo
    /// frames into a new buffer.
    pub fn produce(&mut self, frames: usize) -> Vec<[i16; CHANNELS]> {
        let mut interleaved = vec![0i16; frames * CHANNELS];
        self.render(&mut interleaved);
        interleaved
            .chunks_exact(CHANNELS)
            .map(|frame| [frame[0], frame[1]])
            .collect()
    }
}
