use super::wavetable::Wavetable;

/// Output gain applied to every table sample to leave headroom.
pub const ATTENUATION: f64 = 0.3;

/// Scales a table sample by [`ATTENUATION`], truncating toward zero.
#[inline]
pub fn attenuate(sample: i16) -> i16 {
    (f64::from(sample) * ATTENUATION) as i16
}

/// Phase accumulator reading through a wavetable.
///
/// The phase is a fractional table position in `[0, table_length)`. It only
/// moves forward, one step per output frame, and wraps by a single
/// subtraction of the table length. It is never reset: when no note is
/// playing the owner simply stops advancing it, and playback later resumes
/// from the same position.
#[derive(Debug, Clone)]
pub struct Oscillator {
    phase: f64,
    table_length: f64,
}

impl Oscillator {
    pub fn new(table_length: usize) -> Self {
        Self {
            phase: 0.0,
            table_length: table_length as f64,
        }
    }

    /// Table positions to advance per output frame for `frequency` Hz.
    pub fn phase_increment(frequency: f64, sample_rate: f64, table_length: usize) -> f64 {
        (frequency / sample_rate) * table_length as f64
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Moves the phase forward by `increment` and wraps it once at the table
    /// length. Increments larger than the table length are not folded back
    /// fully; see [`Oscillator::index`].
    #[inline]
    pub fn advance(&mut self, increment: f64) -> f64 {
        self.phase += increment;
        if self.phase >= self.table_length {
            self.phase -= self.table_length;
        }
        self.phase
    }

    /// Integer table index for the current phase, if it lies in the table.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        let index = self.phase.floor();
        if index >= 0.0 && index < self.table_length {
            Some(index as usize)
        } else {
            None
        }
    }

    /// Advances one frame and returns the attenuated sample for it. Returns
    /// `None` when the phase fell outside the table, in which case nothing
    /// should be written for the frame.
    #[inline]
    pub fn next_sample(&mut self, table: &Wavetable, increment: f64) -> Option<i16> {
        self.advance(increment);
        self.index()
            .and_then(|index| table.get(index))
            .map(attenuate)
    }

    /// Fills interleaved stereo frames, writing the same sample to the left
    /// and right channel. Frames are visited strictly in order. A trailing
    /// half frame is left untouched.
    pub fn fill(&mut self, table: &Wavetable, increment: f64, frames: &mut [i16]) {
        for frame in frames.chunks_exact_mut(2) {
            if let Some(sample) = self.next_sample(table, increment) {
                frame[0] = sample;
                frame[1] = sample;
            }
        }
    }
}
