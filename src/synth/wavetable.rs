use crate::error::SynthError;
use std::f64::consts::PI;
use std::ops::Index;

pub const DEFAULT_TABLE_LENGTH: usize = 1024;
/// Peak magnitude of a table sample.
pub const MAX_AMPLITUDE: i16 = i16::MAX;

/// A single cycle of a sine wave stored as signed 16-bit samples.
///
/// Built once before playback starts and never modified afterwards. Pitch is
/// produced by stepping through the table at different rates, see
/// [`Oscillator`](super::oscillator::Oscillator).
#[derive(Debug, Clone, PartialEq)]
pub struct Wavetable {
    samples: Box<[i16]>,
}

impl Wavetable {
    /// Builds a sine table of `length` samples where
    /// `sample[i] = round(sin(2π·i/length) · MAX_AMPLITUDE)`.
    pub fn sine(length: usize) -> Result<Self, SynthError> {
        if length == 0 {
            return Err(SynthError::InvalidTableLength(length));
        }

        let mut samples: Vec<i16> = Vec::new();
        samples
            .try_reserve_exact(length)
            .map_err(|source| SynthError::TableAllocation { length, source })?;

        let phase_increment = 2.0 * PI / length as f64;
        samples.extend((0..length).map(|i| {
            let value = (phase_increment * i as f64).sin() * f64::from(MAX_AMPLITUDE);
            value.round() as i16
        }));

        Ok(Self {
            samples: samples.into_boxed_slice(),
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the sample at `index`, or `None` when it lies outside the table.
    #[inline]
    pub fn get(&self, index: usize) -> Option<i16> {
        self.samples.get(index).copied()
    }

    pub fn as_slice(&self) -> &[i16] {
        &self.samples
    }
}

impl Index<usize> for Wavetable {
    type Output = i16;

    fn index(&self, index: usize) -> &i16 {
        &self.samples[index]
    }
}
