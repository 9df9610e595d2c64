/// Frequency ratio between two adjacent half-steps (the twelfth root of two).
pub const CHROMATIC_RATIO: f64 = 1.059_463_094_359_295_3;
/// Note index tuned to [`REFERENCE_PITCH`] (A4).
pub const REFERENCE_NOTE: i32 = 57;
pub const REFERENCE_PITCH: f64 = 440.0;

/// Equal-tempered frequency in Hz for a note index.
///
/// Defined for every integer. Notes outside the playable range give an
/// extrapolated frequency instead of an error; callers clamp notes before
/// they get here.
pub fn pitch(note: i32) -> f64 {
    REFERENCE_PITCH * CHROMATIC_RATIO.powi(note - REFERENCE_NOTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_twelfth_root_of_two() {
        assert!((CHROMATIC_RATIO.powi(12) - 2.0).abs() < 1e-12);
        assert!((CHROMATIC_RATIO - 2f64.powf(1.0 / 12.0)).abs() < 1e-15);
    }

    #[test]
    fn reference_note_is_exact() {
        assert_eq!(pitch(REFERENCE_NOTE), REFERENCE_PITCH);
    }

    #[test]
    fn extreme_notes_stay_finite() {
        assert!(pitch(-1000).is_finite());
        assert!(pitch(-1000) > 0.0);
        assert!(pitch(1000).is_finite());
    }
}
