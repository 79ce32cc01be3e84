use crate::gen::waveform::Waveform;

/// Phase of sample `index` in a run of `sample_count` samples.
///
/// Phases cover the closed interval `[0, 1]`, so the last sample lands on
/// phase 1. `sample_count` must be at least 2.
#[inline]
pub fn phase_at(index: usize, sample_count: usize) -> f64 {
    index as f64 / (sample_count - 1) as f64
}

/// Sample one period of `waveform` at `sample_count` evenly spaced phases,
/// scaled by `amplitude`.
pub fn sample(waveform: Waveform, amplitude: f64, sample_count: usize) -> Vec<f64> {
    debug_assert!(sample_count >= 2, "sample_count must be at least 2");

    (0..sample_count)
        .map(|i| amplitude * waveform.evaluate(phase_at(i, sample_count)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_produces_exact_count() {
        for waveform in Waveform::ALL {
            assert_eq!(sample(waveform, 1.0, 100).len(), 100);
            assert_eq!(sample(waveform, 1.0, 2).len(), 2);
        }
    }

    #[test]
    fn test_endpoints_hit_phase_zero_and_one() {
        for waveform in Waveform::ALL {
            let samples = sample(waveform, 2.5, 17);
            assert_eq!(samples[0], 2.5 * waveform.evaluate(0.0));
            assert_eq!(samples[16], 2.5 * waveform.evaluate(1.0));
        }
    }

    #[test]
    fn test_line_ramp() {
        let samples = sample(Waveform::Line, 1.0, 5);
        assert_eq!(samples, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_amplitude_scales_output() {
        let unit = sample(Waveform::Sine, 1.0, 32);
        let scaled = sample(Waveform::Sine, 3.0, 32);
        for (u, s) in unit.iter().zip(scaled.iter()) {
            assert!((u * 3.0 - s).abs() < 1e-12);
        }
    }
}
