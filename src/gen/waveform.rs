//! Catalog of periodic waveforms on a normalized phase domain.
//!
//! Every waveform maps a phase in `[0, 1)` onto roughly `[0, 1]`; amplitude
//! scaling happens in the sampler.

use std::f64::consts::PI;

/// Carrier frequency multiplier of the amplitude-modulated waveform
const AM_CARRIER_RATIO: f64 = 25.0;
/// Modulation depth of the amplitude-modulated waveform
const AM_MODULATION_DEPTH: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Line,
    Sine,
    Cosine,
    Square,
    Triangle,
    Am,
}

impl Waveform {
    pub const ALL: [Waveform; 6] = [
        Waveform::Line,
        Waveform::Sine,
        Waveform::Cosine,
        Waveform::Square,
        Waveform::Triangle,
        Waveform::Am,
    ];

    /// Select a waveform by its configuration name.
    ///
    /// Matching is exact and case-sensitive. Unknown names, including the
    /// empty string, fall back to [`Waveform::Line`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "line" => Waveform::Line,
            "sine" => Waveform::Sine,
            "cosine" => Waveform::Cosine,
            "square" => Waveform::Square,
            "triangle" => Waveform::Triangle,
            "am" => Waveform::Am,
            _ => Waveform::Line,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Line => "line",
            Waveform::Sine => "sine",
            Waveform::Cosine => "cosine",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
            Waveform::Am => "am",
        }
    }

    /// Evaluate the waveform at `phase`.
    ///
    /// Inputs outside `[0, 1)` are not rejected; the formulas are simply
    /// applied as written.
    #[inline]
    pub fn evaluate(&self, phase: f64) -> f64 {
        match self {
            Waveform::Line => phase,
            Waveform::Sine => 0.5 * (1.0 + (2.0 * PI * phase).sin()),
            Waveform::Cosine => 0.5 * (1.0 + (2.0 * PI * phase).cos()),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            Waveform::Triangle => {
                if phase < 0.25 {
                    0.5 + 2.0 * phase
                } else if phase < 0.75 {
                    1.0 - 2.0 * (phase - 0.25)
                } else {
                    2.0 * (phase - 0.75)
                }
            }
            Waveform::Am => {
                let carrier = (AM_CARRIER_RATIO * 2.0 * PI * phase).sin();
                let envelope = 1.0 + AM_MODULATION_DEPTH * (2.0 * PI * phase).sin();
                0.5 + carrier * envelope / (1.0 + AM_MODULATION_DEPTH) * 0.5
            }
        }
    }
}
