//! Parameters to look-up table: sample the waveform, then quantize it.

use crate::config::Params;
use crate::gen::sampler;
use crate::gen::waveform::Waveform;
use crate::quantizer::{Code, DacScale, ScaleTable};

/// A continuous sample and the DAC code it quantizes to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub value: f64,
    pub code: Code,
}

/// Result of one generation run.
#[derive(Debug, Clone)]
pub struct Lut {
    params: Params,
    waveform: Waveform,
    scale: DacScale,
    samples: Vec<Sample>,
}

impl Lut {
    /// Sample and quantize one period of the configured waveform.
    ///
    /// `params` are expected to have passed [`Params::validate`].
    pub fn generate(params: &Params) -> Self {
        let waveform = params.waveform();
        let scale = params.scale();

        let values = sampler::sample(waveform, params.amplitude, params.samples);
        let codes = scale.quantize_all(&values);
        let samples = values
            .into_iter()
            .zip(codes)
            .map(|(value, code)| Sample { value, code })
            .collect();

        Self {
            params: params.clone(),
            waveform,
            scale,
            samples,
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Waveform actually sampled, after the name fallback
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn scale(&self) -> &DacScale {
        &self.scale
    }

    pub fn scale_table(&self) -> ScaleTable {
        self.scale.table()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Quantized codes in sample order
    pub fn codes(&self) -> Vec<Code> {
        self.samples.iter().map(|s| s.code).collect()
    }
}
