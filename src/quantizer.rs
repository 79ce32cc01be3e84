//! Fixed-point DAC scale and sample quantization.
//!
//! The scale splits `[0, amplitude)` into `2^bits` bins of equal width. A
//! continuous sample maps to the index of the bin containing it, with the
//! single top edge (`value == amplitude`) folded back into the last bin.

/// Integer quantization level. Signed because values below zero are not
/// rejected and floor to negative codes.
pub type Code = i64;

/// Widest DAC that still fits its codes in a native signed 32-bit integer
pub const MAX_BIT_WIDTH: u32 = 31;

/// Derived scale metadata for an N-bit DAC spanning `amplitude`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DacScale {
    amplitude: f64,
    bit_width: u32,
    max_code_count: u32,
    bin_width: f64,
}

impl DacScale {
    /// Build the scale for a DAC of `bit_width` bits covering `amplitude`.
    ///
    /// # Arguments
    /// * `amplitude` - Full-scale amplitude (positive)
    /// * `bit_width` - DAC resolution (1..=31)
    pub fn new(amplitude: f64, bit_width: u32) -> Self {
        debug_assert!(
            (1..=MAX_BIT_WIDTH).contains(&bit_width),
            "bit_width must be in 1..={}",
            MAX_BIT_WIDTH
        );
        let max_code_count = 1u32 << bit_width;
        Self {
            amplitude,
            bit_width,
            max_code_count,
            bin_width: amplitude / max_code_count as f64,
        }
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn bit_width(&self) -> u32 {
        self.bit_width
    }

    /// Number of representable codes (`2^bit_width`)
    pub fn max_code_count(&self) -> u32 {
        self.max_code_count
    }

    /// Highest valid code (`2^bit_width - 1`)
    pub fn max_code(&self) -> Code {
        self.max_code_count as Code - 1
    }

    /// Amplitude span of one code step
    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    /// Quantize one continuous sample onto this scale.
    #[inline]
    pub fn quantize(&self, value: f64) -> Code {
        quantize(value, self.bin_width, self.bit_width)
    }

    /// Quantize a whole sequence of samples.
    pub fn quantize_all(&self, values: &[f64]) -> Vec<Code> {
        values.iter().map(|&value| self.quantize(value)).collect()
    }

    /// Code to lower-bound amplitude table for this scale.
    pub fn table(&self) -> ScaleTable {
        ScaleTable { scale: *self }
    }
}

/// Map `value` to `floor(value / bin_width)`.
///
/// A result equal to `2^bit_width` (only reachable at the exact top edge) is
/// clamped to `2^bit_width - 1`. Nothing else is clamped: negative inputs
/// produce negative codes.
#[inline]
pub fn quantize(value: f64, bin_width: f64, bit_width: u32) -> Code {
    let max_code_count: Code = 1 << bit_width;
    let code = (value / bin_width).floor() as Code;
    if code == max_code_count {
        max_code_count - 1
    } else {
        code
    }
}

/// One row of the scale table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleEntry {
    pub code: Code,
    pub lower_bound: f64,
}

/// Ascending table of code lower bounds.
///
/// Entries are computed on demand as `code * bin_width`, the same bin width
/// [`quantize`] divides by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleTable {
    scale: DacScale,
}

impl ScaleTable {
    pub fn len(&self) -> usize {
        self.scale.max_code_count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, code: Code) -> Option<ScaleEntry> {
        if (0..self.scale.max_code_count as Code).contains(&code) {
            Some(ScaleEntry {
                code,
                lower_bound: code as f64 * self.scale.bin_width,
            })
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = ScaleEntry> + '_ {
        let bin_width = self.scale.bin_width;
        (0..self.scale.max_code_count as Code).map(move |code| ScaleEntry {
            code,
            lower_bound: code as f64 * bin_width,
        })
    }
}
