//! Look-up table generator for N-bit DACs.
//!
//! Samples one period of a waveform, quantizes it onto a fixed-point scale
//! and renders the result as text tables plus a gnuplot script.

pub mod config;
pub mod gen;
pub mod lut;
pub mod quantizer;
pub mod render;
pub mod utils;

pub use config::{ConfigError, Params};
pub use gen::waveform::Waveform;
pub use lut::{Lut, Sample};
pub use quantizer::{Code, DacScale, ScaleTable};
pub use render::OutputFiles;
