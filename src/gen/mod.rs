pub mod sampler;
pub mod waveform;

pub use self::sampler::*;
pub use self::waveform::*;
