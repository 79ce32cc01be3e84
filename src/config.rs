//! Run parameters and the `key = value` configuration file that sets them.
//!
//! Only four keys are recognised:
//! ```text
//! signal_amplitude = 3.3
//! signal_samples   = 64
//! signal_type      = sine
//! dac_bit_size     = 12
//! ```
//! Keys that are absent keep their defaults. Any other key aborts the run.
//! Blank lines and `#` comments are ignored.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use crate::gen::waveform::Waveform;
use crate::quantizer::{DacScale, MAX_BIT_WIDTH};

/// Configuration file read when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "config.conf";

/// Largest sample count, the range of a native signed 32-bit integer
pub const MAX_SAMPLES: usize = i32::MAX as usize;

pub const KEY_AMPLITUDE: &str = "signal_amplitude";
pub const KEY_SAMPLES: &str = "signal_samples";
pub const KEY_WAVEFORM: &str = "signal_type";
pub const KEY_BIT_WIDTH: &str = "dac_bit_size";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A key outside the four recognised ones
    UnknownKey { key: String, file: String },
    /// A numeric key whose value does not parse
    InvalidNumber {
        key: String,
        value: String,
        file: String,
        line: usize,
    },
    /// A non-blank line without `=`
    MalformedLine { line: usize, file: String },
    /// A parsed value that cannot drive the pipeline
    InvalidValue { key: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKey { key, file } => {
                write!(f, "Key \"{}\" unknown in config file \"{}\"", key, file)
            }
            Self::InvalidNumber {
                key,
                value,
                file,
                line,
            } => write!(
                f,
                "{}:{}: expected a number for {}, got '{}'",
                file, line, key, value
            ),
            Self::MalformedLine { line, file } => {
                write!(f, "{}:{}: expected 'key = value'", file, line)
            }
            Self::InvalidValue { key, reason } => write!(f, "invalid {}: {}", key, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Resolved parameters of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    /// Full-scale amplitude of the sampled signal
    pub amplitude: f64,
    /// Number of samples over one period (2..=MAX_SAMPLES)
    pub samples: usize,
    /// DAC resolution in bits (1..=31)
    pub bit_width: u32,
    /// Waveform name as written in the configuration; unknown names sample a line
    pub waveform_name: String,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            samples: 100,
            bit_width: 8,
            waveform_name: String::new(),
        }
    }
}

impl Params {
    /// Parse configuration text on top of the defaults.
    ///
    /// `file` only labels error messages.
    pub fn parse(source: &str, file: &str) -> Result<Self, ConfigError> {
        let mut params = Self::default();

        for (line_index, raw_line) in source.lines().enumerate() {
            let line_number = line_index + 1;
            let line = strip_comment(raw_line).trim();
            if line.is_empty() {
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| ConfigError::MalformedLine {
                line: line_number,
                file: file.to_string(),
            })?;
            let key = key.trim();
            let value = value.trim();

            match key {
                KEY_AMPLITUDE => params.amplitude = parse_number(key, value, file, line_number)?,
                KEY_SAMPLES => params.samples = parse_number(key, value, file, line_number)?,
                KEY_WAVEFORM => params.waveform_name = value.to_string(),
                KEY_BIT_WIDTH => params.bit_width = parse_number(key, value, file, line_number)?,
                other => {
                    return Err(ConfigError::UnknownKey {
                        key: other.to_string(),
                        file: file.to_string(),
                    });
                }
            }
        }

        Ok(params)
    }

    /// Reject parameters the pipeline cannot sample or quantize.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.amplitude.is_finite() || self.amplitude <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: KEY_AMPLITUDE.to_string(),
                reason: format!("must be a positive number, got {}", self.amplitude),
            });
        }
        if self.samples < 2 {
            return Err(ConfigError::InvalidValue {
                key: KEY_SAMPLES.to_string(),
                reason: format!("at least 2 samples are needed, got {}", self.samples),
            });
        }
        if self.samples > MAX_SAMPLES {
            return Err(ConfigError::InvalidValue {
                key: KEY_SAMPLES.to_string(),
                reason: format!(
                    "at most {} samples are supported, got {}",
                    MAX_SAMPLES, self.samples
                ),
            });
        }
        if !(1..=MAX_BIT_WIDTH).contains(&self.bit_width) {
            return Err(ConfigError::InvalidValue {
                key: KEY_BIT_WIDTH.to_string(),
                reason: format!(
                    "must be between 1 and {}, got {}",
                    MAX_BIT_WIDTH, self.bit_width
                ),
            });
        }
        Ok(())
    }

    /// Read, parse and validate the configuration file at `path`.
    ///
    /// A missing file is not an error: the defaults are used.
    pub fn load(path: &Path) -> Result<Self> {
        let file = path.display().to_string();
        let params = match fs::read_to_string(path) {
            Ok(source) => Self::parse(&source, &file)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::warn!("Config file \"{}\" not found, using defaults", file);
                Self::default()
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to read config file \"{}\"", file));
            }
        };
        params.validate()?;
        Ok(params)
    }

    /// Waveform selected by [`Params::waveform_name`]
    pub fn waveform(&self) -> Waveform {
        Waveform::from_name(&self.waveform_name)
    }

    pub fn scale(&self) -> DacScale {
        DacScale::new(self.amplitude, self.bit_width)
    }
}

fn strip_comment(line: &str) -> &str {
    line.split_once('#').map(|(head, _)| head).unwrap_or(line)
}

fn parse_number<T: std::str::FromStr>(
    key: &str,
    value: &str,
    file: &str,
    line: usize,
) -> Result<T, ConfigError> {
    value.parse::<T>().map_err(|_| ConfigError::InvalidNumber {
        key: key.to_string(),
        value: value.to_string(),
        file: file.to_string(),
        line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = Params::default();
        assert_eq!(params.amplitude, 1.0);
        assert_eq!(params.samples, 100);
        assert_eq!(params.bit_width, 8);
        assert_eq!(params.waveform_name, "");
        assert_eq!(params.waveform(), Waveform::Line);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_comment_and_blank_lines() {
        let src = "\n# only a comment\n   \nsignal_samples = 7 # trailing\n";
        let params = Params::parse(src, "test.conf").unwrap();
        assert_eq!(params.samples, 7);
    }

    #[test]
    fn test_later_key_wins() {
        let src = "dac_bit_size = 4\ndac_bit_size = 10\n";
        let params = Params::parse(src, "test.conf").unwrap();
        assert_eq!(params.bit_width, 10);
    }

    #[test]
    fn test_spacing_around_equals_is_optional() {
        let params = Params::parse("signal_amplitude=2.5", "test.conf").unwrap();
        assert_eq!(params.amplitude, 2.5);
    }

    #[test]
    fn test_missing_equals_is_malformed() {
        let err = Params::parse("signal_samples 10", "test.conf").unwrap_err();
        assert_eq!(
            err,
            ConfigError::MalformedLine {
                line: 1,
                file: "test.conf".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_key_message_names_key_and_file() {
        let err = Params::parse("volume = 3", "config.conf").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Key \"volume\" unknown in config file \"config.conf\""
        );
    }
}
