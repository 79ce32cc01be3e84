//! Text outputs of a generation run.
//!
//! Four files are written into one output directory:
//! - `lut.scale`: code lower bounds, one `amplitude<TAB><TAB>code` row per code
//! - `lut.dat`: sampled signal, one `value<TAB><TAB>code` row per sample
//! - `lut.out`: parameters followed by the codes in decimal, hex and binary
//! - `lut.gp`: gnuplot script plotting `lut.dat` into `lut.png`

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::{KEY_AMPLITUDE, KEY_BIT_WIDTH, KEY_SAMPLES, KEY_WAVEFORM};
use crate::lut::Lut;
use crate::quantizer::{Code, ScaleTable};

pub const SCALE_FILE: &str = "lut.scale";
pub const DATA_FILE: &str = "lut.dat";
pub const SUMMARY_FILE: &str = "lut.out";
pub const GNUPLOT_FILE: &str = "lut.gp";
pub const IMAGE_FILE: &str = "lut.png";

/// Width of the key column in the parameter block
const KEY_COLUMN_WIDTH: usize = 16;

/// Write the scale table, one row per code in ascending order.
pub fn write_scale<W: Write>(out: &mut W, table: &ScaleTable) -> io::Result<()> {
    for entry in table.iter() {
        writeln!(out, "{:.6}\t\t{}", entry.lower_bound, entry.code)?;
    }
    Ok(())
}

/// Write every sample next to its code, in sample order.
pub fn write_samples<W: Write>(out: &mut W, lut: &Lut) -> io::Result<()> {
    for sample in lut.samples() {
        writeln!(out, "{}\t\t{}", sample.value, sample.code)?;
    }
    Ok(())
}

/// Write the parameter block and the look-up table arrays.
pub fn write_summary<W: Write>(out: &mut W, lut: &Lut) -> io::Result<()> {
    let params = lut.params();
    let scale = lut.scale();
    let codes = lut.codes();

    writeln!(out, "---- PARAMETERS ----")?;
    writeln!(out)?;
    write_parameter(out, KEY_AMPLITUDE, params.amplitude)?;
    write_parameter(out, KEY_SAMPLES, params.samples)?;
    write_parameter(out, KEY_WAVEFORM, &params.waveform_name)?;
    write_parameter(out, KEY_BIT_WIDTH, params.bit_width)?;
    write_parameter(out, "dac_bin_size", scale.max_code_count())?;
    write_parameter(out, "dac_bin_width", scale.bin_width())?;
    writeln!(out)?;

    writeln!(out, "---- LOOK UP TABLE ----")?;
    writeln!(out)?;
    writeln!(out, "---- DECIMAL")?;
    writeln!(out, "{}", format_array(codes.iter().map(|c| c.to_string())))?;
    writeln!(out)?;
    writeln!(out, "---- HEX")?;
    writeln!(out, "{}", format_array(codes.iter().map(|&c| format_hex(c))))?;
    writeln!(out)?;
    writeln!(out, "---- BINARY")?;
    writeln!(
        out,
        "{}",
        format_array(codes.iter().map(|&c| format_binary(c, scale.bit_width())))
    )?;
    Ok(())
}

fn write_parameter<W: Write, V: std::fmt::Display>(
    out: &mut W,
    key: &str,
    value: V,
) -> io::Result<()> {
    writeln!(out, "{:<width$} = {}", key, value, width = KEY_COLUMN_WIDTH)
}

/// Write a gnuplot script drawing the samples (top) and the codes (bottom).
///
/// `data_file` and `image_file` are written into the script verbatim, so
/// relative paths resolve against the directory gnuplot runs in.
pub fn write_gnuplot_script<W: Write>(
    out: &mut W,
    lut: &Lut,
    data_file: &str,
    image_file: &str,
) -> io::Result<()> {
    let amplitude = lut.scale().amplitude();
    let max_code_count = lut.scale().max_code_count() as f64;

    write!(
        out,
        r#"#!/usr/bin/gnuplot -persist
set term pngcairo size 900,600 enhanced font 'Verdana,10'
set output '{image}'
set style line 1 lc rgb '#77ac30' linetype 1 linewidth 2.5 # green line
set style line 2 lc rgb '#0072bd' pt 7 pointsize 0.5       # blue circles
set style line 102 lc rgb '#d6d7d9' lt 1 lw 1              # grid
set tics nomirror out scale 0.75
set nokey
set multiplot layout 2,1 title 'LUT GENERATOR'
set lmargin at screen 0.08
set xlabel 'samples'
set y2label 'amplitude scale'
set grid xtics ytics back ls 102
set yrange [{amp_low}:{amp_high}]
plot '{data}' u 1 w l ls 1
set y2label 'DAC scale'
set yrange [{code_low}:{code_high}]
plot '{data}' u 2 w p ls 2
"#,
        image = image_file,
        data = data_file,
        amp_low = -0.1 * amplitude,
        amp_high = amplitude * 1.1,
        code_low = -0.1 * max_code_count,
        code_high = 1.1 * max_code_count,
    )
}

/// `0x`-prefixed lowercase hex, no padding
pub fn format_hex(code: Code) -> String {
    format!("0x{:x}", code as i32)
}

/// Low `bit_width` bits of the 32-bit two's complement form of `code`,
/// zero padded to exactly `bit_width` digits.
pub fn format_binary(code: Code, bit_width: u32) -> String {
    let bits = format!("{:032b}", code as i32 as u32);
    let width = (bit_width as usize).min(bits.len());
    bits[bits.len() - width..].to_string()
}

fn format_array<I>(items: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let joined: Vec<String> = items.into_iter().collect();
    format!("{{ {} }}", joined.join(", "))
}

/// Paths of the four output files.
#[derive(Debug, Clone)]
pub struct OutputFiles {
    pub scale: PathBuf,
    pub data: PathBuf,
    pub summary: PathBuf,
    pub gnuplot: PathBuf,
}

impl OutputFiles {
    /// Standard file names inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            scale: dir.join(SCALE_FILE),
            data: dir.join(DATA_FILE),
            summary: dir.join(SUMMARY_FILE),
            gnuplot: dir.join(GNUPLOT_FILE),
        }
    }

    /// Write every output for `lut`. Any file that cannot be created or
    /// written aborts with the path in the error.
    pub fn write_all(&self, lut: &Lut) -> Result<()> {
        write_file(&self.scale, |out| write_scale(out, &lut.scale_table()))?;
        write_file(&self.data, |out| write_samples(out, lut))?;
        write_file(&self.summary, |out| write_summary(out, lut))?;
        // The script is run from the output directory, next to the data file
        write_file(&self.gnuplot, |out| {
            write_gnuplot_script(out, lut, DATA_FILE, IMAGE_FILE)
        })?;
        Ok(())
    }
}

fn write_file<F>(path: &Path, render: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file \"{}\"", path.display()))?;
    let mut out = BufWriter::new(file);
    render(&mut out)
        .and_then(|_| out.flush())
        .with_context(|| format!("Failed to write output file \"{}\"", path.display()))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_is_exactly_bit_width_digits() {
        assert_eq!(format_binary(3, 2), "11");
        assert_eq!(format_binary(0, 4), "0000");
        assert_eq!(format_binary(5, 8), "00000101");
        assert_eq!(format_binary(255, 8), "11111111");
    }

    #[test]
    fn test_binary_of_negative_code_keeps_low_bits() {
        assert_eq!(format_binary(-1, 4), "1111");
        assert_eq!(format_binary(-2, 3), "110");
    }

    #[test]
    fn test_hex_has_no_padding() {
        assert_eq!(format_hex(0), "0x0");
        assert_eq!(format_hex(255), "0xff");
        assert_eq!(format_hex(4095), "0xfff");
        assert_eq!(format_hex(-1), "0xffffffff");
    }

    #[test]
    fn test_array_formatting() {
        let items = vec!["1".to_string(), "2".to_string(), "3".to_string()];
        assert_eq!(format_array(items), "{ 1, 2, 3 }");
    }
}
