/* Command-line entry point: read `config.conf` from the working directory,
generate the look-up table and write its text outputs next to a gnuplot
script. There are no flags; everything comes from the configuration file.
*/

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use lutgen::config::{ConfigError, Params, DEFAULT_CONFIG_FILE};
use lutgen::lut::Lut;
use lutgen::render::OutputFiles;
use lutgen::utils::init_logger;

/// Exit status for a rejected configuration file
const CONFIG_ERROR_EXIT: u8 = 255;

fn run(config: &Path, output_dir: &Path) -> anyhow::Result<()> {
    let params = Params::load(config)?;
    log::info!(
        "amplitude={} samples={} type=\"{}\" bits={}",
        params.amplitude,
        params.samples,
        params.waveform_name,
        params.bit_width
    );

    let lut = Lut::generate(&params);
    log::info!(
        "Sampled {:?} waveform: {} codes, bin width {}",
        lut.waveform(),
        lut.scale().max_code_count(),
        lut.scale().bin_width()
    );

    OutputFiles::in_dir(output_dir).write_all(&lut)
}

fn report(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.downcast_ref::<ConfigError>().is_some() => {
            log::error!("{}", err);
            log::error!("Quitting...");
            ExitCode::from(CONFIG_ERROR_EXIT)
        }
        Err(err) => {
            log::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    init_logger();
    report(run(&PathBuf::from(DEFAULT_CONFIG_FILE), &PathBuf::from(".")))
}
