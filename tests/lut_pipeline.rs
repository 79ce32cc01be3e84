// Integration tests for sampling and quantization end to end

use lutgen::{Lut, Params, Waveform};

fn params(amplitude: f64, samples: usize, bit_width: u32, waveform: &str) -> Params {
    Params {
        amplitude,
        samples,
        bit_width,
        waveform_name: waveform.to_string(),
    }
}

#[test]
fn line_five_samples_two_bits() {
    let lut = Lut::generate(&params(1.0, 5, 2, "line"));

    let values: Vec<f64> = lut.samples().iter().map(|s| s.value).collect();
    assert_eq!(values, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    assert_eq!(lut.scale().bin_width(), 0.25);
    assert_eq!(lut.scale().max_code_count(), 4);

    // Last sample sits on the top edge and is clamped from 4 to 3
    assert_eq!(lut.codes(), vec![0, 1, 2, 3, 3]);
}

#[test]
fn square_two_samples_one_bit() {
    let lut = Lut::generate(&params(1.0, 2, 1, "square"));

    let values: Vec<f64> = lut.samples().iter().map(|s| s.value).collect();
    assert_eq!(values, vec![1.0, 0.0]);
    assert_eq!(lut.scale().bin_width(), 0.5);
    assert_eq!(lut.codes(), vec![1, 0]);
}

#[test]
fn default_parameters() {
    let lut = Lut::generate(&Params::default());

    assert_eq!(lut.waveform(), Waveform::Line);
    assert_eq!(lut.samples().len(), 100);
    assert_eq!(lut.scale().max_code_count(), 256);
    assert_eq!(lut.scale().bin_width(), 0.00390625);
    assert_eq!(lut.codes().first(), Some(&0));
    assert_eq!(lut.codes().last(), Some(&255));
}

#[test]
fn every_waveform_endpoints() {
    let n = 64;
    for waveform in Waveform::ALL {
        let lut = Lut::generate(&params(1.0, n, 8, waveform.name()));
        let samples = lut.samples();
        assert_eq!(samples.len(), n);
        assert_eq!(samples[0].value, waveform.evaluate(0.0));
        assert_eq!(samples[n - 1].value, waveform.evaluate(1.0));
    }
}

#[test]
fn fallback_matches_line() {
    let bogus = Lut::generate(&params(1.5, 50, 6, "bogus_name"));
    let line = Lut::generate(&params(1.5, 50, 6, "line"));
    assert_eq!(bogus.codes(), line.codes());
}

#[test]
fn scale_table_shape() {
    let lut = Lut::generate(&params(2.0, 10, 4, "sine"));
    let entries: Vec<_> = lut.scale_table().iter().collect();

    assert_eq!(entries.len(), 16);
    assert_eq!(entries[0].lower_bound, 0.0);
    assert_eq!(entries[15].lower_bound, 2.0 * 15.0 / 16.0);
    assert!(entries
        .windows(2)
        .all(|pair| pair[0].lower_bound < pair[1].lower_bound));
}

#[test]
fn cosine_peaks_clamp_at_both_ends() {
    // cos starts and ends a closed period at its maximum
    let lut = Lut::generate(&params(1.0, 9, 3, "cosine"));
    let codes = lut.codes();
    assert_eq!(codes[0], 7);
    assert_eq!(codes[8], 7);
    assert_eq!(codes[4], 0);
}
