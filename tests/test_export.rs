//! Sample history export
//!
//! - TSV header and rows, oldest first even after wraparound
//! - MATLAB matrix layout
//! - Empty histories
//! - Writing to files

use discrete_systems::prelude::*;
use std::fs;
use tempfile::tempdir;

fn ramp_through_dac(capacity: usize, n: usize) -> DacSystem {
    let mut dac = DacSystem::dac(0.1, capacity).unwrap();
    let inputs: Vec<f64> = (0..n).map(|k| k as f64 * 0.5).collect();
    dac.simulate(&inputs);
    dac
}

#[test]
fn test_tsv_before_wraparound() {
    let dac = ramp_through_dac(5, 3);
    assert_eq!(
        dac.export_samples(ExportFormat::Tsv),
        "# k\tu(k)\ty(k)\n0\t0\t0\n1\t0.5\t0.5\n2\t1\t1\n"
    );
}

#[test]
fn test_tsv_after_wraparound_is_oldest_first() {
    let dac = ramp_through_dac(3, 7);
    let text = dac.export_samples(ExportFormat::Tsv);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "# k\tu(k)\ty(k)");
    assert_eq!(lines[1], "4\t2\t2");
    assert_eq!(lines[2], "5\t2.5\t2.5");
    assert_eq!(lines[3], "6\t3\t3");
}

#[test]
fn test_matlab_after_wraparound() {
    let dac = ramp_through_dac(2, 5);
    let text = dac.export_samples(ExportFormat::Matlab);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "% Export format: MATLAB compatible");
    assert_eq!(lines[1], "% Columns: k u y");
    assert_eq!(lines[2], "data = [3 1.5 1.5;4 2 2];");
    assert!(lines[3].starts_with("% Usage in MATLAB/Octave"));
}

#[test]
fn test_empty_export() {
    let dac = ramp_through_dac(4, 0);
    assert_eq!(dac.export_samples(ExportFormat::Tsv), "# Empty buffer\n");
    assert_eq!(dac.export_samples(ExportFormat::Matlab), "# Empty buffer\n");
}

#[test]
fn test_export_to_writer_matches_string() {
    let mut tf = TransferFunctionSystem::transfer_function(&[1.0], &[1.0, -0.5], 0.1, 8).unwrap();
    tf.simulate(&[1.0; 4]);

    let mut buffer = Vec::new();
    tf.export(&mut buffer, ExportFormat::Tsv).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), tf.export_samples(ExportFormat::Tsv));
}

#[test]
fn test_save_to_file() {
    let dir = tempdir().unwrap();
    let mut adc = AdcSystem::adc(0.1, 16).unwrap();
    adc.simulate(&[1.0, 2.0, 3.0]);

    for format in [ExportFormat::Tsv, ExportFormat::Matlab] {
        let path = dir.path().join(format!("adc.{}", format.extension()));
        adc.save(&path, format).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, adc.export_samples(format));
    }

    let tsv = fs::read_to_string(dir.path().join("adc.tsv")).unwrap();
    assert_eq!(tsv.lines().nth(2), Some("1\t2\t1"));
}

#[test]
fn test_save_to_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let dac = ramp_through_dac(4, 2);
    let path = dir.path().join("missing").join("out.tsv");
    assert!(dac.save(&path, ExportFormat::Tsv).is_err());
}

#[test]
fn test_signal_csv_export() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reference.csv");

    let mut sine = Signal::new(SineWave::new(1.0, 0.0, std::f64::consts::FRAC_PI_2), 0.25, 1.0, 8).unwrap();
    for _ in 0..3 {
        sine.next();
    }
    sine.write_csv(fs::File::create(&path).unwrap()).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "0,2\n0.25,2\n0.5,2\n");
}
