use std::fs;

use eqanalysis::batch::{read_batch, run_batch, BatchError};
use eqanalysis::configuration::{Configuration, ConfigurationError};
use eqanalysis::equation::equation::Equation;
use eqanalysis::equation::equationfamily::EquationFamily;
use eqanalysis::plot::plotseries::PlotSeries;
use eqanalysis::plot::samplingwindow::{SamplingError, SamplingWindow};

#[test]
fn configuration_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{"precision": 2, "logarithmic_window": {"start": 0.5, "end": 4.0, "samples": 8}}"#
    )
    .unwrap();

    let configuration = Configuration::from_reader(&path).unwrap();
    assert_eq!(configuration.precision(), 2);
    let window = configuration.window_for(EquationFamily::Logarithmic);
    assert_eq!((window.start(), window.end(), window.samples()), (0.5, 4.0, 8));
    assert_eq!(
        configuration.window_for(EquationFamily::Cubic),
        SamplingWindow::default_for(EquationFamily::Cubic)
    );
}

#[test]
fn missing_configuration_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Configuration::from_reader(dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigurationError::IOError(_))));
}

#[test]
fn batch_file_is_evaluated_entry_by_entry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.json");
    fs::write(
        &path,
        r#"[
            {"family": "linear", "coefficients": [2, 4]},
            {"family": "logarithmic", "coefficients": [1, 1]},
            {"family": "exponential", "coefficients": [2, -3]}
        ]"#
    )
    .unwrap();

    let entries = run_batch(&read_batch(&path).unwrap());
    assert_eq!(entries.len(), 3);
    assert!(entries[0].is_ok());
    assert_eq!(entries[1].error(), Some("invalid coefficient b: base must be positive and ≠ 1"));
    assert!(entries[2].is_ok());
}

#[test]
fn default_window_yields_every_sample_of_a_polynomial() {
    let cubic = Equation::Cubic { a: 1.0, b: 0.0, c: 0.0, d: 0.0 };
    let window = SamplingWindow::default_for(EquationFamily::Cubic);
    let series = PlotSeries::sample("x^3", &cubic, &window);
    assert_eq!(series.points().len(), 400);
    assert_eq!(series.points()[0].x(), -10.0);
    assert_eq!(series.points()[399].x(), 10.0);
    assert_eq!(series.label(), "x^3");
}

#[test]
fn inverted_window_is_rejected() {
    assert!(matches!(
        SamplingWindow::new(10.0, -10.0, 400),
        Err(SamplingError::InvertedWindow { .. })
    ));
}

#[test]
fn window_without_samples_is_rejected_when_loading() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"default_window": {"start": 0, "end": 1, "samples": 0}}"#).unwrap();
    assert!(matches!(
        Configuration::from_reader(&path),
        Err(ConfigurationError::JsonParseError(_))
    ));
}

#[test]
fn malformed_batch_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.json");
    fs::write(&path, r#"[{"family": "linear", "coefficients": "1 2"}]"#).unwrap();
    assert!(matches!(read_batch(&path), Err(BatchError::JsonParseError(_))));
}
