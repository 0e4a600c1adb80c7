use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};

use eqanalysis::batch::{evaluate_request, read_batch, run_batch};
use eqanalysis::configuration::Configuration;
use eqanalysis::equation::equation::{CoefficientSet, Equation};
use eqanalysis::equation::equationfamily::EquationFamily;
use eqanalysis::logging::init_logging;
use eqanalysis::plot::plotseries::PlotSeries;
use eqanalysis::plot::samplingwindow::SamplingWindow;
use eqanalysis::presentation::textreport::TextReport;

#[derive(Parser)]
#[command(name = "eqanalysis", version, about = "Intercepts, roots, vertex and domain of simple equations")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON instead of the text report
    #[arg(long, global = true)]
    json: bool,

    /// Decimal places in the text report
    #[arg(long, global = true)]
    precision: Option<u32>,

    #[command(subcommand)]
    command: Command
}

#[derive(Subcommand)]
enum Command {
    /// ax + b
    #[command(allow_negative_numbers = true)]
    Linear { a: f64, b: f64 },

    /// ax^2 + bx + c
    #[command(allow_negative_numbers = true)]
    Quadratic { a: f64, b: f64, c: f64 },

    /// ax^3 + bx^2 + cx + d
    #[command(allow_negative_numbers = true)]
    Cubic { a: f64, b: f64, c: f64, d: f64 },

    /// a*b^x
    #[command(allow_negative_numbers = true)]
    Exponential { a: f64, b: f64 },

    /// a*log_b(x)
    #[command(allow_negative_numbers = true)]
    Logarithmic { a: f64, b: f64 },

    /// Evaluate every equation of a JSON array file
    Batch { file: PathBuf },

    /// Sample a curve to CSV for an external plotter
    #[command(allow_negative_numbers = true)]
    Sample {
        family: EquationFamily,

        #[arg(required = true, num_args = 1..)]
        coefficients: Vec<f64>,

        #[arg(long)]
        start: Option<f64>,

        #[arg(long)]
        end: Option<f64>,

        #[arg(long)]
        samples: Option<usize>,

        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let configuration = match load_configuration(&cli) {
        Ok(configuration) => configuration,
        Err(message) => {
            eprintln!("error: {}", message);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(configuration.log_level(), configuration.log_dir()) {
        eprintln!("warning: logging disabled: {}", err);
    }

    let outcome = match cli.command {
        Command::Linear { a, b } => analyse(EquationFamily::Linear, vec![a, b], &configuration, cli.json),
        Command::Quadratic { a, b, c } => {
            analyse(EquationFamily::Quadratic, vec![a, b, c], &configuration, cli.json)
        }
        Command::Cubic { a, b, c, d } => {
            analyse(EquationFamily::Cubic, vec![a, b, c, d], &configuration, cli.json)
        }
        Command::Exponential { a, b } => {
            analyse(EquationFamily::Exponential, vec![a, b], &configuration, cli.json)
        }
        Command::Logarithmic { a, b } => {
            analyse(EquationFamily::Logarithmic, vec![a, b], &configuration, cli.json)
        }
        Command::Batch { file } => batch(file, &configuration, cli.json),
        Command::Sample { family, coefficients, start, end, samples, out } => {
            sample(family, &coefficients, (start, end, samples), out, &configuration)
        }
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(message) => {
            error!("event=command status=error reason=\"{}\"", message);
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn load_configuration(cli: &Cli) -> Result<Configuration, String> {
    let configuration = match &cli.config {
        Some(path) => Configuration::from_reader(path).map_err(|err| err.to_string())?,
        None => Configuration::new()
    };
    match cli.precision {
        Some(precision) => configuration.with_precision(precision).map_err(|err| err.to_string()),
        None => Ok(configuration)
    }
}

/// Returns `Ok(false)` when the equation was rejected.
fn analyse(
    family: EquationFamily,
    coefficients: Vec<f64>,
    configuration: &Configuration,
    json: bool
) -> Result<bool, String> {
    let request = CoefficientSet::new(family, coefficients);
    match evaluate_request(&request) {
        Ok(result) => {
            if json {
                let text = serde_json::to_string_pretty(&result).map_err(|err| err.to_string())?;
                println!("{}", text);
            } else {
                println!("{}", TextReport::new(configuration.precision()).render(&result));
            }
            Ok(true)
        }
        Err(err) => {
            eprintln!("error: {}", err);
            Ok(false)
        }
    }
}

fn batch(file: PathBuf, configuration: &Configuration, json: bool) -> Result<bool, String> {
    let requests = read_batch(&file).map_err(|err| err.to_string())?;
    info!("event=batch_start file={} entries={}", file.display(), requests.len());
    let entries = run_batch(&requests);
    let all_ok = entries.iter().all(|entry| entry.is_ok());

    if json {
        let text = serde_json::to_string_pretty(&entries).map_err(|err| err.to_string())?;
        println!("{}", text);
        return Ok(all_ok);
    }

    let report = TextReport::new(configuration.precision());
    for entry in &entries {
        println!("#{} ({})", entry.index() + 1, entry.request().family());
        match (entry.result(), entry.error()) {
            (Some(result), _) => println!("{}", report.render(result)),
            (None, Some(message)) => println!("error: {}", message),
            (None, None) => {}
        }
        println!();
    }
    Ok(all_ok)
}

fn sample(
    family: EquationFamily,
    coefficients: &[f64],
    overrides: (Option<f64>, Option<f64>, Option<usize>),
    out: Option<PathBuf>,
    configuration: &Configuration
) -> Result<bool, String> {
    let equation = Equation::from_coefficients(family, coefficients).map_err(|err| err.to_string())?;
    let result = equation.evaluate().map_err(|err| err.to_string())?;

    let base = configuration.window_for(family);
    let (start, end, samples) = overrides;
    let window = SamplingWindow::new(
        start.unwrap_or(base.start()),
        end.unwrap_or(base.end()),
        samples.unwrap_or(base.samples())
    )
    .map_err(|err| err.to_string())?;

    let series = PlotSeries::sample(result.expression(), &equation, &window);
    info!(
        "event=sample family={} points={} start={} end={}",
        family,
        series.points().len(),
        window.start(),
        window.end()
    );

    let written = match out {
        Some(path) => {
            let file = File::create(&path).map_err(|err| err.to_string())?;
            series.write_csv(&mut BufWriter::new(file))
        }
        None => series.write_csv(&mut io::stdout().lock())
    };
    written.map_err(|err| err.to_string())?;
    Ok(true)
}
