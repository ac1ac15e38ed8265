use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;

use uniformity_heatmap::config::{DEFAULT_GRID_X, DEFAULT_GRID_Y, DEFAULT_TEXT_SIZE};
use uniformity_heatmap::{csv, heatmap, AnalysisParams, HeatmapStyle, Resolution};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Process brightness uniformity heatmap of an input jpg photo of a display showing full white pattern.",
    after_help = "Example usage: uniformity-heatmap --infile=/path/to/input.jpg --outfile=/path/to/output.jpg --outfileresolution=1920x1080",
    arg_required_else_help = true
)]
struct Args {
    /// Path to the input JPG image file
    #[arg(long)]
    infile: PathBuf,

    /// Path to save the output JPG image file
    #[arg(long)]
    outfile: Option<PathBuf>,

    /// Resolution of the output file in the format WIDTHxHEIGHT
    #[arg(long, default_value = "1920x1080")]
    outfileresolution: Resolution,

    /// Number of grid columns
    #[arg(long, default_value_t = DEFAULT_GRID_X)]
    gridx: u32,

    /// Number of grid rows
    #[arg(long, default_value_t = DEFAULT_GRID_Y)]
    gridy: u32,

    /// Text size for grid markers
    #[arg(long, default_value_t = DEFAULT_TEXT_SIZE)]
    textsize: u32,

    /// Path to save the CSV file with grid data
    #[arg(long)]
    csvfile: Option<PathBuf>,
}

fn run(args: &Args) -> Result<()> {
    let params = AnalysisParams::with_grid(args.gridx, args.gridy);
    let measurement = uniformity_heatmap::measure_file(&args.infile, &params)
        .with_context(|| format!("Failed to analyze {}", args.infile.display()))?;

    // The emitters are independent: a failure in one still lets the other run.
    let mut failed = 0;

    if let Some(csv_path) = &args.csvfile {
        match csv::write_csv(csv_path, &measurement.percent) {
            Ok(()) => println!("CSV file saved to: {}", csv_path.display()),
            Err(e) => {
                eprintln!("Error: {:#}", anyhow::Error::new(e));
                failed += 1;
            }
        }
    }

    if let Some(out_path) = &args.outfile {
        let style = HeatmapStyle {
            resolution: args.outfileresolution,
            text_size: args.textsize,
            ..HeatmapStyle::default()
        };
        match heatmap::save_heatmap(out_path, &measurement, &style) {
            Ok(()) => println!("Output saved to: {}", out_path.display()),
            Err(e) => {
                eprintln!("Error: {:#}", anyhow::Error::new(e));
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} requested output(s) were not written");
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.outfile.is_none() && args.csvfile.is_none() {
        eprintln!("{}", Args::command().render_help());
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
