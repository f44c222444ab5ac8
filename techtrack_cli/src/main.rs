//! techtrack CLI
//!
//! Build a technician proximity report: load the location time series,
//! compute pairwise distances, echo the table, and save the CSV.

use clap::Parser;
use techtrack_core::{load_timesteps, write_csv, DistanceReport, ReportError};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Technician proximity report builder
#[derive(Parser, Debug)]
#[command(name = "techtrack")]
#[command(about = "Compute pairwise technician distances and proximity flags", long_about = None)]
struct Args {
    /// Input JSON document (array of per-minute feature collections).
    /// The default matches the upstream feed's exact filename, misspelling included.
    #[arg(short, long, default_value = "api_techician_response_data.json")]
    input: String,

    /// Output CSV report path
    #[arg(short, long, default_value = "tech_distance_data.csv")]
    output: String,

    /// Proximity threshold in feet (inclusive)
    #[arg(long, default_value = "1000.0")]
    threshold_ft: f64,

    /// Suppress the table echo on stdout
    #[arg(short, long)]
    quiet: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> Result<(), ReportError> {
    let records = load_timesteps(&args.input)?;
    info!("Loaded {} timesteps from {}", records.len(), args.input);

    let report = DistanceReport::build(&records, args.threshold_ft);

    if !args.quiet {
        print!("{}", report.render_table());
    }

    write_csv(&report, &args.output)?;
    info!("Wrote {} rows to {}", report.len(), args.output);

    Ok(())
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    if let Err(err) = run(&args) {
        error!("{err}");
        std::process::exit(1);
    }
}
