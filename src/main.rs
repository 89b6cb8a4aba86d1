//! Carbon Footprint Calculator
//!
//! Estimates a company's energy, waste and travel emissions, keeps an
//! append-only history of every submission and reports on it.

mod calculator;
mod history;
mod models;
mod report;
mod seed;
mod store;
mod validate;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::models::{EmissionRecord, RawSubmission, SubmissionInput};
use crate::report::{HistoryReport, SubmissionReport};
use crate::store::{RecordStore, StoreError};

#[derive(Parser)]
#[command(name = "carbon-footprint")]
#[command(about = "Carbon footprint calculator for company utility, waste and travel figures")]
struct Cli {
    /// Path to the history CSV file
    #[arg(short, long, env = "CARBON_DATA_PATH", default_value = "reports/historic_data.csv")]
    data: PathBuf,

    /// Directory downloadable reports are written to
    #[arg(long, env = "CARBON_REPORTS_DIR", default_value = "reports")]
    reports_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate, save and report emissions for one company
    Calc {
        /// Company name
        name: String,

        /// Average monthly electricity bill (EUR)
        #[arg(long, default_value = "1.0")]
        electric: String,

        /// Average monthly gas bill (EUR)
        #[arg(long, default_value = "1.0")]
        gas: String,

        /// Average monthly fuel bill for transport (EUR)
        #[arg(long, default_value = "1.0")]
        transport: String,

        /// Monthly waste generated (kg)
        #[arg(long, default_value = "1.0")]
        waste: String,

        /// Share of waste recycled (%)
        #[arg(long, default_value = "0.0")]
        recycled: String,

        /// Annual business travel (km)
        #[arg(long, default_value = "1.0")]
        travel_km: String,

        /// Vehicle fuel efficiency (L/100 km)
        #[arg(long, default_value = "1.0")]
        fuel_efficiency: String,

        /// Skip writing the downloadable report file
        #[arg(long)]
        no_report_file: bool,
    },

    /// Show historic data across all submitted companies
    History {
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate synthetic companies for trying out the history view
    Seed {
        /// Number of companies to generate
        #[arg(short, long, default_value = "10")]
        count: usize,

        /// Output CSV file
        #[arg(short, long, default_value = "reports/dummy_data.csv")]
        output: PathBuf,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Create the history file with its header row
    Init,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Result of one calculation; a failed save does not discard the record
struct CalcOutcome {
    input: SubmissionInput,
    record: EmissionRecord,
    save_error: Option<StoreError>,
}

/// Validate, calculate and save one submission
fn calc(store: &RecordStore, raw: &RawSubmission) -> Result<CalcOutcome> {
    let input = validate::validate(raw)?;
    let record = calculator::compute_emissions(&input)?;

    let save_error = match store.append(&record) {
        Ok(()) => {
            info!(name = %record.name, "saved submission");
            None
        }
        Err(e) => {
            error!(error = %e, "submission not saved");
            warn!("this result is not part of the history");
            Some(e)
        }
    };

    Ok(CalcOutcome {
        input,
        record,
        save_error,
    })
}

fn run(cli: Cli) -> Result<()> {
    let store = RecordStore::new(&cli.data);

    match cli.command {
        Commands::Calc {
            name,
            electric,
            gas,
            transport,
            waste,
            recycled,
            travel_km,
            fuel_efficiency,
            no_report_file,
        } => {
            let raw = RawSubmission {
                company_name: name,
                avg_electric_bill: electric,
                avg_gas_bill: gas,
                avg_transport_cost: transport,
                monthly_waste_generated: waste,
                recycled_waste_percent: recycled,
                annual_travel_kms: travel_km,
                fuel_efficiency,
            };
            let outcome = calc(&store, &raw)?;

            // The report is still shown when saving fails
            let report = SubmissionReport::new(&outcome.input, &outcome.record);
            println!("{}", report);
            if let Some(e) = &outcome.save_error {
                eprintln!("Warning: result was not saved ({e})");
            }

            if !no_report_file {
                match report::write_report(&cli.reports_dir, &report) {
                    Ok(path) => println!("Report saved to: {}", path.display()),
                    Err(e) => error!("report file not written: {e:#}"),
                }
            }
        }

        Commands::History { json } => {
            let records = store.load_all()?;
            let snapshot = history::aggregate(&records);

            if json {
                let text = serde_json::to_string_pretty(&snapshot)
                    .context("Failed to serialize history")?;
                println!("{}", text);
            } else {
                println!("{}", HistoryReport(&snapshot));
            }
        }

        Commands::Seed {
            count,
            output,
            seed: rng_seed,
        } => {
            let target = RecordStore::new(output);
            let records = seed::seed_store(&target, count, rng_seed)?;
            println!(
                "Generated {} companies into {}",
                records.len(),
                target.path().display()
            );
        }

        Commands::Init => {
            if store.ensure_exists()? {
                println!("History file created at: {}", store.path().display());
            } else {
                println!("History file already exists at: {}", store.path().display());
            }
        }
    }

    Ok(())
}
