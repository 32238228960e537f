//! CLI argument definitions using clap.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use fleetboard::Traffic;

/// Fleetboard: delivery-orders analytics
#[derive(Parser)]
#[command(name = "fleetboard")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Filter options shared by every view.
#[derive(Args)]
pub struct FilterArgs {
    /// Path to the orders file (CSV)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Keep orders strictly before this date (DD-MM-YYYY)
    #[arg(long, value_name = "DATE", value_parser = parse_cutoff)]
    pub until: Option<NaiveDate>,

    /// Traffic categories to include (default: all)
    #[arg(long, value_delimiter = ',', value_name = "LEVELS")]
    pub traffic: Vec<Traffic>,

    /// Output as JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Company view: order volume, traffic mix, weekly trends, map hotspots
    Company(FilterArgs),

    /// Couriers view: fleet extremes, ratings, fastest/slowest rankings
    Couriers(FilterArgs),

    /// Restaurants view: distances and delivery-duration statistics
    Restaurants(FilterArgs),
}

/// Parse a cutoff date in the dataset's day-month-year convention.
fn parse_cutoff(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%d-%m-%Y")
        .map_err(|_| format!("Invalid date: '{}'. Use DD-MM-YYYY, e.g. 06-04-2022.", s))
}
