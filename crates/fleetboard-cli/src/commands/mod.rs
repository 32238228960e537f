//! Command implementations for the three dashboard views.

pub mod company;
pub mod couriers;
pub mod restaurants;

use colored::Colorize;
use fleetboard::{OrderFilter, OrderPipeline, OrderRecord, Traffic};

use crate::cli::FilterArgs;

/// Load the orders file, print the cleaning summary, and apply the
/// view's filter selection.
pub fn load_and_filter(
    args: &FilterArgs,
    verbose: bool,
) -> Result<Vec<OrderRecord>, Box<dyn std::error::Error>> {
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    if !args.json {
        println!(
            "{} {}",
            "Loading".cyan().bold(),
            args.file.display().to_string().white()
        );
    }

    let pipeline = OrderPipeline::new();
    let loaded = pipeline.load_orders(&args.file)?;

    if !args.json {
        println!(
            "Kept {} of {} rows ({} missing, {} malformed)",
            loaded.report.kept_rows.to_string().white().bold(),
            loaded.report.input_rows,
            loaded.report.dropped_missing.to_string().yellow(),
            loaded.report.rejected_malformed.to_string().red()
        );

        if verbose {
            println!("  {} ({} bytes)", loaded.source.hash, loaded.source.size_bytes);
            for (column, count) in &loaded.report.rejected_by_column {
                println!("  {:24} {} rejected", column, count);
            }
        }
    }

    let filtered = match filter_from_args(args) {
        Some(filter) => filter.apply(&loaded.orders),
        None => loaded.orders,
    };

    if !args.json {
        println!("{} orders after filters\n", filtered.len().to_string().white().bold());
    }

    Ok(filtered)
}

/// Build the filter for the sidebar selection, if any was given.
fn filter_from_args(args: &FilterArgs) -> Option<OrderFilter> {
    let traffic = if args.traffic.is_empty() {
        Traffic::ALL.to_vec()
    } else {
        args.traffic.clone()
    };

    match args.until {
        Some(cutoff) => Some(OrderFilter::new(cutoff, traffic)),
        // No cutoff: only filter when the traffic selection narrows things.
        None if traffic.len() < Traffic::ALL.len() => Some(OrderFilter::new(
            chrono::NaiveDate::MAX,
            traffic,
        )),
        None => None,
    }
}

/// Print a section header the way the views title their containers.
pub fn section(title: &str) {
    println!("{}", title.yellow().bold());
    println!("{}", "─".repeat(60));
}
