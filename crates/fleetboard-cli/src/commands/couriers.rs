//! Couriers view: fleet extremes, ratings, fastest/slowest rankings.

use colored::Colorize;
use fleetboard::metrics::{couriers, SortDirection};
use serde_json::json;

use super::{load_and_filter, section};
use crate::cli::FilterArgs;

pub fn run(args: FilterArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let orders = load_and_filter(&args, verbose)?;

    let age_range = couriers::courier_age_range(&orders);
    let condition_range = couriers::vehicle_condition_range(&orders);
    let ratings = couriers::mean_rating_by_courier(&orders);
    let by_traffic = couriers::rating_by_traffic(&orders);
    let by_weather = couriers::rating_by_weather(&orders);
    let fastest = couriers::top_couriers_by_duration(&orders, SortDirection::Ascending);
    let slowest = couriers::top_couriers_by_duration(&orders, SortDirection::Descending);

    if args.json {
        let view = json!({
            "courier_age_range": age_range,
            "vehicle_condition_range": condition_range,
            "mean_rating_by_courier": ratings,
            "rating_by_traffic": by_traffic,
            "rating_by_weather": by_weather,
            "fastest_couriers": fastest,
            "slowest_couriers": slowest,
        });
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    section("Overall Metrics");
    match age_range {
        Some((min, max)) => println!("  Courier age:        {} to {}", min, max),
        None => println!("  Courier age:        {}", "no data".dimmed()),
    }
    match condition_range {
        Some((min, max)) => println!("  Vehicle condition:  {} to {}", min, max),
        None => println!("  Vehicle condition:  {}", "no data".dimmed()),
    }

    println!();
    section("Mean Rating by Courier");
    for row in &ratings {
        println!("  {:20} {:>5.2}", row.courier_id, row.mean_rating);
    }

    println!();
    section("Rating by Traffic");
    println!("  {:8} {:>8} {:>8}", "Traffic", "Mean", "Std");
    for row in &by_traffic {
        println!("  {:8} {:>8.2} {:>8.2}", row.traffic.to_string(), row.mean, row.std);
    }

    println!();
    section("Rating by Weather");
    println!("  {:24} {:>8} {:>8}", "Weather", "Mean", "Std");
    for row in &by_weather {
        println!("  {:24} {:>8.2} {:>8.2}", row.weather, row.mean, row.std);
    }

    println!();
    section("Fastest Couriers (top 10 per city)");
    for row in &fastest {
        println!("  {:14} {:20} {:>4} min", row.city.to_string(), row.courier_id, row.duration_min);
    }

    println!();
    section("Slowest Couriers (top 10 per city)");
    for row in &slowest {
        println!("  {:14} {:20} {:>4} min", row.city.to_string(), row.courier_id, row.duration_min);
    }

    Ok(())
}
