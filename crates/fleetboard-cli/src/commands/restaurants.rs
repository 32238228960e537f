//! Restaurants view: distances and delivery-duration statistics.

use colored::Colorize;
use fleetboard::metrics::restaurants;
use fleetboard::Festival;
use serde_json::json;

use super::{load_and_filter, section};
use crate::cli::FilterArgs;

pub fn run(args: FilterArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let orders = load_and_filter(&args, verbose)?;

    let couriers = restaurants::distinct_couriers(&orders);
    let mean_distance = restaurants::mean_delivery_distance(&orders);
    let distance_by_city = restaurants::mean_delivery_distance_by_city(&orders);
    let festival = restaurants::duration_by_festival(&orders, Festival::Yes);
    let no_festival = restaurants::duration_by_festival(&orders, Festival::No);
    let by_city = restaurants::duration_by_city(&orders);
    let by_city_traffic = restaurants::duration_by_city_and_traffic(&orders);
    let by_city_order_type = restaurants::duration_by_city_and_order_type(&orders);

    if args.json {
        let view = json!({
            "distinct_couriers": couriers,
            "mean_delivery_distance_km": mean_distance,
            "mean_delivery_distance_by_city": distance_by_city,
            "duration_with_festival": festival,
            "duration_without_festival": no_festival,
            "duration_by_city": by_city,
            "duration_by_city_and_traffic": by_city_traffic,
            "duration_by_city_and_order_type": by_city_order_type,
        });
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    section("Overall Metrics");
    println!("  Distinct couriers:       {}", couriers);
    match mean_distance {
        Some(km) => println!("  Mean delivery distance:  {:.2} km", km),
        None => println!("  Mean delivery distance:  {}", "no data".dimmed()),
    }
    print_festival_line("With festival:  ", festival.as_ref());
    print_festival_line("Without festival:", no_festival.as_ref());

    println!();
    section("Mean Distance by City");
    for row in &distance_by_city {
        println!("  {:14} {:>8.2} km", row.city.to_string(), row.mean_km);
    }

    println!();
    section("Delivery Time by City");
    println!("  {:14} {:>8} {:>8}", "City", "Mean", "Std");
    for row in &by_city {
        println!("  {:14} {:>8.2} {:>8.2}", row.city.to_string(), row.mean, row.std);
    }

    println!();
    section("Delivery Time by City and Traffic");
    println!("  {:14} {:8} {:>8} {:>8}", "City", "Traffic", "Mean", "Std");
    for row in &by_city_traffic {
        println!(
            "  {:14} {:8} {:>8.2} {:>8.2}",
            row.city.to_string(),
            row.traffic.to_string(),
            row.mean,
            row.std
        );
    }

    println!();
    section("Delivery Time by City and Order Type");
    println!("  {:14} {:12} {:>8} {:>8}", "City", "Order", "Mean", "Std");
    for row in &by_city_order_type {
        println!(
            "  {:14} {:12} {:>8.2} {:>8.2}",
            row.city.to_string(),
            row.order_type,
            row.mean,
            row.std
        );
    }

    Ok(())
}

fn print_festival_line(label: &str, stats: Option<&restaurants::DurationStats>) {
    match stats {
        Some(s) => println!("  {} mean {:.2} min, std {:.2}", label, s.mean, s.std),
        None => println!("  {} {}", label, "no data".dimmed()),
    }
}
