//! Company view: order volume, traffic mix, weekly trends, map hotspots.

use fleetboard::metrics::company;
use serde_json::json;

use super::{load_and_filter, section};
use crate::cli::FilterArgs;

pub fn run(args: FilterArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let orders = load_and_filter(&args, verbose)?;

    let daily = company::orders_per_day(&orders);
    let shares = company::traffic_share(&orders);
    let by_city = company::orders_by_city_and_traffic(&orders);
    let weekly = company::orders_per_week(&orders);
    let per_courier = company::orders_per_courier_per_week(&orders);
    let hotspots = company::delivery_hotspots(&orders);

    if args.json {
        let view = json!({
            "orders_per_day": daily,
            "traffic_share": shares,
            "orders_by_city_and_traffic": by_city,
            "orders_per_week": weekly,
            "orders_per_courier_per_week": per_courier,
            "delivery_hotspots": hotspots,
        });
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    section("Orders by Day");
    for row in &daily {
        println!("  {}  {:>6}", row.date.format("%d-%m-%Y"), row.orders);
    }

    println!();
    section("Traffic Order Share");
    for row in &shares {
        println!("  {:8} {:>6}  {:>5.1}%", row.traffic.to_string(), row.orders, row.share * 100.0);
    }

    println!();
    section("Orders by City and Traffic");
    for row in &by_city {
        println!("  {:14} {:8} {:>6}", row.city.to_string(), row.traffic.to_string(), row.orders);
    }

    println!();
    section("Orders by Week");
    for row in &weekly {
        println!("  week {:02}  {:>6}", row.week, row.orders);
    }

    println!();
    section("Orders per Courier by Week");
    for row in &per_courier {
        println!("  week {:02}  {:>8.2}", row.week, row.orders_per_courier);
    }

    println!();
    section("Delivery Hotspots (median location)");
    for row in &hotspots {
        println!(
            "  {:14} {:8} {:>11.6}, {:>11.6}",
            row.city.to_string(),
            row.traffic.to_string(),
            row.latitude,
            row.longitude
        );
    }

    Ok(())
}
