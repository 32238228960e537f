//! Restaurant-view queries: delivery distances and duration statistics.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::geo::haversine_km;
use super::stats::{round2, RunningStats};
use crate::order::{City, Festival, OrderRecord, Traffic};

/// Number of distinct couriers appearing in the filtered data.
pub fn distinct_couriers(orders: &[OrderRecord]) -> usize {
    orders
        .iter()
        .map(|o| o.courier_id.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Mean restaurant-to-delivery distance over all orders, in kilometers,
/// rounded to two decimals. None when there are no orders.
pub fn mean_delivery_distance(orders: &[OrderRecord]) -> Option<f64> {
    if orders.is_empty() {
        return None;
    }

    let mut stats = RunningStats::new();
    for order in orders {
        stats.add(haversine_km(order.restaurant, order.delivery));
    }
    Some(round2(stats.mean()))
}

/// Mean delivery distance for one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityDistance {
    pub city: City,
    pub mean_km: f64,
}

/// Mean restaurant-to-delivery distance grouped by city.
pub fn mean_delivery_distance_by_city(orders: &[OrderRecord]) -> Vec<CityDistance> {
    let mut groups: BTreeMap<City, RunningStats> = BTreeMap::new();
    for order in orders {
        groups
            .entry(order.city)
            .or_default()
            .add(haversine_km(order.restaurant, order.delivery));
    }

    groups
        .into_iter()
        .map(|(city, stats)| CityDistance {
            city,
            mean_km: stats.mean(),
        })
        .collect()
}

/// Mean and sample deviation of delivery duration, in minutes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub mean: f64,
    pub std: f64,
}

/// Duration statistics for orders with the given festival flag, rounded to
/// two decimals the way the dashboard widgets show them. None if no order
/// carries that flag.
pub fn duration_by_festival(orders: &[OrderRecord], festival: Festival) -> Option<DurationStats> {
    let mut stats = RunningStats::new();
    for order in orders.iter().filter(|o| o.festival == festival) {
        stats.add(order.duration_min as f64);
    }

    if stats.count() == 0 {
        return None;
    }
    Some(DurationStats {
        mean: round2(stats.mean()),
        std: round2(stats.sample_std()),
    })
}

/// Duration statistics for one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityDuration {
    pub city: City,
    pub mean: f64,
    pub std: f64,
}

/// Duration mean and sample deviation grouped by city.
pub fn duration_by_city(orders: &[OrderRecord]) -> Vec<CityDuration> {
    let mut groups: BTreeMap<City, RunningStats> = BTreeMap::new();
    for order in orders {
        groups.entry(order.city).or_default().add(order.duration_min as f64);
    }

    groups
        .into_iter()
        .map(|(city, stats)| CityDuration {
            city,
            mean: stats.mean(),
            std: stats.sample_std(),
        })
        .collect()
}

/// Duration statistics for one (city, traffic) combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityTrafficDuration {
    pub city: City,
    pub traffic: Traffic,
    pub mean: f64,
    pub std: f64,
}

/// Duration mean and sample deviation grouped by city and traffic density,
/// feeding the hierarchical city-into-traffic breakdown.
pub fn duration_by_city_and_traffic(orders: &[OrderRecord]) -> Vec<CityTrafficDuration> {
    let mut groups: BTreeMap<(City, Traffic), RunningStats> = BTreeMap::new();
    for order in orders {
        groups
            .entry((order.city, order.traffic))
            .or_default()
            .add(order.duration_min as f64);
    }

    groups
        .into_iter()
        .map(|((city, traffic), stats)| CityTrafficDuration {
            city,
            traffic,
            mean: stats.mean(),
            std: stats.sample_std(),
        })
        .collect()
}

/// Duration statistics for one (city, order type) combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityOrderTypeDuration {
    pub city: City,
    pub order_type: String,
    pub mean: f64,
    pub std: f64,
}

/// Duration mean and sample deviation grouped by city and order type.
pub fn duration_by_city_and_order_type(orders: &[OrderRecord]) -> Vec<CityOrderTypeDuration> {
    let mut groups: BTreeMap<(City, &str), RunningStats> = BTreeMap::new();
    for order in orders {
        groups
            .entry((order.city, order.order_type.as_str()))
            .or_default()
            .add(order.duration_min as f64);
    }

    groups
        .into_iter()
        .map(|((city, order_type), stats)| CityOrderTypeDuration {
            city,
            order_type: order_type.to_string(),
            mean: stats.mean(),
            std: stats.sample_std(),
        })
        .collect()
}
