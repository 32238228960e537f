//! Courier-view queries: fleet-wide extremes, rating statistics, and the
//! fastest/slowest courier rankings.

use std::collections::BTreeMap;

use serde::Serialize;

use super::stats::RunningStats;
use crate::order::{City, OrderRecord, Traffic};

/// How many couriers each city contributes to a duration ranking.
const RANKING_SIZE: usize = 10;

/// Youngest and oldest courier ages in the filtered data.
pub fn courier_age_range(orders: &[OrderRecord]) -> Option<(u32, u32)> {
    let min = orders.iter().map(|o| o.courier_age).min()?;
    let max = orders.iter().map(|o| o.courier_age).max()?;
    Some((min, max))
}

/// Worst and best vehicle condition in the filtered data.
pub fn vehicle_condition_range(orders: &[OrderRecord]) -> Option<(u8, u8)> {
    let min = orders.iter().map(|o| o.vehicle_condition).min()?;
    let max = orders.iter().map(|o| o.vehicle_condition).max()?;
    Some((min, max))
}

/// Mean rating for one courier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourierRating {
    pub courier_id: String,
    pub mean_rating: f64,
}

/// Mean rating per courier, ordered by courier id.
pub fn mean_rating_by_courier(orders: &[OrderRecord]) -> Vec<CourierRating> {
    let mut groups: BTreeMap<&str, RunningStats> = BTreeMap::new();
    for order in orders {
        groups
            .entry(order.courier_id.as_str())
            .or_default()
            .add(order.courier_rating);
    }

    groups
        .into_iter()
        .map(|(courier_id, stats)| CourierRating {
            courier_id: courier_id.to_string(),
            mean_rating: stats.mean(),
        })
        .collect()
}

/// Rating mean and deviation for one traffic category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficRating {
    pub traffic: Traffic,
    pub mean: f64,
    pub std: f64,
}

/// Rating mean and sample deviation grouped by traffic density.
pub fn rating_by_traffic(orders: &[OrderRecord]) -> Vec<TrafficRating> {
    let mut groups: BTreeMap<Traffic, RunningStats> = BTreeMap::new();
    for order in orders {
        groups.entry(order.traffic).or_default().add(order.courier_rating);
    }

    groups
        .into_iter()
        .map(|(traffic, stats)| TrafficRating {
            traffic,
            mean: stats.mean(),
            std: stats.sample_std(),
        })
        .collect()
}

/// Rating mean and deviation for one weather condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherRating {
    pub weather: String,
    pub mean: f64,
    pub std: f64,
}

/// Rating mean and sample deviation grouped by weather condition.
pub fn rating_by_weather(orders: &[OrderRecord]) -> Vec<WeatherRating> {
    let mut groups: BTreeMap<&str, RunningStats> = BTreeMap::new();
    for order in orders {
        groups
            .entry(order.weather.as_str())
            .or_default()
            .add(order.courier_rating);
    }

    groups
        .into_iter()
        .map(|(weather, stats)| WeatherRating {
            weather: weather.to_string(),
            mean: stats.mean(),
            std: stats.sample_std(),
        })
        .collect()
}

/// Sort direction for the duration ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    /// Shortest maximum duration first (the fastest couriers).
    Ascending,
    /// Longest maximum duration first (the slowest couriers).
    Descending,
}

/// One courier's worst-case duration within a city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourierDuration {
    pub city: City,
    pub courier_id: String,
    /// The courier's maximum recorded duration in that city, in minutes.
    pub duration_min: u32,
}

/// The ten most extreme couriers per city, by maximum delivery duration.
///
/// Each of the three city categories is ranked independently and the
/// per-city lists are concatenated in the fixed order Metropolitan, Urban,
/// Semi-Urban. Cities with fewer than ten couriers contribute all of them.
pub fn top_couriers_by_duration(
    orders: &[OrderRecord],
    direction: SortDirection,
) -> Vec<CourierDuration> {
    let mut ranking = Vec::new();

    for city in City::ALL {
        // Max duration per courier; BTreeMap gives a deterministic id order
        // for the stable sort below to tie-break on.
        let mut max_by_courier: BTreeMap<&str, u32> = BTreeMap::new();
        for order in orders.iter().filter(|o| o.city == city) {
            max_by_courier
                .entry(order.courier_id.as_str())
                .and_modify(|d| *d = (*d).max(order.duration_min))
                .or_insert(order.duration_min);
        }

        let mut couriers: Vec<(&str, u32)> = max_by_courier.into_iter().collect();
        match direction {
            SortDirection::Ascending => couriers.sort_by_key(|&(_, d)| d),
            SortDirection::Descending => couriers.sort_by_key(|&(_, d)| std::cmp::Reverse(d)),
        }
        couriers.truncate(RANKING_SIZE);

        ranking.extend(couriers.into_iter().map(|(courier_id, duration_min)| {
            CourierDuration {
                city,
                courier_id: courier_id.to_string(),
                duration_min,
            }
        }));
    }

    ranking
}
