//! Company-view queries: order volume over time, traffic mix, and the
//! median delivery locations used by the map.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use super::stats::median;
use super::week_of_year;
use crate::order::{City, OrderRecord, Traffic};

/// Order count for a single calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyOrders {
    pub date: NaiveDate,
    pub orders: usize,
}

/// Total orders per day, ordered by date.
pub fn orders_per_day(orders: &[OrderRecord]) -> Vec<DailyOrders> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for order in orders {
        *counts.entry(order.order_date).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(date, orders)| DailyOrders { date, orders })
        .collect()
}

/// Order count and share of total for one traffic category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficShare {
    pub traffic: Traffic,
    pub orders: usize,
    /// Fraction of all orders; shares over the present categories sum to 1.
    pub share: f64,
}

/// Distribution of orders across traffic densities.
pub fn traffic_share(orders: &[OrderRecord]) -> Vec<TrafficShare> {
    let mut counts: BTreeMap<Traffic, usize> = BTreeMap::new();
    for order in orders {
        *counts.entry(order.traffic).or_insert(0) += 1;
    }

    let total = orders.len() as f64;
    counts
        .into_iter()
        .map(|(traffic, count)| TrafficShare {
            traffic,
            orders: count,
            share: count as f64 / total,
        })
        .collect()
}

/// Order count for one (city, traffic) combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityTrafficOrders {
    pub city: City,
    pub traffic: Traffic,
    pub orders: usize,
}

/// Orders grouped by city and traffic density.
pub fn orders_by_city_and_traffic(orders: &[OrderRecord]) -> Vec<CityTrafficOrders> {
    let mut counts: BTreeMap<(City, Traffic), usize> = BTreeMap::new();
    for order in orders {
        *counts.entry((order.city, order.traffic)).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((city, traffic), orders)| CityTrafficOrders { city, traffic, orders })
        .collect()
}

/// Order count for one week of the year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyOrders {
    /// Sunday-start week number, 00-53.
    pub week: u32,
    pub orders: usize,
}

/// Total orders per week of the year.
pub fn orders_per_week(orders: &[OrderRecord]) -> Vec<WeeklyOrders> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for order in orders {
        *counts.entry(week_of_year(order.order_date)).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(week, orders)| WeeklyOrders { week, orders })
        .collect()
}

/// Orders per active courier for one week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyCourierLoad {
    pub week: u32,
    /// Order count divided by the number of distinct couriers active that week.
    pub orders_per_courier: f64,
}

/// How many orders each active courier handled, week by week.
pub fn orders_per_courier_per_week(orders: &[OrderRecord]) -> Vec<WeeklyCourierLoad> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    let mut couriers: BTreeMap<u32, BTreeSet<&str>> = BTreeMap::new();
    for order in orders {
        let week = week_of_year(order.order_date);
        *counts.entry(week).or_insert(0) += 1;
        couriers.entry(week).or_default().insert(order.courier_id.as_str());
    }

    counts
        .into_iter()
        .map(|(week, count)| WeeklyCourierLoad {
            week,
            orders_per_courier: count as f64 / couriers[&week].len() as f64,
        })
        .collect()
}

/// Median delivery location for one (city, traffic) combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryHotspot {
    pub city: City,
    pub traffic: Traffic,
    pub latitude: f64,
    pub longitude: f64,
}

/// Median delivery coordinates by city and traffic, for map markers.
pub fn delivery_hotspots(orders: &[OrderRecord]) -> Vec<DeliveryHotspot> {
    let mut groups: BTreeMap<(City, Traffic), (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for order in orders {
        let entry = groups.entry((order.city, order.traffic)).or_default();
        entry.0.push(order.delivery.latitude);
        entry.1.push(order.delivery.longitude);
    }

    groups
        .into_iter()
        .map(|((city, traffic), (lats, lons))| DeliveryHotspot {
            city,
            traffic,
            // Groups are non-empty by construction.
            latitude: median(&lats).unwrap_or(f64::NAN),
            longitude: median(&lons).unwrap_or(f64::NAN),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{Festival, GeoPoint};
    use chrono::NaiveDate;

    fn order(
        courier: &str,
        date: (i32, u32, u32),
        city: City,
        traffic: Traffic,
        delivery: (f64, f64),
    ) -> OrderRecord {
        OrderRecord {
            order_id: "o".into(),
            courier_id: courier.into(),
            courier_age: 30,
            courier_rating: 4.5,
            order_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            order_time: None,
            traffic,
            vehicle_condition: 1,
            order_type: "Snack".into(),
            vehicle_type: "motorcycle".into(),
            multiple_deliveries: 0,
            festival: Festival::No,
            city,
            restaurant: GeoPoint::new(0.0, 0.0),
            delivery: GeoPoint::new(delivery.0, delivery.1),
            weather: "conditions Sunny".into(),
            duration_min: 20,
        }
    }

    #[test]
    fn test_orders_per_day() {
        let orders = vec![
            order("a", (2022, 3, 2), City::Urban, Traffic::Low, (0.0, 0.0)),
            order("b", (2022, 3, 1), City::Urban, Traffic::Low, (0.0, 0.0)),
            order("c", (2022, 3, 2), City::Urban, Traffic::Low, (0.0, 0.0)),
        ];
        let daily = orders_per_day(&orders);

        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2022, 3, 1).unwrap());
        assert_eq!(daily[0].orders, 1);
        assert_eq!(daily[1].orders, 2);
    }

    #[test]
    fn test_traffic_share_sums_to_one() {
        let orders = vec![
            order("a", (2022, 3, 1), City::Urban, Traffic::Low, (0.0, 0.0)),
            order("b", (2022, 3, 1), City::Urban, Traffic::Low, (0.0, 0.0)),
            order("c", (2022, 3, 1), City::Urban, Traffic::Jam, (0.0, 0.0)),
            order("d", (2022, 3, 1), City::Urban, Traffic::High, (0.0, 0.0)),
        ];
        let shares = traffic_share(&orders);

        let total: f64 = shares.iter().map(|s| s.share).sum();
        assert!((total - 1.0).abs() < 1e-9);

        let low = shares.iter().find(|s| s.traffic == Traffic::Low).unwrap();
        assert_eq!(low.orders, 2);
        assert!((low.share - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_traffic_share_empty_input() {
        assert!(traffic_share(&[]).is_empty());
    }

    #[test]
    fn test_orders_by_city_and_traffic() {
        let orders = vec![
            order("a", (2022, 3, 1), City::Urban, Traffic::Low, (0.0, 0.0)),
            order("b", (2022, 3, 1), City::Urban, Traffic::Low, (0.0, 0.0)),
            order("c", (2022, 3, 1), City::Metropolitan, Traffic::Jam, (0.0, 0.0)),
        ];
        let grouped = orders_by_city_and_traffic(&orders);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].city, City::Metropolitan);
        assert_eq!(grouped[1].orders, 2);
    }

    #[test]
    fn test_orders_per_week_uses_sunday_start_numbering() {
        // 2022-01-01 (Saturday) is week 0; 2022-01-02 (Sunday) opens week 1.
        let orders = vec![
            order("a", (2022, 1, 1), City::Urban, Traffic::Low, (0.0, 0.0)),
            order("b", (2022, 1, 2), City::Urban, Traffic::Low, (0.0, 0.0)),
            order("c", (2022, 1, 8), City::Urban, Traffic::Low, (0.0, 0.0)),
        ];
        let weekly = orders_per_week(&orders);

        assert_eq!(weekly.len(), 2);
        assert_eq!(weekly[0], WeeklyOrders { week: 0, orders: 1 });
        assert_eq!(weekly[1], WeeklyOrders { week: 1, orders: 2 });
    }

    #[test]
    fn test_orders_per_courier_per_week() {
        let orders = vec![
            order("a", (2022, 1, 2), City::Urban, Traffic::Low, (0.0, 0.0)),
            order("a", (2022, 1, 3), City::Urban, Traffic::Low, (0.0, 0.0)),
            order("b", (2022, 1, 4), City::Urban, Traffic::Low, (0.0, 0.0)),
        ];
        let load = orders_per_courier_per_week(&orders);

        // Three orders across two distinct couriers in week 1.
        assert_eq!(load.len(), 1);
        assert_eq!(load[0].week, 1);
        assert!((load[0].orders_per_courier - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_delivery_hotspots_take_group_medians() {
        let orders = vec![
            order("a", (2022, 3, 1), City::Urban, Traffic::Low, (10.0, 70.0)),
            order("b", (2022, 3, 1), City::Urban, Traffic::Low, (12.0, 74.0)),
            order("c", (2022, 3, 1), City::Urban, Traffic::Low, (11.0, 72.0)),
        ];
        let spots = delivery_hotspots(&orders);

        assert_eq!(spots.len(), 1);
        assert!((spots[0].latitude - 11.0).abs() < 1e-9);
        assert!((spots[0].longitude - 72.0).abs() < 1e-9);
    }
}
