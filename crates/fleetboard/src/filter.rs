//! Filter stage: the sidebar's date cutoff and traffic multiselect.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::order::{OrderRecord, Traffic};

/// User-chosen predicates applied before aggregation.
///
/// Rows strictly before the cutoff date whose traffic density is in the
/// accepted set are kept. Applying a filter is pure and order-preserving,
/// so applying it twice is the same as applying it once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderFilter {
    /// Exclusive upper bound on the order date.
    pub cutoff: NaiveDate,
    /// Accepted traffic-density categories.
    pub traffic: Vec<Traffic>,
}

impl OrderFilter {
    /// Create a filter with an explicit traffic selection.
    pub fn new(cutoff: NaiveDate, traffic: Vec<Traffic>) -> Self {
        Self { cutoff, traffic }
    }

    /// Create a filter that accepts every traffic category.
    pub fn before(cutoff: NaiveDate) -> Self {
        Self::new(cutoff, Traffic::ALL.to_vec())
    }

    /// Whether a single order passes both predicates.
    pub fn matches(&self, order: &OrderRecord) -> bool {
        order.order_date < self.cutoff && self.traffic.contains(&order.traffic)
    }

    /// Return the subset of orders satisfying the filter, in input order.
    pub fn apply(&self, orders: &[OrderRecord]) -> Vec<OrderRecord> {
        orders.iter().filter(|o| self.matches(o)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{City, Festival, GeoPoint};

    fn order(date: (i32, u32, u32), traffic: Traffic) -> OrderRecord {
        OrderRecord {
            order_id: "o".into(),
            courier_id: "c".into(),
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
            city: City::Urban,
            restaurant: GeoPoint::new(0.0, 0.0),
            delivery: GeoPoint::new(0.0, 0.0),
            weather: "conditions Sunny".into(),
            duration_min: 20,
        }
    }

    #[test]
    fn test_cutoff_is_exclusive() {
        let orders = vec![
            order((2022, 3, 1), Traffic::Low),
            order((2022, 4, 6), Traffic::Low),
            order((2022, 4, 7), Traffic::Low),
        ];
        let filter = OrderFilter::before(NaiveDate::from_ymd_opt(2022, 4, 6).unwrap());
        let kept = filter.apply(&orders);

        // Rows dated exactly at the cutoff are excluded.
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].order_date, NaiveDate::from_ymd_opt(2022, 3, 1).unwrap());
    }

    #[test]
    fn test_traffic_multiselect() {
        let orders = vec![
            order((2022, 3, 1), Traffic::Low),
            order((2022, 3, 1), Traffic::Jam),
            order((2022, 3, 2), Traffic::High),
        ];
        let filter = OrderFilter::new(
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            vec![Traffic::Jam, Traffic::High],
        );
        let kept = filter.apply(&orders);

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].traffic, Traffic::Jam);
        assert_eq!(kept[1].traffic, Traffic::High);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let orders = vec![
            order((2022, 2, 15), Traffic::Medium),
            order((2022, 3, 20), Traffic::Jam),
            order((2022, 5, 1), Traffic::Low),
        ];
        let filter = OrderFilter::new(
            NaiveDate::from_ymd_opt(2022, 4, 1).unwrap(),
            vec![Traffic::Medium, Traffic::Jam],
        );

        let once = filter.apply(&orders);
        let twice = filter.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_selection_keeps_nothing() {
        let orders = vec![order((2022, 3, 1), Traffic::Low)];
        let filter = OrderFilter::new(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), Vec::new());
        assert!(filter.apply(&orders).is_empty());
    }
}
