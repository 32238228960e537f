//! Cleaning stage: raw table rows to typed [`OrderRecord`]s.
//!
//! Cleaning runs in a fixed order, because later steps assume earlier
//! invariants:
//!
//! 1. Drop rows carrying the dataset's missing-value sentinel in any of the
//!    screened columns (age, traffic, city, festival, multiple deliveries).
//! 2. Extract the numeric duration from the composite `Time_taken(min)` text.
//! 3. Cast numeric and temporal fields to their proper types.
//! 4. Trim whitespace from all text fields.
//!
//! A row that passes the sentinel screen but fails a cast is rejected and
//! counted, never propagated and never fatal.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::error::{FleetboardError, Result};
use crate::input::RawTable;
use crate::order::{City, Festival, GeoPoint, OrderRecord, Traffic};

/// The dataset's missing-value sentinel: the literal text "NaN" with a
/// trailing space, not a numeric NaN.
pub const MISSING: &str = "NaN ";

/// Matches the `"(min) <number>"` convention of the `Time_taken(min)` column.
static DURATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(min\)\s*(\d+)").unwrap());

/// Dataset column names.
mod col {
    pub const ORDER_ID: &str = "ID";
    pub const COURIER_ID: &str = "Delivery_person_ID";
    pub const AGE: &str = "Delivery_person_Age";
    pub const RATING: &str = "Delivery_person_Ratings";
    pub const RESTAURANT_LAT: &str = "Restaurant_latitude";
    pub const RESTAURANT_LON: &str = "Restaurant_longitude";
    pub const DELIVERY_LAT: &str = "Delivery_location_latitude";
    pub const DELIVERY_LON: &str = "Delivery_location_longitude";
    pub const ORDER_DATE: &str = "Order_Date";
    pub const ORDER_TIME: &str = "Time_Orderd";
    pub const WEATHER: &str = "Weatherconditions";
    pub const TRAFFIC: &str = "Road_traffic_density";
    pub const VEHICLE_CONDITION: &str = "Vehicle_condition";
    pub const ORDER_TYPE: &str = "Type_of_order";
    pub const VEHICLE_TYPE: &str = "Type_of_vehicle";
    pub const MULTIPLE_DELIVERIES: &str = "multiple_deliveries";
    pub const FESTIVAL: &str = "Festival";
    pub const CITY: &str = "City";
    pub const DURATION: &str = "Time_taken(min)";
}

/// Resolved column positions for one input table.
struct ColumnLayout {
    order_id: usize,
    courier_id: usize,
    age: usize,
    rating: usize,
    restaurant_lat: usize,
    restaurant_lon: usize,
    delivery_lat: usize,
    delivery_lon: usize,
    order_date: usize,
    order_time: usize,
    weather: usize,
    traffic: usize,
    vehicle_condition: usize,
    order_type: usize,
    vehicle_type: usize,
    multiple_deliveries: usize,
    festival: usize,
    city: usize,
    duration: usize,
}

impl ColumnLayout {
    /// Resolve all required columns, failing on the first absent one.
    fn resolve(table: &RawTable) -> Result<Self> {
        let find = |name: &str| {
            table
                .column_index(name)
                .ok_or_else(|| FleetboardError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            order_id: find(col::ORDER_ID)?,
            courier_id: find(col::COURIER_ID)?,
            age: find(col::AGE)?,
            rating: find(col::RATING)?,
            restaurant_lat: find(col::RESTAURANT_LAT)?,
            restaurant_lon: find(col::RESTAURANT_LON)?,
            delivery_lat: find(col::DELIVERY_LAT)?,
            delivery_lon: find(col::DELIVERY_LON)?,
            order_date: find(col::ORDER_DATE)?,
            order_time: find(col::ORDER_TIME)?,
            weather: find(col::WEATHER)?,
            traffic: find(col::TRAFFIC)?,
            vehicle_condition: find(col::VEHICLE_CONDITION)?,
            order_type: find(col::ORDER_TYPE)?,
            vehicle_type: find(col::VEHICLE_TYPE)?,
            multiple_deliveries: find(col::MULTIPLE_DELIVERIES)?,
            festival: find(col::FESTIVAL)?,
            city: find(col::CITY)?,
            duration: find(col::DURATION)?,
        })
    }
}

/// What happened to the input rows during cleaning.
#[derive(Debug, Clone, Serialize)]
pub struct CleanReport {
    /// Rows in the raw table.
    pub input_rows: usize,
    /// Rows that survived cleaning.
    pub kept_rows: usize,
    /// Rows dropped because a screened column held the missing sentinel.
    pub dropped_missing: usize,
    /// Rows rejected because a value failed its cast.
    pub rejected_malformed: usize,
    /// Rejections broken down by the column that failed first.
    pub rejected_by_column: IndexMap<String, usize>,
}

/// Cleaned orders together with the report of what was discarded.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub orders: Vec<OrderRecord>,
    pub report: CleanReport,
}

/// A row-local cast failure: which column broke, and on what value.
struct RowRejection {
    column: &'static str,
    value: String,
}

/// Clean a raw table into typed order records.
///
/// Fails only if a required column is absent. Rows with the missing sentinel
/// are dropped; rows with malformed values are rejected and counted in the
/// report.
pub fn clean(table: &RawTable) -> Result<CleanOutcome> {
    let layout = ColumnLayout::resolve(table)?;

    let mut orders = Vec::with_capacity(table.row_count());
    let mut dropped_missing = 0;
    let mut rejected_malformed = 0;
    let mut rejected_by_column: IndexMap<String, usize> = IndexMap::new();

    for (row_idx, row) in table.rows.iter().enumerate() {
        let cell = |idx: usize| row.get(idx).map(|s| s.as_str()).unwrap_or("");

        // Step 1: the sentinel screen. Exact match against "NaN " — a value
        // like "NaN" (no space) falls through to the cast step instead.
        let screened = [
            layout.age,
            layout.traffic,
            layout.city,
            layout.festival,
            layout.multiple_deliveries,
        ];
        if screened.iter().any(|&idx| cell(idx) == MISSING) {
            dropped_missing += 1;
            continue;
        }

        // Steps 2-4.
        match parse_row(&layout, row) {
            Ok(order) => orders.push(order),
            Err(rejection) => {
                warn!(
                    row = row_idx,
                    column = rejection.column,
                    value = %rejection.value,
                    "rejecting malformed row"
                );
                rejected_malformed += 1;
                *rejected_by_column
                    .entry(rejection.column.to_string())
                    .or_insert(0) += 1;
            }
        }
    }

    let report = CleanReport {
        input_rows: table.row_count(),
        kept_rows: orders.len(),
        dropped_missing,
        rejected_malformed,
        rejected_by_column,
    };

    Ok(CleanOutcome { orders, report })
}

/// Parse one pre-screened row into an [`OrderRecord`].
fn parse_row(layout: &ColumnLayout, row: &[String]) -> std::result::Result<OrderRecord, RowRejection> {
    let cell = |idx: usize| row.get(idx).map(|s| s.as_str()).unwrap_or("");
    let reject = |column: &'static str, value: &str| RowRejection {
        column,
        value: value.to_string(),
    };

    let age_raw = cell(layout.age);
    let courier_age: u32 = age_raw
        .trim()
        .parse()
        .map_err(|_| reject(col::AGE, age_raw))?;

    let rating_raw = cell(layout.rating);
    let courier_rating: f64 = rating_raw
        .trim()
        .parse()
        .map_err(|_| reject(col::RATING, rating_raw))?;

    let date_raw = cell(layout.order_date);
    let order_date = NaiveDate::parse_from_str(date_raw.trim(), "%d-%m-%Y")
        .map_err(|_| reject(col::ORDER_DATE, date_raw))?;

    let order_time = parse_order_time(cell(layout.order_time));

    let traffic_raw = cell(layout.traffic);
    let traffic = Traffic::from_str(traffic_raw).map_err(|_| reject(col::TRAFFIC, traffic_raw))?;

    let city_raw = cell(layout.city);
    let city = City::from_str(city_raw).map_err(|_| reject(col::CITY, city_raw))?;

    let festival_raw = cell(layout.festival);
    let festival =
        Festival::from_str(festival_raw).map_err(|_| reject(col::FESTIVAL, festival_raw))?;

    let condition_raw = cell(layout.vehicle_condition);
    let vehicle_condition: u8 = condition_raw
        .trim()
        .parse()
        .map_err(|_| reject(col::VEHICLE_CONDITION, condition_raw))?;

    let multi_raw = cell(layout.multiple_deliveries);
    let multiple_deliveries: u32 = multi_raw
        .trim()
        .parse()
        .map_err(|_| reject(col::MULTIPLE_DELIVERIES, multi_raw))?;

    let duration_raw = cell(layout.duration);
    let duration_min = parse_duration(duration_raw)
        .ok_or_else(|| reject(col::DURATION, duration_raw))?;

    let parse_coord = |idx: usize, column: &'static str| {
        let raw = cell(idx);
        raw.trim()
            .parse::<f64>()
            .map_err(|_| reject(column, raw))
    };
    let restaurant = GeoPoint::new(
        parse_coord(layout.restaurant_lat, col::RESTAURANT_LAT)?,
        parse_coord(layout.restaurant_lon, col::RESTAURANT_LON)?,
    );
    let delivery = GeoPoint::new(
        parse_coord(layout.delivery_lat, col::DELIVERY_LAT)?,
        parse_coord(layout.delivery_lon, col::DELIVERY_LON)?,
    );

    Ok(OrderRecord {
        order_id: cell(layout.order_id).trim().to_string(),
        courier_id: cell(layout.courier_id).trim().to_string(),
        courier_age,
        courier_rating,
        order_date,
        order_time,
        traffic,
        vehicle_condition,
        order_type: cell(layout.order_type).trim().to_string(),
        vehicle_type: cell(layout.vehicle_type).trim().to_string(),
        multiple_deliveries,
        festival,
        city,
        restaurant,
        delivery,
        weather: cell(layout.weather).trim().to_string(),
        duration_min,
    })
}

/// Pull the integer minutes out of the `"(min) <number>"` text.
fn parse_duration(raw: &str) -> Option<u32> {
    let captures = DURATION_RE.captures(raw)?;
    captures.get(1)?.as_str().parse().ok()
}

/// The order time is optional in the dataset; anything unusable becomes None.
fn parse_order_time(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "NaN" {
        return None;
    }
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADERS: [&str; 19] = [
        col::ORDER_ID,
        col::COURIER_ID,
        col::AGE,
        col::RATING,
        col::RESTAURANT_LAT,
        col::RESTAURANT_LON,
        col::DELIVERY_LAT,
        col::DELIVERY_LON,
        col::ORDER_DATE,
        col::ORDER_TIME,
        col::WEATHER,
        col::TRAFFIC,
        col::VEHICLE_CONDITION,
        col::ORDER_TYPE,
        col::VEHICLE_TYPE,
        col::MULTIPLE_DELIVERIES,
        col::FESTIVAL,
        col::CITY,
        col::DURATION,
    ];

    /// One well-formed row; tests overwrite individual cells.
    fn base_row() -> Vec<String> {
        vec![
            " 0x447 ".into(),
            " COURIER01 ".into(),
            "34".into(),
            "4.5".into(),
            "22.745049".into(),
            "75.892471".into(),
            "22.765049".into(),
            "75.912471".into(),
            "13-04-2022".into(),
            "21:55:00".into(),
            "conditions Sunny ".into(),
            "Jam ".into(),
            "2".into(),
            "Snack ".into(),
            "motorcycle ".into(),
            "1".into(),
            "No ".into(),
            "Metropolitian ".into(),
            "(min) 25".into(),
        ]
    }

    fn table(rows: Vec<Vec<String>>) -> RawTable {
        RawTable::new(HEADERS.iter().map(|h| h.to_string()).collect(), rows)
    }

    fn set(mut row: Vec<String>, column: &str, value: &str) -> Vec<String> {
        let idx = HEADERS.iter().position(|h| *h == column).unwrap();
        row[idx] = value.to_string();
        row
    }

    #[test]
    fn test_clean_happy_path() {
        let outcome = clean(&table(vec![base_row()])).unwrap();
        assert_eq!(outcome.report.kept_rows, 1);

        let order = &outcome.orders[0];
        assert_eq!(order.order_id, "0x447");
        assert_eq!(order.courier_id, "COURIER01");
        assert_eq!(order.courier_age, 34);
        assert_eq!(order.duration_min, 25);
        assert_eq!(order.order_date, NaiveDate::from_ymd_opt(2022, 4, 13).unwrap());
        assert_eq!(order.traffic, Traffic::Jam);
        assert_eq!(order.city, City::Metropolitan);
        assert_eq!(order.festival, Festival::No);
        assert_eq!(order.weather, "conditions Sunny");
        assert_eq!(order.order_time, NaiveTime::from_hms_opt(21, 55, 0));
    }

    #[test]
    fn test_sentinel_rows_dropped() {
        let rows = vec![
            base_row(),
            set(base_row(), col::TRAFFIC, MISSING),
            set(base_row(), col::AGE, MISSING),
            set(base_row(), col::FESTIVAL, MISSING),
        ];
        let outcome = clean(&table(rows)).unwrap();

        assert_eq!(outcome.report.input_rows, 4);
        assert_eq!(outcome.report.kept_rows, 1);
        assert_eq!(outcome.report.dropped_missing, 3);
        assert_eq!(outcome.report.rejected_malformed, 0);
    }

    #[test]
    fn test_malformed_rows_rejected_and_counted() {
        let rows = vec![
            base_row(),
            set(base_row(), col::AGE, "thirty"),
            set(base_row(), col::ORDER_DATE, "2022-04-13"),
            set(base_row(), col::AGE, "NaN"),
        ];
        let outcome = clean(&table(rows)).unwrap();

        assert_eq!(outcome.report.kept_rows, 1);
        assert_eq!(outcome.report.rejected_malformed, 3);
        assert_eq!(outcome.report.rejected_by_column[col::AGE], 2);
        assert_eq!(outcome.report.rejected_by_column[col::ORDER_DATE], 1);
    }

    #[test]
    fn test_duration_requires_min_prefix() {
        let outcome = clean(&table(vec![set(base_row(), col::DURATION, "25")])).unwrap();
        assert_eq!(outcome.report.kept_rows, 0);
        assert_eq!(outcome.report.rejected_by_column[col::DURATION], 1);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let mut headers: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
        headers.retain(|h| h != col::CITY);
        let raw = RawTable::new(headers, vec![vec![String::new(); 18]]);

        match clean(&raw) {
            Err(FleetboardError::MissingColumn(name)) => assert_eq!(name, col::CITY),
            other => panic!("expected MissingColumn, got {:?}", other.map(|o| o.report)),
        }
    }

    #[test]
    fn test_order_time_is_lenient() {
        let rows = vec![
            set(base_row(), col::ORDER_TIME, "NaN"),
            set(base_row(), col::ORDER_TIME, ""),
            set(base_row(), col::ORDER_TIME, "11:30"),
        ];
        let outcome = clean(&table(rows)).unwrap();

        assert_eq!(outcome.report.kept_rows, 3);
        assert_eq!(outcome.orders[0].order_time, None);
        assert_eq!(outcome.orders[1].order_time, None);
        assert_eq!(outcome.orders[2].order_time, NaiveTime::from_hms_opt(11, 30, 0));
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("(min) 25"), Some(25));
        assert_eq!(parse_duration("(min) 7"), Some(7));
        assert_eq!(parse_duration("25"), None);
        assert_eq!(parse_duration("(min) "), None);
    }
}
