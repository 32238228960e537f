//! Typed order records and the categorical vocabulary of the dataset.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Road congestion level at the time of the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Traffic {
    Low,
    Medium,
    High,
    Jam,
}

impl Traffic {
    /// All traffic categories, in severity order.
    pub const ALL: [Traffic; 4] = [Traffic::Low, Traffic::Medium, Traffic::High, Traffic::Jam];
}

impl FromStr for Traffic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Low" => Ok(Traffic::Low),
            "Medium" => Ok(Traffic::Medium),
            "High" => Ok(Traffic::High),
            "Jam" => Ok(Traffic::Jam),
            other => Err(format!(
                "Unknown traffic density: '{}'. Use Low, Medium, High, or Jam.",
                other
            )),
        }
    }
}

impl fmt::Display for Traffic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Traffic::Low => write!(f, "Low"),
            Traffic::Medium => write!(f, "Medium"),
            Traffic::High => write!(f, "High"),
            Traffic::Jam => write!(f, "Jam"),
        }
    }
}

/// Coarse urbanization class of the delivery city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum City {
    Metropolitan,
    Urban,
    SemiUrban,
}

impl City {
    /// The three known city categories, in the order the views present them.
    pub const ALL: [City; 3] = [City::Metropolitan, City::Urban, City::SemiUrban];
}

impl FromStr for City {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            // The dataset spells it "Metropolitian"; accept both.
            "Metropolitan" | "Metropolitian" => Ok(City::Metropolitan),
            "Urban" => Ok(City::Urban),
            "Semi-Urban" | "Semi-urban" => Ok(City::SemiUrban),
            other => Err(format!("Unknown city category: '{}'.", other)),
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            City::Metropolitan => write!(f, "Metropolitan"),
            City::Urban => write!(f, "Urban"),
            City::SemiUrban => write!(f, "Semi-Urban"),
        }
    }
}

/// Whether the order fell inside a festival period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Festival {
    Yes,
    No,
}

impl FromStr for Festival {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Yes" => Ok(Festival::Yes),
            "No" => Ok(Festival::No),
            other => Err(format!("Unknown festival flag: '{}'. Use Yes or No.", other)),
        }
    }
}

impl fmt::Display for Festival {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Festival::Yes => write!(f, "Yes"),
            Festival::No => write!(f, "No"),
        }
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// One cleaned delivery order.
///
/// Field types encode the cleaning invariants: integers are integers, the
/// date is a real calendar date, and the closed categoricals are enums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Order identifier, trimmed.
    pub order_id: String,
    /// Courier identifier, trimmed.
    pub courier_id: String,
    /// Courier age in years.
    pub courier_age: u32,
    /// Courier rating on the 0-5 scale.
    pub courier_rating: f64,
    /// Calendar date of the order.
    pub order_date: NaiveDate,
    /// Time of day the order was placed, when recorded.
    pub order_time: Option<NaiveTime>,
    /// Road traffic density at order time.
    pub traffic: Traffic,
    /// Vehicle condition on the dataset's small integer scale.
    pub vehicle_condition: u8,
    /// Kind of order (Snack, Meal, ...), trimmed.
    pub order_type: String,
    /// Kind of vehicle (motorcycle, scooter, ...), trimmed.
    pub vehicle_type: String,
    /// How many deliveries the courier was carrying at once.
    pub multiple_deliveries: u32,
    /// Festival period flag.
    pub festival: Festival,
    /// City category.
    pub city: City,
    /// Restaurant location.
    pub restaurant: GeoPoint,
    /// Delivery location.
    pub delivery: GeoPoint,
    /// Weather condition, trimmed.
    pub weather: String,
    /// Delivery duration in minutes.
    pub duration_min: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traffic_round_trip() {
        for traffic in Traffic::ALL {
            assert_eq!(traffic.to_string().parse::<Traffic>().unwrap(), traffic);
        }
        assert!("Gridlock".parse::<Traffic>().is_err());
    }

    #[test]
    fn test_city_accepts_dataset_spelling() {
        assert_eq!("Metropolitian".parse::<City>().unwrap(), City::Metropolitan);
        assert_eq!("Metropolitan".parse::<City>().unwrap(), City::Metropolitan);
        assert_eq!("Semi-Urban".parse::<City>().unwrap(), City::SemiUrban);
        assert!("Rural".parse::<City>().is_err());
    }

    #[test]
    fn test_festival_flag() {
        assert_eq!("Yes".parse::<Festival>().unwrap(), Festival::Yes);
        assert_eq!(" No ".parse::<Festival>().unwrap(), Festival::No);
        assert!("Maybe".parse::<Festival>().is_err());
    }
}
