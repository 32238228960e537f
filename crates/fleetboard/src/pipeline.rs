//! The load-and-clean entry point the views share.

use std::path::Path;

use tracing::info;

use crate::clean::{clean, CleanReport};
use crate::error::Result;
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::order::OrderRecord;

/// Configuration for loading the orders dataset.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
}

/// Cleaned orders plus everything worth reporting about how they got there.
#[derive(Debug, Clone)]
pub struct LoadedOrders {
    /// The cleaned records, in input order.
    pub orders: Vec<OrderRecord>,
    /// What cleaning dropped and rejected.
    pub report: CleanReport,
    /// Provenance of the input file.
    pub source: SourceMetadata,
}

/// Loads and cleans the delivery-orders dataset.
///
/// This is the single point where raw data enters the system; everything
/// downstream (filtering, aggregation) works on the returned records.
pub struct OrderPipeline {
    parser: Parser,
}

impl OrderPipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: PipelineConfig) -> Self {
        Self {
            parser: Parser::with_config(config.parser),
        }
    }

    /// Read the orders file, clean it, and return the typed records.
    pub fn load_orders(&self, path: impl AsRef<Path>) -> Result<LoadedOrders> {
        let (table, source) = self.parser.parse_file(path)?;
        let outcome = clean(&table)?;

        info!(
            file = %source.file,
            input_rows = outcome.report.input_rows,
            kept_rows = outcome.report.kept_rows,
            dropped_missing = outcome.report.dropped_missing,
            rejected_malformed = outcome.report.rejected_malformed,
            "orders loaded"
        );

        Ok(LoadedOrders {
            orders: outcome.orders,
            report: outcome.report,
            source,
        })
    }
}

impl Default for OrderPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const HEADER: &str = "ID,Delivery_person_ID,Delivery_person_Age,Delivery_person_Ratings,\
Restaurant_latitude,Restaurant_longitude,Delivery_location_latitude,Delivery_location_longitude,\
Order_Date,Time_Orderd,Weatherconditions,Road_traffic_density,Vehicle_condition,Type_of_order,\
Type_of_vehicle,multiple_deliveries,Festival,City,Time_taken(min)";

    #[test]
    fn test_load_orders_end_to_end() {
        let content = format!(
            "{HEADER}\n\
             0x1,C01 ,37,4.9,22.745049,75.892471,22.765049,75.912471,19-03-2022,11:30:00,\
             conditions Sunny,High ,2,Snack ,motorcycle ,0,No ,Urban ,(min) 24\n\
             0x2,C02 ,\"NaN \",4.5,22.745049,75.892471,22.765049,75.912471,19-03-2022,11:45:00,\
             conditions Sunny,Jam ,1,Meal ,scooter ,1,No ,Urban ,(min) 30\n"
        );
        let file = create_test_file(&content);

        let pipeline = OrderPipeline::new();
        let loaded = pipeline.load_orders(file.path()).unwrap();

        assert_eq!(loaded.source.row_count, 2);
        assert_eq!(loaded.report.kept_rows, 1);
        assert_eq!(loaded.report.dropped_missing, 1);
        assert_eq!(loaded.orders[0].courier_id, "C01");
        assert_eq!(loaded.orders[0].duration_min, 24);
        assert!(loaded.source.hash.starts_with("sha256:"));
    }

    #[test]
    fn test_load_orders_missing_file() {
        let pipeline = OrderPipeline::new();
        assert!(pipeline.load_orders("/no/such/orders.csv").is_err());
    }
}
