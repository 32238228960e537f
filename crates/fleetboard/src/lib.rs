//! Fleetboard: the analytics core of a delivery-orders dashboard.
//!
//! The crate implements the deterministic pipeline behind the dashboard's
//! three views (company, couriers, restaurants): raw CSV records are parsed,
//! cleaned into typed orders, filtered by the user's date/traffic selection,
//! and aggregated into the tables the views render.
//!
//! # Core Principles
//!
//! - **One-way flow**: raw table → cleaned orders → filtered orders →
//!   aggregates; every stage returns a new value.
//! - **Row-local failure**: a malformed row is rejected and counted, never
//!   propagated and never fatal.
//! - **Recompute, don't cache**: aggregates are cheap and ephemeral; every
//!   query recomputes from the slice it is given.
//!
//! # Example
//!
//! ```no_run
//! use fleetboard::{metrics, OrderPipeline};
//!
//! let pipeline = OrderPipeline::new();
//! let loaded = pipeline.load_orders("train.csv").unwrap();
//!
//! println!("kept {} of {} rows", loaded.report.kept_rows, loaded.report.input_rows);
//! for share in metrics::company::traffic_share(&loaded.orders) {
//!     println!("{}: {:.1}%", share.traffic, share.share * 100.0);
//! }
//! ```

pub mod clean;
pub mod error;
pub mod filter;
pub mod input;
pub mod metrics;
pub mod order;

mod pipeline;

pub use clean::{clean, CleanOutcome, CleanReport, MISSING};
pub use error::{FleetboardError, Result};
pub use filter::OrderFilter;
pub use input::{Parser, ParserConfig, RawTable, SourceMetadata};
pub use order::{City, Festival, GeoPoint, OrderRecord, Traffic};
pub use pipeline::{LoadedOrders, OrderPipeline, PipelineConfig};
