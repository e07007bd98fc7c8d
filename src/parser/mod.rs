//! Event log parsing and schema definitions.
//!
//! This module handles:
//! - Reading the CSV clickstream
//! - Parsing timestamps and deriving calendar columns
//! - Validating the input schema
//! - Defining the report output schema

pub mod event;
pub mod event_log;
pub mod schema;

// Re-export main types
pub use event::{Event, EventLog};
pub use event_log::{load_event_log, parse_timestamp, read_event_log};
pub use schema::{AnalyticsReport, LogOverview, Rate};
