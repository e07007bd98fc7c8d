//! Funnel Lens
//!
//! Funnel, engagement, exit and bounce analytics for e-commerce
//! clickstream event logs.
//!
//! This crate provides the core implementation for the
//! `funnel-lens` CLI tool: CSV loading, session grouping, the
//! aggregators, SVG charts and the versioned JSON report.
//!
//! ## Getting Started
//!
//! ```bash
//! funnel-lens report --input events.csv --output report.json --charts charts/ --summary
//! funnel-lens --help
//! ```
//!
//! As a library:
//!
//! ```ignore
//! use funnel_lens::aggregator::{build_session_index, calculate_bounce_rates};
//! use funnel_lens::parser::load_event_log;
//!
//! let log = load_event_log("events.csv")?;
//! let index = build_session_index(&log);
//! let bounces = calculate_bounce_rates(&index);
//! ```

pub mod aggregator;
pub mod charts;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
