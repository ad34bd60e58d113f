//! Survey response aggregation.
//!
//! This module narrows a response collection with a [`filter::ResponseFilter`],
//! then derives per-attribute ratings, per-location performance, overall
//! satisfaction buckets and comment sentiment. Every aggregator is a pure
//! accumulator; [`analyzer::analyze`] feeds all of them from one traversal.

pub mod analyzer;
pub mod attributes;
pub mod feedback;
pub mod filter;
pub mod locations;
pub mod overall;
pub mod score;
pub mod types;
pub mod utility;

pub use analyzer::{analyze, analyze_filtered};
pub use filter::{LocationFilter, Period, ResponseFilter, filter_by_location};
pub use types::DashboardReport;
