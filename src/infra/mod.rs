//! Concrete survey data sources.

pub mod survey;
