//! Customer-satisfaction survey analytics.
//!
//! Raw survey responses come in through a [`services::ResponseSource`], get
//! narrowed by an [`analyzers::ResponseFilter`] and are aggregated into a
//! [`analyzers::DashboardReport`].

pub mod analyzers;
pub mod config;
pub mod error;
pub mod fetch;
pub mod infra;
pub mod model;
pub mod output;
pub mod services;
