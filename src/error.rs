//! Typed failures at the crate's boundaries.
//!
//! Aggregation itself never fails; these cover fetching, decoding and
//! submitting survey data.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain or deliver survey data through a source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode survey payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid endpoint url '{0}'")]
    InvalidUrl(String),

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("invalid survey draft: {0}")]
    Draft(#[from] DraftError),
}

/// A survey draft that the backend would reject.
#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("'{value}' is not a valid satisfaction level for {field}")]
    InvalidLevel { field: &'static str, value: String },

    #[error("overall rating {0} is outside 1.0..=5.0")]
    RatingOutOfRange(f64),
}

/// Returned when a string is not one of the five canonical satisfaction labels.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown satisfaction level '{0}'")]
pub struct UnknownLevel(pub String);

/// Returned for a time-period selector other than `all`, `last30`, `last90`, `last180`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown period '{0}' (expected all, last30, last90 or last180)")]
pub struct UnknownPeriod(pub String);
