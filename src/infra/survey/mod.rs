mod client;
mod file;

pub use client::{DEFAULT_BASE_URL, SurveyApi};
pub use file::FileSource;
