//! Traits for the collaborators that supply and accept survey data.

mod survey_api;

pub use survey_api::{ResponseSource, SurveySubmitter};
