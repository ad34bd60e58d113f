//! Abstractions over the survey backend.

use crate::error::SourceError;
use crate::model::{Customer, SurveyDraft, SurveyResponse};

/// Supplies the raw response collection the analyzers run over.
#[async_trait::async_trait]
pub trait ResponseSource: Send + Sync {
    /// Returns every stored survey response.
    async fn fetch_responses(&self) -> Result<Vec<SurveyResponse>, SourceError>;

    /// Returns every stored customer.
    async fn fetch_customers(&self) -> Result<Vec<Customer>, SourceError>;
}

/// Accepts new survey submissions.
#[async_trait::async_trait]
pub trait SurveySubmitter: Send + Sync {
    /// Validates and stores a draft, returning the backend's confirmation message.
    async fn submit(&self, draft: &SurveyDraft) -> Result<String, SourceError>;
}
