use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::SourceError;
use crate::fetch::{HttpClient, get_json, post_json};
use crate::model::{Customer, SurveyDraft, SurveyResponse};
use crate::services::{ResponseSource, SurveySubmitter};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/survey";

/// Client for the survey backend's REST API.
///
/// - `GET  {base}/responses`
/// - `GET  {base}/customers`
/// - `POST {base}`
pub struct SurveyApi<C> {
    client: C,
    base_url: String,
}

impl<C: HttpClient> SurveyApi<C> {
    pub fn new(client: C, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl<C: HttpClient> ResponseSource for SurveyApi<C> {
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_responses(&self) -> Result<Vec<SurveyResponse>, SourceError> {
        let url = self.endpoint("responses");
        let responses: Vec<SurveyResponse> = get_json(&self.client, &url).await?;
        info!(count = responses.len(), "Survey responses fetched");
        Ok(responses)
    }

    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_customers(&self) -> Result<Vec<Customer>, SourceError> {
        let url = self.endpoint("customers");
        let customers: Vec<Customer> = get_json(&self.client, &url).await?;
        info!(count = customers.len(), "Customers fetched");
        Ok(customers)
    }
}

#[async_trait]
impl<C: HttpClient> SurveySubmitter for SurveyApi<C> {
    #[tracing::instrument(skip(self, draft), fields(base_url = %self.base_url, location = %draft.location))]
    async fn submit(&self, draft: &SurveyDraft) -> Result<String, SourceError> {
        if let Err(e) = draft.validate() {
            warn!(error = %e, "Rejecting survey draft before submission");
            return Err(e.into());
        }

        let message = post_json(&self.client, &self.base_url, draft).await?;
        info!("Survey submitted");
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UnreachableClient;

    #[async_trait]
    impl HttpClient for UnreachableClient {
        async fn execute(&self, _req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            unreachable!("invalid drafts must not be sent")
        }
    }

    #[test]
    fn test_endpoints_join_cleanly() {
        let api = SurveyApi::new(UnreachableClient, "http://localhost:8080/api/survey/");
        assert_eq!(api.base_url(), "http://localhost:8080/api/survey");
        assert_eq!(
            api.endpoint("responses"),
            "http://localhost:8080/api/survey/responses"
        );
    }

    #[tokio::test]
    async fn test_invalid_draft_is_rejected_locally() {
        let api = SurveyApi::new(UnreachableClient, DEFAULT_BASE_URL);
        let err = api.submit(&SurveyDraft::default()).await.unwrap_err();
        assert!(matches!(err, SourceError::Draft(_)));
    }
}
