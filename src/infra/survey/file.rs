use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::SourceError;
use crate::model::{Customer, SurveyResponse};
use crate::services::ResponseSource;

/// Reads responses from a JSON export of `GET /api/survey/responses`.
///
/// Customers come from a second export when one is given, otherwise they are
/// derived from the customer fields carried on each response.
pub struct FileSource {
    responses_path: PathBuf,
    customers_path: Option<PathBuf>,
}

impl FileSource {
    pub fn new(responses_path: impl Into<PathBuf>) -> Self {
        Self {
            responses_path: responses_path.into(),
            customers_path: None,
        }
    }

    pub fn with_customers(mut self, customers_path: impl Into<PathBuf>) -> Self {
        self.customers_path = Some(customers_path.into());
        self
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, SourceError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| SourceError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// One customer per distinct `customerId`, in first-seen order.
fn customers_from_responses(responses: &[SurveyResponse]) -> Vec<Customer> {
    let mut seen = HashSet::new();
    responses
        .iter()
        .filter_map(|r| {
            let id = r.customer_id?;
            seen.insert(id).then(|| Customer {
                id,
                customer_name: r.customer_name.clone().unwrap_or_default(),
                location: r.location.clone().unwrap_or_default(),
                visit_date: r.visit_date,
            })
        })
        .collect()
}

#[async_trait]
impl ResponseSource for FileSource {
    #[tracing::instrument(skip(self), fields(path = %self.responses_path.display()))]
    async fn fetch_responses(&self) -> Result<Vec<SurveyResponse>, SourceError> {
        let responses: Vec<SurveyResponse> = read_json(&self.responses_path).await?;
        info!(count = responses.len(), "Survey responses loaded");
        Ok(responses)
    }

    async fn fetch_customers(&self) -> Result<Vec<Customer>, SourceError> {
        match &self.customers_path {
            Some(path) => read_json(path).await,
            None => Ok(customers_from_responses(&self.fetch_responses().await?)),
        }
    }
}
