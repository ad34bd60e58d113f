mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Method, Request, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::SourceError;

fn build_request(method: Method, url: &str) -> Result<Request, SourceError> {
    let url = Url::parse(url).map_err(|e| SourceError::InvalidUrl(format!("{url}: {e}")))?;
    Ok(Request::new(method, url))
}

/// Turns any non-2xx response into [`SourceError::Status`], keeping the body for context.
async fn ensure_success(url: &str, resp: Response) -> Result<Response, SourceError> {
    if resp.status().is_success() {
        return Ok(resp);
    }

    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(SourceError::Status {
        url: url.to_string(),
        status,
        body,
    })
}

/// GETs `url` and decodes the JSON body.
pub async fn get_json<C, T>(client: &C, url: &str) -> Result<T, SourceError>
where
    C: HttpClient + ?Sized,
    T: DeserializeOwned,
{
    let req = build_request(Method::GET, url)?;
    let resp = ensure_success(url, client.execute(req).await?).await?;
    let bytes = resp.bytes().await?;
    debug!(url, bytes = bytes.len(), "Response body received");
    Ok(serde_json::from_slice(&bytes)?)
}

/// POSTs `body` as JSON and returns the response text.
pub async fn post_json<C, B>(client: &C, url: &str, body: &B) -> Result<String, SourceError>
where
    C: HttpClient + ?Sized,
    B: Serialize + ?Sized,
{
    let mut req = build_request(Method::POST, url)?;
    req.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    *req.body_mut() = Some(serde_json::to_vec(body)?.into());

    let resp = ensure_success(url, client.execute(req).await?).await?;
    Ok(resp.text().await?)
}
