mod client;
mod basic;
pub mod auth;

pub use client::HttpClient;
pub use basic::BasicClient;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Fails with the status and body text unless the response is 2xx.
async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let url = resp.url().to_string();
    let body = resp.text().await.unwrap_or_default();
    Err(anyhow!("{} returned status {}: {}", url, status, body))
}

pub async fn fetch_bytes<C: HttpClient>(
    client: &C,
    url: &str,
) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse()?,
    );

    let resp = ensure_success(client.execute(req).await?).await?;
    Ok(resp.bytes().await?.to_vec())
}

/// GETs `url` and decodes the JSON body.
pub async fn fetch_json<C: HttpClient, T: DeserializeOwned>(client: &C, url: &str) -> Result<T> {
    let bytes = fetch_bytes(client, url).await?;
    serde_json::from_slice(&bytes).with_context(|| format!("malformed JSON from {url}"))
}

/// POSTs `body` as JSON to `url` and decodes the JSON response.
pub async fn post_json<C: HttpClient, B: Serialize + ?Sized, T: DeserializeOwned>(
    client: &C,
    url: &str,
    body: &B,
) -> Result<T> {
    let mut req = reqwest::Request::new(reqwest::Method::POST, url.parse()?);
    req.headers_mut().insert(
        reqwest::header::CONTENT_TYPE,
        reqwest::header::HeaderValue::from_static("application/json"),
    );
    *req.body_mut() = Some(serde_json::to_vec(body)?.into());

    let resp = ensure_success(client.execute(req).await?).await?;
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).with_context(|| format!("malformed JSON from {url}"))
}
