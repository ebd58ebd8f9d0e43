mod client;
mod basic;
pub mod auth;

pub use client::HttpClient;
pub use basic::BasicClient;

use anyhow::Result;
use serde::de::DeserializeOwned;

pub async fn fetch_bytes<C: HttpClient + ?Sized>(
    client: &C,
    url: &str,
) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse()?,
    );

    let resp = client.execute(req).await?;
    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(anyhow::anyhow!("GET returned status {}: {}", status, body));
    }
    Ok(resp.bytes().await?.to_vec())
}

/// Fetches `url` and decodes the response body as JSON.
pub async fn fetch_json<C, T>(client: &C, url: &str) -> Result<T>
where
    C: HttpClient + ?Sized,
    T: DeserializeOwned,
{
    let bytes = fetch_bytes(client, url).await?;
    serde_json::from_slice(&bytes)
        .map_err(|e| anyhow::anyhow!("Failed to parse response: {}", e))
}
