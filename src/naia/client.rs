// src/naia/client.rs
use crate::utils::error::FetchError;
use reqwest::header;
use std::time::Duration;

// Some standings hosts refuse clients without a browser User-Agent.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Creates a reqwest client configured for standings pages.
fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS)) // No retries, a slow host just fails
        .build()
}

/// Downloads a standings page and returns its HTML.
pub async fn fetch_page(url: &str) -> Result<String, FetchError> {
    let client = build_client()?; // Propagate client build error if any

    tracing::info!("Downloading standings page from: {}", url);

    let response = client.get(url)
        // Standings are plain HTML pages
        .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
        .send()
        .await?; // Propagates reqwest::Error as FetchError::Network

    // Check if the request was successful (status code 2xx)
    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        // Old season pages get moved or removed
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }
        // Return generic HTTP error
        return Err(FetchError::Http(status));
    }

    // Read the response body as text
    let body = response.text().await?;
    tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

    Ok(body)
}
