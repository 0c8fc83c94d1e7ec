use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{info, instrument};

use crate::logistix::slab::error::{Result, ToolError};

const USER_AGENT: &str = concat!("slab-sync/", env!("CARGO_PKG_VERSION"));
const TIMEOUT_SECS: u64 = 30;

/// Builds the HTTP client shared by the download and the rate lookup.
pub fn http_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Fetches `url` and stores the body at `destination`. Non-success statuses
/// count as failures; nothing is written in that case.
#[instrument(
    level = "info",
    skip(client, destination),
    fields(destination = %destination.display())
)]
pub fn download_file(client: &Client, url: &str, destination: &Path) -> Result<()> {
    let failed = |message: String| ToolError::Download {
        url: url.to_string(),
        message,
    };

    let response = client
        .get(url)
        .send()
        .map_err(|err| failed(err.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(failed(format!("server answered {status}")));
    }
    let bytes = response.bytes().map_err(|err| failed(err.to_string()))?;

    fs::write(destination, &bytes)?;
    info!(bytes = bytes.len(), "price list downloaded");
    Ok(())
}
