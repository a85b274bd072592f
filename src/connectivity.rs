//! Internet pre-flight probe

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{DeployError, Result};
use crate::report::Reporter;

const PROBE_URL: &str = "https://archive.org";
const PROBE_TIMEOUT_SECS: u64 = 5;

/// HEAD a well-known host; any failure is terminal
pub fn check_internet(reporter: &dyn Reporter) -> Result<()> {
    reporter.info("Checking internet connectivity");
    probe(PROBE_URL)?;
    reporter.success("Internet connectivity OK");
    Ok(())
}

/// Transport failures and HTTP error statuses both count as offline
fn probe(url: &str) -> Result<()> {
    let client = Client::builder()
        .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
        .user_agent("Mozilla/5.0")
        .build()
        .map_err(|_| DeployError::ConnectivityFailed)?;

    client
        .head(url)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(|_| DeployError::ConnectivityFailed)?;

    Ok(())
}
