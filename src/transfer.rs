//! Transfer manager: materialize planned artifacts as local files
//!
//! Transfers run strictly one at a time. A destination file that already
//! exists is taken as complete without touching the network, which makes
//! reruns idempotent. The flip side is documented behavior: a partial file
//! left by a failed run will be mistaken for a finished download until it is
//! removed by hand. No resume or range requests are attempted.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{DeployError, Result};
use crate::matcher::{ArtifactKind, InstallPlan, PlannedArtifact};
use crate::progress;
use crate::report::Reporter;

const CHUNK_SIZE: usize = 128 * 1024;
/// Read/connect guard; aborts a fully idle transfer, not a slow one
const DOWNLOAD_TIMEOUT_SECS: u64 = 300;
const USER_AGENT_STRING: &str = "deploylangs (Rust)";

/// A planned artifact materialized on disk
#[derive(Debug, Clone)]
pub struct LocalArtifact {
    /// The manifest URL this file came from (raw form)
    pub reference: String,
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub size_bytes: u64,
    /// True when the file was already on disk and no transfer happened
    pub already_present: bool,
}

/// Sequential downloader writing under a fixed destination root
pub struct TransferManager {
    dest_root: PathBuf,
    client: Client,
}

impl TransferManager {
    pub fn new(dest_root: impl Into<PathBuf>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT_STRING)
            .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .build()
            .map_err(|e| DeployError::IoError {
                message: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            dest_root: dest_root.into(),
            client,
        })
    }

    /// Destination directory for an artifact kind, relative to the root
    pub fn dest_dir(&self, kind: ArtifactKind) -> PathBuf {
        if kind.is_cabinet() {
            self.dest_root.join("cab")
        } else {
            self.dest_root.join("appx")
        }
    }

    /// Deterministic local path for a planned artifact
    pub fn dest_path(&self, artifact: &PlannedArtifact) -> PathBuf {
        self.dest_dir(artifact.kind)
            .join(artifact.reference.file_name())
    }

    /// Fetch every planned artifact, in plan order, stopping on first failure
    pub fn fetch_all(
        &self,
        plan: &InstallPlan,
        reporter: &dyn Reporter,
    ) -> Result<Vec<LocalArtifact>> {
        let mut artifacts = Vec::with_capacity(plan.artifacts().len());
        for planned in plan.artifacts() {
            artifacts.push(self.fetch(planned, reporter)?);
        }
        Ok(artifacts)
    }

    /// Fetch one artifact, skipping the network when the file already exists
    pub fn fetch(
        &self,
        planned: &PlannedArtifact,
        reporter: &dyn Reporter,
    ) -> Result<LocalArtifact> {
        let dest = self.dest_path(planned);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if dest.exists() {
            reporter.debug(&format!("Already exists: {}", file_label(&dest)));
            let size_bytes = std::fs::metadata(&dest)?.len();
            return Ok(LocalArtifact {
                reference: planned.reference.raw.clone(),
                kind: planned.kind,
                path: dest,
                size_bytes,
                already_present: true,
            });
        }

        reporter.info(&format!("Downloading {}", file_label(&dest)));
        let size_bytes = self.download(&planned.reference.raw, &dest)?;
        reporter.success("Download complete.");

        Ok(LocalArtifact {
            reference: planned.reference.raw.clone(),
            kind: planned.kind,
            path: dest,
            size_bytes,
            already_present: false,
        })
    }

    /// Stream the URL to `dest` in fixed-size chunks with a byte progress bar
    fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        let transfer_err = |reason: String| DeployError::TransferFailed {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| transfer_err(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(transfer_err(format!("HTTP status {status}")));
        }

        let total = response.content_length();
        let pb = progress::download_bar(file_label(dest), total);

        let mut reader = response;
        let mut file = File::create(dest)?;
        let mut buf = vec![0u8; CHUNK_SIZE];
        let mut written: u64 = 0;

        loop {
            let n = reader
                .read(&mut buf)
                .map_err(|e| transfer_err(e.to_string()))?;
            if n == 0 {
                break;
            }
            file.write_all(&buf[..n])
                .map_err(|e| transfer_err(e.to_string()))?;
            written += n as u64;
            pb.inc(n as u64);
        }
        pb.finish_and_clear();

        Ok(written)
    }
}

fn file_label(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or("?")
}
