//! Manifest store: the flat lists of artifact URLs shipped as .dat files
//!
//! Manifests are newline-delimited URL strings. Loading deduplicates while
//! preserving first-seen order; all matching later happens against the
//! percent-decoded, lowercased form of each entry.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

use crate::error::{DeployError, Result};

/// Manifest file names expected next to the binary (or under --manifest-dir)
pub const MANIFEST_FILES: [&str; 3] = ["win10LangExpPacks.dat", "win10FoD.dat", "win10LangOpts.dat"];

const EXPERIENCE_PACK_SEGMENT: &str = "/localexperiencepack/";

/// A single artifact URL from a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReference {
    /// The URL exactly as it appears in the manifest
    pub raw: String,
    /// Percent-decoded, lowercased form used for matching
    pub decoded: String,
}

impl ArtifactReference {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let decoded = percent_decode_str(&raw)
            .decode_utf8_lossy()
            .to_lowercase();
        Self { raw, decoded }
    }

    /// Last path segment of the decoded URL, used as the local file name
    pub fn file_name(&self) -> &str {
        self.decoded
            .rsplit('/')
            .next()
            .unwrap_or(self.decoded.as_str())
    }
}

/// Returns true for artifacts targeting the Windows Preinstallation Environment
///
/// WinPE artifacts are categorically excluded from every install plan.
pub fn is_winpe(decoded: &str) -> bool {
    decoded.contains("winpe") || decoded.contains("windows preinstallation environment")
}

/// Deduplicated, order-preserving collection of artifact references
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    entries: Vec<ArtifactReference>,
}

impl Manifest {
    /// Load and merge manifest files, preserving first-seen order
    pub fn load(paths: &[PathBuf]) -> Result<Self> {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();

        for path in paths {
            if !path.exists() {
                return Err(DeployError::ManifestMissing {
                    path: path.display().to_string(),
                });
            }
            let content = std::fs::read_to_string(path)?;
            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() || !seen.insert(line.to_string()) {
                    continue;
                }
                entries.push(ArtifactReference::new(line));
            }
        }

        Ok(Self { entries })
    }

    /// The default manifest file paths under `dir`
    pub fn default_paths(dir: &Path) -> Vec<PathBuf> {
        MANIFEST_FILES.iter().map(|name| dir.join(name)).collect()
    }

    pub fn entries(&self) -> &[ArtifactReference] {
        &self.entries
    }

    /// Distinct language tags offered by the manifests, sorted
    ///
    /// A language is anything appearing as the path segment right after
    /// `/LocalExperiencePack/`.
    pub fn languages(&self) -> Vec<String> {
        let mut langs: Vec<String> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let (_, rest) = entry.decoded.split_once(EXPERIENCE_PACK_SEGMENT)?;
                let (tag, _) = rest.split_once('/')?;
                Some(tag.to_string())
            })
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        langs.sort();
        langs
    }

    #[cfg(test)]
    pub fn from_lines(lines: &[&str]) -> Self {
        let mut seen = HashSet::new();
        let entries = lines
            .iter()
            .filter(|line| seen.insert(line.to_string()))
            .map(|line| ArtifactReference::new(*line))
            .collect();
        Self { entries }
    }
}
