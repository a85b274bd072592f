//! Common test utilities for deploylangs integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// Manifest file names the binary expects in the manifest directory
pub const MANIFEST_FILES: [&str; 3] =
    ["win10LangExpPacks.dat", "win10FoD.dat", "win10LangOpts.dat"];

/// A test workspace holding manifest files and a downloads directory
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write all three manifest files; the first gets `lines`, the rest are empty
    pub fn seed_manifests(&self, lines: &[&str]) {
        self.write_file(MANIFEST_FILES[0], &format!("{}\n", lines.join("\n")));
        self.write_file(MANIFEST_FILES[1], "");
        self.write_file(MANIFEST_FILES[2], "");
    }

    /// Write a file in the workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Pre-create a downloaded artifact so the transfer stage skips the network
    pub fn seed_download(&self, subdir: &str, name: &str) {
        self.write_file(&format!("downloads/{subdir}/{name}"), "cached");
    }

    /// Check if a file exists in the workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }
}
