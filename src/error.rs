//! Error types and handling for deploylangs
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Every variant is terminal for the run: there is no partial-success
//! reporting or automatic retry anywhere in the pipeline.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for deploylangs operations
#[derive(Error, Diagnostic, Debug)]
pub enum DeployError {
    // Pre-flight errors
    #[error("No internet connection detected")]
    #[diagnostic(
        code(deploylangs::net::offline),
        help("Check your network connection, or pass --assume-online to skip the probe")
    )]
    ConnectivityFailed,

    #[error("Missing manifest file: {path}")]
    #[diagnostic(
        code(deploylangs::manifest::missing),
        help("Place the .dat manifest files next to the binary or pass --manifest-dir")
    )]
    ManifestMissing { path: String },

    #[error("Unsupported architecture: {machine}")]
    #[diagnostic(
        code(deploylangs::arch::unsupported),
        help("Supported architectures: x64, x86, arm64")
    )]
    UnsupportedArchitecture { machine: String },

    // Resolution errors
    #[error("No languages found in manifests")]
    #[diagnostic(
        code(deploylangs::resolve::no_languages),
        help("The manifests contain no /LocalExperiencePack/ entries to choose from")
    )]
    NoLanguagesFound,

    #[error("No matching artifacts for language '{language}' on {arch}")]
    #[diagnostic(
        code(deploylangs::resolve::no_matching_artifacts),
        help("The manifests carry nothing for this language/architecture pair")
    )]
    NoMatchingArtifacts { language: String, arch: String },

    // Transfer errors
    #[error("Failed to download {url}: {reason}")]
    #[diagnostic(
        code(deploylangs::transfer::failed),
        help("No retry or resume is attempted; remove any partial file under downloads/ before rerunning")
    )]
    TransferFailed { url: String, reason: String },

    // Installation errors
    #[error("Command '{program}' failed with exit code {code}")]
    #[diagnostic(code(deploylangs::install::exit_nonzero))]
    InstallerFailed { program: String, code: i32 },

    // User interaction
    #[error("Cancelled by user")]
    #[diagnostic(code(deploylangs::cancelled))]
    Cancelled,

    #[error("IO error: {message}")]
    #[diagnostic(code(deploylangs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for DeployError {
    fn from(err: std::io::Error) -> Self {
        DeployError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for DeployError {
    fn from(err: inquire::InquireError) -> Self {
        match err {
            inquire::InquireError::OperationCanceled
            | inquire::InquireError::OperationInterrupted => DeployError::Cancelled,
            other => DeployError::IoError {
                message: other.to_string(),
            },
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, DeployError>;
