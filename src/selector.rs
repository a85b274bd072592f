//! Target selection: language tag plus architecture tokens
//!
//! Manifest naming uses two different spellings for the same architecture
//! (`x64` in language-pack file names, `amd64` in Feature-on-Demand package
//! names), so the architecture enum exposes both.

use std::fmt;
use std::str::FromStr;

use crate::error::{DeployError, Result};

/// Host architecture, as spelled in the manifests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    X64,
    X86,
    Arm64,
}

impl Architecture {
    /// Token used in client language pack file names (`..._x64_fr-fr.cab`)
    pub fn path_token(self) -> &'static str {
        match self {
            Architecture::X64 => "x64",
            Architecture::X86 => "x86",
            Architecture::Arm64 => "arm64",
        }
    }

    /// Token used in Feature-on-Demand package names (`~amd64~~.cab`)
    pub fn package_token(self) -> &'static str {
        match self {
            Architecture::X64 => "amd64",
            Architecture::X86 => "x86",
            Architecture::Arm64 => "arm64",
        }
    }

    /// Detect the architecture this process is running on
    pub fn detect() -> Result<Self> {
        Self::from_machine(std::env::consts::ARCH)
    }

    /// Map a machine string (platform-reported or user-supplied) to an architecture
    pub fn from_machine(machine: &str) -> Result<Self> {
        match machine.to_lowercase().as_str() {
            "amd64" | "x86_64" | "x64" => Ok(Architecture::X64),
            "x86" | "i386" | "i686" => Ok(Architecture::X86),
            "arm64" | "aarch64" => Ok(Architecture::Arm64),
            other => Err(DeployError::UnsupportedArchitecture {
                machine: other.to_string(),
            }),
        }
    }
}

impl FromStr for Architecture {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_machine(s)
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_token())
    }
}

/// The (language, architecture) pair a run resolves and installs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub language: String,
    pub arch: Architecture,
}

impl Selector {
    pub fn new(language: impl Into<String>, arch: Architecture) -> Self {
        Self {
            language: language.into().to_lowercase(),
            arch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_machine_aliases() {
        assert_eq!(
            Architecture::from_machine("x86_64").unwrap(),
            Architecture::X64
        );
        assert_eq!(
            Architecture::from_machine("AMD64").unwrap(),
            Architecture::X64
        );
        assert_eq!(
            Architecture::from_machine("i686").unwrap(),
            Architecture::X86
        );
        assert_eq!(
            Architecture::from_machine("aarch64").unwrap(),
            Architecture::Arm64
        );
    }

    #[test]
    fn test_unsupported_machine() {
        let err = Architecture::from_machine("mips").unwrap_err();
        assert!(matches!(err, DeployError::UnsupportedArchitecture { .. }));
    }

    #[test]
    fn test_token_spellings_differ_for_x64_only() {
        assert_eq!(Architecture::X64.path_token(), "x64");
        assert_eq!(Architecture::X64.package_token(), "amd64");
        assert_eq!(Architecture::X86.path_token(), Architecture::X86.package_token());
        assert_eq!(
            Architecture::Arm64.path_token(),
            Architecture::Arm64.package_token()
        );
    }

    #[test]
    fn test_selector_lowercases_language() {
        let selector = Selector::new("FR-FR", Architecture::X64);
        assert_eq!(selector.language, "fr-fr");
    }
}
