//! Install orchestrator: the ordered stage sequence after transfer
//!
//! Stages run strictly in order and every external invocation failure halts
//! the whole run immediately; nothing is rolled back. Cabinets install one
//! dism invocation per file, then the experience pack is provisioned, then
//! the locale applier runs last.

use crate::error::Result;
use crate::locale::{self, InstallDecision};
use crate::matcher::ArtifactKind;
use crate::process::CommandRunner;
use crate::report::Reporter;
use crate::transfer::LocalArtifact;

/// Executes the host-mutating stages over downloaded artifacts
pub struct Pipeline<'a> {
    runner: &'a dyn CommandRunner,
    reporter: &'a dyn Reporter,
}

impl<'a> Pipeline<'a> {
    pub fn new(runner: &'a dyn CommandRunner, reporter: &'a dyn Reporter) -> Self {
        Self { runner, reporter }
    }

    /// Run all install stages: cabinets, experience pack, locale
    pub fn run(
        &self,
        artifacts: &[LocalArtifact],
        language: &str,
        decision: InstallDecision,
    ) -> Result<()> {
        self.install_cabinets(artifacts)?;
        self.install_experience_pack(artifacts)?;
        locale::apply_user_locale(language, decision, self.runner, self.reporter)?;
        locale::apply_system_locale(language, self.runner, self.reporter)?;
        Ok(())
    }

    /// One dism invocation per cabinet, in plan order
    ///
    /// A non-zero exit leaves the remaining cabinets untouched.
    fn install_cabinets(&self, artifacts: &[LocalArtifact]) -> Result<()> {
        let cabs: Vec<&LocalArtifact> =
            artifacts.iter().filter(|a| a.kind.is_cabinet()).collect();

        for (i, cab) in cabs.iter().enumerate() {
            self.reporter.info(&format!(
                "Installing CAB {}/{}: {}",
                i + 1,
                cabs.len(),
                file_label(cab)
            ));
            self.runner.run(
                "dism",
                &[
                    "/Online".to_string(),
                    "/Add-Package".to_string(),
                    format!("/PackagePath:{}", cab.path.display()),
                    "/NoRestart".to_string(),
                ],
            )?;
            self.reporter.success(&format!("Installed {}", file_label(cab)));
        }
        Ok(())
    }

    /// Provision the Local Experience Pack, with its license when present
    ///
    /// Missing pack is a warning, not a failure; later duplicates of either
    /// artifact are ignored.
    fn install_experience_pack(&self, artifacts: &[LocalArtifact]) -> Result<()> {
        let pack = artifacts
            .iter()
            .find(|a| a.kind == ArtifactKind::ExperiencePackage);
        let license = artifacts.iter().find(|a| a.kind == ArtifactKind::LicenseFile);

        let Some(pack) = pack else {
            self.reporter.warn("No Language Experience Pack found");
            return Ok(());
        };

        self.reporter.info("Installing Language Experience Pack");
        let command = match license {
            Some(license) => format!(
                "Add-AppxProvisionedPackage -Online -PackagePath '{}' -LicensePath '{}'",
                pack.path.display(),
                license.path.display()
            ),
            None => format!(
                "Add-AppxProvisionedPackage -Online -PackagePath '{}' -SkipLicense",
                pack.path.display()
            ),
        };
        self.runner.run(
            "powershell",
            &[
                "-NoProfile".to_string(),
                "-Command".to_string(),
                command,
            ],
        )
    }
}

fn file_label(artifact: &LocalArtifact) -> String {
    artifact
        .path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| artifact.path.display().to_string())
}
