//! Artifact matcher: classify manifest URLs into a typed install plan
//!
//! Classification is case-folded, percent-decoded substring matching against
//! the selector, not URL parsing. The rules run in a fixed priority order:
//! experience-pack files first (their suffix conditions are narrower), then
//! the client language pack cabinet, then Feature-on-Demand cabinets. The
//! first rule that claims a reference wins; unclaimed references are dropped
//! silently.

use crate::error::{DeployError, Result};
use crate::manifest::{ArtifactReference, Manifest, is_winpe};
use crate::selector::Selector;

/// Feature-on-Demand categories worth installing per language
const FEATURE_KEYWORDS: [&str; 4] = [
    "languagefeatures-basic-",
    "languagefeatures-ocr-",
    "languagefeatures-texttospeech-",
    "languagefeatures-fonts-",
];

/// What a matched manifest entry installs as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Base client language pack cabinet (dism)
    ExperienceCab,
    /// Feature-on-Demand cabinet: basic/OCR/text-to-speech/fonts (dism)
    FeatureCab,
    /// Local Experience Pack .appx (Add-AppxProvisionedPackage)
    ExperiencePackage,
    /// License.xml accompanying the experience pack
    LicenseFile,
}

impl ArtifactKind {
    /// Cabinets install via dism; packages and licenses via provisioning
    pub fn is_cabinet(self) -> bool {
        matches!(self, ArtifactKind::ExperienceCab | ArtifactKind::FeatureCab)
    }
}

/// A manifest entry claimed by a matcher rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedArtifact {
    pub reference: ArtifactReference,
    pub kind: ArtifactKind,
}

/// Ordered sequence of artifacts to download and install
#[derive(Debug, Clone)]
pub struct InstallPlan {
    artifacts: Vec<PlannedArtifact>,
}

impl InstallPlan {
    /// Match every manifest entry against the selector
    ///
    /// An empty result is terminal: the run fails before any download begins.
    pub fn build(manifest: &Manifest, selector: &Selector) -> Result<Self> {
        let artifacts: Vec<PlannedArtifact> = manifest
            .entries()
            .iter()
            .filter_map(|reference| {
                classify(reference, selector).map(|kind| PlannedArtifact {
                    reference: reference.clone(),
                    kind,
                })
            })
            .collect();

        if artifacts.is_empty() {
            return Err(DeployError::NoMatchingArtifacts {
                language: selector.language.clone(),
                arch: selector.arch.to_string(),
            });
        }

        Ok(Self { artifacts })
    }

    pub fn artifacts(&self) -> &[PlannedArtifact] {
        &self.artifacts
    }
}

/// Classify one reference; `None` means it is not part of this run
///
/// Rule order matters: an experience-pack License.xml would otherwise be
/// eligible for the keyword-based Feature-on-Demand rule.
pub fn classify(reference: &ArtifactReference, selector: &Selector) -> Option<ArtifactKind> {
    let decoded = reference.decoded.as_str();

    if is_winpe(decoded) {
        return None;
    }

    // Rule 1: files under the selected language's Local Experience Pack dir.
    // The rule consumes the reference even when neither suffix matches.
    let lep_segment = format!("/localexperiencepack/{}/", selector.language);
    if decoded.contains(&lep_segment) {
        if decoded.ends_with(".appx") {
            return Some(ArtifactKind::ExperiencePackage);
        }
        if decoded.ends_with("license.xml") {
            return Some(ArtifactKind::LicenseFile);
        }
        return None;
    }

    // Rule 2: the base client language pack for this arch/language
    let client_pack = format!(
        "microsoft-windows-client-language-pack_{}_{}.cab",
        selector.arch.path_token(),
        selector.language
    );
    if decoded.contains(&client_pack) {
        return Some(ArtifactKind::ExperienceCab);
    }

    // Rule 3: Feature-on-Demand cabinets for this language/arch, filtered to
    // the categories we care about. First keyword hit wins; the reference
    // matches at most once.
    let lang_marker = format!("-{}-package", selector.language);
    let arch_marker = format!("~{}~~.cab", selector.arch.package_token());
    if decoded.contains("microsoft-windows-languagefeatures-")
        && decoded.contains(&lang_marker)
        && decoded.contains(&arch_marker)
        && FEATURE_KEYWORDS.iter().any(|k| decoded.contains(k))
    {
        return Some(ArtifactKind::FeatureCab);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::Architecture;

    fn selector() -> Selector {
        Selector::new("fr-fr", Architecture::X64)
    }

    fn reference(url: &str) -> ArtifactReference {
        ArtifactReference::new(url)
    }

    #[test]
    fn test_experience_package_and_license_classified_by_suffix() {
        let sel = selector();
        assert_eq!(
            classify(
                &reference(
                    "https://cdn/LocalExperiencePack/fr-fr/LanguageExperiencePack.fr-fr.Neutral.appx"
                ),
                &sel
            ),
            Some(ArtifactKind::ExperiencePackage)
        );
        assert_eq!(
            classify(
                &reference("https://cdn/LocalExperiencePack/fr-fr/License.xml"),
                &sel
            ),
            Some(ArtifactKind::LicenseFile)
        );
    }

    #[test]
    fn test_experience_pack_dir_consumes_other_files() {
        // Neither .appx nor license.xml: dropped, not handed to later rules
        let sel = selector();
        assert_eq!(
            classify(
                &reference("https://cdn/LocalExperiencePack/fr-fr/readme.txt"),
                &sel
            ),
            None
        );
    }

    #[test]
    fn test_other_language_experience_pack_ignored() {
        let sel = selector();
        assert_eq!(
            classify(
                &reference("https://cdn/LocalExperiencePack/de-de/License.xml"),
                &sel
            ),
            None
        );
    }

    #[test]
    fn test_client_language_pack_matches_arch_and_language() {
        let sel = selector();
        let url = "https://cdn/pool/microsoft-windows-client-language-pack_x64_fr-fr.cab";
        assert_eq!(classify(&reference(url), &sel), Some(ArtifactKind::ExperienceCab));

        let arm = Selector::new("fr-fr", Architecture::Arm64);
        assert_eq!(classify(&reference(url), &arm), None);
    }

    #[test]
    fn test_feature_cab_requires_all_markers() {
        let sel = selector();
        let url = "https://cdn/Microsoft-Windows-LanguageFeatures-Basic-fr-fr-Package~31bf3856ad364e35~amd64~~.cab";
        assert_eq!(classify(&reference(url), &sel), Some(ArtifactKind::FeatureCab));

        // Wrong arch token
        let url_arm = "https://cdn/Microsoft-Windows-LanguageFeatures-Basic-fr-fr-Package~31bf3856ad364e35~arm64~~.cab";
        assert_eq!(classify(&reference(url_arm), &sel), None);

        // Unlisted feature category (e.g. handwriting) is skipped
        let url_hw = "https://cdn/Microsoft-Windows-LanguageFeatures-Handwriting-fr-fr-Package~31bf3856ad364e35~amd64~~.cab";
        assert_eq!(classify(&reference(url_hw), &sel), None);
    }

    #[test]
    fn test_reference_with_two_feature_keywords_plans_once() {
        // A name carrying two category markers still yields a single entry
        let manifest = Manifest::from_lines(&[
            "https://cdn/Microsoft-Windows-LanguageFeatures-Basic-languagefeatures-ocr-fr-fr-Package~31bf3856ad364e35~amd64~~.cab",
        ]);
        let plan = InstallPlan::build(&manifest, &selector()).unwrap();
        assert_eq!(plan.artifacts().len(), 1);
        assert_eq!(plan.artifacts()[0].kind, ArtifactKind::FeatureCab);
    }

    #[test]
    fn test_winpe_never_planned() {
        let sel = selector();
        assert_eq!(
            classify(
                &reference("https://cdn/WinPE/LocalExperiencePack/fr-fr/License.xml"),
                &sel
            ),
            None
        );
        assert_eq!(
            classify(
                &reference(
                    "https://cdn/winpe-microsoft-windows-client-language-pack_x64_fr-fr.cab"
                ),
                &sel
            ),
            None
        );
    }

    #[test]
    fn test_percent_encoded_references_match() {
        let sel = selector();
        assert_eq!(
            classify(
                &reference("https://cdn/LocalExperiencePack/fr-fr/License%2Exml"),
                &sel
            ),
            Some(ArtifactKind::LicenseFile)
        );
    }

    #[test]
    fn test_plan_is_deterministic_and_ordered() {
        let manifest = Manifest::from_lines(&[
            "https://cdn/microsoft-windows-client-language-pack_x64_fr-fr.cab",
            "https://cdn/LocalExperiencePack/fr-fr/Pack.appx",
            "https://cdn/Microsoft-Windows-LanguageFeatures-OCR-fr-fr-Package~x~amd64~~.cab",
            "https://cdn/LocalExperiencePack/fr-fr/License.xml",
        ]);
        let sel = selector();

        let first = InstallPlan::build(&manifest, &sel).unwrap();
        let second = InstallPlan::build(&manifest, &sel).unwrap();
        assert_eq!(first.artifacts(), second.artifacts());

        let kinds: Vec<ArtifactKind> = first.artifacts().iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ArtifactKind::ExperienceCab,
                ArtifactKind::ExperiencePackage,
                ArtifactKind::FeatureCab,
                ArtifactKind::LicenseFile,
            ]
        );
    }

    #[test]
    fn test_license_entry_appears_exactly_once() {
        let manifest = Manifest::from_lines(&[
            "https://cdn/LocalExperiencePack/fr-fr/License.xml",
            "https://cdn/other/file.txt",
        ]);
        let plan = InstallPlan::build(&manifest, &selector()).unwrap();
        let licenses: Vec<_> = plan
            .artifacts()
            .iter()
            .filter(|a| a.kind == ArtifactKind::LicenseFile)
            .collect();
        assert_eq!(licenses.len(), 1);
        assert_eq!(
            licenses[0].reference.raw,
            "https://cdn/LocalExperiencePack/fr-fr/License.xml"
        );
    }

    #[test]
    fn test_empty_plan_is_terminal() {
        let manifest = Manifest::from_lines(&["https://cdn/unrelated/file.iso"]);
        let err = InstallPlan::build(&manifest, &selector()).unwrap_err();
        assert!(matches!(err, DeployError::NoMatchingArtifacts { .. }));
    }
}
