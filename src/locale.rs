//! Locale applier: push the installed language into the user and system config
//!
//! Two independent PowerShell invocations: one mutates the user language
//! list (shape decided by [`InstallDecision`]) plus the UI override and
//! system locale, the other applies the language to the system/welcome
//! screen through an `intl.cpl` unattend descriptor. Both use the same
//! fatal-halt policy as the install stages.

use crate::error::Result;
use crate::process::CommandRunner;
use crate::report::Reporter;

/// How the user language list is mutated; captured once, never changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallDecision {
    /// Add to the existing list instead of replacing it outright
    pub extend_existing: bool,
    /// Keep the keyboards attached to existing list entries
    ///
    /// Ignored when `extend_existing` is false: replacing the list drops
    /// them either way.
    pub preserve_keyboards: bool,
}

impl Default for InstallDecision {
    fn default() -> Self {
        // The interactive prompts default to yes/yes
        Self {
            extend_existing: true,
            preserve_keyboards: true,
        }
    }
}

/// PowerShell script mutating the user language list per the decision table
pub fn user_language_script(language: &str, decision: InstallDecision) -> String {
    if decision.extend_existing {
        if decision.preserve_keyboards {
            // Append if absent; existing entries and their keyboards untouched
            format!(
                "$list = Get-WinUserLanguageList; \
                 if ($list.LanguageTag -notcontains '{language}') {{ \
                 $list.Add('{language}') }}; \
                 Set-WinUserLanguageList $list -Force; \
                 Set-WinUILanguageOverride -Language {language}; \
                 Set-WinSystemLocale -SystemLocale {language}"
            )
        } else {
            // Rebuild with the new language first; reconstruction drops the
            // keyboards attached to the previous entries
            format!(
                "$list = Get-WinUserLanguageList | \
                 Where-Object {{ $_.LanguageTag -ne '{language}' }}; \
                 $new = New-WinUserLanguageList '{language}'; \
                 $new.AddRange($list); \
                 Set-WinUserLanguageList $new -Force; \
                 Set-WinUILanguageOverride -Language {language}; \
                 Set-WinSystemLocale -SystemLocale {language}"
            )
        }
    } else {
        // Single-entry list; preserve_keyboards is irrelevant here
        format!(
            "Set-WinUILanguageOverride -Language {language}; \
             $list = New-WinUserLanguageList '{language}'; \
             Set-WinUserLanguageList $list -Force; \
             Set-WinSystemLocale -SystemLocale {language}"
        )
    }
}

/// Unattend descriptor applying the language to the welcome/logon screen
///
/// Names both the current user and the system account, then hands the file
/// to `intl.cpl`.
pub fn welcome_screen_script(language: &str) -> String {
    format!(
        r#"
$xml = @"
<gs:GlobalizationServices xmlns:gs="urn:longhornGlobalizationUnattend">
  <gs:UserList>
    <gs:User UserID="Current"/>
    <gs:User UserID="System"/>
  </gs:UserList>
  <gs:UILanguagePreferences>
    <gs:UILanguage Value="{language}"/>
  </gs:UILanguagePreferences>
</gs:GlobalizationServices>
"@

$path = "$env:TEMP\intl.xml"
$xml | Out-File -Encoding UTF8 $path

control.exe "intl.cpl,,/f:$path"
"#
    )
}

fn powershell_args(script: String) -> Vec<String> {
    vec![
        "-NoProfile".to_string(),
        "-ExecutionPolicy".to_string(),
        "Bypass".to_string(),
        "-Command".to_string(),
        script,
    ]
}

/// Apply the language to the current user list and UI override
pub fn apply_user_locale(
    language: &str,
    decision: InstallDecision,
    runner: &dyn CommandRunner,
    reporter: &dyn Reporter,
) -> Result<()> {
    reporter.info("Applying language settings to current user and system");
    runner.run(
        "powershell",
        &powershell_args(user_language_script(language, decision)),
    )?;
    reporter.success(&format!("Language '{language}' set as system UI language"));
    Ok(())
}

/// Apply the language to the system login / welcome screen
pub fn apply_system_locale(
    language: &str,
    runner: &dyn CommandRunner,
    reporter: &dyn Reporter,
) -> Result<()> {
    reporter.info("Applying language to system login / welcome screen");
    runner.run("powershell", &powershell_args(welcome_screen_script(language)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::testing::RecordingRunner;
    use crate::report::SilentReporter;

    #[test]
    fn test_extend_preserve_appends_if_absent() {
        let script = user_language_script(
            "fr-fr",
            InstallDecision {
                extend_existing: true,
                preserve_keyboards: true,
            },
        );
        assert!(script.contains("Get-WinUserLanguageList"));
        assert!(script.contains("-notcontains 'fr-fr'"));
        assert!(script.contains("$list.Add('fr-fr')"));
        assert!(!script.contains("New-WinUserLanguageList"));
    }

    #[test]
    fn test_extend_without_keyboards_rebuilds_list() {
        let script = user_language_script(
            "fr-fr",
            InstallDecision {
                extend_existing: true,
                preserve_keyboards: false,
            },
        );
        assert!(script.contains("New-WinUserLanguageList 'fr-fr'"));
        assert!(script.contains("$new.AddRange($list)"));
        assert!(script.contains("$_.LanguageTag -ne 'fr-fr'"));
    }

    #[test]
    fn test_replace_is_single_entry_regardless_of_keyboards() {
        for preserve_keyboards in [true, false] {
            let script = user_language_script(
                "fr-fr",
                InstallDecision {
                    extend_existing: false,
                    preserve_keyboards,
                },
            );
            assert!(script.contains("New-WinUserLanguageList 'fr-fr'"));
            assert!(!script.contains("AddRange"));
            assert!(!script.contains("Get-WinUserLanguageList"));
        }
    }

    #[test]
    fn test_every_variant_sets_override_and_system_locale() {
        for (extend_existing, preserve_keyboards) in
            [(true, true), (true, false), (false, true)]
        {
            let script = user_language_script(
                "de-de",
                InstallDecision {
                    extend_existing,
                    preserve_keyboards,
                },
            );
            assert!(script.contains("Set-WinUILanguageOverride -Language de-de"));
            assert!(script.contains("Set-WinSystemLocale -SystemLocale de-de"));
        }
    }

    #[test]
    fn test_welcome_screen_descriptor_names_both_accounts() {
        let script = welcome_screen_script("ja-jp");
        assert!(script.contains(r#"<gs:User UserID="Current"/>"#));
        assert!(script.contains(r#"<gs:User UserID="System"/>"#));
        assert!(script.contains(r#"<gs:UILanguage Value="ja-jp"/>"#));
        assert!(script.contains("intl.cpl,,/f:"));
    }

    #[test]
    fn test_apply_invokes_powershell_with_bypass() {
        let runner = RecordingRunner::new();
        apply_user_locale("fr-fr", InstallDecision::default(), &runner, &SilentReporter)
            .unwrap();
        apply_system_locale("fr-fr", &runner, &SilentReporter).unwrap();

        assert_eq!(runner.programs(), vec!["powershell", "powershell"]);
        let args = runner.args_of(0);
        assert_eq!(args[0], "-NoProfile");
        assert_eq!(args[1], "-ExecutionPolicy");
        assert_eq!(args[2], "Bypass");
    }
}
