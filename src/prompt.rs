//! Interactive prompts: language menu, yes/no decisions, exit pause
//!
//! The language menu shows a short list of common languages first with a
//! "Show all languages" escape hatch into the full sorted list. ESC or the
//! Exit entry cancel the run.

use inquire::{Confirm, Select};

use crate::error::{DeployError, Result};

const COMMON_LANGS: [&str; 11] = [
    "en-us", "es-es", "fr-fr", "de-de", "it-it", "pt-br", "ru-ru", "zh-cn", "zh-tw", "ja-jp",
    "ko-kr",
];

const SHOW_ALL: &str = "Show all languages";
const EXIT: &str = "Exit";
const BACK: &str = "Back";

/// Human-readable label for a language tag
fn language_label(tag: &str) -> &'static str {
    match tag {
        "en-us" => "English (United States)",
        "es-es" => "Spanish (Spain)",
        "fr-fr" => "French (France)",
        "de-de" => "German (Germany)",
        "it-it" => "Italian (Italy)",
        "pt-br" => "Portuguese (Brazil)",
        "ru-ru" => "Russian (Russia)",
        "zh-cn" => "Chinese (Simplified)",
        "zh-tw" => "Chinese (Traditional)",
        "ja-jp" => "Japanese",
        "ko-kr" => "Korean",
        _ => "Unknown",
    }
}

fn labeled(tag: &str) -> String {
    format!("{} - {}", tag, language_label(tag))
}

fn tag_from_labeled(choice: &str) -> String {
    choice
        .split_once(" - ")
        .map(|(tag, _)| tag.to_string())
        .unwrap_or_else(|| choice.to_string())
}

/// Pick a language from the manifests' offering
pub fn select_language(languages: &[String]) -> Result<String> {
    let common: Vec<&String> = COMMON_LANGS
        .iter()
        .filter_map(|c| languages.iter().find(|l| l.as_str() == *c))
        .collect();

    loop {
        let mut items: Vec<String> = common.iter().map(|l| labeled(l)).collect();
        items.push(SHOW_ALL.to_string());
        items.push(EXIT.to_string());

        let Some(choice) = Select::new("Select language to install:", items)
            .with_page_size(15)
            .without_filtering()
            .with_help_message("↑↓ to move, ENTER to select, ESC to cancel")
            .prompt_skippable()?
        else {
            return Err(DeployError::Cancelled);
        };

        if choice == EXIT {
            return Err(DeployError::Cancelled);
        }

        if choice == SHOW_ALL {
            let mut all: Vec<String> = languages.iter().map(|l| labeled(l)).collect();
            all.push(BACK.to_string());

            let Some(sub) = Select::new("All available languages:", all)
                .with_page_size(15)
                .with_help_message("↑↓ to move, ENTER to select, ESC to go back")
                .prompt_skippable()?
            else {
                continue;
            };
            if sub == BACK {
                continue;
            }
            return Ok(tag_from_labeled(&sub));
        }

        return Ok(tag_from_labeled(&choice));
    }
}

/// Yes/no question defaulting to yes
pub fn confirm(question: &str) -> Result<bool> {
    Ok(Confirm::new(question)
        .with_default(true)
        .with_help_message("Press Enter to confirm, or 'n' to decline")
        .prompt()?)
}

/// Block for Enter so the terminal window never closes before the operator
/// has read the outcome; no-op when no terminal is attached
pub fn pause_before_exit() {
    if !console::user_attended() {
        return;
    }
    println!();
    println!("Press Enter to exit...");
    let mut buf = String::new();
    let _ = std::io::stdin().read_line(&mut buf);
}
