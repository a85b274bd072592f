//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::selector::Architecture;

/// deploylangs - Windows language pack deployment
#[derive(Parser, Debug)]
#[command(
    name = "deploylangs",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Download and install Windows language packs from URL manifests",
    long_about = "deploylangs resolves language pack, Feature-on-Demand and Local Experience \
                  Pack artifacts from static URL manifests, downloads them, installs them via \
                  dism and Add-AppxProvisionedPackage, and applies the locale to the current \
                  user and the system welcome screen.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  deploylangs install\n    \
                  deploylangs install --language fr-fr --yes\n    \
                  deploylangs install --language de-de --dry-run\n    \
                  deploylangs languages\n"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve, download and install a language pack
    Install(InstallArgs),

    /// List languages available in the manifests
    Languages(LanguagesArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Interactive install:\n    deploylangs install\n\n\
                  Non-interactive install:\n    deploylangs install --language fr-fr --yes\n\n\
                  Resolve and download only:\n    deploylangs install --language fr-fr --dry-run\n\n\
                  Replace the language list instead of extending it:\n    deploylangs install --language fr-fr --replace --yes")]
pub struct InstallArgs {
    /// Language tag to install (e.g. fr-fr); prompts interactively if omitted
    #[arg(long, short = 'l')]
    pub language: Option<String>,

    /// Override the detected architecture (x64, x86, arm64)
    #[arg(long)]
    pub arch: Option<Architecture>,

    /// Directory holding the .dat manifest files
    #[arg(long, default_value = ".")]
    pub manifest_dir: PathBuf,

    /// Destination root for downloads (defaults to <manifest-dir>/downloads)
    #[arg(long)]
    pub download_root: Option<PathBuf>,

    /// Resolve and download only; skip every host-mutating stage
    #[arg(long)]
    pub dry_run: bool,

    /// Replace the user language list instead of extending it
    #[arg(long)]
    pub replace: bool,

    /// Rebuild the language list, dropping keyboards on existing entries
    #[arg(long)]
    pub drop_keyboards: bool,

    /// Non-interactive: skip confirmation prompts, never pause, no reboot
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Skip the internet connectivity pre-flight probe
    #[arg(long)]
    pub assume_online: bool,
}

/// Arguments for the languages command
#[derive(Parser, Debug)]
pub struct LanguagesArgs {
    /// Directory holding the .dat manifest files
    #[arg(long, default_value = ".")]
    pub manifest_dir: PathBuf,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
