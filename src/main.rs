//! deploylangs - Windows language pack deployment
//!
//! Resolves language pack artifacts from static URL manifests, downloads
//! them, and installs them onto the running system via dism and PowerShell
//! provisioning, finishing with user and welcome-screen locale changes.

use clap::Parser;

mod cli;
mod commands;
mod connectivity;
mod error;
mod locale;
mod manifest;
mod matcher;
mod pipeline;
mod process;
mod progress;
mod prompt;
mod report;
mod selector;
mod transfer;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // Interactive runs pause for acknowledgment on failure so a terminal
    // window never disappears before the operator reads why.
    let pause_on_failure = match cli.command {
        Commands::Install(ref args) => !args.yes,
        Commands::Languages(_) => true,
        Commands::Version | Commands::Completions(_) => false,
    };

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(args),
        Commands::Languages(args) => commands::languages::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if pause_on_failure {
            prompt::pause_before_exit();
        }
        std::process::exit(1);
    }
}
