//! Install command implementation
//!
//! Drives the whole run:
//! 1. Connectivity pre-flight
//! 2. Load and merge the URL manifests
//! 3. Fix the selector (architecture + language)
//! 4. Capture the install decision (extend/replace, keyboards)
//! 5. Match the manifests into an install plan
//! 6. Download every planned artifact (skipping files already on disk)
//! 7. Install cabinets, provision the experience pack, apply the locale
//! 8. Offer a reboot
//!
//! Any stage failure is terminal; there is no rollback.

use console::style;

use crate::cli::InstallArgs;
use crate::connectivity;
use crate::error::{DeployError, Result};
use crate::locale::InstallDecision;
use crate::manifest::Manifest;
use crate::matcher::InstallPlan;
use crate::pipeline::Pipeline;
use crate::process::{CommandRunner, SystemRunner};
use crate::prompt;
use crate::report::{ConsoleReporter, Reporter};
use crate::selector::{Architecture, Selector};
use crate::transfer::TransferManager;

/// Run the install command
pub fn run(args: InstallArgs) -> Result<()> {
    let reporter = ConsoleReporter;

    println!(
        "{}",
        style("Windows Language Pack Deployment").yellow().bold()
    );
    println!();

    if args.assume_online {
        reporter.warn("Skipping connectivity check (--assume-online)");
    } else {
        connectivity::check_internet(&reporter)?;
    }

    reporter.info("Loading input URL lists");
    let manifest = Manifest::load(&Manifest::default_paths(&args.manifest_dir))?;

    let arch = match args.arch {
        Some(arch) => arch,
        None => Architecture::detect()?,
    };
    reporter.info(&format!("Detected architecture: {arch}"));

    let language = resolve_language(&args, &manifest)?;
    let decision = resolve_decision(&args)?;
    let selector = Selector::new(language, arch);

    print_summary(&selector, decision, args.dry_run, &reporter);

    let plan = InstallPlan::build(&manifest, &selector)?;
    println!("\nFiles to download:");
    for artifact in plan.artifacts() {
        println!("  • {}", artifact.reference.file_name());
    }
    println!();

    let download_root = args
        .download_root
        .clone()
        .unwrap_or_else(|| args.manifest_dir.join("downloads"));
    let transfer = TransferManager::new(download_root)?;
    let artifacts = transfer.fetch_all(&plan, &reporter)?;

    if args.dry_run {
        reporter.warn("Dry-run enabled: installation skipped");
        return Ok(());
    }

    let runner = SystemRunner::new(&reporter);
    let pipeline = Pipeline::new(&runner, &reporter);
    pipeline.run(&artifacts, &selector.language, decision)?;

    println!();
    println!("{}", style("Installation complete.").green().bold());
    println!();
    println!("Note:");
    println!("  • DISM may report 'RestartNeeded : False' for individual packages.");
    println!("  • This is normal and does NOT indicate completion of language activation.");
    println!();
    println!("A reboot IS REQUIRED to activate the new display language.");

    offer_reboot(&args, &runner, &reporter)
}

/// Language from the flag, or interactively from the manifests' offering
fn resolve_language(args: &InstallArgs, manifest: &Manifest) -> Result<String> {
    if let Some(ref language) = args.language {
        return Ok(language.to_lowercase());
    }

    let languages = manifest.languages();
    if languages.is_empty() {
        return Err(DeployError::NoLanguagesFound);
    }
    if args.yes {
        // Non-interactive runs must name the language explicitly
        return Err(DeployError::Cancelled);
    }
    prompt::select_language(&languages)
}

/// Capture the list-mutation decision once, before anything runs
///
/// Explicit flags win; remaining questions are asked interactively unless
/// `--yes` accepts the defaults (extend, preserve keyboards).
fn resolve_decision(args: &InstallArgs) -> Result<InstallDecision> {
    let preserve_keyboards = if args.drop_keyboards {
        false
    } else if args.yes {
        true
    } else {
        prompt::confirm("Preserve existing keyboard layouts?")?
    };

    let extend_existing = if args.replace {
        false
    } else if args.yes {
        true
    } else {
        prompt::confirm("Add language instead of replacing existing ones?")?
    };

    Ok(InstallDecision {
        extend_existing,
        preserve_keyboards,
    })
}

fn print_summary(
    selector: &Selector,
    decision: InstallDecision,
    dry_run: bool,
    reporter: &dyn Reporter,
) {
    reporter.info(&format!(
        "Language list mode: {}, Keyboards preserved: {}",
        if decision.extend_existing {
            "EXTEND"
        } else {
            "REPLACE"
        },
        if decision.preserve_keyboards {
            "YES"
        } else {
            "NO"
        },
    ));

    println!();
    println!("Language: {}", selector.language);
    println!("Architecture: {}", selector.arch);
    println!("Mode: {}", if dry_run { "DRY-RUN" } else { "INSTALL" });
    println!(
        "Language list: {}",
        if decision.extend_existing {
            "Extend"
        } else {
            "Replace"
        }
    );
    println!(
        "Preserve keyboards: {}",
        if decision.preserve_keyboards {
            "Yes"
        } else {
            "No"
        }
    );
}

/// Reboot prompt; declined or non-interactive runs get a manual-reboot warning
fn offer_reboot(
    args: &InstallArgs,
    runner: &dyn CommandRunner,
    reporter: &dyn Reporter,
) -> Result<()> {
    if args.yes {
        reporter.warn("Reboot skipped. Please reboot manually to apply language changes.");
        return Ok(());
    }

    if prompt::confirm("Reboot now to apply changes?")? {
        reporter.info("Rebooting system now");
        runner.run(
            "shutdown",
            &["/r".to_string(), "/t".to_string(), "0".to_string()],
        )?;
    } else {
        reporter.warn("Reboot skipped. Please reboot manually to apply language changes.");
        prompt::pause_before_exit();
    }
    Ok(())
}
