//! Languages command: list what the manifests can install

use crate::cli::LanguagesArgs;
use crate::error::{DeployError, Result};
use crate::manifest::Manifest;

/// Print the available languages, one per line with an index
pub fn run(args: LanguagesArgs) -> Result<()> {
    let manifest = Manifest::load(&Manifest::default_paths(&args.manifest_dir))?;

    let languages = manifest.languages();
    if languages.is_empty() {
        return Err(DeployError::NoLanguagesFound);
    }

    println!("Available languages:");
    for (i, language) in languages.iter().enumerate() {
        println!("  {:>3}  {}", i + 1, language);
    }

    Ok(())
}
