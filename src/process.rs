//! External process invocation
//!
//! Every host mutation goes through the [`CommandRunner`] capability so the
//! pipeline can be exercised in tests without touching a real OS. The real
//! runner streams merged child stdout and stderr dimmed to the terminal and
//! blocks until exit; there are no timeouts and no mid-run cancellation.

use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};

use console::style;

use crate::error::{DeployError, Result};
use crate::report::Reporter;

/// Capability for running external installer commands
pub trait CommandRunner {
    /// Run to completion; non-zero exit is an error
    fn run(&self, program: &str, args: &[String]) -> Result<()>;
}

/// Runner spawning real processes and echoing their output
pub struct SystemRunner<'a> {
    reporter: &'a dyn Reporter,
}

impl<'a> SystemRunner<'a> {
    pub fn new(reporter: &'a dyn Reporter) -> Self {
        Self { reporter }
    }
}

impl CommandRunner for SystemRunner<'_> {
    fn run(&self, program: &str, args: &[String]) -> Result<()> {
        self.reporter
            .info(&format!("Running: {} {}", program, args.join(" ")));

        let mut child = Command::new(program)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| DeployError::IoError {
                message: format!("Failed to start '{program}': {e}"),
            })?;

        // stderr is drained on its own thread so neither pipe can fill up
        // and stall the child while the other is being read.
        let stderr_reader = child.stderr.take().map(|stderr| {
            std::thread::spawn(move || {
                for line in BufReader::new(stderr).lines() {
                    let Ok(line) = line else { break };
                    if !line.trim().is_empty() {
                        println!("{}", style(line).dim());
                    }
                }
            })
        });

        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).lines() {
                let line = line?;
                if !line.trim().is_empty() {
                    println!("{}", style(line).dim());
                }
            }
        }

        if let Some(handle) = stderr_reader {
            let _ = handle.join();
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(DeployError::InstallerFailed {
                program: program.to_string(),
                code: status.code().unwrap_or(-1),
            });
        }
        Ok(())
    }
}
