//! Progress bar display for downloads

use indicatif::{ProgressBar, ProgressStyle};

/// Byte progress bar for a single artifact download
///
/// When the server sends no Content-Length the bar degrades to a running
/// byte counter with a spinner.
pub fn download_bar(file_name: &str, total_bytes: Option<u64>) -> ProgressBar {
    let pb = match total_bytes {
        Some(total) => {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner} {msg} {bytes}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb
        }
    };
    pb.set_message(file_name.to_string());
    pb
}
