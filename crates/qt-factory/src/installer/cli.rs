use super::core::install_tool;
use super::types::InstallStatus;
use crate::error::QuickTubeError;
use indicatif::{ProgressBar, ProgressStyle};
use qt_core::Tool;
use std::path::{Path, PathBuf};

pub type InstallReport = Vec<(Tool, Result<PathBuf, QuickTubeError>)>;

/// Downloads each tool with a progress bar. Failures don't stop the others.
pub fn run_cli(tools: &[Tool], bin_dir: &Path) -> InstallReport {
    println!("\nTools will be installed/updated in: {:?}", bin_dir);

    let mut report = Vec::new();
    for &tool in tools {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} {msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );

        let pb_clone = pb.clone();
        let result = install_tool(tool, bin_dir, move |status| match status {
            InstallStatus::Starting(t) => pb_clone.set_message(format!("Downloading {}", t)),
            InstallStatus::Downloading {
                downloaded, total, ..
            } => {
                if let Some(t) = total {
                    pb_clone.set_length(t);
                }
                pb_clone.set_position(downloaded);
            }
            InstallStatus::Finished(t, _) => pb_clone.finish_with_message(format!("{} done", t)),
        });

        match &result {
            Ok(path) => pb.println(format!("✔ {} updated: {:?}", tool, path)),
            Err(e) => {
                pb.abandon();
                eprintln!("❌ Failed to update {}: {}", tool, e);
            }
        }
        report.push((tool, result));
    }
    report
}
