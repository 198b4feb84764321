use super::{
    core::run_invocation,
    types::{RunStatus, ToolLocator},
};
use crate::builder::Invocation;
use crate::error::QuickTubeError;

/// Runs a command in the foreground, printing status lines around the
/// tool's own output.
pub fn run_cli(inv: &Invocation, locator: &ToolLocator) -> Result<(), QuickTubeError> {
    println!();
    run_invocation(inv, locator, |status| match status {
        RunStatus::Starting(tool) => println!("🚀 Starting {} ...", tool),
        RunStatus::Running(pid) => println!("   -> PID: {}  (Ctrl+C to cancel)\n", pid),
        RunStatus::Finished => println!(),
        RunStatus::Interrupted => println!("\n⏹  Cancelled."),
    })
}
