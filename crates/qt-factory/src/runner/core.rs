use super::types::{RunStatus, ToolLocator};
use super::utils::{clear_interrupt, take_interrupt};
use crate::builder::Invocation;
use crate::error::QuickTubeError;
use qt_core::Tool;
use std::{
    ffi::OsString,
    path::Path,
    process::{Command, Stdio},
};
use tracing::{info, warn};

/// Locates and runs one invocation, blocking until the tool exits.
pub fn run_invocation<F>(
    inv: &Invocation,
    locator: &ToolLocator,
    callback: F,
) -> Result<(), QuickTubeError>
where
    F: Fn(RunStatus),
{
    let program = locator.locate(inv.tool).inspect_err(|_| {
        warn!("{} not found (bin dir {:?})", inv.tool, locator.bin_dir);
    })?;
    info!("RUNNING COMMAND: {}", inv);
    run_program(inv.tool, &program, &inv.args, locator.child_path(), callback)
}

/// Spawns `program` with inherited stdio so progress output shows up live.
pub fn run_program<F>(
    tool: Tool,
    program: &Path,
    args: &[String],
    path_env: Option<OsString>,
    callback: F,
) -> Result<(), QuickTubeError>
where
    F: Fn(RunStatus),
{
    callback(RunStatus::Starting(tool));
    clear_interrupt();

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if let Some(path) = path_env {
        cmd.env("PATH", path);
    }

    let mut child = cmd
        .spawn()
        .map_err(|source| QuickTubeError::Spawn { tool, source })?;
    callback(RunStatus::Running(child.id()));

    // Block until process exits
    let status = child
        .wait()
        .map_err(|source| QuickTubeError::Spawn { tool, source })?;

    if take_interrupt() {
        info!("{} interrupted by user", tool);
        callback(RunStatus::Interrupted);
        return Err(QuickTubeError::InputCancelled);
    }

    if status.success() {
        info!("{} finished", tool);
        callback(RunStatus::Finished);
        Ok(())
    } else {
        warn!("{} exited with {:?}", tool, status.code());
        Err(QuickTubeError::ProcessFailure {
            tool,
            code: status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn nonexistent_binary_is_a_failure_not_a_crash() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_program(
            Tool::YtDlp,
            &dir.path().join("definitely-not-here"),
            &[],
            None,
            |_| {},
        );
        assert!(matches!(result, Err(QuickTubeError::Spawn { tool: Tool::YtDlp, .. })));
    }

    #[test]
    fn missing_tool_is_reported_before_spawning() {
        let bin = tempfile::tempdir().unwrap();
        let empty = tempfile::tempdir().unwrap();
        let locator = ToolLocator::with_search_path(bin.path(), empty.path());
        let inv = Invocation::new(Tool::Mpv).arg("https://youtu.be/x");

        let seen = RefCell::new(Vec::new());
        let result = run_invocation(&inv, &locator, |s| seen.borrow_mut().push(s));
        assert!(matches!(result, Err(QuickTubeError::MissingBinary { tool: Tool::Mpv })));
        assert!(seen.borrow().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn exit_code_is_surfaced() {
        let args = vec!["-c".to_string(), "exit 3".to_string()];
        let result = run_program(Tool::SvtplayDl, Path::new("/bin/sh"), &args, None, |_| {});
        match result {
            Err(QuickTubeError::ProcessFailure { tool, code }) => {
                assert_eq!(tool, Tool::SvtplayDl);
                assert_eq!(code, Some(3));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn success_reports_finished() {
        let args = vec!["-c".to_string(), "exit 0".to_string()];
        let seen = RefCell::new(Vec::new());
        run_program(Tool::Mpv, Path::new("/bin/sh"), &args, None, |s| {
            seen.borrow_mut().push(s)
        })
        .unwrap();
        let seen = seen.into_inner();
        assert_eq!(seen.first(), Some(&RunStatus::Starting(Tool::Mpv)));
        assert_eq!(seen.last(), Some(&RunStatus::Finished));
    }
}
