use super::types::ToolLocator;
use crate::error::QuickTubeError;
use qt_core::Tool;
use std::{
    env,
    ffi::OsString,
    path::PathBuf,
    sync::atomic::{AtomicBool, Ordering},
};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Keeps Ctrl+C from killing QuickTube. The terminal still delivers the
/// signal to the running child; the runner notices the flag afterwards.
pub fn install_interrupt_guard() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| INTERRUPTED.store(true, Ordering::SeqCst))
}

pub fn clear_interrupt() {
    INTERRUPTED.store(false, Ordering::SeqCst);
}

pub fn take_interrupt() -> bool {
    INTERRUPTED.swap(false, Ordering::SeqCst)
}

impl ToolLocator {
    pub fn new(bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            bin_dir: bin_dir.into(),
            search_path: None,
        }
    }

    pub fn with_search_path(bin_dir: impl Into<PathBuf>, path: impl Into<OsString>) -> Self {
        Self {
            bin_dir: bin_dir.into(),
            search_path: Some(path.into()),
        }
    }

    pub fn locate(&self, tool: Tool) -> Result<PathBuf, QuickTubeError> {
        let local = self.bin_dir.join(tool.file_name());
        if local.is_file() {
            return Ok(local);
        }

        let found = match &self.search_path {
            Some(paths) => which::which_in(tool.name(), Some(paths), "."),
            None => which::which(tool.name()),
        };
        found.map_err(|_| QuickTubeError::MissingBinary { tool })
    }

    /// PATH for child processes, so that mpv and svtplay-dl pick up a
    /// downloaded yt-dlp too.
    pub fn child_path(&self) -> Option<OsString> {
        let current = self.search_path.clone().or_else(|| env::var_os("PATH"))?;
        let mut dirs = vec![self.bin_dir.clone()];
        dirs.extend(env::split_paths(&current));
        env::join_paths(dirs).ok()
    }
}

/// Tools that cannot be found anywhere.
pub fn check_dependencies(locator: &ToolLocator) -> Vec<Tool> {
    Tool::ALL
        .into_iter()
        .filter(|t| locator.locate(*t).is_err())
        .collect()
}

/// mpv and ffmpeg cannot be installed from the menu.
pub fn is_critical(tool: Tool) -> bool {
    matches!(tool, Tool::Mpv | Tool::Ffmpeg)
}
