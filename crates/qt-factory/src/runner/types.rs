use qt_core::Tool;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum RunStatus {
    Starting(Tool),
    Running(u32), // PID
    Finished,
    Interrupted,
}

/// Finds tool binaries: the local bin directory first, then PATH.
#[derive(Debug, Clone)]
pub struct ToolLocator {
    pub bin_dir: PathBuf,
    /// Replaces the PATH variable for lookups when set (tests).
    pub search_path: Option<std::ffi::OsString>,
}
