use qt_core::Tool;
use std::path::PathBuf;

/// Where the latest build of a tool is published for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseAsset {
    pub tool: Tool,
    pub url: String,
}

#[derive(Debug, Clone)]
pub enum InstallStatus {
    Starting(Tool),
    Downloading {
        tool: Tool,
        downloaded: u64,
        total: Option<u64>, // from Content-Length
    },
    Finished(Tool, PathBuf),
}
