use std::path::PathBuf;

const APP_DIR: &str = "QuickTube";

/// Where downloaded tool binaries live. Takes precedence over PATH.
pub fn default_bin_dir() -> PathBuf {
    if cfg!(any(target_os = "windows", target_os = "macos")) {
        // %APPDATA% on Windows, ~/Library/Application Support on macOS
        if let Some(data) = dirs::data_dir() {
            return data.join(APP_DIR).join("bin");
        }
    } else if let Some(home) = dirs::home_dir() {
        return home.join(".local").join("bin").join("quicktube_tools");
    }
    PathBuf::from("quicktube_tools")
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("quicktube").join("config.toml"))
}

pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("quicktube"))
        .unwrap_or_else(std::env::temp_dir)
        .join("quicktube.log")
}
