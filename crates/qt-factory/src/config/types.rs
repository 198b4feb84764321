use qt_core::Browser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bin_dir: Option<PathBuf>,
    pub cookie_browser: Option<Browser>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
    pub patterns: PatternConfig,
}

/// URL patterns per provider. A provider table given in the file replaces
/// the built-in one as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub youtube: ProviderPatterns,
    pub streaming: ProviderPatterns,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderPatterns {
    /// Host names; subdomains match too.
    pub hosts: Vec<String>,
    /// Regexes marking a playlist, channel or series page.
    pub playlist: Vec<String>,
    /// Regexes marking a single video or episode.
    pub video: Vec<String>,
    /// Regex whose first capture group is an episode range token.
    pub range: Option<String>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            youtube: ProviderPatterns {
                hosts: strings(&["youtube.com", "youtu.be", "youtube-nocookie.com"]),
                playlist: strings(&[
                    r"[?&]list=[\w-]+",
                    r"youtube\.com/playlist\b",
                    r"youtube\.com/@[\w.-]+",
                    r"youtube\.com/(channel|c|user)/[\w-]+",
                ]),
                video: strings(&[
                    r"[?&]v=[\w-]+",
                    r"youtu\.be/[\w-]+",
                    r"/(shorts|live|embed)/[\w-]+",
                ]),
                range: None,
            },
            streaming: ProviderPatterns {
                hosts: strings(&["svtplay.se"]),
                playlist: strings(&[r"svtplay\.se/[\w-]+"]),
                video: strings(&[r"/video/[\w-]+", r"[?&](id|video|modalId)=[\w-]+"]),
                range: Some(r"(?:[?&#]episodes=|#)(\d+(?:-\d+)?(?:,\d+(?:-\d+)?)*)$".to_string()),
            },
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
