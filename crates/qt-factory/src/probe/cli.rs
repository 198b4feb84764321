use super::core::{fetch_formats, fetch_info};
use super::types::{MediaInfo, ProbeResult};
use crate::error::QuickTubeError;
use crate::runner::ToolLocator;
use indicatif::{ProgressBar, ProgressStyle};
use qt_core::{Browser, Link};
use std::time::Duration;

/// `fetch_formats` behind a spinner.
pub fn run_cli(
    link: &Link,
    cookie_browser: Option<Browser>,
    locator: &ToolLocator,
) -> Result<ProbeResult, QuickTubeError> {
    with_spinner("Fetching available formats...", || {
        fetch_formats(link, cookie_browser, locator)
    })
}

pub fn info_cli(
    link: &Link,
    cookie_browser: Option<Browser>,
    locator: &ToolLocator,
) -> Result<MediaInfo, QuickTubeError> {
    with_spinner("Fetching video info...", || {
        fetch_info(link, cookie_browser, locator)
    })
}

fn with_spinner<T>(message: &'static str, work: impl FnOnce() -> T) -> T {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = work();
    pb.finish_and_clear();
    result
}
