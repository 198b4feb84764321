use super::types::{FormatInfo, MediaInfo, ProbeResult, QualityOption, VideoDump};
use crate::error::QuickTubeError;
use crate::runner::ToolLocator;
use qt_core::{Browser, Link, Tool};
use std::collections::BTreeMap;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Asks yt-dlp for the formats of a single video.
pub fn fetch_formats(
    link: &Link,
    cookie_browser: Option<Browser>,
    locator: &ToolLocator,
) -> Result<ProbeResult, QuickTubeError> {
    info!("Probing formats for {}", link.target());
    let dump = dump_json(&["-J", "--no-playlist"], link, cookie_browser, locator)?;
    let options = pick_resolutions(&dump.formats);
    debug!("{} formats, {} selectable", dump.formats.len(), options.len());
    Ok(ProbeResult {
        title: dump.title,
        options,
    })
}

/// Title and playlist flag, without resolving playlist entries.
pub fn fetch_info(
    link: &Link,
    cookie_browser: Option<Browser>,
    locator: &ToolLocator,
) -> Result<MediaInfo, QuickTubeError> {
    info!("Fetching info for {}", link.target());
    let dump = dump_json(&["-J", "--flat-playlist"], link, cookie_browser, locator)?;
    Ok(MediaInfo::from(dump))
}

fn dump_json(
    mode: &[&str],
    link: &Link,
    cookie_browser: Option<Browser>,
    locator: &ToolLocator,
) -> Result<VideoDump, QuickTubeError> {
    let program = locator.locate(Tool::YtDlp)?;

    let mut cmd = Command::new(program);
    cmd.args(mode).arg("--no-warnings");
    if let Some(b) = cookie_browser {
        cmd.args(["--cookies-from-browser", b.as_str()]);
    }
    cmd.arg(link.target()).stdin(Stdio::null());
    if let Some(path) = locator.child_path() {
        cmd.env("PATH", path);
    }

    let output = cmd.output().map_err(|source| QuickTubeError::Spawn {
        tool: Tool::YtDlp,
        source,
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let reason = stderr
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("yt-dlp returned an error")
            .to_string();
        return Err(QuickTubeError::Probe(reason));
    }

    parse_dump(&output.stdout)
}

/// Reads the first JSON document, whether pretty-printed or one per line.
pub fn parse_dump(bytes: &[u8]) -> Result<VideoDump, QuickTubeError> {
    serde_json::Deserializer::from_slice(bytes)
        .into_iter::<VideoDump>()
        .next()
        .unwrap_or_else(|| Err(serde::de::Error::custom("empty output")))
        .map_err(|e| QuickTubeError::Probe(e.to_string()))
}

impl From<VideoDump> for MediaInfo {
    fn from(dump: VideoDump) -> Self {
        Self {
            is_playlist: dump.kind.as_deref() == Some("playlist"),
            title: dump.title,
        }
    }
}

/// One entry per resolution (highest fps wins), tallest first.
pub fn pick_resolutions(formats: &[FormatInfo]) -> Vec<QualityOption> {
    let mut by_height: BTreeMap<u32, &FormatInfo> = BTreeMap::new();

    for f in formats {
        if f.vcodec.as_deref() == Some("none") {
            continue;
        }
        let height = f.height.unwrap_or(0);
        if height == 0 {
            continue;
        }

        let replace = match by_height.get(&height) {
            Some(existing) => f.fps.unwrap_or(0.0) > existing.fps.unwrap_or(0.0),
            None => true,
        };
        if replace {
            by_height.insert(height, f);
        }
    }

    by_height
        .into_iter()
        .rev()
        .map(|(height, f)| QualityOption {
            format_id: f.format_id.clone(),
            width: f.width.unwrap_or(0),
            height,
            fps: f.fps.unwrap_or(0.0),
            ext: f.ext.clone().unwrap_or_else(|| "N/A".to_string()),
            has_audio: f.acodec.as_deref().is_some_and(|a| a != "none"),
            filesize: f.filesize.or(f.filesize_approx).map(|s| s as u64),
        })
        .collect()
}
