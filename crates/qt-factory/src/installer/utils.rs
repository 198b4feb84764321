use super::types::ReleaseAsset;
use crate::error::QuickTubeError;
use qt_core::Tool;

const YTDLP_RELEASES: &str = "https://github.com/yt-dlp/yt-dlp/releases/latest/download";
const SVTPLAY_RELEASES: &str = "https://github.com/spaam/svtplay-dl/releases/latest/download";

/// Release asset for `tool` on `os` (a `std::env::consts::OS` value).
pub fn release_asset(tool: Tool, os: &str) -> Result<ReleaseAsset, QuickTubeError> {
    let url = match (tool, os) {
        (Tool::YtDlp, "windows") => format!("{}/yt-dlp.exe", YTDLP_RELEASES),
        (Tool::YtDlp, "macos") => format!("{}/yt-dlp_macos", YTDLP_RELEASES),
        (Tool::YtDlp, _) => format!("{}/yt-dlp", YTDLP_RELEASES),
        // only a zip is published for macOS
        (Tool::SvtplayDl, "macos") => return Err(QuickTubeError::UnsupportedPlatform { tool }),
        (Tool::SvtplayDl, "windows") => format!("{}/svtplay-dl.exe", SVTPLAY_RELEASES),
        (Tool::SvtplayDl, _) => format!("{}/svtplay-dl", SVTPLAY_RELEASES),
        (Tool::Mpv | Tool::Ffmpeg, _) => return Err(QuickTubeError::UnsupportedPlatform { tool }),
    };
    Ok(ReleaseAsset { tool, url })
}
