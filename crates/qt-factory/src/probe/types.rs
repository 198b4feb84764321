use qt_core::Quality;
use serde::Deserialize;

/// The parts of `yt-dlp -J` output QuickTube looks at.
#[derive(Debug, Deserialize)]
pub struct VideoDump {
    pub title: Option<String>,
    #[serde(rename = "_type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub formats: Vec<FormatInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormatInfo {
    pub format_id: String,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<f64>,
    pub ext: Option<String>,
    pub filesize: Option<f64>,
    pub filesize_approx: Option<f64>,
}

/// One row of the quality picker.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityOption {
    pub format_id: String,
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub ext: String,
    pub has_audio: bool,
    pub filesize: Option<u64>,
}

/// What the action menu shows for a YouTube link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaInfo {
    pub title: Option<String>,
    pub is_playlist: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    pub title: Option<String>,
    pub options: Vec<QualityOption>,
}

impl QualityOption {
    pub fn label(&self) -> String {
        let size = match self.filesize {
            Some(bytes) => format!("{:.1}MiB", bytes as f64 / (1024.0 * 1024.0)),
            None => "N/A".to_string(),
        };
        format!(
            "{:<5} | {:<9} | {:<4} | {:<4} | 🎵:{} | {}",
            self.format_id,
            format!("{}x{}", self.width, self.height),
            self.fps.round() as u32,
            self.ext,
            if self.has_audio { "YES" } else { "NO " },
            size
        )
    }

    pub fn quality(&self) -> Quality {
        Quality::Format {
            id: self.format_id.clone(),
            has_audio: self.has_audio,
        }
    }
}
