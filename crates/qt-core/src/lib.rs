use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    YouTube,
    StreamingService,
    Unknown,
}

impl Provider {
    pub fn label(&self) -> &'static str {
        match self {
            Provider::YouTube => "YouTube",
            Provider::StreamingService => "SVT Play",
            Provider::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Video,
    Playlist,
    SeasonRange,
    Unknown,
}

/// A URL after classification. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    raw: String,
    target: String,
    provider: Provider,
    kind: LinkKind,
    range: Option<String>,
}

impl Link {
    pub fn new(raw: impl Into<String>, provider: Provider, kind: LinkKind) -> Self {
        let raw = raw.into();
        Self {
            target: raw.clone(),
            raw,
            provider,
            kind,
            range: None,
        }
    }

    pub fn unknown(raw: impl Into<String>) -> Self {
        Self::new(raw, Provider::Unknown, LinkKind::Unknown)
    }

    /// A season link whose URL carried an episode range marker.
    /// `target` is the URL with the marker stripped.
    pub fn season_range(
        raw: impl Into<String>,
        target: impl Into<String>,
        range: impl Into<String>,
    ) -> Self {
        Self {
            raw: raw.into(),
            target: target.into(),
            provider: Provider::StreamingService,
            kind: LinkKind::SeasonRange,
            range: Some(range.into()),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The address handed to the external tools.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn kind(&self) -> LinkKind {
        self.kind
    }

    pub fn range(&self) -> Option<&str> {
        self.range.as_deref()
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        self.provider != Provider::Unknown && self.kind != LinkKind::Unknown
    }

    /// Shortened form for menu labels.
    pub fn display(&self, max: usize) -> String {
        if self.raw.chars().count() > max {
            let head: String = self.raw.chars().take(max).collect();
            format!("{}...", head)
        } else {
            self.raw.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    YtDlp,
    SvtplayDl,
    Mpv,
    Ffmpeg,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::YtDlp, Tool::SvtplayDl, Tool::Mpv, Tool::Ffmpeg];

    /// Tools QuickTube can download itself.
    pub const INSTALLABLE: [Tool; 2] = [Tool::YtDlp, Tool::SvtplayDl];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::YtDlp => "yt-dlp",
            Tool::SvtplayDl => "svtplay-dl",
            Tool::Mpv => "mpv",
            Tool::Ffmpeg => "ffmpeg",
        }
    }

    /// File name inside the local bin directory.
    pub fn file_name(&self) -> String {
        if cfg!(windows) {
            format!("{}.exe", self.name())
        } else {
            self.name().to_string()
        }
    }

    pub fn is_installable(&self) -> bool {
        Self::INSTALLABLE.contains(self)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Stream,
    StreamAudio,
    DownloadVideo,
    DownloadAudio,
}

impl Action {
    pub fn is_stream(&self) -> bool {
        matches!(self, Action::Stream | Action::StreamAudio)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Quality {
    #[default]
    Best,
    MaxHeight(u32),
    Format { id: String, has_audio: bool },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Episodes {
    #[default]
    Single,
    All,
    /// Passed through to the tool verbatim, e.g. "1-5" or "1,3,7-9".
    Range(String),
    Last(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    Chrome,
    Firefox,
    Brave,
    Edge,
    Safari,
    Opera,
    Vivaldi,
    Chromium,
}

impl Browser {
    pub const ALL: [Browser; 8] = [
        Browser::Chrome,
        Browser::Firefox,
        Browser::Brave,
        Browser::Edge,
        Browser::Safari,
        Browser::Opera,
        Browser::Vivaldi,
        Browser::Chromium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chrome => "chrome",
            Browser::Firefox => "firefox",
            Browser::Brave => "brave",
            Browser::Edge => "edge",
            Browser::Safari => "safari",
            Browser::Opera => "opera",
            Browser::Vivaldi => "vivaldi",
            Browser::Chromium => "chromium",
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Choices collected for one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub action: Option<Action>,
    pub quality: Quality,
    pub episodes: Episodes,
    /// Overrides the provider's default downloader.
    pub downloader: Option<Tool>,
    pub cookie_browser: Option<Browser>,
}

impl SessionOptions {
    pub fn new(cookie_browser: Option<Browser>) -> Self {
        Self {
            cookie_browser,
            ..Self::default()
        }
    }

    /// Switching to a different action drops everything tied to the old one.
    pub fn choose_action(&mut self, action: Action) {
        if self.action != Some(action) {
            self.quality = Quality::Best;
            self.episodes = Episodes::Single;
            self.downloader = None;
        }
        self.action = Some(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changing_action_discards_prior_choices() {
        let mut opts = SessionOptions::new(Some(Browser::Firefox));
        opts.choose_action(Action::DownloadVideo);
        opts.quality = Quality::MaxHeight(720);
        opts.episodes = Episodes::Range("1-5".into());

        opts.choose_action(Action::DownloadAudio);
        assert_eq!(opts.quality, Quality::Best);
        assert_eq!(opts.episodes, Episodes::Single);
        assert_eq!(opts.cookie_browser, Some(Browser::Firefox));
    }

    #[test]
    fn same_action_keeps_choices() {
        let mut opts = SessionOptions::default();
        opts.choose_action(Action::DownloadVideo);
        opts.quality = Quality::MaxHeight(1080);
        opts.choose_action(Action::DownloadVideo);
        assert_eq!(opts.quality, Quality::MaxHeight(1080));
    }

    #[test]
    fn link_display_truncates() {
        let link = Link::new("https://youtu.be/abcdefghijk", Provider::YouTube, LinkKind::Video);
        assert_eq!(link.display(10), "https://yo...");
        assert_eq!(link.display(100), "https://youtu.be/abcdefghijk");
        assert!(link.is_known());
        assert!(!Link::unknown("x").is_known());
    }
}
