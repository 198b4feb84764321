use crate::builder::Invocation;
use qt_core::{Action, Link, Tool};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    LinkInput,
    /// Action list for the current link's provider and kind.
    Provider,
    EpisodeRange,
    LastEpisodes,
    Quality,
    CookieBrowser,
    ToolUpdater,
    AfterRun,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuInput {
    Select(usize),
    Text(String),
    /// Esc / q: leave the current screen.
    Back,
    /// Ctrl+C at a prompt: home from a sub-screen, exit from the main menu.
    Quit,
}

/// What the driver has to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Choice {
        prompt: String,
        items: Vec<String>,
        default: usize,
    },
    Text {
        prompt: String,
        initial: String,
    },
}

/// Work the engine hands to the driver; results come back through the
/// engine's `*_loaded` / `*_finished` methods.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Exit,
    RefreshClipboard,
    LoadInfo(Link),
    LoadFormats(Link),
    Run(Invocation),
    Install(Vec<Tool>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// What happens after an action item is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Run,
    AskRange,
    AskLast,
    PickQuality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionItem {
    pub label: &'static str,
    pub action: Action,
    pub all_episodes: bool,
    pub downloader: Option<Tool>,
    pub step: Step,
}

const fn item(label: &'static str, action: Action, step: Step) -> ActionItem {
    ActionItem {
        label,
        action,
        all_episodes: false,
        downloader: None,
        step,
    }
}

const fn whole(mut it: ActionItem) -> ActionItem {
    it.all_episodes = true;
    it
}

const fn via(mut it: ActionItem, tool: Tool) -> ActionItem {
    it.downloader = Some(tool);
    it
}

pub const YOUTUBE_VIDEO_ITEMS: &[ActionItem] = &[
    item("Stream Video (MPV)", Action::Stream, Step::Run),
    item("Stream Audio (MPV)", Action::StreamAudio, Step::Run),
    item("Download video", Action::DownloadVideo, Step::PickQuality),
    item("Download audio", Action::DownloadAudio, Step::Run),
];

pub const YOUTUBE_PLAYLIST_ITEMS: &[ActionItem] = &[
    whole(item("Stream Full Playlist (Video)", Action::Stream, Step::Run)),
    whole(item("Stream Full Playlist (Audio)", Action::StreamAudio, Step::Run)),
    whole(item("Download Full Playlist (Video)", Action::DownloadVideo, Step::Run)),
    whole(item("Download Full Playlist (Audio)", Action::DownloadAudio, Step::Run)),
    item("Download Specific Items (Video)", Action::DownloadVideo, Step::AskRange),
];

pub const STREAMING_ITEMS: &[ActionItem] = &[
    via(
        item("Download (Best quality + Subtitles)", Action::DownloadVideo, Step::Run),
        Tool::SvtplayDl,
    ),
    via(
        whole(item("Download Whole Series (-A)", Action::DownloadVideo, Step::Run)),
        Tool::SvtplayDl,
    ),
    via(
        whole(item("Download Whole Series (yt-dlp)", Action::DownloadVideo, Step::Run)),
        Tool::YtDlp,
    ),
    via(
        item("Download Specific Episodes (yt-dlp)", Action::DownloadVideo, Step::AskRange),
        Tool::YtDlp,
    ),
    via(
        item("Download the LAST X episodes (svtplay-dl)", Action::DownloadVideo, Step::AskLast),
        Tool::SvtplayDl,
    ),
    item("Stream (MPV)", Action::Stream, Step::Run),
    via(
        item("Download audio only", Action::DownloadAudio, Step::Run),
        Tool::SvtplayDl,
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainEntry {
    UseClipboard,
    PasteLink,
    CookieBrowser,
    UpdateTools,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterEntry {
    Retry,
    NewLink,
    CookieBrowser,
    UpdateTools,
    Quit,
}
