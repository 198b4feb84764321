use super::types::*;
use crate::builder::build_command;
use crate::classifier::LinkClassifier;
use crate::clipboard::detect_link;
use crate::error::QuickTubeError;
use crate::installer::InstallReport;
use crate::probe::{MediaInfo, ProbeResult, QualityOption};
use qt_core::{Action, Browser, Episodes, Link, LinkKind, Provider, Quality, SessionOptions, Tool};
use std::path::Path;
use tracing::{debug, info};

const FALLBACK_HEIGHTS: [u32; 3] = [1080, 720, 480];

/// The interactive menu as a state machine.
///
/// `view` describes the current screen, `apply` consumes one input and
/// returns the side effect the driver must perform. The engine itself never
/// touches the terminal, the network or child processes.
pub struct MenuEngine {
    classifier: LinkClassifier,
    current: Screen,
    stack: Vec<Screen>,
    session: SessionOptions,
    link: Option<Link>,
    clipboard: Option<Link>,
    cookie_browser: Option<Browser>,
    bin_dir: String,
    title: Option<String>,
    formats: Vec<QualityOption>,
    chosen_item: Option<usize>,
    last_failed: bool,
    last_action: Option<Action>,
    notices: Vec<Notice>,
}

impl MenuEngine {
    pub fn new(classifier: LinkClassifier, cookie_browser: Option<Browser>, bin_dir: &Path) -> Self {
        Self {
            classifier,
            current: Screen::Main,
            stack: Vec::new(),
            session: SessionOptions::new(cookie_browser),
            link: None,
            clipboard: None,
            cookie_browser,
            bin_dir: bin_dir.display().to_string(),
            title: None,
            formats: Vec::new(),
            chosen_item: None,
            last_failed: false,
            last_action: None,
            notices: Vec::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn session(&self) -> &SessionOptions {
        &self.session
    }

    pub fn link(&self) -> Option<&Link> {
        self.link.as_ref()
    }

    pub fn clipboard_link(&self) -> Option<&Link> {
        self.clipboard.as_ref()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Offers the clipboard text as a link, unless the last operation just
    /// streamed it.
    pub fn set_clipboard(&mut self, text: &str) {
        let just_streamed = self.last_action.is_some_and(|a| a.is_stream());
        self.last_action = None;
        self.clipboard = if just_streamed {
            None
        } else {
            detect_link(text, &self.classifier)
        };
        if let Some(link) = &self.clipboard {
            debug!("Clipboard link: {}", link.raw());
        }
    }

    // ---- rendering ----

    pub fn view(&self) -> View {
        match self.current {
            Screen::Main => {
                let prompt = if self.clipboard.is_some() {
                    "Clipboard link detected:"
                } else {
                    "Main Menu"
                };
                self.choice(prompt, self.main_entries().iter().map(|e| self.main_label(*e)), 0)
            }
            Screen::LinkInput => View::Text {
                prompt: "Paste/type a URL (leave empty to go back)".into(),
                initial: String::new(),
            },
            Screen::Provider => {
                let items = self.action_items();
                let default = self
                    .chosen_item
                    .unwrap_or_else(|| self.default_item())
                    .min(items.len().saturating_sub(1));
                self.choice(&self.provider_prompt(), items.iter().map(|i| i.label.to_string()), default)
            }
            Screen::EpisodeRange => View::Text {
                prompt: "Enter episodes (e.g. 1, 2-5, 10)".into(),
                initial: match &self.session.episodes {
                    Episodes::Range(r) => r.clone(),
                    _ => self
                        .link
                        .as_ref()
                        .and_then(|l| l.range())
                        .unwrap_or_default()
                        .to_string(),
                },
            },
            Screen::LastEpisodes => View::Text {
                prompt: "Number of episodes from the end (e.g. 5)".into(),
                initial: match self.session.episodes {
                    Episodes::Last(n) => n.to_string(),
                    _ => String::new(),
                },
            },
            Screen::Quality => {
                let choices = self.quality_choices();
                let default = choices
                    .iter()
                    .position(|(_, q)| *q == self.session.quality)
                    .unwrap_or(0);
                self.choice(
                    "Select Quality (ID | Resolution | FPS | Type | Audio | Size)",
                    choices.into_iter().map(|(label, _)| label),
                    default,
                )
            }
            Screen::CookieBrowser => {
                let items = std::iter::once("None (Default)".to_string())
                    .chain(Browser::ALL.iter().map(|b| b.to_string()));
                let default = self
                    .cookie_browser
                    .and_then(|c| Browser::ALL.iter().position(|b| *b == c))
                    .map_or(0, |i| i + 1);
                self.choice("Select browser to borrow cookies from:", items, default)
            }
            Screen::ToolUpdater => self.choice(
                &format!(
                    "Download the latest yt-dlp and svtplay-dl into {}?",
                    self.bin_dir
                ),
                ["Yes, update".to_string(), "Cancel".to_string()].into_iter(),
                0,
            ),
            Screen::AfterRun => self.choice(
                "What next?",
                self.after_entries().iter().map(|e| after_label(*e).to_string()),
                0,
            ),
        }
    }

    fn choice(&self, prompt: &str, items: impl Iterator<Item = String>, default: usize) -> View {
        View::Choice {
            prompt: prompt.to_string(),
            items: items.collect(),
            default,
        }
    }

    fn main_entries(&self) -> Vec<MainEntry> {
        let mut entries = Vec::with_capacity(5);
        if self.clipboard.is_some() {
            entries.push(MainEntry::UseClipboard);
        }
        entries.extend([
            MainEntry::PasteLink,
            MainEntry::CookieBrowser,
            MainEntry::UpdateTools,
            MainEntry::Quit,
        ]);
        entries
    }

    fn main_label(&self, entry: MainEntry) -> String {
        match entry {
            MainEntry::UseClipboard => match &self.clipboard {
                Some(link) => format!("Use link: {}", link.display(50)),
                None => "Use clipboard link".to_string(),
            },
            MainEntry::PasteLink => "Paste link".to_string(),
            MainEntry::CookieBrowser => format!(
                "Select cookie browser (current: {})",
                self.cookie_browser.map_or("none", |b| b.as_str())
            ),
            MainEntry::UpdateTools => "Update tools".to_string(),
            MainEntry::Quit => "Exit".to_string(),
        }
    }

    fn after_entries(&self) -> Vec<AfterEntry> {
        let mut entries = Vec::with_capacity(5);
        if self.last_failed && self.link.is_some() {
            entries.push(AfterEntry::Retry);
        }
        entries.extend([
            AfterEntry::NewLink,
            AfterEntry::CookieBrowser,
            AfterEntry::UpdateTools,
            AfterEntry::Quit,
        ]);
        entries
    }

    /// Probed formats, or fixed height caps when the probe gave nothing.
    fn quality_choices(&self) -> Vec<(String, Quality)> {
        let mut choices = vec![("Best available (auto)".to_string(), Quality::Best)];
        if self.formats.is_empty() {
            choices.extend(
                FALLBACK_HEIGHTS
                    .iter()
                    .map(|h| (format!("Up to {}p", h), Quality::MaxHeight(*h))),
            );
        } else {
            choices.extend(self.formats.iter().map(|f| (f.label(), f.quality())));
        }
        choices
    }

    fn action_items(&self) -> &'static [ActionItem] {
        match self.link.as_ref().map(|l| (l.provider(), l.kind())) {
            Some((Provider::YouTube, LinkKind::Playlist)) => YOUTUBE_PLAYLIST_ITEMS,
            Some((Provider::YouTube, _)) => YOUTUBE_VIDEO_ITEMS,
            Some((Provider::StreamingService, _)) => STREAMING_ITEMS,
            Some((Provider::Unknown, _)) | None => &[],
        }
    }

    fn default_item(&self) -> usize {
        match self.link.as_ref().map(|l| (l.provider(), l.kind())) {
            Some((Provider::StreamingService, LinkKind::SeasonRange)) => self
                .action_items()
                .iter()
                .position(|i| i.step == Step::AskRange)
                .unwrap_or(0),
            // whole series
            Some((Provider::StreamingService, LinkKind::Playlist)) => 1,
            _ => 0,
        }
    }

    fn provider_prompt(&self) -> String {
        let Some(link) = &self.link else {
            return String::new();
        };
        let shown = match &self.title {
            Some(title) => fit_title(title),
            None => link.display(57),
        };
        match (link.provider(), link.kind()) {
            (Provider::YouTube, LinkKind::Playlist) => format!("Playlist detected: {}", shown),
            (Provider::YouTube, _) => format!("Video: {}", shown),
            (provider, LinkKind::SeasonRange) => format!(
                "{} link detected (episodes {}). What do you want to do?",
                provider.label(),
                link.range().unwrap_or("?")
            ),
            (provider, _) => format!("{} link detected. What do you want to do?", provider.label()),
        }
    }

    // ---- transitions ----

    pub fn apply(&mut self, input: MenuInput) -> Effect {
        match input {
            MenuInput::Back => self.back(),
            MenuInput::Quit if self.current == Screen::Main => Effect::Exit,
            MenuInput::Quit => {
                self.go_home();
                Effect::RefreshClipboard
            }
            MenuInput::Select(i) => self.select(i),
            MenuInput::Text(text) => self.text(text.trim()),
        }
    }

    fn push(&mut self, next: Screen) {
        self.stack.push(self.current);
        self.current = next;
    }

    fn back(&mut self) -> Effect {
        match self.stack.pop() {
            Some(prev) => {
                self.current = prev;
                Effect::None
            }
            None => Effect::Exit,
        }
    }

    fn go_home(&mut self) {
        self.stack.clear();
        self.current = Screen::Main;
        self.session = SessionOptions::new(self.cookie_browser);
        self.link = None;
        self.title = None;
        self.formats.clear();
        self.chosen_item = None;
        self.last_failed = false;
    }

    fn select(&mut self, index: usize) -> Effect {
        match self.current {
            Screen::Main => match self.main_entries().get(index) {
                Some(MainEntry::UseClipboard) => match self.clipboard.clone() {
                    Some(link) => self.enter_link(link),
                    None => Effect::None,
                },
                Some(MainEntry::PasteLink) => {
                    self.push(Screen::LinkInput);
                    Effect::None
                }
                Some(MainEntry::CookieBrowser) => {
                    self.push(Screen::CookieBrowser);
                    Effect::None
                }
                Some(MainEntry::UpdateTools) => {
                    self.push(Screen::ToolUpdater);
                    Effect::None
                }
                Some(MainEntry::Quit) => Effect::Exit,
                None => Effect::None,
            },
            Screen::Provider => match self.action_items().get(index) {
                Some(item) => self.choose_item(index, *item),
                None => Effect::None,
            },
            Screen::Quality => match self.quality_choices().into_iter().nth(index) {
                Some((_, quality)) => {
                    self.session.quality = quality;
                    self.run()
                }
                None => Effect::None,
            },
            Screen::CookieBrowser => {
                let browser = match index {
                    0 => None,
                    i => match Browser::ALL.get(i - 1) {
                        Some(b) => Some(*b),
                        None => return Effect::None,
                    },
                };
                self.set_cookie_browser(browser);
                self.back();
                Effect::None
            }
            Screen::ToolUpdater => {
                self.back();
                if index == 0 {
                    Effect::Install(Tool::INSTALLABLE.to_vec())
                } else {
                    Effect::None
                }
            }
            Screen::AfterRun => match self.after_entries().get(index) {
                // rebuilt so a cookie browser picked since the failure applies
                Some(AfterEntry::Retry) => self.run(),
                Some(AfterEntry::NewLink) => {
                    self.go_home();
                    Effect::RefreshClipboard
                }
                Some(AfterEntry::CookieBrowser) => {
                    self.push(Screen::CookieBrowser);
                    Effect::None
                }
                Some(AfterEntry::UpdateTools) => {
                    self.push(Screen::ToolUpdater);
                    Effect::None
                }
                Some(AfterEntry::Quit) => Effect::Exit,
                None => Effect::None,
            },
            Screen::LinkInput | Screen::EpisodeRange | Screen::LastEpisodes => Effect::None,
        }
    }

    fn text(&mut self, text: &str) -> Effect {
        match self.current {
            Screen::LinkInput => {
                if text.is_empty() {
                    return self.back();
                }
                let link = self.classifier.classify(text);
                if !link.is_known() {
                    let err = QuickTubeError::Classification {
                        url: text.to_string(),
                    };
                    self.error(&err);
                    return Effect::None;
                }
                self.enter_link(link)
            }
            Screen::EpisodeRange => {
                if text.is_empty() {
                    self.notice(NoticeLevel::Warning, "No episodes entered.");
                    return self.back();
                }
                self.session.episodes = Episodes::Range(text.to_string());
                self.run()
            }
            Screen::LastEpisodes => match text.parse::<u32>() {
                Ok(n) if n > 0 => {
                    self.session.episodes = Episodes::Last(n);
                    self.run()
                }
                _ => {
                    self.notice(NoticeLevel::Error, "Invalid number specified.");
                    Effect::None
                }
            },
            _ => Effect::None,
        }
    }

    fn enter_link(&mut self, link: Link) -> Effect {
        info!(
            "Link {} classified as {:?}/{:?}",
            link.raw(),
            link.provider(),
            link.kind()
        );
        let effect = match link.provider() {
            Provider::YouTube => Effect::LoadInfo(link.clone()),
            _ => Effect::None,
        };
        self.link = Some(link);
        self.title = None;
        self.session = SessionOptions::new(self.cookie_browser);
        self.formats.clear();
        self.chosen_item = None;
        self.push(Screen::Provider);
        effect
    }

    fn choose_item(&mut self, index: usize, item: ActionItem) -> Effect {
        self.session.choose_action(item.action);
        self.session.downloader = item.downloader;
        self.session.episodes = match (item.step, &self.session.episodes) {
            (Step::AskRange, Episodes::Range(r)) => Episodes::Range(r.clone()),
            (Step::AskLast, Episodes::Last(n)) => Episodes::Last(*n),
            _ if item.all_episodes => Episodes::All,
            _ => Episodes::Single,
        };
        if item.step != Step::PickQuality {
            self.session.quality = Quality::Best;
        }
        self.chosen_item = Some(index);

        match item.step {
            Step::Run => self.run(),
            Step::AskRange => {
                self.push(Screen::EpisodeRange);
                Effect::None
            }
            Step::AskLast => {
                self.push(Screen::LastEpisodes);
                Effect::None
            }
            Step::PickQuality => {
                self.push(Screen::Quality);
                match (&self.link, self.formats.is_empty()) {
                    (Some(link), true) => Effect::LoadFormats(link.clone()),
                    _ => Effect::None,
                }
            }
        }
    }

    fn run(&mut self) -> Effect {
        let Some(link) = &self.link else {
            self.notice(NoticeLevel::Error, "No link selected.");
            return Effect::None;
        };
        match build_command(link, &self.session) {
            Ok(inv) => Effect::Run(inv),
            Err(e) => {
                self.error(&e);
                Effect::None
            }
        }
    }

    fn set_cookie_browser(&mut self, browser: Option<Browser>) {
        self.cookie_browser = browser;
        self.session.cookie_browser = browser;
        match browser {
            Some(b) => self.notice(NoticeLevel::Success, format!("Browser selected: {}", b)),
            None => self.notice(NoticeLevel::Warning, "Cookies disabled."),
        }
    }

    // ---- effect results ----

    /// Title and playlist flag for a YouTube link. Without them the action
    /// list is left again.
    pub fn info_loaded(&mut self, result: Result<MediaInfo, QuickTubeError>) {
        match result {
            Ok(info) => {
                let upgraded = match &self.link {
                    Some(l) if info.is_playlist && l.kind() != LinkKind::Playlist => {
                        Some(Link::new(l.raw(), l.provider(), LinkKind::Playlist))
                    }
                    _ => None,
                };
                if upgraded.is_some() {
                    self.link = upgraded;
                }
                self.title = info.title;
            }
            Err(e) => {
                self.notice(
                    NoticeLevel::Error,
                    "Could not retrieve information for the URL.",
                );
                self.error(&e);
                self.cookie_tip();
                if self.current == Screen::Provider {
                    self.back();
                }
            }
        }
    }

    pub fn formats_loaded(&mut self, result: Result<ProbeResult, QuickTubeError>) {
        match result {
            Ok(probe) => {
                self.formats = probe.options;
                if let Some(title) = probe.title {
                    self.notice(NoticeLevel::Info, format!("Video: {}", title));
                }
                if self.formats.is_empty() {
                    self.notice(
                        NoticeLevel::Warning,
                        "No format list available, showing common resolutions.",
                    );
                }
            }
            Err(e) => {
                self.formats.clear();
                self.error(&e);
                self.cookie_tip();
            }
        }
    }

    pub fn run_finished(&mut self, result: Result<(), QuickTubeError>) {
        match result {
            Ok(()) => {
                let text = if self.session.action.is_some_and(|a| a.is_stream()) {
                    "Playback finished."
                } else {
                    "Download complete."
                };
                self.notice(NoticeLevel::Success, text);
                self.last_action = self.session.action;
                self.last_failed = false;
                self.session = SessionOptions::new(self.cookie_browser);
                self.link = None;
                self.title = None;
                self.formats.clear();
                self.chosen_item = None;
                self.stack = vec![Screen::Main];
                self.current = Screen::AfterRun;
            }
            Err(QuickTubeError::InputCancelled) => {
                self.notice(NoticeLevel::Warning, "Cancelled. Back to the menu.");
                while self.current != Screen::Provider {
                    if self.stack.is_empty() {
                        break;
                    }
                    self.back();
                }
            }
            Err(e) => {
                self.error(&e);
                self.last_action = self.session.action;
                self.last_failed = e.is_retryable();
                if self.current != Screen::AfterRun {
                    self.push(Screen::AfterRun);
                }
            }
        }
    }

    pub fn install_finished(&mut self, report: &InstallReport) {
        let failed = report.iter().filter(|(_, r)| r.is_err()).count();
        if failed == 0 {
            self.notice(NoticeLevel::Success, "Tools updated.");
        } else {
            self.notice(
                NoticeLevel::Warning,
                format!("{} of {} tools could not be updated.", failed, report.len()),
            );
        }
    }

    fn notice(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notices.push(Notice {
            level,
            text: text.into(),
        });
    }

    fn cookie_tip(&mut self) {
        if self.cookie_browser.is_none() {
            self.notice(
                NoticeLevel::Info,
                "Tip: Try selecting a browser for cookies in the main menu.",
            );
        }
    }

    fn error(&mut self, err: &QuickTubeError) {
        self.notice(NoticeLevel::Error, err.to_string());
        if let Some(hint) = err.hint() {
            self.notice(NoticeLevel::Info, hint);
        }
    }
}

/// Long titles are cut to 57 characters plus an ellipsis.
fn fit_title(title: &str) -> String {
    if title.chars().count() > 60 {
        let head: String = title.chars().take(57).collect();
        format!("{}...", head)
    } else {
        title.to_string()
    }
}

fn after_label(entry: AfterEntry) -> &'static str {
    match entry {
        AfterEntry::Retry => "Retry",
        AfterEntry::NewLink => "New link",
        AfterEntry::CookieBrowser => "Select cookie browser",
        AfterEntry::UpdateTools => "Update tools",
        AfterEntry::Quit => "Exit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PatternConfig;

    const VIDEO: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
    const PLAYLIST: &str = "https://www.youtube.com/playlist?list=PL123";
    const SEASON: &str = "https://www.svtplay.se/skavlan#1-5";

    fn engine() -> MenuEngine {
        let classifier = LinkClassifier::new(&PatternConfig::default()).unwrap();
        MenuEngine::new(classifier, None, Path::new("/tmp/qt-bin"))
    }

    fn items(view: &View) -> Vec<String> {
        match view {
            View::Choice { items, .. } => items.clone(),
            View::Text { .. } => panic!("expected a choice screen"),
        }
    }

    fn index_of(engine: &MenuEngine, label: &str) -> usize {
        items(&engine.view())
            .iter()
            .position(|i| i.starts_with(label))
            .unwrap_or_else(|| panic!("no item {:?}", label))
    }

    fn paste(engine: &mut MenuEngine, url: &str) -> Effect {
        let i = index_of(engine, "Paste link");
        assert_eq!(engine.apply(MenuInput::Select(i)), Effect::None);
        assert_eq!(engine.screen(), Screen::LinkInput);
        let effect = engine.apply(MenuInput::Text(url.to_string()));
        if let Effect::LoadInfo(link) = &effect {
            engine.info_loaded(Ok(MediaInfo {
                title: Some("Test title".into()),
                is_playlist: link.kind() == LinkKind::Playlist,
            }));
        }
        effect
    }

    fn pick(engine: &mut MenuEngine, label: &str) -> Effect {
        let i = index_of(engine, label);
        engine.apply(MenuInput::Select(i))
    }

    #[test]
    fn quit_and_back_on_main_exit() {
        let mut e = engine();
        assert_eq!(e.apply(MenuInput::Quit), Effect::Exit);
        let mut e = engine();
        assert_eq!(e.apply(MenuInput::Back), Effect::Exit);
        let mut e = engine();
        assert_eq!(pick(&mut e, "Exit"), Effect::Exit);
    }

    #[test]
    fn clipboard_link_is_preselected() {
        let mut e = engine();
        e.set_clipboard(VIDEO);
        match e.view() {
            View::Choice { items, default, .. } => {
                assert_eq!(default, 0);
                assert!(items[0].starts_with("Use link: https://www.youtube.com"));
            }
            other => panic!("{:?}", other),
        }
        match e.apply(MenuInput::Select(0)) {
            Effect::LoadInfo(link) => assert_eq!(link.raw(), VIDEO),
            other => panic!("{:?}", other),
        }
        assert_eq!(e.screen(), Screen::Provider);
        assert_eq!(e.link().unwrap().kind(), LinkKind::Video);
    }

    #[test]
    fn youtube_prompt_shows_fetched_title() {
        let mut e = engine();
        paste(&mut e, VIDEO);
        match e.view() {
            View::Choice { prompt, .. } => assert_eq!(prompt, "Video: Test title"),
            other => panic!("{:?}", other),
        }

        let mut e = engine();
        e.set_clipboard(VIDEO);
        e.apply(MenuInput::Select(0));
        e.info_loaded(Ok(MediaInfo {
            title: Some("x".repeat(80)),
            is_playlist: false,
        }));
        match e.view() {
            View::Choice { prompt, .. } => {
                assert_eq!(prompt, format!("Video: {}...", "x".repeat(57)))
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn playlist_info_switches_to_playlist_actions() {
        let mut e = engine();
        e.set_clipboard("https://www.youtube.com/watch?v=abc");
        e.apply(MenuInput::Select(0));
        e.info_loaded(Ok(MediaInfo {
            title: Some("Mix".into()),
            is_playlist: true,
        }));
        assert_eq!(e.link().unwrap().kind(), LinkKind::Playlist);
        match e.view() {
            View::Choice { prompt, items, .. } => {
                assert_eq!(prompt, "Playlist detected: Mix");
                assert_eq!(items.len(), YOUTUBE_PLAYLIST_ITEMS.len());
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn failed_info_leaves_action_list_with_tip() {
        let mut e = engine();
        let i = index_of(&e, "Paste link");
        e.apply(MenuInput::Select(i));
        let effect = e.apply(MenuInput::Text(VIDEO.into()));
        assert!(matches!(effect, Effect::LoadInfo(_)));
        e.take_notices();

        e.info_loaded(Err(QuickTubeError::Probe("HTTP Error 403: Forbidden".into())));
        assert_eq!(e.screen(), Screen::LinkInput);
        let notices = e.take_notices();
        assert_eq!(notices[0].text, "Could not retrieve information for the URL.");
        assert!(notices.iter().any(|n| n.text.contains("403")));
        assert!(notices.iter().any(|n| n.text.starts_with("Tip:")));
    }

    #[test]
    fn streaming_links_need_no_info() {
        let mut e = engine();
        assert_eq!(paste(&mut e, SEASON), Effect::None);
        assert_eq!(e.screen(), Screen::Provider);
    }

    #[test]
    fn back_from_text_screens_returns_to_actions() {
        let mut e = engine();
        paste(&mut e, "https://www.svtplay.se/skavlan");
        pick(&mut e, "Download Specific Episodes");
        assert_eq!(e.screen(), Screen::EpisodeRange);
        assert_eq!(e.apply(MenuInput::Back), Effect::None);
        assert_eq!(e.screen(), Screen::Provider);

        pick(&mut e, "Download the LAST X");
        assert_eq!(e.screen(), Screen::LastEpisodes);
        assert_eq!(e.apply(MenuInput::Back), Effect::None);
        assert_eq!(e.screen(), Screen::Provider);
    }

    #[test]
    fn non_links_on_clipboard_are_ignored() {
        let mut e = engine();
        e.set_clipboard("shopping list: milk");
        assert!(e.clipboard_link().is_none());
        assert_eq!(items(&e.view())[0], "Paste link");
    }

    #[test]
    fn unknown_link_reprompts() {
        let mut e = engine();
        assert_eq!(paste(&mut e, "https://vimeo.com/1234"), Effect::None);
        assert_eq!(e.screen(), Screen::LinkInput);
        let notices = e.take_notices();
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert!(e.link().is_none());

        // empty input goes back
        assert_eq!(e.apply(MenuInput::Text("  ".into())), Effect::None);
        assert_eq!(e.screen(), Screen::Main);
    }

    #[test]
    fn back_pops_one_screen() {
        let mut e = engine();
        paste(&mut e, VIDEO);
        assert_eq!(e.screen(), Screen::Provider);
        assert_eq!(e.depth(), 2);

        e.apply(MenuInput::Back);
        assert_eq!(e.screen(), Screen::LinkInput);
        e.apply(MenuInput::Back);
        assert_eq!(e.screen(), Screen::Main);
    }

    #[test]
    fn quit_in_submenu_goes_home() {
        let mut e = engine();
        paste(&mut e, VIDEO);
        assert_eq!(e.apply(MenuInput::Quit), Effect::RefreshClipboard);
        assert_eq!(e.screen(), Screen::Main);
        assert_eq!(e.depth(), 0);
        assert!(e.link().is_none());
    }

    #[test]
    fn youtube_audio_runs_opus_download() {
        let mut e = engine();
        paste(&mut e, VIDEO);
        match pick(&mut e, "Download audio") {
            Effect::Run(inv) => {
                assert_eq!(inv.tool, Tool::YtDlp);
                assert_eq!(inv.value_of("--audio-format"), Some("opus"));
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn download_video_probes_then_picks_quality() {
        let mut e = engine();
        paste(&mut e, VIDEO);
        let effect = pick(&mut e, "Download video");
        assert!(matches!(effect, Effect::LoadFormats(_)));
        assert_eq!(e.screen(), Screen::Quality);

        e.formats_loaded(Ok(ProbeResult {
            title: Some("Song".into()),
            options: vec![QualityOption {
                format_id: "137".into(),
                width: 1920,
                height: 1080,
                fps: 30.0,
                ext: "mp4".into(),
                has_audio: false,
                filesize: None,
            }],
        }));
        assert_eq!(items(&e.view()).len(), 2);

        match e.apply(MenuInput::Select(1)) {
            Effect::Run(inv) => assert_eq!(inv.value_of("-f"), Some("137+bestaudio")),
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn failed_probe_still_offers_best() {
        let mut e = engine();
        paste(&mut e, VIDEO);
        pick(&mut e, "Download video");
        e.formats_loaded(Err(QuickTubeError::Probe("HTTP Error 403".into())));
        assert_eq!(
            items(&e.view()),
            vec!["Best available (auto)", "Up to 1080p", "Up to 720p", "Up to 480p"]
        );
        let notices = e.take_notices();
        assert!(notices.iter().any(|n| n.text.contains("cookies")));

        match pick(&mut e, "Up to 720p") {
            Effect::Run(inv) => {
                assert_eq!(inv.value_of("-f"), Some("bestvideo[height<=720]+bestaudio/best[height<=720]"));
                assert!(inv.value_of("-o").unwrap().contains("%(height)s"));
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn changing_action_discards_quality() {
        let mut e = engine();
        paste(&mut e, VIDEO);
        pick(&mut e, "Download video");
        e.formats_loaded(Ok(ProbeResult {
            title: None,
            options: vec![QualityOption {
                format_id: "22".into(),
                width: 1280,
                height: 720,
                fps: 30.0,
                ext: "mp4".into(),
                has_audio: true,
                filesize: None,
            }],
        }));
        // choose a format, then back out before it finishes
        e.apply(MenuInput::Select(1));
        assert!(matches!(e.session().quality, Quality::Format { .. }));
        e.run_finished(Err(QuickTubeError::InputCancelled));
        assert_eq!(e.screen(), Screen::Provider);

        // the provider screen remembers the last choice
        match e.view() {
            View::Choice { default, .. } => assert_eq!(default, 2),
            other => panic!("{:?}", other),
        }

        pick(&mut e, "Download audio");
        assert_eq!(e.session().quality, Quality::Best);
        assert_eq!(e.session().action, Some(Action::DownloadAudio));
    }

    #[test]
    fn season_range_from_url_prefills_and_passes_through() {
        let mut e = engine();
        paste(&mut e, SEASON);
        match e.view() {
            View::Choice { items, default, prompt } => {
                assert!(items[default].starts_with("Download Specific Episodes"));
                assert!(prompt.contains("1-5"));
            }
            other => panic!("{:?}", other),
        }

        pick(&mut e, "Download Specific Episodes");
        assert_eq!(
            e.view(),
            View::Text {
                prompt: "Enter episodes (e.g. 1, 2-5, 10)".into(),
                initial: "1-5".into(),
            }
        );
        match e.apply(MenuInput::Text("1-5".into())) {
            Effect::Run(inv) => {
                assert_eq!(inv.value_of("--playlist-items"), Some("1-5"));
                assert_eq!(inv.args.last().unwrap(), "https://www.svtplay.se/skavlan");
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn last_episodes_needs_a_number() {
        let mut e = engine();
        paste(&mut e, "https://www.svtplay.se/skavlan");
        pick(&mut e, "Download the LAST X");
        assert_eq!(e.screen(), Screen::LastEpisodes);

        assert_eq!(e.apply(MenuInput::Text("five".into())), Effect::None);
        assert_eq!(e.screen(), Screen::LastEpisodes);
        assert_eq!(e.take_notices()[0].text, "Invalid number specified.");

        match e.apply(MenuInput::Text("5".into())) {
            Effect::Run(inv) => {
                assert_eq!(inv.tool, Tool::SvtplayDl);
                assert_eq!(inv.value_of("--all-last"), Some("5"));
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn playlist_menu_for_playlists() {
        let mut e = engine();
        paste(&mut e, PLAYLIST);
        assert!(items(&e.view())[0].starts_with("Stream Full Playlist"));
        match pick(&mut e, "Download Full Playlist (Video)") {
            Effect::Run(inv) => {
                assert!(inv.value_of("-o").unwrap().contains("playlist_index"));
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn success_resets_session_and_offers_next_steps() {
        let mut e = engine();
        paste(&mut e, VIDEO);
        pick(&mut e, "Download audio");
        e.run_finished(Ok(()));

        assert_eq!(e.screen(), Screen::AfterRun);
        assert_eq!(e.session(), &SessionOptions::default());
        assert!(e.link().is_none());
        assert!(!items(&e.view()).contains(&"Retry".to_string()));

        assert_eq!(pick(&mut e, "New link"), Effect::RefreshClipboard);
        assert_eq!(e.screen(), Screen::Main);
    }

    #[test]
    fn failure_offers_retry_of_same_command() {
        let mut e = engine();
        paste(&mut e, VIDEO);
        let first = match pick(&mut e, "Stream Video") {
            Effect::Run(inv) => inv,
            other => panic!("{:?}", other),
        };
        e.run_finished(Err(QuickTubeError::ProcessFailure {
            tool: Tool::Mpv,
            code: Some(2),
        }));
        assert_eq!(e.screen(), Screen::AfterRun);
        let notices = e.take_notices();
        assert!(notices[0].text.contains("exit code 2"));

        assert_eq!(pick(&mut e, "Retry"), Effect::Run(first));
        // back returns to the action list
        e.apply(MenuInput::Back);
        assert_eq!(e.screen(), Screen::Provider);
    }

    #[test]
    fn retry_picks_up_cookie_browser_chosen_after_failure() {
        let mut e = engine();
        paste(&mut e, VIDEO);
        pick(&mut e, "Download audio");
        e.run_finished(Err(QuickTubeError::ProcessFailure {
            tool: Tool::YtDlp,
            code: Some(1),
        }));

        pick(&mut e, "Select cookie browser");
        let i = index_of(&e, "firefox");
        e.apply(MenuInput::Select(i));
        assert_eq!(e.screen(), Screen::AfterRun);

        match pick(&mut e, "Retry") {
            Effect::Run(inv) => {
                assert_eq!(inv.value_of("--cookies-from-browser"), Some("firefox"));
                assert_eq!(inv.value_of("--audio-format"), Some("opus"));
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn missing_binary_points_to_installer() {
        let mut e = engine();
        paste(&mut e, VIDEO);
        pick(&mut e, "Download audio");
        e.run_finished(Err(QuickTubeError::MissingBinary { tool: Tool::YtDlp }));
        let notices = e.take_notices();
        assert!(notices.iter().any(|n| n.text.contains("Update tools")));
    }

    #[test]
    fn clipboard_not_offered_right_after_stream() {
        let mut e = engine();
        paste(&mut e, VIDEO);
        pick(&mut e, "Stream Video");
        e.run_finished(Ok(()));
        pick(&mut e, "New link");
        e.set_clipboard(VIDEO);
        assert!(e.clipboard_link().is_none());

        // next time around it is offered again
        e.set_clipboard(VIDEO);
        assert!(e.clipboard_link().is_some());
    }

    #[test]
    fn cookie_browser_carries_into_commands() {
        let mut e = engine();
        pick(&mut e, "Select cookie browser");
        assert_eq!(e.screen(), Screen::CookieBrowser);
        let i = index_of(&e, "firefox");
        e.apply(MenuInput::Select(i));
        assert_eq!(e.screen(), Screen::Main);
        assert!(items(&e.view())
            .iter()
            .any(|l| l == "Select cookie browser (current: firefox)"));

        paste(&mut e, VIDEO);
        match pick(&mut e, "Download audio") {
            Effect::Run(inv) => {
                assert_eq!(inv.value_of("--cookies-from-browser"), Some("firefox"))
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn updater_confirms_before_installing() {
        let mut e = engine();
        pick(&mut e, "Update tools");
        assert_eq!(e.screen(), Screen::ToolUpdater);
        assert_eq!(e.apply(MenuInput::Select(1)), Effect::None);
        assert_eq!(e.screen(), Screen::Main);

        pick(&mut e, "Update tools");
        assert_eq!(
            e.apply(MenuInput::Select(0)),
            Effect::Install(vec![Tool::YtDlp, Tool::SvtplayDl])
        );
        assert_eq!(e.screen(), Screen::Main);

        e.install_finished(&vec![
            (Tool::YtDlp, Ok("/tmp/qt-bin/yt-dlp".into())),
            (
                Tool::SvtplayDl,
                Err(QuickTubeError::Network {
                    tool: Tool::SvtplayDl,
                    message: "timeout".into(),
                }),
            ),
        ]);
        assert_eq!(e.take_notices()[0].level, NoticeLevel::Warning);
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut e = engine();
        assert_eq!(e.apply(MenuInput::Select(42)), Effect::None);
        assert_eq!(e.screen(), Screen::Main);
    }
}
