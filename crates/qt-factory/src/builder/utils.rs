use qt_core::Quality;

pub const BEST_MP4: &str = "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best";
pub const BEST_AUDIO: &str = "bestaudio/best";
pub const AUDIO_CODEC: &str = "opus";
pub const MERGE_CONTAINER: &str = "mp4";

pub const TEMPLATE_SINGLE: &str = "%(title)s.%(ext)s";
pub const TEMPLATE_SINGLE_HEIGHT: &str = "%(title)s-%(height)sp.%(ext)s";
pub const TEMPLATE_PLAYLIST: &str = "%(playlist)s/%(playlist_index)02d - %(title)s.%(ext)s";
pub const TEMPLATE_SERIES: &str =
    "%(series)s/S%(season_number)02dE%(episode_number)02d - %(title)s.%(ext)s";

/// yt-dlp `-f` selector for a quality choice.
pub fn format_selector(quality: &Quality) -> String {
    match quality {
        Quality::Best => BEST_MP4.to_string(),
        Quality::MaxHeight(h) => format!("bestvideo[height<={h}]+bestaudio/best[height<={h}]"),
        Quality::Format { id, has_audio: true } => id.clone(),
        Quality::Format { id, has_audio: false } => format!("{}+bestaudio", id),
    }
}
