use super::types::Invocation;
use super::utils::*;
use crate::error::QuickTubeError;
use qt_core::{Action, Browser, Episodes, Link, LinkKind, Provider, Quality, SessionOptions, Tool};

/// Maps a classified link plus the user's choices to one tool invocation.
///
/// Pure: nothing is spawned or checked on disk here.
pub fn build_command(link: &Link, opts: &SessionOptions) -> Result<Invocation, QuickTubeError> {
    if !link.is_known() {
        return Err(QuickTubeError::Classification {
            url: link.raw().to_string(),
        });
    }
    let action = opts
        .action
        .ok_or_else(|| QuickTubeError::InvalidSelection("No action selected.".into()))?;
    let episodes = effective_episodes(link, &opts.episodes)?;

    match (link.provider(), action) {
        (Provider::Unknown, _) => Err(QuickTubeError::Classification {
            url: link.raw().to_string(),
        }),
        (_, Action::Stream | Action::StreamAudio) => {
            Ok(stream(link, action, opts.cookie_browser))
        }
        (Provider::YouTube, _) => Ok(youtube_download(link, action, opts, &episodes)),
        (Provider::StreamingService, _) => Ok(streaming_download(link, action, opts, &episodes)),
    }
}

/// A season link with no explicit selection uses the range from its URL.
fn effective_episodes(link: &Link, chosen: &Episodes) -> Result<Episodes, QuickTubeError> {
    let episodes = match (chosen, link.kind(), link.range()) {
        (Episodes::Single, LinkKind::SeasonRange, Some(range)) => {
            Episodes::Range(range.to_string())
        }
        _ => chosen.clone(),
    };

    match &episodes {
        Episodes::Range(r) if r.trim().is_empty() => Err(QuickTubeError::InvalidSelection(
            "Episode range is empty.".into(),
        )),
        Episodes::Last(0) => Err(QuickTubeError::InvalidSelection(
            "Number of episodes must be at least 1.".into(),
        )),
        _ => Ok(episodes),
    }
}

fn ytdlp_base(cookie_browser: Option<Browser>) -> Invocation {
    let inv = Invocation::new(Tool::YtDlp).args([
        "--no-warnings",
        "--force-overwrites",
        "--embed-metadata",
        "--embed-thumbnail",
    ]);
    match cookie_browser {
        Some(b) => inv.args(["--cookies-from-browser", b.as_str()]),
        None => inv,
    }
}

fn playlist_items(episodes: &Episodes) -> Option<String> {
    match episodes {
        Episodes::Range(r) => Some(r.clone()),
        Episodes::Last(n) => Some(format!("-{}:", n)),
        Episodes::Single | Episodes::All => None,
    }
}

fn stream(link: &Link, action: Action, cookie_browser: Option<Browser>) -> Invocation {
    let mode = if action == Action::StreamAudio {
        "--no-video"
    } else {
        "--no-terminal"
    };
    let mut inv = Invocation::new(Tool::Mpv).arg(mode);
    if let Some(b) = cookie_browser {
        inv = inv.arg(format!("--ytdl-raw-options-append=cookies-from-browser={}", b));
    }
    inv.arg(link.target())
}

fn youtube_download(
    link: &Link,
    action: Action,
    opts: &SessionOptions,
    episodes: &Episodes,
) -> Invocation {
    let mut inv = ytdlp_base(opts.cookie_browser);

    inv = if action == Action::DownloadAudio {
        inv.args(["-f", BEST_AUDIO, "-x", "--audio-format", AUDIO_CODEC])
    } else {
        inv.arg("-f")
            .arg(format_selector(&opts.quality))
            .args(["--merge-output-format", MERGE_CONTAINER])
    };

    if let Some(items) = playlist_items(episodes) {
        inv = inv.arg("--playlist-items").arg(items);
    }

    let numbered = link.kind() == LinkKind::Playlist || *episodes != Episodes::Single;
    let template = if numbered {
        TEMPLATE_PLAYLIST
    } else if action == Action::DownloadVideo && opts.quality != Quality::Best {
        TEMPLATE_SINGLE_HEIGHT
    } else {
        TEMPLATE_SINGLE
    };

    inv.args(["-o", template]).arg(link.target())
}

fn streaming_download(
    link: &Link,
    action: Action,
    opts: &SessionOptions,
    episodes: &Episodes,
) -> Invocation {
    let via_ytdlp = opts.downloader == Some(Tool::YtDlp);

    if action == Action::DownloadAudio {
        return match episodes {
            // svtplay-dl has no episode selection for audio
            Episodes::Range(_) | Episodes::Last(_) => {
                let mut inv = ytdlp_base(opts.cookie_browser).args([
                    "-f",
                    BEST_AUDIO,
                    "-x",
                    "--audio-format",
                    AUDIO_CODEC,
                ]);
                if let Some(items) = playlist_items(episodes) {
                    inv = inv.arg("--playlist-items").arg(items);
                }
                inv.args(["-o", TEMPLATE_SERIES]).arg(link.target())
            }
            Episodes::All => Invocation::new(Tool::SvtplayDl)
                .args(["--only-audio", "-A"])
                .arg(link.target()),
            Episodes::Single => Invocation::new(Tool::SvtplayDl)
                .arg("--only-audio")
                .arg(link.target()),
        };
    }

    match episodes {
        Episodes::Range(range) => streaming_ytdlp(link, opts, Some(range), TEMPLATE_SERIES),
        Episodes::All if via_ytdlp => streaming_ytdlp(link, opts, None, TEMPLATE_SERIES),
        Episodes::Single if via_ytdlp => streaming_ytdlp(link, opts, None, TEMPLATE_SINGLE),
        Episodes::Last(n) => svtplay(link, &["-A", "--all-last", &n.to_string()]),
        Episodes::All => svtplay(link, &["-A"]),
        Episodes::Single => svtplay(link, &[]),
    }
}

fn svtplay(link: &Link, extra: &[&str]) -> Invocation {
    Invocation::new(Tool::SvtplayDl)
        .args(["-S", "-M"])
        .args(extra.iter().copied())
        .arg(link.target())
}

fn streaming_ytdlp(
    link: &Link,
    opts: &SessionOptions,
    range: Option<&String>,
    template: &str,
) -> Invocation {
    let mut inv = ytdlp_base(opts.cookie_browser).args([
        "--embed-subs",
        "--write-subs",
        "--sub-langs",
        "all",
    ]);
    if let Some(r) = range {
        inv = inv.arg("--playlist-items").arg(r.as_str());
    }
    inv.args(["-o", template]).arg(link.target())
}
