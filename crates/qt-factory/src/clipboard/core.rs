use crate::classifier::LinkClassifier;
use qt_core::Link;
use std::process::{Command, Stdio};
use tracing::debug;

/// Helper programs tried in order, with their arguments.
const READERS: &[(&str, &[&str])] = &[
    ("powershell", &["-NoProfile", "-Command", "Get-Clipboard"]),
    ("wl-paste", &["--no-newline"]),
    ("xclip", &["-o", "-selection", "clipboard"]),
    ("pbpaste", &[]),
];

/// Best-effort clipboard read. Any failure is an empty string.
pub fn read_clipboard() -> String {
    for (program, args) in READERS {
        if *program == "powershell" && !cfg!(windows) {
            continue;
        }
        if which::which(program).is_err() {
            continue;
        }

        match Command::new(program)
            .args(*args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
        {
            Ok(out) if out.status.success() => {
                return clean(&String::from_utf8_lossy(&out.stdout));
            }
            Ok(out) => debug!("{} exited with {:?}", program, out.status.code()),
            Err(e) => debug!("{} failed: {}", program, e),
        }
    }
    String::new()
}

fn clean(text: &str) -> String {
    text.replace('\0', "").trim().to_string()
}

/// The clipboard text as a link, if it is one QuickTube can handle.
pub fn detect_link(text: &str, classifier: &LinkClassifier) -> Option<Link> {
    let text = clean(text);
    if text.is_empty() || text.contains(char::is_whitespace) {
        return None;
    }
    let link = classifier.classify(&text);
    link.is_known().then_some(link)
}
