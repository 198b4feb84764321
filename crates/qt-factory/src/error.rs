use qt_core::Tool;
use std::io;
use thiserror::Error;

/// Everything that can go wrong while serving one menu operation.
/// None of these end the program; the menu shows them and carries on.
#[derive(Debug, Error)]
pub enum QuickTubeError {
    #[error("Unrecognized link: '{url}'")]
    Classification { url: String },

    #[error("'{tool}' was not found in the tools folder or on PATH")]
    MissingBinary { tool: Tool },

    #[error("{tool} exited with {}", exit_label(.code))]
    ProcessFailure { tool: Tool, code: Option<i32> },

    #[error("Failed to start {tool}: {source}")]
    Spawn {
        tool: Tool,
        #[source]
        source: io::Error,
    },

    #[error("Download of {tool} failed: {message}")]
    Network { tool: Tool, message: String },

    #[error("{tool} cannot be installed automatically on this platform")]
    UnsupportedPlatform { tool: Tool },

    #[error("{0}")]
    InvalidSelection(String),

    #[error("Could not read media information: {0}")]
    Probe(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("Cancelled")]
    InputCancelled,
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {}", c),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl QuickTubeError {
    /// Retrying the same command can plausibly help.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            QuickTubeError::ProcessFailure { .. }
                | QuickTubeError::Spawn { .. }
                | QuickTubeError::MissingBinary { .. }
                | QuickTubeError::InputCancelled
        )
    }

    /// Extra line pointing the user at a fix.
    pub fn hint(&self) -> Option<String> {
        match self {
            QuickTubeError::MissingBinary { tool } if tool.is_installable() => {
                Some("Choose 'Update tools' in the main menu to download it.".to_string())
            }
            QuickTubeError::MissingBinary { tool } => Some(format!(
                "Install {} with your system package manager.",
                tool
            )),
            QuickTubeError::Classification { .. } => Some(
                "Supported links: youtube.com, youtu.be and svtplay.se.".to_string(),
            ),
            _ => None,
        }
    }
}
