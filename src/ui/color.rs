//! Color, emoji, and formatting utilities for terminal output

use crate::core::constants::{display, service};
use crate::core::types::LinkStatus;

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";

    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const BLUE: &'static str = "\x1b[34m";
    pub const CYAN: &'static str = "\x1b[36m";

    pub const BRIGHT_BLACK: &'static str = "\x1b[90m";
}

/// Apply color to text if terminal supports it
pub fn colorize(text: &str, color: &str) -> String {
    if supports_formatting() {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Terminal capability detection for stdout
pub fn supports_formatting() -> bool {
    use std::io::IsTerminal;

    // Disable formatting when running tests
    if cfg!(test) {
        return false;
    }

    detect_formatting(|key| std::env::var(key).ok(), std::io::stdout().is_terminal())
}

/// Decide on formatting from environment lookups and whether the output is
/// a terminal.
fn detect_formatting<F>(env: F, is_terminal: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    // Check if colors/emojis are explicitly disabled
    if env("NO_COLOR").is_some() || env("FORCE_COLOR").as_deref() == Some("0") {
        return false;
    }

    // Force enable if explicitly requested
    if env("FORCE_COLOR").is_some() {
        return true;
    }

    if !is_terminal {
        return false;
    }

    match env("TERM") {
        Some(term) if term == "dumb" || term.is_empty() => false,
        Some(_) => true,
        None => matches!(
            env("TERM_PROGRAM").as_deref(),
            Some("Apple_Terminal" | "iTerm.app" | "vscode" | "WezTerm" | "kitty" | "Alacritty")
        ),
    }
}

/// Color for a verdict: red for invalid, blue for the `mega` tag, amber for
/// anything unrecognized. Valid links stay green.
pub fn status_color(status: &LinkStatus) -> &'static str {
    match status {
        LinkStatus::Valid => Colors::GREEN,
        LinkStatus::Invalid => Colors::RED,
        LinkStatus::Other(tag) if tag == service::MEGA_STATUS => Colors::BLUE,
        LinkStatus::Unknown | LinkStatus::Other(_) => Colors::YELLOW,
    }
}

/// Emoji shown in front of a verdict
pub fn status_emoji(status: &LinkStatus) -> &'static str {
    match status {
        LinkStatus::Valid => display::VALID_EMOJI,
        LinkStatus::Invalid => display::INVALID_EMOJI,
        LinkStatus::Unknown => display::UNKNOWN_EMOJI,
        LinkStatus::Other(_) => display::TAGGED_EMOJI,
    }
}
