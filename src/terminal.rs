//! Terminal detection.
//!
//! This module answers the two questions a table needs about its output:
//! how wide the terminal is, and whether escape sequences should be emitted
//! at all.

use std::io::IsTerminal;

struct EnvSettings {
    no_color: Option<String>,
    force_color: Option<String>,
    term: Option<String>,
}

fn read_env_settings() -> EnvSettings {
    EnvSettings {
        no_color: std::env::var("NO_COLOR").ok(),
        force_color: std::env::var("FORCE_COLOR").ok(),
        term: std::env::var("TERM").ok(),
    }
}

/// Check if stdout is connected to a terminal.
#[must_use]
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Check if stderr is connected to a terminal.
#[must_use]
pub fn is_stderr_terminal() -> bool {
    std::io::stderr().is_terminal()
}

/// Width of the terminal stdout is connected to, in columns.
///
/// Returns `0` when stdout is not a terminal or the size query fails.
#[must_use]
pub fn terminal_width() -> usize {
    if !is_terminal() {
        return 0;
    }
    crossterm::terminal::size().map_or(0, |(width, _)| usize::from(width))
}

/// Decide whether styled output should carry escape sequences.
///
/// - `NO_COLOR` set and non-empty: no colors (<https://no-color.org/>)
/// - `FORCE_COLOR` set, non-empty and not `0`: colors
/// - `TERM=dumb` or `TERM=unknown`: no colors
/// - Otherwise: colors if stdout is a terminal
#[must_use]
pub fn colors_enabled() -> bool {
    colors_enabled_with(&read_env_settings(), is_terminal())
}

/// Like [`colors_enabled`], for output written to stderr.
#[must_use]
pub fn stderr_colors_enabled() -> bool {
    colors_enabled_with(&read_env_settings(), is_stderr_terminal())
}

fn colors_enabled_with(env: &EnvSettings, is_tty: bool) -> bool {
    if env.no_color.as_deref().is_some_and(|value| !value.is_empty()) {
        return false;
    }

    if let Some(force_color) = env.force_color.as_deref() {
        let force_color = force_color.trim();
        if !force_color.is_empty() && force_color != "0" {
            return true;
        }
    }

    let term = env
        .term
        .as_deref()
        .map(|value| value.trim().to_lowercase())
        .unwrap_or_default();
    if term == "dumb" || term == "unknown" {
        return false;
    }

    is_tty
}
