//! Common test utilities and logging infrastructure
//!
//! Integration tests call [`init_test_logging`] to route the crate's `log`
//! records through a `tracing` subscriber, so failures come with the debug
//! output of the table that produced them.
//!
//! # Environment Variables
//!
//! - `RUST_LOG=debug` - Enable debug logging in tests
//! - `RUST_LOG=tablecloth::overhead=trace` - Module-specific tracing

#![allow(dead_code)]

use std::sync::Once;

use tablecloth::overhead::strip_sgr;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize test logging infrastructure.
///
/// Output goes to the test writer and is captured by cargo test unless
/// `--nocapture` is given. Calling this more than once is harmless.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("tablecloth=debug,test=info"));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_test_writer()
                    .with_ansi(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(true)
                    .compact(),
            )
            .try_init()
            .ok();
    });
}

/// Output lines with escape sequences removed.
pub fn plain_lines(output: &str) -> Vec<String> {
    output.lines().map(strip_sgr).collect()
}

/// Assert that every line has the same byte length as the first one.
///
/// With equalized overheads, rows of one table are byte-for-byte the same
/// length whenever their visible text is padded to the same column widths.
pub fn assert_uniform_line_lengths(lines: &[&str]) {
    if let Some(first) = lines.first() {
        for (index, line) in lines.iter().enumerate() {
            assert_eq!(
                line.len(),
                first.len(),
                "line {index} has {} bytes, expected {}: {line:?}",
                line.len(),
                first.len()
            );
        }
    }
}

/// Run `f` with environment variables set (`Some`) or removed (`None`),
/// restoring the previous values afterwards.
///
/// Tests using this must be marked `#[serial]`.
pub fn with_env_vars<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let originals: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| ((*key).to_string(), std::env::var(key).ok()))
        .collect();

    for (key, value) in vars {
        // SAFETY: Test-only code, serialized with #[serial]
        match value {
            Some(v) => unsafe { std::env::set_var(key, v) },
            None => unsafe { std::env::remove_var(key) },
        }
    }

    let result = f();

    for (key, value) in originals {
        // SAFETY: Test-only code, serialized with #[serial]
        match value {
            Some(v) => unsafe { std::env::set_var(&key, v) },
            None => unsafe { std::env::remove_var(&key) },
        }
    }

    result
}
