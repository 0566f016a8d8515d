//! Terminal helpers: coloured message prefixes and log setup.

use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter, e.g. `UPA_LOG=debug`.
pub const LOG_ENV: &str = "UPA_LOG";

fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if use_colors() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn note_prefix() -> String {
    if use_colors() {
        "note:".yellow().bold().to_string()
    } else {
        "note:".to_string()
    }
}

pub fn info_prefix() -> String {
    if use_colors() {
        "info:".blue().bold().to_string()
    } else {
        "info:".to_string()
    }
}

/// Install the stderr log subscriber. `UPA_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "upa=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(use_colors())
        .try_init();
}
