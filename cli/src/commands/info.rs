use std::env;

use colored::*;

use crate::terminal::print;
use mailr_common::config::RunConfig;

/// Prints the tool version, run defaults, and which environment
/// variables the prompts will fall back to.
pub fn info() {
    let defaults = RunConfig::default();
    let keys = [
        "Version",
        "Send cap",
        "Retry delay",
        "Attempts",
        "MAILR_USER",
        "MAILR_PASSWORD",
    ];
    print::set_key_width(&keys);

    print::aligned_line("Version", env!("CARGO_PKG_VERSION"));
    print::aligned_line("Send cap", defaults.limit.to_string());
    print::aligned_line(
        "Retry delay",
        format!("{}s", defaults.retry_delay.as_secs()),
    );
    print::aligned_line("Attempts", defaults.max_attempts.to_string());
    print::aligned_line("MAILR_USER", env_presence("MAILR_USER"));
    print::aligned_line("MAILR_PASSWORD", env_presence("MAILR_PASSWORD"));
}

fn env_presence(key: &str) -> ColoredString {
    if env::var(key).is_ok_and(|value| !value.is_empty()) {
        "set".green()
    } else {
        "unset".yellow()
    }
}
