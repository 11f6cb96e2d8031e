//! Human/JSON output switching for the CLI.
//!
//! Every subcommand renders through [`CommandOutput`]; the global
//! `--json` flag flips the whole surface to machine-readable output so
//! scheduling runs can be driven from scripts.

use serde::Serialize;

pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;
    fn to_json(&self) -> serde_json::Value;
}

pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&result.to_json()).unwrap_or_default()
        );
    } else {
        println!("{}", result.to_human());
    }
}

/// Shorten a table cell to at most `max_len` characters, appending
/// "..." when cut. Exam and course names come straight from catalogs
/// and may carry non-ASCII characters, so cuts land on character
/// boundaries rather than byte offsets.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{kept}...")
}
