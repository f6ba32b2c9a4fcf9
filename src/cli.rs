//! Command-line interface for parlo
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::time::Duration;

/// Live speech translation sessions
#[derive(Parser, Debug)]
#[command(name = "parlo", version, about = "Live speech translation sessions")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress event output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: session state changes, -vv: every event)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Source language to recognize (default: ja-JP)
    #[arg(long, value_name = "LANG")]
    pub source: Option<String>,

    /// Target language to translate into and speak (default: de)
    #[arg(long, value_name = "LANG")]
    pub target: Option<String>,

    /// Voice for spoken translations (default: de-DE-KatjaNeural)
    #[arg(long, value_name = "VOICE")]
    pub voice: Option<String>,

    /// Session script to replay instead of connecting to the live service
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Pause between replayed script events (default: 300ms). Examples: 0s, 150ms, 1s
    #[arg(long, value_name = "DURATION", default_value = "300ms", value_parser = parse_pace)]
    pub pace: Duration,
}

/// Parse a pace duration string.
///
/// Supports any duration format accepted by `humantime`: bare numbers
/// (milliseconds), single-unit (`150ms`, `2s`), and compound (`1s500ms`).
fn parse_pace(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    // Bare number → milliseconds
    if let Ok(ms) = s.parse::<u64>() {
        return Ok(Duration::from_millis(ms));
    }
    humantime::parse_duration(s).map_err(|e| e.to_string())
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check configuration and credentials
    Check,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}
