//! Live translation session entry point.
//!
//! Orchestrates the complete flow:
//! recognize → translate → dispatch → speak

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::{Config, Credentials};
use crate::defaults;
use crate::engine::replay::ReplayTranslator;
use crate::engine::synthesizer::{PacedSynthesizer, Synthesizer};
use crate::engine::translator::TranslationEngine;
use crate::error::{ParloError, Result};
use crate::session::controller::SessionController;
use crate::session::recognition::RecognitionSession;
use crate::synthesis::dispatcher::SynthesisDispatcher;
use crate::synthesis::queue::SynthesisQueue;
use crate::synthesis::report::{ConsoleReporter, SynthesisReporter};

/// Run a full translation session: recognize speech, render events, speak
/// final translations one at a time.
///
/// # Arguments
/// * `config` - Base configuration (can be overridden by CLI args)
/// * `source` - Optional source language override from CLI
/// * `target` - Optional target language override from CLI
/// * `voice` - Optional voice override from CLI
/// * `script` - Session script path; with no path the script is read from a
///   piped stdin
/// * `pace` - Default pause between replayed events
/// * `quiet` - Suppress event rendering
/// * `verbosity` - Verbosity level (0=default, 1=state changes, 2=every event)
///
/// # Returns
/// Ok(()) on success or on the friendly missing-credentials exit, an error
/// if startup fails
#[allow(clippy::too_many_arguments)]
pub async fn run_session_command(
    config: Config,
    source: Option<String>,
    target: Option<String>,
    voice: Option<String>,
    script: Option<PathBuf>,
    pace: Duration,
    quiet: bool,
    verbosity: u8,
) -> Result<()> {
    let config = apply_cli_overrides(config, source, target, voice);
    config.validate()?;

    // Credential gate, before anything engine-shaped is built. Leaving with
    // success keeps wrapper scripts from treating an unset shell as a crash.
    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(ParloError::MissingCredential { variable }) => {
            print_credentials_help(&variable);
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    if verbosity >= 1 && !quiet {
        eprintln!("parlo: speech region {}", credentials.region);
    }

    let stdin_is_terminal = std::io::stdin().is_terminal();
    let script_text = match &script {
        Some(path) => load_script_file(path)?,
        None => {
            if stdin_is_terminal {
                return Err(ParloError::Other(
                    "no session script: pass --script PATH or pipe one on stdin".to_string(),
                ));
            }
            std::io::read_to_string(std::io::stdin())?
        }
    };

    let engine: Arc<dyn TranslationEngine> = Arc::new(
        ReplayTranslator::from_script_str(&script_text, config.engine_config())?.with_pace(pace),
    );
    let session = RecognitionSession::new(engine);

    let reporter: Arc<dyn SynthesisReporter> = Arc::new(ConsoleReporter::new(quiet));
    let synthesizer: Arc<dyn Synthesizer> = Arc::new(PacedSynthesizer::new());
    let queue = SynthesisQueue::spawn(
        synthesizer,
        reporter.clone(),
        config.synthesis.queue_capacity,
    );
    let dispatcher = SynthesisDispatcher::new(
        config.synthesis.speak_language.clone(),
        config.synthesis.voice.clone(),
        queue.sender(),
        reporter,
    );

    let mut controller = SessionController::new(session, dispatcher, queue)
        .with_quiet(quiet)
        .with_verbosity(verbosity);

    // Enter only works when stdin is still a terminal; with a piped script
    // the stream end or Ctrl-C stops the session.
    let use_enter = script.is_some() && stdin_is_terminal;
    if !quiet {
        if use_enter {
            eprintln!("listening... press Enter to stop.");
        } else {
            eprintln!("listening... press Ctrl-C to stop.");
        }
    }

    controller.run(wait_for_stop(use_enter)).await
}

/// Fold the CLI language and voice flags into the configuration.
///
/// A target override replaces the whole target set and moves the spoken
/// language with it, so an overridden config still validates.
fn apply_cli_overrides(
    mut config: Config,
    source: Option<String>,
    target: Option<String>,
    voice: Option<String>,
) -> Config {
    if let Some(s) = source {
        config.translation.source_language = s;
    }
    if let Some(t) = target {
        config.translation.target_languages = vec![t.clone()];
        config.synthesis.speak_language = t;
    }
    if let Some(v) = voice {
        config.synthesis.voice = v;
    }
    config
}

/// Read a session script from disk, naming the path on failure.
fn load_script_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        ParloError::Other(format!(
            "failed to read session script {}: {}",
            path.display(),
            e
        ))
    })
}

/// Resolve when the user asks to stop: Enter on an interactive stdin, or
/// Ctrl-C either way.
async fn wait_for_stop(use_enter: bool) {
    if use_enter {
        let mut line = String::new();
        let mut reader = BufReader::new(tokio::io::stdin());
        tokio::select! {
            _ = reader.read_line(&mut line) => {}
            _ = tokio::signal::ctrl_c() => {}
        }
    } else {
        tokio::signal::ctrl_c().await.ok();
    }
}

/// Explain the required environment and how to set it, without failing.
fn print_credentials_help(missing: &str) {
    eprintln!("parlo: {missing} is not set.");
    eprintln!();
    eprintln!("A live session needs the speech service credentials:");
    eprintln!("  export {}=<your-speech-key>", defaults::SPEECH_KEY_VAR);
    eprintln!(
        "  export {}=<service-region>   # e.g. westeurope",
        defaults::SPEECH_REGION_VAR
    );
    eprintln!();
    eprintln!("Nothing was started. Run `parlo check` to verify the setup.");
}
