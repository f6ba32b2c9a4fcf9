//! Shared event rendering for terminal output.
//! Used by the live session loop and the console synthesis reporter.

use crate::session::event::{RecognitionEvent, Translations};
use crate::synthesis::types::{SynthesisOutcome, SynthesisRequest};

const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Service error code that warrants the credentials hint.
const AUTH_FAILURE_CODE: &str = "AuthenticationFailure";

/// Translations in a stable order for rendering.
///
/// The translation map is unordered; sorting by language code keeps console
/// output (and anything scraping it) identical across runs.
fn sorted_translations(translations: &Translations) -> Vec<(&str, &str)> {
    let mut pairs: Vec<(&str, &str)> = translations
        .iter()
        .map(|(lang, text)| (lang.as_str(), text.as_str()))
        .collect();
    pairs.sort_by_key(|&(lang, _)| lang);
    pairs
}

/// Render a recognition event to stderr.
pub fn render_event(event: &RecognitionEvent) {
    match event {
        RecognitionEvent::Partial {
            source_text,
            translations,
        } => {
            // Partials are transient hypotheses; keep them visually quiet.
            eprintln!("{DIM}RECOGNIZING: {source_text}{RESET}");
            for (lang, text) in sorted_translations(translations) {
                eprintln!("{DIM}  translating [{lang}] {text}{RESET}");
            }
        }
        RecognitionEvent::Final {
            source_text,
            translations,
        } => {
            eprintln!("RECOGNIZED: {source_text}");
            for (lang, text) in sorted_translations(translations) {
                eprintln!("  {GREEN}TRANSLATED [{lang}]{RESET} {text}");
            }
        }
        RecognitionEvent::NoMatch => {
            eprintln!("{YELLOW}NOMATCH:{RESET} speech could not be recognized.");
        }
        RecognitionEvent::Canceled {
            reason,
            error_code,
            error_details,
        } => {
            eprintln!("{RED}CANCELED:{RESET} reason={reason}");
            if let Some(code) = error_code {
                eprintln!("{RED}CANCELED:{RESET} code={code}");
            }
            if let Some(details) = error_details {
                eprintln!("{RED}CANCELED:{RESET} details={details}");
            }
            if error_code.as_deref() == Some(AUTH_FAILURE_CODE) {
                eprintln!("{RED}CANCELED:{RESET} check the speech key and region settings.");
            }
        }
        RecognitionEvent::SessionStarted => {
            eprintln!("{DIM}session started.{RESET}");
        }
        RecognitionEvent::SessionStopped => {
            eprintln!("{DIM}session stopped.{RESET}");
        }
    }
}

/// Render the start of a synthesis execution.
pub fn render_speaking(request: &SynthesisRequest) {
    eprintln!("{GREEN}SPEAKING:{RESET} {}", request.text);
}

/// Render the terminal outcome of a synthesis execution.
pub fn render_synthesis_outcome(outcome: &SynthesisOutcome) {
    match outcome {
        SynthesisOutcome::Completed => {
            eprintln!("{DIM}  synthesis completed.{RESET}");
        }
        SynthesisOutcome::Canceled {
            reason,
            error_details,
        } => {
            eprintln!("{YELLOW}  synthesis canceled:{RESET} {reason}");
            if let Some(details) = error_details {
                eprintln!("{DIM}  {details}{RESET}");
            }
        }
        SynthesisOutcome::Failed { error } => {
            eprintln!("{RED}  synthesis failed:{RESET} {error}");
        }
    }
}
