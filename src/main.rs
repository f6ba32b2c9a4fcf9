use anyhow::Result;
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use parlo::app::run_session_command;
use parlo::cli::{Cli, Commands};
use parlo::config::Config;
use parlo::{config, defaults};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let config = load_config(cli.config.as_deref())?;
            run_session_command(
                config,
                cli.source,
                cli.target,
                cli.voice,
                cli.script,
                cli.pace,
                cli.quiet,
                cli.verbose,
            )
            .await?;
        }
        Some(Commands::Check) => {
            let config = load_config(cli.config.as_deref())?;
            run_check(&config);
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "parlo", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Priority order:
/// 1. Custom config path from CLI (--config)
/// 2. Default config path (~/.config/parlo/config.toml)
/// 3. Built-in defaults with environment variable overrides
fn load_config(custom_path: Option<&std::path::Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        // Load from custom path
        Config::load(path)?
    } else {
        // A missing default file is fine, a broken one is not
        let default_path = Config::default_path();
        Config::load_or_default(&default_path)?
    };

    // Apply environment variable overrides
    Ok(config.with_env_overrides())
}

/// Report credential and configuration readiness without starting a session.
fn run_check(config: &Config) {
    println!("parlo {}", parlo::version_string());
    println!();

    let key = config::env_non_blank(defaults::SPEECH_KEY_VAR);
    match &key {
        Some(value) => println!(
            "  {}    set ({})",
            format!("{}:", defaults::SPEECH_KEY_VAR).dimmed(),
            config::mask_secret(value)
        ),
        None => println!(
            "  {}    {}",
            format!("{}:", defaults::SPEECH_KEY_VAR).dimmed(),
            "not set".red()
        ),
    }

    let region = config::env_non_blank(defaults::SPEECH_REGION_VAR);
    match &region {
        Some(value) => println!(
            "  {} {}",
            format!("{}:", defaults::SPEECH_REGION_VAR).dimmed(),
            value
        ),
        None => println!(
            "  {} {}",
            format!("{}:", defaults::SPEECH_REGION_VAR).dimmed(),
            "not set".red()
        ),
    }

    match config.validate() {
        Ok(()) => println!("  {}       {}", "configuration:".dimmed(), "valid".green()),
        Err(e) => println!(
            "  {}       {} ({})",
            "configuration:".dimmed(),
            "invalid".red(),
            e
        ),
    }

    println!();
    println!("Effective configuration:");
    match toml::to_string_pretty(config) {
        Ok(rendered) => {
            for line in rendered.lines() {
                println!("  {line}");
            }
        }
        Err(e) => println!("  (could not render: {e})"),
    }

    println!();
    if key.is_some() && region.is_some() {
        println!("{}", "✓ Credentials present. Sessions can start.".green());
    } else {
        println!(
            "{}",
            "⚠ Credentials missing. Sessions will print setup help and exit.".yellow()
        );
        println!("  export {}=<your-speech-key>", defaults::SPEECH_KEY_VAR);
        println!("  export {}=<service-region>", defaults::SPEECH_REGION_VAR);
    }
}
