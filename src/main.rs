//! Jotter - a terminal text editor with autosave.
//!
//! # Usage
//!
//! ```bash
//! jotter notes.txt
//! jotter --watch notes.txt
//! jotter --theme dark --autosave-interval 60 notes.txt
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use jotter::app::App;
use jotter::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};

/// A terminal text editor with autosave
#[derive(Parser, Debug)]
#[command(name = "jotter", version, about, long_about = None)]
struct Cli {
    /// File to edit (starts with an empty buffer when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Watch the open file for external changes
    #[arg(short, long)]
    watch: bool,

    /// Disable the background autosave loop
    #[arg(long)]
    no_autosave: bool,

    /// Seconds between autosave ticks (default 300)
    #[arg(long, value_name = "SECS")]
    autosave_interval: Option<u64>,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Save current command-line flags as defaults in the config file
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    // Run the application
    let mut app = App::new(cli.file)
        .with_watch(effective.watch)
        .with_autosave(!effective.no_autosave)
        .with_theme(effective.theme.unwrap_or(ThemeMode::Light))
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );
    if let Some(secs) = effective.autosave_interval {
        app = app.with_autosave_interval(Duration::from_secs(secs.max(1)));
    }

    app.run().context("Application error")
}
