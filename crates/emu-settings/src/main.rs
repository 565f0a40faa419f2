//! Emulator settings tool: entry point.
//!
//! Inspects and edits the persisted emulator configuration, and runs the
//! apply step against headless collaborators to show what a running
//! frontend would receive.
//!
//! # Usage
//!
//! ```text
//! emu-settings [OPTIONS] <COMMAND>
//!
//! Commands:
//!   show [--json]            Print the diagnostic configuration dump
//!   apply                    Apply settings to headless collaborators
//!   profile list             List input profiles
//!   profile load <INDEX>     Make a stored profile the active one
//!   profile save <INDEX>     Overwrite a stored profile with the active one
//!   profile create <NAME>    Add a profile and select it
//!   profile delete <INDEX>   Remove a profile
//!   profile rename <NAME>    Rename the active profile
//!
//! Options:
//!   -c, --config <PATH>      Settings file [env: EMU_SETTINGS_CONFIG]
//!   -v, --verbose            Log at debug level unless RUST_LOG is set
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use emu_settings::application::apply::{ApplyEngine, DebugServer, VideoFeatureFlags};
use emu_settings::application::log_settings::log_settings;
use emu_settings::application::manage_profiles::{self, ProfileCommand, ProfileSummary};
use emu_settings::application::microphone::{MicFactory, MicrophoneRegistry};
use emu_settings::infrastructure::diagnostics::{LineBuffer, TracingLog};
use emu_settings::infrastructure::headless::{HeadlessSystem, LoggingDebugServer};
use emu_settings::infrastructure::mic_registry::SharedMicRegistry;
use emu_settings::infrastructure::storage::config::{
    load_settings, save_settings, settings_file_path, SettingsDocument,
};
use emu_settings_core::setting_records;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Inspect and edit emulator settings.
#[derive(Debug, Parser)]
#[command(name = "emu-settings", about = "Emulator configuration tool", version)]
struct Cli {
    /// Settings file to use instead of the platform default.
    #[arg(short, long, env = "EMU_SETTINGS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the diagnostic configuration dump.
    Show {
        /// Print the records as a JSON array instead of text lines.
        #[arg(long)]
        json: bool,
    },
    /// Apply the settings to headless collaborators and report the outcome.
    Apply,
    /// Manage input profiles.
    #[command(subcommand)]
    Profile(ProfileAction),
}

#[derive(Debug, Subcommand)]
enum ProfileAction {
    /// List stored profiles; the active one is marked with `*`.
    List,
    /// Load the profile at INDEX into the active configuration.
    Load { index: usize },
    /// Save the active configuration over the profile at INDEX.
    Save { index: usize },
    /// Create a profile from the active configuration and select it.
    Create { name: String },
    /// Delete the profile at INDEX; the first profile becomes active.
    Delete { index: usize },
    /// Rename the active profile.
    Rename { name: String },
}

impl From<ProfileAction> for ProfileCommand {
    fn from(action: ProfileAction) -> Self {
        match action {
            ProfileAction::List => ProfileCommand::List,
            ProfileAction::Load { index } => ProfileCommand::Load(index),
            ProfileAction::Save { index } => ProfileCommand::Save(index),
            ProfileAction::Create { name } => ProfileCommand::Create(name),
            ProfileAction::Delete { index } => ProfileCommand::Delete(index),
            ProfileAction::Rename { name } => ProfileCommand::Rename(name),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = match cli.config {
        Some(path) => path,
        None => settings_file_path().context("failed to resolve settings file path")?,
    };
    debug!("using settings file {}", path.display());

    let document = load_settings(&path)
        .with_context(|| format!("failed to load settings from {}", path.display()))?;
    let (mut values, mut manager) = document
        .into_state()
        .with_context(|| format!("invalid settings in {}", path.display()))?;

    match cli.command {
        Command::Show { json } => {
            if json {
                let records = setting_records(&values);
                let text = serde_json::to_string_pretty(&records)
                    .context("failed to encode settings as JSON")?;
                println!("{text}");
            } else {
                let mut buffer = LineBuffer::new();
                log_settings(&values, &mut buffer);
                for line in buffer.into_lines() {
                    println!("{line}");
                }
            }
        }
        Command::Apply => {
            log_settings(&values, &mut TracingLog);

            let debug_server = Arc::new(LoggingDebugServer::new());
            let registry = Arc::new(SharedMicRegistry::new());
            let engine = ApplyEngine::new(
                Arc::clone(&debug_server) as Arc<dyn DebugServer>,
                Arc::new(VideoFeatureFlags::new()),
                Arc::new(HeadlessSystem),
                Arc::clone(&registry) as Arc<dyn MicrophoneRegistry>,
                MicFactory::new(),
            );
            engine.apply(&values);

            let flags = engine.video_flags().snapshot();
            println!("hardware renderer:   {}", flags.hw_renderer_enabled);
            println!("shader JIT:          {}", flags.shader_jit_enabled);
            println!("hardware shaders:    {}", flags.hw_shader_enabled);
            println!("accurate GS:         {}", flags.hw_shader_accurate_gs);
            println!("accurate multiply:   {}", flags.hw_shader_accurate_mul);
            println!(
                "gdb stub:            {} (port {})",
                if debug_server.is_enabled() { "enabled" } else { "disabled" },
                debug_server.port()
            );
            println!("microphone:          {}", registry.current().kind());
        }
        Command::Profile(action) => {
            let command = ProfileCommand::from(action);
            let mutating = command.is_mutating();

            let listing = manage_profiles::execute(command, &mut values, &mut manager)
                .context("profile operation failed")?;
            print_profiles(&listing);

            if mutating {
                let document = SettingsDocument::from_state(&values, &manager);
                save_settings(&path, &document)
                    .with_context(|| format!("failed to save settings to {}", path.display()))?;
                info!("settings saved to {}", path.display());
            }
        }
    }

    Ok(())
}

fn print_profiles(listing: &[ProfileSummary]) {
    for row in listing {
        let marker = if row.active { '*' } else { ' ' };
        println!("{marker} {:>2}  {}", row.index, row.name);
    }
}
