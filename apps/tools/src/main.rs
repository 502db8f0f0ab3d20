use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use mode_state::DemoState;
use serde::Serialize;
use shared::{
    domain::{ImageRef, ModelImage},
    protocol::{DemoEvent, TryOffPreset, TryOnPreset},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Runs the page's event handlers from the command line and prints the
/// resulting widget updates as JSON.
#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Toggle {
        #[arg(action = ArgAction::Set)]
        value: bool,
    },
    GarmentChanged {
        #[arg(long)]
        garment: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        toggle: bool,
    },
    ModelChanged {
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        garment: Option<String>,
        #[arg(long)]
        toggle: bool,
    },
    TryOnPreset {
        #[arg(long)]
        garment: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        output: String,
    },
    TryOffPreset {
        #[arg(long)]
        model: String,
        #[arg(long)]
        output: String,
    },
    /// Folds a JSON array of events into a fresh page state.
    Replay { events: PathBuf },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Toggle { value } => print_json(&mode_state::on_toggle_changed(value)),
        Command::GarmentChanged {
            garment,
            model,
            toggle,
        } => {
            let garment = garment.map(ImageRef::new);
            let model = model.map(ModelImage::new);
            print_json(&mode_state::on_garment_input_changed(
                garment.as_ref(),
                model.as_ref(),
                toggle,
            ))
        }
        Command::ModelChanged {
            model,
            garment,
            toggle,
        } => {
            let model = model.map(ModelImage::new);
            let garment = garment.map(ImageRef::new);
            print_json(&mode_state::on_model_input_changed(
                model.as_ref(),
                garment.as_ref(),
                toggle,
            ))
        }
        Command::TryOnPreset {
            garment,
            model,
            output,
        } => print_json(&mode_state::select_try_on_preset(&TryOnPreset {
            garment: ImageRef::new(garment),
            model: ImageRef::new(model),
            output: ImageRef::new(output),
        })),
        Command::TryOffPreset { model, output } => {
            print_json(&mode_state::select_try_off_preset(&TryOffPreset {
                model: ImageRef::new(model),
                output: ImageRef::new(output),
            }))
        }
        Command::Replay { events } => {
            let raw = fs::read_to_string(&events)
                .with_context(|| format!("failed to read {}", events.display()))?;
            print_json(&replay(&raw)?)
        }
    }
}

fn replay(raw: &str) -> Result<DemoState> {
    let events: Vec<DemoEvent> =
        serde_json::from_str(raw).context("event log must be a JSON array of events")?;
    info!(count = events.len(), "replaying events");

    let mut state = DemoState::default();
    for event in events {
        state.apply_event(event);
    }
    Ok(state)
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
