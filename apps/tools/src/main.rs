use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use calibration::{required_equipment, PanelVariant, StepResolver, UserChoice};
use clap::{Parser, Subcommand};
use deck::{CompatibilityChecker, CustomLabwareDefs, DeckLayout};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::{Axis, LabwareDefinition, LabwareId, Sign},
    error::{ApiError, CoreError},
    protocol::{DeckSetupSnapshot, SessionSnapshot},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "labctl", about = "Calibration panel and deck compatibility checks")]
struct Cli {
    #[arg(long, default_value = "labctl.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Which wizard panel a session snapshot should show.
    Panel {
        #[arg(long)]
        session: PathBuf,
    },
    /// Commands sent when the operator confirms the current panel.
    Proceed {
        #[arg(long)]
        session: PathBuf,
        /// Tip rack definition chosen on the introduction panel.
        #[arg(long)]
        tip_rack: Option<PathBuf>,
        #[arg(long, conflicts_with = "tip_rack")]
        invalidate_tip: bool,
    },
    /// Jog command for one press of a jog button.
    Jog {
        axis: String,
        #[arg(allow_hyphen_values = true)]
        direction: String,
        step_mm: f64,
    },
    /// Labware the operator needs before starting a session.
    Equipment {
        #[arg(long)]
        session: PathBuf,
        #[arg(long)]
        tip_rack: Option<PathBuf>,
    },
    /// Whether swapping two labware on a designer deck is blocked.
    Swap {
        #[arg(long)]
        deck: PathBuf,
        #[arg(long)]
        dragged: String,
        #[arg(long)]
        hovered: Option<String>,
        /// JSON array of user-authored labware definitions.
        #[arg(long)]
        custom_labware: Option<PathBuf>,
    },
    /// Slots that need a gen-1 multichannel collision warning.
    Warnings {
        #[arg(long)]
        deck: PathBuf,
    },
}

#[derive(Serialize)]
struct PanelReport {
    #[serde(flatten)]
    panel: PanelVariant,
    title_key: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    body_key: Option<&'static str>,
    jog_step_sizes: &'static [f64],
}

#[derive(Serialize)]
struct SwapReport {
    blocked: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<CoreError>() {
            Some(core) => {
                let body = ApiError::from(core.clone());
                match serde_json::to_string(&body) {
                    Ok(json) => eprintln!("{json}"),
                    Err(_) => eprintln!("{core}"),
                }
                ExitCode::from(2)
            }
            None => {
                eprintln!("error: {err:#}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(&cli.config)?;
    info!(config = %cli.config.display(), ?settings, "loaded settings");

    let resolver = StepResolver::new(settings.resolver_config());
    let checker = CompatibilityChecker::new(settings.checker_config());

    match cli.command {
        Command::Panel { session } => {
            let session: SessionSnapshot = read_json(&session)?;
            let panel = resolver.resolve_panel(&session)?;
            print_json(&PanelReport {
                panel,
                title_key: panel.title_key(),
                body_key: panel.body_key(),
                jog_step_sizes: panel.jog_step_sizes(),
            })
        }
        Command::Proceed {
            session,
            tip_rack,
            invalidate_tip,
        } => {
            let session: SessionSnapshot = read_json(&session)?;
            let choice = if invalidate_tip {
                UserChoice::InvalidateTip
            } else if let Some(path) = tip_rack {
                UserChoice::ChooseTipRack(read_json(&path)?)
            } else {
                UserChoice::Confirm
            };
            print_json(&resolver.build_proceed_command(&session, choice)?)
        }
        Command::Jog {
            axis,
            direction,
            step_mm,
        } => {
            let axis: Axis = axis.parse()?;
            let sign: Sign = direction.parse()?;
            print_json(&resolver.build_jog_command(axis, sign, step_mm)?)
        }
        Command::Equipment { session, tip_rack } => {
            let session: SessionSnapshot = read_json(&session)?;
            let chosen: Option<LabwareDefinition> =
                tip_rack.map(|path| read_json(&path)).transpose()?;
            print_json(&required_equipment(&session, chosen.as_ref()))
        }
        Command::Swap {
            deck,
            dragged,
            hovered,
            custom_labware,
        } => {
            let setup: DeckSetupSnapshot = read_json(&deck)?;
            let layout = DeckLayout::from_snapshot(&setup)?;
            let custom_defs = match custom_labware {
                Some(path) => custom_defs_from(read_json(&path)?),
                None => CustomLabwareDefs::new(),
            };
            let hovered = hovered.map(LabwareId);
            let blocked = checker.check_swap(
                &layout,
                &LabwareId(dragged),
                hovered.as_ref(),
                &custom_defs,
            )?;
            print_json(&SwapReport { blocked })
        }
        Command::Warnings { deck } => {
            let setup: DeckSetupSnapshot = read_json(&deck)?;
            let layout = DeckLayout::from_snapshot(&setup)?;
            print_json(&checker.collision_warning_slots(&layout))
        }
    }
}

fn custom_defs_from(definitions: Vec<LabwareDefinition>) -> CustomLabwareDefs {
    definitions
        .into_iter()
        .map(|definition| (definition.uri(), definition))
        .collect()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse '{}'", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
