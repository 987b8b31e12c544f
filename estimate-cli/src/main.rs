use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use estimate_cli::app::{self, RowInput};
use estimate_cli::config::{AppConfig, Overrides};
use estimate_cli::logging;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Tender estimate pricing.
///
/// Keeps a markup coefficient profile per user and prices estimate rows
/// with it.
#[derive(Debug, Parser)]
#[command(name = "estimate", version)]
struct Cli {
    /// Settings file. Defaults to $ESTIMATE_CONFIG, then ./estimate.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Storage backend (`sqlite` or `memory`).
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Backend connection string.
    /// For SQLite this is a file path (e.g. `estimate.db`) or `:memory:`.
    #[arg(long, global = true)]
    db: Option<String>,

    /// User whose coefficient profile is used.
    #[arg(long, global = true)]
    user: Option<String>,

    /// Log level or filter directive; RUST_LOG takes precedence.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Inspect or change the markup coefficient profile.
    #[command(subcommand)]
    Coefficients(CoefficientsCommand),

    /// Price a single estimate row and print every step.
    Calc {
        /// Row type label: раб, мат, суб-раб, суб-мат.
        #[arg(long)]
        kind: String,

        /// Material type label: основ or вспом.
        #[arg(long)]
        material_kind: Option<String>,

        /// Quantity fed to the markup pipeline.
        #[arg(long)]
        work_volume: String,

        /// Billed quantity. Defaults to the work volume.
        #[arg(long)]
        volume: Option<String>,

        #[arg(long)]
        labor_price: Option<String>,

        /// Unit material price including delivery.
        #[arg(long)]
        material_price: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum CoefficientsCommand {
    /// Print the current profile.
    Show,
    /// Change one coefficient. The value is a ratio (0.06) or percent (6%).
    Set { key: String, value: String },
    /// Restore the default profile.
    Reset,
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_path) = AppConfig::load(cli.config.as_deref())?;
    config.apply(Overrides {
        backend: cli.backend,
        connection_string: cli.db,
        user: cli.user,
        log_level: cli.log_level,
    });

    logging::init(config.logging.level.as_deref(), config.logging.file.as_deref())?;
    if let Some(path) = &config_path {
        debug!(path = %path.display(), "loaded settings");
    }

    let locale = config.locale()?;
    let store = app::open_store(&config).await?;
    let scope = config.user_scope();

    match cli.command {
        Command::Coefficients(CoefficientsCommand::Show) => {
            print!("{}", app::show_coefficients(store.as_ref(), scope).await);
        }
        Command::Coefficients(CoefficientsCommand::Set { key, value }) => {
            let updated = app::set_coefficient(store.as_ref(), scope, &key, &value).await?;
            print!("{}", app::render_coefficients(&updated));
        }
        Command::Coefficients(CoefficientsCommand::Reset) => {
            let defaults = app::reset_coefficients(store.as_ref(), scope).await?;
            print!("{}", app::render_coefficients(&defaults));
        }
        Command::Calc {
            kind,
            material_kind,
            work_volume,
            volume,
            labor_price,
            material_price,
        } => {
            let input = RowInput {
                kind,
                material_kind,
                work_volume,
                volume,
                labor_price,
                material_price,
            };
            let result = app::calculate(store.as_ref(), scope, &input).await?;
            print!("{}", app::render_calculation(&result, &locale));
        }
    }

    Ok(())
}
