//! `tama` command: fetch unit and user records and print them as JSON.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use serde::Serialize;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use tama_client::config::ClientSettings;
use tama_client::domain::{BuildingId, PALETTE, Role, UnitId, UnitsService, UserId, UsersService};
use tama_client::outbound::http::HttpApiClient;

/// `tama` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tama",
    about = "Fetch unit and user records from the signature-tracking API",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// List units, optionally for one building.
    Units {
        /// Restrict the listing to this building.
        #[arg(long = "building", value_name = "id")]
        building_id: Option<BuildingId>,
    },
    /// Show one unit.
    Unit {
        /// Unit identifier.
        unit_id: UnitId,
    },
    /// List users, optionally with one role.
    Users {
        /// Restrict the listing to this role.
        #[arg(long, value_name = "role")]
        role: Option<Role>,
    },
    /// List field agents.
    Agents,
    /// Show one user.
    User {
        /// User identifier.
        user_id: UserId,
    },
    /// Print the dashboard colour palette.
    Palette,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(run(args.command))
}

async fn run(command: Command) -> Result<()> {
    if matches!(command, Command::Palette) {
        return print_json(&PALETTE);
    }

    // Settings come from the environment or config file only; the command line
    // belongs to clap.
    let settings = ClientSettings::load_from_iter([OsString::from("tama")])
        .map_err(|err| eyre!("load client settings: {err}"))?;
    let client = Arc::new(HttpApiClient::from_settings(&settings)?);
    info!(base_url = client.base_url(), "api client ready");

    let units = UnitsService::new(Arc::clone(&client));
    let users = UsersService::new(client);

    match command {
        Command::Units { building_id } => print_json(&units.get_units(building_id.as_ref()).await?),
        Command::Unit { unit_id } => print_json(&units.get_unit(&unit_id).await?),
        Command::Users { role } => print_json(&users.get_users(role).await?),
        Command::Agents => print_json(&users.get_agents().await?),
        Command::User { user_id } => print_json(&users.get_user(&user_id).await?),
        Command::Palette => print_json(&PALETTE),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).wrap_err("encode output")?;
    writeln!(stdout).wrap_err("write output")?;
    Ok(())
}
