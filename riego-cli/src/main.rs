//! riego CLI - finca (farm) records over PostgreSQL
//!
//! Entry point for the `riego` command-line tool:
//! - Schema bootstrap (`migrate` subcommand)
//! - Finca CRUD (`finca` subcommand)
//! - Effective configuration (`config` subcommand)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use riego_store::StoreConfig;
use sqlx::PgPool;

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "riego",
    author,
    version,
    about = "Manage farm (finca) records stored in PostgreSQL"
)]
struct Cli {
    /// Enable debug logging (shows every store write)
    #[arg(long, global = true)]
    debug: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the usuario/finca tables if they do not exist
    Migrate,
    /// Finca CRUD operations (list, get, by-owner, add, update, delete)
    Finca(commands::finca::FincaArgs),
    /// Inspect riego configuration (show, path)
    Config(commands::config::ConfigArgs),
}

async fn open_pool() -> Result<PgPool> {
    let config = StoreConfig::load()?;
    riego_store::db::create_pool_from_config(&config)
        .await
        .context("Failed to connect to database (check DATABASE_URL)")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(cli.debug).ok();

    match cli.command {
        Commands::Migrate => {
            let pool = open_pool().await?;
            commands::run_migrate(&pool).await
        }
        Commands::Finca(args) => {
            let pool = open_pool().await?;
            commands::run_finca(args, &pool, cli.json).await
        }
        Commands::Config(args) => commands::run_config(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::finca::FincaCommand;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn add_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "riego", "finca", "add", "--name", "Finca A", "--address", "Km 4", "--lat", "4.65",
            "--lon", "-74.05", "--alt", "1200", "--owner", "7",
        ])
        .unwrap();

        let Commands::Finca(args) = cli.command else {
            panic!("expected finca command");
        };
        let FincaCommand::Add { fields, returning } = args.command else {
            panic!("expected add");
        };
        assert_eq!(fields.longitude, -74.05);
        assert_eq!(fields.owner_id, 7);
        assert!(!returning);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["riego", "finca", "get", "3", "--json", "--debug"]).unwrap();
        assert!(cli.json);
        assert!(cli.debug);
        assert!(matches!(
            cli.command,
            Commands::Finca(commands::finca::FincaArgs {
                command: FincaCommand::Get { id: 3 }
            })
        ));
    }

    #[test]
    fn update_requires_every_field() {
        let err = Cli::try_parse_from(["riego", "finca", "update", "3", "--name", "Only name"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
