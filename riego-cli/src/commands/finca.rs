//! Finca command - CRUD over the finca table
//!
//! One store operation per invocation:
//!   riego finca list
//!   riego finca get 12
//!   riego finca by-owner 7
//!   riego finca add --name "Finca A" --address "Km 4" --lat 4.65 --lon -74.05 --alt 1200 --owner 7
//!   riego finca update 12 --name ... --owner 7
//!   riego finca delete 12

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use riego_store::{Finca, FincaRepo, NewFinca};
use sqlx::PgPool;

#[derive(Parser, Debug)]
#[command(about = "Manage finca (farm) records")]
pub struct FincaArgs {
    #[command(subcommand)]
    pub command: FincaCommand,
}

#[derive(Subcommand, Debug)]
pub enum FincaCommand {
    /// List every finca ordered by id
    List,
    /// Show a single finca
    Get {
        /// Finca id
        id: i32,
    },
    /// List the fincas owned by a user
    ByOwner {
        /// Owner (usuario) id
        owner_id: i32,
    },
    /// Insert a new finca
    Add {
        #[command(flatten)]
        fields: FincaFields,
        /// Print the stored record (with its generated id) instead of rows affected
        #[arg(long)]
        returning: bool,
    },
    /// Overwrite every field of an existing finca
    Update {
        /// Finca id
        id: i32,
        #[command(flatten)]
        fields: FincaFields,
    },
    /// Delete a finca
    Delete {
        /// Finca id
        id: i32,
    },
}

/// Column values shared by add and update
#[derive(Args, Debug, Clone)]
pub struct FincaFields {
    /// Finca name
    #[arg(long)]
    pub name: String,
    /// Postal address or directions
    #[arg(long)]
    pub address: String,
    /// Latitude in decimal degrees
    #[arg(long = "lat", allow_negative_numbers = true)]
    pub latitude: f64,
    /// Longitude in decimal degrees
    #[arg(long = "lon", allow_negative_numbers = true)]
    pub longitude: f64,
    /// Altitude in meters
    #[arg(long = "alt", allow_negative_numbers = true)]
    pub altitude: f64,
    /// Owner (usuario) id
    #[arg(long = "owner")]
    pub owner_id: i32,
}

impl From<FincaFields> for NewFinca {
    fn from(fields: FincaFields) -> Self {
        NewFinca {
            name: fields.name,
            address: fields.address,
            latitude: fields.latitude,
            longitude: fields.longitude,
            altitude: fields.altitude,
            owner_id: fields.owner_id,
        }
    }
}

pub async fn run_finca(args: FincaArgs, pool: &PgPool, json: bool) -> Result<()> {
    let repo = FincaRepo::new(pool);

    match args.command {
        FincaCommand::List => {
            let fincas = repo.list_all().await.context("Failed to list fincas")?;
            print_fincas(&fincas, json)?;
        }
        FincaCommand::Get { id } => {
            let Some(finca) = repo
                .find_by_id(id)
                .await
                .context(format!("Failed to load finca {}", id))?
            else {
                bail!("finca {} not found", id);
            };
            print_finca(&finca, json)?;
        }
        FincaCommand::ByOwner { owner_id } => {
            let fincas = repo
                .find_by_owner(owner_id)
                .await
                .context(format!("Failed to list fincas for owner {}", owner_id))?;

            if fincas.is_empty() && !json {
                println!("No fincas for owner {}", owner_id);
            } else {
                print_fincas(&fincas, json)?;
            }
        }
        FincaCommand::Add { fields, returning } => {
            let new = NewFinca::from(fields);
            if returning {
                let stored = repo
                    .insert_returning(&new)
                    .await
                    .context("Failed to insert finca")?;
                print_finca(&stored, json)?;
            } else {
                let rows = repo.insert(&new).await.context("Failed to insert finca")?;
                print_rows("inserted", rows, json)?;
            }
        }
        FincaCommand::Update { id, fields } => {
            let finca = Finca::from_new(id, fields.into());
            let rows = repo
                .update(&finca)
                .await
                .context(format!("Failed to update finca {}", id))?;
            print_rows("updated", rows, json)?;
        }
        FincaCommand::Delete { id } => {
            let rows = repo
                .delete_by_id(id)
                .await
                .context(format!("Failed to delete finca {}", id))?;
            print_rows("deleted", rows, json)?;
        }
    }

    Ok(())
}

fn print_fincas(fincas: &[Finca], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(fincas)?);
        return Ok(());
    }

    println!("{}", table_header());
    for finca in fincas {
        println!("{}", table_row(finca));
    }
    Ok(())
}

fn print_finca(finca: &Finca, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(finca)?);
    } else {
        println!("{}", table_header());
        println!("{}", table_row(finca));
    }
    Ok(())
}

fn print_rows(action: &str, rows: u64, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::json!({ "action": action, "rows_affected": rows }));
    } else {
        println!("{} {} row(s)", action, rows);
    }
    Ok(())
}

fn table_header() -> String {
    format!(
        "{:>6}  {:<24} {:<28} {:>10} {:>11} {:>8} {:>6}",
        "ID", "NAME", "ADDRESS", "LAT", "LON", "ALT", "OWNER"
    )
}

fn table_row(finca: &Finca) -> String {
    format!(
        "{:>6}  {:<24} {:<28} {:>10.5} {:>11.5} {:>8.1} {:>6}",
        finca.id,
        truncate(&finca.name, 24),
        truncate(&finca.address, 28),
        finca.latitude,
        finca.longitude,
        finca.altitude,
        finca.owner_id
    )
}

/// Truncate to `max` chars on a char boundary, marking the cut with `…`.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finca() -> Finca {
        Finca {
            id: 12,
            name: "Finca A".to_owned(),
            address: "Km 4".to_owned(),
            latitude: 4.65,
            longitude: -74.05,
            altitude: 1200.0,
            owner_id: 7,
        }
    }

    #[test]
    fn fields_convert_to_new_finca() {
        let fields = FincaFields {
            name: "Finca A".to_owned(),
            address: "Km 4".to_owned(),
            latitude: 4.65,
            longitude: -74.05,
            altitude: 1200.0,
            owner_id: 7,
        };
        assert_eq!(NewFinca::from(fields), finca().to_new());
    }

    #[test]
    fn row_lines_up_with_header() {
        let row = table_row(&finca());
        assert_eq!(row.chars().count(), table_header().chars().count());
        assert!(row.contains("Finca A"));
        assert!(row.contains("-74.05000"));
        assert!(row.contains("1200.0"));
    }

    #[test]
    fn truncate_handles_multibyte() {
        assert_eq!(truncate("Cañaveral", 20), "Cañaveral");
        assert_eq!(truncate("Cañaveral", 4), "Cañ…");
    }
}
