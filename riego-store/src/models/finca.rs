//! Finca (farm/property) entity
//!
//! Field names are the domain names; column names live in the `sqlx`
//! renames so rows are mapped by name, never by position.

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Stored finca row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Finca {
    /// Storage-assigned primary key
    pub id: i32,
    #[sqlx(rename = "fin_nombre")]
    pub name: String,
    #[sqlx(rename = "fin_direccion")]
    pub address: String,
    #[sqlx(rename = "fin_latitud")]
    pub latitude: f64,
    #[sqlx(rename = "fin_longitud")]
    pub longitude: f64,
    #[sqlx(rename = "fin_altitud")]
    pub altitude: f64,
    /// References `usuario(id)`; the foreign key is enforced by the database
    #[sqlx(rename = "fin_usuario")]
    pub owner_id: i32,
}

/// Finca fields for a row that does not exist yet (no id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFinca {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub owner_id: i32,
}

impl Finca {
    /// Attach a storage id to unsaved fields.
    pub fn from_new(id: i32, new: NewFinca) -> Self {
        Self {
            id,
            name: new.name,
            address: new.address,
            latitude: new.latitude,
            longitude: new.longitude,
            altitude: new.altitude,
            owner_id: new.owner_id,
        }
    }

    /// Drop the id, keeping every other field.
    pub fn to_new(&self) -> NewFinca {
        NewFinca {
            name: self.name.clone(),
            address: self.address.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
            owner_id: self.owner_id,
        }
    }
}

impl fmt::Display for Finca {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Finca {{ id: {}, name: {:?}, address: {:?}, lat: {}, lon: {}, alt: {}, owner: {} }}",
            self.id,
            self.name,
            self.address,
            self.latitude,
            self.longitude,
            self.altitude,
            self.owner_id
        )
    }
}

impl fmt::Display for NewFinca {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Finca {{ id: <new>, name: {:?}, address: {:?}, lat: {}, lon: {}, alt: {}, owner: {} }}",
            self.name, self.address, self.latitude, self.longitude, self.altitude, self.owner_id
        )
    }
}
