//! Startup fleet and accounts loaded from TOML
//!
//! The built-in sample is compiled in; `--seed <file>` or the `seed_file`
//! config entry replaces it with a user-supplied file of the same shape.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use carrent_domain::Clock;
use carrent_store::RenterField;
use carrent_types::{ConfigError, Error, RenterClass, Result, VehicleId, VehicleSpec};

use crate::app::{RentalDesk, RenterRef};

const SAMPLE_SEED: &str = include_str!("../seed/sample.toml");

/// A vehicle a seeded renter already holds
#[derive(Debug, Clone, Deserialize)]
pub struct SeedHolding {
    /// Registry ID (1-based position in the `vehicles` list)
    pub vehicle: VehicleId,
    /// Due this many rental-period units after startup
    #[serde(default)]
    pub due_in_units: Option<i64>,
    /// Due this many seconds after startup (added to `due_in_units`)
    #[serde(default)]
    pub due_in_secs: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedRenter {
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub dues: i64,
    /// Class default if unset
    #[serde(default)]
    pub reputation: Option<f64>,
    #[serde(default)]
    pub holdings: Vec<SeedHolding>,
}

/// Container for parsing seed TOML
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub vehicles: Vec<VehicleSpec>,
    #[serde(default)]
    pub clients: Vec<SeedRenter>,
    #[serde(default)]
    pub staff: Vec<SeedRenter>,
}

impl SeedData {
    /// The built-in sample fleet and accounts
    pub fn sample() -> Result<Self> {
        Self::load_from_str(SAMPLE_SEED)
    }

    /// Load seed data from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to read seed file {}: {}",
                path.display(),
                e
            )))
        })?;

        Self::load_from_str(&content)
    }

    /// Load seed data from a TOML string
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        Ok(toml::from_str(toml_content)?)
    }

    /// Add everything to `desk`. Vehicles first, so holdings can refer to them.
    pub fn populate<C: Clock>(&self, desk: &mut RentalDesk<C>) -> Result<()> {
        for spec in &self.vehicles {
            desk.add_vehicle(spec.clone()).map_err(|e| {
                Error::Seed(format!("vehicle '{} {}': {}", spec.brand, spec.model, e))
            })?;
        }

        for (class, renters) in [
            (RenterClass::Client, &self.clients),
            (RenterClass::Staff, &self.staff),
        ] {
            for seed in renters {
                populate_renter(desk, class, seed)?;
            }
        }

        info!(
            vehicles = desk.registry().count(),
            clients = desk.directory().renters(RenterClass::Client).len(),
            staff = desk.directory().renters(RenterClass::Staff).len(),
            "seed data loaded"
        );
        Ok(())
    }
}

fn populate_renter<C: Clock>(
    desk: &mut RentalDesk<C>,
    class: RenterClass,
    seed: &SeedRenter,
) -> Result<()> {
    let context = |e: carrent_types::RentalError| {
        Error::Seed(format!("{} '{}': {}", class, seed.name, e))
    };

    let who: RenterRef = desk
        .add_renter(class, &seed.name, &seed.password)
        .map_err(context)?;

    if seed.dues != 0 {
        desk.update_renter(who, RenterField::Dues(seed.dues))
            .map_err(context)?;
    }
    if let Some(reputation) = seed.reputation {
        desk.update_renter(who, RenterField::Reputation(reputation))
            .map_err(context)?;
    }

    let now = desk.now();
    let period = desk.period();
    for holding in &seed.holdings {
        let due_at = holding
            .due_in_units
            .unwrap_or(0)
            .checked_mul(period.secs())
            .and_then(|offset| offset.checked_add(holding.due_in_secs.unwrap_or(0)))
            .and_then(|offset| now.checked_add(offset))
            .ok_or_else(|| {
                Error::Seed(format!(
                    "{} '{}': due date of vehicle {} is out of range",
                    class, seed.name, holding.vehicle
                ))
            })?;
        desk.assign(who, holding.vehicle, due_at).map_err(context)?;
    }
    Ok(())
}

/// Desk populated from `seed_file`, or from the built-in sample when None
pub fn bootstrap<C: Clock>(
    desk: &mut RentalDesk<C>,
    seed_file: Option<&Path>,
) -> Result<()> {
    let seed = match seed_file {
        Some(path) => SeedData::load_from_file(path)?,
        None => SeedData::sample()?,
    };
    seed.populate(desk)
}
