//! Clinic finder.
//!
//! Loads a facility catalog and prints each facility with its distance from
//! the given position and whether it is open at the given time (local clock
//! when `--at` is omitted).

mod catalog;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, FixedOffset, Local};
use clap::{Parser, ValueEnum};
use clinic_common::format::{format_distance, initials};
use clinic_common::{build_listings, FacilityKind, FacilityListing, GeoPoint, ListingQuery, OpenPolicy};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "clinic-finder", about = "List nearby clinics and doctors with open status")]
struct Cli {
    /// Path to the facility catalog (JSON array).
    #[arg(long)]
    catalog: PathBuf,

    /// User latitude in decimal degrees.
    #[arg(long, env = "CLINIC_LAT", requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// User longitude in decimal degrees.
    #[arg(long, env = "CLINIC_LON", requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Evaluate opening hours at this RFC 3339 instant instead of now.
    #[arg(long)]
    at: Option<String>,

    /// Only list facilities that are open.
    #[arg(long)]
    open_only: bool,

    /// Drop facilities farther than this (and those with unknown distance).
    #[arg(long)]
    max_distance_km: Option<f64>,

    #[arg(long, value_enum)]
    kind: Option<KindArg>,

    /// Compare minutes and let overnight hours wrap past midnight.
    #[arg(long)]
    precise: bool,

    /// Print listings as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Clinic,
    Doctor,
}

impl From<KindArg> for FacilityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Clinic => FacilityKind::Clinic,
            KindArg::Doctor => FacilityKind::Doctor,
        }
    }
}

impl Cli {
    fn origin(&self) -> Result<Option<GeoPoint>> {
        let (Some(lat), Some(lon)) = (self.lat, self.lon) else {
            return Ok(None);
        };
        let origin = GeoPoint::new(lat, lon);
        origin.validate().context("invalid --lat/--lon")?;
        Ok(Some(origin))
    }

    fn now(&self) -> Result<DateTime<FixedOffset>> {
        match &self.at {
            Some(at) => DateTime::parse_from_rfc3339(at)
                .with_context(|| format!("invalid --at timestamp `{at}`")),
            None => Ok(Local::now().fixed_offset()),
        }
    }

    fn query(&self) -> Result<ListingQuery> {
        if let Some(max) = self.max_distance_km {
            if max.is_nan() || max < 0.0 {
                bail!("--max-distance-km must be a non-negative number");
            }
        }
        Ok(ListingQuery {
            open_only: self.open_only,
            max_distance_km: self.max_distance_km,
            kind: self.kind.map(FacilityKind::from),
            policy: if self.precise {
                OpenPolicy::MinutePrecise
            } else {
                OpenPolicy::HourGranularity
            },
        })
    }
}

fn render_line(listing: &FacilityListing) -> String {
    let status = if listing.open_now { "Open" } else { "Closed" };
    format!(
        "[{}] {} · {} · {}",
        initials(&listing.facility.name),
        listing.facility.name,
        format_distance(listing.distance_km),
        status
    )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let origin = cli.origin()?;
    let now = cli.now()?;
    let query = cli.query()?;
    debug!(?origin, %now, "evaluating catalog");

    let facilities = catalog::load_catalog(&cli.catalog)?;
    let listings = build_listings(&facilities, origin.as_ref(), &now, &query);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
    } else if listings.is_empty() {
        println!("No facilities match.");
    } else {
        for listing in &listings {
            println!("{}", render_line(listing));
        }
    }
    Ok(())
}
