use clap::{Parser, Subcommand};
use sitequote_geo::LngLat;
use std::path::PathBuf;

/// SiteQuote - Contractor quotes from map and photo measurements
#[derive(Parser, Debug)]
#[command(name = "sitequote")]
#[command(about = "Contractor quotes from map and photo measurements", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./sitequote.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Built-in industry catalog to price with
    #[arg(long, global = true)]
    pub industry: Option<String>,

    /// Service catalog file (TOML or JSON); wins over --industry
    #[arg(long, global = true, value_name = "FILE")]
    pub templates: Option<PathBuf>,

    /// Concrete pricing rules file (TOML or JSON)
    #[arg(long, global = true, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Display units (imperial or metric)
    #[arg(long, global = true)]
    pub units: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the service templates of the active catalog
    Templates,

    /// Price a saved measurement document
    Quote(QuoteArgs),

    /// Price a concrete takeoff
    Concrete(ConcreteArgs),

    /// Generate stall tick marks along a parking row
    Ticks(TicksArgs),

    /// Count stalls and painted lineal feet for a parking row
    Stripe(StripeArgs),

    /// Format a raw metric measurement in both unit systems
    Format(FormatArgs),

    /// Show the layered configuration and where each value came from
    Config,
}

#[derive(Parser, Debug)]
pub struct QuoteArgs {
    /// Measurement document (JSON)
    pub document: PathBuf,

    /// Override a service rate, e.g. --rate sealcoating=0.30
    #[arg(long = "rate", value_name = "ID=VALUE", value_parser = parse_key_value)]
    pub rates: Vec<(String, f64)>,

    /// Override a minimum charge, e.g. --minimum crack_filling=300
    #[arg(long = "minimum", value_name = "ID=VALUE", value_parser = parse_key_value)]
    pub minimums: Vec<(String, f64)>,
}

#[derive(Parser, Debug)]
pub struct ConcreteArgs {
    /// Concrete measurements (JSON array, or an object with a `measurements` field)
    pub measurements: PathBuf,
}

#[derive(Parser, Debug)]
pub struct TicksArgs {
    /// Row start as lng,lat
    #[arg(long, value_parser = parse_lng_lat, allow_hyphen_values = true)]
    pub start: LngLat,

    /// Row end as lng,lat
    #[arg(long, value_parser = parse_lng_lat, allow_hyphen_values = true)]
    pub end: LngLat,

    /// Map zoom level
    #[arg(long, default_value = "19")]
    pub zoom: f64,

    /// Stall width in feet
    #[arg(long, default_value = "9")]
    pub stall_width: f64,

    /// Tick length in feet
    #[arg(long)]
    pub tick_length: Option<f64>,

    /// Also mark both ends of the row
    #[arg(long)]
    pub include_ends: bool,
}

#[derive(Parser, Debug)]
pub struct StripeArgs {
    /// Row length in feet
    #[arg(long)]
    pub row_length: f64,

    /// Stall width in feet
    #[arg(long, default_value = "9")]
    pub stall_width: f64,

    /// Stall depth in feet
    #[arg(long, default_value = "18")]
    pub stall_depth: f64,

    /// Paint a divider at both ends of the row
    #[arg(long)]
    pub include_ends: bool,
}

#[derive(Parser, Debug)]
#[command(group(clap::ArgGroup::new("measurement").required(true).multiple(true)))]
pub struct FormatArgs {
    /// Area in square meters
    #[arg(long, group = "measurement")]
    pub area: Option<f64>,

    /// Length in meters
    #[arg(long, group = "measurement")]
    pub length: Option<f64>,
}

fn parse_key_value(s: &str) -> Result<(String, f64), String> {
    let (key, value) =
        s.split_once('=').ok_or_else(|| format!("expected ID=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing service id in '{}'", s));
    }
    let value: f64 =
        value.trim().parse().map_err(|_| format!("invalid number '{}'", value.trim()))?;
    Ok((key.to_string(), value))
}

fn parse_lng_lat(s: &str) -> Result<LngLat, String> {
    let (lng, lat) = s.split_once(',').ok_or_else(|| format!("expected lng,lat, got '{}'", s))?;
    let lng: f64 = lng.trim().parse().map_err(|_| format!("invalid longitude '{}'", lng))?;
    let lat: f64 = lat.trim().parse().map_err(|_| format!("invalid latitude '{}'", lat))?;
    if !(-180.0..=180.0).contains(&lng) || !(-90.0..=90.0).contains(&lat) {
        return Err(format!("coordinate out of range: {}", s));
    }
    Ok(LngLat::new(lng, lat))
}
