use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use ureq::Agent;

use crate::error::InputError;

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Resolves a postal code to `(latitude, longitude)`.
pub fn geocode(
    agent: &Agent,
    geocoder_url: &str,
    postal_code: &str,
    country: &str,
) -> Result<(f64, f64)> {
    let url = format!("{}/search", geocoder_url.trim_end_matches('/'));
    let places: Vec<Place> = agent
        .get(&url)
        .query("postalcode", postal_code)
        .query("countrycodes", &country.to_lowercase())
        .query("format", "json")
        .query("limit", "1")
        .call()
        .with_context(|| format!("Failed to geocode {postal_code} in {country}"))?
        .into_json()
        .context("Failed to parse geocoding response")?;

    let location = first_location(places, postal_code)?;
    debug!("Postal code {postal_code} in {country} is at {location:?}");
    Ok(location)
}

// Nominatim returns coordinates as strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

fn first_location(places: Vec<Place>, postal_code: &str) -> Result<(f64, f64)> {
    let place = places
        .into_iter()
        .next()
        .ok_or_else(|| InputError::InvalidPostalCode(postal_code.to_string()))?;

    let lat = place
        .lat
        .parse()
        .with_context(|| format!("Invalid latitude: {}", place.lat))?;
    let lon = place
        .lon
        .parse()
        .with_context(|| format!("Invalid longitude: {}", place.lon))?;
    Ok((lat, lon))
}
