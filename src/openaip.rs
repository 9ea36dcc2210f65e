use anyhow::{Context, Result};
use log::{debug, info};
use ureq::Agent;

use crate::{facility::FacilityRecord, kind::FacilityKind};

/// Public openAIP export bucket, see https://www.openaip.net/docs
pub const DEFAULT_STORAGE_URL: &str =
    "https://storage.googleapis.com/29f98e10-a489-4c82-ae5e-489dbcd4912f";

pub fn file_name(country: &str, kind: FacilityKind) -> String {
    format!("{}_{}.json", country.to_lowercase(), kind.type_code())
}

pub fn fetch(
    agent: &Agent,
    storage_url: &str,
    country: &str,
    kind: FacilityKind,
) -> Result<Vec<FacilityRecord>> {
    let url = format!(
        "{}/{}",
        storage_url.trim_end_matches('/'),
        file_name(country, kind)
    );
    debug!("Fetching {url}");

    let facilities: Vec<FacilityRecord> = agent
        .get(&url)
        .call()
        .with_context(|| format!("Failed to fetch {kind} for {country} from {url}"))?
        .into_json()
        .with_context(|| format!("Failed to parse {kind} for {country}"))?;
    info!("Fetched {} {kind} for {country}", facilities.len());

    Ok(facilities)
}
