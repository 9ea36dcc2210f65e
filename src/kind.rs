use core::fmt;
use std::{collections::BTreeSet, str::FromStr};

use crate::error::InputError;

// Selected airport types, see https://docs.openaip.net/#/Airports/get_airports__id_
//   0: Airport (civil/military)
//   2: Airfield Civil
//   3: International Airport
//   9: Airport resp. Airfield IFR
//  13: Altiport
const ENABLED_AIRPORT_TYPES: &[i64] = &[0, 2, 3, 9, 13];

// Every airspace type from 0 (Other) to 35 (Upper Traffic Area).
const AIRSPACE_TYPE_COUNT: i64 = 36;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum FacilityKind {
    Airports,
    Airspaces,
}

impl fmt::Display for FacilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FacilityKind {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "airports" => Self::Airports,
            "airspaces" => Self::Airspaces,
            _ => return Err(InputError::UnsupportedKind(s.to_string())),
        })
    }
}

impl FacilityKind {
    pub fn all() -> Vec<Self> {
        vec![FacilityKind::Airports, FacilityKind::Airspaces]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Airports => "airports",
            Self::Airspaces => "airspaces",
        }
    }

    /// Short code used by openAIP in its export file names.
    pub fn type_code(&self) -> &'static str {
        match self {
            Self::Airports => "apt",
            Self::Airspaces => "asp",
        }
    }

    pub fn enabled_types(&self) -> BTreeSet<i64> {
        match self {
            Self::Airports => ENABLED_AIRPORT_TYPES.iter().copied().collect(),
            Self::Airspaces => (0..AIRSPACE_TYPE_COUNT).collect(),
        }
    }
}
