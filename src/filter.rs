use std::collections::BTreeSet;

use geo::{Centroid, GeodesicDistance, Point};
use log::{debug, warn};

use crate::facility::{FacilityRecord, Geometry};

pub const DEFAULT_RADIUS_KM: f64 = 50.0;

/// Reference point of a search, usually a geocoded postal code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Center {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}

impl Center {
    pub fn new(latitude: f64, longitude: f64, radius_km: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius_km,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

/// Geographic narrowing applied after the type filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scope {
    /// Neither a postal code nor a radius was asked for.
    Everywhere,
    Around(Center),
    /// A radius with nothing to measure it from. Nothing qualifies.
    RadiusOnly(f64),
}

impl Scope {
    pub fn new(center: Option<(f64, f64)>, radius_km: Option<f64>) -> Self {
        match (center, radius_km) {
            (Some((lat, lon)), radius) => Scope::Around(Center::new(
                lat,
                lon,
                radius.unwrap_or(DEFAULT_RADIUS_KM),
            )),
            (None, Some(radius)) => Scope::RadiusOnly(radius),
            (None, None) => Scope::Everywhere,
        }
    }

    fn admits(&self, facility: &FacilityRecord) -> bool {
        match self {
            Scope::Everywhere => true,
            Scope::Around(center) => match &facility.geometry {
                Some(geometry) => {
                    if *geometry == Geometry::Unknown {
                        debug!("Object {} has malformed geometry", facility.label());
                    }
                    within_radius(center.point(), geometry, center.radius_km)
                }
                None => {
                    debug!("Object {} has no geometry", facility.label());
                    false
                }
            },
            Scope::RadiusOnly(_) => false,
        }
    }
}

/// Keeps the facilities whose sub-type is enabled and that fall inside `scope`,
/// in their original order.
pub fn filter<'a>(
    facilities: &'a [FacilityRecord],
    enabled_types: &BTreeSet<i64>,
    scope: &Scope,
) -> Vec<&'a FacilityRecord> {
    if let Scope::RadiusOnly(radius) = scope {
        warn!("A radius of {radius} km was requested without a postal code, nothing will match");
    }

    facilities
        .iter()
        .filter(|x| enabled_types.contains(&x.sub_type))
        .filter(|x| {
            let admitted = scope.admits(x);
            if admitted {
                debug!("Object {} in requested radius", x.label());
            } else {
                debug!("Object {} not in requested radius", x.label());
            }
            admitted
        })
        .collect()
}

/// Geodesic (WGS84) distance test. Polygons are measured from their area centroid.
pub fn within_radius(center: Point, geometry: &Geometry, radius_km: f64) -> bool {
    let target = match geometry {
        Geometry::Point(x) => *x,
        Geometry::Polygon(x) => match x.centroid() {
            Some(x) => x,
            None => return false,
        },
        Geometry::Unknown => return false,
    };

    center.geodesic_distance(&target) / 1000.0 <= radius_km
}
