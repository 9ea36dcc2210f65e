use geo::{Coord, LineString, Point, Polygon};
use serde::Deserialize;
use serde_json::Value;

/// Index of the latitude component in a `Point` position (GeoJSON `[lon, lat]`).
pub const POINT_LAT_INDEX: usize = 1;

/// Index of the latitude component in an outer-ring position, as the proximity test
/// ends up using it. Ring positions are labelled `(lat, lon)` upstream, but the ring
/// is laid out in the plane in the given order and its centroid is read back as
/// `(lat = y, lon = x)`, so the second component is still the latitude.
pub const RING_LAT_INDEX: usize = 1;

/// A single airport or airspace from an openAIP export.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityRecord {
    #[serde(rename = "_id", default)]
    pub id: Value,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub sub_type: i64,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub icao_code: Option<String>,
    #[serde(default)]
    pub alt_identifier: Option<String>,
    #[serde(default)]
    pub frequencies: Vec<RawFrequency>,
}

impl FacilityRecord {
    /// Identifier for log lines, without JSON quoting.
    pub fn label(&self) -> String {
        let id = match &self.id {
            Value::String(x) => x.clone(),
            x => x.to_string(),
        };
        format!("{id} ('{}')", self.name.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFrequency {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Value,
}

/// Anything that isn't a well-formed `Point` or `Polygon` object, including a bare
/// string or number, becomes `Unknown` rather than a parse error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Geometry {
    Point(Point),
    /// Outer ring only, see [`RING_LAT_INDEX`] for its axis order.
    Polygon(Polygon),
    Unknown,
}

impl From<Value> for Geometry {
    fn from(raw: Value) -> Self {
        refine(&raw).unwrap_or(Geometry::Unknown)
    }
}

fn refine(raw: &Value) -> Option<Geometry> {
    let coordinates = raw.get("coordinates")?;
    match raw.get("type")?.as_str()? {
        "Point" => Some(Geometry::Point(coord(coordinates, POINT_LAT_INDEX)?.into())),
        "Polygon" => {
            let ring: Vec<Coord> = coordinates
                .as_array()?
                .first()?
                .as_array()?
                .iter()
                .map(|x| coord(x, RING_LAT_INDEX))
                .collect::<Option<_>>()?;
            if ring.is_empty() {
                return None;
            }
            Some(Geometry::Polygon(Polygon::new(LineString::new(ring), vec![])))
        }
        _ => None,
    }
}

/// Reads a `[a, b, ..]` position as `x = lon, y = lat`.
fn coord(position: &Value, lat_index: usize) -> Option<Coord> {
    let position = position.as_array()?;
    if position.len() < 2 {
        return None;
    }
    Some(Coord {
        x: position[1 - lat_index].as_f64()?,
        y: position[lat_index].as_f64()?,
    })
}
