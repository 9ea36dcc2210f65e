use std::collections::BTreeSet;

use itertools::Itertools;
use log::debug;
use serde::Serialize;
use serde_json::Value;

use crate::{
    facility::FacilityRecord,
    filter::{filter, Scope},
    kind::FacilityKind,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedFrequency {
    pub frequency: Value,
    pub name: String,
    pub comment: String,
}

impl NormalizedFrequency {
    /// The frequency as plain text, without JSON quoting for strings.
    pub fn frequency_text(&self) -> String {
        match &self.frequency {
            Value::String(x) => x.clone(),
            Value::Null => String::new(),
            x => x.to_string(),
        }
    }
}

/// `"{ident} {frequency name}"` with whitespace collapsed. The ident is the ICAO code,
/// falling back to the alternate identifier.
pub fn display_name(facility: &FacilityRecord, frequency_name: Option<&str>) -> String {
    let ident = [&facility.icao_code, &facility.alt_identifier]
        .into_iter()
        .flatten()
        .find(|x| !x.is_empty())
        .map(|x| x.as_str())
        .unwrap_or_default();

    format!("{ident} {}", frequency_name.unwrap_or_default())
        .split_whitespace()
        .join(" ")
}

pub fn extract(facility: &FacilityRecord, category: &str) -> Vec<NormalizedFrequency> {
    facility
        .frequencies
        .iter()
        .map(|x| {
            debug!(
                "icaoCode: {:?}, altIdentifier: {:?}, item name: {:?}, frequency name: {:?}, frequency: {}",
                facility.icao_code, facility.alt_identifier, facility.name, x.name, x.value
            );
            NormalizedFrequency {
                frequency: x.value.clone(),
                name: display_name(facility, x.name.as_deref()),
                comment: category.to_uppercase(),
            }
        })
        .collect()
}

/// Concatenates, drops exact duplicates (first one wins) and stable-sorts by name.
pub fn aggregate(
    lists: impl IntoIterator<Item = Vec<NormalizedFrequency>>,
) -> Vec<NormalizedFrequency> {
    // Value has no Hash, its JSON text stands in for it.
    lists
        .into_iter()
        .flatten()
        .unique_by(|x| (x.frequency.to_string(), x.name.clone(), x.comment.clone()))
        .sorted_by(|a, b| a.name.cmp(&b.name))
        .collect()
}

/// The whole pipeline for one country and facility kind.
pub fn gather(
    facilities: &[FacilityRecord],
    kind: FacilityKind,
    scope: &Scope,
) -> Vec<NormalizedFrequency> {
    let enabled: BTreeSet<i64> = kind.enabled_types();
    aggregate(
        filter(facilities, &enabled, scope)
            .into_iter()
            .map(|x| extract(x, kind.name())),
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn facility(value: Value) -> FacilityRecord {
        serde_json::from_value(value).unwrap()
    }

    fn entry(frequency: &str, name: &str, comment: &str) -> NormalizedFrequency {
        NormalizedFrequency {
            frequency: json!(frequency),
            name: name.to_string(),
            comment: comment.to_string(),
        }
    }

    #[test]
    fn name_from_icao_code() {
        let x = facility(json!({"_id": 1, "type": 0, "icaoCode": "KSFO", "altIdentifier": "SFO"}));
        assert_eq!(display_name(&x, Some("TWR")), "KSFO TWR");
    }

    #[test]
    fn name_falls_back() {
        let x = facility(json!({"_id": 1, "type": 0, "altIdentifier": ""}));
        assert_eq!(display_name(&x, Some("TWR")), "TWR");

        let x = facility(json!({"_id": 1, "type": 0, "icaoCode": "", "altIdentifier": "LFXY"}));
        assert_eq!(display_name(&x, Some("INFO")), "LFXY INFO");

        let x = facility(json!({"_id": 1, "type": 0, "icaoCode": "EDDF"}));
        assert_eq!(display_name(&x, None), "EDDF");

        let x = facility(json!({"_id": 1, "type": 0}));
        assert_eq!(display_name(&x, None), "");
    }

    #[test]
    fn name_collapses_whitespace() {
        let x = facility(json!({"_id": 1, "type": 0, "icaoCode": " LSZH "}));
        assert_eq!(display_name(&x, Some("  ZURICH \t TOWER ")), "LSZH ZURICH TOWER");
    }

    #[test]
    fn extract_passes_value_through() {
        let x = facility(json!({
            "_id": 1,
            "type": 0,
            "icaoCode": "LSZH",
            "frequencies": [
                {"name": "TWR", "value": "118.100"},
                {"name": "GND", "value": 121.9}
            ]
        }));

        assert_eq!(
            extract(&x, "airports"),
            vec![
                entry("118.100", "LSZH TWR", "AIRPORTS"),
                NormalizedFrequency {
                    frequency: json!(121.9),
                    name: "LSZH GND".to_string(),
                    comment: "AIRPORTS".to_string(),
                },
            ]
        );
    }

    #[test]
    fn extract_empty() {
        let x = facility(json!({"_id": 1, "type": 0, "frequencies": []}));
        assert!(extract(&x, "airports").is_empty());
    }

    #[test]
    fn aggregate_dedups_first_occurrence() {
        let merged = aggregate(vec![
            vec![entry("118.1", "A TWR", "AIRPORTS"), entry("121.9", "A GND", "AIRPORTS")],
            vec![entry("118.1", "A TWR", "AIRPORTS"), entry("118.1", "A TWR", "AIRSPACES")],
        ]);

        assert_eq!(
            merged,
            vec![
                entry("121.9", "A GND", "AIRPORTS"),
                entry("118.1", "A TWR", "AIRPORTS"),
                entry("118.1", "A TWR", "AIRSPACES"),
            ]
        );
    }

    #[test]
    fn aggregate_keeps_string_and_number_apart() {
        let number = NormalizedFrequency {
            frequency: json!(118.1),
            name: "A TWR".to_string(),
            comment: "AIRPORTS".to_string(),
        };
        let merged = aggregate(vec![vec![entry("118.1", "A TWR", "AIRPORTS"), number.clone()]]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1], number);
    }

    #[test]
    fn aggregate_sort_is_stable() {
        let merged = aggregate(vec![
            vec![entry("124.7", "Z", "AIRSPACES"), entry("120.3", "SAME", "AIRSPACES")],
            vec![entry("119.2", "SAME", "AIRSPACES"), entry("130.0", "B", "AIRSPACES")],
        ]);

        let order: Vec<_> = merged.iter().map(|x| x.frequency_text()).collect();
        assert_eq!(order, vec!["130.0", "120.3", "119.2", "124.7"]);
    }

    #[test]
    fn aggregate_sorts_by_code_point() {
        let merged = aggregate(vec![vec![
            entry("1", "b", "X"),
            entry("2", "B", "X"),
            entry("3", "a", "X"),
        ]]);

        let names: Vec<_> = merged.iter().map(|x| x.name.as_str()).collect();
        assert_eq!(names, vec!["B", "a", "b"]);
    }

    #[test]
    fn end_to_end() {
        let facilities = vec![
            facility(json!({
                "_id": "a",
                "name": "ALPHA",
                "type": 0,
                "icaoCode": "ABCD",
                "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
                "frequencies": [{"name": "TWR", "value": "118.1"}]
            })),
            facility(json!({
                "_id": "b",
                "name": "DISABLED",
                "type": 99,
                "icaoCode": "WXYZ",
                "frequencies": [{"name": "TWR", "value": "119.1"}]
            })),
        ];

        let output = gather(&facilities, FacilityKind::Airports, &Scope::Everywhere);
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!([{"frequency": "118.1", "name": "ABCD TWR", "comment": "AIRPORTS"}])
        );
    }

    #[test]
    fn frequency_text() {
        assert_eq!(entry("118.1", "A", "B").frequency_text(), "118.1");
        let mut x = entry("", "A", "B");
        x.frequency = json!(121.5);
        assert_eq!(x.frequency_text(), "121.5");
        x.frequency = Value::Null;
        assert_eq!(x.frequency_text(), "");
    }

    #[test]
    fn malformed_geometry_does_not_drop_others() {
        let facilities: Vec<FacilityRecord> = serde_json::from_value(json!([
            {
                "_id": 1,
                "type": 0,
                "icaoCode": "ABCD",
                "geometry": "n/a",
                "frequencies": [{"name": "TWR", "value": "118.1"}]
            },
            {
                "_id": 2,
                "type": 0,
                "icaoCode": "EFGH",
                "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
                "frequencies": [{"name": "TWR", "value": "119.1"}]
            }
        ]))
        .unwrap();

        let everywhere = gather(&facilities, FacilityKind::Airports, &Scope::Everywhere);
        assert_eq!(
            everywhere,
            vec![
                entry("118.1", "ABCD TWR", "AIRPORTS"),
                entry("119.1", "EFGH TWR", "AIRPORTS"),
            ]
        );

        let around = Scope::Around(crate::filter::Center::new(0.0, 0.0, 10.0));
        assert_eq!(
            gather(&facilities, FacilityKind::Airports, &around),
            vec![entry("119.1", "EFGH TWR", "AIRPORTS")]
        );
    }
}
