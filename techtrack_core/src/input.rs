//! Loader for the upstream technician location document.
//!
//! The input is a JSON array of per-minute feature collections. Each entry
//! carries exactly three features, one per technician, with GeoJSON
//! `[longitude, latitude]` coordinates; the timestamp rides on the first
//! feature's `properties.tsecs`.
//!
//! Structural defects are fatal: any entry that does not match the expected
//! shape aborts the whole load with a `MalformedRecord` naming the timestep
//! index. There is no skip-and-continue policy.

use crate::error::ReportError;
use crate::geometry::Position;
use crate::model::{TechId, TimestepRecord};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Technician owning each feature slot, in document order.
///
/// The upstream generator emits technician 3 first, then 1, then 2. That
/// ordering is an artifact of how the feed is produced, not a design
/// choice, but it is part of the wire contract and is preserved exactly.
const FEATURE_ORDER: [TechId; 3] = [TechId(3), TechId(1), TechId(2)];

/// One raw timestep entry as it appears in the document.
#[derive(Debug, Deserialize)]
struct RawTimestep {
    #[serde(default)]
    features: Vec<RawFeature>,
}

/// One raw feature: a technician's location plus optional properties.
#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    geometry: Option<RawGeometry>,
    #[serde(default)]
    properties: RawProperties,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(default)]
    coordinates: Option<Vec<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawProperties {
    #[serde(default)]
    tsecs: Option<f64>,
}

impl RawTimestep {
    /// Validates this entry and converts it into a well-formed record.
    fn into_record(self, index: usize) -> Result<TimestepRecord, ReportError> {
        if self.features.len() != FEATURE_ORDER.len() {
            return Err(ReportError::malformed(
                index,
                format!(
                    "expected {} features, found {}",
                    FEATURE_ORDER.len(),
                    self.features.len()
                ),
            ));
        }

        let tsecs = self.features[0].properties.tsecs.ok_or_else(|| {
            ReportError::malformed(index, "first feature is missing properties.tsecs")
        })?;

        let mut positions = BTreeMap::new();
        for (feature, tech) in self.features.iter().zip(FEATURE_ORDER) {
            let coords = feature
                .geometry
                .as_ref()
                .and_then(|g| g.coordinates.as_deref())
                .ok_or_else(|| {
                    ReportError::malformed(
                        index,
                        format!("technician {tech} feature is missing geometry.coordinates"),
                    )
                })?;
            if coords.len() < 2 {
                return Err(ReportError::malformed(
                    index,
                    format!(
                        "technician {tech} coordinates have {} values, expected [lon, lat]",
                        coords.len()
                    ),
                ));
            }
            // GeoJSON order is [longitude, latitude]; Position wants the reverse.
            positions.insert(tech, Position::new(coords[1], coords[0]));
        }

        Ok(TimestepRecord::new(tsecs, positions))
    }
}

/// Loads and validates the full ordered sequence of timestep records.
pub fn load_timesteps(path: impl AsRef<Path>) -> Result<Vec<TimestepRecord>, ReportError> {
    let path = path.as_ref();

    let text = fs::read_to_string(path).map_err(|source| ReportError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let doc: Vec<RawTimestep> =
        serde_json::from_str(&text).map_err(|source| ReportError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;

    doc.into_iter()
        .enumerate()
        .map(|(index, raw)| raw.into_record(index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(doc: &str) -> Vec<RawTimestep> {
        serde_json::from_str(doc).expect("test document is valid JSON")
    }

    const VALID_ENTRY: &str = r#"[{
        "features": [
            {"geometry": {"coordinates": [-122.40, 37.70]}, "properties": {"tsecs": 60}},
            {"geometry": {"coordinates": [-122.41, 37.71]}},
            {"geometry": {"coordinates": [-122.42, 37.72]}}
        ]
    }]"#;

    #[test]
    fn test_valid_entry_parses_with_coordinate_swap() {
        let raw = parse(VALID_ENTRY).pop().unwrap();
        let record = raw.into_record(0).unwrap();

        assert_eq!(record.tsecs, 60.0);
        assert_eq!(record.positions.len(), 3);
        // Latitude comes from the second coordinate value.
        assert_eq!(
            record.positions[&TechId(3)],
            Position::new(37.70, -122.40)
        );
    }

    #[test]
    fn test_feature_order_maps_to_tech_three_one_two() {
        let raw = parse(VALID_ENTRY).pop().unwrap();
        let record = raw.into_record(0).unwrap();

        // Document slot 0 is technician 3, slot 1 is technician 1,
        // slot 2 is technician 2.
        assert_eq!(record.positions[&TechId(3)].longitude, -122.40);
        assert_eq!(record.positions[&TechId(1)].longitude, -122.41);
        assert_eq!(record.positions[&TechId(2)].longitude, -122.42);
    }

    #[test]
    fn test_two_features_is_malformed() {
        let doc = r#"[{
            "features": [
                {"geometry": {"coordinates": [0.0, 0.0]}, "properties": {"tsecs": 0}},
                {"geometry": {"coordinates": [0.0, 0.1]}}
            ]
        }]"#;
        let err = parse(doc).pop().unwrap().into_record(4).unwrap_err();
        match err {
            ReportError::MalformedRecord { index, reason } => {
                assert_eq!(index, 4);
                assert!(reason.contains("expected 3 features"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_tsecs_is_malformed() {
        let doc = r#"[{
            "features": [
                {"geometry": {"coordinates": [0.0, 0.0]}},
                {"geometry": {"coordinates": [0.0, 0.1]}},
                {"geometry": {"coordinates": [0.1, 0.0]}}
            ]
        }]"#;
        let err = parse(doc).pop().unwrap().into_record(0).unwrap_err();
        assert!(matches!(err, ReportError::MalformedRecord { .. }));
        assert!(err.to_string().contains("tsecs"));
    }

    #[test]
    fn test_missing_coordinates_is_malformed() {
        let doc = r#"[{
            "features": [
                {"geometry": {"coordinates": [0.0, 0.0]}, "properties": {"tsecs": 0}},
                {"geometry": {}},
                {"geometry": {"coordinates": [0.1, 0.0]}}
            ]
        }]"#;
        let err = parse(doc).pop().unwrap().into_record(0).unwrap_err();
        assert!(err.to_string().contains("technician 1"));
    }

    #[test]
    fn test_short_coordinate_array_is_malformed() {
        let doc = r#"[{
            "features": [
                {"geometry": {"coordinates": [0.0]}, "properties": {"tsecs": 0}},
                {"geometry": {"coordinates": [0.0, 0.1]}},
                {"geometry": {"coordinates": [0.1, 0.0]}}
            ]
        }]"#;
        let err = parse(doc).pop().unwrap().into_record(0).unwrap_err();
        assert!(err.to_string().contains("expected [lon, lat]"));
    }

    #[test]
    fn test_missing_file_is_input_not_found() {
        let err = load_timesteps("/nonexistent/techtrack-input.json").unwrap_err();
        assert!(matches!(err, ReportError::InputNotFound { .. }));
    }

    #[test]
    fn test_integer_and_float_tsecs_both_accepted() {
        let doc = r#"[{
            "features": [
                {"geometry": {"coordinates": [0.0, 0.0]}, "properties": {"tsecs": 90.5}},
                {"geometry": {"coordinates": [0.0, 0.1]}},
                {"geometry": {"coordinates": [0.1, 0.0]}}
            ]
        }]"#;
        let record = parse(doc).pop().unwrap().into_record(0).unwrap();
        assert_eq!(record.tsecs, 90.5);
    }
}
