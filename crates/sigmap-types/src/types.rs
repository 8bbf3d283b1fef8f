//! Core types for Wi-Fi survey data.

use core::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::ParseError;

/// Kind of measurement point.
///
/// Distinguishes a transmitter's known position from an arbitrary
/// observation point. The set is closed: unrecognized wire values are
/// rejected during deserialization rather than stored as free text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementKind {
    /// An arbitrary observation point on the floor plan.
    #[default]
    Location,
    /// The known position of an access point.
    Accesspoint,
}

impl MeasurementKind {
    /// Wire representation of this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementKind::Location => "location",
            MeasurementKind::Accesspoint => "accesspoint",
        }
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "location" => Ok(MeasurementKind::Location),
            "accesspoint" => Ok(MeasurementKind::Accesspoint),
            other => Err(ParseError::UnknownKind(other.to_string())),
        }
    }
}

/// One recorded signal-strength sample, tied to floor-plan coordinates.
///
/// Records are created once and never mutated; the only way one leaves a
/// store is delete-by-id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Opaque random identifier, assigned at creation.
    pub id: String,
    /// Creation instant (UTC).
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Signal estimate in dBm (more negative = weaker).
    pub dbm: i32,
    /// X coordinate in floor-plan pixel space.
    pub lat: f64,
    /// Y coordinate in floor-plan pixel space.
    pub lng: f64,
    /// Floor id the coordinates refer to. Not validated at insert time.
    pub floor: i64,
    /// Free-text label for the spot.
    pub location: String,
    /// Measurement kind.
    #[serde(rename = "type")]
    pub kind: MeasurementKind,
}

impl Measurement {
    /// Build a new record with a fresh id and the current UTC timestamp.
    pub fn new(
        dbm: i32,
        lat: f64,
        lng: f64,
        floor: i64,
        location: impl Into<String>,
        kind: MeasurementKind,
    ) -> Self {
        Self {
            id: generate_measurement_id(),
            timestamp: OffsetDateTime::now_utc(),
            dbm,
            lat,
            lng,
            floor,
            location: location.into(),
            kind,
        }
    }
}

/// A logical site level, the spatial frame for measurement coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    /// Positive id, assigned as 1 + max existing id. Never reused.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Public path of the uploaded plan image, empty until one is uploaded.
    #[serde(rename = "mapPath", default)]
    pub map_path: String,
}

impl Floor {
    /// Build a floor with no plan image yet.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            map_path: String::new(),
        }
    }
}

const ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const ID_LEN: usize = 8;

/// Generate a measurement id: 8 lowercase alphanumeric characters.
///
/// Ids are expected to be unique but uniqueness is not enforced; the space
/// is large enough for a single-site survey.
#[must_use]
pub fn generate_measurement_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LEN)
        .map(|_| ID_CHARSET[rng.random_range(0..ID_CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&MeasurementKind::Location).unwrap(),
            "\"location\""
        );
        assert_eq!(
            serde_json::to_string(&MeasurementKind::Accesspoint).unwrap(),
            "\"accesspoint\""
        );
    }

    #[test]
    fn test_kind_rejects_unknown_values() {
        let result: Result<MeasurementKind, _> = serde_json::from_str("\"router\"");
        assert!(result.is_err());

        assert_eq!(
            "router".parse::<MeasurementKind>(),
            Err(ParseError::UnknownKind("router".to_string()))
        );
    }

    #[test]
    fn test_kind_default_is_location() {
        assert_eq!(MeasurementKind::default(), MeasurementKind::Location);
    }

    #[test]
    fn test_kind_display_round_trip() {
        for kind in [MeasurementKind::Location, MeasurementKind::Accesspoint] {
            assert_eq!(kind.to_string().parse::<MeasurementKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_measurement_json_field_names() {
        let m = Measurement::new(-70, 12.5, 34.0, 2, "lobby", MeasurementKind::Accesspoint);
        let json: serde_json::Value = serde_json::to_value(&m).unwrap();

        assert_eq!(json["dbm"], -70);
        assert_eq!(json["floor"], 2);
        assert_eq!(json["type"], "accesspoint");
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
        // No leaked Rust field name on the wire.
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_measurement_serde_round_trip() {
        let m = Measurement::new(-55, 1.0, 2.0, 1, "desk", MeasurementKind::Location);
        let json = serde_json::to_string(&m).unwrap();
        let back: Measurement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_floor_map_path_wire_name() {
        let floor = Floor::new(1, "Ground");
        let json: serde_json::Value = serde_json::to_value(&floor).unwrap();
        assert_eq!(json["mapPath"], "");
        assert_eq!(json["name"], "Ground");

        // Legacy snapshots without a map path still load.
        let legacy: Floor = serde_json::from_str(r#"{"id":3,"name":"Attic"}"#).unwrap();
        assert_eq!(legacy.map_path, "");
    }

    #[test]
    fn test_generated_ids_are_lowercase_alphanumeric() {
        for _ in 0..100 {
            let id = generate_measurement_id();
            assert_eq!(id.len(), 8);
            assert!(
                id.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            );
        }
    }

    #[test]
    fn test_generated_ids_vary() {
        let a = generate_measurement_id();
        let b = generate_measurement_id();
        // Collisions are possible in principle but vanishingly unlikely.
        assert_ne!(a, b);
    }
}
