//! Shared types for the sigmap Wi-Fi survey service.
//!
//! This crate provides the data model used by every other sigmap crate:
//! measurement records, floor metadata, and the measurement kind enum.
//! Serialized field names are the wire contract consumed by the
//! visualization client, so they are pinned with serde attributes here
//! rather than left to each consumer.
//!
//! # Example
//!
//! ```
//! use sigmap_types::{Measurement, MeasurementKind};
//!
//! let m = Measurement::new(-67, 120.5, 88.0, 1, "hallway", MeasurementKind::Location);
//! assert_eq!(m.id.len(), 8);
//! ```

pub mod error;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use types::{Floor, Measurement, MeasurementKind, generate_measurement_id};
