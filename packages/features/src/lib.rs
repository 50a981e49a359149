#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! GeoJSON feature assembly from upstream records.
//!
//! One upstream record becomes one [`Feature`]: its polygon field is
//! parsed into a geometry (records without a usable geometry are dropped
//! entirely), and the remaining fields are flattened through the
//! normalization layer into a fixed-width property map the map frontend
//! can consume directly.

pub mod builder;
pub mod geometry;

pub use builder::{AttachmentKind, attachment_at, build_collection, build_feature};
pub use geometry::parse_geometry;

use serde::Serialize;
use serde_json::Value;

/// One GeoJSON feature.
#[derive(Debug, Clone, Serialize)]
pub struct Feature {
    /// Always `"Feature"`.
    #[serde(rename = "type")]
    pub feature_type: &'static str,
    /// Geometry object, passed through from the upstream value unchanged.
    pub geometry: Value,
    /// Flat map of primitive property values.
    pub properties: Value,
}

impl Feature {
    /// Creates a feature with the standard type tag.
    #[must_use]
    pub const fn new(geometry: Value, properties: Value) -> Self {
        Self {
            feature_type: "Feature",
            geometry,
            properties,
        }
    }
}

/// A GeoJSON feature collection.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureCollection {
    /// Always `"FeatureCollection"`.
    #[serde(rename = "type")]
    pub collection_type: &'static str,
    /// The member features.
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Creates a collection with the standard type tag.
    #[must_use]
    pub const fn new(features: Vec<Feature>) -> Self {
        Self {
            collection_type: "FeatureCollection",
            features,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_type_tags() {
        let collection = FeatureCollection::new(vec![Feature::new(
            json!({ "type": "Polygon", "coordinates": [] }),
            json!({ "id": "rec1" }),
        )]);

        let out = serde_json::to_value(&collection).unwrap();
        assert_eq!(out["type"], "FeatureCollection");
        assert_eq!(out["features"][0]["type"], "Feature");
        assert_eq!(out["features"][0]["geometry"]["type"], "Polygon");
    }
}
