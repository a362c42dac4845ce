//! GeoJSON output: one Point feature per record, coordinates as `[lon, lat]`.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::JitteredPoint;

#[derive(Serialize)]
struct FeatureCollection<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    features: Vec<Feature<'a>>,
}

#[derive(Serialize)]
struct Feature<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    geometry: Geometry,
    properties: Properties<'a>,
}

#[derive(Serialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: [f64; 2],
}

#[derive(Serialize)]
struct Properties<'a> {
    name: &'a str,
    postcode: &'a str,
}

impl<'a> From<&'a JitteredPoint> for Feature<'a> {
    fn from(p: &'a JitteredPoint) -> Self {
        Feature {
            kind: "Feature",
            geometry: Geometry { kind: "Point", coordinates: [p.lon, p.lat] },
            properties: Properties { name: &p.name, postcode: &p.postcode },
        }
    }
}

/// Write all points as a GeoJSON FeatureCollection.
pub fn write_geojson<W: Write>(points: &[JitteredPoint], writer: W) -> Result<()> {
    let collection = FeatureCollection {
        kind: "FeatureCollection",
        features: points.iter().map(Feature::from).collect(),
    };
    serde_json::to_writer(writer, &collection)
        .context("[io::geojson] Failed to write FeatureCollection")
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    #[test]
    fn feature_collection_shape() {
        let points = [JitteredPoint {
            name: "A".into(), postcode: "X".into(), lat: 51.5, lon: -0.1, attempts: 0, radius: None,
        }];
        let mut out = Vec::new();
        write_geojson(&points, &mut out).unwrap();

        let json: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["type"], "FeatureCollection");
        let feature = &json["features"][0];
        assert_eq!(feature["type"], "Feature");
        assert_eq!(feature["geometry"]["type"], "Point");
        assert_eq!(feature["geometry"]["coordinates"][0], -0.1);
        assert_eq!(feature["geometry"]["coordinates"][1], 51.5);
        assert_eq!(feature["properties"]["name"], "A");
        assert_eq!(feature["properties"]["postcode"], "X");
    }

    #[test]
    fn empty_collection() {
        let mut out = Vec::new();
        write_geojson(&[], &mut out).unwrap();
        let json: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["features"].as_array().map(Vec::len), Some(0));
    }
}
