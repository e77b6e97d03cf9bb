//! GeoJSON export of computed routes.
//!
//! The route becomes a FeatureCollection holding a single LineString whose
//! coordinates follow GeoJSON's `[lon, lat]` order. A closed tour simply
//! carries the repeated first index.

use std::fs::File;
use std::path::Path;

use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::instance::TourInstance;

/// Build the GeoJSON value for a route through `instance`.
pub fn route_geojson(instance: &TourInstance, path: &[usize]) -> Result<Value> {
    let mut coordinates = Vec::with_capacity(path.len());
    for &index in path {
        let place = instance.places.get(index).ok_or(Error::IndexOutOfRange {
            index,
            dim: instance.len(),
        })?;
        coordinates.push(json!([place.lon, place.lat]));
    }

    Ok(json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": coordinates,
            },
            "properties": {},
        }]
    }))
}

/// Write the route as pretty-printed GeoJSON.
pub fn write_geojson<P: AsRef<Path>>(instance: &TourInstance, path: &[usize], out: P) -> Result<()> {
    let geojson = route_geojson(instance, path)?;
    let file = File::create(out)?;
    serde_json::to_writer_pretty(file, &geojson)?;
    Ok(())
}
