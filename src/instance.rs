//! Loading and representing a set of places to visit.
//!
//! Places come from headerless CSV rows (`name,lat,lon`). The pairwise
//! geodesic distance matrix is computed once at load time and shared with
//! every heuristic.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::matrix::DistanceMatrix;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A named geographic point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Place {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Place {
            name: name.into(),
            lat,
            lon,
        }
    }
}

/// Great-circle distance between two coordinates in kilometers.
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// A set of places together with their precomputed distance matrix.
#[derive(Debug, Clone)]
pub struct TourInstance {
    pub places: Vec<Place>,
    matrix: DistanceMatrix,
}

impl TourInstance {
    /// Build an instance from places, computing all pairwise geodesic
    /// distances.
    pub fn from_places(places: Vec<Place>) -> Result<Self> {
        for place in &places {
            if !place.lat.is_finite() || !place.lon.is_finite() {
                return Err(Error::InvalidPlace(format!(
                    "{}: coordinates ({}, {}) are not finite",
                    place.name, place.lat, place.lon
                )));
            }
        }
        let matrix = DistanceMatrix::from_values(Self::compute_distances(&places))?;
        Ok(TourInstance { places, matrix })
    }

    /// Parse a headerless `name,lat,lon` CSV file.
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let instance = Self::from_csv_reader(file)?;
        info!("loaded {} places", instance.len());
        Ok(instance)
    }

    /// Parse headerless `name,lat,lon` CSV records from any reader.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut places = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            if record.len() < 3 {
                return Err(Error::InvalidPlace(format!(
                    "row {} has {} fields, expected name,lat,lon",
                    places.len() + 1,
                    record.len()
                )));
            }
            let name = record[0].to_string();
            let lat: f64 = record[1]
                .parse()
                .map_err(|_| Error::InvalidPlace(format!("{name}: bad latitude {:?}", &record[1])))?;
            let lon: f64 = record[2]
                .parse()
                .map_err(|_| Error::InvalidPlace(format!("{name}: bad longitude {:?}", &record[2])))?;
            places.push(Place::new(name, lat, lon));
        }
        Self::from_places(places)
    }

    fn compute_distances(places: &[Place]) -> Vec<Vec<f64>> {
        let n = places.len();
        let mut matrix = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in i + 1..n {
                let d = haversine(places[i].lat, places[i].lon, places[j].lat, places[j].lon);
                matrix[i][j] = d;
                matrix[j][i] = d;
            }
        }
        matrix
    }

    /// Number of places.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// The precomputed distance matrix.
    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    /// Distance in kilometers between two place indices.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.matrix.distance(i, j)
    }

    /// Resolve a place by its exact name.
    pub fn find_place(&self, name: &str) -> Result<usize> {
        self.places
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| Error::UnknownPlace(name.to_string()))
    }

    /// Summary figures about the instance.
    pub fn statistics(&self) -> InstanceStatistics {
        let n = self.len();
        let mut distances = Vec::new();
        for i in 0..n {
            for j in i + 1..n {
                distances.push(self.distance(i, j));
            }
        }
        let avg_distance = if distances.is_empty() {
            0.0
        } else {
            distances.iter().sum::<f64>() / distances.len() as f64
        };
        let max_distance = distances.iter().cloned().fold(0.0, f64::max);

        InstanceStatistics {
            num_places: n,
            avg_distance,
            max_distance,
        }
    }
}

/// Statistics about a tour instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceStatistics {
    pub num_places: usize,
    pub avg_distance: f64,
    pub max_distance: f64,
}

impl std::fmt::Display for InstanceStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Places: {}", self.num_places)?;
        writeln!(f, "  Avg pairwise distance: {:.2} km", self.avg_distance)?;
        writeln!(f, "  Max pairwise distance: {:.2} km", self.max_distance)
    }
}
