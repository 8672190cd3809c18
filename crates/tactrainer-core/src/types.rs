//! Fundamental geographic and simulation types.

use serde::{Deserialize, Serialize};

use crate::geo;

/// A point on the map (decimal degrees, north and east positive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

/// Bearing and range of a point relative to a reference (bullseye, ownship).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RelativePosition {
    /// Degrees true, 0..360.
    pub bearing: f64,
    /// Nautical miles.
    pub range: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance in nautical miles.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        geo::haversine_distance_nm(self.lat, self.lon, other.lat, other.lon)
    }

    /// Initial great-circle bearing in degrees (0 = North, clockwise).
    pub fn bearing_to(&self, other: &GeoPoint) -> f64 {
        geo::initial_bearing(self.lat, self.lon, other.lat, other.lon)
    }

    /// Bearing and range from `self` to `other`.
    pub fn relative(&self, other: &GeoPoint) -> RelativePosition {
        RelativePosition {
            bearing: self.bearing_to(other),
            range: self.distance_to(other),
        }
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180].
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }

    /// Age in seconds of something stamped at `tick`.
    pub fn age_secs(&self, tick: u64) -> f64 {
        self.tick.saturating_sub(tick) as f64 * self.dt()
    }
}
