//! # Geographic calculations
//!
//! Great-circle distance and bearing between geographic coordinates, and the
//! signed difference between two bearings. All angles returned are in
//! radians, bearings are measured clockwise from true north.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::fmt;

use util::maths::wrap_pi;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Mean radius of the Earth.
///
/// Units: meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A geographic position.
///
/// A `Location` is always a real position, places where a position may be
/// unknown or unset use `Option<Location>`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude, positive north.
    ///
    /// Units: degrees
    pub lat_deg: f64,

    /// Longitude, positive east.
    ///
    /// Units: degrees
    pub lon_deg: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Location {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }

    /// Convert a position from a source which uses `(0, 0)` to mean "unset".
    ///
    /// Exactly `(0.0, 0.0)` maps to `None`, anything else is a real location.
    pub fn from_sentinel(lat_deg: f64, lon_deg: f64) -> Option<Self> {
        if lat_deg == 0.0 && lon_deg == 0.0 {
            None
        } else {
            Some(Self::new(lat_deg, lon_deg))
        }
    }

    /// Move this location by the given distance along the given bearing.
    pub fn offset(&self, bearing_rad: f64, distance_m: f64) -> Self {
        let lat_1 = self.lat_deg.to_radians();
        let lon_1 = self.lon_deg.to_radians();
        let ang_dist = distance_m / EARTH_RADIUS_M;

        let lat_2 = (lat_1.sin() * ang_dist.cos()
            + lat_1.cos() * ang_dist.sin() * bearing_rad.cos())
        .asin();
        let lon_2 = lon_1
            + (bearing_rad.sin() * ang_dist.sin() * lat_1.cos())
                .atan2(ang_dist.cos() - lat_1.sin() * lat_2.sin());

        Self::new(lat_2.to_degrees(), wrap_pi(lon_2).to_degrees())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}°, {:.6}°)", self.lat_deg, self.lon_deg)
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Great-circle distance between two locations using the haversine formula.
///
/// Units: meters
pub fn distance(a: &Location, b: &Location) -> f64 {
    let lat_a = a.lat_deg.to_radians();
    let lat_b = b.lat_deg.to_radians();
    let d_lat = (b.lat_deg - a.lat_deg).to_radians();
    let d_lon = (b.lon_deg - a.lon_deg).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Initial bearing of the great circle from `a` towards `b`.
///
/// Units: radians in (-pi, pi], 0 is north, positive clockwise.
pub fn bearing(a: &Location, b: &Location) -> f64 {
    let lat_a = a.lat_deg.to_radians();
    let lat_b = b.lat_deg.to_radians();
    let d_lon = (b.lon_deg - a.lon_deg).to_radians();

    let y = d_lon.sin() * lat_b.cos();
    let x = lat_a.cos() * lat_b.sin() - lat_a.sin() * lat_b.cos() * d_lon.cos();

    wrap_pi(y.atan2(x))
}

/// The signed minimal angle from heading `h_2` to heading `h_1`.
///
/// Positive when `h_1` is clockwise of `h_2`.
///
/// Units: radians in (-pi, pi]
pub fn angle_difference(h_1: f64, h_2: f64) -> f64 {
    wrap_pi(h_1 - h_2)
}
