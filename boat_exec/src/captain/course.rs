//! Course correction towards the leg line

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

use super::Params;
use crate::geo::{self, Location};
use util::maths::clamp;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Result of the course calculation for one cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Course {
    /// Bearing from the current position to the waypoint.
    ///
    /// Units: radians
    pub bearing_to_waypoint_rad: f64,

    /// Angle between the bearing to the waypoint and the leg bearing, zero if
    /// there is no leg.
    ///
    /// Units: radians
    pub angle_error_rad: f64,

    /// Saturated correction added to the bearing to the waypoint.
    ///
    /// Units: radians
    pub tracking_correction_rad: f64,

    /// The course to steer.
    ///
    /// Units: radians
    pub desired_course_rad: f64,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Calculate the course to steer from `current` to `waypoint`.
///
/// `previous` is the start of the leg. If there is no previous location, or
/// the leg is shorter than `params.min_leg_length_m`, there is no leg to track
/// and the course is the bearing to the waypoint.
pub fn calc_course(
    previous: Option<&Location>,
    current: &Location,
    waypoint: &Location,
    params: &Params,
) -> Course {
    let bearing_to_waypoint_rad = geo::bearing(current, waypoint);

    let leg_bearing_rad = match previous {
        Some(p) if geo::distance(p, waypoint) >= params.min_leg_length_m => {
            Some(geo::bearing(p, waypoint))
        }
        _ => None,
    };

    let (angle_error_rad, tracking_correction_rad) = match leg_bearing_rad {
        Some(leg) => {
            let err = geo::angle_difference(bearing_to_waypoint_rad, leg);
            let corr = clamp(
                params.tracking_correction_gain * err,
                -params.max_tracking_correction_rad,
                params.max_tracking_correction_rad,
            );
            (err, corr)
        }
        None => (0f64, 0f64),
    };

    Course {
        bearing_to_waypoint_rad,
        angle_error_rad,
        tracking_correction_rad,
        desired_course_rad: bearing_to_waypoint_rad + tracking_correction_rad,
    }
}
