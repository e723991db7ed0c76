//! Captain parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the captain
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Params {
    // ---- COURSE ----
    /// Radians of course correction per radian of angle between the bearing
    /// to the waypoint and the leg bearing.
    pub tracking_correction_gain: f64,

    /// Saturation limit of the course correction.
    ///
    /// Units: radians
    pub max_tracking_correction_rad: f64,

    /// Legs shorter than this have no meaningful bearing, and no course
    /// correction is applied on them.
    ///
    /// Units: meters
    pub min_leg_length_m: f64,

    // ---- POWER ----
    /// Supply voltage the power controller holds.
    ///
    /// Units: volts
    pub voltage_setpoint_v: f64,

    /// Power controller proportional gain
    pub power_k_p: f64,

    /// Power controller integral gain
    pub power_k_i: f64,

    /// Limit on the magnitude of the power controller's integral.
    ///
    /// Units: volt seconds
    pub power_i_max: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            tracking_correction_gain: 4.0,
            max_tracking_correction_rad: std::f64::consts::PI / 9.0,
            min_leg_length_m: 0.01,
            voltage_setpoint_v: 13.2,
            power_k_p: 50.0,
            power_k_i: 10.0,
            power_i_max: 10.0,
        }
    }
}
