//! # Simulated boat
//!
//! A kinematic model of the boat standing in for the real sensors, remote
//! control receiver and helm. The boat turns towards the helm's heading at a
//! bounded rate and moves forward at a speed set by the power demand. The
//! supply voltage drops as the motors draw more power, which closes the loop
//! around the captain's power controller.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::trace;
use serde::Deserialize;

use crate::eqpt::{Helm, RemoteControl, Sensors};
use crate::geo::Location;
use util::maths::{clamp, get_ang_dist_2pi, lin_map, rem_euclid};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Parameters of the simulated boat.
#[derive(Debug, Clone, Deserialize)]
pub struct SimParams {
    /// Starting position
    pub start_lat_deg: f64,
    pub start_lon_deg: f64,

    /// Starting yaw
    ///
    /// Units: degrees
    pub start_yaw_deg: f64,

    /// Maximum rate of turn, reached at full rudder.
    ///
    /// Units: radians/second
    pub max_turn_rate_rads: f64,

    /// Speed with a zero power demand.
    ///
    /// Units: meters/second
    pub cruise_speed_ms: f64,

    /// Speed added per unit of power demand.
    ///
    /// Units: meters/second
    pub speed_per_power_ms: f64,

    /// Maximum speed.
    ///
    /// Units: meters/second
    pub max_speed_ms: f64,

    /// Motor power drawn at maximum speed.
    ///
    /// Units: watts
    pub max_motor_power_w: f64,

    /// Supply voltage with the motors stopped.
    ///
    /// Units: volts
    pub unloaded_voltage_v: f64,

    /// Supply voltage with the motors at maximum power.
    ///
    /// Units: volts
    pub loaded_voltage_v: f64,
}

/// The simulated boat.
#[derive(Debug, Clone)]
pub struct SimBoat {
    params: SimParams,

    location: Location,
    yaw_rad: f64,
    speed_ms: f64,

    /// Rate of turn demanded by the last helm execution
    turn_rate_rads: f64,

    heading_dem_deg: f64,
    power_dem: f64,

    /// Position of the remote's mode switch
    pub remote_manual: bool,
    pub remote_steering: f64,
    pub remote_power: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for SimParams {
    fn default() -> Self {
        Self {
            start_lat_deg: 33.962710,
            start_lon_deg: -118.454540,
            start_yaw_deg: 0.0,
            max_turn_rate_rads: 0.3,
            cruise_speed_ms: 1.5,
            speed_per_power_ms: 0.02,
            max_speed_ms: 3.0,
            max_motor_power_w: 400.0,
            unloaded_voltage_v: 13.8,
            loaded_voltage_v: 12.2,
        }
    }
}

impl SimBoat {
    /// Create a new boat at its start position, stationary.
    pub fn new(params: SimParams) -> Self {
        Self {
            location: Location::new(params.start_lat_deg, params.start_lon_deg),
            yaw_rad: params.start_yaw_deg.to_radians(),
            speed_ms: 0.0,
            turn_rate_rads: 0.0,
            heading_dem_deg: params.start_yaw_deg,
            power_dem: 0.0,
            remote_manual: false,
            remote_steering: 0.0,
            remote_power: 0.0,
            params,
        }
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        if dt <= 0.0 || !dt.is_finite() {
            return;
        }

        let tau = std::f64::consts::TAU;

        self.yaw_rad = rem_euclid(self.yaw_rad + self.turn_rate_rads * dt, tau);
        self.location = self.location.offset(self.yaw_rad, self.speed_ms * dt);

        trace!(
            "SimBoat: {} yaw {:.1} deg speed {:.2} m/s",
            self.location,
            self.yaw_rad.to_degrees(),
            self.speed_ms
        );
    }

    /// The heading last set on the helm.
    ///
    /// Units: degrees
    pub fn heading_demand_deg(&self) -> f64 {
        self.heading_dem_deg
    }

    /// The power last set on the helm.
    pub fn power_demand(&self) -> f64 {
        self.power_dem
    }

    /// Current speed.
    ///
    /// Units: meters/second
    pub fn speed_ms(&self) -> f64 {
        self.speed_ms
    }
}

impl Sensors for SimBoat {
    fn location(&self) -> Option<Location> {
        Some(self.location)
    }

    fn yaw_rad(&self) -> f64 {
        self.yaw_rad
    }

    fn voltage_v(&self) -> f64 {
        lin_map(
            (0.0, self.params.max_motor_power_w),
            (self.params.unloaded_voltage_v, self.params.loaded_voltage_v),
            self.total_power_w(),
        )
    }

    fn total_power_w(&self) -> f64 {
        lin_map(
            (0.0, self.params.max_speed_ms),
            (0.0, self.params.max_motor_power_w),
            self.speed_ms,
        )
    }
}

impl RemoteControl for SimBoat {
    fn is_manual(&self) -> bool {
        self.remote_manual
    }

    fn steering(&self) -> f64 {
        self.remote_steering
    }

    fn power(&self) -> f64 {
        self.remote_power
    }
}

impl Helm for SimBoat {
    fn set_heading(&mut self, heading_deg: f64) {
        self.heading_dem_deg = heading_deg;
    }

    fn set_power(&mut self, power: f64) {
        self.power_dem = power;
    }

    fn execute_autonomous(&mut self, yaw_deg: f64, _total_power_w: f64) {
        // Rudder proportional to heading error, saturating at full rudder
        // for errors of 30 degrees or more
        let tau = std::f64::consts::TAU;
        let err_rad = get_ang_dist_2pi(
            rem_euclid(yaw_deg.to_radians(), tau),
            rem_euclid(self.heading_dem_deg.to_radians(), tau),
        );
        let rudder = clamp(err_rad / 30f64.to_radians(), -1.0, 1.0);
        self.turn_rate_rads = rudder * self.params.max_turn_rate_rads;

        self.speed_ms = clamp(
            self.params.cruise_speed_ms + self.params.speed_per_power_ms * self.power_dem,
            0.0,
            self.params.max_speed_ms,
        );
    }

    fn execute_manual(&mut self, steering: f64, power: f64) {
        self.turn_rate_rads = clamp(steering, -1.0, 1.0) * self.params.max_turn_rate_rads;
        self.speed_ms = clamp(power, 0.0, 1.0) * self.params.max_speed_ms;
    }
}
