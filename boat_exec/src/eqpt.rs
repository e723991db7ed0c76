//! # Equipment interfaces
//!
//! Contracts between the guidance core and the equipment around it: the
//! sensors and estimators, the manual remote control, and the helm which
//! drives the rudder and motor. Each provider is sampled once per cycle into
//! a plain snapshot struct, the core never holds on to a provider.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::trace;
use serde::Serialize;

use crate::geo::Location;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Position, attitude and power measurements.
pub trait Sensors {
    /// Current position, `None` if there is no fix.
    fn location(&self) -> Option<Location>;

    /// Current yaw, clockwise from north.
    ///
    /// Units: radians
    fn yaw_rad(&self) -> f64;

    /// Measured supply voltage.
    ///
    /// Units: volts
    fn voltage_v(&self) -> f64;

    /// Total power delivered to the propulsion motors.
    ///
    /// Units: watts
    fn total_power_w(&self) -> f64;
}

/// The manual remote control receiver.
pub trait RemoteControl {
    /// True if the pilot's mode switch selects manual control.
    fn is_manual(&self) -> bool;

    /// Manual steering demand.
    fn steering(&self) -> f64;

    /// Manual power demand.
    fn power(&self) -> f64;
}

/// The helm, turning heading and power demands into actuator outputs.
pub trait Helm {
    /// Set the heading to steer to.
    ///
    /// Units: degrees
    fn set_heading(&mut self, heading_deg: f64);

    /// Set the power demand.
    fn set_power(&mut self, power: f64);

    /// Steer to the set heading and power using the given feedback.
    fn execute_autonomous(&mut self, yaw_deg: f64, total_power_w: f64);

    /// Drive the actuators directly from the pilot's demands.
    fn execute_manual(&mut self, steering: f64, power: f64);
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Snapshot of the sensors for one cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct SensorData {
    pub location: Option<Location>,
    pub yaw_rad: f64,
    pub voltage_v: f64,
    pub total_power_w: f64,
}

/// Snapshot of the remote control for one cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct RemoteData {
    pub mode: ControlMode,
    pub steering: f64,
    pub power: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Who is in control of the boat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ControlMode {
    Autonomous,
    Manual,
}

/// The command to send to the helm at the end of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum HelmCmd {
    /// Steer to the desired heading at the desired power.
    Autonomous {
        heading_deg: f64,
        power: f64,
        yaw_deg: f64,
        total_power_w: f64,
    },

    /// Pass the pilot's demands through. The autonomous heading and power are
    /// still set on the helm so it can take over without a jump.
    Manual {
        heading_deg: f64,
        power: f64,
        steering: f64,
        manual_power: f64,
    },
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for ControlMode {
    fn default() -> Self {
        ControlMode::Autonomous
    }
}

impl SensorData {
    /// Sample all sensors.
    pub fn sample<S: Sensors + ?Sized>(sensors: &S) -> Self {
        Self {
            location: sensors.location(),
            yaw_rad: sensors.yaw_rad(),
            voltage_v: sensors.voltage_v(),
            total_power_w: sensors.total_power_w(),
        }
    }
}

impl RemoteData {
    /// Sample the remote control.
    pub fn sample<R: RemoteControl + ?Sized>(remote: &R) -> Self {
        Self {
            mode: match remote.is_manual() {
                true => ControlMode::Manual,
                false => ControlMode::Autonomous,
            },
            steering: remote.steering(),
            power: remote.power(),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Send a command to the helm.
pub fn dispatch<H: Helm + ?Sized>(helm: &mut H, cmd: &HelmCmd) {
    trace!("Helm command: {:?}", cmd);

    match *cmd {
        HelmCmd::Autonomous {
            heading_deg,
            power,
            yaw_deg,
            total_power_w,
        } => {
            helm.set_heading(heading_deg);
            helm.set_power(power);
            helm.execute_autonomous(yaw_deg, total_power_w);
        }
        HelmCmd::Manual {
            heading_deg,
            power,
            steering,
            manual_power,
        } => {
            helm.set_heading(heading_deg);
            helm.set_power(power);
            helm.execute_manual(steering, manual_power);
        }
    }
}
