//! # Boat Executable Parameters
//!
//! This module provide parameters for the boat executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct BoatExecParams {
    /// Target period of one cycle.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Waypoint table file, relative to the software root
    pub waypoint_table: String,

    /// File holding the persisted mission indices, relative to the software
    /// root
    pub mission_state: String,

    /// Number of consecutive cycle overruns after which the exec stops. Zero
    /// disables the limit.
    pub max_consec_cycle_overruns: u64,
}
