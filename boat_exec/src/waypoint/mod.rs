//! # Waypoint store
//!
//! Waypoints are the targets of each leg of a mission. They are provisioned
//! once into a fixed-size table and read by index at runtime. The store owns
//! the bounds policy: reading an index outside the table gives an unset
//! waypoint rather than an error, so the guidance core never has to validate
//! indices itself.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod table;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Serialize;
use std::path::PathBuf;

use crate::geo::Location;

pub use table::*;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A single leg target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Waypoint {
    /// Index of this waypoint in the store
    pub index: usize,

    /// Location of the waypoint, `None` if the slot is not provisioned.
    pub location: Option<Location>,

    /// The waypoint is reached when the vehicle is closer than this.
    ///
    /// Units: meters
    pub radius_m: f64,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Indexed access to the waypoint table.
pub trait WaypointStore {
    /// Read the waypoint at `index`.
    ///
    /// Indexes outside the table return [`Waypoint::unset`].
    fn read(&self, index: usize) -> Waypoint;

    /// Write the location of the waypoint at `index`.
    ///
    /// Writing `None` clears the slot.
    fn write(&mut self, index: usize, location: Option<Location>)
        -> Result<(), WaypointStoreError>;

    /// Number of slots in the table, provisioned or not.
    fn len(&self) -> usize;

    /// Number of leading provisioned waypoints, i.e. the length of the
    /// mission.
    fn num_provisioned(&self) -> usize {
        (0..self.len())
            .take_while(|&i| self.read(i).location.is_some())
            .count()
    }
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum WaypointStoreError {
    #[error("Waypoint index {0} is outside the table (capacity {1})")]
    IndexOutOfRange(usize, usize),

    #[error("The waypoint table contains {0} entries, the maximum is {1}")]
    TooManyWaypoints(usize, usize),

    #[error("Could not load the waypoint table: {0}")]
    LoadError(util::params::LoadError),

    #[error("Could not serialize the waypoint table: {0}")]
    SerializeError(toml::ser::Error),

    #[error("Could not write the waypoint table to {0:?}: {1}")]
    WriteError(PathBuf, std::io::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Waypoint {
    /// The waypoint returned for slots with no location.
    pub fn unset(index: usize) -> Self {
        Self {
            index,
            location: None,
            radius_m: 0.0,
        }
    }

    /// True if this waypoint has a real location.
    pub fn is_set(&self) -> bool {
        self.location.is_some()
    }
}
