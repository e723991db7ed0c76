//! Fixed-size waypoint table backed by a TOML file
//!
//! The provisioning format marks blank slots with a `(0, 0)` location, these
//! are converted to unset waypoints when the table is loaded. For example:
//!
//! ```toml
//! default_radius_m = 10.0
//!
//! [[waypoints]]
//! lat_deg = 33.962710
//! lon_deg = -118.454540
//!
//! [[waypoints]]
//! lat_deg = 33.962396
//! lon_deg = -118.454933
//! radius_m = 5.0
//! ```

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{Waypoint, WaypointStore, WaypointStoreError};
use crate::geo::Location;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of slots in a waypoint table.
pub const MAX_WAYPOINTS: usize = 64;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A waypoint table.
///
/// The table always has [`MAX_WAYPOINTS`] slots. If it was loaded from a file
/// every write is saved back to that file before returning.
#[derive(Debug, Clone)]
pub struct WaypointTable {
    slots: Vec<Slot>,

    default_radius_m: f64,

    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    location: Option<Location>,
    radius_m: f64,
}

/// On-disk representation of the table.
#[derive(Debug, Serialize, Deserialize)]
struct TableFile {
    default_radius_m: f64,

    #[serde(default)]
    waypoints: Vec<TableEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TableEntry {
    lat_deg: f64,
    lon_deg: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    radius_m: Option<f64>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl WaypointTable {
    /// Create an empty in-memory table.
    pub fn new(default_radius_m: f64) -> Self {
        Self {
            slots: vec![
                Slot {
                    location: None,
                    radius_m: default_radius_m,
                };
                MAX_WAYPOINTS
            ],
            default_radius_m,
            path: None,
        }
    }

    /// Create an in-memory table holding the given locations in order.
    pub fn from_locations(
        locations: &[Location],
        default_radius_m: f64,
    ) -> Result<Self, WaypointStoreError> {
        if locations.len() > MAX_WAYPOINTS {
            return Err(WaypointStoreError::TooManyWaypoints(
                locations.len(),
                MAX_WAYPOINTS,
            ));
        }

        let mut table = Self::new(default_radius_m);
        for (slot, loc) in table.slots.iter_mut().zip(locations) {
            slot.location = Some(*loc);
        }

        Ok(table)
    }

    /// Load a table from a TOML file.
    ///
    /// Subsequent writes are saved back into the same file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, WaypointStoreError> {
        let file: TableFile =
            util::params::load_from(path.as_ref()).map_err(WaypointStoreError::LoadError)?;

        if file.waypoints.len() > MAX_WAYPOINTS {
            return Err(WaypointStoreError::TooManyWaypoints(
                file.waypoints.len(),
                MAX_WAYPOINTS,
            ));
        }

        let mut table = Self::new(file.default_radius_m);
        table.path = Some(path.as_ref().to_path_buf());

        for (slot, entry) in table.slots.iter_mut().zip(file.waypoints.iter()) {
            slot.location = Location::from_sentinel(entry.lat_deg, entry.lon_deg);
            slot.radius_m = entry.radius_m.unwrap_or(file.default_radius_m);
        }

        info!(
            "Loaded waypoint table from {:?}: {} waypoints provisioned",
            path.as_ref(),
            table.num_provisioned()
        );

        Ok(table)
    }

    /// Set the arrival radius of a slot.
    pub fn set_radius(&mut self, index: usize, radius_m: f64) -> Result<(), WaypointStoreError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(WaypointStoreError::IndexOutOfRange(index, MAX_WAYPOINTS))?;
        slot.radius_m = radius_m;

        self.save()
    }

    /// Save the table to its file, if it has one.
    fn save(&self) -> Result<(), WaypointStoreError> {
        let path = match self.path {
            Some(ref p) => p,
            None => return Ok(()),
        };

        // Trailing unset slots are not written out
        let num_used = self
            .slots
            .iter()
            .rposition(|s| s.location.is_some())
            .map_or(0, |i| i + 1);

        let file = TableFile {
            default_radius_m: self.default_radius_m,
            waypoints: self.slots[..num_used]
                .iter()
                .map(|s| {
                    let (lat_deg, lon_deg) = match s.location {
                        Some(l) => (l.lat_deg, l.lon_deg),
                        None => (0.0, 0.0),
                    };
                    TableEntry {
                        lat_deg,
                        lon_deg,
                        radius_m: if s.radius_m != self.default_radius_m {
                            Some(s.radius_m)
                        } else {
                            None
                        },
                    }
                })
                .collect(),
        };

        let table_str = toml::to_string(&file).map_err(WaypointStoreError::SerializeError)?;
        std::fs::write(path, table_str)
            .map_err(|e| WaypointStoreError::WriteError(path.clone(), e))?;

        debug!("Waypoint table saved to {:?}", path);

        Ok(())
    }
}

impl WaypointStore for WaypointTable {
    fn read(&self, index: usize) -> Waypoint {
        match self.slots.get(index) {
            Some(slot) => match slot.location {
                Some(_) => Waypoint {
                    index,
                    location: slot.location,
                    radius_m: slot.radius_m,
                },
                None => Waypoint::unset(index),
            },
            None => Waypoint::unset(index),
        }
    }

    fn write(
        &mut self,
        index: usize,
        location: Option<Location>,
    ) -> Result<(), WaypointStoreError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(WaypointStoreError::IndexOutOfRange(index, MAX_WAYPOINTS))?;
        slot.location = location;

        self.save()
    }

    fn len(&self) -> usize {
        self.slots.len()
    }
}
