//! # Captain module
//!
//! The captain is the guidance and control core of the boat. Once per control
//! cycle it:
//!
//!  1. Works out how far the boat is from the active waypoint, and if it is
//!     inside the waypoint's radius advances the mission to the next one.
//!  2. Calculates the course to steer.
//!  3. Calculates the propulsion power demand.
//!  4. Builds the command for the helm, or passes the pilot's demands through
//!     if the remote control is in manual mode.
//!
//! ## Course
//!
//! Steering straight at the waypoint lets the boat be pushed off the line
//! between waypoints by wind and current, and it never comes back to it. The
//! captain instead compares the bearing to the waypoint with the bearing of
//! the leg (from the previous waypoint to the active one). As the boat drifts
//! off the leg these two bearings separate, and the difference, multiplied by
//! a gain, is added to the bearing to the waypoint to steer the boat back
//! towards the line. The correction is saturated so that large errors, such
//! as just after switching to a new leg, don't turn the boat away from the
//! waypoint altogether.
//!
//! ## Power
//!
//! Propulsion power is set by a PI controller on the supply voltage, keeping
//! it at the setpoint so the battery isn't drained faster than it is charged.
//! A voltage below the setpoint gives a negative power demand, reducing the
//! load. The integral is hard clamped and is reset whenever there's no active
//! waypoint or the pilot has control, so that it doesn't wind up while unused.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod controllers;
pub mod course;
pub mod params;
pub mod state;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use controllers::*;
pub use course::*;
pub use params::Params;
pub use state::*;
