//! # Boat library.
//!
//! This library allows other crates in the workspace, and the integration
//! tests, to access items defined inside the boat crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Captain - guidance and control core, sets the course and power each cycle
pub mod captain;

/// Data store - state shared between the main loop and the telecommand processor
pub mod data_store;

/// Equipment interfaces - sensors, remote control and helm
pub mod eqpt;

/// Geographic positions and great-circle calculations
pub mod geo;

/// Mission persistence - durable storage of the waypoint indices
pub mod mission_store;

/// Executable parameters
pub mod params;

/// Simulated boat - kinematic stand in for the real equipment
pub mod sim;

/// Telecommand processor
pub mod tc_processor;

/// Waypoint store
pub mod waypoint;
