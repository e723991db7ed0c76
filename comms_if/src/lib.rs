//! # Communications interface crate.
//!
//! Provides the command definitions shared between the boat executable and
//! the mission scripts that drive it.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Telecommand definitions
pub mod tc;
