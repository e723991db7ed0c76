//! Host platform utility functions

use std::env;
use std::path::PathBuf;

/// Name of the environment variable pointing at the software root.
///
/// The root contains the `params` directory and is where `sessions` are
/// created.
pub const SW_ROOT_ENV_VAR: &str = "BOAT_SW_ROOT";

/// Get the path to the software root directory.
pub fn get_boat_sw_root() -> Result<PathBuf, env::VarError> {
    env::var(SW_ROOT_ENV_VAR).map(PathBuf::from)
}

/// Get a short description of the host platform, used in the startup log.
pub fn get_platform() -> String {
    format!("{} ({})", env::consts::OS, env::consts::ARCH)
}
