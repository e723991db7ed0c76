//! # Telecommand module
//!
//! A telecommand (TC) is an instruction sent to the boat by an operator,
//! either live or from a mission script. TCs are JSON objects with a `type`
//! and, for those that need one, a `payload`:
//!
//! ```json
//! {"type": "SET_MISSION_INDICES", "payload": {"current": 3, "last": 2}}
//! {"type": "REFRESH_WAYPOINT"}
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Telecommands understood by the boat executable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tc {
    /// Stop the boat and hand control to a zeroed manual demand.
    MakeSafe,

    /// Leave safe mode if it was entered by a `MakeSafe` TC.
    MakeUnsafe,

    /// Override the remote control mode switch.
    ///
    /// `manual: true` forces manual mode, `manual: false` forces autonomous
    /// mode regardless of the remote's switch position.
    SetMode { manual: bool },

    /// Clear any mode override, giving control back to the remote's switch.
    ClearModeOverride,

    /// Overwrite the persisted mission indices and reload the waypoints.
    SetMissionIndices { current: usize, last: usize },

    /// Reload the active and previous waypoints from the persisted indices.
    RefreshWaypoint,
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum TcParseError {
    #[error("TC contains invalid JSON or an unknown type: {0}")]
    InvalidJson(serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tc {
    /// Parse a new TC from a JSON packet
    pub fn from_json(json_str: &str) -> Result<Self, TcParseError> {
        serde_json::from_str(json_str).map_err(TcParseError::InvalidJson)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_unit_tcs() {
        assert_eq!(Tc::from_json(r#"{"type": "MAKE_SAFE"}"#).unwrap(), Tc::MakeSafe);
        assert_eq!(
            Tc::from_json(r#"{"type": "REFRESH_WAYPOINT"}"#).unwrap(),
            Tc::RefreshWaypoint
        );
    }

    #[test]
    fn test_parse_payload_tcs() {
        assert_eq!(
            Tc::from_json(r#"{"type": "SET_MISSION_INDICES", "payload": {"current": 3, "last": 2}}"#)
                .unwrap(),
            Tc::SetMissionIndices { current: 3, last: 2 }
        );
        assert_eq!(
            Tc::from_json(r#"{"type": "SET_MODE", "payload": {"manual": true}}"#).unwrap(),
            Tc::SetMode { manual: true }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(Tc::from_json(r#"{"type": "LAUNCH_ROCKETS"}"#).is_err());
        assert!(Tc::from_json(r#"{"type": "SET_MODE"}"#).is_err());
        assert!(Tc::from_json("not json").is_err());
    }
}
