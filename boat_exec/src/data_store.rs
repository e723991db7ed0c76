//! # Data Store

use log::{info, warn};

use crate::{
    captain,
    eqpt::{ControlMode, HelmCmd, RemoteData, SensorData},
};

// ---------------------------------------------------------------------------
// ENUMS
// ---------------------------------------------------------------------------

/// Gives the reason the boat has been put into safe mode
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum SafeModeCause {
    MakeSafeTc,
    CaptainError,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Debug, Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// True if this cycle falls on a 1Hz boundary
    pub is_1_hz_cycle: bool,

    /// Session elapsed time at the start of this cycle
    pub time_s: f64,

    // Safe mode variables
    /// Determines if the boat is in safe mode.
    pub safe: bool,

    /// Gives the reason for the boat being in safe mode.
    pub safe_cause: Option<SafeModeCause>,

    /// Mode forced by telecommand, overriding the remote's switch.
    pub mode_override: Option<ControlMode>,

    // Captain
    pub captain_input: captain::InputData,
    pub captain_output: Option<HelmCmd>,
    pub captain_status_rpt: captain::StatusReport,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Puts the boat into safe mode with the given cause.
    ///
    /// The owner of the captain is responsible for calling its `make_safe`.
    pub fn make_safe(&mut self, cause: SafeModeCause) {
        if !self.safe {
            warn!("Make safe requested, cause: {:?}", cause);
            self.safe = true;
            self.safe_cause = Some(cause);
        }
    }

    /// Attempts to disable the safe mode by clearing the given cause.
    ///
    /// Returns `Ok(())` if this cause was cleared and safe mode was disabled, or `Err(())`
    /// otherwise. To remove safe mode the provided cause must match the initial reason for safe
    /// mode being enabled.
    ///
    /// If safe mode was not enabled `Ok(())` is returned
    pub fn make_unsafe(&mut self, cause: SafeModeCause) -> Result<(), ()> {
        if !self.safe {
            return Ok(());
        }

        match self.safe_cause {
            Some(root_cause) if root_cause != cause => Err(()),
            _ => {
                self.safe = false;
                self.safe_cause = None;
                info!("Make unsafe requested, root cause match, safe mode disabled");
                Ok(())
            }
        }
    }

    /// Perform actions required at the start of a cycle.
    ///
    /// Clears those items that need clearing at the start of a cycle, and sets the 1Hz cycle flag.
    pub fn cycle_start(&mut self, cycle_frequency_hz: f64, time_s: f64) {
        self.is_1_hz_cycle = self.num_cycles % (cycle_frequency_hz.max(1.0) as u128) == 0;

        self.captain_input = captain::InputData::default();
        self.captain_output = None;
        self.captain_status_rpt = captain::StatusReport::default();

        self.time_s = time_s;
    }

    /// Build the remote control data the captain sees this cycle.
    ///
    /// In safe mode the boat is held in manual with zero demands, otherwise
    /// any mode override replaces the remote's switch position.
    pub fn effective_remote(&self, sampled: RemoteData) -> RemoteData {
        if self.safe {
            return RemoteData {
                mode: ControlMode::Manual,
                steering: 0.0,
                power: 0.0,
            };
        }

        match self.mode_override {
            Some(mode) => RemoteData { mode, ..sampled },
            None => sampled,
        }
    }

    /// Build the captain's input for this cycle from the sampled equipment.
    pub fn set_captain_input(&mut self, sensors: SensorData, remote: RemoteData) {
        self.captain_input = captain::InputData {
            time_s: self.time_s,
            sensors,
            remote: self.effective_remote(remote),
        };
    }
}
