//! # Telecommand processor module
//!
//! The telecommand processor handles various TCs coming from any source.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info};

// Internal
use crate::{
    captain::{Captain, CaptainError},
    data_store::{DataStore, SafeModeCause},
    eqpt::ControlMode,
    mission_store::{MissionIndices, MissionPersistence},
    waypoint::WaypointStore,
};
use comms_if::tc::Tc;
use util::module::State;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute a telecommand.
///
/// Mutates the datastore and the captain. Errors are those of the captain's
/// mission operations, the TC has no effect if one is returned.
pub fn exec<W, P>(
    ds: &mut DataStore,
    captain: &mut Captain<W, P>,
    tc: &Tc,
) -> Result<(), CaptainError>
where
    W: WaypointStore,
    P: MissionPersistence,
{
    // Handle different Tcs
    match *tc {
        Tc::MakeSafe => {
            debug!("Recieved MakeSafe command");
            ds.make_safe(SafeModeCause::MakeSafeTc);
            captain.make_safe();
        }
        Tc::MakeUnsafe => {
            debug!("Recieved MakeUnsafe command");
            ds.make_unsafe(SafeModeCause::MakeSafeTc).ok();
        }
        Tc::SetMode { manual } => {
            let mode = match manual {
                true => ControlMode::Manual,
                false => ControlMode::Autonomous,
            };
            info!("Mode override set to {:?}", mode);
            ds.mode_override = Some(mode);
        }
        Tc::ClearModeOverride => {
            info!("Mode override cleared");
            ds.mode_override = None;
        }
        Tc::SetMissionIndices { current, last } => {
            info!("Setting mission indices to {} (previous {})", current, last);
            captain.set_mission_indices(MissionIndices::new(current, last))?;
        }
        Tc::RefreshWaypoint => {
            debug!("Recieved RefreshWaypoint command");
            captain.refresh()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geo::Location;
    use crate::mission_store::MemMissionStore;
    use crate::waypoint::WaypointTable;

    fn setup() -> (DataStore, Captain<WaypointTable, MemMissionStore>) {
        let a = Location::new(33.962710, -118.454540);
        let locations = [a, a.offset(0.0, 500.0), a.offset(1.0, 800.0)];
        let table = WaypointTable::from_locations(&locations, 50.0).unwrap();
        let captain = Captain::new(table, MemMissionStore::default()).unwrap();

        (DataStore::default(), captain)
    }

    #[test]
    fn test_safe_mode_tcs() {
        let (mut ds, mut captain) = setup();

        exec(&mut ds, &mut captain, &Tc::MakeSafe).unwrap();
        assert!(ds.safe);
        assert_eq!(ds.safe_cause, Some(SafeModeCause::MakeSafeTc));

        exec(&mut ds, &mut captain, &Tc::MakeUnsafe).unwrap();
        assert!(!ds.safe);
    }

    #[test]
    fn test_mode_override_tcs() {
        let (mut ds, mut captain) = setup();

        exec(&mut ds, &mut captain, &Tc::SetMode { manual: true }).unwrap();
        assert_eq!(ds.mode_override, Some(ControlMode::Manual));

        exec(&mut ds, &mut captain, &Tc::SetMode { manual: false }).unwrap();
        assert_eq!(ds.mode_override, Some(ControlMode::Autonomous));

        exec(&mut ds, &mut captain, &Tc::ClearModeOverride).unwrap();
        assert_eq!(ds.mode_override, None);
    }

    #[test]
    fn test_mission_tcs() {
        let (mut ds, mut captain) = setup();
        assert_eq!(captain.indices(), MissionIndices::new(0, 0));

        let tc = Tc::from_json(
            r#"{"type": "SET_MISSION_INDICES", "payload": {"current": 2, "last": 1}}"#,
        )
        .unwrap();
        exec(&mut ds, &mut captain, &tc).unwrap();

        assert_eq!(captain.indices(), MissionIndices::new(2, 1));
        assert_eq!(captain.persistence().load().unwrap(), MissionIndices::new(2, 1));
        assert_eq!(captain.mission().waypoint.index, 2);

        exec(&mut ds, &mut captain, &Tc::RefreshWaypoint).unwrap();
        assert_eq!(captain.indices(), MissionIndices::new(2, 1));
    }
}
