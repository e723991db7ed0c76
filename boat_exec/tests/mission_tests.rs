//! Whole-mission tests, driving the captain around the simulated boat.

use boat_lib::{
    captain::Captain,
    data_store::{DataStore, SafeModeCause},
    eqpt::{self, ControlMode, RemoteData, SensorData, Sensors},
    geo::{self, Location},
    mission_store::{FileMissionStore, MemMissionStore, MissionIndices, MissionPersistence},
    sim::{SimBoat, SimParams},
    tc_processor,
    waypoint::{WaypointStore, WaypointTable},
};
use util::{
    module::State,
    script_interpreter::{PendingTcs, ScriptInterpreter},
};

const DT: f64 = 0.1;
const MAX_CYCLES: usize = 5000;

fn mission() -> Vec<Location> {
    vec![
        Location::new(33.962710, -118.454540),
        Location::new(33.962396, -118.454933),
        Location::new(33.962456, -118.454429),
        Location::new(33.962827, -118.453992),
        Location::new(33.962710, -118.454540),
    ]
}

fn table() -> WaypointTable {
    WaypointTable::from_locations(&mission(), 10.0).unwrap()
}

/// Run one cycle of the executable's main loop.
fn cycle<W, P>(ds: &mut DataStore, captain: &mut Captain<W, P>, boat: &mut SimBoat, n: usize)
where
    W: WaypointStore,
    P: MissionPersistence,
{
    ds.cycle_start(1.0 / DT, n as f64 * DT);
    if n > 0 {
        boat.step(DT);
    }

    ds.set_captain_input(SensorData::sample(boat), RemoteData::sample(boat));

    let (cmd, _) = captain.proc(&ds.captain_input).unwrap();
    eqpt::dispatch(boat, &cmd);

    ds.num_cycles += 1;
}

#[test]
fn test_complete_mission() {
    let mut captain = Captain::new(table(), MemMissionStore::default()).unwrap();
    let mut boat = SimBoat::new(SimParams::default());
    let mut ds = DataStore::default();

    let mut n = 0;
    let mut settled_integral = 0.0;
    let mut settled_voltage_v = 0.0;
    while captain.mission().waypoint.is_set() {
        assert!(n < MAX_CYCLES, "Mission not complete after {} cycles", n);
        settled_integral = captain.power_integral();
        settled_voltage_v = ds.captain_input.sensors.voltage_v;
        cycle(&mut ds, &mut captain, &mut boat, n);
        n += 1;
    }

    // Every waypoint was reached once, in order
    assert_eq!(captain.indices(), MissionIndices::new(5, 4));
    assert_eq!(captain.persistence().num_stores, 5);

    // The boat finished where it started
    let here = boat.location().unwrap();
    assert!(geo::distance(&here, &mission()[4]) < 10.0);

    // Before the last arrival the power controller had settled the supply
    // voltage on its setpoint
    assert!((settled_voltage_v - 13.2).abs() < 0.05);
    assert!(settled_integral > 0.0 && settled_integral < 10.0);

    // The arrival cycle already had nothing left to steer for
    assert_eq!(captain.mission().desired_power, 0.0);
    assert_eq!(captain.power_integral(), 0.0);
}

#[test]
fn test_resume_after_restart() {
    let path = std::env::temp_dir().join(format!("boat_resume_{}.json", std::process::id()));
    std::fs::remove_file(&path).ok();

    let mut captain = Captain::new(table(), FileMissionStore::new(&path)).unwrap();
    let mut boat = SimBoat::new(SimParams::default());
    let mut ds = DataStore::default();

    let mut n = 0;
    while captain.indices().current < 3 {
        assert!(n < MAX_CYCLES);
        cycle(&mut ds, &mut captain, &mut boat, n);
        n += 1;
    }
    assert_eq!(captain.indices(), MissionIndices::new(3, 2));

    // Power loss, the boat stays where it is but the software starts again
    drop(captain);
    let mut captain = Captain::new(table(), FileMissionStore::new(&path)).unwrap();

    assert_eq!(captain.indices(), MissionIndices::new(3, 2));
    assert_eq!(captain.mission().waypoint.location, Some(mission()[3]));
    assert_eq!(captain.mission().previous.location, Some(mission()[2]));

    let mut ds = DataStore::default();
    let mut n = 0;
    while captain.mission().waypoint.is_set() {
        assert!(n < MAX_CYCLES);
        cycle(&mut ds, &mut captain, &mut boat, n);
        n += 1;
    }

    assert_eq!(
        FileMissionStore::new(&path).load().unwrap(),
        MissionIndices::new(5, 4)
    );

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_manual_override() {
    let mut captain = Captain::new(table(), MemMissionStore::default()).unwrap();
    let mut boat = SimBoat::new(SimParams::default());
    let mut ds = DataStore::default();

    for n in 0..100 {
        cycle(&mut ds, &mut captain, &mut boat, n);
    }
    assert!(captain.power_integral() != 0.0);

    // Pilot takes over and drives straight at half power
    ds.mode_override = Some(ControlMode::Manual);
    boat.remote_power = 0.5;
    boat.remote_steering = 0.0;

    for n in 100..200 {
        cycle(&mut ds, &mut captain, &mut boat, n);
        assert_eq!(captain.power_integral(), 0.0);
    }
    assert!((boat.speed_ms() - 1.5).abs() < 1e-9);

    // Captain has kept calculating while the pilot drove
    assert!(captain.mission().desired_power != 0.0);

    ds.mode_override = None;
    cycle(&mut ds, &mut captain, &mut boat, 200);
    cycle(&mut ds, &mut captain, &mut boat, 201);
    assert!(captain.power_integral() != 0.0);
}

#[test]
fn test_safe_mode_stops_boat() {
    let mut captain = Captain::new(table(), MemMissionStore::default()).unwrap();
    let mut boat = SimBoat::new(SimParams::default());
    let mut ds = DataStore::default();

    for n in 0..50 {
        cycle(&mut ds, &mut captain, &mut boat, n);
    }
    assert!(boat.speed_ms() > 0.0);

    ds.make_safe(SafeModeCause::MakeSafeTc);
    captain.make_safe();

    cycle(&mut ds, &mut captain, &mut boat, 50);
    let stopped_at = boat.location().unwrap();
    assert_eq!(boat.speed_ms(), 0.0);

    for n in 51..100 {
        cycle(&mut ds, &mut captain, &mut boat, n);
    }
    assert!(geo::distance(&boat.location().unwrap(), &stopped_at) < 1e-6);
    assert_eq!(captain.power_integral(), 0.0);
}

#[test]
fn test_scripted_mission_restart() {
    let script = r#"
        0.0: {"type": "SET_MISSION_INDICES", "payload": {"current": 3, "last": 2}};
        1.0: {"type": "SET_MODE", "payload": {"manual": true}};
        2.0: {"type": "CLEAR_MODE_OVERRIDE"};
    "#;
    let mut si = ScriptInterpreter::from_script(script).unwrap();

    let mut captain = Captain::new(table(), MemMissionStore::default()).unwrap();
    let mut boat = SimBoat::new(SimParams::default());
    let mut ds = DataStore::default();

    let mut overridden = false;

    for n in 0..40 {
        let time_s = n as f64 * DT;
        match si.get_pending_tcs(time_s) {
            PendingTcs::Some(tcs) => {
                for tc in tcs.iter() {
                    tc_processor::exec(&mut ds, &mut captain, tc).unwrap();
                }
            }
            PendingTcs::None => (),
            PendingTcs::EndOfScript => break,
        }

        overridden |= ds.mode_override == Some(ControlMode::Manual);
        cycle(&mut ds, &mut captain, &mut boat, n);
    }

    assert!(overridden);
    assert_eq!(ds.mode_override, None);
    assert_eq!(captain.indices(), MissionIndices::new(3, 2));
    assert_eq!(captain.mission().waypoint.location, Some(mission()[3]));
}
