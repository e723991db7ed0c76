//! Captain module state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, trace, warn};
use serde::Serialize;

// Internal
use super::{calc_course, Params, PiController};
use crate::eqpt::{ControlMode, HelmCmd, RemoteData, SensorData};
use crate::geo::{self, Location};
use crate::mission_store::{MissionIndices, MissionPersistence, MissionStoreError};
use crate::waypoint::{Waypoint, WaypointStore};
use util::{
    archive::{ArchiveError, Archived, Archiver},
    maths::rem_euclid,
    module::State,
    params,
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The guidance and control core.
///
/// The captain owns the waypoint store and the mission persistence, and is
/// the only thing that writes to either during a mission.
pub struct Captain<W, P> {
    params: Params,

    waypoints: W,
    persistence: P,

    /// Indices of the active and previous waypoints, always equal to the last
    /// pair given to `persistence`.
    indices: MissionIndices,

    mission: MissionState,

    /// False until a course to a waypoint has been calculated, the course is
    /// held at the measured yaw until then.
    course_valid: bool,

    power_ctrl: PiController,

    /// Timestamp of the previous cycle
    prev_time_s: Option<f64>,

    report: StatusReport,
    arch_report: Archiver,
}

/// Mission state, recalculated every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MissionState {
    /// The boat's position
    pub current: Option<Location>,

    /// The waypoint at the start of the current leg
    pub previous: Waypoint,

    /// The active waypoint
    pub waypoint: Waypoint,

    /// Distance from the boat to the active waypoint, `None` if either
    /// position is unknown.
    ///
    /// Units: meters
    pub distance_to_waypoint_m: Option<f64>,

    /// Correction added to the bearing to the waypoint
    ///
    /// Units: radians
    pub tracking_correction_rad: f64,

    /// Course to steer
    ///
    /// Units: radians
    pub desired_course_rad: f64,

    /// Propulsion power demand
    pub desired_power: f64,
}

/// Input data to the captain.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputData {
    /// Timestamp of this cycle, used to find the time since the last cycle.
    ///
    /// Units: seconds
    pub time_s: f64,

    pub sensors: SensorData,

    pub remote: RemoteData,
}

/// Status report for captain processing.
///
/// The report is flat so that it can be archived as one CSV row per cycle.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct StatusReport {
    pub time_s: f64,
    pub dt_s: f64,

    pub manual: bool,

    pub current_index: usize,
    pub last_index: usize,

    pub lat_deg: Option<f64>,
    pub lon_deg: Option<f64>,
    pub waypoint_lat_deg: Option<f64>,
    pub waypoint_lon_deg: Option<f64>,

    pub distance_to_waypoint_m: Option<f64>,

    /// True on the cycle the active waypoint was reached
    pub waypoint_reached: bool,

    /// True if the mission indices could not be persisted this cycle
    pub persistence_failed: bool,

    pub angle_error_rad: f64,
    pub tracking_correction_rad: f64,
    pub desired_course_rad: f64,

    pub voltage_error_v: f64,
    pub power_integral: f64,
    pub desired_power: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Potential errors that can occur in the captain.
#[derive(Debug, thiserror::Error)]
pub enum CaptainError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(params::LoadError),

    #[error("Could not set up the archive: {0}")]
    ArchiveError(ArchiveError),

    #[error("Mission persistence error: {0}")]
    Persistence(MissionStoreError),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<W, P> Captain<W, P>
where
    W: WaypointStore,
    P: MissionPersistence,
{
    /// Create a new captain with the default parameters.
    ///
    /// The mission resumes from the indices held by `persistence`.
    pub fn new(waypoints: W, persistence: P) -> Result<Self, CaptainError> {
        Self::with_params(Params::default(), waypoints, persistence)
    }

    /// Create a new captain with the given parameters.
    pub fn with_params(params: Params, waypoints: W, persistence: P) -> Result<Self, CaptainError> {
        let power_ctrl = PiController::new(params.power_k_p, params.power_k_i, params.power_i_max);

        let mut captain = Self {
            params,
            waypoints,
            persistence,
            indices: MissionIndices::default(),
            mission: MissionState {
                current: None,
                previous: Waypoint::unset(0),
                waypoint: Waypoint::unset(0),
                distance_to_waypoint_m: None,
                tracking_correction_rad: 0.0,
                desired_course_rad: 0.0,
                desired_power: 0.0,
            },
            course_valid: false,
            power_ctrl,
            prev_time_s: None,
            report: StatusReport::default(),
            arch_report: Archiver::default(),
        };

        captain.refresh()?;

        Ok(captain)
    }

    /// Reload the active and previous waypoints from the persisted indices,
    /// without advancing.
    ///
    /// Use this after the persisted indices or the waypoint table have been
    /// changed by something other than the captain.
    pub fn refresh(&mut self) -> Result<(), CaptainError> {
        self.indices = self.persistence.load().map_err(CaptainError::Persistence)?;
        self.reload_waypoints();

        info!(
            "Mission refreshed: waypoint {} {}, previous {} {}",
            self.indices.current,
            fmt_location(self.mission.waypoint.location),
            self.indices.last,
            fmt_location(self.mission.previous.location),
        );

        Ok(())
    }

    /// Overwrite the persisted mission indices and reload the waypoints.
    pub fn set_mission_indices(&mut self, indices: MissionIndices) -> Result<(), CaptainError> {
        self.persistence
            .store(indices)
            .map_err(CaptainError::Persistence)?;
        self.refresh()
    }

    /// Get the mission state from the last cycle.
    pub fn mission(&self) -> &MissionState {
        &self.mission
    }

    /// Get the mission indices.
    pub fn indices(&self) -> MissionIndices {
        self.indices
    }

    /// Get the power controller's integral.
    pub fn power_integral(&self) -> f64 {
        self.power_ctrl.integral()
    }

    /// Get the mission persistence.
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Process one control cycle.
    fn proc_cycle(&mut self, input: &InputData) -> HelmCmd {
        self.report = StatusReport::default();

        let dt = match self.prev_time_s {
            Some(t) => input.time_s - t,
            None => 0f64,
        };
        self.prev_time_s = Some(input.time_s);

        self.mission.current = input.sensors.location;

        self.determine_state();
        self.determine_course(&input.sensors);
        self.determine_power(&input.sensors, &input.remote, dt);

        let heading_deg = course_to_heading_deg(self.mission.desired_course_rad);

        let cmd = match input.remote.mode {
            ControlMode::Autonomous => HelmCmd::Autonomous {
                heading_deg,
                power: self.mission.desired_power,
                yaw_deg: input.sensors.yaw_rad.to_degrees(),
                total_power_w: input.sensors.total_power_w,
            },
            ControlMode::Manual => HelmCmd::Manual {
                heading_deg,
                power: self.mission.desired_power,
                steering: input.remote.steering,
                manual_power: input.remote.power,
            },
        };

        self.fill_report(input, dt);

        trace!(
            "Captain output: course {:.1} deg, power {:.2}, {:?}",
            heading_deg,
            self.mission.desired_power,
            input.remote.mode
        );

        cmd
    }

    /// Find the distance to the active waypoint and advance if it's reached.
    fn determine_state(&mut self) {
        self.mission.distance_to_waypoint_m =
            match (self.mission.current, self.mission.waypoint.location) {
                (Some(here), Some(wp)) => Some(geo::distance(&here, &wp)),
                _ => None,
            };

        if let Some(d) = self.mission.distance_to_waypoint_m {
            if d < self.mission.waypoint.radius_m {
                info!(
                    "Waypoint {} reached ({:.1} m inside {:.1} m radius)",
                    self.indices.current, d, self.mission.waypoint.radius_m
                );
                self.report.waypoint_reached = true;

                self.advance();

                // The new waypoint's distance is for this cycle's position
                self.mission.distance_to_waypoint_m =
                    match (self.mission.current, self.mission.waypoint.location) {
                        (Some(here), Some(wp)) => Some(geo::distance(&here, &wp)),
                        _ => None,
                    };
            }
        }
    }

    /// Move on to the next waypoint.
    ///
    /// The mission continues in memory even if the new indices can't be
    /// persisted.
    fn advance(&mut self) {
        self.indices = self.indices.advanced();

        if let Err(e) = self.persistence.store(self.indices) {
            warn!("Could not persist mission indices {:?}: {}", self.indices, e);
            self.report.persistence_failed = true;
        }

        self.reload_waypoints();

        match self.mission.waypoint.location {
            Some(l) => info!("Heading for waypoint {} at {}", self.indices.current, l),
            None => info!(
                "Waypoint {} is not set, mission complete",
                self.indices.current
            ),
        }
    }

    /// Calculate the desired course.
    fn determine_course(&mut self, sensors: &SensorData) {
        match (self.mission.current, self.mission.waypoint.location) {
            (Some(here), Some(wp)) => {
                let course = calc_course(
                    self.mission.previous.location.as_ref(),
                    &here,
                    &wp,
                    &self.params,
                );

                self.mission.tracking_correction_rad = course.tracking_correction_rad;
                self.mission.desired_course_rad = course.desired_course_rad;
                self.course_valid = true;

                self.report.angle_error_rad = course.angle_error_rad;
            }
            // Nothing to steer towards, hold the last course
            _ => {
                self.mission.tracking_correction_rad = 0f64;
                if !self.course_valid {
                    self.mission.desired_course_rad = sensors.yaw_rad;
                }
            }
        }
    }

    /// Calculate the desired power.
    fn determine_power(&mut self, sensors: &SensorData, remote: &RemoteData, dt: f64) {
        if self.mission.waypoint.is_set() {
            let error = self.params.voltage_setpoint_v - sensors.voltage_v;
            self.mission.desired_power = -self.power_ctrl.get(error, dt);

            self.report.voltage_error_v = error;
        } else {
            if self.power_ctrl.integral() != 0f64 {
                debug!("No active waypoint, power integral reset");
            }
            self.power_ctrl.reset();
            self.mission.desired_power = 0f64;
        }

        // The pilot is in control, don't let the integral carry over to when
        // the captain takes back control
        match remote.mode {
            ControlMode::Manual => self.power_ctrl.reset(),
            ControlMode::Autonomous => (),
        }
    }

    fn reload_waypoints(&mut self) {
        self.mission.waypoint = self.waypoints.read(self.indices.current);
        self.mission.previous = self.waypoints.read(self.indices.last);
    }

    fn fill_report(&mut self, input: &InputData, dt: f64) {
        let r = &mut self.report;
        let m = &self.mission;

        r.time_s = input.time_s;
        r.dt_s = dt;
        r.manual = input.remote.mode == ControlMode::Manual;
        r.current_index = self.indices.current;
        r.last_index = self.indices.last;
        r.lat_deg = m.current.map(|l| l.lat_deg);
        r.lon_deg = m.current.map(|l| l.lon_deg);
        r.waypoint_lat_deg = m.waypoint.location.map(|l| l.lat_deg);
        r.waypoint_lon_deg = m.waypoint.location.map(|l| l.lon_deg);
        r.distance_to_waypoint_m = m.distance_to_waypoint_m;
        r.tracking_correction_rad = m.tracking_correction_rad;
        r.desired_course_rad = m.desired_course_rad;
        r.power_integral = self.power_ctrl.integral();
        r.desired_power = m.desired_power;
    }
}

impl<W, P> State for Captain<W, P>
where
    W: WaypointStore,
    P: MissionPersistence,
{
    const NAME: &'static str = "Captain";

    type InitData = &'static str;
    type InitError = CaptainError;

    type InputData = InputData;
    type OutputData = HelmCmd;
    type StatusReport = StatusReport;
    type ProcError = CaptainError;

    /// Initialise the Captain module.
    ///
    /// Expected init data is the path to the parameter file.
    fn init(&mut self, init_data: Self::InitData, session: &Session) -> Result<(), Self::InitError> {
        self.params = params::load(init_data).map_err(CaptainError::ParamLoadError)?;
        self.power_ctrl = PiController::new(
            self.params.power_k_p,
            self.params.power_k_i,
            self.params.power_i_max,
        );

        self.arch_report = Archiver::from_path(session, "captain/status_report.csv")
            .map_err(CaptainError::ArchiveError)?;

        debug!("Captain parameters: {:?}", self.params);

        Ok(())
    }

    /// Perform cyclic processing of the captain.
    ///
    /// Processing never fails, problems are degraded around and flagged in
    /// the status report.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        let cmd = self.proc_cycle(input_data);
        Ok((cmd, self.report))
    }

    fn make_safe(&mut self) {
        self.power_ctrl.reset();
    }
}

impl<W, P> Archived for Captain<W, P> {
    fn write(&mut self) -> Result<(), ArchiveError> {
        self.arch_report.serialise(&self.report)
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Convert a course into a compass heading in [0, 360).
pub fn course_to_heading_deg(course_rad: f64) -> f64 {
    let heading_deg = rem_euclid(course_rad.to_degrees(), 360f64);

    // Tiny negative courses round up to exactly 360
    if heading_deg >= 360f64 {
        0f64
    } else {
        heading_deg
    }
}

fn fmt_location(loc: Option<Location>) -> String {
    match loc {
        Some(l) => format!("{}", l),
        None => String::from("(unset)"),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mission_store::MemMissionStore;
    use crate::waypoint::WaypointTable;
    use std::f64::consts::{FRAC_PI_2, PI};
    use std::path::PathBuf;

    const RADIUS_M: f64 = 50.0;

    fn a() -> Location {
        Location::new(33.962710, -118.454540)
    }

    fn b() -> Location {
        a().offset(0.0, 500.0)
    }

    fn c() -> Location {
        b().offset(FRAC_PI_2, 500.0)
    }

    fn captain(indices: MissionIndices) -> Captain<WaypointTable, MemMissionStore> {
        let table = WaypointTable::from_locations(&[a(), b(), c()], RADIUS_M).unwrap();
        Captain::new(table, MemMissionStore::new(indices)).unwrap()
    }

    fn input(time_s: f64, location: Option<Location>, voltage_v: f64) -> InputData {
        InputData {
            time_s,
            sensors: SensorData {
                location,
                yaw_rad: 0.3,
                voltage_v,
                total_power_w: 100.0,
            },
            remote: RemoteData::default(),
        }
    }

    fn manual(mut input: InputData) -> InputData {
        input.remote = RemoteData {
            mode: ControlMode::Manual,
            steering: -0.4,
            power: 0.6,
        };
        input
    }

    struct FailingStore;

    impl MissionPersistence for FailingStore {
        fn load(&self) -> Result<MissionIndices, MissionStoreError> {
            Ok(MissionIndices::new(1, 0))
        }

        fn store(&mut self, _: MissionIndices) -> Result<(), MissionStoreError> {
            Err(MissionStoreError::WriteError(
                PathBuf::from("/mission.json"),
                std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            ))
        }
    }

    #[test]
    fn test_resumes_from_persisted_indices() {
        let cap = captain(MissionIndices::new(2, 1));

        assert_eq!(cap.indices(), MissionIndices::new(2, 1));
        assert_eq!(cap.mission().waypoint.location, Some(c()));
        assert_eq!(cap.mission().previous.location, Some(b()));
        assert_eq!(cap.persistence().num_stores, 0);
    }

    #[test]
    fn test_arrival_advances() {
        let mut cap = captain(MissionIndices::new(1, 0));

        // 40 m short of B, inside its 50 m radius
        let here = b().offset(PI, 40.0);
        let (_, report) = cap.proc(&input(0.0, Some(here), 13.2)).unwrap();

        assert!(report.waypoint_reached);
        assert!(!report.persistence_failed);
        assert_eq!(cap.indices(), MissionIndices::new(2, 1));
        assert_eq!(cap.mission().waypoint.location, Some(c()));
        assert_eq!(cap.mission().previous.location, Some(b()));
        assert_eq!(cap.persistence().load().unwrap(), MissionIndices::new(2, 1));
        assert_eq!(cap.persistence().num_stores, 1);

        // Staying in the same place doesn't trigger again
        let (_, report) = cap.proc(&input(1.0, Some(here), 13.2)).unwrap();

        assert!(!report.waypoint_reached);
        assert_eq!(cap.indices(), MissionIndices::new(2, 1));
        assert_eq!(cap.persistence().num_stores, 1);
    }

    #[test]
    fn test_outside_radius_does_not_advance() {
        let mut cap = captain(MissionIndices::new(1, 0));

        let here = b().offset(PI, 60.0);
        let (_, report) = cap.proc(&input(0.0, Some(here), 13.2)).unwrap();

        assert!(!report.waypoint_reached);
        assert_eq!(cap.indices(), MissionIndices::new(1, 0));
        assert!((report.distance_to_waypoint_m.unwrap() - 60.0).abs() < 0.1);
    }

    #[test]
    fn test_persistence_failure_still_advances() {
        let table = WaypointTable::from_locations(&[a(), b(), c()], RADIUS_M).unwrap();
        let mut cap = Captain::new(table, FailingStore).unwrap();

        let (_, report) = cap.proc(&input(0.0, Some(b()), 13.2)).unwrap();

        assert!(report.waypoint_reached);
        assert!(report.persistence_failed);
        assert_eq!(cap.indices(), MissionIndices::new(2, 1));
        assert_eq!(cap.mission().waypoint.location, Some(c()));
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let mut cap = captain(MissionIndices::new(1, 0));
        cap.proc(&input(0.0, Some(a()), 13.2)).unwrap();

        cap.refresh().unwrap();
        let indices = cap.indices();
        let waypoint = cap.mission().waypoint;
        let previous = cap.mission().previous;

        cap.refresh().unwrap();

        assert_eq!(cap.indices(), indices);
        assert_eq!(cap.mission().waypoint, waypoint);
        assert_eq!(cap.mission().previous, previous);
        assert_eq!(cap.persistence().num_stores, 0);
    }

    #[test]
    fn test_set_mission_indices() {
        let mut cap = captain(MissionIndices::new(1, 0));

        cap.set_mission_indices(MissionIndices::new(2, 1)).unwrap();

        assert_eq!(cap.indices(), MissionIndices::new(2, 1));
        assert_eq!(cap.persistence().load().unwrap(), MissionIndices::new(2, 1));
        assert_eq!(cap.mission().waypoint.location, Some(c()));
    }

    #[test]
    fn test_power_from_low_voltage() {
        let mut cap = captain(MissionIndices::new(1, 0));

        // First cycle has no time difference, so only the proportional term
        let (_, report) = cap.proc(&input(0.0, Some(a()), 12.0)).unwrap();
        assert_eq!(report.dt_s, 0.0);
        assert_eq!(cap.power_integral(), 0.0);
        assert!((report.desired_power + 60.0).abs() < 1e-9);

        let (cmd, report) = cap.proc(&input(1.0, Some(a()), 12.0)).unwrap();
        assert_eq!(report.dt_s, 1.0);
        assert!((cap.power_integral() - 1.2).abs() < 1e-9);
        assert!((report.desired_power + 72.0).abs() < 1e-9);

        match cmd {
            HelmCmd::Autonomous {
                power,
                yaw_deg,
                total_power_w,
                ..
            } => {
                assert!((power + 72.0).abs() < 1e-9);
                assert!((yaw_deg - 0.3f64.to_degrees()).abs() < 1e-9);
                assert_eq!(total_power_w, 100.0);
            }
            _ => panic!("Expected an autonomous command, got {:?}", cmd),
        }
    }

    #[test]
    fn test_manual_mode_resets_integral() {
        let mut cap = captain(MissionIndices::new(1, 0));
        cap.proc(&input(0.0, Some(a()), 12.0)).unwrap();
        cap.proc(&input(1.0, Some(a()), 12.0)).unwrap();
        assert!(cap.power_integral() > 0.0);

        let (cmd, report) = cap.proc(&manual(input(2.0, Some(a()), 12.0))).unwrap();

        assert!(report.manual);
        assert_eq!(cap.power_integral(), 0.0);
        match cmd {
            HelmCmd::Manual {
                steering,
                manual_power,
                ..
            } => {
                assert_eq!(steering, -0.4);
                assert_eq!(manual_power, 0.6);
            }
            _ => panic!("Expected a manual command, got {:?}", cmd),
        }

        // Back in autonomous the integral starts from zero
        cap.proc(&input(3.0, Some(a()), 12.0)).unwrap();
        assert!((cap.power_integral() - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_no_waypoint_gives_no_power() {
        let mut cap = captain(MissionIndices::new(1, 0));
        cap.proc(&input(0.0, Some(a()), 12.0)).unwrap();
        cap.proc(&input(1.0, Some(a()), 12.0)).unwrap();

        // Past the end of the mission
        cap.set_mission_indices(MissionIndices::new(3, 2)).unwrap();
        assert!(!cap.mission().waypoint.is_set());

        let (_, report) = cap.proc(&input(2.0, Some(a()), 12.0)).unwrap();

        assert_eq!(report.desired_power, 0.0);
        assert_eq!(cap.power_integral(), 0.0);
        assert_eq!(report.distance_to_waypoint_m, None);
    }

    #[test]
    fn test_unset_previous_gives_no_correction() {
        // Previous index is outside the provisioned waypoints
        let mut cap = captain(MissionIndices::new(1, 10));
        assert!(!cap.mission().previous.is_set());

        // Well off the line from A to B
        let here = a().offset(FRAC_PI_2, 200.0);
        let (_, report) = cap.proc(&input(0.0, Some(here), 13.2)).unwrap();

        assert_eq!(report.tracking_correction_rad, 0.0);
        assert_eq!(report.desired_course_rad, geo::bearing(&here, &b()));
    }

    #[test]
    fn test_correction_applied_on_leg() {
        let mut cap = captain(MissionIndices::new(1, 0));

        let here = a().offset(0.0, 250.0).offset(FRAC_PI_2, 200.0);
        let (cmd, report) = cap.proc(&input(0.0, Some(here), 13.2)).unwrap();

        assert_eq!(report.tracking_correction_rad, -PI / 9.0);

        let expected_deg = course_to_heading_deg(geo::bearing(&here, &b()) - PI / 9.0);
        match cmd {
            HelmCmd::Autonomous { heading_deg, .. } => {
                assert!((heading_deg - expected_deg).abs() < 1e-9);
                assert!(heading_deg >= 0.0 && heading_deg < 360.0);
            }
            _ => panic!("Expected an autonomous command, got {:?}", cmd),
        }
    }

    #[test]
    fn test_heading_range() {
        assert_eq!(course_to_heading_deg(0.0), 0.0);
        assert_eq!(course_to_heading_deg(-1e-17), 0.0);
        assert!((course_to_heading_deg(-FRAC_PI_2) - 270.0).abs() < 1e-9);
        assert!((course_to_heading_deg(PI + 0.1) - (180.0 + 0.1f64.to_degrees())).abs() < 1e-9);

        for i in -100..100 {
            let h = course_to_heading_deg(i as f64 * 1e-17);
            assert!(h >= 0.0 && h < 360.0);
        }
    }

    #[test]
    fn test_no_fix_holds_course() {
        let mut cap = captain(MissionIndices::new(1, 0));

        // Before any course is known the boat holds its yaw
        let (_, report) = cap.proc(&input(0.0, None, 13.2)).unwrap();
        assert_eq!(report.desired_course_rad, 0.3);
        assert_eq!(report.distance_to_waypoint_m, None);

        let here = a().offset(0.2, 10.0);
        let (_, report) = cap.proc(&input(1.0, Some(here), 13.2)).unwrap();
        let course = report.desired_course_rad;

        // Then holds the last calculated course
        let (_, report) = cap.proc(&input(2.0, None, 13.2)).unwrap();
        assert_eq!(report.desired_course_rad, course);
        assert_eq!(report.tracking_correction_rad, 0.0);
        assert_eq!(cap.indices(), MissionIndices::new(1, 0));
    }

    #[test]
    fn test_make_safe_resets_integral() {
        let mut cap = captain(MissionIndices::new(1, 0));
        cap.proc(&input(0.0, Some(a()), 12.0)).unwrap();
        cap.proc(&input(1.0, Some(a()), 12.0)).unwrap();

        cap.make_safe();

        assert_eq!(cap.power_integral(), 0.0);
    }
}
