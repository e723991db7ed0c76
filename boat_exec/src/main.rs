//! Main boat-side executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - Simulation step
//!         - Telecommand processing and handling
//!         - Equipment sampling
//!         - Captain processing:
//!             - Waypoint arrival and advancement
//!             - Course and power calculation
//!         - Helm dispatch
//!         - Archiving
//!
//! # Usage
//!
//! `boat_exec [script_path]`. With a script the exec runs until the end of
//! the script, without one it runs until the mission is complete.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{debug, error, info, warn};
use std::env;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use boat_lib::{
    captain::Captain,
    data_store::{DataStore, SafeModeCause},
    eqpt::{self, RemoteData, SensorData},
    mission_store::FileMissionStore,
    params::BoatExecParams,
    sim::{SimBoat, SimParams},
    tc_processor,
    waypoint::{WaypointStore, WaypointTable},
};
use util::{
    archive::Archived,
    host,
    logger::{logger_init, LevelFilter},
    module::State,
    script_interpreter::{PendingTcs, ScriptInterpreter},
    session::{self, Session},
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("boat_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Boat Executable\n");
    info!("Running on: {}", host::get_platform());
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: BoatExecParams =
        util::params::load("boat_exec.toml").wrap_err("Could not load exec params")?;
    let sim_params: SimParams =
        util::params::load("sim_boat.toml").wrap_err("Could not load sim params")?;

    let sw_root = host::get_boat_sw_root().wrap_err("Could not find the software root")?;

    info!("Exec parameters loaded");

    // ---- INITIALISE TC SOURCE ----

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    let mut tc_source = match args.len() {
        // If we have a single argument use it as the script path
        2 => {
            info!("Loading script from \"{}\"", &args[1]);

            let si = ScriptInterpreter::new(&args[1]).wrap_err("Failed to load script")?;

            info!(
                "Loaded script lasts {:.02} s and contains {} TCs\n",
                si.get_duration(),
                si.get_num_tcs()
            );

            TcSource::Script(si)
        }
        1 => {
            info!("No script provided, running the mission until it is complete\n");
            TcSource::None
        }
        n => {
            return Err(eyre!(
                "Expected either zero or one argument, found {}",
                n - 1
            ))
        }
    };

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let waypoints = WaypointTable::load(sw_root.join(&exec_params.waypoint_table))
        .wrap_err("Failed to load the waypoint table")?;
    info!(
        "Waypoint table loaded, mission has {} waypoints",
        waypoints.num_provisioned()
    );

    let persistence = FileMissionStore::new(sw_root.join(&exec_params.mission_state));

    let mut captain =
        Captain::new(waypoints, persistence).wrap_err("Failed to create the Captain")?;
    captain
        .init("captain.toml", &session)
        .wrap_err("Failed to initialise the Captain")?;
    info!("Captain init complete");

    let mut boat = SimBoat::new(sim_params);
    info!("SimBoat init complete");

    let mut ds = DataStore::default();

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    let cycle_period = Duration::from_secs_f64(exec_params.cycle_period_s);
    let cycle_frequency_hz = 1.0 / exec_params.cycle_period_s;
    let mut last_cycle_time_s: Option<f64> = None;

    info!("Begining main loop\n");

    loop {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(cycle_frequency_hz, session::get_elapsed_seconds());

        // ---- SIMULATION ----

        if let Some(t) = last_cycle_time_s {
            boat.step(ds.time_s - t);
        }
        last_cycle_time_s = Some(ds.time_s);

        // ---- TELECOMMAND PROCESSING ----

        match tc_source {
            TcSource::None => (),
            TcSource::Script(ref mut si) => match si.get_pending_tcs(ds.time_s) {
                PendingTcs::None => (),
                PendingTcs::Some(tcs) => {
                    for tc in tcs.iter() {
                        debug!("Executing TC {:?}", tc);
                        if let Err(e) = tc_processor::exec(&mut ds, &mut captain, tc) {
                            warn!("Could not execute {:?}: {}", tc, e);
                        }
                    }
                }
                PendingTcs::EndOfScript => {
                    info!("End of script reached, stopping");
                    break;
                }
            },
        }

        // ---- DATA INPUT ----

        ds.set_captain_input(SensorData::sample(&boat), RemoteData::sample(&boat));

        // ---- CAPTAIN PROCESSING ----

        match captain.proc(&ds.captain_input) {
            Ok((cmd, rpt)) => {
                ds.captain_output = Some(cmd);
                ds.captain_status_rpt = rpt;
            }
            Err(e) => {
                error!("Error during Captain processing: {}", e);
                ds.make_safe(SafeModeCause::CaptainError);
                captain.make_safe();
            }
        }

        // ---- HELM ----

        if let Some(ref cmd) = ds.captain_output {
            eqpt::dispatch(&mut boat, cmd);
        }

        // ---- WRITE ARCHIVES ----

        if let Err(e) = captain.write() {
            warn!("Could not write the Captain archive: {}", e);
        }

        if ds.is_1_hz_cycle {
            let rpt = &ds.captain_status_rpt;
            info!(
                "Waypoint {} at {}, course {:.1} deg, power {:.2}{}",
                rpt.current_index,
                match rpt.distance_to_waypoint_m {
                    Some(d) => format!("{:.1} m", d),
                    None => String::from("unknown range"),
                },
                rpt.desired_course_rad.to_degrees(),
                rpt.desired_power,
                if ds.safe { " (SAFE)" } else { "" }
            );
        }

        // ---- MISSION END ----

        if let TcSource::None = tc_source {
            if !captain.mission().waypoint.is_set() {
                info!("Mission complete");
                break;
            }
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            }
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
                );
                ds.num_consec_cycle_overruns += 1;

                if exec_params.max_consec_cycle_overruns > 0
                    && ds.num_consec_cycle_overruns > exec_params.max_consec_cycle_overruns
                {
                    return Err(eyre!(
                        "More than {} consecutive cycle overruns",
                        exec_params.max_consec_cycle_overruns
                    ));
                }
            }
        }

        // Increment cycle counter
        ds.num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    info!("End of execution");

    Ok(())
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Various sources for the telecommands incoming to the exec.
enum TcSource {
    None,
    Script(ScriptInterpreter),
}
