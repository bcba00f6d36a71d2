//! Main robot-side executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all subsystems and bind all commands
//!     - Main loop:
//!         - System input acquisition:
//!             - Plant update (simulation)
//!             - Sensor sampling and debouncing
//!         - Telecommand processing and handling
//!         - Command scheduling:
//!             - Trigger polling
//!             - Command execution and arbitration
//!         - Telemetry
//!
//! # Usage
//!
//! `robot_exec [script]`. With a script the operator's TCs are replayed from it and execution
//! stops at the end of the script. Without one the robot runs with no operator input, for the
//! run duration given in `exec.toml` if there is one.

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
use robot_lib::{
    bindings::Bindings,
    data_store::{DataStore, SafeModeCause},
    params::RobotParams,
    sched::Scheduler,
    sim, tc_processor,
    tm_server::{TmPacket, TmServer},
};
use util::{
    logger::{logger_init, LevelFilter},
    script_interpreter::{PendingTcs, ScriptInterpreter},
    session::{self, Session},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of consecutive cycle overruns after which safe mode is engaged.
const MAX_CONSEC_CYCLE_OVERRUNS: u64 = 50;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("robot_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    // The plant logs every simulated transition
    logger_init(
        LevelFilter::Debug,
        &[("robot_lib::sim", LevelFilter::Info)],
        &session,
    )
    .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Robot Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let params = RobotParams::load().wrap_err("Could not load parameters")?;
    let cycle_period = Duration::from_secs_f64(params.exec.cycle_period_s);

    info!("Exec parameters loaded");

    // ---- INITIALISE TC SOURCE ----

    let mut tc_source = TcSource::None;

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    // If we have a single argument use it as the script path
    if args.len() == 2 {
        info!("Loading script from \"{}\"", &args[1]);

        let si = ScriptInterpreter::new(&args[1]).wrap_err("Failed to load script")?;

        info!(
            "Loaded script lasts {:.02} s and contains {} TCs\n",
            si.get_duration(),
            si.get_num_tcs()
        );

        tc_source = TcSource::Script(si);
    } else if args.len() == 1 {
        info!("No script provided, running without operator input\n");
    } else {
        return Err(eyre!(
            "Expected either zero or one argument, found {}",
            args.len() - 1
        ));
    }

    // ---- INITIALISE DATASTORE AND SUBSYSTEMS ----

    info!("Initialising subsystems...");

    let (hardware, mut plant) = sim::build(params.sim.clone());
    let mut scheduler = Scheduler::new();

    let mut ds = DataStore::new(hardware, &params, &mut scheduler)
        .wrap_err("Failed to initialise subsystems")?;

    Bindings::configure(&mut scheduler, &ds, &params.exec)
        .wrap_err("Failed to configure operator bindings")?;

    info!("Subsystem initialisation complete\n");

    let mut tm_server = TmServer::new(session.file_path("tm.jsonl"))
        .wrap_err("Failed to initialise TmServer")?;

    // ---- MAIN LOOP ----

    info!("Beginning main loop\n");

    loop {
        // Get cycle start time
        let cycle_start_instant = Instant::now();
        let now_s = session::get_elapsed_seconds();

        if let Some(run_duration_s) = params.exec.run_duration_s {
            if now_s >= run_duration_s {
                info!("Run duration of {:.02} s reached, stopping", run_duration_s);
                break;
            }
        }

        // ---- DATA INPUT ----

        plant.update(now_s);
        ds.cycle_start(now_s);

        // ---- TELECOMMAND PROCESSING ----

        match tc_source {
            TcSource::None => (),
            TcSource::Script(ref mut si) => match si.get_pending_tcs(now_s) {
                PendingTcs::None => (),
                PendingTcs::Some(tc_vec) => {
                    for tc in tc_vec.iter() {
                        tc_processor::exec(&mut ds, &mut scheduler, tc);
                    }
                }
                // Exit if end of script reached
                PendingTcs::EndOfScript => {
                    info!("End of TC script reached, stopping");
                    break;
                }
            },
        }

        // ---- COMMAND SCHEDULING ----

        if !ds.safe {
            scheduler.run(&mut ds, now_s);
        }

        // ---- TELEMETRY ----

        tm_server.publish(&TmPacket::from_datastore(&ds, &scheduler));

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

                if ds.num_consec_cycle_overruns > MAX_CONSEC_CYCLE_OVERRUNS && !ds.safe {
                    error!(
                        "More than {} consecutive cycle overruns",
                        MAX_CONSEC_CYCLE_OVERRUNS
                    );
                    scheduler.cancel_all(&mut ds);
                    ds.make_safe(SafeModeCause::CycleOverruns);
                }
            }
        }

        // Increment cycle counter
        ds.num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    scheduler.cancel_all(&mut ds);
    ds.make_safe(SafeModeCause::MakeSafeTc);

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
