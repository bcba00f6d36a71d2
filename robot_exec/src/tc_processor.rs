//! # Telecommand processor module
//!
//! The telecommand processor handles various TCs coming from any source.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, warn};

// Internal
use crate::data_store::{DataStore, SafeModeCause};
use crate::sched::Scheduler;
use comms_if::tc::Tc;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Outcome of executing a telecommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TcResponse {
    Ok,

    /// The TC was rejected because the robot is in safe mode.
    CannotExecute,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute a telecommand.
///
/// While in safe mode only `MakeUnsafe` is accepted. Making the robot safe cancels every running
/// command before driving all actuators to neutral.
pub fn exec(
    ds: &mut DataStore,
    scheduler: &mut Scheduler<DataStore>,
    tc: &Tc,
) -> TcResponse {
    if ds.safe {
        match tc {
            Tc::MakeUnsafe => (),
            _ => {
                warn!("Rejected {:?} while in safe mode", tc);
                return TcResponse::CannotExecute;
            }
        }
    }

    // Handle different Tcs
    match tc {
        Tc::MakeSafe => {
            debug!("Received MakeSafe command");
            scheduler.cancel_all(ds);
            ds.make_safe(SafeModeCause::MakeSafeTc);
        }
        Tc::MakeUnsafe => {
            debug!("Received MakeUnsafe command");
            if let Err(root_cause) = ds.make_unsafe(SafeModeCause::MakeSafeTc) {
                warn!(
                    "Cannot leave safe mode, it was entered because of {:?}",
                    root_cause
                );
            }
        }
        Tc::Button { button, pressed } => {
            debug!("{:?} {}", button, if *pressed { "pressed" } else { "released" });
            if *pressed {
                ds.buttons.insert(*button);
            } else {
                ds.buttons.remove(button);
            }
        }
        Tc::MatchStart { length_s } => {
            info!("Match started, {:.1} s long", length_s);
            ds.match_start_s = Some(ds.time_s);
            ds.match_length_s = *length_s;
        }
    }

    TcResponse::Ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::Rig;
    use comms_if::tc::ButtonId;

    #[test]
    fn test_buttons_tracked() {
        let mut rig = Rig::new();
        let press = Tc::Button {
            button: ButtonId::OperatorA,
            pressed: true,
        };
        let release = Tc::Button {
            button: ButtonId::OperatorA,
            pressed: false,
        };

        assert_eq!(exec(&mut rig.ds, &mut rig.scheduler, &press), TcResponse::Ok);
        assert!(rig.ds.is_pressed(ButtonId::OperatorA));

        exec(&mut rig.ds, &mut rig.scheduler, &release);
        assert!(!rig.ds.is_pressed(ButtonId::OperatorA));
    }

    #[test]
    fn test_safe_mode_rejects_tcs() {
        let mut rig = Rig::new();
        let climb = rig.register(rig.ds.climb.climb());
        rig.schedule(climb);
        rig.step();

        exec(&mut rig.ds, &mut rig.scheduler, &Tc::MakeSafe);
        assert!(rig.ds.safe);
        assert!(!rig.scheduler.is_scheduled(climb));
        assert!(!rig.ds.climb.is_deployed());

        let press = Tc::Button {
            button: ButtonId::DriverY,
            pressed: true,
        };
        assert_eq!(
            exec(&mut rig.ds, &mut rig.scheduler, &press),
            TcResponse::CannotExecute
        );
        assert!(rig.ds.buttons.is_empty());

        assert_eq!(
            exec(&mut rig.ds, &mut rig.scheduler, &Tc::MakeUnsafe),
            TcResponse::Ok
        );
        assert!(!rig.ds.safe);
    }

    #[test]
    fn test_match_start() {
        let mut rig = Rig::new();
        rig.ds.cycle_start(3.0);

        exec(
            &mut rig.ds,
            &mut rig.scheduler,
            &Tc::MatchStart { length_s: 135.0 },
        );

        assert_eq!(rig.ds.match_start_s, Some(3.0));
        assert_eq!(rig.ds.match_remaining_s(), Some(135.0));
    }
}
