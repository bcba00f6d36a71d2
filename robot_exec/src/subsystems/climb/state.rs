//! Implementations for the Climb state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use comms_if::eqpt::{Actuator, SolenoidPosition};
use serde::Serialize;

// Internal
use super::{Params, GROUP_NAME, SOLENOID_NAME};
use crate::data_store::DataStore;
use crate::eqpt::{ActuatorHandle, OutputKind};
use crate::sched::{Command, GroupId, Scheduler, SchedulerError};
use util::module::Subsystem;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Climb subsystem state
pub struct Climb {
    params: Params,

    group: GroupId,

    solenoid: ActuatorHandle,
}

/// Status report for the climb subsystem.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatusReport {
    pub deployed: bool,
    pub solenoid: Option<SolenoidPosition>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Climb {
    /// Create the subsystem, registering its resource group with the scheduler.
    pub fn new(
        params: Params,
        solenoid: Box<dyn Actuator>,
        scheduler: &mut Scheduler<DataStore>,
    ) -> Result<Self, SchedulerError> {
        let group = scheduler.add_group(GROUP_NAME, &[SOLENOID_NAME])?;

        Ok(Self {
            params,
            group,
            solenoid: ActuatorHandle::new(SOLENOID_NAME, OutputKind::Solenoid, solenoid),
        })
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    /// Returns `true` if the climber was last commanded to deploy.
    pub fn is_deployed(&self) -> bool {
        self.solenoid.position() == Some(self.params.deployed_position)
    }

    /// Hold the climber deployed for as long as the command runs.
    pub fn climb(&self) -> Command<DataStore> {
        let deployed = self.params.deployed_position;

        Command::run("climb", &[self.group], move |ds: &mut DataStore| {
            ds.climb.solenoid.set_position(deployed)
        })
    }

    /// Retract the climber.
    pub fn stop(&self) -> Command<DataStore> {
        let retracted = self.params.retracted_position;

        Command::run_once("climb_stop", &[self.group], move |ds: &mut DataStore| {
            ds.climb.solenoid.set_position(retracted)
        })
    }
}

impl Subsystem for Climb {
    type StatusReport = StatusReport;

    fn name(&self) -> &'static str {
        GROUP_NAME
    }

    /// The climber has no sensors.
    fn sample(&mut self, _now_s: f64) {}

    fn make_safe(&mut self) {
        self.solenoid.make_safe();
    }

    fn status_report(&self) -> Self::StatusReport {
        StatusReport {
            deployed: self.is_deployed(),
            solenoid: self.solenoid.position(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::Rig;
    use comms_if::eqpt::ActuatorValue;

    #[test]
    fn test_stop_preempts_climb() {
        let mut rig = Rig::new();
        let climb = rig.register(rig.ds.climb.climb());
        let stop = rig.register(rig.ds.climb.stop());

        rig.schedule(climb);
        rig.step();
        assert!(rig.ds.climb.is_deployed());
        assert_eq!(
            rig.plant.climb_solenoid().last(),
            Some(ActuatorValue::Position(SolenoidPosition::Forward))
        );

        rig.schedule(stop);
        assert!(!rig.scheduler.is_scheduled(climb));
        rig.step();

        assert!(!rig.scheduler.is_scheduled(stop));
        assert_eq!(
            rig.plant.climb_solenoid().last(),
            Some(ActuatorValue::Position(SolenoidPosition::Reverse))
        );
        assert!(!rig.ds.climb.status_report().deployed);
    }
}
