//! Implementations for the Pneumatics state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use comms_if::eqpt::Actuator;
use serde::Serialize;

// Internal
use super::{COMPRESSOR_NAME, GROUP_NAME};
use crate::data_store::DataStore;
use crate::eqpt::{ActuatorHandle, OutputKind};
use crate::sched::{Command, GroupId, Scheduler, SchedulerError};
use util::module::Subsystem;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

pub struct Pneumatics {
    group: GroupId,
    compressor: ActuatorHandle,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusReport {
    pub compressor_enabled: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pneumatics {
    pub fn new(
        compressor: Box<dyn Actuator>,
        scheduler: &mut Scheduler<DataStore>,
    ) -> Result<Self, SchedulerError> {
        let group = scheduler.add_group(GROUP_NAME, &[COMPRESSOR_NAME])?;

        Ok(Self {
            group,
            compressor: ActuatorHandle::new(COMPRESSOR_NAME, OutputKind::Motor, compressor),
        })
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn compressor_enabled(&self) -> bool {
        self.compressor.is_active()
    }

    /// Enable the compressor while the command runs.
    pub fn run_compressor(&self) -> Command<DataStore> {
        Command::start_end(
            "run_compressor",
            &[self.group],
            |ds: &mut DataStore| ds.pneumatics.compressor.set_power(1.0),
            |ds: &mut DataStore| ds.pneumatics.compressor.set_power(0.0),
        )
    }
}

impl Subsystem for Pneumatics {
    type StatusReport = StatusReport;

    fn name(&self) -> &'static str {
        GROUP_NAME
    }

    fn sample(&mut self, _now_s: f64) {}

    fn make_safe(&mut self) {
        self.compressor.make_safe();
    }

    fn status_report(&self) -> Self::StatusReport {
        StatusReport {
            compressor_enabled: self.compressor_enabled(),
        }
    }
}
