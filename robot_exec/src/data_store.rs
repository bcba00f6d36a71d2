//! # Data Store
//!
//! The data store is the context every command, trigger and telecommand acts on. It owns every
//! subsystem for the lifetime of the executable, along with the operator input state and safe
//! mode.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::collections::BTreeSet;

use comms_if::{
    eqpt::{Actuator, AnalogSensor, Sensor},
    tc::ButtonId,
};
use log::{info, warn};
use util::module::Subsystem;

use crate::{
    eqpt::{ActuatorHandle, OutputKind},
    params::RobotParams,
    sched::{GroupId, Scheduler, SchedulerError},
    subsystems::{arm::Arm, climb::Climb, intake::Intake, pneumatics::Pneumatics},
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Name of the operator feedback resource group.
pub const FEEDBACK_GROUP_NAME: &str = "operator_feedback";

/// Name of the operator controller's rumble output.
pub const RUMBLE_NAME: &str = "operator_rumble";

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Gives the reason the robot has been put into safe mode
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum SafeModeCause {
    MakeSafeTc,
    CycleOverruns,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Drivers for every piece of robot equipment.
pub struct Hardware {
    pub climb_solenoid: Box<dyn Actuator>,
    pub arm_solenoid: Box<dyn Actuator>,
    pub arm_sensor: Box<dyn Sensor>,
    pub roller_motor: Box<dyn Actuator>,
    pub piece_sensor: Box<dyn Sensor>,
    pub roller_current: Box<dyn AnalogSensor>,
    pub compressor: Box<dyn Actuator>,
    pub rumble: Box<dyn Actuator>,
}

/// Global data store for the executable.
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u64,

    /// Time of the current cycle
    pub time_s: f64,

    // Safe mode variables
    /// Determines if the robot is in safe mode.
    pub safe: bool,

    /// Gives the reason for the robot being in safe mode.
    pub safe_cause: Option<SafeModeCause>,

    // Operator input
    /// Buttons currently held down.
    pub buttons: BTreeSet<ButtonId>,

    /// Time the match started, if it has.
    pub match_start_s: Option<f64>,

    pub match_length_s: f64,

    // Subsystems
    pub climb: Climb,
    pub arm: Arm,
    pub intake: Intake,
    pub pneumatics: Pneumatics,

    // Operator feedback
    pub feedback_group: GroupId,
    pub rumble: ActuatorHandle,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl DataStore {
    /// Build the data store, creating every subsystem and registering their resource groups.
    pub fn new(
        hardware: Hardware,
        params: &RobotParams,
        scheduler: &mut Scheduler<DataStore>,
    ) -> Result<Self, SchedulerError> {
        let climb = Climb::new(params.climb.clone(), hardware.climb_solenoid, scheduler)?;
        let arm = Arm::new(
            params.arm.clone(),
            hardware.arm_solenoid,
            hardware.arm_sensor,
            scheduler,
        )?;
        let intake = Intake::new(
            params.intake.clone(),
            hardware.roller_motor,
            hardware.piece_sensor,
            hardware.roller_current,
            scheduler,
        )?;
        let pneumatics = Pneumatics::new(hardware.compressor, scheduler)?;
        let feedback_group = scheduler.add_group(FEEDBACK_GROUP_NAME, &[RUMBLE_NAME])?;

        Ok(Self {
            num_cycles: 0,
            time_s: 0.0,
            safe: false,
            safe_cause: None,
            buttons: BTreeSet::new(),
            match_start_s: None,
            match_length_s: params.exec.match_length_s,
            climb,
            arm,
            intake,
            pneumatics,
            feedback_group,
            rumble: ActuatorHandle::new(RUMBLE_NAME, OutputKind::Motor, hardware.rumble),
            num_consec_cycle_overruns: 0,
        })
    }

    /// Puts the robot into safe mode with the given cause.
    ///
    /// Every actuator is driven to its neutral value. Commands must be cancelled separately, before
    /// this is called, so that their end actions cannot drive anything afterwards.
    pub fn make_safe(&mut self, cause: SafeModeCause) {
        if !self.safe {
            warn!("Make safe requested, cause: {:?}", cause);
            self.safe = true;
            self.safe_cause = Some(cause);
        }

        self.climb.make_safe();
        self.arm.make_safe();
        self.intake.make_safe();
        self.pneumatics.make_safe();
        self.rumble.make_safe();
    }

    /// Attempts to disable the safe mode by clearing the given cause.
    ///
    /// To remove safe mode the provided cause must match the initial reason for safe mode being
    /// enabled, otherwise the root cause is returned as the error. If safe mode was not enabled
    /// `Ok(())` is returned.
    pub fn make_unsafe(&mut self, cause: SafeModeCause) -> Result<(), SafeModeCause> {
        if !self.safe {
            return Ok(());
        }

        match self.safe_cause {
            Some(root_cause) if root_cause != cause => Err(root_cause),
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
    /// Sets the cycle time and samples every subsystem's sensors, so that all triggers and
    /// commands in the cycle see the same inputs.
    pub fn cycle_start(&mut self, now_s: f64) {
        self.time_s = now_s;

        self.climb.sample(now_s);
        self.arm.sample(now_s);
        self.intake.sample(now_s);
        self.pneumatics.sample(now_s);
    }

    pub fn is_pressed(&self, button: ButtonId) -> bool {
        self.buttons.contains(&button)
    }

    /// Time left in the match, or `None` if no match is running.
    pub fn match_remaining_s(&self) -> Option<f64> {
        self.match_start_s
            .map(|start_s| (self.match_length_s - (self.time_s - start_s)).max(0.0))
    }
}
