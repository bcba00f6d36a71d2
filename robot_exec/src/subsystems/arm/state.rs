//! Implementations for the Arm state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use comms_if::eqpt::{Actuator, Sensor, SolenoidPosition};
use serde::Serialize;

// Internal
use super::{Params, GROUP_NAME, LIMIT_SWITCH_NAME, SOLENOID_NAME};
use crate::data_store::DataStore;
use crate::eqpt::{ActuatorHandle, DebouncedSignal, Debouncer, OutputKind};
use crate::sched::{Command, GroupId, Scheduler, SchedulerError};
use util::module::Subsystem;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Arm subsystem state
pub struct Arm {
    params: Params,

    group: GroupId,

    solenoid: ActuatorHandle,

    at_score: DebouncedSignal,
}

/// Status report for the arm subsystem.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusReport {
    pub position: ArmPosition,
    pub solenoid: Option<SolenoidPosition>,
    pub limit_faulted: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The two positions of the arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArmPosition {
    Intake,
    Score,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ArmPosition {
    /// The solenoid position that moves the arm here.
    pub fn solenoid_position(self) -> SolenoidPosition {
        match self {
            ArmPosition::Intake => SolenoidPosition::Forward,
            ArmPosition::Score => SolenoidPosition::Reverse,
        }
    }
}

impl Arm {
    /// Create the subsystem, registering its resource group with the scheduler.
    pub fn new(
        params: Params,
        solenoid: Box<dyn Actuator>,
        limit_switch: Box<dyn Sensor>,
        scheduler: &mut Scheduler<DataStore>,
    ) -> Result<Self, SchedulerError> {
        let group = scheduler.add_group(GROUP_NAME, &[SOLENOID_NAME])?;

        let at_score = DebouncedSignal::new(
            LIMIT_SWITCH_NAME,
            limit_switch,
            Debouncer::new(params.limit_debounce_s),
        );

        Ok(Self {
            params,
            group,
            solenoid: ActuatorHandle::new(SOLENOID_NAME, OutputKind::Solenoid, solenoid),
            at_score,
        })
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    /// The position reported by the limit switch.
    ///
    /// A faulted switch reads as not in the score position.
    pub fn position(&self) -> ArmPosition {
        if self.at_score.read() {
            ArmPosition::Score
        } else {
            ArmPosition::Intake
        }
    }

    /// Whether the arm is known to be at `position`.
    ///
    /// Always `false` while the limit switch is faulted, so that a move is never skipped on a
    /// reading that can't be trusted.
    pub fn is_at(&self, position: ArmPosition) -> bool {
        !self.at_score.is_faulted() && self.position() == position
    }

    /// Move the arm to the intake position.
    pub fn intake_position(&self) -> Command<DataStore> {
        self.move_to(ArmPosition::Intake, "arm_intake_position")
    }

    /// Move the arm to the score position.
    pub fn score_position(&self) -> Command<DataStore> {
        self.move_to(ArmPosition::Score, "arm_score_position")
    }

    fn move_to(&self, target: ArmPosition, name: &str) -> Command<DataStore> {
        let solenoid_position = target.solenoid_position();

        let actuate = Command::sequence(
            name,
            vec![
                Command::run_once(name, &[self.group], move |ds: &mut DataStore| {
                    ds.arm.solenoid.set_position(solenoid_position)
                }),
                Command::wait(self.params.settle_s),
            ],
        );

        Command::either(
            name,
            move |ds: &DataStore| ds.arm.is_at(target),
            Command::none(),
            actuate,
        )
        .requiring(self.group)
        .with_timeout(self.params.move_timeout_s)
    }
}

impl Subsystem for Arm {
    type StatusReport = StatusReport;

    fn name(&self) -> &'static str {
        GROUP_NAME
    }

    fn sample(&mut self, now_s: f64) {
        self.at_score.sample(now_s);
    }

    fn make_safe(&mut self) {
        self.solenoid.make_safe();
    }

    fn status_report(&self) -> Self::StatusReport {
        StatusReport {
            position: self.position(),
            solenoid: self.solenoid.position(),
            limit_faulted: self.at_score.is_faulted(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::Rig;
    use comms_if::eqpt::ActuatorValue;

    #[test]
    fn test_move_to_current_position_is_noop() {
        let mut rig = Rig::new();
        rig.step();
        assert!(rig.ds.arm.is_at(ArmPosition::Score));

        let score = rig.register(rig.ds.arm.score_position());
        rig.schedule(score);
        rig.step();

        assert!(!rig.scheduler.is_scheduled(score));
        assert_eq!(rig.plant.arm_solenoid().num_writes(), 0);
    }

    #[test]
    fn test_move_finishes_after_settle() {
        let mut rig = Rig::new();
        let intake = rig.register(rig.ds.arm.intake_position());

        // Scheduled on cycle zero
        rig.sample();
        rig.schedule(intake);
        assert_eq!(rig.plant.arm_solenoid().num_writes(), 1);
        assert_eq!(
            rig.plant.arm_solenoid().last(),
            Some(ActuatorValue::Position(SolenoidPosition::Forward))
        );

        // ceil(0.3 / 0.02) = 15
        for cycle in 0..15 {
            rig.step();
            assert!(rig.scheduler.is_scheduled(intake), "finished at cycle {}", cycle);
        }
        rig.step();
        assert!(!rig.scheduler.is_scheduled(intake));

        assert_eq!(rig.plant.arm_solenoid().num_writes(), 1);
        assert!(rig.ds.arm.is_at(ArmPosition::Intake));
    }

    #[test]
    fn test_faulted_limit_switch_reads_intake() {
        let mut rig = Rig::new();
        rig.step();
        assert_eq!(rig.ds.arm.position(), ArmPosition::Score);

        rig.plant
            .arm_sensor()
            .set_fault(Some(comms_if::eqpt::SensorError::NotConnected));
        rig.step();

        assert_eq!(rig.ds.arm.position(), ArmPosition::Intake);
        assert!(!rig.ds.arm.is_at(ArmPosition::Intake));
        assert!(!rig.ds.arm.is_at(ArmPosition::Score));
        assert!(rig.ds.arm.status_report().limit_faulted);
    }

    #[test]
    fn test_faulted_limit_switch_still_moves_and_settles() {
        let mut rig = Rig::new();
        let intake = rig.register(rig.ds.arm.intake_position());

        rig.step();
        rig.plant
            .arm_sensor()
            .set_fault(Some(comms_if::eqpt::SensorError::NotConnected));
        rig.sample();

        rig.schedule(intake);
        assert_eq!(rig.plant.arm_solenoid().num_writes(), 1);
        assert_eq!(
            rig.plant.arm_solenoid().last(),
            Some(ActuatorValue::Position(SolenoidPosition::Forward))
        );

        for _ in 0..15 {
            rig.step();
            assert!(rig.scheduler.is_scheduled(intake));
        }
        rig.step();
        assert!(!rig.scheduler.is_scheduled(intake));
    }
}
