//! Implementations for the Intake state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use comms_if::eqpt::{Actuator, AnalogSensor, Sensor};
use serde::Serialize;

// Internal
use super::{Params, CURRENT_SENSOR_NAME, GROUP_NAME, PIECE_SENSOR_NAME, ROLLER_NAME};
use crate::data_store::DataStore;
use crate::eqpt::{ActuatorHandle, AnalogInput, DebouncedSignal, Debouncer, OutputKind};
use crate::sched::{Command, CommandId, Functional, GroupId, Scheduler, SchedulerError, Trigger};
use util::module::Subsystem;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Intake subsystem state
pub struct Intake {
    params: Params,

    group: GroupId,

    roller: ActuatorHandle,

    /// Debounced "piece present" signal, from an active-low beam break.
    piece: DebouncedSignal,

    roller_current: AnalogInput,

    state: IntakeState,
}

/// Status report for the intake subsystem.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusReport {
    pub state: IntakeState,
    pub has_piece: bool,
    pub roller_power: f64,
    pub roller_current_a: f64,
    pub piece_sensor_faulted: bool,
    pub current_sensor_faulted: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IntakeState {
    Idle,
    Intaking,
    Scoring,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Intake {
    /// Create the subsystem, registering its resource group with the scheduler.
    pub fn new(
        params: Params,
        roller: Box<dyn Actuator>,
        piece_sensor: Box<dyn Sensor>,
        current_sensor: Box<dyn AnalogSensor>,
        scheduler: &mut Scheduler<DataStore>,
    ) -> Result<Self, SchedulerError> {
        let group = scheduler.add_group(GROUP_NAME, &[ROLLER_NAME])?;

        let piece = DebouncedSignal::new(
            PIECE_SENSOR_NAME,
            piece_sensor,
            Debouncer::asymmetric(
                params.piece_rising_debounce_s,
                params.piece_falling_debounce_s,
            ),
        )
        .inverted();

        Ok(Self {
            params,
            group,
            roller: ActuatorHandle::new(ROLLER_NAME, OutputKind::Motor, roller),
            piece,
            roller_current: AnalogInput::new(CURRENT_SENSOR_NAME, current_sensor),
            state: IntakeState::Idle,
        })
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn state(&self) -> IntakeState {
        self.state
    }

    /// Returns `true` if the (debounced) piece sensor reports a piece.
    pub fn has_piece(&self) -> bool {
        self.piece.read()
    }

    pub fn roller_power(&self) -> f64 {
        self.roller.power()
    }

    pub fn roller_current_a(&self) -> f64 {
        self.roller_current.value()
    }

    fn set_roller(&mut self, power: f64, state: IntakeState) {
        self.roller.set_power(power);
        self.state = state;
    }

    // ---- COMMANDS ----

    /// Run the roller inwards until a piece is detected, then schedule `on_piece`.
    ///
    /// Does nothing if a piece is already held when the command starts. `on_piece` is only
    /// scheduled if the intake finishes by detecting a piece, not if it is interrupted.
    pub fn intake(&self, on_piece: CommandId) -> Command<DataStore> {
        let power = self.params.intake_power;

        let run_roller = Command::functional(
            "intake",
            &[self.group],
            Functional::new()
                .on_start(|ds: &mut DataStore| ds.intake.state = IntakeState::Intaking)
                .on_execute(move |ds: &mut DataStore| {
                    ds.intake.set_roller(power, IntakeState::Intaking)
                })
                .on_end(|ds: &mut DataStore, _| ds.intake.set_roller(0.0, IntakeState::Idle)),
        )
        .until(|ds| ds.intake.has_piece())
        .then_schedule(on_piece);

        Command::either(
            "intake",
            |ds: &DataStore| ds.intake.has_piece(),
            Command::none(),
            run_roller,
        )
    }

    /// Run the roller outwards for as long as a piece is held.
    pub fn score_coral(&self) -> Command<DataStore> {
        let power = self.params.score_power;

        Command::functional(
            "score_coral",
            &[self.group],
            Functional::new()
                .on_start(|ds: &mut DataStore| ds.intake.state = IntakeState::Scoring)
                .on_execute(move |ds: &mut DataStore| {
                    ds.intake.set_roller(power, IntakeState::Scoring)
                })
                .on_end(|ds: &mut DataStore, _| ds.intake.set_roller(0.0, IntakeState::Idle)),
        )
        .only_while(|ds| ds.intake.has_piece())
    }

    /// Stop the roller.
    pub fn stop(&self) -> Command<DataStore> {
        Command::run_once("intake_stop", &[self.group], |ds: &mut DataStore| {
            ds.intake.set_roller(0.0, IntakeState::Idle)
        })
    }

    /// Hold the roller stopped. Used as the default command of the intake group.
    pub fn idle(&self) -> Command<DataStore> {
        Command::run("intake_idle", &[self.group], |ds: &mut DataStore| {
            ds.intake.set_roller(0.0, IntakeState::Idle)
        })
    }

    // ---- TRIGGERS ----

    /// True while the roller current has been over the jam threshold for the jam debounce time.
    pub fn jammed(&self) -> Trigger<DataStore> {
        let threshold_a = self.params.jam_current_a;

        Trigger::new(move |ds: &DataStore| ds.intake.roller_current_a() > threshold_a)
            .debounce(self.params.jam_debounce_s)
    }

    /// True while a piece is held.
    pub fn piece_present(&self) -> Trigger<DataStore> {
        Trigger::new(|ds: &DataStore| ds.intake.has_piece())
    }
}

impl Subsystem for Intake {
    type StatusReport = StatusReport;

    fn name(&self) -> &'static str {
        GROUP_NAME
    }

    fn sample(&mut self, now_s: f64) {
        self.piece.sample(now_s);
        self.roller_current.sample();
    }

    fn make_safe(&mut self) {
        self.roller.make_safe();
        self.state = IntakeState::Idle;
    }

    fn status_report(&self) -> Self::StatusReport {
        StatusReport {
            state: self.state,
            has_piece: self.has_piece(),
            roller_power: self.roller.power(),
            roller_current_a: self.roller_current.value(),
            piece_sensor_faulted: self.piece.is_faulted(),
            current_sensor_faulted: self.roller_current.is_faulted(),
        }
    }
}
