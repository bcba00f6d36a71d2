//! # Operator bindings
//!
//! Registers every command the robot runs and binds them to their triggers:
//!
//! | Trigger                          | Command                                  |
//! |----------------------------------|------------------------------------------|
//! | Driver Y                         | Climb                                    |
//! | Driver A                         | Retract climber                          |
//! | Operator A                       | Stop intake                              |
//! | Operator X or right trigger      | Score                                    |
//! | Operator left trigger            | Arm to intake position, then intake      |
//! | Operator Y                       | Arm to score position                    |
//! | Operator B                       | Arm to intake position                   |
//! | Endgame warning time reached     | Rumble the operator controller           |
//! | Roller current over jam limit    | Stop intake                              |
//!
//! The intake group defaults to holding the roller stopped and the pneumatics group defaults to
//! running the compressor.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::tc::ButtonId;
use log::info;

use crate::data_store::DataStore;
use crate::params::ExecParams;
use crate::sched::{Command, CommandId, Scheduler, SchedulerError, Trigger};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// IDs of every registered command.
#[derive(Debug, Clone, Copy)]
pub struct Bindings {
    pub climb: CommandId,
    pub climb_stop: CommandId,

    pub arm_intake_position: CommandId,
    pub arm_score_position: CommandId,

    pub intake: CommandId,
    pub arm_then_intake: CommandId,
    pub score_coral: CommandId,
    pub intake_stop: CommandId,
    pub intake_idle: CommandId,

    pub run_compressor: CommandId,

    pub endgame_rumble: CommandId,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Bindings {
    /// Register and bind every command.
    ///
    /// Any error here is a configuration error, and the scheduler must not be run.
    pub fn configure(
        scheduler: &mut Scheduler<DataStore>,
        ds: &DataStore,
        params: &ExecParams,
    ) -> Result<Self, SchedulerError> {
        // ---- COMMANDS ----

        let climb = scheduler.register(ds.climb.climb())?;
        let climb_stop = scheduler.register(ds.climb.stop())?;

        let arm_intake_position = scheduler.register(ds.arm.intake_position())?;
        let arm_score_position = scheduler.register(ds.arm.score_position())?;

        let intake = scheduler.register(ds.intake.intake(arm_score_position))?;
        let arm_then_intake = scheduler.register(Command::sequence(
            "arm_then_intake",
            vec![
                ds.arm.intake_position(),
                ds.intake.intake(arm_score_position),
            ],
        ))?;
        let score_coral = scheduler.register(ds.intake.score_coral())?;
        let intake_stop = scheduler.register(ds.intake.stop())?;
        let intake_idle = scheduler.register(ds.intake.idle())?;

        let run_compressor = scheduler.register(ds.pneumatics.run_compressor())?;

        let rumble_strength = params.rumble_strength;
        let endgame_rumble = scheduler.register(
            Command::start_end(
                "endgame_rumble",
                &[ds.feedback_group],
                move |ds: &mut DataStore| ds.rumble.set_power(rumble_strength),
                |ds: &mut DataStore| ds.rumble.set_power(0.0),
            )
            .with_timeout(params.rumble_s),
        )?;

        // ---- DEFAULTS ----

        scheduler.set_default_command(ds.intake.group(), intake_idle)?;
        scheduler.set_default_command(ds.pneumatics.group(), run_compressor)?;

        // ---- OPERATOR BUTTONS ----

        scheduler.on_true(button(ButtonId::DriverY), climb)?;
        scheduler.on_true(button(ButtonId::DriverA), climb_stop)?;

        scheduler.on_true(button(ButtonId::OperatorA), intake_stop)?;
        scheduler.on_true(
            button(ButtonId::OperatorX).or(button(ButtonId::OperatorRightTrigger)),
            score_coral,
        )?;
        scheduler.on_true(button(ButtonId::OperatorLeftTrigger), arm_then_intake)?;
        scheduler.on_true(button(ButtonId::OperatorY), arm_score_position)?;
        scheduler.on_true(button(ButtonId::OperatorB), arm_intake_position)?;

        // ---- AUTOMATIC ----

        let endgame_warning_s = params.endgame_warning_s;
        scheduler.on_true(
            Trigger::new(move |ds: &DataStore| match ds.match_remaining_s() {
                Some(remaining_s) => remaining_s <= endgame_warning_s,
                None => false,
            }),
            endgame_rumble,
        )?;

        scheduler.on_true(ds.intake.jammed(), intake_stop)?;

        info!("Operator bindings configured");

        Ok(Self {
            climb,
            climb_stop,
            arm_intake_position,
            arm_score_position,
            intake,
            arm_then_intake,
            score_coral,
            intake_stop,
            intake_idle,
            run_compressor,
            endgame_rumble,
        })
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// True while `button` is held.
fn button(button: ButtonId) -> Trigger<DataStore> {
    Trigger::new(move |ds: &DataStore| ds.is_pressed(button))
}
