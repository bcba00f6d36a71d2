//! # Robot Executable Parameters
//!
//! This module provides parameters for the robot executable, and gathers the parameters of every
//! subsystem so they can be loaded together.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use util::params::{self, LoadError};

use crate::sim::SimParams;
use crate::subsystems::{arm, climb, intake};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecParams {
    /// Target period of one cycle.
    pub cycle_period_s: f64,

    /// Length of a match, used if the match start TC doesn't give one.
    pub match_length_s: f64,

    /// Remaining match time at which the operator is warned of the endgame.
    pub endgame_warning_s: f64,

    /// Duration of the endgame rumble.
    pub rumble_s: f64,

    /// Strength of the endgame rumble, from 0 to 1.
    pub rumble_strength: f64,

    /// Time after which the executable stops if no script is running. `None` runs forever.
    pub run_duration_s: Option<f64>,
}

/// Every parameter set used by the executable.
#[derive(Debug, Clone, Default)]
pub struct RobotParams {
    pub exec: ExecParams,
    pub climb: climb::Params,
    pub arm: arm::Params,
    pub intake: intake::Params,
    pub sim: SimParams,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for ExecParams {
    fn default() -> Self {
        Self {
            cycle_period_s: 0.02,
            match_length_s: 150.0,
            endgame_warning_s: 30.0,
            rumble_s: 0.5,
            rumble_strength: 1.0,
            run_duration_s: None,
        }
    }
}

impl ExecParams {
    pub fn cycle_frequency_hz(&self) -> f64 {
        1.0 / self.cycle_period_s
    }
}

impl RobotParams {
    /// Load all parameter files from the parameters directory.
    pub fn load() -> Result<Self, LoadError> {
        Ok(Self {
            exec: params::load("exec.toml")?,
            climb: params::load("climb.toml")?,
            arm: params::load("arm.toml")?,
            intake: params::load("intake.toml")?,
            sim: params::load("sim.toml")?,
        })
    }
}
