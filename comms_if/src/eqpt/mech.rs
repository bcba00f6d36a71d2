//! # Mechanisms Equipment Interface

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A physical output driven by the robot software.
///
/// Implementations are fire-and-forget: the driver is responsible for handling its own hardware
/// faults, so `apply` has no return value.
pub trait Actuator {
    /// Apply a demand to the actuator.
    fn apply(&mut self, value: ActuatorValue);
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A demand sent to an actuator.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum ActuatorValue {
    /// Normalised power for motors and rollers, in the range `[-1.0, 1.0]`.
    Power(f64),

    /// Position of a pneumatic (double solenoid) output.
    Position(SolenoidPosition),
}

/// Position of a double solenoid valve.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolenoidPosition {
    /// Neither coil energised.
    Off,

    /// Forward coil energised (cylinder extended).
    Forward,

    /// Reverse coil energised (cylinder retracted).
    Reverse,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ActuatorValue {
    /// Returns `true` if the value does not drive the mechanism.
    pub fn is_neutral(&self) -> bool {
        match self {
            ActuatorValue::Power(p) => *p == 0.0,
            ActuatorValue::Position(p) => *p == SolenoidPosition::Off,
        }
    }
}
