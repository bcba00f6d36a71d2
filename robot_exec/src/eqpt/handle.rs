//! Actuator handle implementation

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::{Actuator, ActuatorValue, SolenoidPosition};
use log::trace;
use serde::Serialize;
use util::maths::clamp;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A handle on a single physical output.
///
/// The handle holds no state beyond the last applied demand. It is owned by exactly one subsystem,
/// and only commands holding that subsystem's resource group write through it.
pub struct ActuatorHandle {
    name: &'static str,
    kind: OutputKind,
    driver: Box<dyn Actuator>,
    last: Option<ActuatorValue>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The kind of output behind a handle, which determines its neutral value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutputKind {
    Motor,
    Solenoid,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ActuatorHandle {
    pub fn new(name: &'static str, kind: OutputKind, driver: Box<dyn Actuator>) -> Self {
        Self {
            name,
            kind,
            driver,
            last: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> OutputKind {
        self.kind
    }

    /// Apply a demand to the output.
    ///
    /// Power demands are clamped into `[-1.0, 1.0]` before reaching the driver.
    pub fn apply(&mut self, value: ActuatorValue) {
        let value = match value {
            ActuatorValue::Power(p) => ActuatorValue::Power(clamp(&p, &-1.0, &1.0)),
            v => v,
        };

        trace!("{} <- {:?}", self.name, value);

        self.driver.apply(value);
        self.last = Some(value);
    }

    /// Set the normalised power of a motor output.
    pub fn set_power(&mut self, power: f64) {
        self.apply(ActuatorValue::Power(power))
    }

    /// Set the position of a solenoid output.
    pub fn set_position(&mut self, position: SolenoidPosition) {
        self.apply(ActuatorValue::Position(position))
    }

    /// The last demand applied through this handle, or `None` if the output has never been
    /// driven.
    pub fn last_applied(&self) -> Option<ActuatorValue> {
        self.last
    }

    /// The last applied power, zero if the output has not been driven or is not a motor.
    pub fn power(&self) -> f64 {
        match self.last {
            Some(ActuatorValue::Power(p)) => p,
            _ => 0.0,
        }
    }

    /// The last applied solenoid position, if any.
    pub fn position(&self) -> Option<SolenoidPosition> {
        match self.last {
            Some(ActuatorValue::Position(p)) => Some(p),
            _ => None,
        }
    }

    /// The neutral demand for this output.
    pub fn neutral(&self) -> ActuatorValue {
        match self.kind {
            OutputKind::Motor => ActuatorValue::Power(0.0),
            OutputKind::Solenoid => ActuatorValue::Position(SolenoidPosition::Off),
        }
    }

    /// Drive the output to its neutral value.
    pub fn make_safe(&mut self) {
        let neutral = self.neutral();
        self.apply(neutral);
    }

    /// Returns `true` if the output is currently being driven.
    pub fn is_active(&self) -> bool {
        match self.last {
            Some(v) => !v.is_neutral(),
            None => false,
        }
    }
}
