//! Analog sensor inputs

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::{AnalogSensor, SensorError};
use log::{info, warn};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// An analog sensor sampled once per cycle.
///
/// Faults, including non-finite readings, are absorbed and read as `0.0`.
pub struct AnalogInput {
    name: &'static str,
    sensor: Box<dyn AnalogSensor>,
    value: f64,
    faulted: bool,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl AnalogInput {
    pub fn new(name: &'static str, sensor: Box<dyn AnalogSensor>) -> Self {
        Self {
            name,
            sensor,
            value: 0.0,
            faulted: false,
        }
    }

    /// Poll the sensor, returning the value for this cycle.
    pub fn sample(&mut self) -> f64 {
        let reading = self.sensor.read().and_then(|v| {
            if v.is_finite() {
                Ok(v)
            } else {
                Err(SensorError::Implausible(format!("{}", v)))
            }
        });

        self.value = match reading {
            Ok(v) => {
                if self.faulted {
                    info!("Sensor {} recovered", self.name);
                    self.faulted = false;
                }
                v
            }
            Err(e) => {
                if !self.faulted {
                    warn!("Sensor {} faulted, reading as zero: {}", self.name, e);
                    self.faulted = true;
                }
                0.0
            }
        };

        self.value
    }

    /// The value as of the last sample.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_faulted(&self) -> bool {
        self.faulted
    }
}
