//! # Sensor Equipment Interface

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A digital (boolean) sensor, polled once per cycle.
pub trait Sensor {
    /// Read the raw, un-debounced state of the sensor.
    fn read_raw(&mut self) -> Result<bool, SensorError>;
}

/// An analog sensor, polled once per cycle.
pub trait AnalogSensor {
    /// Read the raw value of the sensor in its engineering units.
    fn read(&mut self) -> Result<f64, SensorError>;
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Faults a sensor driver can report.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SensorError {
    #[error("Sensor is not connected")]
    NotConnected,

    #[error("Sensor reported an implausible value: {0}")]
    Implausible(String),

    #[error("Sensor driver fault: {0}")]
    DriverFault(String),
}
