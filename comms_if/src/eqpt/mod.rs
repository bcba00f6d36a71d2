//! # Equipment Interface
//!
//! This module defines the interfaces that hardware drivers implement. Drivers are opaque to the
//! robot software: an actuator accepts a demand and a sensor reports a reading, nothing more.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod mech;
pub mod sens;

// -----------------------------------------------------------------------------------------------
// EXPORTS
// -----------------------------------------------------------------------------------------------

pub use mech::{Actuator, ActuatorValue, SolenoidPosition};
pub use sens::{AnalogSensor, Sensor, SensorError};
