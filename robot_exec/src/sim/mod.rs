//! # Simulation backend
//!
//! Simulated equipment drivers and a simple plant model, used in place of the robot's hardware
//! by the executable and by tests.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod drivers;
mod params;
mod plant;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use drivers::{
    ActuatorProbe, AnalogProbe, SensorProbe, SimActuator, SimAnalogSensor, SimSensor,
};
pub use params::SimParams;
pub use plant::SimPlant;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use crate::data_store::Hardware;

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Build a full set of simulated hardware, along with the plant that drives its sensors.
pub fn build(params: SimParams) -> (Hardware, SimPlant) {
    let (climb_solenoid, climb_probe) = SimActuator::new();
    let (arm_solenoid, arm_probe) = SimActuator::new();
    let (arm_sensor, arm_sensor_probe) = SimSensor::new(params.arm_starts_at_score);
    let (roller_motor, roller_probe) = SimActuator::new();
    let (piece_sensor, piece_probe) = SimSensor::new(!params.starts_with_piece);
    let (roller_current, current_probe) = SimAnalogSensor::new(0.0);
    let (compressor, compressor_probe) = SimActuator::new();
    let (rumble, rumble_probe) = SimActuator::new();

    let hardware = Hardware {
        climb_solenoid: Box::new(climb_solenoid),
        arm_solenoid: Box::new(arm_solenoid),
        arm_sensor: Box::new(arm_sensor),
        roller_motor: Box::new(roller_motor),
        piece_sensor: Box::new(piece_sensor),
        roller_current: Box::new(roller_current),
        compressor: Box::new(compressor),
        rumble: Box::new(rumble),
    };

    let plant = SimPlant::new(
        params,
        arm_probe,
        arm_sensor_probe,
        roller_probe,
        piece_probe,
        current_probe,
        compressor_probe,
        climb_probe,
        rumble_probe,
    );

    (hardware, plant)
}
