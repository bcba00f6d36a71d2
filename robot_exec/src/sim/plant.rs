//! # Simulated plant
//!
//! A kinematic stand-in for the robot's mechanisms, closing the loop between the simulated
//! actuators and sensors:
//!
//! - The arm limit switch follows the arm solenoid once the arm has had time to travel.
//! - A piece is acquired after the roller has run inwards for long enough, and leaves after the
//!   roller has run outwards for long enough.
//! - Roller current is proportional to roller power, or at stall while jammed.
//!
//! The piece sensor is a beam break, so it reads `false` while a piece is present.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::{ActuatorValue, SolenoidPosition};
use log::debug;
use util::time::elapsed_at_least;

use super::{ActuatorProbe, AnalogProbe, SensorProbe, SimParams};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct SimPlant {
    params: SimParams,

    arm_solenoid: ActuatorProbe,
    arm_sensor: SensorProbe,
    roller: ActuatorProbe,
    piece_sensor: SensorProbe,
    roller_current: AnalogProbe,
    compressor: ActuatorProbe,
    climb_solenoid: ActuatorProbe,
    rumble: ActuatorProbe,

    arm_at_score: bool,
    arm_target_at_score: bool,
    arm_moving_since_s: Option<f64>,

    piece_present: bool,
    roller_pushing_since_s: Option<f64>,

    jammed: bool,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimPlant {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        params: SimParams,
        arm_solenoid: ActuatorProbe,
        arm_sensor: SensorProbe,
        roller: ActuatorProbe,
        piece_sensor: SensorProbe,
        roller_current: AnalogProbe,
        compressor: ActuatorProbe,
        climb_solenoid: ActuatorProbe,
        rumble: ActuatorProbe,
    ) -> Self {
        let arm_at_score = params.arm_starts_at_score;
        let piece_present = params.starts_with_piece;

        arm_sensor.set(arm_at_score);
        piece_sensor.set(!piece_present);

        Self {
            params,
            arm_solenoid,
            arm_sensor,
            roller,
            piece_sensor,
            roller_current,
            compressor,
            climb_solenoid,
            rumble,
            arm_at_score,
            arm_target_at_score: arm_at_score,
            arm_moving_since_s: None,
            piece_present,
            roller_pushing_since_s: None,
            jammed: false,
        }
    }

    /// Advance the plant to `now_s` using the latest actuator demands.
    pub fn update(&mut self, now_s: f64) {
        self.update_arm(now_s);
        self.update_roller(now_s);
    }

    fn update_arm(&mut self, now_s: f64) {
        match self.arm_solenoid.last() {
            Some(ActuatorValue::Position(SolenoidPosition::Forward)) => {
                self.arm_target_at_score = false
            }
            Some(ActuatorValue::Position(SolenoidPosition::Reverse)) => {
                self.arm_target_at_score = true
            }
            _ => (),
        }

        if self.arm_target_at_score == self.arm_at_score {
            self.arm_moving_since_s = None;
        } else {
            let since_s = *self.arm_moving_since_s.get_or_insert(now_s);
            if elapsed_at_least(since_s, now_s, self.params.arm_travel_s) {
                self.arm_at_score = self.arm_target_at_score;
                self.arm_moving_since_s = None;
                debug!("Sim arm reached {}", if self.arm_at_score { "score" } else { "intake" });
            }
        }

        self.arm_sensor.set(self.arm_at_score);
    }

    fn update_roller(&mut self, now_s: f64) {
        let power = self.roller.power();

        // Inwards is negative power
        let pushing = (power < 0.0 && !self.piece_present) || (power > 0.0 && self.piece_present);

        if pushing && !self.jammed {
            let since_s = *self.roller_pushing_since_s.get_or_insert(now_s);
            let needed_s = if self.piece_present {
                self.params.piece_release_s
            } else {
                self.params.piece_acquire_s
            };

            if elapsed_at_least(since_s, now_s, needed_s) {
                self.piece_present = !self.piece_present;
                self.roller_pushing_since_s = None;
                debug!("Sim piece present: {}", self.piece_present);
            }
        } else {
            self.roller_pushing_since_s = None;
        }

        self.piece_sensor.set(!self.piece_present);

        let current_a = if self.jammed && power != 0.0 {
            self.params.roller_stall_current_a
        } else {
            power.abs() * self.params.roller_free_current_a
        };
        self.roller_current.set(current_a);
    }

    // ---- ACCESSORS ----

    pub fn arm_at_score(&self) -> bool {
        self.arm_at_score
    }

    pub fn piece_present(&self) -> bool {
        self.piece_present
    }

    /// Place or remove a piece directly.
    pub fn set_piece_present(&mut self, present: bool) {
        self.piece_present = present;
        self.roller_pushing_since_s = None;
        self.piece_sensor.set(!present);
    }

    /// Jam the roller, stalling it at its stall current while powered.
    pub fn set_jammed(&mut self, jammed: bool) {
        self.jammed = jammed;
    }

    pub fn arm_solenoid(&self) -> &ActuatorProbe {
        &self.arm_solenoid
    }

    pub fn arm_sensor(&self) -> &SensorProbe {
        &self.arm_sensor
    }

    pub fn roller(&self) -> &ActuatorProbe {
        &self.roller
    }

    pub fn piece_sensor(&self) -> &SensorProbe {
        &self.piece_sensor
    }

    pub fn compressor(&self) -> &ActuatorProbe {
        &self.compressor
    }

    pub fn climb_solenoid(&self) -> &ActuatorProbe {
        &self.climb_solenoid
    }

    pub fn rumble(&self) -> &ActuatorProbe {
        &self.rumble
    }
}

#[cfg(test)]
mod tests {
    use super::super::build;
    use super::*;

    #[test]
    fn test_arm_follows_solenoid_after_travel() {
        let (mut hw, mut plant) = build(SimParams::default());
        assert!(plant.arm_at_score());

        hw.arm_solenoid
            .apply(ActuatorValue::Position(SolenoidPosition::Forward));

        for i in 0..12 {
            plant.update(i as f64 * 0.02);
            assert!(plant.arm_at_score());
        }
        plant.update(0.26);
        assert!(!plant.arm_at_score());
        assert!(!plant.arm_sensor().value());
    }

    #[test]
    fn test_piece_acquired_and_released() {
        let (mut hw, mut plant) = build(SimParams::default());

        hw.roller_motor.apply(ActuatorValue::Power(-0.5));
        plant.update(0.0);
        plant.update(0.5);
        assert!(!plant.piece_present());
        assert!(plant.piece_sensor().value());

        plant.update(1.0);
        assert!(plant.piece_present());
        assert!(!plant.piece_sensor().value());

        hw.roller_motor.apply(ActuatorValue::Power(0.5));
        plant.update(1.1);
        plant.update(1.4);
        assert!(!plant.piece_present());
    }

    #[test]
    fn test_jammed_roller_draws_stall_current() {
        let (mut hw, mut plant) = build(SimParams::default());

        hw.roller_motor.apply(ActuatorValue::Power(-0.5));
        plant.update(0.0);
        assert_eq!(plant.roller_current.value(), 4.0);

        plant.set_jammed(true);
        plant.update(0.02);
        assert_eq!(plant.roller_current.value(), 30.0);
    }
}
