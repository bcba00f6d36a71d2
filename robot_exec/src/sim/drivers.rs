//! Simulated equipment drivers
//!
//! Each simulated driver shares its state with a probe, so that tests and the plant model can
//! observe what the software demanded and set what the sensors report.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::cell::RefCell;
use std::rc::Rc;

use comms_if::eqpt::{Actuator, ActuatorValue, AnalogSensor, Sensor, SensorError};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Default)]
struct ActuatorState {
    last: Option<ActuatorValue>,
    num_writes: u64,
}

#[derive(Debug)]
struct SensorState<T> {
    value: T,
    fault: Option<SensorError>,
}

/// Simulated actuator, recording every demand applied to it.
pub struct SimActuator {
    state: Rc<RefCell<ActuatorState>>,
}

/// Observer of a [`SimActuator`].
#[derive(Clone)]
pub struct ActuatorProbe {
    state: Rc<RefCell<ActuatorState>>,
}

/// Simulated digital sensor.
pub struct SimSensor {
    state: Rc<RefCell<SensorState<bool>>>,
}

/// Controller of a [`SimSensor`].
#[derive(Clone)]
pub struct SensorProbe {
    state: Rc<RefCell<SensorState<bool>>>,
}

/// Simulated analog sensor.
pub struct SimAnalogSensor {
    state: Rc<RefCell<SensorState<f64>>>,
}

/// Controller of a [`SimAnalogSensor`].
#[derive(Clone)]
pub struct AnalogProbe {
    state: Rc<RefCell<SensorState<f64>>>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimActuator {
    pub fn new() -> (Self, ActuatorProbe) {
        let state = Rc::new(RefCell::new(ActuatorState::default()));

        (
            Self {
                state: state.clone(),
            },
            ActuatorProbe { state },
        )
    }
}

impl Actuator for SimActuator {
    fn apply(&mut self, value: ActuatorValue) {
        let mut state = self.state.borrow_mut();
        state.last = Some(value);
        state.num_writes += 1;
    }
}

impl ActuatorProbe {
    /// The last demand applied to the actuator.
    pub fn last(&self) -> Option<ActuatorValue> {
        self.state.borrow().last
    }

    /// Number of demands applied to the actuator so far.
    pub fn num_writes(&self) -> u64 {
        self.state.borrow().num_writes
    }

    /// The last power demand, or zero.
    pub fn power(&self) -> f64 {
        match self.last() {
            Some(ActuatorValue::Power(p)) => p,
            _ => 0.0,
        }
    }
}

impl SimSensor {
    pub fn new(initial: bool) -> (Self, SensorProbe) {
        let state = Rc::new(RefCell::new(SensorState {
            value: initial,
            fault: None,
        }));

        (
            Self {
                state: state.clone(),
            },
            SensorProbe { state },
        )
    }
}

impl Sensor for SimSensor {
    fn read_raw(&mut self) -> Result<bool, SensorError> {
        let state = self.state.borrow();
        match &state.fault {
            Some(e) => Err(e.clone()),
            None => Ok(state.value),
        }
    }
}

impl SensorProbe {
    pub fn set(&self, value: bool) {
        self.state.borrow_mut().value = value;
    }

    pub fn value(&self) -> bool {
        self.state.borrow().value
    }

    /// Make every subsequent read fail with `fault`, or clear the fault with `None`.
    pub fn set_fault(&self, fault: Option<SensorError>) {
        self.state.borrow_mut().fault = fault;
    }
}

impl SimAnalogSensor {
    pub fn new(initial: f64) -> (Self, AnalogProbe) {
        let state = Rc::new(RefCell::new(SensorState {
            value: initial,
            fault: None,
        }));

        (
            Self {
                state: state.clone(),
            },
            AnalogProbe { state },
        )
    }
}

impl AnalogSensor for SimAnalogSensor {
    fn read(&mut self) -> Result<f64, SensorError> {
        let state = self.state.borrow();
        match &state.fault {
            Some(e) => Err(e.clone()),
            None => Ok(state.value),
        }
    }
}

impl AnalogProbe {
    pub fn set(&self, value: f64) {
        self.state.borrow_mut().value = value;
    }

    pub fn value(&self) -> f64 {
        self.state.borrow().value
    }

    pub fn set_fault(&self, fault: Option<SensorError>) {
        self.state.borrow_mut().fault = fault;
    }
}
