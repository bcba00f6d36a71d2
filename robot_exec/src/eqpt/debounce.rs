//! Debounced digital signals

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::Sensor;
use log::{info, warn};
use util::time::elapsed_at_least;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Time-window debounce filter.
///
/// The reported (stable) value only changes once the raw input has held the opposite value for
/// the full window. Any raw flip shorter than the window is invisible. Separate windows can be
/// used for the rising (false to true) and falling (true to false) edges.
#[derive(Debug, Clone)]
pub struct Debouncer {
    rising_window_s: f64,
    falling_window_s: f64,

    stable: bool,

    /// Time at which the raw input first differed from `stable`, or `None` if it currently
    /// agrees.
    pending_since_s: Option<f64>,
}

/// A digital sensor read through a [`Debouncer`].
pub struct DebouncedSignal {
    name: &'static str,
    sensor: Box<dyn Sensor>,
    inverted: bool,
    debouncer: Debouncer,
    raw: bool,
    faulted: bool,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Debouncer {
    /// A symmetric debouncer, initially reporting `false`.
    pub fn new(window_s: f64) -> Self {
        Self::asymmetric(window_s, window_s)
    }

    /// A debouncer with separate rising and falling windows, initially reporting `false`.
    pub fn asymmetric(rising_window_s: f64, falling_window_s: f64) -> Self {
        Self {
            rising_window_s: rising_window_s.max(0.0),
            falling_window_s: falling_window_s.max(0.0),
            stable: false,
            pending_since_s: None,
        }
    }

    /// Set the initial stable value.
    pub fn with_initial(mut self, value: bool) -> Self {
        self.stable = value;
        self
    }

    /// Feed a raw sample taken at `now_s`, returning the debounced value.
    pub fn update(&mut self, raw: bool, now_s: f64) -> bool {
        if raw == self.stable {
            self.pending_since_s = None;
            return self.stable;
        }

        let since_s = *self.pending_since_s.get_or_insert(now_s);
        let window_s = if raw {
            self.rising_window_s
        } else {
            self.falling_window_s
        };

        if elapsed_at_least(since_s, now_s, window_s) {
            self.stable = raw;
            self.pending_since_s = None;
        }

        self.stable
    }

    /// The current debounced value.
    pub fn value(&self) -> bool {
        self.stable
    }
}

impl DebouncedSignal {
    pub fn new(name: &'static str, sensor: Box<dyn Sensor>, debouncer: Debouncer) -> Self {
        Self {
            name,
            sensor,
            inverted: false,
            debouncer,
            raw: false,
            faulted: false,
        }
    }

    /// Invert the raw reading, for active-low sensors.
    pub fn inverted(mut self) -> Self {
        self.inverted = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Poll the sensor and update the debounced value.
    ///
    /// A sensor fault is treated as the signal being absent (`false`).
    pub fn sample(&mut self, now_s: f64) -> bool {
        self.raw = match self.sensor.read_raw() {
            Ok(v) => {
                if self.faulted {
                    info!("Sensor {} recovered", self.name);
                    self.faulted = false;
                }
                v != self.inverted
            }
            Err(e) => {
                if !self.faulted {
                    warn!("Sensor {} faulted, treating as absent: {}", self.name, e);
                    self.faulted = true;
                }
                false
            }
        };

        self.debouncer.update(self.raw, now_s)
    }

    /// The debounced value as of the last sample.
    pub fn read(&self) -> bool {
        self.debouncer.value()
    }

    /// The raw value as of the last sample, after inversion and fault handling.
    pub fn raw(&self) -> bool {
        self.raw
    }

    pub fn is_faulted(&self) -> bool {
        self.faulted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimSensor;
    use comms_if::eqpt::SensorError;

    const PERIOD_S: f64 = 0.02;

    fn t(cycle: u32) -> f64 {
        cycle as f64 * PERIOD_S
    }

    #[test]
    fn test_short_flip_is_invisible() {
        let mut d = Debouncer::new(0.1);

        // Four cycles high (60 ms of hold) then low again
        for c in 0..4 {
            assert!(!d.update(true, t(c)));
        }
        for c in 4..20 {
            assert!(!d.update(false, t(c)));
        }
    }

    #[test]
    fn test_flip_adopted_after_window() {
        let mut d = Debouncer::new(0.1);

        // Raw goes high at cycle 10, the window is 5 cycles long
        for c in 0..10 {
            assert!(!d.update(false, t(c)));
        }
        for c in 10..15 {
            assert!(!d.update(true, t(c)), "adopted too early at cycle {}", c);
        }
        assert!(d.update(true, t(15)));
        assert!(d.value());
    }

    #[test]
    fn test_flicker_restarts_window() {
        let mut d = Debouncer::new(0.1);

        for c in 0..4 {
            d.update(true, t(c));
        }
        // One low sample resets the pending timer
        d.update(false, t(4));
        for c in 5..10 {
            assert!(!d.update(true, t(c)));
        }
        assert!(d.update(true, t(10)));
    }

    #[test]
    fn test_asymmetric_windows() {
        let mut d = Debouncer::asymmetric(0.1, 0.25).with_initial(true);

        // Falling takes 0.25 s
        for c in 0..12 {
            assert!(d.update(false, t(c)));
        }
        assert!(!d.update(false, t(13)));

        // Rising takes 0.1 s
        for c in 20..25 {
            assert!(!d.update(true, t(c)));
        }
        assert!(d.update(true, t(25)));
    }

    #[test]
    fn test_zero_window_passes_through() {
        let mut d = Debouncer::new(0.0);
        assert!(d.update(true, 0.0));
        assert!(!d.update(false, 0.02));
    }

    #[test]
    fn test_faulted_sensor_reads_absent() {
        let (sensor, probe) = SimSensor::new(true);
        let mut signal = DebouncedSignal::new("piece", Box::new(sensor), Debouncer::new(0.0));

        assert!(signal.sample(0.0));

        probe.set_fault(Some(SensorError::NotConnected));
        assert!(!signal.sample(0.02));
        assert!(signal.is_faulted());

        probe.set_fault(None);
        assert!(signal.sample(0.04));
        assert!(!signal.is_faulted());
    }

    #[test]
    fn test_inverted_signal() {
        let (sensor, probe) = SimSensor::new(true);
        let mut signal = DebouncedSignal::new("beam", Box::new(sensor), Debouncer::new(0.0))
            .inverted();

        assert!(!signal.sample(0.0));
        probe.set(false);
        assert!(signal.sample(0.02));
        assert!(signal.raw());
    }
}
