//! Module interfaces
//!
//! Each actuator-owning subsystem in `robot_exec` shall implement all the
//! items in this module.

// ---------------------------------------------------------------------------
// SUBSYSTEM
// ---------------------------------------------------------------------------

/// An actuator-owning subsystem.
///
/// Subsystems are constructed once at start-up and owned by the executable's
/// data store for the whole process lifetime. Cyclic processing is split so
/// that all sensing happens before any command runs:
///
/// 1. `sample` - read and debounce all of the subsystem's sensors.
/// 2. Commands act on the subsystem's actuators (driven by the scheduler).
/// 3. `status_report` - summarise the state for telemetry.
pub trait Subsystem {
    /// A report on the status of the subsystem, published every cycle.
    type StatusReport;

    /// Name of the subsystem, used for logging and telemetry.
    fn name(&self) -> &'static str;

    /// Acquire sensor inputs for this cycle.
    ///
    /// # Inputs
    /// - `now_s`: The time of this cycle in seconds.
    fn sample(&mut self, now_s: f64);

    /// Drive every actuator of the subsystem to its neutral value.
    ///
    /// Must never fail and must result in no motion of the mechanism.
    fn make_safe(&mut self);

    /// Build the status report for this cycle.
    fn status_report(&self) -> Self::StatusReport;
}
