//! # Equipment module
//!
//! Robot-side wrappers around the opaque hardware drivers defined in `comms_if::eqpt`:
//!
//! - [`ActuatorHandle`] - one physical output, remembering the last applied demand.
//! - [`DebouncedSignal`] - one digital sensor, filtered through a [`Debouncer`].
//! - [`AnalogInput`] - one analog sensor with fault absorption.
//!
//! Sensor faults never propagate out of this module: a faulted digital sensor reads as "signal
//! absent" and a faulted analog sensor reads as zero.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod analog;
mod debounce;
mod handle;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use analog::AnalogInput;
pub use debounce::{DebouncedSignal, Debouncer};
pub use handle::{ActuatorHandle, OutputKind};
