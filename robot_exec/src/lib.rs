//! # Robot library.
//!
//! This library allows other crates in the workspace, and the integration tests, to access items
//! defined inside the robot crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Operator bindings - registers every command and binds it to its trigger
pub mod bindings;

/// Data store - the context all commands act on
pub mod data_store;

/// Equipment - actuator handles and sensor filtering
pub mod eqpt;

/// Executable parameters
pub mod params;

/// Scheduler - command arbitration over resource groups
pub mod sched;

/// Simulation backend - simulated drivers and plant model
pub mod sim;

/// Subsystems - climb, arm, intake and pneumatics
pub mod subsystems;

/// Telecommand processor - handles operator TCs
pub mod tc_processor;

/// Telemetry server - publishes diagnostics every cycle
pub mod tm_server;

#[cfg(test)]
mod test_util;
