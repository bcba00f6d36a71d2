//! # Subsystems
//!
//! Each actuator-owning mechanism of the robot. A subsystem owns its actuator handles and
//! sensors, registers one resource group with the scheduler, and exposes commands rather than raw
//! setters so that callers can only reach valid actuator states.

pub mod arm;
pub mod climb;
pub mod intake;
pub mod pneumatics;
