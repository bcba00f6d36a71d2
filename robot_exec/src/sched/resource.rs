//! Resource groups

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Serialize;

use super::CommandId;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Identifier of a resource group registered with a [`Scheduler`](super::Scheduler).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GroupId(pub(crate) usize);

/// A named set of actuators that at most one command may drive at a time.
///
/// Ownership is tracked here rather than on the actuators themselves: the handles stay inside
/// their subsystem, and the group records which command currently holds them.
#[derive(Debug)]
pub struct ResourceGroup {
    name: &'static str,
    actuators: Vec<&'static str>,
    pub(crate) owner: Option<CommandId>,
    pub(crate) default_command: Option<CommandId>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ResourceGroup {
    pub(crate) fn new(name: &'static str, actuators: &[&'static str]) -> Self {
        Self {
            name,
            actuators: actuators.to_vec(),
            owner: None,
            default_command: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Names of the actuators in this group.
    pub fn actuators(&self) -> &[&'static str] {
        &self.actuators
    }

    /// The command currently holding this group.
    pub fn owner(&self) -> Option<CommandId> {
        self.owner
    }

    pub fn default_command(&self) -> Option<CommandId> {
        self.default_command
    }
}
