//! # Command scheduler
//!
//! The scheduler owns every registered [`Command`], [`ResourceGroup`] and trigger binding, and is
//! run once per control cycle. A run:
//!
//! 1. Polls every bound [`Trigger`] against the same view of the context, before anything
//!    executes.
//! 2. Applies the schedule/cancel requests raised by those triggers.
//! 3. Runs each scheduled command, in the order it was scheduled, ending those that have
//!    finished.
//! 4. Schedules any commands forked by commands that finished normally.
//! 5. Schedules the default command of every group left without an owner, as long as all of the
//!    default command's groups are free.
//!
//! Scheduling a command first interrupts every other command holding one of its groups, so a
//! group never has more than one owner and the old owner always ends before the new one starts.
//!
//! The scheduler never reads a clock. Time is passed into every operation that needs it.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod command;
mod resource;
mod trigger;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::collections::BTreeSet;

use log::{debug, trace, warn};
use serde::Serialize;

use trigger::{Binding, BindingAction};

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use command::{Action, Command, Condition, EndAction, Functional};
pub use resource::{GroupId, ResourceGroup};
pub use trigger::{BindingKind, Trigger};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Identifier of a command registered with a [`Scheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CommandId(pub(crate) usize);

/// Cooperative command scheduler over a context `C`.
pub struct Scheduler<C> {
    commands: Vec<Command<C>>,

    groups: Vec<ResourceGroup>,

    bindings: Vec<Binding<C>>,

    /// Scheduled commands, in the order they were scheduled.
    running: Vec<CommandId>,

    /// Commands forked by commands that finished normally, scheduled at the end of the run.
    forks: Vec<CommandId>,

    num_runs: u64,
}

/// Snapshot of the scheduler for diagnostics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SchedulerStatus {
    pub num_runs: u64,

    /// Names of the scheduled commands, in schedule order.
    pub running: Vec<String>,

    pub groups: Vec<GroupStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupStatus {
    pub name: &'static str,
    pub owner: Option<String>,
    pub default_command: Option<String>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Configuration errors raised while setting up the scheduler.
///
/// These are only raised by registration functions. A scheduler that has been configured without
/// error cannot raise any of them while running.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SchedulerError {
    #[error("Resource group {0:?} has not been registered")]
    UnknownGroup(GroupId),

    #[error("A resource group named \"{0}\" already exists")]
    DuplicateGroup(&'static str),

    #[error("Actuator \"{actuator}\" already belongs to group \"{group}\"")]
    ActuatorAlreadyGrouped {
        actuator: &'static str,
        group: &'static str,
    },

    #[error("Command {0:?} has not been registered")]
    UnknownCommand(CommandId),

    #[error("Command \"{command}\" cannot be the default of group \"{group}\" as it does not require it")]
    DefaultMissingRequirement {
        group: &'static str,
        command: String,
    },
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            groups: Vec::new(),
            bindings: Vec::new(),
            running: Vec::new(),
            forks: Vec::new(),
            num_runs: 0,
        }
    }
}

impl<C> Scheduler<C> {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- CONFIGURATION ----

    /// Register a new resource group made up of the named actuators.
    ///
    /// An actuator may only belong to one group.
    pub fn add_group(
        &mut self,
        name: &'static str,
        actuators: &[&'static str],
    ) -> Result<GroupId, SchedulerError> {
        if self.groups.iter().any(|g| g.name() == name) {
            return Err(SchedulerError::DuplicateGroup(name));
        }

        for actuator in actuators {
            if let Some(g) = self.groups.iter().find(|g| g.actuators().contains(actuator)) {
                return Err(SchedulerError::ActuatorAlreadyGrouped {
                    actuator: *actuator,
                    group: g.name(),
                });
            }
        }

        self.groups.push(ResourceGroup::new(name, actuators));

        Ok(GroupId(self.groups.len() - 1))
    }

    /// Register a command, returning the ID used to schedule it.
    ///
    /// Every group the command requires, and every command it forks, must already be registered.
    pub fn register(&mut self, command: Command<C>) -> Result<CommandId, SchedulerError> {
        for group in command.requirements() {
            self.check_group(*group)?;
        }

        for follower in command.followers() {
            self.check_command(follower)?;
        }

        debug!("Registered command \"{}\"", command.name());
        self.commands.push(command);

        Ok(CommandId(self.commands.len() - 1))
    }

    /// Set the command to run whenever `group` has no other owner.
    pub fn set_default_command(
        &mut self,
        group: GroupId,
        command: CommandId,
    ) -> Result<(), SchedulerError> {
        self.check_group(group)?;
        self.check_command(command)?;

        let cmd = &self.commands[command.0];
        let grp = &mut self.groups[group.0];

        if !cmd.requirements().contains(&group) {
            return Err(SchedulerError::DefaultMissingRequirement {
                group: grp.name(),
                command: String::from(cmd.name()),
            });
        }

        grp.default_command = Some(command);

        Ok(())
    }

    /// Bind `command` to `trigger` with the given edge behaviour.
    pub fn bind(
        &mut self,
        trigger: Trigger<C>,
        kind: BindingKind,
        command: CommandId,
    ) -> Result<(), SchedulerError> {
        self.check_command(command)?;
        self.bindings.push(Binding::new(trigger, kind, command));
        Ok(())
    }

    pub fn on_true(&mut self, trigger: Trigger<C>, command: CommandId) -> Result<(), SchedulerError> {
        self.bind(trigger, BindingKind::OnTrue, command)
    }

    pub fn on_false(&mut self, trigger: Trigger<C>, command: CommandId) -> Result<(), SchedulerError> {
        self.bind(trigger, BindingKind::OnFalse, command)
    }

    pub fn while_true(
        &mut self,
        trigger: Trigger<C>,
        command: CommandId,
    ) -> Result<(), SchedulerError> {
        self.bind(trigger, BindingKind::WhileTrue, command)
    }

    pub fn while_false(
        &mut self,
        trigger: Trigger<C>,
        command: CommandId,
    ) -> Result<(), SchedulerError> {
        self.bind(trigger, BindingKind::WhileFalse, command)
    }

    pub fn toggle_on_true(
        &mut self,
        trigger: Trigger<C>,
        command: CommandId,
    ) -> Result<(), SchedulerError> {
        self.bind(trigger, BindingKind::ToggleOnTrue, command)
    }

    // ---- OPERATIONS ----

    /// Schedule a registered command.
    ///
    /// Any other command holding one of the command's groups is interrupted first. Scheduling a
    /// command that is already scheduled does nothing.
    pub fn schedule(&mut self, ctx: &mut C, id: CommandId, now_s: f64) -> Result<(), SchedulerError> {
        self.check_command(id)?;
        self.start(ctx, id, now_s);
        Ok(())
    }

    /// Interrupt a command if it is scheduled.
    pub fn cancel(&mut self, ctx: &mut C, id: CommandId) {
        self.finish(ctx, id, true);
    }

    /// Interrupt every scheduled command, most recently scheduled first.
    pub fn cancel_all(&mut self, ctx: &mut C) {
        while let Some(id) = self.running.last().copied() {
            self.finish(ctx, id, true);
        }
        self.forks.clear();
    }

    /// Run one cycle of the scheduler.
    pub fn run(&mut self, ctx: &mut C, now_s: f64) {
        // Poll every trigger before acting on any of them
        let actions: Vec<BindingAction> = {
            let snapshot: &C = ctx;
            self.bindings
                .iter_mut()
                .filter_map(|b| b.poll(snapshot, now_s))
                .collect()
        };

        for action in actions {
            match action {
                BindingAction::Schedule(id) => self.start(ctx, id, now_s),
                BindingAction::Cancel(id) => self.finish(ctx, id, true),
                BindingAction::Toggle(id) => {
                    if self.is_scheduled(id) {
                        self.finish(ctx, id, true)
                    } else {
                        self.start(ctx, id, now_s)
                    }
                }
            }
        }

        // Clone so commands can be removed from the running list as they finish
        for id in self.running.clone() {
            let cmd = match self.commands.get_mut(id.0) {
                Some(c) => c,
                None => continue,
            };

            // Checking first means a command never acts in a cycle where it is already finished
            let mut finished = cmd.is_finished(ctx, now_s);
            if !finished {
                cmd.execute(ctx, now_s, &mut self.forks);
                finished = cmd.is_finished(ctx, now_s);
            }

            if finished {
                if cmd.timed_out() {
                    warn!(
                        "Command \"{}\" timed out after {:.3} s",
                        cmd.name(),
                        cmd.timeout_s().unwrap_or_default()
                    );
                }
                self.finish(ctx, id, false);
            }
        }

        for id in std::mem::take(&mut self.forks) {
            self.start(ctx, id, now_s);
        }

        for idx in 0..self.groups.len() {
            let default = match (self.groups[idx].owner, self.groups[idx].default_command) {
                (None, Some(d)) => d,
                _ => continue,
            };

            if self.is_scheduled(default) {
                continue;
            }

            let free = self.commands[default.0]
                .requirements()
                .iter()
                .all(|g| self.groups[g.0].owner.is_none());

            if free {
                self.start(ctx, default, now_s);
            }
        }

        self.num_runs += 1;
    }

    // ---- QUERIES ----

    pub fn is_scheduled(&self, id: CommandId) -> bool {
        self.running.contains(&id)
    }

    /// The command currently holding `group`.
    pub fn owner_of(&self, group: GroupId) -> Option<CommandId> {
        self.groups.get(group.0).and_then(|g| g.owner)
    }

    pub fn group(&self, id: GroupId) -> Option<&ResourceGroup> {
        self.groups.get(id.0)
    }

    pub fn command_name(&self, id: CommandId) -> Option<&str> {
        self.commands.get(id.0).map(|c| c.name())
    }

    /// Scheduled commands in the order they were scheduled.
    pub fn running(&self) -> &[CommandId] {
        &self.running
    }

    pub fn num_runs(&self) -> u64 {
        self.num_runs
    }

    pub fn status(&self) -> SchedulerStatus {
        let name = |id: Option<CommandId>| {
            id.and_then(|i| self.command_name(i)).map(String::from)
        };

        SchedulerStatus {
            num_runs: self.num_runs,
            running: self
                .running
                .iter()
                .filter_map(|id| self.command_name(*id))
                .map(String::from)
                .collect(),
            groups: self
                .groups
                .iter()
                .map(|g| GroupStatus {
                    name: g.name(),
                    owner: name(g.owner),
                    default_command: name(g.default_command),
                })
                .collect(),
        }
    }

    // ---- PRIVATE ----

    fn check_group(&self, id: GroupId) -> Result<(), SchedulerError> {
        match self.groups.get(id.0) {
            Some(_) => Ok(()),
            None => Err(SchedulerError::UnknownGroup(id)),
        }
    }

    fn check_command(&self, id: CommandId) -> Result<(), SchedulerError> {
        match self.commands.get(id.0) {
            Some(_) => Ok(()),
            None => Err(SchedulerError::UnknownCommand(id)),
        }
    }

    /// Start a registered command, interrupting the current owners of its groups.
    fn start(&mut self, ctx: &mut C, id: CommandId, now_s: f64) {
        if self.is_scheduled(id) {
            trace!("Command {:?} already scheduled", id);
            return;
        }

        let requirements: BTreeSet<GroupId> = match self.commands.get(id.0) {
            Some(c) => c.requirements().clone(),
            None => return,
        };

        let owners: BTreeSet<CommandId> = requirements
            .iter()
            .filter_map(|g| self.groups.get(g.0).and_then(|g| g.owner))
            .collect();

        for owner in owners {
            self.finish(ctx, owner, true);
        }

        let cmd = &mut self.commands[id.0];
        debug!("Scheduling command \"{}\"", cmd.name());
        cmd.initialize(ctx, now_s);

        for g in requirements {
            if let Some(group) = self.groups.get_mut(g.0) {
                group.owner = Some(id);
            }
        }

        self.running.push(id);
    }

    /// End a scheduled command and release its groups.
    fn finish(&mut self, ctx: &mut C, id: CommandId, interrupted: bool) {
        let pos = match self.running.iter().position(|r| *r == id) {
            Some(p) => p,
            None => return,
        };
        self.running.remove(pos);

        if let Some(cmd) = self.commands.get_mut(id.0) {
            if interrupted {
                debug!("Command \"{}\" interrupted", cmd.name());
            } else {
                debug!("Command \"{}\" finished", cmd.name());
            }
            cmd.end(ctx, interrupted, &mut self.forks);
        }

        for group in self.groups.iter_mut() {
            if group.owner == Some(id) {
                group.owner = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD_S: f64 = 0.02;

    #[derive(Default)]
    struct Ctx {
        log: Vec<String>,
        flag: bool,
    }

    fn logging(name: &'static str, reqs: &[GroupId]) -> Command<Ctx> {
        Command::functional(
            name,
            reqs,
            Functional::new()
                .on_start(move |c: &mut Ctx| c.log.push(format!("start {}", name)))
                .on_end(move |c: &mut Ctx, interrupted| {
                    c.log.push(format!("end {} {}", name, interrupted))
                }),
        )
    }

    /// Check that every group's owner is scheduled and requires it, and that every scheduled
    /// command owns all of its groups.
    fn assert_ownership_consistent(s: &Scheduler<Ctx>) {
        for (i, g) in s.groups.iter().enumerate() {
            if let Some(owner) = g.owner() {
                assert!(s.is_scheduled(owner));
                assert!(s.commands[owner.0].requirements().contains(&GroupId(i)));
            }
        }
        for id in s.running() {
            for g in s.commands[id.0].requirements() {
                assert_eq!(s.owner_of(*g), Some(*id));
            }
        }
    }

    #[test]
    fn test_interrupted_end_before_new_start() {
        let mut ctx = Ctx::default();
        let mut s = Scheduler::new();
        let g = s.add_group("roller", &["roller_motor"]).unwrap();
        let a = s.register(logging("a", &[g])).unwrap();
        let b = s.register(logging("b", &[g])).unwrap();

        s.schedule(&mut ctx, a, 0.0).unwrap();
        s.schedule(&mut ctx, b, 0.0).unwrap();

        assert_eq!(ctx.log, vec!["start a", "end a true", "start b"]);
        assert_eq!(s.owner_of(g), Some(b));
        assert!(!s.is_scheduled(a));
        assert_ownership_consistent(&s);
    }

    #[test]
    fn test_double_schedule_is_idempotent() {
        let mut ctx = Ctx::default();
        let mut s = Scheduler::new();
        let g = s.add_group("arm", &["arm_solenoid"]).unwrap();
        let a = s.register(logging("a", &[g])).unwrap();

        s.schedule(&mut ctx, a, 0.0).unwrap();
        s.run(&mut ctx, 0.0);
        s.schedule(&mut ctx, a, 0.02).unwrap();

        assert_eq!(ctx.log, vec!["start a"]);
        assert_eq!(s.running(), &[a]);
    }

    #[test]
    fn test_zero_requirement_command_never_preempted() {
        let mut ctx = Ctx::default();
        let mut s = Scheduler::new();
        let g = s.add_group("climb", &["climb_solenoid"]).unwrap();
        let free = s.register(logging("free", &[])).unwrap();
        let a = s.register(logging("a", &[g])).unwrap();
        let b = s.register(logging("b", &[g])).unwrap();

        s.schedule(&mut ctx, free, 0.0).unwrap();
        for i in 0..10 {
            let id = if i % 2 == 0 { a } else { b };
            s.schedule(&mut ctx, id, i as f64 * PERIOD_S).unwrap();
            s.run(&mut ctx, i as f64 * PERIOD_S);
            assert!(s.is_scheduled(free));
            assert_ownership_consistent(&s);
        }
    }

    #[test]
    fn test_multi_group_preemption() {
        let mut ctx = Ctx::default();
        let mut s = Scheduler::new();
        let g1 = s.add_group("arm", &["arm_solenoid"]).unwrap();
        let g2 = s.add_group("intake", &["roller_motor"]).unwrap();
        let a = s.register(logging("a", &[g1])).unwrap();
        let b = s.register(logging("b", &[g2])).unwrap();
        let both = s.register(logging("both", &[g1, g2])).unwrap();

        s.schedule(&mut ctx, a, 0.0).unwrap();
        s.schedule(&mut ctx, b, 0.0).unwrap();
        s.schedule(&mut ctx, both, 0.0).unwrap();

        assert_eq!(
            ctx.log,
            vec!["start a", "start b", "end a true", "end b true", "start both"]
        );
        assert_eq!(s.running(), &[both]);
        assert_ownership_consistent(&s);
    }

    #[test]
    fn test_wait_finishes_at_settle_tick() {
        let mut ctx = Ctx::default();
        let mut s = Scheduler::new();
        let w = s.register(Command::wait(0.3)).unwrap();

        s.schedule(&mut ctx, w, 0.0).unwrap();
        for i in 0..15 {
            s.run(&mut ctx, i as f64 * PERIOD_S);
            assert!(s.is_scheduled(w), "finished early at tick {}", i);
        }
        s.run(&mut ctx, 15.0 * PERIOD_S);
        assert!(!s.is_scheduled(w));
    }

    #[test]
    fn test_timeout_finishes_and_forks() {
        let mut ctx = Ctx::default();
        let mut s = Scheduler::new();
        let g = s.add_group("arm", &["arm_solenoid"]).unwrap();
        let next = s.register(logging("next", &[])).unwrap();
        let stuck = s
            .register(
                Command::wait_until("stuck", |_: &Ctx| false)
                    .requiring(g)
                    .with_timeout(0.1)
                    .then_schedule(next),
            )
            .unwrap();

        s.schedule(&mut ctx, stuck, 0.0).unwrap();
        for i in 0..5 {
            s.run(&mut ctx, i as f64 * PERIOD_S);
            assert!(s.is_scheduled(stuck));
        }
        s.run(&mut ctx, 5.0 * PERIOD_S);

        assert!(!s.is_scheduled(stuck));
        assert!(s.is_scheduled(next));
        assert_eq!(s.owner_of(g), None);
    }

    #[test]
    fn test_fork_not_scheduled_on_interrupt() {
        let mut ctx = Ctx::default();
        let mut s = Scheduler::new();
        let next = s.register(logging("next", &[])).unwrap();
        let a = s
            .register(logging("a", &[]).then_schedule(next))
            .unwrap();

        s.schedule(&mut ctx, a, 0.0).unwrap();
        s.cancel(&mut ctx, a);
        s.run(&mut ctx, 0.0);

        assert!(!s.is_scheduled(next));
    }

    #[test]
    fn test_default_command_rescheduled_when_free() {
        let mut ctx = Ctx::default();
        let mut s = Scheduler::new();
        let g = s.add_group("intake", &["roller_motor"]).unwrap();
        let idle = s.register(logging("idle", &[g])).unwrap();
        let once = s
            .register(Command::run_once("once", &[g], |c: &mut Ctx| {
                c.log.push(String::from("once"))
            }))
            .unwrap();
        s.set_default_command(g, idle).unwrap();

        s.run(&mut ctx, 0.0);
        assert_eq!(s.owner_of(g), Some(idle));

        s.schedule(&mut ctx, once, 0.02).unwrap();
        assert_eq!(s.owner_of(g), Some(once));

        s.run(&mut ctx, 0.02);
        assert_eq!(s.owner_of(g), Some(idle));
        assert_eq!(
            ctx.log,
            vec!["start idle", "end idle true", "once", "start idle"]
        );
    }

    #[test]
    fn test_default_waits_for_all_groups() {
        let mut ctx = Ctx::default();
        let mut s = Scheduler::new();
        let g1 = s.add_group("arm", &["arm_solenoid"]).unwrap();
        let g2 = s.add_group("intake", &["roller_motor"]).unwrap();
        let default = s.register(logging("default", &[g1, g2])).unwrap();
        let holder = s.register(logging("holder", &[g2])).unwrap();
        s.set_default_command(g1, default).unwrap();

        s.schedule(&mut ctx, holder, 0.0).unwrap();
        s.run(&mut ctx, 0.0);
        assert!(!s.is_scheduled(default));
        assert!(s.is_scheduled(holder));

        s.cancel(&mut ctx, holder);
        s.run(&mut ctx, 0.02);
        assert!(s.is_scheduled(default));
        assert_ownership_consistent(&s);
    }

    #[test]
    fn test_while_true_binding() {
        let mut ctx = Ctx::default();
        let mut s = Scheduler::new();
        let g = s.add_group("climb", &["climb_solenoid"]).unwrap();
        let a = s.register(logging("a", &[g])).unwrap();
        s.while_true(Trigger::new(|c: &Ctx| c.flag), a).unwrap();

        s.run(&mut ctx, 0.0);
        assert!(!s.is_scheduled(a));

        ctx.flag = true;
        s.run(&mut ctx, 0.02);
        assert!(s.is_scheduled(a));

        s.run(&mut ctx, 0.04);
        assert!(s.is_scheduled(a));

        ctx.flag = false;
        s.run(&mut ctx, 0.06);
        assert!(!s.is_scheduled(a));
        assert_eq!(ctx.log, vec!["start a", "end a true"]);
    }

    #[test]
    fn test_on_true_schedules_once_per_edge() {
        let mut ctx = Ctx::default();
        let mut s = Scheduler::new();
        let once = s
            .register(Command::run_once("once", &[], |c: &mut Ctx| {
                c.log.push(String::from("once"))
            }))
            .unwrap();
        s.on_true(Trigger::new(|c: &Ctx| c.flag), once).unwrap();

        s.run(&mut ctx, 0.0);
        ctx.flag = true;
        for i in 1..10 {
            s.run(&mut ctx, i as f64 * PERIOD_S);
        }
        assert_eq!(ctx.log, vec!["once"]);

        ctx.flag = false;
        s.run(&mut ctx, 0.2);
        ctx.flag = true;
        s.run(&mut ctx, 0.22);
        assert_eq!(ctx.log, vec!["once", "once"]);
    }

    #[test]
    fn test_cancel_all() {
        let mut ctx = Ctx::default();
        let mut s = Scheduler::new();
        let g = s.add_group("climb", &["climb_solenoid"]).unwrap();
        let a = s.register(logging("a", &[g])).unwrap();
        let b = s.register(logging("b", &[])).unwrap();

        s.schedule(&mut ctx, a, 0.0).unwrap();
        s.schedule(&mut ctx, b, 0.0).unwrap();
        s.cancel_all(&mut ctx);

        assert!(s.running().is_empty());
        assert_eq!(s.owner_of(g), None);
        assert_eq!(ctx.log, vec!["start a", "start b", "end b true", "end a true"]);
    }

    #[test]
    fn test_configuration_errors() {
        let mut s: Scheduler<Ctx> = Scheduler::new();
        let g = s.add_group("arm", &["arm_solenoid"]).unwrap();

        assert_eq!(
            s.add_group("arm", &[]),
            Err(SchedulerError::DuplicateGroup("arm"))
        );
        assert_eq!(
            s.add_group("other", &["arm_solenoid"]),
            Err(SchedulerError::ActuatorAlreadyGrouped {
                actuator: "arm_solenoid",
                group: "arm"
            })
        );
        assert_eq!(
            s.register(logging("bad", &[GroupId(5)])).err(),
            Some(SchedulerError::UnknownGroup(GroupId(5)))
        );
        assert_eq!(
            s.register(logging("bad", &[]).then_schedule(CommandId(9))).err(),
            Some(SchedulerError::UnknownCommand(CommandId(9)))
        );
        assert_eq!(
            s.register(Command::sequence(
                "bad",
                vec![logging("inner", &[]).then_schedule(CommandId(4))]
            ))
            .err(),
            Some(SchedulerError::UnknownCommand(CommandId(4)))
        );

        let free = s.register(logging("free", &[])).unwrap();
        assert!(matches!(
            s.set_default_command(g, free),
            Err(SchedulerError::DefaultMissingRequirement { .. })
        ));
        assert_eq!(
            s.on_true(Trigger::new(|_| true), CommandId(42)),
            Err(SchedulerError::UnknownCommand(CommandId(42)))
        );

        let mut ctx = Ctx::default();
        assert_eq!(
            s.schedule(&mut ctx, CommandId(42), 0.0),
            Err(SchedulerError::UnknownCommand(CommandId(42)))
        );
    }

    #[test]
    fn test_status() {
        let mut ctx = Ctx::default();
        let mut s = Scheduler::new();
        let g = s.add_group("climb", &["climb_solenoid"]).unwrap();
        let a = s.register(logging("a", &[g])).unwrap();
        s.set_default_command(g, a).unwrap();
        s.run(&mut ctx, 0.0);

        let status = s.status();
        assert_eq!(status.num_runs, 1);
        assert_eq!(status.running, vec!["a"]);
        assert_eq!(status.groups[0].name, "climb");
        assert_eq!(status.groups[0].owner.as_deref(), Some("a"));
    }
}
