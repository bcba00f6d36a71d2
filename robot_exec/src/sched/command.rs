//! Commands
//!
//! A [`Command`] is a unit of work run by the [`Scheduler`](super::Scheduler). Every command has
//! the same four-phase lifecycle:
//!
//! 1. `initialize` - once, when the command is scheduled.
//! 2. `execute` - once per cycle while the command is running.
//! 3. `is_finished` - polled every cycle, before and after `execute`.
//! 4. `end` - once, with `interrupted = true` if the command was cancelled or pre-empted.
//!
//! The behaviour behind those phases is one of a small set of variants: plain closures
//! ([`Functional`]), a non-blocking wait, an ordered sequence of sub-commands, or a choice between
//! two sub-commands made at start.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::collections::BTreeSet;
use std::fmt;

use util::time::elapsed_at_least;

use super::{CommandId, GroupId};

// ------------------------------------------------------------------------------------------------
// TYPES
// ------------------------------------------------------------------------------------------------

/// An action run against the robot context.
pub type Action<C> = Box<dyn FnMut(&mut C)>;

/// An end action, given whether the command was interrupted.
pub type EndAction<C> = Box<dyn FnMut(&mut C, bool)>;

/// A condition evaluated against the robot context.
pub type Condition<C> = Box<dyn FnMut(&C) -> bool>;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A schedulable unit of work.
pub struct Command<C> {
    name: String,

    requirements: BTreeSet<GroupId>,

    body: Body<C>,

    /// Extra finish condition added by [`Command::until`].
    finish_when: Option<Condition<C>>,

    /// Maximum run time, after which the command is forced to finish.
    timeout_s: Option<f64>,

    /// Registered command to schedule when this one finishes without being interrupted.
    then_schedule: Option<CommandId>,

    start_s: f64,

    timed_out: bool,
}

/// Closure-backed command behaviour.
///
/// Any missing phase does nothing, and a command without an `is_finished` condition runs until it
/// is interrupted.
pub struct Functional<C> {
    on_start: Option<Action<C>>,
    on_execute: Option<Action<C>>,
    on_end: Option<EndAction<C>>,
    is_finished: Option<Condition<C>>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

enum Body<C> {
    Functional(Functional<C>),

    Wait {
        duration_s: f64,
    },

    Sequence {
        steps: Vec<Command<C>>,
        current: usize,
    },

    Either {
        condition: Condition<C>,
        on_true: Box<Command<C>>,
        on_false: Box<Command<C>>,
        selected: bool,
    },
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<C: 'static> Functional<C> {
    pub fn new() -> Self {
        Self {
            on_start: None,
            on_execute: None,
            on_end: None,
            is_finished: None,
        }
    }

    pub fn on_start(mut self, f: impl FnMut(&mut C) + 'static) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    pub fn on_execute(mut self, f: impl FnMut(&mut C) + 'static) -> Self {
        self.on_execute = Some(Box::new(f));
        self
    }

    pub fn on_end(mut self, f: impl FnMut(&mut C, bool) + 'static) -> Self {
        self.on_end = Some(Box::new(f));
        self
    }

    pub fn is_finished(mut self, f: impl FnMut(&C) -> bool + 'static) -> Self {
        self.is_finished = Some(Box::new(f));
        self
    }
}

impl<C: 'static> Default for Functional<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> Command<C> {
    fn from_body(name: &str, requirements: BTreeSet<GroupId>, body: Body<C>) -> Self {
        Self {
            name: String::from(name),
            requirements,
            body,
            finish_when: None,
            timeout_s: None,
            then_schedule: None,
            start_s: 0.0,
            timed_out: false,
        }
    }

    // ---- CONSTRUCTORS ----

    /// Build a command from closure-backed behaviour.
    pub fn functional(name: &str, requirements: &[GroupId], functional: Functional<C>) -> Self {
        Self::from_body(
            name,
            requirements.iter().copied().collect(),
            Body::Functional(functional),
        )
    }

    /// Run `f` every cycle until interrupted.
    pub fn run(name: &str, requirements: &[GroupId], f: impl FnMut(&mut C) + 'static) -> Self {
        Self::functional(name, requirements, Functional::new().on_execute(f))
    }

    /// Run `f` once on start and finish immediately.
    pub fn run_once(
        name: &str,
        requirements: &[GroupId],
        f: impl FnMut(&mut C) + 'static,
    ) -> Self {
        Self::functional(
            name,
            requirements,
            Functional::new().on_start(f).is_finished(|_| true),
        )
    }

    /// Run `f` every cycle, and `end` once when the command ends for any reason.
    pub fn run_end(
        name: &str,
        requirements: &[GroupId],
        f: impl FnMut(&mut C) + 'static,
        mut end: impl FnMut(&mut C) + 'static,
    ) -> Self {
        Self::functional(
            name,
            requirements,
            Functional::new()
                .on_execute(f)
                .on_end(move |c, _| end(c)),
        )
    }

    /// Run `start` once on start and `end` once when the command ends for any reason.
    pub fn start_end(
        name: &str,
        requirements: &[GroupId],
        start: impl FnMut(&mut C) + 'static,
        mut end: impl FnMut(&mut C) + 'static,
    ) -> Self {
        Self::functional(
            name,
            requirements,
            Functional::new()
                .on_start(start)
                .on_end(move |c, _| end(c)),
        )
    }

    /// A command that does nothing and finishes immediately.
    pub fn none() -> Self {
        Self::functional("none", &[], Functional::new().is_finished(|_| true))
    }

    /// A non-blocking wait that finishes once `duration_s` has elapsed since it started.
    pub fn wait(duration_s: f64) -> Self {
        Self::from_body(
            &format!("wait({:.3})", duration_s),
            BTreeSet::new(),
            Body::Wait { duration_s },
        )
    }

    /// A command that finishes once `condition` holds.
    pub fn wait_until(name: &str, condition: impl FnMut(&C) -> bool + 'static) -> Self {
        Self::functional(name, &[], Functional::new().is_finished(condition))
    }

    /// Run `steps` one after the other.
    ///
    /// The sequence requires the union of its steps' requirements for its whole duration, and
    /// finishes once the last step has finished.
    pub fn sequence(name: &str, steps: Vec<Command<C>>) -> Self {
        let requirements = steps
            .iter()
            .flat_map(|s| s.requirements.iter().copied())
            .collect();

        Self::from_body(name, requirements, Body::Sequence { steps, current: 0 })
    }

    /// Run `on_true` if `condition` holds when the command starts, otherwise `on_false`.
    pub fn either(
        name: &str,
        condition: impl FnMut(&C) -> bool + 'static,
        on_true: Command<C>,
        on_false: Command<C>,
    ) -> Self {
        let requirements = on_true
            .requirements
            .union(&on_false.requirements)
            .copied()
            .collect();

        Self::from_body(
            name,
            requirements,
            Body::Either {
                condition: Box::new(condition),
                on_true: Box::new(on_true),
                on_false: Box::new(on_false),
                selected: false,
            },
        )
    }

    // ---- DECORATORS ----

    /// Also finish once `condition` holds.
    ///
    /// The condition is checked before `execute`, so the command does not act on a cycle in which
    /// the condition already holds.
    pub fn until(mut self, mut condition: impl FnMut(&C) -> bool + 'static) -> Self {
        let combined: Condition<C> = match self.finish_when.take() {
            Some(mut existing) => Box::new(move |c: &C| existing(c) || condition(c)),
            None => Box::new(condition),
        };
        self.finish_when = Some(combined);
        self
    }

    /// Only run while `condition` holds.
    pub fn only_while(self, mut condition: impl FnMut(&C) -> bool + 'static) -> Self {
        self.until(move |c| !condition(c))
    }

    /// Force the command to finish once it has run for `timeout_s`.
    pub fn with_timeout(mut self, timeout_s: f64) -> Self {
        self.timeout_s = Some(timeout_s);
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = String::from(name);
        self
    }

    /// Add a requirement.
    pub fn requiring(mut self, group: GroupId) -> Self {
        self.requirements.insert(group);
        self
    }

    /// Schedule the registered command `next` when this command finishes without being
    /// interrupted.
    pub fn then_schedule(mut self, next: CommandId) -> Self {
        self.then_schedule = Some(next);
        self
    }
}

impl<C> Command<C> {
    // ---- ACCESSORS ----

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn requirements(&self) -> &BTreeSet<GroupId> {
        &self.requirements
    }

    pub fn timeout_s(&self) -> Option<f64> {
        self.timeout_s
    }

    /// Returns `true` if the last finish of the command was forced by its timeout.
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// All commands this command, or any nested command, schedules on finishing.
    pub(crate) fn followers(&self) -> Vec<CommandId> {
        let mut ids: Vec<CommandId> = self.then_schedule.into_iter().collect();

        match &self.body {
            Body::Sequence { steps, .. } => {
                for s in steps {
                    ids.extend(s.followers());
                }
            }
            Body::Either {
                on_true, on_false, ..
            } => {
                ids.extend(on_true.followers());
                ids.extend(on_false.followers());
            }
            _ => (),
        }

        ids
    }

    // ---- LIFECYCLE ----

    pub(crate) fn initialize(&mut self, ctx: &mut C, now_s: f64) {
        self.start_s = now_s;
        self.timed_out = false;

        match &mut self.body {
            Body::Functional(f) => {
                if let Some(on_start) = &mut f.on_start {
                    on_start(ctx);
                }
            }
            Body::Wait { .. } => (),
            Body::Sequence { steps, current } => {
                *current = 0;
                if let Some(first) = steps.first_mut() {
                    first.initialize(ctx, now_s);
                }
            }
            Body::Either {
                condition,
                on_true,
                on_false,
                selected,
            } => {
                *selected = condition(ctx);
                if *selected {
                    on_true.initialize(ctx, now_s);
                } else {
                    on_false.initialize(ctx, now_s);
                }
            }
        }
    }

    pub(crate) fn execute(&mut self, ctx: &mut C, now_s: f64, followers: &mut Vec<CommandId>) {
        match &mut self.body {
            Body::Functional(f) => {
                if let Some(on_execute) = &mut f.on_execute {
                    on_execute(ctx);
                }
            }
            Body::Wait { .. } => (),
            Body::Sequence { steps, current } => {
                if let Some(step) = steps.get_mut(*current) {
                    if !step.is_finished(ctx, now_s) {
                        step.execute(ctx, now_s, followers);
                    }

                    if step.is_finished(ctx, now_s) {
                        step.end(ctx, false, followers);
                        *current += 1;

                        if let Some(next) = steps.get_mut(*current) {
                            next.initialize(ctx, now_s);
                        }
                    }
                }
            }
            Body::Either {
                on_true,
                on_false,
                selected,
                ..
            } => {
                if *selected {
                    on_true.execute(ctx, now_s, followers);
                } else {
                    on_false.execute(ctx, now_s, followers);
                }
            }
        }
    }

    pub(crate) fn is_finished(&mut self, ctx: &C, now_s: f64) -> bool {
        if let Some(timeout_s) = self.timeout_s {
            if elapsed_at_least(self.start_s, now_s, timeout_s) {
                self.timed_out = true;
                return true;
            }
        }

        if let Some(finish_when) = &mut self.finish_when {
            if finish_when(ctx) {
                return true;
            }
        }

        match &mut self.body {
            Body::Functional(f) => match &mut f.is_finished {
                Some(is_finished) => is_finished(ctx),
                None => false,
            },
            Body::Wait { duration_s } => elapsed_at_least(self.start_s, now_s, *duration_s),
            Body::Sequence { steps, current } => *current >= steps.len(),
            Body::Either {
                on_true,
                on_false,
                selected,
                ..
            } => {
                if *selected {
                    on_true.is_finished(ctx, now_s)
                } else {
                    on_false.is_finished(ctx, now_s)
                }
            }
        }
    }

    pub(crate) fn end(&mut self, ctx: &mut C, interrupted: bool, followers: &mut Vec<CommandId>) {
        match &mut self.body {
            Body::Functional(f) => {
                if let Some(on_end) = &mut f.on_end {
                    on_end(ctx, interrupted);
                }
            }
            Body::Wait { .. } => (),
            Body::Sequence { steps, current } => {
                // Completed steps have already ended, only the active one is left
                if let Some(step) = steps.get_mut(*current) {
                    step.end(ctx, interrupted, followers);
                }
            }
            Body::Either {
                on_true,
                on_false,
                selected,
                ..
            } => {
                if *selected {
                    on_true.end(ctx, interrupted, followers);
                } else {
                    on_false.end(ctx, interrupted, followers);
                }
            }
        }

        if !interrupted {
            if let Some(next) = self.then_schedule {
                followers.push(next);
            }
        }
    }
}

impl<C> fmt::Debug for Command<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("requirements", &self.requirements)
            .field("timeout_s", &self.timeout_s)
            .finish()
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

    /// Drive a command the way the scheduler does, returning the cycle it finished on.
    fn drive(cmd: &mut Command<Ctx>, ctx: &mut Ctx, max_cycles: u32) -> Option<u32> {
        let mut followers = vec![];
        cmd.initialize(ctx, 0.0);

        for cycle in 0..max_cycles {
            let now_s = cycle as f64 * PERIOD_S;
            if !cmd.is_finished(ctx, now_s) {
                cmd.execute(ctx, now_s, &mut followers);
            }
            if cmd.is_finished(ctx, now_s) {
                cmd.end(ctx, false, &mut followers);
                return Some(cycle);
            }
        }

        None
    }

    #[test]
    fn test_wait_finishes_at_duration() {
        let mut ctx = Ctx::default();
        let mut cmd = Command::wait(0.3);

        // ceil(0.3 / 0.02) = 15
        assert_eq!(drive(&mut cmd, &mut ctx, 100), Some(15));
    }

    #[test]
    fn test_sequence_runs_steps_in_order() {
        let mut ctx = Ctx::default();
        let mut cmd = Command::sequence(
            "seq",
            vec![
                Command::run_once("a", &[], |c: &mut Ctx| c.log.push("a".into())),
                Command::wait(0.1),
                Command::run_once("b", &[], |c: &mut Ctx| c.log.push("b".into())),
            ],
        );

        let finished = drive(&mut cmd, &mut ctx, 100).unwrap();
        assert_eq!(ctx.log, vec!["a", "b"]);

        // a finishes on cycle 0, the wait starts then and finishes on cycle 5, b starts then and
        // finishes on cycle 6
        assert_eq!(finished, 6);
    }

    #[test]
    fn test_sequence_requirements_are_union() {
        let cmd: Command<Ctx> = Command::sequence(
            "seq",
            vec![
                Command::run_once("a", &[GroupId(0)], |_| ()),
                Command::run_once("b", &[GroupId(2)], |_| ()),
            ],
        );

        let reqs: Vec<GroupId> = cmd.requirements().iter().copied().collect();
        assert_eq!(reqs, vec![GroupId(0), GroupId(2)]);
    }

    #[test]
    fn test_until_prevents_execute() {
        let mut ctx = Ctx {
            flag: true,
            ..Default::default()
        };
        let mut cmd = Command::run("run", &[], |c: &mut Ctx| c.log.push("exec".into()))
            .until(|c| c.flag);

        assert_eq!(drive(&mut cmd, &mut ctx, 10), Some(0));
        assert!(ctx.log.is_empty());
    }

    #[test]
    fn test_timeout_forces_finish() {
        let mut ctx = Ctx::default();
        let mut cmd = Command::run("forever", &[], |_: &mut Ctx| ()).with_timeout(0.5);

        assert_eq!(drive(&mut cmd, &mut ctx, 100), Some(25));
        assert!(cmd.timed_out());
    }

    #[test]
    fn test_either_selects_at_start() {
        let mut ctx = Ctx::default();
        let mut cmd = Command::either(
            "either",
            |c: &Ctx| c.flag,
            Command::run_once("yes", &[], |c: &mut Ctx| c.log.push("yes".into())),
            Command::run_once("no", &[], |c: &mut Ctx| c.log.push("no".into())),
        );

        drive(&mut cmd, &mut ctx, 10);
        ctx.flag = true;
        drive(&mut cmd, &mut ctx, 10);

        assert_eq!(ctx.log, vec!["no", "yes"]);
    }

    #[test]
    fn test_followers_only_on_normal_end() {
        let mut ctx = Ctx::default();
        let mut followers = vec![];
        let mut cmd = Command::run_once("a", &[], |_: &mut Ctx| ()).then_schedule(CommandId(7));

        cmd.initialize(&mut ctx, 0.0);
        cmd.end(&mut ctx, true, &mut followers);
        assert!(followers.is_empty());

        cmd.initialize(&mut ctx, 0.0);
        cmd.end(&mut ctx, false, &mut followers);
        assert_eq!(followers, vec![CommandId(7)]);
    }

    #[test]
    fn test_interrupted_sequence_ends_active_step() {
        let mut ctx = Ctx::default();
        let mut followers = vec![];
        let mut cmd = Command::sequence(
            "seq",
            vec![
                Command::start_end(
                    "a",
                    &[],
                    |c: &mut Ctx| c.log.push("start a".into()),
                    |c: &mut Ctx| c.log.push("end a".into()),
                ),
                Command::run_once("b", &[], |c: &mut Ctx| c.log.push("b".into())),
            ],
        );

        cmd.initialize(&mut ctx, 0.0);
        cmd.execute(&mut ctx, 0.0, &mut followers);
        cmd.end(&mut ctx, true, &mut followers);

        assert_eq!(ctx.log, vec!["start a", "end a"]);
    }
}
