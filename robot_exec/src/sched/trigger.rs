//! Triggers and bindings

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use crate::eqpt::Debouncer;

use super::CommandId;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A boolean condition polled once per cycle.
///
/// Triggers are pure functions of the robot context and the cycle time, so that every trigger in
/// a cycle sees the same snapshot. Combinators evaluate both operands every poll, which keeps any
/// debounce state inside them up to date.
pub struct Trigger<C> {
    condition: Box<dyn FnMut(&C, f64) -> bool>,
}

/// A trigger bound to a registered command.
pub(crate) struct Binding<C> {
    trigger: Trigger<C>,
    kind: BindingKind,
    command: CommandId,

    /// Value of the trigger on the previous poll, `None` before the first poll.
    last: Option<bool>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// How a trigger's edges act on its bound command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// Schedule on each rising edge.
    OnTrue,

    /// Schedule on each falling edge.
    OnFalse,

    /// Schedule on the rising edge, cancel on the falling edge.
    WhileTrue,

    /// Schedule on the falling edge, cancel on the rising edge.
    WhileFalse,

    /// On each rising edge, cancel the command if it is running, otherwise schedule it.
    ToggleOnTrue,
}

/// Action requested by a binding during a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BindingAction {
    Schedule(CommandId),
    Cancel(CommandId),
    Toggle(CommandId),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<C: 'static> Trigger<C> {
    /// A trigger on a condition of the context.
    pub fn new(mut condition: impl FnMut(&C) -> bool + 'static) -> Self {
        Self::timed(move |c, _| condition(c))
    }

    /// A trigger on a condition of the context and the cycle time.
    pub fn timed(condition: impl FnMut(&C, f64) -> bool + 'static) -> Self {
        Self {
            condition: Box::new(condition),
        }
    }

    pub fn and(mut self, mut other: Trigger<C>) -> Self {
        Self::timed(move |c, t| {
            let a = self.poll(c, t);
            let b = other.poll(c, t);
            a && b
        })
    }

    pub fn or(mut self, mut other: Trigger<C>) -> Self {
        Self::timed(move |c, t| {
            let a = self.poll(c, t);
            let b = other.poll(c, t);
            a || b
        })
    }

    pub fn negate(mut self) -> Self {
        Self::timed(move |c, t| !self.poll(c, t))
    }

    /// Only report a change once the condition has held its new value for `window_s`.
    pub fn debounce(self, window_s: f64) -> Self {
        self.debounce_asymmetric(window_s, window_s)
    }

    /// Debounce with separate windows for the rising and falling edges.
    pub fn debounce_asymmetric(mut self, rising_window_s: f64, falling_window_s: f64) -> Self {
        let mut debouncer = Debouncer::asymmetric(rising_window_s, falling_window_s);

        Self::timed(move |c, t| {
            let raw = self.poll(c, t);
            debouncer.update(raw, t)
        })
    }
}

impl<C> Trigger<C> {
    pub(crate) fn poll(&mut self, ctx: &C, now_s: f64) -> bool {
        (self.condition)(ctx, now_s)
    }
}

impl<C> Binding<C> {
    pub(crate) fn new(trigger: Trigger<C>, kind: BindingKind, command: CommandId) -> Self {
        Self {
            trigger,
            kind,
            command,
            last: None,
        }
    }

    /// Poll the trigger and return the action its edge calls for, if any.
    ///
    /// The first poll only records the baseline, so a trigger that is already true when bound
    /// does not fire.
    pub(crate) fn poll(&mut self, ctx: &C, now_s: f64) -> Option<BindingAction> {
        let value = self.trigger.poll(ctx, now_s);
        let last = self.last.replace(value)?;

        let rising = value && !last;
        let falling = !value && last;

        match self.kind {
            BindingKind::OnTrue if rising => Some(BindingAction::Schedule(self.command)),
            BindingKind::OnFalse if falling => Some(BindingAction::Schedule(self.command)),
            BindingKind::WhileTrue if rising => Some(BindingAction::Schedule(self.command)),
            BindingKind::WhileTrue if falling => Some(BindingAction::Cancel(self.command)),
            BindingKind::WhileFalse if falling => Some(BindingAction::Schedule(self.command)),
            BindingKind::WhileFalse if rising => Some(BindingAction::Cancel(self.command)),
            BindingKind::ToggleOnTrue if rising => Some(BindingAction::Toggle(self.command)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ctx {
        a: bool,
        b: bool,
    }

    fn ctx(a: bool, b: bool) -> Ctx {
        Ctx { a, b }
    }

    #[test]
    fn test_combinators() {
        let mut and = Trigger::new(|c: &Ctx| c.a).and(Trigger::new(|c: &Ctx| c.b));
        let mut or = Trigger::new(|c: &Ctx| c.a).or(Trigger::new(|c: &Ctx| c.b));
        let mut not = Trigger::new(|c: &Ctx| c.a).negate();

        assert!(!and.poll(&ctx(true, false), 0.0));
        assert!(and.poll(&ctx(true, true), 0.0));
        assert!(or.poll(&ctx(false, true), 0.0));
        assert!(!or.poll(&ctx(false, false), 0.0));
        assert!(not.poll(&ctx(false, false), 0.0));
    }

    #[test]
    fn test_debounce_filters_short_pulses() {
        let mut t = Trigger::new(|c: &Ctx| c.a).debounce(0.1);

        // 0.06 s pulse
        assert!(!t.poll(&ctx(true, false), 0.00));
        assert!(!t.poll(&ctx(true, false), 0.02));
        assert!(!t.poll(&ctx(true, false), 0.04));
        assert!(!t.poll(&ctx(false, false), 0.06));

        for i in 4..9 {
            assert!(!t.poll(&ctx(true, false), i as f64 * 0.02));
        }
        assert!(t.poll(&ctx(true, false), 0.18));
    }

    #[test]
    fn test_on_true_fires_once_per_rising_edge() {
        let mut b = Binding::new(Trigger::new(|c: &Ctx| c.a), BindingKind::OnTrue, CommandId(3));

        assert_eq!(b.poll(&ctx(false, false), 0.0), None);
        assert_eq!(
            b.poll(&ctx(true, false), 0.02),
            Some(BindingAction::Schedule(CommandId(3)))
        );
        assert_eq!(b.poll(&ctx(true, false), 0.04), None);
        assert_eq!(b.poll(&ctx(false, false), 0.06), None);
        assert_eq!(
            b.poll(&ctx(true, false), 0.08),
            Some(BindingAction::Schedule(CommandId(3)))
        );
    }

    #[test]
    fn test_first_poll_sets_baseline() {
        let mut b = Binding::new(Trigger::new(|c: &Ctx| c.a), BindingKind::OnTrue, CommandId(0));

        assert_eq!(b.poll(&ctx(true, false), 0.0), None);
        assert_eq!(b.poll(&ctx(true, false), 0.02), None);
    }

    #[test]
    fn test_while_true_cancels_on_falling_edge() {
        let mut b = Binding::new(
            Trigger::new(|c: &Ctx| c.a),
            BindingKind::WhileTrue,
            CommandId(1),
        );

        b.poll(&ctx(false, false), 0.0);
        assert_eq!(
            b.poll(&ctx(true, false), 0.02),
            Some(BindingAction::Schedule(CommandId(1)))
        );
        assert_eq!(
            b.poll(&ctx(false, false), 0.04),
            Some(BindingAction::Cancel(CommandId(1)))
        );
    }

    #[test]
    fn test_toggle() {
        let mut b = Binding::new(
            Trigger::new(|c: &Ctx| c.a),
            BindingKind::ToggleOnTrue,
            CommandId(2),
        );

        b.poll(&ctx(false, false), 0.0);
        assert_eq!(
            b.poll(&ctx(true, false), 0.02),
            Some(BindingAction::Toggle(CommandId(2)))
        );
        assert_eq!(b.poll(&ctx(false, false), 0.04), None);
    }
}
