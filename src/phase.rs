use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Login,
    Form,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Form => "form",
        }
    }
}

/// Motion applied to the outgoing panel while a transition is pending.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExitMotion {
    pub opacity: f32,
    pub offset_y: f32,
}

impl ExitMotion {
    const TRAVEL: f32 = 16.0;

    /// Login slides up when leaving, the form slides down.
    pub fn leaving(phase: Phase) -> Self {
        let offset_y = match phase {
            Phase::Login => -Self::TRAVEL,
            Phase::Form => Self::TRAVEL,
        };
        Self {
            opacity: 0.0,
            offset_y,
        }
    }

    /// Interpolated motion at `progress` in [0, 1] of the exit effect.
    pub fn at(&self, progress: f32) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        Self {
            opacity: 1.0 + (self.opacity - 1.0) * progress,
            offset_y: self.offset_y * progress,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingTransition {
    pub ticket: u64,
    pub from: Phase,
    pub to: Phase,
    pub delay: Duration,
}

impl PendingTransition {
    pub fn exit_motion(&self) -> ExitMotion {
        ExitMotion::leaving(self.from)
    }
}

pub struct PhaseMachine {
    active: Phase,
    pending: Option<PendingTransition>,
    next_ticket: u64,
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self {
            active: Phase::Login,
            pending: None,
            next_ticket: 1,
        }
    }

    pub fn active(&self) -> Phase {
        self.active
    }

    pub fn pending(&self) -> Option<&PendingTransition> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts the first half of a transition towards `to`. Returns `None` when
    /// a transition is already in flight or `to` is already active.
    pub fn begin(&mut self, to: Phase, delay: Duration) -> Option<PendingTransition> {
        if self.pending.is_some() || self.active == to {
            return None;
        }
        let pending = PendingTransition {
            ticket: self.next_ticket,
            from: self.active,
            to,
            delay,
        };
        self.next_ticket += 1;
        self.pending = Some(pending);
        Some(pending)
    }

    /// Second half of a transition. Stale tickets are ignored.
    pub fn complete(&mut self, ticket: u64) -> bool {
        match self.pending {
            Some(pending) if pending.ticket == ticket => {
                self.active = pending.to;
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Immediate return to login. Cancels whatever is pending.
    pub fn reset(&mut self) -> Option<PendingTransition> {
        self.active = Phase::Login;
        self.pending.take()
    }
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(270);

    #[test]
    fn starts_on_login() {
        let machine = PhaseMachine::new();
        assert_eq!(machine.active(), Phase::Login);
        assert!(!machine.is_pending());
    }

    #[test]
    fn phase_changes_only_after_completion() {
        let mut machine = PhaseMachine::new();
        let pending = machine.begin(Phase::Form, DELAY).unwrap();
        assert_eq!(pending.from, Phase::Login);
        assert_eq!(pending.delay, DELAY);
        assert_eq!(machine.active(), Phase::Login);

        assert!(machine.complete(pending.ticket));
        assert_eq!(machine.active(), Phase::Form);
        assert!(machine.pending().is_none());
    }

    #[test]
    fn overlapping_begin_is_refused() {
        let mut machine = PhaseMachine::new();
        let first = machine.begin(Phase::Form, DELAY).unwrap();
        assert!(machine.begin(Phase::Form, DELAY).is_none());
        assert!(machine.complete(first.ticket));
        assert!(machine.begin(Phase::Form, DELAY).is_none());
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut machine = PhaseMachine::new();
        let first = machine.begin(Phase::Form, DELAY).unwrap();
        machine.reset();
        let second = machine.begin(Phase::Form, DELAY).unwrap();
        assert_ne!(first.ticket, second.ticket);

        assert!(!machine.complete(first.ticket));
        assert_eq!(machine.active(), Phase::Login);
        assert!(machine.complete(second.ticket));
        assert_eq!(machine.active(), Phase::Form);
    }

    #[test]
    fn reset_cancels_pending() {
        let mut machine = PhaseMachine::new();
        let pending = machine.begin(Phase::Form, DELAY).unwrap();
        assert_eq!(machine.reset(), Some(pending));
        assert!(!machine.complete(pending.ticket));
        assert_eq!(machine.active(), Phase::Login);
    }

    #[test]
    fn exit_motion_interpolates() {
        let motion = ExitMotion::leaving(Phase::Login);
        assert_eq!(motion.at(0.0).opacity, 1.0);
        assert_eq!(motion.at(0.0).offset_y, 0.0);
        assert_eq!(motion.at(1.0).opacity, 0.0);
        assert_eq!(motion.at(1.0).offset_y, -16.0);
        assert_eq!(ExitMotion::leaving(Phase::Form).at(0.5).offset_y, 8.0);
    }
}
