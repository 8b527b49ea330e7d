use std::time::Duration;

use crate::{
    color::{ColorAccent, ColorError},
    configuration::Settings,
    overlay::SuccessOverlay,
    password_toggle::{PasswordToggles, Visibility},
    phase::{PendingTransition, Phase, PhaseMachine},
    range_feedback::{RangeControl, RangeFeedback},
    submission::{FormEntries, SubmissionSink},
    validation::CredentialCheck,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldId {
    LoginEmail,
    LoginPassword,
    Name,
    Email,
    Phone,
    Password,
}

impl FieldId {
    pub const LOGIN: [FieldId; 2] = [FieldId::LoginEmail, FieldId::LoginPassword];
    pub const FORM: [FieldId; 4] = [
        FieldId::Name,
        FieldId::Email,
        FieldId::Phone,
        FieldId::Password,
    ];
    pub const PASSWORDS: [FieldId; 2] = [FieldId::LoginPassword, FieldId::Password];

    /// Name the field is submitted under.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoginEmail => "loginEmail",
            Self::LoginPassword => "loginPassword",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Password => "password",
        }
    }
}

pub const RANGE_FIELD: &str = "experience";
pub const COLOR_FIELD: &str = "favColor";

/// The handful of document operations the controller needs. The caller owns
/// the actual inputs and hands them in; tests use a recording fake.
pub trait FormSurface {
    fn value(&self, field: FieldId) -> String;
    fn shake(&mut self, field: FieldId);
    fn focus(&mut self, field: FieldId);
    fn set_masked(&mut self, field: FieldId, masked: bool);
    fn clear(&mut self, field: FieldId);
}

pub struct FormFlow<S: SubmissionSink> {
    phase: PhaseMachine,
    range: RangeControl,
    accent: ColorAccent,
    color: String,
    default_color: String,
    toggles: PasswordToggles,
    overlay: Option<SuccessOverlay>,
    sink: S,
    transition_delay: Duration,
    password_min_length: usize,
    glow_alpha: f32,
}

impl<S: SubmissionSink> FormFlow<S> {
    pub fn new(settings: &Settings, sink: S) -> Self {
        let range = settings.range.control();
        let feedback = range.feedback();
        log::debug!(
            "[flow] range starts at {} ({:.1}%, {:?})",
            feedback.echo,
            feedback.percent,
            feedback.tier
        );
        Self {
            phase: PhaseMachine::new(),
            range,
            accent: ColorAccent::default(),
            color: settings.default_color.clone(),
            default_color: settings.default_color.clone(),
            toggles: PasswordToggles::new(&FieldId::PASSWORDS),
            overlay: None,
            sink,
            transition_delay: settings.transition_delay(),
            password_min_length: settings.password_min_length,
            glow_alpha: settings.glow_alpha,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase.active()
    }

    pub fn pending(&self) -> Option<&PendingTransition> {
        self.phase.pending()
    }

    pub fn range(&self) -> &RangeControl {
        &self.range
    }

    pub fn range_feedback(&self) -> RangeFeedback {
        self.range.feedback()
    }

    pub fn accent(&self) -> &ColorAccent {
        &self.accent
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn toggles(&self) -> &PasswordToggles {
        &self.toggles
    }

    pub fn overlay(&self) -> Option<&SuccessOverlay> {
        self.overlay.as_ref()
    }

    fn is_idle_on(&self, phase: Phase) -> bool {
        self.overlay.is_none() && !self.phase.is_pending() && self.phase.active() == phase
    }

    /// Login → form. Every failing field is shaken and focused, and any
    /// failure keeps the login panel up.
    pub fn proceed(&mut self, surface: &mut impl FormSurface) -> Option<PendingTransition> {
        if !self.is_idle_on(Phase::Login) {
            return None;
        }

        let check = CredentialCheck::run(
            &surface.value(FieldId::LoginEmail),
            &surface.value(FieldId::LoginPassword),
            self.password_min_length,
        );
        if check.email.is_err() {
            surface.shake(FieldId::LoginEmail);
            surface.focus(FieldId::LoginEmail);
        }
        if check.password.is_err() {
            surface.shake(FieldId::LoginPassword);
            surface.focus(FieldId::LoginPassword);
        }
        if !check.is_valid() {
            for issue in [&check.email, &check.password]
                .into_iter()
                .filter_map(|result| result.as_ref().err())
            {
                log::debug!("[flow] login held back: {}", issue.label());
            }
            return None;
        }

        self.begin(Phase::Form)
    }

    pub fn back(&mut self) -> Option<PendingTransition> {
        if !self.is_idle_on(Phase::Form) {
            return None;
        }
        self.begin(Phase::Login)
    }

    fn begin(&mut self, to: Phase) -> Option<PendingTransition> {
        let pending = self.phase.begin(to, self.transition_delay)?;
        log::debug!(
            "[flow] transition #{} {} -> {} after {:?}",
            pending.ticket,
            pending.from.label(),
            pending.to.label(),
            pending.delay
        );
        Some(pending)
    }

    pub fn complete_transition(&mut self, ticket: u64) -> bool {
        let completed = self.phase.complete(ticket);
        if completed {
            log::debug!(
                "[flow] transition #{ticket} done, {} active",
                self.phase.active().label()
            );
        } else {
            log::debug!("[flow] ignoring stale transition #{ticket}");
        }
        completed
    }

    pub fn toggle_password(
        &mut self,
        target: FieldId,
        surface: &mut impl FormSurface,
    ) -> Option<Visibility> {
        let visibility = self.toggles.toggle(target)?;
        surface.set_masked(target, visibility == Visibility::Masked);
        Some(visibility)
    }

    pub fn set_range(&mut self, value: f64) {
        self.range.set(value);
        log::trace!("[flow] range set to {}", self.range.value());
    }

    pub fn step_range(&mut self, up: bool) {
        if up {
            self.range.step_up();
        } else {
            self.range.step_down();
        }
    }

    pub fn pick_color(&mut self, hex: &str) -> Result<(), ColorError> {
        self.accent.apply(hex, self.glow_alpha)?;
        if let Some(glow) = self.accent.glow() {
            log::debug!("[flow] accent {hex} with glow {glow}");
        }
        self.color = hex.to_string();
        Ok(())
    }

    /// Captures the second panel and hands it to the sink. Returns `false`
    /// when the form is not the settled, active panel.
    pub fn submit(&mut self, surface: &mut impl FormSurface) -> bool {
        if !self.is_idle_on(Phase::Form) {
            return false;
        }

        let mut entries = FormEntries::new();
        for field in FieldId::FORM {
            entries.insert(field.name(), surface.value(field));
        }
        entries.insert(RANGE_FIELD, self.range.feedback().echo);
        entries.insert(COLOR_FIELD, self.color.clone());

        log::debug!(
            "[flow] submitting experience {} with color {}",
            entries.get(RANGE_FIELD).unwrap_or_default(),
            entries.get(COLOR_FIELD).unwrap_or_default()
        );
        self.sink.deliver(&entries);
        self.overlay = Some(SuccessOverlay::confirmation());
        true
    }

    /// Removes the overlay and puts everything back the way it started,
    /// without animation.
    pub fn dismiss_overlay(&mut self, surface: &mut impl FormSurface) {
        if self.overlay.take().is_none() {
            return;
        }
        self.reset(surface);
    }

    fn reset(&mut self, surface: &mut impl FormSurface) {
        if let Some(cancelled) = self.phase.reset() {
            log::debug!("[flow] cancelled transition #{}", cancelled.ticket);
        }
        for field in FieldId::LOGIN.into_iter().chain(FieldId::FORM) {
            surface.clear(field);
        }
        self.toggles.mask_all();
        for toggle in self.toggles.iter() {
            surface.set_masked(toggle.target(), toggle.masks());
        }
        self.range.reset();
        self.accent.clear();
        self.color = self.default_color.clone();
        log::debug!("[flow] reset to login");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::range_feedback::Tier;

    #[derive(Default)]
    struct RecordingSurface {
        values: HashMap<FieldId, String>,
        masked: HashMap<FieldId, bool>,
        shaken: Vec<FieldId>,
        focused: Vec<FieldId>,
    }

    impl RecordingSurface {
        fn with(values: &[(FieldId, &str)]) -> Self {
            Self {
                values: values
                    .iter()
                    .map(|(field, value)| (*field, value.to_string()))
                    .collect(),
                ..Self::default()
            }
        }

        fn type_into(&mut self, field: FieldId, value: &str) {
            self.values.insert(field, value.to_string());
        }
    }

    impl FormSurface for RecordingSurface {
        fn value(&self, field: FieldId) -> String {
            self.values.get(&field).cloned().unwrap_or_default()
        }

        fn shake(&mut self, field: FieldId) {
            self.shaken.push(field);
        }

        fn focus(&mut self, field: FieldId) {
            self.focused.push(field);
        }

        fn set_masked(&mut self, field: FieldId, masked: bool) {
            self.masked.insert(field, masked);
        }

        fn clear(&mut self, field: FieldId) {
            self.values.remove(&field);
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        delivered: Vec<FormEntries>,
    }

    impl SubmissionSink for RecordingSink {
        fn deliver(&mut self, entries: &FormEntries) {
            self.delivered.push(entries.clone());
        }
    }

    fn flow() -> FormFlow<RecordingSink> {
        FormFlow::new(&Settings::default(), RecordingSink::default())
    }

    fn valid_login() -> RecordingSurface {
        RecordingSurface::with(&[
            (FieldId::LoginEmail, "ana@example.com"),
            (FieldId::LoginPassword, "s3cret"),
        ])
    }

    fn enter_form(flow: &mut FormFlow<RecordingSink>, surface: &mut RecordingSurface) {
        let pending = flow.proceed(surface).unwrap();
        assert!(flow.complete_transition(pending.ticket));
    }

    #[test]
    fn invalid_email_shakes_and_stays_on_login() {
        let mut flow = flow();
        let mut surface = RecordingSurface::with(&[
            (FieldId::LoginEmail, "not-an-email"),
            (FieldId::LoginPassword, "s3cret"),
        ]);

        assert!(flow.proceed(&mut surface).is_none());
        assert_eq!(flow.phase(), Phase::Login);
        assert!(flow.pending().is_none());
        assert_eq!(surface.shaken, [FieldId::LoginEmail]);
        assert_eq!(surface.focused, [FieldId::LoginEmail]);
    }

    #[test]
    fn short_password_shakes_and_stays_on_login() {
        let mut flow = flow();
        let mut surface = RecordingSurface::with(&[
            (FieldId::LoginEmail, "ana@example.com"),
            (FieldId::LoginPassword, "abc"),
        ]);

        assert!(flow.proceed(&mut surface).is_none());
        assert_eq!(flow.phase(), Phase::Login);
        assert_eq!(surface.shaken, [FieldId::LoginPassword]);
    }

    #[test]
    fn both_failures_report_their_own_feedback() {
        let mut flow = flow();
        let mut surface = RecordingSurface::default();

        assert!(flow.proceed(&mut surface).is_none());
        assert_eq!(surface.shaken, [FieldId::LoginEmail, FieldId::LoginPassword]);
        assert_eq!(surface.focused.last(), Some(&FieldId::LoginPassword));
        assert_eq!(flow.phase(), Phase::Login);
    }

    #[test]
    fn valid_credentials_move_to_form_after_delay() {
        let mut flow = flow();
        let mut surface = valid_login();

        let pending = flow.proceed(&mut surface).unwrap();
        assert_eq!(pending.delay, Duration::from_millis(270));
        assert_eq!(pending.to, Phase::Form);
        assert_eq!(flow.phase(), Phase::Login);
        assert!(surface.shaken.is_empty());

        assert!(flow.complete_transition(pending.ticket));
        assert_eq!(flow.phase(), Phase::Form);
    }

    #[test]
    fn repeated_proceed_while_pending_is_ignored() {
        let mut flow = flow();
        let mut surface = valid_login();

        let pending = flow.proceed(&mut surface).unwrap();
        assert!(flow.proceed(&mut surface).is_none());
        assert!(flow.complete_transition(pending.ticket));
        assert!(!flow.complete_transition(pending.ticket));
        assert_eq!(flow.phase(), Phase::Form);
    }

    #[test]
    fn back_needs_no_validation() {
        let mut flow = flow();
        let mut surface = valid_login();
        enter_form(&mut flow, &mut surface);
        surface.type_into(FieldId::LoginEmail, "");

        let pending = flow.back().unwrap();
        assert_eq!(pending.from, Phase::Form);
        assert_eq!(flow.phase(), Phase::Form);
        assert!(flow.complete_transition(pending.ticket));
        assert_eq!(flow.phase(), Phase::Login);
    }

    #[test]
    fn back_from_login_does_nothing() {
        let mut flow = flow();
        assert!(flow.back().is_none());
    }

    #[test]
    fn range_feedback_tracks_the_control() {
        let mut flow = flow();
        let initial = flow.range_feedback();
        assert_eq!(initial.echo, "5");
        assert_eq!(initial.tier, Tier::Mid);

        flow.set_range(10.0);
        assert_eq!(flow.range_feedback().tier, Tier::High);
        flow.step_range(false);
        assert_eq!(flow.range_feedback().echo, "9");
        flow.set_range(1.0);
        assert_eq!(flow.range_feedback().percent, 0.0);
        assert_eq!(flow.range_feedback().tier, Tier::Low);
    }

    #[test]
    fn color_pick_reflects_on_label() {
        let mut flow = flow();
        flow.pick_color("#6c63ff").unwrap();
        assert_eq!(flow.accent().border(), Some("#6c63ff"));
        assert_eq!(
            flow.accent().glow().map(|glow| glow.to_string()),
            Some("rgba(108,99,255,0.25)".to_string())
        );
    }

    #[test]
    fn malformed_color_is_rejected() {
        let mut flow = flow();
        assert!(flow.pick_color("#zzzzzz").is_err());
        assert_eq!(flow.accent().border(), None);
        assert_eq!(flow.color(), "#6c63ff");
    }

    #[test]
    fn password_toggle_unmasks_only_its_target() {
        let mut flow = flow();
        let mut surface = valid_login();

        assert_eq!(
            flow.toggle_password(FieldId::LoginPassword, &mut surface),
            Some(Visibility::Revealed)
        );
        assert_eq!(surface.masked.get(&FieldId::LoginPassword), Some(&false));
        assert_eq!(surface.masked.get(&FieldId::Password), None);
        assert!(
            flow.toggles()
                .get(FieldId::Password)
                .is_some_and(|toggle| toggle.masks())
        );
    }

    #[test]
    fn submit_shows_overlay_and_dismiss_resets() {
        let mut flow = flow();
        let mut surface = valid_login();
        enter_form(&mut flow, &mut surface);

        surface.type_into(FieldId::Name, "Ana");
        surface.type_into(FieldId::Email, "a@b.com");
        flow.set_range(8.0);
        flow.pick_color("#34d399").unwrap();
        flow.toggle_password(FieldId::Password, &mut surface);

        assert!(flow.submit(&mut surface));
        assert!(flow.overlay().is_some());
        let entries = &flow.sink.delivered[0];
        assert_eq!(entries.get("name"), Some("Ana"));
        assert_eq!(entries.get("email"), Some("a@b.com"));
        assert_eq!(entries.get("phone"), Some(""));
        assert_eq!(entries.get(RANGE_FIELD), Some("8"));
        assert_eq!(entries.get(COLOR_FIELD), Some("#34d399"));

        flow.dismiss_overlay(&mut surface);
        assert!(flow.overlay().is_none());
        assert_eq!(flow.phase(), Phase::Login);
        assert!(surface.values.is_empty());
        assert_eq!(flow.range_feedback(), RangeFeedback::compute(1.0, 10.0, 5.0));
        assert_eq!(flow.accent(), &ColorAccent::default());
        assert_eq!(flow.color(), "#6c63ff");
        assert_eq!(surface.masked.get(&FieldId::Password), Some(&true));
        assert!(flow.toggles().iter().all(|toggle| toggle.masks()));
    }

    #[test]
    fn submit_is_ignored_outside_the_form() {
        let mut flow = flow();
        let mut surface = valid_login();
        assert!(!flow.submit(&mut surface));

        enter_form(&mut flow, &mut surface);
        assert!(flow.submit(&mut surface));
        assert!(!flow.submit(&mut surface));
        assert_eq!(flow.sink.delivered.len(), 1);
        assert!(flow.back().is_none());
    }

    #[test]
    fn flow_runs_again_after_reset() {
        let mut flow = flow();
        let mut surface = valid_login();
        enter_form(&mut flow, &mut surface);
        flow.submit(&mut surface);
        flow.dismiss_overlay(&mut surface);

        let mut surface = valid_login();
        let pending = flow.proceed(&mut surface).unwrap();
        assert!(flow.complete_transition(pending.ticket));
        assert_eq!(flow.phase(), Phase::Form);
    }

    #[test]
    fn dismiss_without_overlay_is_a_no_op() {
        let mut flow = flow();
        let mut surface = valid_login();
        flow.dismiss_overlay(&mut surface);
        assert_eq!(surface.values.len(), 2);
    }
}
