use std::time::Duration;

use gpui::{
    Animation, AnimationExt, App, AsyncApp, Context, CursorStyle, Div, ElementId, Entity,
    FocusHandle, Focusable, MouseButton, Stateful, Task, WeakEntity, Window, actions, div,
    prelude::*, px, rgb,
};

use crate::{
    components::*,
    configuration::Settings,
    flow::{FieldId, FormFlow, FormSurface},
    overlay::SuccessOverlay,
    password_toggle::PasswordToggle,
    phase::{PendingTransition, Phase},
    submission::LogSink,
    text_input::TextInput,
    theme::*,
};

actions!(
    signup_flow,
    [
        Proceed,
        Back,
        SubmitForm,
        DismissOverlay,
        FocusNext,
        FocusPrevious,
        Activate,
        RangeIncrease,
        RangeDecrease,
        Quit
    ]
);

pub struct FlowInputs {
    pub login_email: Entity<TextInput>,
    pub login_password: Entity<TextInput>,
    pub name: Entity<TextInput>,
    pub email: Entity<TextInput>,
    pub phone: Entity<TextInput>,
    pub password: Entity<TextInput>,
}

impl FlowInputs {
    pub fn new(context: &mut App) -> Self {
        Self {
            login_email: TextInput::new(
                context,
                FieldId::LoginEmail.name(),
                "you@example.com",
                false,
            ),
            login_password: TextInput::new(
                context,
                FieldId::LoginPassword.name(),
                "Your password",
                true,
            ),
            name: TextInput::new(context, FieldId::Name.name(), "Jane Doe", false),
            email: TextInput::new(context, FieldId::Email.name(), "jane@example.com", false),
            phone: TextInput::new(context, FieldId::Phone.name(), "+1 555 0100", false),
            password: TextInput::new(
                context,
                FieldId::Password.name(),
                "Choose a password",
                true,
            ),
        }
    }

    pub fn get(&self, field: FieldId) -> &Entity<TextInput> {
        match field {
            FieldId::LoginEmail => &self.login_email,
            FieldId::LoginPassword => &self.login_password,
            FieldId::Name => &self.name,
            FieldId::Email => &self.email,
            FieldId::Phone => &self.phone,
            FieldId::Password => &self.password,
        }
    }

    pub fn focus_handle(&self, field: FieldId, context: &App) -> FocusHandle {
        self.get(field).read(context).focus_handle.clone()
    }
}

/// The live inputs, seen through the operations the controller may perform
/// on them.
struct InputSurface<'a, 'b> {
    inputs: &'a FlowInputs,
    window: &'a mut Window,
    context: &'a mut Context<'b, FormFlowApp>,
}

impl<'a, 'b> InputSurface<'a, 'b> {
    fn new(
        inputs: &'a FlowInputs,
        window: &'a mut Window,
        context: &'a mut Context<'b, FormFlowApp>,
    ) -> Self {
        Self {
            inputs,
            window,
            context,
        }
    }
}

impl FormSurface for InputSurface<'_, '_> {
    fn value(&self, field: FieldId) -> String {
        self.inputs.get(field).read(&*self.context).text()
    }

    fn shake(&mut self, field: FieldId) {
        self.inputs
            .get(field)
            .update(&mut *self.context, |input, context| {
                input.shake();
                context.notify();
            });
    }

    fn focus(&mut self, field: FieldId) {
        let handle = self.inputs.focus_handle(field, &*self.context);
        self.window.focus(&handle, &mut *self.context);
    }

    fn set_masked(&mut self, field: FieldId, masked: bool) {
        self.inputs
            .get(field)
            .update(&mut *self.context, |input, context| {
                input.masked = masked;
                context.notify();
            });
    }

    fn clear(&mut self, field: FieldId) {
        self.inputs
            .get(field)
            .update(&mut *self.context, |input, context| {
                input.clear();
                context.notify();
            });
    }
}

pub struct FormFlowApp {
    flow: FormFlow<LogSink>,
    inputs: FlowInputs,
    palette: Vec<String>,
    exit_duration: Duration,
    transition_task: Option<Task<()>>,
    settled_phase: Phase,
    focus_handle: FocusHandle,
    proceed_focus_handle: FocusHandle,
    login_eye_focus_handle: FocusHandle,
    form_eye_focus_handle: FocusHandle,
    range_focus_handle: FocusHandle,
    back_focus_handle: FocusHandle,
    submit_focus_handle: FocusHandle,
    dismiss_focus_handle: FocusHandle,
}

impl FormFlowApp {
    pub fn new(settings: &Settings, inputs: FlowInputs, context: &mut Context<Self>) -> Self {
        let flow = FormFlow::new(settings, LogSink);
        Self {
            settled_phase: flow.phase(),
            flow,
            inputs,
            palette: settings.palette.clone(),
            exit_duration: settings.exit_duration(),
            transition_task: None,
            focus_handle: context.focus_handle(),
            proceed_focus_handle: context.focus_handle(),
            login_eye_focus_handle: context.focus_handle(),
            form_eye_focus_handle: context.focus_handle(),
            range_focus_handle: context.focus_handle(),
            back_focus_handle: context.focus_handle(),
            submit_focus_handle: context.focus_handle(),
            dismiss_focus_handle: context.focus_handle(),
        }
    }

    pub fn login_email_input(&self, context: &App) -> FocusHandle {
        self.inputs.focus_handle(FieldId::LoginEmail, context)
    }

    fn eye_focus_handle(&self, target: FieldId) -> &FocusHandle {
        match target {
            FieldId::LoginPassword => &self.login_eye_focus_handle,
            _ => &self.form_eye_focus_handle,
        }
    }

    /// Finishes `pending` once its delay has elapsed. Replacing or dropping
    /// the stored task cancels the wait.
    fn schedule_transition(&mut self, pending: PendingTransition, context: &mut Context<Self>) {
        let PendingTransition { ticket, delay, .. } = pending;
        self.transition_task = Some(context.spawn(
            async move |this: WeakEntity<Self>, context: &mut AsyncApp| {
                context.background_executor().timer(delay).await;
                if let Err(error) = this.update(context, |this, context| {
                    if this.flow.complete_transition(ticket) {
                        context.notify();
                    }
                }) {
                    log::warn!("[flow] failed to finish transition #{ticket}: {error}");
                }
            },
        ));
    }

    fn proceed(&mut self, _: &Proceed, window: &mut Window, context: &mut Context<Self>) {
        let pending = {
            let mut surface = InputSurface::new(&self.inputs, window, context);
            self.flow.proceed(&mut surface)
        };
        if let Some(pending) = pending {
            self.schedule_transition(pending, context);
        }
        context.notify();
    }

    fn back(&mut self, _: &Back, _window: &mut Window, context: &mut Context<Self>) {
        if let Some(pending) = self.flow.back() {
            self.schedule_transition(pending, context);
        }
        context.notify();
    }

    fn submit(&mut self, _: &SubmitForm, window: &mut Window, context: &mut Context<Self>) {
        let submitted = {
            let mut surface = InputSurface::new(&self.inputs, window, context);
            self.flow.submit(&mut surface)
        };
        if submitted {
            window.focus(&self.dismiss_focus_handle, context);
        }
        context.notify();
    }

    fn dismiss_overlay(
        &mut self,
        _: &DismissOverlay,
        window: &mut Window,
        context: &mut Context<Self>,
    ) {
        if self.flow.overlay().is_none() {
            return;
        }
        {
            let mut surface = InputSurface::new(&self.inputs, window, context);
            self.flow.dismiss_overlay(&mut surface);
        }
        self.transition_task = None;
        log::info!("[overlay] dismissed, back to login");
        context.notify();
    }

    fn toggle_password(
        &mut self,
        target: FieldId,
        window: &mut Window,
        context: &mut Context<Self>,
    ) {
        {
            let mut surface = InputSurface::new(&self.inputs, window, context);
            self.flow.toggle_password(target, &mut surface);
        }
        context.notify();
    }

    fn pick_color(&mut self, hex: &str, context: &mut Context<Self>) {
        if let Err(error) = self.flow.pick_color(hex) {
            log::warn!("[color] {error}");
        }
        context.notify();
    }

    fn range_increase(
        &mut self,
        _: &RangeIncrease,
        _window: &mut Window,
        context: &mut Context<Self>,
    ) {
        self.flow.step_range(true);
        context.notify();
    }

    fn range_decrease(
        &mut self,
        _: &RangeDecrease,
        _window: &mut Window,
        context: &mut Context<Self>,
    ) {
        self.flow.step_range(false);
        context.notify();
    }

    fn activate(&mut self, _: &Activate, window: &mut Window, context: &mut Context<Self>) {
        if self.proceed_focus_handle.is_focused(window) {
            self.proceed(&Proceed, window, context);
        } else if self.back_focus_handle.is_focused(window) {
            self.back(&Back, window, context);
        } else if self.submit_focus_handle.is_focused(window) {
            self.submit(&SubmitForm, window, context);
        } else if self.dismiss_focus_handle.is_focused(window) {
            self.dismiss_overlay(&DismissOverlay, window, context);
        } else if let Some(target) = FieldId::PASSWORDS
            .into_iter()
            .find(|target| self.eye_focus_handle(*target).is_focused(window))
        {
            self.toggle_password(target, window, context);
        }
    }

    fn focusable_entries(&self, context: &App) -> Vec<FocusHandle> {
        if self.flow.overlay().is_some() {
            return vec![self.dismiss_focus_handle.clone()];
        }
        match self.flow.phase() {
            Phase::Login => vec![
                self.inputs.focus_handle(FieldId::LoginEmail, context),
                self.inputs.focus_handle(FieldId::LoginPassword, context),
                self.login_eye_focus_handle.clone(),
                self.proceed_focus_handle.clone(),
            ],
            Phase::Form => {
                let mut entries: Vec<FocusHandle> = FieldId::FORM
                    .into_iter()
                    .map(|field| self.inputs.focus_handle(field, context))
                    .collect();
                entries.extend([
                    self.form_eye_focus_handle.clone(),
                    self.range_focus_handle.clone(),
                    self.back_focus_handle.clone(),
                    self.submit_focus_handle.clone(),
                ]);
                entries
            }
        }
    }

    fn focus_next(&mut self, _: &FocusNext, window: &mut Window, context: &mut Context<Self>) {
        let entries = self.focusable_entries(context);
        let next = entries
            .iter()
            .position(|handle| handle.is_focused(window))
            .map_or(0, |current| (current + 1) % entries.len());
        if let Some(handle) = entries.get(next) {
            window.focus(handle, context);
        }
    }

    fn focus_previous(
        &mut self,
        _: &FocusPrevious,
        window: &mut Window,
        context: &mut Context<Self>,
    ) {
        let entries = self.focusable_entries(context);
        let previous = entries
            .iter()
            .position(|handle| handle.is_focused(window))
            .map_or(0, |current| {
                if current == 0 {
                    entries.len() - 1
                } else {
                    current - 1
                }
            });
        if let Some(handle) = entries.get(previous) {
            window.focus(handle, context);
        }
    }

    fn quit(&mut self, _: &Quit, _window: &mut Window, context: &mut Context<Self>) {
        log::info!("[quit] shutting down");
        self.transition_task = None;
        context.quit();
    }
}

impl Focusable for FormFlowApp {
    fn focus_handle(&self, _: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for FormFlowApp {
    fn render(&mut self, window: &mut Window, context: &mut Context<Self>) -> impl IntoElement {
        let phase = self.flow.phase();
        if self.flow.pending().is_none() && self.settled_phase != phase {
            self.settled_phase = phase;
            if let Some(first) = self.focusable_entries(context).first() {
                window.focus(first, context);
            }
        }

        let panel = match phase {
            Phase::Login => self.render_login(context),
            Phase::Form => self.render_form(context),
        };
        let panel = match self.flow.pending().copied() {
            Some(pending) => {
                let motion = pending.exit_motion();
                panel
                    .with_animation(
                        ElementId::Name(format!("exit-{}", pending.ticket).into()),
                        Animation::new(self.exit_duration),
                        move |panel, progress| {
                            let frame = motion.at(progress);
                            panel.opacity(frame.opacity).top(px(frame.offset_y))
                        },
                    )
                    .into_any_element()
            }
            None => panel.into_any_element(),
        };

        let overlay = self
            .flow
            .overlay()
            .cloned()
            .map(|overlay| self.render_overlay(&overlay, context));

        div()
            .key_context("FormFlowApp")
            .track_focus(&self.focus_handle(context))
            .on_action(context.listener(Self::proceed))
            .on_action(context.listener(Self::back))
            .on_action(context.listener(Self::submit))
            .on_action(context.listener(Self::dismiss_overlay))
            .on_action(context.listener(Self::focus_next))
            .on_action(context.listener(Self::focus_previous))
            .on_action(context.listener(Self::activate))
            .on_action(context.listener(Self::range_increase))
            .on_action(context.listener(Self::range_decrease))
            .on_action(context.listener(Self::quit))
            .relative()
            .flex()
            .flex_col()
            .size_full()
            .bg(rgb(SURFACE))
            .child(self.render_titlebar(context))
            .child(
                div()
                    .flex()
                    .flex_1()
                    .items_center()
                    .justify_center()
                    .child(panel),
            )
            .children(overlay)
    }
}

impl FormFlowApp {
    fn render_titlebar(&self, context: &mut Context<Self>) -> impl IntoElement {
        div()
            .flex()
            .flex_row()
            .items_center()
            .w_full()
            .h(px(TITLEBAR_HEIGHT))
            .bg(rgb(TITLEBAR_BACKGROUND))
            .child(
                titlebar_title(&format!("Sign up · {}", self.flow.phase().label()))
                    .cursor(CursorStyle::default())
                    .on_mouse_down(
                        MouseButton::Left,
                        context.listener(|_, _, window, _| window.start_window_move()),
                    ),
            )
            .child(titlebar_close().on_mouse_up(
                MouseButton::Left,
                context.listener(|this, _, window, context| this.quit(&Quit, window, context)),
            ))
    }

    fn render_eye(
        &self,
        target: FieldId,
        id: &'static str,
        context: &mut Context<Self>,
    ) -> Stateful<Div> {
        let toggle = self
            .flow
            .toggles()
            .get(target)
            .cloned()
            .unwrap_or_else(|| PasswordToggle::new(target));
        eye_toggle(id, &toggle, self.eye_focus_handle(target)).on_mouse_up(
            MouseButton::Left,
            context.listener(move |this, _, window, context| {
                this.toggle_password(target, window, context)
            }),
        )
    }

    fn render_login(&self, context: &mut Context<Self>) -> Div {
        panel("Welcome back", "Sign in to continue")
            .key_context("LoginPanel")
            .child(field("Email", &self.inputs.login_email))
            .child(password_field(
                "Password",
                &self.inputs.login_password,
                self.render_eye(FieldId::LoginPassword, "login-eye", context),
            ))
            .child(
                div().pt(px(GAP_SMALL)).child(
                    button_action("Continue", &self.proceed_focus_handle).on_mouse_up(
                        MouseButton::Left,
                        context.listener(|this, _, window, context| {
                            this.proceed(&Proceed, window, context)
                        }),
                    ),
                ),
            )
    }

    fn render_form(&self, context: &mut Context<Self>) -> Div {
        let feedback = self.flow.range_feedback();
        let range = self.flow.range();
        let bounds = format!("{} to {}", range.min(), range.max());
        let stops = range
            .stops()
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                range_stop(index).on_mouse_up(
                    MouseButton::Left,
                    context.listener(move |this, _, window, context| {
                        this.flow.set_range(value);
                        let handle = this.range_focus_handle.clone();
                        window.focus(&handle, context);
                        context.notify();
                    }),
                )
            })
            .collect();
        let swatches = self
            .palette
            .iter()
            .map(|hex| {
                let picked = hex.clone();
                swatch(hex, hex.as_str() == self.flow.color()).on_mouse_up(
                    MouseButton::Left,
                    context.listener(move |this, _, _, context| this.pick_color(&picked, context)),
                )
            })
            .collect();

        panel("Tell us about you", "A few details to finish signing up")
            .key_context("FormPanel")
            .child(field("Full name", &self.inputs.name))
            .child(field("Email", &self.inputs.email))
            .child(field("Phone", &self.inputs.phone))
            .child(password_field(
                "Password",
                &self.inputs.password,
                self.render_eye(FieldId::Password, "form-eye", context),
            ))
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap(px(GAP_EXTRA_SMALL))
                    .child(range_header(&format!("Experience ({bounds})"), &feedback))
                    .child(range_track(&feedback, &self.range_focus_handle, stops)),
            )
            .child(color_label("Favorite color", self.flow.accent(), swatches))
            .child(
                div()
                    .flex()
                    .flex_row()
                    .gap(px(GAP_SMALL))
                    .pt(px(GAP_SMALL))
                    .child(
                        div().flex_1().child(
                            button_ghost("Back", &self.back_focus_handle).on_mouse_up(
                                MouseButton::Left,
                                context.listener(|this, _, window, context| {
                                    this.back(&Back, window, context)
                                }),
                            ),
                        ),
                    )
                    .child(
                        div().flex_1().child(
                            button_action("Submit", &self.submit_focus_handle).on_mouse_up(
                                MouseButton::Left,
                                context.listener(|this, _, window, context| {
                                    this.submit(&SubmitForm, window, context)
                                }),
                            ),
                        ),
                    ),
            )
    }

    fn render_overlay(&self, overlay: &SuccessOverlay, context: &mut Context<Self>) -> Div {
        let dismiss = button_action(overlay.dismiss_label, &self.dismiss_focus_handle)
            .on_mouse_up(
                MouseButton::Left,
                context.listener(|this, _, window, context| {
                    this.dismiss_overlay(&DismissOverlay, window, context)
                }),
            );
        success_overlay(overlay, dismiss).key_context("SuccessOverlay")
    }
}
