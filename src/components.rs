use gpui::{Div, Entity, FocusHandle, Stateful, div, prelude::*, px, relative, rgb, rgba};

use crate::{
    color::{ColorAccent, hex_to_u32},
    overlay::SuccessOverlay,
    password_toggle::PasswordToggle,
    range_feedback::{RangeFeedback, Tier},
    text_input::TextInput,
    theme::*,
};

pub fn label(text: &str) -> Div {
    div()
        .px(px(PADDING_INPUT_HORIZONTAL))
        .text_size(px(TEXT_SIZE_SMALL))
        .text_color(rgb(TEXT_DIM))
        .child(text.to_string())
}

pub fn field(text: &str, input: &Entity<TextInput>) -> Div {
    div()
        .flex()
        .flex_col()
        .gap(px(GAP_EXTRA_SMALL))
        .w_full()
        .child(label(text))
        .child(input.clone())
}

/// A password field with its reveal control to the right.
pub fn password_field(text: &str, input: &Entity<TextInput>, toggle: Stateful<Div>) -> Div {
    div()
        .flex()
        .flex_col()
        .gap(px(GAP_EXTRA_SMALL))
        .w_full()
        .child(label(text))
        .child(
            div()
                .flex()
                .flex_row()
                .gap(px(GAP_EXTRA_SMALL))
                .child(div().flex_1().child(input.clone()))
                .child(toggle),
        )
}

pub fn eye_toggle(
    id: &'static str,
    toggle: &PasswordToggle,
    focus_handle: &FocusHandle,
) -> Stateful<Div> {
    div()
        .id(id)
        .key_context("Control")
        .track_focus(focus_handle)
        .flex()
        .flex_row()
        .flex_shrink_0()
        .items_center()
        .gap(px(GAP_EXTRA_SMALL))
        .px(px(PADDING_INPUT_HORIZONTAL))
        .h(px(ELEMENT_HEIGHT))
        .rounded(px(RADIUS))
        .border_1()
        .border_color(rgb(BORDER))
        .bg(rgb(INPUT_BACKGROUND))
        .cursor_pointer()
        .hover(|style| style.border_color(rgb(BORDER_FOCUS)))
        .focus(|style| style.border_color(rgb(BORDER_FOCUS)))
        .text_color(rgb(TEXT_DIM))
        .child(div().text_size(px(TEXT_SIZE_MEDIUM)).child(toggle.icon().glyph()))
        .child(
            div()
                .text_size(px(TEXT_SIZE_EXTRA_SMALL))
                .child(toggle.label()),
        )
}

pub fn button_action(text: &str, focus_handle: &FocusHandle) -> Div {
    div()
        .key_context("Control")
        .track_focus(focus_handle)
        .flex()
        .items_center()
        .justify_center()
        .px(px(PADDING_INPUT_HORIZONTAL))
        .h(px(ELEMENT_HEIGHT))
        .w_full()
        .bg(rgb(BUTTON_PRIMARY))
        .rounded(px(RADIUS))
        .border_1()
        .border_color(gpui::transparent_black())
        .cursor_pointer()
        .hover(|style| style.bg(rgb(BUTTON_HOVER)))
        .focus(|style| {
            style
                .border_color(rgb(TEXT_WHITE))
                .bg(rgb(BUTTON_HOVER))
        })
        .text_color(rgb(TEXT_WHITE))
        .text_size(px(TEXT_SIZE_MEDIUM))
        .child(text.to_string())
}

pub fn button_ghost(text: &str, focus_handle: &FocusHandle) -> Div {
    div()
        .key_context("Control")
        .track_focus(focus_handle)
        .flex()
        .flex_shrink_0()
        .items_center()
        .justify_center()
        .px(px(PADDING_INPUT_HORIZONTAL))
        .h(px(ELEMENT_HEIGHT))
        .w_full()
        .bg(rgb(INPUT_BACKGROUND))
        .border_1()
        .border_color(rgb(BORDER))
        .rounded(px(RADIUS))
        .cursor_pointer()
        .text_color(rgb(TEXT_PRIMARY))
        .text_size(px(TEXT_SIZE_MEDIUM))
        .hover(|style| style.border_color(rgb(BORDER_FOCUS)))
        .focus(|style| style.border_color(rgb(BORDER_FOCUS)))
        .child(text.to_string())
}

pub fn panel(title: &str, subtitle: &str) -> Div {
    div()
        .relative()
        .flex()
        .flex_col()
        .w(px(PANEL_WIDTH))
        .gap(px(GAP_MEDIUM))
        .p(px(PADDING_PANEL))
        .rounded(px(RADIUS_LARGE))
        .bg(rgb(PANEL_BACKGROUND))
        .border_1()
        .border_color(rgb(BORDER))
        .child(
            div()
                .flex()
                .flex_col()
                .gap(px(GAP_EXTRA_SMALL))
                .pb(px(GAP_SMALL))
                .child(
                    div()
                        .text_size(px(TEXT_SIZE_LARGE))
                        .text_color(rgb(TEXT_PRIMARY))
                        .child(title.to_string()),
                )
                .child(
                    div()
                        .text_size(px(TEXT_SIZE_SMALL))
                        .text_color(rgb(TEXT_DIM))
                        .child(subtitle.to_string()),
                ),
        )
}

pub fn tier_color(tier: Tier) -> u32 {
    match tier {
        Tier::Low => TIER_LOW,
        Tier::Mid => TIER_MID,
        Tier::High => TIER_HIGH,
    }
}

/// Label row with the echoed value, tinted by tier.
pub fn range_header(text: &str, feedback: &RangeFeedback) -> Div {
    div()
        .flex()
        .flex_row()
        .items_center()
        .justify_between()
        .w_full()
        .child(label(text))
        .child(
            div()
                .px(px(PADDING_INPUT_HORIZONTAL))
                .text_size(px(TEXT_SIZE_MEDIUM))
                .text_color(rgb(tier_color(feedback.tier)))
                .child(feedback.echo.clone()),
        )
}

/// Two-tone track split at the feedback percentage. `stops` is laid over the
/// track as equally wide hit cells.
pub fn range_track(
    feedback: &RangeFeedback,
    focus_handle: &FocusHandle,
    stops: Vec<Stateful<Div>>,
) -> Div {
    let fraction = (feedback.percent / 100.0).clamp(0.0, 1.0) as f32;

    div()
        .track_focus(focus_handle)
        .key_context("RangeSlider")
        .relative()
        .w_full()
        .h(px(ELEMENT_HEIGHT))
        .flex()
        .items_center()
        .px(px(PADDING_INPUT_HORIZONTAL))
        .rounded(px(RADIUS))
        .border_1()
        .border_color(gpui::transparent_black())
        .focus(|style| style.border_color(rgb(BORDER_FOCUS)))
        .child(
            div()
                .w_full()
                .h(px(RANGE_HEIGHT))
                .rounded(px(RANGE_HEIGHT / 2.0))
                .bg(rgba(RANGE_TRACK))
                .overflow_hidden()
                .child(div().h_full().w(relative(fraction)).bg(rgb(RANGE_FILL))),
        )
        .child(
            div()
                .absolute()
                .top_0()
                .left_0()
                .size_full()
                .flex()
                .flex_row()
                .children(stops),
        )
}

pub fn range_stop(id: usize) -> Stateful<Div> {
    div()
        .id(("range-stop", id))
        .flex_1()
        .h_full()
        .cursor_pointer()
}

pub fn swatch(hex: &str, selected: bool) -> Stateful<Div> {
    let color = hex_to_u32(hex).unwrap_or(BORDER);
    div()
        .id(gpui::ElementId::Name(format!("swatch-{hex}").into()))
        .size(px(SWATCH_SIZE))
        .rounded(px(SWATCH_SIZE / 2.0))
        .bg(rgb(color))
        .border_2()
        .border_color(rgb(if selected { TEXT_WHITE } else { PANEL_BACKGROUND }))
        .cursor_pointer()
        .hover(|style| style.border_color(rgb(TEXT_DIM)))
}

/// Color label with the picked accent reflected as border and glow.
pub fn color_label(text: &str, accent: &ColorAccent, swatches: Vec<Stateful<Div>>) -> Div {
    let border = accent
        .border()
        .and_then(|hex| hex_to_u32(hex).ok())
        .unwrap_or(BORDER);
    let glow = accent.glow().map(|glow| glow.to_u32());

    div()
        .p(px(GLOW_SPREAD))
        .rounded(px(RADIUS + GLOW_SPREAD))
        .when_some(glow, |element, glow| element.bg(rgba(glow)))
        .child(
            div()
                .flex()
                .flex_row()
                .items_center()
                .justify_between()
                .w_full()
                .px(px(PADDING_INPUT_HORIZONTAL))
                .py(px(PADDING_INPUT_VERTICAL))
                .rounded(px(RADIUS))
                .border_1()
                .border_color(rgb(border))
                .bg(rgb(INPUT_BACKGROUND))
                .child(
                    div()
                        .text_size(px(TEXT_SIZE_SMALL))
                        .text_color(rgb(TEXT_DIM))
                        .child(text.to_string()),
                )
                .child(div().flex().flex_row().gap(px(GAP_EXTRA_SMALL)).children(swatches)),
        )
}

pub fn success_overlay(overlay: &SuccessOverlay, dismiss: Div) -> Div {
    div()
        .occlude()
        .absolute()
        .top_0()
        .left_0()
        .size_full()
        .flex()
        .items_center()
        .justify_center()
        .bg(rgba(OVERLAY_SCRIM))
        .child(
            div()
                .flex()
                .flex_col()
                .items_center()
                .gap(px(GAP_MEDIUM))
                .w(px(OVERLAY_WIDTH))
                .p(px(PADDING_PANEL))
                .rounded(px(RADIUS_LARGE))
                .bg(rgb(PANEL_BACKGROUND))
                .border_1()
                .border_color(rgb(BORDER))
                .child(
                    div()
                        .flex()
                        .items_center()
                        .justify_center()
                        .size(px(SUCCESS_ICON_SIZE))
                        .rounded(px(SUCCESS_ICON_SIZE / 2.0))
                        .bg(rgb(SUCCESS))
                        .text_color(rgb(TEXT_WHITE))
                        .text_size(px(TEXT_SIZE_LARGE))
                        .child(overlay.icon.glyph()),
                )
                .child(
                    div()
                        .text_size(px(TEXT_SIZE_LARGE))
                        .text_color(rgb(TEXT_PRIMARY))
                        .child(overlay.heading),
                )
                .child(
                    div()
                        .flex()
                        .flex_col()
                        .items_center()
                        .text_size(px(TEXT_SIZE_SMALL))
                        .text_color(rgb(TEXT_DIM))
                        .children(overlay.message),
                )
                .child(div().w_full().pt(px(GAP_SMALL)).child(dismiss)),
        )
}

pub fn titlebar_title(text: &str) -> Div {
    div()
        .flex()
        .flex_1()
        .h_full()
        .items_center()
        .pl(px(GAP_LARGE))
        .text_size(px(TEXT_SIZE_SMALL))
        .text_color(rgb(TEXT_DIM))
        .child(text.to_string())
}

pub fn titlebar_close() -> Stateful<Div> {
    div()
        .id("titlebar-close")
        .flex()
        .items_center()
        .px(px(GAP_LARGE))
        .h(px(TITLEBAR_HEIGHT))
        .text_size(px(TEXT_SIZE_SMALL))
        .text_color(rgb(TEXT_DIM))
        .cursor_pointer()
        .hover(|style| {
            style
                .bg(rgb(BUTTON_HOVER))
                .text_color(rgb(TEXT_WHITE))
        })
        .child("Exit")
}
