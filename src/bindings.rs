use gpui::{App, KeyBinding};

use crate::{app, text_input};

/// Every action a keystroke can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    Backspace,
    Delete,
    Left,
    Right,
    SelectLeft,
    SelectRight,
    Home,
    End,
    SelectAll,
    Paste,
    Copy,
    Cut,
    Proceed,
    SubmitForm,
    Activate,
    RangeDecrease,
    RangeIncrease,
    DismissOverlay,
    FocusNext,
    FocusPrevious,
    Quit,
}

impl Shortcut {
    fn key_binding(self, keystroke: &str, context: &str) -> KeyBinding {
        let context = Some(context);
        match self {
            Self::Backspace => KeyBinding::new(keystroke, text_input::Backspace, context),
            Self::Delete => KeyBinding::new(keystroke, text_input::Delete, context),
            Self::Left => KeyBinding::new(keystroke, text_input::Left, context),
            Self::Right => KeyBinding::new(keystroke, text_input::Right, context),
            Self::SelectLeft => KeyBinding::new(keystroke, text_input::SelectLeft, context),
            Self::SelectRight => KeyBinding::new(keystroke, text_input::SelectRight, context),
            Self::Home => KeyBinding::new(keystroke, text_input::Home, context),
            Self::End => KeyBinding::new(keystroke, text_input::End, context),
            Self::SelectAll => KeyBinding::new(keystroke, text_input::SelectAll, context),
            Self::Paste => KeyBinding::new(keystroke, text_input::Paste, context),
            Self::Copy => KeyBinding::new(keystroke, text_input::Copy, context),
            Self::Cut => KeyBinding::new(keystroke, text_input::Cut, context),
            Self::Proceed => KeyBinding::new(keystroke, app::Proceed, context),
            Self::SubmitForm => KeyBinding::new(keystroke, app::SubmitForm, context),
            Self::Activate => KeyBinding::new(keystroke, app::Activate, context),
            Self::RangeDecrease => KeyBinding::new(keystroke, app::RangeDecrease, context),
            Self::RangeIncrease => KeyBinding::new(keystroke, app::RangeIncrease, context),
            Self::DismissOverlay => KeyBinding::new(keystroke, app::DismissOverlay, context),
            Self::FocusNext => KeyBinding::new(keystroke, app::FocusNext, context),
            Self::FocusPrevious => KeyBinding::new(keystroke, app::FocusPrevious, context),
            Self::Quit => KeyBinding::new(keystroke, app::Quit, context),
        }
    }
}

/// Keystroke, action and the key context it is scoped to.
///
/// Enter is scoped per panel, so it only fires while its panel holds focus.
/// Both login inputs sit inside `LoginPanel`. A focused control claims Enter
/// for itself.
pub const KEY_BINDINGS: &[(&str, Shortcut, &str)] = &[
    ("backspace", Shortcut::Backspace, "TextInput"),
    ("delete", Shortcut::Delete, "TextInput"),
    ("left", Shortcut::Left, "TextInput"),
    ("right", Shortcut::Right, "TextInput"),
    ("shift-left", Shortcut::SelectLeft, "TextInput"),
    ("shift-right", Shortcut::SelectRight, "TextInput"),
    ("home", Shortcut::Home, "TextInput"),
    ("end", Shortcut::End, "TextInput"),
    ("cmd-a", Shortcut::SelectAll, "TextInput"),
    ("cmd-v", Shortcut::Paste, "TextInput"),
    ("cmd-c", Shortcut::Copy, "TextInput"),
    ("cmd-x", Shortcut::Cut, "TextInput"),
    ("ctrl-a", Shortcut::SelectAll, "TextInput"),
    ("ctrl-v", Shortcut::Paste, "TextInput"),
    ("ctrl-c", Shortcut::Copy, "TextInput"),
    ("ctrl-x", Shortcut::Cut, "TextInput"),
    ("enter", Shortcut::Proceed, "LoginPanel"),
    ("enter", Shortcut::SubmitForm, "FormPanel"),
    ("enter", Shortcut::Activate, "Control"),
    ("space", Shortcut::Activate, "Control"),
    ("left", Shortcut::RangeDecrease, "RangeSlider"),
    ("right", Shortcut::RangeIncrease, "RangeSlider"),
    ("escape", Shortcut::DismissOverlay, "SuccessOverlay"),
    ("tab", Shortcut::FocusNext, "FormFlowApp"),
    ("shift-tab", Shortcut::FocusPrevious, "FormFlowApp"),
    ("cmd-q", Shortcut::Quit, "FormFlowApp"),
    ("ctrl-q", Shortcut::Quit, "FormFlowApp"),
];

pub fn bind_keys(context: &mut App) {
    context.bind_keys(
        KEY_BINDINGS
            .iter()
            .map(|(keystroke, shortcut, scope)| shortcut.key_binding(keystroke, scope)),
    );
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn bound(keystroke: &str, context: &str) -> Vec<Shortcut> {
        KEY_BINDINGS
            .iter()
            .filter(|(key, _, scope)| *key == keystroke && *scope == context)
            .map(|(_, shortcut, _)| *shortcut)
            .collect()
    }

    #[test]
    fn enter_in_login_panel_proceeds() {
        assert_eq!(bound("enter", "LoginPanel"), [Shortcut::Proceed]);
    }

    #[test]
    fn text_inputs_leave_enter_to_their_panel() {
        assert!(bound("enter", "TextInput").is_empty());
        assert!(bound("space", "TextInput").is_empty());
    }

    #[test]
    fn enter_in_form_panel_submits() {
        assert_eq!(bound("enter", "FormPanel"), [Shortcut::SubmitForm]);
    }

    #[test]
    fn each_keystroke_has_one_action_per_context() {
        let mut seen = HashSet::new();
        for (keystroke, _, context) in KEY_BINDINGS {
            assert!(
                seen.insert((*keystroke, *context)),
                "{keystroke} bound twice in {context}"
            );
        }
    }

    #[test]
    fn space_is_only_bound_on_controls() {
        let contexts: Vec<&str> = KEY_BINDINGS
            .iter()
            .filter(|(keystroke, _, _)| *keystroke == "space")
            .map(|(_, _, context)| *context)
            .collect();
        assert_eq!(contexts, ["Control"]);
    }
}
