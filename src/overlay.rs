#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayIcon {
    Check,
}

impl OverlayIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Check => "✓",
        }
    }
}

/// Declared content of the modal shown after a submit. The view renders it;
/// nothing builds markup by hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuccessOverlay {
    pub icon: OverlayIcon,
    pub heading: &'static str,
    pub message: [&'static str; 2],
    pub dismiss_label: &'static str,
}

impl SuccessOverlay {
    pub fn confirmation() -> Self {
        Self {
            icon: OverlayIcon::Check,
            heading: "Data sent!",
            message: [
                "Your information was recorded successfully.",
                "You will receive a confirmation shortly.",
            ],
            dismiss_label: "Back to start",
        }
    }
}
