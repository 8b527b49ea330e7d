use crate::flow::FieldId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Masked,
    Revealed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EyeIcon {
    Open,
    Closed,
}

impl EyeIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Open => "◉",
            Self::Closed => "◎",
        }
    }
}

/// Reveal control for exactly one password field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordToggle {
    target: FieldId,
    visibility: Visibility,
}

impl PasswordToggle {
    pub fn new(target: FieldId) -> Self {
        Self {
            target,
            visibility: Visibility::Masked,
        }
    }

    pub fn target(&self) -> FieldId {
        self.target
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn masks(&self) -> bool {
        self.visibility() == Visibility::Masked
    }

    pub fn toggle(&mut self) -> Visibility {
        self.visibility = match self.visibility {
            Visibility::Masked => Visibility::Revealed,
            Visibility::Revealed => Visibility::Masked,
        };
        self.visibility
    }

    pub fn mask(&mut self) {
        self.visibility = Visibility::Masked;
    }

    pub fn icon(&self) -> EyeIcon {
        match self.visibility {
            Visibility::Masked => EyeIcon::Open,
            Visibility::Revealed => EyeIcon::Closed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self.visibility {
            Visibility::Masked => "Show password",
            Visibility::Revealed => "Hide password",
        }
    }
}

/// All reveal controls of the document, looked up by their target field.
#[derive(Clone, Debug, Default)]
pub struct PasswordToggles {
    toggles: Vec<PasswordToggle>,
}

impl PasswordToggles {
    pub fn new(targets: &[FieldId]) -> Self {
        Self {
            toggles: targets.iter().copied().map(PasswordToggle::new).collect(),
        }
    }

    pub fn get(&self, target: FieldId) -> Option<&PasswordToggle> {
        self.toggles.iter().find(|toggle| toggle.target == target)
    }

    pub fn toggle(&mut self, target: FieldId) -> Option<Visibility> {
        self.toggles
            .iter_mut()
            .find(|toggle| toggle.target == target)
            .map(PasswordToggle::toggle)
    }

    pub fn mask_all(&mut self) {
        self.toggles.iter_mut().for_each(PasswordToggle::mask);
    }

    pub fn iter(&self) -> impl Iterator<Item = &PasswordToggle> {
        self.toggles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_swaps_icon_and_label() {
        let mut toggle = PasswordToggle::new(FieldId::LoginPassword);
        assert!(toggle.masks());
        assert_eq!(toggle.icon(), EyeIcon::Open);
        assert_eq!(toggle.label(), "Show password");

        assert_eq!(toggle.toggle(), Visibility::Revealed);
        assert!(!toggle.masks());
        assert_eq!(toggle.icon(), EyeIcon::Closed);
        assert_eq!(toggle.label(), "Hide password");

        assert_eq!(toggle.toggle(), Visibility::Masked);
        assert_eq!(toggle.icon(), EyeIcon::Open);
    }

    #[test]
    fn toggles_do_not_interfere() {
        let mut toggles = PasswordToggles::new(&[FieldId::LoginPassword, FieldId::Password]);
        toggles.toggle(FieldId::Password);

        assert_eq!(
            toggles.get(FieldId::Password).map(PasswordToggle::visibility),
            Some(Visibility::Revealed)
        );
        assert_eq!(
            toggles
                .get(FieldId::LoginPassword)
                .map(PasswordToggle::visibility),
            Some(Visibility::Masked)
        );
    }

    #[test]
    fn unknown_target_is_ignored() {
        let mut toggles = PasswordToggles::new(&[FieldId::LoginPassword]);
        assert_eq!(toggles.toggle(FieldId::Name), None);
    }

    #[test]
    fn mask_all_restores_masking() {
        let mut toggles = PasswordToggles::new(&[FieldId::LoginPassword, FieldId::Password]);
        toggles.toggle(FieldId::LoginPassword);
        toggles.toggle(FieldId::Password);
        toggles.mask_all();
        assert!(toggles.iter().all(PasswordToggle::masks));
    }
}
