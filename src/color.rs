use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("color {0:?} is not in #rrggbb form")]
    Malformed(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f32,
}

impl Rgba {
    /// Packed `0xrrggbbaa`, the form the theme constants use.
    pub fn to_u32(&self) -> u32 {
        let alpha = (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u32;
        (u32::from(self.red) << 24)
            | (u32::from(self.green) << 16)
            | (u32::from(self.blue) << 8)
            | alpha
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({},{},{},{})",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

pub fn hex_to_rgba(hex: &str, alpha: f32) -> Result<Rgba, ColorError> {
    let malformed = || ColorError::Malformed(hex.to_string());
    let digits = hex.strip_prefix('#').ok_or_else(malformed)?;
    if digits.len() != 6 || !digits.chars().all(|character| character.is_ascii_hexdigit()) {
        return Err(malformed());
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| malformed())
    };
    Ok(Rgba {
        red: channel(0..2)?,
        green: channel(2..4)?,
        blue: channel(4..6)?,
        alpha,
    })
}

/// `0xrrggbb` for a `#rrggbb` string.
pub fn hex_to_u32(hex: &str) -> Result<u32, ColorError> {
    let color = hex_to_rgba(hex, 1.0)?;
    Ok(color.to_u32() >> 8)
}

/// Border and glow reflected onto the color label. `None` means the theme
/// default applies.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorAccent {
    border: Option<String>,
    glow: Option<Rgba>,
}

impl ColorAccent {
    pub fn apply(&mut self, hex: &str, glow_alpha: f32) -> Result<(), ColorError> {
        let glow = hex_to_rgba(hex, glow_alpha)?;
        self.border = Some(hex.to_string());
        self.glow = Some(glow);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.border = None;
        self.glow = None;
    }

    pub fn border(&self) -> Option<&str> {
        self.border.as_deref()
    }

    pub fn glow(&self) -> Option<Rgba> {
        self.glow
    }
}
