// Dark glass theme
//
// Panels float on a deep navy base, accent violet drives focus rings,
// the primary button and the slider fill.

// Backgrounds
pub const SURFACE: u32 = 0x0f1020;
pub const TITLEBAR_BACKGROUND: u32 = 0x16172b;
pub const PANEL_BACKGROUND: u32 = 0x1b1c34;
pub const INPUT_BACKGROUND: u32 = 0x24254a;
pub const OVERLAY_SCRIM: u32 = 0x0f1020cc;

// Borders
pub const BORDER: u32 = 0x3a3b66;
pub const BORDER_FOCUS: u32 = 0x6c63ff;

// Text
pub const TEXT_PRIMARY: u32 = 0xf1f1f8;
pub const TEXT_DIM: u32 = 0x9a9bc0;
pub const TEXT_WHITE: u32 = 0xffffff;
pub const INPUT_PLACEHOLDER: u32 = 0x9a9bc066;

// Buttons
pub const BUTTON_PRIMARY: u32 = 0x6c63ff;
pub const BUTTON_HOVER: u32 = 0x5a52e0;

// Slider, split at the current value: fill on the left, track on the right
pub const RANGE_FILL: u32 = 0x6c63ff;
pub const RANGE_TRACK: u32 = 0xffffff1f; // white at 0.12

// Range echo tiers
pub const TIER_LOW: u32 = 0xf472b6;
pub const TIER_MID: u32 = 0xa5b4fc;
pub const TIER_HIGH: u32 = 0x34d399;

// Overlay
pub const SUCCESS: u32 = 0x34d399;

// Selection highlight
pub const SELECTION: u32 = 0x6c63ff40;

// Typography
pub const TEXT_SIZE_LARGE: f32 = 20.0;
pub const TEXT_SIZE_MEDIUM: f32 = 13.0;
pub const TEXT_SIZE_SMALL: f32 = 12.0;
pub const TEXT_SIZE_EXTRA_SMALL: f32 = 10.0;

pub const LINE_HEIGHT_MEDIUM: f32 = 18.0;

// Element sizing
pub const ELEMENT_HEIGHT: f32 = 32.0;
pub const TITLEBAR_HEIGHT: f32 = 32.0;
pub const RANGE_HEIGHT: f32 = 8.0;
pub const SWATCH_SIZE: f32 = 22.0;
pub const SUCCESS_ICON_SIZE: f32 = 56.0;

// Radius
pub const RADIUS: f32 = 4.0;
pub const RADIUS_LARGE: f32 = 12.0;
pub const CURSOR_WIDTH: f32 = 2.0;

// Glow around the color label, like a 3px outset ring
pub const GLOW_SPREAD: f32 = 3.0;

// Spacing
pub const GAP_EXTRA_SMALL: f32 = 4.0;
pub const GAP_SMALL: f32 = 8.0;
pub const GAP_MEDIUM: f32 = 12.0;
pub const GAP_LARGE: f32 = 20.0;

// Padding
pub const PADDING_INPUT_HORIZONTAL: f32 = 10.0;
pub const PADDING_INPUT_VERTICAL: f32 = 6.0;
pub const PADDING_PANEL: f32 = 28.0;

// Shake feedback
pub const SHAKE_AMPLITUDE: f32 = 6.0;
pub const SHAKE_DURATION_MS: u64 = 400;

// Layout
pub const WINDOW_WIDTH: f32 = 520.0;
pub const WINDOW_HEIGHT: f32 = 720.0;
pub const PANEL_WIDTH: f32 = 400.0;
pub const OVERLAY_WIDTH: f32 = 360.0;
