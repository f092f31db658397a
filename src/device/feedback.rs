use super::Outcome;
use crate::error::Result;

/// Status shown by the feedback indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// No successful result has been seen yet
    Indeterminate,
    Enabled,
    Disabled,
}

impl Default for Feedback {
    fn default() -> Self {
        Feedback::Indeterminate
    }
}

impl From<bool> for Feedback {
    fn from(enabled: bool) -> Self {
        if enabled {
            Feedback::Enabled
        } else {
            Feedback::Disabled
        }
    }
}

impl From<Option<bool>> for Feedback {
    fn from(enabled: Option<bool>) -> Self {
        enabled.map_or(Feedback::Indeterminate, Feedback::from)
    }
}

/// A failed operation counts as disabled
impl From<&Result<Outcome>> for Feedback {
    fn from(result: &Result<Outcome>) -> Self {
        match result {
            Ok(outcome) => outcome.enabled.into(),
            Err(_) => Feedback::Disabled,
        }
    }
}

/// An RGB color as the control panel renders it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Color packed as `0xRRGGBB`
    pub fn packed(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// Pick the indicator color for a feedback state
pub fn derive_feedback_color(feedback: Feedback) -> Color {
    match feedback {
        Feedback::Indeterminate => Color::BLACK,
        Feedback::Enabled => Color::GREEN,
        Feedback::Disabled => Color::RED,
    }
}
