//! Reusable egui widget components for the Trailmark UI:
//!
//! - **Buttons**: tool toggles and small text action buttons
//! - **Layout**: section labels, separators, panel frames

pub mod buttons;
pub mod layout;

pub use buttons::{TextButton, TextButtonStyle, ToolButton};
pub use layout::{panel_frame, section_label, separator, toolbar_frame};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Tool button size (toolbar).
    pub const TOOL: f32 = 32.0;
    /// Standard corner radius.
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius.
    pub const PANEL_RADIUS: u8 = 8;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray).
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color.
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color.
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue).
    pub const ACCENT: Color32 = Color32::from_rgb(51, 102, 204);
    /// Destructive-action color (red).
    pub const DANGER: Color32 = Color32::from_rgb(204, 51, 51);
    /// Hover background.
    pub const HOVER_BG: Color32 = Color32::from_rgb(245, 245, 245);
    /// Selected-row background.
    pub const SELECTED_BG: Color32 = Color32::from_rgb(235, 245, 255);
    /// Panel background.
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
}
