//! Button components: toolbar tool toggles and small text actions.

use egui::{
    Align2, Color32, CornerRadius, CursorIcon, FontId, Pos2, Sense, Ui, vec2,
};

use crate::{sizing, theme};

/// A toolbar tool button rendered from a single glyph, solid accent
/// when selected.
pub struct ToolButton<'a> {
    glyph: &'a str,
    tooltip: &'a str,
    selected: bool,
}

impl<'a> ToolButton<'a> {
    /// Create a new tool button.
    pub fn new(glyph: &'a str, tooltip: &'a str) -> Self {
        Self {
            glyph,
            tooltip,
            selected: false,
        }
    }

    /// Set whether the button is selected/active.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let size = vec2(sizing::TOOL, sizing::TOOL);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                theme::ACCENT
            } else if response.hovered() {
                theme::HOVER_BG
            } else {
                Color32::TRANSPARENT
            };
            ui.painter()
                .rect_filled(rect, CornerRadius::same(6), bg_color);

            let glyph_color = if self.selected {
                Color32::WHITE
            } else {
                Color32::from_gray(80)
            };
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                self.glyph,
                FontId::proportional(16.0),
                glyph_color,
            );
        }

        let clicked = response.clicked();
        response
            .on_hover_text(self.tooltip)
            .on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// Visual style of a [`TextButton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextButtonStyle {
    /// Neutral text.
    #[default]
    Normal,
    /// Destructive action (red text).
    Danger,
}

/// A small bordered text button for row actions.
pub struct TextButton<'a> {
    label: &'a str,
    style: TextButtonStyle,
}

impl<'a> TextButton<'a> {
    /// Create a new text button.
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            style: TextButtonStyle::Normal,
        }
    }

    /// Use the destructive style.
    pub fn danger(mut self) -> Self {
        self.style = TextButtonStyle::Danger;
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let width = 10.0 + self.label.len() as f32 * 7.0;
        let (rect, response) = ui.allocate_exact_size(vec2(width, 20.0), Sense::click());

        if ui.is_rect_visible(rect) {
            let text_color = match self.style {
                TextButtonStyle::Normal => theme::ACCENT,
                TextButtonStyle::Danger => theme::DANGER,
            };
            let bg_color = if response.hovered() {
                theme::HOVER_BG
            } else {
                Color32::TRANSPARENT
            };

            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);
            ui.painter().rect_stroke(
                rect,
                CornerRadius::same(sizing::CORNER_RADIUS),
                egui::Stroke::new(1.0, text_color),
                egui::StrokeKind::Inside,
            );
            ui.painter().text(
                Pos2::new(rect.center().x, rect.center().y),
                Align2::CENTER_CENTER,
                self.label,
                FontId::proportional(11.0),
                text_color,
            );
        }

        let clicked = response.clicked();
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}
