//! Floating controls and the feature list panel.
//!
//! Panels never mutate state directly; they emit [`UiAction`]s that
//! the app applies after the frame is laid out.

use egui::{Align2, Area, Color32, Context, CornerRadius, Id, RichText, Sense, vec2};
use trailmark_core::{EMPTY_PLACEHOLDER, FeatureId, FeatureRoster};
use trailmark_widgets::{TextButton, ToolButton, layout, theme};

use crate::map_view::ToolKind;

/// Deferred UI intent collected during panel layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    SelectTool(ToolKind),
    ZoomIn,
    ZoomOut,
    EditFeature(FeatureId),
    DeleteFeature(FeatureId),
    TrashSelection,
}

/// Corner a floating control group is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAnchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ControlAnchor {
    fn align(self) -> Align2 {
        match self {
            ControlAnchor::TopLeft => Align2::LEFT_TOP,
            ControlAnchor::TopRight => Align2::RIGHT_TOP,
            ControlAnchor::BottomLeft => Align2::LEFT_BOTTOM,
            ControlAnchor::BottomRight => Align2::RIGHT_BOTTOM,
        }
    }

    /// Inward margin from the anchored corner.
    fn offset(self) -> egui::Vec2 {
        const MARGIN: f32 = 12.0;
        match self {
            ControlAnchor::TopLeft => vec2(MARGIN, MARGIN),
            ControlAnchor::TopRight => vec2(-MARGIN, MARGIN),
            ControlAnchor::BottomLeft => vec2(MARGIN, -MARGIN),
            ControlAnchor::BottomRight => vec2(-MARGIN, -MARGIN),
        }
    }
}

/// The floating tool bar: draw tools and trash.
pub fn toolbar(
    ctx: &Context,
    anchor: ControlAnchor,
    active_tool: ToolKind,
    actions: &mut Vec<UiAction>,
) {
    Area::new(Id::new("toolbar"))
        .anchor(anchor.align(), anchor.offset())
        .show(ctx, |ui| {
            layout::toolbar_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    let tools = [
                        (ToolKind::Select, "\u{2196}", "Select"),
                        (ToolKind::DrawRoute, "\u{270F}", "Draw route"),
                        (ToolKind::DrawArea, "\u{2B1F}", "Draw area"),
                    ];
                    for (tool, glyph, tooltip) in tools {
                        if ToolButton::new(glyph, tooltip)
                            .selected(active_tool == tool)
                            .show(ui)
                        {
                            actions.push(UiAction::SelectTool(tool));
                        }
                    }

                    ui.add_space(4.0);
                    if ToolButton::new("\u{1F5D1}", "Delete selection").show(ui) {
                        actions.push(UiAction::TrashSelection);
                    }
                });
            });
        });
}

/// The navigation control: zoom in/out.
pub fn nav_controls(ctx: &Context, anchor: ControlAnchor, actions: &mut Vec<UiAction>) {
    Area::new(Id::new("nav_controls"))
        .anchor(anchor.align(), anchor.offset())
        .show(ctx, |ui| {
            layout::toolbar_frame().show(ui, |ui| {
                ui.vertical(|ui| {
                    if ToolButton::new("+", "Zoom in").show(ui) {
                        actions.push(UiAction::ZoomIn);
                    }
                    if ToolButton::new("\u{2212}", "Zoom out").show(ui) {
                        actions.push(UiAction::ZoomOut);
                    }
                });
            });
        });
}

/// The feature list: a floating panel with a counted header, one row
/// per feature, or the empty placeholder.
pub fn features_panel(ctx: &Context, roster: &FeatureRoster, actions: &mut Vec<UiAction>) {
    Area::new(Id::new("features_panel"))
        .anchor(
            ControlAnchor::TopRight.align(),
            ControlAnchor::TopRight.offset(),
        )
        .show(ctx, |ui| {
            layout::panel_frame().show(ui, |ui| {
                ui.set_width(240.0);
                ui.label(
                    RichText::new(roster.header())
                        .size(14.0)
                        .strong()
                        .color(theme::TEXT),
                );
                layout::separator(ui);

                if roster.is_empty() {
                    ui.label(
                        RichText::new(EMPTY_PLACEHOLDER)
                            .size(12.0)
                            .color(theme::TEXT_MUTED),
                    );
                    return;
                }

                egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                    for feature in roster.entries() {
                        feature_row(ui, roster, feature, actions);
                        ui.add_space(4.0);
                    }
                });
            });
        });
}

fn feature_row(
    ui: &mut egui::Ui,
    roster: &FeatureRoster,
    feature: &trailmark_core::Feature,
    actions: &mut Vec<UiAction>,
) {
    let highlighted = roster.selected() == Some(&feature.id);
    let row_height = 30.0;
    let (rect, _response) = ui.allocate_exact_size(
        vec2(ui.available_width(), row_height),
        Sense::hover(),
    );

    if ui.is_rect_visible(rect) {
        let bg = if highlighted {
            theme::SELECTED_BG
        } else {
            Color32::TRANSPARENT
        };
        ui.painter().rect_filled(rect, CornerRadius::same(4), bg);
    }

    let mut row_ui = ui.new_child(
        egui::UiBuilder::new()
            .max_rect(rect.shrink2(vec2(6.0, 0.0)))
            .layout(egui::Layout::left_to_right(egui::Align::Center)),
    );
    row_ui.label(
        RichText::new(feature.label())
            .size(12.0)
            .color(theme::TEXT),
    );
    row_ui.add_space(6.0);
    let short_id: String = feature.id.chars().take(8).collect();
    layout::section_label(&mut row_ui, &short_id);
    row_ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        if TextButton::new("Delete").danger().show(ui) {
            actions.push(UiAction::DeleteFeature(feature.id.clone()));
        }
        ui.add_space(4.0);
        if TextButton::new("Edit").show(ui) {
            actions.push(UiAction::EditFeature(feature.id.clone()));
        }
    });
}
