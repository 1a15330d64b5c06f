//! Interactive map canvas: feature rendering, drawing tools, and
//! pointer routing into the engine.

use egui::{Color32, CursorIcon, Rect, Sense, Stroke, StrokeKind, Ui};
use kurbo::{Point, Vec2};
use trailmark_core::{DrawEngine, Geometry, InteractionMode, MemoryEngine, VertexPath};
use trailmark_widgets::theme;

use crate::camera::MapCamera;
use crate::drawing::DrawingManager;

/// Pixel radius for hitting features and handles.
const HIT_TOLERANCE_PX: f64 = 8.0;
const VERTEX_HANDLE_PX: f32 = 5.0;
const MIDPOINT_HANDLE_PX: f32 = 3.5;

/// Active drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolKind {
    /// Select and move features.
    #[default]
    Select,
    /// Draw a route (line string), click by click.
    DrawRoute,
    /// Draw an area (polygon), click by click.
    DrawArea,
}

/// What the current pointer drag is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DragTarget {
    #[default]
    None,
    /// Forwarded to the engine (feature or vertex drag).
    Engine,
    /// Pans the camera.
    Camera,
}

/// The map view: camera state, the active tool, and an in-progress
/// draft geometry.
pub struct MapView {
    pub camera: MapCamera,
    pub tool: ToolKind,
    draft: Vec<Point>,
    drag_target: DragTarget,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            camera: MapCamera::default(),
            tool: ToolKind::Select,
            draft: Vec::new(),
            drag_target: DragTarget::None,
        }
    }
}

impl MapView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a draft geometry is in progress.
    pub fn has_draft(&self) -> bool {
        !self.draft.is_empty()
    }

    /// Switch tools, discarding any draft.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.tool != tool {
            self.draft.clear();
        }
        self.tool = tool;
    }

    /// Discard the in-progress draft, if any.
    pub fn cancel_draft(&mut self) {
        self.draft.clear();
    }

    /// Commit the draft to the engine if it has enough vertices.
    /// Routes need two points, areas three. Short drafts are dropped.
    pub fn finish_draft(&mut self, drawing: &mut DrawingManager) {
        let draft = std::mem::take(&mut self.draft);
        let geometry = match self.tool {
            ToolKind::DrawRoute if draft.len() >= 2 => Some(Geometry::line_string(draft)),
            ToolKind::DrawArea if draft.len() >= 3 => Some(Geometry::polygon(draft)),
            _ => None,
        };
        if let Some(geometry) = geometry {
            drawing.engine_mut().add_feature(geometry);
            self.tool = ToolKind::Select;
        }
    }

    /// Render the map and route pointer input into the engine.
    pub fn show(&mut self, ui: &mut Ui, drawing: &mut DrawingManager) {
        let rect = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(rect, Sense::click_and_drag());
        let viewport = Vec2::new(rect.width() as f64, rect.height() as f64);
        let origin = Vec2::new(rect.left() as f64, rect.top() as f64);

        self.handle_zoom(ui, &response, rect, viewport, origin);

        self.paint_background(ui, rect, viewport, origin);
        self.paint_features(ui, drawing.engine(), viewport, origin);
        self.paint_handles(ui, drawing.engine(), viewport, origin);
        self.paint_draft(ui, &response, viewport, origin);

        match self.tool {
            ToolKind::Select => self.handle_select_input(ui, &response, drawing, viewport, origin),
            ToolKind::DrawRoute | ToolKind::DrawArea => {
                response.clone().on_hover_cursor(CursorIcon::Crosshair);
                self.handle_draw_input(&response, drawing, viewport, origin);
            }
        }
    }

    fn to_screen(&self, world: Point, viewport: Vec2, origin: Vec2) -> egui::Pos2 {
        let p = self.camera.world_to_screen(world, viewport) + origin;
        egui::Pos2::new(p.x as f32, p.y as f32)
    }

    fn to_world(&self, screen: egui::Pos2, viewport: Vec2, origin: Vec2) -> Point {
        let p = Point::new(screen.x as f64, screen.y as f64) - origin;
        self.camera.screen_to_world(p, viewport)
    }

    /// World-units radius matching [`HIT_TOLERANCE_PX`] on screen.
    fn hit_tolerance(&self) -> f64 {
        HIT_TOLERANCE_PX / self.camera.scale()
    }

    fn handle_zoom(
        &mut self,
        ui: &Ui,
        response: &egui::Response,
        rect: Rect,
        viewport: Vec2,
        origin: Vec2,
    ) {
        if !response.hovered() {
            return;
        }
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if scroll != 0.0 {
            let anchor = ui
                .input(|i| i.pointer.hover_pos())
                .unwrap_or(rect.center());
            let anchor = Point::new(anchor.x as f64, anchor.y as f64) - origin;
            self.camera.zoom_by(scroll as f64 * 0.01, anchor, viewport);
        }
    }

    fn paint_background(&self, ui: &Ui, rect: Rect, viewport: Vec2, origin: Vec2) {
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::from_rgb(248, 249, 246));

        // Graticule: pick a degree spacing that lands near 100 px.
        let scale = self.camera.scale();
        let target = 100.0 / scale;
        let spacing = [0.001, 0.01, 0.1, 0.5, 1.0, 5.0, 10.0, 30.0]
            .into_iter()
            .find(|s| *s >= target)
            .unwrap_or(30.0);

        let top_left = self.camera.screen_to_world(Point::ZERO, viewport);
        let bottom_right =
            self.camera.screen_to_world(Point::new(viewport.x, viewport.y), viewport);
        let stroke = Stroke::new(0.5, Color32::from_gray(225));

        let mut lng = (top_left.x / spacing).floor() * spacing;
        while lng <= bottom_right.x {
            let x = self.to_screen(Point::new(lng, 0.0), viewport, origin).x;
            painter.line_segment(
                [egui::Pos2::new(x, rect.top()), egui::Pos2::new(x, rect.bottom())],
                stroke,
            );
            lng += spacing;
        }
        let mut lat = (bottom_right.y / spacing).floor() * spacing;
        while lat <= top_left.y {
            let y = self.to_screen(Point::new(0.0, lat), viewport, origin).y;
            painter.line_segment(
                [egui::Pos2::new(rect.left(), y), egui::Pos2::new(rect.right(), y)],
                stroke,
            );
            lat += spacing;
        }
    }

    fn paint_features(&self, ui: &Ui, engine: &MemoryEngine, viewport: Vec2, origin: Vec2) {
        let painter = ui.painter();
        for feature in engine.all_features() {
            let selected = engine.is_selected(&feature.id)
                || engine.active_feature() == Some(&feature.id);
            let color = if selected {
                theme::ACCENT
            } else {
                Color32::from_rgb(90, 110, 140)
            };
            let width = if selected { 3.0 } else { 2.0 };

            match &feature.geometry {
                Geometry::LineString(points) => {
                    let screen: Vec<egui::Pos2> = points
                        .iter()
                        .map(|p| self.to_screen(*p, viewport, origin))
                        .collect();
                    painter.add(egui::Shape::line(screen, Stroke::new(width, color)));
                }
                Geometry::Polygon(rings) => {
                    for ring in rings {
                        let mut screen: Vec<egui::Pos2> = ring
                            .iter()
                            .map(|p| self.to_screen(*p, viewport, origin))
                            .collect();
                        let fill = color.gamma_multiply(0.15);
                        painter.add(egui::Shape::convex_polygon(
                            screen.clone(),
                            fill,
                            Stroke::NONE,
                        ));
                        if let Some(first) = screen.first().copied() {
                            screen.push(first);
                        }
                        painter.add(egui::Shape::line(screen, Stroke::new(width, color)));
                    }
                }
            }
        }
    }

    /// Vertex and midpoint handles for the feature being edited.
    fn paint_handles(&self, ui: &Ui, engine: &MemoryEngine, viewport: Vec2, origin: Vec2) {
        if engine.mode() != InteractionMode::DirectSelect {
            return;
        }
        let Some(feature) = engine.active_feature().and_then(|id| engine.feature(id)) else {
            return;
        };
        let painter = ui.painter();
        let geometry = &feature.geometry;

        for ring in 0..geometry.ring_count() {
            for (_, midpoint) in geometry.segment_midpoints(ring) {
                let center = self.to_screen(midpoint, viewport, origin);
                painter.circle_filled(center, MIDPOINT_HANDLE_PX, Color32::from_gray(150));
            }
        }
        for path in geometry.vertex_paths() {
            let Some(world) = geometry.vertex(path) else {
                continue;
            };
            let center = self.to_screen(world, viewport, origin);
            let selected = engine.selection().vertex_paths.contains(&path);
            let fill = if selected { theme::ACCENT } else { Color32::WHITE };
            let r = VERTEX_HANDLE_PX;
            let handle = Rect::from_center_size(center, egui::vec2(r * 2.0, r * 2.0));
            painter.rect_filled(handle, 1.0, fill);
            painter.rect_stroke(handle, 1.0, Stroke::new(1.5, theme::ACCENT), StrokeKind::Inside);
        }
    }

    fn paint_draft(&self, ui: &Ui, response: &egui::Response, viewport: Vec2, origin: Vec2) {
        if self.draft.is_empty() {
            return;
        }
        let painter = ui.painter();
        let mut screen: Vec<egui::Pos2> = self
            .draft
            .iter()
            .map(|p| self.to_screen(*p, viewport, origin))
            .collect();
        if let Some(hover) = response.hover_pos() {
            screen.push(hover);
        }
        if self.tool == ToolKind::DrawArea && screen.len() > 2 {
            painter.add(egui::Shape::convex_polygon(
                screen.clone(),
                theme::ACCENT.gamma_multiply(0.1),
                Stroke::NONE,
            ));
        }
        painter.add(egui::Shape::dashed_line(
            &screen,
            Stroke::new(2.0, theme::ACCENT),
            6.0,
            4.0,
        ));
        for pos in &screen[..screen.len().saturating_sub(1)] {
            painter.circle_filled(*pos, 3.0, theme::ACCENT);
        }
    }

    fn handle_draw_input(
        &mut self,
        response: &egui::Response,
        drawing: &mut DrawingManager,
        viewport: Vec2,
        origin: Vec2,
    ) {
        if response.double_clicked() {
            self.finish_draft(drawing);
            return;
        }
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.draft.push(self.to_world(pos, viewport, origin));
            }
        }
    }

    fn handle_select_input(
        &mut self,
        ui: &Ui,
        response: &egui::Response,
        drawing: &mut DrawingManager,
        viewport: Vec2,
        origin: Vec2,
    ) {
        if response.double_clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let world = self.to_world(pos, viewport, origin);
                if let Some(id) = self.feature_at(drawing.engine(), world) {
                    drawing.edit_feature(&id);
                }
            }
            return;
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.handle_select_click(ui, pos, drawing, viewport, origin);
            }
            return;
        }

        if response.drag_started() {
            self.drag_target = self.decide_drag_target(ui, response, drawing, viewport, origin);
        }
        if response.dragged() {
            let delta = response.drag_delta();
            match self.drag_target {
                DragTarget::Engine => {
                    let world = self
                        .camera
                        .screen_delta_to_world(Vec2::new(delta.x as f64, delta.y as f64));
                    drawing.engine_mut().drag(world);
                }
                DragTarget::Camera => {
                    self.camera.pan_pixels(Vec2::new(delta.x as f64, delta.y as f64));
                }
                DragTarget::None => {}
            }
        }
        if response.drag_stopped() {
            if self.drag_target == DragTarget::Engine {
                drawing.engine_mut().end_drag();
            }
            self.drag_target = DragTarget::None;
        }
    }

    /// Single click in select mode: vertex handles first, then
    /// midpoints, then whole features, then empty space.
    fn handle_select_click(
        &mut self,
        ui: &Ui,
        pos: egui::Pos2,
        drawing: &mut DrawingManager,
        viewport: Vec2,
        origin: Vec2,
    ) {
        let world = self.to_world(pos, viewport, origin);
        let engine = drawing.engine_mut();
        let shift = ui.input(|i| i.modifiers.shift);

        if engine.mode() == InteractionMode::DirectSelect {
            if let Some(path) = self.vertex_at(engine, world) {
                if shift {
                    engine.extend_vertex_selection(path);
                } else {
                    engine.select_vertex(path);
                }
                return;
            }
            if let Some((ring, segment)) = self.midpoint_at(engine, world) {
                engine.insert_vertex(ring, segment);
                return;
            }
        }

        match self.feature_at(engine, world) {
            Some(id) => engine.select(&id),
            None => engine.clear_selection(),
        }
    }

    fn decide_drag_target(
        &self,
        ui: &Ui,
        response: &egui::Response,
        drawing: &mut DrawingManager,
        viewport: Vec2,
        origin: Vec2,
    ) -> DragTarget {
        let Some(pos) = response.interact_pointer_pos() else {
            return DragTarget::Camera;
        };
        let world = self.to_world(pos, viewport, origin);
        let engine = drawing.engine_mut();
        let shift = ui.input(|i| i.modifiers.shift);

        if engine.mode() == InteractionMode::DirectSelect {
            if let Some(path) = self.vertex_at(engine, world) {
                if shift {
                    engine.extend_vertex_selection(path);
                } else if !engine.selection().vertex_paths.contains(&path) {
                    engine.select_vertex(path);
                }
                return DragTarget::Engine;
            }
            if let Some((ring, segment)) = self.midpoint_at(engine, world) {
                engine.insert_vertex(ring, segment);
                return DragTarget::Engine;
            }
        }

        if let Some(id) = self.feature_at(engine, world) {
            if !engine.is_selected(&id) && engine.mode() == InteractionMode::Select {
                engine.select(&id);
            }
            return DragTarget::Engine;
        }
        DragTarget::Camera
    }

    /// Topmost feature under `world`, searching newest first.
    fn feature_at(&self, engine: &MemoryEngine, world: Point) -> Option<String> {
        let tolerance = self.hit_tolerance();
        engine
            .all_features()
            .iter()
            .rev()
            .find(|f| f.geometry.hit_test(world, tolerance))
            .map(|f| f.id.clone())
    }

    fn vertex_at(&self, engine: &MemoryEngine, world: Point) -> Option<VertexPath> {
        let feature = engine.active_feature().and_then(|id| engine.feature(id))?;
        let tolerance = self.hit_tolerance();
        feature
            .geometry
            .vertex_paths()
            .into_iter()
            .find(|path| {
                feature
                    .geometry
                    .vertex(*path)
                    .is_some_and(|v| v.distance(world) <= tolerance)
            })
    }

    fn midpoint_at(&self, engine: &MemoryEngine, world: Point) -> Option<(usize, usize)> {
        let feature = engine.active_feature().and_then(|id| engine.feature(id))?;
        let tolerance = self.hit_tolerance();
        for ring in 0..feature.geometry.ring_count() {
            for (segment, midpoint) in feature.geometry.segment_midpoints(ring) {
                if midpoint.distance(world) <= tolerance {
                    return Some((ring, segment));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_draft_is_dropped() {
        let mut view = MapView::new();
        let mut drawing = DrawingManager::mount().unwrap();

        view.tool = ToolKind::DrawRoute;
        view.draft.push(Point::new(0.0, 0.0));
        view.finish_draft(&mut drawing);
        drawing.pump_events();

        assert!(drawing.roster().is_empty());
        assert!(!view.has_draft());
    }

    #[test]
    fn test_finished_route_lands_in_roster() {
        let mut view = MapView::new();
        let mut drawing = DrawingManager::mount().unwrap();

        view.tool = ToolKind::DrawRoute;
        view.draft.push(Point::new(0.0, 0.0));
        view.draft.push(Point::new(1.0, 1.0));
        view.finish_draft(&mut drawing);
        drawing.pump_events();

        assert_eq!(drawing.roster().len(), 1);
        assert_eq!(drawing.roster().entries()[0].label(), "Route");
        assert_eq!(view.tool, ToolKind::Select);
    }

    #[test]
    fn test_finished_area_needs_three_points() {
        let mut view = MapView::new();
        let mut drawing = DrawingManager::mount().unwrap();

        view.tool = ToolKind::DrawArea;
        view.draft.push(Point::new(0.0, 0.0));
        view.draft.push(Point::new(1.0, 0.0));
        view.finish_draft(&mut drawing);
        drawing.pump_events();
        assert!(drawing.roster().is_empty());

        view.tool = ToolKind::DrawArea;
        view.draft.push(Point::new(0.0, 0.0));
        view.draft.push(Point::new(1.0, 0.0));
        view.draft.push(Point::new(0.5, 1.0));
        view.finish_draft(&mut drawing);
        drawing.pump_events();
        assert_eq!(drawing.roster().len(), 1);
        assert_eq!(drawing.roster().entries()[0].label(), "Area");
    }

    #[test]
    fn test_switching_tools_discards_draft() {
        let mut view = MapView::new();
        view.tool = ToolKind::DrawRoute;
        view.draft.push(Point::new(0.0, 0.0));

        view.set_tool(ToolKind::DrawArea);
        assert!(!view.has_draft());
    }
}
