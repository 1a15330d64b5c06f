//! Trailmark desktop application: map canvas, drawing tools, and the
//! feature list.

pub mod app;
pub mod camera;
pub mod drawing;
pub mod map_view;
pub mod ui;

pub use app::{AppConfig, TrailmarkApp, run};
pub use camera::MapCamera;
pub use drawing::DrawingManager;
pub use map_view::{MapView, ToolKind};
