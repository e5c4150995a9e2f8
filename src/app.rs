//! Application state and message handling.
//!
//! `HexSpaceApp` owns everything the canvas needs between events: the
//! annotation store, the zoom level, the color being explored and the scene
//! built for it. Front ends feed it [`Message`]s and act on the returned
//! [`Response`].

use std::path::Path;

use thiserror::Error;

use crate::color::Color;
use crate::config::{AppConfig, ConfigError};
use crate::format::{AnnotationStore, StoreError};
use crate::grid::Point;
use crate::keybindings::KeyCode;
use crate::message::{Message, Response};
use crate::model::AnnotationRecord;
use crate::render::{RenderError, Scene, build_scene, save_png};
use crate::search::{SearchError, parse_search};
use crate::zoom_math::Zoom;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Render(#[from] RenderError),

    /// An operation needs a rendered canvas but nothing was searched yet
    #[error("No color is displayed; search for a color first")]
    NothingDisplayed,
}

/// The Hex Space application.
#[derive(Debug)]
pub struct HexSpaceApp {
    config: AppConfig,
    store: AnnotationStore,
    /// Set when the store could not be read at startup.
    store_warning: Option<String>,
    zoom: Zoom,
    center: Option<Color>,
    scene: Option<Scene>,
    fullscreen: bool,
}

impl HexSpaceApp {
    /// Create the application, loading the store named in `config`.
    ///
    /// An unreadable store does not fail startup; see [`Self::store_warning`].
    pub fn new(config: AppConfig) -> Self {
        let (store, err) = AnnotationStore::open(config.store_path.clone());
        let mut app = Self::with_store(config, store);
        app.store_warning = err.map(|e| e.to_string());
        app
    }

    /// Create the application around an already loaded store.
    pub fn with_store(config: AppConfig, store: AnnotationStore) -> Self {
        Self {
            config,
            store,
            store_warning: None,
            zoom: Zoom::identity(),
            center: None,
            scene: None,
            fullscreen: true,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    /// Why the store started empty, if it could not be read.
    pub fn store_warning(&self) -> Option<&str> {
        self.store_warning.as_deref()
    }

    pub fn zoom_level(&self) -> f64 {
        self.zoom.level
    }

    pub fn set_zoom_level(&mut self, level: f64) {
        let settings = &self.config.layout.zoom;
        self.zoom = Zoom::new(level.clamp(settings.min_zoom, settings.max_zoom));
        self.rerender();
    }

    /// Color at the center of the canvas, once one has been searched.
    pub fn center(&self) -> Option<Color> {
        self.center
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Parse search text and, if valid, display that color.
    ///
    /// Invalid text leaves every piece of state untouched.
    pub fn search(&mut self, text: &str) -> Result<Color, SearchError> {
        let color = parse_search(text)?;
        log::info!("Search: {}", color);
        self.show(color);
        Ok(color)
    }

    /// Center the canvas on `color` and rebuild the scene.
    pub fn show(&mut self, color: Color) {
        self.center = Some(color);
        self.rerender();
    }

    /// Rebuild the scene from scratch. Returns false when nothing is shown.
    fn rerender(&mut self) -> bool {
        let Some(color) = self.center else {
            return false;
        };
        let layout = self.config.layout.hex_layout(self.zoom.level);
        let mut scene = build_scene(
            color,
            &self.config.neighbors,
            &layout,
            &self.config.viewport,
            &self.config.render,
        );
        scene.highlight(color);
        self.scene = Some(scene);
        true
    }

    /// Zoom in one step. Returns true if the canvas was redrawn.
    pub fn zoom_in(&mut self) -> bool {
        self.zoom = self.zoom.step_in(&self.config.layout.zoom);
        log::debug!("Zoom in: {:.3}", self.zoom.level);
        self.rerender()
    }

    /// Zoom out one step. Returns true if the canvas was redrawn.
    pub fn zoom_out(&mut self) -> bool {
        self.zoom = self.zoom.step_out(&self.config.layout.zoom);
        log::debug!("Zoom out: {:.3}", self.zoom.level);
        self.rerender()
    }

    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        log::debug!("Fullscreen: {}", self.fullscreen);
        self.fullscreen
    }

    /// Color under a canvas pixel. `None` over empty canvas or before any
    /// search.
    pub fn click(&self, point: Point) -> Option<Color> {
        self.scene.as_ref()?.hit_test(point)
    }

    /// Name a color. An empty name cancels and returns `Ok(false)`.
    ///
    /// Replaces any existing record for the color and persists the store.
    pub fn annotate(
        &mut self,
        color: Color,
        name: &str,
        tags_text: &str,
    ) -> Result<bool, StoreError> {
        let Some(record) = AnnotationRecord::from_input(name, tags_text) else {
            log::debug!("Annotation for {} cancelled", color);
            return Ok(false);
        };
        log::info!("Color {} named '{}' with tags {:?}", color, record.name, record.tags);
        self.store.set(color, record)?;
        Ok(true)
    }

    /// Text of the "Saved Colors" view: the store as written to disk.
    pub fn saved_colors_text(&self) -> Result<String, serde_json::Error> {
        self.store.to_json_pretty()
    }

    /// Write the current canvas to a PNG file.
    pub fn export_png(&self, path: &Path) -> Result<(), AppError> {
        let scene = self.scene.as_ref().ok_or(AppError::NothingDisplayed)?;
        save_png(scene, &self.config.viewport, path)?;
        Ok(())
    }

    /// Apply a message and report what the front end should do.
    pub fn handle(&mut self, message: Message) -> Response {
        match message {
            Message::Search(text) => match self.search(&text) {
                Ok(_) => Response::Redraw,
                Err(e) => {
                    log::warn!("{}", e);
                    Response::Error(e.to_string())
                }
            },
            Message::Click(point) => match self.click(point) {
                Some(color) => Response::PromptAnnotation(color),
                None => Response::None,
            },
            Message::Annotate { color, name, tags } => {
                match self.annotate(color, &name, &tags) {
                    Ok(true) => match self.store.get(color) {
                        Some(record) => Response::Annotated {
                            color,
                            name: record.name.clone(),
                            tags: record.tags.clone(),
                        },
                        None => Response::None,
                    },
                    Ok(false) => Response::None,
                    Err(e) => {
                        log::error!("Failed to save annotation: {}", e);
                        Response::Error(e.to_string())
                    }
                }
            }
            Message::ZoomIn => redraw_if(self.zoom_in()),
            Message::ZoomOut => redraw_if(self.zoom_out()),
            Message::ToggleFullscreen => {
                self.toggle_fullscreen();
                Response::Redraw
            }
        }
    }

    /// Handle a key press through the configured keybindings.
    pub fn handle_key(&mut self, key: KeyCode) -> Response {
        match self.config.keybindings.message_for_key(key) {
            Some(message) => self.handle(message),
            None => Response::None,
        }
    }
}

fn redraw_if(redrawn: bool) -> Response {
    if redrawn {
        Response::Redraw
    } else {
        Response::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Per-test scratch directory, removed when dropped.
    struct TempDir(PathBuf);

    impl TempDir {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir()
                .join(format!("hexspace-app-{}-{}", std::process::id(), name));
            let _ = std::fs::remove_dir_all(&dir);
            std::fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn store_path(&self) -> PathBuf {
            self.0.join("colors.json")
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    fn app(dir: &TempDir) -> HexSpaceApp {
        let mut config = AppConfig::new();
        config.store_path = dir.store_path();
        HexSpaceApp::new(config)
    }

    #[test]
    fn test_search_accepts_bare_hex() {
        let dir = TempDir::new("search");
        let mut app = app(&dir);
        assert_eq!(app.handle(Message::Search("ff0000".into())), Response::Redraw);
        assert_eq!(app.center(), Some(Color::RED));
        assert_eq!(app.scene().unwrap().cells().len(), 833);
    }

    #[test]
    fn test_invalid_search_changes_nothing() {
        let dir = TempDir::new("invalid");
        let mut app = app(&dir);
        app.search("#808080").unwrap();
        let before = app.scene().unwrap().cells().to_vec();

        let response = app.handle(Message::Search("zz0000".into()));
        assert!(matches!(response, Response::Error(_)));
        assert_eq!(app.center(), Some(Color::new(0x80, 0x80, 0x80)));
        assert_eq!(app.scene().unwrap().cells(), before.as_slice());
    }

    #[test]
    fn test_search_highlights_center_color() {
        let dir = TempDir::new("highlight");
        let mut app = app(&dir);
        let color = app.search("123456").unwrap();
        let highlighted: Vec<_> = app
            .scene()
            .unwrap()
            .cells()
            .iter()
            .filter(|c| c.highlighted)
            .map(|c| c.color)
            .collect();
        assert_eq!(highlighted, vec![color]);
    }

    #[test]
    fn test_click_before_search_is_noop() {
        let dir = TempDir::new("click");
        let mut app = app(&dir);
        let center = app.config().viewport.center();
        assert_eq!(app.handle(Message::Click(center)), Response::None);
    }

    #[test]
    fn test_click_prompts_for_color_under_pointer() {
        let dir = TempDir::new("click2");
        let mut app = app(&dir);
        app.search("#808080").unwrap();
        let center = app.config().viewport.center();
        assert_eq!(
            app.handle(Message::Click(center)),
            Response::PromptAnnotation(Color::new(0x80, 0x80, 0xc0))
        );
        assert_eq!(app.handle(Message::Click(Point::new(1.0, 1.0))), Response::None);
    }

    #[test]
    fn test_annotate_persists() {
        let dir = TempDir::new("annotate");
        let mut app = app(&dir);
        let color = Color::from_hex("#123456").unwrap();
        let response = app.handle(Message::Annotate {
            color,
            name: "Sky".into(),
            tags: "blue, sky".into(),
        });
        assert_eq!(
            response,
            Response::Annotated {
                color,
                name: "Sky".into(),
                tags: vec!["blue".into(), "sky".into()],
            }
        );

        let on_disk: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(app.store().path()).unwrap()).unwrap();
        assert_eq!(
            on_disk,
            serde_json::json!({"#123456": {"name": "Sky", "tags": ["blue", "sky"]}})
        );
        let written = std::fs::read_to_string(app.store().path()).unwrap();
        assert_eq!(app.saved_colors_text().unwrap(), written);
    }

    #[test]
    fn test_annotate_empty_name_is_cancelled() {
        let dir = TempDir::new("cancel");
        let mut app = app(&dir);
        assert!(!app.annotate(Color::RED, "", "a, b").unwrap());
        assert!(app.store().is_empty());
        assert!(!app.store().path().exists());
    }

    #[test]
    fn test_zoom_rebuilds_scene() {
        let dir = TempDir::new("zoom");
        let mut app = app(&dir);
        // No scene yet: zoom changes the level but nothing to redraw.
        assert_eq!(app.handle(Message::ZoomIn), Response::None);
        app.set_zoom_level(1.0);

        app.search("#000000").unwrap();
        let size_before = app.scene().unwrap().size();
        assert_eq!(app.handle_key(KeyCode::Plus), Response::Redraw);
        let size_after = app.scene().unwrap().size();
        assert!((size_after - size_before * 1.1).abs() < 1e-9);

        app.handle_key(KeyCode::Minus);
        assert!((app.zoom_level() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_escape_toggles_fullscreen() {
        let dir = TempDir::new("fullscreen");
        let mut app = app(&dir);
        assert!(app.is_fullscreen());
        app.handle_key(KeyCode::Escape);
        assert!(!app.is_fullscreen());
        app.handle_key(KeyCode::Escape);
        assert!(app.is_fullscreen());
    }

    #[test]
    fn test_malformed_store_reports_warning() {
        let dir = TempDir::new("malformed");
        std::fs::write(dir.store_path(), "[1, 2").unwrap();
        let app = app(&dir);
        assert!(app.store().is_empty());
        assert!(app.store_warning().is_some());
    }

    #[test]
    fn test_export_requires_scene() {
        let dir = TempDir::new("export");
        let app = app(&dir);
        let err = app.export_png(Path::new("unused.png")).unwrap_err();
        assert!(matches!(err, AppError::NothingDisplayed));
    }
}
