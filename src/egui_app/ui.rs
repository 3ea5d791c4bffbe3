//! egui renderer for the application UI.
//!
//! [`EguiApp`] owns a [`Session`] (everything a reload throws away) and the
//! error boundary the session is rendered through.

mod analyze_page;
mod chrome;
mod fallback;
mod file_input;
mod home_page;
mod results_panel;
pub mod style;
mod textures;
mod update;

use std::sync::Arc;

use eframe::egui;

use crate::config::{self, AppSettings, Theme};
use crate::error_boundary::ErrorBoundary;
use crate::prediction::{HttpPredictor, Predictor};
use crate::router::{Route, Router};
use crate::workflow::UploadWorkflow;

use textures::PreviewTextures;

/// Window and page title.
pub const APP_TITLE: &str = "AI Calorie Predictor";
/// Smallest window the layout is designed for.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(480.0, 560.0);

/// Renders the egui UI for one session at a time.
pub struct EguiApp {
    session: Session,
    boundary: ErrorBoundary,
    applied_theme: Option<Theme>,
}

impl EguiApp {
    /// Start a session talking to the configured prediction service.
    pub fn new(settings: AppSettings) -> Self {
        let predictor = Arc::new(HttpPredictor::new(&settings.prediction));
        Self::with_predictor(settings, predictor)
    }

    /// Start a session with an explicit predictor.
    pub fn with_predictor(settings: AppSettings, predictor: Arc<dyn Predictor>) -> Self {
        Self {
            session: Session::new(settings, predictor),
            boundary: ErrorBoundary::new(),
            applied_theme: None,
        }
    }

    /// Throw away all session state and start again from the landing page,
    /// re-reading the configuration file.
    fn reload(&mut self) {
        let settings = match config::load_or_default() {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!("Config reload failed, keeping previous settings: {err}");
                self.session.settings.clone()
            }
        };
        tracing::info!("Reloading session");
        let predictor = Arc::new(HttpPredictor::new(&settings.prediction));
        self.session = Session::new(settings, predictor);
        self.boundary = ErrorBoundary::new();
        self.applied_theme = None;
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        let theme = self.session.settings.appearance.theme;
        if self.applied_theme == Some(theme) {
            return;
        }
        ctx.set_visuals(style::visuals(theme));
        self.applied_theme = Some(theme);
    }
}

/// Navigation, the current workflow and everything the pages draw from.
struct Session {
    settings: AppSettings,
    predictor: Arc<dyn Predictor>,
    router: Router,
    workflow: Option<UploadWorkflow>,
    textures: PreviewTextures,
    drop_hovered: bool,
    footer_year: i32,
}

impl Session {
    fn new(settings: AppSettings, predictor: Arc<dyn Predictor>) -> Self {
        tracing::info!(endpoint = %settings.prediction.endpoint, "Session started");
        Self {
            settings,
            predictor,
            router: Router::new(Route::Home),
            workflow: None,
            textures: PreviewTextures::default(),
            drop_hovered: false,
            footer_year: crate::logging::now_local_or_utc().year(),
        }
    }

    /// Change page. Entering Analyze always starts a fresh workflow; leaving
    /// it drops the workflow with its previews and any pending request.
    fn navigate_to(&mut self, route: Route) {
        let previous = self.router.navigate_to(route);
        if route == Route::Analyze && (previous != Route::Analyze || self.workflow.is_none()) {
            self.workflow = Some(UploadWorkflow::new(Arc::clone(&self.predictor)));
        } else if route != Route::Analyze {
            self.workflow = None;
        }
        if previous != route {
            self.textures.clear();
        }
        self.drop_hovered = false;
    }

    /// Apply a finished request, if any. Returns true while a request is
    /// still running.
    fn poll_workflow(&mut self) -> bool {
        let Some(workflow) = self.workflow.as_mut() else {
            return false;
        };
        workflow.poll();
        workflow.is_loading()
    }

    fn render(&mut self, ui: &mut egui::Ui) {
        let scroll_to_top = self.router.take_scroll_reset();
        let mut scroll = egui::ScrollArea::vertical()
            .id_salt("page_scroll")
            .auto_shrink([false, false]);
        if scroll_to_top {
            scroll = scroll.vertical_scroll_offset(0.0);
        }
        scroll.show(ui, |ui| {
            match self.router.current() {
                Route::Home => self.render_home_page(ui),
                Route::Analyze => self.render_analyze_page(ui),
            }
            self.render_footer(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_dirs::{APP_DIR_NAME, ConfigBaseGuard};
    use crate::error_boundary::BoundaryOutcome;
    use crate::prediction::{ImageFile, PredictionError, PredictionResult};
    use std::time::{Duration, Instant};

    struct UnusedPredictor;

    impl Predictor for UnusedPredictor {
        fn predict(&self, _file: &ImageFile) -> Result<PredictionResult, PredictionError> {
            Err(PredictionError::transport("not wired in tests"))
        }
    }

    struct EmptyPlatePredictor;

    impl Predictor for EmptyPlatePredictor {
        fn predict(&self, _file: &ImageFile) -> Result<PredictionResult, PredictionError> {
            Ok(PredictionResult {
                image_url: String::new(),
                ingredients: Vec::new(),
                totals: Default::default(),
            })
        }
    }

    fn session() -> Session {
        Session::new(AppSettings::default(), Arc::new(UnusedPredictor))
    }

    fn drop_frame(session: &mut Session, file: egui::DroppedFile) {
        let ctx = egui::Context::default();
        ctx.input_mut(|i| i.raw.dropped_files.push(file));
        session.handle_file_drops(&ctx);
    }

    fn pdf() -> egui::DroppedFile {
        egui::DroppedFile {
            name: "menu.pdf".into(),
            mime: "application/pdf".into(),
            ..Default::default()
        }
    }

    fn session_with_result() -> Session {
        let mut session = Session::new(AppSettings::default(), Arc::new(EmptyPlatePredictor));
        session.navigate_to(Route::Analyze);
        let workflow = session.workflow.as_mut().unwrap();
        workflow.select_file(ImageFile::new("plate.png", "image/png", vec![1]));
        workflow.submit().unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while session.poll_workflow() || session.workflow.as_ref().unwrap().result().is_none() {
            assert!(Instant::now() < deadline, "prediction never completed");
            std::thread::sleep(Duration::from_millis(5));
        }
        session
    }

    #[test]
    fn sessions_start_on_the_landing_page() {
        let session = session();
        assert_eq!(session.router.current(), Route::Home);
        assert!(session.workflow.is_none());
        assert!(session.footer_year >= 2024);
    }

    #[test]
    fn each_visit_to_analyze_gets_a_fresh_workflow() {
        let mut session = session();
        session.navigate_to(Route::Analyze);
        let workflow = session.workflow.as_mut().unwrap();
        workflow.select_file(ImageFile::new("a.png", "image/png", vec![1]));
        assert!(workflow.selection().is_some());

        session.navigate_to(Route::Home);
        assert!(session.workflow.is_none());

        session.navigate_to(Route::Analyze);
        assert!(session.workflow.as_ref().unwrap().selection().is_none());
    }

    #[test]
    fn navigating_to_the_current_page_keeps_its_workflow() {
        let mut session = session();
        session.navigate_to(Route::Analyze);
        session
            .workflow
            .as_mut()
            .unwrap()
            .select_file(ImageFile::new("a.png", "image/png", vec![1]));
        session.router.take_scroll_reset();

        session.navigate_to(Route::Analyze);
        assert!(session.workflow.as_ref().unwrap().selection().is_some());
        assert!(session.router.take_scroll_reset());
    }

    #[test]
    fn drops_on_the_upload_card_are_validated() {
        let mut session = session();
        session.navigate_to(Route::Analyze);
        drop_frame(&mut session, pdf());
        let workflow = session.workflow.as_ref().unwrap();
        assert_eq!(workflow.error(), Some("Only image files are allowed."));
    }

    #[test]
    fn drops_are_ignored_while_results_are_shown() {
        let mut session = session_with_result();
        session.drop_hovered = true;
        drop_frame(&mut session, pdf());

        let workflow = session.workflow.as_ref().unwrap();
        assert!(workflow.result().is_some());
        assert!(workflow.error().is_none());
        assert_eq!(workflow.selection().unwrap().file.name, "plate.png");
        assert!(!session.drop_hovered);
    }

    #[test]
    fn reload_rebuilds_the_session_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let _guard = ConfigBaseGuard::set(dir.path().to_path_buf());
        let config_dir = dir.path().join(APP_DIR_NAME);
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join(config::CONFIG_FILE_NAME),
            "[appearance]\ntheme = \"dark\"\n",
        )
        .unwrap();

        let mut app = EguiApp::with_predictor(AppSettings::default(), Arc::new(UnusedPredictor));
        app.session.navigate_to(Route::Analyze);
        app.applied_theme = Some(Theme::Light);
        let outcome = app.boundary.guard(|| panic!("layout exploded"));
        assert_eq!(outcome, BoundaryOutcome::<()>::Fallback);
        assert!(app.boundary.is_tripped());

        app.reload();
        assert!(!app.boundary.is_tripped());
        assert_eq!(app.session.router.current(), Route::Home);
        assert!(app.session.workflow.is_none());
        assert_eq!(app.session.settings.appearance.theme, Theme::Dark);
        assert_eq!(app.applied_theme, None);
    }
}
