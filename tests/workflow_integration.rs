mod support;

use support::{
    canned_server::{json_response, png_response, serve_bytes_once, serve_once},
    nutriscan_env::NutriscanEnvGuard,
};

use nutriscan::{
    config,
    egui_app::view_model::ResultsViewModel,
    prediction::{CONNECT_FAILED_MESSAGE, HttpPredictor, ImageFile, NO_FOOD_DETECTED_MESSAGE},
    workflow::{UploadWorkflow, WorkflowState},
};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tempfile::TempDir;

const RICE_RESPONSE: &str = r#"{
    "image_url": "IMAGE_URL",
    "calories_info": {
        "food_items": [{"name": "Rice", "calories": 200, "protein": 4, "carbs": 44, "fat": 0.4}],
        "total_calories": 200,
        "total_protein": 4,
        "total_carbs": 44,
        "total_fat": 0.4
    }
}"#;

fn rice_response(image_url: &str) -> String {
    RICE_RESPONSE.replace("IMAGE_URL", image_url)
}

/// A URL nothing listens on, so fetching the echoed image fails fast.
fn dead_image_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}/static/uploads/rice.jpg")
}

struct Harness {
    _env: NutriscanEnvGuard,
    temp: TempDir,
    workflow: UploadWorkflow,
}

impl Harness {
    /// Build a workflow from config the way the app does, pointed at `server`.
    fn new(server: &str) -> Self {
        let temp = tempfile::tempdir().expect("create tempdir");
        let env = NutriscanEnvGuard::set(temp.path().to_path_buf(), Some(&format!("{server}/predict")));
        let settings = config::load_or_default().expect("load config");
        let predictor = Arc::new(HttpPredictor::new(&settings.prediction));
        Self {
            _env: env,
            temp,
            workflow: UploadWorkflow::new(predictor),
        }
    }

    fn submit_and_wait(&mut self) {
        self.workflow.submit().expect("submit");
        assert!(self.workflow.is_loading());
        let deadline = Instant::now() + Duration::from_secs(10);
        while !self.workflow.poll() {
            assert!(Instant::now() < deadline, "prediction did not finish");
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(!self.workflow.is_loading());
    }
}

fn photo() -> ImageFile {
    ImageFile::new("rice.jpg", "image/jpeg", b"\xFF\xD8\xFF\xE0not-really-a-jpeg".to_vec())
}

#[test]
fn successful_prediction_renders_service_figures() {
    let body = rice_response(&dead_image_url());
    let (url, requests) = serve_once(json_response("200 OK", &body));
    let mut harness = Harness::new(&url);
    harness.workflow.drop_file(photo()).expect("image drop accepted");
    harness.submit_and_wait();

    let result = harness.workflow.result().expect("prediction result");
    assert!(harness.workflow.error().is_none());
    assert!(harness.workflow.echo().is_none());
    let view = ResultsViewModel::from_result(result);
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].name, "Rice");
    assert_eq!(view.rows[0].calories, "200");
    assert_eq!(view.totals.calories, "200");
    assert_eq!(view.totals.protein, "4.0g");
    assert_eq!(view.totals.carbs, "44.0g");
    assert_eq!(view.totals.fat, "0.4g");

    let request = requests
        .recv_timeout(Duration::from_secs(5))
        .expect("request captured");
    let request = String::from_utf8_lossy(&request);
    assert!(request.starts_with("POST /predict "));
    assert!(request.contains("name=\"image\"; filename=\"rice.jpg\""));
}

#[test]
fn echoed_image_is_fetched_from_the_returned_url() {
    let image = image::RgbaImage::from_pixel(12, 9, image::Rgba([90, 160, 60, 255]));
    let mut png = std::io::Cursor::new(Vec::new());
    image
        .write_to(&mut png, image::ImageFormat::Png)
        .expect("encode png");
    let (image_server, image_requests) = serve_bytes_once(png_response(png.get_ref()));
    let body = rice_response(&format!("{image_server}/static/uploads/rice.png"));
    let (url, _) = serve_once(json_response("200 OK", &body));
    let mut harness = Harness::new(&url);
    harness
        .workflow
        .select_file(ImageFile::new("scan.bin", "", b"undecodable".to_vec()));
    let local = harness.workflow.selection().expect("selection").preview;
    assert!(harness.workflow.previews().image(local).is_none());
    harness.submit_and_wait();

    assert!(harness.workflow.result().is_some());
    let echo = harness.workflow.echo().expect("echoed image");
    let pixels = harness.workflow.previews().image(echo).expect("echo pixels");
    assert_eq!((pixels.width, pixels.height), (12, 9));
    let request = image_requests
        .recv_timeout(Duration::from_secs(5))
        .expect("image request captured");
    assert!(String::from_utf8_lossy(&request).starts_with("GET /static/uploads/rice.png "));
}

#[test]
fn server_error_message_is_shown_verbatim() {
    let (url, _) = serve_once(json_response(
        "415 Unsupported Media Type",
        r#"{"error":"Unsupported file type"}"#,
    ));
    let mut harness = Harness::new(&url);
    harness.workflow.select_file(photo());
    harness.submit_and_wait();
    assert_eq!(harness.workflow.error(), Some("Unsupported file type"));
    assert!(harness.workflow.result().is_none());
}

#[test]
fn empty_food_items_fail_with_default_message() {
    let (url, _) = serve_once(json_response(
        "200 OK",
        r#"{"image_url":"","calories_info":{"food_items":[]}}"#,
    ));
    let mut harness = Harness::new(&url);
    harness.workflow.select_file(photo());
    harness.submit_and_wait();
    assert_eq!(
        harness.workflow.state(),
        &WorkflowState::Failed(NO_FOOD_DETECTED_MESSAGE.to_string())
    );
}

#[test]
fn unreachable_service_reports_connect_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let mut harness = Harness::new(&format!("http://{addr}"));
    harness.workflow.select_file(photo());
    harness.submit_and_wait();
    assert_eq!(harness.workflow.error(), Some(CONNECT_FAILED_MESSAGE));
}

#[test]
fn analyze_new_image_returns_to_upload_prompt() {
    let body = rice_response(&dead_image_url());
    let (url, _) = serve_once(json_response("200 OK", &body));
    let mut harness = Harness::new(&url);
    harness.workflow.select_file(photo());
    let preview = harness.workflow.selection().expect("selection").preview;
    harness.submit_and_wait();
    assert!(harness.workflow.result().is_some());

    harness.workflow.reset();
    assert_eq!(harness.workflow.state(), &WorkflowState::Idle);
    assert!(harness.workflow.selection().is_none());
    assert!(!harness.workflow.previews().is_live(preview));
    assert!(!harness.workflow.can_submit());
}

#[test]
fn first_launch_writes_defaults_without_the_env_endpoint() {
    let harness = Harness::new("http://127.0.0.1:5999");
    let path = harness.temp.path().join(".nutriscan").join("config.toml");
    let on_disk = config::load_settings_from(&path).expect("read written config");
    assert_eq!(on_disk.prediction.endpoint, config::DEFAULT_ENDPOINT);
}
