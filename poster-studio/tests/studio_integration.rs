//! End-to-end tests for studio runs (poster-studio).
//!
//! Runs use a stub generator or a mocked Gemini API and write into temporary
//! directories.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use poster_core::{
    DesignConcept, ExportFormat, GeneratedText, GenerationError, GenerationResult, LayoutStyle,
    PosterGenerator,
};
use poster_studio::config::parse_sizes;
use poster_studio::{bytes_to_data_uri, run, GeminiClient, GeminiConfig, StudioConfig, StudioError};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn png_bytes(rgb: [u8; 3]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(16, 16, image::Rgba([rgb[0], rgb[1], rgb[2], 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).expect("encode");
    out.into_inner()
}

struct StubGenerator {
    calls: AtomicUsize,
    fail: bool,
}

impl StubGenerator {
    fn ok() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }
}

#[async_trait]
impl PosterGenerator for StubGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        background_image: Option<&str>,
    ) -> Result<GenerationResult, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(GenerationError::new(
                "AI failed to generate a valid design. Please try again.",
            ));
        }
        let image = match background_image {
            Some(image) => image.to_string(),
            None => bytes_to_data_uri(&png_bytes([30, 60, 90])).expect("uri"),
        };
        Ok(GenerationResult {
            text: GeneratedText {
                heading: "Open Studio Night".to_string(),
                description: "Meet the artists and see work in progress".to_string(),
                cta: "RSVP".to_string(),
            },
            design: DesignConcept {
                background_color: "#0f172a".to_string(),
                text_color: "#f8fafc".to_string(),
                heading_font: "Oswald".to_string(),
                body_font: "Lato".to_string(),
                layout_style: LayoutStyle::Centered,
                image_prompt: "paint-splattered studio".to_string(),
            },
            image,
        })
    }
}

fn config(dir: &std::path::Path) -> StudioConfig {
    let mut config = StudioConfig::new("open studio night", dir.join("out"));
    config.system_fonts = false;
    config
}

fn node_left(layout: &Value, element: &str) -> f64 {
    layout["nodes"]
        .as_array()
        .and_then(|nodes| nodes.iter().find(|n| n["element"] == element))
        .and_then(|n| n["leftPercent"].as_f64())
        .expect("node")
}

#[tokio::test]
async fn test_default_run_exports_one_png_per_selected_size() {
    let dir = tempfile::tempdir().expect("tempdir");
    let generator = StubGenerator::ok();

    let report = run(&config(dir.path()), &generator).await.expect("run");

    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    let names: Vec<_> = report
        .exports
        .iter()
        .filter_map(|p| p.file_name()?.to_str().map(str::to_string))
        .collect();
    assert_eq!(names, vec!["instagram-Post.png", "facebook-Post.png"]);
    for path in &report.exports {
        let bytes = std::fs::read(path).expect("read export");
        assert_eq!(&bytes[0..4], &[137, 80, 78, 71]);
    }
}

#[tokio::test]
async fn test_every_format_is_written() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = config(dir.path());
    config.platforms = parse_sizes(&["linkedin:Post".to_string()]).expect("sizes");
    config.formats = vec![ExportFormat::Png, ExportFormat::Jpeg, ExportFormat::Pdf];

    let report = run(&config, &StubGenerator::ok()).await.expect("run");

    assert_eq!(report.exports.len(), 3);
    let pdf = std::fs::read(dir.path().join("out/linkedin-Post.pdf")).expect("pdf");
    assert_eq!(&pdf[0..5], b"%PDF-");
    let jpeg = std::fs::read(dir.path().join("out/linkedin-Post.jpeg")).expect("jpeg");
    assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
}

#[tokio::test]
async fn test_synced_edit_script_moves_every_poster() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = dir.path().join("edits.json");
    std::fs::write(
        &script,
        json!([
            { "op": "updateElement", "variantId": "instagram-Post", "element": "cta",
              "patch": { "x": 30.0, "y": 70.0 } },
            { "op": "updateText", "patch": { "cta": "Save a seat" } }
        ])
        .to_string(),
    )
    .expect("write script");

    let mut config = config(dir.path());
    config.edits = Some(script);
    config.dump_layout = true;

    let report = run(&config, &StubGenerator::ok()).await.expect("run");

    assert_eq!(report.layouts.len(), 2);
    for layout_path in &report.layouts {
        let layout: Value =
            serde_json::from_slice(&std::fs::read(layout_path).expect("read")).expect("json");
        assert!((node_left(&layout, "cta") - 30.0).abs() < 1e-3);
        let cta = layout["nodes"]
            .as_array()
            .and_then(|nodes| nodes.iter().find(|n| n["element"] == "cta"))
            .expect("cta node");
        assert_eq!(cta["content"]["text"], "Save a seat");
    }
}

#[tokio::test]
async fn test_unsynced_edit_script_moves_only_its_poster() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = dir.path().join("edits.json");
    std::fs::write(
        &script,
        r#"[{"op":"updateElement","variantId":"facebook-Post","element":"heading","patch":{"x":20}}]"#,
    )
    .expect("write script");

    let mut config = config(dir.path());
    config.edits = Some(script);
    config.dump_layout = true;
    config.sync_edits = false;

    run(&config, &StubGenerator::ok()).await.expect("run");

    let read = |name: &str| -> Value {
        serde_json::from_slice(&std::fs::read(dir.path().join("out").join(name)).expect("read"))
            .expect("json")
    };
    assert!((node_left(&read("facebook-Post.layout.json"), "heading") - 20.0).abs() < 1e-3);
    assert!((node_left(&read("instagram-Post.layout.json"), "heading") - 50.0).abs() < 1e-3);
}

#[tokio::test]
async fn test_align_and_layer_script_under_sync() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = dir.path().join("edits.json");
    std::fs::write(
        &script,
        json!([
            { "op": "align", "variantId": "instagram-Post", "element": "heading",
              "alignment": "right" },
            { "op": "bringForward", "variantId": "instagram-Post", "element": "heading" }
        ])
        .to_string(),
    )
    .expect("write script");

    let mut config = config(dir.path());
    config.edits = Some(script);
    config.dump_layout = true;

    let report = run(&config, &StubGenerator::ok()).await.expect("run");

    for layout_path in &report.layouts {
        let layout: Value =
            serde_json::from_slice(&std::fs::read(layout_path).expect("read")).expect("json");
        let nodes = layout["nodes"].as_array().expect("nodes");
        let heading = nodes
            .iter()
            .find(|n| n["element"] == "heading")
            .expect("heading node");
        assert!((node_left(&layout, "heading") - 95.0).abs() < 1e-3);
        assert_eq!(heading["textAlign"], "right");
        assert_eq!(heading["anchorXPercent"], -100.0);
        // Raised above the other elements, so painted last.
        assert_eq!(nodes.last().map(|n| &n["element"]), Some(&json!("heading")));
    }
}

#[tokio::test]
async fn test_background_and_logo_uploads_are_used() {
    let dir = tempfile::tempdir().expect("tempdir");
    let background = dir.path().join("bg.png");
    let logo = dir.path().join("logo.png");
    std::fs::write(&background, png_bytes([250, 0, 0])).expect("write bg");
    std::fs::write(&logo, png_bytes([0, 250, 0])).expect("write logo");

    let mut config = config(dir.path());
    config.background = Some(background.clone());
    config.logo = Some(logo);
    config.dump_layout = true;

    run(&config, &StubGenerator::ok()).await.expect("run");

    let layout: Value = serde_json::from_slice(
        &std::fs::read(dir.path().join("out/instagram-Post.layout.json")).expect("read"),
    )
    .expect("json");
    let expected = bytes_to_data_uri(&std::fs::read(&background).expect("bg")).expect("uri");
    assert_eq!(layout["backgroundImage"], expected.as_str());
    assert!(layout["nodes"]
        .as_array()
        .expect("nodes")
        .iter()
        .any(|n| n["element"] == "logo"));
}

#[tokio::test]
async fn test_generation_failure_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config(dir.path());

    let err = run(&config, &StubGenerator::failing())
        .await
        .expect_err("failure");

    assert_eq!(
        err.to_string(),
        "AI failed to generate a valid design. Please try again."
    );
    assert!(!config.out_dir.exists());
}

#[tokio::test]
async fn test_invalid_script_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = dir.path().join("edits.json");
    std::fs::write(&script, r#"[{"op":"explode"}]"#).expect("write script");
    let mut config = config(dir.path());
    config.edits = Some(script);

    let err = run(&config, &StubGenerator::ok()).await.expect_err("script");
    assert!(matches!(err, StudioError::Script { .. }));
}

#[tokio::test]
async fn test_unknown_sizes_only_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = config(dir.path());
    config.platforms = parse_sizes(&["myspace:Banner".to_string()]).expect("sizes");

    let err = run(&config, &StubGenerator::ok()).await.expect_err("nothing");
    assert!(matches!(err, StudioError::NothingToExport));
}

#[tokio::test]
#[cfg_attr(
    target_os = "macos",
    ignore = "wiremock/reqwest system-configuration issue on macOS"
)]
async fn test_run_against_mocked_gemini() {
    let server = MockServer::start().await;
    let copy = json!({ "candidates": [{ "content": { "parts": [{
        "text": r#"{"heading":"Night Market","description":"Street food and live music","cta":"Join us"}"#
    }] } }] });
    let design = json!({ "candidates": [{ "content": { "parts": [{
        "text": r##"{"backgroundColor":"#111827","textColor":"#fbbf24","headingFont":"Anton",
                    "bodyFont":"Roboto","layoutStyle":"left-aligned-image-right",
                    "imagePrompt":"lanterns over food stalls"}"##
    }] } }] });

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-pro:generateContent"))
        .and(wiremock::matchers::body_string_contains("social media copy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(copy))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-pro:generateContent"))
        .and(wiremock::matchers::body_string_contains("design concept"))
        .respond_with(ResponseTemplate::new(200).set_body_json(design))
        .mount(&server)
        .await;

    let image = bytes_to_data_uri(&png_bytes([10, 10, 10])).expect("uri");
    let encoded = image.trim_start_matches("data:image/png;base64,").to_string();
    Mock::given(method("POST"))
        .and(path("/v1beta/models/imagen-4.0-generate-001:predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{ "bytesBase64Encoded": encoded, "mimeType": "image/png" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(GeminiConfig::new("test-key").with_endpoint(server.uri()))
        .expect("client");
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = config(dir.path());
    config.dump_layout = true;

    let report = run(&config, &client).await.expect("run");
    assert_eq!(report.exports.len(), 2);

    let layout: Value = serde_json::from_slice(
        &std::fs::read(dir.path().join("out/facebook-Post.layout.json")).expect("read"),
    )
    .expect("json");
    // Left-aligned layout puts the heading at 5%.
    assert!((node_left(&layout, "heading") - 5.0).abs() < 1e-3);
    assert_eq!(layout["backgroundImage"], image.as_str());
}
