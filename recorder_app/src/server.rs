//! HTTP recording server
//!
//! One POST endpoint accepts render requests: the multipart form is decoded
//! into a `RenderParams`, the attached scene is imported and its poses are
//! recorded, and a placeholder PNG goes back to the caller. Every failure,
//! whatever its kind, is answered with the same generic 500 JSON payload.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use rouille::input::post::BufferedFile;
use rouille::{post_input, router, Request, Response, Server};
use serde::Serialize;
use thiserror::Error;

use stage_engine::recording::{placeholder_png, RecordError, RecordingSession, RenderParams};

const BANNER: &str = "<!doctype html>\n\
    <html><body><h1>Pose Recording Server</h1></body></html>\n";

/// How long the poll loop sleeps when no request is pending
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Per-request failures, all collapsed into one 500 response
#[derive(Error, Debug)]
enum RequestError {
    /// Multipart form decode failure (missing field, bad value, no upload)
    #[error("form decode error: {0}")]
    Decode(String),

    /// `image_type` outside the declared set
    #[error(transparent)]
    Params(#[from] stage_engine::recording::ParamError),

    /// Could not save the uploaded scene to the scratch directory
    #[error("failed to save uploaded scene: {0}")]
    SaveScene(#[from] std::io::Error),

    /// Import or persistence failure
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Placeholder image encoding failure
    #[error("placeholder encoding error: {0}")]
    Placeholder(String),
}

/// Generic failure payload
#[derive(Serialize)]
struct ErrorBody {
    error: bool,
    message: String,
    code: u16,
}

/// Server bind address
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Mutable server state
///
/// The recording session builds up stage and store state per request and is
/// not safe for concurrent use, so the server never processes two requests
/// at once; the mutex only satisfies the handler's `Sync` bound.
struct ServerState {
    session: RecordingSession,
    scratch_dir: PathBuf,
}

/// Run the server until the process is terminated
///
/// Requests are polled on the calling thread, one at a time, matching the
/// single-threaded constraint of the recording session.
pub fn serve(
    config: &ServerConfig,
    session: RecordingSession,
    scratch_dir: PathBuf,
) -> anyhow::Result<()> {
    let state = Mutex::new(ServerState {
        session,
        scratch_dir,
    });

    let addr = format!("{}:{}", config.host, config.port);
    let server = Server::new(addr.clone(), move |request| {
        handle_request(&state, request)
    })
    .map_err(|e| anyhow::anyhow!("failed to start server on {addr}: {e}"))?;

    log::info!("recording server listening on http://{}", server.server_addr());
    loop {
        server.poll();
        std::thread::sleep(POLL_INTERVAL);
    }
}

/// Route one request
fn handle_request(state: &Mutex<ServerState>, request: &Request) -> Response {
    router!(request,
        (GET) (/) => {
            Response::html(BANNER)
        },
        (POST) (/render) => {
            render_endpoint(state, request)
        },
        _ => Response::empty_404()
    )
}

/// The render endpoint: record a keyframe, answer with a placeholder image
fn render_endpoint(state: &Mutex<ServerState>, request: &Request) -> Response {
    let mut state = match state.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };

    match process_render(&mut state, request) {
        Ok(png) => Response::from_data("image/png", png),
        Err(error) => {
            log::error!("render request failed: {error}");
            let code = 500;
            Response::json(&ErrorBody {
                error: true,
                message: format!("Internal server error: {error}"),
                code,
            })
            .with_status_code(code)
        }
    }
}

/// receive -> decode -> import + extract -> append + persist -> respond
fn process_render(state: &mut ServerState, request: &Request) -> Result<Vec<u8>, RequestError> {
    let params = parse_params(request, &state.scratch_dir)?;

    let recorded = state.session.record_frame(&params);

    // The upload is request-scoped; drop it whether or not the import
    // succeeded so the scratch directory only ever holds the in-flight file.
    if let Err(error) = std::fs::remove_file(&params.scene) {
        log::debug!("could not remove scene upload {}: {error}", params.scene.display());
    }

    let frame_count = recorded?;
    log::info!("Saved keyframe {frame_count}");

    placeholder_png(params.width, params.height)
        .map_err(|e| RequestError::Placeholder(e.to_string()))
}

/// Decode the multipart form into a `RenderParams`
///
/// Field names and types are declared once, here; a missing or uncoercible
/// field fails the decode. The uploaded scene is always saved to a fresh
/// timestamp-named file in the scratch directory before the record is
/// returned.
fn parse_params(request: &Request, scratch_dir: &Path) -> Result<RenderParams, RequestError> {
    let input = post_input!(request, {
        scene_sha256: String,
        image_type: String,
        width: u32,
        height: u32,
        near: f64,
        far: f64,
        focal_x: f64,
        focal_y: f64,
        fov_x: f64,
        fov_y: f64,
        center_x: f64,
        center_y: f64,
        min_depth: Option<f64>,
        max_depth: Option<f64>,
        scene: BufferedFile,
    })
    .map_err(|e| RequestError::Decode(e.to_string()))?;

    let image_type = input.image_type.parse()?;

    let timestamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S-%f");
    let scene_path = scratch_dir.join(format!("{timestamp}.gltf"));
    std::fs::write(&scene_path, &input.scene.data)?;

    Ok(RenderParams {
        scene: scene_path,
        scene_sha256: input.scene_sha256,
        image_type,
        width: input.width,
        height: input.height,
        near: input.near,
        far: input.far,
        focal_x: input.focal_x,
        focal_y: input.focal_y,
        fov_x: input.fov_x,
        fov_y: input.fov_y,
        center_x: input.center_x,
        center_y: input.center_y,
        min_depth: input.min_depth,
        max_depth: input.max_depth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    use stage_engine::recording::{KeyframeStore, SessionConfig};

    const BOUNDARY: &str = "----recorder-test-boundary";

    const SCENE: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [ { "nodes": [0] } ],
        "nodes": [ { "name": "box", "translation": [1.0, 2.0, 3.0] } ]
    }"#;

    struct TestServer {
        state: Mutex<ServerState>,
        _dir: tempfile::TempDir,
    }

    fn test_server() -> TestServer {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = KeyframeStore::create(dir.path().join("poses.ron")).expect("create store");
        let config = SessionConfig {
            base_stage: None,
            settings_file: None,
            export_path: Some(dir.path().join("base.stage")),
        };
        let state = Mutex::new(ServerState {
            session: RecordingSession::new(config, store),
            scratch_dir: dir.path().to_path_buf(),
        });
        TestServer { state, _dir: dir }
    }

    fn form_fields(image_type: &str, width: u32, height: u32) -> Vec<(String, String)> {
        let mut fields = vec![
            ("scene_sha256".to_owned(), "deadbeef".to_owned()),
            ("image_type".to_owned(), image_type.to_owned()),
            ("width".to_owned(), width.to_string()),
            ("height".to_owned(), height.to_string()),
            ("near".to_owned(), "0.01".to_owned()),
            ("far".to_owned(), "10.0".to_owned()),
            ("focal_x".to_owned(), "579.4".to_owned()),
            ("focal_y".to_owned(), "579.4".to_owned()),
            ("fov_x".to_owned(), "0.78".to_owned()),
            ("fov_y".to_owned(), "0.78".to_owned()),
            ("center_x".to_owned(), "32.0".to_owned()),
            ("center_y".to_owned(), "24.0".to_owned()),
        ];
        if image_type == "depth" {
            fields.push(("min_depth".to_owned(), "0.1".to_owned()));
            fields.push(("max_depth".to_owned(), "5.0".to_owned()));
        }
        fields
    }

    fn multipart_body(fields: &[(String, String)], scene: Option<&str>) -> Vec<u8> {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        if let Some(scene) = scene {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"scene\"; \
                 filename=\"scene.gltf\"\r\nContent-Type: model/gltf+json\r\n\r\n{scene}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body.into_bytes()
    }

    fn render_request(body: Vec<u8>) -> Request {
        Request::fake_http(
            "POST",
            "/render",
            vec![(
                "Content-Type".to_owned(),
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )],
            body,
        )
    }

    fn response_body(response: Response) -> Vec<u8> {
        let (mut reader, _size) = response.data.into_reader_and_size();
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).expect("read response body");
        bytes
    }

    #[test]
    fn test_render_returns_placeholder_of_requested_size() {
        let server = test_server();
        let request = render_request(multipart_body(&form_fields("depth", 64, 48), Some(SCENE)));

        let response = handle_request(&server.state, &request);

        assert_eq!(response.status_code, 200);
        let decoded = image::load_from_memory(&response_body(response)).expect("decode png");
        assert_eq!(image::GenericImageView::dimensions(&decoded), (64, 48));
        assert_eq!(server.state.lock().unwrap().session.store().len(), 1);
    }

    #[test]
    fn test_invalid_image_type_is_a_generic_error() {
        let server = test_server();
        let request = render_request(multipart_body(&form_fields("xray", 64, 48), Some(SCENE)));

        let response = handle_request(&server.state, &request);

        assert_eq!(response.status_code, 500);
        let body = String::from_utf8(response_body(response)).expect("utf-8 body");
        assert!(body.contains("\"error\":true"));
        assert!(body.contains("Internal server error"));
        assert_eq!(server.state.lock().unwrap().session.store().len(), 0);
    }

    #[test]
    fn test_missing_scene_upload_is_a_generic_error() {
        let server = test_server();
        let request = render_request(multipart_body(&form_fields("color", 64, 48), None));

        let response = handle_request(&server.state, &request);

        assert_eq!(response.status_code, 500);
        assert_eq!(server.state.lock().unwrap().session.store().len(), 0);
    }

    #[test]
    fn test_failed_request_leaves_frame_list_unchanged() {
        let server = test_server();

        let ok = render_request(multipart_body(&form_fields("color", 32, 32), Some(SCENE)));
        assert_eq!(handle_request(&server.state, &ok).status_code, 200);

        let bad = render_request(multipart_body(&form_fields("color", 32, 32), Some("junk")));
        assert_eq!(handle_request(&server.state, &bad).status_code, 500);

        assert_eq!(server.state.lock().unwrap().session.store().len(), 1);
    }

    #[test]
    fn test_scene_upload_is_removed_after_request() {
        let server = test_server();
        let request = render_request(multipart_body(&form_fields("color", 8, 8), Some(SCENE)));

        handle_request(&server.state, &request);

        let state = server.state.lock().unwrap();
        let leftover: Vec<_> = std::fs::read_dir(&state.scratch_dir)
            .expect("read scratch dir")
            .filter_map(Result::ok)
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "gltf"))
            .collect();
        assert!(leftover.is_empty());
    }

    #[test]
    fn test_root_serves_banner() {
        let server = test_server();
        let request = Request::fake_http("GET", "/", vec![], Vec::new());

        let response = handle_request(&server.state, &request);

        assert_eq!(response.status_code, 200);
        let body = String::from_utf8(response_body(response)).expect("utf-8 body");
        assert!(body.contains("Pose Recording Server"));
    }

    #[test]
    fn test_unknown_route_is_404() {
        let server = test_server();
        let request = Request::fake_http("GET", "/render", vec![], Vec::new());

        let response = handle_request(&server.state, &request);

        assert_eq!(response.status_code, 404);
    }
}
