//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, the
//! four-way path match, and access logging.

use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::logger::AccessLogEntry;
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let is_head = method == Method::HEAD;

    let access_log = state.config.logging.access_log;
    if access_log {
        // The path goes to the log before dispatch, side effects included
        logger::log_request(&method, &uri, req.version());
    }

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        method.to_string(),
        uri.path().to_string(),
    );
    entry.query = uri.query().map(ToString::to_string);
    entry.http_version = http_version_label(req.version()).to_string();
    entry.referer = header_value(&req, "referer");
    entry.user_agent = header_value(&req, "user-agent");

    // Method gate first: only GET/HEAD reach the routes
    let response = match check_http_method(&method) {
        Some(resp) => resp,
        None => respond(uri.path(), is_head, &state).await,
    };

    if access_log {
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Extract a header as an owned string, if present and ASCII
fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// HTTP version as it appears in a log line
fn http_version_label(version: hyper::Version) -> &'static str {
    if version == hyper::Version::HTTP_10 {
        "1.0"
    } else if version == hyper::Version::HTTP_2 {
        "2"
    } else {
        "1.1"
    }
}

/// Check HTTP method and return an early response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// The four-way path match
///
/// Exact paths only; anything else is a bodyless 404.
async fn respond(path: &str, is_head: bool, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    match path {
        "/" => http::build_page_response(state.assets.page.clone(), is_head),
        "/button.png" => http::build_image_response(state.assets.button.clone(), is_head),
        "/press-button" => {
            // Inline actuation: the response waits for the full pulse
            state.relay.pulse().await;
            logger::log_pulse(state.relay.pulse_width());
            http::build_empty_ok_response()
        }
        _ => http::build_404_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::StaticAssets;
    use crate::config::{AppState, Config};
    use crate::relay::pin::testing::{Level, RecordingPin};
    use crate::relay::{Polarity, Relay};
    use http_body_util::BodyExt;
    use std::time::Duration;

    const PAGE: &[u8] = b"<html><body><img src=\"/button.png\"></body></html>";
    const BUTTON: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    fn test_state(pin: RecordingPin) -> Arc<AppState> {
        let config = Config::load_from("no-such-config-file").unwrap();
        let assets = StaticAssets {
            page: Bytes::from_static(PAGE),
            button: Bytes::from_static(BUTTON),
        };
        let relay = Relay::new(
            Box::new(pin),
            Polarity::ActiveLow,
            Duration::from_millis(5),
        );
        Arc::new(AppState::new(config, assets, relay))
    }

    async fn body_bytes(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_root_serves_page_bytes() {
        let state = test_state(RecordingPin::new());
        let resp = respond("/", false, &state).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "text/html");
        assert_eq!(body_bytes(resp).await.as_ref(), PAGE);
    }

    #[tokio::test]
    async fn test_button_png_serves_image_bytes() {
        let state = test_state(RecordingPin::new());
        let resp = respond("/button.png", false, &state).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "image/png");
        assert_eq!(body_bytes(resp).await.as_ref(), BUTTON);
    }

    #[tokio::test]
    async fn test_press_button_pulses_once_and_returns_empty_ok() {
        let pin = RecordingPin::new();
        let state = test_state(pin.clone());

        let resp = respond("/press-button", false, &state).await;

        assert_eq!(resp.status(), 200);
        assert!(body_bytes(resp).await.is_empty());
        // Exactly one engage/release cycle, active-low
        assert_eq!(pin.levels(), vec![Level::Low, Level::High]);
    }

    #[tokio::test]
    async fn test_unknown_paths_get_bodyless_404() {
        let pin = RecordingPin::new();
        let state = test_state(pin.clone());

        for path in ["/nonexistent", "/press-button/", "/button", "/root.html"] {
            let resp = respond(path, false, &state).await;
            assert_eq!(resp.status(), 404, "path {path}");
            assert!(body_bytes(resp).await.is_empty(), "path {path}");
        }
        // None of those touched the relay
        assert!(pin.levels().is_empty());
    }

    #[tokio::test]
    async fn test_head_elides_body() {
        let state = test_state(RecordingPin::new());
        let resp = respond("/", true, &state).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers()["Content-Length"],
            PAGE.len().to_string().as_str()
        );
        assert!(body_bytes(resp).await.is_empty());
    }

    #[test]
    fn test_method_gate() {
        assert!(check_http_method(&Method::GET).is_none());
        assert!(check_http_method(&Method::HEAD).is_none());

        let options = check_http_method(&Method::OPTIONS).unwrap();
        assert_eq!(options.status(), 204);

        let post = check_http_method(&Method::POST).unwrap();
        assert_eq!(post.status(), 405);
    }

    #[tokio::test]
    async fn test_repeated_presses_each_pulse() {
        let pin = RecordingPin::new();
        let state = test_state(pin.clone());

        respond("/press-button", false, &state).await;
        respond("/press-button", false, &state).await;

        assert_eq!(
            pin.levels(),
            vec![Level::Low, Level::High, Level::Low, Level::High]
        );
    }
}
