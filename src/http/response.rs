//! HTTP response building module
//!
//! One builder per response shape. The content types on the two asset
//! responses are fixed by what the assets are, not sniffed from bytes.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build the control page response (200, text/html)
pub fn build_page_response(page: Bytes, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = page.len();
    let body = if is_head { Bytes::new() } else { page };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("page", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the button image response (200, image/png)
pub fn build_image_response(image: Bytes, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = image.len();
    let body = if is_head { Bytes::new() } else { image };

    Response::builder()
        .status(200)
        .header("Content-Type", "image/png")
        .header("Content-Length", content_length)
        .header("Cache-Control", "public, max-age=86400")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("image", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the empty 200 acknowledging a button press
pub fn build_empty_ok_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
///
/// Status line and headers only; unknown paths get no body.
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
