//! HTTP response building module
//!
//! Turns content layer results into hyper responses. File-backed bodies stay
//! streams all the way to the connection.

use crate::content::{ByteStream, ResponseInfo};
use futures::TryStreamExt;
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Empty, Full, StreamBody};
use hyper::body::{Bytes, Frame};
use hyper::header::{CACHE_CONTROL, CONTENT_TYPE, LOCATION};
use hyper::{Response, StatusCode};
use std::io;

/// Body type of every response the preview server sends
pub type PreviewBody = UnsyncBoxBody<Bytes, io::Error>;

/// Build a response from content layer output
///
/// `NotFound` becomes a plain 404; callers wanting the HTML page should
/// build it first. HEAD requests drop the stream unread.
pub fn build_content_response(
    info: ResponseInfo,
    status: StatusCode,
    is_head: bool,
) -> Response<PreviewBody> {
    let ResponseInfo::Found {
        content_type,
        stream,
    } = info
    else {
        return build_404_response();
    };

    let body = if is_head {
        empty_body()
    } else {
        stream_body(stream)
    };

    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .header(CACHE_CONTROL, "no-cache")
        .body(body)
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(empty_body())
        })
}

/// Build plain 404 Not Found response
pub fn build_404_response() -> Response<PreviewBody> {
    plain_response(StatusCode::NOT_FOUND, "404 Not Found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<PreviewBody> {
    let mut response = plain_response(StatusCode::METHOD_NOT_ALLOWED, "405 Method Not Allowed");
    response
        .headers_mut()
        .insert(hyper::header::ALLOW, hyper::header::HeaderValue::from_static("GET, HEAD"));
    response
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<PreviewBody> {
    plain_response(StatusCode::INTERNAL_SERVER_ERROR, "500 Internal Server Error")
}

/// Build 302 redirect response
pub fn build_redirect_response(target: &str) -> Response<PreviewBody> {
    Response::builder()
        .status(StatusCode::FOUND)
        .header(LOCATION, target)
        .header(CONTENT_TYPE, "text/plain; charset=UTF-8")
        .body(full_body("Redirecting..."))
        .unwrap_or_else(|e| {
            log_build_error("302", &e);
            Response::new(full_body("Redirecting..."))
        })
}

fn plain_response(status: StatusCode, text: &'static str) -> Response<PreviewBody> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain; charset=UTF-8")
        .body(full_body(text))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(full_body(text))
        })
}

fn stream_body(stream: ByteStream) -> PreviewBody {
    StreamBody::new(stream.map_ok(Frame::data)).boxed_unsync()
}

fn full_body(text: &'static str) -> PreviewBody {
    Full::new(Bytes::from_static(text.as_bytes()))
        .map_err(|never| match never {})
        .boxed_unsync()
}

fn empty_body() -> PreviewBody {
    Empty::new().map_err(|never| match never {}).boxed_unsync()
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
