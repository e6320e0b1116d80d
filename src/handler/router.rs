//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, special
//! endpoints, workspace lookup, then files, index pages and listings.

use crate::config::AppState;
use crate::content::{ContentError, ResponseInfo};
use crate::handler::mounts::MountTarget;
use crate::http::{self, PreviewBody};
use crate::logger;
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request, Response, StatusCode};
use percent_encoding::percent_decode_str;
use std::convert::Infallible;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;

/// File served in place of a directory listing when present
const INDEX_FILE: &str = "index.html";

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Path as sent, still percent-encoded
    pub raw_path: &'a str,
    /// Percent-decoded path
    pub path: String,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<PreviewBody>, Infallible> {
    let method = req.method();
    let raw_path = req.uri().path();

    let response = if matches!(*method, Method::GET | Method::HEAD) {
        let ctx = RequestContext {
            raw_path,
            path: percent_decode_str(raw_path).decode_utf8_lossy().into_owned(),
            is_head: *method == Method::HEAD,
        };
        route_request(&ctx, &state).await
    } else {
        logger::log_warning(&format!("Method not allowed: {method}"));
        http::build_405_response()
    };

    if state.config.logging.access_log {
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        logger::log_access(method, raw_path, response.status().as_u16(), content_type);
    }

    Ok(response)
}

/// Route request based on path and mounted workspaces
async fn route_request(ctx: &RequestContext<'_>, state: &AppState) -> Response<PreviewBody> {
    let content = &state.content;

    // 1. The live-reload client itself
    if ctx.path == state.config.preview.injected_script_path {
        return http::build_content_response(
            content.injected_asset_response(),
            StatusCode::OK,
            ctx.is_head,
        );
    }

    // 2. Workspace lookup
    match state.mounts.locate(&ctx.path) {
        MountTarget::NoRoot => {
            http::build_content_response(content.no_root_page(), StatusCode::OK, ctx.is_head)
        }
        MountTarget::Unmounted => not_found(ctx, state),
        MountTarget::Workspace { root, relative } => {
            serve_workspace_path(ctx, state, root, &relative).await
        }
    }
}

async fn serve_workspace_path(
    ctx: &RequestContext<'_>,
    state: &AppState,
    root: &Path,
    relative: &str,
) -> Response<PreviewBody> {
    if relative.split('/').any(|segment| segment == "..") {
        logger::log_warning(&format!("Rejected path outside workspace: {}", ctx.path));
        return not_found(ctx, state);
    }

    let fs_path = root.join(relative.trim_start_matches('/'));
    let is_dir = fs::metadata(&fs_path).await.is_ok_and(|m| m.is_dir());
    if !is_dir {
        return serve_file(ctx, state, &fs_path).await;
    }

    // Relative links in a listing only work from a URL ending in '/'
    if !ctx.raw_path.ends_with('/') {
        return http::build_redirect_response(&format!("{}/", ctx.raw_path));
    }

    let index = fs_path.join(INDEX_FILE);
    if fs::metadata(&index).await.is_ok_and(|m| m.is_file()) {
        return serve_file(ctx, state, &index).await;
    }

    let url_dir = ctx.path.trim_end_matches('/');
    let url_dir = if url_dir.is_empty() { "/" } else { url_dir };
    match state
        .content
        .directory_index_page(&fs_path, url_dir, None)
        .await
    {
        Ok(info) => http::build_content_response(info, StatusCode::OK, ctx.is_head),
        Err(e) => content_error(ctx, state, &e),
    }
}

async fn serve_file(
    ctx: &RequestContext<'_>,
    state: &AppState,
    fs_path: &Path,
) -> Response<PreviewBody> {
    match state.content.resolve_content(fs_path, true).await {
        Ok(ResponseInfo::NotFound) => not_found(ctx, state),
        Ok(info) => http::build_content_response(info, StatusCode::OK, ctx.is_head),
        Err(e) => content_error(ctx, state, &e),
    }
}

fn not_found(ctx: &RequestContext<'_>, state: &AppState) -> Response<PreviewBody> {
    http::build_content_response(
        state.content.not_found_page(&ctx.path),
        StatusCode::NOT_FOUND,
        ctx.is_head,
    )
}

fn content_error(
    ctx: &RequestContext<'_>,
    state: &AppState,
    error: &ContentError,
) -> Response<PreviewBody> {
    // A child entry failing to stat is a broken listing, not a missing page
    let missing = !matches!(error, ContentError::Stat { .. });
    if missing && error.kind() == io::ErrorKind::NotFound {
        return not_found(ctx, state);
    }
    logger::log_error(&format!("{error}: {}", error_source(error)));
    http::build_500_response()
}

fn error_source(error: &ContentError) -> String {
    std::error::Error::source(error).map_or_else(String::new, ToString::to_string)
}
