use std::net::SocketAddr;

use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use axum::extract::{rejection::QueryRejection, Query};
use clap::Parser;
use render::{ImageSpec, OutputFormat};
use serde::Deserialize;
use shared::error::{ApiError, ErrorCode};
use tracing::{debug, info};

mod config;

use config::load_settings;

const MAX_DIMENSION: i64 = 4096;
const MAX_FONT_SIZE: f64 = 512.0;

const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head><title>lorem</title></head>
  <body>
    <h1>lorem</h1>
    <p>Placeholder image generator. Request <code>/lorem</code> with:</p>
    <ul>
      <li><code>w</code>, <code>h</code>: dimensions in pixels</li>
      <li><code>fs</code>: font size</li>
      <li><code>s</code>: text to draw</li>
      <li><code>p=1</code>: print the dimensions under the text</li>
      <li><code>t</code>: <code>png</code> or <code>gif</code> (anything else is jpeg)</li>
    </ul>
    <p>Example:
      <a href="/lorem?w=300&amp;h=200&amp;fs=14&amp;s=Hi+there&amp;p=1&amp;t=png">
        /lorem?w=300&amp;h=200&amp;fs=14&amp;s=Hi+there&amp;p=1&amp;t=png
      </a>
    </p>
  </body>
</html>
"#;

#[derive(Parser, Debug)]
struct Args {
    /// Bind address, overriding server.toml and the environment.
    #[arg(long)]
    addr: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoremQuery {
    w: Option<String>,
    h: Option<String>,
    fs: Option<String>,
    s: Option<String>,
    p: Option<String>,
    t: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let mut settings = load_settings();
    if let Some(addr) = args.addr {
        settings.server_bind = addr;
    }

    let app = build_router();

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "placeholder image server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router() -> Router {
    Router::new()
        .route("/", get(home))
        .route("/healthz", get(healthz))
        .route("/lorem", get(lorem))
}

async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn lorem(
    query: Result<Query<LoremQuery>, QueryRejection>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiError>)> {
    let Query(query) = query.map_err(|err| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(ErrorCode::Validation, err.to_string())),
        )
    })?;
    let (spec, format) = spec_from_query(&query);
    debug!(
        width = spec.width,
        height = spec.height,
        ?format,
        "rendering placeholder"
    );

    let image = render::render(&spec);
    let bytes = render::encode_image(&image, format).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::new(ErrorCode::Internal, e.to_string())),
        )
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(format.content_type()),
    );
    Ok((StatusCode::OK, headers, bytes))
}

/// Applies the query on top of the render defaults.
///
/// Every parameter is optional and forgiving: values that fail to parse or
/// are out of range leave the default in place rather than erroring.
fn spec_from_query(query: &LoremQuery) -> (ImageSpec, OutputFormat) {
    let mut spec = ImageSpec::default();

    if let Some(width) = parse_dimension(query.w.as_deref()) {
        spec.width = width;
    }
    if let Some(height) = parse_dimension(query.h.as_deref()) {
        spec.height = height;
    }
    if let Some(font_size) = query.fs.as_deref().and_then(|raw| raw.parse::<f64>().ok()) {
        if font_size > 0.0 {
            spec.font_size = font_size.min(MAX_FONT_SIZE);
        }
    }
    if let Some(text) = query.s.as_deref() {
        if !text.is_empty() {
            spec.text = text.to_string();
        }
    }
    spec.show_dimensions = query.p.as_deref() == Some("1");

    (spec, OutputFormat::from_query_value(query.t.as_deref()))
}

fn parse_dimension(raw: Option<&str>) -> Option<u32> {
    let value = raw?.parse::<i64>().ok()?;
    if value > 0 {
        Some(value.min(MAX_DIMENSION) as u32)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
