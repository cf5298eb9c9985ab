use super::*;
use axum::{body, body::Body, http::Request};
use tower::ServiceExt;

async fn get_response(uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let request = Request::get(uri).body(Body::empty()).expect("request");
    let response = build_router().oneshot(request).await.expect("response");
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, content_type, bytes.to_vec())
}

#[tokio::test]
async fn healthz_reports_ok() {
    let (status, _content_type, body) = get_response("/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_slice(), b"ok");
}

#[tokio::test]
async fn home_page_documents_the_image_route() {
    let (status, content_type, body) = get_response("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.expect("content type").starts_with("text/html"));
    let html = String::from_utf8(body).expect("utf8");
    assert!(html.contains("/lorem"));
}

#[tokio::test]
async fn lorem_defaults_to_a_180_by_120_jpeg() {
    let (status, content_type, body) = get_response("/lorem").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/jpeg"));
    let decoded = image::load_from_memory(&body).expect("decode");
    assert_eq!((decoded.width(), decoded.height()), (180, 120));
}

#[tokio::test]
async fn lorem_honors_positive_dimensions() {
    let (_status, _content_type, body) = get_response("/lorem?w=300&h=200&fs=14").await;
    let decoded = image::load_from_memory(&body).expect("decode");
    assert_eq!((decoded.width(), decoded.height()), (300, 200));
}

#[tokio::test]
async fn lorem_ignores_unparsable_or_negative_dimensions() {
    let (status, _content_type, body) = get_response("/lorem?w=abc&h=-5").await;
    assert_eq!(status, StatusCode::OK);
    let decoded = image::load_from_memory(&body).expect("decode");
    assert_eq!((decoded.width(), decoded.height()), (180, 120));
}

#[tokio::test]
async fn lorem_serves_the_requested_encoding() {
    let (_status, content_type, body) = get_response("/lorem?t=png").await;
    assert_eq!(content_type.as_deref(), Some("image/png"));
    assert_eq!(&body[..8], b"\x89PNG\r\n\x1a\n");

    let (_status, content_type, body) = get_response("/lorem?t=gif").await;
    assert_eq!(content_type.as_deref(), Some("image/gif"));
    assert_eq!(&body[..4], b"GIF8");

    let (_status, content_type, _body) = get_response("/lorem?t=webp").await;
    assert_eq!(content_type.as_deref(), Some("image/jpeg"));
}

#[tokio::test]
async fn plus_in_the_text_parameter_decodes_as_a_space() {
    let (_status, _content_type, with_plus) =
        get_response("/lorem?w=160&h=80&fs=14&s=a+b&t=png").await;
    let (_status, _content_type, with_escape) =
        get_response("/lorem?w=160&h=80&fs=14&s=a%20b&t=png").await;
    assert_eq!(with_plus, with_escape);
}

#[tokio::test]
async fn duplicate_parameters_return_a_json_error() {
    let (status, _content_type, body) = get_response("/lorem?w=1&w=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ApiError = serde_json::from_slice(&body).expect("error body");
    assert!(matches!(error.code, ErrorCode::Validation));
}

#[tokio::test]
async fn the_p_flag_adds_the_dimension_caption() {
    let (_status, _content_type, plain) = get_response("/lorem?w=160&h=80&fs=14&t=png").await;
    let (_status, _content_type, with_caption) =
        get_response("/lorem?w=160&h=80&fs=14&p=1&t=png").await;
    assert_ne!(plain, with_caption);
}

#[test]
fn query_defaults_apply_when_nothing_is_sent() {
    let (spec, format) = spec_from_query(&LoremQuery::default());
    assert_eq!(spec, ImageSpec::default());
    assert_eq!(format, OutputFormat::Jpeg);
}

#[test]
fn oversized_values_are_clamped() {
    let query = LoremQuery {
        w: Some("100000".into()),
        h: Some("99999".into()),
        fs: Some("10000".into()),
        ..LoremQuery::default()
    };
    let (spec, _format) = spec_from_query(&query);
    assert_eq!((spec.width, spec.height), (4096, 4096));
    assert_eq!(spec.font_size, 512.0);
}

#[test]
fn zero_and_negative_sizes_fall_back_to_defaults() {
    let query = LoremQuery {
        w: Some("0".into()),
        h: Some("-20".into()),
        fs: Some("-3".into()),
        ..LoremQuery::default()
    };
    let (spec, _format) = spec_from_query(&query);
    assert_eq!((spec.width, spec.height), (180, 120));
    assert_eq!(spec.font_size, 14.0);
}

#[test]
fn the_caption_flag_requires_exactly_one() {
    for value in ["0", "true", "11", ""] {
        let query = LoremQuery {
            p: Some(value.into()),
            ..LoremQuery::default()
        };
        assert!(!spec_from_query(&query).0.show_dimensions, "p={value:?}");
    }

    let query = LoremQuery {
        p: Some("1".into()),
        ..LoremQuery::default()
    };
    assert!(spec_from_query(&query).0.show_dimensions);
}

#[test]
fn empty_text_keeps_the_blank_default() {
    let query = LoremQuery {
        s: Some(String::new()),
        ..LoremQuery::default()
    };
    assert_eq!(spec_from_query(&query).0.text, "");
}
