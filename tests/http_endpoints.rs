// End-to-end tests of the HTTP surface, with the export endpoint mocked.

mod helpers;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use gdoc_fields::{create_app, Config};
use helpers::{
    build_docx, doc_url, docx_response, export_path, paragraph, sample_docx, test_config,
    test_state,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_for(server: &MockServer) -> Router {
    create_app(test_state(test_config(&server.uri())))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("Router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).expect("Response body should be JSON");
    (status, body)
}

fn parse_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/parse-doc")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn mount_export(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(export_path()))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_health() {
    let app = create_app(test_state(Config::default()));
    let request = Request::get("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = create_app(test_state(Config::default()));
    let request = Request::get("/nope").body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not found"}));
}

#[tokio::test]
async fn test_parse_doc_extracts_fields() {
    let server = MockServer::start().await;
    mount_export(&server, docx_response(sample_docx())).await;

    let body = json!({
        "url": doc_url(),
        "keywords": ["Customer Name", "Product title", "Missing"],
    });
    let (status, body) = send(app_for(&server), parse_request(body.to_string())).await;

    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(
        body["structuredData"],
        json!({"Customer Name": "John Doe", "Product title": "Widget X"})
    );
    let raw_html = body["rawHtml"].as_str().expect("rawHtml should be a string");
    assert!(raw_html.contains("<p>Customer Name: John Doe</p>"));
    assert!(raw_html.contains("<h2>Product title</h2>"));
}

#[tokio::test]
async fn test_parse_doc_without_keywords_returns_html_only() {
    let server = MockServer::start().await;
    mount_export(&server, docx_response(sample_docx())).await;

    let body = json!({ "url": doc_url() });
    let (status, body) = send(app_for(&server), parse_request(body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["structuredData"], json!({}));
    assert!(body["rawHtml"].as_str().unwrap().contains("Widget X"));
}

#[tokio::test]
async fn test_parse_doc_list_value() {
    let server = MockServer::start().await;
    let numbering_body = [
        paragraph(Some("Heading2"), "Features"),
        r#"<w:p><w:pPr><w:pStyle w:val="ListParagraph"/><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr></w:pPr><w:r><w:t>Fast</w:t></w:r></w:p>"#.to_string(),
        r#"<w:p><w:pPr><w:pStyle w:val="ListParagraph"/><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr></w:pPr><w:r><w:t>Cheap</w:t></w:r></w:p>"#.to_string(),
    ]
    .concat();
    mount_export(&server, docx_response(build_docx(&numbering_body))).await;

    let body = json!({ "url": doc_url(), "keywords": ["features"] });
    let (status, body) = send(app_for(&server), parse_request(body.to_string())).await;

    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["structuredData"], json!({"features": "Fast | Cheap"}));
}

#[tokio::test]
async fn test_parse_doc_rejects_non_string_url() {
    let app = create_app(test_state(Config::default()));
    let (status, body) = send(app, parse_request(r#"{"url": 123}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "URL is required and must be a string"}));
}

#[tokio::test]
async fn test_parse_doc_rejects_missing_url() {
    let app = create_app(test_state(Config::default()));
    let (status, body) = send(app, parse_request(r#"{"keywords": ["A"]}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "URL is required and must be a string");
}

#[tokio::test]
async fn test_parse_doc_rejects_malformed_json() {
    let app = create_app(test_state(Config::default()));
    let (status, body) = send(app, parse_request("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Request body must be valid JSON"));
}

#[tokio::test]
async fn test_parse_doc_rejects_non_array_keywords() {
    let app = create_app(test_state(Config::default()));
    let body = json!({ "url": doc_url(), "keywords": "Customer Name" });
    let (status, body) = send(app, parse_request(body.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Keywords must be an array");
}

#[tokio::test]
async fn test_parse_doc_rejects_foreign_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let body = json!({ "url": "https://example.com/document/d/abc/edit" });
    let (status, body) = send(app_for(&server), parse_request(body.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid Google Docs URL"}));
}

#[tokio::test]
async fn test_parse_doc_private_document() {
    let server = MockServer::start().await;
    mount_export(
        &server,
        ResponseTemplate::new(200).set_body_raw("<html>Sign in</html>", "text/html"),
    )
    .await;

    let body = json!({ "url": doc_url() });
    let (status, body) = send(app_for(&server), parse_request(body.to_string())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Document is not publicly accessible"));
}

#[tokio::test]
async fn test_parse_doc_upstream_statuses() {
    let cases = [
        (401, StatusCode::FORBIDDEN),
        (403, StatusCode::FORBIDDEN),
        (404, StatusCode::NOT_FOUND),
        (500, StatusCode::INTERNAL_SERVER_ERROR),
        (503, StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (upstream, expected) in cases {
        let server = MockServer::start().await;
        mount_export(&server, ResponseTemplate::new(upstream)).await;

        let body = json!({ "url": doc_url() });
        let (status, body) = send(app_for(&server), parse_request(body.to_string())).await;
        assert_eq!(status, expected, "upstream {} gave {}", upstream, body);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_parse_doc_corrupt_docx_is_internal_error() {
    let server = MockServer::start().await;
    mount_export(&server, docx_response(b"definitely not a zip".to_vec())).await;

    let body = json!({ "url": doc_url() });
    let (status, body) = send(app_for(&server), parse_request(body.to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to convert DOCX to HTML"));
}

#[tokio::test]
async fn test_cors_preflight_is_allowed() {
    let app = create_app(test_state(Config::default()));
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/parse-doc")
        .header(header::ORIGIN, "https://app.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let server = MockServer::start().await;
    mount_export(&server, docx_response(sample_docx())).await;
    let app = app_for(&server);

    let requests = (0..4).map(|_| {
        let app = app.clone();
        async move {
            let body = json!({ "url": doc_url(), "keywords": ["Customer Name"] });
            send(app, parse_request(body.to_string())).await
        }
    });
    for (status, body) in join_spawned(requests).await {
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["structuredData"]["Customer Name"], "John Doe");
    }
}

async fn join_spawned<F, T>(futures: impl IntoIterator<Item = F>) -> Vec<T>
where
    F: std::future::Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let handles: Vec<_> = futures.into_iter().map(tokio::spawn).collect();
    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.expect("Request task panicked"));
    }
    results
}
