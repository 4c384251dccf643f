//! Integration tests for the HTTP content-type probe and the classifier's
//! slow path against a mock server.

use std::sync::Arc;
use std::time::Duration;

use inkpad_core::{Classification, ContentTypeProbe, Error, ImageIntent, PasteCandidate};
use inkpad_paste::{HttpContentTypeProbe, PasteClassifier};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve(content_type: &str) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doc"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", content_type))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_server
}

fn classifier(timeout_secs: u64) -> PasteClassifier {
    let probe = HttpContentTypeProbe::new(timeout_secs).expect("Failed to create probe");
    PasteClassifier::new(Arc::new(probe))
}

#[tokio::test]
async fn test_probe_reads_content_type_header() {
    let mock_server = serve("image/png").await;
    let probe = HttpContentTypeProbe::new(5).unwrap();

    let content_type = probe
        .content_type(&format!("{}/doc", mock_server.uri()))
        .await
        .expect("Probe should succeed");

    assert_eq!(content_type.as_deref(), Some("image/png"));
}

#[tokio::test]
async fn test_image_content_type_becomes_image_intent() {
    let mock_server = serve("image/gif").await;
    let url = format!("{}/doc", mock_server.uri());

    let outcome = classifier(5)
        .classify(&PasteCandidate::Text(url.clone()))
        .await;

    assert_eq!(outcome, Classification::Handled(ImageIntent::new(url)));
}

#[tokio::test]
async fn test_html_content_type_passes_through() {
    let mock_server = serve("text/html; charset=utf-8").await;
    let url = format!("{}/doc", mock_server.uri());

    let outcome = classifier(5).classify(&PasteCandidate::Text(url)).await;

    assert_eq!(outcome, Classification::PassThrough);
}

#[tokio::test]
async fn test_fast_path_sends_no_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "image/png"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let url = format!("{}/pictures/cat.JPG", mock_server.uri());
    let outcome = classifier(5)
        .classify(&PasteCandidate::Text(url.clone()))
        .await;

    assert_eq!(outcome, Classification::Handled(ImageIntent::new(url)));
}

#[tokio::test]
async fn test_timeout_passes_through() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let probe = HttpContentTypeProbe::new(1).unwrap();
    let url = format!("{}/slow", mock_server.uri());
    let result = probe.content_type(&url).await;
    assert!(matches!(result, Err(Error::Network(_))));

    let outcome = classifier(1).classify(&PasteCandidate::Text(url)).await;
    assert_eq!(outcome, Classification::PassThrough);
}

#[tokio::test]
async fn test_unreachable_server_passes_through() {
    let mock_server = MockServer::start().await;
    let url = format!("{}/doc", mock_server.uri());
    drop(mock_server);

    let outcome = classifier(2).classify(&PasteCandidate::Text(url)).await;

    assert_eq!(outcome, Classification::PassThrough);
}
