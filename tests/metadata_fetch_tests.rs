//! End-to-end fetcher tests against a throwaway local HTTP server serving
//! fixture HTML, so the success path is covered without touching the
//! public internet.

use axum::{response::Html, routing::get, Router};

use edutaskmap_server::linkmeta::{MetadataFetcher, DEFAULT_FETCH_TIMEOUT};

/// Serve `html` at /page on an ephemeral port; returns the page URL.
async fn serve_page(html: &'static str) -> String {
    let app = Router::new().route("/page", get(move || async move { Html(html) }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fixture server");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/page")
}

fn fetcher() -> MetadataFetcher {
    MetadataFetcher::new(DEFAULT_FETCH_TIMEOUT).expect("Failed to build HTTP client")
}

#[tokio::test]
async fn fetch_extracts_open_graph_fields() {
    let url = serve_page(
        r#"<html><head>
            <meta property="og:title" content="Foo">
            <meta property="og:site_name" content="Example Site">
            <meta property="og:image" content="https://cdn.example.com/x.png">
        </head></html>"#,
    )
    .await;

    let meta = fetcher().fetch(&url).await;
    assert_eq!(meta.url, url);
    assert_eq!(meta.title.as_deref(), Some("Foo"));
    assert_eq!(meta.site_name.as_deref(), Some("Example Site"));
    assert_eq!(meta.image_url.as_deref(), Some("https://cdn.example.com/x.png"));
    assert_eq!(meta.domain.as_deref(), Some("127.0.0.1"));
}

#[tokio::test]
async fn fetch_resolves_relative_image_against_page_origin() {
    let url = serve_page(
        r#"<html><head>
            <meta property="og:title" content="Foo">
            <meta property="og:image" content="/x.png">
        </head></html>"#,
    )
    .await;

    let meta = fetcher().fetch(&url).await;
    let expected = url.replace("/page", "/x.png");
    assert_eq!(meta.image_url.as_deref(), Some(expected.as_str()));
}

#[tokio::test]
async fn fetch_falls_back_to_title_tag() {
    let url = serve_page("<html><head><title>Plain Page</title></head></html>").await;

    let meta = fetcher().fetch(&url).await;
    assert_eq!(meta.title.as_deref(), Some("Plain Page"));
    // No og:site_name or application-name, so the domain fills in.
    assert_eq!(meta.site_name.as_deref(), Some("127.0.0.1"));
}

#[tokio::test]
async fn fetch_uses_url_fallback_on_404() {
    // The fixture server only serves /page; anything else is a 404, which
    // takes the failure path.
    let url = serve_page("<html></html>").await;
    let missing = url.replace("/page", "/missing-lesson");

    let meta = fetcher().fetch(&missing).await;
    assert_eq!(meta.url, missing);
    assert_eq!(meta.title.as_deref(), Some("Missing Lesson"));
    assert_eq!(meta.site_name.as_deref(), Some("127.0.0.1"));
    assert!(meta.image_url.is_none());
}

#[tokio::test]
async fn fetch_is_idempotent_for_unchanged_content() {
    let url = serve_page(
        r#"<html><head><meta property="og:title" content="Stable"></head></html>"#,
    )
    .await;

    let f = fetcher();
    let first = f.fetch(&url).await;
    let second = f.fetch(&url).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn fetch_reads_meta_tags_regardless_of_attribute_order() {
    let url = serve_page(
        r#"<html><head>
            <meta content="Reversed Attrs" property="og:title">
        </head></html>"#,
    )
    .await;

    let meta = fetcher().fetch(&url).await;
    assert_eq!(meta.title.as_deref(), Some("Reversed Attrs"));
}
