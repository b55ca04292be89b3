//! Test utilities and helper functions for the pagecopy test suite

use chrono::{Local, TimeZone};
use kodegen_tools_pagecopy::{
    DocumentAssembler, ExtractionConfig, MarkdownRenderer, NoiseLexicon, Page,
};
use mockito::{Mock, Server};
use url::Url;

/// Creates a test HTML document with specified title and body
#[allow(dead_code)]
pub fn create_test_html(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{}</title>
</head>
<body>
    {}
</body>
</html>"#,
        html_escape::encode_text(title),
        body
    )
}

/// Render the body of `html` as a fragment, as if served from `url`
#[allow(dead_code)]
pub fn render(html: &str, url: Option<&str>) -> String {
    let page = Page::parse(html, url.and_then(|u| Url::parse(u).ok()));
    let lexicon = NoiseLexicon::default();
    MarkdownRenderer::new(page.url(), &lexicon).render(page.body())
}

/// Assemble the full document with a fixed capture time
#[allow(dead_code)]
pub fn assemble(html: &str, url: &str) -> String {
    let config = ExtractionConfig::default();
    let page = Page::parse(html, Url::parse(url).ok());
    DocumentAssembler::new(&config)
        .captured_at(fixed_capture_time())
        .assemble(&page)
}

#[allow(dead_code)]
pub fn fixed_capture_time() -> chrono::DateTime<Local> {
    Local
        .with_ymd_and_hms(2025, 3, 4, 5, 6, 7)
        .single()
        .expect("fixed timestamp is unambiguous")
}

/// Config with no pause between notebook file downloads
#[allow(dead_code)]
pub fn fast_config() -> ExtractionConfig {
    ExtractionConfig::builder()
        .file_delay_ms(0)
        .request_timeout_secs(5)
        .build()
        .expect("test config is valid")
}

/// Creates a mock contents API endpoint returning `body` as JSON
#[allow(dead_code)]
pub async fn create_contents_mock(server: &mut Server, path: &str, body: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}
