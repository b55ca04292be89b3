//! Main content selection across page layouts

use kodegen_tools_pagecopy::page::dom::{attr, tag};
use kodegen_tools_pagecopy::{ContentLocator, ExtractionConfig, Page};

fn filler(words: usize) -> String {
    "lorem ".repeat(words)
}

#[test]
fn article_with_enough_text_wins() {
    let html = format!(
        r#"<body><nav>{}</nav><article id="post"><p>{}</p></article></body>"#,
        filler(5),
        filler(40)
    );
    let page = Page::parse(&html, None);
    let config = ExtractionConfig::standard().expect("defaults compile");
    let found = ContentLocator::new(config.locator())
        .locate(&page)
        .expect("article qualifies");
    assert_eq!(attr(&found, "id"), Some("post"));
}

#[test]
fn heavier_main_landmark_overrides_a_small_article() {
    // ~100 characters of article against ~1000 characters of main
    let html = format!(
        r#"<body>
            <aside><article id="teaser"><p>{}</p></article></aside>
            <main id="body"><p>{}</p></main>
        </body>"#,
        filler(17),
        filler(170)
    );
    let page = Page::parse(&html, None);
    let config = ExtractionConfig::standard().expect("defaults compile");
    let found = ContentLocator::new(config.locator())
        .locate(&page)
        .expect("main qualifies");
    assert_eq!(tag(&found), "main");
}

#[test]
fn article_inside_main_is_kept() {
    let html = format!(
        r#"<body><main><p>{}</p><article id="inner"><p>{}</p></article></main></body>"#,
        filler(170),
        filler(20)
    );
    let page = Page::parse(&html, None);
    let config = ExtractionConfig::standard().expect("defaults compile");
    let found = ContentLocator::new(config.locator())
        .locate(&page)
        .expect("article qualifies");
    assert_eq!(attr(&found, "id"), Some("inner"));
}

#[test]
fn short_candidates_fall_back_to_the_body() {
    let page = Page::parse("<body><article>tiny</article><p>rest</p></body>", None);
    let config = ExtractionConfig::standard().expect("defaults compile");
    let locator = ContentLocator::new(config.locator());
    assert!(locator.locate(&page).is_none());
    assert_eq!(tag(&locator.locate_or_body(&page)), "body");
}

#[test]
fn configured_selectors_take_priority() {
    let config = ExtractionConfig::builder()
        .locator_selectors([".lesson"])
        .build()
        .expect("selector is valid");
    let html = format!(
        r#"<body><article><p>{}</p></article><div class="lesson"><p>{}</p></div></body>"#,
        filler(40),
        filler(40)
    );
    let page = Page::parse(&html, None);
    let found = ContentLocator::new(config.locator())
        .locate(&page)
        .expect("lesson qualifies");
    assert_eq!(attr(&found, "class"), Some("lesson"));
}
