//! Form extraction through the public API

use kodegen_tools_pagecopy::extractors::{NOT_SELECTED, extract_forms};
use kodegen_tools_pagecopy::{FormBlock, NoiseLexicon, Page};

fn extract(html: &str) -> Vec<FormBlock> {
    extract_forms(&Page::parse(html, None), &NoiseLexicon::default())
}

#[test]
fn application_flow_fields_are_reported_once() {
    let html = r#"<main>
        <div data-automation-id="applyFlowPage">
            <div role="group"><h3>My Information</h3>
                <div data-automation-id="formField-firstName"><label>First Name</label><input type="text" value="Grace"></div>
                <div role="group"><h4>Address</h4>
                    <div data-automation-id="formField-city"><label>City</label><input type="text" value="Arlington"></div>
                </div>
            </div>
            <div role="group"><h3>Voluntary Disclosures</h3>
                <div data-automation-id="formField-veteran"><label>Veteran Status</label>
                    <button aria-haspopup="listbox">Select One</button></div>
            </div>
        </div>
    </main>"#;
    let blocks = extract(html);
    assert_eq!(blocks.len(), 1);

    let labels: Vec<&str> = blocks[0].fields().map(|f| f.label.as_str()).collect();
    assert_eq!(labels, vec!["First Name", "City", "Veteran Status"]);

    let veteran = blocks[0]
        .fields()
        .find(|f| f.label == "Veteran Status")
        .expect("veteran field present");
    assert_eq!(veteran.value, NOT_SELECTED);
}

#[test]
fn application_flow_ignores_unrelated_forms() {
    let html = r#"<body>
        <form class="newsletter"><label for="e">Newsletter</label><input type="text" id="e" value="x"></form>
        <div data-automation-id="applyFlowPage">
            <div data-automation-id="formField-city"><label>City</label><input type="text" value="Oslo"></div>
        </div>
    </body>"#;
    let blocks = extract(html);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].to_markdown(), "**City:** Oslo");
}

#[test]
fn each_generic_form_is_its_own_block() {
    let html = r#"<body>
        <form id="login"><label for="u">User</label><input type="text" id="u" value="ada"></form>
        <div class="quiz-panel">
            <fieldset><legend>2 + 2?</legend>
                <label><input type="radio" name="a"> 3</label>
                <label><input type="radio" name="a" checked> 4</label>
            </fieldset>
        </div>
    </body>"#;
    let md: Vec<String> = extract(html).iter().map(FormBlock::to_markdown).collect();
    assert_eq!(
        md,
        vec![
            "**User:** ada".to_string(),
            "**Q1:** 2 + 2?\n  - 3\n  - 4 ✅".to_string(),
        ]
    );
}

#[test]
fn blocks_serialize_for_structured_output() {
    let blocks = extract(r#"<form><input type="text" name="q" value="rust"></form>"#);
    let json = serde_json::to_value(&blocks).expect("blocks serialize");
    assert_eq!(json[0]["lines"][0]["Field"]["label"], "q");
    assert_eq!(json[0]["lines"][0]["Field"]["value"], "rust");
}
