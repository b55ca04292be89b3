//! Disclosing collapsed UI before extraction
//!
//! A single streaming rewrite over the markup: `details` are opened,
//! collapsed toggles flipped to expanded, `collapsed` class tokens dropped
//! and inline height/overflow clamps lifted. Regions named by a toggle's
//! `aria-controls` lose `hidden` and `display: none`.

use lol_html::{HtmlRewriter, Settings, element};
use scraper::Html;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::{PageCopyError, PageCopyResult};
use crate::page::dom::attr;
use crate::static_selector;

static_selector!(
    COLLAPSED_TOGGLE_SELECTOR,
    r#"[aria-expanded="false"][aria-controls]"#
);

/// Rewritten markup and how many elements were expanded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedMarkup {
    pub html: String,
    pub expanded: usize,
}

/// `(property, value)` pairs of an inline style, property lowercased
fn declarations(style: &str) -> Vec<(String, &str)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            Some((prop.trim().to_ascii_lowercase(), value.trim()))
        })
        .collect()
}

fn is_clamped(style: &str) -> bool {
    declarations(style).iter().any(|(prop, value)| {
        (prop == "max-height" && !value.eq_ignore_ascii_case("none"))
            || (prop.starts_with("overflow") && value.eq_ignore_ascii_case("hidden"))
    })
}

fn lift_clamps(style: &str) -> String {
    let mut kept: Vec<String> = declarations(style)
        .into_iter()
        .filter(|(prop, _)| prop != "max-height" && !prop.starts_with("overflow"))
        .map(|(prop, value)| format!("{prop}: {value}"))
        .collect();
    kept.push("max-height: none".to_string());
    kept.push("overflow: visible".to_string());
    kept.join("; ")
}

fn drop_display_none(style: &str) -> String {
    declarations(style)
        .into_iter()
        .filter(|(prop, value)| !(prop == "display" && value.eq_ignore_ascii_case("none")))
        .map(|(prop, value)| format!("{prop}: {value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Ids referenced by collapsed toggles
fn controlled_ids(html: &str) -> HashSet<String> {
    let document = Html::parse_document(html);
    document
        .select(&COLLAPSED_TOGGLE_SELECTOR)
        .filter_map(|toggle| attr(&toggle, "aria-controls"))
        .flat_map(|ids| ids.split_ascii_whitespace().map(str::to_string).collect::<Vec<_>>())
        .collect()
}

/// Rewrite `html` so collapsed regions render expanded.
pub fn expand_collapsed(html: &str) -> PageCopyResult<ExpandedMarkup> {
    let targets = controlled_ids(html);
    let mut output = Vec::with_capacity(html.len());
    let expanded = AtomicUsize::new(0);

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![element!("*", |el| {
                let mut changed = false;

                if el.tag_name() == "details" && !el.has_attribute("open") {
                    el.set_attribute("open", "")?;
                    changed = true;
                }
                if el.get_attribute("aria-expanded").as_deref() == Some("false") {
                    el.set_attribute("aria-expanded", "true")?;
                    changed = true;
                }

                let mut lift = false;
                if let Some(class) = el.get_attribute("class")
                    && class.contains("collapsed")
                    && !class.contains("expand")
                {
                    let kept: Vec<&str> = class
                        .split_ascii_whitespace()
                        .filter(|token| *token != "collapsed")
                        .collect();
                    if kept.is_empty() {
                        el.remove_attribute("class");
                    } else {
                        el.set_attribute("class", &kept.join(" "))?;
                    }
                    lift = true;
                }

                let original = el.get_attribute("style").unwrap_or_default();
                let mut style = original.clone();
                if lift || is_clamped(&style) {
                    style = lift_clamps(&style);
                    changed = true;
                }
                if let Some(id) = el.get_attribute("id")
                    && targets.contains(&id)
                {
                    el.remove_attribute("hidden");
                    style = drop_display_none(&style);
                }
                if style != original {
                    if style.is_empty() {
                        el.remove_attribute("style");
                    } else {
                        el.set_attribute("style", &style)?;
                    }
                }

                if changed {
                    expanded.fetch_add(1, Ordering::Relaxed);
                }
                Ok(())
            })],
            ..Settings::default()
        },
        |c: &[u8]| output.extend_from_slice(c),
    );

    rewriter
        .write(html.as_bytes())
        .map_err(|e| PageCopyError::Rewrite(e.to_string()))?;
    rewriter
        .end()
        .map_err(|e| PageCopyError::Rewrite(e.to_string()))?;

    let html = String::from_utf8(output).map_err(|e| PageCopyError::Rewrite(e.to_string()))?;
    let expanded = expanded.load(Ordering::Relaxed);
    tracing::debug!(expanded, "Expanded collapsed elements");
    Ok(ExpandedMarkup { html, expanded })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Page;
    use crate::page::dom::is_hidden;

    #[test]
    fn opens_and_unclamps() {
        let html = r#"<details><summary>More</summary><p>Body</p></details>
            <div class="panel collapsed" style="max-height: 40px">Long text</div>
            <div style="overflow:hidden; color: red">Clipped</div>"#;
        let out = expand_collapsed(html).unwrap();
        assert_eq!(out.expanded, 3);
        assert!(out.html.contains("<details open"));
        assert!(out.html.contains(r#"class="panel""#));
        assert!(out.html.contains("max-height: none; overflow: visible"));
        assert!(out.html.contains("color: red; max-height: none"));
    }

    #[test]
    fn reveals_controlled_regions_anywhere() {
        let html = r#"<div id="t1" hidden>Transcript text</div>
            <div id="t2" style="display: none">Notes</div>
            <button aria-expanded="false" aria-controls="t1 t2">Show</button>"#;
        let out = expand_collapsed(html).unwrap();
        assert_eq!(out.expanded, 1);
        assert!(out.html.contains(r#"aria-expanded="true""#));

        static_selector!(T1, "#t1");
        static_selector!(T2, "#t2");
        let page = Page::parse(&out.html, None);
        assert!(!is_hidden(&page.select_first(&T1).unwrap()));
        assert!(!is_hidden(&page.select_first(&T2).unwrap()));
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let html = r#"<details><p>x</p></details><div class="collapsed" style="max-height:10px">y</div>"#;
        let first = expand_collapsed(html).unwrap();
        let second = expand_collapsed(&first.html).unwrap();
        assert_eq!(second.expanded, 0);
        assert_eq!(second.html, first.html);
    }

    #[test]
    fn expand_classes_are_left_alone() {
        let out = expand_collapsed(r#"<div class="collapsed-expandable">z</div>"#).unwrap();
        assert_eq!(out.expanded, 0);
    }
}
