//! Clean HTML output: the content root's inner markup without scripts,
//! styles, `noscript` and stylesheet links

use ego_tree::NodeId;
use scraper::{ElementRef, Node};
use std::collections::HashSet;

use crate::static_selector;

static_selector!(
    STRIPPED_SELECTOR,
    r#"script, style, noscript, link[rel="stylesheet"]"#
);

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Inner HTML of `root` with stripped elements removed, subtree included
#[must_use]
pub fn clean_html(root: ElementRef<'_>) -> String {
    let to_remove: HashSet<NodeId> = root.select(&STRIPPED_SELECTOR).map(|el| el.id()).collect();
    let mut output = String::new();
    serialize_children(root, &to_remove, &mut output);
    output
}

fn serialize_children(element: ElementRef<'_>, to_remove: &HashSet<NodeId>, output: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => output.push_str(&html_escape::encode_text(&**text)),
            Node::Comment(comment) => {
                output.push_str("<!--");
                output.push_str(comment);
                output.push_str("-->");
            }
            Node::Element(_) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                if to_remove.contains(&child_el.id()) {
                    continue;
                }
                serialize_element(child_el, to_remove, output);
            }
            _ => {}
        }
    }
}

fn serialize_element(element: ElementRef<'_>, to_remove: &HashSet<NodeId>, output: &mut String) {
    let name = element.value().name();
    output.push('<');
    output.push_str(name);
    for (attr_name, value) in element.value().attrs() {
        output.push(' ');
        output.push_str(attr_name);
        output.push_str("=\"");
        output.push_str(&html_escape::encode_double_quoted_attribute(value));
        output.push('"');
    }
    output.push('>');

    if VOID_ELEMENTS.contains(&name) {
        return;
    }
    serialize_children(element, to_remove, output);
    output.push_str("</");
    output.push_str(name);
    output.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Page;

    #[test]
    fn strips_scripts_and_styles() {
        let page = Page::parse(
            r#"<body><p class="x">A &amp; B</p><script>alert(1)</script>
               <style>p{}</style><link rel="stylesheet" href="a.css"><img src="i.png"><noscript>n</noscript></body>"#,
            None,
        );
        let html = clean_html(page.body());
        assert!(html.contains(r#"<p class="x">A &amp; B</p>"#));
        assert!(html.contains(r#"<img src="i.png">"#));
        assert!(!html.contains("script"));
        assert!(!html.contains("style"));
        assert!(!html.contains("noscript"));
    }
}
