//! Element helpers over the scraper tree
//!
//! Control state is read from the snapshot's attributes: there is no live
//! layout engine behind a `Page`, so `checked`, `value` and visibility come
//! from markup alone.

use ego_tree::NodeRef;
use scraper::{ElementRef, Node, Selector};

/// Declare a lazily parsed, hardcoded CSS selector.
#[macro_export]
macro_rules! static_selector {
    ($name:ident, $css:literal) => {
        static $name: std::sync::LazyLock<scraper::Selector> = std::sync::LazyLock::new(|| {
            scraper::Selector::parse($css)
                .expect(concat!("BUG: hardcoded CSS selector '", $css, "' is invalid"))
        });
    };
}

/// Lowercase tag name
#[inline]
#[must_use]
pub fn tag<'a>(el: &ElementRef<'a>) -> &'a str {
    el.value().name()
}

#[inline]
#[must_use]
pub fn attr<'a>(el: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

/// Attribute value, treating an empty value as absent
#[must_use]
pub fn non_empty_attr<'a>(el: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    attr(el, name).filter(|v| !v.trim().is_empty())
}

#[must_use]
pub fn has_class(el: &ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// Raw `class` attribute, empty when absent
#[must_use]
pub fn class_attr<'a>(el: &ElementRef<'a>) -> &'a str {
    attr(el, "class").unwrap_or("")
}

/// Concatenated descendant text, like `textContent`
#[must_use]
pub fn text_content(el: &ElementRef<'_>) -> String {
    el.text().collect()
}

/// Text content of any node
#[must_use]
pub fn node_text(node: NodeRef<'_, Node>) -> String {
    match node.value() {
        Node::Text(text) => String::from(&**text),
        Node::Element(_) => ElementRef::wrap(node).map(|el| text_content(&el)).unwrap_or_default(),
        _ => String::new(),
    }
}

/// Trimmed text content
#[must_use]
pub fn trimmed_text(el: &ElementRef<'_>) -> String {
    text_content(el).trim().to_string()
}

/// Text content with whitespace runs collapsed and ends trimmed
#[must_use]
pub fn squash_text(el: &ElementRef<'_>) -> String {
    crate::utils::squash(&text_content(el))
}

/// Character count of the trimmed text content
#[must_use]
pub fn text_len(el: &ElementRef<'_>) -> usize {
    text_content(el).trim().chars().count()
}

#[must_use]
pub fn parent_element<'a>(el: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.parent().and_then(ElementRef::wrap)
}

/// Nearest inclusive ancestor matching `selector`
#[must_use]
pub fn closest<'a>(el: &ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    std::iter::once(*el)
        .chain(el.ancestors().filter_map(ElementRef::wrap))
        .find(|candidate| selector.matches(candidate))
}

/// True when `ancestor` is `el` or contains it
#[must_use]
pub fn contains(ancestor: &ElementRef<'_>, el: &ElementRef<'_>) -> bool {
    ancestor.id() == el.id() || el.ancestors().any(|a| a.id() == ancestor.id())
}

pub fn child_elements<'a>(el: &ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

#[must_use]
pub fn next_element_sibling<'a>(el: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Outermost element of the tree containing `el` (normally `<html>`)
#[must_use]
pub fn document_element<'a>(el: &ElementRef<'a>) -> ElementRef<'a> {
    el.ancestors().filter_map(ElementRef::wrap).last().unwrap_or(*el)
}

/// Hidden via the `hidden` attribute or an inline display/visibility rule
#[must_use]
pub fn is_hidden(el: &ElementRef<'_>) -> bool {
    if attr(el, "hidden").is_some() {
        return true;
    }
    let Some(style) = attr(el, "style") else {
        return false;
    };
    let compact: String = style
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    compact
        .split(';')
        .any(|decl| decl.starts_with("display:none") || decl.starts_with("visibility:hidden"))
}

/// Checked state: the `checked` attribute on inputs, `aria-checked` elsewhere
#[must_use]
pub fn is_checked(el: &ElementRef<'_>) -> bool {
    if tag(el) == "input" {
        return attr(el, "checked").is_some();
    }
    attr(el, "aria-checked") == Some("true")
}

/// Current value of a form control
#[must_use]
pub fn control_value(el: &ElementRef<'_>) -> String {
    match tag(el) {
        "textarea" => text_content(el),
        _ => attr(el, "value").unwrap_or("").to_string(),
    }
}

/// Input type, defaulting to `text` like the DOM does
#[must_use]
pub fn input_type(el: &ElementRef<'_>) -> String {
    attr(el, "type")
        .map(str::to_ascii_lowercase)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "text".to_string())
}

static_selector!(LABEL_SELECTOR, "label");

/// `<label for="id">` anywhere in the document
#[must_use]
pub fn label_for<'a>(el: &ElementRef<'a>, id: &str) -> Option<ElementRef<'a>> {
    if id.is_empty() {
        return None;
    }
    document_element(el)
        .select(&LABEL_SELECTOR)
        .find(|label| attr(label, "for") == Some(id))
}

/// Label text for a control: the wrapping label, then `label[for=id]`
#[must_use]
pub fn control_label(el: &ElementRef<'_>) -> String {
    if let Some(wrapping) = closest(el, &LABEL_SELECTOR) {
        let text = trimmed_text(&wrapping);
        if !text.is_empty() {
            return text;
        }
    }
    attr(el, "id")
        .and_then(|id| label_for(el, id))
        .map(|label| trimmed_text(&label))
        .unwrap_or_default()
}

/// Currently selected option text of a `<select>`
#[must_use]
pub fn selected_option_text(select: &ElementRef<'_>) -> String {
    static_selector!(OPTION_SELECTOR, "option");
    let mut options = select.select(&OPTION_SELECTOR).peekable();
    let first = options.peek().copied();
    options
        .find(|opt| attr(opt, "selected").is_some())
        .or(first)
        .map(|opt| squash_text(&opt))
        .unwrap_or_default()
}
