//! Buttons and inline form controls

use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;

use super::super::MarkdownRenderer;
use super::super::context::RenderContext;
use crate::page::dom::{
    closest, control_label, control_value, input_type, is_checked, trimmed_text,
};
use crate::static_selector;
use crate::utils::{MAX_INLINE_VALUE_LEN, is_opaque_identifier};

static_selector!(INPUT_SELECTOR, "input");
static_selector!(LABEL_SELECTOR, "label");

static TIMESTAMP_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+:\d{2}$").expect("BUG: hardcoded timestamp regex is invalid")
});

/// Chrome buttons vanish, `mm:ss` buttons become timestamp markers,
/// icon-only buttons vanish, anything else renders its content.
pub(super) fn button_handler(
    renderer: &MarkdownRenderer<'_>,
    el: ElementRef<'_>,
    ctx: RenderContext,
) -> String {
    let label = trimmed_text(&el);
    if renderer.lexicon.is_noise_button(&label) {
        return String::new();
    }
    if TIMESTAMP_LABEL.is_match(&label) {
        return format!("**[{label}]** ");
    }
    if label.chars().count() <= 2 {
        return String::new();
    }
    renderer.render_children(el, ctx)
}

fn is_toggle(input: &ElementRef<'_>) -> bool {
    matches!(input_type(input).as_str(), "radio" | "checkbox")
}

/// A label wrapping a radio or checkbox is printed by the control, so only
/// the wrapped controls render. Other labels, `label[for]` included, render
/// their content.
pub(super) fn label_handler(
    renderer: &MarkdownRenderer<'_>,
    el: ElementRef<'_>,
    ctx: RenderContext,
) -> String {
    let wrapped: Vec<ElementRef<'_>> = el.select(&INPUT_SELECTOR).collect();
    if wrapped.iter().any(is_toggle) {
        return wrapped
            .into_iter()
            .map(|input| renderer.render_element(input, ctx))
            .collect();
    }
    renderer.render_children(el, ctx)
}

/// Text a toggle prints itself: only a wrapping label's, since a
/// `label[for]` elsewhere renders on its own.
fn wrapping_label(el: &ElementRef<'_>) -> String {
    if closest(el, &LABEL_SELECTOR).is_some() {
        control_label(el)
    } else {
        String::new()
    }
}

pub(super) fn input_handler(_renderer: &MarkdownRenderer<'_>, el: ElementRef<'_>) -> String {
    match input_type(&el).as_str() {
        "hidden" => String::new(),
        "radio" => {
            if !is_checked(&el) {
                return String::new();
            }
            let label = wrapping_label(&el);
            if label.is_empty() {
                " (selected) ".to_string()
            } else {
                format!(" ({label}) ")
            }
        }
        "checkbox" => {
            let mark = if is_checked(&el) { '☑' } else { '☐' };
            format!("{mark} {}", wrapping_label(&el))
        }
        _ => {
            let value = control_value(&el);
            if !value.is_empty()
                && value.chars().count() <= MAX_INLINE_VALUE_LEN
                && !is_opaque_identifier(&value)
            {
                value
            } else {
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::markdown_converter::test_support::render_html;

    #[test]
    fn chrome_buttons_are_dropped() {
        let html = "<p>Text<button>Close dialog</button><button>×</button><button>OK</button></p>";
        assert_eq!(render_html(html), "Text");
    }

    #[test]
    fn timestamp_buttons_become_markers() {
        assert_eq!(
            render_html("<p><button>1:05</button>Intro</p>"),
            "**[1:05]** Intro"
        );
    }

    #[test]
    fn content_buttons_render_children() {
        assert_eq!(render_html("<p><button>Submit form</button></p>"), "Submit form");
    }

    #[test]
    fn radios_and_checkboxes() {
        let html = r#"<p><label><input type="radio" checked> Blue</label><label><input type="radio"> Red</label></p>"#;
        assert_eq!(render_html(html), "(Blue)");

        let html = r#"<p><input id="c1" type="checkbox" checked><label for="c1">Agree</label></p>"#;
        assert_eq!(render_html(html), "☑ Agree");

        let html = r#"<p><label><input type="checkbox"> Remember me</label></p>"#;
        assert_eq!(render_html(html), "☐ Remember me");

        let html = r#"<p><input type="radio" checked></p>"#;
        assert_eq!(render_html(html), "(selected)");
    }

    #[test]
    fn radios_labelled_by_id_keep_every_option() {
        let html = r#"<form>
            <p><input type="radio" name="q" id="a"><label for="a">Option Four</label></p>
            <p><input type="radio" name="q" id="b" checked><label for="b">Option Seven</label></p>
        </form>"#;
        let md = render_html(html);
        assert_eq!(md.matches("Option Four").count(), 1);
        assert_eq!(md.matches("Option Seven").count(), 1);
        assert!(md.contains("(selected) Option Seven"));
    }

    #[test]
    fn plain_labels_render_text() {
        assert_eq!(render_html(r#"<p><label>Name: <input value="Ada"></label></p>"#), "Name: Ada");
    }

    #[test]
    fn text_values_filter_noise() {
        assert_eq!(render_html(r#"<p><input value="Ada"></p>"#), "Ada");
        assert_eq!(
            render_html(r#"<p>x<input value="0123456789abcdef0123456789"></p>"#),
            "x"
        );
        assert_eq!(render_html(r#"<p>x<input type="hidden" value="secret"></p>"#), "x");
        let at_limit = "v".repeat(200);
        assert_eq!(
            render_html(&format!(r#"<p><input value="{at_limit}"></p>"#)),
            at_limit
        );
        let long = "v".repeat(201);
        assert_eq!(render_html(&format!(r#"<p>x<input value="{long}"></p>"#)), "x");
    }
}
