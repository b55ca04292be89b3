//! Plain HTML forms and quiz-like containers

use scraper::ElementRef;

use super::{FormBlock, FormField, FormLine};
use crate::page::Page;
use crate::page::dom::{
    attr, closest, control_value, is_checked, next_element_sibling, parent_element,
    selected_option_text, trimmed_text,
};
use crate::static_selector;

static_selector!(
    CONTAINER_SELECTOR,
    r#"form, [class*="quiz"], [class*="question"], [class*="assessment"]"#
);
static_selector!(
    QUESTION_SELECTOR,
    r#"[class*="question"], fieldset, .quiz-question, [role="group"]"#
);
static_selector!(
    QUESTION_TEXT_SELECTOR,
    r#"legend, label, [class*="question-text"], h3, h4, p"#
);
static_selector!(OPTION_SELECTOR, r#"input[type="radio"], input[type="checkbox"]"#);
static_selector!(TEXT_CONTROL_SELECTOR, r#"input[type="text"], textarea"#);
static_selector!(SELECT_SELECTOR, "select");
static_selector!(LABEL_SELECTOR, "label");

pub(super) fn extract(page: &Page) -> Vec<FormBlock> {
    page.select_all(&CONTAINER_SELECTOR)
        .filter(|container| !is_nested_container(container))
        .filter_map(|container| {
            let lines = container_lines(&container);
            (!lines.is_empty()).then_some(FormBlock { lines })
        })
        .collect()
}

/// Containers inside another container are covered by the outer one.
fn is_nested_container(container: &ElementRef<'_>) -> bool {
    parent_element(container)
        .and_then(|parent| closest(&parent, &CONTAINER_SELECTOR))
        .is_some()
}

fn container_lines(container: &ElementRef<'_>) -> Vec<FormLine> {
    let mut lines = Vec::new();

    // Question numbers count every matched group, titled or not.
    for (index, question) in container.select(&QUESTION_SELECTOR).enumerate() {
        let text = question
            .select(&QUESTION_TEXT_SELECTOR)
            .next()
            .map(|el| trimmed_text(&el))
            .unwrap_or_default();
        if !text.is_empty() {
            lines.push(FormLine::Question {
                number: index + 1,
                text,
            });
        }
        for option in question.select(&OPTION_SELECTOR) {
            lines.push(FormLine::Choice {
                label: option_label(&option),
                checked: is_checked(&option),
            });
        }
    }

    for control in container.select(&TEXT_CONTROL_SELECTOR) {
        let label = labelled_by(container, &control)
            .or_else(|| attr(&control, "placeholder").filter(|p| !p.is_empty()).map(str::to_string))
            .or_else(|| attr(&control, "name").map(str::to_string))
            .unwrap_or_default();
        lines.push(FormLine::Field(FormField::new(label, control_value(&control))));
    }

    for select in container.select(&SELECT_SELECTOR) {
        let label = labelled_by(container, &select)
            .or_else(|| attr(&select, "name").map(str::to_string))
            .unwrap_or_default();
        lines.push(FormLine::Field(FormField::new(label, selected_option_text(&select))));
    }

    lines
}

fn option_label(option: &ElementRef<'_>) -> String {
    closest(option, &LABEL_SELECTOR)
        .map(|label| trimmed_text(&label))
        .filter(|text| !text.is_empty())
        .or_else(|| next_element_sibling(option).map(|sib| trimmed_text(&sib)))
        .unwrap_or_default()
}

/// `label[for=id]` within the same container
fn labelled_by(container: &ElementRef<'_>, control: &ElementRef<'_>) -> Option<String> {
    let id = attr(control, "id").filter(|id| !id.is_empty())?;
    container
        .select(&LABEL_SELECTOR)
        .find(|label| attr(label, "for") == Some(id))
        .map(|label| trimmed_text(&label))
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(html: &str) -> Vec<String> {
        extract(&Page::parse(html, None))
            .iter()
            .map(FormBlock::to_markdown)
            .collect()
    }

    #[test]
    fn quiz_questions_and_choices() {
        let html = r#"<div class="quiz">
            <fieldset><legend>Capital of France?</legend>
                <label><input type="radio" name="q1" checked> Paris</label>
                <label><input type="radio" name="q1"> Lyon</label></fieldset>
            <fieldset><legend>Pick primes</legend>
                <input type="checkbox" checked><span>2</span>
                <input type="checkbox"><span>4</span></fieldset>
        </div>"#;
        assert_eq!(
            blocks(html),
            vec![
                "**Q1:** Capital of France?\n  - Paris ✅\n  - Lyon\n**Q2:** Pick primes\n  - 2 ✅\n  - 4"
                    .to_string()
            ]
        );
    }

    #[test]
    fn text_inputs_and_selects() {
        let html = r#"<form>
            <label for="n">Name</label><input type="text" id="n" value="Ada">
            <input type="text" placeholder="Nickname">
            <textarea name="bio"></textarea>
            <label for="c">Color</label>
            <select id="c"><option>Red</option><option selected>Blue</option></select>
        </form>"#;
        assert_eq!(
            blocks(html),
            vec![
                "**Name:** Ada\n**Nickname:** (empty)\n**bio:** (empty)\n**Color:** Blue"
                    .to_string()
            ]
        );
    }

    #[test]
    fn nested_containers_emit_once() {
        let html = r#"<form><div class="question"><p>Why?</p>
            <input type="text" name="why" value="Because"></div></form>"#;
        let out = blocks(html);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0], "**Q1:** Why?\n**why:** Because");
    }

    #[test]
    fn page_without_forms_is_empty() {
        assert!(blocks("<p>No forms here</p>").is_empty());
    }
}
