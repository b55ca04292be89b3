//! Field-level extraction for automation-id driven application forms
//!
//! Fields are `[data-automation-id^="formField-"]` containers grouped by
//! `[role="group"]` sections. A field is attributed to its nearest group
//! only, so nested sub-groups never count a field twice.

use regex::Regex;
use scraper::ElementRef;
use std::collections::HashSet;
use std::sync::LazyLock;

use ego_tree::NodeId;

use super::{FormBlock, FormField, FormLine, NOT_SELECTED};
use crate::config::NoiseLexicon;
use crate::page::dom::{
    attr, child_elements, closest, contains, control_value, document_element, is_checked,
    label_for, next_element_sibling, parent_element, squash_text, tag, text_content, trimmed_text,
};
use crate::static_selector;
use crate::utils::{is_opaque_identifier, split_camel_case, squash};

static_selector!(GROUP_SELECTOR, r#"[role="group"]"#);
static_selector!(AUTOMATION_ID_SELECTOR, "[data-automation-id]");
static_selector!(LABEL_SELECTOR, "label");
static_selector!(LEGEND_SELECTOR, "legend");
static_selector!(RICH_TEXT_P_SELECTOR, r#"[data-automation-id="richText"] p"#);
static_selector!(ARIA_LABELLED_SELECTOR, "button[aria-label], input[aria-label]");
static_selector!(MONTH_SELECTOR, r#"[data-automation-id="dateSectionMonth-input"]"#);
static_selector!(YEAR_SELECTOR, r#"[data-automation-id="dateSectionYear-input"]"#);
static_selector!(SELECTED_ITEM_SELECTOR, r#"[data-automation-id="selectedItem"]"#);
static_selector!(P_SELECTOR, "p");
static_selector!(DROPDOWN_SELECTOR, r#"button[aria-haspopup="listbox"]"#);
static_selector!(CHECKBOX_SELECTOR, r#"input[type="checkbox"], [role="checkbox"]"#);
static_selector!(RADIO_SELECTOR, r#"input[type="radio"]"#);
static_selector!(FILE_NAME_SELECTOR, r#"[data-automation-id="file-upload-item-name"]"#);
static_selector!(DROP_ZONE_SELECTOR, r#"[data-automation-id="file-upload-drop-zone"]"#);
static_selector!(
    TEXT_INPUT_SELECTOR,
    r#"input[type="text"], input[type="email"], input[type="tel"], input[type="number"], textarea"#
);
static_selector!(STATIC_TEXT_SELECTOR, "div, span, p");
static_selector!(EMAIL_LABEL_SELECTOR, r#"label[for="emailAddress"]"#);
static_selector!(DIV_SELECTOR, "div");

static REQUIRED_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(Required|Optional)\s*$").expect("BUG: hardcoded suffix regex is invalid")
});
static TRAILING_REQUIRED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*Required\s*$").expect("BUG: hardcoded required regex is invalid")
});
static PRESS_DELETE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r", press delete.*$").expect("BUG: hardcoded chip suffix regex is invalid")
});
static ITEMS_SELECTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"items? selected").expect("BUG: hardcoded selection count regex is invalid")
});
static EMAIL_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bEmail\b").expect("BUG: hardcoded email regex is invalid")
});

type LabelRule = fn(&ElementRef<'_>, &str) -> Option<String>;
type ValueRule = fn(&ElementRef<'_>, &str) -> Option<String>;

/// Label sources, most explicit first. The `&str` is the field's
/// automation id with the container prefix removed.
const LABEL_RULES: &[LabelRule] = &[
    label_from_label_element,
    label_from_legend,
    label_from_rich_text,
    label_from_aria,
    label_from_automation_id,
];

/// Value sources, most specific widget first. The `&str` is the
/// resolved label, which static text must not echo back.
const VALUE_RULES: &[ValueRule] = &[
    value_from_date_spinners,
    value_from_selected_items,
    value_from_dropdown,
    value_from_checkbox,
    value_from_radios,
    value_from_file_upload,
    value_from_text_input,
    value_from_static_text,
];

pub(super) fn extract(root: ElementRef<'_>, lexicon: &NoiseLexicon) -> Option<FormBlock> {
    let fields: Vec<ElementRef<'_>> = root
        .select(&AUTOMATION_ID_SELECTOR)
        .filter(|el| attr(el, "data-automation-id").is_some_and(|id| lexicon.is_field_container(id)))
        .collect();
    let groups: Vec<ElementRef<'_>> = root.select(&GROUP_SELECTOR).collect();

    let has_top_groups = groups.iter().any(|group| {
        parent_element(group)
            .and_then(|parent| closest(&parent, &GROUP_SELECTOR))
            .is_none_or(|outer| !contains(&root, &outer))
    });

    let mut lines = Vec::new();
    let mut processed: HashSet<NodeId> = HashSet::new();

    if !has_top_groups && !fields.is_empty() {
        for field in &fields {
            push_field(&mut lines, field, lexicon);
        }
    } else {
        for group in &groups {
            let heading = section_heading(group);
            let direct: Vec<&ElementRef<'_>> = fields
                .iter()
                .filter(|f| contains(group, f))
                .filter(|f| !processed.contains(&f.id()))
                .filter(|f| closest(f, &GROUP_SELECTOR).is_some_and(|g| g.id() == group.id()))
                .collect();

            if let Some(heading) = heading
                && !direct.is_empty()
            {
                lines.push(FormLine::Heading(heading));
            }
            for field in direct {
                processed.insert(field.id());
                push_field(&mut lines, field, lexicon);
            }
        }

        for field in &fields {
            if processed.insert(field.id()) {
                push_field(&mut lines, field, lexicon);
            }
        }
    }

    if let Some(email) = email_fallback(&root, &lines) {
        lines.push(FormLine::Field(email));
    }

    (!lines.is_empty()).then_some(FormBlock { lines })
}

fn push_field(lines: &mut Vec<FormLine>, field: &ElementRef<'_>, lexicon: &NoiseLexicon) {
    let label = field_label(field, lexicon);
    if label.is_empty() {
        return;
    }
    let value = field_value(field, &label);
    lines.push(FormLine::Field(FormField::new(label, value)));
}

/// An `h3`/`h4` that is a direct child of the group or of one of its
/// direct `div` children, in document order.
fn section_heading(group: &ElementRef<'_>) -> Option<String> {
    let is_heading = |el: &ElementRef<'_>| matches!(tag(el), "h3" | "h4");
    child_elements(group)
        .find_map(|child| {
            if is_heading(&child) {
                Some(child)
            } else if tag(&child) == "div" {
                child_elements(&child).find(is_heading)
            } else {
                None
            }
        })
        .map(|h| squash_text(&h))
        .filter(|h| !h.is_empty())
}

#[must_use]
pub(super) fn field_label(field: &ElementRef<'_>, lexicon: &NoiseLexicon) -> String {
    let automation_id = attr(field, "data-automation-id").unwrap_or("");
    let id_part = automation_id
        .strip_prefix(lexicon.field_container_prefix.as_str())
        .unwrap_or(automation_id);

    let raw = LABEL_RULES
        .iter()
        .find_map(|rule| rule(field, id_part).filter(|l| !l.is_empty()))
        .unwrap_or_default();

    let cleaned = raw.trim_end_matches('*');
    let cleaned = TRAILING_REQUIRED.replace(cleaned, "");
    squash(&cleaned)
}

fn label_from_label_element(field: &ElementRef<'_>, _: &str) -> Option<String> {
    field.select(&LABEL_SELECTOR).next().map(|l| trimmed_text(&l))
}

fn label_from_legend(field: &ElementRef<'_>, _: &str) -> Option<String> {
    let legend = field.select(&LEGEND_SELECTOR).next()?;
    legend
        .select(&RICH_TEXT_P_SELECTOR)
        .next()
        .map(|p| trimmed_text(&p))
        .filter(|t| !t.is_empty())
        .or_else(|| Some(trimmed_text(&legend)))
}

fn label_from_rich_text(field: &ElementRef<'_>, _: &str) -> Option<String> {
    field.select(&RICH_TEXT_P_SELECTOR).next().map(|p| trimmed_text(&p))
}

/// `aria-label` reads like "Language English Required": drop the
/// requirement suffix, then the control's own text.
fn label_from_aria(field: &ElementRef<'_>, _: &str) -> Option<String> {
    let control = field.select(&ARIA_LABELLED_SELECTOR).next()?;
    let aria = attr(&control, "aria-label").unwrap_or("");
    let mut label = REQUIRED_SUFFIX.replace(aria, "").trim().to_string();
    let own_text = trimmed_text(&control);
    if !own_text.is_empty()
        && let Some(stripped) = label.strip_suffix(own_text.as_str())
    {
        label = stripped.trim().to_string();
    }
    Some(label)
}

fn label_from_automation_id(_: &ElementRef<'_>, id_part: &str) -> Option<String> {
    if id_part.is_empty() || is_opaque_identifier(id_part) {
        return None;
    }
    Some(split_camel_case(&id_part.replace("--", " ")))
}

#[must_use]
pub(super) fn field_value(field: &ElementRef<'_>, label: &str) -> String {
    VALUE_RULES
        .iter()
        .find_map(|rule| rule(field, label))
        .unwrap_or_default()
}

fn spinner_text(el: &ElementRef<'_>) -> String {
    attr(el, "aria-valuetext")
        .filter(|v| !v.is_empty())
        .map_or_else(|| trimmed_text(el), str::to_string)
}

fn value_from_date_spinners(field: &ElementRef<'_>, _: &str) -> Option<String> {
    let month = field.select(&MONTH_SELECTOR).next()?;
    let year = field.select(&YEAR_SELECTOR).next()?;
    let (m, y) = (spinner_text(&month), spinner_text(&year));
    Some(if m.is_empty() || y.is_empty() {
        String::new()
    } else {
        format!("{m}/{y}")
    })
}

fn value_from_selected_items(field: &ElementRef<'_>, _: &str) -> Option<String> {
    let values: Vec<String> = field
        .select(&SELECTED_ITEM_SELECTOR)
        .filter_map(|item| {
            let from_p = item
                .select(&P_SELECTOR)
                .next()
                .map(|p| trimmed_text(&p))
                .filter(|t| !t.is_empty());
            let value = from_p
                .unwrap_or_else(|| PRESS_DELETE.replace(&trimmed_text(&item), "").into_owned());
            (!value.is_empty()).then_some(value)
        })
        .collect();
    (!values.is_empty()).then(|| values.join(", "))
}

fn value_from_dropdown(field: &ElementRef<'_>, _: &str) -> Option<String> {
    let button = field.select(&DROPDOWN_SELECTOR).next()?;
    match trimmed_text(&button).as_str() {
        "" => None,
        "Select One" => Some(NOT_SELECTED.to_string()),
        text => Some(text.to_string()),
    }
}

fn value_from_checkbox(field: &ElementRef<'_>, _: &str) -> Option<String> {
    let checkbox = field.select(&CHECKBOX_SELECTOR).next()?;
    Some(if is_checked(&checkbox) { "☑ Yes" } else { "☐ No" }.to_string())
}

fn value_from_radios(field: &ElementRef<'_>, _: &str) -> Option<String> {
    let radios: Vec<ElementRef<'_>> = field.select(&RADIO_SELECTOR).collect();
    if radios.is_empty() {
        return None;
    }
    let Some(checked) = radios.iter().find(|r| is_checked(r)) else {
        return Some(NOT_SELECTED.to_string());
    };
    let label = attr(checked, "id")
        .and_then(|id| label_for(checked, id))
        .map(|l| trimmed_text(&l))
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| attr(checked, "value").unwrap_or("").to_string());
    Some(match label.as_str() {
        "true" => "Yes".to_string(),
        "false" => "No".to_string(),
        _ => label,
    })
}

fn value_from_file_upload(field: &ElementRef<'_>, _: &str) -> Option<String> {
    if let Some(name_el) = field.select(&FILE_NAME_SELECTOR).next() {
        let name = trimmed_text(&name_el);
        let size = parent_element(&name_el)
            .and_then(|parent| next_element_sibling(&parent))
            .map(|sib| trimmed_text(&sib))
            .unwrap_or_default();
        return Some(if size.is_empty() {
            name
        } else {
            format!("{name} ({size})")
        });
    }
    field
        .select(&DROP_ZONE_SELECTOR)
        .next()
        .map(|_| "(no file uploaded)".to_string())
}

fn value_from_text_input(field: &ElementRef<'_>, _: &str) -> Option<String> {
    if field.select(&DROPDOWN_SELECTOR).next().is_some() {
        return None;
    }
    let input = field.select(&TEXT_INPUT_SELECTOR).next()?;
    let raw = control_value(&input);
    (!raw.is_empty() && !is_opaque_identifier(&raw) && raw != "Search").then_some(raw)
}

/// First leaf text that is not the label or form boilerplate
fn value_from_static_text(field: &ElementRef<'_>, label: &str) -> Option<String> {
    let label_text = field
        .select(&LABEL_SELECTOR)
        .next()
        .map(|l| trimmed_text(&l))
        .unwrap_or_default();
    field
        .select(&STATIC_TEXT_SELECTOR)
        .filter(|el| child_elements(el).next().is_none())
        .map(|el| trimmed_text(&el))
        .find(|t| {
            !t.is_empty()
                && *t != label_text
                && t != label
                && !t.contains("Indicates a required")
                && t != "*"
                && !t.contains("press delete")
                && !ITEMS_SELECTED.is_match(t)
        })
}

/// Email shown as static text next to its label rather than in a field
fn email_fallback(root: &ElementRef<'_>, lines: &[FormLine]) -> Option<FormField> {
    if lines.iter().any(|line| EMAIL_WORD.is_match(&line.to_markdown())) {
        return None;
    }
    let document = document_element(root);
    let label = document.select(&EMAIL_LABEL_SELECTOR).next()?;
    let container = parent_element(&label).and_then(|p| closest(&p, &DIV_SELECTOR))?;
    let label_text = text_content(&label);
    let email = text_content(&container)
        .replacen(&label_text, "", 1)
        .trim()
        .to_string();
    (!email.is_empty()).then(|| FormField::new("Email Address", email))
}
