//! Transcript extraction for video lesson pages
//!
//! Strategies are tried in order and the first non-empty result wins:
//! a "Transcript" heading and its surrounding container, a run of
//! jump-to-timestamp buttons, then the embedded `__NEXT_DATA__` payload.

use ego_tree::NodeRef;
use scraper::{ElementRef, Node};
use serde::Serialize;
use serde_json::Value;

use crate::config::NoiseLexicon;
use crate::page::Page;
use crate::page::dom::{node_text, parent_element, squash_text, tag, text_content};
use crate::static_selector;
use crate::utils::{
    MIN_TIMESTAMP_CONTROLS, MIN_TRANSCRIPT_CONTAINER_LEN, MIN_TRANSCRIPT_LEN,
    TRANSCRIPT_ANCESTOR_DEPTH, collapse_whitespace,
};

static_selector!(TRANSCRIPT_HEADING_SELECTOR, r#"h3, h4, [class*="transcript"]"#);
static_selector!(
    TIMESTAMP_BUTTON_SELECTOR,
    r#"button[class*="timestamp"], button[aria-label*="Jump"]"#
);
static_selector!(NEXT_DATA_SELECTOR, "script#__NEXT_DATA__");

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptSegment {
    pub timestamp: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TranscriptResult {
    Text(String),
    Segments(Vec<TranscriptSegment>),
}

impl TranscriptResult {
    /// Markdown body for the transcript section
    #[must_use]
    pub fn to_markdown(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Segments(segments) => segments
                .iter()
                .map(|s| format!("**[{}]** {}", s.timestamp, s.text))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Segments(segments) => segments.is_empty(),
        }
    }
}

type Strategy = fn(&Page, &NoiseLexicon) -> Option<TranscriptResult>;

const STRATEGIES: &[Strategy] = &[from_heading, from_timestamp_buttons, from_next_data];

/// Best-effort transcript; `None` omits the section.
#[must_use]
pub fn extract_transcript(page: &Page, lexicon: &NoiseLexicon) -> Option<TranscriptResult> {
    let found = STRATEGIES
        .iter()
        .find_map(|strategy| strategy(page, lexicon).filter(|t| !t.is_empty()));
    if found.is_none() {
        tracing::debug!("No transcript found");
    }
    found
}

fn is_transcript_label(el: &ElementRef<'_>) -> bool {
    text_content(el).trim().eq_ignore_ascii_case("transcript")
}

fn from_heading(page: &Page, lexicon: &NoiseLexicon) -> Option<TranscriptResult> {
    for heading in page.select_all(&TRANSCRIPT_HEADING_SELECTOR) {
        if !is_transcript_label(&heading) {
            continue;
        }

        let mut container = parent_element(&heading);
        for _ in 0..TRANSCRIPT_ANCESTOR_DEPTH {
            match container {
                Some(c) if text_content(&c).chars().count() > MIN_TRANSCRIPT_CONTAINER_LEN => break,
                Some(c) => container = parent_element(&c),
                None => break,
            }
        }
        let Some(container) = container else {
            continue;
        };

        let mut fragments = Vec::new();
        collect_transcript_text(*container, &heading, lexicon, &mut fragments);
        let text = collapse_whitespace(&fragments.join(" ")).trim().to_string();
        if text.chars().count() > MIN_TRANSCRIPT_LEN {
            return Some(TranscriptResult::Text(text));
        }
    }
    None
}

/// Depth-first text collection that skips control subtrees and the label
/// that triggered the search.
fn collect_transcript_text(
    node: NodeRef<'_, Node>,
    trigger: &ElementRef<'_>,
    lexicon: &NoiseLexicon,
    out: &mut Vec<String>,
) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => {
                let text = text.trim();
                if !text.is_empty() && !lexicon.is_transcript_boilerplate(text) {
                    out.push(text.to_string());
                }
            }
            Node::Element(_) => {
                let Some(el) = ElementRef::wrap(child) else {
                    continue;
                };
                let rejected = el.id() == trigger.id()
                    || matches!(tag(&el), "button" | "select" | "option")
                    || (tag(&el) == "h3" && is_transcript_label(&el));
                if !rejected {
                    collect_transcript_text(child, trigger, lexicon, out);
                }
            }
            _ => {}
        }
    }
}

fn from_timestamp_buttons(page: &Page, _lexicon: &NoiseLexicon) -> Option<TranscriptResult> {
    let buttons: Vec<ElementRef<'_>> = page.select_all(&TIMESTAMP_BUTTON_SELECTOR).collect();
    if buttons.len() <= MIN_TIMESTAMP_CONTROLS {
        return None;
    }

    let segments: Vec<TranscriptSegment> = buttons
        .iter()
        .filter_map(|button| {
            let text = button
                .next_sibling()
                .map(|sibling| node_text(sibling).trim().to_string())
                .unwrap_or_default();
            (!text.is_empty()).then(|| TranscriptSegment {
                timestamp: squash_text(button),
                text,
            })
        })
        .collect();

    (!segments.is_empty()).then_some(TranscriptResult::Segments(segments))
}

fn from_next_data(page: &Page, _lexicon: &NoiseLexicon) -> Option<TranscriptResult> {
    let script = page.select_first(&NEXT_DATA_SELECTOR)?;
    let data: Value = match serde_json::from_str(&text_content(&script)) {
        Ok(data) => data,
        Err(e) => {
            tracing::debug!(error = %e, "Unparsable __NEXT_DATA__ payload");
            return None;
        }
    };

    let queries = data
        .pointer("/props/pageProps/trpcState/json/queries")?
        .as_array()?;
    queries.iter().find_map(|query| {
        let payload = query.pointer("/state/data/json")?;
        ["transcript", "subtitles"]
            .iter()
            .filter_map(|key| payload.get(*key))
            .find_map(transcript_from_value)
    })
}

/// A payload field is either a plain string or a list of timed cues.
fn transcript_from_value(value: &Value) -> Option<TranscriptResult> {
    match value {
        Value::String(text) if !text.trim().is_empty() => {
            Some(TranscriptResult::Text(text.clone()))
        }
        Value::Array(cues) => {
            let segments: Vec<TranscriptSegment> = cues
                .iter()
                .filter_map(|cue| {
                    let text = cue.get("text")?.as_str()?.trim().to_string();
                    let timestamp = ["timestamp", "start", "time"]
                        .iter()
                        .find_map(|key| cue.get(*key))
                        .map(|t| match t {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .unwrap_or_default();
                    (!text.is_empty()).then_some(TranscriptSegment { timestamp, text })
                })
                .collect();
            (!segments.is_empty()).then_some(TranscriptResult::Segments(segments))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(html: &str) -> Option<TranscriptResult> {
        extract_transcript(&Page::parse(html, None), &NoiseLexicon::default())
    }

    #[test]
    fn heading_strategy_filters_controls() {
        let body = "This lesson explains ownership in depth. ".repeat(15);
        let html = format!(
            "<section><h3>Transcript</h3><button>Jump to 0:10</button>\
             <select><option>English</option></select><div><p>{body}</p><span>English</span></div></section>"
        );
        let Some(TranscriptResult::Text(text)) = transcript(&html) else {
            panic!("expected text transcript");
        };
        assert!(text.starts_with("This lesson explains ownership"));
        assert!(!text.contains("Transcript"));
        assert!(!text.contains("Jump to"));
        assert!(!text.contains("English"));
    }

    #[test]
    fn short_transcripts_are_rejected() {
        assert_eq!(transcript("<div><h4>Transcript</h4><p>Too short.</p></div>"), None);
    }

    #[test]
    fn timestamp_buttons_pair_with_following_text() {
        let mut html = String::from("<div>");
        for i in 0..6 {
            html.push_str(&format!(
                "<p><button class=\"timestamp\">0:0{i}</button>Line {i}</p>"
            ));
        }
        html.push_str("</div>");
        let result = transcript(&html).expect("segments");
        let markdown = result.to_markdown();
        assert!(markdown.starts_with("**[0:00]** Line 0\n**[0:01]** Line 1"));
        assert_eq!(markdown.lines().count(), 6);
    }

    #[test]
    fn five_buttons_are_not_enough() {
        let html: String = (0..5)
            .map(|i| format!("<p><button class=\"timestamp\">0:0{i}</button>Line {i}</p>"))
            .collect();
        assert_eq!(transcript(&html), None);
    }

    #[test]
    fn next_data_payload() {
        let html = r#"<script id="__NEXT_DATA__" type="application/json">
            {"props":{"pageProps":{"trpcState":{"json":{"queries":[
                {"state":{"data":{"json":{"title":"x"}}}},
                {"state":{"data":{"json":{"subtitles":"Welcome to the course."}}}}
            ]}}}}}</script>"#;
        assert_eq!(
            transcript(html),
            Some(TranscriptResult::Text("Welcome to the course.".to_string()))
        );
    }

    #[test]
    fn next_data_cues() {
        let html = r#"<script id="__NEXT_DATA__" type="application/json">
            {"props":{"pageProps":{"trpcState":{"json":{"queries":[
                {"state":{"data":{"json":{"transcript":[{"start":"0:01","text":"Hi"},{"start":"0:04","text":"there"}]}}}}
            ]}}}}}</script>"#;
        assert_eq!(
            transcript(html).map(|t| t.to_markdown()).as_deref(),
            Some("**[0:01]** Hi\n**[0:04]** there")
        );
    }
}
