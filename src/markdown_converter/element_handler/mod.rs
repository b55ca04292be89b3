//! Per-tag Markdown handlers
//!
//! `ElementKind` is the closed set of tags with their own rendering rule;
//! everything else is a `Container` that renders its children, wrapped in
//! newlines when the tag is block-level.

mod anchor;
mod block;
mod code;
mod controls;
mod definition_list;
mod details;
mod headings;
mod img;
mod inline;
mod list;
mod math;
mod media;
mod table;

use scraper::ElementRef;

use super::MarkdownRenderer;
use super::context::RenderContext;

pub use code::language_from_class;
pub use inline::InlineWrapper;

/// Tags that never contribute text
pub const INERT_TAGS: &[&str] = &[
    "script", "style", "noscript", "svg", "canvas", "template", "head",
];

/// Generic containers that force block separation
pub const BLOCK_CONTAINER_TAGS: &[&str] = &[
    "div", "section", "article", "aside", "header", "footer", "main", "nav", "details", "dialog",
    "fieldset", "form",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Inert,
    Button,
    /// `select` and `option`; their state belongs to the form extractor
    Choice,
    Input,
    Label,
    Heading(usize),
    Paragraph,
    Blockquote,
    LineBreak,
    Rule,
    Inline(InlineWrapper),
    Abbr,
    Code,
    Pre,
    Anchor,
    Image,
    Picture,
    Figure,
    List { ordered: bool },
    ListItem,
    DefinitionList,
    Term,
    Definition,
    Table,
    Details,
    Summary,
    Video,
    Audio,
    Iframe,
    Math,
    Container { block: bool },
}

impl ElementKind {
    #[must_use]
    pub fn classify(tag: &str) -> Self {
        match tag {
            t if INERT_TAGS.contains(&t) => Self::Inert,
            "button" => Self::Button,
            "select" | "option" => Self::Choice,
            "input" => Self::Input,
            "label" => Self::Label,
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "h6" => Self::Heading(6),
            "p" => Self::Paragraph,
            "blockquote" => Self::Blockquote,
            "br" => Self::LineBreak,
            "hr" => Self::Rule,
            "strong" | "b" => Self::Inline(InlineWrapper::Strong),
            "em" | "i" => Self::Inline(InlineWrapper::Emphasis),
            "u" => Self::Inline(InlineWrapper::Underline),
            "s" | "del" => Self::Inline(InlineWrapper::Strike),
            "mark" => Self::Inline(InlineWrapper::Highlight),
            "sup" => Self::Inline(InlineWrapper::Superscript),
            "sub" => Self::Inline(InlineWrapper::Subscript),
            "kbd" => Self::Inline(InlineWrapper::Keyboard),
            "abbr" => Self::Abbr,
            "code" => Self::Code,
            "pre" => Self::Pre,
            "a" => Self::Anchor,
            "img" => Self::Image,
            "picture" => Self::Picture,
            "figure" => Self::Figure,
            "ul" => Self::List { ordered: false },
            "ol" => Self::List { ordered: true },
            "li" => Self::ListItem,
            "dl" => Self::DefinitionList,
            "dt" => Self::Term,
            "dd" => Self::Definition,
            "table" => Self::Table,
            "details" => Self::Details,
            "summary" => Self::Summary,
            "video" => Self::Video,
            "audio" => Self::Audio,
            "iframe" => Self::Iframe,
            "math" => Self::Math,
            t => Self::Container {
                block: BLOCK_CONTAINER_TAGS.contains(&t),
            },
        }
    }
}

/// Render a visible, non-suppressed element according to its kind.
pub(crate) fn handle(
    renderer: &MarkdownRenderer<'_>,
    el: ElementRef<'_>,
    ctx: RenderContext,
    kind: ElementKind,
) -> String {
    match kind {
        ElementKind::Inert | ElementKind::Choice | ElementKind::Summary => String::new(),
        ElementKind::Button => controls::button_handler(renderer, el, ctx),
        ElementKind::Input => controls::input_handler(renderer, el),
        ElementKind::Label => controls::label_handler(renderer, el, ctx),
        ElementKind::ListItem => renderer.render_children(el, ctx),
        ElementKind::Heading(level) => headings::heading_handler(renderer, el, ctx, level),
        ElementKind::Paragraph => block::paragraph_handler(renderer, el, ctx),
        ElementKind::Blockquote => block::blockquote_handler(renderer, el, ctx),
        ElementKind::LineBreak => "\n".to_string(),
        ElementKind::Rule => "\n\n---\n\n".to_string(),
        ElementKind::Inline(wrapper) => inline::inline_handler(renderer, el, ctx, wrapper),
        ElementKind::Abbr => inline::abbr_handler(renderer, el, ctx),
        ElementKind::Code => code::code_handler(el),
        ElementKind::Pre => code::pre_handler(renderer, el, ctx),
        ElementKind::Anchor => anchor::anchor_handler(renderer, el, ctx),
        ElementKind::Image => img::img_handler(renderer, el),
        ElementKind::Picture => img::picture_handler(renderer, el),
        ElementKind::Figure => img::figure_handler(renderer, el),
        ElementKind::List { ordered } => list::list_handler(renderer, el, ctx, ordered),
        ElementKind::DefinitionList => definition_list::dl_handler(renderer, el, ctx),
        ElementKind::Term => definition_list::dt_handler(renderer, el, ctx),
        ElementKind::Definition => definition_list::dd_handler(renderer, el, ctx),
        ElementKind::Table => table::table_handler(renderer, el, ctx),
        ElementKind::Details => details::details_handler(renderer, el, ctx),
        ElementKind::Video => media::video_handler(renderer, el),
        ElementKind::Audio => media::audio_handler(renderer, el),
        ElementKind::Iframe => media::iframe_handler(renderer, el),
        ElementKind::Math => math::math_handler(el),
        ElementKind::Container { block } => container_handler(renderer, el, ctx, block),
    }
}

fn container_handler(
    renderer: &MarkdownRenderer<'_>,
    el: ElementRef<'_>,
    ctx: RenderContext,
    block: bool,
) -> String {
    if let Some(tex) = math::library_container_handler(renderer, el) {
        return tex;
    }
    if math::is_library_artifact(renderer, el) {
        return String::new();
    }

    let inner = renderer.render_children(el, ctx);
    if block {
        format!("\n{inner}\n")
    } else {
        inner
    }
}
