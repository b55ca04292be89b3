//! Recursive node walk
//!
//! Dispatch order per node: text and comments first, then preformatted
//! passthrough, then nodes that are never rendered (inert tags, hidden
//! nodes, suppressed automation regions), then the per-tag handlers.

use ego_tree::NodeRef;
use scraper::{ElementRef, Node};

use super::MarkdownRenderer;
use super::context::RenderContext;
use super::element_handler::{self, ElementKind};
use crate::page::dom::{attr, is_hidden, tag};
use crate::utils::collapse_whitespace;

impl MarkdownRenderer<'_> {
    /// Render any node of the tree.
    pub(crate) fn render_node(&self, node: NodeRef<'_, Node>, ctx: RenderContext) -> String {
        match node.value() {
            Node::Text(text) => {
                if ctx.in_preformatted {
                    String::from(&**text)
                } else {
                    collapse_whitespace(text)
                }
            }
            Node::Element(_) => ElementRef::wrap(node)
                .map(|el| self.render_element(el, ctx))
                .unwrap_or_default(),
            _ => String::new(),
        }
    }

    /// Concatenate the rendering of every child node.
    pub(crate) fn render_children(&self, el: ElementRef<'_>, ctx: RenderContext) -> String {
        el.children()
            .map(|child| self.render_node(child, ctx))
            .collect()
    }

    pub(crate) fn render_element(&self, el: ElementRef<'_>, ctx: RenderContext) -> String {
        let name = tag(&el);

        if ctx.in_preformatted {
            return if name == "br" {
                "\n".to_string()
            } else {
                self.render_children(el, ctx)
            };
        }

        let kind = ElementKind::classify(name);
        if kind == ElementKind::Inert || is_hidden(&el) {
            return String::new();
        }

        if let Some(automation_id) = attr(&el, "data-automation-id")
            && (self.lexicon.is_field_container(automation_id)
                || self.lexicon.is_suppressed_automation_id(automation_id))
        {
            return String::new();
        }

        element_handler::handle(self, el, ctx, kind)
    }
}
