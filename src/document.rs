//! Document Tree
//!
//! The compiled form of a documentation page: an ordered sequence of blocks
//! holding inline runs. Built once when content is loaded and never mutated
//! afterwards, so rendering the same document twice yields identical output.

use std::fmt::Write;

/// Where a link points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkTarget {
    /// A documentation route resolved by this site's own router.
    Internal(String),
    /// A full URL outside the site.
    External(String),
    /// An in-page fragment (`#section`).
    Anchor(String),
}

/// Inline content within a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Link {
        target: LinkTarget,
        children: Vec<Inline>,
    },
}

/// Block-level content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: u8,
        /// Slug derived from the heading text, used for deep links.
        id: String,
        children: Vec<Inline>,
    },
    Paragraph(Vec<Inline>),
    List {
        ordered: bool,
        items: Vec<Vec<Inline>>,
    },
}

/// A compiled documentation page body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    /// Serialize the document to HTML in page order.
    ///
    /// Headings carry their slug as the element id and a `#` header-anchor
    /// link prefix, so in-page deep links keep working for readers arriving
    /// from the old generated pages.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            push_block(&mut out, block);
        }
        out
    }
}

/// Derive a URL-safe anchor identifier from heading text.
///
/// Lowercases, keeps alphanumerics, and collapses every other run of
/// characters into a single hyphen. Deterministic: the same text always
/// produces the same slug.
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            for lower in c.to_lowercase() {
                out.push(lower);
            }
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Flatten inline content to its plain text, dropping markup.
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    collect_text(inlines, &mut out);
    out
}

fn collect_text(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(t) => out.push_str(t),
            Inline::Strong(children) | Inline::Emphasis(children) => {
                collect_text(children, out);
            }
            Inline::Link { children, .. } => collect_text(children, out),
        }
    }
}

fn push_block(out: &mut String, block: &Block) {
    match block {
        Block::Heading { level, id, children } => {
            let level = (*level).clamp(1, 6);
            let _ = write!(
                out,
                "<h{level} id=\"{id}\"><a class=\"header-anchor\" href=\"#{id}\">#</a> "
            );
            push_inlines(out, children);
            let _ = write!(out, "</h{level}>");
        }
        Block::Paragraph(children) => {
            out.push_str("<p>");
            push_inlines(out, children);
            out.push_str("</p>");
        }
        Block::List { ordered, items } => {
            out.push_str(if *ordered { "<ol>" } else { "<ul>" });
            for item in items {
                out.push_str("<li>");
                push_inlines(out, item);
                out.push_str("</li>");
            }
            out.push_str(if *ordered { "</ol>" } else { "</ul>" });
        }
    }
}

fn push_inlines(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        match inline {
            Inline::Text(t) => push_escaped(out, t),
            Inline::Strong(children) => {
                out.push_str("<strong>");
                push_inlines(out, children);
                out.push_str("</strong>");
            }
            Inline::Emphasis(children) => {
                out.push_str("<em>");
                push_inlines(out, children);
                out.push_str("</em>");
            }
            Inline::Link { target, children } => {
                match target {
                    LinkTarget::Internal(route) => {
                        out.push_str("<a href=\"");
                        push_escaped(out, route);
                        out.push_str("\">");
                    }
                    LinkTarget::External(url) => {
                        out.push_str("<a href=\"");
                        push_escaped(out, url);
                        out.push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
                    }
                    LinkTarget::Anchor(fragment) => {
                        out.push_str("<a href=\"#");
                        push_escaped(out, fragment);
                        out.push_str("\">");
                    }
                }
                push_inlines(out, children);
                out.push_str("</a>");
            }
        }
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_matches_generated_anchor_ids() {
        assert_eq!(slug("Proposal Types"), "proposal-types");
        assert_eq!(slug("Drafting a Proposal"), "drafting-a-proposal");
    }

    #[test]
    fn slug_is_idempotent() {
        let first = slug("Drafting a Proposal");
        assert_eq!(slug(&first), first);
    }

    #[test]
    fn slug_collapses_punctuation_runs() {
        assert_eq!(slug("IBC -- Client   Update!"), "ibc-client-update");
        assert_eq!(slug("  Edge  "), "edge");
    }

    #[test]
    fn heading_renders_with_anchor_prefix() {
        let doc = Document {
            blocks: vec![Block::Heading {
                level: 1,
                id: slug("Proposal Types"),
                children: vec![Inline::Text("Proposal Types".into())],
            }],
        };
        assert_eq!(
            doc.to_html(),
            "<h1 id=\"proposal-types\"><a class=\"header-anchor\" \
             href=\"#proposal-types\">#</a> Proposal Types</h1>"
        );
    }

    #[test]
    fn internal_links_render_as_plain_hrefs() {
        let doc = Document {
            blocks: vec![Block::List {
                ordered: false,
                items: vec![vec![Inline::Link {
                    target: LinkTarget::Internal("/governance/process".into()),
                    children: vec![Inline::Strong(vec![Inline::Text("Text".into())])],
                }]],
            }],
        };
        assert_eq!(
            doc.to_html(),
            "<ul><li><a href=\"/governance/process\"><strong>Text</strong></a></li></ul>"
        );
    }

    #[test]
    fn text_is_html_escaped() {
        let doc = Document {
            blocks: vec![Block::Paragraph(vec![Inline::Text("a < b & c".into())])],
        };
        assert_eq!(doc.to_html(), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn rendering_is_deterministic() {
        let doc = Document {
            blocks: vec![Block::Paragraph(vec![Inline::Text("stable".into())])],
        };
        assert_eq!(doc.to_html(), doc.to_html());
    }
}
