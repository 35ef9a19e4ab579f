//! Markdown Compiler Front-End
//!
//! Turns an authored markdown body into a [`Document`] tree. Heading slugs
//! and internal link routes are fixed here, at compile time, so the resulting
//! tree is a pure value with no runtime dependencies left.
//!
//! Relative links follow the wiki's authoring convention: targets are other
//! markdown files, resolved against the page's directory, with `README.md`
//! acting as the directory index. `./text-prop.md` on the
//! `/governance/proposal-types` page becomes the
//! `/governance/proposal-types/text-prop` route.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::document::{plain_text, slug, Block, Document, Inline, LinkTarget};

/// Compile a markdown body into a document tree.
///
/// `base_dir` is the route of the directory the source file lives in, used to
/// resolve relative links. Total: malformed or unsupported constructs degrade
/// to plain text rather than failing.
pub fn compile(base_dir: &str, source: &str) -> Document {
    let parser = Parser::new_ext(source, Options::all());
    let mut compiler = Compiler::new(base_dir);
    for event in parser {
        compiler.event(event);
    }
    compiler.finish()
}

/// Resolve a markdown link destination to a concrete target.
pub fn resolve_link(base_dir: &str, dest: &str) -> LinkTarget {
    if let Some(fragment) = dest.strip_prefix('#') {
        return LinkTarget::Anchor(fragment.to_string());
    }
    if dest.contains("://") || dest.starts_with("mailto:") {
        return LinkTarget::External(dest.to_string());
    }

    let (path, fragment) = match dest.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (dest, None),
    };

    // Absolute destinations stand alone; relative ones start from the
    // page's directory.
    let mut segments: Vec<&str> = if path.starts_with('/') {
        Vec::new()
    } else {
        base_dir.split('/').filter(|s| !s.is_empty()).collect()
    };

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    // Strip the source extension; README is the directory index.
    if let Some(last) = segments.pop() {
        let trimmed = last
            .strip_suffix(".md")
            .or_else(|| last.strip_suffix(".html"))
            .unwrap_or(last);
        if !trimmed.is_empty() && trimmed != "README" {
            segments.push(trimmed);
        }
    }

    let mut route = format!("/{}", segments.join("/"));
    if let Some(fragment) = fragment {
        route.push('#');
        route.push_str(fragment);
    }
    LinkTarget::Internal(route)
}

/// Open inline container awaiting its end tag.
enum Frame {
    Strong,
    Emphasis,
    Link(LinkTarget),
}

struct Compiler<'a> {
    base_dir: &'a str,
    blocks: Vec<Block>,
    inlines: Vec<Inline>,
    frames: Vec<(Frame, Vec<Inline>)>,
    list: Option<ListBuilder>,
    list_depth: usize,
    item: Option<Vec<Inline>>,
}

struct ListBuilder {
    ordered: bool,
    items: Vec<Vec<Inline>>,
}

impl<'a> Compiler<'a> {
    fn new(base_dir: &'a str) -> Self {
        Self {
            base_dir,
            blocks: Vec::new(),
            inlines: Vec::new(),
            frames: Vec::new(),
            list: None,
            list_depth: 0,
            item: None,
        }
    }

    fn finish(mut self) -> Document {
        // Stray inline content with no closed block becomes a paragraph.
        if !self.inlines.is_empty() {
            let children = std::mem::take(&mut self.inlines);
            self.blocks.push(Block::Paragraph(children));
        }
        Document { blocks: self.blocks }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) | Event::Code(text) => {
                self.sink().push(Inline::Text(text.to_string()));
            }
            Event::SoftBreak | Event::HardBreak => {
                self.sink().push(Inline::Text(" ".to_string()));
            }
            // Raw HTML, footnotes, task markers and the rest have no place
            // in the wiki content model.
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Strong => self.frames.push((Frame::Strong, Vec::new())),
            Tag::Emphasis => self.frames.push((Frame::Emphasis, Vec::new())),
            Tag::Link { dest_url, .. } => {
                let target = resolve_link(self.base_dir, &dest_url);
                self.frames.push((Frame::Link(target), Vec::new()));
            }
            Tag::List(start) => {
                self.list_depth += 1;
                if self.list_depth == 1 {
                    self.list = Some(ListBuilder {
                        ordered: start.is_some(),
                        items: Vec::new(),
                    });
                }
            }
            Tag::Item => {
                if self.list_depth == 1 {
                    self.item = Some(Vec::new());
                }
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if self.item.is_some() {
                    // Loose list item: keep its paragraphs as one inline run.
                    self.separate_item();
                } else if !self.inlines.is_empty() {
                    let children = std::mem::take(&mut self.inlines);
                    self.blocks.push(Block::Paragraph(children));
                }
            }
            TagEnd::Heading(level) => {
                let children = std::mem::take(&mut self.inlines);
                let id = slug(&plain_text(&children));
                self.blocks.push(Block::Heading {
                    level: heading_level(level),
                    id,
                    children,
                });
            }
            TagEnd::List(_) => {
                self.list_depth = self.list_depth.saturating_sub(1);
                if self.list_depth == 0 {
                    if let Some(list) = self.list.take() {
                        self.blocks.push(Block::List {
                            ordered: list.ordered,
                            items: list.items,
                        });
                    }
                }
            }
            TagEnd::Item => {
                if self.list_depth == 1 {
                    if let (Some(item), Some(list)) = (self.item.take(), self.list.as_mut()) {
                        list.items.push(item);
                    }
                }
            }
            TagEnd::Strong | TagEnd::Emphasis | TagEnd::Link => {
                if let Some((frame, children)) = self.frames.pop() {
                    let inline = match frame {
                        Frame::Strong => Inline::Strong(children),
                        Frame::Emphasis => Inline::Emphasis(children),
                        Frame::Link(target) => Inline::Link { target, children },
                    };
                    self.sink().push(inline);
                }
            }
            _ => {}
        }
    }

    /// Current destination for inline content: the innermost open container,
    /// then the open list item, then the open block.
    fn sink(&mut self) -> &mut Vec<Inline> {
        if let Some((_, children)) = self.frames.last_mut() {
            children
        } else if let Some(item) = self.item.as_mut() {
            item
        } else {
            &mut self.inlines
        }
    }

    fn separate_item(&mut self) {
        if let Some(item) = self.item.as_mut() {
            if !item.is_empty() {
                item.push(Inline::Text(" ".to_string()));
            }
        }
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "/governance/proposal-types";

    #[test]
    fn sibling_link_resolves_under_page_directory() {
        assert_eq!(
            resolve_link(BASE, "./text-prop.md"),
            LinkTarget::Internal("/governance/proposal-types/text-prop".into())
        );
    }

    #[test]
    fn parent_link_resolves_to_section_root() {
        assert_eq!(
            resolve_link(BASE, "../process.md"),
            LinkTarget::Internal("/governance/process".into())
        );
    }

    #[test]
    fn readme_link_resolves_to_directory_index() {
        assert_eq!(
            resolve_link(BASE, "./README.md"),
            LinkTarget::Internal("/governance/proposal-types".into())
        );
    }

    #[test]
    fn html_suffix_is_stripped_like_md() {
        assert_eq!(
            resolve_link(BASE, "../formatting.html"),
            LinkTarget::Internal("/governance/formatting".into())
        );
    }

    #[test]
    fn absolute_scheme_stays_external() {
        assert_eq!(
            resolve_link(BASE, "https://example.com/docs"),
            LinkTarget::External("https://example.com/docs".into())
        );
    }

    #[test]
    fn bare_fragment_stays_an_anchor() {
        assert_eq!(
            resolve_link(BASE, "#drafting-a-proposal"),
            LinkTarget::Anchor("drafting-a-proposal".into())
        );
    }

    #[test]
    fn fragment_on_relative_link_is_preserved() {
        assert_eq!(
            resolve_link(BASE, "../process.md#deposit"),
            LinkTarget::Internal("/governance/process#deposit".into())
        );
    }

    #[test]
    fn heading_gets_slug_id() {
        let doc = compile(BASE, "## Drafting a Proposal\n");
        assert_eq!(
            doc.blocks,
            vec![Block::Heading {
                level: 2,
                id: "drafting-a-proposal".into(),
                children: vec![Inline::Text("Drafting a Proposal".into())],
            }]
        );
    }

    #[test]
    fn bold_link_list_item_compiles_to_nested_inlines() {
        let doc = compile(BASE, "- [**Text**](./text-prop.md)\n- **Software Upgrade**\n");
        assert_eq!(
            doc.blocks,
            vec![Block::List {
                ordered: false,
                items: vec![
                    vec![Inline::Link {
                        target: LinkTarget::Internal(
                            "/governance/proposal-types/text-prop".into()
                        ),
                        children: vec![Inline::Strong(vec![Inline::Text("Text".into())])],
                    }],
                    vec![Inline::Strong(vec![Inline::Text("Software Upgrade".into())])],
                ],
            }]
        );
    }

    #[test]
    fn ordered_list_keeps_order() {
        let doc = compile(BASE, "1. first\n2. second\n");
        assert_eq!(
            doc.blocks,
            vec![Block::List {
                ordered: true,
                items: vec![
                    vec![Inline::Text("first".into())],
                    vec![Inline::Text("second".into())],
                ],
            }]
        );
    }

    #[test]
    fn soft_break_becomes_space() {
        let doc = compile(BASE, "one\ntwo\n");
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph(vec![
                Inline::Text("one".into()),
                Inline::Text(" ".into()),
                Inline::Text("two".into()),
            ])]
        );
    }

    #[test]
    fn compile_is_deterministic() {
        let source = "# Title\n\nBody [link](../process.md).\n";
        assert_eq!(compile(BASE, source), compile(BASE, source));
    }
}
