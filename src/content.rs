//! Content Loading and Parsing
//!
//! Markdown content with YAML frontmatter support. The authored sources are
//! embedded in the binary, so loading takes no input, does no I/O, and has no
//! failure path: the store either exists with all its pages or the binary was
//! never built.

use std::collections::HashMap;

use gray_matter::{engine::YAML, Matter};
use serde::Deserialize;

use crate::document::{plain_text, Block, Document};
use crate::markdown;

/// Authored markdown sources, keyed by their path in the wiki tree.
/// `README.md` files are directory indexes.
const SOURCES: &[(&str, &str)] = &[(
    "governance/proposal-types/README.md",
    include_str!("../content/governance/proposal-types/README.md"),
)];

/// A documentation page with metadata and its compiled body.
#[derive(Clone, Debug)]
pub struct DocPage {
    pub route: String,
    pub title: String,
    pub description: Option<String>,
    pub document: Document,
}

impl DocPage {
    /// Render the page body to HTML.
    pub fn content_html(&self) -> String {
        self.document.to_html()
    }
}

/// Frontmatter for documentation pages.
#[derive(Deserialize)]
struct DocFrontmatter {
    title: Option<String>,
    description: Option<String>,
}

/// Store for all documentation pages.
#[derive(Clone, Debug, Default)]
pub struct ContentStore {
    pages: HashMap<String, DocPage>,
    order: Vec<String>,
}

impl ContentStore {
    /// Compile all embedded pages into the store.
    ///
    /// Deterministic: loading twice yields structurally identical pages.
    pub fn load() -> Self {
        let mut store = Self::default();
        let matter = Matter::<YAML>::new();

        for (source_path, raw) in SOURCES {
            let page = compile_page(&matter, source_path, raw);
            store.order.push(page.route.clone());
            store.pages.insert(page.route.clone(), page);
        }

        store
    }

    /// Get a single page by its canonical route.
    pub fn page(&self, route: &str) -> Option<&DocPage> {
        self.pages.get(route)
    }

    /// Get all pages in authored order.
    pub fn pages(&self) -> Vec<&DocPage> {
        self.order.iter().filter_map(|route| self.pages.get(route)).collect()
    }
}

fn compile_page(matter: &Matter<YAML>, source_path: &str, raw: &str) -> DocPage {
    let (frontmatter, body) = match matter.parse::<DocFrontmatter>(raw) {
        Ok(parsed) => (parsed.data, parsed.content),
        Err(_) => (None, (*raw).to_string()),
    };

    let (route, base_dir) = route_and_dir(source_path);
    let document = markdown::compile(&base_dir, &body);

    let title = frontmatter
        .as_ref()
        .and_then(|f| f.title.clone())
        .or_else(|| first_heading(&document))
        .unwrap_or_else(|| route.clone());
    let description = frontmatter.and_then(|f| f.description);

    DocPage {
        route,
        title,
        description,
        document,
    }
}

/// Derive the canonical route and link-resolution base from a source path.
fn route_and_dir(source_path: &str) -> (String, String) {
    let trimmed = source_path.strip_suffix(".md").unwrap_or(source_path);

    if trimmed == "README" {
        return ("/".to_string(), "/".to_string());
    }
    if let Some(dir) = trimmed.strip_suffix("/README") {
        let route = format!("/{dir}");
        return (route.clone(), route);
    }

    let route = format!("/{trimmed}");
    let dir = match route.rsplit_once('/') {
        Some((dir, _)) if !dir.is_empty() => dir.to_string(),
        _ => "/".to_string(),
    };
    (route, dir)
}

fn first_heading(document: &Document) -> Option<String> {
    document.blocks.iter().find_map(|block| match block {
        Block::Heading { children, .. } => Some(plain_text(children)),
        _ => None,
    })
}
