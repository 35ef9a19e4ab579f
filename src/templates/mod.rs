//! Askama Templates
//!
//! Template structs for rendering HTML pages.

use askama::Template;
use askama_web::WebTemplate;

/// Home page template listing the available documents.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub title: String,
    pub docs: Vec<DocLink>,
}

/// A link to a documentation page for listings.
pub struct DocLink {
    pub href: String,
    pub title: String,
}

/// Documentation page template wrapping the compiled body.
#[derive(Template, WebTemplate)]
#[template(path = "doc.html")]
pub struct DocTemplate {
    pub title: String,
    pub content_html: String,
}
