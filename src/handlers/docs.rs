//! Documentation Page Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::state::AppState;
use crate::templates::DocTemplate;

/// Handler for documentation pages under `/governance/`.
///
/// Accepts the legacy generated-site forms of a route (`.html` suffix,
/// trailing slash) and serves the same page as the canonical route.
pub async fn doc_page(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let route = canonical_route(&path);
    let page = state.content().page(&route).ok_or(StatusCode::NOT_FOUND)?;

    Ok(DocTemplate {
        title: page.title.clone(),
        content_html: page.content_html(),
    })
}

fn canonical_route(path: &str) -> String {
    let path = path.trim_matches('/');
    let path = path.strip_suffix(".html").unwrap_or(path);
    if path.is_empty() {
        "/governance".to_string()
    } else {
        format!("/governance/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::canonical_route;

    #[test]
    fn canonical_route_normalizes_legacy_forms() {
        assert_eq!(canonical_route("proposal-types"), "/governance/proposal-types");
        assert_eq!(canonical_route("proposal-types/"), "/governance/proposal-types");
        assert_eq!(
            canonical_route("proposal-types.html"),
            "/governance/proposal-types"
        );
        assert_eq!(
            canonical_route("proposal-types/text-prop.html"),
            "/governance/proposal-types/text-prop"
        );
    }
}
