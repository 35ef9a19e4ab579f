//! Home Page Handler

use axum::extract::State;
use axum::response::IntoResponse;

use crate::state::AppState;
use crate::templates::{DocLink, HomeTemplate};

/// Handler for the landing page: lists all documentation pages.
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let docs = state
        .content()
        .pages()
        .into_iter()
        .map(|page| DocLink {
            href: page.route.clone(),
            title: page.title.clone(),
        })
        .collect();

    HomeTemplate {
        title: "Governance Wiki".to_string(),
        docs,
    }
}
