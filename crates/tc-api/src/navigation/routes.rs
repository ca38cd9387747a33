use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use tc_db::repositories::topic;
use tc_nav::{NavWindow, Viewport, build_class_index, build_class_tree, filter_class_tree};

use super::model::{NavbarQuery, NavbarView, SidebarQuery, SidebarView};
use crate::{ApiState, error::ApiError};

/// Create the navigation routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/navigation/navbar", get(navbar))
        .route("/navigation/sidebar", get(sidebar))
}

async fn navbar(
    State(state): State<ApiState>,
    Query(query): Query<NavbarQuery>,
) -> Result<Json<NavbarView>, ApiError> {
    let topics = topic::list_ordered(state.documents.as_ref()).await?;
    let classes = build_class_index(&topics);
    let total = classes.len();

    // Without a width the client is treated as a desktop
    let viewport = query
        .viewport_width
        .map_or(Viewport::Wide, Viewport::from_width);

    let mut window = NavWindow::new(query.start.unwrap_or_default()).clamped(total);
    if let Some(direction) = query.scroll {
        window = window.scroll(direction, total, viewport);
    }

    let visible = window.visible(total, viewport);

    Ok(Json(NavbarView {
        viewport,
        start: window.start,
        size: window.size,
        total,
        can_scroll_left: viewport == Viewport::Wide && window.can_scroll_left(),
        can_scroll_right: viewport == Viewport::Wide && window.can_scroll_right(total),
        classes: classes[visible].to_vec(),
    }))
}

async fn sidebar(
    State(state): State<ApiState>,
    Query(query): Query<SidebarQuery>,
) -> Result<Json<SidebarView>, ApiError> {
    let topics = topic::list_ordered(state.documents.as_ref()).await?;
    let tree = build_class_tree(&topics);
    let classes = filter_class_tree(tree, query.search.as_deref().unwrap_or_default());

    Ok(Json(SidebarView {
        expanded: query.viewport_width.is_none_or(tc_nav::sidebar_expanded),
        classes,
    }))
}
