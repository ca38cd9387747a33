use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tc_db::{models::Topic, repositories::topic};
use tc_nav::neighbours;

use super::model::{TopicDetail, TopicLink};
use crate::{ApiState, error::ApiError};

/// Create the topic routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/topics", get(list_topics))
        .route("/topics/{id}", get(get_topic))
}

/// All topics, oldest first
async fn list_topics(State(state): State<ApiState>) -> Result<Json<Vec<Topic>>, ApiError> {
    Ok(Json(topic::list_ordered(state.documents.as_ref()).await?))
}

async fn get_topic(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<TopicDetail>, ApiError> {
    let current = topic::get(state.documents.as_ref(), &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Topic {id} not found")))?;

    let shelf = topic::list_by_sub_category(state.documents.as_ref(), &current.sub_category).await?;
    let around = neighbours(&shelf, &id);

    Ok(Json(TopicDetail {
        previous: around.previous.map(TopicLink::from),
        next: around.next.map(TopicLink::from),
        topic: current.into(),
    }))
}
