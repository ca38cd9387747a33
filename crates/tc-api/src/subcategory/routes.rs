use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use tc_db::{
    models::Comment,
    repositories::{comment, file, topic},
};
use validator::Validate;

use super::model::{CreateCommentRequest, ReplyRequest, SubCategoryPage};
use crate::{
    ApiState, error::ApiError, metrics::record_comment_event,
    middleware::rate_limit::limit_public_writes, topic::model::TopicWithAttachments,
};

/// Create the subcategory routes
pub fn routes() -> Router<ApiState> {
    let reads = Router::new()
        .route("/subcategories/{sub_category}", get(get_page))
        .route("/subcategories/{sub_category}/comments", get(list_comments));

    let writes = Router::new()
        .route("/subcategories/{sub_category}/comments", post(add_comment))
        .route(
            "/subcategories/{sub_category}/comments/{comment_id}/replies",
            post(add_reply),
        );

    reads.merge(limit_public_writes(writes))
}

async fn get_page(
    State(state): State<ApiState>,
    Path(sub_category): Path<String>,
) -> Result<Json<SubCategoryPage>, ApiError> {
    let topics = topic::list_by_sub_category(state.documents.as_ref(), &sub_category).await?;
    let files = file::list_for_sub_category(state.objects.as_ref(), &sub_category).await?;
    let comments = comment::list(state.documents.as_ref(), &sub_category).await?;

    Ok(Json(SubCategoryPage {
        title: topics.first().map(|t| t.topic.clone()),
        topics: topics.into_iter().map(TopicWithAttachments::from).collect(),
        sub_category,
        files,
        comments,
    }))
}

async fn list_comments(
    State(state): State<ApiState>,
    Path(sub_category): Path<String>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    Ok(Json(
        comment::list(state.documents.as_ref(), &sub_category).await?,
    ))
}

async fn add_comment(
    State(state): State<ApiState>,
    Path(sub_category): Path<String>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    if let Err(errors) = payload.validate() {
        record_comment_event("comment", false);
        return Err(errors.into());
    }

    let created = comment::add(state.documents.as_ref(), &sub_category, &payload.into()).await?;
    record_comment_event("comment", true);
    tracing::info!(%sub_category, comment_id = %created.id, "Comment added");

    Ok((StatusCode::CREATED, Json(created)))
}

async fn add_reply(
    State(state): State<ApiState>,
    Path((sub_category, comment_id)): Path<(String, String)>,
    Json(payload): Json<ReplyRequest>,
) -> Result<Json<Comment>, ApiError> {
    if let Err(errors) = payload.validate() {
        record_comment_event("reply", false);
        return Err(errors.into());
    }

    let updated = comment::append_reply(
        state.documents.as_ref(),
        &sub_category,
        &comment_id,
        payload.reply.trim(),
    )
    .await
    .map_err(|err| {
        record_comment_event("reply", false);
        ApiError::from(err)
    })?;

    record_comment_event("reply", true);
    tracing::info!(%sub_category, %comment_id, "Reply added");

    Ok(Json(updated))
}
