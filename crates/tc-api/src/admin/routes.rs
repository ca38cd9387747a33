use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use chrono::Utc;
use serde_json::json;
use tc_db::{
    models::{ClassOption, Draft, StoredFile},
    repositories::{class, draft, topic},
};
use validator::Validate;

use super::model::{
    CreateClassRequest, CreateTopicRequest, CreatedTopic, TopicRow, UpdateTopicRequest,
    UploadedFiles,
};
use crate::{ApiState, auth::AdminUser, error::ApiError, validation::sanitize_upload_name};

/// Largest accepted upload request
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Multipart field carrying the uploaded files
const UPLOAD_FIELD: &str = "file";

/// Create the admin routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/admin/topics", get(list_topics).post(create_topic))
        .route("/admin/topics/{id}", put(update_topic).delete(delete_topic))
        .route("/admin/classes", get(list_classes).post(create_class))
        .route("/admin/draft", get(get_draft).put(save_draft))
        .route(
            "/admin/uploads",
            post(upload_files).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
}

/// Management table
async fn list_topics(
    _admin: AdminUser,
    State(state): State<ApiState>,
) -> Result<Json<Vec<TopicRow>>, ApiError> {
    let topics = topic::list_ordered(state.documents.as_ref()).await?;

    Ok(Json(
        topics
            .into_iter()
            .map(|t| TopicRow::new(t, state.excerpt))
            .collect(),
    ))
}

async fn create_topic(
    _admin: AdminUser,
    State(state): State<ApiState>,
    Json(payload): Json<CreateTopicRequest>,
) -> Result<(StatusCode, Json<CreatedTopic>), ApiError> {
    payload.validate()?;

    let new_topic = payload.into_new_topic(Utc::now());
    let id = topic::create(state.documents.as_ref(), &new_topic).await?;
    tracing::info!(topic_id = %id, sub_category = %new_topic.sub_category, "Topic created");

    Ok((StatusCode::CREATED, Json(CreatedTopic { id })))
}

async fn update_topic(
    _admin: AdminUser,
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTopicRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    payload.validate()?;

    topic::update(state.documents.as_ref(), &id, &payload.into()).await?;
    tracing::info!(topic_id = %id, "Topic updated");

    Ok(Json(json!({ "message": "Topic updated successfully", "id": id })))
}

async fn delete_topic(
    _admin: AdminUser,
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    topic::delete(state.documents.as_ref(), &id).await?;
    tracing::info!(topic_id = %id, "Topic deleted");

    Ok(Json(json!({ "message": "Topic deleted successfully", "id": id })))
}

async fn list_classes(
    _admin: AdminUser,
    State(state): State<ApiState>,
) -> Result<Json<Vec<ClassOption>>, ApiError> {
    Ok(Json(class::list(state.documents.as_ref()).await?))
}

async fn create_class(
    _admin: AdminUser,
    State(state): State<ApiState>,
    Json(payload): Json<CreateClassRequest>,
) -> Result<(StatusCode, Json<ClassOption>), ApiError> {
    payload.validate()?;

    let option = class::create(state.documents.as_ref(), payload.name.trim()).await?;
    tracing::info!(class = %option.name, "Class option added");

    Ok((StatusCode::CREATED, Json(option)))
}

async fn get_draft(
    _admin: AdminUser,
    State(state): State<ApiState>,
) -> Result<Json<Draft>, ApiError> {
    draft::load(state.documents.as_ref())
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No draft saved".to_string()))
}

async fn save_draft(
    _admin: AdminUser,
    State(state): State<ApiState>,
    Json(payload): Json<Draft>,
) -> Result<Json<Draft>, ApiError> {
    draft::save(state.documents.as_ref(), &payload).await?;
    tracing::debug!("Draft saved");

    Ok(Json(payload))
}

/// Store every `file` part under `uploads/` and return the download URLs.
///
/// Names are checked before anything is written, so a rejected file aborts
/// the whole request.
async fn upload_files(
    _admin: AdminUser,
    State(state): State<ApiState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadedFiles>), ApiError> {
    let mut pending = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let raw_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::Validation("Uploaded file has no name".to_string()))?;
        let name = sanitize_upload_name(&raw_name)?;
        // Files of one request share a path prefix
        if pending.iter().any(|(existing, _)| *existing == name) {
            return Err(ApiError::Validation(format!(
                "File {name} is included more than once"
            )));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("Failed to read {raw_name}: {e}")))?;

        pending.push((name, bytes.to_vec()));
    }

    if pending.is_empty() {
        return Err(ApiError::Validation("No files uploaded".to_string()));
    }

    let millis = Utc::now().timestamp_millis();
    let mut files = Vec::with_capacity(pending.len());
    for (name, bytes) in pending {
        let size = bytes.len();
        let handle = state
            .objects
            .put_object(&format!("uploads/{millis}-{name}"), bytes)
            .await?;
        let url = state.objects.resolve_download_url(&handle).await?;
        tracing::info!(path = %handle.path, size, "File uploaded");

        files.push(StoredFile {
            name: handle.name,
            url,
        });
    }

    Ok((StatusCode::CREATED, Json(UploadedFiles { files })))
}
