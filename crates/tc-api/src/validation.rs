//! Request validation helpers.

use std::sync::LazyLock;

use regex::Regex;
use validator::{ValidationError, ValidationErrors};

use crate::error::ApiError;

/// Extensions accepted by the admin upload endpoint
pub const UPLOAD_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "pdf"];

static UNSAFE_FILE_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._ -]+").expect("file name pattern is valid"));

/// `validator` custom check: the value must contain something besides whitespace.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// `validator` custom check: at least one entry besides whitespace.
pub fn any_not_blank(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().all(|value| value.trim().is_empty()) {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// `validator` custom check for a ", " joined label list.
pub fn any_label(value: &str) -> Result<(), ValidationError> {
    if value.split(',').all(|label| label.trim().is_empty()) {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .into_iter()
            .map(|(field, errors)| {
                errors
                    .iter()
                    .find_map(|error| error.message.as_ref().map(ToString::to_string))
                    .unwrap_or_else(|| format!("Invalid {field}"))
            })
            .collect::<Vec<_>>()
            .join(", ");

        Self::Validation(message)
    }
}

/// Reject empty or whitespace-only required fields.
pub fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Make an uploaded file name safe to use as an object path segment.
///
/// Directory parts are dropped, unusual characters replaced with `_`, and
/// only the upload extensions are accepted.
pub fn sanitize_upload_name(raw: &str) -> Result<String, ApiError> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw).trim();
    let name = UNSAFE_FILE_NAME_CHARS.replace_all(base, "_");
    let name = name.trim_start_matches('.');

    let Some((stem, extension)) = name.rsplit_once('.') else {
        return Err(ApiError::Validation(format!(
            "File {raw} has no extension"
        )));
    };

    let extension = extension.to_lowercase();
    if stem.is_empty() || !UPLOAD_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ApiError::Validation(format!(
            "File {raw} is not allowed, expected one of: {}",
            UPLOAD_EXTENSIONS.join(", ")
        )));
    }

    Ok(format!("{stem}.{extension}"))
}
