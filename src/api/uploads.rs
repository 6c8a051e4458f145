use std::path::Path;

use axum::extract::{Multipart, State};
use axum::{Json, http::StatusCode};
use serde::Serialize;
use tracing::error;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub file: String,
}

/// Accepts the first multipart field carrying a filename, stores it under a
/// fresh uuid name in the upload directory, and returns its public path.
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {e}")))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let extension = Path::new(&file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AppError::BadRequest(
                "Only .pdf, .doc and .docx files are accepted".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::BadRequest(
                "File exceeds the 10 MiB upload limit".to_string(),
            ));
        }

        let stored_name = format!("{}.{}", Uuid::new_v4(), extension);
        let target = Path::new(&state.upload_dir).join(&stored_name);

        tokio::fs::create_dir_all(&state.upload_dir)
            .await
            .map_err(|e| {
                error!("failed to create upload directory: {}", e);
                AppError::InternalServerError
            })?;
        tokio::fs::write(&target, &data).await.map_err(|e| {
            error!("failed to store upload {}: {}", stored_name, e);
            AppError::InternalServerError
        })?;

        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                success: true,
                message: "File uploaded successfully".to_string(),
                file: format!("/uploads/{stored_name}"),
            }),
        ));
    }

    Err(AppError::BadRequest("No file provided".to_string()))
}
