use crate::upload::{DiskStorage, StoredFile, UploadError};
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Shared state of the upload router.
#[derive(Clone)]
pub struct UploadState {
    pub storage: Arc<DiskStorage>,
    pub field_name: Arc<str>,
}

/// Body of a successful `POST /upload-avatar`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    /// Name to put into a record's avatar/image field.
    pub stored_reference: String,
    pub file: StoredFile,
}

struct Incoming {
    original_name: String,
    bytes: Vec<u8>,
}

/// Accepts exactly one file in the configured field.
///
/// The whole body is read before anything touches the disk, so rejected requests never
/// create the directory or leave a file behind.
pub async fn upload_avatar(
    State(state): State<UploadState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, UploadError> {
    let mut multipart = multipart.map_err(|rejection| {
        warn!(%rejection, "Rejected non-multipart upload");
        UploadError::NotMultipart
    })?;

    let mut incoming: Option<Incoming> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Malformed(e.body_text()))?
    {
        let is_file_field = field.name() == Some(&*state.field_name);
        let original_name = field.file_name().unwrap_or_default().to_string();
        if !is_file_field || original_name.is_empty() {
            debug!(field = ?field.name(), "Ignoring multipart field");
            continue;
        }
        if incoming.is_some() {
            return Err(UploadError::Malformed(format!(
                "more than one file in field '{}'",
                state.field_name
            )));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| UploadError::Malformed(e.body_text()))?;
        incoming = Some(Incoming {
            original_name,
            bytes: bytes.to_vec(),
        });
    }

    let Some(incoming) = incoming else {
        warn!("Upload without a file");
        return Err(UploadError::NoFileProvided);
    };

    let file = state
        .storage
        .store(&state.field_name, &incoming.original_name, &incoming.bytes)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to store upload");
            UploadError::Storage(e)
        })?;

    Ok(Json(UploadResponse {
        message: "File uploaded successfully!".to_string(),
        stored_reference: file.file_name.clone(),
        file,
    }))
}
