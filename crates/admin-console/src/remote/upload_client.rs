use crate::model::{Operation, ResourceKind};
use crate::remote::http_client::{decode, send_checked, FailureCause, RequestFailed};
use crate::upload::{UploadError, UploadResponse};
use reqwest::multipart::{Form, Part};
use std::fmt::{self, Display};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Reads a file from disk, keeping only its final path component as the name.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(file_name, bytes))
    }
}

/// The server-generated name of an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoredReference(pub String);

impl StoredReference {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for StoredReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<StoredReference> for String {
    fn from(reference: StoredReference) -> Self {
        reference.0
    }
}

/// Single-file multipart uploads to `POST /upload-avatar`.
#[derive(Clone)]
pub struct UploadClient {
    http: reqwest::Client,
    endpoint: String,
    field_name: String,
}

impl UploadClient {
    pub fn new(http: reqwest::Client, server_url: &str, field_name: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: format!("{}/upload-avatar", server_url.trim_end_matches('/')),
            field_name: field_name.into(),
        }
    }

    /// Uploads exactly one file and returns its stored reference.
    ///
    /// `None` fails with [`UploadError::NoFileProvided`] without sending anything. The
    /// upload itself never touches a collection.
    #[instrument(skip(self, file))]
    pub async fn upload(&self, file: Option<UploadFile>) -> Result<StoredReference, UploadError> {
        let Some(file) = file else {
            warn!("Upload requested without a file");
            return Err(UploadError::NoFileProvided);
        };
        debug!(file_name = %file.file_name, size = file.bytes.len(), "Sending upload");

        let mut part = Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(content_type) = &file.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| failed(e.into()))?;
        }
        let form = Form::new().part(self.field_name.clone(), part);

        let body = send_checked(self.http.post(&self.endpoint).multipart(form))
            .await
            .map_err(failed)?;
        let response: UploadResponse = decode(&body).map_err(failed)?;

        info!(stored_reference = %response.stored_reference, "Uploaded");
        Ok(StoredReference(response.stored_reference))
    }
}

/// Avatars belong to users, so upload failures are reported against that collection.
fn failed(cause: FailureCause) -> UploadError {
    warn!(error = %cause, "Upload failed");
    UploadError::Request(RequestFailed {
        kind: ResourceKind::Users,
        operation: Operation::Upload,
        cause,
    })
}
