use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// How stored file names are generated. The original extension is kept either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingPolicy {
    /// `field-<unix millis>.ext`. Two uploads in the same millisecond collide.
    Timestamp,
    /// `field-<uuid v4>.ext`.
    #[default]
    Random,
}

impl NamingPolicy {
    pub fn file_name(&self, field_name: &str, original_name: &str) -> String {
        let stem = match self {
            NamingPolicy::Timestamp => {
                let millis = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_millis();
                format!("{}-{}", field_name, millis)
            }
            NamingPolicy::Random => format!("{}-{}", field_name, uuid::Uuid::new_v4()),
        };
        format!("{}{}", stem, extension_of(original_name))
    }
}

/// `.png` for `photo.png`, empty for `README` and dotfiles.
fn extension_of(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default()
}

/// Metadata of a file written by [`DiskStorage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub field_name: String,
    pub original_name: String,
    pub file_name: String,
    pub size: u64,
}

/// One file per upload in a flat directory. No cleanup, no size limit.
#[derive(Debug, Clone)]
pub struct DiskStorage {
    dir: PathBuf,
    naming: NamingPolicy,
}

impl DiskStorage {
    pub fn new(dir: impl Into<PathBuf>, naming: NamingPolicy) -> Self {
        Self {
            dir: dir.into(),
            naming,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `bytes` under a freshly generated name.
    ///
    /// The directory is created on first use. An existing file is never overwritten; a
    /// name collision is reported as `AlreadyExists`.
    pub async fn store(
        &self,
        field_name: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> io::Result<StoredFile> {
        if fs::metadata(&self.dir).await.is_err() {
            debug!(dir = %self.dir.display(), "Creating upload directory");
            fs::create_dir_all(&self.dir).await?;
        }

        let file_name = self.naming.file_name(field_name, original_name);
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.dir.join(&file_name))
            .await?;
        file.write_all(bytes).await?;
        file.flush().await?;

        info!(%file_name, size = bytes.len(), "Stored upload");
        Ok(StoredFile {
            field_name: field_name.to_string(),
            original_name: original_name.to_string(),
            file_name,
            size: bytes.len() as u64,
        })
    }
}
