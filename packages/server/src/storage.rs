use std::path::{Path, PathBuf};

use rand::Rng;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::AppError;
use crate::utils::filename::{contains_path_traversal, extension_of, validate_flat_filename};

/// Subfolder for hero images on the landing page.
pub const HERO_SUBFOLDER: &str = "beranda";
/// Subfolder for landing-page videos.
pub const VIDEO_SUBFOLDER: &str = "video";

/// Scratch directory for in-flight uploads, kept under the upload root so the
/// final rename never crosses a filesystem boundary.
const SPOOL_SUBFOLDER: &str = "tmp";

/// All subfolders that may be served publicly. `tmp` is deliberately absent.
const PUBLIC_SUBFOLDERS: &[&str] = &["kegiatan", "sia", "sroi", HERO_SUBFOLDER, VIDEO_SUBFOLDER];

/// Returns true when `name` is a subfolder the static handler may serve from.
pub fn is_public_subfolder(name: &str) -> bool {
    PUBLIC_SUBFOLDERS.contains(&name)
}

/// Validation rules for one kind of upload. Extension and declared MIME type
/// are both checked against the allow-list before anything touches disk.
pub struct UploadRules {
    pub extensions: &'static [&'static str],
    pub mime_types: &'static [&'static str],
    pub max_bytes: u64,
    reject_message: &'static str,
}

impl UploadRules {
    pub fn image(max_bytes: u64) -> Self {
        Self {
            extensions: &["jpeg", "jpg", "png", "gif", "webp"],
            mime_types: &["image/jpeg", "image/png", "image/gif", "image/webp"],
            max_bytes,
            reject_message: "Only image files (JPEG, PNG, GIF, WebP) are allowed",
        }
    }

    pub fn video(max_bytes: u64) -> Self {
        Self {
            extensions: &["mp4", "webm", "ogg", "mov"],
            mime_types: &["video/mp4", "video/webm", "video/ogg", "video/quicktime"],
            max_bytes,
            reject_message: "Only video files (MP4, WebM, OGG, MOV) are allowed",
        }
    }
}

/// An upload validated and spooled to a temp file, not yet in its final
/// category folder. Either `persist` or `discard` it.
pub struct PendingUpload {
    temp_path: PathBuf,
    original_name: String,
}

/// Disk-backed media store rooted at the configured upload directory.
///
/// Rows reference files by public-relative path (`/uploads/<sub>/<name>`);
/// deletions are best-effort because nothing ties the filesystem to the
/// database transactionally.
#[derive(Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload root, the spool directory, and every public
    /// subfolder. Called once at startup.
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(self.root.join(SPOOL_SUBFOLDER)).await?;
        for sub in PUBLIC_SUBFOLDERS {
            tokio::fs::create_dir_all(self.root.join(sub)).await?;
        }
        Ok(())
    }

    /// Validate and spool a multipart file field to a temp file, enforcing
    /// the size cap while streaming. The row is only written after this
    /// succeeds, so rejected uploads never leave database state behind.
    pub async fn spool_field(
        &self,
        mut field: axum::extract::multipart::Field<'_>,
        rules: &UploadRules,
    ) -> Result<PendingUpload, AppError> {
        let original_name = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;
        let original_name = validate_flat_filename(&original_name)
            .map_err(|e| AppError::Validation(e.message().into()))?
            .to_string();

        let extension = extension_of(&original_name)
            .ok_or_else(|| AppError::Validation(rules.reject_message.into()))?;
        if !rules.extensions.contains(&extension.as_str()) {
            return Err(AppError::Validation(rules.reject_message.into()));
        }

        let content_type = field
            .content_type()
            .map(|m| m.to_string())
            .ok_or_else(|| AppError::Validation(rules.reject_message.into()))?;
        if !rules.mime_types.contains(&content_type.as_str()) {
            return Err(AppError::Validation(rules.reject_message.into()));
        }

        let temp_path = self
            .root
            .join(SPOOL_SUBFOLDER)
            .join(format!("upload-{}", Uuid::new_v4()));

        let result = async {
            let mut temp_file = tokio::fs::File::create(&temp_path)
                .await
                .map_err(|e| AppError::Internal(format!("Failed to create temp file: {e}")))?;

            let mut total_size: u64 = 0;
            while let Some(chunk) = field
                .chunk()
                .await
                .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
            {
                total_size += chunk.len() as u64;
                if total_size > rules.max_bytes {
                    return Err(AppError::Validation(format!(
                        "File exceeds maximum size of {} bytes",
                        rules.max_bytes
                    )));
                }
                temp_file
                    .write_all(&chunk)
                    .await
                    .map_err(|e| AppError::Internal(format!("Temp file write failed: {e}")))?;
            }

            temp_file
                .flush()
                .await
                .map_err(|e| AppError::Internal(format!("Temp file flush failed: {e}")))?;

            Ok(())
        }
        .await;

        if let Err(e) = result {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e);
        }

        Ok(PendingUpload {
            temp_path,
            original_name,
        })
    }

    /// Move a spooled upload into its category subfolder under a generated
    /// collision-resistant name and return the public-relative path stored in
    /// the database.
    pub async fn persist(
        &self,
        pending: PendingUpload,
        subfolder: &str,
        prefix: Option<&str>,
    ) -> Result<String, AppError> {
        let name = generated_name(prefix, &pending.original_name);
        let dest_dir = self.root.join(subfolder);

        tokio::fs::create_dir_all(&dest_dir)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create upload folder: {e}")))?;
        tokio::fs::rename(&pending.temp_path, dest_dir.join(&name))
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store upload: {e}")))?;

        Ok(format!("/uploads/{subfolder}/{name}"))
    }

    /// Drop a spooled upload that will not be persisted.
    pub async fn discard(&self, pending: PendingUpload) {
        let _ = tokio::fs::remove_file(&pending.temp_path).await;
    }

    /// Best-effort removal of a stored file by its public-relative path. A
    /// missing file is not an error; any other failure is logged and
    /// swallowed, since the row mutation has already been committed.
    pub async fn remove_public_path(&self, public_path: &str) {
        let Some(relative) = public_path.strip_prefix("/uploads/") else {
            tracing::warn!(path = %public_path, "Refusing to delete path outside the upload root");
            return;
        };
        if contains_path_traversal(relative) {
            tracing::warn!(path = %public_path, "Refusing to delete traversal path");
            return;
        }

        match tokio::fs::remove_file(self.root.join(relative)).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %public_path, "File already gone, nothing to delete");
            }
            Err(e) => {
                tracing::warn!(path = %public_path, error = %e, "Failed to delete stored file");
            }
        }
    }
}

/// Collision-resistant stored name: unix millis plus a random suffix, keeping
/// the original extension. Mirrors the public URLs the frontend already
/// expects (`[prefix-]<millis>-<suffix>.<ext>`).
pub fn generated_name(prefix: Option<&str>, original_name: &str) -> String {
    let ext = extension_of(original_name)
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::rng().random_range(0..1_000_000_000);

    match prefix {
        Some(p) => format!("{p}-{millis}-{suffix}{ext}"),
        None => format!("{millis}-{suffix}{ext}"),
    }
}
