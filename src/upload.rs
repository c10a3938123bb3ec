use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Checks the file extension against the image allowlist and returns it
/// lowercased. Rejects before anything touches the disk or the database.
pub fn validate_image_extension(filename: &str) -> AppResult<String> {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    if filename.contains('.') && IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(AppError::BadRequest("Invalid image file extension".to_string()))
    }
}

fn sanitize_stem(filename: &str) -> String {
    let stem = Path::new(filename).file_stem().and_then(|s| s.to_str()).unwrap_or("upload");
    let cleaned: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// Writes an upload under `<media_dir>/<subdir>/` with a unique filename and
/// returns the public URL path (`/media/<subdir>/<name>`).
pub async fn save_upload(
    media_dir: &str,
    subdir: &str,
    original_name: &str,
    data: &[u8],
) -> AppResult<String> {
    let ext = validate_image_extension(original_name)?;
    let unique_name = format!("{}_{}.{}", sanitize_stem(original_name), Uuid::new_v4().simple(), ext);

    let dir = PathBuf::from(media_dir).join(subdir);
    tokio::fs::create_dir_all(&dir).await?;
    tokio::fs::write(dir.join(&unique_name), data).await?;

    Ok(format!("/media/{}/{}", subdir, unique_name))
}

/// Best-effort removal of a previously stored upload. Missing files only log.
pub async fn delete_upload(media_dir: &str, url: &str) {
    let Some(rel) = url.strip_prefix("/media/") else {
        tracing::warn!("Refusing to delete non-media url: {}", url);
        return;
    };
    // Uploaded names are sanitized, but never follow an embedded traversal
    if rel.contains("..") {
        tracing::warn!("Refusing to delete suspicious media url: {}", url);
        return;
    }
    let path = PathBuf::from(media_dir).join(rel);
    if let Err(e) = tokio::fs::remove_file(&path).await {
        tracing::warn!("Failed to remove media file {}: {}", path.display(), e);
    }
}
