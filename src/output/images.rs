//! Cover image download
//!
//! Each record's `image_url` is fetched into `<images_dir>/<basename>`. A
//! failed image is logged and counted; it never stops the remaining ones.

use crate::crawler::Fetcher;
use crate::model::BookRecord;
use crate::output::traits::OutputResult;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use url::Url;

/// An image that could not be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFailure {
    pub url: String,
    pub reason: String,
}

/// Outcome of an image download pass
#[derive(Debug, Clone, Default)]
pub struct ImageReport {
    /// Files written, in record order
    pub downloaded: Vec<PathBuf>,

    pub failed: Vec<ImageFailure>,
}

/// Downloads the cover image of every record into `dir`
///
/// Two images whose URLs end in the same file name would land on the same
/// path. The first one is kept; later ones are reported as failures and not
/// fetched.
///
/// # Returns
///
/// * `Ok(ImageReport)` - Per-image results
/// * `Err(PersistenceError)` - The target directory could not be created
pub async fn download_images(
    fetcher: &Fetcher,
    books: &[BookRecord],
    dir: &Path,
) -> OutputResult<ImageReport> {
    let mut report = ImageReport::default();

    if books.is_empty() {
        tracing::info!("No books; skipping image download");
        return Ok(report);
    }

    tokio::fs::create_dir_all(dir).await?;
    let mut claimed: HashSet<PathBuf> = HashSet::new();

    for book in books {
        let result = match target_path(&book.image_url, dir) {
            Ok((_, path)) if claimed.contains(&path) => Err(format!(
                "file name collides with an earlier image at {}",
                path.display()
            )),
            Ok((url, path)) => {
                claimed.insert(path.clone());
                download_one(fetcher, &url, path).await
            }
            Err(reason) => Err(reason),
        };

        match result {
            Ok(path) => {
                tracing::info!("Downloaded {}", path.display());
                report.downloaded.push(path);
            }
            Err(reason) => {
                tracing::warn!("Failed to download {}: {}", book.image_url, reason);
                report.failed.push(ImageFailure {
                    url: book.image_url.clone(),
                    reason,
                });
            }
        }
    }

    Ok(report)
}

/// Parses an image URL and picks its file path inside `dir`
fn target_path(image_url: &str, dir: &Path) -> Result<(Url, PathBuf), String> {
    let url = Url::parse(image_url).map_err(|e| format!("invalid URL: {}", e))?;
    let name = crate::url::image_file_name(&url)
        .ok_or_else(|| "URL has no file name".to_string())?;
    let path = dir.join(name);
    Ok((url, path))
}

async fn download_one(fetcher: &Fetcher, url: &Url, path: PathBuf) -> Result<PathBuf, String> {
    let bytes = fetcher.fetch_bytes(url).await.map_err(|e| e.to_string())?;

    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| format!("write {}: {}", path.display(), e))?;

    Ok(path)
}
