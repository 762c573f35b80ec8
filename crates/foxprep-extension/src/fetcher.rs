use crate::{Error, Result};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use url::Url;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloads and unpacks a MetaMask release
pub struct ExtensionFetcher {
    root: PathBuf,
    version: String,
}

impl ExtensionFetcher {
    /// Create a fetcher for one release version under the given bundle root
    pub fn new(root: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            version: version.into(),
        }
    }

    /// GitHub release asset URL for this version
    pub fn release_url(&self) -> String {
        format!(
            "https://github.com/MetaMask/metamask-extension/releases/download/v{version}/metamask-chrome-{version}.zip",
            version = self.version
        )
    }

    /// Where the downloaded archive lands before unpacking
    pub fn archive_path(&self) -> PathBuf {
        self.root
            .join(format!("metamask-chrome-{}.zip", self.version))
    }

    /// Directory the archive unpacks into
    pub fn bundle_dir(&self) -> PathBuf {
        self.root.join(format!("metamask-chrome-{}", self.version))
    }

    /// Download the release archive, unpack it, and delete the archive
    ///
    /// `progress` is called after each chunk with the bytes written so far and
    /// the total from Content-Length when the server reports one. Returns the
    /// unpacked bundle directory.
    pub async fn fetch<F>(&self, progress: F) -> Result<PathBuf>
    where
        F: FnMut(u64, Option<u64>),
    {
        let url = Url::parse(&self.release_url())?;
        tokio::fs::create_dir_all(&self.root).await?;

        let archive = self.archive_path();
        self.download(url, &archive, progress).await?;

        let bundle = self.bundle_dir();
        unpack(&archive, &bundle).await?;
        tokio::fs::remove_file(&archive).await?;

        tracing::info!(
            "MetaMask {} unpacked to {}",
            self.version,
            bundle.display()
        );
        Ok(bundle)
    }

    async fn download<F>(&self, url: Url, dest: &Path, mut progress: F) -> Result<()>
    where
        F: FnMut(u64, Option<u64>),
    {
        tracing::info!("Downloading MetaMask {} from {}", self.version, url);

        let client = reqwest::Client::builder()
            .user_agent(concat!("foxprep/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        let response = client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }

        let total = response.content_length();
        let mut file = tokio::fs::File::create(dest).await?;
        let mut downloaded = 0u64;
        let mut chunks = response.bytes_stream();

        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
            progress(downloaded, total);
        }
        file.flush().await?;

        tracing::info!("Download finished ({} bytes)", downloaded);
        Ok(())
    }
}

/// Unpack `archive` into `bundle`, replacing whatever was there
///
/// A failed extraction removes both the half-written bundle directory and the
/// archive, so a later locate cannot hand out a directory that never held a
/// manifest.
pub(crate) async fn unpack(archive: &Path, bundle: &Path) -> Result<()> {
    let archive_path = archive.to_path_buf();
    let bundle_dir = bundle.to_path_buf();

    let result = tokio::task::spawn_blocking(move || -> Result<()> {
        if bundle_dir.exists() {
            std::fs::remove_dir_all(&bundle_dir)?;
        }
        std::fs::create_dir_all(&bundle_dir)?;

        let file = std::fs::File::open(&archive_path)?;
        let mut archive = zip::ZipArchive::new(file)?;
        archive.extract(&bundle_dir)?;
        Ok(())
    })
    .await
    .map_err(|err| Error::Io(std::io::Error::other(err)))?;

    if let Err(err) = result {
        let _ = tokio::fs::remove_dir_all(bundle).await;
        let _ = tokio::fs::remove_file(archive).await;
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let file = std::fs::File::create(path).unwrap();
        let mut writer = zip::write::ZipWriter::new(file);
        for (name, contents) in entries {
            writer
                .start_file(*name, zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_release_url_carries_version_twice() {
        let fetcher = ExtensionFetcher::new("extension", "12.14.0");

        assert_eq!(
            fetcher.release_url(),
            "https://github.com/MetaMask/metamask-extension/releases/download/v12.14.0/metamask-chrome-12.14.0.zip"
        );
    }

    #[test]
    fn test_paths_sit_under_root() {
        let fetcher = ExtensionFetcher::new("extension", "12.14.0");

        assert_eq!(
            fetcher.archive_path(),
            PathBuf::from("extension/metamask-chrome-12.14.0.zip")
        );
        assert_eq!(
            fetcher.bundle_dir(),
            PathBuf::from("extension/metamask-chrome-12.14.0")
        );
    }

    #[tokio::test]
    async fn test_unpack_extracts_archive_entries() {
        let temp = tempfile::tempdir().unwrap();
        let archive = temp.path().join("bundle.zip");
        write_zip(
            &archive,
            &[("manifest.json", "{}"), ("background.js", "// empty")],
        );

        let bundle = temp.path().join("bundle");
        unpack(&archive, &bundle).await.unwrap();

        assert!(bundle.join("manifest.json").exists());
        assert!(bundle.join("background.js").exists());
        // The archive is the caller's to delete on success
        assert!(archive.exists());
    }

    #[tokio::test]
    async fn test_unpack_replaces_existing_bundle() {
        let temp = tempfile::tempdir().unwrap();
        let archive = temp.path().join("bundle.zip");
        write_zip(&archive, &[("manifest.json", "{}")]);

        let bundle = temp.path().join("bundle");
        std::fs::create_dir_all(&bundle).unwrap();
        std::fs::write(bundle.join("stale.txt"), "old").unwrap();

        unpack(&archive, &bundle).await.unwrap();

        assert!(bundle.join("manifest.json").exists());
        assert!(!bundle.join("stale.txt").exists());
    }

    #[tokio::test]
    async fn test_unpack_cleans_up_after_bad_archive() {
        let temp = tempfile::tempdir().unwrap();
        let archive = temp.path().join("bundle.zip");
        std::fs::write(&archive, "this is not a zip archive").unwrap();

        let bundle = temp.path().join("bundle");
        let result = unpack(&archive, &bundle).await;

        assert!(matches!(result, Err(Error::Archive(_))));
        assert!(!bundle.exists());
        assert!(!archive.exists());
    }
}
