use crate::Result;
use std::path::{Path, PathBuf};

/// Locates an unpacked MetaMask bundle on disk
pub struct ExtensionLocator {
    root: PathBuf,
}

impl ExtensionLocator {
    /// Create a locator over the directory holding unpacked bundles
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the bundle root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find an unpacked bundle by its manifest file
    ///
    /// A bundle counts as present when `<root>/metamask-*/manifest.json`
    /// matches; the manifest itself is never parsed. Returns the manifest's
    /// parent directory, first match in sorted order, or `None` on a miss.
    pub fn locate(&self) -> Result<Option<PathBuf>> {
        let pattern = self.root.join("metamask-*").join("manifest.json");
        let pattern = pattern.to_string_lossy();

        let mut manifests: Vec<PathBuf> = glob::glob(&pattern)?
            .filter_map(|entry| entry.ok())
            .collect();
        manifests.sort();

        Ok(manifests
            .into_iter()
            .next()
            .and_then(|manifest| manifest.parent().map(Path::to_path_buf)))
    }
}
