use crate::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Browser user-data directory for a run
pub enum Profile {
    /// Throwaway directory, removed when the profile is dropped
    Temporary(TempDir),
    /// Caller-owned directory that survives the run
    Persistent(PathBuf),
}

impl Profile {
    /// Create a fresh temporary profile
    pub fn temporary() -> Result<Self> {
        Ok(Profile::Temporary(tempfile::tempdir()?))
    }

    /// Create or reuse a persistent profile at the given path
    pub fn persistent(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(&path)?;
        }
        Ok(Profile::Persistent(path))
    }

    /// Get the profile directory path
    pub fn path(&self) -> &Path {
        match self {
            Profile::Temporary(dir) => dir.path(),
            Profile::Persistent(path) => path,
        }
    }

    /// Check if this profile disappears when dropped
    pub fn is_temporary(&self) -> bool {
        matches!(self, Profile::Temporary(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporary_profile_is_removed_on_drop() {
        let profile = Profile::temporary().unwrap();
        let path = profile.path().to_path_buf();

        assert!(path.is_dir());
        assert!(profile.is_temporary());

        drop(profile);

        assert!(!path.exists());
    }

    #[test]
    fn test_persistent_profile_survives_drop() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("dev-profile");

        let profile = Profile::persistent(path.clone()).unwrap();
        assert!(path.is_dir());
        assert!(!profile.is_temporary());

        drop(profile);

        assert!(path.exists());
    }

    #[test]
    fn test_persistent_profile_creates_missing_directories() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("profiles").join("nested");

        assert!(!path.exists());

        let profile = Profile::persistent(path.clone()).unwrap();

        assert!(path.is_dir());
        assert_eq!(profile.path(), path);
    }
}
