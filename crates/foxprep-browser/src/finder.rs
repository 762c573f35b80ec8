use crate::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Browser release channel to launch
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Channel {
    Chrome,
    Chromium,
}

impl Channel {
    /// Binary names probed on PATH, in preference order
    pub fn binary_names(&self) -> &'static [&'static str] {
        match self {
            Channel::Chrome => &["google-chrome", "google-chrome-stable", "chrome"],
            Channel::Chromium => &["chromium", "chromium-browser"],
        }
    }

    /// Platform-specific default install paths
    fn default_paths(&self) -> Vec<PathBuf> {
        #[cfg(target_os = "macos")]
        return match self {
            Channel::Chrome => vec![PathBuf::from(
                "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            )],
            Channel::Chromium => vec![PathBuf::from(
                "/Applications/Chromium.app/Contents/MacOS/Chromium",
            )],
        };

        #[cfg(target_os = "linux")]
        return match self {
            Channel::Chrome => vec![
                PathBuf::from("/usr/bin/google-chrome"),
                PathBuf::from("/usr/bin/google-chrome-stable"),
            ],
            Channel::Chromium => vec![
                PathBuf::from("/usr/bin/chromium"),
                PathBuf::from("/usr/bin/chromium-browser"),
                PathBuf::from("/snap/bin/chromium"),
            ],
        };

        #[cfg(target_os = "windows")]
        return match self {
            Channel::Chrome => vec![
                PathBuf::from(r"C:\Program Files\Google\Chrome\Application\chrome.exe"),
                PathBuf::from(r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe"),
            ],
            Channel::Chromium => vec![PathBuf::from(
                r"C:\Program Files\Chromium\Application\chrome.exe",
            )],
        };

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        return vec![];
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Chrome => write!(f, "chrome"),
            Channel::Chromium => write!(f, "chromium"),
        }
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "chrome" => Ok(Channel::Chrome),
            "chromium" => Ok(Channel::Chromium),
            other => Err(format!(
                "unknown channel '{other}' (expected 'chrome' or 'chromium')"
            )),
        }
    }
}

/// Locates a browser binary for a channel
pub struct BrowserFinder {
    channel: Channel,
    custom_path: Option<PathBuf>,
}

impl BrowserFinder {
    /// Create a finder; a custom path wins over the channel lookup
    pub fn new(channel: Channel, custom_path: Option<PathBuf>) -> Self {
        Self {
            channel,
            custom_path,
        }
    }

    /// Find the browser binary: custom path, then PATH, then install paths
    pub fn find(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.custom_path {
            return self.validate(path);
        }

        for name in self.channel.binary_names() {
            if let Ok(path) = which::which(name) {
                if let Ok(valid) = self.validate(&path) {
                    tracing::debug!("{} found on PATH at {}", self.channel, valid.display());
                    return Ok(valid);
                }
            }
        }

        for path in self.channel.default_paths() {
            if let Ok(valid) = self.validate(&path) {
                tracing::debug!("{} found at {}", self.channel, valid.display());
                return Ok(valid);
            }
        }

        Err(Error::Browser(format!(
            "{} not found. Checked PATH for [{}] and [{}]. Use --chrome-path to point at a binary.",
            self.channel,
            self.channel.binary_names().join(", "),
            self.channel
                .default_paths()
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }

    /// Validate that a path exists and is executable
    fn validate(&self, path: &Path) -> Result<PathBuf> {
        if !path.exists() {
            return Err(Error::Browser(format!(
                "Browser not found at: {}",
                path.display()
            )));
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = std::fs::metadata(path).map_err(Error::Io)?;
            if metadata.permissions().mode() & 0o111 == 0 {
                return Err(Error::Browser(format!(
                    "Browser binary not executable: {}",
                    path.display()
                )));
            }
        }

        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_parses_case_insensitively() {
        assert_eq!("chrome".parse::<Channel>().unwrap(), Channel::Chrome);
        assert_eq!("Chromium".parse::<Channel>().unwrap(), Channel::Chromium);
        assert!("firefox".parse::<Channel>().is_err());
    }

    #[test]
    fn test_channel_display_round_trips() {
        for channel in [Channel::Chrome, Channel::Chromium] {
            assert_eq!(channel.to_string().parse::<Channel>().unwrap(), channel);
        }
    }

    #[test]
    fn test_finder_accepts_executable_custom_path() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        let finder = BrowserFinder::new(Channel::Chrome, Some(path.to_path_buf()));
        let found = finder.find();

        assert!(found.is_ok());
        assert_eq!(found.unwrap(), path);
    }

    #[test]
    fn test_finder_rejects_missing_custom_path() {
        let finder = BrowserFinder::new(Channel::Chrome, Some(PathBuf::from("/nonexistent/chrome")));
        let result = finder.find();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[cfg(unix)]
    #[test]
    fn test_finder_rejects_non_executable_custom_path() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::set_permissions(temp.path(), std::fs::Permissions::from_mode(0o644)).unwrap();

        let finder = BrowserFinder::new(Channel::Chrome, Some(temp.path().to_path_buf()));
        let result = finder.find();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not executable"));
    }
}
