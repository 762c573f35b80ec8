pub mod completion;
pub mod fetch;
pub mod setup;

use foxprep_browser::Channel;

/// Parse a browser channel name
pub(crate) fn parse_channel(s: &str) -> Result<Channel, String> {
    s.parse()
}

/// Validate a MetaMask release version string
pub(crate) fn parse_version(s: &str) -> Result<String, String> {
    semver::Version::parse(s)
        .map(|version| version.to_string())
        .map_err(|err| format!("invalid MetaMask version '{}': {}", s, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_accepts_release_triples() {
        assert_eq!(parse_version("12.14.0").unwrap(), "12.14.0");
    }

    #[test]
    fn test_parse_version_rejects_partial_versions() {
        assert!(parse_version("12.14").is_err());
        assert!(parse_version("latest").is_err());
    }

    #[test]
    fn test_parse_channel_known_names() {
        assert_eq!(parse_channel("chrome").unwrap(), Channel::Chrome);
        assert_eq!(parse_channel("Chromium").unwrap(), Channel::Chromium);
        assert!(parse_channel("firefox").is_err());
    }
}
