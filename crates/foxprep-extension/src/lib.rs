mod error;
mod fetcher;
mod locator;

pub use error::{Error, Result};
pub use fetcher::ExtensionFetcher;
pub use locator::ExtensionLocator;
