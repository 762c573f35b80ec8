use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Element '{selector}' did not become ready within {timeout:?}")]
    Element { selector: String, timeout: Duration },

    #[error("Button '{label}' did not appear within {timeout:?}")]
    Button { label: String, timeout: Duration },

    #[error("Element '{selector}' showed no text within {timeout:?}")]
    Text { selector: String, timeout: Duration },

    #[error("Recovery phrase has no word at position {index}")]
    SeedWord { index: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
