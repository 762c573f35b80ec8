// Browser discovery, launch, and CDP session management

mod error;
mod finder;
mod launcher;
mod profile;
mod session;

pub use error::{Error, Result};
pub use finder::{BrowserFinder, Channel};
pub use launcher::{BrowserLauncher, DEFAULT_DEBUGGING_PORT};
pub use profile::Profile;
pub use session::{BrowserHandle, CdpSession};
