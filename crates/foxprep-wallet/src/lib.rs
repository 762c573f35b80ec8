// MetaMask UI automation: onboarding, custom networks, network switching

mod error;
mod network;
mod onboarding;
mod selectors;
mod ui;

pub use error::{Error, Result};
pub use network::{NetworkMenu, NetworkSpec};
pub use onboarding::{Onboarding, RecoveryPhrase, SEED_WORD_COUNT};
