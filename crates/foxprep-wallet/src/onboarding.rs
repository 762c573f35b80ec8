use crate::{Error, Result, selectors, ui};
use chromiumoxide::Page;
use std::fmt;
use std::time::Duration;

/// Words in a MetaMask recovery phrase
pub const SEED_WORD_COUNT: usize = 12;

/// Word positions the onboarding quiz asks to be re-entered
const REVIEW_WORD_INDICES: [usize; 3] = [2, 3, 7];

/// A captured secret recovery phrase
///
/// `Display` joins the words for deliberate output; `Debug` redacts them so
/// the phrase cannot leak through error messages or debug logs.
pub struct RecoveryPhrase {
    words: Vec<String>,
}

impl RecoveryPhrase {
    fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    /// The words in wallet order
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl fmt::Display for RecoveryPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.words.join(" "))
    }
}

impl fmt::Debug for RecoveryPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecoveryPhrase(<{} words redacted>)", self.words.len())
    }
}

/// Drives the MetaMask first-run onboarding flow
pub struct Onboarding {
    page: Page,
    step_timeout: Duration,
}

impl Onboarding {
    /// Create a driver bound to the MetaMask onboarding page
    pub fn new(page: Page, step_timeout: Duration) -> Self {
        Self { page, step_timeout }
    }

    /// Create a new wallet protected by the given password
    ///
    /// Walks the full onboarding sequence: terms, metrics opt-out, password,
    /// recovery-phrase reveal and quiz, and the pin-extension epilogue.
    /// Returns the recovery phrase captured along the way.
    pub async fn create_wallet(&self, password: &str) -> Result<RecoveryPhrase> {
        let t = self.step_timeout;
        let page = &self.page;

        tracing::info!("Accepting terms and starting wallet creation");
        ui::click(page, selectors::TERMS_CHECKBOX, t).await?;
        ui::click(page, selectors::CREATE_WALLET, t).await?;
        ui::click(page, selectors::METAMETRICS_NO_THANKS, t).await?;

        tracing::info!("Setting wallet password");
        ui::fill(page, selectors::PASSWORD_NEW, password, t).await?;
        ui::fill(page, selectors::PASSWORD_CONFIRM, password, t).await?;
        ui::click(page, selectors::PASSWORD_TERMS, t).await?;
        ui::click(page, selectors::PASSWORD_CREATE, t).await?;

        tracing::info!("Revealing recovery phrase");
        ui::click(page, selectors::SECURE_WALLET_RECOMMENDED, t).await?;
        ui::click(page, selectors::RECOVERY_PHRASE_REVEAL, t).await?;

        let mut words = Vec::with_capacity(SEED_WORD_COUNT);
        for index in 0..SEED_WORD_COUNT {
            words.push(ui::read_text(page, &selectors::recovery_chip(index), t).await?);
        }
        let phrase = RecoveryPhrase::new(words);

        ui::click(page, selectors::RECOVERY_PHRASE_NEXT, t).await?;

        tracing::info!("Answering recovery phrase quiz");
        for index in REVIEW_WORD_INDICES {
            let word = phrase.words.get(index).ok_or(Error::SeedWord { index })?;
            ui::fill(page, &selectors::recovery_input(index), word, t).await?;
        }
        ui::click(page, selectors::RECOVERY_PHRASE_CONFIRM, t).await?;

        tracing::info!("Completing onboarding");
        ui::click(page, selectors::ONBOARDING_DONE, t).await?;
        ui::click(page, selectors::PIN_EXTENSION_NEXT, t).await?;
        ui::click(page, selectors::PIN_EXTENSION_DONE, t).await?;

        tracing::info!("Wallet created");
        Ok(phrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrase() -> RecoveryPhrase {
        RecoveryPhrase::new(
            [
                "abandon", "ability", "able", "about", "above", "absent", "absorb", "abstract",
                "absurd", "abuse", "access", "accident",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        )
    }

    #[test]
    fn test_display_joins_words_in_order() {
        assert_eq!(
            phrase().to_string(),
            "abandon ability able about above absent absorb abstract absurd abuse access accident"
        );
    }

    #[test]
    fn test_debug_redacts_words() {
        let rendered = format!("{:?}", phrase());
        assert!(!rendered.contains("abandon"));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn test_words_exposes_wallet_order() {
        let phrase = phrase();
        assert_eq!(phrase.words().len(), SEED_WORD_COUNT);
        assert_eq!(phrase.words()[0], "abandon");
        assert_eq!(phrase.words()[11], "accident");
    }
}
