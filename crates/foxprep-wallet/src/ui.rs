//! Bounded element interaction helpers.
//!
//! chromiumoxide does no automatic waiting, so every interaction polls for
//! its target on a fixed interval until a per-step deadline passes. A click
//! or fill that loses a race with a re-render is retried under the same
//! deadline.

use crate::{Error, Result};
use chromiumoxide::Page;
use std::time::Duration;
use tokio::time::{Instant, sleep};

const POLL_INTERVAL: Duration = Duration::from_millis(150);

/// Click the first element matching the selector
pub(crate) async fn click(page: &Page, selector: &str, timeout: Duration) -> Result<()> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Ok(element) = page.find_element(selector).await {
            match element.click().await {
                Ok(_) => {
                    tracing::debug!("Clicked {}", selector);
                    return Ok(());
                }
                Err(err) => {
                    tracing::debug!("Click on {} failed, retrying: {}", selector, err);
                }
            }
        }
        if Instant::now() >= deadline {
            return Err(Error::Element {
                selector: selector.to_string(),
                timeout,
            });
        }
        sleep(POLL_INTERVAL).await;
    }
}

/// Type a value into the element matching the selector
pub(crate) async fn fill(page: &Page, selector: &str, value: &str, timeout: Duration) -> Result<()> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Ok(element) = page.find_element(selector).await {
            // Focus with a click first; keystrokes go to the focused node.
            if element.click().await.is_ok() && element.type_str(value).await.is_ok() {
                tracing::debug!("Filled {}", selector);
                return Ok(());
            }
        }
        if Instant::now() >= deadline {
            return Err(Error::Element {
                selector: selector.to_string(),
                timeout,
            });
        }
        sleep(POLL_INTERVAL).await;
    }
}

/// Read the rendered text of the element matching the selector
pub(crate) async fn read_text(page: &Page, selector: &str, timeout: Duration) -> Result<String> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Ok(element) = page.find_element(selector).await {
            if let Ok(Some(text)) = element.inner_text().await {
                let text = text.trim();
                if !text.is_empty() {
                    return Ok(text.to_string());
                }
            }
        }
        if Instant::now() >= deadline {
            return Err(Error::Text {
                selector: selector.to_string(),
                timeout,
            });
        }
        sleep(POLL_INTERVAL).await;
    }
}

/// Click the button whose visible label matches exactly
///
/// Several MetaMask buttons expose no test id, only their label. This scans
/// the page's buttons and matches on trimmed text.
pub(crate) async fn click_button(page: &Page, label: &str, timeout: Duration) -> Result<()> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Ok(buttons) = page.find_elements("button").await {
            for button in buttons {
                let text = button.inner_text().await.ok().flatten().unwrap_or_default();
                if text.trim() == label && button.click().await.is_ok() {
                    tracing::debug!("Clicked button '{}'", label);
                    return Ok(());
                }
            }
        }
        if Instant::now() >= deadline {
            return Err(Error::Button {
                label: label.to_string(),
                timeout,
            });
        }
        sleep(POLL_INTERVAL).await;
    }
}
