use crate::{Error, Result};
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};

const CONNECT_ATTEMPTS: u32 = 10;
const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(500);
const PAGE_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Attaches to a running browser over the Chrome DevTools Protocol
pub struct CdpSession {
    debugging_port: u16,
}

impl CdpSession {
    /// Create a session for a browser listening on the given debugging port
    pub fn new(debugging_port: u16) -> Self {
        Self { debugging_port }
    }

    /// Get the debugging port
    pub fn debugging_port(&self) -> u16 {
        self.debugging_port
    }

    /// Connect to the browser, retrying while it starts up
    pub async fn connect(&self) -> Result<BrowserHandle> {
        let url = format!("http://localhost:{}", self.debugging_port);
        let mut attempts = CONNECT_ATTEMPTS;

        let (browser, mut handler) = loop {
            tracing::debug!(
                "Connecting to CDP endpoint {} ({} attempts left)",
                url,
                attempts
            );
            match Browser::connect(url.as_str()).await {
                Ok(connection) => {
                    tracing::info!("CDP connection established on port {}", self.debugging_port);
                    break connection;
                }
                Err(err) => {
                    attempts -= 1;
                    if attempts == 0 {
                        return Err(Error::Cdp(format!(
                            "Failed to connect to browser after {} attempts: {}",
                            CONNECT_ATTEMPTS, err
                        )));
                    }
                    sleep(CONNECT_RETRY_DELAY).await;
                }
            }
        };

        // The handler stream must be drained for the connection to make progress.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", err);
                }
            }
        });

        Ok(BrowserHandle {
            browser,
            handler_task,
        })
    }
}

/// A live CDP connection plus its background event-drain task
pub struct BrowserHandle {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl BrowserHandle {
    /// Get the underlying browser connection
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Poll the open tabs until one reports the given title
    ///
    /// Extension pages open on the browser's own schedule, so this scans
    /// the tab list on an interval until the title shows up or the
    /// deadline passes.
    pub async fn wait_for_page_titled(&self, title: &str, timeout: Duration) -> Result<Page> {
        let deadline = Instant::now() + timeout;

        loop {
            let pages = self
                .browser
                .pages()
                .await
                .map_err(|e| Error::Cdp(format!("Failed to list pages: {}", e)))?;

            for page in pages {
                let current = page.get_title().await.ok().flatten().unwrap_or_default();
                if current == title {
                    tracing::debug!("Found page titled '{}'", title);
                    return Ok(page);
                }
            }

            if Instant::now() >= deadline {
                return Err(Error::PageWait {
                    title: title.to_string(),
                    timeout,
                });
            }
            sleep(PAGE_POLL_INTERVAL).await;
        }
    }
}

impl Drop for BrowserHandle {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}
