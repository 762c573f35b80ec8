use crate::{Error, Result};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

/// Default CDP debugging port
pub const DEFAULT_DEBUGGING_PORT: u16 = 9222;

/// Spawns the browser process with the extension preloaded
pub struct BrowserLauncher {
    browser_path: PathBuf,
    user_data_dir: PathBuf,
    extension_dir: PathBuf,
    headless: bool,
    debugging_port: u16,
}

impl BrowserLauncher {
    /// Create a launcher for a browser binary, profile, and unpacked extension
    pub fn new(browser_path: PathBuf, user_data_dir: PathBuf, extension_dir: PathBuf) -> Self {
        Self {
            browser_path,
            user_data_dir,
            extension_dir,
            headless: false,
            debugging_port: DEFAULT_DEBUGGING_PORT,
        }
    }

    /// Run in new headless mode (extensions still load)
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Override the CDP debugging port
    pub fn with_debugging_port(mut self, port: u16) -> Self {
        self.debugging_port = port;
        self
    }

    /// Get the debugging port
    pub fn debugging_port(&self) -> u16 {
        self.debugging_port
    }

    /// Launch the browser process
    pub fn launch(&self) -> Result<Child> {
        let args = self.build_args();
        tracing::debug!(
            "Launching {} with args: {:?}",
            self.browser_path.display(),
            args
        );

        Command::new(&self.browser_path)
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::Browser(format!("Failed to launch browser: {}", e)))
    }

    /// Build browser command-line arguments
    fn build_args(&self) -> Vec<String> {
        let extension = self.extension_dir.display();
        let mut args = vec![
            format!("--remote-debugging-port={}", self.debugging_port),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            format!("--user-data-dir={}", self.user_data_dir.display()),
            "--disable-gpu".to_string(),
            "--no-sandbox".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--ignore-certificate-errors".to_string(),
            format!("--disable-extensions-except={}", extension),
            format!("--load-extension={}", extension),
        ];

        if self.headless {
            args.push("--headless=new".to_string());
        }

        args.push("about:blank".to_string());
        args
    }
}
