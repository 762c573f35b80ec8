use anyhow::Result;
use clap::Args;
use clap::builder::FalseyValueParser;
use console::style;
use foxprep_browser::{BrowserFinder, BrowserHandle, BrowserLauncher, CdpSession, Channel, Profile};
use foxprep_extension::ExtensionLocator;
use foxprep_wallet::{NetworkMenu, NetworkSpec, Onboarding};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Title of the tab MetaMask opens on first run
const METAMASK_PAGE_TITLE: &str = "MetaMask";

#[derive(Args)]
pub struct SetupArgs {
    /// Browser channel to drive (chrome or chromium)
    #[arg(long, env = "CHANNEL", default_value = "chrome", value_parser = super::parse_channel)]
    channel: Channel,

    /// Run the browser headless (extensions still load in new headless mode)
    #[arg(long, env = "HEADLESS", value_parser = FalseyValueParser::new())]
    headless: bool,

    /// Wallet password typed into onboarding
    #[arg(long, env = "PASSWORD", default_value = "eight_digits")]
    password: String,

    /// MetaMask release to download when no bundle is present
    #[arg(
        long,
        env = "METAMASK_VERSION",
        default_value = "12.14.0",
        value_parser = super::parse_version,
        value_name = "VERSION"
    )]
    metamask_version: String,

    /// Directory holding extension bundles
    #[arg(long, default_value = "extension", value_name = "DIR")]
    extension_dir: PathBuf,

    /// Explicit browser binary, skipping channel lookup
    #[arg(long, value_name = "PATH")]
    chrome_path: Option<PathBuf>,

    /// Named persistent profile under ~/.foxprep/profiles (default: temporary)
    #[arg(long, value_name = "NAME")]
    profile: Option<String>,

    /// Seconds to wait for any single UI step
    #[arg(long, default_value_t = 30, value_name = "SECS")]
    step_timeout: u64,

    /// Seconds to wait for the MetaMask tab to appear
    #[arg(long, default_value_t = 60, value_name = "SECS")]
    tab_timeout: u64,

    /// JSON file describing the network to add (default: Polygon zkEVM Cardona)
    #[arg(long, value_name = "FILE")]
    network_file: Option<PathBuf>,

    /// Close the browser once setup finishes instead of holding it open
    #[arg(long)]
    exit_when_done: bool,
}

/// Kill a process by PID (cross-platform)
fn kill_process_by_pid(pid: u32) {
    #[cfg(unix)]
    {
        use std::process::Command;
        // SIGTERM lets the browser flush its profile
        let _ = Command::new("kill").arg(pid.to_string()).output();
    }

    #[cfg(windows)]
    {
        use std::process::Command;
        let _ = Command::new("taskkill")
            .args(["/PID", &pid.to_string(), "/F"])
            .output();
    }
}

pub fn execute(args: SetupArgs) -> Result<()> {
    // Create tokio runtime for async operations
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(run(args));

    // Explicitly shutdown runtime with timeout to prevent hanging on blocking tasks
    runtime.shutdown_timeout(Duration::from_millis(100));

    result
}

async fn run(args: SetupArgs) -> Result<()> {
    let network = load_network(args.network_file.as_deref())?;
    let step_timeout = Duration::from_secs(args.step_timeout);
    let tab_timeout = Duration::from_secs(args.tab_timeout);

    // Step 1: Resolve the extension bundle
    println!("🦊 Locating MetaMask bundle...");
    let locator = ExtensionLocator::new(&args.extension_dir);
    let extension_dir = match locator.locate()? {
        Some(dir) => {
            println!("✅ Found MetaMask at: {}", dir.display());
            dir
        }
        None => {
            println!("⚠️  MetaMask not found, installing...");
            super::fetch::download_and_unpack(&args.extension_dir, &args.metamask_version).await?
        }
    };

    // Step 2: Find the browser binary
    println!("🔍 Locating {}...", args.channel);
    let finder = BrowserFinder::new(args.channel, args.chrome_path.clone());
    let browser_binary = finder.find()?;
    println!("✅ Found browser at: {}", browser_binary.display());

    // Step 3: Setup profile
    let profile = if let Some(name) = &args.profile {
        let profile_path = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?
            .join(".foxprep")
            .join("profiles")
            .join(name);

        println!("📁 Using profile: {}", profile_path.display());
        Profile::persistent(profile_path)?
    } else {
        println!("📁 Using temporary profile");
        Profile::temporary()?
    };

    // Step 4: Launch the browser with the extension loaded
    println!("🚀 Launching browser...");
    let launcher = BrowserLauncher::new(
        browser_binary,
        profile.path().to_path_buf(),
        extension_dir,
    )
    .headless(args.headless);
    let debugging_port = launcher.debugging_port();

    let mut browser_process = launcher.launch()?;
    let browser_pid = browser_process.id();
    println!("✅ Browser started successfully");

    // Step 5: Connect over CDP
    let session = CdpSession::new(debugging_port);
    let handle = match session.connect().await {
        Ok(handle) => handle,
        Err(err) => {
            kill_process_by_pid(browser_pid);
            let _ = browser_process.wait();
            return Err(err.into());
        }
    };

    // Step 6: Drive MetaMask; a dead browser is useless, so kill it on failure
    if let Err(err) = drive(&handle, &args.password, &network, step_timeout, tab_timeout).await {
        kill_process_by_pid(browser_pid);
        let _ = browser_process.wait();
        return Err(err);
    }

    if args.exit_when_done {
        println!("🛑 Setup finished, closing browser");
        kill_process_by_pid(browser_pid);
        let _ = browser_process.wait();
        return Ok(());
    }

    // Step 7: Hold the browser open for the user
    println!();
    println!("Browser is ready to use. Press Ctrl+C to exit.");

    // Wrap in Option so the signal branch can still consume the task
    let mut wait_task = Some(tokio::task::spawn_blocking(move || browser_process.wait()));

    tokio::select! {
        // Browser exits naturally
        result = wait_task.as_mut().unwrap() => {
            let status = result??;
            println!("\n🛑 Browser closed (exit code: {})", status.code().unwrap_or(-1));
        }

        // User interrupts
        result = tokio::signal::ctrl_c() => {
            result?;
            println!("\n🛑 Interrupted, closing browser...");
            kill_process_by_pid(browser_pid);
            if let Some(task) = wait_task.take() {
                let _ = task.await;
            }
        }
    }

    Ok(())
}

/// Drive the MetaMask UI: onboarding, then the custom network
async fn drive(
    handle: &BrowserHandle,
    password: &str,
    network: &NetworkSpec,
    step_timeout: Duration,
    tab_timeout: Duration,
) -> Result<()> {
    println!("⏳ Waiting for the MetaMask tab...");
    let page = handle
        .wait_for_page_titled(METAMASK_PAGE_TITLE, tab_timeout)
        .await?;

    println!("🦊 Creating wallet...");
    let onboarding = Onboarding::new(page.clone(), step_timeout);
    let phrase = onboarding.create_wallet(password).await?;
    println!("✅ Wallet created");
    println!("🔑 Recovery phrase: {}", style(phrase.to_string()).bold());
    tracing::info!("Recovery phrase: {}", phrase);

    let menu = NetworkMenu::new(page, step_timeout);
    println!("🌐 Adding network: {}", network.name);
    menu.add(network).await?;
    println!("🔁 Switching to: {}", network.name);
    menu.switch_to(&network.name).await?;
    println!("✅ Network configured");

    Ok(())
}

/// Load a network definition file, or fall back to the built-in default
fn load_network(path: Option<&Path>) -> Result<NetworkSpec> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path).map_err(|err| {
                anyhow::anyhow!("Failed to read network file {}: {}", path.display(), err)
            })?;
            let network = serde_json::from_str(&contents).map_err(|err| {
                anyhow::anyhow!(
                    "Invalid network definition in {}: {}",
                    path.display(),
                    err
                )
            })?;
            Ok(network)
        }
        None => Ok(NetworkSpec::polygon_zkevm_cardona()),
    }
}
