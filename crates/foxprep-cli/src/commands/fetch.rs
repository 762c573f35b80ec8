use anyhow::Result;
use clap::Args;
use foxprep_extension::{ExtensionFetcher, ExtensionLocator};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Args)]
pub struct FetchArgs {
    /// MetaMask release to download
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

    /// Download even if a bundle is already present
    #[arg(long)]
    force: bool,
}

pub fn execute(args: FetchArgs) -> Result<()> {
    // Create tokio runtime for async operations
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async {
        if !args.force {
            let locator = ExtensionLocator::new(&args.extension_dir);
            if let Some(dir) = locator.locate()? {
                println!("✅ MetaMask already present at: {}", dir.display());
                return Ok(());
            }
        }

        let bundle = download_and_unpack(&args.extension_dir, &args.metamask_version).await?;
        println!("✅ MetaMask ready at: {}", bundle.display());
        Ok(())
    });

    runtime.shutdown_timeout(Duration::from_millis(100));

    result
}

/// Download a MetaMask release and unpack it, with a progress bar
pub(crate) async fn download_and_unpack(root: &Path, version: &str) -> Result<PathBuf> {
    println!("⬇️  Downloading MetaMask {}...", version);

    // Spinner until Content-Length arrives, then a sized bar
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {bytes} downloaded")
            .unwrap(),
    );
    bar.enable_steady_tick(Duration::from_millis(80));

    let fetcher = ExtensionFetcher::new(root, version);
    let bundle = fetcher
        .fetch(|downloaded, total| {
            if let Some(total) = total {
                if bar.length() != Some(total) {
                    bar.set_length(total);
                    bar.set_style(
                        ProgressStyle::default_bar()
                            .template(
                                "{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})",
                            )
                            .unwrap()
                            .progress_chars("#>-"),
                    );
                }
            }
            bar.set_position(downloaded);
        })
        .await?;
    bar.finish_and_clear();

    println!("📦 Unpacked to: {}", bundle.display());
    Ok(bundle)
}
