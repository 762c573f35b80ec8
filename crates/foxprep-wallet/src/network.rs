use crate::{Result, selectors, ui};
use chromiumoxide::Page;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A custom network definition, as entered into MetaMask's network form
///
/// Every field is typed into a text input as-is; nothing is validated here,
/// including the chain id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub name: String,
    pub rpc_url: String,
    pub chain_id: String,
    pub ticker: String,
    pub explorer_url: String,
}

impl NetworkSpec {
    /// The Polygon zkEVM Cardona testnet, the built-in default
    pub fn polygon_zkevm_cardona() -> Self {
        Self {
            name: "Polygon zkEVM Cardona Testnet".to_string(),
            rpc_url: "https://etherscan.cardona.zkevm-rpc.com/".to_string(),
            chain_id: "2442".to_string(),
            ticker: "ETH".to_string(),
            explorer_url: "https://cardona-zkevm.polygonscan.com".to_string(),
        }
    }
}

/// Drives MetaMask's network menu and custom-network form
pub struct NetworkMenu {
    page: Page,
    step_timeout: Duration,
}

impl NetworkMenu {
    /// Create a driver bound to the MetaMask page
    pub fn new(page: Page, step_timeout: Duration) -> Self {
        Self { page, step_timeout }
    }

    /// Add a custom network through the network form
    pub async fn add(&self, network: &NetworkSpec) -> Result<()> {
        let t = self.step_timeout;
        let page = &self.page;

        tracing::info!("Adding network '{}'", network.name);
        tracing::debug!("Network definition: {:?}", network);

        ui::click(page, selectors::NETWORK_DISPLAY, t).await?;
        ui::click_button(page, selectors::ADD_CUSTOM_NETWORK_BUTTON, t).await?;

        ui::fill(page, selectors::NETWORK_NAME_INPUT, &network.name, t).await?;

        // RPC endpoints live behind a dropdown with their own add dialog
        ui::click(page, selectors::RPC_DROPDOWN, t).await?;
        ui::click_button(page, selectors::ADD_RPC_URL_BUTTON, t).await?;
        ui::fill(page, selectors::RPC_URL_INPUT, &network.rpc_url, t).await?;
        ui::fill(page, selectors::RPC_NAME_INPUT, &network.name, t).await?;
        ui::click_button(page, selectors::ADD_URL_BUTTON, t).await?;

        ui::fill(page, selectors::CHAIN_ID_INPUT, &network.chain_id, t).await?;
        ui::fill(page, selectors::TICKER_INPUT, &network.ticker, t).await?;

        // Block explorers use the same dropdown-and-dialog shape
        ui::click(page, selectors::EXPLORER_DROPDOWN, t).await?;
        ui::click_button(page, selectors::ADD_BLOCK_EXPLORER_BUTTON, t).await?;
        ui::fill(page, selectors::EXPLORER_URL_INPUT, &network.explorer_url, t).await?;
        ui::click_button(page, selectors::ADD_URL_BUTTON, t).await?;

        ui::click_button(page, selectors::SAVE_BUTTON, t).await?;

        tracing::info!("Network '{}' added", network.name);
        Ok(())
    }

    /// Switch the active network by display name
    ///
    /// The network list exposes each entry's display name as its test id,
    /// so the name doubles as the selector.
    pub async fn switch_to(&self, name: &str) -> Result<()> {
        let t = self.step_timeout;

        tracing::info!("Switching network to '{}'", name);
        ui::click(&self.page, selectors::NETWORK_DISPLAY, t).await?;
        ui::click(&self.page, &selectors::test_id(name), t).await?;

        tracing::info!("Network switched");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardona_default_values() {
        let network = NetworkSpec::polygon_zkevm_cardona();

        assert_eq!(network.name, "Polygon zkEVM Cardona Testnet");
        assert_eq!(network.rpc_url, "https://etherscan.cardona.zkevm-rpc.com/");
        assert_eq!(network.chain_id, "2442");
        assert_eq!(network.ticker, "ETH");
        assert_eq!(network.explorer_url, "https://cardona-zkevm.polygonscan.com");
    }

    #[test]
    fn test_network_spec_loads_from_json() {
        let json = r#"{
            "name": "Local Devnet",
            "rpc_url": "http://localhost:8545",
            "chain_id": "31337",
            "ticker": "ETH",
            "explorer_url": "http://localhost:4000"
        }"#;

        let network: NetworkSpec = serde_json::from_str(json).unwrap();
        assert_eq!(network.name, "Local Devnet");
        assert_eq!(network.chain_id, "31337");
    }
}
