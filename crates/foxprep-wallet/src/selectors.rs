//! Selector catalog for the MetaMask onboarding and network UI.
//!
//! MetaMask exposes `data-testid` attributes for automation; everything here
//! targets those, apart from the terms checkbox (plain CSS id) and a few
//! buttons that only carry label text.

// Onboarding flow
pub(crate) const TERMS_CHECKBOX: &str = "#onboarding__terms-checkbox";
pub(crate) const CREATE_WALLET: &str = r#"[data-testid="onboarding-create-wallet"]"#;
pub(crate) const METAMETRICS_NO_THANKS: &str = r#"[data-testid="metametrics-no-thanks"]"#;
pub(crate) const PASSWORD_NEW: &str = r#"[data-testid="create-password-new"]"#;
pub(crate) const PASSWORD_CONFIRM: &str = r#"[data-testid="create-password-confirm"]"#;
pub(crate) const PASSWORD_TERMS: &str = r#"[data-testid="create-password-terms"]"#;
pub(crate) const PASSWORD_CREATE: &str = r#"[data-testid="create-password-wallet"]"#;
pub(crate) const SECURE_WALLET_RECOMMENDED: &str = r#"[data-testid="secure-wallet-recommended"]"#;
pub(crate) const RECOVERY_PHRASE_REVEAL: &str = r#"[data-testid="recovery-phrase-reveal"]"#;
pub(crate) const RECOVERY_PHRASE_NEXT: &str = r#"[data-testid="recovery-phrase-next"]"#;
pub(crate) const RECOVERY_PHRASE_CONFIRM: &str = r#"[data-testid="recovery-phrase-confirm"]"#;
pub(crate) const ONBOARDING_DONE: &str = r#"[data-testid="onboarding-complete-done"]"#;
pub(crate) const PIN_EXTENSION_NEXT: &str = r#"[data-testid="pin-extension-next"]"#;
pub(crate) const PIN_EXTENSION_DONE: &str = r#"[data-testid="pin-extension-done"]"#;

// Network menu and custom-network form
pub(crate) const NETWORK_DISPLAY: &str = r#"[data-testid="network-display"]"#;
pub(crate) const NETWORK_NAME_INPUT: &str = r#"[data-testid="network-form-network-name"]"#;
pub(crate) const RPC_DROPDOWN: &str = r#"[data-testid="test-add-rpc-drop-down"]"#;
pub(crate) const RPC_URL_INPUT: &str = r#"[data-testid="rpc-url-input-test"]"#;
pub(crate) const RPC_NAME_INPUT: &str = r#"[data-testid="rpc-name-input-test"]"#;
pub(crate) const CHAIN_ID_INPUT: &str = r#"[data-testid="network-form-chain-id"]"#;
pub(crate) const TICKER_INPUT: &str = r#"[data-testid="network-form-ticker-input"]"#;
pub(crate) const EXPLORER_DROPDOWN: &str = r#"[data-testid="test-explorer-drop-down"]"#;
pub(crate) const EXPLORER_URL_INPUT: &str = r#"[data-testid="explorer-url-input"]"#;

// Buttons addressed by visible label
pub(crate) const ADD_CUSTOM_NETWORK_BUTTON: &str = "Add a custom network";
pub(crate) const ADD_RPC_URL_BUTTON: &str = "Add RPC URL";
pub(crate) const ADD_URL_BUTTON: &str = "Add URL";
pub(crate) const ADD_BLOCK_EXPLORER_BUTTON: &str = "Add a block explorer URL";
pub(crate) const SAVE_BUTTON: &str = "Save";

/// Build a CSS selector for a `data-testid` attribute value
pub(crate) fn test_id(id: &str) -> String {
    format!(r#"[data-testid="{}"]"#, id)
}

/// Selector for the numbered recovery-phrase word chip
pub(crate) fn recovery_chip(index: usize) -> String {
    test_id(&format!("recovery-phrase-chip-{}", index))
}

/// Selector for the numbered recovery-phrase quiz input
pub(crate) fn recovery_input(index: usize) -> String {
    test_id(&format!("recovery-phrase-input-{}", index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_id_wraps_attribute_value() {
        assert_eq!(
            test_id("network-display"),
            r#"[data-testid="network-display"]"#
        );
    }

    #[test]
    fn test_recovery_selectors_carry_index() {
        assert_eq!(
            recovery_chip(0),
            r#"[data-testid="recovery-phrase-chip-0"]"#
        );
        assert_eq!(
            recovery_input(7),
            r#"[data-testid="recovery-phrase-input-7"]"#
        );
    }
}
