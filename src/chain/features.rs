//! Feature flag vocabulary

/// Feature flags the wallet cannot derive on its own and therefore accepts
/// from registry descriptors.
///
/// Anything else the wallet detects itself at runtime and must not be
/// declared here.
pub const RECOGNIZED_FEATURES: &[&str] = &[
    "ibc-transfer",
    "ibc-go",
    "wasmd_0.24+",
    "cosmwasm",
    "secretwasm",
    "eth-address-gen",
    "eth-key-sign",
    "query:/cosmos/bank/v1beta1/spendable_balances",
    "axelar-evm-bridge",
    "osmosis-txfees",
    "terra-classic-fee",
    "ibc-pfm",
    "authz-msg-revoke-fixed",
    "osmosis-base-fee-beta",
    "feemarket",
    "op-stack-l1-data-fee",
    "force-enable-evm-ledger",
];

/// Features which are permanently deprecated and rejected unconditionally
pub const DEPRECATED_FEATURES: &[&str] = &["stargate", "no-legacy-stdTx"];

/// Experimental features tolerated outside the recognized vocabulary
pub const EXPERIMENTAL_FEATURES: &[&str] = &["ibc-v2"];

/// Baseline features injected into every EVM descriptor during
/// normalization, ahead of any declared features
pub const EVM_BASELINE_FEATURES: &[&str] = &["eth-address-gen", "eth-key-sign"];

/// Is the feature in the recognized (or tolerated experimental) vocabulary?
pub fn is_recognized(feature: &str) -> bool {
    RECOGNIZED_FEATURES.contains(&feature)
        || DEPRECATED_FEATURES.contains(&feature)
        || EXPERIMENTAL_FEATURES.contains(&feature)
}

/// Is the feature permanently deprecated?
pub fn is_deprecated(feature: &str) -> bool {
    DEPRECATED_FEATURES.contains(&feature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_vocabulary() {
        assert!(is_recognized("ibc-transfer"));
        assert!(is_recognized("eth-key-sign"));
        assert!(is_recognized("ibc-v2"));
        assert!(!is_recognized("jetpack"));
    }

    #[test]
    fn deprecated_features_stay_recognized() {
        // Deprecation is reported as its own violation, not as an
        // unrecognized feature
        for feature in DEPRECATED_FEATURES {
            assert!(is_recognized(feature));
            assert!(is_deprecated(feature));
        }
        assert!(!is_deprecated("ibc-transfer"));
    }
}
