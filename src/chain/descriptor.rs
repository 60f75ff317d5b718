//! Canonical chain descriptor model.
//!
//! Field names match the registry's JSON wire format exactly, and every
//! optional field skips serialization when absent: the structural validator
//! relies on a decoded descriptor re-serializing to precisely the bytes it
//! was decoded from (modulo key order) to detect undeclared fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One blockchain network's canonical, post-normalization descriptor
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChainDescriptor {
    /// Chain id, family-specific grammar (may carry a version suffix)
    pub chain_id: String,

    /// Human-readable display name
    pub chain_name: String,

    /// RPC endpoint
    pub rpc: String,

    /// REST endpoint (synthesized from `rpc` for EVM/Solana chains)
    pub rest: String,

    /// Operator of the declared endpoints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_provider: Option<NodeProvider>,

    /// BIP-44 derivation parameters
    pub bip44: Bip44,

    /// Additional accepted BIP-44 coin types
    #[serde(rename = "alternativeBIP44s", skip_serializing_if = "Option::is_none")]
    pub alternative_bip44s: Option<Vec<Bip44>>,

    /// Bech32 address encoding prefixes (Cosmos chains only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bech32_config: Option<Bech32Config>,

    /// Currencies the chain natively supports
    pub currencies: Vec<Currency>,

    /// Currencies accepted for transaction fees
    pub fee_currencies: Vec<FeeCurrency>,

    /// Currency used for staking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stake_currency: Option<Currency>,

    /// Feature flags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,

    /// Legacy community-registration marker, no longer accepted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<bool>,

    /// Is this a testnet/devnet?
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_testnet: Option<bool>,

    /// Hide the chain from wallet UI (allow-listed chains only)
    #[serde(rename = "hideInUI", skip_serializing_if = "Option::is_none")]
    pub hide_in_ui: Option<bool>,

    /// Image shown next to the chain name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_symbol_image_url: Option<String>,

    /// Web dashboard for staking operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_url_for_staking: Option<String>,

    /// Accent color for the wallet UI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,

    /// EVM sub-descriptor (EVM chains, plus Cosmos chains with an EVM layer)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evm: Option<EvmInfo>,

    /// Solana sub-descriptor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svm: Option<SvmInfo>,
}

impl ChainDescriptor {
    /// Iterate over every currency in {currencies, feeCurrencies, stakeCurrency}
    pub fn all_currencies(&self) -> impl Iterator<Item = &Currency> {
        self.currencies
            .iter()
            .chain(self.fee_currencies.iter().map(|fee| &fee.currency))
            .chain(self.stake_currency.iter())
    }

    /// Collect every declared price-index id, deduplicated
    pub fn price_ids(&self) -> BTreeSet<&str> {
        self.all_currencies()
            .filter_map(|currency| currency.coin_gecko_id.as_deref())
            .collect()
    }
}

/// A currency: one denomination the wallet can display
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    /// Display denomination (e.g. `ATOM`)
    pub coin_denom: String,

    /// Minimal on-chain denomination (e.g. `uatom`)
    pub coin_minimal_denom: String,

    /// Decimal places between minimal and display denominations
    pub coin_decimals: u32,

    /// Price-index id for fiat quotes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coin_gecko_id: Option<String>,

    /// Currency symbol image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coin_image_url: Option<String>,
}

/// A fee currency: a currency plus optional gas-price tiers
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeeCurrency {
    /// The underlying currency
    #[serde(flatten)]
    pub currency: Currency,

    /// Suggested gas prices in this currency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price_step: Option<GasPriceStep>,
}

/// Suggested gas-price tiers.
///
/// Values stay as raw JSON numbers: decoding `1` into a float would
/// re-serialize as `1.0` and defeat the structural validator's exact
/// round-trip comparison.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GasPriceStep {
    /// Cheapest accepted gas price
    pub low: serde_json::Number,

    /// Typical gas price
    pub average: serde_json::Number,

    /// Priority gas price
    pub high: serde_json::Number,
}

/// BIP-44 derivation parameters
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bip44 {
    /// SLIP-44 coin type (60 implies an EVM-compatible signing scheme)
    pub coin_type: u32,
}

/// Bech32 address encoding prefixes
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bech32Config {
    /// Account address prefix
    pub bech32_prefix_acc_addr: String,

    /// Account public key prefix
    pub bech32_prefix_acc_pub: String,

    /// Validator operator address prefix
    pub bech32_prefix_val_addr: String,

    /// Validator operator public key prefix
    pub bech32_prefix_val_pub: String,

    /// Consensus node address prefix
    pub bech32_prefix_cons_addr: String,

    /// Consensus node public key prefix
    pub bech32_prefix_cons_pub: String,
}

/// Operator of a chain's declared endpoints
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeProvider {
    /// Provider name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Provider website
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// EVM sub-descriptor
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EvmInfo {
    /// Numeric EVM chain id, derived from the `eip155:` identifier
    pub chain_id: u64,

    /// JSON-RPC endpoint
    pub rpc: String,

    /// WebSocket endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub websocket: Option<String>,
}

/// Solana sub-descriptor
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SvmInfo {
    /// JSON-RPC endpoint
    pub rpc: String,

    /// WebSocket endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub websocket: Option<String>,
}
