//! Schema normalizer: family-specific transforms into the canonical shape.
//!
//! Family dispatch is by caller intent (the registry directory a file came
//! from), never by content sniffing. The EVM and Solana transforms
//! enumerate every field they touch and carry the remainder through
//! untouched, so fields the schema doesn't declare survive into the
//! candidate and are caught by the structural validator.

use super::loader::RawDescriptor;
use crate::{
    chain::{descriptor::{EvmInfo, SvmInfo}, features::EVM_BASELINE_FEATURES, ChainIdParts},
    config::ExceptionsSection,
    error::{Error, ErrorKind},
    prelude::*,
};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Raw EVM-family descriptor shape: no `rest`, a top-level `websocket`.
///
/// Fields the transform consumes are enumerated; everything else flows
/// through `extra` into the candidate unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvmDescriptor {
    chain_id: String,
    rpc: String,
    #[serde(default)]
    websocket: Option<String>,
    #[serde(default)]
    features: Option<Vec<String>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Raw Solana-family descriptor shape: like EVM, but no feature injection
/// and no numeric chain id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSolanaDescriptor {
    chain_id: String,
    rpc: String,
    #[serde(default)]
    websocket: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Normalize a Cosmos descriptor.
///
/// Cosmos descriptors already have the canonical shape and pass through
/// unchanged. `hideInUI` is only permitted for allow-listed legacy chains.
pub fn cosmos(raw: &RawDescriptor, exceptions: &ExceptionsSection) -> Result<Value, Error> {
    let hidden = raw
        .value
        .get("hideInUI")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if hidden {
        let chain_id = raw.value.get("chainId").and_then(Value::as_str).unwrap_or("");

        if !exceptions.hidden_chains.iter().any(|c| c == chain_id) {
            fail!(
                ErrorKind::HiddenChain,
                "should not hide chain in UI: {}",
                chain_id
            );
        }
    }

    Ok(raw.value.clone())
}

/// Normalize an EVM descriptor.
///
/// Derives the numeric chain id from the `eip155:` identifier, synthesizes
/// `rest = rpc`, moves the websocket endpoint into the `evm` sub-object and
/// injects the baseline EVM features ahead of any declared ones.
pub fn evm(raw: &RawDescriptor) -> Result<Value, Error> {
    let descriptor: RawEvmDescriptor = serde_json::from_value(raw.value.clone())
        .map_err(|e| format_err!(ErrorKind::SchemaError, "{}", e))?;

    let identifier = ChainIdParts::identifier(&descriptor.chain_id);
    let evm_chain_id = numeric_evm_chain_id(&identifier)?;

    let mut features: Vec<String> = EVM_BASELINE_FEATURES
        .iter()
        .map(|f| (*f).to_owned())
        .collect();
    features.extend(descriptor.features.unwrap_or_default());

    let evm_info = EvmInfo {
        chain_id: evm_chain_id,
        rpc: descriptor.rpc.clone(),
        websocket: descriptor.websocket,
    };

    let mut candidate = descriptor.extra;
    candidate.insert("chainId".to_owned(), Value::String(descriptor.chain_id));
    candidate.insert("rpc".to_owned(), Value::String(descriptor.rpc.clone()));
    candidate.insert("rest".to_owned(), Value::String(descriptor.rpc));
    candidate.insert("features".to_owned(), serde_json::to_value(features)?);
    candidate.insert("evm".to_owned(), serde_json::to_value(evm_info)?);

    Ok(Value::Object(candidate))
}

/// Normalize a Solana descriptor.
///
/// Validates the `solana:{base58 genesis hash}` identifier, synthesizes
/// `rest = rpc` and moves the websocket endpoint into the `svm` sub-object.
pub fn solana(raw: &RawDescriptor) -> Result<Value, Error> {
    let descriptor: RawSolanaDescriptor = serde_json::from_value(raw.value.clone())
        .map_err(|e| format_err!(ErrorKind::SchemaError, "{}", e))?;

    let identifier = ChainIdParts::identifier(&descriptor.chain_id);

    if !is_solana_identifier(&identifier) {
        fail!(
            ErrorKind::InvalidChainId,
            "invalid chain identifier: it should be solana:{{base58 genesis hash}}, got {}",
            descriptor.chain_id
        );
    }

    let svm_info = SvmInfo {
        rpc: descriptor.rpc.clone(),
        websocket: descriptor.websocket,
    };

    let mut candidate = descriptor.extra;
    candidate.insert("chainId".to_owned(), Value::String(descriptor.chain_id));
    candidate.insert("rpc".to_owned(), Value::String(descriptor.rpc.clone()));
    candidate.insert("rest".to_owned(), Value::String(descriptor.rpc));
    candidate.insert("svm".to_owned(), serde_json::to_value(svm_info)?);

    Ok(Value::Object(candidate))
}

/// Derive the numeric EVM chain id from a `eip155:{id}` identifier
pub fn numeric_evm_chain_id(identifier: &str) -> Result<u64, Error> {
    identifier
        .strip_prefix("eip155:")
        .and_then(|id| id.parse::<u64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            format_err!(
                ErrorKind::InvalidChainId,
                "invalid chain identifier: it should be eip155:{{integer greater-than-zero}}, got {}",
                identifier
            )
            .into()
        })
}

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

fn is_solana_identifier(identifier: &str) -> bool {
    match identifier.strip_prefix("solana:") {
        Some(hash) => {
            (32..=44).contains(&hash.len()) && hash.chars().all(|c| BASE58_ALPHABET.contains(c))
        }
        None => false,
    }
}
