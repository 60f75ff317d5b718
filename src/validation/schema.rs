//! Structural validator: the canonical candidate against the declared schema.
//!
//! The schema check is a typed decode. Decoding silently drops fields the
//! schema doesn't declare, so the candidate is serialized with sorted keys
//! before and after the decode; any difference means an undeclared field
//! was dropped and the descriptor is rejected.

use crate::{
    chain::ChainDescriptor,
    error::{Error, ErrorKind},
    prelude::*,
};
use serde_json::Value;

/// A family-specific field the schema requires but the candidate lacks.
///
/// Reported as structured data rather than an error so callers can branch
/// on it: Cosmos descriptors must have a bech32 configuration, EVM and
/// Solana descriptors legitimately lack one.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SchemaGap {
    /// `bech32Config` is absent
    MissingBech32Config,
}

/// Outcome of a successful structural check
#[derive(Clone, Debug)]
pub struct Checked {
    /// The decoded canonical descriptor
    pub descriptor: ChainDescriptor,

    /// Family-specific field the candidate lacks, if any
    pub gap: Option<SchemaGap>,
}

/// Run the candidate through the structural schema check.
pub fn check(candidate: &Value) -> Result<Checked, Error> {
    let before = canonical_json(candidate)?;

    let descriptor: ChainDescriptor = serde_json::from_value(candidate.clone())
        .map_err(|e| format_err!(ErrorKind::SchemaError, "{}", e))?;

    let after = canonical_json(&serde_json::to_value(&descriptor)?)?;

    if before != after {
        fail!(ErrorKind::UnknownField, "chain descriptor has unknown field");
    }

    let gap = descriptor
        .bech32_config
        .is_none()
        .then_some(SchemaGap::MissingBech32Config);

    Ok(Checked { descriptor, gap })
}

/// Serialize a JSON value with deterministically sorted keys.
///
/// `serde_json`'s map keeps keys in sorted order, so plain serialization is
/// canonical already; this function exists to name the invariant.
pub fn canonical_json(value: &Value) -> Result<String, Error> {
    Ok(serde_json::to_string(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate() -> Value {
        json!({
            "chainId": "osmosis-1",
            "chainName": "Osmosis",
            "rpc": "https://rpc.osmosis.zone",
            "rest": "https://lcd.osmosis.zone",
            "bip44": {"coinType": 118},
            "bech32Config": {
                "bech32PrefixAccAddr": "osmo",
                "bech32PrefixAccPub": "osmopub",
                "bech32PrefixValAddr": "osmovaloper",
                "bech32PrefixValPub": "osmovaloperpub",
                "bech32PrefixConsAddr": "osmovalcons",
                "bech32PrefixConsPub": "osmovalconspub"
            },
            "currencies": [{
                "coinDenom": "OSMO",
                "coinMinimalDenom": "uosmo",
                "coinDecimals": 6
            }],
            "feeCurrencies": [{
                "coinDenom": "OSMO",
                "coinMinimalDenom": "uosmo",
                "coinDecimals": 6,
                "gasPriceStep": {"low": 0.0025, "average": 0.025, "high": 0.04}
            }],
            "stakeCurrency": {
                "coinDenom": "OSMO",
                "coinMinimalDenom": "uosmo",
                "coinDecimals": 6
            }
        })
    }

    #[test]
    fn accepts_well_formed_descriptor() {
        let checked = check(&candidate()).unwrap();
        assert_eq!(checked.descriptor.chain_id, "osmosis-1");
        assert_eq!(checked.gap, None);
    }

    #[test]
    fn rejects_undocumented_top_level_field() {
        let mut value = candidate();
        value["memo"] = json!("undocumented");

        let err = check(&value).expect_err("unknown field");
        assert_eq!(err.kind(), &ErrorKind::UnknownField);
    }

    #[test]
    fn rejects_undocumented_nested_field() {
        let mut value = candidate();
        value["currencies"][0]["paprika"] = json!(true);

        let err = check(&value).expect_err("unknown field");
        assert_eq!(err.kind(), &ErrorKind::UnknownField);
    }

    #[test]
    fn rejects_type_mismatch() {
        let mut value = candidate();
        value["currencies"][0]["coinDecimals"] = json!("six");

        let err = check(&value).expect_err("type mismatch");
        assert_eq!(err.kind(), &ErrorKind::SchemaError);
    }

    #[test]
    fn reports_missing_bech32_config_as_gap() {
        let mut value = candidate();
        value.as_object_mut().unwrap().remove("bech32Config");

        let checked = check(&value).unwrap();
        assert_eq!(checked.gap, Some(SchemaGap::MissingBech32Config));
    }

    #[test]
    fn canonical_serialization_sorts_keys() {
        // The unknown-field comparison relies on serde_json's map keeping
        // keys sorted; `preserve_order` would break it silently.
        let mut object = serde_json::Map::new();
        object.insert("zebra".to_owned(), json!(1));
        object.insert("aardvark".to_owned(), json!({"nested": true}));

        let rendered = canonical_json(&Value::Object(object)).unwrap();
        assert_eq!(rendered, r#"{"aardvark":{"nested":true},"zebra":1}"#);
    }

    #[test]
    fn integer_gas_prices_round_trip() {
        let mut value = candidate();
        value["feeCurrencies"][0]["gasPriceStep"] = json!({"low": 1, "average": 1.1, "high": 2});

        check(&value).unwrap();
    }
}
