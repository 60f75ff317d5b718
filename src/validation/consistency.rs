//! Consistency validator: cross-field business rules.
//!
//! Rules run in a fixed order and the first violation is terminal for the
//! descriptor. Per-chain exceptions come from the configuration's
//! exception tables, never from the descriptor itself.

use crate::{
    chain::{
        denom::{is_ibc_denom, DenomKind},
        features, ChainDescriptor, ChainFamily, ChainIdParts, Currency,
    },
    config::RegistryConfig,
    error::{Error, ErrorKind},
    prelude::*,
};

/// Numeric EVM chain id of Sei, whose EVM layer is registered as its own
/// descriptor under `evm/` and must not appear in the Cosmos one.
const SEI_EVM_CHAIN_ID: u64 = 1329;

/// Run every consistency rule against a canonical descriptor.
///
/// `expected_identifier` is the descriptor's file base name.
pub fn check(
    descriptor: &ChainDescriptor,
    family: ChainFamily,
    expected_identifier: &str,
    config: &RegistryConfig,
) -> Result<(), Error> {
    let identifier = ChainIdParts::identifier(&descriptor.chain_id);

    check_identifier(&identifier, expected_identifier)?;
    check_currencies(descriptor, &identifier, config)?;
    check_features(descriptor)?;
    check_beta(descriptor)?;
    check_endpoint_schemes(descriptor, config)?;

    if family == ChainFamily::Cosmos {
        check_evm_layer(descriptor)?;
    }

    check_testnet_flag(descriptor)?;
    check_price_ids(descriptor)?;

    Ok(())
}

fn check_identifier(identifier: &str, expected: &str) -> Result<(), Error> {
    if identifier != expected {
        fail!(
            ErrorKind::ChainIdMismatch,
            "chain identifier unmatched: (expected: {}, actual: {})",
            expected,
            identifier
        );
    }

    Ok(())
}

fn check_currencies(
    descriptor: &ChainDescriptor,
    identifier: &str,
    config: &RegistryConfig,
) -> Result<(), Error> {
    let has_denom = |denom: &str| {
        descriptor
            .currencies
            .iter()
            .any(|currency| currency.coin_minimal_denom == denom)
    };

    if let Some(stake) = &descriptor.stake_currency {
        if !has_denom(&stake.coin_minimal_denom) {
            fail!(
                ErrorKind::CurrencyError,
                "stake currency must be included in currencies: {}",
                stake.coin_minimal_denom
            );
        }
    }

    let fee_exempt = config
        .exceptions
        .fee_exempt_chains
        .iter()
        .any(|c| c == identifier);

    if !fee_exempt {
        for fee in &descriptor.fee_currencies {
            let denom = &fee.currency.coin_minimal_denom;

            // Bridged fee denominations aren't listable as currencies
            if !is_ibc_denom(denom) && !has_denom(denom) {
                fail!(
                    ErrorKind::CurrencyError,
                    "fee currency must be included in currencies: {}",
                    denom
                );
            }
        }
    }

    for currency in &descriptor.currencies {
        let denom = &currency.coin_minimal_denom;

        if !DenomKind::classify(denom).is_listable() {
            fail!(
                ErrorKind::CurrencyError,
                "do not provide non-native or non-ERC20 token to currencies: {}",
                denom
            );
        }

        if is_ibc_denom(denom) && !config.exceptions.is_ibc_denom_allowed(identifier, denom) {
            fail!(
                ErrorKind::CurrencyError,
                "do not provide ibc currency to currencies: {}",
                denom
            );
        }
    }

    Ok(())
}

fn check_features(descriptor: &ChainDescriptor) -> Result<(), Error> {
    let declared = descriptor.features.as_deref().unwrap_or_default();

    for feature in declared {
        if !features::is_recognized(feature) {
            fail!(
                ErrorKind::UnrecognizedFeature,
                "only non-recognizable features should be provided: {}",
                feature
            );
        }
    }

    for feature in declared {
        if features::is_deprecated(feature) {
            fail!(ErrorKind::DeprecatedFeature, "'{}' feature is deprecated", feature);
        }
    }

    Ok(())
}

fn check_beta(descriptor: &ChainDescriptor) -> Result<(), Error> {
    if descriptor.beta.is_some() {
        fail!(ErrorKind::BetaField, "should not set 'beta' field");
    }

    Ok(())
}

fn check_endpoint_schemes(descriptor: &ChainDescriptor, config: &RegistryConfig) -> Result<(), Error> {
    if config.registry.allow_insecure_endpoints {
        return Ok(());
    }

    if descriptor.rpc.starts_with("http://") || descriptor.rest.starts_with("http://") {
        fail!(
            ErrorKind::InsecureEndpoint,
            "RPC and REST endpoints cannot be set as HTTP, please set them as HTTPS"
        );
    }

    Ok(())
}

fn check_evm_layer(descriptor: &ChainDescriptor) -> Result<(), Error> {
    if let Some(evm) = &descriptor.evm {
        if evm.chain_id == SEI_EVM_CHAIN_ID {
            fail!(
                ErrorKind::SchemaError,
                "cannot set `evm` field for the Sei chain; the EVM variant lives in evm/eip155:{}.json",
                SEI_EVM_CHAIN_ID
            );
        }
    }

    Ok(())
}

fn check_testnet_flag(descriptor: &ChainDescriptor) -> Result<(), Error> {
    let name = descriptor.chain_name.to_lowercase();
    let named_testnet = name.contains("testnet")
        || name.contains("devnet")
        || descriptor.chain_id.contains("testnet")
        || descriptor.chain_id.contains("devnet");

    if named_testnet && !descriptor.is_testnet.unwrap_or(false) {
        fail!(
            ErrorKind::TestnetMismatch,
            "add `\"isTestnet\": true` if your chain is a testnet or devnet"
        );
    }

    Ok(())
}

fn check_price_ids(descriptor: &ChainDescriptor) -> Result<(), Error> {
    let is_testnet = descriptor.is_testnet.unwrap_or(false);

    let missing_price_id = |denom: &str| -> Error {
        format_err!(
            ErrorKind::PriceIdConsistency,
            "provide coinGeckoId for the currency \"{}\" in the \"currencies\", \
             \"feeCurrencies\", and \"stakeCurrency\" fields all together",
            denom
        )
        .into()
    };

    let stake = descriptor.stake_currency.as_ref();
    let stake_has_id = |denom: &str| {
        stake.is_some_and(|s| s.coin_minimal_denom == denom && s.coin_gecko_id.is_some())
    };
    let listed_has_id = |currencies: &[Currency], denom: &str| {
        currencies
            .iter()
            .any(|c| c.coin_minimal_denom == denom && c.coin_gecko_id.is_some())
    };
    let fees_have_id = |denom: &str| {
        descriptor
            .fee_currencies
            .iter()
            .any(|f| f.currency.coin_minimal_denom == denom && f.currency.coin_gecko_id.is_some())
    };

    for currency in descriptor.all_currencies() {
        if is_testnet && currency.coin_gecko_id.is_some() {
            fail!(
                ErrorKind::PriceIdConsistency,
                "testnet chain should not have coinGeckoId"
            );
        }
    }

    for currency in &descriptor.currencies {
        let denom = &currency.coin_minimal_denom;

        if currency.coin_gecko_id.is_none() && (stake_has_id(denom) || fees_have_id(denom)) {
            return Err(missing_price_id(denom));
        }
    }

    for fee in &descriptor.fee_currencies {
        let denom = &fee.currency.coin_minimal_denom;

        if fee.currency.coin_gecko_id.is_none()
            && (stake_has_id(denom) || listed_has_id(&descriptor.currencies, denom))
        {
            return Err(missing_price_id(denom));
        }
    }

    if let Some(stake) = stake {
        let denom = &stake.coin_minimal_denom;

        if stake.coin_gecko_id.is_none()
            && (listed_has_id(&descriptor.currencies, denom) || fees_have_id(denom))
        {
            return Err(missing_price_id(denom));
        }
    }

    Ok(())
}
