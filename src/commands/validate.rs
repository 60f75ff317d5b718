//! Validate registry descriptors.
//!
//! With no arguments, every file in all family directories is validated
//! concurrently and the aggregated outcome drives the process exit code
//! (plus GitHub Actions outputs when running in CI). With a single path
//! argument, that one file is validated and the submission-level checks
//! for new registrations are applied on top.

use crate::{
    chain::{ChainDescriptor, ChainFamily, ChainIdParts},
    config::RegistryConfig,
    error::{Error, ErrorKind},
    prelude::*,
    validation::Runner,
};
use abscissa_core::Command;
use clap::Parser;
use std::{env, fs, io::Write, path::PathBuf, process};

/// The `validate` command
#[derive(Command, Debug, Default, Parser)]
pub struct ValidateCommand {
    /// Path to a single descriptor file; omit to validate the whole registry
    pub path: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short = 'c', long = "config", help = "path to chainreg.toml")]
    pub config: Option<PathBuf>,

    /// Print debugging information
    #[arg(short = 'v', long = "verbose", help = "enable verbose debug logging")]
    pub verbose: bool,
}

impl Runnable for ValidateCommand {
    /// Run the validator
    fn run(&self) {
        let exit_code = abscissa_tokio::run(&APP, self.validate()).unwrap_or_else(|e| {
            status_err!("couldn't start tokio runtime: {}", e);
            process::exit(1);
        });

        if exit_code != 0 {
            process::exit(exit_code);
        }
    }
}

impl ValidateCommand {
    async fn validate(&self) -> i32 {
        let config = RegistryConfig::clone(&APP.config());

        match &self.path {
            Some(path) => self.validate_single(&config, path).await,
            None => self.validate_registry(&config).await,
        }
    }

    /// CI mode: every file in every family directory
    async fn validate_registry(&self, config: &RegistryConfig) -> i32 {
        info!(
            "{} {} validating registry at {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            config.registry.root.display()
        );

        let runner = Runner::new(config.clone());

        let report = match runner.validate_registry().await {
            Ok(report) => report,
            Err(e) => {
                status_err!("couldn't enumerate registry: {}", e);
                return 1;
            }
        };

        set_ci_output("hasError", if report.has_error() { "true" } else { "false" });

        if report.has_error() {
            for failure in report.failures() {
                status_err!("error on {}: {}", failure.file, failure.message);
            }

            set_ci_output("errorMessage", &report.error_message());
            return 1;
        }

        status_ok!("Validated", "every registry descriptor passed");
        0
    }

    /// Submission mode: one file plus the checks applied to new registrations
    async fn validate_single(&self, config: &RegistryConfig, path: &PathBuf) -> i32 {
        let family = match family_for_path(path) {
            Ok(family) => family,
            Err(e) => {
                status_err!("{}", e);
                return 1;
            }
        };

        let runner = Runner::new(config.clone());

        let outcome = runner
            .validate_path(family, path)
            .await
            .and_then(|descriptor| {
                submission_checks(&descriptor, config)?;
                Ok(descriptor)
            });

        match outcome {
            Ok(descriptor) => {
                status_ok!("Validated", "{}", descriptor.chain_id);
                0
            }
            Err(e) => {
                status_err!("error on {}: {}", path.display(), e);
                1
            }
        }
    }
}

/// Infer the chain family from the registry directory a file sits in
fn family_for_path(path: &PathBuf) -> Result<ChainFamily, Error> {
    path.parent()
        .and_then(|dir| dir.file_name())
        .and_then(|name| name.to_str())
        .and_then(ChainFamily::from_directory)
        .ok_or_else(|| {
            format_err!(
                ErrorKind::ConfigError,
                "cannot infer chain family of {}: descriptors live in a cosmos/, evm/ or solana/ directory",
                path.display()
            )
            .into()
        })
}

/// Checks applied to newly submitted descriptors on top of the pipeline
fn submission_checks(descriptor: &ChainDescriptor, config: &RegistryConfig) -> Result<(), Error> {
    let identifier = ChainIdParts::identifier(&descriptor.chain_id);
    let native_mainnet = config.submission.is_native_mainnet(&identifier);
    let native_testnet = config.submission.is_native_testnet(&identifier);

    if !native_mainnet && !native_testnet && descriptor.node_provider.is_none() {
        fail!(ErrorKind::SchemaError, "node provider should be provided");
    }

    if !native_mainnet && descriptor.chain_symbol_image_url.is_none() {
        fail!(ErrorKind::SchemaError, "chainSymbolImageUrl should be provided");
    }

    if descriptor.bip44.coin_type == 60 {
        let declared = descriptor.features.as_deref().unwrap_or_default();

        if !declared.iter().any(|f| f == "eth-address-gen")
            || !declared.iter().any(|f| f == "eth-key-sign")
        {
            fail!(
                ErrorKind::SchemaError,
                "EVM chain should add eth-address-gen, eth-key-sign features"
            );
        }
    }

    check_image_urls(descriptor, config)
}

/// Every declared image must live under the registry's image tree for this
/// chain and be a PNG.
fn check_image_urls(descriptor: &ChainDescriptor, config: &RegistryConfig) -> Result<(), Error> {
    let base = format!(
        "{}/{}/",
        config.registry.image_base_url.trim_end_matches('/'),
        ChainIdParts::identifier(&descriptor.chain_id)
    );

    let urls = descriptor
        .chain_symbol_image_url
        .iter()
        .chain(
            descriptor
                .all_currencies()
                .filter_map(|currency| currency.coin_image_url.as_ref()),
        );

    for url in urls {
        if !url.starts_with(&base) {
            fail!(ErrorKind::SchemaError, "invalid image url: {}", url);
        }

        if !url.ends_with(".png") {
            fail!(ErrorKind::SchemaError, "image is not png: {}", url);
        }
    }

    Ok(())
}

/// Append a workflow output for CI annotation tooling
fn set_ci_output(name: &str, value: &str) {
    let Ok(path) = env::var("GITHUB_OUTPUT") else {
        return;
    };

    let line = if value.contains('\n') {
        format!("{name}<<CHAINREG_EOF\n{value}\nCHAINREG_EOF\n")
    } else {
        format!("{name}={value}\n")
    };

    let written = fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(&path)
        .and_then(|mut file| file.write_all(line.as_bytes()));

    if let Err(e) = written {
        warn!("couldn't write CI output {}: {}", name, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const IMAGE_BASE: &str =
        "https://raw.githubusercontent.com/chainapsis/keplr-chain-registry/main/images";

    fn descriptor(value: serde_json::Value) -> ChainDescriptor {
        serde_json::from_value(value).unwrap()
    }

    fn submitted_chain() -> ChainDescriptor {
        descriptor(json!({
            "chainId": "newchain-1",
            "chainName": "New Chain",
            "rpc": "https://rpc.newchain.example",
            "rest": "https://lcd.newchain.example",
            "nodeProvider": {
                "name": "Example Labs",
                "email": "ops@newchain.example"
            },
            "chainSymbolImageUrl": format!("{IMAGE_BASE}/newchain/chain.png"),
            "bip44": { "coinType": 118 },
            "bech32Config": {
                "bech32PrefixAccAddr": "new",
                "bech32PrefixAccPub": "newpub",
                "bech32PrefixValAddr": "newvaloper",
                "bech32PrefixValPub": "newvaloperpub",
                "bech32PrefixConsAddr": "newvalcons",
                "bech32PrefixConsPub": "newvalconspub"
            },
            "currencies": [{
                "coinDenom": "NEW",
                "coinMinimalDenom": "unew",
                "coinDecimals": 6,
                "coinImageUrl": format!("{IMAGE_BASE}/newchain/unew.png")
            }],
            "feeCurrencies": [{
                "coinDenom": "NEW",
                "coinMinimalDenom": "unew",
                "coinDecimals": 6
            }]
        }))
    }

    #[test]
    fn complete_submission_passes() {
        let config = RegistryConfig::default();
        let chain = submitted_chain();

        assert!(submission_checks(&chain, &config).is_ok());
    }

    #[test]
    fn node_provider_required_for_unknown_chains() {
        let config = RegistryConfig::default();
        let mut chain = submitted_chain();
        chain.node_provider = None;

        let err = submission_checks(&chain, &config).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::SchemaError);
        assert!(err.to_string().contains("node provider"));
    }

    #[test]
    fn node_provider_waived_for_native_chains() {
        let config = RegistryConfig::default();
        let mut chain = submitted_chain();
        chain.chain_id = "cosmoshub-4".to_owned();
        chain.node_provider = None;
        chain.chain_symbol_image_url =
            Some(format!("{IMAGE_BASE}/cosmoshub/chain.png"));
        chain.currencies[0].coin_image_url =
            Some(format!("{IMAGE_BASE}/cosmoshub/unew.png"));

        assert!(submission_checks(&chain, &config).is_ok());
    }

    #[test]
    fn symbol_image_required_unless_native_mainnet() {
        let config = RegistryConfig::default();

        // a native testnet still needs chainSymbolImageUrl
        let mut chain = submitted_chain();
        chain.chain_id = "pion-1".to_owned();
        chain.node_provider = None;
        chain.chain_symbol_image_url = None;

        let err = submission_checks(&chain, &config).unwrap_err();
        assert!(err.to_string().contains("chainSymbolImageUrl"));
    }

    #[test]
    fn coin_type_60_requires_evm_features() {
        let config = RegistryConfig::default();
        let mut chain = submitted_chain();
        chain.bip44.coin_type = 60;
        chain.features = Some(vec!["eth-address-gen".to_owned()]);

        let err = submission_checks(&chain, &config).unwrap_err();
        assert!(err.to_string().contains("eth-key-sign"));

        chain.features = Some(vec![
            "eth-address-gen".to_owned(),
            "eth-key-sign".to_owned(),
        ]);
        assert!(submission_checks(&chain, &config).is_ok());
    }

    #[test]
    fn coin_type_60_applies_to_every_family() {
        let config = RegistryConfig::default();
        let mut chain = submitted_chain();
        chain.bip44.coin_type = 60;
        chain.features = None;
        chain.svm = Some(serde_json::from_value(json!({"rpc": "https://rpc.svm.example"})).unwrap());

        let err = submission_checks(&chain, &config).unwrap_err();
        assert!(err.to_string().contains("eth-address-gen"));
    }

    #[test]
    fn image_urls_must_live_under_the_chain_directory() {
        let config = RegistryConfig::default();
        let mut chain = submitted_chain();
        chain.currencies[0].coin_image_url =
            Some(format!("{IMAGE_BASE}/otherchain/unew.png"));

        let err = submission_checks(&chain, &config).unwrap_err();
        assert!(err.to_string().contains("invalid image url"));
    }

    #[test]
    fn image_urls_must_be_png() {
        let config = RegistryConfig::default();
        let mut chain = submitted_chain();
        chain.chain_symbol_image_url =
            Some(format!("{IMAGE_BASE}/newchain/chain.svg"));

        let err = submission_checks(&chain, &config).unwrap_err();
        assert!(err.to_string().contains("not png"));
    }

    #[test]
    fn family_inferred_from_parent_directory() {
        let path = PathBuf::from("registry/evm/eip155:1.json");
        assert_eq!(family_for_path(&path).unwrap(), ChainFamily::Evm);

        let stray = PathBuf::from("registry/images/eip155:1.json");
        assert!(family_for_path(&stray).is_err());
    }
}
