//! Run aggregator: drives every registry file through the pipeline and
//! folds the outcomes into a single pass/fail report.

use super::{consistency, loader, normalize, probe::Prober, schema};
use crate::{
    chain::{ChainDescriptor, ChainFamily, ChainIdParts},
    config::RegistryConfig,
    error::{Error, ErrorKind},
    prelude::*,
};
use std::{fs, path::PathBuf, sync::Arc};
use tokio::task::JoinSet;

/// One failed descriptor file
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Failure {
    /// Registry-relative file name (e.g. `cosmos/osmosis.json`)
    pub file: String,

    /// Human-readable cause
    pub message: String,
}

/// Aggregated outcome of one validation run.
///
/// Failures appear in the registry's directory-listing order regardless of
/// the order the concurrent checks settled in.
#[derive(Clone, Debug, Default)]
pub struct ValidationReport {
    failures: Vec<Failure>,
}

impl ValidationReport {
    /// Did any descriptor fail?
    pub fn has_error(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Every failed file with its cause
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Newline-joined `file: message` report for CI annotation tooling
    pub fn error_message(&self) -> String {
        self.failures
            .iter()
            .map(|failure| format!("{}: {}", failure.file, failure.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Drives concurrent per-file validation pipelines
pub struct Runner {
    config: Arc<RegistryConfig>,
}

impl Runner {
    /// Create a runner for the given configuration
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Validate every descriptor in all family directories.
    ///
    /// Each file runs as its own task; one file's failure (structural or
    /// connectivity) never aborts or masks another's check. Only registry
    /// enumeration itself can fail this function.
    pub async fn validate_registry(&self) -> Result<ValidationReport, Error> {
        let files = self.enumerate()?;

        let mut tasks = JoinSet::new();

        for (index, (family, path, file)) in files.iter().enumerate() {
            let family = *family;
            let path = path.clone();
            let file = file.clone();
            let config = Arc::clone(&self.config);

            tasks.spawn(async move {
                let outcome = validate_file(family, &path, &config).await;

                (
                    index,
                    outcome.err().map(|e| Failure {
                        file,
                        message: e.to_string(),
                    }),
                )
            });
        }

        // Settle every task; report slots keep the enumeration order
        let mut slots: Vec<Option<Failure>> = Vec::new();
        slots.resize_with(files.len(), || None);

        while let Some(joined) = tasks.join_next().await {
            let (index, failure) = joined
                .map_err(|e| format_err!(ErrorKind::IoError, "validation task failed: {}", e))?;
            slots[index] = failure;
        }

        Ok(ValidationReport {
            failures: slots.into_iter().flatten().collect(),
        })
    }

    /// Validate a single descriptor file of the given family
    pub async fn validate_path(
        &self,
        family: ChainFamily,
        path: &PathBuf,
    ) -> Result<ChainDescriptor, Error> {
        validate_file(family, path, &self.config).await
    }

    /// List every file in the family directories, in directory order
    /// sorted by name.
    ///
    /// A missing family directory is skipped: registries are allowed to
    /// grow families over time.
    fn enumerate(&self) -> Result<Vec<(ChainFamily, PathBuf, String)>, Error> {
        let mut files = Vec::new();

        for family in ChainFamily::all() {
            let dir = self.config.registry.root.join(family.directory());

            if !dir.is_dir() {
                debug!("no {} directory in registry, skipping", family);
                continue;
            }

            let mut entries = fs::read_dir(&dir)
                .map_err(|e| {
                    format_err!(ErrorKind::IoError, "couldn't list {}: {}", dir.display(), e)
                })?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| {
                    format_err!(ErrorKind::IoError, "couldn't list {}: {}", dir.display(), e)
                })?;

            entries.sort_by_key(|entry| entry.file_name());

            for entry in entries {
                let name = entry.file_name().to_string_lossy().into_owned();
                files.push((
                    *family,
                    entry.path(),
                    format!("{}/{}", family.directory(), name),
                ));
            }
        }

        Ok(files)
    }
}

/// Run the full per-descriptor pipeline: load, normalize, structural check,
/// consistency check, connectivity probes. Terminal on first failure.
pub async fn validate_file(
    family: ChainFamily,
    path: &PathBuf,
    config: &RegistryConfig,
) -> Result<ChainDescriptor, Error> {
    let raw = loader::load(path)?;

    let candidate = match family {
        ChainFamily::Cosmos => normalize::cosmos(&raw, &config.exceptions)?,
        ChainFamily::Evm => normalize::evm(&raw)?,
        ChainFamily::Solana => normalize::solana(&raw)?,
    };

    let checked = schema::check(&candidate)?;

    if family == ChainFamily::Cosmos && checked.gap == Some(schema::SchemaGap::MissingBech32Config)
    {
        fail!(ErrorKind::SchemaError, "\"bech32Config\" is required");
    }

    let descriptor = checked.descriptor;
    consistency::check(&descriptor, family, &raw.name, config)?;

    probe(family, &descriptor, config).await?;

    Ok(descriptor)
}

/// Connectivity leg of the pipeline
async fn probe(
    family: ChainFamily,
    descriptor: &ChainDescriptor,
    config: &RegistryConfig,
) -> Result<(), Error> {
    let prober = Prober::new(config.price.endpoint());
    let identifier = ChainIdParts::identifier(&descriptor.chain_id);
    let probe_chain_id = config.exceptions.probe_chain_id(&descriptor.chain_id);

    match family {
        ChainFamily::Cosmos => {
            prober.check_cosmos_rpc(probe_chain_id, &descriptor.rpc).await?;

            if let Some(evm) = &descriptor.evm {
                prober.check_evm_rpc(evm.chain_id, &evm.rpc).await?;
            }

            let rest_exempt = config
                .exceptions
                .rest_exempt_chains
                .iter()
                .any(|c| c == &identifier);

            if !rest_exempt {
                prober.check_rest(probe_chain_id, &descriptor.rest).await?;
            }
        }

        ChainFamily::Evm => {
            let evm = descriptor.evm.as_ref().ok_or_else(|| {
                format_err!(ErrorKind::SchemaError, "something went wrong with 'evm' field")
            })?;

            prober.check_evm_rpc(evm.chain_id, &descriptor.rpc).await?;
        }

        ChainFamily::Solana => {
            prober.check_solana_rpc(&descriptor.rpc).await?;
        }
    }

    let price_ids = descriptor.price_ids();

    if !price_ids.is_empty() {
        prober.check_price_ids(&price_ids).await?;
    }

    Ok(())
}
