//! Subcommands of the `chainreg` command-line application

pub mod validate;
pub mod version;

pub use self::{validate::ValidateCommand, version::VersionCommand};

use crate::config::{RegistryConfig, CONFIG_ENV_VAR, CONFIG_FILE_NAME};
use abscissa_core::{Command, Configurable, Runnable};
use clap::Parser;
use std::{env, path::PathBuf};

/// Subcommands of the registry validator command-line application
#[derive(Command, Debug, Parser, Runnable)]
pub enum RegistryCommand {
    /// validate registry descriptors
    Validate(ValidateCommand),

    /// display the version
    Version(VersionCommand),
}

impl RegistryCommand {
    /// Are we configured for verbose logging?
    pub fn verbose(&self) -> bool {
        match self {
            RegistryCommand::Validate(validate) => validate.verbose,
            _ => false,
        }
    }
}

impl Configurable<RegistryConfig> for RegistryCommand {
    /// Get the path to the configuration file, either from the selected
    /// subcommand or the default.
    ///
    /// The config file is optional: defaults are the registry's historical
    /// exception tables, so `None` (use `Default`) when no file exists.
    fn config_path(&self) -> Option<PathBuf> {
        let config = match self {
            RegistryCommand::Validate(validate) => validate.config.as_ref(),
            _ => return None,
        };

        let path = config
            .cloned()
            .or_else(|| env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

        path.exists().then_some(path)
    }
}
