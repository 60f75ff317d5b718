//! Chain registry validation engine

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod application;
pub mod chain;
pub mod commands;
pub mod config;
pub mod error;
pub mod prelude;
pub mod validation;

pub use crate::application::RegistryApp;

// Map type used within this application
pub(crate) use std::collections::BTreeMap as Map;
