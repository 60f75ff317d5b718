//! Descriptor validation pipeline.
//!
//! One descriptor flows through loader → normalizer → structural validator
//! → consistency validator → connectivity prober; the runner drives every
//! file in the registry through that pipeline concurrently and aggregates
//! the outcomes into a single pass/fail report.

pub mod consistency;
pub mod loader;
pub mod normalize;
pub mod probe;
pub mod runner;
pub mod schema;

pub use self::runner::{Failure, Runner, ValidationReport};
