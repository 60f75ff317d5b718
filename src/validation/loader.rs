//! Descriptor loader: file → raw JSON record

use crate::{
    error::{Error, ErrorKind},
    prelude::*,
};
use serde_json::Value;
use std::{fs, path::Path};

/// A raw descriptor: parsed file content plus the file's base name.
///
/// The base name doubles as the expected chain identifier and is matched
/// against the descriptor's own `chainId` by the consistency validator.
#[derive(Clone, Debug)]
pub struct RawDescriptor {
    /// File base name (e.g. `osmosis`, `eip155:1`)
    pub name: String,

    /// Parsed file content
    pub value: Value,
}

/// Read and parse one descriptor file.
///
/// The file must carry the `.json` extension; no other validation happens
/// here and no network access occurs.
pub fn load(path: &Path) -> Result<RawDescriptor, Error> {
    if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
        fail!(ErrorKind::NotJson, "file is not json: {}", path.display());
    }

    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(ToOwned::to_owned)
        .ok_or_else(|| format_err!(ErrorKind::NotJson, "invalid file name: {}", path.display()))?;

    let contents = fs::read_to_string(path)
        .map_err(|e| format_err!(ErrorKind::IoError, "couldn't read {}: {}", path.display(), e))?;

    let value = serde_json::from_str(&contents)
        .map_err(|e| format_err!(ErrorKind::ParseError, "couldn't parse {}: {}", path.display(), e))?;

    Ok(RawDescriptor { name, value })
}
