//! Information about the blockchain networks described by the registry

pub mod denom;
pub mod descriptor;
pub mod features;
pub mod id;

pub use self::{
    denom::DenomKind,
    descriptor::{ChainDescriptor, Currency, FeeCurrency},
    id::ChainIdParts,
};

use std::fmt::{self, Display};

/// Chain families the registry keeps separate directories for.
///
/// The family determines which normalization and sub-descriptor rules
/// apply; it is selected by the caller (directory layout), never sniffed
/// from descriptor content.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ChainFamily {
    /// Cosmos-SDK-style chains
    Cosmos,

    /// EVM-style chains (`eip155:*` identifiers)
    Evm,

    /// Solana-style chains (`solana:*` identifiers)
    Solana,
}

impl ChainFamily {
    /// All families, in registry directory order
    pub fn all() -> &'static [ChainFamily] {
        &[ChainFamily::Cosmos, ChainFamily::Evm, ChainFamily::Solana]
    }

    /// Name of the registry directory holding this family's descriptors
    pub fn directory(self) -> &'static str {
        match self {
            ChainFamily::Cosmos => "cosmos",
            ChainFamily::Evm => "evm",
            ChainFamily::Solana => "solana",
        }
    }

    /// Family for a registry directory name, if it names one
    pub fn from_directory(name: &str) -> Option<Self> {
        match name {
            "cosmos" => Some(ChainFamily::Cosmos),
            "evm" => Some(ChainFamily::Evm),
            "solana" => Some(ChainFamily::Solana),
            _ => None,
        }
    }
}

impl Display for ChainFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.directory())
    }
}
