//! Error types

use abscissa_core::error::{BoxError, Context};
use std::{
    fmt::{self, Display},
    io,
    ops::Deref,
};
use thiserror::Error;

/// Kinds of errors
#[derive(Copy, Clone, Eq, PartialEq, Debug, Error)]
pub enum ErrorKind {
    /// `beta` marker field is no longer accepted
    #[error("beta field not allowed")]
    BetaField,

    /// Chain ID in the descriptor doesn't match its file name
    #[error("chain identifier mismatch")]
    ChainIdMismatch,

    /// Error in configuration file
    #[error("config error")]
    ConfigError,

    /// Currency set relationship or denomination violation
    #[error("currency error")]
    CurrencyError,

    /// Feature flag which is permanently deprecated
    #[error("deprecated feature")]
    DeprecatedFeature,

    /// Chain requested to be hidden without an exemption
    #[error("hidden chain not allowed")]
    HiddenChain,

    /// Error making an HTTP request
    #[error("HTTP error")]
    HttpError,

    /// Endpoint declared with an unencrypted scheme
    #[error("insecure endpoint")]
    InsecureEndpoint,

    /// Chain ID doesn't follow its family's grammar
    #[error("invalid chain ID")]
    InvalidChainId,

    /// Input/output error
    #[error("I/O error")]
    IoError,

    /// Descriptor file doesn't carry the `.json` extension
    #[error("file is not json")]
    NotJson,

    /// Parse error
    #[error("parse error")]
    ParseError,

    /// Price-index ids aren't declared consistently across currency sets
    #[error("price id consistency error")]
    PriceIdConsistency,

    /// Price-index service doesn't know a declared id
    #[error("price id unavailable")]
    PriceUnavailable,

    /// REST endpoint is unreachable or gave a bad answer
    #[error("REST endpoint unreachable")]
    RestUnreachable,

    /// RPC endpoint is unreachable or gave a bad answer
    #[error("RPC endpoint unreachable")]
    RpcUnreachable,

    /// Descriptor doesn't match the declared schema
    #[error("schema error")]
    SchemaError,

    /// Serialization error
    #[error("serialization error")]
    SerializationError,

    /// Testnet naming and the testnet flag disagree
    #[error("testnet flag mismatch")]
    TestnetMismatch,

    /// Descriptor carries a field the schema doesn't declare
    #[error("unknown field")]
    UnknownField,

    /// Feature flag outside the recognized vocabulary
    #[error("unrecognized feature")]
    UnrecognizedFeature,
}

impl ErrorKind {
    /// Create an error context from this error
    pub fn context(self, source: impl Into<BoxError>) -> Context<ErrorKind> {
        Context::new(self, Some(source.into()))
    }
}

/// Error type
#[derive(Debug)]
pub struct Error(Box<Context<ErrorKind>>);

impl Deref for Error {
    type Target = Context<ErrorKind>;

    fn deref(&self) -> &Context<ErrorKind> {
        &self.0
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Context::new(kind, None).into()
    }
}

impl From<Context<ErrorKind>> for Error {
    fn from(context: Context<ErrorKind>) -> Self {
        Error(Box::new(context))
    }
}

impl From<hyper::Error> for Error {
    fn from(other: hyper::Error) -> Self {
        ErrorKind::HttpError.context(other).into()
    }
}

impl From<hyper::http::Error> for Error {
    fn from(other: hyper::http::Error) -> Self {
        ErrorKind::HttpError.context(other).into()
    }
}

impl From<io::Error> for Error {
    fn from(other: io::Error) -> Self {
        ErrorKind::IoError.context(other).into()
    }
}

impl From<serde_json::error::Error> for Error {
    fn from(other: serde_json::error::Error) -> Self {
        ErrorKind::SerializationError.context(other).into()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}
