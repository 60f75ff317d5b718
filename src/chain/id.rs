//! Chain-id grammar: `{identifier}-{version}`

/// Chain ids whose trailing numeral is part of the name, not a version.
///
/// These registrations predate the grammar below and must keep parsing as
/// themselves.
const PARSE_EXCEPTIONS: &[&str] = &["injective-777", "duality-2"];

/// A chain id split into its identifier and version components
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChainIdParts {
    /// Version-stripped identifier (the registry's primary key)
    pub identifier: String,

    /// Version suffix, or 0 when the id carries none
    pub version: u64,
}

impl ChainIdParts {
    /// Split a chain id on its last `-{digits}` suffix.
    ///
    /// `osmosis-1` parses as (`osmosis`, 1); an id without such a suffix,
    /// e.g. `eip155:1`, is its own identifier with version 0.
    pub fn parse(chain_id: &str) -> Self {
        if PARSE_EXCEPTIONS.contains(&chain_id) {
            return Self {
                identifier: chain_id.to_owned(),
                version: 0,
            };
        }

        if let Some(pos) = chain_id.rfind('-') {
            let (identifier, version) = (&chain_id[..pos], &chain_id[pos + 1..]);

            if !identifier.is_empty() && !version.is_empty() {
                if let Ok(version) = version.parse::<u64>() {
                    return Self {
                        identifier: identifier.to_owned(),
                        version,
                    };
                }
            }
        }

        Self {
            identifier: chain_id.to_owned(),
            version: 0,
        }
    }

    /// Version-stripped identifier for a chain id
    pub fn identifier(chain_id: &str) -> String {
        Self::parse(chain_id).identifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Macro for compactly expressing a chain-id parse expectation
    macro_rules! parse_test {
        ($name:ident, $chain_id:expr, $identifier:expr, $version:expr) => {
            #[test]
            fn $name() {
                let parts = ChainIdParts::parse($chain_id);
                assert_eq!(parts.identifier, $identifier);
                assert_eq!(parts.version, $version);
            }
        };
    }

    parse_test!(versioned_id, "osmosis-1", "osmosis", 1);
    parse_test!(multi_hyphen_id, "axelar-dojo-1", "axelar-dojo", 1);
    parse_test!(underscore_id, "evmos_9001-2", "evmos_9001", 2);
    parse_test!(unversioned_id, "wormchain", "wormchain", 0);
    parse_test!(caip2_evm_id, "eip155:1", "eip155:1", 0);
    parse_test!(
        caip2_solana_id,
        "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp",
        "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp",
        0
    );
    parse_test!(trailing_hyphen, "chain-", "chain-", 0);
    parse_test!(non_numeric_suffix, "chain-x1", "chain-x1", 0);

    // Hard-coded exceptions: the numeral is part of the name
    parse_test!(injective_exception, "injective-777", "injective-777", 0);
    parse_test!(duality_exception, "duality-2", "duality-2", 0);
}
