//! Minimal-denomination classification

/// Kind of a minimal denomination, selected by its `{kind}:` prefix.
///
/// A denomination without a recognized prefix is native. Note that
/// `ibc/`-prefixed denominations classify as native here; whether they are
/// acceptable is a registry policy question handled by the consistency
/// rules, not a property of the denomination itself.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DenomKind {
    /// On-chain native denomination
    Native,

    /// ERC-20 contract denomination (`erc20:{address}`)
    Erc20,

    /// CosmWasm CW-20 contract denomination (`cw20:{address}`)
    Cw20,

    /// Secret Network SNIP-20 contract denomination (`secret20:{address}`)
    Secret20,
}

impl DenomKind {
    /// Classify a minimal denomination
    pub fn classify(minimal_denom: &str) -> Self {
        match minimal_denom.split_once(':').map(|(kind, _)| kind) {
            Some("erc20") => DenomKind::Erc20,
            Some("cw20") => DenomKind::Cw20,
            Some("secret20") => DenomKind::Secret20,
            _ => DenomKind::Native,
        }
    }

    /// Is this kind acceptable in a registry `currencies` list?
    pub fn is_listable(self) -> bool {
        matches!(self, DenomKind::Native | DenomKind::Erc20)
    }
}

/// Is the denomination an IBC voucher (`ibc/{hash}`)?
pub fn is_ibc_denom(minimal_denom: &str) -> bool {
    minimal_denom.starts_with("ibc/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_prefixes() {
        assert_eq!(DenomKind::classify("uatom"), DenomKind::Native);
        assert_eq!(
            DenomKind::classify("erc20:0xdac17f958d2ee523a2206206994597c13d831ec7"),
            DenomKind::Erc20
        );
        assert_eq!(
            DenomKind::classify("cw20:juno1abc"),
            DenomKind::Cw20
        );
        assert_eq!(
            DenomKind::classify("secret20:secret1abc"),
            DenomKind::Secret20
        );
    }

    #[test]
    fn ibc_vouchers_are_native_kind() {
        let denom = "ibc/0FA9232B262B89E77D1335D54FB1E1F506A92A7E4B51524B400DC69C68D28372";
        assert_eq!(DenomKind::classify(denom), DenomKind::Native);
        assert!(is_ibc_denom(denom));
        assert!(!is_ibc_denom("uosmo"));
    }

    #[test]
    fn listable_kinds() {
        assert!(DenomKind::Native.is_listable());
        assert!(DenomKind::Erc20.is_listable());
        assert!(!DenomKind::Cw20.is_listable());
        assert!(!DenomKind::Secret20.is_listable());
    }
}
