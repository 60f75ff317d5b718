//! Configuration file structures (with serde-derived parser)

use crate::Map;
use serde::Deserialize;
use std::{env, path::PathBuf};

/// Environment variable containing path to config file
pub const CONFIG_ENV_VAR: &str = "CHAINREG_CONFIG";

/// Name of the registry validator configuration file
pub const CONFIG_FILE_NAME: &str = "chainreg.toml";

/// Environment variable overriding the price-index endpoint
pub const PRICE_URL_ENV_VAR: &str = "PRICE_URL";

/// Registry validator configuration (i.e. TOML file parsed with serde)
///
/// Every field has a default, so running without a config file validates
/// the registry rooted in the current directory with the historical
/// exception tables.
#[derive(Clone, Default, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Location of the registry directories
    #[serde(default)]
    pub registry: RegistrySection,

    /// Price-index service used to resolve price ids
    #[serde(default)]
    pub price: PriceSection,

    /// Historical per-chain exceptions to the validation rules
    #[serde(default)]
    pub exceptions: ExceptionsSection,

    /// Chains natively integrated by the wallet (submission checks)
    #[serde(default)]
    pub submission: SubmissionSection,
}

/// `[registry]` section
#[derive(Clone, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct RegistrySection {
    /// Directory containing the `cosmos/`, `evm/` and `solana/` subdirectories
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Base URL under which per-chain image assets are hosted
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Permit `http://` RPC/REST endpoints.
    ///
    /// Only for local or staging registries; the published registry always
    /// requires TLS.
    #[serde(default)]
    pub allow_insecure_endpoints: bool,
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            root: default_root(),
            image_base_url: default_image_base_url(),
            allow_insecure_endpoints: false,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_image_base_url() -> String {
    "https://raw.githubusercontent.com/chainapsis/keplr-chain-registry/main/images/".to_owned()
}

/// `[price]` section
#[derive(Clone, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct PriceSection {
    /// Price-index lookup endpoint (comma-joined ids, usd quotes)
    #[serde(default = "default_price_endpoint")]
    pub endpoint: String,
}

impl Default for PriceSection {
    fn default() -> Self {
        Self {
            endpoint: default_price_endpoint(),
        }
    }
}

fn default_price_endpoint() -> String {
    "https://api.coingecko.com/api/v3/simple/price".to_owned()
}

impl PriceSection {
    /// Endpoint to query, honoring the `PRICE_URL` environment override
    pub fn endpoint(&self) -> String {
        env::var(PRICE_URL_ENV_VAR).unwrap_or_else(|_| self.endpoint.clone())
    }
}

/// An allow-listed `(chain identifier, IBC denomination)` pair
#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct IbcAllowedDenom {
    /// Version-stripped chain identifier the exception applies to
    pub chain: String,

    /// Full `ibc/`-prefixed minimal denomination
    pub denom: String,
}

/// `[exceptions]` section.
///
/// The registry has accumulated a handful of per-chain exceptions over the
/// years. They are configuration rather than code so registry maintainers
/// can edit them without touching the validator, but the defaults must stay
/// in sync with what the registry actually contains.
#[derive(Clone, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct ExceptionsSection {
    /// IBC denominations tolerated in `currencies` for specific chains
    #[serde(default = "default_ibc_allowed")]
    pub ibc_allowed: Vec<IbcAllowedDenom>,

    /// Chains exempt from the IBC denomination rejection entirely
    #[serde(default = "default_ibc_exempt_chains")]
    pub ibc_exempt_chains: Vec<String>,

    /// Chains exempt from the fee-currency-in-currencies rule
    #[serde(default = "default_fee_exempt_chains")]
    pub fee_exempt_chains: Vec<String>,

    /// Chains whose REST endpoint is not probed (no conventional REST surface)
    #[serde(default = "default_rest_exempt_chains")]
    pub rest_exempt_chains: Vec<String>,

    /// Chains permitted to set `hideInUI`
    #[serde(default = "default_hidden_chains")]
    pub hidden_chains: Vec<String>,

    /// Chain-id substitutions applied before connectivity probes.
    ///
    /// Some EVM-variant descriptors share a node with their Cosmos twin and
    /// report the twin's network id.
    #[serde(default = "default_shadow_chain_ids")]
    pub shadow_chain_ids: Map<String, String>,
}

impl Default for ExceptionsSection {
    fn default() -> Self {
        Self {
            ibc_allowed: default_ibc_allowed(),
            ibc_exempt_chains: default_ibc_exempt_chains(),
            fee_exempt_chains: default_fee_exempt_chains(),
            rest_exempt_chains: default_rest_exempt_chains(),
            hidden_chains: default_hidden_chains(),
            shadow_chain_ids: default_shadow_chain_ids(),
        }
    }
}

fn default_ibc_allowed() -> Vec<IbcAllowedDenom> {
    [
        (
            "osmosis",
            "ibc/0FA9232B262B89E77D1335D54FB1E1F506A92A7E4B51524B400DC69C68D28372",
        ),
        (
            "osmosis",
            "ibc/C7110DEC66869DAE9BE9C3C60F4B5313B16A2204AE020C3B0527DD6B322386A3",
        ),
        (
            "osmosis",
            "ibc/573FCD90FACEE750F55A8864EF7D38265F07E5A9273FA0E8DAFD39951332B580",
        ),
        (
            "neutron",
            "ibc/9598CDEB7C6DB7FC21E746C8E0250B30CD5154F39CA111A9D4948A4362F638BD",
        ),
    ]
    .iter()
    .map(|(chain, denom)| IbcAllowedDenom {
        chain: (*chain).to_owned(),
        denom: (*denom).to_owned(),
    })
    .collect()
}

fn default_ibc_exempt_chains() -> Vec<String> {
    vec!["centauri".to_owned()]
}

fn default_fee_exempt_chains() -> Vec<String> {
    vec!["gravity-bridge".to_owned()]
}

fn default_rest_exempt_chains() -> Vec<String> {
    vec![
        "gravity-bridge".to_owned(),
        "sommelier".to_owned(),
        "kyve".to_owned(),
    ]
}

fn default_hidden_chains() -> Vec<String> {
    vec!["wormchain".to_owned()]
}

fn default_shadow_chain_ids() -> Map<String, String> {
    [
        ("mantra-dukong-evm-1", "mantra-dukong-1"),
        ("mantra-evm-1", "mantra-1"),
    ]
    .iter()
    .map(|(from, to)| ((*from).to_owned(), (*to).to_owned()))
    .collect()
}

impl ExceptionsSection {
    /// Is the given `(chain, denom)` pair allow-listed?
    pub fn is_ibc_denom_allowed(&self, chain_identifier: &str, denom: &str) -> bool {
        self.ibc_exempt_chains.iter().any(|c| c == chain_identifier)
            || self
                .ibc_allowed
                .iter()
                .any(|entry| entry.chain == chain_identifier && entry.denom == denom)
    }

    /// Chain id to present to connectivity probes
    pub fn probe_chain_id<'a>(&'a self, chain_id: &'a str) -> &'a str {
        self.shadow_chain_ids
            .get(chain_id)
            .map(String::as_str)
            .unwrap_or(chain_id)
    }
}

/// `[submission]` section
#[derive(Clone, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct SubmissionSection {
    /// Version-stripped identifiers of natively integrated mainnets
    #[serde(default = "default_native_chains")]
    pub native_chains: Vec<String>,

    /// Version-stripped identifiers of natively integrated testnets
    #[serde(default = "default_native_testnet_chains")]
    pub native_testnet_chains: Vec<String>,
}

impl Default for SubmissionSection {
    fn default() -> Self {
        Self {
            native_chains: default_native_chains(),
            native_testnet_chains: default_native_testnet_chains(),
        }
    }
}

fn default_native_chains() -> Vec<String> {
    [
        "cosmoshub",
        "osmosis",
        "juno",
        "agoric",
        "akashnet",
        "axelar-dojo",
        "bostrom",
        "core",
        "evmos_9001",
        "irishub",
        "kava_2222",
        "regen",
        "secret",
        "sentinelhub",
        "sommelier",
        "stargaze",
        "stride",
        "umee",
        "crypto-org-chain-mainnet",
        "quicksilver",
        "columbus",
        "phoenix",
        "quasar",
        "noble",
        "injective",
        "omniflixhub",
        "kyve",
        "neutron",
        "likecoin-mainnet",
        "dydx-mainnet",
        "celestia",
        "passage",
        "dymension_1100",
        "chihuahua",
        "ssc",
        "seda",
        "dimension_37",
        "pryzm",
        "zetachain_7000",
        "lava-mainnet",
        "mantra",
        "pirin",
        "xion-mainnet",
        "jackal",
        "elys",
        "nillion",
        "bbn",
        "eip155:1",
        "eip155:10",
        "eip155:56",
        "eip155:130",
        "eip155:137",
        "eip155:1514",
        "eip155:8453",
        "eip155:42161",
        "eip155:43114",
        "eip155:81457",
        "eip155:80094",
    ]
    .iter()
    .map(|s| (*s).to_owned())
    .collect()
}

fn default_native_testnet_chains() -> Vec<String> {
    [
        "axelar-testnet-lisbon",
        "atlantic",
        "blockspacerace",
        "mocha",
        "elgafar",
        "osmo-test",
        "pion",
        "theta-testnet",
        "provider",
        "dydx-testnet",
        "ssc-testnet",
        "test-core",
        "govgen",
        "seda-1-testnet",
        "initiation",
        "nillion-chain-testnet",
        "athens_7001",
        "mantra-dukong",
        "grand",
    ]
    .iter()
    .map(|s| (*s).to_owned())
    .collect()
}

impl SubmissionSection {
    /// Is the identifier a natively integrated mainnet?
    pub fn is_native_mainnet(&self, chain_identifier: &str) -> bool {
        self.native_chains.iter().any(|s| s.trim() == chain_identifier)
    }

    /// Is the identifier a natively integrated testnet?
    pub fn is_native_testnet(&self, chain_identifier: &str) -> bool {
        self.native_testnet_chains
            .iter()
            .any(|s| s.trim() == chain_identifier)
    }
}
