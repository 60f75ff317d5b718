//! Connectivity prober: live reachability checks for declared endpoints.
//!
//! Every check is a single attempt with the transport's default timeout;
//! retry policy belongs to the calling CI workflow, not here.

use crate::{
    error::{Error, ErrorKind},
    prelude::*,
};
use hyper::{body::Buf, client::HttpConnector, header, Body, Uri};
use hyper_rustls::HttpsConnector;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Liveness prober for one descriptor's endpoints
#[derive(Clone)]
pub struct Prober {
    /// HTTP(S) client shared by all probes for one descriptor
    client: hyper::Client<HttpsConnector<HttpConnector>, Body>,

    /// Price-index lookup endpoint
    price_endpoint: String,
}

/// JSON-RPC request envelope
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u32,
    method: &'a str,
    params: &'a [Value],
}

/// JSON-RPC response envelope
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
}

/// `{rpc}/status` response (CometBFT RPC)
#[derive(Debug, Deserialize)]
struct RpcStatus {
    result: RpcStatusResult,
}

#[derive(Debug, Deserialize)]
struct RpcStatusResult {
    node_info: NodeInfo,
}

#[derive(Debug, Deserialize)]
struct NodeInfo {
    network: String,
}

/// `{rest}/cosmos/base/tendermint/v1beta1/blocks/latest` response
#[derive(Debug, Deserialize)]
struct LatestBlock {
    block: Block,
}

#[derive(Debug, Deserialize)]
struct Block {
    header: BlockHeader,
}

#[derive(Debug, Deserialize)]
struct BlockHeader {
    chain_id: String,
}

impl Prober {
    /// Create a prober querying the given price-index endpoint
    pub fn new(price_endpoint: String) -> Self {
        let connector = HttpsConnector::with_webpki_roots();

        Self {
            client: hyper::Client::builder().build(connector),
            price_endpoint,
        }
    }

    /// Probe a Cosmos RPC endpoint: `/status` must answer with the
    /// expected network id.
    pub async fn check_cosmos_rpc(&self, chain_id: &str, rpc: &str) -> Result<(), Error> {
        let url = format!("{}/status", rpc.trim_end_matches('/'));
        let status: RpcStatus = self.get_json(&url, ErrorKind::RpcUnreachable).await?;
        let network = &status.result.node_info.network;

        if network != chain_id {
            fail!(
                ErrorKind::RpcUnreachable,
                "RPC endpoint {} serves chain {}, expected {}",
                rpc,
                network,
                chain_id
            );
        }

        Ok(())
    }

    /// Probe an EVM JSON-RPC endpoint: `eth_chainId` must answer with the
    /// expected numeric chain id.
    pub async fn check_evm_rpc(&self, evm_chain_id: u64, rpc: &str) -> Result<(), Error> {
        let result = self
            .post_jsonrpc(rpc, "eth_chainId", ErrorKind::RpcUnreachable)
            .await?;

        let answered = result
            .as_str()
            .and_then(parse_hex_quantity)
            .ok_or_else(|| {
                format_err!(
                    ErrorKind::RpcUnreachable,
                    "RPC endpoint {} gave a malformed eth_chainId answer: {}",
                    rpc,
                    result
                )
            })?;

        if answered != evm_chain_id {
            fail!(
                ErrorKind::RpcUnreachable,
                "RPC endpoint {} serves EVM chain {}, expected {}",
                rpc,
                answered,
                evm_chain_id
            );
        }

        Ok(())
    }

    /// Probe a Solana JSON-RPC endpoint: `getHealth` must answer `"ok"`.
    pub async fn check_solana_rpc(&self, rpc: &str) -> Result<(), Error> {
        let result = self
            .post_jsonrpc(rpc, "getHealth", ErrorKind::RpcUnreachable)
            .await?;

        if result.as_str() != Some("ok") {
            fail!(
                ErrorKind::RpcUnreachable,
                "RPC endpoint {} is not healthy: {}",
                rpc,
                result
            );
        }

        Ok(())
    }

    /// Probe a Cosmos REST endpoint: the latest block must carry the
    /// expected chain id.
    pub async fn check_rest(&self, chain_id: &str, rest: &str) -> Result<(), Error> {
        let url = format!(
            "{}/cosmos/base/tendermint/v1beta1/blocks/latest",
            rest.trim_end_matches('/')
        );
        let latest: LatestBlock = self.get_json(&url, ErrorKind::RestUnreachable).await?;
        let network = &latest.block.header.chain_id;

        if network != chain_id {
            fail!(
                ErrorKind::RestUnreachable,
                "REST endpoint {} serves chain {}, expected {}",
                rest,
                network,
                chain_id
            );
        }

        Ok(())
    }

    /// Resolve every declared price id in one batched request.
    pub async fn check_price_ids(&self, ids: &BTreeSet<&str>) -> Result<(), Error> {
        let joined = ids.iter().copied().collect::<Vec<_>>().join(",");
        let url = format!("{}?vs_currencies=usd&ids={}", self.price_endpoint, joined);

        let data: Value = self.get_json(&url, ErrorKind::PriceUnavailable).await?;

        if data.get("error").is_some() {
            fail!(ErrorKind::PriceUnavailable, "failed to fetch coinGeckoId {}", joined);
        }

        for id in ids {
            let usd = data.get(*id).and_then(|entry| entry.get("usd"));

            if usd.map_or(true, Value::is_null) {
                fail!(
                    ErrorKind::PriceUnavailable,
                    "failed to fetch coinGeckoId {} from the price index",
                    id
                );
            }
        }

        Ok(())
    }

    /// GET a JSON document, mapping every failure to the given error kind
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        kind: ErrorKind,
    ) -> Result<T, Error> {
        let uri: Uri = url
            .parse()
            .map_err(|e| format_err!(kind, "invalid URL {}: {}", url, e))?;

        let request = hyper::Request::get(uri)
            .header(header::USER_AGENT, user_agent())
            .body(Body::empty())
            .map_err(|e| format_err!(kind, "{}: {}", url, e))?;

        self.dispatch(request, url, kind).await
    }

    /// POST a JSON-RPC request and return its `result`
    async fn post_jsonrpc(&self, url: &str, method: &str, kind: ErrorKind) -> Result<Value, Error> {
        let uri: Uri = url
            .parse()
            .map_err(|e| format_err!(kind, "invalid URL {}: {}", url, e))?;

        let payload = serde_json::to_vec(&JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params: &[],
        })?;

        let request = hyper::Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::USER_AGENT, user_agent())
            .body(Body::from(payload))
            .map_err(|e| format_err!(kind, "{}: {}", url, e))?;

        let response: JsonRpcResponse = self.dispatch(request, url, kind).await?;

        response
            .result
            .ok_or_else(|| format_err!(kind, "{}: JSON-RPC answer carries no result", url).into())
    }

    async fn dispatch<T: serde::de::DeserializeOwned>(
        &self,
        request: hyper::Request<Body>,
        url: &str,
        kind: ErrorKind,
    ) -> Result<T, Error> {
        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| format_err!(kind, "{}: {}", url, e))?;

        if !response.status().is_success() {
            fail!(kind, "{}: HTTP {}", url, response.status());
        }

        let body = hyper::body::aggregate(response.into_body())
            .await
            .map_err(|e| format_err!(kind, "{}: {}", url, e))?;

        serde_json::from_reader(body.reader())
            .map_err(|e| format_err!(kind, "{}: malformed answer: {}", url, e).into())
    }
}

fn user_agent() -> String {
    format!("chainreg/{}", env!("CARGO_PKG_VERSION"))
}

/// Parse an `0x`-prefixed hex quantity
fn parse_hex_quantity(s: &str) -> Option<u64> {
    u64::from_str_radix(s.strip_prefix("0x")?, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_quantities() {
        assert_eq!(parse_hex_quantity("0x1"), Some(1));
        assert_eq!(parse_hex_quantity("0xa4b1"), Some(42161));
        assert_eq!(parse_hex_quantity("1"), None);
        assert_eq!(parse_hex_quantity("0xzz"), None);
    }
}
