//! Bitcoin Core JSON-RPC 1.0 client.
//!
//! Requests are POSTed to `/` (or `/wallet/<name>` for wallet-scoped
//! calls) with HTTP basic auth and a `{"jsonrpc":"1.0", ...}` envelope.
//! Core pairs structured error envelopes with 4xx/5xx statuses, so the
//! envelope takes precedence over the status when normalizing.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use crate::error::RpcError;
use crate::transport::{origin, HttpRequest, HttpTransport};

/// Client for one Bitcoin Core node.
#[derive(Clone, Debug)]
pub struct CoreRpc<T: HttpTransport> {
    origin: String,
    auth_header: String,
    wallet: Option<String>,
    transport: T,
}

impl<T: HttpTransport> CoreRpc<T> {
    /// `address` is `host:port`. The scheme defaults to http: the onion
    /// layer supplies the encryption in the deployments this targets.
    pub fn new(
        address: &str,
        rpc_user: &str,
        rpc_password: &str,
        transport: T,
    ) -> Result<Self, RpcError> {
        if address.trim().is_empty() {
            return Err(RpcError::Configuration("node address is empty".into()));
        }
        if rpc_user.trim().is_empty() || rpc_password.is_empty() {
            return Err(RpcError::Configuration(
                "node rpc credentials are empty".into(),
            ));
        }
        let token = general_purpose::STANDARD.encode(format!("{rpc_user}:{rpc_password}"));
        Ok(Self {
            origin: origin(address, "http"),
            auth_header: format!("Basic {token}"),
            wallet: None,
            transport,
        })
    }

    /// Routes wallet-scoped calls to `/wallet/<name>`.
    pub fn with_wallet(mut self, name: &str) -> Self {
        self.wallet = Some(name.to_string());
        self
    }

    fn endpoint(&self) -> Result<Url, RpcError> {
        let raw = match &self.wallet {
            Some(wallet) => format!("{}/wallet/{wallet}", self.origin),
            None => format!("{}/", self.origin),
        };
        Ok(Url::parse(&raw)?)
    }

    /// One JSON-RPC call; returns the envelope's `result` field.
    pub fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        #[derive(Serialize)]
        struct Request<'a> {
            jsonrpc: &'a str,
            id: &'a str,
            method: &'a str,
            params: &'a Value,
        }

        #[derive(Deserialize)]
        struct Envelope {
            result: Option<Value>,
            error: Option<ErrorDetail>,
        }

        #[derive(Deserialize)]
        struct ErrorDetail {
            code: i64,
            message: String,
        }

        let url = self.endpoint()?;
        debug!(%url, method, "core request");
        let body = serde_json::to_vec(&Request {
            jsonrpc: "1.0",
            id: "node-rpc",
            method,
            params: &params,
        })
        .map_err(|e| RpcError::Decode(format!("encode request body: {e}")))?;
        let request = HttpRequest::post_json(url, body).header("Authorization", &self.auth_header);

        let response = self.transport.send(request).map_err(RpcError::from)?;
        let ok = (200..300).contains(&response.status);
        match serde_json::from_slice::<Envelope>(&response.body) {
            Ok(Envelope {
                error: Some(err), ..
            }) => Err(RpcError::Node {
                code: err.code,
                message: err.message,
            }),
            Ok(Envelope {
                result: Some(result),
                ..
            }) if ok => Ok(result),
            Ok(_) if ok => Err(RpcError::Decode(format!("{method}: missing result"))),
            Ok(_) => Err(RpcError::from_status(response.status)),
            Err(_) if !ok => Err(RpcError::from_status(response.status)),
            Err(e) => Err(RpcError::Decode(format!("{method}: {e}"))),
        }
    }

    fn typed<R: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<R, RpcError> {
        let result = self.call(method, params)?;
        serde_json::from_value(result)
            .map_err(|e| RpcError::Decode(format!("{method} decode: {e}")))
    }

    pub fn get_blockchain_info(&self) -> Result<BlockchainInfo, RpcError> {
        self.typed("getblockchaininfo", json!([]))
    }

    pub fn get_network_info(&self) -> Result<NetworkInfo, RpcError> {
        self.typed("getnetworkinfo", json!([]))
    }

    pub fn get_wallet_info(&self) -> Result<WalletInfo, RpcError> {
        self.typed("getwalletinfo", json!([]))
    }

    pub fn get_balances(&self) -> Result<CoreBalances, RpcError> {
        self.typed("getbalances", json!([]))
    }

    pub fn list_unspent(&self) -> Result<Vec<Utxo>, RpcError> {
        self.typed("listunspent", json!([]))
    }

    /// Most recent `count` wallet transactions, in Core's order.
    pub fn list_transactions(&self, count: u32) -> Result<Vec<WalletTransaction>, RpcError> {
        self.typed("listtransactions", json!(["*", count]))
    }

    pub fn get_transaction(&self, txid: &str, include_watchonly: bool) -> Result<Value, RpcError> {
        self.call("gettransaction", json!([txid, include_watchonly]))
    }

    pub fn get_new_address(&self) -> Result<String, RpcError> {
        self.typed("getnewaddress", json!([]))
    }

    pub fn send_raw_transaction(&self, tx_hex: &str) -> Result<String, RpcError> {
        self.typed("sendrawtransaction", json!([tx_hex]))
    }

    pub fn estimate_smart_fee(&self, conf_target: u32) -> Result<FeeEstimate, RpcError> {
        self.typed("estimatesmartfee", json!([conf_target]))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct BlockchainInfo {
    pub chain: String,
    pub blocks: u64,
    pub headers: u64,
    pub verificationprogress: f64,
    pub initialblockdownload: bool,
    pub pruned: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct NetworkInfo {
    pub version: u64,
    pub subversion: String,
    pub connections: u64,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct WalletInfo {
    pub walletname: String,
    pub balance: f64,
    pub unconfirmed_balance: f64,
    pub immature_balance: f64,
    pub txcount: u64,
    pub keypoolsize: u64,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CoreBalances {
    pub mine: BalanceDetail,
}

/// The `getbalances` "mine" block. Trusted is the spendable figure.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct BalanceDetail {
    pub trusted: f64,
    pub untrusted_pending: f64,
    pub immature: f64,
}

/// One `listunspent` entry.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Utxo {
    pub txid: String,
    pub vout: u32,
    pub address: String,
    pub label: String,
    pub amount: f64,
    pub confirmations: i64,
    pub spendable: bool,
    pub solvable: bool,
    pub safe: bool,
    pub desc: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct WalletTransaction {
    pub txid: String,
    pub category: String,
    pub amount: f64,
    pub confirmations: i64,
    pub time: u64,
    pub label: String,
}

/// `estimatesmartfee` result; `feerate` is absent when Core has no
/// estimate for the target.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct FeeEstimate {
    pub feerate: Option<f64>,
    pub errors: Vec<String>,
    pub blocks: u64,
}
