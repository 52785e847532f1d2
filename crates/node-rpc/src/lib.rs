//! node-rpc
//!
//! Blocking clients for remote-controlling Bitcoin Core and LND nodes
//! through an injected HTTP transport, typically routed over Tor via a
//! SOCKS5 proxy. Surfaces:
//! - `LndRest`: LND REST commands (GET /getinfo, POST /addinvoice, ...)
//! - `CoreRpc`: Bitcoin Core JSON-RPC 1.0 (POST / or /wallet/<name>)
//! - `load_balances`: combined on-chain/off-chain balance summary
//!
//! Registry lookup, credential decryption and persistence live with the
//! caller; these clients only build authenticated requests and normalize
//! responses into [`RpcError`]. One call, one `Result` — no retries, no
//! caching, no shared mutable state.

pub mod balances;
pub mod bitcoind;
pub mod error;
pub mod lnd;
pub mod transport;

pub use balances::{load_balances, Balances};
pub use bitcoind::{
    BlockchainInfo, CoreBalances, CoreRpc, FeeEstimate, NetworkInfo, Utxo, WalletInfo,
    WalletTransaction,
};
pub use error::RpcError;
pub use lnd::{LndCommand, LndRest, MACAROON_HEADER};
pub use transport::{
    HttpRequest, HttpResponse, HttpTransport, Method, TorTransport, TransportError,
};
