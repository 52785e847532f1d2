use serde::{Deserialize, Serialize};

/// Which wire surface a node speaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandSet {
    CoreRpc,
    LndRest,
}

/// Read-only connection profile for one node. Selected per request from a
/// registry snapshot; never mutated by the RPC clients.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeProfile {
    pub id: String,
    pub label: String,
    /// Network location, typically an onion host[:port].
    pub address: String,
    pub command_set: CommandSet,
    /// Sealed credential; opaque until a vault opens it. The plaintext is
    /// `rpcuser:rpcpassword` for Core nodes and the macaroon hex for LND.
    pub credential: String,
}

impl NodeProfile {
    pub fn has_credential(&self) -> bool {
        !self.credential.trim().is_empty()
    }
}
