//! node-registry
//!
//! Connection profiles for remote nodes, the credential-decryption seam,
//! and deterministic selection of the active node among candidates.
//!
//! Pieces:
//! - Profile: address, command set and sealed credential for one node
//! - CredentialVault trait: decryption boundary (real ciphers supplied by
//!   the embedding application; a passthrough impl ships for tests)
//! - NodeStore trait: registry snapshot boundary (in-memory impl included)
//! - Selection: pure first-match-wins functions over a snapshot

pub mod profile;
pub mod select;
pub mod store;
pub mod vault;

pub use profile::{CommandSet, NodeProfile};
pub use select::{first_core_node, first_lightning_node};
pub use store::{InMemoryStore, NodeStore};
pub use vault::{CredentialVault, PlainVault, VaultError};
