// SPDX-License-Identifier: Apache-2.0

//! Deterministic selection of the active node among candidates.

use crate::profile::{CommandSet, NodeProfile};

/// First lightning profile in snapshot order that carries a credential.
///
/// Ties resolve by position: the first match wins. Callers that want
/// "most recently added wins" order their snapshot accordingly.
pub fn first_lightning_node(nodes: &[NodeProfile]) -> Option<&NodeProfile> {
    nodes
        .iter()
        .find(|n| n.command_set == CommandSet::LndRest && n.has_credential())
}

/// First Core profile in snapshot order that carries a credential.
pub fn first_core_node(nodes: &[NodeProfile]) -> Option<&NodeProfile> {
    nodes
        .iter()
        .find(|n| n.command_set == CommandSet::CoreRpc && n.has_credential())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str, command_set: CommandSet, credential: &str) -> NodeProfile {
        NodeProfile {
            id: id.into(),
            label: String::new(),
            address: format!("{id}.onion"),
            command_set,
            credential: credential.into(),
        }
    }

    #[test]
    fn first_match_wins_in_snapshot_order() {
        let nodes = vec![
            profile("a", CommandSet::CoreRpc, "user:pass"),
            profile("b", CommandSet::LndRest, "aa00"),
            profile("c", CommandSet::LndRest, "bb11"),
        ];
        assert_eq!(first_lightning_node(&nodes).expect("lightning").id, "b");
        assert_eq!(first_core_node(&nodes).expect("core").id, "a");
    }

    #[test]
    fn profiles_without_credentials_are_skipped() {
        let nodes = vec![
            profile("a", CommandSet::LndRest, "  "),
            profile("b", CommandSet::LndRest, "cc22"),
        ];
        assert_eq!(first_lightning_node(&nodes).expect("lightning").id, "b");
    }

    #[test]
    fn empty_snapshot_selects_nothing() {
        assert!(first_lightning_node(&[]).is_none());
        assert!(first_core_node(&[]).is_none());
    }
}
