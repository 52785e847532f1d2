use parking_lot::RwLock;

use crate::profile::NodeProfile;

/// Registry snapshot seam. Real persistence is supplied by the embedding
/// application; [`InMemoryStore`] covers tests and ad-hoc tooling.
pub trait NodeStore: Send + Sync {
    /// Immutable snapshot of every known profile, in registry order.
    fn list(&self) -> Vec<NodeProfile>;
}

#[derive(Default)]
pub struct InMemoryStore {
    nodes: RwLock<Vec<NodeProfile>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, profile: NodeProfile) {
        self.nodes.write().push(profile);
    }
}

impl NodeStore for InMemoryStore {
    fn list(&self) -> Vec<NodeProfile> {
        self.nodes.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::CommandSet;

    #[test]
    fn snapshot_preserves_insertion_order() {
        let store = InMemoryStore::new();
        store.add(NodeProfile {
            id: "a".into(),
            label: "first".into(),
            address: "a.onion".into(),
            command_set: CommandSet::CoreRpc,
            credential: "user:pass".into(),
        });
        store.add(NodeProfile {
            id: "b".into(),
            label: "second".into(),
            address: "b.onion".into(),
            command_set: CommandSet::LndRest,
            credential: "deadbeef".into(),
        });

        let snapshot = store.list();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].id, "a");
        assert_eq!(snapshot[1].id, "b");
    }
}
