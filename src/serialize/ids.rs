use std::collections::HashMap;

use crate::graph::model::NodeId;

/// Kind used to synthesize identifiers; each kind has its own counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdKind {
    /// `producer<n>`
    Producer,
    /// `multitrack<n>`
    MultiTrack,
    /// `playlist<n>`
    Playlist,
    /// `tractor<n>`
    Tractor,
    /// `filter<n>`
    Filter,
    /// `transition<n>`
    Transition,
}

impl IdKind {
    /// Prefix of synthesized identifiers.
    pub fn prefix(self) -> &'static str {
        match self {
            IdKind::Producer => "producer",
            IdKind::MultiTrack => "multitrack",
            IdKind::Playlist => "playlist",
            IdKind::Tractor => "tractor",
            IdKind::Filter => "filter",
            IdKind::Transition => "transition",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Outcome of [`IdRegistry::claim`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Claim {
    /// The node was not registered; it now owns this identifier and must be defined.
    Fresh(String),
    /// The node was already registered under this identifier; it is already defined.
    Existing(String),
}

impl Claim {
    /// The identifier, whichever way it was obtained.
    pub fn id(&self) -> &str {
        match self {
            Claim::Fresh(id) | Claim::Existing(id) => id,
        }
    }

    /// True for [`Claim::Fresh`].
    pub fn is_fresh(&self) -> bool {
        matches!(self, Claim::Fresh(_))
    }
}

/// Per-run association between node identity and identifier.
///
/// Append-only and order-preserving. Identifiers are unique across all kinds.
#[derive(Debug, Default)]
pub struct IdRegistry {
    order: Vec<(NodeId, String)>,
    by_node: HashMap<NodeId, usize>,
    by_id: HashMap<String, NodeId>,
    counters: [u32; 6],
}

impl IdRegistry {
    /// Empty registry with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim an identifier for `node`.
    ///
    /// `declared` is the node's own `id` attribute; it is reused when no other node holds
    /// it. Otherwise `<prefix><counter>` is synthesized, skipping any string already taken.
    pub fn claim(&mut self, node: NodeId, declared: Option<&str>, kind: IdKind) -> Claim {
        if let Some(&i) = self.by_node.get(&node) {
            return Claim::Existing(self.order[i].1.clone());
        }

        let id = match declared {
            Some(d) if !d.is_empty() && !self.by_id.contains_key(d) => d.to_owned(),
            _ => {
                if let Some(d) = declared {
                    tracing::debug!(declared = d, node = node.0, "declared id unavailable");
                }
                self.synthesize(kind)
            }
        };

        tracing::debug!(id = %id, node = node.0, "claimed id");
        self.by_node.insert(node, self.order.len());
        self.by_id.insert(id.clone(), node);
        self.order.push((node, id.clone()));
        Claim::Fresh(id)
    }

    /// Identifier of an already registered node. Never allocates.
    pub fn lookup(&self, node: NodeId) -> Option<&str> {
        self.by_node.get(&node).map(|&i| self.order[i].1.as_str())
    }

    /// Node holding `id`.
    pub fn owner(&self, id: &str) -> Option<NodeId> {
        self.by_id.get(id).copied()
    }

    /// Number of claims.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True before the first claim.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Claims in the order they were made.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &str)> {
        self.order.iter().map(|(n, id)| (*n, id.as_str()))
    }

    fn synthesize(&mut self, kind: IdKind) -> String {
        loop {
            let counter = &mut self.counters[kind.slot()];
            let candidate = format!("{}{}", kind.prefix(), *counter);
            *counter += 1;
            if !self.by_id.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/serialize/ids.rs"]
mod tests;
