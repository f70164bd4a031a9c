use crate::{
    foundation::error::{WestleyError, WestleyResult},
    foundation::properties::Properties,
    graph::keys,
};

/// Stable handle of a node inside a [`Graph`]. Identity is the handle, never the attributes.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u32);

/// One service in the processing graph.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Node {
    /// Attribute bag, discriminators included.
    #[serde(default)]
    pub props: Properties,
    /// Kind-specific child structure.
    pub kind: NodeKind,
    /// Upstream producer this node decorates or is driven by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer: Option<NodeId>,
    /// Attached filters, in application order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<NodeId>,
    /// Set when this node is a cut (trimmed view) of another node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cut_parent: Option<NodeId>,
}

impl Node {
    /// Node of `kind` with an empty bag and no links.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            props: Properties::new(),
            kind,
            producer: None,
            filters: Vec::new(),
            cut_parent: None,
        }
    }
}

/// Kind-specific structure of a node.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// Leaf producer (also used for cuts).
    Producer,
    /// Ordered blanks and clips.
    Playlist {
        /// Entries in play order.
        #[serde(default)]
        entries: Vec<PlaylistEntry>,
    },
    /// Ordered tracks.
    #[serde(rename = "multitrack")]
    MultiTrack {
        /// Track producers, possibly cuts.
        #[serde(default)]
        tracks: Vec<NodeId>,
    },
    /// Composite driven by the multitrack on its upstream link.
    Tractor,
    /// Filter decorating its upstream link.
    Filter,
    /// Transition applied over its upstream link.
    Transition,
}

/// One playlist slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaylistEntry {
    /// Gap of `length` frames.
    Blank {
        /// Gap length in frames.
        length: u64,
    },
    /// Reference to a producer (normally a cut) played `repeat` times.
    Clip {
        /// Referenced node; its `in`/`out` give the clip range.
        producer: NodeId,
        /// Play count, at least 1.
        #[serde(default = "default_repeat")]
        repeat: u32,
    },
}

fn default_repeat() -> u32 {
    1
}

/// Visibility of a track producer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HideState {
    /// Video and audio visible.
    #[default]
    None,
    /// Video hidden.
    Video,
    /// Audio hidden.
    Audio,
    /// Both hidden.
    Both,
}

impl HideState {
    /// Decode the integer form stored in the `hide` attribute.
    pub fn from_int(v: i64) -> Self {
        match v {
            0 => HideState::None,
            1 => HideState::Video,
            2 => HideState::Audio,
            _ => HideState::Both,
        }
    }

    /// Integer form stored in the `hide` attribute.
    pub fn as_int(self) -> i64 {
        match self {
            HideState::None => 0,
            HideState::Video => 1,
            HideState::Audio => 2,
            HideState::Both => 3,
        }
    }

    /// Value of the `hide` attribute on a `<track>`; `None` means the attribute is absent.
    pub fn as_attr(self) -> Option<&'static str> {
        match self {
            HideState::None => None,
            HideState::Video => Some("video"),
            HideState::Audio => Some("audio"),
            HideState::Both => Some("both"),
        }
    }
}

/// Arena of nodes addressed by [`NodeId`].
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Graph {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    root: Option<NodeId>,
    #[serde(default)]
    nodes: Vec<Node>,
}

impl Graph {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its handle.
    pub fn add(&mut self, node: Node) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(node);
        id
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the graph holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node behind `id`.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Mutable node behind `id`.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Attribute bag of `id`.
    pub fn props(&self, id: NodeId) -> Option<&Properties> {
        self.node(id).map(|n| &n.props)
    }

    /// Node serialized by default: the explicit root, else the last node added.
    pub fn root(&self) -> Option<NodeId> {
        self.root.or_else(|| {
            self.nodes
                .len()
                .checked_sub(1)
                .map(|i| NodeId(i as u32))
        })
    }

    /// Set the explicit root.
    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Upstream producer link of `id`.
    pub fn upstream(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.producer)
    }

    /// Attached filter `i` of `id`.
    pub fn filter_at(&self, id: NodeId, i: usize) -> Option<NodeId> {
        self.node(id).and_then(|n| n.filters.get(i).copied())
    }

    /// Attached filters of `id`.
    pub fn filters(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.filters.as_slice()).unwrap_or(&[])
    }

    /// True when `id` is a cut of another node.
    pub fn is_cut(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.cut_parent.is_some())
    }

    /// The node a cut was taken from; `id` itself when it is not a cut.
    pub fn cut_parent(&self, id: NodeId) -> NodeId {
        self.node(id).and_then(|n| n.cut_parent).unwrap_or(id)
    }

    /// Playlist entries of `id`; empty for other kinds.
    pub fn playlist_entries(&self, id: NodeId) -> &[PlaylistEntry] {
        match self.node(id).map(|n| &n.kind) {
            Some(NodeKind::Playlist { entries }) => entries,
            _ => &[],
        }
    }

    /// Tracks of `id`; empty for other kinds.
    pub fn tracks(&self, id: NodeId) -> &[NodeId] {
        match self.node(id).map(|n| &n.kind) {
            Some(NodeKind::MultiTrack { tracks }) => tracks,
            _ => &[],
        }
    }

    /// Hide state recorded on `id`.
    pub fn hide(&self, id: NodeId) -> HideState {
        HideState::from_int(self.props(id).map(|p| p.get_int(keys::HIDE)).unwrap_or(0))
    }

    /// Check handles, repeat counts and that no node reaches itself through upstream, cut
    /// parent, filter, track or entry links.
    pub fn validate(&self) -> WestleyResult<()> {
        if let Some(root) = self.root {
            self.check_handle(root, "root")?;
        }

        for (i, node) in self.nodes.iter().enumerate() {
            let here = NodeId(i as u32);
            if let Some(up) = node.producer {
                self.check_handle(up, &format!("upstream of node {}", here.0))?;
            }
            if let Some(parent) = node.cut_parent {
                self.check_handle(parent, &format!("cut parent of node {}", here.0))?;
            }
            for &f in &node.filters {
                self.check_handle(f, &format!("filter of node {}", here.0))?;
            }
            match &node.kind {
                NodeKind::MultiTrack { tracks } => {
                    for &t in tracks {
                        self.check_handle(t, &format!("track of node {}", here.0))?;
                    }
                }
                NodeKind::Playlist { entries } => {
                    for (slot, entry) in entries.iter().enumerate() {
                        if let PlaylistEntry::Clip { producer, repeat } = *entry {
                            self.check_handle(
                                producer,
                                &format!("entry {slot} of playlist {}", here.0),
                            )?;
                            if repeat == 0 {
                                return Err(WestleyError::validation(format!(
                                    "entry {slot} of playlist {} has repeat 0",
                                    here.0
                                )));
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        self.check_acyclic()
    }

    fn check_handle(&self, id: NodeId, what: &str) -> WestleyResult<()> {
        if self.node(id).is_none() {
            return Err(WestleyError::validation(format!(
                "{what} references missing node {}",
                id.0
            )));
        }
        Ok(())
    }

    // Depth-first over every link the serializer follows: upstream, cut parent, attached
    // filters, tracks and clip entries.
    fn check_acyclic(&self) -> WestleyResult<()> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            Unseen,
            Open,
            Done,
        }

        let mut marks = vec![Mark::Unseen; self.nodes.len()];
        for i in 0..self.nodes.len() {
            if marks[i] != Mark::Unseen {
                continue;
            }
            marks[i] = Mark::Open;
            let mut stack = vec![(NodeId(i as u32), self.links(NodeId(i as u32)), 0usize)];

            while let Some((here, links, next)) = stack.last_mut() {
                let here = *here;
                let Some(child) = links.get(*next).copied() else {
                    marks[here.0 as usize] = Mark::Done;
                    stack.pop();
                    continue;
                };
                *next += 1;
                match marks.get(child.0 as usize).copied() {
                    Some(Mark::Unseen) => {
                        marks[child.0 as usize] = Mark::Open;
                        stack.push((child, self.links(child), 0));
                    }
                    Some(Mark::Open) => {
                        return Err(WestleyError::validation(format!(
                            "cyclic link from node {} back to node {}",
                            here.0, child.0
                        )));
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn links(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.node(id) else {
            return Vec::new();
        };
        let mut out: Vec<NodeId> = node.producer.into_iter().chain(node.cut_parent).collect();
        out.extend_from_slice(&node.filters);
        match &node.kind {
            NodeKind::MultiTrack { tracks } => out.extend_from_slice(tracks),
            NodeKind::Playlist { entries } => out.extend(entries.iter().filter_map(|e| match *e {
                PlaylistEntry::Clip { producer, .. } => Some(producer),
                PlaylistEntry::Blank { .. } => None,
            })),
            _ => {}
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/model.rs"]
mod tests;
