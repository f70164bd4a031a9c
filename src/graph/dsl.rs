use crate::{
    foundation::error::{WestleyError, WestleyResult},
    graph::keys,
    graph::model::{Graph, HideState, Node, NodeId, NodeKind, PlaylistEntry},
};

/// Builds a [`Graph`] with the discriminator attributes each kind needs.
///
/// ```
/// use westley::GraphBuilder;
///
/// let mut b = GraphBuilder::new();
/// let clip = b.producer("avformat", "clip.dv");
/// b.set_int(clip, "in", 0).unwrap();
/// b.set_int(clip, "out", 99).unwrap();
/// let pl = b.playlist();
/// b.append(pl, clip, 0, 49).unwrap();
/// b.blank(pl, 10).unwrap();
/// let graph = b.root(pl).build().unwrap();
/// assert_eq!(graph.playlist_entries(pl).len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    /// Start from an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Leaf producer of `service` reading `resource`.
    pub fn producer(&mut self, service: &str, resource: &str) -> NodeId {
        let mut node = Node::new(NodeKind::Producer);
        node.props.set(keys::MLT_TYPE, keys::TYPE_PRODUCER);
        node.props.set(keys::MLT_SERVICE, service);
        node.props.set(keys::RESOURCE, resource);
        self.graph.add(node)
    }

    /// Cut of `producer` over `[frame_in, frame_out]`. Cuts of cuts resolve to the parent.
    pub fn cut(&mut self, producer: NodeId, frame_in: i64, frame_out: i64) -> WestleyResult<NodeId> {
        self.require(producer)?;
        let parent = self.graph.cut_parent(producer);
        let mut node = Node::new(NodeKind::Producer);
        node.props.set(keys::MLT_TYPE, keys::TYPE_CONTAINER);
        node.props.set_int(keys::IN, frame_in);
        node.props.set_int(keys::OUT, frame_out);
        node.cut_parent = Some(parent);
        Ok(self.graph.add(node))
    }

    /// Empty playlist.
    pub fn playlist(&mut self) -> NodeId {
        let mut node = Node::new(NodeKind::Playlist {
            entries: Vec::new(),
        });
        node.props.set(keys::MLT_TYPE, keys::TYPE_CONTAINER);
        node.props.set(keys::RESOURCE, keys::RES_PLAYLIST);
        self.graph.add(node)
    }

    /// Append a cut of `producer` to `playlist`; returns the cut.
    pub fn append(
        &mut self,
        playlist: NodeId,
        producer: NodeId,
        frame_in: i64,
        frame_out: i64,
    ) -> WestleyResult<NodeId> {
        self.append_repeat(playlist, producer, frame_in, frame_out, 1)
    }

    /// Append a cut of `producer` played `repeat` times.
    pub fn append_repeat(
        &mut self,
        playlist: NodeId,
        producer: NodeId,
        frame_in: i64,
        frame_out: i64,
        repeat: u32,
    ) -> WestleyResult<NodeId> {
        if repeat == 0 {
            return Err(WestleyError::validation("repeat must be >= 1"));
        }
        let cut = self.cut(producer, frame_in, frame_out)?;
        self.push_entry(
            playlist,
            PlaylistEntry::Clip {
                producer: cut,
                repeat,
            },
        )?;
        Ok(cut)
    }

    /// Append `producer` itself, without taking a cut.
    pub fn append_uncut(&mut self, playlist: NodeId, producer: NodeId) -> WestleyResult<()> {
        self.require(producer)?;
        self.push_entry(
            playlist,
            PlaylistEntry::Clip {
                producer,
                repeat: 1,
            },
        )
    }

    /// Append a gap of `length` frames.
    pub fn blank(&mut self, playlist: NodeId, length: u64) -> WestleyResult<()> {
        self.push_entry(playlist, PlaylistEntry::Blank { length })
    }

    /// Empty multitrack.
    pub fn multitrack(&mut self) -> NodeId {
        let mut node = Node::new(NodeKind::MultiTrack { tracks: Vec::new() });
        node.props.set(keys::MLT_TYPE, keys::TYPE_CONTAINER);
        node.props.set(keys::RESOURCE, keys::RES_MULTITRACK);
        self.graph.add(node)
    }

    /// Append `producer` as the next track of `multitrack`.
    pub fn track(&mut self, multitrack: NodeId, producer: NodeId) -> WestleyResult<()> {
        self.require(producer)?;
        match self.graph.node_mut(multitrack).map(|n| &mut n.kind) {
            Some(NodeKind::MultiTrack { tracks }) => {
                tracks.push(producer);
                Ok(())
            }
            _ => Err(WestleyError::validation(format!(
                "node {} is not a multitrack",
                multitrack.0
            ))),
        }
    }

    /// Tractor driven by `producer` (normally a multitrack, or the last transition over it).
    pub fn tractor(&mut self, producer: NodeId) -> WestleyResult<NodeId> {
        self.require(producer)?;
        let mut node = Node::new(NodeKind::Tractor);
        node.props.set(keys::MLT_TYPE, keys::TYPE_CONTAINER);
        node.props.set(keys::MLT_SERVICE, keys::SERVICE_TRACTOR);
        node.props.set(keys::RESOURCE, keys::RES_TRACTOR);
        node.producer = Some(producer);
        Ok(self.graph.add(node))
    }

    /// Filter of `service` connected downstream of `target`.
    pub fn filter(&mut self, service: &str, target: NodeId) -> WestleyResult<NodeId> {
        self.require(target)?;
        let mut node = Node::new(NodeKind::Filter);
        node.props.set(keys::MLT_TYPE, keys::TYPE_FILTER);
        node.props.set(keys::MLT_SERVICE, service);
        node.producer = Some(target);
        Ok(self.graph.add(node))
    }

    /// Filter of `service` attached to `target`'s own filter list.
    pub fn attach_filter(&mut self, target: NodeId, service: &str) -> WestleyResult<NodeId> {
        self.require(target)?;
        let mut node = Node::new(NodeKind::Filter);
        node.props.set(keys::MLT_TYPE, keys::TYPE_FILTER);
        node.props.set(keys::MLT_SERVICE, service);
        let id = self.graph.add(node);
        if let Some(t) = self.graph.node_mut(target) {
            t.filters.push(id);
        }
        Ok(id)
    }

    /// Transition of `service` between tracks `a_track` and `b_track` of `target`.
    pub fn transition(
        &mut self,
        service: &str,
        target: NodeId,
        a_track: u32,
        b_track: u32,
    ) -> WestleyResult<NodeId> {
        self.require(target)?;
        let mut node = Node::new(NodeKind::Transition);
        node.props.set(keys::MLT_TYPE, keys::TYPE_TRANSITION);
        node.props.set(keys::MLT_SERVICE, service);
        node.props.set_int("a_track", i64::from(a_track));
        node.props.set_int("b_track", i64::from(b_track));
        node.producer = Some(target);
        Ok(self.graph.add(node))
    }

    /// Set a text attribute.
    pub fn set(&mut self, id: NodeId, key: &str, value: &str) -> WestleyResult<()> {
        self.node_mut(id)?.props.set(key, value);
        Ok(())
    }

    /// Set an integer attribute.
    pub fn set_int(&mut self, id: NodeId, key: &str, value: i64) -> WestleyResult<()> {
        self.node_mut(id)?.props.set_int(key, value);
        Ok(())
    }

    /// Record the hide state of a track producer.
    pub fn hide(&mut self, id: NodeId, state: HideState) -> WestleyResult<()> {
        self.set_int(id, keys::HIDE, state.as_int())
    }

    /// Choose the node serialized by default.
    pub fn root(mut self, id: NodeId) -> Self {
        self.graph.set_root(id);
        self
    }

    /// Borrow the graph under construction.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Validate and return the graph.
    pub fn build(self) -> WestleyResult<Graph> {
        self.graph.validate()?;
        Ok(self.graph)
    }

    /// Return the graph without validating it.
    pub fn finish(self) -> Graph {
        self.graph
    }

    fn push_entry(&mut self, playlist: NodeId, entry: PlaylistEntry) -> WestleyResult<()> {
        match self.graph.node_mut(playlist).map(|n| &mut n.kind) {
            Some(NodeKind::Playlist { entries }) => {
                entries.push(entry);
                Ok(())
            }
            _ => Err(WestleyError::validation(format!(
                "node {} is not a playlist",
                playlist.0
            ))),
        }
    }

    fn require(&self, id: NodeId) -> WestleyResult<()> {
        if self.graph.node(id).is_none() {
            return Err(WestleyError::validation(format!("unknown node {}", id.0)));
        }
        Ok(())
    }

    fn node_mut(&mut self, id: NodeId) -> WestleyResult<&mut Node> {
        self.graph
            .node_mut(id)
            .ok_or_else(|| WestleyError::validation(format!("unknown node {}", id.0)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/dsl.rs"]
mod tests;
