use crate::{
    foundation::error::WestleyResult,
    foundation::properties::Properties,
    graph::keys,
    graph::model::NodeId,
    markup::document::ElementId,
    serialize::driver::{Pass, Serialiser},
};

/// Where the dispatcher sends a node, decided from its discriminator attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Leaf producer; `last` stops the walk up the upstream chain.
    Producer {
        /// The node was loaded from a westley document.
        last: bool,
    },
    /// Multitrack; ends the walk.
    MultiTrack,
    /// Playlist; the walk continues upstream.
    Playlist,
    /// Tractor, run through both passes at once; ends the walk.
    Tractor,
    /// Filter; ends the walk.
    Filter,
    /// Transition; ends the walk.
    Transition,
    /// Unknown category: skip to the upstream producer.
    PassThrough,
}

/// Classify a node. `is_root` reads a `producer` category as a framework container, which
/// is how the run root is always treated.
pub fn route(props: &Properties, is_root: bool) -> Route {
    let category = match props.get(keys::MLT_TYPE) {
        Some(keys::TYPE_PRODUCER) if is_root => Some(keys::TYPE_CONTAINER),
        other => other,
    };

    match category {
        Some(keys::TYPE_PRODUCER) => {
            let loaded = props.get(keys::WESTLEY).is_some();
            if !loaded && props.get(keys::MLT_SERVICE) == Some(keys::SERVICE_TRACTOR) {
                Route::Tractor
            } else {
                Route::Producer { last: loaded }
            }
        }
        Some(keys::TYPE_CONTAINER) => match props.get(keys::RESOURCE) {
            Some(keys::RES_MULTITRACK) => Route::MultiTrack,
            Some(keys::RES_PLAYLIST) => Route::Playlist,
            Some(keys::RES_TRACTOR) => Route::Tractor,
            _ => Route::Producer { last: false },
        },
        Some(keys::TYPE_FILTER) => Route::Filter,
        Some(keys::TYPE_TRANSITION) => Route::Transition,
        _ => Route::PassThrough,
    }
}

impl Serialiser<'_, '_> {
    /// Walk the upstream chain from `start`, handing each node to its emitter.
    pub(crate) fn service(&mut self, start: Option<NodeId>, cursor: ElementId) -> WestleyResult<()> {
        let graph = self.graph;
        let mut current = start;

        while let Some(id) = current {
            let Some(node) = graph.node(id) else {
                tracing::debug!(node = id.0, "upstream link does not resolve");
                break;
            };

            match route(&node.props, id == self.root) {
                Route::Producer { last } => {
                    self.producer(id, cursor)?;
                    if last {
                        break;
                    }
                }
                Route::MultiTrack => {
                    self.multitrack(id, cursor)?;
                    break;
                }
                Route::Playlist => self.playlist(id, cursor)?,
                Route::Tractor => {
                    self.tractor_both_passes(id, cursor)?;
                    break;
                }
                Route::Filter => {
                    self.filter(id, cursor)?;
                    break;
                }
                Route::Transition => {
                    self.transition(id, cursor)?;
                    break;
                }
                Route::PassThrough => {}
            }

            current = node.producer;
        }
        Ok(())
    }

    // A tractor is self-contained: define its inputs, then emit it, then resume the caller's pass.
    fn tractor_both_passes(&mut self, id: NodeId, cursor: ElementId) -> WestleyResult<()> {
        let resume = self.pass;
        self.pass = Pass::Define;
        self.tractor(id, cursor)?;
        self.pass = Pass::Reference;
        self.tractor(id, cursor)?;
        self.pass = resume;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/serialize/dispatch.rs"]
mod tests;
