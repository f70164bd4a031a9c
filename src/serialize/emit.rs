//! Kind-specific emitters.
//!
//! Every emitter runs in both passes and decides per pass what to do. "Already claimed"
//! from [`IdRegistry::claim`](crate::IdRegistry::claim) is what turns shared subgraphs into
//! one definition plus references.

use crate::{
    foundation::error::WestleyResult,
    foundation::properties::Properties,
    graph::keys,
    graph::model::{NodeId, PlaylistEntry},
    markup::document::ElementId,
    serialize::driver::{Pass, Serialiser},
    serialize::ids::{Claim, IdKind},
};

impl Serialiser<'_, '_> {
    pub(crate) fn producer(&mut self, id: NodeId, cursor: ElementId) -> WestleyResult<()> {
        let graph = self.graph;
        let parent = graph.cut_parent(id);
        let Some(parent_props) = graph.props(parent) else {
            return Ok(());
        };

        match self.pass {
            Pass::Define => {
                let Claim::Fresh(pid) =
                    self.ids
                        .claim(parent, parent_props.get(keys::ID), IdKind::Producer)
                else {
                    return Ok(());
                };
                let el = self.open(cursor, "producer", &pid, parent_props)?;
                self.copy_attr(el, parent_props, keys::IN);
                self.copy_attr(el, parent_props, keys::OUT);
                self.projector.project_all(&mut *self.sink, parent_props, el)?;
                self.attached_filters(id, el)?;
                self.hide.record(&pid, graph.hide(parent));
            }
            Pass::Reference => {
                let Some(pid) = self.ids.lookup(parent).map(str::to_owned) else {
                    tracing::warn!(node = parent.0, "producer referenced before definition");
                    return Ok(());
                };
                self.sink.set_attribute(cursor, "parent", &pid);
                if let Some(props) = graph.props(id) {
                    self.copy_attr(cursor, props, keys::IN);
                    self.copy_attr(cursor, props, keys::OUT);
                }
            }
        }
        Ok(())
    }

    pub(crate) fn multitrack(&mut self, id: NodeId, cursor: ElementId) -> WestleyResult<()> {
        let graph = self.graph;

        if self.pass == Pass::Define {
            for &track in graph.tracks(id) {
                self.service(Some(graph.cut_parent(track)), cursor)?;
            }
            return Ok(());
        }

        let declared = graph.props(id).and_then(|p| p.get(keys::ID));
        if !self.ids.claim(id, declared, IdKind::MultiTrack).is_fresh() {
            return Ok(());
        }

        for (index, &track) in graph.tracks(id).iter().enumerate() {
            let parent = graph.cut_parent(track);
            let Some(pid) = self.ids.lookup(parent).map(str::to_owned) else {
                tracing::warn!(track = index, node = parent.0, "track producer has no id, skipped");
                continue;
            };

            let el = self.sink.new_element(cursor, "track")?;
            self.sink.set_attribute(el, "producer", &pid);
            if graph.is_cut(track)
                && let Some(cut_props) = graph.props(track)
            {
                self.copy_attr(el, cut_props, keys::IN);
                self.copy_attr(el, cut_props, keys::OUT);
                self.projector.project_stored(&mut *self.sink, cut_props, el)?;
                self.attached_filters(track, el)?;
            }

            if let Some(hide) = self.hide.get(&pid).as_attr() {
                self.sink.set_attribute(el, keys::HIDE, hide);
            }
        }

        self.attached_filters(id, cursor)
    }

    pub(crate) fn playlist(&mut self, id: NodeId, cursor: ElementId) -> WestleyResult<()> {
        let graph = self.graph;
        let Some(props) = graph.props(id) else {
            return Ok(());
        };

        if self.pass == Pass::Reference {
            // Tractors link their own inputs through tracks.
            if self.cursor_name(cursor) != "tractor"
                && let Some(pid) = self.ids.lookup(id).map(str::to_owned)
            {
                self.sink.set_attribute(cursor, "producer", &pid);
            }
            return Ok(());
        }

        let Claim::Fresh(pl_id) = self.ids.claim(id, props.get(keys::ID), IdKind::Playlist) else {
            return Ok(());
        };

        let entries = graph.playlist_entries(id);
        for entry in entries {
            let PlaylistEntry::Clip { producer, .. } = *entry else {
                continue;
            };
            if graph.node(producer).is_none() {
                tracing::debug!(playlist = %pl_id, node = producer.0, "dangling entry skipped");
                continue;
            }
            let parent = graph.cut_parent(producer);
            let nested = graph
                .props(parent)
                .and_then(|p| p.get(keys::RESOURCE))
                == Some(keys::RES_PLAYLIST);
            if nested {
                self.playlist(parent, cursor)?;
            } else {
                self.service(Some(parent), cursor)?;
            }
        }

        let el = self.open(cursor, "playlist", &pl_id, props)?;
        self.projector.project_stored(&mut *self.sink, props, el)?;
        self.hide.record(&pl_id, graph.hide(id));

        for entry in entries {
            match *entry {
                PlaylistEntry::Blank { length } => {
                    let blank = self.sink.new_element(el, "blank")?;
                    self.sink.set_attribute(blank, "length", &length.to_string());
                }
                PlaylistEntry::Clip { producer, repeat } => {
                    let Some(cut_props) = graph.props(producer) else {
                        continue;
                    };
                    let parent = graph.cut_parent(producer);
                    let Some(pid) = self.ids.lookup(parent).map(str::to_owned) else {
                        tracing::warn!(playlist = %pl_id, node = parent.0, "entry producer has no id, skipped");
                        continue;
                    };

                    let e = self.sink.new_element(el, "entry")?;
                    self.sink.set_attribute(e, "producer", &pid);
                    self.sink
                        .set_attribute(e, keys::IN, &cut_props.get_int(keys::IN).to_string());
                    self.sink
                        .set_attribute(e, keys::OUT, &cut_props.get_int(keys::OUT).to_string());
                    if repeat > 1 {
                        self.sink.set_attribute(e, "repeat", &repeat.to_string());
                    }
                    if graph.is_cut(producer) {
                        self.projector.project_stored(&mut *self.sink, cut_props, e)?;
                        self.attached_filters(producer, e)?;
                    }
                }
            }
        }

        self.attached_filters(id, el)
    }

    pub(crate) fn tractor(&mut self, id: NodeId, cursor: ElementId) -> WestleyResult<()> {
        let graph = self.graph;

        if self.pass == Pass::Define {
            return self.service(graph.upstream(id), cursor);
        }

        let Some(props) = graph.props(id) else {
            return Ok(());
        };
        let Claim::Fresh(tid) = self.ids.claim(id, props.get(keys::ID), IdKind::Tractor) else {
            return Ok(());
        };

        let el = self.open(cursor, "tractor", &tid, props)?;
        let global_feed = if id == self.root {
            Some("1")
        } else {
            props.get(keys::GLOBAL_FEED)
        };
        if let Some(feed) = global_feed {
            self.sink.set_attribute(el, keys::GLOBAL_FEED, feed);
        }
        self.copy_attr(el, props, keys::IN);
        self.copy_attr(el, props, keys::OUT);
        self.projector.project_stored(&mut *self.sink, props, el)?;

        self.service(graph.upstream(id), el)?;
        self.attached_filters(id, el)
    }

    pub(crate) fn filter(&mut self, id: NodeId, cursor: ElementId) -> WestleyResult<()> {
        self.decorator(id, cursor, IdKind::Filter, "filter")
    }

    pub(crate) fn transition(&mut self, id: NodeId, cursor: ElementId) -> WestleyResult<()> {
        self.decorator(id, cursor, IdKind::Transition, "transition")
    }

    // Upstream first, so whatever is decorated exists before the decorator is written.
    fn decorator(
        &mut self,
        id: NodeId,
        cursor: ElementId,
        kind: IdKind,
        name: &str,
    ) -> WestleyResult<()> {
        let graph = self.graph;
        self.service(graph.upstream(id), cursor)?;

        if self.pass != Pass::Reference {
            return Ok(());
        }
        let Some(props) = graph.props(id) else {
            return Ok(());
        };
        let Claim::Fresh(did) = self.ids.claim(id, props.get(keys::ID), kind) else {
            return Ok(());
        };

        let el = self.open(cursor, name, &did, props)?;
        self.copy_attr(el, props, keys::IN);
        self.copy_attr(el, props, keys::OUT);
        self.projector.project_all(&mut *self.sink, props, el)?;
        self.attached_filters(id, el)
    }

    /// Filters attached to `owner`, each defined once, nested filters included.
    pub(crate) fn attached_filters(&mut self, owner: NodeId, element: ElementId) -> WestleyResult<()> {
        let graph = self.graph;

        let mut index = 0;
        while let Some(fid) = graph.filter_at(owner, index) {
            index += 1;
            let Some(props) = graph.props(fid) else {
                continue;
            };
            if props.get_int(keys::LOADER_MARKER) != 0 {
                continue;
            }
            let Claim::Fresh(filter_id) = self.ids.claim(fid, props.get(keys::ID), IdKind::Filter)
            else {
                continue;
            };

            let el = self.open(element, "filter", &filter_id, props)?;
            let (fin, fout) = (props.get_int(keys::IN), props.get_int(keys::OUT));
            if fin != 0 || fout != 0 {
                self.sink.set_attribute(el, keys::IN, &fin.to_string());
                self.sink.set_attribute(el, keys::OUT, &fout.to_string());
            }
            self.projector.project_all(&mut *self.sink, props, el)?;
            self.attached_filters(fid, el)?;
        }
        Ok(())
    }

    fn open(
        &mut self,
        parent: ElementId,
        name: &str,
        id: &str,
        props: &Properties,
    ) -> WestleyResult<ElementId> {
        let el = self.sink.new_element(parent, name)?;
        self.sink.set_attribute(el, keys::ID, id);
        self.copy_attr(el, props, keys::TITLE);
        Ok(el)
    }

    fn copy_attr(&mut self, el: ElementId, props: &Properties, key: &str) {
        if let Some(v) = props.get(key) {
            self.sink.set_attribute(el, key, v);
        }
    }
}
