//! Serializes media-processing service graphs into westley XML documents.
//!
//! A [`Graph`] holds producers, playlists, multitracks, tractors, filters and transitions.
//! [`serialize`] walks it from a root in two passes: shared leaves and playlists are
//! defined once, then composites and references are emitted against those definitions.
//! [`Consumer`] wraps a run and delivers the text to stdout, a file or one of its
//! own properties.
//!
//! ```
//! use westley::{Format, GraphBuilder, SerializeOptions, serialize};
//!
//! let mut b = GraphBuilder::new();
//! let clip = b.producer("avformat", "/media/clip.dv");
//! let pl = b.playlist();
//! b.append(pl, clip, 0, 24).unwrap();
//! let graph = b.root(pl).build().unwrap();
//!
//! let opts = SerializeOptions {
//!     root: Some("/media".into()),
//!     ..Default::default()
//! };
//! let doc = serialize(&graph, pl, &opts).unwrap();
//! let xml = doc.to_xml_string(Format::Pretty);
//! assert!(xml.contains(r#"<property name="resource">clip.dv</property>"#));
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod consumer;
mod foundation;
mod graph;
mod markup;
mod serialize;

pub use consumer::config::{ConsumerConfig, Delivery};
pub use consumer::xml::Consumer;
pub use foundation::error::{WestleyError, WestleyResult};
pub use foundation::properties::{DataValue, Properties, Value};
pub use graph::dsl::GraphBuilder;
pub use graph::keys;
pub use graph::model::{Graph, HideState, Node, NodeId, NodeKind, PlaylistEntry};
pub use markup::document::{Document, Element, ElementId, MarkupSink};
pub use markup::writer::{Format, escape_attr, escape_text};
pub use serialize::dispatch::{Route, route};
pub use serialize::driver::{DOCUMENT_ELEMENT, Pass, SerializeOptions, serialize, serialize_into};
pub use serialize::ids::{Claim, IdKind, IdRegistry};
pub use serialize::project::{EXCLUDED_KEYS, Projector};
pub use serialize::visibility::VisibilityTable;
