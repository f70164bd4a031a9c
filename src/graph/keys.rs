//! Attribute names and discriminator values.
//!
//! `mlt_type` carries the general category, `mlt_service` and `resource` the specific
//! marker. Container producers use the bracketed resource markers.

/// General category attribute.
pub const MLT_TYPE: &str = "mlt_type";
/// Service name attribute.
pub const MLT_SERVICE: &str = "mlt_service";
/// Resource attribute: a path for media producers, a marker for containers.
pub const RESOURCE: &str = "resource";
/// Present on nodes that were themselves loaded from a westley document.
pub const WESTLEY: &str = "westley";

/// Self-declared identifier.
pub const ID: &str = "id";
/// Human-readable title.
pub const TITLE: &str = "title";
/// First frame of the node's range.
pub const IN: &str = "in";
/// Last frame of the node's range.
pub const OUT: &str = "out";
/// Hide state: 0 none, 1 video, 2 audio, 3 both.
pub const HIDE: &str = "hide";
/// Base directory that path-valued attributes are rebased against.
pub const ROOT: &str = "root";
/// Marks the tractor that feeds the consumer.
pub const GLOBAL_FEED: &str = "global_feed";
/// Set on filters a loader inserted on its own; such filters are never serialized.
pub const LOADER_MARKER: &str = "_loader";

/// Category of leaf producers.
pub const TYPE_PRODUCER: &str = "producer";
/// Category of framework container producers (playlist, multitrack, tractor, cuts).
pub const TYPE_CONTAINER: &str = "mlt_producer";
/// Category of filters.
pub const TYPE_FILTER: &str = "filter";
/// Category of transitions.
pub const TYPE_TRANSITION: &str = "transition";

/// Service name of a composite created through the producer factory.
pub const SERVICE_TRACTOR: &str = "tractor";

/// Resource marker of multitracks.
pub const RES_MULTITRACK: &str = "<multitrack>";
/// Resource marker of playlists.
pub const RES_PLAYLIST: &str = "<playlist>";
/// Resource marker of tractors.
pub const RES_TRACTOR: &str = "<tractor>";

/// Key prefix reserved for metadata, always copied onto reference sites.
pub const META_PREFIX: &str = "meta.";
