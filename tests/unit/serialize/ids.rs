use super::*;

#[test]
fn counters_are_per_kind() {
    let mut ids = IdRegistry::new();
    assert_eq!(
        ids.claim(NodeId(0), None, IdKind::Producer),
        Claim::Fresh("producer0".into())
    );
    assert_eq!(
        ids.claim(NodeId(1), None, IdKind::Playlist),
        Claim::Fresh("playlist0".into())
    );
    assert_eq!(
        ids.claim(NodeId(2), None, IdKind::Producer),
        Claim::Fresh("producer1".into())
    );
}

#[test]
fn second_claim_reports_existing() {
    let mut ids = IdRegistry::new();
    ids.claim(NodeId(4), None, IdKind::Filter);
    let again = ids.claim(NodeId(4), None, IdKind::Filter);
    assert_eq!(again, Claim::Existing("filter0".into()));
    assert!(!again.is_fresh());
    assert_eq!(ids.len(), 1);
}

#[test]
fn lookup_never_allocates() {
    let mut ids = IdRegistry::new();
    assert_eq!(ids.lookup(NodeId(7)), None);
    assert!(ids.is_empty());
    ids.claim(NodeId(7), None, IdKind::Tractor);
    assert_eq!(ids.lookup(NodeId(7)), Some("tractor0"));
}

#[test]
fn declared_id_is_reused_when_free() {
    let mut ids = IdRegistry::new();
    let c = ids.claim(NodeId(0), Some("intro"), IdKind::Producer);
    assert_eq!(c, Claim::Fresh("intro".into()));
    assert_eq!(ids.owner("intro"), Some(NodeId(0)));
}

#[test]
fn duplicate_declared_id_falls_back_to_synthesis() {
    let mut ids = IdRegistry::new();
    ids.claim(NodeId(0), Some("clip"), IdKind::Producer);
    let c = ids.claim(NodeId(1), Some("clip"), IdKind::Producer);
    assert_eq!(c, Claim::Fresh("producer0".into()));
}

#[test]
fn synthesis_skips_strings_taken_by_declared_ids() {
    let mut ids = IdRegistry::new();
    ids.claim(NodeId(0), Some("producer0"), IdKind::Playlist);
    ids.claim(NodeId(1), Some("producer1"), IdKind::Filter);
    let c = ids.claim(NodeId(2), None, IdKind::Producer);
    assert_eq!(c, Claim::Fresh("producer2".into()));
}

#[test]
fn empty_declared_id_is_ignored() {
    let mut ids = IdRegistry::new();
    let c = ids.claim(NodeId(0), Some(""), IdKind::Transition);
    assert_eq!(c.id(), "transition0");
}

#[test]
fn iteration_follows_claim_order() {
    let mut ids = IdRegistry::new();
    ids.claim(NodeId(3), None, IdKind::Producer);
    ids.claim(NodeId(1), None, IdKind::Producer);
    let order = ids.iter().collect::<Vec<_>>();
    assert_eq!(order, vec![(NodeId(3), "producer0"), (NodeId(1), "producer1")]);
}
