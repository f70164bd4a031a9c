use super::*;

#[test]
fn producer_sets_discriminators() {
    let mut b = GraphBuilder::new();
    let p = b.producer("avformat", "a.dv");
    let props = b.graph().props(p).unwrap();
    assert_eq!(props.get(keys::MLT_TYPE), Some(keys::TYPE_PRODUCER));
    assert_eq!(props.get(keys::MLT_SERVICE), Some("avformat"));
    assert_eq!(props.get(keys::RESOURCE), Some("a.dv"));
}

#[test]
fn cut_of_cut_points_at_original() {
    let mut b = GraphBuilder::new();
    let p = b.producer("avformat", "a.dv");
    let c1 = b.cut(p, 0, 10).unwrap();
    let c2 = b.cut(c1, 2, 4).unwrap();
    assert_eq!(b.graph().cut_parent(c2), p);
    assert_eq!(b.graph().props(c2).unwrap().get_int(keys::OUT), 4);
}

#[test]
fn append_records_cut_and_repeat() {
    let mut b = GraphBuilder::new();
    let p = b.producer("avformat", "a.dv");
    let pl = b.playlist();
    let cut = b.append_repeat(pl, p, 5, 9, 3).unwrap();
    b.blank(pl, 7).unwrap();
    let g = b.root(pl).build().unwrap();
    assert_eq!(
        g.playlist_entries(pl),
        &[
            PlaylistEntry::Clip {
                producer: cut,
                repeat: 3
            },
            PlaylistEntry::Blank { length: 7 },
        ]
    );
}

#[test]
fn wrong_container_kind_is_rejected() {
    let mut b = GraphBuilder::new();
    let p = b.producer("avformat", "a.dv");
    let mt = b.multitrack();
    assert!(b.blank(mt, 3).is_err());
    assert!(b.track(p, p).is_err());
    assert!(b.append_repeat(p, p, 0, 1, 0).is_err());
}

#[test]
fn attached_filter_is_listed_on_target() {
    let mut b = GraphBuilder::new();
    let p = b.producer("avformat", "a.dv");
    let f = b.attach_filter(p, "greyscale").unwrap();
    assert_eq!(b.graph().filters(p), &[f]);
    assert_eq!(b.graph().upstream(f), None);
}

#[test]
fn tractor_links_upstream() {
    let mut b = GraphBuilder::new();
    let mt = b.multitrack();
    let t = b.tractor(mt).unwrap();
    assert_eq!(b.graph().upstream(t), Some(mt));
    assert_eq!(
        b.graph().props(t).unwrap().get(keys::RESOURCE),
        Some(keys::RES_TRACTOR)
    );
}
