use floorplan::{EdgeKey, Graph, Orientation, Point};

fn line(g: &mut Graph, n: usize) -> Vec<u32> {
    (0..n).map(|i| g.add_node(Point::new(i as f64 * 100.0, 0.0))).collect()
}

#[test]
fn edge_keys_are_canonical() {
    let mut g = Graph::new();
    let ids = line(&mut g, 6);
    let key = g.add_edge(ids[5], ids[2]).expect("edge").key;
    assert_eq!((key.id1(), key.id2()), (ids[2], ids[5]));
    assert!(g.edge_between(ids[2], ids[5]).is_some());
    assert!(g.edge_between(ids[5], ids[2]).is_some());
    assert_eq!(EdgeKey::new(7, 3), EdgeKey::new(3, 7));
}

#[test]
fn self_loops_are_refused() {
    let mut g = Graph::new();
    let a = g.add_node(Point::new(0.0, 0.0));
    assert!(g.add_edge(a, a).is_none());
    assert_eq!(g.edge_count(), 0);
    assert!(!g.remove_edge(a, a));
}

#[test]
fn add_edge_is_idempotent() {
    let mut g = Graph::new();
    let ids = line(&mut g, 2);
    g.add_edge(ids[0], ids[1]).expect("edge").stroke = "red".to_string();
    let again = g.add_edge(ids[1], ids[0]).expect("edge");
    assert_eq!(again.stroke, "red");
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn removing_a_node_cascades_to_its_walls() {
    let mut g = Graph::new();
    let ids = line(&mut g, 4);
    g.add_edge(ids[0], ids[1]);
    g.add_edge(ids[1], ids[2]);
    g.add_edge(ids[2], ids[3]);
    g.add_edge(ids[0], ids[3]);
    assert!(g.remove_node(ids[1]));
    assert_eq!(g.node_count(), 3);
    let keys: Vec<(u32, u32)> = g.edge_keys().iter().map(|k| (k.id1(), k.id2())).collect();
    assert_eq!(keys, vec![(ids[0], ids[3]), (ids[2], ids[3])]);
    assert!(g.incident_edges(ids[1]).is_empty());
    assert!(!g.remove_node(ids[1]));
}

#[test]
fn ids_are_never_reused() {
    let mut g = Graph::new();
    let a = g.add_node(Point::new(0.0, 0.0));
    g.remove_node(a);
    let b = g.add_node(Point::new(0.0, 0.0));
    assert_ne!(a, b);
    assert_eq!(g.next_id(), b + 1);
    g.clear();
    assert_eq!(g.next_id(), 0);
    assert_eq!(g.node_count(), 0);
}

#[test]
fn merge_moves_walls_to_the_target() {
    let mut g = Graph::new();
    let a = g.add_node(Point::new(0.0, 0.0));
    let b = g.add_node(Point::new(100.0, 0.0));
    let c = g.add_node(Point::new(0.0, 100.0));
    let d = g.add_node(Point::new(-100.0, 0.0));
    g.add_edge(a, b);
    g.add_edge(a, c);
    g.add_edge(d, a);
    g.add_edge(b, c);
    g.merge_nodes(a, b);
    assert!(g.node(a).is_none());
    assert!(g.edge_between(b, c).is_some());
    assert!(g.edge_between(b, d).is_some());
    // the shared wall a-b disappears and b-c is reused, not duplicated
    assert_eq!(g.edge_count(), 2);
    assert!(g.incident_edges(a).is_empty());
}

#[test]
fn bisect_keeps_openables_in_place() {
    let mut g = Graph::new();
    let a = g.add_node(Point::new(0.0, 0.0));
    let n = g.add_node(Point::new(300.0, 0.0));
    let b = g.add_node(Point::new(1000.0, 0.0));
    let ab = g.add_edge(a, b).expect("edge").key;
    let near = g.add_openable(80.0);
    let far = g.add_openable(80.0);
    assert!(g.attach_openable(near, ab, 0.15, Orientation::Forward));
    assert!(g.attach_openable(far, ab, 0.5, Orientation::Forward));

    g.bisect(n, ab, 0.3);

    assert!(!g.has_edge(ab));
    let an = EdgeKey::new(a, n).unwrap();
    let nb = EdgeKey::new(n, b).unwrap();
    assert_eq!(g.edge(an).unwrap().openables, vec![near]);
    assert_eq!(g.edge(nb).unwrap().openables, vec![far]);

    let s = g.openable(near).unwrap().snap;
    assert_eq!(s.edge, Some(an));
    assert!((s.pos.unwrap() - 0.5).abs() < 1e-9);
    let s = g.openable(far).unwrap().snap;
    assert_eq!(s.edge, Some(nb));
    assert!((s.pos.unwrap() - 0.2 / 0.7).abs() < 1e-9);
    assert_eq!(s.orientation, Some(Orientation::Forward));
}

#[test]
fn bisect_flips_when_the_new_node_sorts_last() {
    let mut g = Graph::new();
    let a = g.add_node(Point::new(0.0, 0.0));
    let b = g.add_node(Point::new(1000.0, 0.0));
    let n = g.add_node(Point::new(300.0, 0.0));
    let ab = g.add_edge(a, b).expect("edge").key;
    let o = g.add_openable(80.0);
    g.attach_openable(o, ab, 0.8, Orientation::Forward);

    g.bisect(n, ab, 0.3);

    let bn = EdgeKey::new(b, n).unwrap();
    let s = g.openable(o).unwrap().snap;
    assert_eq!(s.edge, Some(bn));
    // measured from b now: 200 of 700 mm
    assert!((s.pos.unwrap() - 0.2 / 0.7).abs() < 1e-9);
    assert_eq!(s.orientation, Some(Orientation::Reverse));
}

#[test]
#[should_panic]
fn bisect_on_a_missing_wall_panics() {
    let mut g = Graph::new();
    let ids = line(&mut g, 3);
    g.bisect(ids[2], EdgeKey::new(ids[0], ids[1]).unwrap(), 0.5);
}

#[test]
#[should_panic]
fn bisect_by_an_endpoint_panics() {
    let mut g = Graph::new();
    let ids = line(&mut g, 2);
    let key = g.add_edge(ids[0], ids[1]).unwrap().key;
    g.bisect(ids[0], key, 0.5);
}

#[test]
fn degenerate_geometry_is_accepted() {
    let mut g = Graph::new();
    let a = g.add_node(Point::new(5.0, 5.0));
    let b = g.add_node(Point::new(5.0, 5.0));
    assert!(g.add_edge(a, b).is_some());
    assert!(g.move_node(b, Point::new(6.0, 5.0)));
    assert!(!g.move_node(99, Point::new(0.0, 0.0)));
    assert!(g.set_edge_stroke(b, a, "grey"));
    assert_eq!(g.edge_between(a, b).unwrap().stroke, "grey");
}
