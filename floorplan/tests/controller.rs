use floorplan::{Editor, Orientation, Point, Settings, ViewProjection};

fn editor() -> Editor {
    Editor::with_settings(ViewProjection::default(), Settings::default())
}

fn gesture(ed: &mut Editor, from: Point, to: Point, over_delete: bool) {
    assert!(ed.press(from), "nothing grabbed at {:?}", from);
    assert!(ed.drag(to, over_delete));
    ed.release(to);
}

#[test]
fn dropping_a_corner_on_another_merges_them() {
    let mut ed = editor();
    let g = ed.graph_mut();
    let a = g.add_node(Point::new(0.0, 0.0));
    let b = g.add_node(Point::new(100.0, 0.0));
    let c = g.add_node(Point::new(0.0, 100.0));
    g.add_edge(a, c);

    gesture(&mut ed, Point::new(0.0, 0.0), Point::new(98.0, 1.0), false);

    let g = ed.graph();
    assert!(g.node(a).is_none());
    assert!(g.edge_between(b, c).is_some());
    assert_eq!(g.edge_count(), 1);
    assert!(ed.active_nodes().is_empty());
}

#[test]
fn dropping_a_corner_on_a_wall_splits_it() {
    let mut ed = editor();
    let g = ed.graph_mut();
    let a = g.add_node(Point::new(0.0, 0.0));
    let e = g.add_node(Point::new(-200.0, 0.0));
    let c = g.add_node(Point::new(50.0, -100.0));
    let d = g.add_node(Point::new(50.0, 100.0));
    g.add_edge(a, e);
    g.add_edge(c, d);

    gesture(&mut ed, Point::new(0.0, 0.0), Point::new(52.0, 30.0), false);

    let g = ed.graph();
    assert_eq!(g.position(a), Some(Point::new(50.0, 30.0)));
    assert!(g.edge_between(c, d).is_none());
    assert!(g.edge_between(a, c).is_some());
    assert!(g.edge_between(a, d).is_some());
    assert!(g.edge_between(a, e).is_some());
    assert_eq!(g.node(a).unwrap().snap, Default::default());
}

#[test]
fn releasing_over_delete_removes_the_corner() {
    let mut ed = editor();
    let g = ed.graph_mut();
    let a = g.add_node(Point::new(0.0, 0.0));
    let b = g.add_node(Point::new(500.0, 0.0));
    g.add_edge(a, b);

    gesture(&mut ed, Point::new(1.0, 1.0), Point::new(300.0, 300.0), true);

    assert!(ed.graph().node(a).is_none());
    assert_eq!(ed.graph().edge_count(), 0);
    assert_eq!(ed.graph().node_count(), 1);
}

#[test]
fn extending_onto_a_corner_connects_it() {
    let mut ed = editor();
    let g = ed.graph_mut();
    let a = g.add_node(Point::new(0.0, 0.0));
    let b = g.add_node(Point::new(200.0, 0.0));

    gesture(&mut ed, Point::new(20.0, 0.0), Point::new(199.0, 2.0), false);

    let g = ed.graph();
    assert_eq!(g.node_count(), 2);
    assert!(g.edge_between(a, b).is_some());
    assert_eq!(g.position(a), Some(Point::new(0.0, 0.0)));
}

#[test]
fn extending_onto_a_wall_splits_it_with_a_new_corner() {
    let mut ed = editor();
    let g = ed.graph_mut();
    let a = g.add_node(Point::new(0.0, 0.0));
    let c = g.add_node(Point::new(100.0, -100.0));
    let d = g.add_node(Point::new(100.0, 100.0));
    g.add_edge(c, d);

    gesture(&mut ed, Point::new(20.0, 0.0), Point::new(102.0, 40.0), false);

    let g = ed.graph();
    let n = g.next_id() - 1;
    assert_eq!(g.position(n), Some(Point::new(100.0, 40.0)));
    assert!(g.edge_between(a, n).is_some());
    assert!(g.edge_between(c, n).is_some());
    assert!(g.edge_between(n, d).is_some());
    assert!(g.edge_between(c, d).is_none());
    assert_eq!(g.edge_count(), 3);
}

#[test]
fn extending_over_delete_is_cancelled() {
    let mut ed = editor();
    ed.graph_mut().add_node(Point::new(0.0, 0.0));
    gesture(&mut ed, Point::new(20.0, 0.0), Point::new(400.0, 400.0), true);
    assert_eq!(ed.graph().node_count(), 1);
    assert_eq!(ed.graph().edge_count(), 0);
    assert!(!ed.graph().node(0).unwrap().pending_remove);
}

#[test]
fn openables_follow_a_dragged_corner() {
    let mut ed = editor();
    let g = ed.graph_mut();
    let a = g.add_node(Point::new(0.0, 0.0));
    let b = g.add_node(Point::new(1000.0, 0.0));
    let key = g.add_edge(a, b).unwrap().key;
    let o = g.add_openable(100.0);
    g.attach_openable(o, key, 0.5, Orientation::Forward);

    assert!(ed.press(Point::new(0.0, 0.0)));
    assert!(ed.drag(Point::new(0.0, -500.0), false));
    let placed = ed.graph().openable(o).unwrap();
    assert_eq!(placed.position, Point::new(450.0, -250.0));
    assert!((placed.angle - 0.5f64.atan().to_degrees()).abs() < 1e-9);
    ed.release(Point::new(0.0, -500.0));
    assert_eq!(ed.graph().edge(key).unwrap().openables, vec![o]);
}

#[test]
fn drawing_a_room_by_extending() {
    let mut ed = editor();
    ed.graph_mut().add_node(Point::new(0.0, 0.0));
    let corners = [
        Point::new(3000.0, 0.0),
        Point::new(3000.0, 3000.0),
        Point::new(0.0, 3000.0),
    ];
    let mut last = Point::new(0.0, 0.0);
    for p in corners {
        // grab the previous corner on its outer ring
        gesture(&mut ed, Point::new(last.x + 20.0, last.y), p, false);
        last = p;
    }
    gesture(&mut ed, Point::new(last.x + 20.0, last.y), Point::new(3.0, 2.0), false);

    let g = ed.graph();
    assert_eq!(g.node_count(), 4);
    assert_eq!(g.edge_count(), 4);
    let rooms = ed.rooms();
    assert_eq!(rooms.len(), 1);
    assert!((rooms[0].area_m2() - 9.0).abs() < 1e-9);
    assert_eq!(ed.faces().len(), 2);
}

#[test]
fn zoomed_view_maps_the_pointer() {
    let mut ed = Editor::new(ViewProjection::new(Point::new(100.0, 100.0), 0.5));
    let a = ed.graph_mut().add_node(Point::new(0.0, 0.0));
    let grab = Point::new(100.0, 100.0);
    gesture(&mut ed, grab, Point::new(150.0, 120.0), false);
    assert_eq!(ed.graph().position(a), Some(Point::new(100.0, 40.0)));
    ed.projection_mut().pan(10.0, 0.0);
    assert_eq!(ed.projection().offset, Point::new(110.0, 100.0));
}
