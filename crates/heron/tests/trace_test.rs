use heron::trace::{ForceNode, TraceEdge, TraceNode};
use heron::{Config, Force, Node, NodeId, PathEntry, StraightenPaths, Trace, TraceRecord};
use std::cell::RefCell;
use std::rc::Rc;

type Path = Vec<&'static str>;

fn force(paths: Vec<Path>, debug: bool) -> StraightenPaths<Path, Node> {
    let config = Config::<Path, Node>::builder()
        .id(|_, n| n.id.as_str().into())
        .path_nodes(|p| p.iter().map(|&id| PathEntry::from(id)).collect())
        .path_strength(|_| None)
        .debug(debug)
        .build()
        .unwrap();
    StraightenPaths::new(config, paths)
}

fn zigzag() -> Vec<Node> {
    vec![
        Node::new("a", 0.0, 0.0),
        Node::new("b", 1.0, 0.0),
        Node::new("c", 1.0, 1.0),
        Node::new("d", 2.0, 1.0),
    ]
}

fn edge(source: &str, target: &str) -> TraceEdge {
    TraceEdge {
        source: source.into(),
        target: target.into(),
    }
}

#[test]
fn trace_is_absent_when_debug_is_off() {
    let mut nodes = zigzag();
    let mut f = force(vec![vec!["a", "b", "c", "d"]], false);
    f.initialize(&nodes).unwrap();
    assert!(f.step(&mut nodes).is_none());

    let seen = Rc::new(RefCell::new(0usize));
    let counter = Rc::clone(&seen);
    f.set_trace_sink(move |_: Trace| *counter.borrow_mut() += 1);
    f.apply(&mut nodes, 1.0);
    assert_eq!(*seen.borrow(), 0);
}

#[test]
fn trace_has_one_init_and_one_force_record_per_interior_node() {
    let mut nodes = zigzag();
    let mut f = force(vec![vec!["a", "b", "c", "d"]], true);
    f.initialize(&nodes).unwrap();

    for _ in 0..3 {
        let trace = f.step(&mut nodes).expect("debug trace");
        assert_eq!(trace.records.len(), 3);
        assert_eq!(trace.init_records().count(), 1);
        assert_eq!(trace.force_records().count(), 2);
        assert!(matches!(trace.records[0], TraceRecord::Init { .. }));
    }
}

#[test]
fn trace_init_record_lists_path_topology() {
    let mut nodes = zigzag();
    let mut f = force(vec![vec!["a", "b", "c", "d"], vec!["a", "b"]], true);
    f.initialize(&nodes).unwrap();
    let trace = f.step(&mut nodes).unwrap();

    // The two-node path has no interior node and is not reported.
    assert_eq!(trace.init_records().count(), 1);
    let TraceRecord::Init { nodes: traced, edges } = &trace.records[0] else {
        panic!("expected init record, got {:?}", trace.records[0]);
    };
    assert_eq!(
        traced,
        &vec![
            TraceNode {
                id: "a".into(),
                x: 0.0,
                y: 0.0,
            },
            TraceNode {
                id: "b".into(),
                x: 1.0,
                y: 0.0,
            },
            TraceNode {
                id: "c".into(),
                x: 1.0,
                y: 1.0,
            },
            TraceNode {
                id: "d".into(),
                x: 2.0,
                y: 1.0,
            },
        ]
    );
    assert_eq!(edges, &vec![edge("a", "b"), edge("b", "c"), edge("c", "d")]);
}

#[test]
fn trace_force_record_captures_pre_displacement_positions() {
    let start = zigzag();
    let mut nodes = start.clone();
    let mut f = force(vec![vec!["a", "b", "c"]], true);
    f.initialize(&nodes).unwrap();
    let trace = f.step(&mut nodes).unwrap();

    let TraceRecord::Force { nodes: traced, edges } = &trace.records[1] else {
        panic!("expected force record, got {:?}", trace.records[1]);
    };
    assert_eq!(edges, &[edge("a", "b"), edge("b", "c")]);

    let ids: Vec<&NodeId> = traced.iter().map(|n| &n.id).collect();
    assert_eq!(ids, vec![&NodeId::from("a"), &NodeId::from("b"), &NodeId::from("c")]);
    for (ForceNode { x, y, force, .. }, (before, after)) in
        traced.iter().zip(start.iter().zip(nodes.iter()))
    {
        assert_eq!((*x, *y), (before.x, before.y));
        assert_eq!((before.x + force.x, before.y + force.y), (after.x, after.y));
    }

    let sum_x: f64 = traced.iter().map(|n| n.force.x).sum();
    let sum_y: f64 = traced.iter().map(|n| n.force.y).sum();
    assert!(sum_x.abs() < 1e-15 && sum_y.abs() < 1e-15);
}

#[test]
fn trace_skipped_triples_are_not_reported() {
    let mut nodes = zigzag();
    let mut f = force(vec![vec!["a", "b", "a"]], true);
    f.initialize(&nodes).unwrap();
    let trace = f.step(&mut nodes).unwrap();
    assert_eq!(trace.init_records().count(), 1);
    assert_eq!(trace.force_records().count(), 0);
}

#[test]
fn trace_sink_receives_a_fresh_trace_per_tick() {
    let mut nodes = zigzag();
    let traces: Rc<RefCell<Vec<Trace>>> = Rc::default();
    let sink = Rc::clone(&traces);
    let mut f = force(vec![vec!["a", "b", "c", "d"]], true)
        .with_trace_sink(move |t: Trace| sink.borrow_mut().push(t));
    f.initialize(&nodes).unwrap();

    f.apply(&mut nodes, 1.0);
    f.apply(&mut nodes, 0.5);
    let traces = traces.borrow();
    assert_eq!(traces.len(), 2);
    for t in traces.iter() {
        assert_eq!(t.records.len(), 3);
    }
    assert_ne!(traces[0], traces[1]);
}

#[test]
fn trace_serializes_to_the_upstream_report_shape() {
    let mut nodes = zigzag();
    let mut f = force(vec![vec!["a", "b", "c"]], true);
    f.initialize(&nodes).unwrap();
    let trace = f.step(&mut nodes).unwrap();

    let json: serde_json::Value = serde_json::from_str(&trace.to_json().unwrap()).unwrap();
    let records = json.as_array().expect("array of records");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["action"], "init");
    assert_eq!(records[0]["nodes"][2]["id"], "c");
    assert_eq!(records[0]["edges"][1]["source"], "b");
    assert_eq!(records[1]["action"], "force");
    assert_eq!(records[1]["nodes"][1]["id"], "b");
    assert!(records[1]["nodes"][1]["force"]["x"].is_number());
    assert_eq!(records[1]["edges"][0]["target"], "b");
}
