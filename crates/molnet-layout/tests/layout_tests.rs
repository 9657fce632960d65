//! Layout integration tests
//!
//! Drives the full path from samples to positions: correlation graph,
//! layout graph extraction, runner and background worker.

use molnet_core::{
    CorrelationGraph, CorrelationMethod, Interner, LayoutKind, LayoutSettings, Molecule, MoleculeId,
    Sample, SampleSet,
};
use molnet_layout::{
    Bounds, CancelToken, LayoutEdge, LayoutError, LayoutGraph, LayoutRunner, LayoutState,
    LayoutWorker,
};
use proptest::prelude::*;

/// Two tight pairs that are unrelated to each other
fn paired_experiment() -> (Interner, CorrelationGraph) {
    let mut interner = Interner::new();
    let names = ["a1", "a2", "b1", "b2"];
    let ids: Vec<MoleculeId> = names.iter().map(|n| interner.intern(n)).collect();

    let mut samples = SampleSet::default();
    let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
    let b = [5.0, 1.0, 7.0, 3.0, 8.0, 2.0, 6.0, 4.0];
    for i in 0..a.len() {
        samples.push(
            Sample::new(format!("s{i}"))
                .with_value(ids[0], a[i])
                .with_value(ids[1], a[i] * 1.5 + 0.5)
                .with_value(ids[2], b[i])
                .with_value(ids[3], b[i] * 2.0),
        );
    }

    let mut graph = CorrelationGraph::new(samples);
    graph
        .add_all(names.iter().map(|n| Molecule::new(&mut interner, n)).collect::<Vec<_>>())
        .unwrap();
    (interner, graph)
}

#[test]
fn test_correlated_pairs_end_up_closer() {
    let (interner, mut graph) = paired_experiment();
    let layout_graph = LayoutGraph::from_graph(&mut graph, CorrelationMethod::Pearson, 0.0);
    assert_eq!(layout_graph.edge_count(), 6);

    let settings = LayoutSettings {
        seed: Some(99),
        ..Default::default()
    };
    let mut runner = LayoutRunner::new(layout_graph, &settings).unwrap();
    let bounds = Bounds::new(300.0, 300.0).unwrap();
    let report = runner.layout(bounds, &CancelToken::new()).unwrap();
    assert!(report.state.is_finished());

    let snapshot = runner.snapshot();
    let at = |name: &str| {
        let id = interner.get(name).unwrap();
        snapshot.positions.iter().find(|(m, _)| *m == id).unwrap().1
    };

    let within_a = at("a1").distance(&at("a2"));
    let within_b = at("b1").distance(&at("b2"));
    let across = at("a1").distance(&at("b1"));
    assert!(within_a < across, "{within_a} vs {across}");
    assert!(within_b < across, "{within_b} vs {across}");
}

#[test]
fn test_threshold_keeps_only_strong_edges() {
    let (_, mut graph) = paired_experiment();
    let layout_graph = LayoutGraph::from_graph(&mut graph, CorrelationMethod::Spearman, 0.99);
    assert_eq!(layout_graph.vertex_count(), 4);
    assert_eq!(layout_graph.edge_count(), 2);
}

#[test]
fn test_worker_matches_runner_for_same_seed() {
    let (_, mut graph) = paired_experiment();
    let layout_graph = LayoutGraph::from_graph(&mut graph, CorrelationMethod::Kendall, 0.0);
    let settings = LayoutSettings {
        seed: Some(5),
        ..Default::default()
    };
    let bounds = Bounds::new(250.0, 250.0).unwrap();

    let mut direct = LayoutRunner::new(layout_graph.clone(), &settings).unwrap();
    direct.layout(bounds, &CancelToken::new()).unwrap();

    let worker = LayoutWorker::spawn(LayoutRunner::new(layout_graph, &settings).unwrap(), bounds).unwrap();
    while !worker.is_finished() {
        std::thread::yield_now();
    }
    let snapshot = worker.snapshot();
    worker.join().unwrap();

    assert_eq!(snapshot, direct.snapshot());
}

#[test]
fn test_timeout_is_reported() {
    let n = 60;
    let edges: Vec<(usize, usize, f64)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j, if (i * j) % 3 == 0 { 0.9 } else { -0.9 })))
        .collect();
    let graph = LayoutGraph::from_edges((0..n as u32).map(MoleculeId::from_raw).collect(), &edges).unwrap();
    let settings = LayoutSettings {
        seed: Some(1),
        timeout_ms: Some(1),
        iteration_factor: 64,
        ..Default::default()
    };

    let mut runner = LayoutRunner::new(graph, &settings).unwrap();
    let report = runner.layout(Bounds::new(4000.0, 4000.0).unwrap(), &CancelToken::new()).unwrap();
    assert!(matches!(
        report.state,
        LayoutState::TimedOut | LayoutState::Converged
    ));
}

#[test]
fn test_edge_to_missing_vertex_is_an_error() {
    let vertices = vec![MoleculeId::from_raw(0), MoleculeId::from_raw(1)];
    assert!(matches!(
        LayoutGraph::from_edges(vertices.clone(), &[(0, 5, 0.5)]),
        Err(LayoutError::UnknownVertex { vertex: 5, vertex_count: 2, .. })
    ));

    // Edges pushed onto an already-built graph are caught by the runner
    let mut graph = LayoutGraph::from_edges(vertices, &[(0, 1, 0.5)]).unwrap();
    graph.edges.push(LayoutEdge {
        source: 0,
        target: 5,
        correlation: 0.5,
    });
    let settings = LayoutSettings {
        seed: Some(2),
        ..Default::default()
    };
    assert!(matches!(
        LayoutRunner::new(graph, &settings),
        Err(LayoutError::UnknownVertex { edge: 1, .. })
    ));
}

fn any_layout_graph() -> impl Strategy<Value = LayoutGraph> {
    (2usize..12).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n, -1.0f64..=1.0), 0..30).prop_map(move |raw| {
            let edges: Vec<(usize, usize, f64)> =
                raw.into_iter().filter(|(s, t, _)| s != t).collect();
            LayoutGraph::from_edges((0..n as u32).map(MoleculeId::from_raw).collect(), &edges)
                .unwrap()
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_positions_stay_in_bounds(
        graph in any_layout_graph(),
        kind in prop_oneof![Just(LayoutKind::Cluster), Just(LayoutKind::Spring), Just(LayoutKind::Circle)],
        seed in any::<u64>(),
        width in 20.0f64..200.0,
        height in 20.0f64..200.0,
    ) {
        let settings = LayoutSettings { kind, seed: Some(seed), iteration_factor: 1, ..Default::default() };
        let bounds = Bounds::new(width, height).unwrap();
        let mut runner = LayoutRunner::new(graph.clone(), &settings).unwrap();
        let report = runner.layout(bounds, &CancelToken::new()).unwrap();

        prop_assert!(report.state.is_finished());
        prop_assert_eq!(runner.positions().len(), graph.vertex_count());
        for p in runner.positions() {
            prop_assert!(bounds.contains(*p), "{:?} outside {:?}", p, bounds);
        }
    }
}
