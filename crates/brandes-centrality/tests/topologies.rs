//! Known-topology regression tests for batched betweenness.
//!
//! Each test uses a hand-crafted graph whose scores were worked out by
//! hand (unnormalized, ordered source/target pairs). Any change to the
//! forward/backward formulation that shifts a value is caught here.
//!
//! Set `BRANDES_LOG=debug` to see the per-depth trace.

use brandes_centrality::{
    BetweennessConfig, ErrorCode, Sources, betweenness_centrality, betweenness_with_config,
    classic_betweenness,
};
use brandes_sparse::graph::{from_edges, from_petgraph, from_undirected_edges};
use brandes_sparse::{DenseVector, PrintLevel, SparseMatrix, write_vector};
use petgraph::graph::{DiGraph, NodeIndex, UnGraph};
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn init_tracing() {
    let filter = EnvFilter::try_from_env("BRANDES_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

fn directed(n: usize, edges: &[(usize, usize)]) -> SparseMatrix<bool> {
    from_edges(n, edges).expect("adjacency must build")
}

fn undirected(n: usize, edges: &[(usize, usize)]) -> SparseMatrix<bool> {
    from_undirected_edges(n, edges).expect("adjacency must build")
}

fn all_sources(a: &SparseMatrix<bool>) -> DenseVector<f64> {
    init_tracing();
    betweenness_centrality(a, &Sources::All).expect("betweenness must succeed")
}

fn assert_table(actual: &DenseVector<f64>, expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "one score per node");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < 1e-9, "node {i}: got {a}, expected {e}");
    }
}

fn cycle_edges(n: usize) -> Vec<(usize, usize)> {
    (0..n).map(|i| (i, (i + 1) % n)).collect()
}

// ---------------------------------------------------------------------------
// Directed paths
// ---------------------------------------------------------------------------

#[test]
fn chain_single_source_table() {
    // 0 → 1 → 2 → 3 → 4 from source 0.
    // Node i (0 < i < 4) lies on the paths 0 → t for every t > i.
    init_tracing();
    let a = directed(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
    let bc = betweenness_centrality(&a, &Sources::List(vec![0])).expect("betweenness");
    assert_table(&bc, &[0.0, 3.0, 2.0, 1.0, 0.0]);
    assert!(bc[1] > bc[2] && bc[2] > bc[3], "decreasing away from source");
}

#[test]
fn chain_all_sources_table() {
    // Node i is interior to every (s, t) with s < i < t: i * (4 - i).
    let a = directed(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
    assert_table(&all_sources(&a), &[0.0, 3.0, 4.0, 3.0, 0.0]);
}

#[test]
fn four_node_chain_middle_nodes() {
    // A → B → C → D: B is between A and {C, D}; C between {A, B} and D.
    let a = directed(4, &[(0, 1), (1, 2), (2, 3)]);
    assert_table(&all_sources(&a), &[0.0, 2.0, 2.0, 0.0]);
}

#[test]
fn sink_source_contributes_nothing() {
    let a = directed(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
    let bc = betweenness_centrality(&a, &Sources::List(vec![4])).expect("betweenness");
    assert_table(&bc, &[0.0; 5]);
}

#[test]
fn diamond_splits_credit() {
    // 0 → {1, 2} → 3: two shortest paths 0 ⇝ 3, one through each middle.
    let a = directed(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
    assert_table(&all_sources(&a), &[0.0, 0.5, 0.5, 0.0]);
}

#[test]
fn long_diamond_chain_matches_classic_reference() {
    // 70 diamonds in series: 2^70 shortest paths reach the last node.
    let diamonds = 70;
    let n = 3 * diamonds + 1;
    let edges: Vec<(usize, usize)> = (0..diamonds)
        .flat_map(|d| {
            let top = 3 * d;
            [(top, top + 1), (top, top + 2), (top + 1, top + 3), (top + 2, top + 3)]
        })
        .collect();

    let mut g = DiGraph::<(), ()>::with_capacity(n, edges.len());
    for _ in 0..n {
        g.add_node(());
    }
    for &(i, j) in &edges {
        g.add_edge(NodeIndex::new(i), NodeIndex::new(j), ());
    }

    init_tracing();
    let a = directed(n, &edges);
    let bc = betweenness_centrality(&a, &Sources::List(vec![0])).expect("betweenness");
    let reference = classic_betweenness(&g, &[0]).expect("reference");
    assert_table(&bc, &reference);
    // Every node below the first junction is a target beyond it.
    assert!((bc[3] - 207.0).abs() < 1e-9, "got {}", bc[3]);

    let all: Vec<usize> = (0..n).collect();
    let reference = classic_betweenness(&g, &all).expect("reference");
    assert_table(&all_sources(&a), &reference);
}

#[test]
fn converging_star_has_no_interior() {
    // 1 → 0, 2 → 0, 3 → 0: every path has length 1.
    let a = directed(4, &[(1, 0), (2, 0), (3, 0)]);
    assert_table(&all_sources(&a), &[0.0; 4]);
}

#[test]
fn directed_triangle_cycle() {
    // 0 → 1 → 2 → 0: each node is the middle of exactly one length-2 path.
    let a = directed(3, &cycle_edges(3));
    assert_table(&all_sources(&a), &[1.0, 1.0, 1.0]);
}

// ---------------------------------------------------------------------------
// Undirected graphs
// ---------------------------------------------------------------------------

#[test]
fn complete_k4_is_all_zero() {
    let edges: Vec<_> = (0..4)
        .flat_map(|i| ((i + 1)..4).map(move |j| (i, j)))
        .collect();
    let a = undirected(4, &edges);
    assert_table(&all_sources(&a), &[0.0; 4]);
}

#[test]
fn six_cycle_is_uniform() {
    // Per node: the neighbour pair at distance 2 (1) plus half of each of
    // two opposite pairs (1/2 + 1/2), doubled for ordered pairs.
    let a = undirected(6, &cycle_edges(6));
    assert_table(&all_sources(&a), &[4.0; 6]);
}

#[test]
fn five_node_star_center() {
    // Center 0 is interior to all 4 * 3 ordered leaf pairs.
    let a = undirected(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]);
    assert_table(&all_sources(&a), &[12.0, 0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn disconnected_components_score_independently() {
    // Two undirected 3-paths: 0 - 1 - 2 and 3 - 4 - 5.
    let a = undirected(6, &[(0, 1), (1, 2), (3, 4), (4, 5)]);
    assert_table(&all_sources(&a), &[0.0, 2.0, 0.0, 0.0, 2.0, 0.0]);
}

#[test]
fn isolated_node_scores_zero() {
    // Node 3 has no incident edges.
    let a = directed(4, &[(0, 1), (1, 2)]);
    assert_table(&all_sources(&a), &[0.0, 1.0, 0.0, 0.0]);
}

#[test]
fn petgraph_input_matches_classic_reference() {
    // Two triangles joined through node 2 - 3.
    let g = UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (0, 2), (2, 3), (3, 4), (4, 5), (3, 5)]);
    let a = from_petgraph(&g).expect("adjacency");
    let bc = all_sources(&a);
    let reference = classic_betweenness(&g, &(0..6).collect::<Vec<_>>()).expect("reference");
    assert_table(&bc, &reference);
    // Bridge endpoints: 2 sits between {0, 1} and {3, 4, 5} in both directions.
    assert!((bc[2] - 12.0).abs() < 1e-9);
}

// ---------------------------------------------------------------------------
// Source handling
// ---------------------------------------------------------------------------

#[test]
fn source_order_does_not_change_scores() {
    let a = undirected(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (1, 4)]);
    let forward = betweenness_centrality(&a, &Sources::List(vec![0, 2, 3])).expect("bc");
    let shuffled = betweenness_centrality(&a, &Sources::List(vec![3, 0, 2])).expect("bc");
    assert_table(&shuffled, forward.as_slice());
}

#[test]
fn full_sample_equals_exact() {
    let a = undirected(6, &cycle_edges(6));
    let exact = all_sources(&a);
    let sampled = betweenness_centrality(&a, &Sources::sample(6, 17)).expect("bc");
    assert_table(&sampled, exact.as_slice());
}

#[test]
fn invalid_sources_fail_before_any_work() {
    let a = directed(3, &[(0, 1)]);
    for sources in [
        Sources::List(vec![]),
        Sources::List(vec![3]),
        Sources::List(vec![0, 0]),
        Sources::sample(4, 1),
    ] {
        let err = betweenness_centrality(&a, &sources).expect_err("must be rejected");
        assert_eq!(err.code(), ErrorCode::InvalidInput, "{sources:?}: {err}");
    }
}

#[test]
fn empty_graph_is_rejected() {
    let a = SparseMatrix::<bool>::new(0, 0).expect("matrix");
    let err = betweenness_centrality(&a, &Sources::All).expect_err("no sources");
    assert_eq!(err.code(), ErrorCode::InvalidInput);
}

// ---------------------------------------------------------------------------
// Config-driven runs
// ---------------------------------------------------------------------------

#[test]
fn config_batches_sum_to_single_pass() {
    init_tracing();
    let a = undirected(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]);
    let cfg = BetweennessConfig::from_toml_str("batch_size = 2").expect("config");
    let bc = betweenness_with_config(&a, &cfg).expect("bc");
    assert_table(&bc, &[12.0, 0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn config_normalized_chain() {
    // Raw [0, 3, 4, 3, 0] over (5 - 1)(5 - 2) = 12.
    let a = directed(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
    let cfg = BetweennessConfig::from_toml_str("normalized = true").expect("config");
    let bc = betweenness_with_config(&a, &cfg).expect("bc");
    assert_table(&bc, &[0.0, 0.25, 1.0 / 3.0, 0.25, 0.0]);
}

#[test]
fn summary_dump_of_result() {
    let a = directed(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
    let bc = betweenness_centrality(&a, &Sources::List(vec![0])).expect("bc");

    let mut out = Vec::new();
    write_vector(&mut out, &bc, PrintLevel::Full).expect("write");
    let text = String::from_utf8(out).expect("utf8");

    assert_eq!(
        text,
        "f64 vector: n: 5 entries: 5\n    (0)   0\n    (1)   3\n    (2)   2\n    (3)   1\n    (4)   0\n"
    );
}
