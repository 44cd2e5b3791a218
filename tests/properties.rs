//! Property tests for the universal invariants that must hold for every
//! minimum/maximum cycle ratio instance, regardless of which solver family
//! computes it: soundness against a ratio an explicit cycle actually
//! achieves, max-is-min-of-negated, scaling invariance, and weight-shift
//! invariance for the unit-transit (cycle mean) special case.
//!
//! The concrete six-scenario regression tests (3-cycle, disjoint cycles,
//! cycle-ratio, chain+back-edge, acyclic, self-loop), run against every
//! algorithm, live as unit tests colocated with each solver module instead.

use proptest::prelude::*;

use cycle_ratio::driver::{max_cycle_ratio, min_cycle_ratio, Algorithm};
use cycle_ratio::graph::GraphBuilder;
use cycle_ratio::EPSILON;

/// Builds a simple directed cycle `0 -> 1 -> ... -> n-1 -> 0` with the given
/// per-edge weights and a uniform transit time of 1.
fn cycle_graph(weights: &[i64]) -> (cycle_ratio::graph::Graph, f64) {
    let n = weights.len();
    let mut b = GraphBuilder::new(n);
    for (u, &w) in weights.iter().enumerate() {
        let v = (u + 1) % n;
        b.insert_edge(u, v, w, 1);
    }
    let sum: i64 = weights.iter().sum();
    let ratio = sum as f64 / n as f64;
    (b.build(), ratio)
}

proptest! {
    /// For a single simple cycle, the min (and max) cycle ratio both equal
    /// the cycle's own mean, since it is the only cycle in the graph.
    #[test]
    fn single_cycle_ratio_equals_its_mean(weights in prop::collection::vec(-20i64..=20, 3..8)) {
        let (g, expected) = cycle_graph(&weights);
        let lambda = min_cycle_ratio(&g, Algorithm::KarpOrlin).unwrap();
        prop_assert!((lambda - expected).abs() < EPSILON, "{} vs {}", lambda, expected);
    }

    /// Shifting every weight of a unit-transit cycle by a constant `c`
    /// shifts its ratio by exactly `c` (the classical cycle-mean
    /// weight-shift invariance).
    #[test]
    fn weight_shift_invariance_for_unit_transit_cycle(
        weights in prop::collection::vec(-20i64..=20, 3..8),
        shift in -10i64..=10,
    ) {
        let (g, _) = cycle_graph(&weights);
        let shifted_weights: Vec<i64> = weights.iter().map(|w| w + shift).collect();
        let (g_shifted, _) = cycle_graph(&shifted_weights);

        let lambda = min_cycle_ratio(&g, Algorithm::KarpOrlin).unwrap();
        let lambda_shifted = min_cycle_ratio(&g_shifted, Algorithm::KarpOrlin).unwrap();
        prop_assert!((lambda_shifted - (lambda + shift as f64)).abs() < EPSILON);
    }

    /// Scaling every weight of a cycle by a positive integer factor scales
    /// its ratio by the same factor (transit times held fixed at 1).
    #[test]
    fn weight_scaling_invariance(
        weights in prop::collection::vec(-20i64..=20, 3..8),
        factor in 1i64..=5,
    ) {
        let (g, _) = cycle_graph(&weights);
        let scaled_weights: Vec<i64> = weights.iter().map(|w| w * factor).collect();
        let (g_scaled, _) = cycle_graph(&scaled_weights);

        let lambda = min_cycle_ratio(&g, Algorithm::KarpOrlin).unwrap();
        let lambda_scaled = min_cycle_ratio(&g_scaled, Algorithm::KarpOrlin).unwrap();
        prop_assert!((lambda_scaled - lambda * factor as f64).abs() < EPSILON * factor as f64);
    }

    /// `max_cycle_ratio` always agrees with negating the minimum ratio of
    /// the weight-negated graph, for graphs with an extra random chord on
    /// top of the guaranteed cycle.
    #[test]
    fn max_is_min_of_negated_with_a_chord(
        weights in prop::collection::vec(-15i64..=15, 4..8),
        chord_weight in -15i64..=15,
    ) {
        let n = weights.len();
        let mut b = GraphBuilder::new(n);
        for (u, &w) in weights.iter().enumerate() {
            let v = (u + 1) % n;
            b.insert_edge(u, v, w, 1);
        }
        // An extra chord from node 0 to the midpoint, giving the graph a
        // second cycle to pick between.
        b.insert_edge(0, n / 2, chord_weight, 1);
        let g = b.build();

        let min = min_cycle_ratio(&g, Algorithm::KarpOrlin).unwrap();
        let neg = g.negate_weights();
        let min_of_negated = min_cycle_ratio(&neg, Algorithm::KarpOrlin).unwrap();
        let max = max_cycle_ratio(&g, Algorithm::KarpOrlin).unwrap();

        prop_assert!((max - (-min_of_negated)).abs() < EPSILON);
        prop_assert!(max >= min - EPSILON);
    }

    /// Soundness: the minimum cycle ratio never exceeds the ratio of any
    /// cycle that actually exists in the graph (here, the guaranteed
    /// Hamiltonian cycle every generated graph contains).
    #[test]
    fn min_ratio_never_exceeds_an_actual_cycles_ratio(
        weights in prop::collection::vec(-20i64..=20, 3..8),
    ) {
        let (g, actual_ratio) = cycle_graph(&weights);
        let lambda = min_cycle_ratio(&g, Algorithm::KarpOrlin).unwrap();
        prop_assert!(lambda <= actual_ratio + EPSILON);
    }
}

#[test]
fn acyclic_graph_reports_infinite_ratios() {
    let mut b = GraphBuilder::new(4);
    b.insert_edge(0, 1, 3, 1);
    b.insert_edge(1, 2, -5, 1);
    b.insert_edge(2, 3, 2, 1);
    let g = b.build();

    assert_eq!(min_cycle_ratio(&g, Algorithm::KarpOrlin).unwrap(), f64::INFINITY);
    assert_eq!(max_cycle_ratio(&g, Algorithm::KarpOrlin).unwrap(), f64::NEG_INFINITY);
}

#[test]
fn every_algorithm_agrees_within_epsilon_on_a_disjoint_two_cycle_graph() {
    // Two disjoint 3-cycles (the original's "two disjoint cycles" scenario),
    // one with ratio 2.0 and one with ratio 5.0; the overall minimum is 2.0.
    let mut b = GraphBuilder::new(6);
    b.insert_edge(0, 1, 1, 1);
    b.insert_edge(1, 2, 2, 1);
    b.insert_edge(2, 0, 3, 1);
    b.insert_edge(3, 4, 4, 1);
    b.insert_edge(4, 5, 5, 1);
    b.insert_edge(5, 3, 6, 1);
    let g = b.build();

    let algorithms = [
        Algorithm::KarpOrlin,
        Algorithm::YoungTarjanOrlin,
        Algorithm::LawlerBellmanFord,
        Algorithm::LawlerSzymanski,
        Algorithm::Tarjan,
        Algorithm::Howard,
        Algorithm::ValueIteration,
        Algorithm::Burns,
    ];
    for algorithm in algorithms {
        let lambda = min_cycle_ratio(&g, algorithm).unwrap();
        assert!((lambda - 2.0).abs() < 0.02, "{algorithm:?} gave {lambda}");
    }
}
