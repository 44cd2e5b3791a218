//! Synthetic graph generation (component C8's synthesize mode), ported from
//! `ad_graph.cc`'s `generate_all`/`generate_part` and `ad_util.cc`'s
//! `uniform_dist`/`normal_dist`/`exp_dist`.
//!
//! The original picked one of three sampling functions at startup via a
//! function pointer (`dist_func`) and called it uniformly as `dist_func(a,
//! b)` for both weights and transit times, with the meaning of `a`/`b`
//! depending on which distribution was selected (`min`/`max` for uniform,
//! `mean`/ignored for exponential, `mean`/`stddev` for normal). [`Distribution`]
//! plus [`sample`] keep that one-call-site shape; the actual sampling is
//! handed to `rand_distr` instead of the original's hand-rolled `drand48`
//! formulas.

use std::collections::HashSet;

use rand::Rng;
use rand_distr::{Distribution as _, Exp, Normal};

use crate::graph::{Graph, GraphBuilder};

/// Which distribution to draw edge weights and transit times from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distribution {
    /// Integers uniform on `[a, b]` inclusive.
    Uniform,
    /// `a` is the mean, `b` the standard deviation.
    Normal,
    /// `a` is the mean; `b` is accepted but ignored, matching the original's
    /// `exp_dist(mean, ignored)` signature.
    Exponential,
}

/// Draws one integer from `dist` with parameters `(a, b)`, rounding
/// real-valued samples to the nearest integer.
pub fn sample(dist: Distribution, rng: &mut impl Rng, a: i64, b: i64) -> i64 {
    match dist {
        Distribution::Uniform => {
            if a >= b {
                a
            } else {
                rng.gen_range(a..=b)
            }
        }
        Distribution::Normal => {
            let mean = a as f64;
            let sdev = (b as f64).abs().max(f64::EPSILON);
            let value = Normal::new(mean, sdev)
                .expect("finite mean/stddev")
                .sample(rng);
            value.round() as i64
        }
        Distribution::Exponential => {
            let mean = (a as f64).abs().max(f64::EPSILON);
            let value = Exp::new(1.0 / mean).expect("positive rate").sample(rng);
            value.round() as i64
        }
    }
}

/// Parameters shared by [`generate_all`] and [`generate_part`]: the weight
/// and transit-time distribution bounds, the offset subtracted from every
/// sampled weight, and whether this is the min-ratio or max-ratio variant
/// (the original negated weights at generation time instead of at solve
/// time; this crate always generates min-ratio weights and leaves
/// negation to [`crate::driver::max_cycle_ratio`], so `min_version` is kept
/// here only to stay literally faithful to the ported formula and should
/// normally be left `true`).
#[derive(Debug, Clone, Copy)]
pub struct GenerateParams {
    pub dist: Distribution,
    pub w1: i64,
    pub w2: i64,
    pub t1: i64,
    pub t2: i64,
    pub offset: i64,
    pub min_version: bool,
}

fn sampled_weight(rng: &mut impl Rng, p: &GenerateParams) -> i64 {
    let w = sample(p.dist, rng, p.w1, p.w2) - p.offset;
    if p.min_version {
        w
    } else {
        -w
    }
}

fn sampled_transit(rng: &mut impl Rng, p: &GenerateParams) -> i64 {
    sample(p.dist, rng, p.t1, p.t2)
}

/// Generates a fresh random graph with `nnodes` nodes and `nedges` edges.
///
/// A Hamiltonian cycle `0 -> 1 -> ... -> nnodes-1 -> 0` is inserted first so
/// the result always has at least one cycle, exactly as the original does
/// ("add a cycle around all the nodes"); the remaining `nedges - nnodes`
/// edges connect distinct, not-yet-adjacent node pairs chosen uniformly at
/// random.
///
/// # Panics
/// Panics if `nnodes == 0` or `nedges < nnodes` (there is no way to lay the
/// guaranteed cycle down otherwise).
pub fn generate_all(rng: &mut impl Rng, nnodes: usize, nedges: usize, params: &GenerateParams) -> Graph {
    assert!(nnodes > 0, "generate_all requires nnodes > 0");
    assert!(nedges >= nnodes, "generate_all requires nedges >= nnodes for the guaranteed cycle");

    let mut builder = GraphBuilder::new(nnodes);
    let mut adjacency: Vec<HashSet<usize>> = vec![HashSet::new(); nnodes];

    for u in 0..nnodes {
        let v = (u + 1) % nnodes;
        let w = sampled_weight(rng, params);
        let t = sampled_transit(rng, params);
        builder.insert_edge(u, v, w, t);
        adjacency[u].insert(v);
    }

    for _ in nnodes..nedges {
        let (u, v) = loop {
            let u = rng.gen_range(0..nnodes);
            let v = rng.gen_range(0..nnodes);
            if u != v && !adjacency[u].contains(&v) {
                break (u, v);
            }
        };
        let w = sampled_weight(rng, params);
        let t = sampled_transit(rng, params);
        builder.insert_edge(u, v, w, t);
        adjacency[u].insert(v);
    }

    builder.build()
}

/// Regenerates every edge weight and transit time of `g`, keeping its
/// topology fixed (the original's "read, then regenerate weights" mode).
pub fn generate_part(rng: &mut impl Rng, g: &Graph, params: &GenerateParams) -> Graph {
    let mut builder = GraphBuilder::new(g.num_nodes());
    for e in g.edge_ids() {
        let w = sampled_weight(rng, params);
        let t = sampled_transit(rng, params);
        builder.insert_edge(g.src(e), g.tar(e), w, t);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn params(dist: Distribution) -> GenerateParams {
        GenerateParams {
            dist,
            w1: 1,
            w2: 10,
            t1: 1,
            t2: 5,
            offset: 0,
            min_version: true,
        }
    }

    #[test]
    fn generated_graph_has_the_requested_shape_and_a_hamiltonian_cycle() {
        let mut rng = StdRng::seed_from_u64(42);
        let g = generate_all(&mut rng, 6, 12, &params(Distribution::Uniform));
        assert_eq!(g.num_nodes(), 6);
        assert_eq!(g.num_edges(), 12);
        for u in 0..6 {
            let v = (u + 1) % 6;
            let has_edge = g.out_edges(u).any(|e| g.tar(e) == v);
            assert!(has_edge, "missing guaranteed cycle edge {u} -> {v}");
        }
    }

    #[test]
    fn transit_times_stay_within_bounds_for_uniform() {
        let mut rng = StdRng::seed_from_u64(7);
        let g = generate_all(&mut rng, 5, 15, &params(Distribution::Uniform));
        for e in g.edge_ids() {
            assert!(g.transit(e) >= 1 && g.transit(e) <= 5);
        }
    }

    #[test]
    fn negative_offset_shifts_every_weight() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = params(Distribution::Uniform);
        p.w1 = 5;
        p.w2 = 5;
        p.offset = 2;
        let g = generate_all(&mut rng, 4, 4, &p);
        for e in g.edge_ids() {
            assert_eq!(g.weight(e), 3);
        }
    }

    #[test]
    fn max_version_negates_weights() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut p = params(Distribution::Uniform);
        p.w1 = 5;
        p.w2 = 5;
        p.min_version = false;
        let g = generate_all(&mut rng, 4, 4, &p);
        for e in g.edge_ids() {
            assert_eq!(g.weight(e), -5);
        }
    }

    #[test]
    fn generate_part_preserves_topology() {
        let mut rng = StdRng::seed_from_u64(11);
        let original = generate_all(&mut rng, 5, 8, &params(Distribution::Uniform));
        let regenerated = generate_part(&mut rng, &original, &params(Distribution::Exponential));
        assert_eq!(regenerated.num_nodes(), original.num_nodes());
        assert_eq!(regenerated.num_edges(), original.num_edges());
        for e in original.edge_ids() {
            assert_eq!(original.src(e), regenerated.src(e));
            assert_eq!(original.tar(e), regenerated.tar(e));
        }
    }
}
