//! Cycle ratio bound estimation (component C9), ported from
//! `ad_alg_util.cc`'s `find_lambda_bound`.
//!
//! Builds a successor graph — each node's lightest (or heaviest) outgoing
//! edge by weight alone, ignoring transit time — then walks it looking for
//! cycles exactly as [`crate::solvers::policy`] does for the full policy
//! graph. The minimum ratio among the cycles found is a valid bound: it
//! corresponds to some real cycle in `g`, so the true optimum cannot be
//! smaller (when `which` selects minimum-weight successors) than is useful
//! for tightening bisection's initial search interval.

use crate::graph::Graph;

/// Finds a bound on the minimum cycle ratio of `g` by walking a successor
/// graph built from each node's extreme (by `which`) outgoing edge.
///
/// `which = true` picks each node's minimum-weight outgoing edge;
/// `which = false` picks its maximum-weight one. Nodes with no outgoing
/// edge are excluded from the successor graph (they cannot lie on any
/// cycle). Returns `plus_infinity` if no cycle is found in the successor
/// graph at all (e.g. `g` has no edges).
pub fn find_lambda_bound(g: &Graph, which: bool, plus_infinity: f64) -> f64 {
    let n = g.num_nodes();

    let mut target: Vec<Option<usize>> = vec![None; n];
    let mut einfo = vec![0i64; n];
    let mut einfo2 = vec![1i64; n];
    let mut dist = vec![if which { plus_infinity } else { -plus_infinity }; n];

    for e in g.edge_ids() {
        let u = g.src(e);
        let d = g.weight(e);
        let better = if which { (d as f64) < dist[u] } else { (d as f64) > dist[u] };
        if better {
            dist[u] = d as f64;
            target[u] = Some(g.tar(e));
            einfo[u] = d;
            einfo2[u] = g.transit(e);
        }
    }

    let mut lambda = plus_infinity;
    let mut visited = vec![-1i64; n];

    for v in 0..n {
        if visited[v] >= 0 || target[v].is_none() {
            continue;
        }

        let mut u = v;
        loop {
            visited[u] = v as i64;
            match target[u] {
                Some(next) => u = next,
                None => break,
            }
            if visited[u] != -1 {
                break;
            }
        }

        if visited[u] != v as i64 {
            continue;
        }

        let w = u;
        let mut total_weight: i64 = 0;
        let mut total_length: i64 = 0;
        loop {
            total_length += einfo2[u];
            total_weight += einfo[u];
            u = target[u].expect("cycle nodes always have a successor");
            if u == w {
                break;
            }
        }

        let new_lambda = total_weight as f64 / total_length as f64;
        if new_lambda < lambda {
            lambda = new_lambda;
        }
    }

    lambda
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    #[test]
    fn three_cycle_min_bound_is_exact() {
        let mut b = GraphBuilder::new(3);
        b.insert_edge(0, 1, 1, 1);
        b.insert_edge(1, 2, 2, 1);
        b.insert_edge(2, 0, 3, 1);
        let g = b.build();
        let lambda = find_lambda_bound(&g, true, 1e9);
        assert!((lambda - 2.0).abs() < 1e-6);
    }

    #[test]
    fn acyclic_graph_has_no_cycle_in_successor_graph() {
        let mut b = GraphBuilder::new(3);
        b.insert_edge(0, 1, 1, 1);
        b.insert_edge(1, 2, 1, 1);
        let g = b.build();
        let lambda = find_lambda_bound(&g, true, 1e9);
        assert_eq!(lambda, 1e9);
    }

    #[test]
    fn max_weight_successor_picks_different_cycle() {
        let mut b = GraphBuilder::new(2);
        b.insert_edge(0, 1, 1, 1);
        b.insert_edge(0, 1, 5, 1);
        b.insert_edge(1, 0, 2, 1);
        let g = b.build();
        let min_bound = find_lambda_bound(&g, true, 1e9);
        let max_bound = find_lambda_bound(&g, false, 1e9);
        assert!((min_bound - 1.5).abs() < 1e-6);
        assert!((max_bound - 3.5).abs() < 1e-6);
    }
}
