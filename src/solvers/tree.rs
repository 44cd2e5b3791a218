//! Tree-based parametric shortest-path ratio solvers (component C5).
//!
//! Both dialects share the same shortest-paths tree representation: a
//! circular preorder list (`prev`/`next`) plus a "children minus one" degree
//! count per node, which lets the main loop delimit a subtree by walking
//! `next` and summing `degree` until the running total goes negative — see
//! [`Tree::walk_subtree`]. This is ported from `ad_alg_ko.cc` and
//! `ad_alg_yto.cc` verbatim in structure; only the heap indirection differs
//! between Karp-Orlin (one entry per edge) and Young-Tarjan-Orlin (one entry
//! per node).
//!
//! The synthetic source is local node `0` of `sub.graph` (see
//! [`crate::components::build_component_graph`]); its imaginary edges to
//! every real node are never placed in the heap — only edges at or past
//! [`crate::components::ScComponent::real_edge_start`] are.

use crate::components::ScComponent;
use crate::graph::{EdgeId, Graph, NodeId};
use crate::heap::IndexedHeap;

/// The shortest-paths tree shared by both tree-based solvers: a spanning
/// arborescence rooted at the synthetic source, stored as a circular
/// preorder doubly-linked list so that any subtree is a contiguous run of
/// that list.
struct Tree {
    dist: Vec<f64>,
    length: Vec<f64>,
    degree: Vec<i64>,
    parent: Vec<NodeId>,
    prev: Vec<NodeId>,
    next: Vec<NodeId>,
    visited: Vec<bool>,
}

const SOURCE: NodeId = 0;

impl Tree {
    /// Builds `T(0)`: the source as root with every real node a direct
    /// child at `dist = 0`, `length = 1` (one imaginary edge of weight 0,
    /// transit 1), in ascending preorder.
    fn initial(n_total: usize) -> Self {
        let mut dist = vec![0.0; n_total];
        let mut length = vec![0.0; n_total];
        let mut degree = vec![0i64; n_total];
        let mut parent = vec![SOURCE; n_total];
        let mut prev = vec![0usize; n_total];
        let mut next = vec![0usize; n_total];
        let visited = vec![false; n_total];

        degree[SOURCE] = n_total as i64 - 2;
        prev[SOURCE] = n_total - 1;
        next[SOURCE] = 1 % n_total;
        parent[SOURCE] = SOURCE;

        for v in 1..n_total {
            dist[v] = 0.0;
            length[v] = 1.0;
            degree[v] = -1;
            prev[v] = v - 1;
            next[v] = (v + 1) % n_total;
            parent[v] = SOURCE;
        }
        if n_total > 1 {
            next[n_total - 1] = SOURCE;
        }

        Tree {
            dist,
            length,
            degree,
            parent,
            prev,
            next,
            visited,
        }
    }

    /// Walks the subtree `T(v)` by the degree-sum trick, applying `f` to
    /// every node in it. Returns `Some(w_next)` (the first node after the
    /// subtree) normally, or `None` if `u` was encountered during the
    /// walk — meaning the edge `u -> v` would close a cycle.
    fn walk_subtree(&mut self, v: NodeId, u: NodeId, mut f: impl FnMut(&mut Self, NodeId)) -> Option<NodeId> {
        let mut total_degree = 0i64;
        let mut w = v;
        loop {
            if w == u {
                return None;
            }
            total_degree += self.degree[w];
            f(self, w);
            if total_degree < 0 {
                return Some(self.next[w]);
            }
            w = self.next[w];
        }
    }

    /// Performs the tree surgery described in the spec: removes `T(v)` from
    /// the list between `before_v` and `w_next`, then splices it in right
    /// after `u`, setting `parent(v) = u`.
    fn splice_subtree(&mut self, v: NodeId, w_next: NodeId, u: NodeId) {
        self.degree[self.parent[v]] -= 1;
        let before_v = self.prev[v];
        let last_of_tv = self.prev[w_next];
        self.next[before_v] = w_next;
        self.prev[w_next] = before_v;

        self.degree[u] += 1;
        self.parent[v] = u;
        let after_u = self.next[u];
        self.next[u] = v;
        self.prev[v] = u;
        self.next[last_of_tv] = after_u;
        self.prev[after_u] = last_of_tv;
    }
}

/// Computes `key(e) = (dist(u) + w(e) - dist(v)) / (length(u) + t(e) - length(v))`,
/// or `+infinity` when the denominator is not positive.
fn edge_key(g: &Graph, tree: &Tree, e: EdgeId, plus_infinity: f64) -> f64 {
    let u = g.src(e);
    let v = g.tar(e);
    let denom = tree.length[u] + g.transit(e) as f64 - tree.length[v];
    if denom > 0.0 {
        (tree.dist[u] + g.weight(e) as f64 - tree.dist[v]) / denom
    } else {
        plus_infinity
    }
}

/// Karp and Orlin's minimum cycle ratio algorithm: one heap entry per edge.
///
/// `sub` must carry a synthetic source (`has_source = true`, see
/// [`crate::components::build_component_graph`]). Returns `+infinity` if the
/// component is acyclic (which cannot happen for a genuine non-trivial SCC,
/// but is the well-defined answer for a degenerate single-node call).
pub fn karp_orlin(sub: &ScComponent, plus_infinity: f64) -> f64 {
    let g = &sub.graph;
    let n_total = g.num_nodes();
    let real_edge_start = sub.real_edge_start();
    let mut tree = Tree::initial(n_total);

    let mut heap = IndexedHeap::new();
    heap.put(plus_infinity, -1);
    let mut edge2heap = vec![None; g.num_edges()];
    for e in real_edge_start..g.num_edges() {
        let key = edge_key(g, &tree, e, plus_infinity);
        edge2heap[e] = Some(heap.put(key, e as i64));
    }

    let mut lambda = plus_infinity;
    #[cfg(debug_assertions)]
    let mut prev_lambda = f64::NEG_INFINITY;

    loop {
        let e_min = heap.peek_info().expect("heap always holds the sentinel");
        lambda = heap.peek_key().expect("heap always holds the sentinel");
        if lambda >= plus_infinity {
            return lambda;
        }
        #[cfg(debug_assertions)]
        {
            debug_assert!(lambda >= prev_lambda, "lambda must be non-decreasing");
            prev_lambda = lambda;
        }

        let e_min = e_min as usize;
        let u = g.src(e_min);
        let v = g.tar(e_min);

        let delta1 = tree.dist[u] + g.weight(e_min) as f64 - tree.dist[v];
        let delta2 = tree.length[u] + g.transit(e_min) as f64 - tree.length[v];

        let w_next = match tree.walk_subtree(v, u, |t, x| {
            t.dist[x] += delta1;
            t.length[x] += delta2;
            t.visited[x] = true;
        }) {
            None => return lambda,
            Some(w) => w,
        };

        tree.splice_subtree(v, w_next, u);

        // Pass (a): edges entering T(v).
        let mut total_degree = 0i64;
        let mut y = v;
        loop {
            total_degree += tree.degree[y];
            for i in 0..g.indegree(y) {
                let e = g.in_edge(y, i);
                if e < real_edge_start {
                    continue;
                }
                let x = g.src(e);
                if tree.visited[x] != tree.visited[y] {
                    let new_key = edge_key(g, &tree, e, plus_infinity);
                    heap.update_key(edge2heap[e].expect("real edge has a heap handle"), new_key);
                }
            }
            if total_degree < 0 {
                break;
            }
            y = tree.next[y];
        }

        // Pass (b): edges leaving T(v); also clears `visited`.
        let mut total_degree = 0i64;
        let mut x = v;
        loop {
            total_degree += tree.degree[x];
            for i in 0..g.outdegree(x) {
                let e = g.out_edge(x, i);
                if e < real_edge_start {
                    continue;
                }
                let y = g.tar(e);
                if tree.visited[x] != tree.visited[y] {
                    let new_key = edge_key(g, &tree, e, plus_infinity);
                    heap.update_key(edge2heap[e].expect("real edge has a heap handle"), new_key);
                }
            }
            tree.visited[x] = false;
            if total_degree < 0 {
                break;
            }
            x = tree.next[x];
        }
    }
}

/// Young, Tarjan, and Orlin's minimum cycle ratio algorithm: one heap entry
/// per non-source node, each remembering its best in-edge (`key`/`ekey`).
///
/// Same preconditions and return convention as [`karp_orlin`].
pub fn young_tarjan_orlin(sub: &ScComponent, plus_infinity: f64) -> f64 {
    let g = &sub.graph;
    let n_total = g.num_nodes();
    let real_edge_start = sub.real_edge_start();
    let mut tree = Tree::initial(n_total);

    let mut edge_key_cache = vec![0.0f64; g.num_edges()];
    let mut node_key = vec![-1i64; n_total];
    let mut node_ekey = vec![plus_infinity; n_total];

    for e in real_edge_start..g.num_edges() {
        let key = edge_key(g, &tree, e, plus_infinity);
        edge_key_cache[e] = key;
        let v = g.tar(e);
        if key <= node_ekey[v] {
            node_key[v] = e as i64;
            node_ekey[v] = key;
        }
    }

    let mut heap = IndexedHeap::new();
    heap.put(plus_infinity, -1);
    let mut node2heap = vec![None; n_total];
    for v in 1..n_total {
        node2heap[v] = Some(heap.put(node_ekey[v], node_key[v]));
    }

    let mut lambda = plus_infinity;
    #[cfg(debug_assertions)]
    let mut prev_lambda = f64::NEG_INFINITY;

    loop {
        let e_min = heap.peek_info().expect("heap always holds the sentinel");
        lambda = heap.peek_key().expect("heap always holds the sentinel");
        if lambda >= plus_infinity {
            return lambda;
        }
        #[cfg(debug_assertions)]
        {
            debug_assert!(lambda >= prev_lambda, "lambda must be non-decreasing");
            prev_lambda = lambda;
        }

        let e_min = e_min as usize;
        let u = g.src(e_min);
        let v = g.tar(e_min);

        let delta1 = tree.dist[u] + g.weight(e_min) as f64 - tree.dist[v];
        let delta2 = tree.length[u] + g.transit(e_min) as f64 - tree.length[v];

        let w_next = match tree.walk_subtree(v, u, |t, x| {
            t.dist[x] += delta1;
            t.length[x] += delta2;
            t.visited[x] = true;
        }) {
            None => return lambda,
            Some(w) => w,
        };

        tree.splice_subtree(v, w_next, u);

        // Pass (a): recompute node_key/ekey from scratch for every y in T(v).
        let mut total_degree = 0i64;
        let mut y = v;
        loop {
            total_degree += tree.degree[y];
            node_ekey[y] = plus_infinity;
            for i in 0..g.indegree(y) {
                let e = g.in_edge(y, i);
                if e < real_edge_start {
                    continue;
                }
                let x = g.src(e);
                if tree.visited[x] != tree.visited[y] {
                    edge_key_cache[e] = edge_key(g, &tree, e, plus_infinity);
                }
                if edge_key_cache[e] <= node_ekey[y] {
                    node_key[y] = e as i64;
                    node_ekey[y] = edge_key_cache[e];
                }
            }
            heap.update_node(
                node2heap[y].expect("non-source node has a heap handle"),
                node_ekey[y],
                node_key[y],
            );
            if total_degree < 0 {
                break;
            }
            y = tree.next[y];
        }

        // Pass (b): edges leaving T(v) only ever *lower* the target's key.
        let mut total_degree = 0i64;
        let mut x = v;
        loop {
            total_degree += tree.degree[x];
            for i in 0..g.outdegree(x) {
                let e = g.out_edge(x, i);
                if e < real_edge_start {
                    continue;
                }
                let y = g.tar(e);
                if tree.visited[x] != tree.visited[y] {
                    edge_key_cache[e] = edge_key(g, &tree, e, plus_infinity);
                    if edge_key_cache[e] < node_ekey[y] {
                        node_key[y] = e as i64;
                        node_ekey[y] = edge_key_cache[e];
                        heap.update_node(
                            node2heap[y].expect("non-source node has a heap handle"),
                            node_ekey[y],
                            node_key[y],
                        );
                    }
                }
            }
            tree.visited[x] = false;
            if total_degree < 0 {
                break;
            }
            x = tree.next[x];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::build_component_graph;
    use crate::graph::GraphBuilder;
    use crate::scc::strongly_connected_components;

    fn single_scc_with_source(edges: &[(usize, usize, i64, i64)], n: usize) -> ScComponent {
        let mut b = GraphBuilder::new(n);
        for &(u, v, w, t) in edges {
            b.insert_edge(u, v, w, t);
        }
        let g = b.build();
        let sc = strongly_connected_components(&g);
        let cg = build_component_graph(&g, &sc, true);
        assert_eq!(cg.components.len(), 1);
        let mut comps = cg.components;
        comps.pop().unwrap()
    }

    #[test]
    fn three_cycle_ko() {
        let sub = single_scc_with_source(&[(0, 1, 1, 1), (1, 2, 2, 1), (2, 0, 3, 1)], 3);
        let lambda = karp_orlin(&sub, 1e9);
        assert!((lambda - 2.0).abs() < 1e-6);
    }

    #[test]
    fn three_cycle_yto() {
        let sub = single_scc_with_source(&[(0, 1, 1, 1), (1, 2, 2, 1), (2, 0, 3, 1)], 3);
        let lambda = young_tarjan_orlin(&sub, 1e9);
        assert!((lambda - 2.0).abs() < 1e-6);
    }

    #[test]
    fn self_loop_ko() {
        let sub = single_scc_with_source(&[(0, 0, 5, 1)], 1);
        let lambda = karp_orlin(&sub, 1e9);
        assert!((lambda - 5.0).abs() < 1e-6);
    }

    #[test]
    fn cycle_ratio_with_transit_two() {
        let sub = single_scc_with_source(&[(0, 1, 1, 2), (1, 2, 2, 2), (2, 0, 3, 2)], 3);
        let lambda_ko = karp_orlin(&sub, 1e9);
        let lambda_yto = young_tarjan_orlin(&sub, 1e9);
        assert!((lambda_ko - 1.0).abs() < 1e-6);
        assert!((lambda_yto - 1.0).abs() < 1e-6);
    }

    #[test]
    fn chain_with_back_edge() {
        let sub = single_scc_with_source(
            &[(0, 1, 0, 1), (1, 2, 0, 1), (2, 3, 0, 1), (3, 0, -4, 1)],
            4,
        );
        let lambda_ko = karp_orlin(&sub, 1e9);
        let lambda_yto = young_tarjan_orlin(&sub, 1e9);
        assert!((lambda_ko - (-1.0)).abs() < 1e-6);
        assert!((lambda_yto - (-1.0)).abs() < 1e-6);
    }
}
