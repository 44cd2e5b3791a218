//! An immutable, CSR-like directed graph store (component C1).
//!
//! Construction is two-phase, mirroring the original `ad_graph` class:
//! a [`GraphBuilder`] accepts streaming node/edge insertions, and
//! [`GraphBuilder::build`] ("build_adj" in the source this is ported from)
//! freezes the result into a [`Graph`] whose in/out incidence arrays are
//! flat, offset-indexed slices — no second lookup into the edge array is
//! needed during traversal.

/// Node identifier, dense in `[0, num_nodes)`.
pub type NodeId = usize;
/// Edge identifier, dense in `[0, num_edges)`.
pub type EdgeId = usize;

/// Builds a [`Graph`] by streaming edge insertions, then freezing it.
///
/// Node count is fixed at construction (`GraphBuilder::new`); edges are
/// appended with [`GraphBuilder::insert_edge`] in any order. Degrees are
/// tallied as edges stream in so that [`GraphBuilder::build`] can convert
/// them into prefix-sum offsets in a single pass.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    n: usize,
    src: Vec<NodeId>,
    tar: Vec<NodeId>,
    w: Vec<i64>,
    t: Vec<i64>,
    out_degree: Vec<usize>,
    in_degree: Vec<usize>,
}

impl GraphBuilder {
    /// Reserves `n` nodes, numbered `0..n`, with no edges yet.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            src: Vec::new(),
            tar: Vec::new(),
            w: Vec::new(),
            t: Vec::new(),
            out_degree: vec![0; n],
            in_degree: vec![0; n],
        }
    }

    /// Appends a directed edge `u -> v` with weight `w` and transit time `t`.
    ///
    /// Self-loops and duplicate edges are both permitted. Returns the new
    /// edge's id, which is stable for the lifetime of the built [`Graph`].
    pub fn insert_edge(&mut self, u: NodeId, v: NodeId, w: i64, t: i64) -> EdgeId {
        debug_assert!(u < self.n && v < self.n, "edge endpoint out of range");
        let e = self.src.len();
        self.src.push(u);
        self.tar.push(v);
        self.w.push(w);
        self.t.push(t);
        self.out_degree[u] += 1;
        self.in_degree[v] += 1;
        e
    }

    /// Freezes the builder into an immutable [`Graph`] (the original's
    /// `build_adj`): degree counters become prefix-sum offsets, and each
    /// edge is scattered into its source's out-slot and its target's
    /// in-slot.
    pub fn build(self) -> Graph {
        let n = self.n;
        let m = self.src.len();

        let mut out_start = vec![0usize; n + 1];
        let mut in_start = vec![0usize; n + 1];
        for v in 0..n {
            out_start[v + 1] = out_start[v] + self.out_degree[v];
            in_start[v + 1] = in_start[v] + self.in_degree[v];
        }

        let mut out_edges = vec![0 as EdgeId; m];
        let mut in_edges = vec![0 as EdgeId; m];
        let mut out_cursor = out_start.clone();
        let mut in_cursor = in_start.clone();

        for e in 0..m {
            let u = self.src[e];
            let v = self.tar[e];
            out_edges[out_cursor[u]] = e;
            out_cursor[u] += 1;
            in_edges[in_cursor[v]] = e;
            in_cursor[v] += 1;
        }

        Graph {
            n,
            src: self.src,
            tar: self.tar,
            w: self.w,
            t: self.t,
            out_start,
            out_edges,
            in_start,
            in_edges,
        }
    }
}

/// An immutable directed multigraph with integer `(weight, transit time)`
/// per edge and flat in/out incidence arrays.
///
/// Once built, nothing about a `Graph` can change; all accessors are O(1).
#[derive(Debug, Clone)]
pub struct Graph {
    n: usize,
    src: Vec<NodeId>,
    tar: Vec<NodeId>,
    w: Vec<i64>,
    t: Vec<i64>,
    out_start: Vec<usize>,
    out_edges: Vec<EdgeId>,
    in_start: Vec<usize>,
    in_edges: Vec<EdgeId>,
}

impl Graph {
    /// A graph with `n` nodes and no edges.
    pub fn empty(n: usize) -> Self {
        GraphBuilder::new(n).build()
    }

    pub fn num_nodes(&self) -> usize {
        self.n
    }

    pub fn num_edges(&self) -> usize {
        self.src.len()
    }

    pub fn src(&self, e: EdgeId) -> NodeId {
        self.src[e]
    }

    pub fn tar(&self, e: EdgeId) -> NodeId {
        self.tar[e]
    }

    pub fn weight(&self, e: EdgeId) -> i64 {
        self.w[e]
    }

    pub fn transit(&self, e: EdgeId) -> i64 {
        self.t[e]
    }

    pub fn outdegree(&self, v: NodeId) -> usize {
        self.out_start[v + 1] - self.out_start[v]
    }

    pub fn indegree(&self, v: NodeId) -> usize {
        self.in_start[v + 1] - self.in_start[v]
    }

    /// The `i`-th outgoing edge id of `v`, `i < outdegree(v)`.
    pub fn out_edge(&self, v: NodeId, i: usize) -> EdgeId {
        self.out_edges[self.out_start[v] + i]
    }

    /// The `i`-th incoming edge id of `v`, `i < indegree(v)`.
    pub fn in_edge(&self, v: NodeId, i: usize) -> EdgeId {
        self.in_edges[self.in_start[v] + i]
    }

    /// Iterates the edge ids leaving `v`.
    pub fn out_edges(&self, v: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.out_edges[self.out_start[v]..self.out_start[v + 1]]
            .iter()
            .copied()
    }

    /// Iterates the edge ids entering `v`.
    pub fn in_edges(&self, v: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.in_edges[self.in_start[v]..self.in_start[v + 1]]
            .iter()
            .copied()
    }

    /// Iterates all edge ids `0..num_edges()`.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> {
        0..self.num_edges()
    }

    /// True if every edge has a distinct source and target and no node
    /// repeats in any edge (i.e. the graph has a self-loop anywhere).
    pub fn has_self_loop(&self) -> bool {
        self.edge_ids().any(|e| self.src(e) == self.tar(e))
    }

    /// A new graph with every edge weight negated (used for the max-ratio
    /// variant, which solves the min-ratio problem on negated weights).
    pub fn negate_weights(&self) -> Graph {
        let mut b = GraphBuilder::new(self.n);
        for e in self.edge_ids() {
            b.insert_edge(self.src(e), self.tar(e), -self.weight(e), self.transit(e));
        }
        b.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_adj_is_index_coherent() {
        let mut b = GraphBuilder::new(3);
        b.insert_edge(0, 1, 1, 1);
        b.insert_edge(1, 2, 2, 1);
        b.insert_edge(2, 0, 3, 1);
        let g = b.build();

        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.num_edges(), 3);

        let total_out: usize = (0..3).map(|v| g.outdegree(v)).sum();
        let total_in: usize = (0..3).map(|v| g.indegree(v)).sum();
        assert_eq!(total_out, g.num_edges());
        assert_eq!(total_in, g.num_edges());

        for v in 0..3 {
            for i in 0..g.outdegree(v) {
                let e = g.out_edge(v, i);
                assert_eq!(g.src(e), v);
            }
            for i in 0..g.indegree(v) {
                let e = g.in_edge(v, i);
                assert_eq!(g.tar(e), v);
            }
        }
    }

    #[test]
    fn self_loops_and_duplicates_allowed() {
        let mut b = GraphBuilder::new(1);
        b.insert_edge(0, 0, 5, 1);
        b.insert_edge(0, 0, 5, 1);
        let g = b.build();
        assert_eq!(g.num_edges(), 2);
        assert!(g.has_self_loop());
    }

    #[test]
    fn negate_weights_preserves_transit() {
        let mut b = GraphBuilder::new(2);
        b.insert_edge(0, 1, 7, 3);
        let g = b.build().negate_weights();
        assert_eq!(g.weight(0), -7);
        assert_eq!(g.transit(0), 3);
    }
}
