//! Component builder (component C4): turns a graph plus its SCC ids into
//! one independent sub-graph per strongly connected component, each
//! optionally carrying a synthetic source node, plus a component graph
//! recording which SCCs have edges between them.

use crate::graph::{Graph, GraphBuilder, NodeId};
use crate::scc::Components;

/// One strongly connected component, materialized as its own graph.
///
/// When `has_source` is true, local node `0` is a synthetic source with an
/// imaginary zero-weight, unit-transit edge to every real node — not
/// materialized as an edge in `graph`; its only effect is the tree solvers'
/// initial depth-1 tree (see the tree-based solvers). Real node `i`
/// (0-based within the component) lives at local index `i + 1` in that
/// case, or `i` otherwise.
pub struct ScComponent {
    pub graph: Graph,
    pub has_source: bool,
    /// Maps a local node index back to the node id in the original graph.
    /// The synthetic source, if present, has no entry of its own (its
    /// local index is always 0, and `global_ids[0]` is the first real
    /// node's global id when `has_source` is true — callers index by
    /// `local - 1` in that case).
    pub global_ids: Vec<NodeId>,
}

impl ScComponent {
    /// Local index of `global` within this component, given `has_source`.
    fn local_index(&self, local_real_index: usize) -> usize {
        if self.has_source {
            local_real_index + 1
        } else {
            local_real_index
        }
    }

    /// Number of real (non-synthetic) nodes in this component.
    pub fn num_real_nodes(&self) -> usize {
        if self.has_source {
            self.graph.num_nodes() - 1
        } else {
            self.graph.num_nodes()
        }
    }

    /// The first edge id that is a genuine intra-SCC edge rather than one of
    /// the synthetic source->v edges inserted by [`build_component_graph`]
    /// ahead of them. The tree-based solvers (C5) need this to reproduce the
    /// original's distinction between the m real edges and the source's
    /// imaginary edges, which were never materialized or counted as edges
    /// at all.
    pub fn real_edge_start(&self) -> usize {
        if self.has_source {
            self.num_real_nodes()
        } else {
            0
        }
    }
}

/// A DAG over SCCs: one [`ScComponent`] per node, plus inter-SCC edges
/// recorded only for their existence (topology is otherwise unused by the
/// ratio solvers, so weight is always 0 and duplicates are left as-is,
/// matching the original's shipped — not its commented-out — behavior).
pub struct ComponentGraph {
    pub components: Vec<ScComponent>,
    pub inter_edges: Vec<(usize, usize)>,
}

/// Builds the component graph for `g`, given its SCC decomposition.
///
/// `with_source` selects whether each sub-graph gets a synthetic source
/// node; the tree-based solvers (C5) and the Tarjan bisection oracle (C6)
/// need one, while the policy-iteration solvers (C7) and Burns's method do
/// not (they have no notion of a rooted tree).
pub fn build_component_graph(g: &Graph, sc: &Components, with_source: bool) -> ComponentGraph {
    let n = g.num_nodes();

    let mut size = vec![0usize; sc.count];
    for &c in &sc.component {
        size[c] += 1;
    }

    // local_index[v] = position of v within its component's real-node
    // numbering (0-based, before any source offset).
    let mut local_index = vec![0usize; n];
    let mut cursor = vec![0usize; sc.count];
    for v in 0..n {
        let c = sc.component[v];
        local_index[v] = cursor[c];
        cursor[c] += 1;
    }

    let mut builders: Vec<GraphBuilder> = size
        .iter()
        .map(|&s| GraphBuilder::new(if with_source { s + 1 } else { s }))
        .collect();
    let mut global_ids: Vec<Vec<NodeId>> = size.iter().map(|&s| vec![0; s]).collect();
    for v in 0..n {
        let c = sc.component[v];
        global_ids[c][local_index[v]] = v;
    }

    if with_source {
        for (c, &s) in size.iter().enumerate() {
            for real in 0..s {
                builders[c].insert_edge(0, real + 1, 0, 1);
            }
        }
    }

    let mut inter_edges = Vec::new();
    for e in g.edge_ids() {
        let u = g.src(e);
        let v = g.tar(e);
        let cu = sc.component[u];
        let cv = sc.component[v];
        if cu == cv {
            let lu = local_index[u];
            let lv = local_index[v];
            let offset = if with_source { 1 } else { 0 };
            builders[cu].insert_edge(lu + offset, lv + offset, g.weight(e), g.transit(e));
        } else {
            inter_edges.push((cu, cv));
        }
    }

    let components = builders
        .into_iter()
        .zip(global_ids)
        .map(|(b, ids)| ScComponent {
            graph: b.build(),
            has_source: with_source,
            global_ids: ids,
        })
        .collect();

    ComponentGraph {
        components,
        inter_edges,
    }
}
