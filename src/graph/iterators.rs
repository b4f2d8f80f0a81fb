//!
//! Tuple-shaped iterators over a `petgraph::DiGraph`
//!
//! petgraph hands out reference types (`NodeReference`, `EdgeReference`);
//! the engines only need indices and weights, so these iterators flatten
//! them into plain tuples.
//!
use petgraph::graph::{DiGraph, EdgeIndex, EdgeReferences, Edges, NodeIndex, NodeReferences};
use petgraph::visit::{EdgeRef, IntoNodeReferences};
use petgraph::{Directed, Direction};

/// `(NodeIndex, &N)` of every node in index order
pub struct NodesIterator<'a, N: 'a> {
    nodes: NodeReferences<'a, N>,
}

impl<'a, N> NodesIterator<'a, N> {
    pub fn new<E>(graph: &'a DiGraph<N, E>) -> Self {
        NodesIterator {
            nodes: graph.node_references(),
        }
    }
}

impl<'a, N> Iterator for NodesIterator<'a, N> {
    type Item = (NodeIndex, &'a N);
    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

/// `(EdgeIndex, source, target, &E)` of every edge in insertion order
pub struct EdgesIterator<'a, E: 'a> {
    edges: EdgeReferences<'a, E>,
}

impl<'a, E> EdgesIterator<'a, E> {
    pub fn new<N>(graph: &'a DiGraph<N, E>) -> Self {
        EdgesIterator {
            edges: graph.edge_references(),
        }
    }
}

impl<'a, E> Iterator for EdgesIterator<'a, E> {
    type Item = (EdgeIndex, NodeIndex, NodeIndex, &'a E);
    fn next(&mut self) -> Option<Self::Item> {
        self.edges
            .next()
            .map(|er| (er.id(), er.source(), er.target(), er.weight()))
    }
}

///
/// Edges adjacent to a node, as `(EdgeIndex, neighbor, &E)`.
///
/// For `Neighbors::childs` the neighbor is the target of each outgoing
/// edge, for `Neighbors::parents` the source of each incoming edge.
///
pub struct Neighbors<'a, E: 'a> {
    edges: Edges<'a, E, Directed>,
    direction: Direction,
}

impl<'a, E> Neighbors<'a, E> {
    pub fn new<N>(graph: &'a DiGraph<N, E>, node: NodeIndex, direction: Direction) -> Self {
        Neighbors {
            edges: graph.edges_directed(node, direction),
            direction,
        }
    }
    /// outgoing edges of `node`
    pub fn childs<N>(graph: &'a DiGraph<N, E>, node: NodeIndex) -> Self {
        Self::new(graph, node, Direction::Outgoing)
    }
    /// incoming edges of `node`
    pub fn parents<N>(graph: &'a DiGraph<N, E>, node: NodeIndex) -> Self {
        Self::new(graph, node, Direction::Incoming)
    }
}

impl<'a, E> Iterator for Neighbors<'a, E> {
    type Item = (EdgeIndex, NodeIndex, &'a E);
    fn next(&mut self) -> Option<Self::Item> {
        let direction = self.direction;
        self.edges.next().map(|er| match direction {
            Direction::Outgoing => (er.id(), er.target(), er.weight()),
            Direction::Incoming => (er.id(), er.source(), er.weight()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{ei, ni};

    //   a -0.5-> b -1.0-> c
    //   a -0.5----------> c
    fn triangle() -> DiGraph<char, f64> {
        let mut g = DiGraph::new();
        let a = g.add_node('a');
        let b = g.add_node('b');
        let c = g.add_node('c');
        g.add_edge(a, b, 0.5);
        g.add_edge(a, c, 0.5);
        g.add_edge(b, c, 1.0);
        g
    }

    #[test]
    fn nodes_and_edges_in_index_order() {
        let g = triangle();
        let nodes: Vec<_> = NodesIterator::new(&g).map(|(v, w)| (v, *w)).collect();
        assert_eq!(nodes, vec![(ni(0), 'a'), (ni(1), 'b'), (ni(2), 'c')]);

        let edges: Vec<_> = EdgesIterator::new(&g).map(|(e, s, t, _)| (e, s, t)).collect();
        assert_eq!(
            edges,
            vec![
                (ei(0), ni(0), ni(1)),
                (ei(1), ni(0), ni(2)),
                (ei(2), ni(1), ni(2))
            ]
        );
    }

    #[test]
    fn neighbors_by_direction() {
        let g = triangle();
        let mut childs: Vec<_> = Neighbors::childs(&g, ni(0)).map(|(_, v, _)| v).collect();
        childs.sort();
        assert_eq!(childs, vec![ni(1), ni(2)]);
        let out: f64 = Neighbors::childs(&g, ni(0)).map(|(_, _, w)| *w).sum();
        assert_abs_diff_eq!(out, 1.0);

        let mut parents: Vec<_> = Neighbors::parents(&g, ni(2)).map(|(_, v, w)| (v, *w)).collect();
        parents.sort_by_key(|(v, _)| *v);
        assert_eq!(parents, vec![(ni(0), 0.5), (ni(1), 1.0)]);
        assert_eq!(Neighbors::parents(&g, ni(0)).count(), 0);
        assert_eq!(Neighbors::childs(&g, ni(2)).count(), 0);
    }
}
