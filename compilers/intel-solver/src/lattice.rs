use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Directed;

use intel_lexer::{Candidate, CandidateSet};

/// How an edge of the lattice covers its words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// One word of residual text.
    Plain,
    /// Index into the lattice's candidate list.
    Candidate(usize),
}

/// Word positions `0..=n` as nodes, every way to cover a run of words as an edge.
pub struct Lattice<'c> {
    graph: Graph<usize, Edge, Directed>,
    nodes: Vec<NodeIndex>,
    candidates: Vec<&'c Candidate>,
}

impl<'c> Lattice<'c> {
    pub fn build(set: &'c CandidateSet) -> Self {
        let words = set.words();
        let mut graph = Graph::with_capacity(words + 1, words + set.len());
        let nodes: Vec<NodeIndex> = (0..=words).map(|position| graph.add_node(position)).collect();

        for position in 0..words {
            graph.add_edge(nodes[position], nodes[position + 1], Edge::Plain);
        }
        let candidates: Vec<&Candidate> = set.iter().collect();
        for (index, candidate) in candidates.iter().enumerate() {
            graph.add_edge(nodes[candidate.start], nodes[candidate.end()], Edge::Candidate(index));
        }

        Self {
            graph,
            nodes,
            candidates,
        }
    }

    pub fn words(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Edges leaving `position` as `(end, candidate)`, `None` for the plain
    /// edge, in a fixed order: by end, plain first, then candidate order.
    pub fn edges_from(&self, position: usize) -> Vec<(usize, Option<&'c Candidate>)> {
        let Some(&node) = self.nodes.get(position) else {
            return Vec::new();
        };
        let mut edges: Vec<(usize, Option<usize>)> = self
            .graph
            .edges(node)
            .map(|edge| {
                let end = self.graph[edge.target()];
                match *edge.weight() {
                    Edge::Plain => (end, None),
                    Edge::Candidate(index) => (end, Some(index)),
                }
            })
            .collect();
        edges.sort_unstable();
        edges
            .into_iter()
            .map(|(end, index)| (end, index.map(|i| self.candidates[i])))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intel_protocol::{KeywordKind, TokenType};

    #[test]
    fn test_edges_are_ordered() {
        let mut set = CandidateSet::new(3);
        set.push(Candidate::new(0, 2, TokenType::Keyword(KeywordKind::GateCamp)));
        set.push(Candidate::new(0, 1, TokenType::Keyword(KeywordKind::Clear)));
        set.push(Candidate::new(1, 2, TokenType::Url));
        let lattice = Lattice::build(&set);

        let ends: Vec<(usize, bool)> = lattice
            .edges_from(0)
            .into_iter()
            .map(|(end, candidate)| (end, candidate.is_some()))
            .collect();
        assert_eq!(ends, vec![(1, false), (1, true), (2, true)]);
        assert_eq!(lattice.edge_count(), 6);
        assert!(lattice.edges_from(3).is_empty());
    }

    #[test]
    fn test_empty_line() {
        let set = CandidateSet::new(0);
        let lattice = Lattice::build(&set);
        assert_eq!(lattice.words(), 0);
        assert!(lattice.edges_from(0).is_empty());
    }
}
