// Graph of helices connected by knob-into-hole packing
//
// Nodes are helix indices; an edge carries the number of knobs packing
// between its two helices in either direction.

use petgraph::graph::{NodeIndex, UnGraph};

use crate::controller::knob::Knob;
use crate::structure::core::HelicalStructure;

pub fn create_helix_graph(structure: &HelicalStructure, knobs: &[Knob]) -> UnGraph<usize, usize> {
    let mut graph = UnGraph::<usize, usize>::new_undirected();
    let nodes: Vec<NodeIndex> = (0..structure.num_helices()).map(|h| graph.add_node(h)).collect();
    for knob in knobs {
        let a = nodes[structure.helix_of(knob.residue)];
        let b = nodes[structure.helix_of(knob.hole[0])];
        match graph.find_edge(a, b) {
            Some(edge) => graph[edge] += 1,
            None => {
                graph.add_edge(a, b, 1);
            }
        }
    }
    graph
}

/// Connected groups of two or more helices, each sorted, in order of their first helix
pub fn helix_clusters(graph: &UnGraph<usize, usize>) -> Vec<Vec<usize>> {
    let mut clusters: Vec<Vec<usize>> = petgraph::algo::kosaraju_scc(graph)
        .into_iter()
        .map(|component| component.into_iter().map(|node| graph[node]).collect::<Vec<usize>>())
        .filter(|component| component.len() > 1)
        .collect();
    clusters.iter_mut().for_each(|cluster| cluster.sort());
    clusters.sort();
    clusters.dedup();
    clusters
}
