//! Mermaid rendering.
//!
//! Rendering walks the graph breadth first from one or more seeds and draws
//! each node once, with an edge to every neighbour it discovers. Neighbours
//! that were already discovered get no edge, so the output is a spanning tree
//! of the drawn nodes rather than the full subgraph.

use crate::graph::{NodeId, VaultGraph};
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Class that turns rendered vertices into links to their documents.
pub const INTERNAL_LINK_CLASS: &str = "internal-link";

const INDENT: &str = "    ";

/// One step of a rendering traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalStep {
    /// A node is drawn.
    Node(NodeId),
    /// An edge from a drawn node to a newly discovered one.
    Edge(NodeId, NodeId),
}

/// The nodes and edges to draw, in drawing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Traversal {
    pub steps: Vec<TraversalStep>,
}

impl Traversal {
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.steps.iter().filter_map(|step| match step {
            TraversalStep::Node(index) => Some(*index),
            TraversalStep::Edge(..) => None,
        })
    }

    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.steps.iter().filter_map(|step| match step {
            TraversalStep::Edge(a, b) => Some((*a, *b)),
            TraversalStep::Node(_) => None,
        })
    }
}

impl VaultGraph {
    /// Walks the graph from `seeds`. Seeds are at depth 1; nodes deeper than
    /// `max_depth` are drawn but not expanded. Neighbours in `excluded`
    /// categories are neither drawn nor expanded.
    pub fn traverse(
        &self,
        seeds: &[NodeId],
        max_depth: usize,
        excluded: &BTreeSet<String>,
    ) -> Traversal {
        let mut traversal = Traversal::default();
        let mut queue: VecDeque<(NodeId, usize)> = VecDeque::new();
        let mut discovered: HashSet<NodeId> = HashSet::new();
        let mut drawn: HashSet<NodeId> = HashSet::new();

        for seed in seeds {
            if self.get(*seed).is_some() && discovered.insert(*seed) {
                queue.push_back((*seed, 1));
            }
        }

        while let Some((current, depth)) = queue.pop_front() {
            if !drawn.insert(current) {
                continue;
            }
            traversal.steps.push(TraversalStep::Node(current));
            if depth > max_depth {
                continue;
            }

            for neighbor in self.neighbors(current) {
                if excluded.contains(self.graph[neighbor].category().name()) {
                    continue;
                }
                if discovered.insert(neighbor) {
                    queue.push_back((neighbor, depth + 1));
                    traversal.steps.push(TraversalStep::Edge(current, neighbor));
                }
            }
        }
        traversal
    }

    /// Renders a traversal as a fenced Mermaid block.
    pub fn render_mermaid(&self, traversal: &Traversal) -> String {
        let mut out = String::from("```mermaid\ngraph LR\n");

        for (name, style) in self.settings().class_definitions() {
            out.push_str(&format!("{INDENT}classDef {name} {style}\n"));
        }
        out.push('\n');

        for step in &traversal.steps {
            match *step {
                TraversalStep::Node(index) => {
                    out.push_str(INDENT);
                    out.push_str(&self.graph[index].to_mermaid());
                    out.push('\n');
                }
                TraversalStep::Edge(a, b) => {
                    out.push_str(&format!(
                        "{INDENT}{} --- {}\n",
                        self.graph[a].id(),
                        self.graph[b].id()
                    ));
                }
            }
        }

        let mut ids: Vec<&str> = traversal.nodes().map(|n| self.graph[n].id()).collect();
        ids.sort_unstable();
        out.push_str(&format!(
            "{INDENT}class {} {INTERNAL_LINK_CLASS}\n",
            ids.join(",")
        ));
        out.push_str("```\n");
        out
    }

    /// Renders the neighbourhood of a document, or `None` if the document is
    /// not a node.
    pub fn render_graph(
        &self,
        seed_name: &str,
        max_depth: usize,
        excluded: &BTreeSet<String>,
    ) -> Option<String> {
        let seed = self.get_index(seed_name)?;
        let traversal = self.traverse(&[seed], max_depth, excluded);
        Some(self.render_mermaid(&traversal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Fixture;
    use crate::node::short_id;
    use curator_vault::Document;

    fn excluded(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn drawn(graph: &VaultGraph, traversal: &Traversal) -> Vec<String> {
        traversal
            .nodes()
            .map(|n| graph.get(n).unwrap().name().to_string())
            .collect()
    }

    fn edge_lines(diagram: &str) -> usize {
        diagram.lines().filter(|l| l.contains(" --- ")).count()
    }

    /// Alice -- Bob -- Carol -- Dave, and a triangle Erin, Frank, Grace.
    fn chain_and_triangle() -> Fixture {
        let mut fixture = Fixture::scenario();
        for name in ["Carol", "Dave", "Erin", "Frank", "Grace"] {
            fixture.person(name);
        }
        fixture.entry(
            "2024-01-06",
            "## [[Meetings]]\n\
             - [[Bob]] and [[Carol]]\n\
             - [[Carol]] and [[Dave]]\n\
             - [[Erin]] and [[Frank]]\n\
             - [[Frank]] and [[Grace]]\n\
             - [[Grace]] and [[Erin]]\n",
        );
        fixture
    }

    #[test]
    fn test_scenario_renders_one_edge() {
        let fixture = Fixture::scenario();
        let graph = fixture.graph();
        let alice = short_id("Alice");
        let bob = short_id("Bob");

        let diagram = graph.render_graph("Alice", 1, &BTreeSet::new()).unwrap();

        assert!(diagram.contains(&format!("{alice}@{{ label: \"Alice\" }}")));
        assert!(diagram.contains(&format!("{bob}@{{ label: \"Bob\" }}")));
        assert_eq!(edge_lines(&diagram), 1);
        assert!(diagram.contains(&format!("    {alice} --- {bob}\n")));
    }

    #[test]
    fn test_scenario_after_entry_removal() {
        let mut fixture = Fixture::scenario();
        let mut graph = fixture.graph();
        let event = fixture.remove_entry("2024-01-05");
        graph
            .process_event(&event, &fixture.vault, &fixture.journal())
            .unwrap();

        let diagram = graph.render_graph("Alice", 1, &BTreeSet::new()).unwrap();
        assert!(diagram.contains(&short_id("Alice")));
        assert!(!diagram.contains(&short_id("Bob")));
        assert_eq!(edge_lines(&diagram), 0);
    }

    #[test]
    fn test_exact_output() {
        let fixture = Fixture::scenario();
        let graph = fixture.graph();
        let alice = short_id("Alice");
        let bob = short_id("Bob");
        let mut ids = [alice.clone(), bob.clone()];
        ids.sort();

        let diagram = graph.render_graph("Alice", 1, &BTreeSet::new()).unwrap();

        let expected = format!(
            "```mermaid\n\
             graph LR\n\
             \x20   classDef amber stroke:orange\n\
             \x20   classDef archived stroke:gray\n\
             \x20   classDef green stroke:green\n\
             \x20   classDef on-hold stroke:gray\n\
             \x20   classDef red stroke:red\n\
             \x20   classDef unknown stroke:purple\n\
             \n\
             \x20   {alice}@{{ label: \"Alice\" }}\n\
             \x20   {alice} --- {bob}\n\
             \x20   {bob}@{{ label: \"Bob\" }}\n\
             \x20   class {} internal-link\n\
             ```\n",
            ids.join(",")
        );
        assert_eq!(diagram, expected);
    }

    #[test]
    fn test_unknown_seed() {
        let graph = Fixture::scenario().graph();
        assert!(graph.render_graph("Nobody", 3, &BTreeSet::new()).is_none());
    }

    #[test]
    fn test_depth_bound() {
        let fixture = chain_and_triangle();
        let graph = fixture.graph();
        let alice = graph.get_index("Alice").unwrap();

        let names = |depth| drawn(&graph, &graph.traverse(&[alice], depth, &BTreeSet::new()));
        assert_eq!(names(0), vec!["Alice"]);
        assert_eq!(names(1), vec!["Alice", "Bob"]);
        assert_eq!(names(2), vec!["Alice", "Bob", "Carol"]);
        assert_eq!(names(10), vec!["Alice", "Bob", "Carol", "Dave"]);
    }

    #[test]
    fn test_triangle_yields_two_edges() {
        let fixture = chain_and_triangle();
        let graph = fixture.graph();

        for depth in [2, 3, 5] {
            let diagram = graph.render_graph("Erin", depth, &BTreeSet::new()).unwrap();
            assert_eq!(edge_lines(&diagram), 2);
            assert!(diagram.contains(&short_id("Grace")));
        }
    }

    #[test]
    fn test_excluded_category_is_skipped() {
        let fixture = Fixture::rich();
        let graph = fixture.graph();
        let alice = graph.get_index("Alice").unwrap();
        let apollo = graph.get_index("Apollo").unwrap();

        let traversal = graph.traverse(&[alice], 3, &excluded(&["Project"]));
        assert!(!traversal.nodes().any(|n| n == apollo));
        assert!(!traversal.edges().any(|(a, b)| a == apollo || b == apollo));
        // Carol is only reachable through Apollo
        assert_eq!(drawn(&graph, &traversal), vec!["Alice", "Bob"]);

        let traversal = graph.traverse(&[alice], 3, &BTreeSet::new());
        assert_eq!(drawn(&graph, &traversal), vec!["Alice", "Apollo", "Bob", "Carol"]);
    }

    #[test]
    fn test_classes_and_shapes() {
        let mut fixture = Fixture::rich();
        fixture
            .vault
            .insert(Document::new("Old \"Timer\"", "People/Archive", ""));
        fixture.entry("2024-01-09", "- [[Meetings]] [[Alice]] [[Old \"Timer\"]]");
        let graph = fixture.graph();

        let diagram = graph.render_graph("Alice", 1, &BTreeSet::new()).unwrap();
        assert!(diagram.contains(&format!(
            "{}:::green@{{ label: \"Apollo\", shape: hex }}",
            short_id("Apollo")
        )));
        assert!(diagram.contains(&format!(
            "{}:::archived@{{ label: \"Old #quot;Timer#quot;\" }}",
            short_id("Old \"Timer\"")
        )));
    }

    #[test]
    fn test_internal_link_class_lists_sorted_ids() {
        let graph = Fixture::rich().graph();
        let diagram = graph.render_graph("Alice", 2, &BTreeSet::new()).unwrap();

        let class_line = diagram
            .lines()
            .find(|l| l.trim_start().starts_with("class "))
            .unwrap();
        let ids: Vec<&str> = class_line
            .trim()
            .trim_start_matches("class ")
            .trim_end_matches(" internal-link")
            .split(',')
            .collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(ids.len(), 4);
    }
}
