//! Dependency ordering for named items, built on `petgraph`.
//!
//! Each item is a node; every "after" constraint adds an edge from the
//! dependency to the dependent item. The order is produced with Kahn's
//! algorithm, always taking the earliest-inserted ready item so unconstrained
//! items keep their insertion order.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use petgraph::Direction;
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::error::SchemaError;

/// Collects named items with their "after" constraints and orders them.
#[derive(Debug, Default)]
pub struct TopologicalSort {
    items: Vec<(String, Vec<String>)>,
}

impl TopologicalSort {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name`, which must come after every item in `after`.
    ///
    /// Constraints naming items that are never added are ignored. Adding a
    /// name twice merges its constraints.
    pub fn add<I, S>(&mut self, name: impl Into<String>, after: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let after = after.into_iter().map(Into::into);
        if let Some((_, deps)) = self.items.iter_mut().find(|(n, _)| *n == name) {
            deps.extend(after);
        } else {
            self.items.push((name, after.collect()));
        }
    }

    /// Returns every added name in dependency order.
    ///
    /// # Errors
    ///
    /// [`SchemaError::CyclicDependency`] naming the items on a cycle.
    pub fn sort(&self) -> Result<Vec<String>, SchemaError> {
        let mut graph: DiGraph<&str, ()> = DiGraph::new();
        let mut index_map: HashMap<&str, NodeIndex> = HashMap::new();

        for (name, _) in &self.items {
            let idx = graph.add_node(name.as_str());
            index_map.insert(name.as_str(), idx);
        }
        for (name, after) in &self.items {
            let to = index_map[name.as_str()];
            for dep in after {
                if let Some(&from) = index_map.get(dep.as_str()) {
                    graph.update_edge(from, to, ());
                }
            }
        }

        let mut in_degree: Vec<usize> = graph
            .node_indices()
            .map(|idx| graph.neighbors_directed(idx, Direction::Incoming).count())
            .collect();
        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, deg)| **deg == 0)
            .map(|(i, _)| Reverse(i))
            .collect();

        let mut order = Vec::with_capacity(self.items.len());
        while let Some(Reverse(i)) = ready.pop() {
            let idx = NodeIndex::new(i);
            order.push(graph[idx].to_owned());
            for next in graph.neighbors_directed(idx, Direction::Outgoing) {
                let deg = &mut in_degree[next.index()];
                *deg -= 1;
                if *deg == 0 {
                    ready.push(Reverse(next.index()));
                }
            }
        }

        if order.len() == self.items.len() {
            return Ok(order);
        }

        let mut cycle: Vec<String> = algo::tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
            .flatten()
            .map(|idx| graph[idx].to_owned())
            .collect();
        cycle.sort_by_key(|name| index_map[name.as_str()]);
        tracing::debug!(?cycle, "dependency cycle detected");
        Err(SchemaError::CyclicDependency { fields: cycle })
    }
}
