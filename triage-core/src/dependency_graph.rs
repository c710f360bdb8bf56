//! DependencyGraph: the blocking relation over one batch of tasks.
//!
//! Nodes live in an arena indexed by batch position; edges point from a task
//! to the tasks it depends on, in the order they were listed. Edges to
//! identifiers outside the batch are dropped at build time, so traversal
//! never has to deal with a dangling reference.
//!
//! Two consumers:
//! - fan-in scoring (how many tasks are blocked by this one)
//! - cycle detection (DFS with an explicit on-stack marker)

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::task::Task;

/// A closed loop of identifiers, e.g. `["a", "b", "a"]`.
///
/// Starts and ends at the task where the loop was closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cycle(pub Vec<String>);

impl Cycle {
    /// Distinct tasks in the loop (the closing repeat is not counted).
    pub fn task_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }
}

impl std::fmt::Display for Cycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(" -> "))
    }
}

#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    ids: Vec<String>,
    index: HashMap<String, usize>,

    // edges[i] = deps of node i (deduplicated, listed order)
    edges: Vec<Vec<usize>>,

    // fan_in[i] = number of tasks listing node i as a dependency
    fan_in: Vec<usize>,
}

impl DependencyGraph {
    /// Build the graph for a validated batch.
    ///
    /// Identifiers are expected to be unique; if one repeats, the first
    /// occurrence owns the node and later ones are skipped.
    pub fn build(tasks: &[Task]) -> Self {
        let mut g = Self::default();
        let mut owners: Vec<&Task> = Vec::with_capacity(tasks.len());

        for t in tasks {
            if g.index.contains_key(&t.id) {
                debug!(id = %t.id, "duplicate identifier ignored by dependency graph");
                continue;
            }
            g.index.insert(t.id.clone(), g.ids.len());
            g.ids.push(t.id.clone());
            owners.push(t);
        }

        g.fan_in = vec![0; g.ids.len()];
        for t in owners {
            let mut deps: Vec<usize> = Vec::with_capacity(t.dependencies.len());
            for dep in &t.dependencies {
                let Some(&j) = g.index.get(dep) else { continue };
                if !deps.contains(&j) {
                    deps.push(j);
                    g.fan_in[j] += 1;
                }
            }
            g.edges.push(deps);
        }

        g
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// Number of tasks in the batch blocked by `id` (0 for unknown ids).
    pub fn fan_in(&self, id: &str) -> usize {
        self.index.get(id).map(|&i| self.fan_in[i]).unwrap_or(0)
    }

    /// Fan-in quantized into diminishing-returns buckets.
    pub fn fan_in_score(&self, id: &str) -> f64 {
        fan_in_bucket(self.fan_in(id))
    }

    /// Find every cycle reachable by DFS in batch order.
    ///
    /// Each recursive branch gets its own copy of the current path; a cycle is
    /// reported only when an edge reaches a node still on the active stack.
    pub fn detect_cycles(&self) -> Vec<Cycle> {
        let n = self.ids.len();
        let mut walk = CycleWalk {
            graph: self,
            visited: vec![false; n],
            on_stack: vec![false; n],
            cycles: Vec::new(),
        };

        for start in 0..n {
            if !walk.visited[start] {
                walk.visit(start, Vec::new());
            }
        }

        walk.cycles
    }
}

/// 0 -> 0.0, 1 -> 0.5, 2 -> 0.75, 3+ -> 1.0
pub fn fan_in_bucket(count: usize) -> f64 {
    match count {
        0 => 0.0,
        1 => 0.5,
        2 => 0.75,
        _ => 1.0,
    }
}

struct CycleWalk<'g> {
    graph: &'g DependencyGraph,
    visited: Vec<bool>,
    on_stack: Vec<bool>,
    cycles: Vec<Cycle>,
}

impl CycleWalk<'_> {
    fn visit(&mut self, node: usize, mut path: Vec<usize>) {
        let graph = self.graph;

        if self.on_stack[node] {
            // On-stack nodes are always ancestors on `path`.
            if let Some(start) = path.iter().position(|&p| p == node) {
                let mut ids: Vec<String> =
                    path[start..].iter().map(|&p| graph.ids[p].clone()).collect();
                ids.push(graph.ids[node].clone());
                self.cycles.push(Cycle(ids));
            }
            return;
        }

        if self.visited[node] {
            return;
        }

        self.visited[node] = true;
        self.on_stack[node] = true;
        path.push(node);

        for &next in &graph.edges[node] {
            self.visit(next, path.clone());
        }

        self.on_stack[node] = false;
    }
}
