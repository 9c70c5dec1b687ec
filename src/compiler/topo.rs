// Thu Jan 15 2026 - Alex

use crate::compiler::{CompileError, DependencyGraph};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

/// Orders classes so every class comes after the dump classes it references.
pub struct ClassDependencyResolver<'g> {
    graph: &'g DependencyGraph,
    state: HashMap<&'g str, VisitState>,
    path: Vec<&'g str>,
    order: Vec<String>,
}

impl<'g> ClassDependencyResolver<'g> {
    pub fn new(graph: &'g DependencyGraph) -> Self {
        Self {
            graph,
            state: HashMap::new(),
            path: Vec::new(),
            order: Vec::with_capacity(graph.len()),
        }
    }

    /// Depth-first post-order over the graph, roots taken in dump order.
    ///
    /// Reaching a class that is still in progress means a cycle between
    /// distinct classes; the whole order is rejected.
    pub fn topological_order(graph: &'g DependencyGraph) -> Result<Vec<String>, CompileError> {
        let mut resolver = Self::new(graph);
        for class in graph.classes() {
            if !resolver.state.contains_key(class) {
                resolver.visit(class)?;
            }
        }
        Ok(resolver.order)
    }

    fn visit(&mut self, class: &'g str) -> Result<(), CompileError> {
        self.state.insert(class, VisitState::InProgress);
        self.path.push(class);

        let graph = self.graph;
        for dep in graph.dependencies(class) {
            match self.state.get(dep) {
                Some(VisitState::InProgress) => {
                    let start = self.path.iter().position(|c| *c == dep).unwrap_or(0);
                    let mut cycle: Vec<String> = self.path[start..].iter().map(|c| c.to_string()).collect();
                    cycle.push(dep.to_string());
                    return Err(CompileError::CircularDependency(cycle));
                }
                Some(VisitState::Done) => {}
                None => self.visit(dep)?,
            }
        }

        self.path.pop();
        self.state.insert(class, VisitState::Done);
        self.order.push(class.to_string());
        Ok(())
    }
}
