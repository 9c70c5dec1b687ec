// Thu Jan 15 2026 - Alex

use crate::schema::{ClassSchema, SchemaStore};
use crate::types::TypeResolver;
use indexmap::{IndexMap, IndexSet};

/// Class-to-class references of a dump. Nodes keep dump order and edges keep
/// first-reference order.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: IndexMap<String, IndexSet<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, fqn: &str) {
        self.nodes.entry(fqn.to_string()).or_default();
    }

    /// Adds `from -> to`. Self-edges are dropped.
    pub fn add_dependency(&mut self, from: &str, to: &str) {
        self.add_class(from);
        if from != to {
            if let Some(edges) = self.nodes.get_mut(from) {
                edges.insert(to.to_string());
            }
        }
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn dependencies(&self, fqn: &str) -> impl Iterator<Item = &str> {
        self.nodes
            .get(fqn)
            .into_iter()
            .flat_map(|edges| edges.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(IndexSet::len).sum()
    }
}

pub struct DependencyGraphBuilder<'r, 'a> {
    resolver: &'r TypeResolver<'a>,
}

impl<'r, 'a> DependencyGraphBuilder<'r, 'a> {
    pub fn new(resolver: &'r TypeResolver<'a>) -> Self {
        Self { resolver }
    }

    pub fn build(&self, store: &SchemaStore) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for schema in store.classes() {
            graph.add_class(schema.fqn());
            for target in self.references(schema) {
                graph.add_dependency(schema.fqn(), &target);
            }
        }
        graph
    }

    /// Dump classes named by the base slot and the direct members of `schema`.
    fn references(&self, schema: &ClassSchema) -> Vec<String> {
        let base = schema
            .base_slot()
            .map(|slot| self.resolver.resolve(&slot.type_token, schema.namespace()));

        let members = schema.direct_members().into_iter().map(|i| {
            self.resolver.resolve_declared(
                &schema.fields()[i].type_token,
                &schema.declared_type(i),
                schema.namespace(),
            )
        });

        base.into_iter()
            .chain(members)
            .filter_map(|ty| ty.referenced_class().map(str::to_string))
            .collect()
    }
}
