// Thu Jan 15 2026 - Alex

use crate::compiler::{
    ClassDependencyResolver, ClassEmitter, CompileError, CompileReport, DependencyGraph,
    DependencyGraphBuilder, InheritanceResolver, NamespaceImport,
};
use crate::config::Config;
use crate::registry::Registry;
use crate::schema::{split_fqn, NamespaceIndex, SchemaStore};
use crate::types::TypeResolver;
use indexmap::IndexMap;
use itertools::Itertools;

pub struct CompileOutput {
    pub registry: Registry,
    pub report: CompileReport,
}

/// One-shot compilation of a schema dump into a registry.
pub struct CompilePass {
    config: Config,
}

impl CompilePass {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn compile_str(&self, raw: &str) -> Result<CompileOutput, CompileError> {
        let store = SchemaStore::parse(raw)?;
        self.run(&store)
    }

    pub fn run(&self, store: &SchemaStore) -> Result<CompileOutput, CompileError> {
        log::info!("Pass 1: Building namespaces for {} classes", store.len());
        let index = store.group_by_namespace();
        let resolver = TypeResolver::new(&self.config, &index);

        log::info!("Pass 2: Generating class dependency graph");
        let graph = DependencyGraphBuilder::new(&resolver).build(store);
        let order = ClassDependencyResolver::topological_order(&graph)?;
        log::debug!("{} classes, {} dependencies", graph.len(), graph.edge_count());

        log::info!("Pass 3: Resolving inheritance");
        let inheritance = InheritanceResolver::new(&resolver).resolve_all(&order, store);

        log::info!("Pass 4: Emitting classes");
        let (descriptors, mut warnings) = ClassEmitter::new(&resolver).emit(&order, store, &inheritance);

        let mut registry = Registry::new();
        for descriptor in descriptors {
            let layout = store
                .get(&descriptor.name)
                .map(|schema| schema.fields().to_vec())
                .unwrap_or_default();
            registry.insert(descriptor, layout);
        }
        registry.assign_short_names(store.classes().map(|schema| schema.fqn()));

        let mut all_warnings = inheritance.warnings;
        all_warnings.append(&mut warnings);

        let report = CompileReport {
            order,
            duplicates: index.warnings().to_vec(),
            warnings: all_warnings,
            skipped: inheritance.failures,
            empty: inheritance.empty,
            namespace_imports: namespace_imports(&index, &graph),
        };
        log::info!(
            "Compiled {} classes ({} skipped, {} fallback fields)",
            registry.len(),
            report.skipped.len(),
            report.fallback_count()
        );
        Ok(CompileOutput { registry, report })
    }
}

fn namespace_imports(index: &NamespaceIndex, graph: &DependencyGraph) -> IndexMap<Option<String>, Vec<NamespaceImport>> {
    index
        .namespaces()
        .map(|namespace| {
            let imports: Vec<NamespaceImport> = namespace
                .classes()
                .iter()
                .flat_map(|class| graph.dependencies(class))
                .filter_map(|dep| {
                    let (owner, short) = split_fqn(dep);
                    (owner != namespace.path()).then(|| NamespaceImport {
                        class: short.to_string(),
                        namespace: owner.map(str::to_string),
                    })
                })
                .sorted()
                .dedup()
                .collect();
            (namespace.path().map(str::to_string), imports)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::InheritanceError;
    use crate::registry::ParentRef;
    use serde_json::json;

    const EXAMPLE: &str = r#"{
        "NS.Base": [{"name": "x", "type": "int", "level": 1}],
        "NS.Child": [
            {"name": "Base", "type": "Base", "level": 0},
            {"name": "x", "type": "int", "level": 1},
            {"name": "y", "type": "float", "level": 1}
        ]
    }"#;

    #[test]
    fn test_compile_example_dump() {
        let output = CompilePass::new(Config::default()).compile_str(EXAMPLE).unwrap();
        let registry = output.registry;
        assert_eq!(registry.len(), 2);

        let base = registry.get("NS.Base").unwrap();
        assert_eq!(base.fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(), vec!["x"]);

        let child = registry.get("NS.Child").unwrap();
        assert_eq!(child.parent, Some(ParentRef::Local("NS.Base".to_string())));
        assert_eq!(child.fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(), vec!["y"]);
        assert_eq!(registry.field_layout("NS.Child").unwrap().len(), 3);
        assert!(output.report.is_clean());
    }

    #[test]
    fn test_cycle_aborts_pass() {
        let dump = json!({
            "A": [{"name": "b", "type": "B", "level": 1}],
            "B": [{"name": "a", "type": "A[]", "level": 1}]
        });
        let store = SchemaStore::from_value(dump).unwrap();
        let err = CompilePass::new(Config::default()).run(&store).err().unwrap();
        assert!(matches!(err, CompileError::CircularDependency(ref cycle) if cycle == &["A", "B", "A"]));
    }

    #[test]
    fn test_malformed_dump_aborts_pass() {
        let err = CompilePass::new(Config::default())
            .compile_str(r#"{"A": [{"name": "x", "type": "int"}]}"#)
            .err()
            .unwrap();
        assert!(matches!(err, CompileError::Schema(_)));
    }

    #[test]
    fn test_report_collects_scoped_problems() {
        let dump = json!({
            "Core.Shared": [{"name": "a", "type": "int", "level": 1}],
            "Render.Shared": [{"name": "b", "type": "int", "level": 1}],
            "Render.Drawer": [
                {"name": "Base", "type": "Unlisted", "level": 0},
                {"name": "x", "type": "int", "level": 1}
            ],
            "Render.Mesh": [
                {"name": "shared", "type": "Shared", "level": 1},
                {"name": "odd", "type": "Mystery", "level": 1}
            ],
            "Empty": []
        });
        let store = SchemaStore::from_value(dump).unwrap();
        let output = CompilePass::new(Config::default()).run(&store).unwrap();
        let report = &output.report;

        assert_eq!(report.duplicates.len(), 1);
        assert_eq!(report.fallback_count(), 1);
        assert_eq!(report.empty, vec!["Empty"]);
        assert!(matches!(
            report.skipped.as_slice(),
            [InheritanceError::UnknownParentFieldCount { .. }]
        ));
        assert!(!output.registry.contains("Render.Drawer"));
        assert!(output.registry.contains("Render.Mesh"));
        assert!(output.registry.contains("Render.Shared"));
        assert!(report.imports_of(Some("Render")).is_empty());
        assert_eq!(report.order.len(), 5);
    }

    #[test]
    fn test_cross_namespace_imports() {
        let dump = json!({
            "Core.Moc": [{"name": "a", "type": "int", "level": 1}],
            "Render.Renderer": [{"name": "moc", "type": "Moc", "level": 1}],
            "Handler": [{"name": "r", "type": "Renderer[]", "level": 1}]
        });
        let store = SchemaStore::from_value(dump).unwrap();
        let output = CompilePass::new(Config::default()).run(&store).unwrap();
        assert_eq!(
            output.report.imports_of(Some("Render")),
            &[NamespaceImport {
                class: "Moc".to_string(),
                namespace: Some("Core".to_string())
            }]
        );
        assert_eq!(output.report.imports_of(None)[0].to_string(), "from Render import Renderer");
    }

    #[test]
    fn test_short_name_owner_follows_dump_order() {
        let dump = json!({
            "Render.Moc": [{"name": "a", "type": "Anchor", "level": 1}],
            "Core.Anchor": [{"name": "m", "type": "Moc", "level": 1}],
            "Core.Moc": [{"name": "v", "type": "int", "level": 1}]
        });
        let store = SchemaStore::from_value(dump).unwrap();
        let output = CompilePass::new(Config::default()).run(&store).unwrap();

        assert_eq!(output.report.order, vec!["Core.Moc", "Core.Anchor", "Render.Moc"]);
        let owner = store.group_by_namespace().owner_of("Moc").map(str::to_string);
        assert_eq!(owner.as_deref(), Some("Render.Moc"));
        assert_eq!(
            output.registry.by_short_name("Moc").map(|d| d.name.as_str()),
            owner.as_deref()
        );
    }

    #[test]
    fn test_skipped_short_name_owner_yields_to_next() {
        let dump = json!({
            "Render.Moc": [
                {"name": "Base", "type": "ScriptableObject", "level": 0},
                {"name": "a", "type": "int", "level": 1}
            ],
            "Core.Moc": [{"name": "v", "type": "int", "level": 1}]
        });
        let output = CompilePass::new(Config::default()).compile_str(&dump.to_string()).unwrap();
        assert!(!output.registry.contains("Render.Moc"));
        assert_eq!(
            output.registry.by_short_name("Moc").map(|d| d.name.as_str()),
            Some("Core.Moc")
        );
    }

    #[test]
    fn test_namespace_imports_list_every_namespace() {
        let dump = json!({
            "Render.Drawer": [{"name": "moc", "type": "Moc", "level": 1}],
            "Core.Moc": [{"name": "a", "type": "int", "level": 1}],
            "Loose": [{"name": "b", "type": "int", "level": 1}]
        });
        let output = CompilePass::new(Config::default()).compile_str(&dump.to_string()).unwrap();
        let namespaces: Vec<_> = output.report.namespace_imports.keys().cloned().collect();
        assert_eq!(
            namespaces,
            vec![Some("Render".to_string()), Some("Core".to_string()), None]
        );
        assert!(output.report.imports_of(Some("Core")).is_empty());
        assert_eq!(output.report.imports_of(Some("Render")).len(), 1);
    }
}
