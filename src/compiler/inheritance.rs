// Thu Jan 15 2026 - Alex

use crate::compiler::{CompileWarning, InheritanceError};
use crate::registry::ParentRef;
use crate::schema::{split_fqn, ClassSchema, SchemaStore};
use crate::types::{TypeResolution, TypeResolver};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// How a class's direct members split between its parent and itself.
///
/// Indices point into the class's field records. `base_members` are the
/// leading direct members that belong to the parent's layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritanceInfo {
    pub parent: Option<ParentRef>,
    pub base_members: Vec<usize>,
    pub own_members: Vec<usize>,
}

impl InheritanceInfo {
    /// Direct members the class lists, inherited ones included.
    pub fn direct_count(&self) -> usize {
        self.base_members.len() + self.own_members.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InheritanceTable {
    pub resolved: IndexMap<String, InheritanceInfo>,
    pub failures: Vec<InheritanceError>,
    pub warnings: Vec<CompileWarning>,
    pub empty: Vec<String>,
}

impl InheritanceTable {
    pub fn get(&self, fqn: &str) -> Option<&InheritanceInfo> {
        self.resolved.get(fqn)
    }
}

pub struct InheritanceResolver<'r, 'a> {
    resolver: &'r TypeResolver<'a>,
    direct_counts: HashMap<String, usize>,
    member_names: HashMap<String, Vec<String>>,
    skipped: HashSet<String>,
    empty: HashSet<String>,
}

impl<'r, 'a> InheritanceResolver<'r, 'a> {
    pub fn new(resolver: &'r TypeResolver<'a>) -> Self {
        Self {
            resolver,
            direct_counts: HashMap::new(),
            member_names: HashMap::new(),
            skipped: HashSet::new(),
            empty: HashSet::new(),
        }
    }

    /// Splits every class of `order`. Parents must precede their children.
    pub fn resolve_all(mut self, order: &[String], store: &SchemaStore) -> InheritanceTable {
        let mut table = InheritanceTable::default();
        for fqn in order {
            let Some(schema) = store.get(fqn) else {
                continue;
            };
            if schema.is_empty() {
                log::debug!("Class {} has no fields defined in the dump, skipped", fqn);
                self.empty.insert(fqn.clone());
                table.empty.push(fqn.clone());
                continue;
            }
            match self.resolve(schema) {
                Ok((info, warning)) => {
                    if let Some(warning) = warning {
                        log::warn!("{}", warning);
                        table.warnings.push(warning);
                    }
                    self.record(schema, &info);
                    table.resolved.insert(fqn.clone(), info);
                }
                Err(err) => {
                    log::warn!("Skipping class: {}", err);
                    self.skipped.insert(fqn.clone());
                    table.failures.push(err);
                }
            }
        }
        table
    }

    pub fn resolve(&self, schema: &ClassSchema) -> Result<(InheritanceInfo, Option<CompileWarning>), InheritanceError> {
        let members = schema.direct_members();
        let Some(slot) = schema.base_slot() else {
            return Ok((
                InheritanceInfo {
                    parent: None,
                    base_members: Vec::new(),
                    own_members: members,
                },
                None,
            ));
        };

        let parent = match self.resolver.resolve(&slot.type_token, schema.namespace()) {
            TypeResolution::Named(fqn) => ParentRef::Local(fqn),
            TypeResolution::External(name) => ParentRef::External(name),
            TypeResolution::Fallback(token) => {
                return Err(InheritanceError::UnknownParentFieldCount {
                    class: schema.fqn().to_string(),
                    parent: token,
                })
            }
            _ => {
                return Err(InheritanceError::NotAClass {
                    class: schema.fqn().to_string(),
                    token: slot.type_token.clone(),
                })
            }
        };

        let inherited = self.parent_field_count(schema.fqn(), &parent)?;
        if members.len() < inherited {
            return Err(InheritanceError::TooFewFields {
                class: schema.fqn().to_string(),
                parent: parent.name().to_string(),
                expected: inherited,
                found: members.len(),
            });
        }

        let (base, own) = members.split_at(inherited);
        let info = InheritanceInfo {
            parent: Some(parent),
            base_members: base.to_vec(),
            own_members: own.to_vec(),
        };

        let warning = match self.verify_inherited_names(schema, &info) {
            Some(err) if self.resolver.config().verify_inherited_names => return Err(err),
            Some(err) => Some(CompileWarning::InheritedFieldMismatch(err)),
            None => None,
        };
        Ok((info, warning))
    }

    /// Parent's direct field count: computed earlier in this pass for local
    /// parents, otherwise taken from the configured base table.
    fn parent_field_count(&self, class: &str, parent: &ParentRef) -> Result<usize, InheritanceError> {
        let config = self.resolver.config();
        match parent {
            ParentRef::Local(fqn) => {
                if let Some(count) = self.direct_counts.get(fqn) {
                    return Ok(*count);
                }
                if let Some(count) = config.known_field_count(split_fqn(fqn).1) {
                    return Ok(count);
                }
                if self.skipped.contains(fqn) || self.empty.contains(fqn) {
                    Err(InheritanceError::ParentSkipped {
                        class: class.to_string(),
                        parent: fqn.clone(),
                    })
                } else {
                    Err(InheritanceError::UnknownParentFieldCount {
                        class: class.to_string(),
                        parent: fqn.clone(),
                    })
                }
            }
            ParentRef::External(name) => config.known_field_count(name).ok_or_else(|| {
                InheritanceError::UnknownParentFieldCount {
                    class: class.to_string(),
                    parent: name.clone(),
                }
            }),
        }
    }

    // Only counts are used to split; this catches parents whose member order
    // changed without the count changing.
    fn verify_inherited_names(&self, schema: &ClassSchema, info: &InheritanceInfo) -> Option<InheritanceError> {
        let Some(ParentRef::Local(parent)) = &info.parent else {
            return None;
        };
        let expected = self.member_names.get(parent)?;
        info.base_members
            .iter()
            .zip(expected.iter())
            .enumerate()
            .find(|(_, (index, name))| schema.fields()[**index].name != **name)
            .map(|(position, (index, name))| InheritanceError::InheritedFieldMismatch {
                class: schema.fqn().to_string(),
                parent: parent.clone(),
                position,
                expected: name.clone(),
                found: schema.fields()[*index].name.clone(),
            })
    }

    fn record(&mut self, schema: &ClassSchema, info: &InheritanceInfo) {
        self.direct_counts
            .entry(schema.fqn().to_string())
            .or_insert_with(|| info.direct_count());
        self.member_names.entry(schema.fqn().to_string()).or_insert_with(|| {
            info.base_members
                .iter()
                .chain(info.own_members.iter())
                .map(|i| schema.fields()[*i].name.clone())
                .collect()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{ClassDependencyResolver, DependencyGraphBuilder};
    use crate::config::Config;
    use serde_json::{json, Value};

    fn resolve(dump: Value, config: Config) -> (SchemaStore, InheritanceTable) {
        let store = SchemaStore::from_value(dump).unwrap();
        let index = store.group_by_namespace();
        let resolver = TypeResolver::new(&config, &index);
        let graph = DependencyGraphBuilder::new(&resolver).build(&store);
        let order = ClassDependencyResolver::topological_order(&graph).unwrap();
        let table = InheritanceResolver::new(&resolver).resolve_all(&order, &store);
        (store, table)
    }

    fn own_names(store: &SchemaStore, table: &InheritanceTable, fqn: &str) -> Vec<String> {
        let schema = store.get(fqn).unwrap();
        table.get(fqn)
            .unwrap()
            .own_members
            .iter()
            .map(|i| schema.fields()[*i].name.clone())
            .collect()
    }

    #[test]
    fn test_child_skips_parent_fields() {
        let (store, table) = resolve(
            json!({
                "NS.Child": [
                    {"name": "Base", "type": "Parent", "level": 0},
                    {"name": "a", "type": "int", "level": 1},
                    {"name": "b", "type": "int", "level": 1},
                    {"name": "c", "type": "int", "level": 1},
                    {"name": "d", "type": "float", "level": 1},
                    {"name": "e", "type": "string", "level": 1}
                ],
                "NS.Parent": [
                    {"name": "a", "type": "int", "level": 1},
                    {"name": "b", "type": "int", "level": 1},
                    {"name": "c", "type": "int", "level": 1}
                ]
            }),
            Config::default(),
        );
        assert_eq!(own_names(&store, &table, "NS.Child"), vec!["d", "e"]);
        assert_eq!(
            table.get("NS.Child").unwrap().parent,
            Some(ParentRef::Local("NS.Parent".to_string()))
        );
        assert!(table.failures.is_empty());
    }

    #[test]
    fn test_multi_level_chain_uses_flattened_counts() {
        let (store, table) = resolve(
            json!({
                "G": [{"name": "g", "type": "int", "level": 1}],
                "P": [
                    {"name": "Base", "type": "G", "level": 0},
                    {"name": "g", "type": "int", "level": 1},
                    {"name": "p", "type": "int", "level": 1}
                ],
                "C": [
                    {"name": "Base", "type": "P", "level": 0},
                    {"name": "g", "type": "int", "level": 1},
                    {"name": "p", "type": "int", "level": 1},
                    {"name": "c", "type": "int", "level": 1}
                ]
            }),
            Config::default(),
        );
        assert_eq!(own_names(&store, &table, "P"), vec!["p"]);
        assert_eq!(own_names(&store, &table, "C"), vec!["c"]);
    }

    #[test]
    fn test_external_parent_uses_config() {
        let (store, table) = resolve(
            json!({
                "Look.CubismLookParameter": [
                    {"name": "Base", "type": "MonoBehaviour", "level": 0},
                    {"name": "m_GameObject", "type": "PPtr<GameObject>", "level": 1},
                    {"name": "m_Enabled", "type": "UInt8", "level": 1},
                    {"name": "m_Script", "type": "PPtr<MonoScript>", "level": 1},
                    {"name": "m_Name", "type": "string", "level": 1},
                    {"name": "Axis", "type": "int", "level": 1},
                    {"name": "Factor", "type": "float", "level": 1}
                ]
            }),
            Config::default(),
        );
        let info = table.get("Look.CubismLookParameter").unwrap();
        assert_eq!(info.parent, Some(ParentRef::External("MonoBehaviour".to_string())));
        assert_eq!(info.base_members.len(), 4);
        assert_eq!(own_names(&store, &table, "Look.CubismLookParameter"), vec!["Axis", "Factor"]);
    }

    #[test]
    fn test_unlisted_external_parent_skips_only_that_class() {
        let (_, table) = resolve(
            json!({
                "A": [
                    {"name": "Base", "type": "ScriptableObject", "level": 0},
                    {"name": "x", "type": "int", "level": 1}
                ],
                "B": [
                    {"name": "Base", "type": "A", "level": 0},
                    {"name": "x", "type": "int", "level": 1}
                ],
                "C": [{"name": "y", "type": "int", "level": 1}]
            }),
            Config::default(),
        );
        assert!(table.get("A").is_none());
        assert!(table.get("B").is_none());
        assert!(table.get("C").is_some());
        assert_eq!(
            table.failures,
            vec![
                InheritanceError::UnknownParentFieldCount {
                    class: "A".to_string(),
                    parent: "ScriptableObject".to_string()
                },
                InheritanceError::ParentSkipped {
                    class: "B".to_string(),
                    parent: "A".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_too_few_fields() {
        let (_, table) = resolve(
            json!({
                "P": [{"name": "a", "type": "int", "level": 1}, {"name": "b", "type": "int", "level": 1}],
                "C": [{"name": "Base", "type": "P", "level": 0}, {"name": "a", "type": "int", "level": 1}]
            }),
            Config::default(),
        );
        assert!(matches!(
            table.failures.as_slice(),
            [InheritanceError::TooFewFields { expected: 2, found: 1, .. }]
        ));
    }

    #[test]
    fn test_inherited_name_mismatch() {
        let dump = json!({
            "P": [{"name": "a", "type": "int", "level": 1}, {"name": "b", "type": "int", "level": 1}],
            "C": [
                {"name": "Base", "type": "P", "level": 0},
                {"name": "b", "type": "int", "level": 1},
                {"name": "a", "type": "int", "level": 1},
                {"name": "c", "type": "int", "level": 1}
            ]
        });

        let (_, lenient) = resolve(dump.clone(), Config::default());
        assert!(lenient.get("C").is_some());
        assert_eq!(lenient.warnings.len(), 1);

        let (_, strict) = resolve(dump, Config::default().with_verify_inherited_names(true));
        assert!(strict.get("C").is_none());
        assert!(matches!(
            strict.failures.as_slice(),
            [InheritanceError::InheritedFieldMismatch { position: 0, .. }]
        ));
    }

    #[test]
    fn test_empty_parent_skips_child() {
        let (_, table) = resolve(
            json!({
                "P": [],
                "C": [
                    {"name": "Base", "type": "P", "level": 0},
                    {"name": "y", "type": "int", "level": 1}
                ]
            }),
            Config::default(),
        );
        assert_eq!(table.empty, vec!["P"]);
        assert!(table.get("C").is_none());
        assert_eq!(
            table.failures,
            vec![InheritanceError::ParentSkipped {
                class: "C".to_string(),
                parent: "P".to_string()
            }]
        );
    }

    #[test]
    fn test_empty_class_is_listed() {
        let (_, table) = resolve(json!({"Empty": [], "Full": [{"name": "x", "type": "int", "level": 1}]}), Config::default());
        assert_eq!(table.empty, vec!["Empty"]);
        assert!(table.get("Full").is_some());
    }
}
