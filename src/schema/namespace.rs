// Tue Jan 13 2026 - Alex

use crate::schema::{SchemaStore, SchemaWarning};
use indexmap::{IndexMap, IndexSet};

#[derive(Debug, Clone)]
pub struct Namespace {
    path: Option<String>,
    classes: Vec<String>,
}

impl Namespace {
    fn new(path: Option<&str>) -> Self {
        Self {
            path: path.map(str::to_string),
            classes: Vec::new(),
        }
    }

    /// Dot-separated path, `None` for the default namespace.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn display_name(&self) -> &str {
        self.path.as_deref().unwrap_or("<default namespace>")
    }

    /// Fully-qualified names of the classes declared here, in dump order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn depth(&self) -> usize {
        self.path.as_deref().map_or(0, |p| p.matches('.').count() + 1)
    }
}

/// Namespaces of a dump and the short-name claims between them.
///
/// A short name belongs to the first namespace that registers it; later
/// registrations stay in their own namespace but never win a short-name lookup.
#[derive(Debug, Clone, Default)]
pub struct NamespaceIndex {
    namespaces: IndexMap<Option<String>, Namespace>,
    claims: IndexMap<String, String>,
    defined: IndexSet<String>,
    warnings: Vec<SchemaWarning>,
}

impl NamespaceIndex {
    pub fn build(store: &SchemaStore) -> Self {
        let mut index = Self::default();
        for schema in store.classes() {
            let key = schema.namespace().map(str::to_string);
            index
                .namespaces
                .entry(key)
                .or_insert_with(|| Namespace::new(schema.namespace()))
                .classes
                .push(schema.fqn().to_string());
            index.defined.insert(schema.fqn().to_string());

            match index.claims.get(schema.short_name()) {
                None => {
                    index
                        .claims
                        .insert(schema.short_name().to_string(), schema.fqn().to_string());
                }
                Some(claimed) => {
                    let (kept, _) = crate::schema::split_fqn(claimed);
                    let warning = SchemaWarning::DuplicateClassName {
                        name: schema.short_name().to_string(),
                        kept: kept.map(str::to_string),
                        ignored: schema.namespace().map(str::to_string),
                    };
                    log::warn!("{}. Using first definition for now", warning);
                    index.warnings.push(warning);
                }
            }
        }
        index
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.namespaces.values()
    }

    pub fn namespace(&self, path: Option<&str>) -> Option<&Namespace> {
        self.namespaces.get(&path.map(str::to_string))
    }

    pub fn warnings(&self) -> &[SchemaWarning] {
        &self.warnings
    }

    pub fn is_defined(&self, fqn: &str) -> bool {
        self.defined.contains(fqn)
    }

    /// Namespace that owns the short name, if any.
    pub fn owner_of(&self, short_name: &str) -> Option<&str> {
        self.claims.get(short_name).map(String::as_str)
    }

    /// Resolves a class token seen inside `scope` to a fully-qualified name.
    ///
    /// Checks, in order: an exact fully-qualified name, a class of the same
    /// namespace, then the first namespace that claimed the short name.
    pub fn lookup(&self, token: &str, scope: Option<&str>) -> Option<&str> {
        if let Some(fqn) = self.defined.get(token) {
            return Some(fqn.as_str());
        }
        if let Some(scope) = scope {
            let local = format!("{}.{}", scope, token);
            if let Some(fqn) = self.defined.get(&local) {
                return Some(fqn.as_str());
            }
        }
        self.claims.get(token).map(String::as_str)
    }
}
