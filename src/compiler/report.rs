// Thu Jan 15 2026 - Alex

use crate::compiler::{CompileWarning, InheritanceError};
use crate::schema::SchemaWarning;
use indexmap::IndexMap;
use std::fmt;

/// A class one namespace uses from another.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NamespaceImport {
    pub class: String,
    pub namespace: Option<String>,
}

impl fmt::Display for NamespaceImport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "from {} import {}",
            self.namespace.as_deref().unwrap_or("<default namespace>"),
            self.class
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompileReport {
    pub order: Vec<String>,
    pub duplicates: Vec<SchemaWarning>,
    pub warnings: Vec<CompileWarning>,
    pub skipped: Vec<InheritanceError>,
    pub empty: Vec<String>,
    /// Keyed by namespace path, `None` for the default namespace.
    pub namespace_imports: IndexMap<Option<String>, Vec<NamespaceImport>>,
}

impl CompileReport {
    pub fn fallback_count(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, CompileWarning::UnresolvedType { .. }))
            .count()
    }

    pub fn imports_of(&self, namespace: Option<&str>) -> &[NamespaceImport] {
        self.namespace_imports
            .get(&namespace.map(str::to_string))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty() && self.warnings.is_empty() && self.skipped.is_empty()
    }
}
