// Tue Jan 13 2026 - Alex

use crate::compiler::CompileReport;
use crate::output::OutputError;
use crate::registry::{GeneratedClassDescriptor, Registry};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const LISTING_FILE_NAME: &str = "definitions.txt";

/// Renders one human-readable definitions listing per namespace.
pub struct ListingFormatter {
    include_imports: bool,
    include_header: bool,
}

impl ListingFormatter {
    pub fn new() -> Self {
        Self {
            include_imports: true,
            include_header: true,
        }
    }

    pub fn with_imports(mut self, include: bool) -> Self {
        self.include_imports = include;
        self
    }

    pub fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Descriptors grouped by namespace, each group in emission order.
    pub fn group<'r>(
        &self,
        registry: &'r Registry,
        report: &CompileReport,
    ) -> IndexMap<Option<String>, Vec<&'r GeneratedClassDescriptor>> {
        let mut groups: IndexMap<Option<String>, Vec<&GeneratedClassDescriptor>> = IndexMap::new();
        for fqn in &report.order {
            if let Some(descriptor) = registry.get(fqn) {
                groups.entry(descriptor.namespace.clone()).or_default().push(descriptor);
            }
        }
        groups
    }

    pub fn format_namespace(
        &self,
        namespace: Option<&str>,
        classes: &[&GeneratedClassDescriptor],
        report: &CompileReport,
    ) -> String {
        let mut out = String::new();

        if self.include_header {
            out.push_str(&format!(
                "# Definitions for {}\n\n",
                namespace.unwrap_or("<default namespace>")
            ));
        }

        if self.include_imports {
            let imports = report.imports_of(namespace);
            for import in imports {
                out.push_str(&format!("{}\n", import));
            }
            if !imports.is_empty() {
                out.push('\n');
            }
        }

        for (i, descriptor) in classes.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&descriptor.to_string());
        }

        out
    }

    pub fn format_all(&self, registry: &Registry, report: &CompileReport) -> IndexMap<Option<String>, String> {
        self.group(registry, report)
            .into_iter()
            .map(|(namespace, classes)| {
                let text = self.format_namespace(namespace.as_deref(), &classes, report);
                (namespace, text)
            })
            .collect()
    }

    /// Writes `<dir>/<segments...>/definitions.txt` for every namespace.
    /// The default namespace lands directly in `dir`.
    pub fn write_to_dir<P: AsRef<Path>>(
        &self,
        registry: &Registry,
        report: &CompileReport,
        dir: P,
    ) -> Result<Vec<PathBuf>, OutputError> {
        let mut written = Vec::new();
        for (namespace, text) in self.format_all(registry, report) {
            let target = namespace_dir(dir.as_ref(), namespace.as_deref());
            fs::create_dir_all(&target)?;
            let path = target.join(LISTING_FILE_NAME);
            fs::write(&path, text)?;
            log::debug!("Wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}

impl Default for ListingFormatter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn namespace_dir(root: &Path, namespace: Option<&str>) -> PathBuf {
    let mut path = root.to_path_buf();
    if let Some(namespace) = namespace {
        for segment in namespace.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
    }
    path
}
