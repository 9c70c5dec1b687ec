// Thu Jan 15 2026 - Alex

use crate::registry::{FieldSpec, GeneratedClassDescriptor, ParentRef};
use crate::schema::FieldDescriptor;
use ahash::AHashMap;
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use thiserror::Error;

static GLOBAL_REGISTRY: OnceCell<Registry> = OnceCell::new();

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("A registry is already installed")]
    AlreadyInstalled,

    #[error("No generated definition for class {0}")]
    UnknownClass(String),
}

/// Lookup from fully-qualified class name to its generated descriptor and the
/// flat field layout the binary reader needs to decode it.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    classes: IndexMap<String, GeneratedClassDescriptor>,
    layouts: IndexMap<String, Vec<FieldDescriptor>>,
    short_names: AHashMap<String, String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, descriptor: GeneratedClassDescriptor, layout: Vec<FieldDescriptor>) {
        let (_, short) = crate::schema::split_fqn(&descriptor.name);
        self.short_names
            .entry(short.to_string())
            .or_insert_with(|| descriptor.name.clone());
        self.layouts.insert(descriptor.name.clone(), layout);
        self.classes.insert(descriptor.name.clone(), descriptor);
    }

    /// Makes this registry the process-wide one. It stays read-only for the
    /// rest of the program.
    pub fn install(self) -> Result<&'static Registry, RegistryError> {
        GLOBAL_REGISTRY
            .set(self)
            .map_err(|_| RegistryError::AlreadyInstalled)?;
        GLOBAL_REGISTRY.get().ok_or(RegistryError::AlreadyInstalled)
    }

    pub fn global() -> Option<&'static Registry> {
        GLOBAL_REGISTRY.get()
    }

    pub fn get(&self, fqn: &str) -> Option<&GeneratedClassDescriptor> {
        self.classes.get(fqn)
    }

    pub fn contains(&self, fqn: &str) -> bool {
        self.classes.contains_key(fqn)
    }

    pub fn by_short_name(&self, name: &str) -> Option<&GeneratedClassDescriptor> {
        self.short_names.get(name).and_then(|fqn| self.classes.get(fqn))
    }

    /// Descriptor for a script identified by namespace and class name.
    pub fn lookup_script(&self, namespace: Option<&str>, class_name: &str) -> Option<&GeneratedClassDescriptor> {
        match namespace.filter(|ns| !ns.is_empty()) {
            Some(ns) => self.get(&format!("{}.{}", ns, class_name)),
            None => self.get(class_name),
        }
    }

    pub fn field_layout(&self, fqn: &str) -> Option<&[FieldDescriptor]> {
        self.layouts.get(fqn).map(Vec::as_slice)
    }

    pub fn classes(&self) -> impl Iterator<Item = &GeneratedClassDescriptor> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Re-keys short names so each one points at its first registration.
    ///
    /// `registration_order` lists fully-qualified names in the order the dump
    /// declared them. A claimant absent from the registry (skipped during
    /// compilation) yields the name to the next one.
    pub fn assign_short_names<'s, I>(&mut self, registration_order: I)
    where
        I: IntoIterator<Item = &'s str>,
    {
        self.short_names.clear();
        for fqn in registration_order {
            if !self.classes.contains_key(fqn) {
                continue;
            }
            let (_, short) = crate::schema::split_fqn(fqn);
            self.short_names
                .entry(short.to_string())
                .or_insert_with(|| fqn.to_string());
        }
    }

    /// The local inheritance chain of `fqn`, root first, ending with `fqn`.
    pub fn lineage(&self, fqn: &str) -> Result<Vec<&GeneratedClassDescriptor>, RegistryError> {
        let mut chain = Vec::new();
        let mut current = self
            .get(fqn)
            .ok_or_else(|| RegistryError::UnknownClass(fqn.to_string()))?;
        loop {
            if chain.iter().any(|d: &&GeneratedClassDescriptor| d.name == current.name) {
                break;
            }
            chain.push(current);
            current = match &current.parent {
                Some(ParentRef::Local(parent)) => self
                    .get(parent)
                    .ok_or_else(|| RegistryError::UnknownClass(parent.clone()))?,
                _ => break,
            };
        }
        chain.reverse();
        Ok(chain)
    }

    /// Every field an instance of `fqn` carries, ancestors first.
    pub fn flattened_fields(&self, fqn: &str) -> Result<Vec<&FieldSpec>, RegistryError> {
        Ok(self
            .lineage(fqn)?
            .into_iter()
            .flat_map(|d| d.base_fields.iter().chain(d.fields.iter()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PrimitiveKind, TypeResolution};

    fn descriptor(name: &str, parent: Option<ParentRef>, fields: &[&str]) -> GeneratedClassDescriptor {
        GeneratedClassDescriptor {
            name: name.to_string(),
            ident: crate::schema::split_fqn(name).1.to_string(),
            namespace: crate::schema::split_fqn(name).0.map(str::to_string),
            parent,
            fields: fields
                .iter()
                .map(|f| FieldSpec::new(f, "int", TypeResolution::Primitive(PrimitiveKind::I32)))
                .collect(),
            base_fields: Vec::new(),
            direct_field_count: fields.len(),
        }
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.insert(descriptor("NS.Base", None, &["x"]), Vec::new());
        registry.insert(
            descriptor("NS.Child", Some(ParentRef::Local("NS.Base".to_string())), &["y"]),
            vec![FieldDescriptor::new("Base", "Base", 0)],
        );
        registry.insert(
            descriptor("NS.Grand", Some(ParentRef::Local("NS.Child".to_string())), &["z"]),
            Vec::new(),
        );
        registry.insert(descriptor("Loose", None, &["w"]), Vec::new());
        registry
    }

    #[test]
    fn test_lineage_and_flattening() {
        let registry = registry();
        let names: Vec<_> = registry
            .lineage("NS.Grand")
            .unwrap()
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["NS.Base", "NS.Child", "NS.Grand"]);

        let fields: Vec<_> = registry
            .flattened_fields("NS.Grand")
            .unwrap()
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(fields, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_lineage_with_missing_parent() {
        let mut registry = registry();
        registry.insert(
            descriptor("NS.Orphan", Some(ParentRef::Local("NS.Gone".to_string())), &["o"]),
            Vec::new(),
        );
        assert!(matches!(registry.lineage("NS.Orphan"), Err(RegistryError::UnknownClass(name)) if name == "NS.Gone"));
        assert!(matches!(registry.lineage("Nope"), Err(RegistryError::UnknownClass(name)) if name == "Nope"));
    }

    #[test]
    fn test_short_names_follow_registration_order() {
        let mut registry = Registry::new();
        registry.insert(descriptor("Core.Moc", None, &["v"]), Vec::new());
        registry.insert(descriptor("Render.Moc", None, &["a"]), Vec::new());
        assert_eq!(registry.by_short_name("Moc").map(|d| d.name.as_str()), Some("Core.Moc"));

        registry.assign_short_names(["Gone.Moc", "Render.Moc", "Core.Moc"]);
        assert_eq!(registry.by_short_name("Moc").map(|d| d.name.as_str()), Some("Render.Moc"));
    }

    #[test]
    fn test_script_lookup() {
        let registry = registry();
        assert!(registry.lookup_script(Some("NS"), "Child").is_some());
        assert!(registry.lookup_script(None, "Loose").is_some());
        assert!(registry.lookup_script(Some(""), "Loose").is_some());
        assert!(registry.lookup_script(Some("Other"), "Child").is_none());
        assert_eq!(registry.by_short_name("Grand").map(|d| d.name.as_str()), Some("NS.Grand"));
        assert_eq!(registry.field_layout("NS.Child").map(|l| l.len()), Some(1));
    }

    #[test]
    fn test_install_once() {
        let installed = registry().install().unwrap();
        assert!(installed.contains("NS.Grand"));
        assert!(Registry::global().is_some_and(|g| g.contains("Loose")));
        assert!(matches!(Registry::new().install(), Err(RegistryError::AlreadyInstalled)));
    }
}
