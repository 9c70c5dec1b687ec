// Wed Jan 14 2026 - Alex

use crate::config::Config;
use crate::schema::NamespaceIndex;
use crate::types::{alias_target, primitive_kind, TypeResolution};
use once_cell::sync::Lazy;
use regex::Regex;

static REFERENCE_WRAPPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^PPtr<\$?(.+)>$").expect("reference wrapper pattern"));

/// Classifies declared type tokens against the primitive table, the
/// base-library classes of the config and the classes of the dump.
pub struct TypeResolver<'a> {
    config: &'a Config,
    index: &'a NamespaceIndex,
}

impl<'a> TypeResolver<'a> {
    pub fn new(config: &'a Config, index: &'a NamespaceIndex) -> Self {
        Self { config, index }
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    /// Resolves `token` as seen from a class of namespace `scope`.
    pub fn resolve(&self, token: &str, scope: Option<&str>) -> TypeResolution {
        let token = token.trim();

        if let Some(kind) = primitive_kind(token) {
            return TypeResolution::Primitive(kind);
        }
        if let Some(target) = alias_target(token) {
            return TypeResolution::External(target.to_string());
        }
        if self.config.is_external(token) {
            return TypeResolution::External(token.to_string());
        }
        if let Some(element) = token.strip_suffix("[]") {
            return TypeResolution::list(self.resolve(element, scope));
        }
        if let Some(captures) = REFERENCE_WRAPPER.captures(token) {
            return TypeResolution::reference(self.resolve(&captures[1], scope));
        }
        if let Some(fqn) = self.index.lookup(token, scope) {
            return TypeResolution::Named(fqn.to_string());
        }
        TypeResolution::Fallback(token.to_string())
    }

    /// Resolves a record whose declared type may have been rewritten by array
    /// element deduction. Exact primitive tokens win over the deduced form.
    pub fn resolve_declared(&self, raw: &str, declared: &str, scope: Option<&str>) -> TypeResolution {
        match primitive_kind(raw.trim()) {
            Some(kind) => TypeResolution::Primitive(kind),
            None => self.resolve(declared, scope),
        }
    }
}
