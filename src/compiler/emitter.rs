// Thu Jan 15 2026 - Alex

use crate::compiler::{CompileWarning, InheritanceTable};
use crate::registry::{FieldSpec, GeneratedClassDescriptor, ParentRef};
use crate::schema::{ClassSchema, SchemaStore};
use crate::types::{translate_name, TypeResolver};

pub struct ClassEmitter<'r, 'a> {
    resolver: &'r TypeResolver<'a>,
}

impl<'r, 'a> ClassEmitter<'r, 'a> {
    pub fn new(resolver: &'r TypeResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Builds descriptors in topological order. Classes absent from the
    /// inheritance table (empty or skipped) produce nothing.
    pub fn emit(
        &self,
        order: &[String],
        store: &SchemaStore,
        inheritance: &InheritanceTable,
    ) -> (Vec<GeneratedClassDescriptor>, Vec<CompileWarning>) {
        let mut descriptors = Vec::with_capacity(order.len());
        let mut warnings = Vec::new();

        for fqn in order {
            let (Some(schema), Some(info)) = (store.get(fqn), inheritance.get(fqn)) else {
                continue;
            };

            let fields = self.field_specs(schema, &info.own_members, &mut warnings);
            let base_fields = match &info.parent {
                Some(ParentRef::External(_)) => self.field_specs(schema, &info.base_members, &mut warnings),
                _ => Vec::new(),
            };

            let descriptor = GeneratedClassDescriptor {
                name: fqn.clone(),
                ident: translate_name(schema.short_name()),
                namespace: schema.namespace().map(str::to_string),
                parent: info.parent.clone(),
                fields,
                base_fields,
                direct_field_count: info.direct_count(),
            };
            if descriptor.parent.is_some() && !descriptor.has_own_fields() {
                log::debug!("Class {} declares no fields of its own", fqn);
            } else {
                log::debug!("Emitting class {} with {} fields", fqn, descriptor.fields.len());
            }
            descriptors.push(descriptor);
        }

        (descriptors, warnings)
    }

    fn field_specs(
        &self,
        schema: &ClassSchema,
        members: &[usize],
        warnings: &mut Vec<CompileWarning>,
    ) -> Vec<FieldSpec> {
        members
            .iter()
            .map(|&i| {
                let record = &schema.fields()[i];
                let declared = schema.declared_type(i);
                let resolution = self
                    .resolver
                    .resolve_declared(&record.type_token, &declared, schema.namespace());
                let spec = FieldSpec::new(&record.name, &declared, resolution);
                if spec.is_fallback {
                    let warning = CompileWarning::UnresolvedType {
                        class: schema.fqn().to_string(),
                        field: record.name.clone(),
                        token: declared,
                    };
                    log::warn!("{}", warning);
                    warnings.push(warning);
                }
                spec
            })
            .collect()
    }
}
