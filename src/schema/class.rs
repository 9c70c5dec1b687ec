// Tue Jan 13 2026 - Alex

use crate::schema::FieldDescriptor;

/// Splits a fully-qualified class name on its last `.` outside of generic
/// brackets. Names without a namespace return `None` for it.
pub fn split_fqn(fqn: &str) -> (Option<&str>, &str) {
    let mut depth = 0usize;
    let mut split_at = None;
    for (i, c) in fqn.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => split_at = Some(i),
            _ => {}
        }
    }
    match split_at {
        Some(i) if i > 0 => (Some(&fqn[..i]), &fqn[i + 1..]),
        _ => (None, fqn),
    }
}

#[derive(Debug, Clone)]
pub struct ClassSchema {
    fqn: String,
    namespace: Option<String>,
    short_name: String,
    fields: Vec<FieldDescriptor>,
}

impl ClassSchema {
    pub fn new(fqn: &str, fields: Vec<FieldDescriptor>) -> Self {
        let (namespace, short_name) = split_fqn(fqn);
        Self {
            fqn: fqn.to_string(),
            namespace: namespace.map(str::to_string),
            short_name: short_name.to_string(),
            fields,
        }
    }

    pub fn fqn(&self) -> &str {
        &self.fqn
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn has_direct_members(&self) -> bool {
        self.fields.iter().any(|f| f.is_direct_member())
    }

    /// The inherited base-type slot: a leading level-0 record in a class that
    /// also lists level-1 members.
    pub fn base_slot(&self) -> Option<&FieldDescriptor> {
        self.fields
            .first()
            .filter(|f| f.is_base_slot() && self.has_direct_members())
    }

    pub fn parent_name(&self) -> Option<&str> {
        self.base_slot().map(|f| f.type_token.as_str())
    }

    /// Record indices of the class's direct members, in declaration order.
    ///
    /// A flat class (no level-1 records at all) declares its level-0 records.
    pub fn direct_members(&self) -> Vec<usize> {
        let level = if self.has_direct_members() { 1 } else { 0 };
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.level == level)
            .map(|(i, _)| i)
            .collect()
    }

    /// Declared type of the record at `index`, with array element types taken
    /// from the `Array`/`size`/`data` expansion that follows an array field.
    pub fn declared_type(&self, index: usize) -> String {
        let field = &self.fields[index];
        if field.is_array() {
            if let (Some(array), Some(data)) = (self.fields.get(index + 1), self.fields.get(index + 3)) {
                if array.type_token == "Array" && data.level > field.level {
                    return format!("{}[]", data.type_token);
                }
            }
        }
        field.type_token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fqn() {
        assert_eq!(split_fqn("Live2D.Cubism.Core.CubismMoc"), (Some("Live2D.Cubism.Core"), "CubismMoc"));
        assert_eq!(split_fqn("CubismTaskHandler"), (None, "CubismTaskHandler"));
        assert_eq!(split_fqn("NS.Wrapper<Other.Type>"), (Some("NS"), "Wrapper<Other.Type>"));
    }

    #[test]
    fn test_base_slot_and_members() {
        let schema = ClassSchema::new(
            "NS.Child",
            vec![
                FieldDescriptor::new("Base", "Base", 0),
                FieldDescriptor::new("x", "int", 1),
                FieldDescriptor::new("y", "float", 1),
            ],
        );
        assert_eq!(schema.parent_name(), Some("Base"));
        assert_eq!(schema.direct_members(), vec![1, 2]);
    }

    #[test]
    fn test_flat_class_has_no_parent() {
        let schema = ClassSchema::new(
            "Point",
            vec![FieldDescriptor::new("x", "int", 0), FieldDescriptor::new("y", "int", 0)],
        );
        assert_eq!(schema.parent_name(), None);
        assert_eq!(schema.direct_members(), vec![0, 1]);
    }

    #[test]
    fn test_declared_array_type() {
        let schema = ClassSchema::new(
            "Curve",
            vec![
                FieldDescriptor::new("Keys", "Keyframe[]", 1),
                FieldDescriptor::new("Array", "Array", 2),
                FieldDescriptor::new("size", "int", 3),
                FieldDescriptor::new("data", "Keyframe", 3),
                FieldDescriptor::new("Plain", "int[]", 1),
            ],
        );
        assert_eq!(schema.declared_type(0), "Keyframe[]");
        assert_eq!(schema.declared_type(4), "int[]");
        assert_eq!(schema.direct_members(), vec![0, 4]);
    }
}
