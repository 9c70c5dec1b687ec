// Fri Jan 16 2026 - Alex

use crate::materialize::coerce::coerce;
use crate::materialize::reserved::is_reserved;
use crate::materialize::{FieldValue, Instance, MaterializeError, ObjectRef, ReservedValues, Value};
use crate::registry::{GeneratedClassDescriptor, Registry, RegistryError};
use crate::types::{PrimitiveKind, TypeResolution};
use rayon::prelude::*;

const REFERENCE_FILE_ID: &str = "m_FileID";
const REFERENCE_PATH_ID: &str = "m_PathID";

/// Rebuilds typed instances from decoded value trees using a finished
/// registry. Holds no state of its own, so one materializer can serve any
/// number of threads.
#[derive(Clone, Copy)]
pub struct Materializer<'r> {
    registry: &'r Registry,
}

impl<'r> Materializer<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn materialize(&self, class: &str, input: &Value, reserved: &ReservedValues) -> Result<Instance, MaterializeError> {
        let descriptor = self
            .registry
            .get(class)
            .ok_or_else(|| MaterializeError::UnknownClass(class.to_string()))?;
        self.build(descriptor, input, reserved, "<root>")
    }

    /// Materializes independent objects in parallel. Results keep input order
    /// and one failure never affects the others.
    pub fn materialize_batch(
        &self,
        objects: &[(String, Value)],
        reserved: &ReservedValues,
    ) -> Vec<Result<Instance, MaterializeError>> {
        objects
            .par_iter()
            .map(|(class, input)| self.materialize(class, input, reserved))
            .collect()
    }

    fn build(
        &self,
        descriptor: &'r GeneratedClassDescriptor,
        input: &Value,
        reserved: &ReservedValues,
        context: &str,
    ) -> Result<Instance, MaterializeError> {
        let map = input.as_map().ok_or_else(|| MaterializeError::ExpectedMapping {
            class: descriptor.name.clone(),
            field: context.to_string(),
            found: input.kind_name(),
        })?;

        let mut instance = Instance::new(&descriptor.name);
        let mut declared_reserved = Vec::new();

        let fields = self
            .registry
            .flattened_fields(&descriptor.name)
            .map_err(|err| match err {
                RegistryError::UnknownClass(name) => MaterializeError::UnknownClass(name),
                RegistryError::AlreadyInstalled => MaterializeError::UnknownClass(descriptor.name.clone()),
            })?;

        for field in fields {
            if is_reserved(&field.name) && reserved.get(&field.name).is_some() {
                declared_reserved.push(field.name.as_str());
                continue;
            }
            let value = map.get(&field.name).ok_or_else(|| MaterializeError::MissingField {
                class: descriptor.name.clone(),
                field: field.name.clone(),
            })?;
            let converted = self.convert(&descriptor.name, &field.name, &field.resolution, value, reserved)?;
            instance.set(&field.name, converted);
        }

        for name in declared_reserved {
            if let Some(value) = reserved.get(name) {
                instance.set(name, FieldValue::Raw(value.clone()));
            }
        }
        Ok(instance)
    }

    fn convert(
        &self,
        class: &str,
        field: &str,
        resolution: &TypeResolution,
        value: &Value,
        reserved: &ReservedValues,
    ) -> Result<FieldValue, MaterializeError> {
        match resolution {
            TypeResolution::Primitive(kind) => coerce(*kind, value).ok_or_else(|| MaterializeError::Coercion {
                class: class.to_string(),
                field: field.to_string(),
                found: describe(value),
                target: kind.to_string(),
            }),
            TypeResolution::External(_) | TypeResolution::Fallback(_) => Ok(FieldValue::Raw(value.clone())),
            TypeResolution::Named(target) => {
                let descriptor = self
                    .registry
                    .get(target)
                    .ok_or_else(|| MaterializeError::UnknownClass(target.clone()))?;
                let nested = self.build(descriptor, value, reserved, field)?;
                Ok(FieldValue::Object(Box::new(nested)))
            }
            TypeResolution::Reference(inner) => self.reference(class, field, inner, value),
            TypeResolution::List(inner) => match value {
                Value::List(items) => items
                    .iter()
                    .map(|item| self.convert(class, field, inner, item, reserved))
                    .collect::<Result<Vec<_>, _>>()
                    .map(FieldValue::List),
                Value::Bytes(bytes) if matches!(**inner, TypeResolution::Primitive(k) if k.is_integer()) => bytes
                    .iter()
                    .map(|b| self.convert(class, field, inner, &Value::UInt(*b as u64), reserved))
                    .collect::<Result<Vec<_>, _>>()
                    .map(FieldValue::List),
                other => Err(MaterializeError::ExpectedList {
                    class: class.to_string(),
                    field: field.to_string(),
                    found: other.kind_name(),
                }),
            },
        }
    }

    fn reference(&self, class: &str, field: &str, inner: &TypeResolution, value: &Value) -> Result<FieldValue, MaterializeError> {
        let map = value.as_map().ok_or_else(|| MaterializeError::ExpectedMapping {
            class: class.to_string(),
            field: field.to_string(),
            found: value.kind_name(),
        })?;
        let id = |key: &str| -> Result<i64, MaterializeError> {
            let raw = map.get(key).ok_or_else(|| MaterializeError::MissingField {
                class: class.to_string(),
                field: format!("{}.{}", field, key),
            })?;
            match coerce(PrimitiveKind::I64, raw) {
                Some(FieldValue::Int(n)) => Ok(n),
                _ => Err(MaterializeError::Coercion {
                    class: class.to_string(),
                    field: format!("{}.{}", field, key),
                    found: describe(raw),
                    target: PrimitiveKind::I64.to_string(),
                }),
            }
        };
        Ok(FieldValue::Reference(ObjectRef {
            target: inner.to_string(),
            file_id: id(REFERENCE_FILE_ID)?,
            path_id: id(REFERENCE_PATH_ID)?,
        }))
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::List(_) | Value::Map(_) | Value::Bytes(_) => value.kind_name().to_string(),
        scalar => format!("{} {}", scalar.kind_name(), scalar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::CompilePass;
    use crate::config::Config;
    use serde_json::{json, Value as Json};

    fn registry(dump: Json) -> Registry {
        CompilePass::new(Config::default())
            .compile_str(&dump.to_string())
            .unwrap()
            .registry
    }

    fn scene() -> Registry {
        registry(json!({
            "Scene.Base": [
                {"name": "id", "type": "int", "level": 1},
                {"name": "object_reader", "type": "Reader", "level": 1}
            ],
            "Scene.Part": [
                {"name": "weight", "type": "float", "level": 1},
                {"name": "object_reader", "type": "Reader", "level": 1}
            ],
            "Scene.Plain": [{"name": "label", "type": "string", "level": 1}],
            "Scene.Model": [
                {"name": "Base", "type": "Base", "level": 0},
                {"name": "id", "type": "int", "level": 1},
                {"name": "object_reader", "type": "Reader", "level": 1},
                {"name": "name", "type": "string", "level": 1},
                {"name": "flags", "type": "UInt8[]", "level": 1},
                {"name": "parts", "type": "Part[]", "level": 1},
                {"name": "plain", "type": "Plain", "level": 1},
                {"name": "blob", "type": "TypelessData", "level": 1},
                {"name": "extra", "type": "Mystery", "level": 1}
            ]
        }))
    }

    fn model_input() -> Value {
        Value::from(json!({
            "id": 7,
            "object_reader": null,
            "name": "hiyori",
            "flags": [1, 0, 255],
            "parts": [
                {"weight": 0.5, "object_reader": null},
                {"weight": 1.0, "object_reader": null}
            ],
            "plain": {"label": "p"},
            "blob": [222, 173],
            "extra": {"anything": [1, 2]}
        }))
    }

    #[test]
    fn test_exact_tree_round_trips() {
        let registry = scene();
        let instance = Materializer::new(&registry)
            .materialize("Scene.Model", &model_input(), &ReservedValues::new())
            .unwrap();

        assert_eq!(instance.class(), "Scene.Model");
        assert_eq!(
            instance.field_names(),
            vec!["id", "object_reader", "name", "flags", "parts", "plain", "blob", "extra"]
        );
        assert_eq!(instance.get("id"), Some(&FieldValue::Int(7)));
        assert_eq!(instance.get("name"), Some(&FieldValue::String("hiyori".to_string())));
        assert_eq!(
            instance.get("flags"),
            Some(&FieldValue::List(vec![FieldValue::UInt(1), FieldValue::UInt(0), FieldValue::UInt(255)]))
        );
        let parts = instance.get("parts").and_then(FieldValue::as_list).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1].as_object().unwrap().get("weight"), Some(&FieldValue::Float(1.0)));
        assert_eq!(
            instance.get("plain").and_then(FieldValue::as_object).and_then(|p| p.get("label")),
            Some(&FieldValue::String("p".to_string()))
        );
        assert_eq!(instance.get("blob"), Some(&FieldValue::Bytes(vec![222, 173])));
        assert_eq!(
            instance.get("extra"),
            Some(&FieldValue::Raw(Value::from(json!({"anything": [1, 2]}))))
        );
    }

    #[test]
    fn test_missing_field_fails() {
        let registry = scene();
        let mut input = model_input();
        if let Value::Map(map) = &mut input {
            map.shift_remove("name");
        }
        let err = Materializer::new(&registry)
            .materialize("Scene.Model", &input, &ReservedValues::new())
            .unwrap_err();
        assert_eq!(
            err,
            MaterializeError::MissingField {
                class: "Scene.Model".to_string(),
                field: "name".to_string()
            }
        );
    }

    #[test]
    fn test_missing_inherited_field_fails() {
        let registry = scene();
        let mut input = model_input();
        if let Value::Map(map) = &mut input {
            map.shift_remove("id");
        }
        let result = Materializer::new(&registry).materialize("Scene.Model", &input, &ReservedValues::new());
        assert!(matches!(result, Err(MaterializeError::MissingField { ref field, .. }) if field == "id"));
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let registry = scene();
        let mut input = model_input();
        if let Value::Map(map) = &mut input {
            map.insert("added_in_new_build".to_string(), Value::Int(1));
        }
        let instance = Materializer::new(&registry)
            .materialize("Scene.Model", &input, &ReservedValues::new())
            .unwrap();
        assert!(!instance.has("added_in_new_build"));
    }

    #[test]
    fn test_reserved_values_reach_declaring_instances() {
        let registry = scene();
        let reserved = ReservedValues::new()
            .with("object_reader", Value::String("reader#1".to_string()))
            .unwrap();
        let mut input = model_input();
        if let Value::Map(map) = &mut input {
            map.shift_remove("object_reader");
        }

        let instance = Materializer::new(&registry)
            .materialize("Scene.Model", &input, &reserved)
            .unwrap();

        let injected = FieldValue::Raw(Value::String("reader#1".to_string()));
        assert_eq!(instance.get("object_reader"), Some(&injected));
        for part in instance.get("parts").and_then(FieldValue::as_list).unwrap() {
            assert_eq!(part.as_object().unwrap().get("object_reader"), Some(&injected));
        }
        let plain = instance.get("plain").and_then(FieldValue::as_object).unwrap();
        assert!(!plain.has("object_reader"));
        assert_eq!(plain.len(), 1);
    }

    #[test]
    fn test_reserved_values_reach_deeply_nested_instances() {
        let registry = registry(json!({
            "Top": [{"name": "mid", "type": "Mid", "level": 1}],
            "Mid": [{"name": "leaves", "type": "Leaf[]", "level": 1}],
            "Leaf": [
                {"name": "v", "type": "int", "level": 1},
                {"name": "object_reader", "type": "Reader", "level": 1}
            ]
        }));
        let reserved = ReservedValues::new().with("object_reader", Value::Int(9)).unwrap();
        let input = Value::from(json!({"mid": {"leaves": [{"v": 1}, {"v": 2}]}}));

        let top = Materializer::new(&registry)
            .materialize("Top", &input, &reserved)
            .unwrap();

        assert!(!top.has("object_reader"));
        let mid = top.get("mid").and_then(FieldValue::as_object).unwrap();
        assert!(!mid.has("object_reader"));
        let leaves = mid.get("leaves").and_then(FieldValue::as_list).unwrap();
        assert_eq!(leaves.len(), 2);
        for (leaf, expected) in leaves.iter().zip([1, 2]) {
            let leaf = leaf.as_object().unwrap();
            assert_eq!(leaf.get("v"), Some(&FieldValue::Int(expected)));
            assert_eq!(leaf.get("object_reader"), Some(&FieldValue::Raw(Value::Int(9))));
        }
    }

    #[test]
    fn test_self_referencing_tree() {
        let registry = registry(json!({
            "Tree.Node": [
                {"name": "value", "type": "int", "level": 1},
                {"name": "children", "type": "Node[]", "level": 1}
            ]
        }));
        let input = Value::from(json!({
            "value": 1,
            "children": [
                {"value": 2, "children": []},
                {"value": 3, "children": [{"value": 4, "children": []}]}
            ]
        }));
        let root = Materializer::new(&registry)
            .materialize("Tree.Node", &input, &ReservedValues::new())
            .unwrap();
        let children = root.get("children").and_then(FieldValue::as_list).unwrap();
        let grandchild = children[1].as_object().unwrap().get("children").and_then(FieldValue::as_list).unwrap();
        assert_eq!(grandchild[0].as_object().unwrap().get("value"), Some(&FieldValue::Int(4)));
    }

    #[test]
    fn test_external_base_fields_are_kept() {
        let registry = registry(json!({
            "Look.CubismLookParameter": [
                {"name": "Base", "type": "MonoBehaviour", "level": 0},
                {"name": "m_GameObject", "type": "PPtr<GameObject>", "level": 1},
                {"name": "m_Enabled", "type": "UInt8", "level": 1},
                {"name": "m_Script", "type": "PPtr<MonoScript>", "level": 1},
                {"name": "m_Name", "type": "string", "level": 1},
                {"name": "Axis", "type": "int", "level": 1},
                {"name": "Factor", "type": "float", "level": 1}
            ]
        }));
        let input = Value::from(json!({
            "m_GameObject": {"m_FileID": 0, "m_PathID": 42},
            "m_Enabled": 1,
            "m_Script": {"m_FileID": 1, "m_PathID": -9},
            "m_Name": "",
            "Axis": 2,
            "Factor": 0.75
        }));
        let instance = Materializer::new(&registry)
            .materialize("Look.CubismLookParameter", &input, &ReservedValues::new())
            .unwrap();
        assert_eq!(instance.len(), 6);
        assert_eq!(
            instance.get("m_Script"),
            Some(&FieldValue::Reference(ObjectRef {
                target: "MonoScript".to_string(),
                file_id: 1,
                path_id: -9
            }))
        );
        assert_eq!(instance.get("Factor"), Some(&FieldValue::Float(0.75)));
    }

    #[test]
    fn test_scalar_for_nested_class_fails() {
        let registry = scene();
        let mut input = model_input();
        if let Value::Map(map) = &mut input {
            map.insert("plain".to_string(), Value::Int(3));
        }
        let err = Materializer::new(&registry)
            .materialize("Scene.Model", &input, &ReservedValues::new())
            .unwrap_err();
        assert!(matches!(err, MaterializeError::ExpectedMapping { found: "int", .. }));
    }

    #[test]
    fn test_out_of_range_scalar_fails() {
        let registry = scene();
        let mut input = model_input();
        if let Value::Map(map) = &mut input {
            map.insert("flags".to_string(), Value::from(json!([1, 300])));
        }
        let err = Materializer::new(&registry)
            .materialize("Scene.Model", &input, &ReservedValues::new())
            .unwrap_err();
        assert!(matches!(err, MaterializeError::Coercion { ref target, .. } if target == "u8"));
    }

    #[test]
    fn test_batch_tolerates_failures() {
        let registry = scene();
        let objects = vec![
            ("Scene.Plain".to_string(), Value::from(json!({"label": "a"}))),
            ("Scene.Plain".to_string(), Value::from(json!({"wrong": "b"}))),
            ("Scene.Missing".to_string(), Value::from(json!({}))),
            ("Scene.Plain".to_string(), Value::from(json!({"label": "c"}))),
        ];
        let results = Materializer::new(&registry).materialize_batch(&objects, &ReservedValues::new());
        assert_eq!(results.len(), 4);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(MaterializeError::MissingField { .. })));
        assert_eq!(results[2], Err(MaterializeError::UnknownClass("Scene.Missing".to_string())));
        assert_eq!(
            results[3].as_ref().unwrap().get("label"),
            Some(&FieldValue::String("c".to_string()))
        );
    }
}
