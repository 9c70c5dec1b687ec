// Tue Jan 13 2026 - Alex

use crate::compiler::CompileReport;
use crate::materialize::{FieldValue, Instance};
use crate::output::OutputError;
use crate::registry::Registry;
use serde_json::{json, to_string, to_string_pretty, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Export to JSON. Only the types that leave the process implement it.
pub trait JsonDump {
    fn dump_json(&self) -> Value;
}

impl JsonDump for FieldValue {
    fn dump_json(&self) -> Value {
        match self {
            FieldValue::Bool(b) => json!(b),
            FieldValue::Int(i) => json!(i),
            FieldValue::UInt(u) => json!(u),
            FieldValue::Float(f) => json!(f),
            FieldValue::String(s) => json!(s),
            FieldValue::Bytes(bytes) => json!(bytes),
            FieldValue::List(items) => Value::Array(items.iter().map(JsonDump::dump_json).collect()),
            FieldValue::Object(instance) => instance.dump_json(),
            FieldValue::Reference(r) => json!({
                "m_FileID": r.file_id,
                "m_PathID": r.path_id,
            }),
            FieldValue::Raw(value) => value.to_json(),
        }
    }
}

impl JsonDump for Instance {
    fn dump_json(&self) -> Value {
        Value::Object(
            self.fields()
                .map(|(name, value)| (name.to_string(), value.dump_json()))
                .collect(),
        )
    }
}

// Descriptors hold only strings, sequences and unit-tagged enums, so their
// conversion to a JSON value cannot fail.
impl JsonDump for Registry {
    fn dump_json(&self) -> Value {
        Value::Object(self.classes().map(|d| (d.name.clone(), json!(d))).collect())
    }
}

pub struct JsonSerializer {
    pretty_print: bool,
    include_layouts: bool,
}

impl JsonSerializer {
    pub fn new() -> Self {
        Self {
            pretty_print: true,
            include_layouts: false,
        }
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn with_layouts(mut self, include: bool) -> Self {
        self.include_layouts = include;
        self
    }

    pub fn registry_value(&self, registry: &Registry, report: Option<&CompileReport>) -> Value {
        let mut root = serde_json::Map::new();
        root.insert("classes".to_string(), registry.dump_json());

        if self.include_layouts {
            let layouts: serde_json::Map<String, Value> = registry
                .classes()
                .filter_map(|d| {
                    let layout = registry.field_layout(&d.name)?;
                    Some((d.name.clone(), json!(layout)))
                })
                .collect();
            root.insert("layouts".to_string(), Value::Object(layouts));
        }

        if let Some(report) = report {
            root.insert("order".to_string(), json!(report.order));
            root.insert(
                "skipped".to_string(),
                Value::Array(report.skipped.iter().map(|e| json!(e.to_string())).collect()),
            );
        }

        Value::Object(root)
    }

    pub fn serialize<T: JsonDump + ?Sized>(&self, item: &T) -> Result<String, OutputError> {
        self.render(&item.dump_json())
    }

    pub fn render(&self, value: &Value) -> Result<String, OutputError> {
        let text = if self.pretty_print {
            to_string_pretty(value)?
        } else {
            to_string(value)?
        };
        Ok(text)
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, value: &Value, path: P) -> Result<(), OutputError> {
        let text = self.render(value)?;
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::new()
    }
}
