// Tue Jan 13 2026 - Alex

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Compile pass settings.
///
/// `known_bases` is the table of base-library classes a dump may inherit from,
/// with the number of direct fields each one contributes to a child's layout.
/// Classes listed there are implicitly external.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub known_bases: IndexMap<String, usize>,
    pub external_classes: Vec<String>,
    pub verify_inherited_names: bool,
}

const DEFAULT_KNOWN_BASES: &[(&str, usize)] = &[
    ("Object", 0),
    ("EditorExtension", 0),
    ("Component", 1),
    ("Behaviour", 2),
    ("MonoBehaviour", 4),
];

const DEFAULT_EXTERNAL_CLASSES: &[&str] = &[
    "Object",
    "GameObject",
    "Component",
    "Behaviour",
    "Transform",
    "RectTransform",
    "MonoBehaviour",
    "MonoScript",
    "TextAsset",
    "Texture2D",
    "Sprite",
    "Mesh",
    "Material",
    "Shader",
    "AnimationClip",
    "AnimationCurve",
    "Gradient",
    "ColorRGBA",
    "Vector2f",
    "Vector3f",
    "Vector4f",
    "Quaternionf",
    "Matrix3x4f",
    "Matrix4x4f",
    "Rectf",
    "AABB",
    "float3",
    "float4",
];

impl Default for Config {
    fn default() -> Self {
        Self {
            known_bases: DEFAULT_KNOWN_BASES
                .iter()
                .map(|(name, count)| (name.to_string(), *count))
                .collect(),
            external_classes: DEFAULT_EXTERNAL_CLASSES.iter().map(|s| s.to_string()).collect(),
            verify_inherited_names: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_known_base(mut self, name: &str, field_count: usize) -> Self {
        self.known_bases.insert(name.to_string(), field_count);
        self
    }

    pub fn with_external_class(mut self, name: &str) -> Self {
        if !self.external_classes.iter().any(|c| c == name) {
            self.external_classes.push(name.to_string());
        }
        self
    }

    pub fn with_verify_inherited_names(mut self, verify: bool) -> Self {
        self.verify_inherited_names = verify;
        self
    }

    pub fn is_external(&self, name: &str) -> bool {
        self.known_bases.contains_key(name) || self.external_classes.iter().any(|c| c == name)
    }

    pub fn known_field_count(&self, name: &str) -> Option<usize> {
        self.known_bases.get(name).copied()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.known_bases.keys().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::Invalid("known_bases contains an empty class name".to_string()));
        }
        if self.external_classes.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::Invalid("external_classes contains an empty class name".to_string()));
        }
        Ok(())
    }
}
