// Tue Jan 13 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;

/// One record of a class layout as it appears in the dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub type_token: String,
    pub level: u32,
}

impl FieldDescriptor {
    pub fn new(name: &str, type_token: &str, level: u32) -> Self {
        Self {
            name: name.to_string(),
            type_token: type_token.to_string(),
            level,
        }
    }

    pub fn is_base_slot(&self) -> bool {
        self.level == 0
    }

    pub fn is_direct_member(&self) -> bool {
        self.level == 1
    }

    pub fn is_array(&self) -> bool {
        self.type_token.ends_with("[]")
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = "  ".repeat(self.level as usize);
        write!(f, "{}{} {}", indent, self.type_token, self.name)
    }
}
