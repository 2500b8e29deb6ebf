//! Generator configuration types (nativegen.toml format).

use crate::registry::TypeRegistry;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Which artifact groups to produce.
    #[serde(default)]
    pub output: OutputToggles,

    /// Name-based skip rules.
    #[serde(default)]
    pub classify: ClassifyConfig,

    /// Accepted primitive representations.
    #[serde(default)]
    pub mapping: MappingConfig,

    /// Type registry entries, in emission order.
    #[serde(rename = "type", default = "default_types")]
    pub types: Vec<TypeEntry>,
}

/// Artifact group toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputToggles {
    #[serde(default = "enabled")]
    pub enums: bool,
    #[serde(default = "enabled")]
    pub natives: bool,
    #[serde(default = "enabled")]
    pub diagnostics: bool,
}

/// Settings for the declaration filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyConfig {
    /// Function names starting with this marker are unnamed natives.
    #[serde(default = "default_hex_prefix")]
    pub hex_prefix: String,

    /// Lowercase substrings that exempt a function from the hex rule.
    #[serde(default = "default_hex_exempt")]
    pub hex_exempt: Vec<String>,
}

/// Primitive type spellings accepted without a wrapper type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Accepted for parameters and return values.
    #[serde(default = "default_params")]
    pub params: Vec<String>,

    /// Additionally accepted for return values.
    #[serde(default = "default_returns")]
    pub returns: Vec<String>,
}

/// One registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    pub name: String,

    /// Underlying scalar representation (e.g. `int`, `DWORD`).
    pub storage: String,

    /// Wrapper type this one inherits storage from.
    #[serde(default)]
    pub parent: Option<String>,

    /// Emit a constructor binding taking this type.
    #[serde(default)]
    pub init: Option<String>,
}

fn enabled() -> bool {
    true
}

fn default_hex_prefix() -> String {
    "_0x".to_string()
}

fn default_hex_exempt() -> Vec<String> {
    vec!["set_control".to_string()]
}

fn default_params() -> Vec<String> {
    ["char*", "BOOL", "int", "float"].map(String::from).to_vec()
}

fn default_returns() -> Vec<String> {
    ["void", "Vector3"].map(String::from).to_vec()
}

fn default_types() -> Vec<TypeEntry> {
    vec![
        TypeEntry::new("Void", "DWORD"),
        TypeEntry::new("Any", "DWORD"),
        TypeEntry::new("uint", "DWORD"),
        TypeEntry::new("Hash", "DWORD").with_init("DWORD"),
        TypeEntry::new("Entity", "int").with_parent("Any"),
        TypeEntry::new("Player", "int").with_parent("Any"),
        TypeEntry::new("Ped", "int").with_parent("Entity"),
        TypeEntry::new("Vehicle", "int").with_parent("Entity"),
        TypeEntry::new("Cam", "int").with_parent("Any"),
        TypeEntry::new("Object", "int").with_parent("Entity"),
        TypeEntry::new("Pickup", "int").with_parent("Object"),
        TypeEntry::new("Blip", "int").with_parent("Any"),
        TypeEntry::new("ScrHandle", "int"),
    ]
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output: OutputToggles::default(),
            classify: ClassifyConfig::default(),
            mapping: MappingConfig::default(),
            types: default_types(),
        }
    }
}

impl Default for OutputToggles {
    fn default() -> Self {
        Self {
            enums: true,
            natives: true,
            diagnostics: true,
        }
    }
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            hex_prefix: default_hex_prefix(),
            hex_exempt: default_hex_exempt(),
        }
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            params: default_params(),
            returns: default_returns(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: GeneratorConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Build and validate the type registry.
    pub fn registry(&self) -> crate::Result<TypeRegistry> {
        TypeRegistry::new(self.types.iter().cloned())
    }
}

impl MappingConfig {
    pub fn accepts_param(&self, ty: &str) -> bool {
        self.params.iter().any(|p| p == ty)
    }

    pub fn accepts_return(&self, ty: &str) -> bool {
        self.accepts_param(ty) || self.returns.iter().any(|r| r == ty)
    }
}

impl TypeEntry {
    pub fn new(name: &str, storage: &str) -> Self {
        Self {
            name: name.to_string(),
            storage: storage.to_string(),
            parent: None,
            init: None,
        }
    }

    pub fn with_parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn with_init(mut self, init: &str) -> Self {
        self.init = Some(init.to_string());
        self
    }
}
