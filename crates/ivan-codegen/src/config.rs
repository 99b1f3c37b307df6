// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Generator configuration.

use std::collections::BTreeMap;

use ivan_types::Target;
use serde::{Deserialize, Serialize};

/// Everything a generator needs besides the items themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GenerateConfig {
    /// Dotted module name, e.g. `ivan.basic`
    pub module_name: String,
    pub target_language: TargetLanguage,
    /// Interfaces to emit forwarding functions for
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub interface_wrappers: BTreeMap<String, WrapperConfig>,
    /// Opaque types that are defined elsewhere, mapped to their native spelling
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub opaque_types: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
}

impl GenerateConfig {
    pub fn new(module_name: impl Into<String>, target_language: TargetLanguage) -> Self {
        Self {
            module_name: module_name.into(),
            target_language,
            interface_wrappers: BTreeMap::new(),
            opaque_types: BTreeMap::new(),
            imports: Vec::new(),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn target(&self) -> Target {
        self.target_language.into()
    }

    pub fn with_wrappers(mut self, interface: impl Into<String>, wrappers: WrapperConfig) -> Self {
        self.interface_wrappers.insert(interface.into(), wrappers);
        self
    }

    pub fn with_import(mut self, import: impl Into<String>) -> Self {
        self.imports.push(import.into());
        self
    }

    pub fn with_opaque_type(mut self, name: impl Into<String>, spelling: impl Into<String>) -> Self {
        self.opaque_types.insert(name.into(), spelling.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    C,
    Rust,
}

impl From<TargetLanguage> for Target {
    fn from(language: TargetLanguage) -> Self {
        match language {
            TargetLanguage::C => Target::C,
            TargetLanguage::Rust => Target::Rust,
        }
    }
}

/// Which wrappers to generate for one interface, and how.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WrapperConfig {
    /// Only wrap these methods. All methods when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deny: Vec<String>,
    /// Defaults to the snake_case interface name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_prefix: Option<String>,
    /// Pass the vtable by value instead of by pointer
    #[serde(default)]
    pub by_value: bool,
    #[serde(default)]
    pub on_missing: OnMissing,
}

/// What a wrapper does when an optional method is null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OnMissing {
    #[default]
    Abort,
    ReturnDefault,
}
