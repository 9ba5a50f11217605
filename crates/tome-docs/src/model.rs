use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Documentation of a single component prop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropDoc {
    /// Type annotation as written in source.
    #[serde(rename = "type")]
    pub type_name: String,
    pub required: bool,
    /// JSDoc summary; empty when the prop is undocumented.
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// Prop signature of one exported component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentTypeDoc {
    pub display_name: String,
    /// Module the component is declared in, relative to the entry's directory.
    pub file_path: String,
    pub props: BTreeMap<String, PropDoc>,
    /// Whether the component accepts style-system props.
    pub supports_style_props: bool,
}

impl ComponentTypeDoc {
    /// Whether this doc describes something that can be rendered as a
    /// component page: a PascalCase name and a type for every prop.
    pub fn is_component_like(&self) -> bool {
        is_pascal_case(&self.display_name)
            && self.props.values().all(|prop| !prop.type_name.trim().is_empty())
    }
}

/// `Button` and `DatePicker` qualify, `button` and `useButton` do not.
pub fn is_pascal_case(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && name.chars().all(|c| c.is_alphanumeric() || c == '_')
}
