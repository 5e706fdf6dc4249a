//! Records emitted by the harvester
//!
//! These are the shapes written to the output artifact. Field names are
//! serialized in camelCase and absent optionals are omitted entirely, so a
//! callable whose signature could not be decomposed has no `parameters` key
//! at all rather than an empty list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a documented type, taken from the page title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

impl TypeKind {
    /// Maps the first word of a Javadoc title ("Class", "Enum", ...) to a kind
    pub fn from_title_word(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "class" => Some(Self::Class),
            "interface" => Some(Self::Interface),
            "enum" => Some(Self::Enum),
            "record" => Some(Self::Record),
            "annotation" => Some(Self::Annotation),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Record => "record",
            Self::Annotation => "annotation",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to another type by bare name; never resolved here
pub type TypeRef = String;

/// Structured record of one documented type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    pub kind: TypeKind,
    pub name: String,
    pub package_name: String,
    pub module_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends_types: Option<Vec<TypeRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implements_types: Option<Vec<TypeRef>>,
    pub fields: Vec<FieldDescriptor>,
    pub constructors: Vec<CallableDescriptor>,
    pub methods: Vec<CallableDescriptor>,
}

impl TypeDescriptor {
    /// Fully qualified name (`package.Name`), or the bare name without a package
    pub fn qualified_name(&self) -> String {
        if self.package_name.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package_name, self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub modifiers: Vec<String>,
    #[serde(rename = "type")]
    pub field_type: String,
    pub description: String,
}

/// A constructor or method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallableDescriptor {
    pub name: String,
    pub modifiers: Vec<String>,
    /// Return type; only methods carry one
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    pub description: String,
    /// `None` when the signature text could not be decomposed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(rename = "type")]
    pub param_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Parameter {
    pub fn new(param_type: impl Into<String>, name: Option<&str>) -> Self {
        Self {
            param_type: param_type.into(),
            name: name.map(str::to_string),
        }
    }
}
