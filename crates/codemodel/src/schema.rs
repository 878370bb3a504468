//! Schema and property entries of the code model.

use serde::Deserialize;

use crate::model::{PropertyId, SchemaId};

/// A named schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Schema name, used as the SDK model name for object schemas.
    pub name: String,
    /// What kind of value the schema describes.
    #[serde(flatten)]
    pub kind: SchemaKind,
}

/// Schema variants. Tagged by `"type"` in JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SchemaKind {
    /// A compile-time constant, e.g. a fixed api-version.
    Constant {
        /// The constant value.
        value: serde_json::Value,
        /// Schema of the value.
        value_type: SchemaId,
    },
    /// A structured type with named properties.
    Object {
        /// Properties in declaration order.
        #[serde(default)]
        properties: Vec<PropertyId>,
    },
    /// A primitive value.
    Scalar {
        /// Primitive kind.
        scalar: ScalarType,
    },
    /// A list of values.
    Array {
        /// Schema of the elements.
        element_type: SchemaId,
    },
}

/// Primitive value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScalarType {
    /// Text.
    String,
    /// Whole number.
    Integer,
    /// Floating point number.
    Number,
    /// `true` / `false`.
    Boolean,
    /// RFC 3339 timestamp.
    DateTime,
    /// Raw bytes.
    Binary,
    /// Any JSON value.
    Any,
}

impl Schema {
    /// Whether this schema is a compile-time constant.
    pub fn is_constant(&self) -> bool {
        matches!(self.kind, SchemaKind::Constant { .. })
    }

    /// Whether this schema is a structured object.
    pub fn is_object(&self) -> bool {
        matches!(self.kind, SchemaKind::Object { .. })
    }
}

/// A named field of an object schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Property name.
    pub name: String,
    /// Language-specific name, when it differs from `name`.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Name of the field on the wire.
    pub serialized_name: String,
    /// Property schema.
    pub schema: SchemaId,
    /// Whether the property must be present.
    #[serde(default)]
    pub required: bool,
}

impl Property {
    /// Name shown to SDK users.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}
