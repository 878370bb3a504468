//! SDK-facing descriptions produced by the type mapper.
//!
//! These are what library consumers see: method arguments, models and model
//! properties. They are derived from the wire-level code model and carry only
//! what the planner and the emitters need.

use clientgen_codemodel::{HttpMethod, ParameterLocation};
use serde::Serialize;

use crate::emit::Emit;
use crate::transformer::ParameterTransformation;

/// SDK-facing type of a parameter or property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum ClientType {
    /// Text.
    String,
    /// Whole number.
    Integer,
    /// Floating point number.
    Number,
    /// `true` / `false`.
    Boolean,
    /// Timestamp.
    DateTime,
    /// Raw bytes.
    Binary,
    /// Untyped value.
    Any,
    /// List of values.
    List(Box<ClientType>),
    /// Named model type.
    Model(String),
}

impl From<ClientType> for String {
    fn from(ty: ClientType) -> Self {
        ty.emit()
    }
}

/// An argument of a generated client method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientMethodParameter {
    /// Argument name.
    pub name: String,
    /// Argument type.
    pub client_type: ClientType,
    /// Whether the argument must be supplied.
    pub required: bool,
    /// Wire location, for parameters that reach the wire directly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<ParameterLocation>,
    /// Whether the value is a compile-time constant.
    pub is_constant: bool,
}

/// SDK-facing structured type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientModel {
    /// Model name.
    pub name: String,
    /// Fields in declaration order.
    pub properties: Vec<ClientModelProperty>,
}

impl ClientModel {
    /// First property matching `predicate`.
    pub fn find_property(
        &self,
        predicate: impl Fn(&ClientModelProperty) -> bool,
    ) -> Option<&ClientModelProperty> {
        self.properties.iter().find(|p| predicate(p))
    }
}

/// A field of a [`ClientModel`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientModelProperty {
    /// Field name shown to SDK users.
    pub name: String,
    /// Field name on the wire.
    pub serialized_name: String,
    /// Field type.
    pub client_type: ClientType,
    /// Whether the field must be present.
    pub required: bool,
}

/// Method variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    /// Structured method with grouping and spreading applied.
    Convenience,
    /// Low-level method taking wire values directly.
    Protocol,
}

/// Plan for one generated client method.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientMethod {
    /// Method name.
    pub name: String,
    /// Method variant.
    pub kind: MethodKind,
    /// HTTP method of the request, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_method: Option<HttpMethod>,
    /// URL path template, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Effective request content type.
    pub content_type: String,
    /// Method signature.
    pub parameters: Vec<ClientMethodParameter>,
    /// How to rebuild wire parameters from the signature.
    pub transformations: Vec<ParameterTransformation>,
}
