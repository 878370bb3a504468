//! Wire parameters.

use serde::{Deserialize, Serialize};

use crate::model::{ParameterId, PropertyId, SchemaId};

/// Transport metadata attached to a parameter or request.
#[derive(Debug, Clone, Deserialize)]
pub struct Protocols<H> {
    /// HTTP binding, absent for parameters that never reach the wire directly.
    pub http: Option<H>,
}

/// HTTP binding of a parameter.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HttpParameter {
    /// Where the parameter is sent.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Path segment.
    Path,
    /// Query string.
    Query,
    /// Request header.
    Header,
    /// Request body.
    Body,
    /// Cookie.
    Cookie,
    /// Host/endpoint template.
    Uri,
}

/// A parameter as required by the service transport contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Language-specific name, when it differs from `name`.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Name on the wire.
    pub serialized_name: String,
    /// Parameter schema.
    pub schema: SchemaId,
    /// Transport metadata.
    #[serde(default)]
    pub protocol: Option<Protocols<HttpParameter>>,
    /// Whether the parameter's properties were spread into other parameters.
    #[serde(default)]
    pub flattened: bool,
    /// Whether the parameter must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Composite parameter this one is bundled into.
    #[serde(default)]
    pub grouped_by: Option<ParameterId>,
    /// Structured parameter this one was spread from.
    #[serde(default)]
    pub original_parameter: Option<ParameterId>,
    /// Property of `original_parameter`'s schema this parameter fills.
    #[serde(default)]
    pub target_property: Option<PropertyId>,
}

impl Parameter {
    /// Name shown to SDK users.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// HTTP binding, if any.
    pub fn http(&self) -> Option<&HttpParameter> {
        self.protocol.as_ref().and_then(|p| p.http.as_ref())
    }

    /// Where the parameter is sent, if it reaches the wire.
    pub fn location(&self) -> Option<ParameterLocation> {
        self.http().map(|h| h.location)
    }
}
