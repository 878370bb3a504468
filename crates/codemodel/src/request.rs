//! Operations, requests and request content-type resolution.

use serde::{Deserialize, Serialize};

use crate::model::ParameterId;
use crate::parameter::Protocols;

/// Content type used when a request declares nothing more specific.
pub const CONTENT_TYPE_APPLICATION_JSON: &str = "application/json";
/// JSON Patch content type.
pub const CONTENT_TYPE_APPLICATION_JSON_PATCH: &str = "application/json-patch+json";

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
}

impl HttpMethod {
    /// Upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
        }
    }
}

/// Well-known media type families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnownMediaType {
    /// JSON
    Json,
    /// XML
    Xml,
    /// URL-encoded form
    Form,
    /// Opaque bytes
    Binary,
    /// Multipart form data
    Multipart,
    /// Plain text
    Text,
}

impl KnownMediaType {
    /// Canonical content type string.
    pub fn content_type(&self) -> &'static str {
        match self {
            KnownMediaType::Json => CONTENT_TYPE_APPLICATION_JSON,
            KnownMediaType::Xml => "application/xml",
            KnownMediaType::Form => "application/x-www-form-urlencoded",
            KnownMediaType::Binary => "application/octet-stream",
            KnownMediaType::Multipart => "multipart/form-data",
            KnownMediaType::Text => "text/plain",
        }
    }
}

/// HTTP binding of a request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequest {
    /// HTTP method.
    #[serde(default)]
    pub method: Option<HttpMethod>,
    /// URL path template, e.g. `/users/{userId}`.
    #[serde(default)]
    pub path: Option<String>,
    /// Declared media types, in declaration order.
    #[serde(default)]
    pub media_types: Option<Vec<String>>,
    /// The distinguished well-known media type, if any.
    #[serde(default)]
    pub known_media_type: Option<KnownMediaType>,
}

/// One request variant of an operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// All wire parameters, in order.
    #[serde(default)]
    pub parameters: Vec<ParameterId>,
    /// Parameters making up the method signature, when the model fixes it.
    #[serde(default)]
    pub signature_parameters: Vec<ParameterId>,
    /// Transport metadata.
    #[serde(default)]
    pub protocol: Option<Protocols<HttpRequest>>,
}

impl Request {
    /// HTTP binding, if any.
    pub fn http(&self) -> Option<&HttpRequest> {
        self.protocol.as_ref().and_then(|p| p.http.as_ref())
    }

    /// Gets the content type of the request.
    ///
    /// A single declared media type wins since it is more specific than the
    /// known media type. With several declared, the known media type's
    /// canonical string is used. Falls back to `application/json`.
    pub fn content_type(&self) -> &str {
        if let Some(http) = self.http() {
            if let Some([only]) = http.media_types.as_deref() {
                return only;
            }
            if let Some(known) = http.known_media_type {
                return known.content_type();
            }
        }
        CONTENT_TYPE_APPLICATION_JSON
    }

    /// Whether `content_type` is one of the declared media types.
    ///
    /// Exact, case-sensitive comparison.
    pub fn has_content_type(&self, content_type: &str) -> bool {
        self.http()
            .and_then(|http| http.media_types.as_ref())
            .is_some_and(|types| types.iter().any(|t| t == content_type))
    }
}

/// A service operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Operation name, e.g. `addUser`.
    pub name: String,
    /// Request variants.
    #[serde(default)]
    pub requests: Vec<Request>,
}
