//! Text rendering of method plans via the Emit trait.
//!
//! Output is meant for people reading a plan, e.g.
//!
//! ```text
//! addUser(name: string, age: number)  // POST /users (application/json)
//!   user: User
//!     user.name <- name
//!     user.age <- age
//! ```

use crate::client::{ClientMethod, ClientMethodParameter, ClientType, MethodKind};
use crate::transformer::{Mapping, ParameterTransformation};
use crate::utils::member_access;

/// Trait for rendering plan nodes as text.
pub trait Emit {
    /// Convert the node to its text representation.
    fn emit(&self) -> String;
}

impl Emit for ClientType {
    fn emit(&self) -> String {
        match self {
            ClientType::String => "string".to_string(),
            ClientType::Integer | ClientType::Number => "number".to_string(),
            ClientType::Boolean => "boolean".to_string(),
            ClientType::DateTime => "Date".to_string(),
            ClientType::Binary => "Uint8Array".to_string(),
            ClientType::Any => "unknown".to_string(),
            ClientType::List(inner) => format!("{}[]", inner.emit()),
            ClientType::Model(name) => name.clone(),
        }
    }
}

impl Emit for ClientMethodParameter {
    fn emit(&self) -> String {
        let opt = if self.required { "" } else { "?" };
        format!("{}{}: {}", self.name, opt, self.client_type.emit())
    }
}

impl Emit for Mapping {
    fn emit(&self) -> String {
        let target = match &self.output.property_name {
            Some(prop) => member_access(&self.output.parameter.name, prop),
            None => self.output.parameter.name.clone(),
        };
        let source = match &self.input.property {
            Some(prop) => member_access(&self.input.parameter.name, &prop.name),
            None => self.input.parameter.name.clone(),
        };
        format!("{target} <- {source}")
    }
}

impl Emit for ParameterTransformation {
    fn emit(&self) -> String {
        let mut out = self.out_parameter().emit();
        for mapping in self.mappings() {
            out.push_str("\n  ");
            out.push_str(&mapping.emit());
        }
        out
    }
}

impl Emit for ClientMethod {
    fn emit(&self) -> String {
        let params: Vec<_> = self.parameters.iter().map(|p| p.emit()).collect();
        let mut out = format!("{}({})", self.name, params.join(", "));

        let mut notes = Vec::new();
        if self.kind == MethodKind::Protocol {
            notes.push("protocol".to_string());
        }
        if let Some(method) = self.http_method {
            notes.push(method.as_str().to_string());
        }
        if let Some(path) = &self.path {
            notes.push(path.clone());
        }
        notes.push(format!("({})", self.content_type));
        out.push_str("  // ");
        out.push_str(&notes.join(" "));

        for transformation in &self.transformations {
            for line in transformation.emit().lines() {
                out.push_str("\n  ");
                out.push_str(line);
            }
        }
        out
    }
}
