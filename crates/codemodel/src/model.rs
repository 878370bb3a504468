//! The code model tables and id validation.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CodeModelError;
use crate::parameter::Parameter;
use crate::request::{Operation, Request};
use crate::schema::{Property, Schema, SchemaKind};

/// Index into [`CodeModel`]'s schema table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SchemaId(pub usize);

/// Index into [`CodeModel`]'s property table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PropertyId(pub usize);

/// Index into [`CodeModel`]'s parameter table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ParameterId(pub usize);

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parameter #{}", self.0)
    }
}

/// Validated, read-only code model.
#[derive(Debug, Clone)]
pub struct CodeModel {
    schemas: Vec<Schema>,
    properties: Vec<Property>,
    parameters: Vec<Parameter>,
    operations: Vec<Operation>,
}

/// Model as decoded, before ids are checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCodeModel {
    #[serde(default)]
    schemas: Vec<Schema>,
    #[serde(default)]
    properties: Vec<Property>,
    #[serde(default)]
    parameters: Vec<Parameter>,
    #[serde(default)]
    operations: Vec<Operation>,
}

impl CodeModel {
    /// Parse and validate a code model from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CodeModelError> {
        let raw: RawCodeModel = serde_json::from_str(json)?;
        let model = CodeModel {
            schemas: raw.schemas,
            properties: raw.properties,
            parameters: raw.parameters,
            operations: raw.operations,
        };
        model.validate()?;
        debug!(
            schemas = model.schemas.len(),
            properties = model.properties.len(),
            parameters = model.parameters.len(),
            operations = model.operations.len(),
            "Loaded code model."
        );
        Ok(model)
    }

    /// Read, parse and validate a code model file.
    pub fn from_path(path: &Path) -> Result<Self, CodeModelError> {
        let json = fs::read_to_string(path).map_err(|source| CodeModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Look up a schema.
    ///
    /// Ids read from this model always resolve. Ids from anywhere else must be
    /// checked first, see [`get_parameter`](Self::get_parameter) and
    /// [`check_request`](Self::check_request).
    pub fn schema(&self, id: SchemaId) -> &Schema {
        &self.schemas[id.0]
    }

    /// Look up a property.
    pub fn property(&self, id: PropertyId) -> &Property {
        &self.properties[id.0]
    }

    /// Look up a parameter.
    pub fn parameter(&self, id: ParameterId) -> &Parameter {
        &self.parameters[id.0]
    }

    /// Look up a parameter whose id may not come from this model.
    pub fn get_parameter(&self, id: ParameterId) -> Option<&Parameter> {
        self.parameters.get(id.0)
    }

    /// All operations, in declaration order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Find an operation by name.
    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.name == name)
    }

    fn validate(&self) -> Result<(), CodeModelError> {
        for schema in &self.schemas {
            let owner = || format!("schema '{}'", schema.name);
            match &schema.kind {
                SchemaKind::Constant { value_type, .. } => {
                    check(owner, "valueType", "schema", value_type.0, self.schemas.len())?;
                }
                SchemaKind::Object { properties } => {
                    for id in properties {
                        check(owner, "properties", "property", id.0, self.properties.len())?;
                    }
                }
                SchemaKind::Array { element_type } => {
                    check(owner, "elementType", "schema", element_type.0, self.schemas.len())?;
                }
                SchemaKind::Scalar { .. } => {}
            }
        }

        for property in &self.properties {
            let owner = || format!("property '{}'", property.name);
            check(owner, "schema", "schema", property.schema.0, self.schemas.len())?;
        }

        for parameter in &self.parameters {
            let owner = || format!("parameter '{}'", parameter.name);
            check(owner, "schema", "schema", parameter.schema.0, self.schemas.len())?;
            let links = [
                ("groupedBy", parameter.grouped_by),
                ("originalParameter", parameter.original_parameter),
            ];
            for (field, id) in links {
                if let Some(id) = id {
                    check(owner, field, "parameter", id.0, self.parameters.len())?;
                }
            }
            if let Some(id) = parameter.target_property {
                check(owner, "targetProperty", "property", id.0, self.properties.len())?;
            }
        }

        for operation in &self.operations {
            for request in &operation.requests {
                self.check_request(&operation.name, request)?;
            }
        }

        self.check_element_cycles()
    }

    /// Check that every parameter id of `request` resolves in this model.
    ///
    /// Requests read from the model pass by construction; this is for
    /// requests built or edited by the caller.
    pub fn check_request(&self, operation: &str, request: &Request) -> Result<(), CodeModelError> {
        let owner = || format!("operation '{operation}'");
        for id in &request.parameters {
            check(owner, "parameters", "parameter", id.0, self.parameters.len())?;
        }
        for id in &request.signature_parameters {
            check(owner, "signatureParameters", "parameter", id.0, self.parameters.len())?;
        }
        Ok(())
    }

    /// Arrays and constants point at other schemas; objects end the chain by
    /// name. A chain longer than the table must revisit a schema.
    fn check_element_cycles(&self) -> Result<(), CodeModelError> {
        for schema in &self.schemas {
            let mut current = schema;
            let mut steps = 0;
            while let SchemaKind::Array { element_type: next }
            | SchemaKind::Constant {
                value_type: next, ..
            } = &current.kind
            {
                steps += 1;
                if steps > self.schemas.len() {
                    return Err(CodeModelError::SchemaCycle {
                        schema: schema.name.clone(),
                    });
                }
                current = self.schema(*next);
            }
        }
        Ok(())
    }
}

fn check(
    owner: impl Fn() -> String,
    field: &'static str,
    table: &'static str,
    id: usize,
    len: usize,
) -> Result<(), CodeModelError> {
    if id < len {
        Ok(())
    } else {
        Err(CodeModelError::DanglingId {
            owner: owner(),
            field,
            table,
            id,
            len,
        })
    }
}
