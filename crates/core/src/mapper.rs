//! Mapping from wire-level code model entries to SDK-facing descriptions.

use clientgen_codemodel::{
    CodeModel, ParameterId, PropertyId, ScalarType, SchemaId, SchemaKind,
};

use crate::client::{ClientMethodParameter, ClientModel, ClientModelProperty, ClientType};
use crate::error::TransformError;

/// Type-mapping service used by the planner.
///
/// Implementations must be deterministic: mapping the same id twice yields
/// equal values. The transformer relies on this to merge registrations by
/// output name.
pub trait TypeMapper {
    /// Map a wire parameter to a client method argument.
    fn map_parameter(&self, id: ParameterId) -> ClientMethodParameter;

    /// Map an object schema to a client model.
    fn map_model(&self, id: SchemaId) -> Result<ClientModel, TransformError>;

    /// Map an object property to a client model property.
    fn map_property(&self, id: PropertyId) -> ClientModelProperty;
}

/// Default mapper over a [`CodeModel`].
#[derive(Debug, Clone, Copy)]
pub struct ClientMapper<'a> {
    model: &'a CodeModel,
}

impl<'a> ClientMapper<'a> {
    /// Create a mapper for `model`.
    pub fn new(model: &'a CodeModel) -> Self {
        Self { model }
    }

    /// SDK-facing type of a schema.
    pub fn client_type(&self, id: SchemaId) -> ClientType {
        let schema = self.model.schema(id);
        match &schema.kind {
            SchemaKind::Scalar { scalar } => scalar_to_client_type(*scalar),
            SchemaKind::Array { element_type } => {
                ClientType::List(Box::new(self.client_type(*element_type)))
            }
            SchemaKind::Object { .. } => ClientType::Model(schema.name.clone()),
            SchemaKind::Constant { value_type, .. } => self.client_type(*value_type),
        }
    }
}

impl TypeMapper for ClientMapper<'_> {
    fn map_parameter(&self, id: ParameterId) -> ClientMethodParameter {
        let parameter = self.model.parameter(id);
        ClientMethodParameter {
            name: parameter.display_name().to_string(),
            client_type: self.client_type(parameter.schema),
            required: parameter.required,
            location: parameter.location(),
            is_constant: self.model.schema(parameter.schema).is_constant(),
        }
    }

    fn map_model(&self, id: SchemaId) -> Result<ClientModel, TransformError> {
        let schema = self.model.schema(id);
        let SchemaKind::Object { properties } = &schema.kind else {
            return Err(TransformError::NotAnObject {
                schema: schema.name.clone(),
            });
        };
        Ok(ClientModel {
            name: schema.name.clone(),
            properties: properties.iter().map(|p| self.map_property(*p)).collect(),
        })
    }

    fn map_property(&self, id: PropertyId) -> ClientModelProperty {
        let property = self.model.property(id);
        ClientModelProperty {
            name: property.display_name().to_string(),
            serialized_name: property.serialized_name.clone(),
            client_type: self.client_type(property.schema),
            required: property.required,
        }
    }
}

fn scalar_to_client_type(scalar: ScalarType) -> ClientType {
    match scalar {
        ScalarType::String => ClientType::String,
        ScalarType::Integer => ClientType::Integer,
        ScalarType::Number => ClientType::Number,
        ScalarType::Boolean => ClientType::Boolean,
        ScalarType::DateTime => ClientType::DateTime,
        ScalarType::Binary => ClientType::Binary,
        ScalarType::Any => ClientType::Any,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clientgen_codemodel::ParameterLocation;

    const MODEL: &str = r#"{
  "schemas": [
    { "name": "Pagination", "type": "object", "properties": [0, 1] },
    { "name": "int32", "type": "scalar", "scalar": "integer" },
    { "name": "Tags", "type": "array", "elementType": 3 },
    { "name": "string", "type": "scalar", "scalar": "string" },
    { "name": "ApiVersion", "type": "constant", "value": "2024-01-01", "valueType": 3 }
  ],
  "properties": [
    { "name": "pageSize", "serializedName": "page-size", "schema": 1, "required": true },
    { "name": "$continuation", "displayName": "continuationToken", "serializedName": "$continuation", "schema": 3 }
  ],
  "parameters": [
    { "name": "pagination", "serializedName": "pagination", "schema": 0 },
    { "name": "tags", "serializedName": "tags", "schema": 2, "protocol": { "http": { "in": "query" } } },
    { "name": "apiVersion", "displayName": "api_version", "serializedName": "api-version", "schema": 4,
      "required": true, "protocol": { "http": { "in": "query" } } }
  ]
}"#;

    fn model() -> CodeModel {
        CodeModel::from_json(MODEL).unwrap()
    }

    #[test]
    fn test_map_parameter() {
        let model = model();
        let mapper = ClientMapper::new(&model);

        let tags = mapper.map_parameter(ParameterId(1));
        assert_eq!(tags.name, "tags");
        assert_eq!(tags.client_type, ClientType::List(Box::new(ClientType::String)));
        assert_eq!(tags.location, Some(ParameterLocation::Query));
        assert!(!tags.is_constant);

        let version = mapper.map_parameter(ParameterId(2));
        assert_eq!(version.name, "api_version");
        assert_eq!(version.client_type, ClientType::String);
        assert!(version.is_constant);
        assert!(version.required);

        let pagination = mapper.map_parameter(ParameterId(0));
        assert_eq!(pagination.client_type, ClientType::Model("Pagination".into()));
        assert_eq!(pagination.location, None);
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let model = model();
        let mapper = ClientMapper::new(&model);
        assert_eq!(mapper.map_parameter(ParameterId(0)), mapper.map_parameter(ParameterId(0)));
        assert_eq!(mapper.map_model(SchemaId(0)).unwrap(), mapper.map_model(SchemaId(0)).unwrap());
    }

    #[test]
    fn test_map_model_keeps_property_order() {
        let model = model();
        let mapper = ClientMapper::new(&model);
        let pagination = mapper.map_model(SchemaId(0)).unwrap();
        assert_eq!(pagination.name, "Pagination");

        let names: Vec<_> = pagination.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["pageSize", "continuationToken"]);
        assert_eq!(pagination.properties[0].serialized_name, "page-size");
        assert_eq!(pagination.properties[1].serialized_name, "$continuation");
    }

    #[test]
    fn test_map_model_rejects_non_object() {
        let model = model();
        let mapper = ClientMapper::new(&model);
        let err = mapper.map_model(SchemaId(2)).unwrap_err();
        assert!(matches!(err, TransformError::NotAnObject { ref schema } if schema == "Tags"));
    }
}
