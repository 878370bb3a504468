//! Client method construction.
//!
//! Builds one [`ClientMethod`] per request and method variant: the signature
//! seen by SDK users plus the transformations rebuilding the wire request.

use clientgen_codemodel::{CodeModel, Operation, ParameterId, Request};
use indexmap::IndexSet;
use tracing::debug;

use crate::client::{ClientMethod, MethodKind};
use crate::error::TransformError;
use crate::mapper::TypeMapper;
use crate::options::GeneratorOptions;
use crate::transformer::MethodParameterTransformer;

/// Plan one client method for `request` of `operation`.
pub fn build_client_method(
    model: &CodeModel,
    mapper: &impl TypeMapper,
    operation: &Operation,
    request: &Request,
    kind: MethodKind,
) -> Result<ClientMethod, TransformError> {
    model.check_request(&operation.name, request)?;
    let parameters = signature_parameters(model, request, kind)
        .into_iter()
        .map(|id| mapper.map_parameter(id))
        .collect::<Vec<_>>();

    let mut transformer =
        MethodParameterTransformer::new(model, &operation.name, kind == MethodKind::Protocol);
    for &id in &request.parameters {
        transformer.add_parameter(mapper.map_parameter(id), id)?;
    }
    let transformations = transformer.process(request, mapper)?;

    let http = request.http();
    let method = ClientMethod {
        name: operation.name.clone(),
        kind,
        http_method: http.and_then(|h| h.method),
        path: http.and_then(|h| h.path.clone()),
        content_type: request.content_type().to_string(),
        parameters,
        transformations,
    };
    debug!(
        operation = %method.name,
        kind = ?method.kind,
        parameters = method.parameters.len(),
        transformations = method.transformations.len(),
        "Built client method."
    );
    Ok(method)
}

/// Plan every selected operation of `model`, stopping at the first failure.
pub fn build_operation_methods(
    model: &CodeModel,
    mapper: &impl TypeMapper,
    options: &GeneratorOptions,
) -> Result<Vec<ClientMethod>, TransformError> {
    let kinds = options.method_kinds();
    let mut methods = Vec::new();
    for operation in model.operations() {
        if !options.includes_operation(&operation.name) {
            debug!(operation = %operation.name, "Skipping operation not in allow-list.");
            continue;
        }
        for request in &operation.requests {
            for &kind in &kinds {
                methods.push(build_client_method(model, mapper, operation, request, kind)?);
            }
        }
    }
    Ok(methods)
}

/// Arguments of the generated method.
///
/// Convenience methods use the model's signature when it has one. Otherwise
/// grouped parameters collapse into their group (placed where the first
/// member was), and a flattened parameter is replaced by the parameters
/// spread from it. Protocol methods take every non-constant wire parameter.
fn signature_parameters(model: &CodeModel, request: &Request, kind: MethodKind) -> Vec<ParameterId> {
    match kind {
        MethodKind::Protocol => request
            .parameters
            .iter()
            .copied()
            .filter(|id| {
                let p = model.parameter(*id);
                p.http().is_some()
                    && p.original_parameter.is_none()
                    && !model.schema(p.schema).is_constant()
            })
            .collect(),
        MethodKind::Convenience if !request.signature_parameters.is_empty() => {
            request.signature_parameters.clone()
        }
        MethodKind::Convenience => {
            let spread_from: IndexSet<ParameterId> = request
                .parameters
                .iter()
                .filter_map(|id| model.parameter(*id).original_parameter)
                .collect();

            let mut signature = IndexSet::new();
            for &id in &request.parameters {
                let p = model.parameter(id);
                if model.schema(p.schema).is_constant() || spread_from.contains(&id) {
                    continue;
                }
                signature.insert(p.grouped_by.unwrap_or(id));
            }
            signature.into_iter().collect()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::emit::Emit;
    use crate::mapper::ClientMapper;

    const MODEL: &str = r#"{
  "schemas": [
    { "name": "Pagination", "type": "object", "properties": [0, 1] },
    { "name": "int32", "type": "scalar", "scalar": "integer" },
    { "name": "string", "type": "scalar", "scalar": "string" },
    { "name": "ApiVersion", "type": "constant", "value": "2024-01-01", "valueType": 2 }
  ],
  "properties": [
    { "name": "top", "serializedName": "top", "schema": 1 },
    { "name": "skip", "serializedName": "skip", "schema": 1 }
  ],
  "parameters": [
    { "name": "filter", "serializedName": "filter", "schema": 2,
      "protocol": { "http": { "in": "query" } } },
    { "name": "top", "serializedName": "top", "schema": 1, "groupedBy": 3,
      "protocol": { "http": { "in": "query" } } },
    { "name": "apiVersion", "serializedName": "api-version", "schema": 3, "required": true,
      "protocol": { "http": { "in": "query" } } },
    { "name": "pagination", "serializedName": "pagination", "schema": 0 },
    { "name": "skip", "serializedName": "skip", "schema": 1, "groupedBy": 3,
      "protocol": { "http": { "in": "query" } } }
  ],
  "operations": [
    { "name": "listUsers", "requests": [{
        "parameters": [0, 1, 2, 4],
        "protocol": { "http": { "method": "get", "path": "/users" } } }] },
    { "name": "listAdmins", "requests": [{
        "parameters": [0, 1, 2, 4],
        "signatureParameters": [3, 0] }] }
  ]
}"#;

    fn model() -> CodeModel {
        CodeModel::from_json(MODEL).unwrap()
    }

    fn names(method: &ClientMethod) -> Vec<&str> {
        method.parameters.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_convenience_signature_groups_parameters() {
        let model = model();
        let mapper = ClientMapper::new(&model);
        let op = model.operation("listUsers").unwrap();
        let method =
            build_client_method(&model, &mapper, op, &op.requests[0], MethodKind::Convenience)
                .unwrap();

        assert_eq!(names(&method), ["filter", "pagination"]);
        assert_eq!(method.content_type, "application/json");
        let outs: Vec<_> = method
            .transformations
            .iter()
            .map(|t| t.out_parameter().name.as_str())
            .collect();
        assert_eq!(outs, ["top", "skip"]);
        assert_eq!(
            method.emit(),
            "listUsers(filter?: string, pagination?: Pagination)  // GET /users (application/json)\n  \
             top?: number\n    top <- pagination.top\n  \
             skip?: number\n    skip <- pagination.skip"
        );
    }

    #[test]
    fn test_protocol_signature_uses_wire_parameters() {
        let model = model();
        let mapper = ClientMapper::new(&model);
        let op = model.operation("listUsers").unwrap();
        let method =
            build_client_method(&model, &mapper, op, &op.requests[0], MethodKind::Protocol)
                .unwrap();

        assert_eq!(names(&method), ["filter", "top", "skip"]);
        assert!(method.transformations.is_empty());
    }

    #[test]
    fn test_declared_signature_wins() {
        let model = model();
        let mapper = ClientMapper::new(&model);
        let op = model.operation("listAdmins").unwrap();
        let method =
            build_client_method(&model, &mapper, op, &op.requests[0], MethodKind::Convenience)
                .unwrap();
        assert_eq!(names(&method), ["pagination", "filter"]);
        assert_eq!(method.http_method, None);
    }

    #[test]
    fn test_build_operation_methods_honors_options() {
        let model = model();
        let mapper = ClientMapper::new(&model);

        let all = build_operation_methods(&model, &mapper, &GeneratorOptions::default()).unwrap();
        assert_eq!(all.len(), 2);

        let options = GeneratorOptions {
            protocol_methods: true,
            operations: Some(vec!["listAdmins".into()]),
            ..GeneratorOptions::default()
        };
        let selected = build_operation_methods(&model, &mapper, &options).unwrap();
        let kinds: Vec<_> = selected.iter().map(|m| (m.name.as_str(), m.kind)).collect();
        assert_eq!(
            kinds,
            [
                ("listAdmins", MethodKind::Convenience),
                ("listAdmins", MethodKind::Protocol)
            ]
        );
    }

    #[test]
    fn test_request_outside_model_is_rejected() {
        let model = model();
        let mapper = ClientMapper::new(&model);
        let op = model.operation("listAdmins").unwrap();
        let mut request = op.requests[0].clone();
        request.signature_parameters.push(ParameterId(9));

        let err = build_client_method(&model, &mapper, op, &request, MethodKind::Convenience)
            .unwrap_err();
        assert!(matches!(err, TransformError::Request(_)), "{err}");
        assert!(err.to_string().contains("signatureParameters"), "{err}");
    }
}
