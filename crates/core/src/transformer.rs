//! Client method parameter transformation.
//!
//! A client method's arguments do not always line up with the wire
//! parameters of the request behind it:
//!
//! - **Grouping.** Query parameters `pageNumber` and `pageSize` grouped by
//!   `pagination` surface as one `pagination: Pagination` argument. At call
//!   time each wire parameter is read back from a property of that argument.
//! - **Spreading.** For `op add(...User)` with `model User { name; age }` the
//!   method takes `name` and `age`, while the wire still expects one `User`
//!   body. At call time the body is assembled from those scalars.
//!
//! [`MethodParameterTransformer`] collects the (argument, wire parameter)
//! pairs that need either treatment and turns them into an ordered list of
//! [`ParameterTransformation`]s, one per wire parameter to rebuild.

use std::collections::{BTreeMap, HashSet};

use clientgen_codemodel::{CodeModel, ParameterId, Request};
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;
use tracing::{debug, trace};

use crate::client::{ClientMethodParameter, ClientModelProperty};
use crate::error::TransformError;
use crate::mapper::TypeMapper;

/// Recipe for rebuilding one wire-bound parameter from method arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterTransformation {
    out_parameter: ClientMethodParameter,
    mappings: Vec<Mapping>,
}

impl ParameterTransformation {
    fn new(out_parameter: ClientMethodParameter) -> Self {
        Self {
            out_parameter,
            mappings: Vec::new(),
        }
    }

    /// The wire-bound parameter this transformation produces.
    pub fn out_parameter(&self) -> &ClientMethodParameter {
        &self.out_parameter
    }

    /// Mappings in resolution order.
    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }
}

/// Where a mapped value is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingInput {
    /// Method argument read.
    pub parameter: ClientMethodParameter,
    /// Property of the argument's model, for grouped parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<ClientModelProperty>,
}

/// Where a mapped value is written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingOutput {
    /// Wire-bound parameter written.
    pub parameter: ClientMethodParameter,
    /// Property of the parameter's model, for spread parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<ClientModelProperty>,
    /// Display name of `property`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,
}

/// One value copied from a method argument to a wire parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mapping {
    /// Source.
    pub input: MappingInput,
    /// Destination.
    pub output: MappingOutput,
}

impl Mapping {
    /// Pass-through mapping of a parameter onto itself.
    fn direct(parameter: ClientMethodParameter) -> Self {
        Self {
            input: MappingInput {
                parameter: parameter.clone(),
                property: None,
            },
            output: MappingOutput {
                parameter,
                property: None,
                property_name: None,
            },
        }
    }

    /// Whether neither side goes through a model property.
    pub fn is_direct(&self) -> bool {
        self.input.property.is_none() && self.output.property.is_none()
    }
}

#[derive(Debug, Clone)]
struct Registration {
    client_parameter: ClientMethodParameter,
    parameter: ParameterId,
}

/// Collects grouped and spread parameters of one client method.
///
/// Create one per generated method, feed it with
/// [`add_parameter`](Self::add_parameter), then call
/// [`process`](Self::process) once.
#[derive(Debug)]
pub struct MethodParameterTransformer<'a> {
    model: &'a CodeModel,
    operation: String,
    is_protocol_method: bool,
    // Keyed by argument name; re-registering a name replaces the entry.
    parameters: BTreeMap<String, Registration>,
}

impl<'a> MethodParameterTransformer<'a> {
    /// Create a transformer for a method of `operation`.
    pub fn new(model: &'a CodeModel, operation: impl Into<String>, is_protocol_method: bool) -> Self {
        Self {
            model,
            operation: operation.into(),
            is_protocol_method,
            parameters: BTreeMap::new(),
        }
    }

    /// Offer a method argument and the wire parameter it was created from.
    ///
    /// Only grouped or spread parameters are kept. Constants and every
    /// parameter of a protocol method are ignored. A later registration under
    /// the same argument name replaces the earlier one. Fails if `parameter`
    /// is not in the code model.
    pub fn add_parameter(
        &mut self,
        client_parameter: ClientMethodParameter,
        parameter: ParameterId,
    ) -> Result<(), TransformError> {
        let raw = self
            .model
            .get_parameter(parameter)
            .ok_or_else(|| TransformError::UnknownParameter {
                operation: self.operation.clone(),
                parameter,
            })?;
        if self.is_protocol_method || self.model.schema(raw.schema).is_constant() {
            trace!(
                operation = %self.operation,
                parameter = %raw.name,
                protocol = self.is_protocol_method,
                "Skipping parameter transformation."
            );
            return Ok(());
        }
        if raw.grouped_by.is_none() && raw.original_parameter.is_none() {
            return Ok(());
        }
        trace!(
            operation = %self.operation,
            parameter = %raw.name,
            argument = %client_parameter.name,
            "Registered parameter for transformation."
        );
        self.parameters.insert(
            client_parameter.name.clone(),
            Registration {
                client_parameter,
                parameter,
            },
        );
        Ok(())
    }

    /// Number of registered parameters.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Whether nothing was registered.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Compute the transformations for `request`.
    ///
    /// Registrations are resolved in wire parameter order (position in the
    /// code model, then argument name), which does not depend on the order
    /// they were added in. Results are merged by output parameter name.
    /// Flattened wire parameters of the request that no
    /// registration spreads from are appended afterwards with a single direct
    /// mapping, so every flattened parameter is covered exactly once.
    ///
    /// Fails if `request` refers to parameters outside the code model.
    pub fn process(
        self,
        request: &Request,
        mapper: &impl TypeMapper,
    ) -> Result<Vec<ParameterTransformation>, TransformError> {
        self.model.check_request(&self.operation, request)?;
        if self.is_protocol_method {
            return Ok(Vec::new());
        }

        let mut transformations: IndexMap<String, ParameterTransformation> =
            IndexMap::with_capacity(self.parameters.len());

        for registration in self.ordered_registrations() {
            let output = self.resolve_output(registration, mapper)?;
            let input = self.resolve_input(registration, mapper)?;
            transformations
                .entry(output.parameter.name.clone())
                .or_insert_with(|| ParameterTransformation::new(output.parameter.clone()))
                .mappings
                .push(Mapping { input, output });
        }

        for id in self.flattened_parameters(request) {
            let out_parameter = mapper.map_parameter(id);
            if let Entry::Vacant(slot) = transformations.entry(out_parameter.name.clone()) {
                trace!(
                    operation = %self.operation,
                    parameter = %out_parameter.name,
                    "Covering flattened parameter with a direct mapping."
                );
                let mut transformation = ParameterTransformation::new(out_parameter.clone());
                transformation.mappings.push(Mapping::direct(out_parameter));
                slot.insert(transformation);
            }
        }

        debug!(
            operation = %self.operation,
            registered = self.parameters.len(),
            transformations = transformations.len(),
            "Computed parameter transformations."
        );
        Ok(transformations.into_values().collect())
    }

    fn ordered_registrations(&self) -> Vec<&Registration> {
        let mut registrations: Vec<&Registration> = self.parameters.values().collect();
        // Stable: ties on the wire parameter keep argument-name order.
        registrations.sort_by_key(|r| r.parameter);
        registrations
    }

    /// Output side: the spread-from parameter and the property to fill, or
    /// the argument itself.
    fn resolve_output(
        &self,
        registration: &Registration,
        mapper: &impl TypeMapper,
    ) -> Result<MappingOutput, TransformError> {
        let raw = self.model.parameter(registration.parameter);
        let Some(original) = raw.original_parameter else {
            return Ok(MappingOutput {
                parameter: registration.client_parameter.clone(),
                property: None,
                property_name: None,
            });
        };
        let target = raw
            .target_property
            .ok_or_else(|| TransformError::MissingTargetProperty {
                operation: self.operation.clone(),
                parameter: raw.name.clone(),
                original: self.model.parameter(original).name.clone(),
            })?;
        Ok(MappingOutput {
            parameter: mapper.map_parameter(original),
            property: Some(mapper.map_property(target)),
            property_name: Some(self.model.property(target).display_name().to_string()),
        })
    }

    /// Input side: the grouping argument and its property matching the
    /// parameter, or the argument itself.
    fn resolve_input(
        &self,
        registration: &Registration,
        mapper: &impl TypeMapper,
    ) -> Result<MappingInput, TransformError> {
        let raw = self.model.parameter(registration.parameter);
        let Some(group_id) = raw.grouped_by else {
            return Ok(MappingInput {
                parameter: registration.client_parameter.clone(),
                property: None,
            });
        };

        let group = self.model.parameter(group_id);
        let group_schema = self.model.schema(group.schema);
        if !group_schema.is_object() {
            return Err(TransformError::GroupNotObject {
                operation: self.operation.clone(),
                parameter: raw.name.clone(),
                group: group.name.clone(),
                schema: group_schema.name.clone(),
            });
        }
        let group_model = mapper.map_model(group.schema)?;

        // Reserved names get renamed differently on parameters and on
        // properties, so fall back to the serialized name.
        let name = raw.display_name();
        let property = match group_model.find_property(|p| p.name == name) {
            Some(property) => property,
            None => group_model
                .find_property(|p| p.serialized_name == raw.serialized_name)
                .ok_or_else(|| TransformError::GroupPropertyNotFound {
                    operation: self.operation.clone(),
                    parameter: name.to_string(),
                    model: group_model.name.clone(),
                })?,
        };

        Ok(MappingInput {
            parameter: mapper.map_parameter(group_id),
            property: Some(property.clone()),
        })
    }

    /// Flattened wire parameters of `request` not already rebuilt by a
    /// spread registration.
    fn flattened_parameters(&self, request: &Request) -> Vec<ParameterId> {
        let originals: HashSet<ParameterId> = self
            .parameters
            .values()
            .filter_map(|r| self.model.parameter(r.parameter).original_parameter)
            .collect();

        request
            .parameters
            .iter()
            .copied()
            .filter(|id| {
                let p = self.model.parameter(*id);
                // Constants are fixed on the wire and never transformed.
                p.flattened && p.http().is_some() && !self.model.schema(p.schema).is_constant()
            })
            .filter(|id| !originals.contains(id))
            .collect()
    }
}
