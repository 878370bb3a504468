//! Planner errors.
//!
//! Every variant points at an inconsistency upstream: in the code model, or
//! in a request or id handed in by the caller. None of them is retryable.

use clientgen_codemodel::{CodeModelError, ParameterId};

/// Fatal failure while planning a client method.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// No property of the grouping model matches a grouped parameter.
    #[error(
        "operation '{operation}': grouping model '{model}' has no property matching parameter '{parameter}' by name or serialized name"
    )]
    GroupPropertyNotFound {
        /// Operation being planned.
        operation: String,
        /// Grouped parameter.
        parameter: String,
        /// Grouping model searched.
        model: String,
    },

    /// A parameter is grouped by a parameter whose schema is not an object.
    #[error(
        "operation '{operation}': parameter '{parameter}' is grouped by '{group}' whose schema '{schema}' is not an object schema"
    )]
    GroupNotObject {
        /// Operation being planned.
        operation: String,
        /// Grouped parameter.
        parameter: String,
        /// Grouping parameter.
        group: String,
        /// Schema of the grouping parameter.
        schema: String,
    },

    /// A spread parameter does not say which property it fills.
    #[error(
        "operation '{operation}': parameter '{parameter}' is spread from '{original}' but has no target property"
    )]
    MissingTargetProperty {
        /// Operation being planned.
        operation: String,
        /// Spread parameter.
        parameter: String,
        /// Parameter it was spread from.
        original: String,
    },

    /// A registered parameter id is not in the code model.
    #[error("operation '{operation}': {parameter} is not in the code model")]
    UnknownParameter {
        /// Operation being planned.
        operation: String,
        /// Offending id.
        parameter: ParameterId,
    },

    /// The request refers to parameters outside the code model.
    #[error(transparent)]
    Request(#[from] CodeModelError),

    /// A non-object schema was mapped as a model.
    #[error("schema '{schema}' is not an object schema and has no model")]
    NotAnObject {
        /// Offending schema.
        schema: String,
    },
}
