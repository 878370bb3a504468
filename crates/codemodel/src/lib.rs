//! Wire-level code model consumed by the clientgen planner.
//!
//! The model is a set of read-only tables (schemas, properties, parameters,
//! operations). Relations between entries such as `groupedBy` or
//! `originalParameter` are ids into those tables, never references, so the
//! whole graph can be shared freely while the planner walks it.
//!
//! A [`CodeModel`] can only be obtained through [`CodeModel::from_json`] or
//! [`CodeModel::from_path`], both of which validate every id.

#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

mod error;
mod model;
mod parameter;
mod request;
mod schema;

pub use error::CodeModelError;
pub use model::{CodeModel, ParameterId, PropertyId, SchemaId};
pub use parameter::{HttpParameter, Parameter, ParameterLocation, Protocols};
pub use request::{
    CONTENT_TYPE_APPLICATION_JSON, CONTENT_TYPE_APPLICATION_JSON_PATCH, HttpMethod, HttpRequest,
    KnownMediaType, Operation, Request,
};
pub use schema::{Property, ScalarType, Schema, SchemaKind};
