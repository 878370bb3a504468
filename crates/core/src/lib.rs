//! Client method planning for API client generators.
//!
//! Given a validated [`CodeModel`](clientgen_codemodel::CodeModel), this crate
//! works out, per operation:
//! - the argument list of the generated client method, and
//! - the transformations that rebuild the wire request from those arguments
//!   when parameters are grouped into composite arguments or spread into
//!   scalar ones.
//!
//! The pipeline is:
//! 1. Map: wire parameters and schemas -> SDK-facing descriptions ([`TypeMapper`])
//! 2. Register: grouped/spread parameters -> [`MethodParameterTransformer`]
//! 3. Process: registrations + request -> ordered [`ParameterTransformation`]s
//! 4. Emit: [`ClientMethod`] -> text (via the [`Emit`] trait) or JSON (serde)

#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

mod client;
mod emit;
mod error;
mod mapper;
mod method;
mod options;
mod transformer;
mod utils;

pub use client::{
    ClientMethod, ClientMethodParameter, ClientModel, ClientModelProperty, ClientType, MethodKind,
};
pub use emit::Emit;
pub use error::TransformError;
pub use mapper::{ClientMapper, TypeMapper};
pub use method::{build_client_method, build_operation_methods};
pub use options::{ConfigError, GeneratorOptions};
pub use transformer::{
    Mapping, MappingInput, MappingOutput, MethodParameterTransformer, ParameterTransformation,
};
