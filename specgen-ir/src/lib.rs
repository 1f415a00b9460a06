//! Intermediate representation types for the specgen code generator.
//!
//! This crate provides the version-agnostic model that every plugin reads.
//! Swagger 2.0, OpenAPI 3.0 and OpenAPI 3.1 documents all normalize into
//! the same [`IrContext`].
//!
//! # Architecture
//!
//! ```text
//! document (JSON/YAML) → specgen-input (Document) → normalizer → IrContext → plugins
//! ```
//!
//! Every entity in the IR is addressed by a [`Selector`]; references
//! between schemas are [`SchemaKind::Ref`] nodes holding the target's
//! selector, never raw document pointers.

mod context;
mod operation;
mod schema;
mod security;

pub use context::{IrContext, IrMeta, IrSchemaEntry, IrServer, IrServerVariable};
pub use operation::{
    HttpMethod, IrOperation, IrPagination, IrParameter, IrRequestBody, IrResponse,
    PaginationLocation, ParameterLocation, ResponseKind,
};
pub use schema::{AdditionalProperties, IrDiscriminator, IrProperty, IrSchema, SchemaKind};
pub use security::{ApiKeyLocation, IrSecurityRequirement, IrSecurityScheme, SecuritySchemeKind};
pub use specgen_core::Selector;
