//! Code generation core for specgen.
//!
//! This crate turns a parsed API description into generated files:
//!
//! ```text
//! Document → normalize (resolver) → IrContext → Pipeline (plugins → Registry) → Renderer
//! ```
//!
//! # Module Organization
//!
//! - [`resolve`] - `$ref` to [`Selector`](specgen_core::Selector) resolution and cycle tracking
//! - [`normalize`] - version-specific documents to the version-agnostic IR
//! - [`registry`] - files and symbols shared by the plugins of one run
//! - [`pipeline`] - dependency-ordered plugin execution
//! - [`builder`] - text building blocks for backends
//!
//! Fatal conditions are [`Error`]s; recoverable ones are [`Diagnostic`]s
//! collected over the whole run.

pub mod builder;
mod diagnostic;
mod error;
mod generate;
pub mod normalize;
mod output;
pub mod pipeline;
pub mod registry;
mod render;
pub mod resolve;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use error::{Error, Result};
pub use generate::{GenerationOutput, generate};
pub use normalize::{Normalized, normalize};
pub use output::{OutputWriter, WriteResult, WriteStats};
pub use pipeline::{Pipeline, Plugin};
pub use registry::{File, FileDescriptor, FileId, Registry, Symbol, SymbolId, SymbolKind};
pub use render::{FileView, ImportView, RenderedFile, Renderer};
