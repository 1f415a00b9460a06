//! TypeScript syntax builders for imports, type aliases, constants and
//! functions.
//!
//! These provide a high-level API for constructing TypeScript syntax,
//! which is then rendered via [`CodeBuilder`](specgen_codegen::builder::CodeBuilder).

mod consts;
mod fns;
mod imports;
mod types;

pub use consts::Const;
pub use fns::{ArrowFn, Param};
pub use imports::Import;
pub use types::TypeAlias;
