//! Line-oriented text building for backends.
//!
//! [`CodeBuilder`] tracks a nesting level and writes each line with the
//! matching [`Indent`] prefix. Blank lines are never indented.

mod code_builder;
mod indent;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
