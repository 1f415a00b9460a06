//! Core utilities and types for the specgen code generator.
//!
//! This crate provides the leaf building blocks shared by every other
//! specgen crate: the [`BiMap`] used for 1:1 lookups, the [`Selector`]
//! identity used to address spec entities, and identifier helpers.

mod bimap;
mod selector;
mod utils;

pub use bimap::BiMap;
pub use selector::{CustomKind, ReservedSelectorKind, Selector, SelectorKind};
pub use utils::{ensure_valid_identifier, to_camel_case, to_pascal_case};
