//! Selector identities for spec entities.

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// The first element of a [`Selector`], partitioning the selector namespace.
///
/// `Ref`, `Operation`, `Parameter` and `Inline` are minted by the normalizer.
/// Plugins mint their own kinds through [`SelectorKind::custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SelectorKind {
    /// A named schema (`#/components/schemas/X`, `#/definitions/X`).
    Ref,
    /// An operation, keyed by operation id.
    Operation,
    /// A reusable parameter (`#/components/parameters/X`).
    Parameter,
    /// An anonymous schema, keyed by the context path it occurs at.
    Inline,
    /// A plugin-defined kind.
    Custom(CustomKind),
}

/// Name of a plugin-defined selector kind.
///
/// Only [`SelectorKind::custom`] builds one, so a custom kind never spells a
/// reserved kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomKind(String);

impl CustomKind {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Error returned when a plugin tries to mint a reserved selector kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("selector kind '{0}' is reserved")]
pub struct ReservedSelectorKind(pub String);

impl SelectorKind {
    /// Kinds owned by the normalizer.
    pub const RESERVED: [&'static str; 4] = ["ref", "operation", "parameter", "inline"];

    /// Create a plugin-defined kind.
    ///
    /// Fails if `name` is empty or spells one of the reserved kinds.
    pub fn custom(name: impl Into<String>) -> Result<Self, ReservedSelectorKind> {
        let name = name.into();
        if name.is_empty() || Self::RESERVED.contains(&name.as_str()) {
            return Err(ReservedSelectorKind(name));
        }
        Ok(Self::Custom(CustomKind(name)))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Ref => "ref",
            Self::Operation => "operation",
            Self::Parameter => "parameter",
            Self::Inline => "inline",
            Self::Custom(name) => name.as_str(),
        }
    }

    /// Returns true for kinds minted by the normalizer.
    pub fn is_reserved(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stable semantic key identifying one logical spec entity.
///
/// Two selectors are equal iff their kind and key are equal. Selectors
/// order by kind first, then key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Selector {
    kind: SelectorKind,
    key: String,
}

impl Selector {
    pub fn new(kind: SelectorKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
        }
    }

    /// `("ref", name)`
    pub fn reference(name: impl Into<String>) -> Self {
        Self::new(SelectorKind::Ref, name)
    }

    /// `("operation", id)`
    pub fn operation(id: impl Into<String>) -> Self {
        Self::new(SelectorKind::Operation, id)
    }

    /// `("parameter", name)`
    pub fn parameter(name: impl Into<String>) -> Self {
        Self::new(SelectorKind::Parameter, name)
    }

    /// `("inline", context path)`
    pub fn inline(path: impl Into<String>) -> Self {
        Self::new(SelectorKind::Inline, path)
    }

    pub fn kind(&self) -> &SelectorKind {
        &self.kind
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.key)
    }
}

// Serialized as "kind:key" so selectors can key JSON objects.
impl Serialize for Selector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_kind_and_key() {
        assert_eq!(Selector::reference("Pet"), Selector::reference("Pet"));
        assert_ne!(Selector::reference("Pet"), Selector::operation("Pet"));
        assert_ne!(Selector::reference("Pet"), Selector::reference("pet"));
    }

    #[test]
    fn test_custom_kind_rejects_reserved() {
        for reserved in SelectorKind::RESERVED {
            assert_eq!(
                SelectorKind::custom(reserved),
                Err(ReservedSelectorKind(reserved.to_string()))
            );
        }
        assert!(SelectorKind::custom("").is_err());

        let kind = SelectorKind::custom("query-key").unwrap();
        assert_eq!(kind.as_str(), "query-key");
        assert!(!kind.is_reserved());
    }

    #[test]
    fn test_custom_kind_never_displays_as_reserved() {
        let SelectorKind::Custom(name) = SelectorKind::custom("query-key").unwrap() else {
            panic!("expected a custom kind");
        };
        assert_eq!(name.as_str(), "query-key");

        let custom = Selector::new(SelectorKind::Custom(name), "Pet");
        assert_ne!(custom, Selector::reference("Pet"));
        assert_eq!(custom.to_string(), "query-key:Pet");
    }

    #[test]
    fn test_display() {
        assert_eq!(Selector::reference("Pet").to_string(), "ref:Pet");
        assert_eq!(Selector::operation("listPets").to_string(), "operation:listPets");
        let custom = Selector::new(SelectorKind::custom("query-key").unwrap(), "listPets");
        assert_eq!(custom.to_string(), "query-key:listPets");
    }

    #[test]
    fn test_serialize_as_string() {
        let json = serde_json::to_string(&Selector::inline("operation/listPets/request")).unwrap();
        assert_eq!(json, "\"inline:operation/listPets/request\"");
    }

    #[test]
    fn test_ordering_is_kind_then_key() {
        let mut selectors = vec![
            Selector::operation("a"),
            Selector::reference("b"),
            Selector::reference("a"),
        ];
        selectors.sort();
        assert_eq!(
            selectors,
            vec![
                Selector::reference("a"),
                Selector::reference("b"),
                Selector::operation("a"),
            ]
        );
    }
}
