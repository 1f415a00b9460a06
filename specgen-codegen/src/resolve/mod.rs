//! Reference resolution.
//!
//! The [`Resolver`] turns `$ref` strings into [`Selector`]s and tracks which
//! selectors are currently being expanded. A reference back to a selector
//! that is still in progress (a self- or mutually-recursive schema) returns
//! the selector immediately instead of recursing; the selector acts as the
//! placeholder until the outer expansion binds its value.

mod pointer;

use std::collections::HashMap;

pub use pointer::JsonPointer;
use serde_json::Value;
use specgen_core::Selector;
use specgen_input::SpecVersion;
use tracing::debug;

/// Maximum `$ref` hops followed for component objects (parameters,
/// responses, request bodies) before giving up.
const MAX_REF_HOPS: usize = 32;

/// A reference that points to nothing reachable inside the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    /// The offending `$ref` string as written.
    pub pointer: String,
    /// Where the reference occurs (a JSON pointer into the document).
    pub location: String,
}

impl Unresolved {
    pub fn new(pointer: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
            location: location.into(),
        }
    }
}

/// A successfully resolved reference.
#[derive(Debug, Clone)]
pub struct Resolved<'a> {
    pub selector: Selector,
    pub pointer: JsonPointer,
    pub target: &'a Value,
}

/// Expansion state of a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveState {
    InProgress,
    Done,
    Failed,
}

/// Outcome of [`Resolver::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// First visit: the caller must expand the selector and call
    /// [`Resolver::finish`].
    Expand,
    /// The selector is on the expansion stack; use it as a placeholder.
    Cycle,
    /// Already expanded (successfully or not).
    Visited(ResolveState),
}

/// Resolves references against one document and tracks expansion state.
#[derive(Debug)]
pub struct Resolver<'a> {
    root: &'a Value,
    version: SpecVersion,
    states: HashMap<Selector, ResolveState>,
    stack: Vec<Selector>,
}

impl<'a> Resolver<'a> {
    pub fn new(root: &'a Value, version: SpecVersion) -> Self {
        Self {
            root,
            version,
            states: HashMap::new(),
            stack: Vec::new(),
        }
    }

    pub fn version(&self) -> SpecVersion {
        self.version
    }

    /// Resolve a `$ref` occurring at `location`.
    pub fn resolve(&self, reference: &str, location: &str) -> Result<Resolved<'a>, Unresolved> {
        let pointer = JsonPointer::parse(reference, self.version)
            .ok_or_else(|| Unresolved::new(reference, location))?;
        let target = pointer
            .lookup(self.root)
            .ok_or_else(|| Unresolved::new(reference, location))?;
        Ok(Resolved {
            selector: pointer.selector(),
            pointer,
            target,
        })
    }

    /// Follow a chain of `$ref`s on a component object until a concrete
    /// object is reached.
    ///
    /// Returns the object and the pointer of the first hop, if any.
    pub fn follow(
        &self,
        value: &'a Value,
        location: &str,
    ) -> Result<(&'a Value, Option<JsonPointer>), Unresolved> {
        let mut current = value;
        let mut first = None;
        for _ in 0..MAX_REF_HOPS {
            let Some(reference) = current.get("$ref").and_then(Value::as_str) else {
                return Ok((current, first));
            };
            let resolved = self.resolve(reference, location)?;
            if first.is_none() {
                first = Some(resolved.pointer);
            }
            current = resolved.target;
        }
        let reference = value.get("$ref").and_then(Value::as_str).unwrap_or_default();
        Err(Unresolved::new(reference, location))
    }

    /// Start expanding `selector`.
    pub fn begin(&mut self, selector: &Selector) -> Visit {
        match self.states.get(selector) {
            None => {
                self.states.insert(selector.clone(), ResolveState::InProgress);
                self.stack.push(selector.clone());
                Visit::Expand
            }
            Some(ResolveState::InProgress) => {
                debug!(%selector, depth = self.stack.len(), "cyclic reference, using placeholder");
                Visit::Cycle
            }
            Some(state) => Visit::Visited(*state),
        }
    }

    /// Finish expanding `selector`.
    pub fn finish(&mut self, selector: &Selector, ok: bool) {
        let state = if ok {
            ResolveState::Done
        } else {
            ResolveState::Failed
        };
        self.states.insert(selector.clone(), state);
        if let Some(pos) = self.stack.iter().rposition(|s| s == selector) {
            self.stack.remove(pos);
        }
    }

    pub fn state(&self, selector: &Selector) -> Option<ResolveState> {
        self.states.get(selector).copied()
    }

    /// Selectors currently being expanded, outermost first.
    pub fn in_progress(&self) -> &[Selector] {
        &self.stack
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_resolve_named_schema() {
        let root = json!({"components": {"schemas": {"Pet": {"type": "object"}}}});
        let resolver = Resolver::new(&root, SpecVersion::V3_0);

        let resolved = resolver
            .resolve("#/components/schemas/Pet", "#/paths")
            .unwrap();
        assert_eq!(resolved.selector, Selector::reference("Pet"));
        assert_eq!(resolved.target, &json!({"type": "object"}));
    }

    #[test]
    fn test_unresolved_carries_pointer_and_location() {
        let root = json!({"definitions": {}});
        let resolver = Resolver::new(&root, SpecVersion::V2);

        let err = resolver
            .resolve("#/definitions/Missing", "#/definitions/Pet/properties/owner")
            .unwrap_err();
        assert_eq!(err.pointer, "#/definitions/Missing");
        assert_eq!(err.location, "#/definitions/Pet/properties/owner");

        let err = resolver.resolve("common.yaml#/Pet", "#/x").unwrap_err();
        assert_eq!(err.pointer, "common.yaml#/Pet");
    }

    #[test]
    fn test_begin_detects_cycles() {
        let root = json!({});
        let mut resolver = Resolver::new(&root, SpecVersion::V3_1);
        let a = Selector::reference("A");
        let b = Selector::reference("B");

        assert_eq!(resolver.begin(&a), Visit::Expand);
        assert_eq!(resolver.begin(&b), Visit::Expand);
        assert_eq!(resolver.begin(&a), Visit::Cycle);
        assert_eq!(resolver.in_progress(), &[a.clone(), b.clone()]);

        resolver.finish(&b, true);
        resolver.finish(&a, false);
        assert_eq!(resolver.begin(&b), Visit::Visited(ResolveState::Done));
        assert_eq!(resolver.begin(&a), Visit::Visited(ResolveState::Failed));
        assert!(resolver.in_progress().is_empty());
    }

    #[test]
    fn test_follow_component_chain() {
        let root = json!({
            "components": {
                "parameters": {
                    "Limit": {"$ref": "#/components/parameters/RealLimit"},
                    "RealLimit": {"name": "limit", "in": "query"}
                }
            }
        });
        let resolver = Resolver::new(&root, SpecVersion::V3_0);
        let param = json!({"$ref": "#/components/parameters/Limit"});

        let (target, first) = resolver.follow(&param, "#/paths").unwrap();
        assert_eq!(target["name"], "limit");
        assert_eq!(first.unwrap().selector(), Selector::parameter("Limit"));
    }

    #[test]
    fn test_follow_gives_up_on_ref_loops() {
        let root = json!({
            "components": {"responses": {"A": {"$ref": "#/components/responses/A"}}}
        });
        let resolver = Resolver::new(&root, SpecVersion::V3_0);
        let response = json!({"$ref": "#/components/responses/A"});

        assert!(resolver.follow(&response, "#/paths").is_err());
    }
}
