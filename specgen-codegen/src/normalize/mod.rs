//! Spec normalization (IR building).
//!
//! [`normalize`] turns a version-tagged [`Document`] into the version-agnostic
//! [`IrContext`]. The version tag is matched exactly once here: Swagger 2.0
//! documents go through [`swagger`], OpenAPI 3.x documents through
//! [`openapi`]. Both drive the shared [`Normalizer`], which owns the
//! reference resolver, the schema converter and the hoisting of anonymous
//! schemas.
//!
//! Every schema conversion is a pure function of the input JSON: the
//! document tree is never modified.

mod dialect;
mod openapi;
mod operation;
mod prune;
mod schema;
mod swagger;

use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use specgen_core::{Selector, SelectorKind, to_pascal_case};
use specgen_input::{Document, ParserConfig, SpecVersion};
use specgen_ir::{
    IrContext, IrMeta, IrOperation, IrParameter, IrSchemaEntry, IrSecurityRequirement,
    IrSecurityScheme, IrServer,
};
use tracing::{debug, info, warn};

use self::dialect::Dialect;
use crate::{
    Diagnostic, DiagnosticKind,
    resolve::{Resolver, Unresolved, Visit},
};

const PHASE: &str = "normalize";

/// The result of normalization: the IR plus every recoverable problem found.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub ir: IrContext,
    pub diagnostics: Vec<Diagnostic>,
}

/// Normalize a document into the IR.
///
/// Unresolvable references never fail the call: the entity containing them
/// is omitted and reported, and so is everything depending on it.
pub fn normalize(document: &Document, config: &ParserConfig) -> Normalized {
    info!(version = %document.version(), "normalizing document");
    let mut normalizer = Normalizer::new(document, config);
    match document.version() {
        SpecVersion::V2 => swagger::normalize(&mut normalizer),
        SpecVersion::V3_0 | SpecVersion::V3_1 => openapi::normalize(&mut normalizer),
    }
    normalizer.finish()
}

/// Naming context for anonymous schemas: the context path key and the
/// name hint of the entity that owns them.
///
/// Keys start from a root that says what kind of entity owns the schema
/// (`schema/Pet`, `operation/listPets`, or a document pointer), and every
/// segment after the root is escaped like a JSON pointer token. Two
/// different positions in the document never share a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Owner {
    pub key: String,
    pub name: String,
}

impl Owner {
    fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }

    /// Root for the anonymous parts of the named component schema `name`.
    pub fn schema(name: &str, hint: impl Into<String>) -> Self {
        Self::new(format!("schema/{}", escape(name)), hint)
    }

    /// Root for a schema reached through an in-document pointer. The
    /// canonical pointer is already escaped.
    pub fn pointer(pointer: &str, hint: impl Into<String>) -> Self {
        Self::new(pointer, hint)
    }

    /// Anonymous schema at `path` under operation `id`.
    pub fn operation(id: &str, path: &[&str], hint: impl Into<String>) -> Self {
        let mut key = format!("operation/{}", escape(id));
        for segment in path {
            key.push('/');
            key.push_str(&escape(segment));
        }
        Self::new(key, hint)
    }

    /// Owner of the inline schema of property `property`.
    pub fn property(&self, property: &str) -> Self {
        Self::new(
            format!("{}/{}", self.key, escape(property)),
            format!("{}{}", self.name, to_pascal_case(property)),
        )
    }

    /// Owner of the item schema of an array owned by `self`.
    pub fn items(&self) -> Self {
        Self::new(format!("{}/items", self.key), format!("{}Item", self.name))
    }

    pub fn selector(&self) -> Selector {
        Selector::inline(&self.key)
    }
}

fn escape(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Shared normalization state for one document.
pub(crate) struct Normalizer<'a> {
    root: &'a Value,
    raw_version: String,
    dialect: Dialect,
    config: &'a ParserConfig,
    resolver: Resolver<'a>,
    servers: Vec<IrServer>,
    security_schemes: IndexMap<String, IrSecurityScheme>,
    security: Vec<IrSecurityRequirement>,
    /// Schema slots. Named components are reserved up front so the IR
    /// keeps document order; `None` marks a slot whose expansion failed.
    schemas: IndexMap<Selector, Option<IrSchemaEntry>>,
    parameters: IndexMap<Selector, Option<IrParameter>>,
    operations: IndexMap<Selector, IrOperation>,
    /// Hoisted schemas of the entities being converted, innermost last.
    frames: Vec<Vec<IrSchemaEntry>>,
    operation_ids: HashSet<String>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Normalizer<'a> {
    fn new(document: &'a Document, config: &'a ParserConfig) -> Self {
        Self {
            root: document.root(),
            raw_version: document.raw_version().to_string(),
            dialect: Dialect::from(document.version()),
            config,
            resolver: Resolver::new(document.root(), document.version()),
            servers: Vec::new(),
            security_schemes: IndexMap::new(),
            security: Vec::new(),
            schemas: IndexMap::new(),
            parameters: IndexMap::new(),
            operations: IndexMap::new(),
            frames: Vec::new(),
            operation_ids: HashSet::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn root(&self) -> &'a Value {
        self.root
    }

    /// An object member of the document root.
    pub fn root_object(&self, key: &str) -> Option<&'a Map<String, Value>> {
        self.root.get(key).and_then(Value::as_object)
    }

    pub fn meta(&self) -> IrMeta {
        let info = self.root.get("info");
        let text = |key: &str| {
            info.and_then(|i| i.get(key))
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        IrMeta {
            title: text("title").unwrap_or_default(),
            version: text("version").unwrap_or_default(),
            description: text("description"),
            spec_version: self.raw_version.clone(),
        }
    }

    /// Reserve a slot for a named component schema.
    pub fn reserve_schema(&mut self, name: &str) {
        self.schemas.entry(Selector::reference(name)).or_insert(None);
    }

    /// Expand the schema behind `selector` unless it is expanded, failed, or
    /// currently being expanded further up the stack.
    pub fn ensure_schema(
        &mut self,
        selector: &Selector,
        name: &str,
        pointer: Option<String>,
        location: &str,
        target: &'a Value,
    ) {
        if self.resolver.begin(selector) != Visit::Expand {
            return;
        }
        self.schemas.entry(selector.clone()).or_insert(None);

        let owner = match selector.kind() {
            SelectorKind::Ref => Owner::schema(selector.key(), name),
            _ => Owner::pointer(selector.key(), name),
        };
        let result = self.with_entity(|n| n.convert_schema(target, Some(&owner), location));
        match result {
            Ok(schema) => {
                self.schemas.insert(
                    selector.clone(),
                    Some(IrSchemaEntry {
                        selector: selector.clone(),
                        name: name.to_string(),
                        pointer,
                        schema,
                    }),
                );
                self.resolver.finish(selector, true);
            }
            Err(unresolved) => {
                self.report_unresolved(selector, &unresolved);
                self.resolver.finish(selector, false);
            }
        }
    }

    /// Resolve a schema `$ref` and make sure its target is expanded.
    pub fn schema_reference(
        &mut self,
        reference: &str,
        location: &str,
    ) -> Result<Selector, Unresolved> {
        let resolved = self.resolver.resolve(reference, location)?;
        let selector = match resolved.selector.kind() {
            SelectorKind::Ref | SelectorKind::Inline => resolved.selector,
            _ => Selector::inline(resolved.pointer.canonical()),
        };
        let name = match selector.kind() {
            SelectorKind::Ref => selector.key().to_string(),
            _ => to_pascal_case(&resolved.pointer.name_hint()),
        };
        self.ensure_schema(
            &selector,
            &name,
            Some(resolved.pointer.canonical()),
            &resolved.pointer.document_path(),
            resolved.target,
        );
        Ok(selector)
    }

    /// Register an anonymous schema under its owner's context path.
    ///
    /// A path that is already taken by a different schema gets a `~N`
    /// suffix (never produced by escaping) and a `SelectorConflict` warning,
    /// so no entry is ever replaced.
    pub fn hoist(&mut self, owner: &Owner, schema: specgen_ir::IrSchema) -> Selector {
        let mut selector = owner.selector();
        if self.is_taken(&selector) {
            let taken = selector;
            selector = (2..)
                .map(|n| Selector::inline(format!("{}~{n}", owner.key)))
                .find(|candidate| !self.is_taken(candidate))
                .unwrap_or_else(|| taken.clone());
            warn!(%taken, %selector, "context path already taken");
            self.diagnostics.push(
                Diagnostic::warning(
                    PHASE,
                    DiagnosticKind::SelectorConflict,
                    format!("'{taken}' is already taken, registered as '{selector}'"),
                )
                .with_selector(selector.clone()),
            );
        }

        debug!(%selector, name = %owner.name, "hoisting anonymous schema");
        let entry = IrSchemaEntry {
            selector: selector.clone(),
            name: owner.name.clone(),
            pointer: None,
            schema,
        };
        match self.frames.last_mut() {
            Some(frame) => frame.push(entry),
            None => {
                self.schemas.insert(selector.clone(), Some(entry));
            }
        }
        selector
    }

    /// A schema converted so far, including ones hoisted by entities that
    /// are still being converted.
    pub fn converted_schema(&self, selector: &Selector) -> Option<&specgen_ir::IrSchema> {
        self.frames
            .iter()
            .rev()
            .flatten()
            .find(|entry| &entry.selector == selector)
            .or_else(|| self.schemas.get(selector).and_then(Option::as_ref))
            .map(|entry| &entry.schema)
    }

    /// Whether `selector` is committed, reserved, or hoisted by an entity
    /// still being converted.
    fn is_taken(&self, selector: &Selector) -> bool {
        self.schemas.contains_key(selector)
            || self
                .frames
                .iter()
                .flatten()
                .any(|entry| &entry.selector == selector)
    }

    /// Run `f` as the conversion of one top-level entity.
    ///
    /// Schemas hoisted while converting are committed only if `f` succeeds,
    /// so an omitted entity leaves nothing behind.
    pub fn with_entity<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, Unresolved>,
    ) -> Result<T, Unresolved> {
        self.frames.push(Vec::new());
        let result = f(self);
        let hoisted = self.frames.pop().unwrap_or_default();
        if result.is_ok() {
            for entry in hoisted {
                self.schemas.insert(entry.selector.clone(), Some(entry));
            }
        }
        result
    }

    pub fn report_unresolved(&mut self, entity: &Selector, unresolved: &Unresolved) {
        warn!(
            %entity,
            pointer = %unresolved.pointer,
            "unresolved reference, omitting entity"
        );
        self.diagnostics.push(
            Diagnostic::error(
                PHASE,
                DiagnosticKind::UnresolvedReference,
                format!(
                    "unresolved reference '{}', omitting '{}'",
                    unresolved.pointer, entity
                ),
            )
            .at(&unresolved.location)
            .with_selector(entity.clone()),
        );
    }

    /// Report a construct that is skipped instead of translated.
    pub fn unsupported(&mut self, location: &str, message: String) {
        warn!(%location, "{message}");
        self.diagnostics.push(
            Diagnostic::warning(PHASE, DiagnosticKind::Unsupported, message).at(location),
        );
    }

    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn finish(self) -> Normalized {
        let mut ir = IrContext {
            meta: self.meta(),
            schemas: self
                .schemas
                .into_iter()
                .filter_map(|(selector, entry)| entry.map(|e| (selector, e)))
                .collect(),
            parameters: self
                .parameters
                .into_iter()
                .filter_map(|(selector, p)| p.map(|p| (selector, p)))
                .collect(),
            operations: self.operations,
            servers: self.servers,
            security_schemes: self.security_schemes,
            security: self.security,
        };
        let mut diagnostics = self.diagnostics;
        prune::prune(&mut ir, &mut diagnostics);

        info!(
            schemas = ir.schemas.len(),
            operations = ir.operations.len(),
            diagnostics = diagnostics.len(),
            "normalized document"
        );
        Normalized { ir, diagnostics }
    }
}

/// Child JSON pointer of `location`.
pub(crate) fn child_location(location: &str, segment: &str) -> String {
    format!("{}/{}", location, escape(segment))
}

/// Parse a `security` requirement list, flattening alternatives in order.
pub(crate) fn security_requirements(value: &Value) -> Vec<IrSecurityRequirement> {
    value
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
        .flat_map(|requirement| {
            requirement.iter().map(|(scheme, scopes)| IrSecurityRequirement {
                scheme: scheme.clone(),
                scopes: scopes
                    .as_array()
                    .into_iter()
                    .flatten()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            })
        })
        .collect()
}

pub(crate) fn text(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

pub(crate) fn flag(map: &Map<String, Value>, key: &str) -> bool {
    map.get(key).and_then(Value::as_bool).unwrap_or(false)
}
