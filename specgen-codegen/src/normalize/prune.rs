//! Removal of entities that depend on omitted ones.

use specgen_core::Selector;
use specgen_ir::IrContext;
use tracing::warn;

use super::PHASE;
use crate::{Diagnostic, DiagnosticKind};

/// Remove every entity referencing a selector missing from `ir`, repeating
/// until nothing changes. Each removal is reported with the dependency that
/// caused it.
pub(super) fn prune(ir: &mut IrContext, diagnostics: &mut Vec<Diagnostic>) {
    loop {
        let mut omitted: Vec<(Selector, Selector)> = Vec::new();
        let schemas = ir
            .schemas
            .iter()
            .map(|(selector, entry)| (selector, entry.schema.references()));
        let parameters = ir
            .parameters
            .iter()
            .map(|(selector, parameter)| (selector, parameter.schema.references()));
        let operations = ir
            .operations
            .iter()
            .map(|(selector, operation)| (selector, operation.references()));

        for (selector, references) in schemas.chain(parameters).chain(operations) {
            if let Some(missing) = references.into_iter().find(|r| !ir.contains(r)) {
                omitted.push((selector.clone(), missing.clone()));
            }
        }
        if omitted.is_empty() {
            return;
        }

        for (selector, missing) in omitted {
            warn!(%selector, %missing, "omitting entity with missing dependency");
            ir.schemas.shift_remove(&selector);
            ir.parameters.shift_remove(&selector);
            ir.operations.shift_remove(&selector);
            diagnostics.push(
                Diagnostic::warning(
                    PHASE,
                    DiagnosticKind::OmittedEntity,
                    format!("omitting '{selector}': depends on missing '{missing}'"),
                )
                .with_selector(selector),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use specgen_ir::{IrSchema, IrSchemaEntry, SchemaKind};

    use super::*;

    fn entry(name: &str, schema: IrSchema) -> (Selector, IrSchemaEntry) {
        let selector = Selector::reference(name);
        (
            selector.clone(),
            IrSchemaEntry {
                selector,
                name: name.to_string(),
                pointer: None,
                schema,
            },
        )
    }

    #[test]
    fn test_prune_is_transitive() {
        let schemas: IndexMap<_, _> = [
            entry("A", IrSchema::reference(Selector::reference("Missing"))),
            entry("B", IrSchema::reference(Selector::reference("A"))),
            entry("C", IrSchema::reference(Selector::reference("B"))),
            entry("D", IrSchema::new(SchemaKind::String)),
        ]
        .into_iter()
        .collect();
        let mut ir = IrContext {
            schemas,
            ..IrContext::default()
        };
        let mut diagnostics = Vec::new();

        prune(&mut ir, &mut diagnostics);

        let left: Vec<_> = ir.schemas.keys().map(|s| s.key().to_string()).collect();
        assert_eq!(left, vec!["D"]);
        assert_eq!(diagnostics.len(), 3);
        assert!(diagnostics[0].message.contains("ref:Missing"));
        assert!(
            diagnostics
                .iter()
                .all(|d| d.kind == DiagnosticKind::OmittedEntity)
        );
    }

    #[test]
    fn test_prune_keeps_cycles() {
        let schemas: IndexMap<_, _> = [
            entry("Node", IrSchema::reference(Selector::reference("Edge"))),
            entry("Edge", IrSchema::reference(Selector::reference("Node"))),
        ]
        .into_iter()
        .collect();
        let mut ir = IrContext {
            schemas,
            ..IrContext::default()
        };
        let mut diagnostics = Vec::new();

        prune(&mut ir, &mut diagnostics);

        assert_eq!(ir.schemas.len(), 2);
        assert!(diagnostics.is_empty());
    }
}
