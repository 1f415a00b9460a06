//! The `query-keys` plugin: cache keys for read operations.
//!
//! Every `GET` operation gets `{op}QueryKey`, a function from the SDK
//! function's options to a readonly tuple. Paginated operations also get
//! `{op}InfiniteQueryKey`, whose key leaves out the pagination parameter.

use specgen_codegen::{FileId, Plugin, Registry, SymbolKind};
use specgen_core::{Selector, to_camel_case};
use specgen_input::PluginConfig;
use specgen_ir::{HttpMethod, IrContext, IrOperation, IrPagination};
use tracing::debug;

use super::{descriptor, find_symbol, output_path, selector, symbol_name};
use crate::{
    ast::{ArrowFn, Param},
    naming,
};

const DEFAULT_OUTPUT: &str = "query-keys.gen.ts";

#[derive(Debug, Clone, Copy, Default)]
pub struct QueryKeysPlugin;

impl Plugin for QueryKeysPlugin {
    fn name(&self) -> &str {
        "query-keys"
    }

    fn dependencies(&self) -> &[&str] {
        &["sdk"]
    }

    fn handle(
        &self,
        ir: &IrContext,
        registry: &mut Registry,
        config: &PluginConfig,
    ) -> eyre::Result<()> {
        let file = registry.ensure_file(output_path(config, DEFAULT_OUTPUT), descriptor());

        let mut keys = 0;
        for (operation_selector, operation) in &ir.operations {
            if operation.method != HttpMethod::Get {
                continue;
            }
            let Some(function) = find_symbol(registry, operation_selector) else {
                debug!(operation = %operation.id, "no sdk function, skipping query key");
                continue;
            };
            let function = registry.reference(file, function)?;
            let base = to_camel_case(&operation.id);

            let key = selector("query-key", &operation.id)?;
            declare_key(registry, file, &key, &format!("{base}QueryKey"), |name| {
                query_key(name, &function, operation, false)
            })?;
            keys += 1;

            if operation.pagination.is_some() {
                let key = selector("query-key", &format!("{}/infinite", operation.id))?;
                declare_key(
                    registry,
                    file,
                    &key,
                    &format!("{base}InfiniteQueryKey"),
                    |name| query_key(name, &function, operation, true),
                )?;
                keys += 1;
            }
        }

        debug!(keys, "declared query keys");
        Ok(())
    }
}

fn declare_key(
    registry: &mut Registry,
    file: FileId,
    key: &Selector,
    hint: &str,
    build: impl FnOnce(&str) -> String,
) -> eyre::Result<()> {
    let id = registry.ensure_symbol(file, key, &naming::safe_name(hint))?;
    registry.set_kind(id, SymbolKind::Value)?;
    let name = symbol_name(registry, id)?;
    registry.update_symbol(id, build(&name))?;
    Ok(())
}

fn query_key(name: &str, function: &str, operation: &IrOperation, infinite: bool) -> String {
    let id = naming::string_literal(&operation.id);
    let options = format!("Parameters<typeof {function}>[0]");

    let (ty, tuple) = match (&operation.pagination, infinite) {
        (Some(pagination), true) => (
            without_page_type(&options, pagination),
            format!(
                "[{id}, \"infinite\", {}] as const",
                without_page_value(pagination)
            ),
        ),
        _ => (options, format!("[{id}, options] as const")),
    };

    ArrowFn::new(name, tuple)
        .param(Param::new("options?").ty(ty))
        .build()
}

/// The SDK options type with the pagination field removed from its group.
fn without_page_type(options: &str, pagination: &IrPagination) -> String {
    let group = pagination.location.as_str();
    let field = naming::string_literal(&pagination.parameter);
    let options = format!("NonNullable<{options}>");
    format!(
        "Omit<{options}, \"{group}\"> & {{ {group}?: Omit<NonNullable<{options}[\"{group}\"]>, {field}> }}"
    )
}

/// `options` with the pagination field cleared, so every page of an
/// infinite query shares one key.
fn without_page_value(pagination: &IrPagination) -> String {
    let group = pagination.location.as_str();
    let field = naming::property_key(&pagination.parameter);
    format!("options && {{ ...options, {group}: {{ ...options.{group}, {field}: undefined }} }}")
}

#[cfg(test)]
mod tests {
    use specgen_ir::PaginationLocation;

    use super::*;

    fn operation(pagination: Option<IrPagination>) -> IrOperation {
        IrOperation {
            id: "listPets".to_string(),
            method: HttpMethod::Get,
            path: "/pets".to_string(),
            summary: None,
            description: None,
            deprecated: false,
            tags: Vec::new(),
            parameters: Vec::new(),
            request_body: None,
            responses: Vec::new(),
            security: None,
            pagination,
        }
    }

    #[test]
    fn test_query_key() {
        assert_eq!(
            query_key("listPetsQueryKey", "listPets", &operation(None), false),
            "export const listPetsQueryKey = (options?: Parameters<typeof listPets>[0]) =>\n  [\"listPets\", options] as const;\n"
        );
    }

    #[test]
    fn test_infinite_query_key_omits_cursor() {
        let pagination = IrPagination {
            parameter: "cursor".to_string(),
            location: PaginationLocation::Query,
        };
        let key = query_key(
            "listPetsInfiniteQueryKey",
            "listPets",
            &operation(Some(pagination)),
            true,
        );
        assert_eq!(
            key,
            "export const listPetsInfiniteQueryKey = (options?: \
             Omit<NonNullable<Parameters<typeof listPets>[0]>, \"query\"> & \
             { query?: Omit<NonNullable<NonNullable<Parameters<typeof listPets>[0]>[\"query\"]>, \"cursor\"> }) =>\n  \
             [\"listPets\", \"infinite\", options && { ...options, query: { ...options.query, cursor: undefined } }] as const;\n"
        );
    }

    #[test]
    fn test_infinite_query_key_for_body_pagination() {
        let pagination = IrPagination {
            parameter: "page-token".to_string(),
            location: PaginationLocation::Body,
        };
        let key = query_key("searchInfiniteQueryKey", "search", &operation(Some(pagination)), true);
        assert!(key.contains("Omit<NonNullable<Parameters<typeof search>[0]>, \"body\">"));
        assert!(key.contains("[\"body\"]>, \"page-token\"> }"));
        assert!(key.contains("{ ...options, body: { ...options.body, \"page-token\": undefined } }"));
    }
}
