//! The `types` plugin: one exported type per schema, plus parameter types.

use specgen_codegen::{FileId, Plugin, Registry, SymbolKind, builder::CodeBuilder};
use specgen_core::to_pascal_case;
use specgen_input::PluginConfig;
use specgen_ir::{IrContext, IrOperation, ParameterLocation};
use tracing::debug;

use super::{descriptor, output_path, selector, symbol_name};
use crate::{
    ast::TypeAlias,
    comments::{doc_comment, schema_doc},
    naming,
    type_mapper::TypeMapper,
};

const DEFAULT_OUTPUT: &str = "types.gen.ts";

/// Parameter groups in the order they appear in a `{Op}Params` type.
const LOCATIONS: [ParameterLocation; 4] = [
    ParameterLocation::Path,
    ParameterLocation::Query,
    ParameterLocation::Header,
    ParameterLocation::Cookie,
];

#[derive(Debug, Clone, Copy, Default)]
pub struct TypesPlugin;

impl Plugin for TypesPlugin {
    fn name(&self) -> &str {
        "types"
    }

    fn handle(
        &self,
        ir: &IrContext,
        registry: &mut Registry,
        config: &PluginConfig,
    ) -> eyre::Result<()> {
        let file = registry.ensure_file(output_path(config, DEFAULT_OUTPUT), descriptor());
        let mapper = TypeMapper::declaring(ir, file);

        for (selector, entry) in &ir.schemas {
            let name = mapper.reference(registry, selector)?;
            let ty = mapper.map(registry, &entry.schema, 0)?;
            let id = registry
                .lookup(file, selector)
                .ok_or_else(|| eyre::eyre!("type for '{selector}' was not declared"))?;
            let declaration = TypeAlias::new(name, ty).doc(schema_doc(&entry.schema));
            registry.update_symbol(id, declaration.build())?;
        }

        let mut params = 0;
        for operation in ir.operations.values() {
            if operation.parameters.is_empty() {
                continue;
            }
            declare_params(&mapper, registry, file, operation)?;
            params += 1;
        }

        debug!(schemas = ir.schemas.len(), params, "declared types");
        Ok(())
    }
}

/// Declare `{Op}Params`: one member per parameter location in use, each an
/// object of the parameters there. A group is required when any of its
/// parameters is.
fn declare_params(
    mapper: &TypeMapper<'_>,
    registry: &mut Registry,
    file: FileId,
    operation: &IrOperation,
) -> eyre::Result<()> {
    let key = selector("params", &operation.id)?;
    let hint = naming::safe_name(&format!("{}Params", to_pascal_case(&operation.id)));
    let id = registry.ensure_symbol(file, &key, &hint)?;
    registry.set_kind(id, SymbolKind::Type)?;

    let mut body = CodeBuilder::typescript().at_level(1);
    for location in LOCATIONS {
        let group: Vec<_> = operation.parameters_in(location).collect();
        if group.is_empty() {
            continue;
        }
        let optional = if group.iter().any(|p| p.required) {
            ""
        } else {
            "?"
        };
        body.push_line(&format!("{}{optional}: {{", location.as_str()));
        body.push_indent();
        for parameter in group {
            body.push_jsdoc(&doc_comment(
                None,
                parameter.description.as_deref(),
                parameter.deprecated,
            ));
            let ty = mapper.map(registry, &parameter.schema, 2)?;
            let optional = if parameter.required { "" } else { "?" };
            body.push_line(&format!(
                "{}{optional}: {ty};",
                naming::property_key(&parameter.name)
            ));
        }
        body.push_dedent();
        body.push_line("};");
    }

    let name = symbol_name(registry, id)?;
    let ty = format!("{{\n{}}}", body.build());
    registry.update_symbol(id, TypeAlias::new(name, ty).build())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use specgen_codegen::FileDescriptor;
    use specgen_ir::{HttpMethod, IrParameter, IrSchema, SchemaKind};

    use super::*;

    fn parameter(name: &str, location: ParameterLocation, kind: SchemaKind) -> IrParameter {
        IrParameter {
            name: name.to_string(),
            location,
            required: location == ParameterLocation::Path,
            deprecated: false,
            description: None,
            schema: IrSchema::new(kind),
            selector: None,
        }
    }

    #[test]
    fn test_params_type() {
        let mut limit = parameter("limit", ParameterLocation::Query, SchemaKind::Integer);
        limit.description = Some("Max items".to_string());
        let operation = IrOperation {
            id: "getPet".to_string(),
            method: HttpMethod::Get,
            path: "/pets/{petId}".to_string(),
            summary: None,
            description: None,
            deprecated: false,
            tags: Vec::new(),
            parameters: vec![
                parameter("petId", ParameterLocation::Path, SchemaKind::String),
                limit,
            ],
            request_body: None,
            responses: Vec::new(),
            security: None,
            pagination: None,
        };

        let ir = IrContext::default();
        let mut registry = Registry::new();
        let file = registry.ensure_file("types.gen.ts", FileDescriptor::new("typescript"));
        declare_params(&TypeMapper::declaring(&ir, file), &mut registry, file, &operation).unwrap();

        let id = registry.file(file).unwrap().symbols().next().unwrap();
        let symbol = registry.symbol(id).unwrap();
        assert_eq!(symbol.kind(), SymbolKind::Type);
        assert_eq!(
            symbol.value().unwrap(),
            "export type GetPetParams = {\n  path: {\n    petId: string;\n  };\n  query?: {\n    /** Max items */\n    limit?: number;\n  };\n};\n"
        );
    }
}
