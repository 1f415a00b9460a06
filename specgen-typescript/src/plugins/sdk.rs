//! The `sdk` plugin: one fetch-based function per operation.

use specgen_codegen::{FileId, Plugin, Registry, SymbolKind};
use specgen_core::{Selector, to_camel_case};
use specgen_input::PluginConfig;
use specgen_ir::{IrContext, IrOperation, IrSchema};
use tracing::debug;

use super::{descriptor, find_symbol, output_path, selector, symbol_name};
use crate::{
    ast::{ArrowFn, Const, Param},
    comments::doc_comment,
    naming,
    type_mapper::TypeMapper,
};

const DEFAULT_OUTPUT: &str = "sdk.gen.ts";

/// Shared request helper. `{{client}}` is replaced by the client's name.
const REQUEST_HELPER: &str = r#"const request = async <T>(
  method: string,
  url: string,
  options: {
    path?: Record<string, unknown>;
    query?: Record<string, unknown>;
    header?: Record<string, unknown>;
    body?: unknown;
  } = {},
  mediaType = "application/json",
): Promise<T> => {
  const path = url.replace(/\{([^}]+)\}/g, (_, key: string) =>
    encodeURIComponent(String(options.path?.[key])),
  );
  const search = new URLSearchParams();
  for (const [key, value] of Object.entries(options.query ?? {})) {
    if (value !== undefined) search.append(key, String(value));
  }
  const query = search.toString();
  const headers: Record<string, string> = { ...{{client}}.headers };
  for (const [key, value] of Object.entries(options.header ?? {})) {
    if (value !== undefined) headers[key] = String(value);
  }
  let body: BodyInit | undefined;
  if (options.body !== undefined) {
    if (mediaType === "multipart/form-data") {
      const form = new FormData();
      for (const [key, value] of Object.entries(options.body as Record<string, unknown>)) {
        if (value !== undefined) form.append(key, value instanceof Blob ? value : String(value));
      }
      body = form;
    } else if (mediaType === "application/x-www-form-urlencoded") {
      body = new URLSearchParams(options.body as Record<string, string>);
    } else {
      headers["Content-Type"] = mediaType;
      body = JSON.stringify(options.body);
    }
  }
  const response = await fetch(`${{{client}}.baseUrl}${path}${query ? `?${query}` : ""}`, {
    method,
    headers,
    body,
  });
  if (!response.ok) {
    throw new Error(`${method} ${path} failed with status ${response.status}`);
  }
  if (response.status === 204) {
    return undefined as T;
  }
  return (await response.json()) as T;
};"#;

#[derive(Debug, Clone, Copy, Default)]
pub struct SdkPlugin;

impl Plugin for SdkPlugin {
    fn name(&self) -> &str {
        "sdk"
    }

    fn dependencies(&self) -> &[&str] {
        &["types"]
    }

    fn handle(
        &self,
        ir: &IrContext,
        registry: &mut Registry,
        config: &PluginConfig,
    ) -> eyre::Result<()> {
        let file = registry.ensure_file(output_path(config, DEFAULT_OUTPUT), descriptor());

        // Declared first so operations can never take these names.
        let client = registry.ensure_symbol(file, &selector("client", "client")?, "client")?;
        let request = registry.ensure_symbol(file, &selector("client", "request")?, "request")?;
        let client_name = symbol_name(registry, client)?;
        let base_url = ir
            .servers
            .first()
            .map(|server| server.resolved_url())
            .unwrap_or_default();
        let client_value = format!(
            "{{\n  baseUrl: {},\n  headers: {{}} as Record<string, string>,\n}}",
            naming::string_literal(base_url.trim_end_matches('/'))
        );
        registry.update_symbol(client, Const::new(&client_name, client_value).build())?;
        registry.update_symbol(request, REQUEST_HELPER.replace("{{client}}", &client_name))?;

        let mapper = TypeMapper::importing(ir, file);
        let request_name = symbol_name(registry, request)?;
        for (operation_selector, operation) in &ir.operations {
            let id = registry.ensure_symbol(
                file,
                operation_selector,
                &naming::safe_name(&to_camel_case(&operation.id)),
            )?;
            let function = operation_function(&mapper, registry, file, &request_name, operation)?;
            let name = symbol_name(registry, id)?;
            registry.set_kind(id, SymbolKind::Value)?;
            registry.update_symbol(id, function.build_named(&name))?;
        }

        debug!(operations = ir.operations.len(), "declared sdk functions");
        Ok(())
    }
}

/// An SDK function without its name.
struct OperationFunction {
    doc: Vec<String>,
    options: Option<Param>,
    returns: String,
    call: String,
}

impl OperationFunction {
    fn build_named(self, name: &str) -> String {
        let mut function = ArrowFn::new(name, self.call)
            .doc(self.doc)
            .returns(format!("Promise<{}>", self.returns));
        if let Some(options) = self.options {
            function = function.param(options);
        }
        function.build()
    }
}

/// The options parameter is `{Op}Params` intersected with the body, and
/// optional when nothing inside it is required.
fn operation_function(
    mapper: &TypeMapper<'_>,
    registry: &mut Registry,
    file: FileId,
    request: &str,
    operation: &IrOperation,
) -> eyre::Result<OperationFunction> {
    let mut parts = Vec::new();
    let mut required = false;

    if !operation.parameters.is_empty()
        && let Some(params) = find_symbol(registry, &selector("params", &operation.id)?)
    {
        parts.push(registry.reference(file, params)?);
        required |= operation.parameters.iter().any(|p| p.required);
    }

    let mut media_type = None;
    if let Some(body) = &operation.request_body {
        let ty = schema_type(mapper, registry, &body.schema)?;
        let optional = if body.required { "" } else { "?" };
        parts.push(format!("{{ body{optional}: {ty} }}"));
        required |= body.required;
        if body.media_type != "application/json" {
            media_type = Some(body.media_type.clone());
        }
    }

    let returns = match operation.primary_response().and_then(|r| r.schema.as_ref()) {
        Some(schema) => schema_type(mapper, registry, schema)?,
        None => "void".to_string(),
    };

    let options = (!parts.is_empty()).then(|| {
        let param = Param::new("options").ty(parts.join(" & "));
        if required { param } else { param.default("{}") }
    });

    let mut arguments = vec![
        naming::string_literal(&operation.method.as_str().to_uppercase()),
        naming::string_literal(&operation.path),
    ];
    if options.is_some() {
        arguments.push("options".to_string());
    }
    if let Some(media_type) = media_type {
        arguments.push(naming::string_literal(&media_type));
    }

    Ok(OperationFunction {
        doc: doc_comment(
            operation.summary.as_deref(),
            operation.description.as_deref(),
            operation.deprecated,
        ),
        options,
        call: format!("{request}<{returns}>({})", arguments.join(", ")),
        returns,
    })
}

fn schema_type(
    mapper: &TypeMapper<'_>,
    registry: &mut Registry,
    selector: &Selector,
) -> eyre::Result<String> {
    mapper.map(registry, &IrSchema::reference(selector.clone()), 0)
}
