//! One complete generation run.

use specgen_input::{Document, ParserConfig};
use tracing::info;

use crate::{
    Diagnostic, Pipeline, Result, normalize,
    render::{RenderedFile, Renderer},
};

/// Rendered files and every diagnostic of a successful run.
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    pub files: Vec<RenderedFile>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Normalize `document`, run `pipeline` and render the registry.
///
/// Fatal errors return only the error: no files are produced. Writing the
/// files is left to the caller (see [`crate::OutputWriter`]).
pub fn generate(
    document: &Document,
    parser: &ParserConfig,
    pipeline: &Pipeline,
    renderer: &dyn Renderer,
) -> Result<GenerationOutput> {
    let normalized = normalize(document, parser);
    let mut diagnostics = normalized.diagnostics;

    let mut registry = pipeline.run(&normalized.ir)?;
    let files = registry.render(renderer);
    diagnostics.extend(registry.take_diagnostics());

    info!(
        files = files.len(),
        diagnostics = diagnostics.len(),
        "generation complete"
    );
    Ok(GenerationOutput { files, diagnostics })
}
