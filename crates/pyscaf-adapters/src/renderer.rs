//! Blueprint renderer: `{{VAR}}` context variables first, `__TOKEN__`
//! placeholders second, over both file paths and contents.

use std::path::Path;

use pyscaf_core::{
    application::ports::BlueprintRenderer,
    domain::{
        Blueprint, BlueprintNode, DomainValidator as validator, FileContent, ProjectParams,
        ProjectStructure, RenderContext, TokenMap,
    },
    error::PyscafResult,
};
use tracing::instrument;

/// Renderer using plain string substitution.
pub struct TokenRenderer;

impl TokenRenderer {
    /// Create a new token renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for TokenRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl BlueprintRenderer for TokenRenderer {
    #[instrument(skip_all)]
    fn render(
        &self,
        blueprint: &Blueprint,
        params: &ProjectParams,
        context: &RenderContext,
        tokens: &TokenMap,
        output_root: &Path,
    ) -> PyscafResult<ProjectStructure> {
        // Validate blueprint first
        validator::validate_blueprint(blueprint).map_err(pyscaf_core::error::PyscafError::Domain)?;

        let mut structure = ProjectStructure::new(output_root);

        // Render each node that applies to these parameters
        for node in blueprint.nodes_for(params) {
            match node {
                BlueprintNode::File(spec) => {
                    let path = context.render(spec.path.as_str());
                    let content = render_content(&spec.content, context, tokens);
                    structure.add_file(path, content, spec.permissions);
                }
                BlueprintNode::Directory(spec) => {
                    let path = context.render(spec.path.as_str());
                    structure.add_directory(path, Default::default());
                }
            }
        }

        // Validate final structure
        validator::validate_structure(&structure)
            .map_err(pyscaf_core::error::PyscafError::Domain)?;

        Ok(structure)
    }
}

fn render_content(content: &FileContent, ctx: &RenderContext, tokens: &TokenMap) -> String {
    match content {
        FileContent::Literal(source) => (*source).to_string(),
        FileContent::Parameterized(source) => tokens.apply(&ctx.render(source)),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
