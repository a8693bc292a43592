//! JSON renderer: the serialized model with nested namespaces.

use doctree_model::AssemblyModel;

use super::{RenderError, Renderer};

pub(super) static JSON_RENDERER: JsonRenderer = JsonRenderer;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, assembly: &AssemblyModel) -> Result<String, RenderError> {
        let mut out = serde_json::to_string_pretty(assembly)?;
        out.push('\n');
        Ok(out)
    }
}
