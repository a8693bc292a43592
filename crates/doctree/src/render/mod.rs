//! Renderers turn a finished [`AssemblyModel`] into documentation text.
//!
//! Built-in renderers (`json`, `markdown`) are registered on first use;
//! custom ones can be added with [`register_renderer`].

mod json;
mod markdown;
mod registry;

pub use json::JsonRenderer;
pub use markdown::MarkdownRenderer;
pub use registry::{get_renderer, register_renderer, renderer_names, renderers};

use std::path::Path;

use doctree_model::AssemblyModel;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to serialize model: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to format output: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("unknown renderer '{name}' (available: {})", available.join(", "))]
    UnknownRenderer {
        name: String,
        available: Vec<&'static str>,
    },
}

/// A documentation renderer.
///
/// # Implementing Custom Renderers
///
/// ```
/// use doctree::{AssemblyModel, RenderError, Renderer, get_renderer, register_renderer};
///
/// struct Outline;
///
/// impl Renderer for Outline {
///     fn name(&self) -> &'static str { "outline" }
///     fn extension(&self) -> &'static str { "txt" }
///     fn render(&self, assembly: &AssemblyModel) -> Result<String, RenderError> {
///         Ok(assembly.walk().iter().map(|(_, ns)| format!("{}\n", ns.pattern)).collect())
///     }
/// }
///
/// register_renderer(&Outline);
/// assert!(get_renderer("outline").is_some());
/// ```
pub trait Renderer: Send + Sync {
    /// Unique renderer identifier (e.g. "json", "markdown").
    fn name(&self) -> &'static str;

    /// File extension of the rendered output.
    fn extension(&self) -> &'static str;

    fn render(&self, assembly: &AssemblyModel) -> Result<String, RenderError>;
}

/// Resolve a template file name (`"markdown.md"`, `"templates/json.tpl"`) to
/// the renderer named by its stem.
pub fn renderer_for_template(template: &str) -> Result<&'static dyn Renderer, RenderError> {
    let path = Path::new(template);
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(template);

    get_renderer(name).ok_or_else(|| RenderError::UnknownRenderer {
        name: name.to_string(),
        available: renderer_names(),
    })
}
