//! Registry for documentation renderers.

use std::sync::{OnceLock, RwLock, RwLockReadGuard};

use super::Renderer;

/// Global registry of renderers.
static RENDERERS: RwLock<Vec<&'static dyn Renderer>> = RwLock::new(Vec::new());
static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Register a custom renderer.
///
/// A renderer registered under an existing name shadows the earlier one.
/// Built-in renderers are registered automatically on first use.
pub fn register_renderer(renderer: &'static dyn Renderer) {
    init_builtin();
    RENDERERS
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .push(renderer);
}

fn init_builtin() {
    INITIALIZED.get_or_init(|| {
        let mut renderers = RENDERERS.write().unwrap_or_else(|e| e.into_inner());
        renderers.push(&super::json::JSON_RENDERER);
        renderers.push(&super::markdown::MARKDOWN_RENDERER);
    });
}

fn read() -> RwLockReadGuard<'static, Vec<&'static dyn Renderer>> {
    init_builtin();
    RENDERERS.read().unwrap_or_else(|e| e.into_inner())
}

/// Get a renderer by name.
pub fn get_renderer(name: &str) -> Option<&'static dyn Renderer> {
    read().iter().rev().find(|r| r.name() == name).copied()
}

/// List all registered renderers.
pub fn renderers() -> Vec<&'static dyn Renderer> {
    read().clone()
}

/// List all registered renderer names.
pub fn renderer_names() -> Vec<&'static str> {
    let mut names = Vec::new();
    for renderer in read().iter() {
        if !names.contains(&renderer.name()) {
            names.push(renderer.name());
        }
    }
    names
}
