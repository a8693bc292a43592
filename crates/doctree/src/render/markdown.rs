//! Markdown outline renderer.
//!
//! One `##` section per namespace in pre-order, one `###` group per type kind
//! and one `####` heading per type with its members as a bullet list.

use std::fmt::{self, Write};

use doctree_model::{AssemblyModel, EnumModel, NamespaceModel, TypeHeader};

use super::{RenderError, Renderer};

pub(super) static MARKDOWN_RENDERER: MarkdownRenderer = MarkdownRenderer;

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn extension(&self) -> &'static str {
        "md"
    }

    fn render(&self, assembly: &AssemblyModel) -> Result<String, RenderError> {
        let mut out = String::new();
        write_assembly(&mut out, assembly)?;
        Ok(out)
    }
}

fn write_assembly(out: &mut String, assembly: &AssemblyModel) -> fmt::Result {
    write!(out, "# {}", assembly.name)?;
    if !assembly.version.is_empty() {
        write!(out, " {}", assembly.version)?;
    }
    writeln!(out)?;
    if let Some(description) = &assembly.description {
        writeln!(out, "\n{description}")?;
    }

    for (_, namespace) in assembly.walk() {
        write_namespace(out, namespace)?;
    }
    Ok(())
}

macro_rules! write_members {
    ($out:expr, $label:literal, $members:expr) => {
        for m in &$members {
            let text = member(&m.name, m.signature.as_deref(), m.is_static);
            writeln!($out, "- {} {}", $label, text)?;
        }
    };
}

fn write_namespace(out: &mut String, namespace: &NamespaceModel) -> fmt::Result {
    if namespace.is_global() {
        writeln!(out, "\n## (global)")?;
    } else {
        writeln!(out, "\n## {}", namespace.pattern)?;
    }

    if !namespace.classes.is_empty() {
        writeln!(out, "\n### Classes")?;
        for class in &namespace.classes {
            write_type(out, &class.header)?;
            write_members!(out, "Constructor", class.constructors);
            write_members!(out, "Field", class.fields);
            write_members!(out, "Property", class.properties);
            write_members!(out, "Method", class.methods);
        }
    }

    if !namespace.interfaces.is_empty() {
        writeln!(out, "\n### Interfaces")?;
        for iface in &namespace.interfaces {
            write_type(out, &iface.header)?;
            write_members!(out, "Property", iface.properties);
            write_members!(out, "Method", iface.methods);
        }
    }

    if !namespace.structs.is_empty() {
        writeln!(out, "\n### Structs")?;
        for value in &namespace.structs {
            write_type(out, &value.header)?;
            write_members!(out, "Constructor", value.constructors);
            write_members!(out, "Field", value.fields);
            write_members!(out, "Property", value.properties);
            write_members!(out, "Method", value.methods);
        }
    }

    if !namespace.enums.is_empty() {
        writeln!(out, "\n### Enums")?;
        for model in &namespace.enums {
            write_enum(out, model)?;
        }
    }
    Ok(())
}

fn write_type(out: &mut String, header: &TypeHeader) -> fmt::Result {
    writeln!(out, "\n#### {}", header.name)
}

fn member(name: &str, signature: Option<&str>, is_static: bool) -> String {
    let text = signature.unwrap_or(name);
    if is_static {
        format!("`{text}` (static)")
    } else {
        format!("`{text}`")
    }
}

fn write_enum(out: &mut String, model: &EnumModel) -> fmt::Result {
    write_type(out, &model.header)?;
    for (code, name) in &model.values {
        writeln!(out, "- `{code}` {name}")?;
    }
    for alias in &model.aliases {
        writeln!(out, "- `{}` {} (alias)", alias.value, alias.name)?;
    }
    Ok(())
}
