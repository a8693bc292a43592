//! Build command - metadata dump to rendered documentation.

use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

use doctree_model::NamespacePolicy;

use crate::builder::AssemblyModelBuilder;
use crate::config::DoctreeConfig;
use crate::metadata::MetadataDocument;
use crate::render::renderer_for_template;

#[derive(Args)]
pub struct BuildArgs {
    /// Metadata dump (JSON)
    pub input: PathBuf,

    /// Renderer name or template file name (e.g. markdown, json.tpl)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep members inherited unchanged from the universal base type
    #[arg(long)]
    pub no_filter: bool,

    /// Abort on the first type that fails to build
    #[arg(long)]
    pub fail_fast: bool,

    /// Drop empty namespace segments instead of rejecting the type
    #[arg(long)]
    pub collapse_namespaces: bool,

    /// Build type models on the current thread only
    #[arg(long)]
    pub sequential: bool,

    /// Project root for .doctree/config.toml
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

/// Run the build command
pub fn run(args: BuildArgs) -> i32 {
    match execute(args) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("error: {:#}", e);
            1
        }
    }
}

/// Returns whether every type was built.
fn execute(args: BuildArgs) -> anyhow::Result<bool> {
    let config = DoctreeConfig::load(&args.root)?;

    let mut options = config.build_options();
    if args.no_filter {
        options.filter_base_members = false;
    }
    if args.fail_fast {
        options.fail_fast = true;
    }
    if args.collapse_namespaces {
        options.namespace_policy = NamespacePolicy::Collapse;
    }
    if args.sequential {
        options.parallel = false;
    }

    let format = args.format.as_deref().unwrap_or(config.format());
    let renderer = renderer_for_template(format)?;

    let document = MetadataDocument::load(&args.input)?;
    let report = AssemblyModelBuilder::new(options)
        .build_document(&document)
        .with_context(|| format!("failed to build {}", args.input.display()))?;

    for failure in &report.failures {
        eprintln!("skipped {}: {}", failure.type_name, failure.error);
    }

    let rendered = renderer.render(&report.assembly)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Generated {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(report.is_complete())
}
