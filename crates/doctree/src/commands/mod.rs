//! Command-line front-end.

pub mod build;
pub mod renderers;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "doctree")]
#[command(about = "Build documentation models from library type metadata")]
#[command(version)]
pub struct Cli {
    /// Log debug output to stderr (overrides DOCTREE_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build and render the documentation model of a metadata dump
    Build(build::BuildArgs),

    /// List registered renderers
    Renderers(renderers::RenderersArgs),
}

/// Dispatch a parsed command line, returning the process exit code.
pub fn run(cli: Cli) -> i32 {
    match cli.command {
        Commands::Build(args) => build::run(args),
        Commands::Renderers(args) => renderers::run(args),
    }
}
