//! Documentation models from compiled library type metadata.
//!
//! `doctree` reads type descriptors (classes, interfaces, structs, enums) from
//! a metadata source, extracts their public member surface and groups them into
//! a dotted-path namespace tree that renderers turn into documentation.
//!
//! # Architecture
//!
//! ```text
//! Metadata source        Builder                       Output
//! ───────────────     ──────────────────────────     ─────────────
//! TypeDescriptor ──┐   extract   (members)           ┌─> json
//! LibraryMetadata ─┼─> factory   (type models) ──────┼─> markdown
//! JSON dump ───────┘   NamespaceTree (resolve/attach)└─> custom Renderer
//! ```
//!
//! # Example
//!
//! ```
//! use doctree::{AssemblyModelBuilder, BuildOptions, MetadataDocument, get_renderer};
//!
//! let document = MetadataDocument::from_json(r#"{
//!     "library": { "name": "Sample", "version": "1.0.0" },
//!     "types": [
//!         { "name": "Widget", "namespace": "A.B", "category": "class" },
//!         { "name": "Loose", "category": "interface" }
//!     ]
//! }"#).unwrap();
//!
//! let report = AssemblyModelBuilder::new(BuildOptions::default())
//!     .build_document(&document)
//!     .unwrap();
//! assert!(report.is_complete());
//! assert_eq!(report.assembly.find("A.B").unwrap().classes.len(), 1);
//!
//! let markdown = get_renderer("markdown").unwrap().render(&report.assembly).unwrap();
//! assert!(markdown.contains("#### Widget"));
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod factory;
pub mod metadata;
pub mod render;

#[cfg(feature = "cli")]
pub mod commands;

pub use doctree_model::*;

pub use builder::{AssemblyModelBuilder, BuildOptions, BuildReport, TypeFailure};
pub use config::{ConfigError, DoctreeConfig};
pub use error::BuildError;
pub use extract::{BaseMembers, ExtractedMembers, extract_members};
pub use factory::{
    EnumValues, MemberHandlers, build_type_model, build_type_model_with, classify,
};
pub use metadata::{
    EnumValue, LibraryInfo, LibraryMetadata, MemberInfo, MemberKind, MetadataDocument,
    MetadataError, TypeCategory, TypeDescriptor, TypeRecord,
};
pub use render::{
    RenderError, Renderer, get_renderer, register_renderer, renderer_for_template,
    renderer_names, renderers,
};
