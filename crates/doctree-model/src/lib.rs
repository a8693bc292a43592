//! Core data types for doctree documentation models.
//!
//! This crate defines the vocabulary handed to renderers - assemblies,
//! namespaces, type models and member models - together with the
//! [`NamespaceTree`] that assembles them. These types are used by:
//! - `doctree` for building models from type metadata
//! - renderers that turn a finished [`AssemblyModel`] into text

mod assembly;
mod member;
mod namespace;
mod tree;
mod types;

pub use assembly::{AssemblyInfo, AssemblyModel};
pub use member::{ConstructorModel, FieldModel, MethodModel, PropertyModel};
pub use namespace::{NamespaceId, NamespaceModel};
pub use tree::{NamespacePolicy, NamespaceTree, TreeError};
pub use types::{
    ClassModel, EnumAlias, EnumModel, InterfaceModel, StructModel, TypeHeader, TypeKind,
    TypeModel,
};
