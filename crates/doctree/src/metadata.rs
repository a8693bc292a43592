//! Type metadata input boundary.
//!
//! The builder consumes anything implementing [`LibraryMetadata`] and
//! [`TypeDescriptor`]. [`MetadataDocument`] is the built-in implementation,
//! backed by a JSON dump of a library's public types:
//!
//! ```json
//! {
//!   "library": { "name": "Shapes", "version": "2.1.0", "description": "Geometry" },
//!   "types": [
//!     {
//!       "name": "Circle",
//!       "namespace": "Shapes.Round",
//!       "category": "class",
//!       "members": [
//!         { "kind": "constructor", "name": ".ctor" },
//!         { "kind": "property", "name": "Radius" },
//!         { "kind": "method", "name": "ToString", "declaring_type": "System.Object" }
//!       ]
//!     },
//!     { "name": "Color", "category": "enum", "values": [{ "name": "Red", "value": 0 }] }
//!   ]
//! }
//! ```
//!
//! A member without `declaring_type` is declared by the type itself. A type
//! record with `"members": null` (or `"values": null` for enums) stands for a
//! type whose metadata could not be read.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::extract::BaseMembers;

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid metadata document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Unavailable(String),
}

/// Member kind classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Constructor,
    Field,
    Property,
    Method,
}

impl MemberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Constructor => "constructor",
            MemberKind::Field => "field",
            MemberKind::Property => "property",
            MemberKind::Method => "method",
        }
    }
}

/// A public member as reported by introspection, declared or inherited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub kind: MemberKind,
    pub name: String,
    /// Full name of the type that declares the member.
    #[serde(default)]
    pub declaring_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default)]
    pub is_static: bool,
}

impl MemberInfo {
    pub fn new(
        kind: MemberKind,
        name: impl Into<String>,
        declaring_type: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            declaring_type: declaring_type.into(),
            signature: None,
            is_static: false,
        }
    }
}

/// One named enumerant and its backing integer code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

/// Library-level metadata.
pub trait LibraryMetadata {
    fn name(&self) -> &str;
    fn version(&self) -> &str;
    fn description(&self) -> Option<&str>;
    /// True when the library was built for distribution.
    fn distribution(&self) -> bool;
}

/// Introspection handle for one type.
///
/// Members are reported in the order the underlying facility produces them,
/// inherited members included.
pub trait TypeDescriptor: Send + Sync {
    /// Simple name (e.g. `Widget`).
    fn name(&self) -> &str;

    /// Fully qualified name (e.g. `A.B.Widget`).
    fn full_name(&self) -> &str;

    /// Declaring namespace, `None` for the global namespace.
    fn namespace(&self) -> Option<&str>;

    fn is_enum(&self) -> bool;
    fn is_interface(&self) -> bool;
    fn is_class(&self) -> bool;
    fn is_value_type(&self) -> bool;

    /// Built-in scalar value types (integers, booleans, ...).
    fn is_primitive(&self) -> bool {
        false
    }

    /// Public instance and static members.
    fn members(&self) -> Result<Vec<MemberInfo>, MetadataError>;

    /// Defined enumerants, in declaration order. Empty for non-enums.
    fn enum_values(&self) -> Result<Vec<EnumValue>, MetadataError>;
}

/// Library metadata as stored in a [`MetadataDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryInfo {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub distribution: bool,
}

impl LibraryMetadata for LibraryInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn distribution(&self) -> bool {
        self.distribution
    }
}

/// Runtime category of a type record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeCategory {
    Class,
    Interface,
    Struct,
    Enum,
    Primitive,
}

fn members_available() -> Option<Vec<MemberInfo>> {
    Some(Vec::new())
}

fn values_available() -> Option<Vec<EnumValue>> {
    Some(Vec::new())
}

/// A type description from a metadata dump.
///
/// Deserializing fills in `full_name` and empty member `declaring_type`s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTypeRecord")]
pub struct TypeRecord {
    pub name: String,
    /// Defaults to `namespace.name`.
    pub full_name: String,
    pub namespace: Option<String>,
    pub category: TypeCategory,
    /// `None` when the member metadata could not be read.
    pub members: Option<Vec<MemberInfo>>,
    /// `None` when the enumerants could not be read.
    pub values: Option<Vec<EnumValue>>,
}

/// Wire form of [`TypeRecord`] before defaults are filled.
#[derive(Deserialize)]
struct RawTypeRecord {
    name: String,
    #[serde(default)]
    full_name: String,
    #[serde(default)]
    namespace: Option<String>,
    category: TypeCategory,
    #[serde(default = "members_available")]
    members: Option<Vec<MemberInfo>>,
    #[serde(default = "values_available")]
    values: Option<Vec<EnumValue>>,
}

impl From<RawTypeRecord> for TypeRecord {
    fn from(raw: RawTypeRecord) -> Self {
        let mut record = Self {
            name: raw.name,
            full_name: raw.full_name,
            namespace: raw.namespace,
            category: raw.category,
            members: raw.members,
            values: raw.values,
        };
        record.fill_defaults();
        record
    }
}

impl TypeRecord {
    pub fn new(name: impl Into<String>, namespace: Option<&str>, category: TypeCategory) -> Self {
        let mut record = Self {
            name: name.into(),
            full_name: String::new(),
            namespace: namespace.map(str::to_string),
            category,
            members: Some(Vec::new()),
            values: Some(Vec::new()),
        };
        record.fill_defaults();
        record
    }

    /// Add a member declared by this type.
    pub fn member(self, kind: MemberKind, name: impl Into<String>) -> Self {
        let declaring = self.full_name.clone();
        self.inherited(kind, name, declaring)
    }

    /// Add a member declared by another type.
    pub fn inherited(
        mut self,
        kind: MemberKind,
        name: impl Into<String>,
        declaring_type: impl Into<String>,
    ) -> Self {
        if let Some(members) = self.members.as_mut() {
            members.push(MemberInfo::new(kind, name, declaring_type));
        }
        self
    }

    /// Add an enumerant.
    pub fn value(mut self, name: impl Into<String>, value: i64) -> Self {
        if let Some(values) = self.values.as_mut() {
            values.push(EnumValue {
                name: name.into(),
                value,
            });
        }
        self
    }

    /// Mark the member and enumerant metadata as unreadable.
    pub fn unavailable(mut self) -> Self {
        self.members = None;
        self.values = None;
        self
    }

    fn fill_defaults(&mut self) {
        if self.full_name.is_empty() {
            self.full_name = match self.namespace.as_deref() {
                Some(ns) if !ns.is_empty() => format!("{}.{}", ns, self.name),
                _ => self.name.clone(),
            };
        }
        if let Some(members) = self.members.as_mut() {
            for member in members.iter_mut().filter(|m| m.declaring_type.is_empty()) {
                member.declaring_type = self.full_name.clone();
            }
        }
    }

    fn unavailable_error(&self, what: &str) -> MetadataError {
        MetadataError::Unavailable(format!("no {} recorded for {}", what, self.full_name))
    }
}

impl TypeDescriptor for TypeRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_name(&self) -> &str {
        &self.full_name
    }

    fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|ns| !ns.is_empty())
    }

    fn is_enum(&self) -> bool {
        self.category == TypeCategory::Enum
    }

    fn is_interface(&self) -> bool {
        self.category == TypeCategory::Interface
    }

    fn is_class(&self) -> bool {
        self.category == TypeCategory::Class
    }

    fn is_value_type(&self) -> bool {
        matches!(
            self.category,
            TypeCategory::Struct | TypeCategory::Enum | TypeCategory::Primitive
        )
    }

    fn is_primitive(&self) -> bool {
        self.category == TypeCategory::Primitive
    }

    fn members(&self) -> Result<Vec<MemberInfo>, MetadataError> {
        self.members
            .clone()
            .ok_or_else(|| self.unavailable_error("members"))
    }

    fn enum_values(&self) -> Result<Vec<EnumValue>, MetadataError> {
        self.values
            .clone()
            .ok_or_else(|| self.unavailable_error("enum values"))
    }
}

/// A library's type metadata, as loaded from a JSON dump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDocument {
    pub library: LibraryInfo,
    /// The universal base type used for member filtering; `System.Object` when absent.
    #[serde(default)]
    pub base_type: Option<TypeRecord>,
    #[serde(default)]
    pub types: Vec<TypeRecord>,
}

impl MetadataDocument {
    pub fn from_json(input: &str) -> Result<Self, MetadataError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        let content = std::fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Members of the universal base type.
    pub fn base_members(&self) -> Result<BaseMembers, MetadataError> {
        match &self.base_type {
            Some(base) => BaseMembers::from_descriptor(base),
            None => Ok(BaseMembers::system_object()),
        }
    }
}
