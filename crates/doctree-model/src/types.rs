//! Type models for documented types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::member::{ConstructorModel, FieldModel, MethodModel, PropertyModel};

/// Type kind classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Enum,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Struct => "struct",
            TypeKind::Enum => "enum",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes shared by every type model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeHeader {
    /// Simple name (e.g. `Widget`).
    pub name: String,
    /// Fully qualified name (e.g. `A.B.Widget`).
    pub full_name: String,
    /// Declaring namespace; empty for the global namespace.
    pub namespace: String,
}

impl TypeHeader {
    pub fn new(
        name: impl Into<String>,
        full_name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            full_name: full_name.into(),
            namespace: namespace.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassModel {
    #[serde(flatten)]
    pub header: TypeHeader,
    pub constructors: Vec<ConstructorModel>,
    pub fields: Vec<FieldModel>,
    pub properties: Vec<PropertyModel>,
    pub methods: Vec<MethodModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructModel {
    #[serde(flatten)]
    pub header: TypeHeader,
    pub constructors: Vec<ConstructorModel>,
    pub fields: Vec<FieldModel>,
    pub properties: Vec<PropertyModel>,
    pub methods: Vec<MethodModel>,
}

/// Interfaces never carry constructors or fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceModel {
    #[serde(flatten)]
    pub header: TypeHeader,
    pub properties: Vec<PropertyModel>,
    pub methods: Vec<MethodModel>,
}

/// A symbolic name that shares its code with an earlier enumerant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumAlias {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumModel {
    #[serde(flatten)]
    pub header: TypeHeader,
    /// Backing code -> symbolic name. The first name declared for a code owns the slot.
    pub values: BTreeMap<i64, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<EnumAlias>,
}

/// A documented type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeModel {
    Class(ClassModel),
    Interface(InterfaceModel),
    Struct(StructModel),
    Enum(EnumModel),
}

impl TypeModel {
    /// Create a model of the given kind with empty member collections.
    pub fn empty(kind: TypeKind, header: TypeHeader) -> Self {
        match kind {
            TypeKind::Class => TypeModel::Class(ClassModel {
                header,
                ..Default::default()
            }),
            TypeKind::Interface => TypeModel::Interface(InterfaceModel {
                header,
                ..Default::default()
            }),
            TypeKind::Struct => TypeModel::Struct(StructModel {
                header,
                ..Default::default()
            }),
            TypeKind::Enum => TypeModel::Enum(EnumModel {
                header,
                ..Default::default()
            }),
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            TypeModel::Class(_) => TypeKind::Class,
            TypeModel::Interface(_) => TypeKind::Interface,
            TypeModel::Struct(_) => TypeKind::Struct,
            TypeModel::Enum(_) => TypeKind::Enum,
        }
    }

    pub fn header(&self) -> &TypeHeader {
        match self {
            TypeModel::Class(m) => &m.header,
            TypeModel::Interface(m) => &m.header,
            TypeModel::Struct(m) => &m.header,
            TypeModel::Enum(m) => &m.header,
        }
    }

    pub fn header_mut(&mut self) -> &mut TypeHeader {
        match self {
            TypeModel::Class(m) => &mut m.header,
            TypeModel::Interface(m) => &mut m.header,
            TypeModel::Struct(m) => &mut m.header,
            TypeModel::Enum(m) => &mut m.header,
        }
    }

    pub fn name(&self) -> &str {
        &self.header().name
    }

    pub fn full_name(&self) -> &str {
        &self.header().full_name
    }

    pub fn namespace(&self) -> &str {
        &self.header().namespace
    }

    pub fn constructors_mut(&mut self) -> Option<&mut Vec<ConstructorModel>> {
        match self {
            TypeModel::Class(m) => Some(&mut m.constructors),
            TypeModel::Struct(m) => Some(&mut m.constructors),
            TypeModel::Interface(_) | TypeModel::Enum(_) => None,
        }
    }

    pub fn fields_mut(&mut self) -> Option<&mut Vec<FieldModel>> {
        match self {
            TypeModel::Class(m) => Some(&mut m.fields),
            TypeModel::Struct(m) => Some(&mut m.fields),
            TypeModel::Interface(_) | TypeModel::Enum(_) => None,
        }
    }

    pub fn properties_mut(&mut self) -> Option<&mut Vec<PropertyModel>> {
        match self {
            TypeModel::Class(m) => Some(&mut m.properties),
            TypeModel::Struct(m) => Some(&mut m.properties),
            TypeModel::Interface(m) => Some(&mut m.properties),
            TypeModel::Enum(_) => None,
        }
    }

    pub fn methods_mut(&mut self) -> Option<&mut Vec<MethodModel>> {
        match self {
            TypeModel::Class(m) => Some(&mut m.methods),
            TypeModel::Struct(m) => Some(&mut m.methods),
            TypeModel::Interface(m) => Some(&mut m.methods),
            TypeModel::Enum(_) => None,
        }
    }

    pub fn as_enum_mut(&mut self) -> Option<&mut EnumModel> {
        match self {
            TypeModel::Enum(m) => Some(m),
            _ => None,
        }
    }

    /// Total number of members (enum values count as members).
    pub fn member_count(&self) -> usize {
        match self {
            TypeModel::Class(m) => {
                m.constructors.len() + m.fields.len() + m.properties.len() + m.methods.len()
            }
            TypeModel::Struct(m) => {
                m.constructors.len() + m.fields.len() + m.properties.len() + m.methods.len()
            }
            TypeModel::Interface(m) => m.properties.len() + m.methods.len(),
            TypeModel::Enum(m) => m.values.len() + m.aliases.len(),
        }
    }
}
