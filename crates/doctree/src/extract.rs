//! Member extraction.
//!
//! Collects the public member surface of one type, gated by its kind:
//!
//! | kind                      | constructors | fields | properties | methods |
//! |---------------------------|--------------|--------|------------|---------|
//! | class                     | yes          | yes    | yes        | yes     |
//! | struct (non-primitive)    | yes          | yes    | yes        | yes     |
//! | primitive value type      | yes          | no     | yes        | yes     |
//! | interface                 | no           | no     | yes        | yes     |
//! | enum                      | no           | no     | no         | no      |
//!
//! Members that match a member of the universal base type on
//! (kind, declaring type, name) are dropped when filtering is requested.

use std::collections::HashSet;

use doctree_model::{ConstructorModel, FieldModel, MethodModel, PropertyModel};

use crate::error::BuildError;
use crate::metadata::{MemberInfo, MemberKind, MetadataError, TypeDescriptor};

const SYSTEM_OBJECT: &str = "System.Object";

/// Member identities of the universal base type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseMembers {
    members: HashSet<(MemberKind, String, String)>,
}

impl BaseMembers {
    pub fn from_members<'a>(members: impl IntoIterator<Item = &'a MemberInfo>) -> Self {
        Self {
            members: members
                .into_iter()
                .map(|m| (m.kind, m.declaring_type.clone(), m.name.clone()))
                .collect(),
        }
    }

    pub fn from_descriptor(base: &dyn TypeDescriptor) -> Result<Self, MetadataError> {
        Ok(Self::from_members(&base.members()?))
    }

    /// The public surface of `System.Object`.
    pub fn system_object() -> Self {
        let members = [
            (MemberKind::Constructor, ".ctor"),
            (MemberKind::Method, "Equals"),
            (MemberKind::Method, "GetHashCode"),
            (MemberKind::Method, "GetType"),
            (MemberKind::Method, "ToString"),
            (MemberKind::Method, "ReferenceEquals"),
        ];
        Self {
            members: members
                .into_iter()
                .map(|(kind, name)| (kind, SYSTEM_OBJECT.to_string(), name.to_string()))
                .collect(),
        }
    }

    pub fn contains(&self, member: &MemberInfo) -> bool {
        self.members.contains(&(
            member.kind,
            member.declaring_type.clone(),
            member.name.clone(),
        ))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Normalized member lists of one type, in descriptor order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedMembers {
    pub constructors: Vec<ConstructorModel>,
    pub fields: Vec<FieldModel>,
    pub properties: Vec<PropertyModel>,
    pub methods: Vec<MethodModel>,
}

impl ExtractedMembers {
    pub fn len(&self) -> usize {
        self.constructors.len() + self.fields.len() + self.properties.len() + self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

macro_rules! to_model {
    ($model:ident, $member:expr) => {
        $model {
            name: $member.name,
            signature: $member.signature,
            is_static: $member.is_static,
        }
    };
}

pub fn extract_members(
    descriptor: &dyn TypeDescriptor,
    base: &BaseMembers,
    filter_base_members: bool,
) -> Result<ExtractedMembers, BuildError> {
    let mut out = ExtractedMembers::default();
    if descriptor.is_enum() {
        return Ok(out);
    }

    let with_constructors = !descriptor.is_interface();
    let with_fields = descriptor.is_class()
        || (descriptor.is_value_type() && !descriptor.is_primitive());

    let members = descriptor
        .members()
        .map_err(|e| BuildError::unavailable(descriptor.full_name(), e))?;

    for member in members {
        if filter_base_members && base.contains(&member) {
            continue;
        }
        match member.kind {
            MemberKind::Constructor if with_constructors => {
                out.constructors.push(to_model!(ConstructorModel, member))
            }
            MemberKind::Field if with_fields => out.fields.push(to_model!(FieldModel, member)),
            MemberKind::Property => out.properties.push(to_model!(PropertyModel, member)),
            MemberKind::Method => out.methods.push(to_model!(MethodModel, member)),
            MemberKind::Constructor | MemberKind::Field => {}
        }
    }
    Ok(out)
}
