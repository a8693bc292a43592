//! Namespace nodes.

use serde::{Deserialize, Serialize};

use crate::types::{ClassModel, EnumModel, InterfaceModel, StructModel, TypeModel};

/// Stable handle to a namespace node inside one tree.
///
/// Resolving the same namespace twice yields equal ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceId(pub(crate) usize);

impl NamespaceId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One dotted-path prefix and the types declared directly at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceModel {
    #[serde(skip)]
    pub(crate) id: NamespaceId,
    /// Fully accumulated dotted pattern (`"Foo.Bar"`); empty for the global namespace.
    pub pattern: String,
    #[serde(skip)]
    pub(crate) children: Vec<NamespaceId>,
    pub classes: Vec<ClassModel>,
    pub interfaces: Vec<InterfaceModel>,
    pub structs: Vec<StructModel>,
    pub enums: Vec<EnumModel>,
}

impl NamespaceModel {
    pub(crate) fn new(id: NamespaceId, pattern: impl Into<String>) -> Self {
        Self {
            id,
            pattern: pattern.into(),
            children: Vec::new(),
            classes: Vec::new(),
            interfaces: Vec::new(),
            structs: Vec::new(),
            enums: Vec::new(),
        }
    }

    pub fn id(&self) -> NamespaceId {
        self.id
    }

    /// Child node ids in insertion order.
    pub fn children(&self) -> &[NamespaceId] {
        &self.children
    }

    /// Last segment of the pattern.
    pub fn name(&self) -> &str {
        self.pattern.rsplit('.').next().unwrap_or_default()
    }

    /// Number of segments in the pattern (0 for the global namespace).
    pub fn depth(&self) -> usize {
        if self.is_global() {
            0
        } else {
            self.pattern.split('.').count()
        }
    }

    pub fn is_global(&self) -> bool {
        self.pattern.is_empty()
    }

    pub fn type_count(&self) -> usize {
        self.classes.len() + self.interfaces.len() + self.structs.len() + self.enums.len()
    }

    /// True when the node declares no types itself.
    pub fn is_empty(&self) -> bool {
        self.type_count() == 0
    }

    /// Append a type model to the collection matching its variant.
    pub(crate) fn push(&mut self, model: TypeModel) {
        match model {
            TypeModel::Class(m) => self.classes.push(m),
            TypeModel::Interface(m) => self.interfaces.push(m),
            TypeModel::Struct(m) => self.structs.push(m),
            TypeModel::Enum(m) => self.enums.push(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TypeHeader, TypeKind};

    #[test]
    fn test_name_and_depth() {
        let node = NamespaceModel::new(NamespaceId(0), "A.B.C");
        assert_eq!(node.name(), "C");
        assert_eq!(node.depth(), 3);

        let global = NamespaceModel::new(NamespaceId(1), "");
        assert!(global.is_global());
        assert_eq!(global.depth(), 0);
        assert_eq!(global.name(), "");
    }

    #[test]
    fn test_push_routes_by_variant() {
        let mut node = NamespaceModel::new(NamespaceId(0), "A");
        let header = TypeHeader::new("Mode", "A.Mode", "A");
        node.push(TypeModel::empty(TypeKind::Enum, header.clone()));
        node.push(TypeModel::empty(TypeKind::Class, header));
        assert_eq!(node.enums.len(), 1);
        assert_eq!(node.classes.len(), 1);
        assert!(node.structs.is_empty());
        assert_eq!(node.type_count(), 2);
    }
}
