//! The finished, read-only documentation model of one library.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::namespace::{NamespaceId, NamespaceModel};

/// Descriptive library metadata carried by an [`AssemblyModel`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyInfo {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    /// True when the library was built for distribution.
    #[serde(default)]
    pub distribution: bool,
}

/// Documentation model of a library: metadata plus its namespace forest.
///
/// Produced by [`NamespaceTree::finish`](crate::NamespaceTree::finish) and
/// never mutated afterwards. Serializes with namespaces nested under their
/// parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyModel {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub distribution: bool,
    roots: Vec<NamespaceId>,
    nodes: Vec<NamespaceModel>,
}

impl AssemblyModel {
    pub(crate) fn from_parts(
        info: AssemblyInfo,
        roots: Vec<NamespaceId>,
        nodes: Vec<NamespaceModel>,
    ) -> Self {
        Self {
            name: info.name,
            version: info.version,
            description: info.description,
            distribution: info.distribution,
            roots,
            nodes,
        }
    }

    /// Top-level namespace ids in first-encounter order.
    pub fn roots(&self) -> &[NamespaceId] {
        &self.roots
    }

    pub fn node(&self, id: NamespaceId) -> Option<&NamespaceModel> {
        self.nodes.get(id.index())
    }

    /// Top-level namespaces.
    pub fn namespaces(&self) -> impl Iterator<Item = &NamespaceModel> {
        self.roots.iter().filter_map(|id| self.node(*id))
    }

    /// Direct children of a namespace, in insertion order.
    pub fn children<'a>(
        &'a self,
        namespace: &'a NamespaceModel,
    ) -> impl Iterator<Item = &'a NamespaceModel> + 'a {
        namespace.children().iter().filter_map(|id| self.node(*id))
    }

    /// Look up a namespace by its full dotted pattern.
    pub fn find(&self, pattern: &str) -> Option<&NamespaceModel> {
        self.nodes.iter().find(|node| node.pattern == pattern)
    }

    /// The global namespace node, if any type lacked a namespace.
    pub fn global(&self) -> Option<&NamespaceModel> {
        self.namespaces().find(|node| node.is_global())
    }

    /// Depth-first pre-order traversal yielding `(depth, node)`; roots have depth 0.
    pub fn walk(&self) -> Vec<(usize, &NamespaceModel)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(usize, NamespaceId)> =
            self.roots.iter().rev().map(|id| (0, *id)).collect();

        while let Some((depth, id)) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            out.push((depth, node));
            stack.extend(node.children().iter().rev().map(|child| (depth + 1, *child)));
        }
        out
    }

    pub fn namespace_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn type_count(&self) -> usize {
        self.nodes.iter().map(NamespaceModel::type_count).sum()
    }
}

impl Serialize for AssemblyModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AssemblyModel", 5)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("version", &self.version)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("distribution", &self.distribution)?;
        state.serialize_field(
            "namespaces",
            &NestedList {
                model: self,
                ids: &self.roots,
            },
        )?;
        state.end()
    }
}

struct NestedList<'a> {
    model: &'a AssemblyModel,
    ids: &'a [NamespaceId],
}

impl Serialize for NestedList<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.ids.iter().filter_map(|id| {
            self.model.node(*id).map(|node| Nested {
                model: self.model,
                node,
            })
        }))
    }
}

struct Nested<'a> {
    model: &'a AssemblyModel,
    node: &'a NamespaceModel,
}

impl Serialize for Nested<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = self.node;
        let mut state = serializer.serialize_struct("NamespaceModel", 6)?;
        state.serialize_field("pattern", &node.pattern)?;
        state.serialize_field("classes", &node.classes)?;
        state.serialize_field("interfaces", &node.interfaces)?;
        state.serialize_field("structs", &node.structs)?;
        state.serialize_field("enums", &node.enums)?;
        state.serialize_field(
            "namespaces",
            &NestedList {
                model: self.model,
                ids: node.children(),
            },
        )?;
        state.end()
    }
}
