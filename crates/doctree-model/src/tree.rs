//! Incremental namespace tree construction.
//!
//! The tree is a trie keyed by cumulative dotted prefixes. Nodes live in an
//! arena and are addressed by [`NamespaceId`]; each level keeps its children
//! in first-encounter order. Nodes are created lazily the first time a prefix
//! is resolved and shared by every later type with the same prefix.
//!
//! ```
//! use doctree_model::{NamespaceTree, TypeHeader, TypeKind, TypeModel};
//!
//! let mut tree = NamespaceTree::new();
//! let node = tree.resolve("A.B").unwrap();
//! assert_eq!(tree.resolve("A.B").unwrap(), node);
//!
//! let widget = TypeModel::empty(TypeKind::Class, TypeHeader::new("Widget", "A.B.Widget", "A.B"));
//! tree.attach(node, widget).unwrap();
//! assert_eq!(tree.node(node).unwrap().classes.len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::assembly::{AssemblyInfo, AssemblyModel};
use crate::namespace::{NamespaceId, NamespaceModel};
use crate::types::TypeModel;

/// How namespaces with empty segments (`"Foo..Bar"`, `".Foo"`, `"Foo."`) are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum NamespacePolicy {
    /// Fail with [`TreeError::MalformedNamespace`].
    #[default]
    Reject,
    /// Drop empty segments before matching.
    Collapse,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("type {full_name} is already attached to namespace '{namespace}'")]
    DuplicateAttachment { full_name: String, namespace: String },

    #[error("malformed namespace '{namespace}': empty segment")]
    MalformedNamespace { namespace: String },

    #[error("namespace node {0:?} does not belong to this tree")]
    UnknownNode(NamespaceId),
}

/// Mutable namespace forest used while an assembly is being built.
#[derive(Debug, Clone, Default)]
pub struct NamespaceTree {
    policy: NamespacePolicy,
    nodes: Vec<NamespaceModel>,
    roots: Vec<NamespaceId>,
    global: Option<NamespaceId>,
    /// Full type name -> owning node.
    attached: HashMap<String, NamespaceId>,
}

impl NamespaceTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: NamespacePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> NamespacePolicy {
        self.policy
    }

    /// Find or create the node for a full dotted namespace.
    ///
    /// An empty namespace maps to the single global node (pattern `""`).
    pub fn resolve(&mut self, full_namespace: &str) -> Result<NamespaceId, TreeError> {
        let segments = self.segments(full_namespace)?;
        let Some((first, rest)) = segments.split_first() else {
            return Ok(self.global());
        };

        let mut pattern = (*first).to_string();
        let mut current = self.child_or_create(None, &pattern);
        for segment in rest {
            pattern.push('.');
            pattern.push_str(segment);
            current = self.child_or_create(Some(current), &pattern);
        }
        Ok(current)
    }

    /// Append a type model to the node's collection for its variant.
    ///
    /// A type is identified by its full name; attaching it a second time
    /// anywhere in the tree is an error and leaves the tree unchanged.
    ///
    /// Ids are arena indices and carry no tree identity: an out-of-range id
    /// is rejected with [`TreeError::UnknownNode`], but an in-range id taken
    /// from another tree (or a clone of this one) addresses whichever node
    /// sits at that index here. Only pass ids returned by this tree.
    pub fn attach(&mut self, node: NamespaceId, model: TypeModel) -> Result<(), TreeError> {
        if node.0 >= self.nodes.len() {
            return Err(TreeError::UnknownNode(node));
        }
        if let Some(owner) = self.attached.get(model.full_name()) {
            return Err(TreeError::DuplicateAttachment {
                full_name: model.full_name().to_string(),
                namespace: self.nodes[owner.0].pattern.clone(),
            });
        }

        self.attached.insert(model.full_name().to_string(), node);
        self.nodes[node.0].push(model);
        Ok(())
    }

    /// Resolve the model's own namespace and attach it there.
    ///
    /// Under [`NamespacePolicy::Collapse`] the model's namespace and full name
    /// are rewritten to the pattern of the node that owns it.
    pub fn insert(&mut self, mut model: TypeModel) -> Result<NamespaceId, TreeError> {
        let node = self.resolve(model.namespace())?;
        let pattern = &self.nodes[node.0].pattern;
        if model.namespace() != pattern.as_str() {
            let header = model.header_mut();
            let local = header
                .full_name
                .strip_prefix(header.namespace.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap_or(&header.name)
                .to_string();
            header.full_name = if pattern.is_empty() {
                local
            } else {
                format!("{}.{}", pattern, local)
            };
            header.namespace = pattern.clone();
        }
        self.attach(node, model)?;
        Ok(node)
    }

    pub fn node(&self, id: NamespaceId) -> Option<&NamespaceModel> {
        self.nodes.get(id.0)
    }

    pub fn roots(&self) -> &[NamespaceId] {
        &self.roots
    }

    /// Number of namespace nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Freeze the tree into an immutable assembly model.
    pub fn finish(self, info: AssemblyInfo) -> AssemblyModel {
        AssemblyModel::from_parts(info, self.roots, self.nodes)
    }

    fn segments<'a>(&self, full_namespace: &'a str) -> Result<Vec<&'a str>, TreeError> {
        if full_namespace.is_empty() {
            return Ok(Vec::new());
        }

        let segments: Vec<&str> = full_namespace.split('.').collect();
        if !segments.iter().any(|s| s.is_empty()) {
            return Ok(segments);
        }

        match self.policy {
            NamespacePolicy::Reject => Err(TreeError::MalformedNamespace {
                namespace: full_namespace.to_string(),
            }),
            NamespacePolicy::Collapse => {
                Ok(segments.into_iter().filter(|s| !s.is_empty()).collect())
            }
        }
    }

    fn global(&mut self) -> NamespaceId {
        if let Some(id) = self.global {
            return id;
        }
        let id = self.push_node(None, "");
        self.global = Some(id);
        id
    }

    fn child_or_create(&mut self, parent: Option<NamespaceId>, pattern: &str) -> NamespaceId {
        let siblings = match parent {
            Some(id) => &self.nodes[id.0].children,
            None => &self.roots,
        };
        let existing = siblings
            .iter()
            .find(|child| self.nodes[child.0].pattern == pattern)
            .copied();

        match existing {
            Some(id) => id,
            None => self.push_node(parent, pattern),
        }
    }

    fn push_node(&mut self, parent: Option<NamespaceId>, pattern: &str) -> NamespaceId {
        let id = NamespaceId(self.nodes.len());
        self.nodes.push(NamespaceModel::new(id, pattern));
        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        debug!(namespace = pattern, id = id.0, "created namespace node");
        id
    }
}
