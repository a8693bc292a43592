//! Assembly model construction.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use doctree_model::{AssemblyInfo, AssemblyModel, NamespacePolicy, NamespaceTree, TypeModel};

use crate::error::BuildError;
use crate::extract::BaseMembers;
use crate::factory::build_type_model;
use crate::metadata::{LibraryMetadata, MetadataDocument, TypeDescriptor};

/// Options controlling a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Drop members indistinguishable from members of the universal base type.
    pub filter_base_members: bool,
    /// Abort on the first failing type instead of skipping it.
    pub fail_fast: bool,
    /// Build type models on the rayon pool.
    pub parallel: bool,
    pub namespace_policy: NamespacePolicy,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            filter_base_members: true,
            fail_fast: false,
            parallel: true,
            namespace_policy: NamespacePolicy::default(),
        }
    }
}

/// A type that was skipped during a build.
#[derive(Debug)]
pub struct TypeFailure {
    pub type_name: String,
    pub error: BuildError,
}

/// The outcome of a build: the assembly plus every isolated failure.
#[derive(Debug)]
pub struct BuildReport {
    pub assembly: AssemblyModel,
    /// Failures in input order.
    pub failures: Vec<TypeFailure>,
}

impl BuildReport {
    /// True when every type made it into the assembly.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds an [`AssemblyModel`] from library metadata and type descriptors.
#[derive(Debug, Clone)]
pub struct AssemblyModelBuilder {
    options: BuildOptions,
    base: BaseMembers,
}

impl Default for AssemblyModelBuilder {
    fn default() -> Self {
        Self::new(BuildOptions::default())
    }
}

impl AssemblyModelBuilder {
    /// A builder filtering against the `System.Object` surface.
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            base: BaseMembers::system_object(),
        }
    }

    /// Replace the universal base type surface used for filtering.
    pub fn with_base(mut self, base: BaseMembers) -> Self {
        self.base = base;
        self
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build every type and insert it into a fresh namespace tree.
    ///
    /// Types are inserted in input order. A failing type is skipped and
    /// recorded unless `fail_fast` is set, in which case the first failure in
    /// input order is returned.
    pub fn build<L, D>(&self, library: &L, descriptors: &[D]) -> Result<BuildReport, BuildError>
    where
        L: LibraryMetadata + ?Sized,
        D: TypeDescriptor,
    {
        let filter = self.options.filter_base_members;
        let models: Vec<Result<TypeModel, BuildError>> = if self.options.parallel {
            descriptors
                .par_iter()
                .map(|d| build_type_model(d, &self.base, filter))
                .collect()
        } else {
            descriptors
                .iter()
                .map(|d| build_type_model(d, &self.base, filter))
                .collect()
        };

        let mut tree = NamespaceTree::with_policy(self.options.namespace_policy);
        let mut failures = Vec::new();

        for (descriptor, model) in descriptors.iter().zip(models) {
            let result = model.and_then(|model| tree.insert(model).map_err(BuildError::from));
            match result {
                Ok(node) => {
                    debug!(
                        type_name = descriptor.full_name(),
                        node = node.index(),
                        "attached type"
                    );
                }
                Err(error) if self.options.fail_fast => return Err(error),
                Err(error) => {
                    warn!(type_name = descriptor.full_name(), %error, "skipping type");
                    failures.push(TypeFailure {
                        type_name: descriptor.full_name().to_string(),
                        error,
                    });
                }
            }
        }

        let assembly = tree.finish(AssemblyInfo {
            name: library.name().to_string(),
            version: library.version().to_string(),
            description: library.description().map(str::to_string),
            distribution: library.distribution(),
        });
        info!(
            assembly = %assembly.name,
            types = assembly.type_count(),
            namespaces = assembly.namespace_count(),
            failures = failures.len(),
            "built assembly model"
        );

        Ok(BuildReport { assembly, failures })
    }

    /// Build from a loaded metadata document, using its base type when present.
    pub fn build_document(&self, document: &MetadataDocument) -> Result<BuildReport, BuildError> {
        match &document.base_type {
            Some(_) => {
                let base = document.base_members().map_err(BuildError::BaseType)?;
                self.clone()
                    .with_base(base)
                    .build(&document.library, &document.types)
            }
            None => self.build(&document.library, &document.types),
        }
    }
}
