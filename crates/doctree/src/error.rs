//! Build errors.

use doctree_model::TreeError;

use crate::metadata::MetadataError;

/// Errors raised while building type models or inserting them into the tree.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("metadata unavailable for {type_name}: {reason}")]
    MetadataUnavailable { type_name: String, reason: String },

    #[error("enum {type_name} declares '{name}' more than once")]
    DuplicateEnumName { type_name: String, name: String },

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("failed to read base type members: {0}")]
    BaseType(MetadataError),
}

impl BuildError {
    pub(crate) fn unavailable(type_name: &str, err: MetadataError) -> Self {
        BuildError::MetadataUnavailable {
            type_name: type_name.to_string(),
            reason: err.to_string(),
        }
    }
}
