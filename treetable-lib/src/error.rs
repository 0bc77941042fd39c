//! Error types

use crate::model::TreeId;

/// Errors raised while building or querying an indexed tree.
///
/// Cycles and duplicate ids are not errors: cycles are truncated and the
/// first entry with a given id wins.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeError {
    /// A root or child id has no entry in the source data.
    #[error("Malformed tree: no entry for id '{id}'{}", referenced_by_suffix(.referenced_by))]
    MalformedTree {
        /// The id that could not be found.
        id: TreeId,
        /// The entry listing `id` as a child, or `None` for a root id.
        referenced_by: Option<TreeId>,
    },

    /// The operation is not provided by this tree source.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}

impl TreeError {
    /// Creates a new malformed tree error.
    pub fn malformed(id: impl Into<TreeId>, referenced_by: Option<TreeId>) -> Self {
        Self::MalformedTree {
            id: id.into(),
            referenced_by,
        }
    }

    /// Creates a new unsupported operation error.
    pub fn unsupported(operation: &'static str) -> Self {
        Self::UnsupportedOperation(operation)
    }
}

fn referenced_by_suffix(referenced_by: &Option<TreeId>) -> String {
    match referenced_by {
        Some(parent) => format!(" (listed as a child of '{}')", parent),
        None => " (listed as a root)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display_names_parent() {
        let error = TreeError::malformed(5, Some(TreeId::from("dir")));
        let display = error.to_string();
        assert!(display.contains("'5'"));
        assert!(display.contains("child of 'dir'"));
    }

    #[test]
    fn test_malformed_display_for_root() {
        let error = TreeError::malformed("missing", None);
        assert_eq!(
            error.to_string(),
            "Malformed tree: no entry for id 'missing' (listed as a root)"
        );
    }
}
