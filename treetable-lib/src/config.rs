//! Tree configuration

use serde::Deserialize;
use serde::Serialize;

use crate::mapper::DataMapper;
use crate::model::TreeId;
use crate::sorter::Sorter;

/// Default name of the tree column.
pub const DEFAULT_MAIN_COLUMN: &str = "main";

/// Default rendering depth ceiling.
pub const DEFAULT_MAX_NODE_DEPTH: usize = 1000;

/// Options for turning tree data into an indexed table.
///
/// The plain options deserialize from JSON (snake_case or camelCase keys);
/// the mapper and sorter are code and can only be set through the builder.
///
/// # Example
///
/// ```
/// use treetable_lib::TreeConfig;
/// use treetable_lib::sorter::Sorter;
///
/// let config = TreeConfig::default()
///     .with_main_column("name")
///     .with_roots(["home"])
///     .with_sorter(Sorter::by_column("name"));
/// assert_eq!(config.max_node_depth, 1000);
///
/// let loaded: TreeConfig = serde_json::from_str(r#"{ "mainColumn": "name", "maxNodeDepth": 3 }"#).unwrap();
/// assert_eq!(loaded.main_column, "name");
/// assert_eq!(loaded.max_node_depth, 3);
/// assert!(loaded.roots.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Column rendered as the tree column; excluded from inferred columns.
    ///
    /// Default: `"main"`
    #[serde(alias = "mainColumn")]
    pub main_column: String,

    /// Depth ceiling for renderers. The indexer does not use it.
    ///
    /// Default: 1000
    #[serde(alias = "maxNodeDepth")]
    pub max_node_depth: usize,

    /// Explicit roots. When unset, entries nobody lists as a child are roots.
    pub roots: Option<Vec<TreeId>>,

    /// Explicit fixed columns. When unset, they are inferred from the data.
    #[serde(alias = "fixedColumns")]
    pub fixed_columns: Option<Vec<String>>,

    /// Per-column transforms of the display data.
    #[serde(skip)]
    pub data_mapper: Option<DataMapper>,

    /// Sibling comparator over display data.
    #[serde(skip)]
    pub sorter: Option<Sorter>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            main_column: DEFAULT_MAIN_COLUMN.to_string(),
            max_node_depth: DEFAULT_MAX_NODE_DEPTH,
            roots: None,
            fixed_columns: None,
            data_mapper: None,
            sorter: None,
        }
    }
}

impl TreeConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the main column.
    pub fn with_main_column(mut self, column: impl Into<String>) -> Self {
        self.main_column = column.into();
        self
    }

    /// Sets the depth ceiling.
    pub fn with_max_node_depth(mut self, depth: usize) -> Self {
        self.max_node_depth = depth;
        self
    }

    /// Sets explicit roots.
    pub fn with_roots<I>(mut self, roots: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TreeId>,
    {
        self.roots = Some(roots.into_iter().map(Into::into).collect());
        self
    }

    /// Sets explicit fixed columns.
    pub fn with_fixed_columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.fixed_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the data mapper.
    pub fn with_data_mapper(mut self, mapper: DataMapper) -> Self {
        self.data_mapper = Some(mapper);
        self
    }

    /// Sets the sibling sorter.
    pub fn with_sorter(mut self, sorter: Sorter) -> Self {
        self.sorter = Some(sorter);
        self
    }
}
