use std::path::PathBuf;

use clap::Parser;
use treetable_lib::TreeConfig;
use treetable_lib::config::{DEFAULT_MAIN_COLUMN, DEFAULT_MAX_NODE_DEPTH};
use treetable_lib::model::{TreeEntry, TreeId};
use treetable_lib::sorter::Sorter;

#[derive(Debug, Parser)]
#[command(name = "treetable")]
#[command(about = "Print JSON tree data as an indented table")]
pub struct Opts {
    /// JSON file holding a list of `{ id, children, data }` entries
    pub file: PathBuf,

    /// Column rendered as the tree column
    #[arg(long, default_value = DEFAULT_MAIN_COLUMN)]
    pub main_column: String,

    /// Deepest level to print (roots are level 0)
    #[arg(long, default_value_t = DEFAULT_MAX_NODE_DEPTH)]
    pub max_depth: usize,

    /// Explicit root id; repeat for several roots
    #[arg(long = "root")]
    pub roots: Vec<String>,

    /// Comma separated fixed columns (inferred from the data when omitted)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Sort siblings by this column
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Reverse the sort order
    #[arg(long, requires = "sort_by")]
    pub descending: bool,

    /// Print every level instead of the roots only
    #[arg(long)]
    pub expand_all: bool,

    /// Select the node at this id path, e.g. `docs/b/c`
    #[arg(long)]
    pub select: Option<String>,

    /// Write the debug log to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log to stderr
    #[arg(long, short)]
    pub verbose: bool,
}

impl Opts {
    /// Builds the config, resolving `--root` ids against `data`.
    pub fn tree_config(&self, data: &[TreeEntry]) -> TreeConfig {
        let mut config = TreeConfig::default()
            .with_main_column(self.main_column.as_str())
            .with_max_node_depth(self.max_depth);
        if !self.roots.is_empty() {
            config = config.with_roots(self.roots.iter().map(|raw| resolve_id(data, raw)));
        }
        if !self.columns.is_empty() {
            config = config.with_fixed_columns(self.columns.iter().cloned());
        }
        if let Some(column) = &self.sort_by {
            let sorter = Sorter::by_column(column.as_str());
            config = config.with_sorter(if self.descending {
                sorter.reversed()
            } else {
                sorter
            });
        }
        config
    }

    /// The `--select` argument split into ids, resolved against `data`.
    pub fn select_path(&self, data: &[TreeEntry]) -> Option<Vec<TreeId>> {
        self.select.as_deref().map(|path| {
            path.split('/')
                .filter(|part| !part.is_empty())
                .map(|part| resolve_id(data, part))
                .collect()
        })
    }
}

/// Turns a command-line id into the id the data uses.
///
/// A string id spelled exactly like the argument wins; otherwise integers
/// parse as [`TreeId::Int`], so `1` reaches both `{"id": "1"}` and `{"id": 1}`.
fn resolve_id(data: &[TreeEntry], raw: &str) -> TreeId {
    let as_str = TreeId::from(raw);
    if data.iter().any(|entry| entry.id == as_str) {
        return as_str;
    }
    raw.parse().unwrap_or(as_str)
}
