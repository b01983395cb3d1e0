//! CLI argument parsing using clap derive

use clap::Parser;
use std::path::PathBuf;

/// Discover shader nodes on the search paths and resolve their aliases
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "ndr-discover")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Search configuration file (TOML, JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory to search; repeat for several. Overrides --config and the environment.
    #[arg(short = 's', long = "search-path", value_name = "DIR")]
    pub search_paths: Vec<String>,

    /// Installed renderer plugin directory, searched for resources/shaders
    #[arg(long, value_name = "DIR", env = "NDR_PLUGIN_DIR")]
    pub plugin_dir: Option<PathBuf>,

    /// Do not follow symbolic links while walking
    #[arg(long)]
    pub no_follow_symlinks: bool,

    /// Keep only nodes with these extensions (e.g. -e oso -e args)
    #[arg(short = 'e', long = "only-ext", value_name = "EXT")]
    pub only_extensions: Vec<String>,

    /// Print the catalog as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the effective search paths and exit
    #[arg(long)]
    pub paths: bool,

    /// Print per-stage counts to stderr after the catalog
    #[arg(long)]
    pub report: bool,
}
