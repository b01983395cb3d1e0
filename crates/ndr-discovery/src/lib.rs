//! Node discovery and alias resolution.
//!
//! Walks shader search paths for node definition files (`.args`, `.oso`),
//! consumes `.sdraliases` alias declarations found along the way and
//! attaches the declared aliases to the discovered records.
//!
//! ```no_run
//! use ndr_discovery::{DiscoveryContext, DiscoveryEngine, SearchConfiguration};
//!
//! let engine = DiscoveryEngine::with_config(SearchConfiguration::new(["/opt/rman/lib/shaders"]))
//!     .with_filter(|record| record.extension == "oso");
//! for record in engine.discover_nodes(&DiscoveryContext::new())? {
//!     println!("{} {:?}", record.identifier, record.aliases);
//! }
//! # Ok::<(), ndr_discovery::Error>(())
//! ```

pub mod alias;
pub mod apply;
pub mod config;
pub mod defaults;
pub mod engine;
pub mod error;
pub mod filter;
pub mod paths;
pub mod record;
pub mod walker;

pub use alias::{AliasExtractor, AliasMap, AliasParser, TomlAliasParser};
pub use apply::AliasApplier;
pub use config::SearchConfiguration;
pub use defaults::{DiscoveryDefaults, defaults, install_defaults};
pub use engine::{DiscoveryEngine, DiscoveryReport, DiscoveryStage};
pub use error::{Error, Result};
pub use filter::{Disposition, FilterOutcome, InclusionPredicate, ResultFilter};
pub use paths::{EnvSource, PathResolver, ProcessEnv};
pub use record::{DiscoveryContext, DiscoveryRecord};
pub use walker::{FsWalker, NodeWalker};
