//! Alias declarations: the alias map, the `.sdraliases` parser and the extractor
//!
//! Alias declaration files are found by the same walk as ordinary node files.
//! They never reach the final catalog; instead their content is merged into
//! an [`AliasMap`] that is later applied to the surviving records.
//!
//! The default file format is TOML, mapping node identifiers to alias lists:
//!
//! ```toml
//! PxrSurface = ["PxrMaterial", "LamaSurface"]
//! PxrDisney = ["DisneyBxdf"]
//! ```
//!
//! The same mapping may also live under an `[aliases]` table.

use crate::{DiscoveryRecord, Error, Result};
use ndr_fs::{NodeExtension, NormalizedPath, io};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Mapping from node identifier to its ordered alias names.
///
/// Built fresh for every discovery call.
///
/// # Example
///
/// ```
/// use ndr_discovery::AliasMap;
///
/// let mut aliases = AliasMap::new();
/// aliases.merge("PxrSurface", vec!["PxrMaterial".to_string()]);
/// assert_eq!(aliases.get("PxrSurface"), Some(&["PxrMaterial".to_string()][..]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap {
    entries: HashMap<String, Vec<String>>,
}

impl AliasMap {
    /// Create a new empty alias map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one declaration into the map.
    ///
    /// An identifier that is already present is overwritten: the most
    /// recently merged declaration wins. The replaced list is returned.
    pub fn merge(
        &mut self,
        identifier: impl Into<String>,
        aliases: Vec<String>,
    ) -> Option<Vec<String>> {
        self.entries.insert(identifier.into(), aliases)
    }

    /// Get the aliases declared for an identifier.
    pub fn get(&self, identifier: &str) -> Option<&[String]> {
        self.entries.get(identifier).map(Vec::as_slice)
    }

    /// List every identifier with declared aliases, sorted.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<String>)> for AliasMap {
    fn from_iter<I: IntoIterator<Item = (S, Vec<String>)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (identifier, aliases) in iter {
            map.merge(identifier, aliases);
        }
        map
    }
}

/// Reads an alias declaration file into `(identifier, aliases)` pairs.
///
/// A parser either returns every declaration of the file or an error; it
/// never returns a partial result.
pub trait AliasParser: Send + Sync {
    fn parse_aliases(&self, record: &DiscoveryRecord) -> Result<Vec<(String, Vec<String>)>>;
}

/// Parser for TOML alias declaration files.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlAliasParser;

#[derive(Deserialize)]
#[serde(untagged)]
enum AliasFile {
    Sectioned(AliasSection),
    Flat(BTreeMap<String, Vec<String>>),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AliasSection {
    aliases: BTreeMap<String, Vec<String>>,
}

impl TomlAliasParser {
    /// Parse alias declarations from TOML text.
    pub fn parse_str(&self, content: &str) -> std::result::Result<Vec<(String, Vec<String>)>, String> {
        let file: AliasFile = toml::from_str(content).map_err(|e| e.to_string())?;
        let entries = match file {
            AliasFile::Sectioned(section) => section.aliases,
            AliasFile::Flat(entries) => entries,
        };
        Ok(entries.into_iter().collect())
    }
}

impl AliasParser for TomlAliasParser {
    fn parse_aliases(&self, record: &DiscoveryRecord) -> Result<Vec<(String, Vec<String>)>> {
        let path = NormalizedPath::new(&record.uri);
        let content = io::read_text(&path)?;
        self.parse_str(&content).map_err(|message| Error::AliasParse {
            path: path.to_native(),
            message,
        })
    }
}

/// Recognizes alias declaration records and merges their aliases.
#[derive(Clone)]
pub struct AliasExtractor {
    parser: Arc<dyn AliasParser>,
}

impl AliasExtractor {
    pub fn new(parser: Arc<dyn AliasParser>) -> Self {
        Self { parser }
    }

    /// Extract aliases from `record` if it is an alias declaration file.
    ///
    /// Returns `true` when the record is an alias declaration and must be
    /// left out of the catalog. That decision depends only on the file
    /// extension: a file that fails to parse is still excluded, and none of
    /// its declarations are merged.
    pub fn try_extract_aliases(&self, record: &DiscoveryRecord, aliases: &mut AliasMap) -> bool {
        if !NodeExtension::SdrAliases.matches_uri(&record.uri) {
            return false;
        }

        match self.parser.parse_aliases(record) {
            Ok(declarations) => {
                tracing::debug!(
                    uri = %record.uri,
                    count = declarations.len(),
                    "Extracted alias declarations"
                );
                for (identifier, names) in declarations {
                    if let Some(previous) = aliases.merge(identifier.clone(), names) {
                        tracing::warn!(
                            uri = %record.uri,
                            identifier = %identifier,
                            ?previous,
                            "Aliases for {} declared more than once; keeping the later declaration",
                            identifier
                        );
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Ignoring alias file {}: {}", record.uri, e);
            }
        }

        true
    }
}

impl Default for AliasExtractor {
    fn default() -> Self {
        Self::new(Arc::new(TomlAliasParser))
    }
}

impl std::fmt::Debug for AliasExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AliasExtractor").finish_non_exhaustive()
    }
}
