//! Discovery records and the per-call discovery context

use ndr_fs::{FoundFile, NodeExtension};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One discoverable node, as found on disk and before its content is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryRecord {
    /// Stable key used to correlate the record with alias declarations
    pub identifier: String,
    /// Display name of the node
    pub name: String,
    /// Extension the record was classified by (lowercase, no dot)
    pub extension: String,
    /// Location of the source file
    pub uri: String,
    /// Alternate names, empty until aliases are resolved
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl DiscoveryRecord {
    /// Create a record whose name equals its identifier and that has no aliases.
    pub fn new(
        identifier: impl Into<String>,
        extension: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        let identifier = identifier.into();
        Self {
            name: identifier.clone(),
            identifier,
            extension: extension.into(),
            uri: uri.into(),
            aliases: Vec::new(),
        }
    }

    /// Whether the record's URI names an alias declaration file.
    pub fn is_alias_declaration(&self) -> bool {
        NodeExtension::SdrAliases.matches_uri(&self.uri)
    }
}

impl From<FoundFile> for DiscoveryRecord {
    fn from(file: FoundFile) -> Self {
        Self::new(file.identifier, file.extension, String::from(file.path))
    }
}

/// Opaque per-call context handed to the walker unchanged.
///
/// The engine never inspects it; walkers may use the label and hints to
/// tailor a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryContext {
    label: Option<String>,
    hints: BTreeMap<String, String>,
}

impl DiscoveryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a label identifying the caller, used in log output.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attach a free-form key/value hint for the walker.
    pub fn with_hint(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.hints.insert(key.into(), value.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn hint(&self, key: &str) -> Option<&str> {
        self.hints.get(key).map(String::as_str)
    }
}
