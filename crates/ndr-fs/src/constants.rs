//! The reserved file extensions recognized during node discovery.

use std::str::FromStr;

/// File extensions that discovery understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeExtension {
    /// `.args` files (textual shader metadata and argument descriptions)
    Args,
    /// `.oso` files (compiled OSL shader binaries)
    Oso,
    /// `.sdraliases` files (alias declarations, never part of a catalog)
    SdrAliases,
}

impl NodeExtension {
    /// Every reserved extension, in the order they are searched for.
    pub const ALL: [NodeExtension; 3] = [Self::Args, Self::Oso, Self::SdrAliases];

    /// Get the extension without the leading dot.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Args => "args",
            Self::Oso => "oso",
            Self::SdrAliases => "sdraliases",
        }
    }

    /// Get the file-name suffix including the leading dot.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Args => ".args",
            Self::Oso => ".oso",
            Self::SdrAliases => ".sdraliases",
        }
    }

    /// Whether `uri` names a file carrying this extension, ignoring ASCII case.
    pub fn matches_uri(&self, uri: &str) -> bool {
        let suffix = self.suffix();
        uri.len()
            .checked_sub(suffix.len())
            .and_then(|start| uri.get(start..))
            .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
    }

    /// The reserved extensions as owned strings, ready for a search configuration.
    pub fn all_strings() -> Vec<String> {
        Self::ALL.iter().map(|ext| ext.as_str().to_string()).collect()
    }
}

impl FromStr for NodeExtension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('.').to_lowercase().as_str() {
            "args" => Ok(Self::Args),
            "oso" => Ok(Self::Oso),
            "sdraliases" => Ok(Self::SdrAliases),
            other => Err(format!("unknown node extension: {other}")),
        }
    }
}

impl AsRef<str> for NodeExtension {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for NodeExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
