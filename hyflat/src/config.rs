use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// Default nesting limit applied when reading literals.
pub const DEFAULT_MAX_DEPTH: usize = 4096;

/// Limits applied by [`flatten_with`](crate::flatten::flatten_with) and the
/// [`parser`](crate::parser).
///
/// Can be decoded from a TOML document; omitted keys keep their default and `0` disables a limit:
///
/// ```toml
/// max_depth = 64
/// max_leaves = 0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlattenConfig {
    /// Deepest nesting accepted, as measured by [`Node::depth`](crate::node::Node::depth).
    #[serde(deserialize_with = "zero_as_unlimited")]
    pub max_depth: Option<usize>,
    /// Largest number of leaves a flattening may produce.
    #[serde(deserialize_with = "zero_as_unlimited")]
    pub max_leaves: Option<usize>,
}

fn zero_as_unlimited<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<usize>, D::Error> {
    Ok(Option::<usize>::deserialize(deserializer)?.filter(|&limit| limit != 0))
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            max_leaves: None,
        }
    }
}

impl FlattenConfig {
    /// No limit on depth nor on the number of leaves.
    pub fn unlimited() -> Self {
        Self {
            max_depth: None,
            max_leaves: None,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_max_leaves(mut self, max_leaves: usize) -> Self {
        self.max_leaves = Some(max_leaves);
        self
    }

    /// Decode a configuration from TOML text.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        toml::from_str(src).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Fail if a nesting of `depth` is beyond the configured limit.
    #[inline]
    pub(crate) fn check_depth(&self, depth: usize) -> Result<()> {
        match self.max_depth {
            Some(max) if depth > max => Err(Error::DepthLimitExceeded { depth, max }),
            _ => Ok(()),
        }
    }

    /// Fail if holding `count` leaves is beyond the configured limit.
    #[inline]
    pub(crate) fn check_leaves(&self, count: usize) -> Result<()> {
        match self.max_leaves {
            Some(max) if count > max => Err(Error::LeafLimitExceeded { max }),
            _ => Ok(()),
        }
    }
}
