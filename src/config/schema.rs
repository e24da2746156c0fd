//! Configuration schema definitions.
//!
//! This module defines the route table file structure and the trie syntax
//! settings. All types derive Serde traits for deserialization from config
//! files.

use serde::{Deserialize, Serialize};

use crate::routing::{RouteTrie, TrieResult};

/// Root configuration of a route table file.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RouteTableConfig {
    /// Route syntax settings.
    pub trie: TrieConfig,

    /// Logging settings for the binary.
    pub logging: LoggingConfig,

    /// Route definitions, registered in file order.
    pub routes: Vec<RouteEntry>,
}

impl RouteTableConfig {
    /// Build a trie holding every route of this table.
    ///
    /// Routes flagged with `overwrite` use `set` semantics, all others use
    /// `add` and fail on conflict.
    pub fn build_trie(&self) -> TrieResult<RouteTrie<String>> {
        let mut trie = RouteTrie::with_config(self.trie.clone());
        for entry in &self.routes {
            if entry.overwrite {
                trie.set(&entry.path, entry.target.clone())?;
            } else {
                trie.add(&entry.path, entry.target.clone())?;
            }
        }
        Ok(trie)
    }
}

/// Syntax of the paths and route keys understood by a trie.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrieConfig {
    /// Character separating path segments.
    pub path_separator: char,

    /// Character separating a parameter name from its type (`{id:number}`).
    pub param_delimiter: char,

    /// Parameter type marking a wildcard capture (`{rest:*}`).
    pub wildcard_marker: String,
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self {
            path_separator: '/',
            param_delimiter: ':',
            wildcard_marker: "*".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,

    /// Output format: `pretty` or `json`.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// A single route of the table.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteEntry {
    /// Route pattern, e.g. `/users/{id:number}`.
    pub path: String,

    /// Opaque target the route resolves to.
    pub target: String,

    /// Replace an earlier route registered under the same path.
    #[serde(default)]
    pub overwrite: bool,
}
