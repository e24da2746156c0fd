//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that the route syntax characters cannot be confused
//! - Detect duplicate and unreachable routes
//! - Reject routes that would fail every lookup (repeated parameter names)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouteTableConfig → Result<(), Vec<ValidationError>>
//! - Runs before a table is accepted into the system

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::config::schema::{RouteTableConfig, TrieConfig};
use crate::routing::path::segments;
use crate::routing::RouteKey;

/// A single semantic problem in a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("path separator must not be whitespace")]
    WhitespaceSeparator,

    #[error("param delimiter '{0}' clashes with the path separator or braces")]
    DelimiterClash(char),

    #[error("wildcard marker '{0}' must be non-empty and free of '}}' and the path separator")]
    InvalidWildcardMarker(String),

    #[error("route #{index} has no segments (write the root as the bare separator)")]
    EmptyRoutePath { index: usize },

    #[error("route '{path}' continues after a wildcard segment and can never match")]
    SegmentAfterWildcard { path: String },

    #[error("route '{path}' binds parameter '{name}' more than once")]
    DuplicateParamName { path: String, name: String },

    #[error("route '{path}' duplicates route '{first}' without `overwrite = true`")]
    DuplicateRoute { path: String, first: String },

    #[error("unknown log format '{0}' (expected 'pretty' or 'json')")]
    UnknownLogFormat(String),
}

/// Validate a parsed route table.
pub fn validate_config(config: &RouteTableConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = validate_syntax(&config.trie);

    if !matches!(config.logging.format.as_str(), "pretty" | "json") {
        errors.push(ValidationError::UnknownLogFormat(config.logging.format.clone()));
    }

    let separator = config.trie.path_separator;
    let mut seen: HashMap<Vec<&str>, &str> = HashMap::new();

    for (index, entry) in config.routes.iter().enumerate() {
        let parts = segments(&entry.path, separator);
        if parts.is_empty() && !is_bare_separator(&entry.path, separator) {
            errors.push(ValidationError::EmptyRoutePath { index });
            continue;
        }

        let keys: Vec<RouteKey> = parts
            .iter()
            .map(|part| RouteKey::parse(part, &config.trie))
            .collect();
        let wildcard_at = keys.iter().position(RouteKey::is_wildcard);
        if matches!(wildcard_at, Some(pos) if pos + 1 < keys.len()) {
            errors.push(ValidationError::SegmentAfterWildcard {
                path: entry.path.clone(),
            });
        }

        let mut names = HashSet::new();
        if let Some(name) = keys
            .iter()
            .filter_map(RouteKey::param_name)
            .find(|name| !names.insert(*name))
        {
            errors.push(ValidationError::DuplicateParamName {
                path: entry.path.clone(),
                name: name.to_string(),
            });
        }

        match seen.get(&parts).copied() {
            Some(first) if !entry.overwrite => {
                errors.push(ValidationError::DuplicateRoute {
                    path: entry.path.clone(),
                    first: first.to_string(),
                });
            }
            Some(_) => {}
            None => {
                seen.insert(parts, &entry.path);
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// The root is written as a single separator; `""` or `"//"` are mistakes.
fn is_bare_separator(path: &str, separator: char) -> bool {
    let mut chars = path.trim().chars();
    chars.next() == Some(separator) && chars.next().is_none()
}

fn validate_syntax(trie: &TrieConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if trie.path_separator.is_whitespace() {
        errors.push(ValidationError::WhitespaceSeparator);
    }
    if matches!(trie.param_delimiter, '{' | '}') || trie.param_delimiter == trie.path_separator {
        errors.push(ValidationError::DelimiterClash(trie.param_delimiter));
    }
    if trie.wildcard_marker.is_empty()
        || trie.wildcard_marker.contains('}')
        || trie.wildcard_marker.contains(trie.path_separator)
    {
        errors.push(ValidationError::InvalidWildcardMarker(
            trie.wildcard_marker.clone(),
        ));
    }

    errors
}
