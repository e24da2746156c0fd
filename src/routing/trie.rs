//! Route trie facade.
//!
//! # Responsibilities
//! - Own the root node, the route syntax and the change subscribers
//! - Register routes with conflict detection (`add`) or overwrite (`set`)
//! - Resolve paths to values and captured parameters
//!
//! # Design Decisions
//! - Mutation takes `&mut self`: callbacks cannot re-enter the trie they
//!   observe, use `SharedRouteTrie` when they must
//! - Subscribers are notified synchronously, in registration order, after
//!   the value is stored
//! - "No match" is `Ok(None)`; only parameter collisions are errors

use std::sync::Arc;

use crate::config::TrieConfig;
use crate::observability::metrics;
use crate::routing::callbacks::{CallbackId, Callbacks};
use crate::routing::error::TrieResult;
use crate::routing::matched::RouteMatch;
use crate::routing::node::RouteTree;

/// Path trie mapping route patterns to opaque values.
///
/// ```
/// use route_trie::RouteTrie;
///
/// let mut trie = RouteTrie::new();
/// trie.add("/users/{id:number}", "user-detail").unwrap();
///
/// let matched = trie.match_path("/users/42").unwrap().unwrap();
/// assert_eq!(**matched.value(), "user-detail");
/// assert_eq!(matched.get("id").and_then(|v| v.as_number()), Some(42.0));
/// ```
#[derive(Debug, Clone)]
pub struct RouteTrie<T> {
    config: TrieConfig,
    root: RouteTree<T>,
    pub(crate) callbacks: Callbacks<T>,
}

impl<T> Default for RouteTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RouteTrie<T> {
    /// Create a trie using `/`, `:` and `*` as route syntax.
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    pub fn with_config(config: TrieConfig) -> Self {
        Self {
            config,
            root: RouteTree::new(),
            callbacks: Callbacks::default(),
        }
    }

    /// Register `value` at `path`, failing if the path already holds a value.
    pub fn add(&mut self, path: &str, value: T) -> TrieResult<()> {
        self.register(path, value, false)
    }

    /// Register `value` at `path`, replacing any existing value.
    pub fn set(&mut self, path: &str, value: T) -> TrieResult<()> {
        self.register(path, value, true)
    }

    fn register(&mut self, path: &str, value: T, overwrite: bool) -> TrieResult<()> {
        let (stored, replaced) = match self.root.insert(path, value, overwrite, &self.config) {
            Ok(inserted) => inserted,
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Route registration rejected");
                metrics::record_conflict();
                return Err(e);
            }
        };

        tracing::debug!(path = %path, overwrite, replaced, "Route registered");
        metrics::record_registration(overwrite);
        self.callbacks.notify(path, stored);
        Ok(())
    }

    /// Resolve `path` against the registered routes.
    ///
    /// Returns `Ok(None)` when no exact, parametric or wildcard route
    /// resolves, and an error when the matched route binds a parameter name
    /// twice.
    pub fn match_path(&self, path: &str) -> TrieResult<Option<RouteMatch<&T>>> {
        let resolved = match self.root.resolve(path, &self.config) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Route match failed");
                metrics::record_lookup("error");
                return Err(e);
            }
        };

        let matched = resolved.map(|partial| partial.finish(path, self.config.path_separator));
        match &matched {
            Some(m) => {
                tracing::trace!(path = %path, route = %m.route(), "Route matched");
                metrics::record_lookup("hit");
            }
            None => {
                tracing::trace!(path = %path, "No route matched");
                metrics::record_lookup("miss");
            }
        }
        Ok(matched)
    }

    /// Value registered under exactly this route pattern (no matching).
    pub fn get(&self, path: &str) -> Option<&T> {
        self.root.get(path, &self.config)
    }

    /// Subscribe to route additions and overwrites.
    pub fn add_callback<F>(&mut self, callback: F) -> CallbackId
    where
        F: Fn(&str, &T) + Send + Sync + 'static,
    {
        self.callbacks.add(Arc::new(callback))
    }

    /// Unsubscribe. Unknown handles are a no-op returning false.
    pub fn remove_callback(&mut self, id: CallbackId) -> bool {
        self.callbacks.remove(id)
    }

    /// Registered route patterns with their values, depth first.
    pub fn routes(&self) -> Vec<(String, &T)> {
        self.root.routes(self.config.path_separator)
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}
