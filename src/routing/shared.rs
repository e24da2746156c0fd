//! Thread-safe route trie.
//!
//! # Responsibilities
//! - Serve lookups from many threads without blocking
//! - Apply registrations and full reloads atomically
//! - Notify subscribers without holding any lock
//!
//! # Design Decisions
//! - Copy-on-write: writers clone the current trie, mutate the copy and
//!   publish it through `ArcSwap`; readers keep whatever snapshot they loaded
//! - Writers are serialized by a mutex so concurrent registrations are not lost
//! - Callbacks run after the writer lock is released, so a callback may
//!   register further routes; such nested registrations complete before the
//!   outer notification loop continues
//! - Poisoned locks are recovered; the guarded data cannot be left half-written

use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;

use crate::config::TrieConfig;
use crate::routing::callbacks::{CallbackId, Callbacks};
use crate::routing::error::TrieResult;
use crate::routing::matched::RouteMatch;
use crate::routing::trie::RouteTrie;

/// A route trie shared between threads.
pub struct SharedRouteTrie<T> {
    current: ArcSwap<RouteTrie<T>>,
    writer: Mutex<()>,
    callbacks: Mutex<Callbacks<T>>,
}

impl<T> std::fmt::Debug for SharedRouteTrie<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRouteTrie").finish_non_exhaustive()
    }
}

impl<T: Clone> Default for SharedRouteTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> SharedRouteTrie<T> {
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    pub fn with_config(config: TrieConfig) -> Self {
        Self::from_trie(RouteTrie::with_config(config))
    }

    /// Share an already populated trie. Its own callbacks are discarded.
    pub fn from_trie(mut trie: RouteTrie<T>) -> Self {
        trie.callbacks = Callbacks::default();
        Self {
            current: ArcSwap::from_pointee(trie),
            writer: Mutex::new(()),
            callbacks: Mutex::new(Callbacks::default()),
        }
    }

    /// Register `value` at `path`, failing if the path already holds a value.
    pub fn add(&self, path: &str, value: T) -> TrieResult<()> {
        self.register(path, value, false)
    }

    /// Register `value` at `path`, replacing any existing value.
    pub fn set(&self, path: &str, value: T) -> TrieResult<()> {
        self.register(path, value, true)
    }

    fn register(&self, path: &str, value: T, overwrite: bool) -> TrieResult<()> {
        let notified = value.clone();
        {
            let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
            let mut next = (**self.current.load()).clone();
            if overwrite {
                next.set(path, value)?;
            } else {
                next.add(path, value)?;
            }
            self.current.store(Arc::new(next));
        }

        self.notify(path, &notified);
        Ok(())
    }

    /// Replace every route at once with the contents of `trie`.
    ///
    /// Subscribers are notified once per route of the new table, with the
    /// route pattern as path.
    pub fn reload(&self, mut trie: RouteTrie<T>) {
        trie.callbacks = Callbacks::default();
        let routes: Vec<(String, T)> = trie
            .routes()
            .into_iter()
            .map(|(route, value)| (route, value.clone()))
            .collect();
        {
            let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
            self.current.store(Arc::new(trie));
        }

        tracing::info!(routes = routes.len(), "Route table swapped");
        for (route, value) in &routes {
            self.notify(route, value);
        }
    }

    /// Resolve `path` against the current routes; the result owns its value.
    pub fn match_path(&self, path: &str) -> TrieResult<Option<RouteMatch<T>>> {
        let current = self.current.load();
        Ok(current.match_path(path)?.map(RouteMatch::cloned))
    }

    /// The trie as currently published. Later writes do not affect it.
    pub fn snapshot(&self) -> Arc<RouteTrie<T>> {
        self.current.load_full()
    }

    pub fn routes(&self) -> Vec<(String, T)> {
        self.current
            .load()
            .routes()
            .into_iter()
            .map(|(route, value)| (route, value.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.load().is_empty()
    }

    /// Subscribe to route additions, overwrites and reloads.
    pub fn add_callback<F>(&self, callback: F) -> CallbackId
    where
        F: Fn(&str, &T) + Send + Sync + 'static,
    {
        self.callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .add(Arc::new(callback))
    }

    /// Unsubscribe. Unknown handles are a no-op returning false.
    pub fn remove_callback(&self, id: CallbackId) -> bool {
        self.callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
    }

    fn notify(&self, path: &str, value: &T) {
        let snapshot = self
            .callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot();
        for callback in snapshot {
            callback(path, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::error::TrieError;
    use std::sync::Weak;
    use std::thread;

    #[test]
    fn test_add_set_match() {
        let trie = SharedRouteTrie::new();
        trie.add("/items/{id:number}", "item".to_string()).unwrap();

        assert_eq!(
            trie.add("/items/{id:number}", "again".to_string()),
            Err(TrieError::Conflict { path: "/items/{id:number}".into() })
        );

        trie.set("/items/{id:number}", "item-v2".to_string()).unwrap();
        let matched = trie.match_path("/items/3").unwrap().unwrap();
        assert_eq!(matched.value(), "item-v2");
        assert_eq!(matched.get("id").unwrap().as_number(), Some(3.0));
    }

    #[test]
    fn test_snapshot_is_isolated_from_writes() {
        let trie = SharedRouteTrie::new();
        trie.add("/a", 1).unwrap();

        let before = trie.snapshot();
        trie.add("/b", 2).unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(trie.len(), 2);
        assert!(before.match_path("/b").unwrap().is_none());
    }

    #[test]
    fn test_concurrent_readers_and_writer() {
        let trie = SharedRouteTrie::new();
        trie.add("/static", 0usize).unwrap();

        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..200 {
                        let matched = trie.match_path("/static").unwrap().unwrap();
                        assert_eq!(*matched.value(), 0);
                    }
                });
            }
            s.spawn(|| {
                for i in 1..=50 {
                    trie.add(&format!("/route/{i}"), i).unwrap();
                }
            });
        });

        assert_eq!(trie.len(), 51);
        assert_eq!(*trie.match_path("/route/50").unwrap().unwrap().value(), 50);
    }

    #[test]
    fn test_callback_may_register_routes() {
        let trie = Arc::new(SharedRouteTrie::new());
        let weak: Weak<SharedRouteTrie<String>> = Arc::downgrade(&trie);

        trie.add_callback(move |path, _value| {
            if path == "/primary" {
                if let Some(trie) = weak.upgrade() {
                    trie.add("/mirror", "mirror".to_string()).unwrap();
                }
            }
        });

        trie.add("/primary", "primary".to_string()).unwrap();
        let matched = trie.match_path("/mirror").unwrap().unwrap();
        assert_eq!(matched.value(), "mirror");
    }

    #[test]
    fn test_reload_replaces_routes_and_notifies() {
        let trie = SharedRouteTrie::new();
        trie.add("/old", "old").unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        let id = trie.add_callback(move |path, value: &&str| {
            log.lock().unwrap().push(format!("{path}={value}"));
        });

        let mut next = RouteTrie::new();
        next.add("/new/{id}", "new").unwrap();
        next.add("/", "home").unwrap();
        trie.reload(next);

        assert!(trie.match_path("/old").unwrap().is_none());
        assert_eq!(*trie.match_path("/new/1").unwrap().unwrap().value(), "new");
        assert_eq!(*seen.lock().unwrap(), vec!["/=home", "/new/{id}=new"]);
        assert!(trie.remove_callback(id));
        assert_eq!(trie.routes().len(), 2);
    }
}
