//! Route table file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::loader::{load_config, ConfigResult};
use crate::observability::metrics;
use crate::routing::SharedRouteTrie;

/// A watcher that reloads a route table file into a shared trie.
#[derive(Debug)]
pub struct RouteTableWatcher {
    path: PathBuf,
    trie: Arc<SharedRouteTrie<String>>,
}

impl RouteTableWatcher {
    /// Create a watcher feeding `trie` from the table at `path`.
    pub fn new(path: &Path, trie: Arc<SharedRouteTrie<String>>) -> Self {
        Self {
            path: path.to_path_buf(),
            trie,
        }
    }

    /// Load the table once and swap it into the trie.
    ///
    /// On error the routes currently served are left untouched.
    pub fn reload(&self) -> ConfigResult<usize> {
        reload_into(&self.path, &self.trie)
    }

    /// Start watching the file in a background thread.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let trie = Arc::clone(&self.trie);
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Route table change detected, reloading...");
                        if let Err(e) = reload_into(&path, &trie) {
                            tracing::error!(
                                "Failed to reload route table: {}. Keeping current routes.",
                                e
                            );
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Route table watcher started");
        Ok(watcher)
    }
}

fn reload_into(path: &Path, trie: &SharedRouteTrie<String>) -> ConfigResult<usize> {
    let built = load_config(path).and_then(|config| Ok(config.build_trie()?));
    match built {
        Ok(next) => {
            let count = next.len();
            trie.reload(next);
            metrics::record_reload(Some(count));
            Ok(count)
        }
        Err(e) => {
            metrics::record_reload(None);
            Err(e)
        }
    }
}
