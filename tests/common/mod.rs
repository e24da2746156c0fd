//! Shared utilities for integration tests.

use std::fs;
use std::path::PathBuf;

use route_trie::RouteTrie;

/// Build a trie from `(path, value)` pairs using `add`.
#[allow(dead_code)]
pub fn trie_with(routes: &[(&str, &'static str)]) -> RouteTrie<&'static str> {
    let mut trie = RouteTrie::new();
    for (path, value) in routes {
        trie.add(path, *value).unwrap();
    }
    trie
}

/// A route table file in the temp directory, removed on drop.
pub struct TempTable {
    pub path: PathBuf,
}

impl TempTable {
    pub fn new(content: &str) -> Self {
        let path = std::env::temp_dir().join(format!("route-table-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, content).unwrap();
        Self { path }
    }

    #[allow(dead_code)]
    pub fn rewrite(&self, content: &str) {
        fs::write(&self.path, content).unwrap();
    }
}

impl Drop for TempTable {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
