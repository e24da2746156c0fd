//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! route table file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouteTableConfig (validated, immutable)
//!     → build_trie() → RouteTrie<String>
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new table
//!     → validation.rs validates
//!     → build_trie()
//!     → SharedRouteTrie::reload (atomic swap)
//! ```
//!
//! # Design Decisions
//! - Every section has defaults, so an empty file is a valid (empty) table
//! - Validation separates syntactic (serde) from semantic checks
//! - A table that fails to load never replaces the routes being served

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError, ConfigResult};
pub use schema::{LoggingConfig, RouteEntry, RouteTableConfig, TrieConfig};
pub use validation::{validate_config, ValidationError};
pub use watcher::RouteTableWatcher;
