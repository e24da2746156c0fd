//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     add / set (path, value)
//!     → path.rs (normalize, split first segment)
//!     → node.rs (find or create child, key parsed once by key.rs)
//!     → value stored at terminal node
//!     → callbacks.rs (notify subscribers in order)
//!
//! Lookup:
//!     match_path (path)
//!     → node.rs, one frame per consumed segment:
//!         terminal | exact key | parameter keys | wildcard keys
//!         (an exhausted frame is popped, its parent tries the next key)
//!     → matched.rs (collapse keys and params along the winning frames)
//!     → Return: RouteMatch or explicit no-match
//! ```
//!
//! # Design Decisions
//! - No regex anywhere: keys are classified once at insertion
//! - Fixed precedence exact > parametric > wildcard, no weighting
//! - Deterministic: same trie and path always produce equal results
//! - `RouteTrie` is single-owner; `SharedRouteTrie` adds lock-free reads

pub mod callbacks;
pub mod error;
pub mod key;
pub mod matched;
pub mod node;
pub mod path;
pub mod shared;
pub mod trie;

pub use callbacks::{CallbackId, RouteCallback};
pub use error::{TrieError, TrieResult};
pub use key::{ParamKind, RouteKey};
pub use matched::{ParamValue, RouteMatch};
pub use shared::SharedRouteTrie;
pub use trie::RouteTrie;
