//! Path-matching route trie.
//!
//! Resolves URL-like paths to registered values, extracting typed
//! parameters and wildcard captures along the way.
//!
//! # Route Syntax
//! - `users`: literal segment, matched exactly
//! - `{id}` / `{id:string}`: one segment captured as a string
//! - `{id:number}`: one segment captured as a number
//! - `{flag:boolean}`: one segment, `true`/`1` are true, anything else false
//! - `{rest:*}`: the current segment and everything after it
//!
//! Resolution order at every segment: exact key, then parameters, then
//! wildcards. The first branch that resolves to a value wins.

pub mod config;
pub mod observability;
pub mod routing;

pub use config::{RouteTableConfig, TrieConfig};
pub use routing::{
    CallbackId, ParamKind, ParamValue, RouteKey, RouteMatch, RouteTrie, SharedRouteTrie,
    TrieError, TrieResult,
};
