//! Segment-keyed route tree.
//!
//! # Responsibilities
//! - Store children keyed by the raw segment they were registered with
//! - Insert values at normalized paths, enforcing the overwrite rule
//! - Resolve a path with exact > parametric > wildcard precedence
//!
//! # Design Decisions
//! - Nodes live in one arena and refer to children by index, so route depth
//!   is bounded by memory only: no walk, clone or drop recurses per segment
//! - Children keep insertion order; the parametric and wildcard tiers scan
//!   them in that order, the exact tier goes through a raw-key index
//! - Each child carries its parsed `RouteKey`, so matching never re-parses
//! - Lookup keeps an explicit stack of frames, one per segment consumed; a
//!   failing frame is popped and its parent moves on to its next candidate
//! - Wildcards capture the rest of the path without descending further

use std::collections::HashMap;

use crate::config::TrieConfig;
use crate::routing::error::{TrieError, TrieResult};
use crate::routing::key::RouteKey;
use crate::routing::matched::{ParamValue, PartialMatch};
use crate::routing::path::{coerce, normalize, segments, split_first};

const ROOT: usize = 0;

/// All nodes of one trie.
#[derive(Debug, Clone)]
pub struct RouteTree<T> {
    nodes: Vec<Node<T>>,
}

#[derive(Debug, Clone)]
struct Node<T> {
    children: Vec<RouteChild>,
    index: HashMap<String, usize>,
    value: Option<T>,
}

#[derive(Debug, Clone)]
struct RouteChild {
    raw: String,
    key: RouteKey,
    node: usize,
}

impl<T> Node<T> {
    fn new() -> Self {
        Self {
            children: Vec::new(),
            index: HashMap::new(),
            value: None,
        }
    }
}

/// Progress of one lookup frame through the resolution tiers.
#[derive(Debug, Clone, Copy)]
enum Tier {
    Terminal,
    Exact,
    Param(usize),
    Wildcard(usize),
    Exhausted,
}

/// Child a frame committed to, and whether it was reached by exact key.
#[derive(Debug, Clone, Copy)]
enum Choice {
    Exact(usize),
    Keyed(usize),
}

enum Step<'a, T> {
    Descend(usize),
    Matched(&'a T),
    Exhausted,
}

/// One consumed segment of the path being resolved.
struct Frame<'q> {
    node: usize,
    remainder: &'q str,
    segment: &'q str,
    rest: &'q str,
    tier: Tier,
    chosen: Option<Choice>,
}

impl<'q> Frame<'q> {
    fn new(node: usize, path: &'q str, separator: char) -> Self {
        let remainder = normalize(path, separator);
        let (segment, rest) = split_first(remainder, separator);
        Self {
            node,
            remainder,
            segment,
            rest,
            tier: if remainder.is_empty() {
                Tier::Terminal
            } else {
                Tier::Exact
            },
            chosen: None,
        }
    }

    /// Move to the next candidate of this frame.
    fn advance<'a, T>(&mut self, nodes: &'a [Node<T>]) -> Step<'a, T> {
        let node = &nodes[self.node];
        loop {
            match self.tier {
                Tier::Terminal => {
                    self.tier = Tier::Exhausted;
                    if let Some(value) = &node.value {
                        return Step::Matched(value);
                    }
                }
                Tier::Exact => {
                    self.tier = Tier::Param(0);
                    if let Some(&pos) = node.index.get(self.segment) {
                        self.chosen = Some(Choice::Exact(pos));
                        return Step::Descend(node.children[pos].node);
                    }
                }
                Tier::Param(pos) => match node.children.get(pos) {
                    Some(child) => {
                        self.tier = Tier::Param(pos + 1);
                        if let RouteKey::Param { .. } = child.key {
                            self.chosen = Some(Choice::Keyed(pos));
                            return Step::Descend(child.node);
                        }
                    }
                    None => self.tier = Tier::Wildcard(0),
                },
                Tier::Wildcard(pos) => match node.children.get(pos) {
                    Some(child) => {
                        self.tier = Tier::Wildcard(pos + 1);
                        if !child.key.is_wildcard() {
                            continue;
                        }
                        // A wildcard without its own value only leads deeper,
                        // and wildcards never descend.
                        if let Some(value) = &nodes[child.node].value {
                            self.chosen = Some(Choice::Keyed(pos));
                            return Step::Matched(value);
                        }
                    }
                    None => self.tier = Tier::Exhausted,
                },
                Tier::Exhausted => return Step::Exhausted,
            }
        }
    }
}

impl<T> Default for RouteTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RouteTree<T> {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new()],
        }
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.value.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(|n| n.value.is_none())
    }

    /// Store `value` at `path`.
    ///
    /// Returns the stored value and whether it replaced an earlier one.
    /// Fails with [`TrieError::Conflict`] if the path already holds a value
    /// and `overwrite` is false; the tree is left unchanged in that case.
    pub fn insert(
        &mut self,
        path: &str,
        value: T,
        overwrite: bool,
        config: &TrieConfig,
    ) -> TrieResult<(&T, bool)> {
        let mut id = ROOT;
        for segment in segments(path, config.path_separator) {
            id = self.child_or_insert(id, segment, config);
        }

        let slot = &mut self.nodes[id].value;
        let replaced = slot.is_some();
        if replaced && !overwrite {
            return Err(TrieError::Conflict {
                path: path.to_string(),
            });
        }
        let stored: &T = slot.insert(value);
        Ok((stored, replaced))
    }

    /// Value registered under exactly this route pattern, keys compared raw.
    pub fn get(&self, path: &str, config: &TrieConfig) -> Option<&T> {
        let mut node = &self.nodes[ROOT];
        for segment in segments(path, config.path_separator) {
            let pos = *node.index.get(segment)?;
            node = &self.nodes[node.children[pos].node];
        }
        node.value.as_ref()
    }

    fn child_or_insert(&mut self, parent: usize, raw: &str, config: &TrieConfig) -> usize {
        if let Some(&pos) = self.nodes[parent].index.get(raw) {
            return self.nodes[parent].children[pos].node;
        }

        let id = self.nodes.len();
        self.nodes.push(Node::new());
        let node = &mut self.nodes[parent];
        node.index.insert(raw.to_string(), node.children.len());
        node.children.push(RouteChild {
            raw: raw.to_string(),
            key: RouteKey::parse(raw, config),
            node: id,
        });
        id
    }

    /// Resolve `path` from the root.
    ///
    /// Every frame tries its terminal value, its exact child, its parametric
    /// children and finally its wildcard children; the first candidate that
    /// ends in a value wins.
    pub(crate) fn resolve<'a>(
        &'a self,
        path: &str,
        config: &TrieConfig,
    ) -> TrieResult<Option<PartialMatch<'a, T>>> {
        let separator = config.path_separator;
        let mut stack = vec![Frame::new(ROOT, path, separator)];

        while let Some(frame) = stack.last_mut() {
            match frame.advance(&self.nodes) {
                Step::Descend(child) => {
                    let rest = frame.rest;
                    stack.push(Frame::new(child, rest, separator));
                }
                Step::Matched(value) => return self.collapse(&stack, value, path).map(Some),
                Step::Exhausted => {
                    stack.pop();
                }
            }
        }
        Ok(None)
    }

    /// Build the match leaf first from the frames of the winning branch.
    fn collapse<'a>(
        &'a self,
        stack: &[Frame<'_>],
        value: &'a T,
        query: &str,
    ) -> TrieResult<PartialMatch<'a, T>> {
        let mut partial = PartialMatch::terminal(value);
        for frame in stack.iter().rev() {
            let Some(choice) = frame.chosen else {
                continue;
            };
            let (pos, bound) = match choice {
                Choice::Exact(pos) => (pos, false),
                Choice::Keyed(pos) => (pos, true),
            };
            let child = &self.nodes[frame.node].children[pos];
            let param = match &child.key {
                RouteKey::Param { name, kind } if bound => {
                    Some((name.as_str(), coerce(frame.segment, *kind)))
                }
                RouteKey::Wildcard { name } if bound => Some((
                    name.as_str(),
                    ParamValue::String(frame.remainder.to_string()),
                )),
                _ => None,
            };
            partial = partial.prepend(&child.raw, param, query)?;
        }
        Ok(partial)
    }

    /// Every stored value with the route pattern it was registered under,
    /// depth first in insertion order.
    pub fn routes(&self, separator: char) -> Vec<(String, &T)> {
        let separator = separator.to_string();
        let mut out = Vec::new();
        let mut prefix: Vec<&str> = Vec::new();
        let mut pending: Vec<(usize, usize, Option<&str>)> = vec![(ROOT, 0, None)];

        while let Some((id, depth, raw)) = pending.pop() {
            prefix.truncate(depth);
            prefix.extend(raw);

            let node = &self.nodes[id];
            if let Some(value) = &node.value {
                out.push((format!("{}{}", separator, prefix.join(separator.as_str())), value));
            }
            let depth = prefix.len();
            for child in node.children.iter().rev() {
                pending.push((child.node, depth, Some(child.raw.as_str())));
            }
        }
        out
    }
}
