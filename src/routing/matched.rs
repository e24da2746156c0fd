//! Match results.
//!
//! # Responsibilities
//! - Represent a resolved route: value, walked route keys, captured params
//! - Compose partial results leaf first from the frames of the winning branch
//!
//! # Design Decisions
//! - `RouteMatch` is immutable once built and never shared across lookups
//! - Params live in an ordered map so equal matches compare and serialize equally
//! - Partial results are passed by value; each level returns a new one

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::routing::error::{TrieError, TrieResult};

/// A captured, coerced parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    String(String),
    Number(f64),
    Boolean(bool),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::String(s) => write!(f, "{}", s),
            ParamValue::Number(n) => write!(f, "{}", n),
            ParamValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::String(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::String(s)
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Number(n)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Boolean(b)
    }
}

/// A successful route lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteMatch<V> {
    path: String,
    route: String,
    route_parts: Vec<String>,
    value: V,
    params: BTreeMap<String, ParamValue>,
}

impl<V> RouteMatch<V> {
    /// The path as it was queried.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The registered route pattern that matched, e.g. `/users/{id:number}`.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Route keys walked from the root, as registered (not the queried literals).
    pub fn route_parts(&self) -> &[String] {
        &self.route_parts
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_value(self) -> V {
        self.value
    }

    pub fn params(&self) -> &BTreeMap<String, ParamValue> {
        &self.params
    }

    /// Value of a captured parameter, if the route binds `name`.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// Transform the resolved value, keeping path, keys and params.
    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> RouteMatch<U> {
        RouteMatch {
            path: self.path,
            route: self.route,
            route_parts: self.route_parts,
            value: f(self.value),
            params: self.params,
        }
    }
}

impl<T: Clone> RouteMatch<&T> {
    /// Detach the match from the trie it was resolved against.
    pub fn cloned(self) -> RouteMatch<T> {
        self.map(T::clone)
    }
}

/// A match being collapsed from the leaf toward the root, one key at a time.
///
/// Route keys are accumulated leaf first and reversed once in `finish`.
#[derive(Debug)]
pub(crate) struct PartialMatch<'a, T> {
    keys: Vec<&'a str>,
    params: BTreeMap<String, ParamValue>,
    value: &'a T,
}

impl<'a, T> PartialMatch<'a, T> {
    pub(crate) fn terminal(value: &'a T) -> Self {
        Self {
            keys: Vec::new(),
            params: BTreeMap::new(),
            value,
        }
    }

    /// Collapse this sub-match into the calling node's result.
    ///
    /// Fails if `param` reuses a name already captured deeper in the path.
    pub(crate) fn prepend(
        mut self,
        key: &'a str,
        param: Option<(&str, ParamValue)>,
        query: &str,
    ) -> TrieResult<Self> {
        if let Some((name, value)) = param {
            if self.params.contains_key(name) {
                return Err(TrieError::DuplicateParam {
                    name: name.to_string(),
                    path: query.to_string(),
                });
            }
            self.params.insert(name.to_string(), value);
        }
        self.keys.push(key);
        Ok(self)
    }

    pub(crate) fn finish(self, path: &str, separator: char) -> RouteMatch<&'a T> {
        let route_parts: Vec<String> = self.keys.iter().rev().map(|k| k.to_string()).collect();
        let separator = separator.to_string();
        let route = format!("{}{}", separator, route_parts.join(separator.as_str()));

        RouteMatch {
            path: path.to_string(),
            route,
            route_parts,
            value: self.value,
            params: self.params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_builds_route() {
        let value = 42;
        let matched = PartialMatch::terminal(&value)
            .prepend("{id:number}", Some(("id", ParamValue::Number(7.0))), "/users/7")
            .unwrap()
            .prepend("users", None, "/users/7")
            .unwrap()
            .finish("/users/7", '/');

        assert_eq!(matched.path(), "/users/7");
        assert_eq!(matched.route(), "/users/{id:number}");
        assert_eq!(matched.route_parts(), ["users", "{id:number}"]);
        assert_eq!(*matched.value(), &42);
        assert_eq!(matched.get("id"), Some(&ParamValue::Number(7.0)));
        assert_eq!(matched.get("missing"), None);
    }

    #[test]
    fn test_root_route() {
        let value = "home";
        let matched = PartialMatch::terminal(&value).finish("", '/');
        assert_eq!(matched.route(), "/");
        assert!(matched.route_parts().is_empty());
        assert!(matched.params().is_empty());
    }

    #[test]
    fn test_duplicate_param_rejected() {
        let value = ();
        let err = PartialMatch::terminal(&value)
            .prepend("{foo}", Some(("foo", "b".into())), "/a/b")
            .unwrap()
            .prepend("{foo}", Some(("foo", "a".into())), "/a/b")
            .unwrap_err();

        assert_eq!(
            err,
            TrieError::DuplicateParam {
                name: "foo".into(),
                path: "/a/b".into()
            }
        );
    }

    #[test]
    fn test_cloned_and_serialize() {
        let value = String::from("page");
        let matched = PartialMatch::terminal(&value)
            .prepend("{on:boolean}", Some(("on", true.into())), "/1")
            .unwrap()
            .finish("/1", '/')
            .cloned();

        assert_eq!(matched.value(), "page");
        let json = serde_json::to_value(&matched).unwrap();
        assert_eq!(json["params"]["on"], serde_json::json!(true));
        assert_eq!(json["route"], serde_json::json!("/{on:boolean}"));
        assert_eq!(matched.into_value(), "page");
    }

    #[test]
    fn test_param_value_accessors() {
        assert_eq!(ParamValue::from("x").as_str(), Some("x"));
        assert_eq!(ParamValue::from(1.5).as_number(), Some(1.5));
        assert_eq!(ParamValue::from(false).as_bool(), Some(false));
        assert_eq!(ParamValue::from(false).as_str(), None);
        assert_eq!(ParamValue::from(3.0).to_string(), "3");
    }
}
