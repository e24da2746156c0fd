//! Route key parsing.
//!
//! # Responsibilities
//! - Classify a raw child key as literal, parametric or wildcard
//! - Extract the parameter name and declared type
//!
//! # Design Decisions
//! - Keys are parsed once, when the child node is created
//! - Unrecognized brace syntax falls back to a literal key, never an error
//! - No regex: a key is a brace-delimited name plus optional type

use crate::config::TrieConfig;

/// Declared type of a single-segment parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Raw segment, also used for absent or unknown types.
    String,
    /// Numeric coercion (`{id:number}`).
    Number,
    /// Boolean coercion (`{flag:boolean}`).
    Boolean,
}

impl ParamKind {
    /// Map a declared type to a kind. Unknown types read as strings.
    pub fn from_type(ty: &str) -> Self {
        match ty {
            "number" => ParamKind::Number,
            "boolean" => ParamKind::Boolean,
            _ => ParamKind::String,
        }
    }
}

/// Parsed form of a child key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteKey {
    /// Matches only the identical segment.
    Literal,
    /// Captures one segment under `name`.
    Param { name: String, kind: ParamKind },
    /// Captures the current segment and everything after it under `name`.
    Wildcard { name: String },
}

impl RouteKey {
    /// Parse a raw key written as `{name}` or `{name<delim>type}`.
    pub fn parse(raw: &str, config: &TrieConfig) -> Self {
        let Some(inner) = raw.strip_prefix('{').and_then(|k| k.strip_suffix('}')) else {
            return RouteKey::Literal;
        };
        if inner.contains('}') {
            return RouteKey::Literal;
        }

        let (name, ty) = match inner.split_once(config.param_delimiter) {
            Some((name, ty)) => (name, ty),
            None => (inner, ""),
        };
        if name.is_empty() {
            return RouteKey::Literal;
        }

        if ty == config.wildcard_marker {
            RouteKey::Wildcard {
                name: name.to_string(),
            }
        } else {
            RouteKey::Param {
                name: name.to_string(),
                kind: ParamKind::from_type(ty),
            }
        }
    }

    /// Parameter name bound by this key, if any.
    pub fn param_name(&self) -> Option<&str> {
        match self {
            RouteKey::Literal => None,
            RouteKey::Param { name, .. } | RouteKey::Wildcard { name } => Some(name),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, RouteKey::Wildcard { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> RouteKey {
        RouteKey::parse(raw, &TrieConfig::default())
    }

    #[test]
    fn test_literal_keys() {
        assert_eq!(parse("users"), RouteKey::Literal);
        assert_eq!(parse("{}"), RouteKey::Literal);
        assert_eq!(parse("{:number}"), RouteKey::Literal);
        assert_eq!(parse("{open"), RouteKey::Literal);
        assert_eq!(parse("x{id}"), RouteKey::Literal);
        assert_eq!(parse("{a}b}"), RouteKey::Literal);
    }

    #[test]
    fn test_param_keys() {
        assert_eq!(
            parse("{id}"),
            RouteKey::Param { name: "id".into(), kind: ParamKind::String }
        );
        assert_eq!(
            parse("{id:string}"),
            RouteKey::Param { name: "id".into(), kind: ParamKind::String }
        );
        assert_eq!(
            parse("{id:number}"),
            RouteKey::Param { name: "id".into(), kind: ParamKind::Number }
        );
        assert_eq!(
            parse("{on:boolean}"),
            RouteKey::Param { name: "on".into(), kind: ParamKind::Boolean }
        );
        // Empty and unknown types fall back to string.
        assert_eq!(
            parse("{id:}"),
            RouteKey::Param { name: "id".into(), kind: ParamKind::String }
        );
        assert_eq!(
            parse("{id:int}"),
            RouteKey::Param { name: "id".into(), kind: ParamKind::String }
        );
    }

    #[test]
    fn test_wildcard_keys() {
        assert_eq!(parse("{rest:*}"), RouteKey::Wildcard { name: "rest".into() });
        assert!(parse("{rest:*}").is_wildcard());
        assert_eq!(parse("{rest:*}").param_name(), Some("rest"));
        assert_eq!(parse("static").param_name(), None);
    }

    #[test]
    fn test_custom_syntax() {
        let config = TrieConfig {
            path_separator: '.',
            param_delimiter: '=',
            wildcard_marker: "...".into(),
        };

        assert_eq!(
            RouteKey::parse("{id=number}", &config),
            RouteKey::Param { name: "id".into(), kind: ParamKind::Number }
        );
        assert_eq!(
            RouteKey::parse("{tail=...}", &config),
            RouteKey::Wildcard { name: "tail".into() }
        );
        // The default delimiter is part of the name here.
        assert_eq!(
            RouteKey::parse("{id:number}", &config),
            RouteKey::Param { name: "id:number".into(), kind: ParamKind::String }
        );
    }
}
