//! Route table loading and reload tests.

use std::sync::{Arc, Mutex};

use route_trie::config::{load_config, ConfigError, RouteTableWatcher, ValidationError};
use route_trie::{ParamValue, SharedRouteTrie};

mod common;
use common::TempTable;

const TABLE: &str = r#"
[logging]
level = "debug"
format = "json"

[[routes]]
path = "/"
target = "home"

[[routes]]
path = "/users/{id:number}"
target = "user-detail"

[[routes]]
path = "/users/me"
target = "current-user"

[[routes]]
path = "/static/{path:*}"
target = "assets"
"#;

#[test]
fn test_load_and_build_trie() {
    let file = TempTable::new(TABLE);

    let config = load_config(&file.path).unwrap();
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.routes.len(), 4);

    let trie = config.build_trie().unwrap();
    assert_eq!(trie.len(), 4);

    let matched = trie.match_path("/users/me").unwrap().unwrap();
    assert_eq!(matched.value().as_str(), "current-user");

    let matched = trie.match_path("/users/12").unwrap().unwrap();
    assert_eq!(matched.value().as_str(), "user-detail");
    assert_eq!(matched.get("id"), Some(&ParamValue::Number(12.0)));

    let matched = trie.match_path("/static/js/app.js").unwrap().unwrap();
    assert_eq!(matched.get("path"), Some(&ParamValue::from("js/app.js")));

    let routes: Vec<String> = trie.routes().into_iter().map(|(route, _)| route).collect();
    assert_eq!(
        routes,
        vec!["/", "/users/{id:number}", "/users/me", "/static/{path:*}"]
    );
}

#[test]
fn test_invalid_table_reports_all_errors() {
    let file = TempTable::new(
        r#"
        [[routes]]
        path = "/a/{rest:*}/b"
        target = "never"

        [[routes]]
        path = "/dup"
        target = "one"

        [[routes]]
        path = "dup/"
        target = "two"
        "#,
    );

    match load_config(&file.path) {
        Err(ConfigError::Validation(errors)) => {
            assert_eq!(errors.len(), 2);
            assert!(matches!(errors[0], ValidationError::SegmentAfterWildcard { .. }));
            assert!(matches!(errors[1], ValidationError::DuplicateRoute { .. }));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn test_watcher_reload_swaps_routes() {
    let file = TempTable::new(TABLE);
    let trie = Arc::new(SharedRouteTrie::from_trie(
        load_config(&file.path).unwrap().build_trie().unwrap(),
    ));

    let notified = Arc::new(Mutex::new(Vec::new()));
    let log = notified.clone();
    trie.add_callback(move |path, target: &String| {
        log.lock().unwrap().push(format!("{path} -> {target}"));
    });

    let watcher = RouteTableWatcher::new(&file.path, Arc::clone(&trie));
    file.rewrite(
        r#"
        [[routes]]
        path = "/v2/{section}"
        target = "v2"
        "#,
    );

    assert_eq!(watcher.reload().unwrap(), 1);
    assert!(trie.match_path("/users/me").unwrap().is_none());

    let matched = trie.match_path("/v2/docs").unwrap().unwrap();
    assert_eq!(matched.value(), "v2");
    assert_eq!(*notified.lock().unwrap(), vec!["/v2/{section} -> v2"]);
}

#[test]
fn test_failed_reload_keeps_current_routes() {
    let file = TempTable::new(TABLE);
    let trie = Arc::new(SharedRouteTrie::from_trie(
        load_config(&file.path).unwrap().build_trie().unwrap(),
    ));

    let watcher = RouteTableWatcher::new(&file.path, Arc::clone(&trie));
    file.rewrite("[[routes]]\npath = 42\n");

    assert!(matches!(watcher.reload(), Err(ConfigError::Parse(_))));
    assert_eq!(trie.len(), 4);
    assert!(trie.match_path("/users/me").unwrap().is_some());
}
