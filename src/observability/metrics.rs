//! Routing metrics.
//!
//! # Metrics
//! - `route_trie_lookups_total` (counter): lookups by outcome (`hit`, `miss`, `error`)
//! - `route_trie_registrations_total` (counter): stored routes by mode (`add`, `set`)
//! - `route_trie_conflicts_total` (counter): rejected `add` calls
//! - `route_trie_reloads_total` (counter): route table reloads by result
//! - `route_trie_routes` (gauge): routes held by the last loaded table
//!
//! # Design Decisions
//! - Recording is a no-op until the host installs a `metrics` recorder
//! - Label values are static strings; paths never become labels

/// Record the outcome of a single lookup.
pub fn record_lookup(outcome: &'static str) {
    ::metrics::counter!("route_trie_lookups_total", "outcome" => outcome).increment(1);
}

/// Record a stored route.
pub fn record_registration(overwrite: bool) {
    let mode = if overwrite { "set" } else { "add" };
    ::metrics::counter!("route_trie_registrations_total", "mode" => mode).increment(1);
}

/// Record an `add` rejected because the path already holds a value.
pub fn record_conflict() {
    ::metrics::counter!("route_trie_conflicts_total").increment(1);
}

/// Record a route table reload and, on success, the new route count.
pub fn record_reload(routes: Option<usize>) {
    match routes {
        Some(count) => {
            ::metrics::counter!("route_trie_reloads_total", "result" => "ok").increment(1);
            ::metrics::gauge!("route_trie_routes").set(count as f64);
        }
        None => {
            ::metrics::counter!("route_trie_reloads_total", "result" => "error").increment(1);
        }
    }
}
