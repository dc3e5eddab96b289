//! API utilities for frontend-backend communication

use std::collections::HashMap;

/// Get the base URL for API requests
///
/// Built from the current window location with the backend port 3000,
/// e.g. "http://localhost:3000". Empty when there is no window.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path starting with "/api/"
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Query parameters of the current page URL, percent-decoded
pub fn page_query_params() -> HashMap<String, String> {
    let search = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    parse_query_params(&search)
}

fn parse_query_params(search: &str) -> HashMap<String, String> {
    serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default()
}
