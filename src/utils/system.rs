//! System utilities for cross-platform functionality

use std::env;

const PROXY_ENV: [&str; 6] = [
    "all_proxy",
    "ALL_PROXY",
    "http_proxy",
    "HTTP_PROXY",
    "https_proxy",
    "HTTPS_PROXY",
];

/// Get environment variable value
///
/// # Arguments
///
/// * `name` - The name of the environment variable
///
/// # Returns
///
/// The value of the environment variable or empty string if not found
pub fn get_env(name: &str) -> String {
    env::var(name).unwrap_or_default()
}

/// Get system proxy settings
///
/// # Returns
///
/// The first non-empty proxy variable from the environment, or empty
/// string if none is set
pub fn get_system_proxy() -> String {
    PROXY_ENV
        .iter()
        .map(|var| get_env(var))
        .find(|proxy| !proxy.is_empty())
        .unwrap_or_default()
}

/// Hosts that bypass the system proxy, from `no_proxy` or `NO_PROXY`
pub fn get_system_no_proxy() -> String {
    ["no_proxy", "NO_PROXY"]
        .iter()
        .map(|var| get_env(var))
        .find(|hosts| !hosts.is_empty())
        .unwrap_or_default()
}
