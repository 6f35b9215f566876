pub mod file;
pub mod git;
pub mod http;
pub mod system;

// Re-export common utilities
pub use file::{write_if_changed, WriteOutcome};
pub use http::{HttpFetcher, RuleFetcher};
