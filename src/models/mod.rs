//! Core data models for the application
//!
//! This module contains the data structures shared by the sync pipeline,
//! separated from the logic that operates on them.

pub mod ruleset;

pub use ruleset::{BundleConfig, RuleKind, RuleLine, RuleSource};
