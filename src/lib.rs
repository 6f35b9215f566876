pub mod constants;
pub mod error;
pub mod models;
pub mod rulesets;
pub mod settings;
pub mod utils;

// Re-export the pipeline entry points for easier access
pub use error::{Result, SyncError};
pub use rulesets::{SyncEvent, SyncOptions, SyncSummary, Syncer};
pub use settings::SyncSettings;
