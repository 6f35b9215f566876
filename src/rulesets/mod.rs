pub mod bundle;
pub mod compress;
pub mod filter;
pub mod sync;

pub use bundle::{build_bundle, render_bundle, write_bundle};
pub use compress::compress_rules;
pub use filter::filter_rules;
pub use sync::{SyncEvent, SyncOptions, SyncSummary, Syncer};
