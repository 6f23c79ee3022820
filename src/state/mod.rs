//! Host state persistence.
//!
//! - [`store`] - State directory layout, YAML helpers, pass history
//! - [`grants`] - Permission grant table
//! - [`preferences`] - User preferences

pub mod grants;
pub mod preferences;
pub mod store;

pub use grants::{FileGrants, GrantTable};
pub use preferences::{PreferenceStore, Preferences};
pub use store::{read_yaml, write_yaml, PassRecord, StateDir, StateStore};
