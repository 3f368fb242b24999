// Preference module for values that outlive a session.
// Stores user flags such as the onboarding opt-out in the local data directory.

#![allow(dead_code)]

pub mod paths;
pub mod store;

pub use paths::{config_path, log_dir, prefs_path};
pub use store::{FlagStore, JsonFlagStore, MemoryFlagStore, SKIP_ONBOARDING_KEY};
