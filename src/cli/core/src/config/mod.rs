/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use loader::{apply_env_overrides, find_kfz_config, load_kfz_config};
pub use types::KfzConfig;
