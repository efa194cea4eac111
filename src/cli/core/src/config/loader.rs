/* src/cli/core/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::KfzConfig;

/// Walk upward from `start` to find `kfz.toml`, like Cargo.toml discovery
pub fn find_kfz_config(start: &Path) -> Result<PathBuf> {
  let mut dir =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  loop {
    let candidate = dir.join("kfz.toml");
    if candidate.is_file() {
      return Ok(candidate);
    }
    if !dir.pop() {
      bail!("kfz.toml not found (searched upward from {})", start.display());
    }
  }
}

pub fn load_kfz_config(path: &Path) -> Result<KfzConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let config: KfzConfig =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  config.validate().with_context(|| format!("invalid {}", path.display()))?;
  Ok(config)
}

/// `PORT` and `KFZ_OUTPUT_DIR` win over the file.
pub fn apply_env_overrides(
  config: &mut KfzConfig,
  lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
  if let Some(port) = lookup("PORT") {
    config.server.port =
      port.trim().parse().with_context(|| format!("PORT must be a port number, got \"{port}\""))?;
  }
  if let Some(out_dir) = lookup("KFZ_OUTPUT_DIR").filter(|d| !d.is_empty()) {
    config.build.out_dir = out_dir;
  }
  Ok(())
}
