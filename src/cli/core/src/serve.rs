/* src/cli/core/src/serve.rs */

use std::path::Path;

use anyhow::{Result, anyhow};
use kfz_core::{RouteTable, SiteServer};
use kfz_server_axum::IntoAxumRouter;

use crate::build::load_catalog;
use crate::config::KfzConfig;
use crate::ui;

/// Assemble the site server from `config`; the catalog is loaded once up front.
pub fn site_server(config: &KfzConfig, base_dir: &Path) -> Result<SiteServer> {
  let table = RouteTable::builtin();
  let catalog = load_catalog(config, base_dir, &table)?;
  let mut server = SiteServer::new(&config.site.base_url)
    .site_name(&config.site.name)
    .route_table(table)
    .catalog(catalog)
    .locale_cookie(config.locale_cookie());
  if let Some(source) = config.vehicle_source(|k| std::env::var(k).ok()) {
    server = server.vehicle_source(source);
  }
  Ok(server)
}

pub async fn run_serve(config: &KfzConfig, base_dir: &Path) -> Result<()> {
  ui::banner("serve");
  let server = site_server(config, base_dir)?;
  let addr = format!("0.0.0.0:{}", config.server.port);
  ui::arrow(&format!("listening on http://localhost:{}", config.server.port));
  // The adapter's boxed error is not Send + Sync, so it is flattened into a message.
  server.serve(&addr).await.map_err(|e| anyhow!("server error: {e}"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn assembles_without_content() {
    let dir = tempfile::tempdir().unwrap();
    let config: KfzConfig = toml::from_str(
      "[site]\nname = \"KFZ\"\nbase_url = \"https://x.at/\"\n[locale]\ncookie_name = \"lang\"\n",
    )
    .unwrap();
    let parts = site_server(&config, dir.path()).unwrap().into_parts();
    assert_eq!(parts.base_url, "https://x.at");
    assert_eq!(parts.site_name, "KFZ");
    assert_eq!(parts.cookie.name, "lang");
    assert!(parts.vehicles.is_none());
  }
}
