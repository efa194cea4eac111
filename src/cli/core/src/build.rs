/* src/cli/core/src/build.rs */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kfz_core::feed::{RssChannel, render_rss, render_sitemap, sitemap_entries};
use kfz_core::{
  Catalog, Locale, MessageKey, RouteKey, RouteTable, Vehicle, all_messages, get_route,
  load_content_dir, t,
};
use kfz_server_axum::VehicleClient;
use serde::Serialize;

use crate::config::KfzConfig;
use crate::ui;

/// Load the guide catalog; a missing content directory is an empty site.
pub fn load_catalog(config: &KfzConfig, base_dir: &Path, table: &RouteTable) -> Result<Catalog> {
  let dir = config.content_dir(base_dir);
  if !dir.is_dir() {
    tracing::warn!(dir = %dir.display(), "content directory not found, building without guides");
    return Ok(Catalog::default());
  }
  load_content_dir(table, &dir, &config.site.author)
    .with_context(|| format!("failed to load content from {}", dir.display()))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LocaleIndex<'a> {
  blog_path: String,
  posts: Vec<&'a kfz_core::BlogPost>,
  categories: Vec<kfz_core::content::CategorySummary>,
  tags: BTreeMap<&'a str, usize>,
}

fn content_index<'a>(table: &RouteTable, catalog: &'a Catalog) -> BTreeMap<Locale, LocaleIndex<'a>> {
  Locale::ALL
    .into_iter()
    .map(|locale| {
      let index = LocaleIndex {
        blog_path: get_route(table, RouteKey::Blog, locale),
        posts: catalog.get_all_posts(locale),
        categories: catalog.categories(locale),
        tags: catalog.all_tags(locale),
      };
      (locale, index)
    })
    .collect()
}

/// Feed file for `locale`, mirroring its URL (`rss.xml`, `pl/rss.xml`, ...).
fn rss_path(out_dir: &Path, locale: Locale) -> PathBuf {
  if locale.is_default() {
    out_dir.join("rss.xml")
  } else {
    out_dir.join(locale.as_str()).join("rss.xml")
  }
}

fn write(path: &Path, content: &str) -> Result<u64> {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
  Ok(content.len() as u64)
}

/// Write every static artifact for `catalog` and `vehicles` into `out_dir`.
/// Returns the written files with their sizes.
pub fn write_artifacts(
  config: &KfzConfig,
  table: &RouteTable,
  catalog: &Catalog,
  vehicles: &[Vehicle],
  out_dir: &Path,
) -> Result<Vec<(PathBuf, u64)>> {
  let mut written = Vec::new();
  let base_url = &config.site.base_url;

  let index = serde_json::to_string_pretty(&content_index(table, catalog))
    .context("failed to serialize content index")?;
  let path = out_dir.join("content-index.json");
  written.push((path.clone(), write(&path, &index)?));

  let entries = sitemap_entries(table, catalog, vehicles, base_url);
  let path = out_dir.join("sitemap.xml");
  written.push((path.clone(), write(&path, &render_sitemap(&entries))?));

  for locale in Locale::ALL {
    let title = format!("{} | {}", config.site.name, t(locale, MessageKey::AllGuides));
    let link_path = get_route(table, RouteKey::Blog, locale);
    let channel = RssChannel {
      title: &title,
      description: t(locale, MessageKey::AllGuides),
      base_url,
      link_path: &link_path,
      locale,
    };
    let path = rss_path(out_dir, locale);
    written.push((path.clone(), write(&path, &render_rss(&channel, &catalog.get_all_posts(locale)))?));

    let messages = serde_json::to_string_pretty(&all_messages(locale))
      .context("failed to serialize messages")?;
    let path = out_dir.join("messages").join(format!("{locale}.json"));
    written.push((path.clone(), write(&path, &messages)?));
  }

  Ok(written)
}

pub async fn run_build(config: &KfzConfig, base_dir: &Path) -> Result<()> {
  ui::banner("build");
  let table = RouteTable::builtin();
  let out_dir = config.out_dir(base_dir);

  ui::step(1, 3, "Loading guides");
  let catalog = load_catalog(config, base_dir, &table)?;
  for locale in Locale::ALL {
    ui::detail(&format!("{locale}: {} published", catalog.get_all_posts(locale).len()));
  }

  ui::step(2, 3, "Fetching vehicles");
  let vehicles = match config.vehicle_source(|k| std::env::var(k).ok()) {
    Some(source) => {
      let client = VehicleClient::new(source);
      let vehicles = client.first_page().await;
      ui::detail(&format!("{} vehicles", vehicles.len()));
      vehicles.to_vec()
    }
    None => {
      ui::detail("no [vehicles] section, skipped");
      Vec::new()
    }
  };

  ui::step(3, 3, "Writing artifacts");
  let written = write_artifacts(config, &table, &catalog, &vehicles, &out_dir)?;
  for (path, size) in &written {
    let shown = path.strip_prefix(&out_dir).unwrap_or(path);
    ui::detail_ok(&format!("{}  {}", shown.display(), ui::format_size(*size)));
  }

  ui::blank();
  ui::ok(&format!("built {} files into {}", written.len(), out_dir.display()));
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn config() -> KfzConfig {
    toml::from_str("[site]\nname = \"KFZ Wien\"\nbase_url = \"https://www.example.at\"\n").unwrap()
  }

  fn write_guide(dir: &Path, name: &str, locale: &str, slug: &str) {
    let body = format!(
      "---\ntitle: {slug}\ndescription: d\ndate: 2024-01-10\nlocale: {locale}\ncluster: logistics\nslug: {slug}\ntags: [transport]\n---\nText\n"
    );
    std::fs::write(dir.join(name), body).unwrap();
  }

  #[test]
  fn missing_content_dir_is_empty_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_catalog(&config(), dir.path(), &RouteTable::builtin()).unwrap();
    assert!(catalog.is_empty());
  }

  #[test]
  fn writes_all_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let content = dir.path().join("content/blog");
    std::fs::create_dir_all(&content).unwrap();
    write_guide(&content, "a.md", "de", "ueberstellung");
    write_guide(&content, "b.md", "pl", "przewoz-auta");

    let config = config();
    let table = RouteTable::builtin();
    let catalog = load_catalog(&config, dir.path(), &table).unwrap();
    let out = dir.path().join("out");
    let written = write_artifacts(&config, &table, &catalog, &[], &out).unwrap();
    assert_eq!(written.len(), 2 + 2 * Locale::ALL.len());

    let index: serde_json::Value =
      serde_json::from_str(&std::fs::read_to_string(out.join("content-index.json")).unwrap())
        .unwrap();
    assert_eq!(index["de"]["blogPath"], "/ratgeber");
    assert_eq!(index["de"]["posts"][0]["url"], "/ratgeber/transport-logistik/ueberstellung");
    assert_eq!(index["pl"]["tags"]["transport"], 1);
    assert!(index["en"]["posts"].as_array().unwrap().is_empty());

    let sitemap = std::fs::read_to_string(out.join("sitemap.xml")).unwrap();
    assert!(sitemap.contains("https://www.example.at/pl/poradnik/transport-logistyka/przewoz-auta"));

    let pl_feed = std::fs::read_to_string(out.join("pl/rss.xml")).unwrap();
    assert!(pl_feed.contains("<title>KFZ Wien | Wszystkie poradniki</title>"));
    assert!(pl_feed.contains("przewoz-auta"));
    assert!(out.join("rss.xml").is_file());

    let messages: serde_json::Value =
      serde_json::from_str(&std::fs::read_to_string(out.join("messages/en.json")).unwrap())
        .unwrap();
    assert_eq!(messages["nav.blog"], "Guides");
  }
}
