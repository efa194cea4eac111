/* src/cli/core/src/config/types.rs */

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use kfz_core::content::DEFAULT_AUTHOR;
use kfz_core::resolve::{LOCALE_COOKIE, LOCALE_COOKIE_MAX_AGE_DAYS};
use kfz_core::server::DEFAULT_REVALIDATE_SECS;
use kfz_core::vehicle::DEFAULT_PAGE_SIZE;
use kfz_core::{LocaleCookie, VehicleSource};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct KfzConfig {
  pub site: SiteSection,
  #[serde(default)]
  pub content: ContentSection,
  #[serde(default)]
  pub build: BuildSection,
  #[serde(default)]
  pub server: ServerSection,
  #[serde(default)]
  pub locale: LocaleSection,
  #[serde(default)]
  pub vehicles: Option<VehiclesSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSection {
  pub name: String,
  pub base_url: String,
  #[serde(default = "default_author")]
  pub author: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentSection {
  #[serde(default = "default_content_dir")]
  pub dir: String,
}

impl Default for ContentSection {
  fn default() -> Self {
    Self { dir: default_content_dir() }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildSection {
  #[serde(default = "default_out_dir")]
  pub out_dir: String,
}

impl Default for BuildSection {
  fn default() -> Self {
    Self { out_dir: default_out_dir() }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
  #[serde(default = "default_port")]
  pub port: u16,
}

impl Default for ServerSection {
  fn default() -> Self {
    Self { port: default_port() }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocaleSection {
  #[serde(default = "default_cookie_name")]
  pub cookie_name: String,
  #[serde(default = "default_cookie_max_age_days")]
  pub cookie_max_age_days: u32,
}

impl Default for LocaleSection {
  fn default() -> Self {
    Self { cookie_name: default_cookie_name(), cookie_max_age_days: default_cookie_max_age_days() }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehiclesSection {
  pub api_url: String,
  #[serde(default)]
  pub media_base_url: String,
  /// Name of the environment variable holding the CMS bearer token.
  #[serde(default)]
  pub token_env: Option<String>,
  #[serde(default = "default_revalidate_secs")]
  pub revalidate_secs: u64,
  #[serde(default = "default_page_size")]
  pub page_size: u32,
}

fn default_author() -> String {
  DEFAULT_AUTHOR.to_string()
}

fn default_content_dir() -> String {
  "content/blog".to_string()
}

fn default_out_dir() -> String {
  ".kfz/output".to_string()
}

fn default_port() -> u16 {
  3000
}

fn default_cookie_name() -> String {
  LOCALE_COOKIE.to_string()
}

fn default_cookie_max_age_days() -> u32 {
  LOCALE_COOKIE_MAX_AGE_DAYS
}

fn default_revalidate_secs() -> u64 {
  DEFAULT_REVALIDATE_SECS
}

fn default_page_size() -> u32 {
  DEFAULT_PAGE_SIZE
}

impl KfzConfig {
  pub fn validate(&self) -> Result<()> {
    let base = &self.site.base_url;
    if !(base.starts_with("https://") || base.starts_with("http://")) {
      bail!("site.base_url must be an absolute http(s) URL, got \"{base}\"");
    }
    let name = &self.locale.cookie_name;
    if name.is_empty() || name.contains(|c: char| c.is_whitespace() || matches!(c, ';' | '=' | ',')) {
      bail!("locale.cookie_name \"{name}\" is not a valid cookie name");
    }
    if self.locale.cookie_max_age_days == 0 {
      bail!("locale.cookie_max_age_days must be at least 1");
    }
    if let Some(ref v) = self.vehicles {
      if !(v.api_url.starts_with("https://") || v.api_url.starts_with("http://")) {
        bail!("vehicles.api_url must be an absolute http(s) URL, got \"{}\"", v.api_url);
      }
      if !(1..=100).contains(&v.page_size) {
        bail!("vehicles.page_size must be between 1 and 100, got {}", v.page_size);
      }
    }
    Ok(())
  }

  pub fn content_dir(&self, base_dir: &Path) -> PathBuf {
    base_dir.join(&self.content.dir)
  }

  pub fn out_dir(&self, base_dir: &Path) -> PathBuf {
    base_dir.join(&self.build.out_dir)
  }

  pub fn locale_cookie(&self) -> LocaleCookie {
    LocaleCookie {
      name: self.locale.cookie_name.clone(),
      max_age_days: self.locale.cookie_max_age_days,
    }
  }

  /// Vehicle source with its token read from `lookup(token_env)`.
  pub fn vehicle_source(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<VehicleSource> {
    let v = self.vehicles.as_ref()?;
    let mut source = VehicleSource::new(&v.api_url);
    source.media_base_url.clone_from(&v.media_base_url);
    source.token = v.token_env.as_deref().and_then(lookup).filter(|t| !t.is_empty());
    source.revalidate_secs = v.revalidate_secs;
    source.page_size = v.page_size;
    Some(source)
  }
}
