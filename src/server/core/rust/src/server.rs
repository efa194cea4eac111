/* src/server/core/rust/src/server.rs */

use std::sync::Arc;

use crate::content::Catalog;
use crate::resolve::{
  LOCATION_PAGES, LocaleCookie, LocationPage, ResolveStrategy, from_cookie, from_location_page,
  from_url_prefix,
};
use crate::route::RouteTable;
use crate::vehicle::DEFAULT_PAGE_SIZE;

pub const DEFAULT_REVALIDATE_SECS: u64 = 300;

/// Where vehicle listings are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleSource {
  pub api_url: String,
  pub media_base_url: String,
  pub token: Option<String>,
  pub revalidate_secs: u64,
  pub page_size: u32,
}

impl VehicleSource {
  pub fn new(api_url: impl Into<String>) -> Self {
    Self {
      api_url: api_url.into(),
      media_base_url: String::new(),
      token: None,
      revalidate_secs: DEFAULT_REVALIDATE_SECS,
      page_size: DEFAULT_PAGE_SIZE,
    }
  }
}

/// Framework-agnostic parts extracted from `SiteServer`.
/// Adapter crates consume this to build framework-specific routers.
pub struct SiteParts {
  pub site_name: String,
  pub base_url: String,
  pub table: RouteTable,
  pub catalog: Arc<Catalog>,
  pub locations: Vec<LocationPage>,
  pub strategies: Vec<Box<dyn ResolveStrategy>>,
  pub cookie: LocaleCookie,
  pub vehicles: Option<VehicleSource>,
}

impl SiteParts {
  pub fn has_url_prefix(&self) -> bool {
    self.strategies.iter().any(|s| s.kind() == "url_prefix")
  }
}

pub struct SiteServer {
  site_name: String,
  base_url: String,
  table: RouteTable,
  catalog: Arc<Catalog>,
  locations: Vec<LocationPage>,
  strategies: Vec<Box<dyn ResolveStrategy>>,
  cookie: LocaleCookie,
  vehicles: Option<VehicleSource>,
}

impl SiteServer {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      site_name: String::new(),
      base_url: base_url.into(),
      table: RouteTable::builtin(),
      catalog: Arc::new(Catalog::default()),
      locations: LOCATION_PAGES.to_vec(),
      strategies: Vec::new(),
      cookie: LocaleCookie::default(),
      vehicles: None,
    }
  }

  pub fn site_name(mut self, name: impl Into<String>) -> Self {
    self.site_name = name.into();
    self
  }

  pub fn route_table(mut self, table: RouteTable) -> Self {
    self.table = table;
    self
  }

  pub fn catalog(mut self, catalog: impl Into<Arc<Catalog>>) -> Self {
    self.catalog = catalog.into();
    self
  }

  pub fn locations(mut self, locations: Vec<LocationPage>) -> Self {
    self.locations = locations;
    self
  }

  pub fn resolve_strategies(mut self, strategies: Vec<Box<dyn ResolveStrategy>>) -> Self {
    self.strategies = strategies;
    self
  }

  pub fn locale_cookie(mut self, cookie: LocaleCookie) -> Self {
    self.cookie = cookie;
    self
  }

  pub fn vehicle_source(mut self, source: VehicleSource) -> Self {
    self.vehicles = Some(source);
    self
  }

  /// Consume the builder, returning framework-agnostic parts for an adapter.
  /// An empty strategy list falls back to location page, URL prefix, then
  /// the configured locale cookie.
  pub fn into_parts(self) -> SiteParts {
    let strategies = if self.strategies.is_empty() {
      vec![from_location_page(), from_url_prefix(), from_cookie(self.cookie.name.clone())]
    } else {
      self.strategies
    };
    SiteParts {
      site_name: self.site_name,
      base_url: self.base_url.trim_end_matches('/').to_string(),
      table: self.table,
      catalog: self.catalog,
      locations: self.locations,
      strategies,
      cookie: self.cookie,
      vehicles: self.vehicles,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::resolve::{ResolveData, from_accept_language, resolve_chain};
  use crate::locale::Locale;

  #[test]
  fn defaults_fill_strategies_and_locations() {
    let parts = SiteServer::new("https://www.example.at/").into_parts();
    assert_eq!(parts.base_url, "https://www.example.at");
    assert!(parts.has_url_prefix());
    assert_eq!(parts.locations.len(), LOCATION_PAGES.len());
    assert!(parts.catalog.is_empty());
    assert!(parts.vehicles.is_none());
  }

  #[test]
  fn custom_strategies_are_kept() {
    let parts = SiteServer::new("https://x.at")
      .resolve_strategies(vec![from_cookie("lang"), from_accept_language()])
      .into_parts();
    let kinds: Vec<_> = parts.strategies.iter().map(|s| s.kind()).collect();
    assert_eq!(kinds, ["cookie", "accept_language"]);
    assert!(!parts.has_url_prefix());
  }

  #[test]
  fn default_chain_reads_configured_cookie() {
    let cookie = LocaleCookie { name: "lang".into(), max_age_days: 30 };
    let parts = SiteServer::new("https://x.at").locale_cookie(cookie).into_parts();
    let data = ResolveData {
      path: "/kontakt",
      cookie_header: Some("lang=pl; NEXT_LOCALE=en"),
      accept_language: None,
      locations: &parts.locations,
    };
    assert_eq!(resolve_chain(&parts.strategies, &data), Locale::Pl);
  }

  #[test]
  fn vehicle_source_defaults() {
    let source = VehicleSource::new("https://cms.example.at/api/vehicles");
    assert_eq!(source.revalidate_secs, 300);
    assert_eq!(source.page_size, DEFAULT_PAGE_SIZE);
    let parts = SiteServer::new("https://x.at").vehicle_source(source.clone()).into_parts();
    assert_eq!(parts.vehicles, Some(source));
  }
}
