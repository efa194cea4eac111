/* src/server/adapter/axum/src/handler/mod.rs */

mod api;
mod feed;
mod page;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use kfz_core::content::Catalog;
use kfz_core::{LocaleCookie, LocationPage, ResolveStrategy, RouteTable, SiteParts};

use crate::vehicles::VehicleClient;

pub(crate) struct AppState {
  pub site_name: String,
  pub base_url: String,
  pub table: RouteTable,
  pub catalog: Arc<Catalog>,
  pub locations: Vec<LocationPage>,
  pub strategies: Vec<Box<dyn ResolveStrategy>>,
  pub cookie: LocaleCookie,
  pub vehicles: Option<VehicleClient>,
}

pub(crate) fn build_router(parts: SiteParts) -> Router {
  let vehicles = parts.vehicles.map(VehicleClient::new);
  tracing::debug!(
    posts = parts.catalog.len(),
    strategies = parts.strategies.len(),
    vehicles = vehicles.is_some(),
    "building router"
  );

  let state = Arc::new(AppState {
    site_name: parts.site_name,
    base_url: parts.base_url,
    table: parts.table,
    catalog: parts.catalog,
    locations: parts.locations,
    strategies: parts.strategies,
    cookie: parts.cookie,
    vehicles,
  });

  // Everything not claimed below is a site page, resolved by the fallback.
  Router::new()
    .route("/sitemap.xml", get(feed::handle_sitemap))
    .route("/rss.xml", get(feed::handle_default_rss))
    .route("/{locale}/rss.xml", get(feed::handle_rss))
    .route("/api/locale-href", get(api::handle_locale_href))
    .route("/api/messages/{locale}", get(api::handle_messages))
    .route("/api/vehicles", get(api::handle_vehicles))
    .fallback(page::handle_page)
    .with_state(state)
}

/// Parse a locale path parameter, answering unknown ones with 404.
pub(super) fn locale_param(raw: &str) -> Result<kfz_core::Locale, kfz_core::SiteError> {
  raw.parse().map_err(|_| kfz_core::SiteError::not_found(format!("Unknown locale '{raw}'")))
}
