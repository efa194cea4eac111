/* src/server/adapter/axum/src/handler/feed.rs */

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use kfz_core::feed::{RssChannel, render_rss, render_sitemap, sitemap_entries};
use kfz_core::{Locale, MessageKey, RouteKey, get_route, t};

use super::{AppState, locale_param};
use crate::error::AxumError;

fn xml(content_type: &'static str, body: String) -> Response {
  ([(header::CONTENT_TYPE, content_type)], body).into_response()
}

pub(super) async fn handle_sitemap(State(state): State<Arc<AppState>>) -> Response {
  let vehicles = match state.vehicles {
    Some(ref client) => client.first_page().await,
    None => Arc::default(),
  };
  let entries = sitemap_entries(&state.table, &state.catalog, &vehicles, &state.base_url);
  tracing::debug!(urls = entries.len(), "sitemap rendered");
  xml("application/xml; charset=utf-8", render_sitemap(&entries))
}

fn rss_for(state: &AppState, locale: Locale) -> Response {
  let title = match state.site_name.as_str() {
    "" => t(locale, MessageKey::AllGuides).to_string(),
    name => format!("{name} | {}", t(locale, MessageKey::AllGuides)),
  };
  let link_path = get_route(&state.table, RouteKey::Blog, locale);
  let channel = RssChannel {
    title: &title,
    description: t(locale, MessageKey::AllGuides),
    base_url: &state.base_url,
    link_path: &link_path,
    locale,
  };
  let posts = state.catalog.get_all_posts(locale);
  xml("application/rss+xml; charset=utf-8", render_rss(&channel, &posts))
}

pub(super) async fn handle_default_rss(State(state): State<Arc<AppState>>) -> Response {
  rss_for(&state, Locale::DEFAULT)
}

pub(super) async fn handle_rss(
  State(state): State<Arc<AppState>>,
  Path(locale): Path<String>,
) -> Result<Response, AxumError> {
  let locale = locale_param(&locale)?;
  Ok(rss_for(&state, locale))
}
