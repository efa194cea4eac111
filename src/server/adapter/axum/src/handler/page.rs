/* src/server/adapter/axum/src/handler/page.rs */

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, Uri, header};
use axum::response::{IntoResponse, Response};
use kfz_core::content::{BlogPost, CategorySummary, RELATED_POSTS_LIMIT};
use kfz_core::resolve::find_location_page;
use kfz_core::{
  Cluster, Locale, LocationPage, MessageKey, ResolveData, RouteKey, SiteError, Vehicle, alternates,
  get_route, match_route, resolve_chain, t,
};
use serde::Serialize;

use super::AppState;
use crate::error::AxumError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PostView<'a> {
  #[serde(flatten)]
  post: &'a BlogPost,
  body: &'a str,
  translations: BTreeMap<Locale, &'a str>,
  related: Vec<&'a BlogPost>,
}

/// What the renderer needs to draw one page.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageDescriptor<'a> {
  locale: Locale,
  #[serde(skip_serializing_if = "Option::is_none")]
  route_key: Option<RouteKey>,
  path: String,
  alternates: BTreeMap<Locale, String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  location: Option<&'a LocationPage>,
  #[serde(skip_serializing_if = "Option::is_none")]
  categories: Option<Vec<CategorySummary>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  category: Option<CategorySummary>,
  #[serde(skip_serializing_if = "Option::is_none")]
  posts: Option<Vec<&'a BlogPost>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  post: Option<PostView<'a>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  vehicle: Option<Vehicle>,
}

impl<'a> PageDescriptor<'a> {
  fn new(locale: Locale, route_key: Option<RouteKey>, path: &str) -> Self {
    Self {
      locale,
      route_key,
      path: path.to_string(),
      alternates: BTreeMap::new(),
      location: None,
      categories: None,
      category: None,
      posts: None,
      post: None,
      vehicle: None,
    }
  }
}

fn normalize_path(path: &str) -> &str {
  let trimmed = path.trim_end_matches('/');
  if trimmed.is_empty() { "/" } else { trimmed }
}

/// Resolve `path` to a page. `preferred` comes from the strategy chain and
/// only decides unprefixed paths; a path unknown in that locale is retried
/// in the locale its URL implies.
async fn describe<'a>(
  state: &'a AppState,
  path: &str,
  preferred: Locale,
) -> Option<PageDescriptor<'a>> {
  let path = normalize_path(path);

  if let Some(location) = find_location_page(&state.locations, path) {
    let mut page = PageDescriptor::new(location.locale, None, path);
    page.alternates.insert(location.locale, location.path.to_string());
    page.location = Some(location);
    return Some(page);
  }

  let table = &state.table;
  let catalog = &*state.catalog;
  let m = match_route(table, path, Some(preferred))?;
  let locale = m.locale;
  let mut page = PageDescriptor::new(locale, Some(m.key), path);
  page.alternates = alternates(table, path, Some(locale)).into_iter().collect();

  let segments: Vec<&str> = m.remainder.split('/').filter(|s| !s.is_empty()).collect();
  match (m.key, segments.as_slice()) {
    (RouteKey::Blog, []) => {
      page.categories = Some(catalog.categories(locale));
      page.posts = Some(catalog.get_all_posts(locale));
    }
    (RouteKey::Blog, [category]) => {
      let cluster = Cluster::from_category_slug(locale, category)?;
      let posts = catalog.get_posts_by_category_slug(locale, category);
      page.alternates = Locale::ALL
        .into_iter()
        .map(|l| (l, format!("{}/{}", get_route(table, RouteKey::Blog, l), cluster.category_slug(l))))
        .collect();
      page.category =
        Some(CategorySummary { cluster, slug: cluster.category_slug(locale), count: posts.len() });
      page.posts = Some(posts);
    }
    (RouteKey::Blog, [category, slug]) => {
      let post = catalog.get_post(locale, category, slug)?;
      let translations = catalog.get_translations(post);
      page.alternates = translations.iter().map(|(l, p)| (*l, p.url.clone())).collect();
      // Drafts have no published translation set, not even themselves.
      page.alternates.entry(post.locale).or_insert_with(|| post.url.clone());
      page.post = Some(PostView {
        post,
        body: &post.body,
        translations: translations.iter().map(|(l, p)| (*l, p.url.as_str())).collect(),
        related: catalog.get_related_posts(post, RELATED_POSTS_LIMIT),
      });
    }
    (RouteKey::Vehicles, [slug]) => {
      let vehicle = state.vehicles.as_ref()?.find(slug).await?;
      page.vehicle = Some(vehicle);
    }
    (_, []) => {}
    _ => return None,
  }
  Some(page)
}

/// Fallback for every unclaimed GET: resolve the locale, describe the page
/// and refresh the locale cookie when the rendered locale differs from it.
pub(super) async fn handle_page(
  State(state): State<Arc<AppState>>,
  method: Method,
  uri: Uri,
  headers: HeaderMap,
) -> Result<Response, AxumError> {
  if method != Method::GET && method != Method::HEAD {
    return Err(SiteError::new("METHOD_NOT_ALLOWED", "Only GET is supported", 405).into());
  }

  let cookie_header = headers.get(header::COOKIE).and_then(|v| v.to_str().ok());
  let data = ResolveData {
    path: uri.path(),
    cookie_header,
    accept_language: headers.get(header::ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok()),
    locations: &state.locations,
  };
  let preferred = resolve_chain(&state.strategies, &data);

  let Some(page) = describe(&state, uri.path(), preferred).await else {
    tracing::debug!(path = uri.path(), "no page");
    return Err(SiteError::not_found(t(preferred, MessageKey::NotFoundTitle)).into());
  };

  let mut response = Json(&page).into_response();
  let stored = state.cookie.read(cookie_header);
  if let Some(cookie) = state.cookie.update(stored, page.locale)
    && let Ok(value) = HeaderValue::from_str(&cookie)
  {
    response.headers_mut().insert(header::SET_COOKIE, value);
  }
  Ok(response)
}
