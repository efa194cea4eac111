/* src/server/adapter/axum/src/handler/api.rs */

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use kfz_core::{Locale, SiteError, VehicleQuery, all_messages, get_locale_href};
use serde::Deserialize;

use super::{AppState, locale_param};
use crate::error::AxumError;

#[derive(Deserialize)]
pub(super) struct HrefParams {
  path: Option<String>,
  target: Option<String>,
}

pub(super) async fn handle_locale_href(
  State(state): State<Arc<AppState>>,
  Query(params): Query<HrefParams>,
) -> Result<Json<serde_json::Value>, AxumError> {
  let path = params.path.filter(|p| p.starts_with('/')).ok_or_else(|| {
    SiteError::validation("Query parameter 'path' must be an absolute path")
  })?;
  let target = params
    .target
    .as_deref()
    .ok_or_else(|| SiteError::validation("Missing query parameter 'target'"))?
    .parse::<Locale>()
    .map_err(|e| SiteError::validation(e.to_string()))?;

  let href = get_locale_href(&state.table, &path, target, None);
  Ok(Json(serde_json::json!({ "href": href })))
}

pub(super) async fn handle_messages(
  Path(locale): Path<String>,
) -> Result<Json<serde_json::Value>, AxumError> {
  let locale = locale_param(&locale)?;
  Ok(Json(serde_json::json!({ "locale": locale, "messages": all_messages(locale) })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct VehicleParams {
  page: Option<u32>,
  page_size: Option<u32>,
}

pub(super) async fn handle_vehicles(
  State(state): State<Arc<AppState>>,
  Query(params): Query<VehicleParams>,
) -> Json<serde_json::Value> {
  let Some(ref client) = state.vehicles else {
    return Json(serde_json::json!({ "vehicles": [], "page": 1 }));
  };
  let query = VehicleQuery::page(
    params.page.unwrap_or(1),
    params.page_size.unwrap_or(client.source().page_size),
  );
  let vehicles = client.list(&query).await;
  Json(serde_json::json!({
    "vehicles": vehicles.as_slice(),
    "page": query.page,
    "pageSize": query.page_size,
  }))
}
