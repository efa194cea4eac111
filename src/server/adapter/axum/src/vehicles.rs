/* src/server/adapter/axum/src/vehicles.rs */

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use kfz_core::vehicle::map_cms_response;
use kfz_core::{SiteError, Vehicle, VehicleQuery, VehicleSource};
use tokio::sync::RwLock;

const FIND_PAGE_SIZE: u32 = 100;
/// Upper bound on pages scanned by [`VehicleClient::find`].
const FIND_MAX_PAGES: u32 = 50;

struct CacheEntry {
  fetched_at: Instant,
  vehicles: Arc<Vec<Vehicle>>,
}

/// Read-only CMS client. Responses are cached per query and refetched once
/// older than the source's revalidation window.
#[derive(Clone)]
pub struct VehicleClient {
  http: reqwest::Client,
  source: Arc<VehicleSource>,
  cache: Arc<RwLock<HashMap<VehicleQuery, CacheEntry>>>,
}

impl VehicleClient {
  pub fn new(source: VehicleSource) -> Self {
    Self {
      http: reqwest::Client::new(),
      source: Arc::new(source),
      cache: Arc::new(RwLock::new(HashMap::new())),
    }
  }

  pub fn source(&self) -> &VehicleSource {
    &self.source
  }

  fn ttl(&self) -> Duration {
    Duration::from_secs(self.source.revalidate_secs)
  }

  /// Vehicles for `query`. Upstream failures are logged and answered with
  /// the last cached result, or nothing.
  pub async fn list(&self, query: &VehicleQuery) -> Arc<Vec<Vehicle>> {
    if let Some(entry) = self.cache.read().await.get(query)
      && entry.fetched_at.elapsed() < self.ttl()
    {
      return entry.vehicles.clone();
    }

    match self.fetch(query).await {
      Ok(vehicles) => {
        let vehicles = Arc::new(vehicles);
        tracing::debug!(page = query.page, count = vehicles.len(), "vehicle listing refreshed");
        self
          .cache
          .write()
          .await
          .insert(query.clone(), CacheEntry { fetched_at: Instant::now(), vehicles: vehicles.clone() });
        vehicles
      }
      Err(e) => {
        tracing::warn!(error = %e, url = %self.source.api_url, "vehicle fetch failed");
        self.cache.read().await.get(query).map(|entry| entry.vehicles.clone()).unwrap_or_default()
      }
    }
  }

  /// First page of the configured size.
  pub async fn first_page(&self) -> Arc<Vec<Vehicle>> {
    self.list(&VehicleQuery::page(1, self.source.page_size)).await
  }

  /// Look up one vehicle by slug, walking pages of the largest size the CMS
  /// allows until a short page or `FIND_MAX_PAGES` is reached.
  pub async fn find(&self, slug: &str) -> Option<Vehicle> {
    for page in 1..=FIND_MAX_PAGES {
      let vehicles = self.list(&VehicleQuery::page(page, FIND_PAGE_SIZE)).await;
      if let Some(vehicle) = vehicles.iter().find(|v| v.slug == slug) {
        return Some(vehicle.clone());
      }
      if vehicles.len() < FIND_PAGE_SIZE as usize {
        return None;
      }
    }
    tracing::warn!(slug, pages = FIND_MAX_PAGES, "vehicle lookup gave up");
    None
  }

  async fn fetch(&self, query: &VehicleQuery) -> Result<Vec<Vehicle>, SiteError> {
    let url = reqwest::Url::parse_with_params(&self.source.api_url, query.to_pairs())
      .map_err(|e| SiteError::internal(format!("invalid vehicle API url: {e}")))?;
    let mut req = self.http.get(url).header("Accept", "application/json");
    if let Some(ref token) = self.source.token {
      req = req.bearer_auth(token);
    }
    let resp =
      req.send().await.map_err(|e| SiteError::upstream(format!("vehicle API error: {e}")))?;
    if !resp.status().is_success() {
      return Err(SiteError::upstream(format!("vehicle API returned {}", resp.status())));
    }
    let body: serde_json::Value = resp
      .json()
      .await
      .map_err(|e| SiteError::upstream(format!("failed to parse vehicle response: {e}")))?;
    Ok(map_cms_response(&body, &self.source.media_base_url))
  }
}
