/* src/server/core/rust/src/vehicle.rs */

//! Read-only projection of vehicle listings kept in the external CMS.

use serde::Serialize;
use serde_json::Value;

use crate::content::heading_slug;
use crate::locale::Locale;
use crate::route::{RouteKey, RouteTable, get_route};

pub const DEFAULT_PAGE_SIZE: u32 = 24;

const DEFAULT_FIELDS: &[&str] =
  &["make", "model", "year", "mileage", "price", "fuel", "transmission", "power", "description"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
  pub id: String,
  pub slug: String,
  pub make: String,
  pub model: String,
  pub year: u16,
  pub mileage_km: u32,
  pub price_eur: u32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub fuel: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub transmission: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub power_kw: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub images: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub updated_at: Option<String>,
}

impl Vehicle {
  /// Detail page of this vehicle under the localized listing route.
  pub fn path(&self, table: &RouteTable, locale: Locale) -> String {
    format!("{}/{}", get_route(table, RouteKey::Vehicles, locale), self.slug)
  }

  pub fn title(&self) -> String {
    format!("{} {}", self.make, self.model).trim().to_string()
  }
}

/// Pagination and field selection sent to the CMS.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VehicleQuery {
  pub page: u32,
  pub page_size: u32,
  pub fields: Vec<String>,
}

impl Default for VehicleQuery {
  fn default() -> Self {
    Self {
      page: 1,
      page_size: DEFAULT_PAGE_SIZE,
      fields: DEFAULT_FIELDS.iter().map(|f| (*f).to_string()).collect(),
    }
  }
}

impl VehicleQuery {
  pub fn page(page: u32, page_size: u32) -> Self {
    Self { page: page.max(1), page_size: page_size.clamp(1, 100), ..Self::default() }
  }

  /// Query string pairs in the CMS's bracket notation. Images are always populated.
  pub fn to_pairs(&self) -> Vec<(String, String)> {
    let mut pairs = vec![
      ("pagination[page]".to_string(), self.page.to_string()),
      ("pagination[pageSize]".to_string(), self.page_size.to_string()),
    ];
    for (i, field) in self.fields.iter().enumerate() {
      pairs.push((format!("fields[{i}]"), field.clone()));
    }
    pairs.push(("populate".to_string(), "images".to_string()));
    pairs
  }
}

/// `make-model-id`, e.g. `bmw-320d-17`.
pub fn vehicle_slug(make: &str, model: &str, id: &str) -> String {
  heading_slug(&format!("{make} {model} {id}"))
}

fn str_field(obj: &Value, key: &str) -> Option<String> {
  match obj.get(key)? {
    Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
    Value::Number(n) => Some(n.to_string()),
    _ => None,
  }
}

fn num_field(obj: &Value, key: &str) -> Option<u64> {
  match obj.get(key)? {
    Value::Number(n) => n.as_u64().or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64)),
    Value::String(s) => parse_amount(s),
    _ => None,
  }
}

/// Whole units of a CMS number string such as `84.500`, `21990.50` or `21.990,50`.
///
/// The last `,` or `.` is the decimal separator, except a lone `.` group of
/// exactly three digits, which separates thousands.
fn parse_amount(raw: &str) -> Option<u64> {
  let s: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
  let decimal = match (s.rfind(','), s.rfind('.')) {
    (Some(comma), Some(dot)) => Some(comma.max(dot)),
    (Some(comma), None) => Some(comma),
    (None, Some(dot)) if s.len() - dot - 1 != 3 => Some(dot),
    _ => None,
  };
  let (int, frac) = match decimal {
    Some(idx) => (&s[..idx], &s[idx + 1..]),
    None => (s.as_str(), ""),
  };
  let int: String = int.chars().filter(|c| !matches!(c, '.' | ',')).collect();
  if int.is_empty() && frac.is_empty() {
    return None;
  }
  let int = if int.is_empty() { "0" } else { int.as_str() };
  let frac = if frac.is_empty() { "0" } else { frac };
  format!("{int}.{frac}")
    .parse::<f64>()
    .ok()
    .filter(|f| f.is_finite() && *f >= 0.0)
    .map(|f| f.round() as u64)
}

fn absolute_url(media_base: &str, url: &str) -> String {
  if url.starts_with("http://") || url.starts_with("https://") || media_base.is_empty() {
    return url.to_string();
  }
  format!("{}/{}", media_base.trim_end_matches('/'), url.trim_start_matches('/'))
}

fn image_urls(attrs: &Value, media_base: &str) -> Vec<String> {
  let items = match attrs.get("images") {
    Some(Value::Array(items)) => items.clone(),
    Some(Value::Object(wrapper)) => match wrapper.get("data") {
      Some(Value::Array(items)) => items.clone(),
      _ => Vec::new(),
    },
    _ => Vec::new(),
  };
  items
    .iter()
    .filter_map(|item| {
      let url = item.get("url").or_else(|| item.get("attributes").and_then(|a| a.get("url")))?;
      url.as_str().map(|u| absolute_url(media_base, u))
    })
    .collect()
}

/// Map one CMS item, flat or wrapped as `{id, attributes}`. Items without an id are skipped.
pub fn map_cms_item(item: &Value, media_base: &str) -> Option<Vehicle> {
  let id = str_field(item, "id").or_else(|| str_field(item, "documentId"))?;
  let attrs = item.get("attributes").filter(|a| a.is_object()).unwrap_or(item);

  let make = str_field(attrs, "make").unwrap_or_default();
  let model = str_field(attrs, "model").unwrap_or_default();
  let slug = str_field(attrs, "slug").unwrap_or_else(|| vehicle_slug(&make, &model, &id));

  Some(Vehicle {
    slug,
    year: num_field(attrs, "year").and_then(|n| u16::try_from(n).ok()).unwrap_or(0),
    mileage_km: num_field(attrs, "mileage").and_then(|n| u32::try_from(n).ok()).unwrap_or(0),
    price_eur: num_field(attrs, "price").and_then(|n| u32::try_from(n).ok()).unwrap_or(0),
    fuel: str_field(attrs, "fuel"),
    transmission: str_field(attrs, "transmission"),
    power_kw: num_field(attrs, "power").and_then(|n| u32::try_from(n).ok()),
    description: str_field(attrs, "description"),
    images: image_urls(attrs, media_base),
    updated_at: str_field(attrs, "updatedAt"),
    id,
    make,
    model,
  })
}

/// Map a CMS list response (`{data: [...]}`); anything unexpected maps to no vehicles.
pub fn map_cms_response(body: &Value, media_base: &str) -> Vec<Vehicle> {
  let Some(items) = body.get("data").and_then(Value::as_array) else {
    tracing::warn!("vehicle response has no data array");
    return Vec::new();
  };
  items.iter().filter_map(|item| map_cms_item(item, media_base)).collect()
}
