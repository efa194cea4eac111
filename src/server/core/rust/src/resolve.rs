/* src/server/core/rust/src/resolve.rs */

use serde::Serialize;

use crate::locale::Locale;
use crate::route::{split_tail, trim_trailing_slash};

/// Name of the locale preference cookie.
pub const LOCALE_COOKIE: &str = "NEXT_LOCALE";
/// Lifetime of the locale preference cookie.
pub const LOCALE_COOKIE_MAX_AGE_DAYS: u32 = 180;

/// Active locale for `path`: a non-default prefix wins over any stored
/// preference, then the preference, then the default locale.
pub fn detect_locale_from_path(path: &str, preferred: Option<Locale>) -> Locale {
  Locale::from_path_prefix(path).or(preferred).unwrap_or(Locale::DEFAULT)
}

/// A landing page that is always rendered in one locale, whatever its prefix or the cookie say.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationPage {
  pub path: &'static str,
  pub locale: Locale,
  pub city: &'static str,
}

pub const LOCATION_PAGES: &[LocationPage] = &[
  LocationPage { path: "/abschleppdienst-wien", locale: Locale::De, city: "Wien" },
  LocationPage {
    path: "/abschleppdienst-niederoesterreich",
    locale: Locale::De,
    city: "Niederösterreich",
  },
  LocationPage { path: "/abschleppdienst-schwechat", locale: Locale::De, city: "Schwechat" },
  LocationPage { path: "/pomoc-drogowa-wieden", locale: Locale::Pl, city: "Wiedeń" },
  LocationPage { path: "/towing-vienna", locale: Locale::En, city: "Vienna" },
];

/// Landing page served at `path`, ignoring query, fragment and a trailing slash.
pub fn find_location_page<'a>(locations: &'a [LocationPage], path: &str) -> Option<&'a LocationPage> {
  let (path, _) = split_tail(path);
  let path = trim_trailing_slash(path);
  locations.iter().find(|l| l.path == path)
}

/// Server-side detection: location landing pages force their locale first.
pub fn detect_locale_server(
  locations: &[LocationPage],
  path: &str,
  preferred: Option<Locale>,
) -> Locale {
  find_location_page(locations, path)
    .map(|l| l.locale)
    .unwrap_or_else(|| detect_locale_from_path(path, preferred))
}

/// Request facts a strategy may inspect.
pub struct ResolveData<'a> {
  pub path: &'a str,
  pub cookie_header: Option<&'a str>,
  pub accept_language: Option<&'a str>,
  pub locations: &'a [LocationPage],
}

/// One step of the locale resolution chain. Returns `None` to defer to the next step.
pub trait ResolveStrategy: Send + Sync {
  fn kind(&self) -> &'static str;
  fn resolve(&self, data: &ResolveData<'_>) -> Option<Locale>;
}

struct LocationOverride;

impl ResolveStrategy for LocationOverride {
  fn kind(&self) -> &'static str {
    "location_page"
  }

  fn resolve(&self, data: &ResolveData<'_>) -> Option<Locale> {
    find_location_page(data.locations, data.path).map(|l| l.locale)
  }
}

struct UrlPrefix;

impl ResolveStrategy for UrlPrefix {
  fn kind(&self) -> &'static str {
    "url_prefix"
  }

  fn resolve(&self, data: &ResolveData<'_>) -> Option<Locale> {
    Locale::from_path_prefix(data.path)
  }
}

struct Cookie {
  name: String,
}

impl ResolveStrategy for Cookie {
  fn kind(&self) -> &'static str {
    "cookie"
  }

  fn resolve(&self, data: &ResolveData<'_>) -> Option<Locale> {
    parse_cookie_locale(data.cookie_header?, &self.name)
  }
}

struct AcceptLanguage;

impl ResolveStrategy for AcceptLanguage {
  fn kind(&self) -> &'static str {
    "accept_language"
  }

  fn resolve(&self, data: &ResolveData<'_>) -> Option<Locale> {
    parse_accept_language(data.accept_language?)
  }
}

pub fn from_location_page() -> Box<dyn ResolveStrategy> {
  Box::new(LocationOverride)
}

pub fn from_url_prefix() -> Box<dyn ResolveStrategy> {
  Box::new(UrlPrefix)
}

pub fn from_cookie(name: impl Into<String>) -> Box<dyn ResolveStrategy> {
  Box::new(Cookie { name: name.into() })
}

pub fn from_accept_language() -> Box<dyn ResolveStrategy> {
  Box::new(AcceptLanguage)
}

/// Location page -> URL prefix -> locale cookie. Unprefixed paths without a cookie land on the default.
pub fn default_strategies() -> Vec<Box<dyn ResolveStrategy>> {
  vec![from_location_page(), from_url_prefix(), from_cookie(LOCALE_COOKIE)]
}

/// Run `strategies` in order; the first answer wins, otherwise the default locale.
pub fn resolve_chain(strategies: &[Box<dyn ResolveStrategy>], data: &ResolveData<'_>) -> Locale {
  strategies.iter().find_map(|s| s.resolve(data)).unwrap_or(Locale::DEFAULT)
}

/// Read a supported locale from a `Cookie:` header.
pub fn parse_cookie_locale(header: &str, name: &str) -> Option<Locale> {
  header
    .split(';')
    .filter_map(|pair| pair.trim().split_once('='))
    .find(|(k, _)| k.trim() == name)
    .and_then(|(_, v)| v.trim().parse().ok())
}

/// Highest-weighted supported language from an `Accept-Language` header.
/// Region tags fall back to their language (`pl-PL` -> `pl`).
pub fn parse_accept_language(header: &str) -> Option<Locale> {
  let mut entries: Vec<(&str, f64)> = Vec::new();
  for part in header.split(',') {
    let part = part.trim();
    if part.is_empty() {
      continue;
    }
    let mut segments = part.split(';');
    let lang = segments.next().unwrap_or("").trim();
    let mut q = 1.0_f64;
    for s in segments {
      if let Some(val) = s.trim().strip_prefix("q=")
        && let Ok(v) = val.parse::<f64>()
      {
        q = v;
      }
    }
    entries.push((lang, q));
  }

  entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

  entries.iter().filter(|(_, q)| *q > 0.0).find_map(|&(lang, _)| {
    let primary = lang.split('-').next().unwrap_or(lang);
    primary.parse().ok()
  })
}

/// Settings for the locale preference cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleCookie {
  pub name: String,
  pub max_age_days: u32,
}

impl Default for LocaleCookie {
  fn default() -> Self {
    Self { name: LOCALE_COOKIE.to_string(), max_age_days: LOCALE_COOKIE_MAX_AGE_DAYS }
  }
}

impl LocaleCookie {
  pub fn read(&self, cookie_header: Option<&str>) -> Option<Locale> {
    parse_cookie_locale(cookie_header?, &self.name)
  }

  /// `Set-Cookie` value storing `locale`.
  pub fn header_value(&self, locale: Locale) -> String {
    let max_age = u64::from(self.max_age_days) * 24 * 60 * 60;
    format!("{}={}; Path=/; Max-Age={max_age}; SameSite=Lax", self.name, locale.as_str())
  }

  /// `Set-Cookie` value when the effective locale differs from the stored one.
  pub fn update(&self, stored: Option<Locale>, effective: Locale) -> Option<String> {
    (stored != Some(effective)).then(|| self.header_value(effective))
  }
}
