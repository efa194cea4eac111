/* src/server/core/rust/src/route/table.rs */

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// Logical page identifier, independent of its localized path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RouteKey {
  Home,
  Towing,
  CarSales,
  Rental,
  Transport,
  About,
  Contact,
  Imprint,
  Privacy,
  Faq,
  Vehicles,
  Blog,
}

impl RouteKey {
  pub const ALL: [RouteKey; 12] = [
    RouteKey::Home,
    RouteKey::Towing,
    RouteKey::CarSales,
    RouteKey::Rental,
    RouteKey::Transport,
    RouteKey::About,
    RouteKey::Contact,
    RouteKey::Imprint,
    RouteKey::Privacy,
    RouteKey::Faq,
    RouteKey::Vehicles,
    RouteKey::Blog,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Home => "home",
      Self::Towing => "towing",
      Self::CarSales => "carSales",
      Self::Rental => "rental",
      Self::Transport => "transport",
      Self::About => "about",
      Self::Contact => "contact",
      Self::Imprint => "imprint",
      Self::Privacy => "privacy",
      Self::Faq => "faq",
      Self::Vehicles => "vehicles",
      Self::Blog => "blog",
    }
  }

  pub(crate) fn index(self) -> usize {
    self as usize
  }
}

impl fmt::Display for RouteKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for RouteKey {
  type Err = RouteTableError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|k| k.as_str() == s)
      .ok_or_else(|| RouteTableError::UnknownKey(s.to_string()))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteTableError {
  #[error("unknown route key \"{0}\"")]
  UnknownKey(String),
  #[error("route table has no entries for locale {0}")]
  MissingLocale(Locale),
  #[error("locale {locale} has no path for route \"{key}\"")]
  MissingRoute { locale: Locale, key: RouteKey },
  #[error("locale {locale} defines route \"{key}\" more than once")]
  DuplicateKey { locale: Locale, key: RouteKey },
  #[error("locale {locale}: path \"{path}\" is used by both \"{first}\" and \"{second}\"")]
  DuplicatePath { locale: Locale, path: String, first: RouteKey, second: RouteKey },
  #[error("locale {locale}: path \"{path}\" for \"{key}\" must start with '/'")]
  InvalidPath { locale: Locale, key: RouteKey, path: String },
}

// Columns follow `RouteKey::ALL`, rows follow `Locale::ALL`.
const BUILTIN: [[&str; 12]; 3] = [
  [
    "/",
    "/abschleppdienst",
    "/autoankauf",
    "/autovermietung",
    "/transporte",
    "/ueber-uns",
    "/kontakt",
    "/impressum",
    "/datenschutz",
    "/faq",
    "/autohandel-gebrauchtwagen",
    "/ratgeber",
  ],
  [
    "/",
    "/pomoc-drogowa",
    "/skup-aut",
    "/wynajem-aut",
    "/transport",
    "/o-nas",
    "/kontakt",
    "/nota-prawna",
    "/polityka-prywatnosci",
    "/faq",
    "/skup-aut-handel",
    "/poradnik",
  ],
  [
    "/",
    "/towing",
    "/car-buying",
    "/car-rental",
    "/transport",
    "/about",
    "/contact",
    "/imprint",
    "/privacy",
    "/faq",
    "/car-sales",
    "/guides",
  ],
];

static SHARED: LazyLock<RouteTable> = LazyLock::new(RouteTable::builtin);

struct LocaleRoutes {
  /// Indexed by `RouteKey::index`.
  paths: Vec<String>,
  /// Declaration order, scanned by prefix matching.
  order: Vec<RouteKey>,
}

/// Per-locale mapping of route keys to unprefixed paths.
///
/// Every locale defines every key, and paths are unique within a locale.
/// Both are checked once at construction so lookups never fail.
pub struct RouteTable {
  locales: Vec<LocaleRoutes>,
}

impl RouteTable {
  /// The site's own route table.
  pub fn builtin() -> Self {
    let locales = BUILTIN
      .iter()
      .map(|row| LocaleRoutes {
        paths: row.iter().map(|p| (*p).to_string()).collect(),
        order: RouteKey::ALL.to_vec(),
      })
      .collect();
    Self { locales }
  }

  /// Process-wide instance of [`RouteTable::builtin`].
  pub fn shared() -> &'static RouteTable {
    &SHARED
  }

  /// Build a table from explicit entries, keeping each locale's entry order.
  pub fn new<I, P>(tables: I) -> Result<Self, RouteTableError>
  where
    I: IntoIterator<Item = (Locale, Vec<(RouteKey, P)>)>,
    P: Into<String>,
  {
    let mut staged: Vec<Option<Vec<(RouteKey, String)>>> = vec![None, None, None];
    for (locale, entries) in tables {
      staged[locale.index()] =
        Some(entries.into_iter().map(|(key, path)| (key, path.into())).collect());
    }

    if let Some(locale) = Locale::ALL.into_iter().find(|l| staged[l.index()].is_none()) {
      return Err(RouteTableError::MissingLocale(locale));
    }

    let mut locales = Vec::with_capacity(Locale::ALL.len());
    for (locale, entries) in Locale::ALL.into_iter().zip(staged) {
      locales.push(validate_locale(locale, entries.unwrap_or_default())?);
    }
    Ok(Self { locales })
  }

  /// Unprefixed path for `key` in `locale`.
  pub fn path(&self, key: RouteKey, locale: Locale) -> &str {
    &self.locales[locale.index()].paths[key.index()]
  }

  /// Entries of `locale` in declaration order.
  pub fn entries(&self, locale: Locale) -> impl Iterator<Item = (RouteKey, &str)> {
    let routes = &self.locales[locale.index()];
    routes.order.iter().map(|k| (*k, routes.paths[k.index()].as_str()))
  }

  /// Exact reverse lookup of an unprefixed path.
  pub fn key_for_path(&self, locale: Locale, path: &str) -> Option<RouteKey> {
    self.entries(locale).find(|(_, p)| *p == path).map(|(k, _)| k)
  }

  /// Re-run construction checks. Only tables built without [`RouteTable::new`] can fail.
  pub fn check(&self) -> Result<(), RouteTableError> {
    for locale in Locale::ALL {
      let entries = self.entries(locale).map(|(k, p)| (k, p.to_string())).collect();
      validate_locale(locale, entries)?;
    }
    Ok(())
  }
}

impl Default for RouteTable {
  fn default() -> Self {
    Self::builtin()
  }
}

fn validate_locale(
  locale: Locale,
  entries: Vec<(RouteKey, String)>,
) -> Result<LocaleRoutes, RouteTableError> {
  let mut slots: Vec<Option<String>> = vec![None; RouteKey::ALL.len()];
  let mut order = Vec::with_capacity(entries.len());
  let mut seen_paths: Vec<(String, RouteKey)> = Vec::new();
  let mut seen_keys = HashSet::new();

  for (key, path) in entries {
    if !path.starts_with('/') {
      return Err(RouteTableError::InvalidPath { locale, key, path });
    }
    if !seen_keys.insert(key) {
      return Err(RouteTableError::DuplicateKey { locale, key });
    }
    if let Some((_, first)) = seen_paths.iter().find(|(p, _)| *p == path) {
      return Err(RouteTableError::DuplicatePath { locale, path, first: *first, second: key });
    }
    seen_paths.push((path.clone(), key));
    slots[key.index()] = Some(path);
    order.push(key);
  }

  let mut paths = Vec::with_capacity(slots.len());
  for (key, slot) in RouteKey::ALL.into_iter().zip(slots) {
    let Some(path) = slot else {
      return Err(RouteTableError::MissingRoute { locale, key });
    };
    paths.push(path);
  }
  Ok(LocaleRoutes { paths, order })
}
