/* src/server/core/rust/src/route/translate.rs */

use serde::Serialize;

use super::table::{RouteKey, RouteTable};
use crate::locale::Locale;
use crate::resolve::detect_locale_from_path;

/// A request path resolved back to its logical route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMatch {
  pub locale: Locale,
  pub key: RouteKey,
  /// Dynamic suffix after the route's base path, e.g. `/bmw-320d`. Empty on exact match.
  pub remainder: String,
}

/// Localized path for `key`. Non-default locales get their `/{locale}` prefix.
pub fn get_route(table: &RouteTable, key: RouteKey, locale: Locale) -> String {
  with_prefix(locale, table.path(key, locale))
}

/// Attach the locale prefix to an unprefixed path (`/` becomes `/pl`, not `/pl/`).
pub fn with_prefix(locale: Locale, path: &str) -> String {
  if locale.is_default() {
    return path.to_string();
  }
  if path == "/" || path.is_empty() {
    return locale.prefix().to_string();
  }
  format!("{}{path}", locale.prefix())
}

/// Split `path` into the path part and its `?query#fragment` tail.
pub(crate) fn split_tail(path: &str) -> (&str, &str) {
  match path.find(['?', '#']) {
    Some(idx) => path.split_at(idx),
    None => (path, ""),
  }
}

/// Strip trailing slashes except on the root path.
pub(crate) fn trim_trailing_slash(path: &str) -> &str {
  let trimmed = path.trim_end_matches('/');
  if trimmed.is_empty() { "/" } else { trimmed }
}

/// Remove `locale`'s prefix from `path`; a bare prefix yields `/`.
pub fn strip_locale_prefix(path: &str, locale: Locale) -> &str {
  if locale.is_default() {
    return if path.is_empty() { "/" } else { path };
  }
  match path.strip_prefix(locale.prefix()) {
    Some("") => "/",
    Some(rest) if rest.starts_with('/') => rest,
    _ => path,
  }
}

/// Reverse lookup: which route does `path` show, in which locale?
///
/// Exact matches win; otherwise the first entry (in table order) whose path
/// followed by `/` opens the suffix is taken, and the rest is the remainder.
/// An unprefixed path unknown under `preferred` is matched in the default locale.
pub fn match_route(table: &RouteTable, path: &str, preferred: Option<Locale>) -> Option<RouteMatch> {
  let (path, _) = split_tail(path);
  current_route(table, path, preferred).1
}

/// Unprefixed suffix of `path` and the route it shows, if any.
fn current_route<'p>(
  table: &RouteTable,
  path: &'p str,
  preferred: Option<Locale>,
) -> (&'p str, Option<RouteMatch>) {
  let current = detect_locale_from_path(path, preferred);
  let suffix = trim_trailing_slash(strip_locale_prefix(path, current));
  if let Some(m) = match_suffix(table, current, suffix) {
    return (suffix, Some(m));
  }

  let own = detect_locale_from_path(path, None);
  if own != current {
    let own_suffix = trim_trailing_slash(strip_locale_prefix(path, own));
    if let Some(m) = match_suffix(table, own, own_suffix) {
      return (own_suffix, Some(m));
    }
  }
  (suffix, None)
}

fn match_suffix(table: &RouteTable, locale: Locale, suffix: &str) -> Option<RouteMatch> {
  if let Some(key) = table.key_for_path(locale, suffix) {
    return Some(RouteMatch { locale, key, remainder: String::new() });
  }
  table.entries(locale).find_map(|(key, base)| {
    let rest = suffix.strip_prefix(base)?;
    rest
      .starts_with('/')
      .then(|| RouteMatch { locale, key, remainder: rest.to_string() })
  })
}

/// Equivalent of `path` in `target`, used by the language switcher.
///
/// Linking to the locale `path` is already shown in returns `path` itself.
/// Unknown paths keep their suffix and only swap the locale prefix, so the
/// result may not exist in the target locale's site structure.
pub fn get_locale_href(
  table: &RouteTable,
  path: &str,
  target: Locale,
  preferred: Option<Locale>,
) -> String {
  let (path, tail) = split_tail(path);
  if target == detect_locale_from_path(path, preferred) {
    return format!("{}{tail}", trim_trailing_slash(path));
  }

  let href = match current_route(table, path, preferred) {
    (_, Some(m)) => get_route(table, m.key, target) + &m.remainder,
    (suffix, None) => with_prefix(target, suffix),
  };
  format!("{href}{tail}")
}

/// Hreflang set: the equivalent of `path` in every locale.
pub fn alternates(
  table: &RouteTable,
  path: &str,
  preferred: Option<Locale>,
) -> Vec<(Locale, String)> {
  Locale::ALL.into_iter().map(|l| (l, get_locale_href(table, path, l, preferred))).collect()
}
