/* src/server/core/rust/src/feed/sitemap.rs */

use std::collections::HashSet;

use chrono::NaiveDate;

use super::{absolute, xml_escape};
use crate::content::Catalog;
use crate::locale::Locale;
use crate::route::{RouteKey, RouteTable, get_route};
use crate::vehicle::Vehicle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
  pub loc: String,
  pub lastmod: Option<NaiveDate>,
  /// hreflang alternates, default locale first.
  pub alternates: Vec<(Locale, String)>,
}

/// Strip trailing slashes from a URL's path, keeping the root `/`.
pub fn normalize_url(url: &str) -> String {
  let path_start = match url.find("://") {
    Some(scheme_end) => url[scheme_end + 3..].find('/').map(|i| scheme_end + 3 + i),
    None => url.find('/'),
  };
  let Some(path_start) = path_start else {
    return format!("{url}/");
  };
  let (origin, path) = url.split_at(path_start);
  let trimmed = path.trim_end_matches('/');
  if trimmed.is_empty() { format!("{origin}/") } else { format!("{origin}{trimmed}") }
}

fn localized(base_url: &str, paths: impl Fn(Locale) -> String) -> Vec<(Locale, String)> {
  Locale::ALL.into_iter().map(|l| (l, absolute(base_url, &paths(l)))).collect()
}

/// Every canonical URL of the site: static routes, vehicle detail pages,
/// guide categories and published guides, deduplicated by normalized URL.
pub fn sitemap_entries(
  table: &RouteTable,
  catalog: &Catalog,
  vehicles: &[Vehicle],
  base_url: &str,
) -> Vec<SitemapEntry> {
  let mut candidates = Vec::new();

  for key in RouteKey::ALL {
    let alternates = localized(base_url, |l| get_route(table, key, l));
    for (_, loc) in &alternates {
      candidates.push(SitemapEntry { loc: loc.clone(), lastmod: None, alternates: alternates.clone() });
    }
  }

  for vehicle in vehicles {
    let alternates = localized(base_url, |l| vehicle.path(table, l));
    for (_, loc) in &alternates {
      candidates.push(SitemapEntry { loc: loc.clone(), lastmod: None, alternates: alternates.clone() });
    }
  }

  for locale in Locale::ALL {
    for category in catalog.categories(locale) {
      let alternates = localized(base_url, |l| {
        format!("{}/{}", get_route(table, RouteKey::Blog, l), category.cluster.category_slug(l))
      });
      let loc = absolute(
        base_url,
        &format!("{}/{}", get_route(table, RouteKey::Blog, locale), category.slug),
      );
      candidates.push(SitemapEntry { loc, lastmod: None, alternates });
    }
  }

  for locale in Locale::ALL {
    for post in catalog.get_all_posts(locale) {
      let translations = catalog.get_translations(post);
      let alternates = if translations.len() > 1 {
        translations.values().map(|p| (p.locale, absolute(base_url, &p.url))).collect()
      } else {
        Vec::new()
      };
      candidates.push(SitemapEntry {
        loc: absolute(base_url, &post.url),
        lastmod: Some(post.last_modified()),
        alternates,
      });
    }
  }

  let mut seen = HashSet::new();
  candidates.into_iter().filter(|e| seen.insert(normalize_url(&e.loc))).collect()
}

/// sitemaps.org XML with `xhtml:link` hreflang alternates.
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
  let mut xml = String::from(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\n",
  );
  for entry in entries {
    xml.push_str("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", xml_escape(&normalize_url(&entry.loc))));
    if let Some(date) = entry.lastmod {
      xml.push_str(&format!("    <lastmod>{}</lastmod>\n", date.format("%Y-%m-%d")));
    }
    for (locale, href) in &entry.alternates {
      xml.push_str(&format!(
        "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\"/>\n",
        locale.language_tag(),
        xml_escape(&normalize_url(href))
      ));
    }
    if let Some((_, href)) = entry.alternates.iter().find(|(l, _)| l.is_default()) {
      xml.push_str(&format!(
        "    <xhtml:link rel=\"alternate\" hreflang=\"x-default\" href=\"{}\"/>\n",
        xml_escape(&normalize_url(href))
      ));
    }
    xml.push_str("  </url>\n");
  }
  xml.push_str("</urlset>\n");
  xml
}
