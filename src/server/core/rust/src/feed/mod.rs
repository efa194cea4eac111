/* src/server/core/rust/src/feed/mod.rs */

mod escape;
mod rss;
mod sitemap;

pub use escape::xml_escape;
pub use rss::{RssChannel, render_rss};
pub use sitemap::{SitemapEntry, normalize_url, render_sitemap, sitemap_entries};

/// Join a site origin and an absolute path without doubling the slash.
pub fn absolute(base_url: &str, path: &str) -> String {
  let base = base_url.trim_end_matches('/');
  if path == "/" {
    return format!("{base}/");
  }
  format!("{base}{path}")
}
