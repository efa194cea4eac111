/* src/server/core/rust/src/feed/rss.rs */

use chrono::NaiveTime;

use super::{absolute, xml_escape};
use crate::content::BlogPost;
use crate::locale::Locale;

pub struct RssChannel<'a> {
  pub title: &'a str,
  pub description: &'a str,
  pub base_url: &'a str,
  /// Absolute path of the channel's landing page, e.g. `/en/guides`.
  pub link_path: &'a str,
  pub locale: Locale,
}

fn rfc2822(date: chrono::NaiveDate) -> String {
  date.and_time(NaiveTime::MIN).and_utc().to_rfc2822()
}

/// RSS 2.0 feed over `posts`, in the order given.
pub fn render_rss(channel: &RssChannel<'_>, posts: &[&BlogPost]) -> String {
  let mut xml = String::from(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\">\n  <channel>\n",
  );
  let link = absolute(channel.base_url, channel.link_path);
  xml.push_str(&format!("    <title>{}</title>\n", xml_escape(channel.title)));
  xml.push_str(&format!("    <link>{}</link>\n", xml_escape(&link)));
  xml.push_str(&format!("    <description>{}</description>\n", xml_escape(channel.description)));
  xml.push_str(&format!("    <language>{}</language>\n", channel.locale.language_tag()));
  if let Some(newest) = posts.iter().map(|p| p.last_modified()).max() {
    xml.push_str(&format!("    <lastBuildDate>{}</lastBuildDate>\n", rfc2822(newest)));
  }

  for post in posts {
    let url = absolute(channel.base_url, &post.url);
    xml.push_str("    <item>\n");
    xml.push_str(&format!("      <title>{}</title>\n", xml_escape(&post.title)));
    xml.push_str(&format!("      <link>{}</link>\n", xml_escape(&url)));
    xml.push_str(&format!("      <guid isPermaLink=\"true\">{}</guid>\n", xml_escape(&url)));
    xml.push_str(&format!("      <pubDate>{}</pubDate>\n", rfc2822(post.date)));
    xml.push_str(&format!("      <description>{}</description>\n", xml_escape(&post.description)));
    xml.push_str(&format!("      <category>{}</category>\n", xml_escape(&post.category_slug)));
    xml.push_str("    </item>\n");
  }

  xml.push_str("  </channel>\n</rss>\n");
  xml
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::content::{DEFAULT_AUTHOR, parse_document};
  use crate::route::RouteTable;

  #[test]
  fn renders_items_with_absolute_links() {
    let src = "---\ntitle: Kosten & Ablauf\ndescription: <kurz>\ndate: 2024-03-04\nlocale: de\ncluster: buying\nslug: kosten\n---\nbody\n";
    let post =
      parse_document(RouteTable::shared(), std::path::Path::new("k.md"), src, DEFAULT_AUTHOR)
        .unwrap();
    let channel = RssChannel {
      title: "Ratgeber",
      description: "Tipps",
      base_url: "https://www.example.at/",
      link_path: "/ratgeber",
      locale: Locale::De,
    };
    let xml = render_rss(&channel, &[&post]);
    assert!(xml.contains("<link>https://www.example.at/ratgeber</link>"));
    assert!(xml.contains("<title>Kosten &amp; Ablauf</title>"));
    assert!(xml.contains("<description>&lt;kurz&gt;</description>"));
    assert!(xml.contains("<guid isPermaLink=\"true\">https://www.example.at/ratgeber/autokauf/kosten</guid>"));
    assert!(xml.contains("<pubDate>Mon, "));
    assert!(xml.contains("4 Mar 2024 00:00:00 +0000</pubDate>"));
    assert!(xml.contains("<language>de-AT</language>"));
  }

  #[test]
  fn empty_feed_has_no_build_date() {
    let channel = RssChannel {
      title: "Guides",
      description: "",
      base_url: "https://www.example.at",
      link_path: "/en/guides",
      locale: Locale::En,
    };
    let xml = render_rss(&channel, &[]);
    assert!(!xml.contains("lastBuildDate"));
    assert!(!xml.contains("<item>"));
  }
}
