/* src/server/core/rust/src/content/compute.rs */

//! Computed fields derived once per source document.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;

use super::ContentError;
use super::document::{BlogPost, FrontMatter, Heading};
use crate::locale::Locale;
use crate::route::{RouteKey, RouteTable, get_route};

pub const WORDS_PER_MINUTE: usize = 200;
pub const DEFAULT_AUTHOR: &str = "Redaktion";

static HEADING_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^(#{1,6})[ \t]+(.+?)(?:[ \t]+#+)?[ \t]*$").expect("valid regex"));
static LINK_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").expect("valid regex"));
static NON_WORD_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));
static SEPARATOR_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[\s-]+").expect("valid regex"));

/// Split `---` delimited front matter from the body.
pub(crate) fn split_front_matter(source: &str) -> Option<(&str, &str)> {
  let source = source.strip_prefix('\u{feff}').unwrap_or(source);
  let rest = source.strip_prefix("---")?;
  let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;

  let mut offset = 0;
  for line in rest.split_inclusive('\n') {
    if line.trim_end() == "---" {
      let yaml = &rest[..offset];
      let body = &rest[offset + line.len()..];
      return Some((yaml, body));
    }
    offset += line.len();
  }
  None
}

fn parse_date(path: &Path, value: &str) -> Result<NaiveDate, ContentError> {
  let value = value.trim();
  DateTime::parse_from_rfc3339(value)
    .map(|dt| dt.date_naive())
    .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
    .map_err(|_| ContentError::InvalidDate { path: path.to_path_buf(), value: value.to_string() })
}

/// Words in a Markdown body. Tokens without any alphanumeric character
/// (list markers, fences, separators) are not words.
pub fn word_count(body: &str) -> usize {
  body.split_whitespace().filter(|w| w.chars().any(char::is_alphanumeric)).count()
}

/// Minutes to read `words`, rounded up, never below one.
pub fn reading_time(words: usize) -> u32 {
  let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
  u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Anchor slug of a heading: lowercase, punctuation removed, runs of
/// whitespace and `-` become one `-`, no `-` at either end.
pub fn heading_slug(text: &str) -> String {
  let lower = text.to_lowercase();
  let cleaned = NON_WORD_RE.replace_all(&lower, "");
  SEPARATOR_RE.replace_all(&cleaned, "-").trim_matches('-').to_string()
}

fn plain_text(text: &str) -> String {
  let unlinked = LINK_RE.replace_all(text, "$1");
  unlinked.chars().filter(|c| !matches!(c, '*' | '_' | '`')).collect::<String>().trim().to_string()
}

/// Outline of `##`..`######` headings, skipping fenced code blocks.
/// Repeated slugs get the first free `-1`, `-2`, ... suffix.
pub fn extract_headings(body: &str) -> Vec<Heading> {
  let mut headings = Vec::new();
  let mut seen: HashSet<String> = HashSet::new();
  let mut fence: Option<&str> = None;

  for line in body.lines() {
    let trimmed = line.trim_start();
    if let Some(open) = fence {
      if trimmed.starts_with(open) {
        fence = None;
      }
      continue;
    }
    if trimmed.starts_with("```") {
      fence = Some("```");
      continue;
    }
    if trimmed.starts_with("~~~") {
      fence = Some("~~~");
      continue;
    }

    let Some(caps) = HEADING_RE.captures(line) else {
      continue;
    };
    let depth = caps[1].len();
    if depth < 2 {
      continue;
    }
    let text = plain_text(&caps[2]);
    if text.is_empty() {
      continue;
    }

    let base = heading_slug(&text);
    let mut slug = base.clone();
    let mut n = 0;
    while !seen.insert(slug.clone()) {
      n += 1;
      slug = format!("{base}-{n}");
    }

    headings.push(Heading { depth: u8::try_from(depth).unwrap_or(6), text, slug });
  }
  headings
}

/// Canonical URL of a guide: `{blog base}/{category slug}/{slug}`.
pub fn post_url(table: &RouteTable, locale: Locale, category_slug: &str, slug: &str) -> String {
  format!("{}/{category_slug}/{slug}", get_route(table, RouteKey::Blog, locale))
}

/// Parse one source document and derive its computed fields.
pub fn parse_document(
  table: &RouteTable,
  path: &Path,
  source: &str,
  default_author: &str,
) -> Result<BlogPost, ContentError> {
  let (yaml, body) = split_front_matter(source)
    .ok_or_else(|| ContentError::MissingFrontMatter { path: path.to_path_buf() })?;
  let fm: FrontMatter = serde_yaml::from_str(yaml)
    .map_err(|source| ContentError::FrontMatter { path: path.to_path_buf(), source })?;

  if fm.slug.trim().is_empty() {
    return Err(ContentError::EmptySlug { path: path.to_path_buf() });
  }

  let date = parse_date(path, &fm.date)?;
  let updated = fm.updated.as_deref().map(|u| parse_date(path, u)).transpose()?;
  let category_slug = fm.cluster.category_slug(fm.locale).to_string();
  let url = post_url(table, fm.locale, &category_slug, &fm.slug);
  let words = word_count(body);

  Ok(BlogPost {
    title: fm.title,
    description: fm.description,
    date,
    updated,
    locale: fm.locale,
    cluster: fm.cluster,
    slug: fm.slug,
    translation_key: fm.translation_key.filter(|k| !k.trim().is_empty()),
    image: fm.image,
    tags: fm.tags,
    takeaways: fm.takeaways,
    faq: fm.faq,
    draft: fm.draft,
    featured: fm.featured,
    author: fm.author.unwrap_or_else(|| default_author.to_string()),
    body: body.to_string(),
    category_slug,
    url,
    reading_time: reading_time(words),
    word_count: words,
    headings: extract_headings(body),
    source_path: path.to_path_buf(),
    source_index: 0,
  })
}
