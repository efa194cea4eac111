/* src/server/core/rust/src/content/mod.rs */

mod catalog;
mod compute;
mod document;
mod loader;


use std::path::PathBuf;

use crate::locale::Locale;

pub use catalog::{Catalog, CategorySummary, RELATED_POSTS_LIMIT};
pub use compute::{
  DEFAULT_AUTHOR, WORDS_PER_MINUTE, extract_headings, heading_slug, parse_document, post_url,
  reading_time, word_count,
};
pub use document::{BlogPost, Cluster, FaqEntry, Heading};
pub use loader::load_content_dir;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
  #[error("failed to read {}: {source}", .path.display())]
  Io { path: PathBuf, source: std::io::Error },
  #[error("failed to walk content directory: {0}")]
  Walk(#[from] walkdir::Error),
  #[error("{}: missing `---` front matter block", .path.display())]
  MissingFrontMatter { path: PathBuf },
  #[error("{}: invalid front matter: {source}", .path.display())]
  FrontMatter { path: PathBuf, source: serde_yaml::Error },
  #[error("{}: invalid date \"{value}\" (expected YYYY-MM-DD or RFC 3339)", .path.display())]
  InvalidDate { path: PathBuf, value: String },
  #[error("{}: slug must not be empty", .path.display())]
  EmptySlug { path: PathBuf },
  #[error(
    "duplicate slug \"{slug}\" for locale {locale} in {} and {}",
    .first.display(),
    .second.display()
  )]
  DuplicateSlug { locale: Locale, slug: String, first: PathBuf, second: PathBuf },
}
