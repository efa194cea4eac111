/* src/server/core/rust/src/content/loader.rs */

use std::path::Path;

use walkdir::WalkDir;

use super::ContentError;
use super::catalog::Catalog;
use super::compute::parse_document;
use crate::route::RouteTable;

fn is_source(path: &Path) -> bool {
  matches!(path.extension().and_then(|e| e.to_str()), Some("md" | "mdx"))
}

/// Read every `.md` / `.mdx` file under `dir` (sorted by path) into a catalog.
pub fn load_content_dir(
  table: &RouteTable,
  dir: &Path,
  default_author: &str,
) -> Result<Catalog, ContentError> {
  let mut posts = Vec::new();
  for entry in WalkDir::new(dir).sort_by_file_name() {
    let entry = entry?;
    let path = entry.path();
    if !entry.file_type().is_file() || !is_source(path) {
      continue;
    }
    let source = std::fs::read_to_string(path)
      .map_err(|source| ContentError::Io { path: path.to_path_buf(), source })?;
    let post = parse_document(table, path, &source, default_author)?;
    tracing::trace!(path = %path.display(), slug = %post.slug, locale = %post.locale, "loaded guide");
    posts.push(post);
  }
  tracing::info!(count = posts.len(), dir = %dir.display(), "loaded content");
  Catalog::new(posts)
}
