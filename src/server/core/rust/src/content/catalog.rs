/* src/server/core/rust/src/content/catalog.rs */

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::ContentError;
use super::document::{BlogPost, Cluster};
use crate::locale::Locale;

pub const RELATED_POSTS_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
  pub cluster: Cluster,
  pub slug: &'static str,
  pub count: usize,
}

/// Immutable, indexed view over every loaded guide.
///
/// Built once; all queries borrow from it.
#[derive(Debug, Default)]
pub struct Catalog {
  posts: Vec<BlogPost>,
  by_slug: HashMap<(Locale, String), usize>,
  /// Published (non-draft) posts per locale, newest first, ties in load order.
  published: HashMap<Locale, Vec<usize>>,
  /// Secondary index over `published` by cluster, same order.
  by_cluster: HashMap<(Locale, Cluster), Vec<usize>>,
}

impl Catalog {
  /// Index `posts`, keeping their order as the load order.
  pub fn new(mut posts: Vec<BlogPost>) -> Result<Self, ContentError> {
    let mut by_slug = HashMap::new();
    for (idx, post) in posts.iter_mut().enumerate() {
      post.source_index = idx;
    }
    for (idx, post) in posts.iter().enumerate() {
      if let Some(&first) = by_slug.get(&(post.locale, post.slug.clone())) {
        let first: &BlogPost = &posts[first];
        return Err(ContentError::DuplicateSlug {
          locale: post.locale,
          slug: post.slug.clone(),
          first: first.source_path.clone(),
          second: post.source_path.clone(),
        });
      }
      by_slug.insert((post.locale, post.slug.clone()), idx);
    }

    let mut published: HashMap<Locale, Vec<usize>> = HashMap::new();
    for (idx, post) in posts.iter().enumerate().filter(|(_, p)| !p.draft) {
      published.entry(post.locale).or_default().push(idx);
    }
    for indices in published.values_mut() {
      // Stable sort keeps load order among equal dates.
      indices.sort_by(|a, b| posts[*b].date.cmp(&posts[*a].date));
    }

    let mut by_cluster: HashMap<(Locale, Cluster), Vec<usize>> = HashMap::new();
    for (locale, indices) in &published {
      for &idx in indices {
        by_cluster.entry((*locale, posts[idx].cluster)).or_default().push(idx);
      }
    }

    tracing::debug!(posts = posts.len(), "content catalog indexed");
    Ok(Self { posts, by_slug, published, by_cluster })
  }

  /// Every document, drafts included, in load order.
  pub fn posts(&self) -> &[BlogPost] {
    &self.posts
  }

  pub fn len(&self) -> usize {
    self.posts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.posts.is_empty()
  }

  fn resolve(&self, indices: Option<&Vec<usize>>) -> Vec<&BlogPost> {
    indices.map(|ids| ids.iter().map(|&i| &self.posts[i]).collect()).unwrap_or_default()
  }

  /// Published posts of `locale`, newest first.
  pub fn get_all_posts(&self, locale: Locale) -> Vec<&BlogPost> {
    self.resolve(self.published.get(&locale))
  }

  /// Published posts of the cluster behind `category_slug`; unknown slugs yield nothing.
  pub fn get_posts_by_category_slug(&self, locale: Locale, category_slug: &str) -> Vec<&BlogPost> {
    let Some(cluster) = Cluster::from_category_slug(locale, category_slug) else {
      return Vec::new();
    };
    self.resolve(self.by_cluster.get(&(locale, cluster)))
  }

  /// Exact slug match within `locale`. Drafts resolve too.
  pub fn get_post_by_slug(&self, locale: Locale, slug: &str) -> Option<&BlogPost> {
    self.by_slug.get(&(locale, slug.to_string())).map(|&i| &self.posts[i])
  }

  /// Like [`Catalog::get_post_by_slug`] but the post must also sit under `category_slug`.
  pub fn get_post(&self, locale: Locale, category_slug: &str, slug: &str) -> Option<&BlogPost> {
    self.get_post_by_slug(locale, slug).filter(|p| p.category_slug == category_slug)
  }

  /// Published posts sharing `post`'s translation key, one per locale.
  /// Without a key the post is its own only translation.
  pub fn get_translations<'a>(&'a self, post: &'a BlogPost) -> BTreeMap<Locale, &'a BlogPost> {
    let Some(ref key) = post.translation_key else {
      return BTreeMap::from([(post.locale, post)]);
    };
    let mut out = BTreeMap::new();
    for candidate in self.posts.iter().filter(|p| !p.draft) {
      if candidate.translation_key.as_ref() == Some(key) {
        out.entry(candidate.locale).or_insert(candidate);
      }
    }
    out
  }

  /// Up to `limit` published posts of the same locale that share the
  /// cluster or at least one tag, in listing order.
  pub fn get_related_posts(&self, current: &BlogPost, limit: usize) -> Vec<&BlogPost> {
    self
      .get_all_posts(current.locale)
      .into_iter()
      .filter(|p| p.slug != current.slug)
      .filter(|p| p.cluster == current.cluster || p.shares_tag_with(current))
      .take(limit)
      .collect()
  }

  pub fn featured_posts(&self, locale: Locale) -> Vec<&BlogPost> {
    self.get_all_posts(locale).into_iter().filter(|p| p.featured).collect()
  }

  /// Clusters of `locale` with at least one published post.
  pub fn categories(&self, locale: Locale) -> Vec<CategorySummary> {
    Cluster::ALL
      .into_iter()
      .filter_map(|cluster| {
        let count = self.by_cluster.get(&(locale, cluster)).map_or(0, Vec::len);
        (count > 0).then(|| CategorySummary { cluster, slug: cluster.category_slug(locale), count })
      })
      .collect()
  }

  /// Tags used by published posts of `locale`, with usage counts.
  pub fn all_tags(&self, locale: Locale) -> BTreeMap<&str, usize> {
    let mut tags = BTreeMap::new();
    for post in self.get_all_posts(locale) {
      for tag in &post.tags {
        *tags.entry(tag.as_str()).or_insert(0) += 1;
      }
    }
    tags
  }
}
