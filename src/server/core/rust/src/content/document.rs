/* src/server/core/rust/src/content/document.rs */

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// Topical category of a guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cluster {
  Roadside,
  Buying,
  Selling,
  Logistics,
  Mobility,
}

impl Cluster {
  pub const ALL: [Cluster; 5] =
    [Cluster::Roadside, Cluster::Buying, Cluster::Selling, Cluster::Logistics, Cluster::Mobility];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Roadside => "roadside",
      Self::Buying => "buying",
      Self::Selling => "selling",
      Self::Logistics => "logistics",
      Self::Mobility => "mobility",
    }
  }

  /// URL segment of this cluster in `locale`.
  pub fn category_slug(self, locale: Locale) -> &'static str {
    let slugs: [&str; 3] = match self {
      Self::Roadside => ["pannenhilfe", "pomoc-drogowa", "roadside-assistance"],
      Self::Buying => ["autokauf", "zakup-auta", "buying"],
      Self::Selling => ["autoverkauf", "sprzedaz-auta", "selling"],
      Self::Logistics => ["transport-logistik", "transport-logistyka", "logistics"],
      Self::Mobility => ["mobilitaet", "mobilnosc", "mobility"],
    };
    slugs[locale.index()]
  }

  /// Reverse lookup of a category slug within `locale`.
  pub fn from_category_slug(locale: Locale, slug: &str) -> Option<Cluster> {
    Self::ALL.into_iter().find(|c| c.category_slug(locale) == slug)
  }
}

impl fmt::Display for Cluster {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Cluster {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL.into_iter().find(|c| c.as_str() == s).ok_or_else(|| format!("unknown cluster \"{s}\""))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
  pub question: String,
  pub answer: String,
}

/// Raw front matter of a guide source file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FrontMatter {
  pub(crate) title: String,
  pub(crate) description: String,
  pub(crate) date: String,
  #[serde(default)]
  pub(crate) updated: Option<String>,
  pub(crate) locale: Locale,
  pub(crate) cluster: Cluster,
  pub(crate) slug: String,
  #[serde(default)]
  pub(crate) translation_key: Option<String>,
  #[serde(default)]
  pub(crate) image: Option<String>,
  #[serde(default)]
  pub(crate) tags: Vec<String>,
  #[serde(default)]
  pub(crate) takeaways: Vec<String>,
  #[serde(default)]
  pub(crate) faq: Vec<FaqEntry>,
  #[serde(default)]
  pub(crate) draft: bool,
  #[serde(default)]
  pub(crate) featured: bool,
  #[serde(default)]
  pub(crate) author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
  pub depth: u8,
  pub text: String,
  pub slug: String,
}

/// A guide with its build-time computed fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
  pub title: String,
  pub description: String,
  pub date: NaiveDate,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub updated: Option<NaiveDate>,
  pub locale: Locale,
  pub cluster: Cluster,
  pub slug: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub translation_key: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image: Option<String>,
  pub tags: Vec<String>,
  pub takeaways: Vec<String>,
  pub faq: Vec<FaqEntry>,
  pub draft: bool,
  pub featured: bool,
  pub author: String,
  #[serde(skip)]
  pub body: String,

  pub category_slug: String,
  pub url: String,
  pub reading_time: u32,
  pub word_count: usize,
  pub headings: Vec<Heading>,
  #[serde(skip)]
  pub source_path: PathBuf,
  /// Position in load order; the tie-break for equal dates.
  #[serde(skip)]
  pub source_index: usize,
}

impl BlogPost {
  /// Date shown as "last modified".
  pub fn last_modified(&self) -> NaiveDate {
    self.updated.unwrap_or(self.date)
  }

  pub fn shares_tag_with(&self, other: &BlogPost) -> bool {
    self.tags.iter().any(|t| other.tags.contains(t))
  }
}
