/* src/server/core/rust/src/locale.rs */

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported site languages. `De` is served without a path prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
  De,
  Pl,
  En,
}

impl Locale {
  pub const ALL: [Locale; 3] = [Locale::De, Locale::Pl, Locale::En];
  pub const DEFAULT: Locale = Locale::De;

  pub fn as_str(self) -> &'static str {
    match self {
      Self::De => "de",
      Self::Pl => "pl",
      Self::En => "en",
    }
  }

  pub fn is_default(self) -> bool {
    self == Self::DEFAULT
  }

  /// Path prefix for this locale: empty for the default, `/pl` otherwise.
  pub fn prefix(self) -> &'static str {
    match self {
      Self::De => "",
      Self::Pl => "/pl",
      Self::En => "/en",
    }
  }

  /// `lang`-style tag used for hreflang and RSS `<language>`.
  pub fn language_tag(self) -> &'static str {
    match self {
      Self::De => "de-AT",
      Self::Pl => "pl-PL",
      Self::En => "en",
    }
  }

  pub(crate) fn index(self) -> usize {
    self as usize
  }

  /// Locale whose non-default prefix opens `path` on a segment boundary.
  pub fn from_path_prefix(path: &str) -> Option<Locale> {
    Self::ALL.into_iter().filter(|l| !l.is_default()).find(|l| {
      path
        .strip_prefix(l.prefix())
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?', '#']))
    })
  }
}

impl fmt::Display for Locale {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale \"{0}\"")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
  type Err = UnknownLocale;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "de" => Ok(Self::De),
      "pl" => Ok(Self::Pl),
      "en" => Ok(Self::En),
      _ => Err(UnknownLocale(s.to_string())),
    }
  }
}
