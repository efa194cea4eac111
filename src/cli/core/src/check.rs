/* src/cli/core/src/check.rs */

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Result, bail};
use kfz_core::{Catalog, LOCATION_PAGES, Locale, LocationPage, RouteTable, match_route};

use crate::build::load_catalog;
use crate::config::KfzConfig;
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  Warning,
  Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
  pub severity: Severity,
  pub message: String,
}

impl Finding {
  fn error(message: String) -> Self {
    Self { severity: Severity::Error, message }
  }

  fn warning(message: String) -> Self {
    Self { severity: Severity::Warning, message }
  }
}

/// Location landing pages must not shadow a routed page.
pub fn location_findings(table: &RouteTable, locations: &[LocationPage]) -> Vec<Finding> {
  locations
    .iter()
    .filter_map(|loc| {
      let m = match_route(table, loc.path, Some(loc.locale))?;
      m.remainder.is_empty().then(|| {
        Finding::error(format!("location page {} shadows route \"{}\"", loc.path, m.key))
      })
    })
    .collect()
}

/// Translation groups and metadata of published guides.
pub fn content_findings(catalog: &Catalog) -> Vec<Finding> {
  let mut findings = Vec::new();
  let mut groups: BTreeMap<&str, Vec<(Locale, &str)>> = BTreeMap::new();

  for post in catalog.posts().iter().filter(|p| !p.draft) {
    if post.description.trim().is_empty() {
      findings.push(Finding::warning(format!("{}: empty description", post.url)));
    }
    if let Some(ref key) = post.translation_key {
      groups.entry(key.as_str()).or_default().push((post.locale, post.slug.as_str()));
    }
  }

  for (key, members) in &groups {
    for locale in Locale::ALL {
      let slugs: Vec<&str> =
        members.iter().filter(|(l, _)| *l == locale).map(|(_, s)| *s).collect();
      match slugs.len() {
        0 => findings.push(Finding::warning(format!("translation \"{key}\" has no {locale} version"))),
        1 => {}
        _ => findings.push(Finding::error(format!(
          "translation \"{key}\" has {} {locale} posts: {}",
          slugs.len(),
          slugs.join(", ")
        ))),
      }
    }
  }
  findings
}

fn report(findings: &[Finding]) -> usize {
  let mut errors = 0;
  for finding in findings {
    match finding.severity {
      Severity::Warning => ui::warn(&finding.message),
      Severity::Error => {
        ui::fail(&finding.message);
        errors += 1;
      }
    }
  }
  errors
}

pub fn run_check(config: &KfzConfig, base_dir: &Path) -> Result<()> {
  ui::banner("check");
  let mut errors = 0;

  ui::step(1, 3, "Route table");
  let table = RouteTable::builtin();
  match table.check() {
    Ok(()) => ui::detail_ok("every locale defines every route with unique paths"),
    Err(e) => {
      ui::fail(&e.to_string());
      errors += 1;
    }
  }
  let findings = location_findings(&table, LOCATION_PAGES);
  if findings.is_empty() {
    ui::detail_ok(&format!("{} location pages", LOCATION_PAGES.len()));
  }
  errors += report(&findings);

  ui::step(2, 3, "Guides");
  let catalog = load_catalog(config, base_dir, &table)?;
  let drafts = catalog.posts().iter().filter(|p| p.draft).count();
  ui::detail(&format!("{} documents, {drafts} drafts", catalog.len()));
  errors += report(&content_findings(&catalog));

  ui::step(3, 3, "Vehicles");
  match config.vehicles {
    Some(ref v) => {
      ui::detail(&format!("source {}", v.api_url));
      if let Some(ref var) = v.token_env
        && std::env::var(var).is_err()
      {
        ui::warn(&format!("{var} is not set, requests go out without a token"));
      }
    }
    None => ui::detail("not configured"),
  }

  ui::blank();
  if errors > 0 {
    bail!("{errors} problem(s) found");
  }
  ui::ok("all checks passed");
  Ok(())
}
