/* src/cli/core/src/main.rs */

mod build;
mod check;
mod config;
mod serve;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kfz_core::{Locale, RouteTable, alternates, get_locale_href};
use tracing_subscriber::EnvFilter;

use config::{KfzConfig, apply_env_overrides, find_kfz_config, load_kfz_config};

#[derive(Parser)]
#[command(name = "kfz", about = "kfz-portal site tooling")]
struct Cli {
  /// Log at debug level unless RUST_LOG says otherwise
  #[arg(short, long, global = true)]
  verbose: bool,
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Write the content index, sitemap, feeds and message tables
  Build {
    /// Path to kfz.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
  /// Validate the route table, location pages and guides
  Check {
    /// Path to kfz.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
  /// Serve pages, feeds and the API over HTTP
  Serve {
    /// Path to kfz.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Port to listen on (overrides kfz.toml and PORT)
    #[arg(short, long)]
    port: Option<u16>,
  },
  /// Translate a path into another locale, as the language switcher does
  Href {
    /// Site path, e.g. /autohandel-gebrauchtwagen/bmw-320d
    path: String,
    /// Target locale; prints every locale when omitted
    #[arg(short, long)]
    to: Option<Locale>,
    /// Stored locale preference for unprefixed paths
    #[arg(long)]
    preferred: Option<Locale>,
  },
}

fn init_tracing(verbose: bool) {
  let default = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}

/// Resolve config path (explicit or auto-detected), parse it and apply env overrides
fn resolve_config(explicit: Option<PathBuf>) -> Result<(PathBuf, KfzConfig)> {
  let path = match explicit {
    Some(p) => p,
    None => {
      let cwd = std::env::current_dir().context("failed to get cwd")?;
      find_kfz_config(&cwd)?
    }
  };
  let mut config = load_kfz_config(&path)?;
  apply_env_overrides(&mut config, |k| std::env::var(k).ok())?;
  tracing::debug!(config = %path.display(), "config loaded");
  Ok((path, config))
}

fn base_dir(config_path: &std::path::Path) -> PathBuf {
  config_path.parent().map_or_else(|| PathBuf::from("."), std::path::Path::to_path_buf)
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match cli.command {
    Command::Build { config } => {
      let (config_path, config) = resolve_config(config)?;
      build::run_build(&config, &base_dir(&config_path)).await?;
    }
    Command::Check { config } => {
      let (config_path, config) = resolve_config(config)?;
      check::run_check(&config, &base_dir(&config_path))?;
    }
    Command::Serve { config, port } => {
      let (config_path, mut config) = resolve_config(config)?;
      if let Some(port) = port {
        config.server.port = port;
      }
      serve::run_serve(&config, &base_dir(&config_path)).await?;
    }
    Command::Href { path, to, preferred } => {
      let table = RouteTable::shared();
      match to {
        Some(target) => ui::arrow(&get_locale_href(table, &path, target, preferred)),
        None => {
          for (locale, href) in alternates(table, &path, preferred) {
            ui::detail(&format!("{locale}  {href}"));
          }
        }
      }
    }
  }
  Ok(())
}
