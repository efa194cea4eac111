/* src/server/core/rust/src/lib.rs */

//! Locale routing, guide catalog and feed generation for the kfz-portal site.
//!
//! German is served unprefixed; Polish and English live under `/pl` and `/en`.
//! Every public page is addressed by a [`RouteKey`] and translated through a
//! validated [`RouteTable`].

pub mod content;
pub mod errors;
pub mod feed;
pub mod locale;
pub mod messages;
pub mod resolve;
pub mod route;
pub mod server;
pub mod vehicle;

// Re-exports for ergonomic use
pub use content::{BlogPost, Catalog, Cluster, ContentError, load_content_dir};
pub use errors::SiteError;
pub use locale::{Locale, UnknownLocale};
pub use messages::{MessageKey, all_messages, nav_label, t};
pub use resolve::{
  LOCATION_PAGES, LocaleCookie, LocationPage, ResolveData, ResolveStrategy, default_strategies,
  detect_locale_from_path, detect_locale_server, from_accept_language, from_cookie,
  from_location_page, from_url_prefix, resolve_chain,
};
pub use route::{
  RouteKey, RouteMatch, RouteTable, RouteTableError, alternates, get_locale_href, get_route,
  match_route,
};
pub use server::{SiteParts, SiteServer, VehicleSource};
pub use vehicle::{Vehicle, VehicleQuery};
