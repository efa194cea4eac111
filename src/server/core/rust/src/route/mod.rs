/* src/server/core/rust/src/route/mod.rs */

mod table;
mod translate;

#[cfg(test)]
mod tests;

pub use table::{RouteKey, RouteTable, RouteTableError};
pub use translate::{
  RouteMatch, alternates, get_locale_href, get_route, match_route, strip_locale_prefix, with_prefix,
};
pub(crate) use translate::{split_tail, trim_trailing_slash};
