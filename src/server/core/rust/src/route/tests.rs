/* src/server/core/rust/src/route/tests.rs */

use super::*;
use crate::locale::Locale;
use crate::resolve::detect_locale_from_path;

fn table() -> &'static RouteTable {
  RouteTable::shared()
}

#[test]
fn contact_in_every_locale() {
  assert_eq!(get_route(table(), RouteKey::Contact, Locale::De), "/kontakt");
  assert_eq!(get_route(table(), RouteKey::Contact, Locale::Pl), "/pl/kontakt");
  assert_eq!(get_route(table(), RouteKey::Contact, Locale::En), "/en/contact");
}

#[test]
fn home_has_no_trailing_slash_when_prefixed() {
  assert_eq!(get_route(table(), RouteKey::Home, Locale::De), "/");
  assert_eq!(get_route(table(), RouteKey::Home, Locale::Pl), "/pl");
  assert_eq!(get_route(table(), RouteKey::Home, Locale::En), "/en");
}

#[test]
fn every_route_starts_with_slash() {
  for key in RouteKey::ALL {
    for locale in Locale::ALL {
      let path = get_route(table(), key, locale);
      assert!(path.starts_with('/'), "{key}/{locale}: {path}");
    }
  }
}

#[test]
fn default_locale_routes_are_unprefixed() {
  for key in RouteKey::ALL {
    let path = get_route(table(), key, Locale::DEFAULT);
    assert_eq!(Locale::from_path_prefix(&path), None, "{key}: {path}");
  }
}

#[test]
fn builtin_paths_are_unique_per_locale() {
  for locale in Locale::ALL {
    let mut paths: Vec<&str> = table().entries(locale).map(|(_, p)| p).collect();
    paths.sort_unstable();
    paths.dedup();
    assert_eq!(paths.len(), RouteKey::ALL.len(), "{locale}");
  }
}

#[test]
fn builtin_rows_pass_checked_constructor() {
  let rows = Locale::ALL
    .into_iter()
    .map(|l| (l, table().entries(l).map(|(k, p)| (k, p.to_string())).collect::<Vec<_>>()));
  assert!(RouteTable::new(rows).is_ok());
  assert_eq!(table().check(), Ok(()));
}

#[test]
fn round_trip_detects_locale() {
  for key in RouteKey::ALL {
    for locale in Locale::ALL {
      let path = get_route(table(), key, locale);
      assert_eq!(detect_locale_from_path(&path, None), locale, "{path}");
    }
  }
}

#[test]
fn vehicle_detail_keeps_slug_across_locales() {
  assert_eq!(
    get_locale_href(table(), "/autohandel-gebrauchtwagen/bmw-320d", Locale::Pl, None),
    "/pl/skup-aut-handel/bmw-320d"
  );
  assert_eq!(
    get_locale_href(table(), "/pl/skup-aut-handel/bmw-320d", Locale::En, Some(Locale::De)),
    "/en/car-sales/bmw-320d"
  );
  assert_eq!(
    get_locale_href(table(), "/en/car-sales/bmw-320d", Locale::De, None),
    "/autohandel-gebrauchtwagen/bmw-320d"
  );
}

#[test]
fn exact_match_translates_static_pages() {
  assert_eq!(get_locale_href(table(), "/kontakt", Locale::En, None), "/en/contact");
  assert_eq!(get_locale_href(table(), "/en/guides", Locale::Pl, None), "/pl/poradnik");
  assert_eq!(get_locale_href(table(), "/pl", Locale::De, None), "/");
  assert_eq!(get_locale_href(table(), "/", Locale::En, None), "/en");
}

#[test]
fn href_to_current_locale_is_identity() {
  let paths = [
    "/",
    "/kontakt",
    "/ratgeber/pannenhilfe/abschleppen-kosten",
    "/pl/poradnik",
    "/en/car-sales/audi-a4-17",
    "/en/unknown/page",
    "/pl",
  ];
  let preferences = [None, Some(Locale::De), Some(Locale::Pl), Some(Locale::En)];
  for path in paths {
    for preferred in preferences {
      let current = detect_locale_from_path(path, preferred);
      assert_eq!(get_locale_href(table(), path, current, preferred), path, "{path} {preferred:?}");
    }
  }
}

#[test]
fn unprefixed_path_missing_under_preference_uses_default_table() {
  assert_eq!(
    get_locale_href(table(), "/abschleppdienst", Locale::Pl, Some(Locale::En)),
    "/pl/pomoc-drogowa"
  );
  assert_eq!(get_locale_href(table(), "/ratgeber", Locale::En, Some(Locale::Pl)), "/en/guides");
  assert_eq!(
    get_locale_href(table(), "/autohandel-gebrauchtwagen/bmw-320d", Locale::De, Some(Locale::En)),
    "/autohandel-gebrauchtwagen/bmw-320d"
  );

  let m = match_route(table(), "/kontakt", Some(Locale::En)).unwrap();
  assert_eq!((m.locale, m.key), (Locale::De, RouteKey::Contact));
  // Paths that exist under the preference keep matching there.
  let m = match_route(table(), "/car-sales/x", Some(Locale::En)).unwrap();
  assert_eq!((m.locale, m.key), (Locale::En, RouteKey::Vehicles));
}

#[test]
fn trailing_slash_is_normalized() {
  assert_eq!(get_locale_href(table(), "/kontakt/", Locale::De, None), "/kontakt");
  assert_eq!(get_locale_href(table(), "/en/contact/", Locale::Pl, None), "/pl/kontakt");
}

#[test]
fn unknown_path_rewrites_prefix_only() {
  assert_eq!(get_locale_href(table(), "/some/legacy-page", Locale::Pl, None), "/pl/some/legacy-page");
  assert_eq!(get_locale_href(table(), "/en/some/legacy-page", Locale::De, None), "/some/legacy-page");
}

#[test]
fn query_and_fragment_survive() {
  assert_eq!(
    get_locale_href(table(), "/kontakt?ref=nav#form", Locale::En, None),
    "/en/contact?ref=nav#form"
  );
}

#[test]
fn prefix_match_needs_segment_boundary() {
  // "/skup-aut" is a prefix of "/skup-aut-handel" as a string, not as a segment.
  let m = match_route(table(), "/pl/skup-aut-handel/vw-golf-3", None).unwrap();
  assert_eq!(m.key, RouteKey::Vehicles);
  assert_eq!(m.remainder, "/vw-golf-3");
}

#[test]
fn prefix_match_takes_first_entry_in_table_order() {
  let t = RouteTable::new(Locale::ALL.into_iter().map(|l| {
    let mut entries: Vec<(RouteKey, String)> =
      RouteKey::ALL.into_iter().map(|k| (k, format!("/{}", k.as_str()))).collect();
    entries[10] = (RouteKey::Vehicles, "/shop".to_string());
    entries[11] = (RouteKey::Blog, "/shop/guides".to_string());
    (l, entries)
  }))
  .unwrap();
  let m = match_route(&t, "/shop/guides/x", None).unwrap();
  assert_eq!(m.key, RouteKey::Vehicles);
  assert_eq!(m.remainder, "/guides/x");
  // Exact match still beats the earlier prefix.
  assert_eq!(match_route(&t, "/shop/guides", None).unwrap().key, RouteKey::Blog);
}

#[test]
fn match_route_unknown_is_none() {
  assert!(match_route(table(), "/nicht-vorhanden", None).is_none());
  assert!(match_route(table(), "/en/kontakt", None).is_none());
}

#[test]
fn alternates_cover_every_locale() {
  let alts = alternates(table(), "/abschleppdienst", None);
  assert_eq!(
    alts,
    vec![
      (Locale::De, "/abschleppdienst".to_string()),
      (Locale::Pl, "/pl/pomoc-drogowa".to_string()),
      (Locale::En, "/en/towing".to_string()),
    ]
  );
}

fn builtin_rows() -> Vec<(Locale, Vec<(RouteKey, String)>)> {
  Locale::ALL
    .into_iter()
    .map(|l| (l, table().entries(l).map(|(k, p)| (k, p.to_string())).collect()))
    .collect()
}

#[test]
fn missing_route_is_rejected() {
  let mut rows = builtin_rows();
  rows[2].1.retain(|(k, _)| *k != RouteKey::Faq);
  let err = RouteTable::new(rows).err().unwrap();
  assert_eq!(err, RouteTableError::MissingRoute { locale: Locale::En, key: RouteKey::Faq });
}

#[test]
fn missing_locale_is_rejected() {
  let mut rows = builtin_rows();
  rows.remove(1);
  let err = RouteTable::new(rows).err().unwrap();
  assert_eq!(err, RouteTableError::MissingLocale(Locale::Pl));
}

#[test]
fn duplicate_key_is_rejected() {
  let mut rows = builtin_rows();
  rows[0].1.push((RouteKey::Faq, "/haeufige-fragen".to_string()));
  let err = RouteTable::new(rows).err().unwrap();
  assert_eq!(err, RouteTableError::DuplicateKey { locale: Locale::De, key: RouteKey::Faq });
}

#[test]
fn duplicate_path_is_rejected() {
  let mut rows = builtin_rows();
  for entry in &mut rows[0].1 {
    if entry.0 == RouteKey::About {
      entry.1 = "/faq".to_string();
    }
  }
  let err = RouteTable::new(rows).err().unwrap();
  assert_eq!(
    err,
    RouteTableError::DuplicatePath {
      locale: Locale::De,
      path: "/faq".into(),
      first: RouteKey::About,
      second: RouteKey::Faq,
    }
  );
}

#[test]
fn relative_path_is_rejected() {
  let mut rows = builtin_rows();
  rows[1].1[3].1 = "wynajem".to_string();
  let err = RouteTable::new(rows).err().unwrap();
  assert!(matches!(err, RouteTableError::InvalidPath { locale: Locale::Pl, key: RouteKey::Rental, .. }));
}

#[test]
fn route_key_parses_camel_case() {
  assert_eq!("carSales".parse::<RouteKey>(), Ok(RouteKey::CarSales));
  assert!("car_sales".parse::<RouteKey>().is_err());
}
