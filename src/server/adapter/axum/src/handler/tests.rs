/* src/server/adapter/axum/src/handler/tests.rs */

use std::path::Path;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use kfz_core::content::{DEFAULT_AUTHOR, parse_document};
use kfz_core::{Catalog, RouteTable, SiteServer};
use serde_json::Value;
use tower::ServiceExt;

use super::build_router;

const BASE: &str = "https://www.example.at";

fn source(locale: &str, cluster: &str, slug: &str, extra: &str) -> String {
  format!(
    "---\ntitle: {slug}\ndescription: about {slug}\ndate: 2024-05-01\nlocale: {locale}\ncluster: {cluster}\nslug: {slug}\n{extra}---\n## Ablauf\nText\n"
  )
}

fn catalog() -> Catalog {
  let posts = [
    source("de", "roadside", "abschleppen", "translationKey: tow\ntags: [wien]\n"),
    source("de", "roadside", "pannenhilfe-nacht", "tags: [wien]\n"),
    source("en", "roadside", "towing-guide", "translationKey: tow\n"),
    source("de", "buying", "entwurf", "draft: true\n"),
  ]
  .iter()
  .map(|s| parse_document(RouteTable::shared(), Path::new("t.md"), s, DEFAULT_AUTHOR).unwrap())
  .collect();
  Catalog::new(posts).unwrap()
}

fn app() -> axum::Router {
  build_router(SiteServer::new(BASE).site_name("KFZ Wien").catalog(catalog()).into_parts())
}

async fn get(uri: &str, cookie: Option<&str>) -> Response {
  let mut req = Request::builder().uri(uri);
  if let Some(cookie) = cookie {
    req = req.header(header::COOKIE, cookie);
  }
  app().oneshot(req.body(Body::empty()).unwrap()).await.unwrap()
}

async fn text(resp: Response) -> String {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  String::from_utf8(bytes.to_vec()).unwrap()
}

async fn json(resp: Response) -> Value {
  serde_json::from_str(&text(resp).await).unwrap()
}

fn set_cookie(resp: &Response) -> Option<String> {
  resp.headers().get(header::SET_COOKIE).map(|v| v.to_str().unwrap().to_string())
}

#[tokio::test]
async fn static_page_descriptor_and_cookie() {
  let resp = get("/kontakt/", None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(
    set_cookie(&resp).as_deref(),
    Some("NEXT_LOCALE=de; Path=/; Max-Age=15552000; SameSite=Lax")
  );
  let body = json(resp).await;
  assert_eq!(body["locale"], "de");
  assert_eq!(body["routeKey"], "contact");
  assert_eq!(body["path"], "/kontakt");
  assert_eq!(body["alternates"]["pl"], "/pl/kontakt");
  assert_eq!(body["alternates"]["en"], "/en/contact");
}

#[tokio::test]
async fn matching_cookie_is_not_rewritten() {
  let resp = get("/pl/kontakt", Some("NEXT_LOCALE=pl")).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(set_cookie(&resp).is_none());
}

#[tokio::test]
async fn cookie_decides_unprefixed_shared_paths() {
  // `/faq` exists in every locale, so the stored preference picks the language.
  let body = json(get("/faq", Some("NEXT_LOCALE=en")).await).await;
  assert_eq!(body["locale"], "en");
  // `/kontakt` is not an English path and falls back to the URL's locale.
  let resp = get("/kontakt", Some("NEXT_LOCALE=en")).await;
  assert!(set_cookie(&resp).unwrap().starts_with("NEXT_LOCALE=de;"));
  assert_eq!(json(resp).await["locale"], "de");
}

#[tokio::test]
async fn location_page_forces_locale() {
  let resp = get("/towing-vienna", Some("NEXT_LOCALE=de")).await;
  assert!(set_cookie(&resp).unwrap().starts_with("NEXT_LOCALE=en;"));
  let body = json(resp).await;
  assert_eq!(body["locale"], "en");
  assert_eq!(body["location"]["city"], "Vienna");
  assert!(body.get("routeKey").is_none());
}

#[tokio::test]
async fn blog_index_lists_published_posts() {
  let body = json(get("/ratgeber", None).await).await;
  let slugs: Vec<&str> = body["posts"].as_array().unwrap().iter().map(|p| p["slug"].as_str().unwrap()).collect();
  assert_eq!(slugs, ["abschleppen", "pannenhilfe-nacht"]);
  assert_eq!(body["categories"][0]["slug"], "pannenhilfe");
  assert_eq!(body["categories"][0]["count"], 2);
}

#[tokio::test]
async fn category_page_has_localized_alternates() {
  let body = json(get("/en/guides/roadside-assistance", None).await).await;
  assert_eq!(body["category"]["cluster"], "roadside");
  assert_eq!(body["posts"].as_array().unwrap().len(), 1);
  assert_eq!(body["alternates"]["de"], "/ratgeber/pannenhilfe");
  assert_eq!(body["alternates"]["pl"], "/pl/poradnik/pomoc-drogowa");
}

#[tokio::test]
async fn post_page_carries_translations_and_related() {
  let body = json(get("/ratgeber/pannenhilfe/abschleppen", None).await).await;
  let post = &body["post"];
  assert_eq!(post["slug"], "abschleppen");
  assert_eq!(post["readingTime"], 1);
  assert_eq!(post["headings"][0]["slug"], "ablauf");
  assert!(post["body"].as_str().unwrap().contains("Text"));
  assert_eq!(post["translations"]["en"], "/en/guides/roadside-assistance/towing-guide");
  assert_eq!(post["related"][0]["slug"], "pannenhilfe-nacht");
  assert_eq!(body["alternates"]["en"], "/en/guides/roadside-assistance/towing-guide");
  assert!(body["alternates"].get("pl").is_none());
}

#[tokio::test]
async fn draft_resolves_by_exact_url() {
  let body = json(get("/ratgeber/autokauf/entwurf", None).await).await;
  assert_eq!(body["post"]["draft"], true);
  assert_eq!(body["alternates"]["de"], "/ratgeber/autokauf/entwurf");
}

#[tokio::test]
async fn unknown_pages_are_404_json() {
  for uri in [
    "/gibt-es-nicht",
    "/ratgeber/unbekannt",
    "/ratgeber/autokauf/abschleppen",
    "/kontakt/extra",
    "/autohandel-gebrauchtwagen/bmw-320d",
  ] {
    let resp = get(uri, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
    let body = json(resp).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
  }
  let body = json(get("/en/nothing-here", None).await).await;
  assert_eq!(body["error"]["message"], "Page not found");
}

#[tokio::test]
async fn non_get_is_rejected() {
  let req = Request::builder().method("POST").uri("/kontakt").body(Body::empty()).unwrap();
  let resp = app().oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn locale_href_endpoint() {
  let resp = get("/api/locale-href?path=/autohandel-gebrauchtwagen/bmw-320d&target=pl", None).await;
  assert_eq!(json(resp).await["href"], "/pl/skup-aut-handel/bmw-320d");

  let resp = get("/api/locale-href?path=kontakt&target=pl", None).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let resp = get("/api/locale-href?path=/kontakt&target=fr", None).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn messages_endpoint() {
  let body = json(get("/api/messages/en", None).await).await;
  assert_eq!(body["messages"]["cta.callNow"], "Call now");
  assert_eq!(body["messages"]["nav.contact"], "Contact");
  assert_eq!(get("/api/messages/fr", None).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn vehicles_endpoint_without_source_is_empty() {
  let body = json(get("/api/vehicles?page=2", None).await).await;
  assert_eq!(body["vehicles"], serde_json::json!([]));
}

#[tokio::test]
async fn sitemap_is_xml() {
  let resp = get("/sitemap.xml", None).await;
  assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/xml; charset=utf-8");
  let xml = text(resp).await;
  assert!(xml.contains("<loc>https://www.example.at/en/contact</loc>"));
  assert!(xml.contains("<loc>https://www.example.at/ratgeber/pannenhilfe/abschleppen</loc>"));
  assert!(!xml.contains("entwurf"));
}

#[tokio::test]
async fn rss_per_locale() {
  let xml = text(get("/rss.xml", None).await).await;
  assert!(xml.contains("<title>KFZ Wien | Alle Ratgeber</title>"));
  assert!(xml.contains("/ratgeber/pannenhilfe/abschleppen</link>"));

  let xml = text(get("/en/rss.xml", None).await).await;
  assert!(xml.contains("<language>en</language>"));
  assert!(xml.contains("towing-guide"));
  assert!(!xml.contains("abschleppen"));

  assert_eq!(get("/fr/rss.xml", None).await.status(), StatusCode::NOT_FOUND);
}
