/* src/server/core/rust/src/messages.rs */

//! Locale-keyed UI strings.
//!
//! Each key maps to one string per locale through an exhaustive match, so a
//! key cannot be added without a German, Polish and English text.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::locale::Locale;
use crate::route::RouteKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKey {
  CallNow,
  RequestQuote,
  Available24h,
  WhatsApp,
  ReadingTime,
  PublishedOn,
  UpdatedOn,
  RelatedPosts,
  Translations,
  AllGuides,
  Featured,
  Takeaways,
  FaqHeading,
  VehiclesEmpty,
  VehiclePrice,
  VehicleMileage,
  LanguageSwitcher,
  NotFoundTitle,
  NotFoundBody,
  BackHome,
}

impl MessageKey {
  pub const ALL: [MessageKey; 20] = [
    MessageKey::CallNow,
    MessageKey::RequestQuote,
    MessageKey::Available24h,
    MessageKey::WhatsApp,
    MessageKey::ReadingTime,
    MessageKey::PublishedOn,
    MessageKey::UpdatedOn,
    MessageKey::RelatedPosts,
    MessageKey::Translations,
    MessageKey::AllGuides,
    MessageKey::Featured,
    MessageKey::Takeaways,
    MessageKey::FaqHeading,
    MessageKey::VehiclesEmpty,
    MessageKey::VehiclePrice,
    MessageKey::VehicleMileage,
    MessageKey::LanguageSwitcher,
    MessageKey::NotFoundTitle,
    MessageKey::NotFoundBody,
    MessageKey::BackHome,
  ];

  pub fn id(self) -> &'static str {
    match self {
      Self::CallNow => "cta.callNow",
      Self::RequestQuote => "cta.requestQuote",
      Self::Available24h => "cta.available24h",
      Self::WhatsApp => "cta.whatsApp",
      Self::ReadingTime => "blog.readingTime",
      Self::PublishedOn => "blog.publishedOn",
      Self::UpdatedOn => "blog.updatedOn",
      Self::RelatedPosts => "blog.related",
      Self::Translations => "blog.translations",
      Self::AllGuides => "blog.allGuides",
      Self::Featured => "blog.featured",
      Self::Takeaways => "blog.takeaways",
      Self::FaqHeading => "blog.faq",
      Self::VehiclesEmpty => "vehicles.empty",
      Self::VehiclePrice => "vehicles.price",
      Self::VehicleMileage => "vehicles.mileage",
      Self::LanguageSwitcher => "nav.language",
      Self::NotFoundTitle => "notFound.title",
      Self::NotFoundBody => "notFound.body",
      Self::BackHome => "notFound.backHome",
    }
  }

  // [de, pl, en]
  fn texts(self) -> [&'static str; 3] {
    match self {
      Self::CallNow => ["Jetzt anrufen", "Zadzwoń teraz", "Call now"],
      Self::RequestQuote => ["Angebot anfordern", "Poproś o wycenę", "Request a quote"],
      Self::Available24h => ["24/7 erreichbar", "Dostępni 24/7", "Available 24/7"],
      Self::WhatsApp => ["Per WhatsApp schreiben", "Napisz na WhatsApp", "Message us on WhatsApp"],
      Self::ReadingTime => ["Min. Lesezeit", "min czytania", "min read"],
      Self::PublishedOn => ["Veröffentlicht am", "Opublikowano", "Published on"],
      Self::UpdatedOn => ["Aktualisiert am", "Zaktualizowano", "Updated on"],
      Self::RelatedPosts => ["Weitere Artikel", "Powiązane artykuły", "Related articles"],
      Self::Translations => ["Auch verfügbar auf", "Dostępne także w", "Also available in"],
      Self::AllGuides => ["Alle Ratgeber", "Wszystkie poradniki", "All guides"],
      Self::Featured => ["Empfohlen", "Polecane", "Featured"],
      Self::Takeaways => ["Das Wichtigste in Kürze", "Najważniejsze w skrócie", "Key takeaways"],
      Self::FaqHeading => ["Häufige Fragen", "Częste pytania", "Frequently asked questions"],
      Self::VehiclesEmpty => [
        "Derzeit sind keine Fahrzeuge verfügbar.",
        "Obecnie brak dostępnych pojazdów.",
        "No vehicles are currently available.",
      ],
      Self::VehiclePrice => ["Preis", "Cena", "Price"],
      Self::VehicleMileage => ["Kilometerstand", "Przebieg", "Mileage"],
      Self::LanguageSwitcher => ["Sprache", "Język", "Language"],
      Self::NotFoundTitle => ["Seite nicht gefunden", "Nie znaleziono strony", "Page not found"],
      Self::NotFoundBody => [
        "Die gesuchte Seite existiert nicht oder wurde verschoben.",
        "Szukana strona nie istnieje lub została przeniesiona.",
        "The page you are looking for does not exist or has moved.",
      ],
      Self::BackHome => ["Zur Startseite", "Strona główna", "Back to home"],
    }
  }
}

/// Text for `key` in `locale`.
pub fn t(locale: Locale, key: MessageKey) -> &'static str {
  key.texts()[locale.index()]
}

/// Navigation label of a route.
pub fn nav_label(key: RouteKey, locale: Locale) -> &'static str {
  let texts: [&str; 3] = match key {
    RouteKey::Home => ["Startseite", "Strona główna", "Home"],
    RouteKey::Towing => ["Abschleppdienst", "Pomoc drogowa", "Towing"],
    RouteKey::CarSales => ["Autoankauf", "Skup aut", "Car buying"],
    RouteKey::Rental => ["Autovermietung", "Wynajem aut", "Car rental"],
    RouteKey::Transport => ["Transporte", "Transport", "Transport"],
    RouteKey::About => ["Über uns", "O nas", "About us"],
    RouteKey::Contact => ["Kontakt", "Kontakt", "Contact"],
    RouteKey::Imprint => ["Impressum", "Nota prawna", "Imprint"],
    RouteKey::Privacy => ["Datenschutz", "Polityka prywatności", "Privacy"],
    RouteKey::Faq => ["FAQ", "FAQ", "FAQ"],
    RouteKey::Vehicles => ["Gebrauchtwagen", "Samochody używane", "Used cars"],
    RouteKey::Blog => ["Ratgeber", "Poradnik", "Guides"],
  };
  texts[locale.index()]
}

/// Every message of `locale`, keyed by message id, plus `nav.*` labels.
pub fn all_messages(locale: Locale) -> BTreeMap<String, &'static str> {
  let mut out: BTreeMap<String, &'static str> =
    MessageKey::ALL.into_iter().map(|k| (k.id().to_string(), t(locale, k))).collect();
  for key in RouteKey::ALL {
    out.insert(format!("nav.{}", key.as_str()), nav_label(key, locale));
  }
  out
}
