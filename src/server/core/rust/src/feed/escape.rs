/* src/server/core/rust/src/feed/escape.rs */

/// Escape text for XML element content and attribute values.
pub fn xml_escape(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for ch in text.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&apos;"),
      _ => out.push(ch),
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plain_text_passthrough() {
    assert_eq!(xml_escape("Abschleppdienst Wien"), "Abschleppdienst Wien");
  }

  #[test]
  fn escapes_markup_characters() {
    assert_eq!(xml_escape(r#"A & B <c> "d" 'e'"#), "A &amp; B &lt;c&gt; &quot;d&quot; &apos;e&apos;");
  }

  #[test]
  fn non_ascii_untouched() {
    assert_eq!(xml_escape("Überführung – Wiedeń"), "Überführung – Wiedeń");
  }
}
