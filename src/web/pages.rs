//! HTML pages served to the browser

/// Wrap a fragment of trusted markup in a bare HTML document
#[must_use]
pub fn simple_page(body: &str) -> String {
    format!(
        r"<!DOCTYPE html>
<html>
  <body>
    {body}
  </body>
</html>
"
    )
}

/// Landing page linking to the provider's consent screen
///
/// `authorize_url` must already be a serialized URL; its query values are
/// percent-encoded so it cannot break out of the attribute.
#[must_use]
pub fn link_page(authorize_url: &str) -> String {
    simple_page(&format!(
        r#"<a href="{authorize_url}">Authorize this app</a>"#
    ))
}

/// Error page with `message` shown in a `<pre>` block
///
/// The message often comes straight from the provider, so it is escaped.
#[must_use]
pub fn error_page(message: &str) -> String {
    format!(
        r"<!DOCTYPE html>
<html>
  <body>
  <h2>An error was encountered</h2>
  <pre>{}</pre>
  </body>
</html>
",
        escape_html(message)
    )
}

/// Escape text for use in HTML content or quoted attributes
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
