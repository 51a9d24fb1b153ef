//! Text escaping and slugification for generated HTML.

/// Escape text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for XML character data (sitemap entries).
#[must_use]
pub fn escape_xml(text: &str) -> String {
    escape_html(text).replace("&#39;", "&apos;")
}

/// Slugify free text into a URL and anchor fragment.
///
/// # Rules
/// 1. Lowercase the entire string
/// 2. Replace whitespace, dashes and underscores with `-`
/// 3. Strip any character not in `[a-z0-9-]`
/// 4. Collapse consecutive dashes
/// 5. Trim leading/trailing dashes
///
/// The result may be empty; callers pick their own fallback.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_whitespace() || c == '-' || c == '_' {
            if !slug.ends_with('-') {
                slug.push('-');
            }
        } else if c.is_ascii_alphanumeric() {
            slug.push(c);
        }
    }
    slug.trim_matches('-').to_string()
}
