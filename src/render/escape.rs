//! Escaping rules, one per insertion context of the page template.

use std::borrow::Cow;

/// Escape for HTML text content (`<title>`, headings).
pub fn html_text(s: &str) -> Cow<'_, str> {
    escape_chars(s, |ch| match ch {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        _ => None,
    })
}

/// Escape for a double-quoted attribute value. After HTML parsing the
/// attribute holds exactly the input string.
pub fn html_attribute(s: &str) -> Cow<'_, str> {
    escape_chars(s, |ch| match ch {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    })
}

/// Reverse of [`html_text`] / [`html_attribute`] for the entities they emit.
pub fn unescape_html(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&"),
    )
}

/// Harden serialized JSON for a `<script>` element.
///
/// `</script` would close the element early and `<!--` switches the HTML
/// tokenizer into the escaped script state. Both are rewritten with JSON
/// escapes, so parsing the block still yields the original values. Every
/// other character, `<` included, is left literal.
pub fn script_json(json: &str) -> Cow<'_, str> {
    if !json.contains('<') {
        return Cow::Borrowed(json);
    }

    let mut out = String::with_capacity(json.len() + 16);
    let mut rest = json;
    while let Some(pos) = rest.find('<') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        if starts_with_ignore_ascii_case(after, "/script") {
            out.push_str("<\\/");
            rest = &after[1..];
        } else if after.starts_with("!--") {
            out.push_str("\\u003c");
            rest = after;
        } else {
            out.push('<');
            rest = after;
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn starts_with_ignore_ascii_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

fn escape_chars(s: &str, replacement: impl Fn(char) -> Option<&'static str>) -> Cow<'_, str> {
    if !s.chars().any(|ch| replacement(ch).is_some()) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match replacement(ch) {
            Some(rep) => out.push_str(rep),
            None => out.push(ch),
        }
    }
    Cow::Owned(out)
}
