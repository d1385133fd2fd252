//! Symmetric markup escaping.
//!
//! | char | escaped  |
//! |------|----------|
//! | `&`  | `&amp;`  |
//! | `<`  | `&lt;`   |
//! | `>`  | `&gt;`   |
//! | `"`  | `&quot;` |
//! | `=`  | `&#61;`  |
//!
//! [`unescape`] inverts [`escape`] exactly and also accepts `&apos;` and
//! numeric references.

use std::borrow::Cow;

use memchr::{memchr2, memchr3};

use crate::error::ParseError;

/// Escape text or an attribute value.
///
/// # Examples
///
/// ```
/// use richspan::markup::escape;
///
/// assert_eq!(escape("a<b"), "a&lt;b");
/// assert_eq!(escape("x=\"&lt;\""), "x&#61;&quot;&amp;lt;&quot;");
/// assert_eq!(escape("plain"), "plain");
/// ```
pub fn escape(text: &str) -> Cow<'_, str> {
    let Some(first) = find_special(text.as_bytes()) else {
        return Cow::Borrowed(text);
    };

    let mut result = String::with_capacity(text.len() + text.len() / 8 + 8);
    result.push_str(&text[..first]);
    for c in text[first..].chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '=' => result.push_str("&#61;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

fn find_special(bytes: &[u8]) -> Option<usize> {
    match (memchr3(b'&', b'<', b'>', bytes), memchr2(b'"', b'=', bytes)) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Text for a named entity: the five XML entities.
fn named_entity(entity: &str) -> Option<&'static str> {
    match entity {
        "amp" => Some("&"),
        "lt" => Some("<"),
        "gt" => Some(">"),
        "quot" => Some("\""),
        "apos" => Some("'"),
        _ => None,
    }
}

/// Resolve the body of an entity reference (between `&` and `;`).
pub fn resolve_entity(entity: &str) -> Option<char> {
    if let Some(text) = named_entity(entity) {
        return text.chars().next();
    }

    let code = if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        entity.strip_prefix('#')?.parse::<u32>().ok()?
    };
    char::from_u32(code)
}

/// Reverse [`escape`].
///
/// An `&` that does not start a known, terminated reference is an error.
pub fn unescape(text: &str) -> Result<Cow<'_, str>, ParseError> {
    Ok(quick_xml::escape::unescape_with(text, named_entity)?)
}
