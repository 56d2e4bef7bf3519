use std::borrow::Cow;

/// Replace the five XML-special characters with entities
///
/// Every other character, including control and non-ASCII characters, is
/// copied through unchanged.
pub fn escape_xml(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '"', '<', '>', '\'']) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 16);
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Whether XML 1.0 allows `c` anywhere in a document, escaped or not
pub fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
        || (c >= '\u{20}' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

/// First character of `input` that cannot appear in an XML document
pub fn find_illegal_char(input: &str) -> Option<char> {
    input.chars().find(|&c| !is_xml_char(c))
}

/// Whether `name` can be used as the local part of a prefixed element name
pub fn is_valid_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
