//! XML decoding helpers.
//!
//! Sonos responses mix namespace prefixes (`dc:`, `upnp:`, `r:`) into element
//! and attribute names. Stripping them first lets the serde structs in this
//! crate use plain local names.

use crate::error::{ParseError, ParseResult};
use serde::de::DeserializeOwned;

/// Parse an XML string into `T` after stripping namespace prefixes.
pub fn parse<T: DeserializeOwned>(xml: &str) -> ParseResult<T> {
    let stripped = strip_namespaces(xml);
    quick_xml::de::from_str(&stripped)
        .map_err(|e| ParseError::XmlDeserializationFailed(e.to_string()))
}

/// Strip namespace prefixes from element and attribute names and drop `xmlns`
/// declarations.
///
/// Input: `<dc:title xmlns:dc="x">Song</dc:title>`
/// Output: `<title>Song</title>`
pub fn strip_namespaces(xml: &str) -> String {
    let mut out = String::with_capacity(xml.len());
    let mut rest = xml;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open..];

        let close = match after.find('>') {
            Some(idx) => idx,
            None => {
                out.push_str(after);
                return out;
            }
        };

        let tag = &after[..=close];
        if tag.starts_with("<?") || tag.starts_with("<!") {
            out.push_str(tag);
        } else {
            out.push_str(&strip_tag(tag));
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

/// Rewrite a single `<...>` tag. Attribute values are copied verbatim, so a
/// `>` inside a quoted value is not expected (Sonos escapes it).
fn strip_tag(tag: &str) -> String {
    let inner = &tag[1..tag.len() - 1];
    let (prefix, inner) = match inner.strip_prefix('/') {
        Some(name) => ("/", name),
        None => ("", inner),
    };
    let (inner, self_closing) = match inner.strip_suffix('/') {
        Some(body) => (body, true),
        None => (inner, false),
    };

    let name_end = inner
        .find(|c: char| c.is_whitespace())
        .unwrap_or(inner.len());
    let (name, mut attrs) = inner.split_at(name_end);

    let mut out = String::with_capacity(tag.len());
    out.push('<');
    out.push_str(prefix);
    out.push_str(local_name(name));

    loop {
        attrs = attrs.trim_start();
        if attrs.is_empty() {
            break;
        }
        let eq = match attrs.find('=') {
            Some(eq) => eq,
            None => break,
        };
        let attr_name = attrs[..eq].trim();
        let value_part = attrs[eq + 1..].trim_start();
        let quote = match value_part.chars().next() {
            Some(q @ ('"' | '\'')) => q,
            _ => break,
        };
        let value_end = match value_part[1..].find(quote) {
            Some(end) => end + 2,
            None => break,
        };
        let value = &value_part[..value_end];

        if !attr_name.starts_with("xmlns") {
            out.push(' ');
            out.push_str(local_name(attr_name));
            out.push('=');
            out.push_str(value);
        }
        attrs = &value_part[value_end..];
    }

    if self_closing {
        out.push('/');
    }
    out.push('>');
    out
}

fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map(|(_, local)| local).unwrap_or(name)
}
