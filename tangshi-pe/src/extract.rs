//! Markup extraction
//!
//! Pure functions from raw search-result markup to an optional image URL,
//! kept apart from the network call so the fragile part is testable offline
//! and swappable when the endpoint's markup changes.
//!
//! This is deliberately not a full HTML parser: it scans for the first
//! `<img>` tag whose `class` attribute carries the marker token and reads
//! its `src`, tolerating attribute order, quoting style, and whitespace.

/// Extract the `src` of the first `<img>` whose `class` contains
/// `marker_class` as a whole token.
///
/// Returns `None` when no such image exists, or when the first matching
/// image has no usable `src`: the first marker-class image decides the
/// outcome, later ones are not consulted.
pub fn first_image_src(html: &str, marker_class: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let mut pos = 0;

    while let Some(found) = lower[pos..].find("<img") {
        let after = pos + found + 4;
        let rest = &html[after..];

        // Reject tags that merely start with "img" (e.g. <imgfoo>)
        let boundary_ok = rest
            .chars()
            .next()
            .map_or(false, |c| c.is_whitespace() || c == '/' || c == '>');

        let Some(end_rel) = rest.find('>') else {
            // Unterminated tag at end of document
            return None;
        };

        if boundary_ok {
            let attrs = parse_attributes(&rest[..end_rel]);

            // Attribute names are case-insensitive; class values are not
            let class_hit = attrs.iter().any(|(name, value)| {
                name == "class" && value.split_whitespace().any(|token| token == marker_class)
            });

            if class_hit {
                // First marker-class image decides the outcome
                return attrs
                    .iter()
                    .find(|(name, _)| name == "src")
                    .map(|(_, value)| value.clone())
                    .filter(|value| !value.is_empty());
            }
        }

        pos = after + end_rel + 1;
    }

    None
}

/// Scan `name="value"` pairs out of a tag body.
///
/// Accepts single quotes, double quotes, unquoted values, and bare
/// attributes. Names are lowercased; values are returned verbatim.
fn parse_attributes(tag_body: &str) -> Vec<(String, String)> {
    let bytes = tag_body.as_bytes();
    let mut attrs = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }

        let name_start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'=' {
            i += 1;
        }
        let name = tag_body[name_start..i].to_ascii_lowercase();

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        if i < bytes.len() && bytes[i] == b'=' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }

            let value = if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
                let quote = bytes[i];
                i += 1;
                let value_start = i;
                while i < bytes.len() && bytes[i] != quote {
                    i += 1;
                }
                let value = &tag_body[value_start..i];
                if i < bytes.len() {
                    i += 1;
                }
                value
            } else {
                let value_start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                &tag_body[value_start..i]
            };

            if !name.is_empty() {
                attrs.push((name, value.to_string()));
            }
        } else if !name.is_empty() {
            attrs.push((name, String::new()));
        }
    }

    attrs
}
