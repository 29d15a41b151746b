//! Text cleanup for values pulled out of raw HTML.
//!
//! Extraction works on the undecoded page source, so attribute values and
//! text nodes still carry character references and layout whitespace.

/// Decodes the character references GitHub emits in attribute values and
/// short text nodes: the five named XML entities plus decimal and hex
/// numeric references. Unknown or malformed references are kept verbatim.
pub fn decode_html_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];
        match candidate.find(';').filter(|&end| end <= 10) {
            Some(end) => match decode_reference(&candidate[1..end]) {
                Some(c) => {
                    out.push(c);
                    rest = &candidate[end + 1..];
                }
                None => {
                    out.push('&');
                    rest = &candidate[1..];
                }
            },
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = name
                .strip_prefix("#x")
                .or_else(|| name.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse::<u32>().ok()?
            };
            char::from_u32(code)
        }
    }
}

/// Collapses runs of whitespace (including newlines from pretty-printed
/// markup) into single spaces and trims the ends.
pub fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_named_entities() {
        assert_eq!(decode_html_entities("C&amp;C &lt;b&gt;"), "C&C <b>");
        assert_eq!(decode_html_entities("&quot;x&quot; &apos;y&apos;"), "\"x\" 'y'");
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode_html_entities("a&#47;b&#x2F;c"), "a/b/c");
        assert_eq!(decode_html_entities("&#39;quoted&#39;"), "'quoted'");
    }

    #[test]
    fn test_unknown_or_broken_references_are_kept() {
        assert_eq!(decode_html_entities("R&D"), "R&D");
        assert_eq!(decode_html_entities("&nosuch;"), "&nosuch;");
        assert_eq!(decode_html_entities("&#xZZ;"), "&#xZZ;");
        assert_eq!(decode_html_entities("trailing &"), "trailing &");
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(decode_html_entities("Jupyter Notebook"), "Jupyter Notebook");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Jupyter\n      Notebook \t"), "Jupyter Notebook");
        assert_eq!(normalize_whitespace(""), "");
    }
}
