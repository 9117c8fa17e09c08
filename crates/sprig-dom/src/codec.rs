//! Entity codec
//!
//! Raw attribute and data values are stored in encoded (escaped) form;
//! every read goes through [`decode`] and every scalar write through
//! [`encode`]. Both are pure and `decode(encode(s)) == s` for any `s`.

/// Longest entity body we will attempt to parse, `&` and `;` excluded.
const MAX_ENTITY_LEN: usize = 32;

/// Escape characters unsafe in attribute-value position.
pub fn encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reverse entity escaping.
///
/// Unrecognized or malformed references are passed through verbatim, which
/// makes decoding idempotent on already-decoded ASCII text.
pub fn decode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        match after.find(';') {
            Some(semi) if semi <= MAX_ENTITY_LEN => {
                let body = &after[..semi];
                if let Some(ch) = decode_entity(body) {
                    out.push(ch);
                    rest = &after[semi + 1..];
                    continue;
                }
            }
            _ => {}
        }

        // Not an entity we know; keep the ampersand literal.
        out.push('&');
        rest = after;
    }

    out.push_str(rest);
    out
}

fn decode_entity(body: &str) -> Option<char> {
    match body {
        "amp" => return Some('&'),
        "lt" => return Some('<'),
        "gt" => return Some('>'),
        "quot" => return Some('"'),
        "apos" => return Some('\''),
        "nbsp" => return Some('\u{a0}'),
        _ => {}
    }

    let digits = body.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}
