//! Python string literal decoding
//!
//! Only plain and raw text literals decode. Byte strings, f-strings and
//! `\N{...}` escapes return `None` and the caller treats the value as opaque.

/// Decode the full text of a `string` node (prefix, quotes and body)
pub(crate) fn decode_string_literal(raw: &str) -> Option<String> {
    let prefix_len = raw
        .find(|c: char| c == '\'' || c == '"')
        .filter(|&n| n <= 2)?;
    let prefix = raw[..prefix_len].to_ascii_lowercase();
    if prefix.chars().any(|c| c != 'r' && c != 'u') || prefix == "ur" || prefix == "ru" {
        return None;
    }
    let is_raw = prefix.contains('r');

    let quoted = &raw[prefix_len..];
    let quote = if quoted.starts_with("\"\"\"") || quoted.starts_with("'''") {
        &quoted[..3]
    } else {
        &quoted[..1]
    };
    if quoted.len() < quote.len() * 2 || !quoted.ends_with(quote) {
        return None;
    }
    let body = &quoted[quote.len()..quoted.len() - quote.len()];

    if is_raw {
        Some(body.to_string())
    } else {
        unescape(body)
    }
}

fn unescape(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            // line continuation inside the literal
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0b}'),
            '0'..='7' => {
                let mut value = next.to_digit(8)?;
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(value)?);
            }
            'x' => out.push(hex_escape(&mut chars, 2)?),
            'u' => out.push(hex_escape(&mut chars, 4)?),
            'U' => out.push(hex_escape(&mut chars, 8)?),
            'N' => return None,
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    Some(out)
}

fn hex_escape(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, digits: usize) -> Option<char> {
    let mut value: u32 = 0;
    for _ in 0..digits {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    char::from_u32(value)
}
