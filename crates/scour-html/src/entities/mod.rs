//! Character reference decoding and encoding.
//!
//! Decoding follows [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//! in the data state, as a pure text transform: it never interprets markup, so
//! a `<` in the input stays a literal `<` in the output.
//!
//! Encoding escapes everything outside printable ASCII, so that encoding any
//! decoded text and decoding it again gives back exactly that text.

use core::fmt::Write;

/// Named character reference lookup table per § 13.5.
pub mod named_character_references;

use named_character_references::{LONGEST_LEGACY_NAME, lookup_entity};

/// Decode named and numeric character references into literal characters.
///
/// Also applies the input stream preprocessing the HTML parser performs on
/// text: CR LF and lone CR become LF, and NUL characters are dropped.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(offset) = text[pos..].find(['&', '\r', '\0']) {
        let at = pos + offset;
        decoded.push_str(&text[pos..at]);
        let rest = &text[at..];

        pos = at + match rest.as_bytes()[0] {
            // [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
            // "normalize newlines"
            b'\r' => {
                decoded.push('\n');
                if rest[1..].starts_with('\n') { 2 } else { 1 }
            }
            // "A character token that is U+0000 NULL: Parse error. Ignore the token."
            b'\0' => 1,
            _ => consume_character_reference(rest, &mut decoded),
        };
    }

    decoded.push_str(&text[pos..]);
    decoded
}

/// Decode one reference at the start of `input` (which begins with `&`).
///
/// Returns the number of bytes consumed. When no reference matches, the
/// ampersand is kept as a literal.
fn consume_character_reference(input: &str, decoded: &mut String) -> usize {
    let after_ampersand = &input[1..];

    let reference = match after_ampersand.strip_prefix('#') {
        Some(numeric) => numeric_reference(numeric).map(|(c, len)| (c, len + 1)),
        None => named_reference(after_ampersand),
    };

    if let Some((c, len)) = reference {
        decoded.push(c);
        1 + len
    } else {
        decoded.push('&');
        1
    }
}

/// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
///
/// `input` follows the `#`. Returns the character and the bytes consumed
/// after the `#`, including an optional `;`.
fn numeric_reference(input: &str) -> Option<(char, usize)> {
    let (radix, prefix_len) = if input.starts_with(['x', 'X']) {
        (16, 1)
    } else {
        (10, 0)
    };
    let digits = &input[prefix_len..];
    let digit_len = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if digit_len == 0 {
        // "absence-of-digits-in-numeric-character-reference parse error"
        return None;
    }

    // Overflow saturates to a value outside the Unicode range.
    let code = u32::from_str_radix(&digits[..digit_len], radix).unwrap_or(u32::MAX);
    let mut len = prefix_len + digit_len;
    if digits[digit_len..].starts_with(';') {
        len += 1;
    }
    Some((replacement_for_code_point(code), len))
}

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// "If the number is 0x00 ... is greater than 0x10FFFF ... is a surrogate ...
/// set the character reference code to 0xFFFD."
fn replacement_for_code_point(code: u32) -> char {
    match code {
        0 => '\u{FFFD}',
        _ => char::from_u32(code).unwrap_or('\u{FFFD}'),
    }
}

/// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
///
/// `input` follows the `&`. Prefers an exact match with a semicolon, then the
/// longest legacy name that prefixes the alphanumeric run.
fn named_reference(input: &str) -> Option<(char, usize)> {
    let run_len = input
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(input.len());
    if run_len == 0 {
        return None;
    }

    if input[run_len..].starts_with(';')
        && let Some(c) = lookup_entity(&input[..=run_len])
    {
        return Some((c, run_len + 1));
    }

    (2..=run_len.min(LONGEST_LEGACY_NAME))
        .rev()
        .find_map(|len| lookup_entity(&input[..len]).map(|c| (c, len)))
}

/// Escape text so it can be embedded in element content or a double-quoted
/// attribute value.
///
/// `&`, `<` and `>` become named references; space, `!` and `#` through `~`
/// pass through; every other character (quotes, controls, non-ASCII) becomes
/// a decimal numeric reference.
#[must_use]
pub fn encode_entities(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => encoded.push_str("&amp;"),
            '<' => encoded.push_str("&lt;"),
            '>' => encoded.push_str("&gt;"),
            ' ' | '!' | '#'..='~' => encoded.push(c),
            _ => {
                let _ = write!(encoded, "&#{};", u32::from(c));
            }
        }
    }
    encoded
}
