//! Helper functions for the tokenizer.
//!
//! This module contains the input-level scanning used by the tokenizer:
//! - Cursor primitives ("consume the next input character", lookahead)
//! - Markup productions: comments, start tags with attributes, end tags
//! - Raw text helpers for `script`/`style` content
//!
//! Every scan function works on the remaining input and reports how many
//! bytes it consumed. A scan that returns `None` consumed nothing.

/// A read position over the input.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Start reading `input` at byte offset `pos`.
    #[must_use]
    pub const fn new(input: &'a str, pos: usize) -> Self {
        Self { input, pos }
    }

    /// Current byte offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Unconsumed input.
    #[must_use]
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Peek at the next character without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// "Consume the next input character"
    pub fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume `expected` if it is the next character.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// "If the next few characters are..."
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        self.rest().starts_with(target)
    }

    /// ASCII case-insensitive variant of [`Self::next_few_characters_are`].
    #[must_use]
    pub fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        self.rest()
            .get(..target.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(target))
    }

    /// Consume the given string from the input.
    /// Caller must have already verified the characters are present.
    pub const fn consume_string(&mut self, target: &str) {
        self.pos += target.len();
    }

    /// Consume a run of whitespace, returning how many bytes were skipped.
    pub fn skip_whitespace(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(is_whitespace_char) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Consume a tag or attribute name: one or more `[A-Za-z0-9_:-]`.
    pub fn consume_name(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let len = rest.find(|c: char| !is_name_char(c)).unwrap_or(rest.len());
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }

    /// Consume everything up to and including the next `delimiter`, returning
    /// the text before it. Consumes nothing if the delimiter never occurs.
    pub fn consume_through(&mut self, delimiter: char) -> Option<&'a str> {
        let rest = self.rest();
        let index = rest.find(delimiter)?;
        self.pos += index + delimiter.len_utf8();
        Some(&rest[..index])
    }
}

/// Whitespace inside tags: tab, LF, FF, CR and space.
#[must_use]
pub const fn is_whitespace_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0C' | '\r')
}

/// Characters allowed in tag and attribute names.
#[must_use]
pub const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '-')
}

// =============================================================================
// Markup Productions
// =============================================================================

/// A start tag as it appears in the source, before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStartTag<'a> {
    /// Tag name as written.
    pub name: &'a str,
    /// Attribute names and undecoded values, in source order.
    pub attributes: Vec<(&'a str, &'a str)>,
    /// A `/` appeared before the closing `>`.
    pub self_closing: bool,
    /// Bytes consumed, including `<` and `>`.
    pub len: usize,
}

/// Scan a comment: `<!--` content `-->`.
///
/// The terminator may overlap the opener, so `<!-->` is an empty comment.
/// Returns the content and the bytes consumed.
#[must_use]
pub fn scan_comment(input: &str) -> Option<(&str, usize)> {
    if !input.starts_with("<!--") {
        return None;
    }
    let close = input[2..].find("-->")? + 2;
    let content = input.get(4..close).unwrap_or_default();
    Some((content, close + 3))
}

/// True if `input` opens an end tag: `<`, optional whitespace, `/`.
#[must_use]
pub fn is_end_tag_open(input: &str) -> bool {
    let mut cursor = Cursor::new(input, 0);
    if !cursor.eat('<') {
        return false;
    }
    let _ = cursor.skip_whitespace();
    cursor.eat('/')
}

/// Scan an end tag: `<` ws* `/` ws* name, anything but `>`, then `>`.
///
/// Returns the tag name as written and the bytes consumed.
#[must_use]
pub fn scan_end_tag(input: &str) -> Option<(&str, usize)> {
    let mut cursor = Cursor::new(input, 0);
    if !cursor.eat('<') {
        return None;
    }
    let _ = cursor.skip_whitespace();
    if !cursor.eat('/') {
        return None;
    }
    let _ = cursor.skip_whitespace();
    let name = cursor.consume_name()?;
    let _ = cursor.consume_through('>')?;
    Some((name, cursor.position()))
}

/// Scan a start tag:
/// `<` ws* name ( ws+ attr ( ws* `=` ws* value )? )* ws* `/`? ws* `>`
#[must_use]
pub fn scan_start_tag(input: &str) -> Option<RawStartTag<'_>> {
    let mut cursor = Cursor::new(input, 0);
    if !cursor.eat('<') {
        return None;
    }
    let _ = cursor.skip_whitespace();
    let name = cursor.consume_name()?;

    let mut attributes = Vec::new();
    loop {
        let before_attribute = cursor;
        if cursor.skip_whitespace() == 0 {
            break;
        }
        let Some(attribute_name) = cursor.consume_name() else {
            cursor = before_attribute;
            break;
        };

        let before_equals = cursor;
        let _ = cursor.skip_whitespace();
        if cursor.eat('=') {
            let _ = cursor.skip_whitespace();
            // An `=` with nothing usable after it fails the whole tag.
            let value = scan_attribute_value(&mut cursor)?;
            attributes.push((attribute_name, value));
        } else {
            cursor = before_equals;
            attributes.push((attribute_name, ""));
        }
    }

    let _ = cursor.skip_whitespace();
    let self_closing = cursor.eat('/');
    let _ = cursor.skip_whitespace();
    if !cursor.eat('>') {
        return None;
    }

    Some(RawStartTag {
        name,
        attributes,
        self_closing,
        len: cursor.position(),
    })
}

/// [§ 13.2.5.36](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
/// [§ 13.2.5.37](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
/// [§ 13.2.5.38](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
///
/// A quoted value counts only if its closing quote is followed by whitespace,
/// `/` or `>`; otherwise the text is re-read as an unquoted value, quotes
/// included. An unquoted value is a non-empty run without whitespace or `>`.
fn scan_attribute_value<'a>(cursor: &mut Cursor<'a>) -> Option<&'a str> {
    if let Some(quote) = cursor.peek().filter(|&c| matches!(c, '"' | '\'')) {
        let mut quoted = *cursor;
        let _ = quoted.consume();
        if let Some(value) = quoted.consume_through(quote)
            && quoted
                .peek()
                .is_none_or(|next| is_whitespace_char(next) || matches!(next, '/' | '>'))
        {
            *cursor = quoted;
            return Some(value);
        }
    }

    let rest = cursor.rest();
    let len = rest
        .find(|c: char| is_whitespace_char(c) || c == '>')
        .unwrap_or(rest.len());
    if len == 0 {
        return None;
    }
    cursor.consume_string(&rest[..len]);
    Some(&rest[..len])
}

// =============================================================================
// Raw Text Helpers
// =============================================================================

/// Find the first end tag for raw text element `name` in `input`, ASCII
/// case-insensitively.
///
/// Returns `(text_len, consumed)`: the raw text is `input[..text_len]` and
/// the end tag finishes at `consumed`.
#[must_use]
pub fn find_raw_text_end(input: &str, name: &str) -> Option<(usize, usize)> {
    for (start, _) in input.match_indices('<') {
        let mut cursor = Cursor::new(input, start + 1);
        let _ = cursor.skip_whitespace();
        if !cursor.eat('/') {
            continue;
        }
        let _ = cursor.skip_whitespace();
        if !cursor.next_few_characters_are_case_insensitive(name) {
            continue;
        }
        cursor.consume_string(name);
        // No `>` anywhere after this point means no later candidate can close either.
        let _ = cursor.consume_through('>')?;
        return Some((start, cursor.position()));
    }
    None
}

/// Remove `open`/`close` delimiter pairs from `text`, keeping what they enclose.
/// An `open` without a matching `close` is left as is.
#[must_use]
pub fn strip_delimiters(text: &str, open: &str, close: &str) -> String {
    let mut stripped = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(open) {
        let inner = &rest[start + open.len()..];
        let Some(end) = inner.find(close) else {
            break;
        };
        stripped.push_str(&rest[..start]);
        stripped.push_str(&inner[..end]);
        rest = &inner[end + close.len()..];
    }
    stripped.push_str(rest);
    stripped
}
